//! Helpers shared by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Layer counting `WARN` events.
#[derive(Clone, Default)]
pub(crate) struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
	pub(crate) fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}
}

impl<S: Subscriber> Layer<S> for WarnCounter {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		if *event.metadata().level() == Level::WARN {
			self.0.fetch_add(1, Ordering::SeqCst);
		}
	}
}

/// Runs `f` with a thread-local subscriber and returns the number of
/// warnings it emitted.
pub(crate) fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
	let counter = WarnCounter::default();
	let subscriber = tracing_subscriber::registry().with(counter.clone());
	let value = tracing::subscriber::with_default(subscriber, f);
	(value, counter.count())
}
