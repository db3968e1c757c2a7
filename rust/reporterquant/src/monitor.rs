use crate::errors::QuantError;
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};
use tracing::warn;

/// Progress reporting and cooperative cancellation for a normalization run.
///
/// All methods have no-op defaults so callers only implement the
/// capabilities they care about. Collectors poll `is_canceled` once per
/// match, which bounds how long a cancellation takes to be observed.
pub trait RunMonitor: Send + Sync {
    fn set_max_progress(&self, _max: u64) {}

    fn increase_progress(&self) {}

    fn is_canceled(&self) -> bool {
        false
    }

    fn cancel(&self) {}
}

/// Monitor that ignores progress and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMonitor;

impl RunMonitor for NoopMonitor {}

/// Cancellation-only monitor backed by an atomic flag.
#[derive(Debug, Default)]
pub struct CancelFlag {
    canceled: AtomicBool,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunMonitor for CancelFlag {
    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }
}

/// Receives errors raised inside collector threads.
///
/// The run is marked canceled whenever an error is captured; the sink only
/// decides how the error is surfaced to the caller.
pub trait ErrorSink: Send + Sync {
    fn capture(&self, err: &QuantError);
}

/// Default sink: log and move on. The canceled run state is what actually
/// stops the workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn capture(&self, err: &QuantError) {
        warn!("Error during ratio collection: {}", err);
    }
}
