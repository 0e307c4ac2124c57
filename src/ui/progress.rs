// Progress adaptation - background progress reports to UI-thread status updates
//
// Long-running work (map conversion, tile processing) reports progress from worker
// threads. A ProgressAdapter turns each report into one task on the UI dispatcher;
// the task updates the injected AppStatus and then calls the caller's own handler.
//
// Every sample is posted, in order, with no coalescing. Callers reporting at very
// high frequency should throttle on their side.

use crate::models::TileProgress;
use crate::state::AppStatus;
use crate::ui::dispatch::UiDispatcher;
use std::sync::Arc;

/// Receiver of progress reports.
///
/// Producers take `&dyn Progress<T>` (or a generic) and call `report` from any
/// thread. Plain closures implement it too.
pub trait Progress<T>: Send + Sync {
    fn report(&self, value: T);
}

impl<T, F> Progress<T> for F
where
    F: Fn(T) + Send + Sync,
{
    fn report(&self, value: T) {
        self(value)
    }
}

/// A progress payload understood by the status sink
pub trait ProgressSample: Send + 'static {
    /// Completion percentage
    fn percent(&self) -> f64;

    /// `(processed, total)` unit counts, when the payload carries them
    fn counts(&self) -> Option<(u64, u64)> {
        None
    }
}

impl ProgressSample for i32 {
    fn percent(&self) -> f64 {
        f64::from(*self)
    }
}

impl ProgressSample for f64 {
    fn percent(&self) -> f64 {
        *self
    }
}

impl ProgressSample for TileProgress {
    fn percent(&self) -> f64 {
        self.percent
    }

    fn counts(&self) -> Option<(u64, u64)> {
        Some((self.processed_tiles, self.total_tiles))
    }
}

/// Caller-supplied handler run on the UI thread after the status update
pub type ProgressCallback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Forwards progress samples to the status sink via the UI dispatcher.
///
/// # Example
/// ```ignore
/// let progress = tile_progress(dispatcher.clone(), status.clone(), None);
/// runtime.spawn(async move {
///     renderer.render_tiles(&map, &progress).await;
/// });
/// ```
pub struct ProgressAdapter<T: ProgressSample> {
    dispatcher: Arc<dyn UiDispatcher>,
    status: AppStatus,
    callback: Option<ProgressCallback<T>>,
}

impl<T: ProgressSample> ProgressAdapter<T> {
    pub fn new(dispatcher: Arc<dyn UiDispatcher>, status: AppStatus) -> Self {
        Self {
            dispatcher,
            status,
            callback: None,
        }
    }

    /// Also call `callback` with every sample, on the UI thread
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    fn with_optional_callback(mut self, callback: Option<ProgressCallback<T>>) -> Self {
        self.callback = callback;
        self
    }
}

impl<T: ProgressSample> Clone for ProgressAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            status: self.status.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<T: ProgressSample> Progress<T> for ProgressAdapter<T> {
    fn report(&self, sample: T) {
        let status = self.status.clone();
        let callback = self.callback.clone();

        self.dispatcher.post(Box::new(move || {
            let (processed, total) = match sample.counts() {
                Some((processed, total)) => (Some(processed), Some(total)),
                None => (None, None),
            };
            status.set_progress(sample.percent(), false, processed, total);

            if let Some(callback) = callback {
                callback(sample);
            }
        }));
    }
}

/// Adapter for integer percentages
pub fn percent_progress(
    dispatcher: Arc<dyn UiDispatcher>,
    status: AppStatus,
    callback: Option<ProgressCallback<i32>>,
) -> ProgressAdapter<i32> {
    ProgressAdapter::new(dispatcher, status).with_optional_callback(callback)
}

/// Adapter for real-valued percentages
pub fn fractional_progress(
    dispatcher: Arc<dyn UiDispatcher>,
    status: AppStatus,
    callback: Option<ProgressCallback<f64>>,
) -> ProgressAdapter<f64> {
    ProgressAdapter::new(dispatcher, status).with_optional_callback(callback)
}

/// Adapter for tile-processing progress, forwarding tile counts to the status sink
pub fn tile_progress(
    dispatcher: Arc<dyn UiDispatcher>,
    status: AppStatus,
    callback: Option<ProgressCallback<TileProgress>>,
) -> ProgressAdapter<TileProgress> {
    ProgressAdapter::new(dispatcher, status).with_optional_callback(callback)
}
