// UI dispatch - Marshals work onto the single UI thread
//
// Slint owns a single-threaded event loop; everything that touches UI-bound state
// (control styles, the status sink) must run there. Producers on tokio workers or
// plain threads hand closures to a UiDispatcher, which queues them for the UI thread.
//
// Two dispatchers are provided:
// - EventLoopDispatcher: posts to Slint's event loop via invoke_from_event_loop
// - QueuedDispatcher: an explicit queue drained by its owning thread (headless hosts, tests)

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// A unit of work queued for the UI thread
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Posts closures to the UI thread's task queue.
///
/// `post` never runs the task inline, even when called from the UI thread itself;
/// the task runs on a later turn of the queue. Posting is fire-and-forget.
pub trait UiDispatcher: Send + Sync {
    fn post(&self, task: UiTask);
}

/// Dispatcher backed by the Slint event loop
#[derive(Debug, Clone, Copy, Default)]
pub struct EventLoopDispatcher;

impl EventLoopDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl UiDispatcher for EventLoopDispatcher {
    fn post(&self, task: UiTask) {
        if let Err(e) = slint::invoke_from_event_loop(task) {
            // The event loop has stopped; nothing left to update
            tracing::warn!("Failed to queue task on UI event loop: {:?}", e);
        }
    }
}

/// Dispatcher backed by an explicit single-consumer queue.
///
/// Any thread may [`post`](UiDispatcher::post); the thread acting as the UI thread
/// runs queued tasks with [`drain()`](Self::drain).
pub struct QueuedDispatcher {
    task_tx: mpsc::UnboundedSender<UiTask>,
    task_rx: Mutex<mpsc::UnboundedReceiver<UiTask>>,
}

impl QueuedDispatcher {
    pub fn new() -> Self {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        Self {
            task_tx,
            task_rx: Mutex::new(task_rx),
        }
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.task_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Run queued tasks in FIFO order until the queue is empty.
    ///
    /// Tasks posted while draining run in the same call.
    ///
    /// # Returns
    /// The number of tasks that ran
    pub fn drain(&self) -> usize {
        let mut ran = 0;

        // The lock is released before each task runs so tasks may touch the queue.
        while let Some(task) = self.next_task() {
            task();
            ran += 1;
        }

        if ran > 0 {
            tracing::trace!("Drained {} UI tasks", ran);
        }

        ran
    }

    fn next_task(&self) -> Option<UiTask> {
        self.task_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }
}

impl Default for QueuedDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl UiDispatcher for QueuedDispatcher {
    fn post(&self, task: UiTask) {
        if self.task_tx.send(task).is_err() {
            tracing::warn!("Failed to queue UI task - receiver has been dropped");
        }
    }
}

/// Run a future on the Slint event loop.
///
/// Native dialogs must be driven from the UI thread, so the selection helpers in
/// [`crate::ui::storage`] are awaited through this rather than on tokio.
///
/// # Example
/// ```ignore
/// let ui_weak = ui.as_weak();
/// ui.on_browse_map(move || {
///     let anchor = ui_weak.clone();
///     spawn_on_ui(async move {
///         if let Some(path) = pick_file(&anchor, "Open Map", &["tmx"]).await {
///             tracing::info!("Map selected: {}", path);
///         }
///     });
/// });
/// ```
pub fn spawn_on_ui<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    if let Err(e) = slint::spawn_local(future) {
        tracing::warn!("Failed to spawn task on UI event loop: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_post_does_not_run_inline() {
        let dispatcher = QueuedDispatcher::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = counter.clone();
        dispatcher.post(Box::new(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.pending(), 1);

        assert_eq!(dispatcher.drain(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_drain_preserves_order() {
        let dispatcher = QueuedDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let log = log.clone();
            dispatcher.post(Box::new(move || log.lock().unwrap().push(i)));
        }

        dispatcher.drain();
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_task_can_inspect_and_drain_its_dispatcher() {
        let dispatcher = Arc::new(QueuedDispatcher::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = dispatcher.clone();
        let seen_clone = seen.clone();
        dispatcher.post(Box::new(move || {
            let follow_up = seen_clone.clone();
            inner.post(Box::new(move || follow_up.lock().unwrap().push(usize::MAX)));
            seen_clone.lock().unwrap().push(inner.pending());
            seen_clone.lock().unwrap().push(inner.drain());
        }));

        assert_eq!(dispatcher.drain(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![1, usize::MAX, 1]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_drain_empty_queue() {
        let dispatcher = QueuedDispatcher::new();
        assert_eq!(dispatcher.drain(), 0);
    }

    #[test]
    fn test_post_from_other_threads() {
        let dispatcher = Arc::new(QueuedDispatcher::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let dispatcher = dispatcher.clone();
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        let counter = counter.clone();
                        dispatcher.post(Box::new(move || {
                            counter.fetch_add(1, Ordering::SeqCst);
                        }));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.drain(), 100);
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }
}
