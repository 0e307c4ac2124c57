// Status sink module
//
// This module provides AppStatus, the handle to the status bar state shared by the
// progress adapters. It wraps StatusState in Arc<RwLock<T>> and emits change events
// so the window can refresh its status widgets.

use crate::models::{LogLevel, StatusSeverity};
use crate::ui::format::map_log_to_status;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when the status is modified
#[derive(Clone, Debug, PartialEq)]
pub enum StatusChange {
    /// A progress sample was stored
    ProgressChanged {
        percent: f64,
        is_indeterminate: bool,
        processed: Option<u64>,
        total: Option<u64>,
    },

    /// Progress display was removed
    ProgressCleared,

    /// Severity or message text changed
    MessageChanged {
        severity: StatusSeverity,
        message: String,
    },
}

/// Current contents of the status bar
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusState {
    pub severity: StatusSeverity,
    pub message: String,

    /// `None` when no operation is reporting progress
    pub progress: Option<f64>,
    pub is_indeterminate: bool,
    pub processed: Option<u64>,
    pub total: Option<u64>,
}

/// Handle to the status sink.
///
/// Created by the application alongside its main window and injected into every
/// adapter that reports status; there is no process-wide instance. Clones share
/// the same state.
///
/// Writes are expected to happen only on the UI thread: the progress adapters in
/// [`crate::ui::progress`] post every sample through a [`crate::ui::UiDispatcher`]
/// before calling [`set_progress()`](Self::set_progress).
pub struct AppStatus {
    state: Arc<RwLock<StatusState>>,
    status_tx: broadcast::Sender<StatusChange>,
}

impl AppStatus {
    /// Create a new AppStatus with an empty status and a broadcast buffer of 100 events
    pub fn new() -> Self {
        let (status_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(StatusState::default())),
            status_tx,
        }
    }

    /// Clone of the current status
    pub fn snapshot(&self) -> StatusState {
        self.read(|s| s.clone())
    }

    /// Execute a function with read access to the status
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StatusState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Subscribe to status change events
    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.status_tx.subscribe()
    }

    /// Store a progress sample.
    ///
    /// `percent` is clamped to `0.0..=100.0` for display; non-finite values are
    /// stored as 0. Counts are kept only when the producer supplies them.
    pub fn set_progress(
        &self,
        percent: f64,
        is_indeterminate: bool,
        processed: Option<u64>,
        total: Option<u64>,
    ) {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };

        self.write(|state| {
            state.progress = Some(percent);
            state.is_indeterminate = is_indeterminate;
            state.processed = processed;
            state.total = total;
        });

        self.emit(StatusChange::ProgressChanged {
            percent,
            is_indeterminate,
            processed,
            total,
        });
    }

    /// Show a busy indicator without a percentage
    pub fn set_indeterminate(&self) {
        self.set_progress(0.0, true, None, None);
    }

    /// Remove the progress display
    pub fn clear_progress(&self) {
        self.write(|state| {
            state.progress = None;
            state.is_indeterminate = false;
            state.processed = None;
            state.total = None;
        });

        self.emit(StatusChange::ProgressCleared);
    }

    /// Replace the status message
    pub fn set_status(&self, severity: StatusSeverity, message: impl Into<String>) {
        let message = message.into();

        self.write(|state| {
            state.severity = severity;
            state.message = message.clone();
        });

        self.emit(StatusChange::MessageChanged { severity, message });
    }

    /// Show a converter log line, mapping its level to a status severity
    pub fn report(&self, level: LogLevel, message: impl Into<String>) {
        self.set_status(map_log_to_status(level), message);
    }

    fn write<F>(&self, f: F)
    where
        F: FnOnce(&mut StatusState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    fn emit(&self, change: StatusChange) {
        tracing::trace!("Status change: {:?}", change);
        // Ignore send errors - it's OK if no one is listening
        let _ = self.status_tx.send(change);
    }
}

impl Default for AppStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AppStatus {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            status_tx: self.status_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_status_is_empty() {
        let status = AppStatus::new();
        let state = status.snapshot();

        assert_eq!(state.severity, StatusSeverity::Info);
        assert!(state.message.is_empty());
        assert_eq!(state.progress, None);
    }

    #[test]
    fn test_set_progress_with_counts() {
        let status = AppStatus::new();

        status.set_progress(40.0, false, Some(4), Some(10));

        let state = status.snapshot();
        assert_eq!(state.progress, Some(40.0));
        assert!(!state.is_indeterminate);
        assert_eq!(state.processed, Some(4));
        assert_eq!(state.total, Some(10));
    }

    #[test]
    fn test_set_progress_drops_stale_counts() {
        let status = AppStatus::new();

        status.set_progress(40.0, false, Some(4), Some(10));
        status.set_progress(50.0, false, None, None);

        let state = status.snapshot();
        assert_eq!(state.progress, Some(50.0));
        assert_eq!(state.processed, None);
        assert_eq!(state.total, None);
    }

    #[test]
    fn test_progress_is_clamped() {
        let status = AppStatus::new();

        status.set_progress(150.0, false, None, None);
        assert_eq!(status.read(|s| s.progress), Some(100.0));

        status.set_progress(-5.0, false, None, None);
        assert_eq!(status.read(|s| s.progress), Some(0.0));

        status.set_progress(f64::NAN, false, None, None);
        assert_eq!(status.read(|s| s.progress), Some(0.0));
    }

    #[test]
    fn test_indeterminate_and_clear() {
        let status = AppStatus::new();

        status.set_indeterminate();
        assert!(status.read(|s| s.is_indeterminate));

        status.clear_progress();
        let state = status.snapshot();
        assert_eq!(state.progress, None);
        assert!(!state.is_indeterminate);
    }

    #[test]
    fn test_report_maps_level() {
        let status = AppStatus::new();

        status.report(LogLevel::Warning, "Tile 12 has no palette");
        assert_eq!(status.read(|s| s.severity), StatusSeverity::Warning);

        status.report(LogLevel::Debug, "Reading header");
        let state = status.snapshot();
        assert_eq!(state.severity, StatusSeverity::Info);
        assert_eq!(state.message, "Reading header");
    }

    #[test]
    fn test_subscribe_to_changes() {
        let status = AppStatus::new();
        let mut rx = status.subscribe();

        status.set_progress(10.0, false, None, None);
        status.set_status(StatusSeverity::Success, "Done");

        assert_eq!(
            rx.try_recv().unwrap(),
            StatusChange::ProgressChanged {
                percent: 10.0,
                is_indeterminate: false,
                processed: None,
                total: None,
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            StatusChange::MessageChanged {
                severity: StatusSeverity::Success,
                message: "Done".to_string(),
            }
        );
    }

    #[test]
    fn test_clone_shares_state() {
        let status1 = AppStatus::new();
        let status2 = status1.clone();

        status1.set_progress(75.0, false, None, None);

        assert_eq!(status2.read(|s| s.progress), Some(75.0));
    }
}
