// UI module - view adapters between the map editor's windows and its background work
//
// This module contains:
// - dispatch: UiDispatcher implementations that marshal closures onto the UI thread
// - field_state: validation highlight of input controls
// - progress: progress reports from workers turned into status updates
// - storage: native open/save/folder dialogs behind simple async helpers
// - format: file size and log level display helpers

pub mod dispatch;
pub mod field_state;
pub mod format;
pub mod progress;
pub mod storage;

pub use dispatch::{EventLoopDispatcher, QueuedDispatcher, UiDispatcher, UiTask, spawn_on_ui};
pub use field_state::{
    BoundControl, BoundTextField, FieldStyler, StyledControl, TextControl, apply_field_state,
    set_field_state,
};
pub use format::{
    UNKNOWN_SIZE, format_file_size, format_file_size_async, group_thousands,
    map_log_name_to_status, map_log_to_status,
};
pub use progress::{
    Progress, ProgressAdapter, ProgressCallback, ProgressSample, fractional_progress,
    percent_progress, tile_progress,
};
pub use storage::{
    FileTypeFilter, FolderOptions, OpenFileOptions, RfdStorageProvider, SaveFileOptions,
    StorageAnchor, StorageItem, StorageProvider, extension_patterns, normalize_extension,
    pick_file, pick_files, pick_folder, pick_save_file,
};
