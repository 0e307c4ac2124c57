// MapEdit View - view adapter layer for the MapEdit desktop map editor
//
// This library crate holds the glue between the editor's Slint windows and its
// background work: field validation highlights, progress marshaling onto the UI
// thread, and native file dialogs. Window layout lives in the application crate.

pub mod config;
pub mod logging;
pub mod models;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{
    FieldPalette, FieldState, FieldStyle, LogLevel, StatusSeverity, TileProgress, ViewConfig,
};
pub use state::{AppStatus, StatusChange, StatusState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
