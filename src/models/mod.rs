//! Data models for the MapEdit view layer.
//!
//! - [`FieldState`], [`FieldStyle`], [`FieldPalette`]: validation highlight of input controls
//! - [`StatusSeverity`], [`LogLevel`], [`TileProgress`]: status bar inputs coming from the
//!   conversion and tile-processing engines
//! - [`ViewConfig`]: palette and logging preferences loaded from `View Settings.yaml`
//!
//! None of these are persisted except [`ViewConfig`]; the rest live for a single
//! validation pass or progress sample.

pub mod config;
pub mod field;
pub mod status;

pub use config::{
    ColorParseError, LoggingConfig, PaletteConfig, ViewConfig, ViewSettings, parse_hex_color,
};
pub use field::{FieldPalette, FieldState, FieldStyle};
pub use status::{LogLevel, StatusSeverity, TileProgress};
