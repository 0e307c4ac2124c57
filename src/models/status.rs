use serde::{Deserialize, Serialize};

/// Severity shown by the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusSeverity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Log level emitted by the map-conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Parse a level name as written in conversion logs (case-insensitive).
    ///
    /// Returns `None` for names the converter does not define.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" | "information" => Some(Self::Info),
            "success" => Some(Self::Success),
            "warn" | "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Progress payload reported by the tile-processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TileProgress {
    /// Completion percentage, nominally `0.0..=100.0`.
    pub percent: f64,
    pub processed_tiles: u64,
    pub total_tiles: u64,
}

impl TileProgress {
    pub fn new(percent: f64, processed_tiles: u64, total_tiles: u64) -> Self {
        Self {
            percent,
            processed_tiles,
            total_tiles,
        }
    }
}
