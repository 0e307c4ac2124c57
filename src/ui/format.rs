//! Display helpers shared by the views.

use crate::models::{LogLevel, StatusSeverity};
use std::fs;
use std::path::Path;

/// Shown when a file size cannot be determined
pub const UNKNOWN_SIZE: &str = "unknown";

/// Size of the file at `path` in bytes, grouped by thousands ("1,048,576").
///
/// Returns [`UNKNOWN_SIZE`] if the path cannot be statted or is not a regular file.
pub fn format_file_size(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => group_thousands(metadata.len()),
        Ok(_) => {
            tracing::debug!("Not a regular file: {}", path.display());
            UNKNOWN_SIZE.to_string()
        }
        Err(e) => {
            tracing::debug!("Cannot stat {}: {}", path.display(), e);
            UNKNOWN_SIZE.to_string()
        }
    }
}

/// Async variant of [`format_file_size`] for use on tokio workers.
pub async fn format_file_size_async(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => group_thousands(metadata.len()),
        Ok(_) => {
            tracing::debug!("Not a regular file: {}", path.display());
            UNKNOWN_SIZE.to_string()
        }
        Err(e) => {
            tracing::debug!("Cannot stat {}: {}", path.display(), e);
            UNKNOWN_SIZE.to_string()
        }
    }
}

/// Decimal representation of `value` with `,` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Status severity for a converter log level.
///
/// Error, Warning and Success map to their namesakes; every other level is Info.
pub fn map_log_to_status(level: LogLevel) -> StatusSeverity {
    match level {
        LogLevel::Error => StatusSeverity::Error,
        LogLevel::Warning => StatusSeverity::Warning,
        LogLevel::Success => StatusSeverity::Success,
        _ => StatusSeverity::Info,
    }
}

/// Like [`map_log_to_status`] for a level name; unrecognised names are Info.
pub fn map_log_name_to_status(name: &str) -> StatusSeverity {
    LogLevel::from_name(name)
        .map(map_log_to_status)
        .unwrap_or_default()
}
