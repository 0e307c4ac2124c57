use crate::models::FieldPalette;
use serde::{Deserialize, Serialize};
use slint::Color;
use thiserror::Error;

/// View configuration from View Settings.yaml
///
/// Contains the field highlight palette and logging preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(rename = "View_Settings", default)]
    pub view_settings: ViewSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(rename = "Palette", default)]
    pub palette: PaletteConfig,

    #[serde(rename = "Logging", default)]
    pub logging: LoggingConfig,
}

/// Highlight colors as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(rename = "Success Color", default = "default_success_color")]
    pub success: String,

    #[serde(rename = "Warning Color", default = "default_warning_color")]
    pub warning: String,

    #[serde(rename = "Error Color", default = "default_error_color")]
    pub error: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            success: default_success_color(),
            warning: default_warning_color(),
            error: default_error_color(),
        }
    }
}

impl PaletteConfig {
    /// Parse the configured colors into a [`FieldPalette`].
    pub fn to_palette(&self) -> Result<FieldPalette, ColorParseError> {
        Ok(FieldPalette {
            success: parse_hex_color(&self.success)?,
            warning: parse_hex_color(&self.warning)?,
            error: parse_hex_color(&self.error)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(rename = "Log Directory", default = "default_log_directory")]
    pub directory: String,

    #[serde(rename = "Log Prefix", default = "default_log_prefix")]
    pub prefix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Console Output", default)]
    pub console_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            prefix: default_log_prefix(),
            debug_mode: false,
            console_output: false,
        }
    }
}

/// Errors produced while parsing a configured color
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color {0:?} must start with '#'")]
    MissingHash(String),

    #[error("Color {0:?} must have exactly 6 hex digits")]
    InvalidLength(String),

    #[error("Color {0:?} contains a non-hex digit")]
    InvalidDigit(String),
}

/// Parse a `#RRGGBB` string.
pub fn parse_hex_color(value: &str) -> Result<Color, ColorParseError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::MissingHash(value.to_string()))?;

    if digits.len() != 6 {
        return Err(ColorParseError::InvalidLength(value.to_string()));
    }

    let rgb = u32::from_str_radix(digits, 16)
        .map_err(|_| ColorParseError::InvalidDigit(value.to_string()))?;

    Ok(Color::from_rgb_u8(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

fn default_success_color() -> String {
    "#4CAF50".to_string()
}

fn default_warning_color() -> String {
    "#FFC107".to_string()
}

fn default_error_color() -> String {
    "#F44336".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "mapedit".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_matches_builtin() {
        let palette = PaletteConfig::default().to_palette().unwrap();
        assert_eq!(palette, FieldPalette::default());
    }

    #[test]
    fn test_parse_hex_color() {
        let color = parse_hex_color("#FF8000").unwrap();
        assert_eq!(color.red(), 0xFF);
        assert_eq!(color.green(), 0x80);
        assert_eq!(color.blue(), 0x00);
        assert_eq!(color.alpha(), 0xFF);

        assert!(parse_hex_color(" #00ff00 ").is_ok());
    }

    #[test]
    fn test_parse_hex_color_errors() {
        assert_eq!(
            parse_hex_color("FF8000"),
            Err(ColorParseError::MissingHash("FF8000".to_string()))
        );
        assert_eq!(
            parse_hex_color("#FFF"),
            Err(ColorParseError::InvalidLength("#FFF".to_string()))
        );
        assert_eq!(
            parse_hex_color("#GG0000"),
            Err(ColorParseError::InvalidDigit("#GG0000".to_string()))
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "View_Settings:\n  Palette:\n    Error Color: \"#AA0000\"\n";
        let config: ViewConfig = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(config.view_settings.palette.error, "#AA0000");
        assert_eq!(config.view_settings.palette.success, "#4CAF50");
        assert_eq!(config.view_settings.logging, LoggingConfig::default());
    }
}
