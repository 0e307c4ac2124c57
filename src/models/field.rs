use serde::{Deserialize, Serialize};
use slint::Color;

/// Validation outcome of a single input control.
///
/// Recomputed on every validation pass and never persisted. The visual
/// highlight for each state comes from a [`FieldPalette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldState {
    /// No highlight; the control inherits the theme.
    #[default]
    Neutral,
    Valid,
    Warning,
    Error,
}

impl FieldState {
    /// All states, in declaration order.
    pub const ALL: [FieldState; 4] = [
        FieldState::Neutral,
        FieldState::Valid,
        FieldState::Warning,
        FieldState::Error,
    ];
}

/// Border and foreground overrides applied to a control.
///
/// `None` means "no override": the control falls back to whatever the
/// ambient theme provides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldStyle {
    pub border: Option<Color>,
    pub foreground: Option<Color>,
}

impl FieldStyle {
    /// No overrides at all.
    pub const CLEARED: FieldStyle = FieldStyle {
        border: None,
        foreground: None,
    };

    /// Border and foreground both set to `color`.
    pub fn solid(color: Color) -> Self {
        Self {
            border: Some(color),
            foreground: Some(color),
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.border.is_none() && self.foreground.is_none()
    }

    /// Border color, or `fallback` when there is no override.
    pub fn border_or(&self, fallback: Color) -> Color {
        self.border.unwrap_or(fallback)
    }

    /// Foreground color, or `fallback` when there is no override.
    pub fn foreground_or(&self, fallback: Color) -> Color {
        self.foreground.unwrap_or(fallback)
    }
}

/// Highlight colors for the non-neutral field states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPalette {
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl FieldPalette {
    /// Resolve the style for `state`.
    ///
    /// Neutral always clears both overrides so a previous highlight never
    /// lingers on the control.
    pub fn style_for(&self, state: FieldState) -> FieldStyle {
        match state {
            FieldState::Neutral => FieldStyle::CLEARED,
            FieldState::Warning => FieldStyle::solid(self.warning),
            FieldState::Error => FieldStyle::solid(self.error),
            FieldState::Valid => FieldStyle::solid(self.success),
        }
    }
}

impl Default for FieldPalette {
    fn default() -> Self {
        Self {
            success: Color::from_rgb_u8(0x4C, 0xAF, 0x50), // green
            warning: Color::from_rgb_u8(0xFF, 0xC1, 0x07), // amber
            error: Color::from_rgb_u8(0xF4, 0x43, 0x36),   // red
        }
    }
}
