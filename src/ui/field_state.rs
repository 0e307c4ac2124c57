// Field state styling - validation highlight for input controls
//
// Controls are reached through two small traits so the rules here do not depend on
// any particular generated Slint component:
// - StyledControl: anything with overridable border/foreground colors
// - TextControl: a StyledControl that also exposes free text (line edits)
//
// BoundControl / BoundTextField adapt a Slint component's generated accessors to
// these traits.

use crate::models::{FieldPalette, FieldState, FieldStyle};
use slint::{ComponentHandle, SharedString, Weak};

/// A control whose border and foreground can be overridden or reset to the theme
pub trait StyledControl {
    /// Replace the control's overrides; `None` fields clear back to the theme.
    fn apply_style(&self, style: FieldStyle);
}

/// A control with editable free text
pub trait TextControl: StyledControl {
    fn text(&self) -> SharedString;
}

/// Applies [`FieldState`] highlights using a configurable palette.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldStyler {
    palette: FieldPalette,
}

impl FieldStyler {
    pub fn new(palette: FieldPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &FieldPalette {
        &self.palette
    }

    /// Highlight `control` for `state`.
    ///
    /// Neutral clears both overrides; every other state sets border and
    /// foreground to the same palette color. Reapplying a state is a no-op
    /// visually.
    pub fn apply_field_state<C>(&self, control: &C, state: FieldState)
    where
        C: StyledControl + ?Sized,
    {
        control.apply_style(self.palette.style_for(state));
    }

    /// Highlight a text field, honouring optional fields.
    ///
    /// An optional field whose text is empty or whitespace is always cleared,
    /// whatever `state` says. Otherwise identical to
    /// [`apply_field_state()`](Self::apply_field_state).
    pub fn set_field_state<C>(&self, control: &C, state: FieldState, is_optional: bool)
    where
        C: TextControl + ?Sized,
    {
        if is_optional && control.text().trim().is_empty() {
            control.apply_style(FieldStyle::CLEARED);
            return;
        }

        self.apply_field_state(control, state);
    }
}

/// [`FieldStyler::apply_field_state`] with the default palette
pub fn apply_field_state<C>(control: &C, state: FieldState)
where
    C: StyledControl + ?Sized,
{
    FieldStyler::default().apply_field_state(control, state);
}

/// [`FieldStyler::set_field_state`] with the default palette
pub fn set_field_state<C>(control: &C, state: FieldState, is_optional: bool)
where
    C: TextControl + ?Sized,
{
    FieldStyler::default().set_field_state(control, state, is_optional);
}

/// Styles one control of a Slint component through its generated setter.
///
/// # Example
/// ```ignore
/// let scale = BoundControl::new(&ui, |ui, style| {
///     ui.set_scale_border(style.border_or(ui.get_theme_border()));
/// });
/// apply_field_state(&scale, FieldState::Warning);
/// ```
pub struct BoundControl<T: ComponentHandle> {
    ui_weak: Weak<T>,
    write_style: fn(&T, FieldStyle),
}

impl<T: ComponentHandle> BoundControl<T> {
    pub fn new(ui: &T, write_style: fn(&T, FieldStyle)) -> Self {
        Self {
            ui_weak: ui.as_weak(),
            write_style,
        }
    }
}

impl<T: ComponentHandle> StyledControl for BoundControl<T> {
    fn apply_style(&self, style: FieldStyle) {
        match self.ui_weak.upgrade() {
            Some(ui) => (self.write_style)(&ui, style),
            None => tracing::debug!("Skipping field style update - component dropped"),
        }
    }
}

/// Styles a Slint line edit and reads its text through generated accessors.
pub struct BoundTextField<T: ComponentHandle> {
    control: BoundControl<T>,
    read_text: fn(&T) -> SharedString,
}

impl<T: ComponentHandle> BoundTextField<T> {
    pub fn new(
        ui: &T,
        read_text: fn(&T) -> SharedString,
        write_style: fn(&T, FieldStyle),
    ) -> Self {
        Self {
            control: BoundControl::new(ui, write_style),
            read_text,
        }
    }
}

impl<T: ComponentHandle> StyledControl for BoundTextField<T> {
    fn apply_style(&self, style: FieldStyle) {
        self.control.apply_style(style);
    }
}

impl<T: ComponentHandle> TextControl for BoundTextField<T> {
    fn text(&self) -> SharedString {
        self.control
            .ui_weak
            .upgrade()
            .map(|ui| (self.read_text)(&ui))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slint::Color;
    use std::cell::{Cell, RefCell};

    struct FakeTextBox {
        text: RefCell<String>,
        style: Cell<FieldStyle>,
        applied: Cell<usize>,
    }

    impl FakeTextBox {
        fn new(text: &str) -> Self {
            Self {
                text: RefCell::new(text.to_string()),
                style: Cell::new(FieldStyle::CLEARED),
                applied: Cell::new(0),
            }
        }
    }

    impl StyledControl for FakeTextBox {
        fn apply_style(&self, style: FieldStyle) {
            self.style.set(style);
            self.applied.set(self.applied.get() + 1);
        }
    }

    impl TextControl for FakeTextBox {
        fn text(&self) -> SharedString {
            self.text.borrow().as_str().into()
        }
    }

    #[test]
    fn test_apply_warning_then_neutral() {
        let field = FakeTextBox::new("12");
        let palette = FieldPalette::default();

        apply_field_state(&field, FieldState::Warning);
        assert_eq!(field.style.get(), FieldStyle::solid(palette.warning));

        apply_field_state(&field, FieldState::Neutral);
        assert!(field.style.get().is_cleared());
    }

    #[test]
    fn test_reapply_is_idempotent() {
        let field = FakeTextBox::new("abc");

        apply_field_state(&field, FieldState::Error);
        let first = field.style.get();
        apply_field_state(&field, FieldState::Error);

        assert_eq!(field.style.get(), first);
        assert_eq!(field.applied.get(), 2);
    }

    #[test]
    fn test_optional_blank_field_is_cleared() {
        let field = FakeTextBox::new("   ");
        field.style.set(FieldStyle::solid(Color::from_rgb_u8(1, 1, 1)));

        set_field_state(&field, FieldState::Error, true);

        assert!(field.style.get().is_cleared());
    }

    #[test]
    fn test_required_blank_field_is_highlighted() {
        let field = FakeTextBox::new("");

        set_field_state(&field, FieldState::Error, false);

        assert_eq!(
            field.style.get(),
            FieldStyle::solid(FieldPalette::default().error)
        );
    }

    #[test]
    fn test_optional_filled_field_uses_state() {
        let field = FakeTextBox::new("output.map");

        set_field_state(&field, FieldState::Valid, true);

        assert_eq!(
            field.style.get(),
            FieldStyle::solid(FieldPalette::default().success)
        );
    }

    #[test]
    fn test_custom_palette() {
        let palette = FieldPalette {
            success: Color::from_rgb_u8(0, 1, 0),
            warning: Color::from_rgb_u8(1, 1, 0),
            error: Color::from_rgb_u8(1, 0, 0),
        };
        let styler = FieldStyler::new(palette);
        let field = FakeTextBox::new("x");

        styler.set_field_state(&field, FieldState::Warning, false);

        assert_eq!(field.style.get(), FieldStyle::solid(palette.warning));
        assert_eq!(styler.palette(), &palette);
    }

    #[test]
    fn test_trait_object_control() {
        let field = FakeTextBox::new("value");
        let control: &dyn TextControl = &field;

        set_field_state(control, FieldState::Valid, true);

        assert!(!field.style.get().is_cleared());
    }
}
