//! Capability pipeline: how a widget's state narrows a color token.
//!
//! Each widget kind declares an ordered list of [`Capability`] steps. When the
//! widget asks for a color, the requested token runs through the list: a step
//! may qualify the token with a modifier, or short-circuit resolution onto the
//! base style (focus). Whatever token survives the pipeline is resolved
//! against the widget's own style.

use crate::style::color::Color;
use crate::style::sheet::{StyleError, StyleId, StyleSheet};
use crate::style::token::{ColorToken, Modifier};

// ---------------------------------------------------------------------------
// WidgetState
// ---------------------------------------------------------------------------

/// The interaction flags every widget carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetState {
    /// The navigation cursor is on this widget.
    pub hovered: bool,
    /// For buttons: this is the selected button of its row.
    pub enabled: bool,
    /// Input is captured by this widget.
    pub focused: bool,
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// One behavioral facet of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Always qualifies with `uneditable`.
    Uneditable,
    /// Qualifies with `hovered` while hovered.
    Hoverable,
    /// Qualifies with `enabled` while enabled.
    Toggleable,
    /// While focused, resolves `token.focused` against the base style.
    Focusable,
}

/// What a pipeline step did with the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Hand the (possibly qualified) token to the next step.
    Next(ColorToken),
    /// Stop here and resolve the token against the base style.
    Base(ColorToken),
}

impl Capability {
    /// Apply this step to `token` for a widget in `state`.
    pub fn apply(self, token: ColorToken, state: &WidgetState) -> Step {
        match self {
            Capability::Uneditable => Step::Next(token.with(Modifier::Uneditable)),
            Capability::Hoverable => Step::Next(token.with_if(Modifier::Hovered, state.hovered)),
            Capability::Toggleable => Step::Next(token.with_if(Modifier::Enabled, state.enabled)),
            Capability::Focusable if state.focused => Step::Base(token.focused()),
            Capability::Focusable => Step::Next(token),
        }
    }
}

/// Run `token` through `pipeline` and resolve the result.
///
/// `style` is the widget's own style; `None` means the base style.
pub fn resolve_color(
    pipeline: &[Capability],
    state: &WidgetState,
    style: Option<StyleId>,
    sheet: &StyleSheet,
    token: &ColorToken,
) -> Result<Color, StyleError> {
    let mut current = token.clone();
    for capability in pipeline {
        match capability.apply(current, state) {
            Step::Next(next) => current = next,
            Step::Base(focused) => return sheet.resolve(sheet.base(), &focused),
        }
    }
    sheet.resolve_in(style, &current)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BUTTON: &[Capability] = &[Capability::Hoverable, Capability::Toggleable];
    const SLIDER: &[Capability] = &[Capability::Focusable, Capability::Hoverable];
    const LABEL: &[Capability] = &[Capability::Uneditable, Capability::Hoverable];

    fn sheet() -> StyleSheet {
        StyleSheet::from_palette(
            "base {
                fill: #000001;
                fill.enabled: #000002;
                fill.hovered: #000003;
                fill.focused: #000004;
                outline: #000010;
                outline.hovered.uneditable: #000011;
            }
            own {
                fill: #0000aa;
                fill.focused: #0000bb;
            }",
        )
        .unwrap()
    }

    fn state(hovered: bool, enabled: bool, focused: bool) -> WidgetState {
        WidgetState { hovered, enabled, focused }
    }

    // ── Steps ────────────────────────────────────────────────────────

    #[test]
    fn steps_qualify_only_when_flag_set() {
        let idle = WidgetState::default();
        let t = ColorToken::new("fill");
        assert_eq!(Capability::Hoverable.apply(t.clone(), &idle), Step::Next(t.clone()));
        assert_eq!(Capability::Toggleable.apply(t.clone(), &idle), Step::Next(t.clone()));
        assert_eq!(Capability::Focusable.apply(t.clone(), &idle), Step::Next(t.clone()));
        assert_eq!(Capability::Uneditable.apply(t.clone(), &idle), Step::Next(t.uneditable()));
    }

    #[test]
    fn focusable_short_circuits() {
        let t = ColorToken::new("fill");
        let step = Capability::Focusable.apply(t.clone(), &state(true, false, true));
        assert_eq!(step, Step::Base(t.focused()));
    }

    // ── Resolution ───────────────────────────────────────────────────

    #[test]
    fn enabled_and_hovered_button_gets_enabled_fill() {
        let sheet = sheet();
        let color = resolve_color(BUTTON, &state(true, true, false), None, &sheet, &"fill".into());
        assert_eq!(color.unwrap().to_string(), "#000002");
    }

    #[test]
    fn hovered_button_gets_hover_fill() {
        let sheet = sheet();
        let color = resolve_color(BUTTON, &state(true, false, false), None, &sheet, &"fill".into());
        assert_eq!(color.unwrap().to_string(), "#000003");
    }

    #[test]
    fn focus_ignores_own_style() {
        let sheet = sheet();
        let own = sheet.id("own");
        let focused = resolve_color(SLIDER, &state(true, false, true), own, &sheet, &"fill".into());
        assert_eq!(focused.unwrap().to_string(), "#000004");
        let idle = resolve_color(SLIDER, &WidgetState::default(), own, &sheet, &"fill".into());
        assert_eq!(idle.unwrap().to_string(), "#0000aa");
    }

    #[test]
    fn label_hover_is_uneditable_hover() {
        let sheet = sheet();
        let hovered = resolve_color(LABEL, &state(true, false, false), None, &sheet, &"outline".into());
        assert_eq!(hovered.unwrap().to_string(), "#000011");
        let idle = resolve_color(LABEL, &WidgetState::default(), None, &sheet, &"outline".into());
        assert_eq!(idle.unwrap().to_string(), "#000010");
    }

    #[test]
    fn missing_role_reports_requested_token() {
        let sheet = sheet();
        let err = resolve_color(BUTTON, &WidgetState::default(), None, &sheet, &"caret".into());
        assert_eq!(err, Err(StyleError::ColorNotFound { token: "caret".into() }));
    }
}
