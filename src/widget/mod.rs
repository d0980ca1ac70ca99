//! Widget system: the widget record, its kinds, and the capability pipeline.
//!
//! A [`Widget`] pairs the shared parts every control has (position, style,
//! callback, interaction flags) with a [`WidgetKind`] payload. Dispatch over
//! kinds is a plain `match`; the color logic they share lives in
//! [`capability`].

pub mod capability;

use std::fmt;

use crate::geometry::{Offset, Size};
use crate::input::keys::Key;
use crate::render::canvas::Canvas;
use crate::session::CellValue;
use crate::style::color::Color;
use crate::style::palette;
use crate::style::sheet::{StyleError, StyleId, StyleSheet};
use crate::style::token::ColorToken;
use crate::widgets::{Button, Label, Slider, TextField};

pub use capability::{resolve_color, Capability, Step, WidgetState};

/// Hook run when a widget's value changes.
pub enum Callback {
    /// Takes nothing; reads whatever state it captured.
    Notify(Box<dyn FnMut()>),
    /// Receives the widget's new value.
    Value(Box<dyn FnMut(CellValue)>),
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Notify(_) => f.write_str("Notify(FnMut())"),
            Callback::Value(_) => f.write_str("Value(FnMut(CellValue))"),
        }
    }
}

// ---------------------------------------------------------------------------
// Swatch
// ---------------------------------------------------------------------------

/// The colors a widget draws with, resolved for its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub screen: Color,
    pub fill: Color,
    pub outline: Color,
    pub caret: Color,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// What handling a key did to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing changed.
    Ignored,
    /// Presentation changed (e.g. the caret moved); redraw only.
    Redraw,
    /// The value changed; run the callback, then redraw.
    Changed,
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// The closed set of widget kinds, each with its own state.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Label(Label),
    Button(Button),
    Slider(Slider),
    TextField(TextField),
}

impl WidgetKind {
    /// The capability pipeline for this kind, in application order.
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            WidgetKind::Label(_) => &[Capability::Uneditable, Capability::Hoverable],
            WidgetKind::Button(_) => &[Capability::Hoverable, Capability::Toggleable],
            WidgetKind::Slider(_) | WidgetKind::TextField(_) => {
                &[Capability::Focusable, Capability::Hoverable]
            }
        }
    }

    /// Short lower-case name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Label(_) => "label",
            WidgetKind::Button(_) => "button",
            WidgetKind::Slider(_) => "slider",
            WidgetKind::TextField(_) => "text_field",
        }
    }
}

impl From<Label> for WidgetKind {
    fn from(label: Label) -> Self {
        WidgetKind::Label(label)
    }
}

impl From<Button> for WidgetKind {
    fn from(button: Button) -> Self {
        WidgetKind::Button(button)
    }
}

impl From<Slider> for WidgetKind {
    fn from(slider: Slider) -> Self {
        WidgetKind::Slider(slider)
    }
}

impl From<TextField> for WidgetKind {
    fn from(field: TextField) -> Self {
        WidgetKind::TextField(field)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A positioned, styled, interactive control.
///
/// # Examples
///
/// ```ignore
/// let b = Widget::button("OK").enabled(true);
/// let s = Widget::new(Slider::new(0, 100, 10).with_value(50)).on_change(|| {});
/// ```
pub struct Widget {
    position: Offset,
    style: Option<StyleId>,
    callback: Option<Callback>,
    state: WidgetState,
    kind: WidgetKind,
}

impl Widget {
    /// Wrap a widget kind with default position, base style and no callback.
    pub fn new(kind: impl Into<WidgetKind>) -> Self {
        Self {
            position: Offset::ZERO,
            style: None,
            callback: None,
            state: WidgetState::default(),
            kind: kind.into(),
        }
    }

    /// A read-only text label.
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(Label::new(text))
    }

    /// A row-exclusive toggle button.
    pub fn button(text: impl Into<String>) -> Self {
        Self::new(Button::new(text))
    }

    /// Start enabled (builder). Only meaningful for buttons.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.state.enabled = enabled;
        self
    }

    /// Use `style` instead of the base style (builder).
    pub fn with_style(mut self, style: StyleId) -> Self {
        self.style = Some(style);
        self
    }

    /// Place the widget (builder). Layout assembly overrides this.
    pub fn at(mut self, position: Offset) -> Self {
        self.position = position;
        self
    }

    /// Set the change callback (builder).
    pub fn on_change(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callback = Some(Callback::Notify(Box::new(callback)));
        self
    }

    /// Set a change callback that receives the new value (builder).
    ///
    /// ```ignore
    /// let reading = label.handle();
    /// Widget::new(Slider::new(0, 91, 1)).on_value(move |v| *reading.borrow_mut() = v.to_string());
    /// ```
    pub fn on_value(mut self, callback: impl FnMut(CellValue) + 'static) -> Self {
        self.callback = Some(Callback::Value(Box::new(callback)));
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn set_position(&mut self, position: Offset) {
        self.position = position;
    }

    pub fn style(&self) -> Option<StyleId> {
        self.style
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut WidgetKind {
        &mut self.kind
    }

    pub fn is_hovered(&self) -> bool {
        self.state.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.state.hovered = hovered;
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.enabled = enabled;
    }

    pub fn is_focused(&self) -> bool {
        self.state.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.state.focused = focused;
    }

    /// The capability pipeline of this widget's kind.
    pub fn capabilities(&self) -> &'static [Capability] {
        self.kind.capabilities()
    }

    /// Whether the pipeline includes `capability`.
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Whether activation focuses this widget.
    pub fn is_focusable(&self) -> bool {
        self.has(Capability::Focusable)
    }

    /// Whether this widget takes part in its row's radio selection.
    pub fn is_button(&self) -> bool {
        matches!(self.kind, WidgetKind::Button(_))
    }

    /// Body size, excluding the outline.
    pub fn size(&self) -> Size {
        match &self.kind {
            WidgetKind::Label(label) => label.size(),
            WidgetKind::Button(button) => button.size(),
            WidgetKind::Slider(slider) => slider.size(),
            WidgetKind::TextField(field) => field.size(),
        }
    }

    // ── Colors and drawing ───────────────────────────────────────────

    /// Resolve the color of `role` for this widget's current state.
    pub fn color(&self, sheet: &StyleSheet, role: &str) -> Result<Color, StyleError> {
        self.resolve(sheet, &ColorToken::new(role))
    }

    /// Resolve an arbitrary token through this widget's pipeline.
    pub fn resolve(&self, sheet: &StyleSheet, token: &ColorToken) -> Result<Color, StyleError> {
        resolve_color(self.capabilities(), &self.state, self.style, sheet, token)
    }

    /// Resolve every drawing role.
    pub fn swatch(&self, sheet: &StyleSheet) -> Result<Swatch, StyleError> {
        Ok(Swatch {
            screen: self.color(sheet, palette::SCREEN)?,
            fill: self.color(sheet, palette::FILL)?,
            outline: self.color(sheet, palette::OUTLINE)?,
            caret: self.color(sheet, palette::CARET)?,
        })
    }

    /// The `(style, role)` pairs this widget needs to draw.
    pub fn required_tokens(&self) -> Vec<(Option<StyleId>, ColorToken)> {
        palette::ROLES.iter().map(|role| (self.style, ColorToken::new(*role))).collect()
    }

    /// Draw the widget at its position.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, sheet: &StyleSheet) -> Result<(), StyleError> {
        let swatch = self.swatch(sheet)?;
        match &self.kind {
            WidgetKind::Label(label) => label.draw(canvas, self.position, &swatch),
            WidgetKind::Button(button) => button.draw(canvas, self.position, &swatch),
            WidgetKind::Slider(slider) => slider.draw(canvas, self.position, &swatch),
            WidgetKind::TextField(field) => field.draw(canvas, self.position, &swatch, self.state.focused),
        }
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Keys this widget reacts to while focused.
    pub fn watched_keys(&self) -> Vec<Key> {
        match &self.kind {
            WidgetKind::Slider(_) => Slider::WATCHED.to_vec(),
            WidgetKind::TextField(field) => field.watched_keys(),
            WidgetKind::Label(_) | WidgetKind::Button(_) => Vec::new(),
        }
    }

    /// Handle one firing of `key` while focused.
    pub fn handle_key(&mut self, key: Key, shift: bool) -> Response {
        match &mut self.kind {
            WidgetKind::Slider(slider) => slider.handle_key(key, shift),
            WidgetKind::TextField(field) => field.handle_key(key, shift),
            WidgetKind::Label(_) | WidgetKind::Button(_) => Response::Ignored,
        }
    }

    /// Run the change callback, if any.
    pub fn notify(&mut self) {
        let value = self.value();
        match (self.callback.as_mut(), value) {
            (Some(Callback::Notify(callback)), _) => callback(),
            (Some(Callback::Value(callback)), Some(value)) => callback(value),
            _ => {}
        }
    }

    /// What this widget contributes to the session result.
    ///
    /// Enabled buttons give their text, sliders their value, text fields
    /// their buffer. Labels and disabled buttons give nothing.
    pub fn value(&self) -> Option<CellValue> {
        match &self.kind {
            WidgetKind::Button(button) if self.state.enabled => Some(CellValue::Text(button.text().to_owned())),
            WidgetKind::Slider(slider) => Some(CellValue::Number(slider.value())),
            WidgetKind::TextField(field) => Some(CellValue::Text(field.text())),
            WidgetKind::Label(_) | WidgetKind::Button(_) => None,
        }
    }

    /// Text of a label, button or text field.
    pub fn text(&self) -> Option<String> {
        match &self.kind {
            WidgetKind::Label(label) => Some(label.text()),
            WidgetKind::Button(button) => Some(button.text().to_owned()),
            WidgetKind::TextField(field) => Some(field.text()),
            WidgetKind::Slider(_) => None,
        }
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("position", &self.position)
            .field("style", &self.style)
            .field("callback", &self.callback)
            .field("state", &self.state)
            .field("kind", &self.kind)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::palette::default_sheet;
    use crate::testing::DrawRecorder;
    use std::cell::Cell;
    use std::rc::Rc;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn builders_set_shared_parts() {
        let sheet = StyleSheet::new();
        let w = Widget::button("A").enabled(true).at(Offset::new(3, 4)).with_style(sheet.base());
        assert!(w.is_enabled());
        assert!(w.is_button());
        assert_eq!(w.position(), Offset::new(3, 4));
        assert_eq!(w.style(), Some(sheet.base()));
        assert_eq!(w.text().as_deref(), Some("A"));
    }

    #[test]
    fn pipelines_per_kind() {
        assert!(Widget::label("x").has(Capability::Uneditable));
        assert!(!Widget::button("x").is_focusable());
        assert!(Widget::button("x").has(Capability::Toggleable));
        assert!(Widget::new(Slider::new(0, 10, 1)).is_focusable());
        assert!(Widget::new(TextField::new(5)).is_focusable());
        assert!(Widget::new(TextField::new(5)).has(Capability::Hoverable));
    }

    #[test]
    fn sizes_per_kind() {
        assert_eq!(Widget::label("abc").size(), Size::new(30, 18));
        assert_eq!(Widget::new(Slider::new(0, 10, 1)).size(), Size::new(100, 4));
        assert_eq!(Widget::new(TextField::new(6)).size(), Size::new(60, 18));
    }

    // ── Colors ───────────────────────────────────────────────────────

    #[test]
    fn button_colors_follow_state() {
        let sheet = default_sheet().unwrap();
        let mut w = Widget::button("A");
        assert_eq!(w.color(&sheet, palette::FILL), Ok(Color::LIGHT_BROWN));
        w.set_enabled(true);
        w.set_hovered(true);
        assert_eq!(w.color(&sheet, palette::FILL), Ok(Color::DARK_BLUE));
        assert_eq!(w.color(&sheet, palette::OUTLINE), Ok(Color::WHITE));
    }

    #[test]
    fn hovered_label_outline_is_grey() {
        let sheet = default_sheet().unwrap();
        let mut w = Widget::label("A");
        w.set_hovered(true);
        assert_eq!(w.color(&sheet, palette::OUTLINE), Ok(Color::GREY));
    }

    #[test]
    fn draw_label_outline_then_text() {
        let sheet = default_sheet().unwrap();
        let w = Widget::label("Hi").at(Offset::new(10, 20));
        let mut rec = DrawRecorder::new();
        w.draw(&mut rec, &sheet).unwrap();
        insta::assert_snapshot!(rec.log(), @r"
        fill_rect 9 19 22 20 #592506
        draw_string 'Hi' 10 20 #592506 on #ff843d
        ");
    }

    // ── Input ────────────────────────────────────────────────────────

    #[test]
    fn non_focusable_kinds_ignore_keys() {
        let mut w = Widget::button("A");
        assert!(w.watched_keys().is_empty());
        assert_eq!(w.handle_key(Key::Left, false), Response::Ignored);
    }

    #[test]
    fn result_values_per_kind() {
        assert_eq!(Widget::label("x").value(), None);
        assert_eq!(Widget::button("x").value(), None);
        assert_eq!(Widget::button("x").enabled(true).value(), Some(CellValue::Text("x".into())));
        assert_eq!(
            Widget::new(Slider::new(0, 100, 10).with_value(30)).value(),
            Some(CellValue::Number(30))
        );
        assert_eq!(
            Widget::new(TextField::new(4).with_text("hey")).value(),
            Some(CellValue::Text("hey".into()))
        );
    }

    #[test]
    fn notify_runs_callback() {
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let mut w = Widget::button("A").on_change(move || seen.set(seen.get() + 1));
        w.notify();
        w.notify();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn notify_passes_value() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let mut w = Widget::new(Slider::new(0, 10, 1)).on_value(move |value| {
            if let CellValue::Number(n) = value {
                sink.set(n);
            }
        });
        w.handle_key(Key::Right, false);
        w.notify();
        assert_eq!(seen.get(), 6);

        // A disabled button has no value, so a value callback stays quiet.
        let calls = Rc::new(Cell::new(0));
        let count = Rc::clone(&calls);
        let mut b = Widget::button("A").on_value(move |_| count.set(count.get() + 1));
        b.notify();
        assert_eq!(calls.get(), 0);
    }
}
