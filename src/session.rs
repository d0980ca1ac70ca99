//! The interactive session: layout assembly, the tick loop, the result.
//!
//! A [`Session`] owns the grid, the style sheet and the configuration for
//! one screen. Each [`tick`](Session::tick) polls the device once:
//!
//! 1. Confirm down: wait for release, produce the result, finish.
//! 2. Focused: feed the focused widget's keys through key repeat.
//! 3. Navigating: move the hover cursor (Up, Down, Right, Left in that order).
//! 4. Activate down: toggle focus, or select the hovered button; wait for release.
//! 5. If a direction was down while navigating, wait for every direction to release.
//! 6. Sleep one tick.
//!
//! Sleeping is the only suspension point. All state lives on the session;
//! nothing is global.

use std::fmt;
use std::time::Duration;

use crate::config::{ConfigError, SessionConfig};
use crate::device::Device;
use crate::geometry::{Offset, Region};
use crate::grid::{Cell, Grid, LayoutError};
use crate::input::keys::Key;
use crate::input::repeat::KeyRepeat;
use crate::style::palette;
use crate::style::sheet::{StyleError, StyleId, StyleSheet};
use crate::style::token::ColorToken;
use crate::widget::{Response, Widget};

/// Errors that stop a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One entry of a result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(i64),
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_owned())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{text:?}"),
            CellValue::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Per-row values at the end of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionResult {
    rows: Vec<Vec<CellValue>>,
}

impl SessionResult {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

// ---------------------------------------------------------------------------
// Mode / Tick
// ---------------------------------------------------------------------------

/// Where input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Directions move the hover cursor.
    #[default]
    Navigating,
    /// All input goes to the hovered widget.
    Focused,
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Finished(SessionResult),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One interactive episode over a grid of widgets.
pub struct Session {
    grid: Grid,
    sheet: StyleSheet,
    config: SessionConfig,
    mode: Mode,
    repeat: KeyRepeat,
    elapsed: Duration,
    started: bool,
}

impl Session {
    /// Assemble a session.
    ///
    /// Validates the config, compiles its palette into `sheet`, checks that every color a
    /// widget can ask for resolves, centres the rows on the screen and
    /// normalises hover and button selection. Nothing is drawn yet.
    pub fn new(mut grid: Grid, mut sheet: StyleSheet, config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        if let Some(text) = &config.palette {
            let loaded = sheet.load(text)?;
            tracing::debug!(styles = loaded.len(), "palette loaded");
        }

        let mut required: Vec<(Option<StyleId>, ColorToken)> =
            palette::ROLES.iter().map(|role| (None, ColorToken::new(*role))).collect();
        required.extend(grid.widgets().flat_map(Widget::required_tokens));
        sheet.validate(required.iter().map(|(style, token)| (*style, token)))?;

        grid.arrange(config.screen);
        grid.normalize();

        Ok(Self {
            repeat: KeyRepeat::new(config.repeat_timing()),
            grid,
            sheet,
            config,
            mode: Mode::Navigating,
            elapsed: Duration::ZERO,
            started: false,
        })
    }

    /// Assemble a session with the default palette and configuration.
    pub fn with_defaults(rows: Vec<Vec<Widget>>) -> Result<Self, SessionError> {
        let grid = Grid::new(rows)?;
        Self::new(grid, palette::default_sheet()?, SessionConfig::default())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Total time spent sleeping so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Snapshot of the per-row values.
    pub fn result(&self) -> SessionResult {
        SessionResult::new(
            self.grid
                .rows()
                .iter()
                .map(|row| row.iter().filter_map(Widget::value).collect())
                .collect(),
        )
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Clear the screen and draw every widget. Called by the first tick.
    pub fn start<D: Device + ?Sized>(&mut self, device: &mut D) -> Result<(), SessionError> {
        let screen = self.sheet.resolve(self.sheet.base(), &palette::role(palette::SCREEN))?;
        device.fill_region(Region::from_parts(Offset::ZERO, self.config.screen), screen);
        for widget in self.grid.widgets() {
            widget.draw(device, &self.sheet)?;
        }
        self.started = true;
        tracing::info!(
            rows = self.grid.row_count(),
            widgets = self.grid.widgets().count(),
            "session started"
        );
        Ok(())
    }

    /// Redraw the widget at `cell`.
    pub fn redraw<D: Device + ?Sized>(&self, device: &mut D, cell: Cell) -> Result<(), SessionError> {
        if let Some(widget) = self.grid.get(cell) {
            widget.draw(device, &self.sheet)?;
        }
        Ok(())
    }

    // ── Loop ─────────────────────────────────────────────────────────

    /// Run ticks until the confirm key ends the session.
    pub fn run<D: Device + ?Sized>(&mut self, device: &mut D) -> Result<SessionResult, SessionError> {
        loop {
            if let Tick::Finished(result) = self.tick(device)? {
                return Ok(result);
            }
        }
    }

    /// One iteration of the input loop.
    pub fn tick<D: Device + ?Sized>(&mut self, device: &mut D) -> Result<Tick, SessionError> {
        if !self.started {
            self.start(device)?;
        }

        if device.is_key_down(Key::Confirm) {
            self.wait_released(device, &[Key::Confirm]);
            let result = self.result();
            tracing::info!(rows = result.rows().len(), elapsed = ?self.elapsed, "session finished");
            return Ok(Tick::Finished(result));
        }

        let mut navigated = false;
        match self.mode {
            Mode::Focused => self.feed_focused(device)?,
            Mode::Navigating => navigated = self.navigate(device)?,
        }

        if device.is_key_down(Key::Activate) {
            self.activate(device)?;
            self.wait_released(device, &[Key::Activate]);
        }

        if navigated {
            self.wait_released(device, &Key::DIRECTIONS);
        }

        self.pause(device, self.config.tick);
        Ok(Tick::Continue)
    }

    /// Move the hover cursor. Returns whether any direction was down.
    fn navigate<D: Device + ?Sized>(&mut self, device: &mut D) -> Result<bool, SessionError> {
        let mut target = self.grid.hovered();
        let mut pressed = false;
        for key in Key::DIRECTIONS {
            if let Some(delta) = key.delta().filter(|_| device.is_key_down(key)) {
                pressed = true;
                target = self.grid.step(target, delta);
            }
        }
        if let Some(previous) = self.grid.move_hover(target) {
            self.redraw(device, previous)?;
            self.redraw(device, target)?;
        }
        Ok(pressed)
    }

    /// Route polled keys to the focused widget.
    fn feed_focused<D: Device + ?Sized>(&mut self, device: &mut D) -> Result<(), SessionError> {
        let shift = device.is_key_down(Key::Shift);
        let now = self.elapsed;
        let Some(widget) = self.grid.hovered_widget_mut() else {
            return Ok(());
        };
        let mut notified = false;
        for key in widget.watched_keys() {
            let down = device.is_key_down(key);
            if !self.repeat.poll(key, down, now) {
                continue;
            }
            match widget.handle_key(key, shift) {
                Response::Changed => {
                    widget.notify();
                    notified = true;
                    widget.draw(device, &self.sheet)?;
                }
                Response::Redraw => widget.draw(device, &self.sheet)?,
                Response::Ignored => {}
            }
        }
        if notified {
            self.redraw_synced_labels(device)?;
        }
        Ok(())
    }

    /// Toggle focus on the hovered widget, or select the hovered button.
    fn activate<D: Device + ?Sized>(&mut self, device: &mut D) -> Result<(), SessionError> {
        let cell = self.grid.hovered();
        let Some(widget) = self.grid.get_mut(cell) else {
            return Ok(());
        };

        if widget.is_focusable() {
            let focus = self.mode == Mode::Navigating;
            widget.set_focused(focus);
            self.mode = if focus { Mode::Focused } else { Mode::Navigating };
            self.repeat.reset();
            tracing::debug!(%cell, kind = widget.kind().name(), focus, "focus changed");
            widget.draw(device, &self.sheet)?;
            return Ok(());
        }

        let changed = self.grid.select(cell);
        for &col in &changed {
            self.redraw(device, Cell::new(cell.row, col))?;
        }
        if changed.contains(&cell.col) {
            if let Some(widget) = self.grid.get_mut(cell) {
                widget.notify();
            }
            self.redraw_synced_labels(device)?;
        }
        Ok(())
    }

    /// Redraw labels whose text a callback rewrote.
    fn redraw_synced_labels<D: Device + ?Sized>(&mut self, device: &mut D) -> Result<(), SessionError> {
        for cell in self.grid.sync_labels() {
            tracing::debug!(%cell, "label text changed");
            self.redraw(device, cell)?;
        }
        Ok(())
    }

    /// Block until none of `keys` is down, polling at the release interval.
    fn wait_released<D: Device + ?Sized>(&mut self, device: &mut D, keys: &[Key]) {
        while device.any_down(keys) {
            self.pause(device, self.config.release_poll);
        }
    }

    fn pause<D: Device + ?Sized>(&mut self, device: &mut D, duration: Duration) {
        device.sleep(duration);
        self.elapsed += duration;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("grid", &self.grid)
            .field("mode", &self.mode)
            .field("elapsed", &self.elapsed)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Pilot;
    use crate::widgets::{Slider, TextField};
    use pretty_assertions::assert_eq;
    use std::cell::Cell as Counter;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn two_buttons_and_slider() -> Session {
        Session::with_defaults(vec![
            vec![Widget::button("A").enabled(true), Widget::button("B")],
            vec![Widget::new(Slider::new(0, 100, 10).with_value(50))],
        ])
        .unwrap()
    }

    // ── Result ───────────────────────────────────────────────────────

    #[test]
    fn result_display() {
        let result = SessionResult::new(vec![vec!["B".into()], vec![50.into()], vec![]]);
        assert_eq!(result.to_string(), r#"[["B"], [50], []]"#);
    }

    #[test]
    fn result_before_any_input() {
        let session = two_buttons_and_slider();
        assert_eq!(session.result(), SessionResult::new(vec![vec!["A".into()], vec![50.into()]]));
    }

    // ── Setup ────────────────────────────────────────────────────────

    #[test]
    fn missing_color_aborts_setup() {
        let grid = Grid::new(vec![vec![Widget::button("A")]]).unwrap();
        let sheet = StyleSheet::from_palette("base { fill: red; outline: black; screen: white; }").unwrap();
        let err = Session::new(grid, sheet, SessionConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Style(StyleError::ColorNotFound { ref token }) if token == "caret"
        ));
    }

    #[test]
    fn zero_release_poll_aborts_setup() {
        let grid = Grid::new(vec![vec![Widget::button("A")]]).unwrap();
        let config = SessionConfig::default().with_release_poll(Duration::ZERO);
        let err = Session::new(grid, palette::default_sheet().unwrap(), config).unwrap_err();
        assert!(matches!(err, SessionError::Config(ConfigError::Zero("release_poll"))));
    }

    #[test]
    fn config_palette_overrides_base() {
        let grid = Grid::new(vec![vec![Widget::button("A")]]).unwrap();
        let config = SessionConfig::default().with_palette("base { screen: black; }");
        let session = Session::new(grid, palette::default_sheet().unwrap(), config).unwrap();
        let base = session.sheet().base();
        let screen = session.sheet().resolve(base, &palette::role(palette::SCREEN));
        assert_eq!(screen, Ok(crate::style::color::Color::BLACK));
    }

    #[test]
    fn first_tick_draws_everything() {
        let mut session = two_buttons_and_slider();
        let mut pilot = Pilot::new();
        assert_eq!(session.tick(&mut pilot).unwrap(), Tick::Continue);
        assert!(session.is_started());
        let strings = pilot.recorder().strings();
        assert_eq!(strings, vec!["A", "B"]);
        assert_eq!(pilot.now(), ms(20));
    }

    // ── Navigation ───────────────────────────────────────────────────

    #[test]
    fn held_direction_moves_once() {
        let mut session = Session::with_defaults(vec![vec![
            Widget::button("a"),
            Widget::button("b"),
            Widget::button("c"),
        ]])
        .unwrap();
        let mut pilot = Pilot::new().hold(Key::Right, ms(0), ms(500));
        session.tick(&mut pilot).unwrap();
        assert_eq!(session.grid().hovered(), Cell::new(0, 1));
        // The tick blocked until release.
        assert!(pilot.now() >= ms(500));
    }

    #[test]
    fn simultaneous_directions_accumulate() {
        let mut session = Session::with_defaults(vec![
            vec![Widget::button("a"), Widget::button("b")],
            vec![Widget::button("c"), Widget::button("d")],
        ])
        .unwrap();
        let mut pilot = Pilot::new().tap(Key::Down, ms(0)).tap(Key::Right, ms(0));
        session.tick(&mut pilot).unwrap();
        assert_eq!(session.grid().hovered(), Cell::new(1, 1));
    }

    // ── Activation ───────────────────────────────────────────────────

    #[test]
    fn activating_button_selects_and_notifies() {
        let hits = Rc::new(Counter::new(0));
        let seen = Rc::clone(&hits);
        let mut session = Session::with_defaults(vec![vec![
            Widget::button("a"),
            Widget::button("b").on_change(move || seen.set(seen.get() + 1)),
        ]])
        .unwrap();
        let mut pilot = Pilot::new().tap(Key::Right, ms(0)).tap(Key::Activate, ms(200));
        pilot.run_for(&mut session, ms(400)).unwrap();
        assert_eq!(hits.get(), 1);
        assert_eq!(session.result(), SessionResult::new(vec![vec!["b".into()]]));
    }

    #[test]
    fn activation_toggles_focus() {
        let mut session = Session::with_defaults(vec![vec![Widget::new(Slider::new(0, 10, 1))]]).unwrap();
        let mut pilot = Pilot::new().tap(Key::Activate, ms(0));
        session.tick(&mut pilot).unwrap();
        assert_eq!(session.mode(), Mode::Focused);
        assert!(session.grid().hovered_widget().unwrap().is_focused());

        let at = pilot.now() + ms(20);
        pilot = pilot.tap(Key::Activate, at);
        pilot.run_for(&mut session, at + ms(100)).unwrap();
        assert_eq!(session.mode(), Mode::Navigating);
        assert!(!session.grid().hovered_widget().unwrap().is_focused());
    }

    // ── Focused input ────────────────────────────────────────────────

    #[test]
    fn focused_slider_repeats_while_held() {
        let mut session = Session::with_defaults(vec![vec![Widget::new(Slider::new(0, 100, 1).with_value(50))]])
            .unwrap();
        // Focus, then hold Right for first delay + 3 repeats.
        let mut pilot = Pilot::new().tap(Key::Activate, ms(0));
        session.tick(&mut pilot).unwrap();
        let start = pilot.now();
        pilot = pilot.hold(Key::Right, start, start + ms(700));
        pilot.run_for(&mut session, start + ms(1000)).unwrap();
        assert_eq!(session.result(), SessionResult::new(vec![vec![54.into()]]));
    }

    #[test]
    fn directions_do_not_navigate_while_focused() {
        let mut session = Session::with_defaults(vec![vec![
            Widget::new(TextField::new(5)),
            Widget::button("x"),
        ]])
        .unwrap();
        let mut pilot = Pilot::new()
            .tap(Key::Activate, ms(0))
            .tap(Key::Right, ms(200))
            .tap(Key::Char('h'), ms(300))
            .tap(Key::Char('i'), ms(400));
        pilot.run_for(&mut session, ms(600)).unwrap();
        assert_eq!(session.grid().hovered(), Cell::new(0, 0));
        assert_eq!(session.grid().hovered_widget().unwrap().text().as_deref(), Some("hi"));
    }

    // ── End ──────────────────────────────────────────────────────────

    #[test]
    fn confirm_finishes_from_focus() {
        let mut session = Session::with_defaults(vec![vec![Widget::new(Slider::new(0, 10, 1))]]).unwrap();
        let mut pilot = Pilot::new().tap(Key::Activate, ms(0)).tap(Key::Confirm, ms(300));
        let result = session.run(&mut pilot).unwrap();
        assert_eq!(result, SessionResult::new(vec![vec![5.into()]]));
        assert_eq!(session.mode(), Mode::Focused);
    }
}
