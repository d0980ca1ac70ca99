//! Crossterm terminal device.
//!
//! [`TerminalDevice`] runs a session in a terminal. Logical units are mapped
//! onto character cells ([`CellMapping`]), key state is rebuilt from
//! crossterm key events, and `sleep` pumps the event queue until its
//! deadline.
//!
//! Terminals that support the keyboard enhancement protocol report key
//! releases, so a key is down from its press until its release. Elsewhere a
//! key counts as down for a short hold window after its last press or
//! auto-repeat event.
//!
//! Canvas and clock calls cannot fail, so the first I/O error is kept and
//! surfaced by [`TerminalDevice::take_error`] and [`TerminalDevice::leave`].

use std::collections::HashMap;
use std::io::{self, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::geometry::{Size, CHAR_HEIGHT, CHAR_WIDTH};
use crate::input::binding::KeyBindings;
use crate::input::clock::Clock;
use crate::input::keys::{Key, Keypad};
use crate::render::canvas::Canvas;
use crate::style::color::Color;

/// Default hold window for terminals without release events.
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(120);

// ---------------------------------------------------------------------------
// CellMapping
// ---------------------------------------------------------------------------

/// A terminal cell span: `(column, row, columns, rows)`.
pub type CellSpan = (u16, u16, u16, u16);

/// Converts logical rectangles to terminal cells.
///
/// Edges round to the nearest cell boundary. A non-empty rectangle always
/// covers at least one cell, so thin shapes such as the caret stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMapping {
    /// Logical size of one terminal cell.
    pub cell: Size,
}

impl Default for CellMapping {
    fn default() -> Self {
        Self { cell: Size::new(CHAR_WIDTH, CHAR_HEIGHT) }
    }
}

impl CellMapping {
    /// The cells covered by the logical rectangle, or `None` if it is empty or
    /// entirely off-screen to the top or left.
    pub fn rect(&self, x: i32, y: i32, width: i32, height: i32) -> Option<CellSpan> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let (col, cols) = span(x, width, self.cell.width)?;
        let (row, rows) = span(y, height, self.cell.height)?;
        Some((col, row, cols, rows))
    }

    /// The cell a logical point falls in, rounded.
    pub fn point(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let col = round_div(x, self.cell.width);
        let row = round_div(y, self.cell.height);
        Some((u16::try_from(col).ok()?, u16::try_from(row).ok()?))
    }
}

fn round_div(value: i32, unit: i32) -> i32 {
    (value + unit / 2).div_euclid(unit)
}

fn span(start: i32, length: i32, unit: i32) -> Option<(u16, u16)> {
    let first = round_div(start, unit);
    let last = round_div(start + length, unit).max(first + 1);
    let first = first.max(0);
    if last <= first {
        return None;
    }
    Some((u16::try_from(first).ok()?, u16::try_from(last - first).ok()?))
}

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

// ---------------------------------------------------------------------------
// TerminalDevice
// ---------------------------------------------------------------------------

/// A [`Device`](crate::device::Device) on the controlling terminal.
///
/// The device does NOT enter raw mode on creation; call [`enter`](Self::enter)
/// first and [`leave`](Self::leave) when done.
pub struct TerminalDevice {
    writer: BufWriter<Stdout>,
    bindings: KeyBindings,
    mapping: CellMapping,
    held: HashMap<Key, Instant>,
    release_events: bool,
    hold_window: Duration,
    entered: bool,
    error: Option<io::Error>,
}

impl TerminalDevice {
    /// Create a device on stdout with the default key bindings.
    pub fn new() -> Self {
        Self {
            writer: BufWriter::new(io::stdout()),
            bindings: KeyBindings::with_defaults(),
            mapping: CellMapping::default(),
            held: HashMap::new(),
            release_events: false,
            hold_window: DEFAULT_HOLD_WINDOW,
            entered: false,
            error: None,
        }
    }

    /// Replace the key bindings (builder).
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Set the hold window used without release events (builder).
    pub fn with_hold_window(mut self, window: Duration) -> Self {
        self.hold_window = window;
        self
    }

    /// Set the logical-to-cell mapping (builder).
    pub fn with_mapping(mut self, mapping: CellMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Whether the terminal reports key releases.
    pub fn reports_releases(&self) -> bool {
        self.release_events
    }

    /// Enter raw mode and the alternate screen, and ask for release events.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        self.entered = true;
        tracing::debug!(release_events = self.release_events, "terminal entered");
        Ok(())
    }

    /// Restore the terminal. Returns the first error recorded while running,
    /// if any.
    pub fn leave(&mut self) -> io::Result<()> {
        if self.entered {
            if self.release_events {
                execute!(self.writer, PopKeyboardEnhancementFlags)?;
            }
            execute!(self.writer, ResetColor, cursor::Show, LeaveAlternateScreen)?;
            terminal::disable_raw_mode()?;
            self.entered = false;
        }
        match self.take_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The first I/O error hit while drawing or polling, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flush queued drawing to the terminal.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            tracing::warn!(%err, "terminal i/o failed");
            self.error.get_or_insert(err);
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event else {
            return;
        };
        let now = Instant::now();
        if modifiers.contains(KeyModifiers::SHIFT) {
            self.held.insert(Key::Shift, now);
        } else {
            self.held.remove(&Key::Shift);
        }
        let Some(key) = self.bindings.resolve(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(key, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
    }

    fn fill_cells(&mut self, (col, row, cols, rows): CellSpan, color: Color) -> io::Result<()> {
        let blank = " ".repeat(usize::from(cols));
        queue!(self.writer, SetBackgroundColor(to_terminal(color)))?;
        for r in row..row.saturating_add(rows) {
            queue!(self.writer, cursor::MoveTo(col, r), Print(&blank))?;
        }
        queue!(self.writer, ResetColor)
    }

    fn print_at(&mut self, (col, row): (u16, u16), text: &str, foreground: Color, background: Color) -> io::Result<()> {
        queue!(
            self.writer,
            cursor::MoveTo(col, row),
            SetForegroundColor(to_terminal(foreground)),
            SetBackgroundColor(to_terminal(background)),
            Print(text),
            ResetColor
        )
    }
}

impl Default for TerminalDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalDevice {
    fn drop(&mut self) {
        if self.entered {
            let _ = self.leave();
        }
    }
}

impl Canvas for TerminalDevice {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if let Some(cells) = self.mapping.rect(x, y, width, height) {
            let result = self.fill_cells(cells, color);
            self.record(result);
        }
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, foreground: Color, background: Color) {
        if let Some(cell) = self.mapping.point(x, y) {
            let result = self.print_at(cell, text, foreground, background);
            self.record(result);
        }
    }
}

impl Keypad for TerminalDevice {
    fn is_key_down(&self, key: Key) -> bool {
        self.held
            .get(&key)
            .is_some_and(|at| self.release_events || at.elapsed() < self.hold_window)
    }
}

impl Clock for TerminalDevice {
    fn sleep(&mut self, duration: Duration) {
        let flushed = self.writer.flush();
        self.record(flushed);
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match event::poll(remaining) {
                Ok(true) => match event::read() {
                    Ok(event) => self.handle_event(event),
                    Err(err) => {
                        self.record(Err(err));
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    self.record(Err(err));
                    std::thread::sleep(remaining);
                    break;
                }
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
