//! Grid navigator: the 2D arrangement of widgets and the hover cursor.
//!
//! Rows may have different lengths. Moves clamp the row first, then the
//! column within the target row, so the cursor never wraps and never points
//! past the end of a short row.

use std::fmt;

use crate::geometry::{row_width, rows_height, Offset, Size, OUTLINE, SPACING_X, SPACING_Y};
use crate::widget::{Widget, WidgetKind};

/// Errors from grid construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("grid has no rows")]
    EmptyGrid,
    #[error("grid row {row} has no widgets")]
    EmptyRow { row: usize },
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A `(row, column)` index into a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Rows of widgets plus the hovered cell.
#[derive(Debug)]
pub struct Grid {
    rows: Vec<Vec<Widget>>,
    hovered: Cell,
}

impl Grid {
    /// Build a grid. Every row needs at least one widget.
    pub fn new(rows: Vec<Vec<Widget>>) -> Result<Self, LayoutError> {
        if rows.is_empty() {
            return Err(LayoutError::EmptyGrid);
        }
        if let Some(row) = rows.iter().position(Vec::is_empty) {
            return Err(LayoutError::EmptyRow { row });
        }
        Ok(Self { rows, hovered: Cell::default() })
    }

    pub fn rows(&self) -> &[Vec<Widget>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, cell: Cell) -> Option<&Widget> {
        self.rows.get(cell.row)?.get(cell.col)
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut Widget> {
        self.rows.get_mut(cell.row)?.get_mut(cell.col)
    }

    /// Every widget, row-major.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.rows.iter().flatten()
    }

    // ── Hover cursor ─────────────────────────────────────────────────

    /// The hovered cell. Always valid.
    pub fn hovered(&self) -> Cell {
        self.hovered
    }

    pub fn hovered_widget(&self) -> Option<&Widget> {
        self.get(self.hovered)
    }

    pub fn hovered_widget_mut(&mut self) -> Option<&mut Widget> {
        self.get_mut(self.hovered)
    }

    /// Clamp signed coordinates onto the grid.
    pub fn clamp(&self, row: i64, col: i64) -> Cell {
        let last_row = self.rows.len().saturating_sub(1);
        let row = usize::try_from(row.max(0)).unwrap_or(usize::MAX).min(last_row);
        let last_col = self.rows[row].len().saturating_sub(1);
        let col = usize::try_from(col.max(0)).unwrap_or(usize::MAX).min(last_col);
        Cell::new(row, col)
    }

    /// The cell one unit step `(dx, dy)` away from `from`, clamped.
    pub fn step(&self, from: Cell, (dx, dy): (i32, i32)) -> Cell {
        self.clamp(from.row as i64 + i64::from(dy), from.col as i64 + i64::from(dx))
    }

    /// Move the hover cursor to `to`, updating hovered flags.
    ///
    /// Returns the previous cell when the cursor actually moved.
    pub fn move_hover(&mut self, to: Cell) -> Option<Cell> {
        let to = self.clamp(to.row as i64, to.col as i64);
        let from = self.hovered;
        if to == from {
            return None;
        }
        if let Some(old) = self.get_mut(from) {
            old.set_hovered(false);
        }
        if let Some(new) = self.get_mut(to) {
            new.set_hovered(true);
        }
        self.hovered = to;
        tracing::debug!(%from, %to, "hover moved");
        Some(from)
    }

    // ── Layout assembly ──────────────────────────────────────────────

    /// Centre the rows on a screen of `screen` size.
    pub fn arrange(&mut self, screen: Size) {
        let centre = screen.center();
        let rows = self.rows.len() as i32;
        let mut y = centre.y - rows_height(rows) / 2;
        for row in &mut self.rows {
            let width = row_width(row.iter().map(|w| w.size().width));
            let mut x = centre.x - width / 2;
            for widget in row.iter_mut() {
                widget.set_position(Offset::new(x, y));
                x += widget.size().width + OUTLINE + SPACING_X;
            }
            y += rows_height(1) + SPACING_Y;
        }
    }

    /// Reset hover to `(0, 0)` and give every row exactly one enabled button.
    ///
    /// The first enabled button of a row stays enabled; if none is, the row's
    /// first button is enabled. Rows without buttons are left alone.
    pub fn normalize(&mut self) {
        for widget in self.rows.iter_mut().flatten() {
            widget.set_hovered(false);
        }
        self.hovered = Cell::default();
        if let Some(first) = self.get_mut(Cell::default()) {
            first.set_hovered(true);
        }

        for (index, row) in self.rows.iter_mut().enumerate() {
            let mut kept = false;
            for widget in row.iter_mut().filter(|w| w.is_button()) {
                if widget.is_enabled() {
                    if kept {
                        tracing::warn!(row = index, "several enabled buttons in row; keeping the first");
                        widget.set_enabled(false);
                    }
                    kept = true;
                }
            }
            if !kept {
                if let Some(first) = row.iter_mut().find(|w| w.is_button()) {
                    first.set_enabled(true);
                }
            }
        }
    }

    /// Make the button at `cell` the enabled button of its row.
    ///
    /// Returns the columns whose enabled flag changed. Does nothing unless
    /// `cell` holds a button.
    pub fn select(&mut self, cell: Cell) -> Vec<usize> {
        let Some(row) = self.rows.get_mut(cell.row) else {
            return Vec::new();
        };
        if !row.get(cell.col).is_some_and(Widget::is_button) {
            return Vec::new();
        }
        let mut changed = Vec::new();
        for (col, widget) in row.iter_mut().enumerate().filter(|(_, w)| w.is_button()) {
            let want = col == cell.col;
            if widget.is_enabled() != want {
                widget.set_enabled(want);
                changed.push(col);
            }
        }
        if !changed.is_empty() {
            tracing::debug!(row = cell.row, col = cell.col, "button selected");
        }
        changed
    }

    /// Cells of labels whose shared text changed since they were last synced.
    pub fn sync_labels(&mut self) -> Vec<Cell> {
        let mut changed = Vec::new();
        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, widget) in row.iter_mut().enumerate() {
                if let WidgetKind::Label(label) = widget.kind_mut() {
                    if label.sync() {
                        changed.push(Cell::new(r, c));
                    }
                }
            }
        }
        changed
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Label, Slider};
    use pretty_assertions::assert_eq;

    fn buttons(names: &[&str]) -> Vec<Widget> {
        names.iter().map(|n| Widget::button(*n)).collect()
    }

    fn sample() -> Grid {
        let mut grid = Grid::new(vec![
            buttons(&["Az", "By", "Cx"]),
            vec![Widget::new(Slider::new(0, 91, 1)), Widget::label("XX")],
            buttons(&["Truc", "Machin"]),
        ])
        .unwrap();
        grid.normalize();
        grid
    }

    fn enabled(grid: &Grid, row: usize) -> Vec<usize> {
        grid.rows()[row]
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_enabled())
            .map(|(c, _)| c)
            .collect()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn rejects_empty_grid_and_rows() {
        assert_eq!(Grid::new(Vec::new()).unwrap_err(), LayoutError::EmptyGrid);
        let err = Grid::new(vec![buttons(&["a"]), Vec::new()]).unwrap_err();
        assert_eq!(err, LayoutError::EmptyRow { row: 1 });
    }

    // ── Navigation ───────────────────────────────────────────────────

    #[test]
    fn left_from_first_column_stays() {
        let grid = sample();
        assert_eq!(grid.step(Cell::new(0, 0), (-1, 0)), Cell::new(0, 0));
        assert_eq!(grid.step(Cell::new(0, 0), (0, -1)), Cell::new(0, 0));
    }

    #[test]
    fn moves_past_last_row_and_column_clamp() {
        let grid = sample();
        assert_eq!(grid.step(Cell::new(0, 2), (1, 0)), Cell::new(0, 2));
        assert_eq!(grid.step(Cell::new(2, 0), (0, 1)), Cell::new(2, 0));
    }

    #[test]
    fn column_clamps_to_shorter_row() {
        let grid = sample();
        assert_eq!(grid.step(Cell::new(0, 2), (0, 1)), Cell::new(1, 1));
    }

    #[test]
    fn move_hover_updates_flags() {
        let mut grid = sample();
        assert!(grid.get(Cell::new(0, 0)).unwrap().is_hovered());
        assert_eq!(grid.move_hover(Cell::new(0, 1)), Some(Cell::new(0, 0)));
        assert!(!grid.get(Cell::new(0, 0)).unwrap().is_hovered());
        assert!(grid.get(Cell::new(0, 1)).unwrap().is_hovered());
        assert_eq!(grid.move_hover(Cell::new(0, 1)), None);
        assert_eq!(grid.widgets().filter(|w| w.is_hovered()).count(), 1);
    }

    // ── Layout assembly ──────────────────────────────────────────────

    #[test]
    fn normalize_enables_first_button_per_row() {
        let grid = sample();
        assert_eq!(enabled(&grid, 0), vec![0]);
        assert_eq!(enabled(&grid, 1), Vec::<usize>::new());
        assert_eq!(enabled(&grid, 2), vec![0]);
    }

    #[test]
    fn normalize_keeps_first_explicit_choice() {
        let mut grid = Grid::new(vec![vec![
            Widget::button("a"),
            Widget::button("b").enabled(true),
            Widget::button("c").enabled(true),
        ]])
        .unwrap();
        grid.normalize();
        assert_eq!(enabled(&grid, 0), vec![1]);
    }

    #[test]
    fn arrange_centres_rows() {
        let mut grid = Grid::new(vec![buttons(&["Az", "By"])]).unwrap();
        grid.arrange(Size::new(320, 222));
        // Row width: 20 + 20 + 2 * (1 + 2) - 2 = 44.
        assert_eq!(grid.rows()[0][0].position(), Offset::new(138, 102));
        assert_eq!(grid.rows()[0][1].position(), Offset::new(161, 102));
    }

    #[test]
    fn arrange_stacks_rows() {
        let mut grid = sample();
        grid.arrange(Size::new(320, 222));
        // rows_height(3) = 3 * 23 - 4 = 65 -> first row at 111 - 32.
        let ys: Vec<i32> = grid.rows().iter().map(|r| r[0].position().y).collect();
        assert_eq!(ys, vec![79, 102, 125]);
    }

    // ── Radio selection ──────────────────────────────────────────────

    #[test]
    fn select_leaves_one_enabled() {
        let mut grid = sample();
        assert_eq!(grid.select(Cell::new(0, 2)), vec![0, 2]);
        assert_eq!(enabled(&grid, 0), vec![2]);
        assert_eq!(grid.select(Cell::new(0, 2)), Vec::<usize>::new());
    }

    #[test]
    fn select_on_non_button_is_noop() {
        let mut grid = sample();
        assert!(grid.select(Cell::new(1, 1)).is_empty());
        assert!(grid.select(Cell::new(9, 0)).is_empty());
    }

    #[test]
    fn sync_labels_reports_changed_text() {
        let label = Label::new("XX");
        let text = label.handle();
        let mut grid = Grid::new(vec![
            buttons(&["a"]),
            vec![Widget::new(Slider::new(0, 9, 1)), Widget::new(label)],
        ])
        .unwrap();
        assert!(grid.sync_labels().is_empty());

        *text.borrow_mut() = " 7".into();
        assert_eq!(grid.sync_labels(), vec![Cell::new(1, 1)]);
        assert!(grid.sync_labels().is_empty());
    }
}
