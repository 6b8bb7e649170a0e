#![forbid(unsafe_code)]

//! Edge-tolerant hit testing over a rendered accent grid.
//!
//! The host owns the rendered keys; this module only asks for their screen
//! rectangles through [`PopupGeometry`], so the search runs the same against
//! a real window or a test fixture.
//!
//! # Search
//!
//! Rows are scanned top to bottom against `y`, then the cells of the chosen
//! row left to right against `x`. Both bounds are open intervals, and the
//! pointer position is compared unrounded, so a finger at `10.4` is inside
//! a key spanning `[10, 20)`. The cancel `offset` widens only the outer
//! edges of the grid: the top of the first row, the bottom of the last row,
//! the left of the first cell and the right of the last cell. Interior boundaries are never widened, so the
//! tolerance cannot make a finger between two keys hit both.
//!
//! # Failure Modes
//!
//! - Rows or cells the geometry cannot measure (`None`) are skipped.
//! - Overlapping rows resolve to the first match in scan order.
//! - Any coordinate is accepted; a miss is `None`, never an error.

use inputview_core::geometry::{Rect, Span};
use serde::{Deserialize, Serialize};

/// Address of one rendered key: row 0 at the top, column 0 at the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Screen-space measurements of a rendered accent grid.
pub trait PopupGeometry {
    /// Number of rendered rows.
    fn row_count(&self) -> usize;

    /// Number of rendered cells in `row`.
    fn cell_count(&self, row: usize) -> usize;

    /// Screen rectangle of a whole row.
    fn row_bounds(&self, row: usize) -> Option<Rect>;

    /// Screen rectangle of one cell.
    fn cell_bounds(&self, row: usize, column: usize) -> Option<Rect>;
}

impl<G: PopupGeometry + ?Sized> PopupGeometry for &G {
    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn cell_count(&self, row: usize) -> usize {
        (**self).cell_count(row)
    }

    fn row_bounds(&self, row: usize) -> Option<Rect> {
        (**self).row_bounds(row)
    }

    fn cell_bounds(&self, row: usize, column: usize) -> Option<Rect> {
        (**self).cell_bounds(row, column)
    }
}

/// Find the key under `(x, y)`, widening the grid's outer edges by `offset`.
pub fn locate<G: PopupGeometry + ?Sized>(
    geometry: &G,
    x: f64,
    y: f64,
    offset: f64,
) -> Option<CellRef> {
    let row = first_containing(
        geometry.row_count(),
        |i| geometry.row_bounds(i).map(|r| r.vertical()),
        y,
        offset,
    )?;
    let column = first_containing(
        geometry.cell_count(row),
        |j| geometry.cell_bounds(row, j).map(|r| r.horizontal()),
        x,
        offset,
    )?;
    Some(CellRef { row, column })
}

/// Index of the first band strictly containing `v`, with the leading edge
/// of band 0 and the trailing edge of the last band pushed out by `offset`.
fn first_containing(
    count: usize,
    span_of: impl Fn(usize) -> Option<Span>,
    v: f64,
    offset: f64,
) -> Option<usize> {
    (0..count).find(|&i| {
        span_of(i).is_some_and(|span| {
            let lead = if i == 0 { offset } else { 0.0 };
            let trail = if i + 1 == count { offset } else { 0.0 };
            span.grow(lead, trail).strictly_contains(v)
        })
    })
}

/// What a highlight update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightChange {
    /// The point resolved to the cell already highlighted (or to nothing,
    /// with nothing highlighted). No marker was touched.
    Unchanged,
    /// The marker moved: removed from `from`, applied to `to`.
    Moved {
        from: Option<CellRef>,
        to: Option<CellRef>,
    },
}

impl HighlightChange {
    #[inline]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}
