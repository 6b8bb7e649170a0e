#![forbid(unsafe_code)]

//! Frequency-ranked accent placement.
//!
//! The popup opens over the key that was long-pressed. Accents come in
//! ranked by usage (index 0 = most frequent) and are laid out so that the
//! most frequent ones are nearest that key:
//!
//! - Within a row, columns are filled outward from the start column,
//!   right side before left: `start, start+1, start-1, start+2, ...`.
//! - Rows are filled bottom-up, since the popup grows upward from the key.
//!
//! # Example
//!
//! ```
//! use inputview_layout::{reorder, Slot};
//!
//! // 3 columns, 2 rows, finger on the middle column.
//! let grid = reorder(&["a", "b", "c", "d", "e", "f"], 3, 2, 1).unwrap();
//! let top: Vec<_> = grid.row(0).unwrap().iter().map(Slot::as_str).collect();
//! let bottom: Vec<_> = grid.row(1).unwrap().iter().map(Slot::as_str).collect();
//! assert_eq!(top, ["f", "d", "e"]);
//! assert_eq!(bottom, ["c", "a", "b"]);
//! ```
//!
//! # Invariants
//!
//! 1. The grid always has exactly `columns * rows` slots.
//! 2. Accents beyond `columns * rows` are dropped from the low-frequency tail.
//! 3. Empty slots take the highest fill ranks, so they sit far from the
//!    start key rather than in a contiguous block.

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};

/// Grid dimensions for one popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    columns: usize,
    rows: usize,
}

impl GridShape {
    /// Validate and create a shape. Both dimensions must be at least 1 and
    /// the slot count must fit in `usize`.
    pub fn new(columns: usize, rows: usize) -> Result<Self, LayoutError> {
        if columns == 0 {
            return Err(LayoutError::invalid("columns must be at least 1"));
        }
        if rows == 0 {
            return Err(LayoutError::invalid("rows must be at least 1"));
        }
        if columns.checked_mul(rows).is_none() {
            return Err(LayoutError::invalid(format!(
                "grid of {columns}x{rows} slots overflows"
            )));
        }
        Ok(Self { columns, rows })
    }

    #[inline]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of slots (`columns * rows`).
    #[inline]
    pub const fn slots(&self) -> usize {
        self.columns * self.rows
    }
}

/// One position in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// An accent character.
    Accent(String),
    /// No accent left for this position.
    Empty,
}

impl Slot {
    /// The accent text, or `""` for an empty slot.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Accent(text) => text,
            Self::Empty => "",
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Result of [`reorder`]: slots in row-major order, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedGrid {
    shape: GridShape,
    slots: Vec<Slot>,
}

impl OrderedGrid {
    #[inline]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of slots; always `columns * rows`.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at `(row, col)`, or `None` when out of range.
    pub fn slot(&self, row: usize, col: usize) -> Option<&Slot> {
        if row >= self.shape.rows || col >= self.shape.columns {
            return None;
        }
        self.slots.get(row * self.shape.columns + col)
    }

    /// All slots of one row, left to right.
    pub fn row(&self, row: usize) -> Option<&[Slot]> {
        if row >= self.shape.rows {
            return None;
        }
        let start = row * self.shape.columns;
        self.slots.get(start..start + self.shape.columns)
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Slot]> {
        self.slots.chunks_exact(self.shape.columns)
    }

    /// All slots in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Number of slots holding an accent.
    pub fn accent_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Consume the grid, yielding its slots.
    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }
}

impl<'a> IntoIterator for &'a OrderedGrid {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fill rank of each column for a row, radiating out from `start_column`.
///
/// `result[col]` is the rank of `col`; the start column has rank 0. At each
/// distance the right neighbour is ranked before the left one.
pub fn fill_order(columns: usize, start_column: usize) -> Result<Vec<usize>, LayoutError> {
    if columns == 0 {
        return Err(LayoutError::invalid("columns must be at least 1"));
    }
    check_start_column(columns, start_column)?;
    fill_order_unchecked(columns, start_column)
}

fn check_start_column(columns: usize, start_column: usize) -> Result<(), LayoutError> {
    if start_column >= columns {
        return Err(LayoutError::invalid(format!(
            "start column {start_column} outside 0..{columns}"
        )));
    }
    Ok(())
}

/// Reserve exactly `len` elements, reporting allocation failure as an
/// invalid shape instead of aborting.
fn alloc_exact<T>(len: usize, what: &str) -> Result<Vec<T>, LayoutError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| LayoutError::invalid(format!("{len} {what} cannot be allocated")))?;
    Ok(buf)
}

fn fill_order_unchecked(columns: usize, start: usize) -> Result<Vec<usize>, LayoutError> {
    let mut order = alloc_exact(columns, "columns")?;
    order.resize(columns, 0);
    let mut rank = 0;
    let right_room = columns - start - 1;
    for step in 1..=right_room.max(start) {
        if step <= right_room {
            rank += 1;
            order[start + step] = rank;
        }
        if step <= start {
            rank += 1;
            order[start - step] = rank;
        }
    }
    Ok(order)
}

/// Lay out frequency-ranked `accents` into a `columns` x `rows` grid.
///
/// The bottom row takes accents `[0, columns)` in fill-rank order, the row
/// above takes `[columns, 2*columns)`, and so on. Slots with no accent left
/// are [`Slot::Empty`]; surplus accents are dropped.
pub fn reorder<S: AsRef<str>>(
    accents: &[S],
    columns: usize,
    rows: usize,
    start_column: usize,
) -> Result<OrderedGrid, LayoutError> {
    let shape = GridShape::new(columns, rows)?;
    check_start_column(columns, start_column)?;

    let order = fill_order_unchecked(columns, start_column)?;
    let mut slots = alloc_exact(shape.slots(), "slots")?;
    for row in 0..rows {
        let base = columns * (rows - row - 1);
        slots.extend(order.iter().map(|rank| {
            accents
                .get(base + rank)
                .map_or(Slot::Empty, |a| Slot::Accent(a.as_ref().to_owned()))
        }));
    }

    Ok(OrderedGrid { shape, slots })
}
