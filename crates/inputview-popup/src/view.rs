#![forbid(unsafe_code)]

//! The rendered accent grid, as a host-agnostic model.
//!
//! [`AccentView`] is what the popup window draws: one row of keys per grid
//! row, every key the same size, blank slots still present as keys so the
//! grid keeps its shape. Each key carries a highlight marker; the view
//! bumps its revision whenever a marker flips so hosts can repaint lazily.

use crate::hit::{CellRef, PopupGeometry};
use inputview_core::geometry::{Point, Rect};
use inputview_layout::{GridShape, LayoutError, OrderedGrid, Slot, reorder};
use serde::{Deserialize, Serialize};

/// Pixel size shared by every key in the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySize {
    pub width: i32,
    pub height: i32,
}

impl KeySize {
    /// Validate and create a key size; both sides must be positive.
    pub fn new(width: i32, height: i32) -> Result<Self, LayoutError> {
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidArgument(format!(
                "key size {width}x{height} must be positive"
            )));
        }
        Ok(Self { width, height })
    }
}

/// One key of the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentKey {
    slot: Slot,
    highlighted: bool,
}

impl AccentKey {
    /// Key label; `""` for a blank key.
    #[inline]
    pub fn text(&self) -> &str {
        self.slot.as_str()
    }

    /// Blank keys pad the grid and are styled as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Rows of keys built from an [`OrderedGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentView {
    shape: GridShape,
    key_size: KeySize,
    keys: Vec<AccentKey>,
    revision: u64,
}

impl AccentView {
    /// Reorder `accents` for the given shape and wrap the result in keys.
    pub fn build<S: AsRef<str>>(
        accents: &[S],
        columns: usize,
        rows: usize,
        key_size: KeySize,
        start_column: usize,
    ) -> Result<Self, LayoutError> {
        let grid = reorder(accents, columns, rows, start_column)?;
        Ok(Self::from_grid(grid, key_size))
    }

    /// Wrap an already solved grid.
    pub fn from_grid(grid: OrderedGrid, key_size: KeySize) -> Self {
        let shape = grid.shape();
        let keys = grid
            .into_slots()
            .into_iter()
            .map(|slot| AccentKey {
                slot,
                highlighted: false,
            })
            .collect();
        Self {
            shape,
            key_size,
            keys,
            revision: 0,
        }
    }

    #[inline]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub const fn key_size(&self) -> KeySize {
        self.key_size
    }

    /// Incremented on every highlight marker flip.
    #[inline]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn key(&self, cell: CellRef) -> Option<&AccentKey> {
        self.index_of(cell).and_then(|i| self.keys.get(i))
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[AccentKey]> {
        self.keys.chunks_exact(self.shape.columns())
    }

    /// Keys currently carrying the highlight marker.
    pub fn highlighted_cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        let columns = self.shape.columns();
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.highlighted)
            .map(move |(i, _)| CellRef::new(i / columns, i % columns))
    }

    /// Reference placement of the keys with the top-left key at `origin`.
    pub fn layout(&self, origin: Point) -> GridGeometry {
        GridGeometry {
            origin,
            key_size: self.key_size,
            shape: self.shape,
        }
    }

    /// Set or clear the marker on `cell`. Returns whether anything changed.
    pub(crate) fn mark(&mut self, cell: CellRef, on: bool) -> bool {
        let Some(key) = self.index_of(cell).and_then(|i| self.keys.get_mut(i)) else {
            return false;
        };
        if key.highlighted == on {
            return false;
        }
        key.highlighted = on;
        self.revision += 1;
        true
    }

    fn index_of(&self, cell: CellRef) -> Option<usize> {
        (cell.row < self.shape.rows() && cell.column < self.shape.columns())
            .then(|| cell.row * self.shape.columns() + cell.column)
    }
}

/// Uniform key placement: rows stacked downward from `origin`, keys packed
/// left to right, no gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    origin: Point,
    key_size: KeySize,
    shape: GridShape,
}

impl GridGeometry {
    #[inline]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Bounds of the whole popup.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            span(self.key_size.width, self.shape.columns()),
            span(self.key_size.height, self.shape.rows()),
        )
    }
}

/// `size * count`, saturating at `i32::MAX`.
fn span(size: i32, count: usize) -> i32 {
    i32::try_from(count).map_or(i32::MAX, |n| size.saturating_mul(n))
}

impl PopupGeometry for GridGeometry {
    fn row_count(&self) -> usize {
        self.shape.rows()
    }

    fn cell_count(&self, row: usize) -> usize {
        if row < self.shape.rows() {
            self.shape.columns()
        } else {
            0
        }
    }

    fn row_bounds(&self, row: usize) -> Option<Rect> {
        (row < self.shape.rows()).then(|| {
            Rect::new(
                self.origin.x,
                self.origin.y.saturating_add(span(self.key_size.height, row)),
                span(self.key_size.width, self.shape.columns()),
                self.key_size.height,
            )
        })
    }

    fn cell_bounds(&self, row: usize, column: usize) -> Option<Rect> {
        let row_rect = self.row_bounds(row)?;
        (column < self.shape.columns()).then(|| {
            Rect::new(
                row_rect.x.saturating_add(span(self.key_size.width, column)),
                row_rect.y,
                self.key_size.width,
                self.key_size.height,
            )
        })
    }
}
