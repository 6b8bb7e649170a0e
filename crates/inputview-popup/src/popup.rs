#![forbid(unsafe_code)]

//! One accent popup session.
//!
//! An [`AccentPopup`] lives from the long-press that opens the popup until
//! the finger lifts. It owns the rendered [`AccentView`] and the single
//! highlighted cell; nothing is shared between sessions.
//!
//! # Invariants
//!
//! 1. At most one key carries the highlight marker.
//! 2. The marker is only touched when the resolved cell changes.
//! 3. Replacing the accents or closing the popup drops the highlight.
//! 4. The highlighted cell, when any, is a key of the attached view.

use crate::config::PopupConfig;
use crate::hit::{CellRef, HighlightChange, PopupGeometry, locate};
use crate::view::{AccentView, KeySize};
use inputview_layout::LayoutError;

#[cfg(feature = "tracing")]
use inputview_core::{debug, trace, warn};

/// Highlight tracking and layout for one open accent popup.
#[derive(Debug, Clone, Default)]
pub struct AccentPopup {
    config: PopupConfig,
    view: Option<AccentView>,
    highlighted: Option<CellRef>,
}

impl AccentPopup {
    pub fn new(config: PopupConfig) -> Self {
        Self {
            config,
            view: None,
            highlighted: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// The attached view, once [`set_accents`](Self::set_accents) succeeded.
    #[inline]
    pub fn view(&self) -> Option<&AccentView> {
        self.view.as_ref()
    }

    #[inline]
    pub fn highlighted(&self) -> Option<CellRef> {
        self.highlighted
    }

    /// Lay out `accents` and attach the resulting view, replacing any
    /// previous one.
    ///
    /// `start_column` is the column of the long-pressed key in the bottom
    /// row. On error the session is left untouched.
    pub fn set_accents<S: AsRef<str>>(
        &mut self,
        accents: &[S],
        columns: usize,
        rows: usize,
        key_width: i32,
        key_height: i32,
        start_column: usize,
    ) -> Result<&AccentView, LayoutError> {
        let view = self
            .check_capacity(columns, rows)
            .and_then(|()| KeySize::new(key_width, key_height))
            .and_then(|size| AccentView::build(accents, columns, rows, size, start_column));

        let view = match view {
            Ok(view) => view,
            Err(err) => {
                #[cfg(feature = "tracing")]
                warn!(columns, rows, start_column, error = %err, "accent layout rejected");
                return Err(err);
            }
        };

        #[cfg(feature = "tracing")]
        debug!(
            columns,
            rows,
            start_column,
            accents = accents.len(),
            "accent view built"
        );

        self.highlighted = None;
        Ok(self.view.insert(view))
    }

    fn check_capacity(&self, columns: usize, rows: usize) -> Result<(), LayoutError> {
        match columns.checked_mul(rows) {
            Some(slots) if slots <= self.config.max_slots => Ok(()),
            _ => Err(LayoutError::InvalidArgument(format!(
                "{columns}x{rows} grid exceeds {} slots",
                self.config.max_slots
            ))),
        }
    }

    /// Move the highlight to whatever key `geometry` places under `(x, y)`.
    ///
    /// Repeated calls resolving to the same cell change nothing. A cell the
    /// geometry reports but the view lacks counts as a miss.
    pub fn highlight_item<G: PopupGeometry + ?Sized>(
        &mut self,
        geometry: &G,
        x: f64,
        y: f64,
        offset: f64,
    ) -> HighlightChange {
        let target = locate(geometry, x, y, offset);
        self.move_highlight(target)
    }

    /// [`highlight_item`](Self::highlight_item) against the view's own
    /// uniform layout at the configured origin.
    pub fn highlight_item_at(&mut self, x: f64, y: f64, offset: f64) -> HighlightChange {
        let target = self
            .view
            .as_ref()
            .and_then(|view| locate(&view.layout(self.config.origin), x, y, offset));
        self.move_highlight(target)
    }

    fn move_highlight(&mut self, target: Option<CellRef>) -> HighlightChange {
        let target = target.filter(|&cell| {
            self.view
                .as_ref()
                .is_some_and(|view| view.key(cell).is_some())
        });
        let from = self.highlighted;
        if from == target {
            return HighlightChange::Unchanged;
        }
        if let Some(view) = self.view.as_mut() {
            if let Some(old) = from {
                view.mark(old, false);
            }
            if let Some(new) = target {
                view.mark(new, true);
            }
        }
        self.highlighted = target;

        #[cfg(feature = "tracing")]
        trace!(?from, to = ?target, "accent highlight moved");

        HighlightChange::Moved { from, to: target }
    }

    /// Text of the highlighted key; `None` when nothing is highlighted or
    /// the key is blank.
    pub fn highlighted_accent(&self) -> Option<&str> {
        let cell = self.highlighted?;
        let key = self.view.as_ref()?.key(cell)?;
        (!key.is_empty()).then(|| key.text())
    }

    /// Tear down the popup: drop the view and the highlight.
    pub fn close(&mut self) {
        self.view = None;
        self.highlighted = None;
    }
}
