#![forbid(unsafe_code)]

//! Core: screen geometry and logging for the inputview accent popup.
//!
//! # Role in inputview
//! `inputview-core` holds the small vocabulary the other crates share:
//! pixel [`geometry`] for hit-testing and the optional [`logging`] layer.
//! The popup session (`inputview-popup`) builds on it; the layout solver
//! (`inputview-layout`) is pure and needs neither.

pub mod geometry;
pub mod logging;

pub use geometry::{Point, Rect, Span};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
