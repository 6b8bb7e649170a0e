#![forbid(unsafe_code)]

//! Accent grid layout.
//!
//! # Role in inputview
//! `inputview-layout` decides where each accent goes when the long-press
//! popup opens. Accents arrive ranked by usage; the solver places the most
//! frequent ones nearest the key under the finger. The popup session in
//! `inputview-popup` renders the resulting [`OrderedGrid`] and hit-tests it.

pub mod accents;
pub mod error;

pub use accents::{GridShape, OrderedGrid, Slot, fill_order, reorder};
pub use error::LayoutError;
