#![forbid(unsafe_code)]

//! Accent popup session: rendered key grid, hit testing, and highlight.
//!
//! # Role in inputview
//! Long-pressing a key opens a small grid of accent variants above it. This
//! crate models that popup for its lifetime: [`AccentPopup`] lays the accents
//! out through `inputview-layout`, exposes the keys as an [`AccentView`],
//! and tracks which key is under the finger as it slides.
//!
//! # Primary responsibilities
//! - **AccentView**: rows of equally sized keys, blank keys included.
//! - **Hit testing**: [`locate`] over any [`PopupGeometry`], with a cancel
//!   tolerance applied to the grid's outer edges only.
//! - **AccentPopup**: per-popup highlight state and the host-facing calls.
//! - **Host bridge** (`host-bridge` feature): JSON commands from the
//!   keyboard controller.

pub mod config;
pub mod hit;
pub mod popup;
pub mod view;

#[cfg(feature = "host-bridge")]
pub mod bridge;

pub use config::PopupConfig;
pub use hit::{CellRef, HighlightChange, PopupGeometry, locate};
pub use popup::AccentPopup;
pub use view::{AccentKey, AccentView, GridGeometry, KeySize};

#[cfg(feature = "host-bridge")]
pub use bridge::{BridgeError, CommandReply, PopupCommand, parse_command};
