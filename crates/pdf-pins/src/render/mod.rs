//! PDF drawing for pin sheets
//!
//! This module turns prepared slots into printpdf operations:
//! - Circle geometry (filled discs, stroked rings, clip paths)
//! - Text overlays with Helvetica metrics
//! - The per-slot drawing order

mod pin;
mod shapes;
mod text;

pub use pin::*;
pub use shapes::*;
pub use text::*;
