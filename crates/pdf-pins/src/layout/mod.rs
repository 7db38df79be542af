//! Layout calculation for pin sheets
//!
//! This module places the cutting circles on pages:
//! - Page splitting (fixed number of circles per page)
//! - Grid shape selection (columns × rows)
//! - Centering of the grid within the page margins

mod grid;
mod types;

pub use grid::*;
pub use types::*;
