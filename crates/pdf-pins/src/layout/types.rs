//! Layout data types

/// Centre of one cutting circle.
///
/// Coordinates are in points measured from the top-left corner of the page,
/// so row 0 sits at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePosition {
    pub x: f32,
    pub y: f32,
    /// Zero-based page index
    pub page: usize,
}

impl CirclePosition {
    pub fn new(x: f32, y: f32, page: usize) -> Self {
        Self { x, y, page }
    }

    /// Distance between two centres, ignoring the page
    pub fn distance_to(&self, other: &CirclePosition) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Grid shape chosen for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGrid {
    pub cols: usize,
    pub rows: usize,
}

impl PageGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }
}
