//! Grid layout calculation
//!
//! Circles are split into pages of `circles_per_page`, and each page gets the
//! narrowest grid whose height still fits the printable area. On a portrait
//! page that yields tall grids that use the page length.

use crate::types::{PageGeometry, PinProfile};

use super::{CirclePosition, PageGrid};

// =============================================================================
// Document Layout
// =============================================================================

/// Compute the centre and page of every circle on the standard A4 page.
pub fn calculate_layout(total_circles: usize, profile: &PinProfile) -> Vec<CirclePosition> {
    calculate_layout_on(&PageGeometry::a4(), total_circles, profile)
}

/// Compute the centre and page of every circle on the given page geometry.
///
/// Returns one position per circle, in slot order. Every page except the
/// last holds exactly `profile.circles_per_page` circles.
pub fn calculate_layout_on(
    page: &PageGeometry,
    total_circles: usize,
    profile: &PinProfile,
) -> Vec<CirclePosition> {
    if total_circles == 0 || profile.circles_per_page == 0 {
        return Vec::new();
    }

    let per_page = profile.circles_per_page;
    let page_count = total_circles.div_ceil(per_page);
    let diameter = profile.circle_diameter_pt;
    let pitch = diameter + page.spacing_pt;

    let mut positions = Vec::with_capacity(total_circles);

    for page_index in 0..page_count {
        let first = page_index * per_page;
        let circles_on_page = per_page.min(total_circles - first);
        let grid = calculate_page_layout(circles_on_page, diameter, page);

        let (start_x, start_y) = grid_origin(&grid, diameter, page);

        for i in 0..circles_on_page {
            let row = i / grid.cols;
            let col = i % grid.cols;
            positions.push(CirclePosition::new(
                start_x + col as f32 * pitch + diameter / 2.0,
                start_y + row as f32 * pitch + diameter / 2.0,
                page_index,
            ));
        }
    }

    positions
}

/// Number of pages spanned by the positions (0 when empty)
pub fn get_total_pages(positions: &[CirclePosition]) -> usize {
    positions.iter().map(|p| p.page + 1).max().unwrap_or(0)
}

// =============================================================================
// Page Grid
// =============================================================================

/// Pick the grid shape for `circles_on_page` circles of the given diameter.
///
/// Scans column counts from 1 upward and takes the first whose row count fits
/// the available height. If none fits, falls back to a square-ish grid.
pub fn calculate_page_layout(circles_on_page: usize, diameter: f32, page: &PageGeometry) -> PageGrid {
    if circles_on_page == 0 {
        return PageGrid::new(1, 0);
    }

    let max_cols = max_columns(diameter, page);
    let available_height = page.available_height_pt();

    for cols in 1..=max_cols {
        let rows = circles_on_page.div_ceil(cols);
        if span(rows, diameter, page.spacing_pt) <= available_height + f32::EPSILON * 1000.0 {
            return PageGrid::new(cols, rows);
        }
    }

    let cols = (circles_on_page as f32).sqrt().ceil() as usize;
    let rows = circles_on_page.div_ceil(cols);
    log::warn!(
        "{} circles of {:.1}pt do not fit the page, using a {}x{} grid",
        circles_on_page,
        diameter,
        cols,
        rows
    );
    PageGrid::new(cols, rows)
}

/// How many circles of this diameter fit side by side in the printable width
pub fn max_columns(diameter: f32, page: &PageGeometry) -> usize {
    let cols = ((page.available_width_pt() + page.spacing_pt) / (diameter + page.spacing_pt)).floor();
    (cols.max(1.0)) as usize
}

/// Total extent of `count` circles laid out with spacing between them
fn span(count: usize, diameter: f32, spacing: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * diameter + (count - 1) as f32 * spacing
}

/// Top-left corner of the grid so that it is centred inside the margins
fn grid_origin(grid: &PageGrid, diameter: f32, page: &PageGeometry) -> (f32, f32) {
    let grid_width = span(grid.cols, diameter, page.spacing_pt);
    let grid_height = span(grid.rows, diameter, page.spacing_pt);

    let start_x = page.margin_pt + (page.available_width_pt() - grid_width) / 2.0;
    let start_y = page.margin_pt + (page.available_height_pt() - grid_height) / 2.0;

    (start_x, start_y)
}

// =============================================================================
// Tests
// =============================================================================
