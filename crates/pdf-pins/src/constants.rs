//! Shared constants for pin sheet generation
//!
//! This module centralizes the profile table, page geometry and the magic
//! numbers used by the transform and render stages.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Convert points to pixels at the given raster resolution
#[inline]
pub fn pt_to_px(pt: f32, dpi: f32) -> f32 {
    pt * dpi / POINTS_PER_INCH
}

// =============================================================================
// Page
// =============================================================================

/// A4 portrait width
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// A4 portrait height
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Uniform margin around the printable area
pub const PAGE_MARGIN_MM: f32 = 10.0;

/// Gap between neighbouring cutting circles
pub const PAGE_SPACING_MM: f32 = 3.0;

// =============================================================================
// Profiles
// =============================================================================

pub const SMALL_PIN_DIAMETER_MM: f32 = 32.0;
pub const SMALL_CIRCLE_DIAMETER_MM: f32 = 40.0;
pub const SMALL_CIRCLES_PER_PAGE: usize = 20;

pub const LARGE_PIN_DIAMETER_MM: f32 = 58.0;
pub const LARGE_CIRCLE_DIAMETER_MM: f32 = 70.0;
pub const LARGE_CIRCLES_PER_PAGE: usize = 6;

// =============================================================================
// Raster Preparation
// =============================================================================

/// Default raster resolution for prepared images
pub const DEFAULT_RASTER_DPI: f32 = 300.0;

/// Highest raster density accepted for embedded images
pub const MAX_RASTER_DPI: f32 = 1200.0;

/// Highest per-slot zoom factor
pub const MAX_ZOOM: f32 = 20.0;

/// Pixels at or below this alpha are ignored when sampling edge colour
pub const EDGE_ALPHA_THRESHOLD: u8 = 10;

/// Maximum number of rings walked inward while sampling edge colour
pub const EDGE_SAMPLE_MAX_RINGS: u32 = 5;

/// Sampling stops once this many opaque pixels have been collected
pub const EDGE_SAMPLE_TARGET: usize = 100;

/// Ring step as a fraction of the shorter raster side
pub const EDGE_RING_STEP_DIVISOR: u32 = 20;

// =============================================================================
// Drawing
// =============================================================================

/// Line width of the cutting outline (points)
pub const CUT_LINE_WIDTH: f32 = 0.5;

/// Number of straight segments used to draw a circle
pub const CIRCLE_SEGMENTS: usize = 128;

// =============================================================================
// Text
// =============================================================================

/// Auto font size is the pin diameter divided by this
pub const AUTO_TEXT_SIZE_DIVISOR: f32 = 8.0;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Distance of the top/bottom text anchor from the centre, relative to the pin radius
pub const TEXT_ANCHOR_FACTOR: f32 = 0.6;

/// Helvetica cap height in text space units (per 1000)
pub const HELVETICA_CAP_HEIGHT: f32 = 718.0;

/// Advance used for characters outside the Helvetica width table
pub const HELVETICA_DEFAULT_WIDTH: u16 = 556;
