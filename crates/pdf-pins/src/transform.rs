//! Per-slot image preparation
//!
//! An image is placed on a square the size of the cutting circle, scaled
//! down to fit if it is larger, then multiplied by the slot's zoom and
//! panned by the slot's offset. The square is finally cropped to the pin
//! diameter. All sizes here are in pixels.
//!
//! Only the part of the source that lands inside the square is resampled,
//! so the working buffers stay the size of the square however far the image
//! is zoomed or panned, and nothing outside any buffer is read.

use crate::constants::{
    EDGE_ALPHA_THRESHOLD, EDGE_RING_STEP_DIVISOR, EDGE_SAMPLE_MAX_RINGS, EDGE_SAMPLE_TARGET,
    MAX_ZOOM,
};
use crate::types::{EdgeColor, PinError, Result, RgbColor};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};

/// Colour used when a raster has no opaque edge pixel at all
pub const EDGE_COLOR_FALLBACK: EdgeColor = RgbColor::WHITE;

/// A decoded source image
#[derive(Debug, Clone)]
pub struct PinImage {
    /// Label used in error messages and logs, usually the file name
    pub name: String,
    pub image: DynamicImage,
}

impl PinImage {
    pub fn new(name: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

/// Zoom and pan of one slot, offsets in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Framing {
    pub fn new(zoom: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            zoom,
            offset_x,
            offset_y,
        }
    }
}

/// Result of preparing one image for one slot
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// Square raster, pin diameter on each side
    pub raster: RgbaImage,
    pub edge_color: Option<EdgeColor>,
}

/// Prepare `source` for a pin of `pin_diameter` inside a cutting circle of
/// `circle_diameter` (both in pixels).
pub fn prepare(
    source: &PinImage,
    pin_diameter: f32,
    circle_diameter: f32,
    framing: &Framing,
    need_edge_color: bool,
) -> Result<PreparedImage> {
    let (width, height) = source.image.dimensions();
    if width == 0 || height == 0 {
        return Err(PinError::InvalidImage {
            name: source.name.clone(),
            reason: format!("image has zero dimensions ({width}x{height})"),
        });
    }

    if !(framing.zoom.is_finite() && framing.zoom > 0.0 && framing.zoom <= MAX_ZOOM) {
        return Err(PinError::Config(format!(
            "Zoom must be greater than 0 and at most {}, got {}",
            MAX_ZOOM, framing.zoom
        )));
    }

    if !(framing.offset_x.is_finite() && framing.offset_y.is_finite()) {
        return Err(PinError::Config("Offsets must be finite numbers".to_string()));
    }

    if !(pin_diameter > 0.0 && circle_diameter >= pin_diameter) {
        return Err(PinError::Config(format!(
            "Cutting circle ({circle_diameter}px) must enclose the pin ({pin_diameter}px)"
        )));
    }

    let boundary = (circle_diameter.round() as u32).max(1);

    let framed = frame_to_boundary(&source.image, boundary, framing);
    let raster = crop_to_pin(framed, pin_diameter);

    let edge_color = need_edge_color.then(|| sample_edge_color(&raster));

    log::debug!(
        "Prepared {} ({}x{}) at zoom {:.2}, offset ({:.1}, {:.1}) -> {}px",
        source.name,
        width,
        height,
        framing.zoom,
        framing.offset_x,
        framing.offset_y,
        raster.width()
    );

    Ok(PreparedImage { raster, edge_color })
}

/// Scale applied to a `width × height` source: shrink to fit `boundary`
/// (never enlarge), then zoom.
pub fn fit_scale(width: u32, height: u32, boundary: u32, zoom: f32) -> f32 {
    let fit = (boundary as f32 / width.max(height).max(1) as f32).min(1.0);
    fit * zoom
}

/// Render the framed image onto a transparent `boundary × boundary` raster.
///
/// The scaled image is centred on the square and moved by the pan offset.
/// Only the source pixels that end up inside the square are cropped out and
/// resampled; a source that needs no scaling is copied as is.
pub fn frame_to_boundary(source: &DynamicImage, boundary: u32, framing: &Framing) -> RgbaImage {
    let mut canvas = RgbaImage::new(boundary, boundary);

    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return canvas;
    }

    let scale = fit_scale(width, height, boundary, framing.zoom);
    let scaled_width = (width as f32 * scale).round().max(1.0);
    let scaled_height = (height as f32 * scale).round().max(1.0);

    // Top-left corner of the whole scaled image in canvas pixels
    let left = ((boundary as f32 - scaled_width) / 2.0 + framing.offset_x).round();
    let top = ((boundary as f32 - scaled_height) / 2.0 + framing.offset_y).round();

    let Some((x0, x1)) = visible_span(left, scaled_width, boundary, scale, width) else {
        return canvas;
    };
    let Some((y0, y1)) = visible_span(top, scaled_height, boundary, scale, height) else {
        return canvas;
    };

    let region = source.crop_imm(x0, y0, x1 - x0, y1 - y0).to_rgba8();
    let target_width = (((x1 - x0) as f32 * scale).round() as u32).max(1);
    let target_height = (((y1 - y0) as f32 * scale).round() as u32).max(1);

    let resized = if (target_width, target_height) == region.dimensions() {
        region
    } else {
        imageops::resize(&region, target_width, target_height, FilterType::Lanczos3)
    };

    imageops::replace(
        &mut canvas,
        &resized,
        (left + (x0 as f32 * scale).round()) as i64,
        (top + (y0 as f32 * scale).round()) as i64,
    );
    canvas
}

/// Source pixel range `[start, end)` along one axis whose scaled copy, placed
/// at `offset`, overlaps `0..boundary`. `None` when it is entirely outside.
fn visible_span(
    offset: f32,
    scaled_len: f32,
    boundary: u32,
    scale: f32,
    source_len: u32,
) -> Option<(u32, u32)> {
    let visible_start = (-offset).max(0.0);
    let visible_end = (boundary as f32 - offset).min(scaled_len);
    if visible_end <= visible_start {
        return None;
    }

    let start = ((visible_start / scale).floor() as u32).min(source_len - 1);
    let end = ((visible_end / scale).ceil() as u32).clamp(start + 1, source_len);
    Some((start, end))
}

/// Centre-crop a boundary raster down to the pin diameter
pub fn crop_to_pin(raster: RgbaImage, pin_diameter: f32) -> RgbaImage {
    let pin = (pin_diameter.round() as u32).max(1);
    let size = raster.width().min(raster.height());
    if size <= pin {
        return raster;
    }

    let x = (raster.width() - pin) / 2;
    let y = (raster.height() - pin) / 2;
    imageops::crop_imm(&raster, x, y, pin, pin).to_image()
}

/// Average colour of the opaque pixels along the raster's border.
///
/// Walks the outermost ring first and steps inward while too few opaque
/// samples have been found, so artwork with transparent rounded corners still
/// yields its own colour. Returns [`EDGE_COLOR_FALLBACK`] when nothing opaque
/// is found.
pub fn sample_edge_color(raster: &RgbaImage) -> EdgeColor {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return EDGE_COLOR_FALLBACK;
    }

    let step = (width.min(height) / EDGE_RING_STEP_DIVISOR).max(1);
    let mut sum = [0u64; 3];
    let mut count = 0usize;

    for ring in 0..EDGE_SAMPLE_MAX_RINGS {
        let inset = ring * step;
        if inset * 2 >= width || inset * 2 >= height {
            break;
        }

        for (x, y) in ring_pixels(width, height, inset) {
            let px = raster.get_pixel(x, y);
            if px[3] > EDGE_ALPHA_THRESHOLD {
                sum[0] += px[0] as u64;
                sum[1] += px[1] as u64;
                sum[2] += px[2] as u64;
                count += 1;
            }
        }

        if count >= EDGE_SAMPLE_TARGET {
            break;
        }
    }

    if count == 0 {
        return EDGE_COLOR_FALLBACK;
    }

    let n = count as u64;
    RgbColor::new(
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
    )
}

/// Coordinates of the rectangle `inset` pixels in from each edge, each pixel once
fn ring_pixels(width: u32, height: u32, inset: u32) -> impl Iterator<Item = (u32, u32)> {
    let left = inset;
    let top = inset;
    let right = width - 1 - inset;
    let bottom = height - 1 - inset;

    let top_row = (left..=right).map(move |x| (x, top));
    let bottom_row = (left..=right)
        .filter(move |_| bottom != top)
        .map(move |x| (x, bottom));
    let sides = (top + 1..bottom).flat_map(move |y| {
        let right_side = (right != left).then_some((right, y));
        std::iter::once((left, y)).chain(right_side)
    });

    top_row.chain(bottom_row).chain(sides)
}
