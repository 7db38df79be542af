//! Drawing of a single pin slot
//!
//! Order on the page, bottom to top:
//! 1. background disc (explicit colour, else sampled edge colour)
//! 2. image, clipped to the pin disc
//! 3. border ring, inward from the cut line
//! 4. cutting outline
//! 5. text overlay

use crate::constants::CUT_LINE_WIDTH;
use crate::layout::CirclePosition;
use crate::types::{EdgeColor, PinProfile, ResolvedStyle, RgbColor, TextBlock, TextStyle};
use printpdf::*;

use super::{clip_circle, draw_text_block, fill_circle, stroke_circle};

/// A prepared raster that has been added to the document
#[derive(Debug, Clone)]
pub struct SlotImage {
    pub xobject: XObjectId,
    /// Side length of the square raster in pixels
    pub pixel_size: u32,
    pub edge_color: Option<EdgeColor>,
}

/// Everything needed to draw one slot
#[derive(Debug, Clone, Copy)]
pub struct SlotDrawing<'a> {
    pub position: &'a CirclePosition,
    pub profile: &'a PinProfile,
    pub style: &'a ResolvedStyle,
    pub image: Option<&'a SlotImage>,
    pub text: Option<&'a TextBlock>,
}

impl SlotDrawing<'_> {
    /// Explicit background wins over the sampled edge colour
    pub fn background(&self) -> Option<RgbColor> {
        self.style.background_color.or_else(|| {
            if self.style.fill_with_edge_color {
                self.image.and_then(|image| image.edge_color)
            } else {
                None
            }
        })
    }
}

/// Append the operations for one slot to `ops`.
pub fn draw_slot(ops: &mut Vec<Op>, slot: &SlotDrawing<'_>, text_style: &TextStyle, page_height_pt: f32) {
    let cx = slot.position.x;
    let cy = page_height_pt - slot.position.y;
    let circle_radius = slot.profile.circle_radius_pt();

    ops.push(Op::SaveGraphicsState);

    if let Some(background) = slot.background() {
        fill_circle(ops, cx, cy, circle_radius, background);
    }

    if let Some(image) = slot.image {
        draw_clipped_image(ops, image, cx, cy, slot.profile.pin_diameter_pt);
    }

    if let Some((color, width)) = slot.style.border() {
        let width = width.min(circle_radius);
        stroke_circle(ops, cx, cy, circle_radius - width / 2.0, width, color);
    }

    stroke_circle(ops, cx, cy, circle_radius, CUT_LINE_WIDTH, RgbColor::BLACK);

    if let Some(text) = slot.text {
        draw_text_block(ops, text, text_style, slot.profile.pin_diameter_pt, cx, cy);
    }

    ops.push(Op::RestoreGraphicsState);
}

/// Place the raster as a `pin_diameter` square centred on (`cx`, `cy`),
/// visible only inside the pin disc.
fn draw_clipped_image(ops: &mut Vec<Op>, image: &SlotImage, cx: f32, cy: f32, pin_diameter: f32) {
    let pin_radius = pin_diameter / 2.0;
    // At 72 dpi one pixel is one point, so the scale maps pixels onto the pin
    let scale = pin_diameter / image.pixel_size.max(1) as f32;

    ops.push(Op::SaveGraphicsState);
    clip_circle(ops, cx, cy, pin_radius);
    ops.push(Op::UseXobject {
        id: image.xobject.clone(),
        transform: XObjectTransform {
            translate_x: Some(Pt(cx - pin_radius)),
            translate_y: Some(Pt(cy - pin_radius)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(72.0),
            ..Default::default()
        },
    });
    ops.push(Op::RestoreGraphicsState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PinSize, TextLine};

    fn style() -> ResolvedStyle {
        ResolvedStyle {
            zoom: 1.0,
            offset_x_pt: 0.0,
            offset_y_pt: 0.0,
            fill_with_edge_color: false,
            background_color: None,
            border_color: None,
            border_width_mm: 0.0,
        }
    }

    fn polygons(ops: &[Op]) -> Vec<&Polygon> {
        ops.iter()
            .filter_map(|op| match op {
                Op::DrawPolygon { polygon } => Some(polygon),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_blank_slot_draws_only_cut_line() {
        let profile = PinSize::Small.profile();
        let position = CirclePosition::new(100.0, 100.0, 0);
        let style = style();
        let slot = SlotDrawing {
            position: &position,
            profile: &profile,
            style: &style,
            image: None,
            text: None,
        };

        let mut ops = Vec::new();
        draw_slot(&mut ops, &slot, &TextStyle::default(), 800.0);

        let shapes = polygons(&ops);
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0].mode, PaintMode::Stroke));
        assert!(matches!(ops.first(), Some(Op::SaveGraphicsState)));
        assert!(matches!(ops.last(), Some(Op::RestoreGraphicsState)));
    }

    #[test]
    fn test_background_precedence() {
        let profile = PinSize::Small.profile();
        let position = CirclePosition::new(100.0, 100.0, 0);
        let image = SlotImage {
            xobject: XObjectId::new(),
            pixel_size: 100,
            edge_color: Some(RgbColor::new(1, 2, 3)),
        };

        let background = |resolved: &ResolvedStyle| {
            SlotDrawing {
                position: &position,
                profile: &profile,
                style: resolved,
                image: Some(&image),
                text: None,
            }
            .background()
        };

        let mut resolved = style();
        // Edge colour is ignored unless fill is requested
        assert_eq!(background(&resolved), None);

        resolved.fill_with_edge_color = true;
        assert_eq!(background(&resolved), Some(RgbColor::new(1, 2, 3)));

        resolved.background_color = Some(RgbColor::WHITE);
        assert_eq!(background(&resolved), Some(RgbColor::WHITE));
    }

    #[test]
    fn test_full_slot_drawing_order() {
        let profile = PinSize::Large.profile();
        let position = CirclePosition::new(150.0, 200.0, 0);
        let image = SlotImage {
            xobject: XObjectId::new(),
            pixel_size: 685,
            edge_color: None,
        };
        let mut resolved = style();
        resolved.background_color = Some(RgbColor::WHITE);
        resolved.border_color = Some(RgbColor::new(200, 0, 0));
        resolved.border_width_mm = 2.0;
        let text = TextBlock::new(vec![TextLine::new("Hello")]);

        let slot = SlotDrawing {
            position: &position,
            profile: &profile,
            style: &resolved,
            image: Some(&image),
            text: Some(&text),
        };

        let mut ops = Vec::new();
        draw_slot(&mut ops, &slot, &TextStyle::default(), 842.0);

        let modes: Vec<&PaintMode> = polygons(&ops).into_iter().map(|p| &p.mode).collect();
        assert!(matches!(
            modes.as_slice(),
            [PaintMode::Fill, PaintMode::Clip, PaintMode::Stroke, PaintMode::Stroke]
        ));

        let image_at = ops.iter().position(|op| matches!(op, Op::UseXobject { .. })).unwrap();
        let text_at = ops.iter().position(|op| matches!(op, Op::StartTextSection)).unwrap();
        assert!(image_at < text_at);
    }
}
