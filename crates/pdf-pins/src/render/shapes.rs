//! Circle primitives
//!
//! Circles are closed polygons with `CIRCLE_SEGMENTS` vertices. At pin sizes
//! the chord error stays far below a printer dot.

use crate::constants::CIRCLE_SEGMENTS;
use crate::types::RgbColor;
use printpdf::*;

/// Vertices of a circle centred at (`cx`, `cy`) in PDF user space
pub fn circle_ring(cx: f32, cy: f32, radius: f32) -> PolygonRing {
    let points = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            LinePoint {
                p: Point {
                    x: Pt(cx + radius * angle.cos()),
                    y: Pt(cy + radius * angle.sin()),
                },
                bezier: false,
            }
        })
        .collect();

    PolygonRing { points }
}

fn circle_polygon(cx: f32, cy: f32, radius: f32, mode: PaintMode) -> Polygon {
    Polygon {
        rings: vec![circle_ring(cx, cy, radius)],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}

/// Filled disc
pub fn fill_circle(ops: &mut Vec<Op>, cx: f32, cy: f32, radius: f32, color: RgbColor) {
    ops.push(Op::SetFillColor {
        col: color.to_pdf(),
    });
    ops.push(Op::DrawPolygon {
        polygon: circle_polygon(cx, cy, radius, PaintMode::Fill),
    });
}

/// Unfilled circle stroked with the given line width
pub fn stroke_circle(
    ops: &mut Vec<Op>,
    cx: f32,
    cy: f32,
    radius: f32,
    width: f32,
    color: RgbColor,
) {
    ops.push(Op::SetOutlineColor {
        col: color.to_pdf(),
    });
    ops.push(Op::SetOutlineThickness { pt: Pt(width) });
    ops.push(Op::DrawPolygon {
        polygon: circle_polygon(cx, cy, radius, PaintMode::Stroke),
    });
}

/// Intersect the clip path with a disc. Pair with a saved graphics state.
pub fn clip_circle(ops: &mut Vec<Op>, cx: f32, cy: f32, radius: f32) {
    ops.push(Op::DrawPolygon {
        polygon: circle_polygon(cx, cy, radius, PaintMode::Clip),
    });
}
