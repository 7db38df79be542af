//! Text overlays
//!
//! Lines are set in the built-in Helvetica, so widths come from its standard
//! metrics instead of an embedded font.

use crate::constants::{
    AUTO_TEXT_SIZE_DIVISOR, HELVETICA_CAP_HEIGHT, HELVETICA_DEFAULT_WIDTH, LINE_HEIGHT_FACTOR,
    TEXT_ANCHOR_FACTOR,
};
use crate::types::{TextBlock, TextPosition, TextStyle};
use printpdf::*;

/// Helvetica advance widths for ASCII 32..=126, per 1000 units of font size
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

/// Width of `text` set in Helvetica at `size` points.
///
/// Metrics cover printable ASCII only. Any other character, including the
/// accented Latin-1 letters WinAnsi can still encode, is measured at the
/// average advance of 556 units, so centring of such lines is approximate.
pub fn helvetica_text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| {
            let code = ch as u32;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[(code - 32) as usize] as u32
            } else {
                HELVETICA_DEFAULT_WIDTH as u32
            }
        })
        .sum();
    units as f32 / 1000.0 * size
}

/// Font size used when neither the line nor the document sets one
pub fn auto_text_size(pin_diameter_pt: f32) -> f32 {
    pin_diameter_pt / AUTO_TEXT_SIZE_DIVISOR
}

/// One line positioned relative to the pin centre.
///
/// Offsets are in points with y growing downward, like the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub size: f32,
    pub x_offset: f32,
    pub baseline_offset: f32,
}

/// Stack the block's lines around the anchor chosen by `style.position`.
pub fn layout_text_block(block: &TextBlock, style: &TextStyle, pin_diameter_pt: f32) -> Vec<PlacedLine> {
    let fallback = style
        .default_size
        .filter(|size| *size > 0.0)
        .unwrap_or_else(|| auto_text_size(pin_diameter_pt));

    let sized: Vec<(&str, f32)> = block
        .lines
        .iter()
        .map(|line| (line.text.as_str(), line.size.unwrap_or(fallback)))
        .collect();

    let total_height: f32 = sized.iter().map(|(_, size)| size * LINE_HEIGHT_FACTOR).sum();
    let pin_radius = pin_diameter_pt / 2.0;

    let mut line_top = match style.position {
        TextPosition::Top => -TEXT_ANCHOR_FACTOR * pin_radius - total_height / 2.0,
        TextPosition::Center => -total_height / 2.0,
        TextPosition::Bottom => TEXT_ANCHOR_FACTOR * pin_radius - total_height / 2.0,
    };

    let mut placed = Vec::with_capacity(sized.len());
    for (text, size) in sized {
        let line_height = size * LINE_HEIGHT_FACTOR;
        let cap_height = size * HELVETICA_CAP_HEIGHT / 1000.0;

        placed.push(PlacedLine {
            text: text.to_string(),
            size,
            x_offset: -helvetica_text_width(text, size) / 2.0,
            baseline_offset: line_top + (line_height + cap_height) / 2.0,
        });

        line_top += line_height;
    }

    placed
}

/// Draw a text block centred on (`cx`, `cy`), where `cy` is in PDF user space.
///
/// An outline is a true stroke: a stroke pass at twice the outline width
/// followed by the fill pass on top, which leaves `outline_width` visible
/// outside the glyphs.
pub fn draw_text_block(
    ops: &mut Vec<Op>,
    block: &TextBlock,
    style: &TextStyle,
    pin_diameter_pt: f32,
    cx: f32,
    cy: f32,
) {
    if block.is_empty() {
        return;
    }

    let lines = layout_text_block(block, style, pin_diameter_pt);

    ops.push(Op::SaveGraphicsState);

    if let Some((outline_color, outline_width)) = style.outline() {
        ops.push(Op::SetOutlineColor {
            col: outline_color.to_pdf(),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(outline_width * 2.0),
        });
        for line in &lines {
            write_line(ops, line, cx, cy, TextRenderingMode::Stroke);
        }
    }

    ops.push(Op::SetFillColor {
        col: style.color.to_pdf(),
    });
    for line in &lines {
        write_line(ops, line, cx, cy, TextRenderingMode::Fill);
    }

    ops.push(Op::RestoreGraphicsState);
}

fn write_line(ops: &mut Vec<Op>, line: &PlacedLine, cx: f32, cy: f32, mode: TextRenderingMode) {
    if line.text.trim().is_empty() {
        return;
    }

    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextRenderingMode { mode });
    ops.push(Op::SetFontSizeBuiltinFont {
        font: BuiltinFont::Helvetica,
        size: Pt(line.size),
    });
    ops.push(Op::SetTextMatrix {
        matrix: TextMatrix::Translate(Pt(cx + line.x_offset), Pt(cy - line.baseline_offset)),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(line.text.clone())],
        font: BuiltinFont::Helvetica,
    });
    ops.push(Op::EndTextSection);
}
