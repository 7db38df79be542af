use crate::constants::{
    LARGE_CIRCLE_DIAMETER_MM, LARGE_CIRCLES_PER_PAGE, LARGE_PIN_DIAMETER_MM, PAGE_HEIGHT_MM,
    PAGE_MARGIN_MM, PAGE_SPACING_MM, PAGE_WIDTH_MM, SMALL_CIRCLE_DIAMETER_MM,
    SMALL_CIRCLES_PER_PAGE, SMALL_PIN_DIAMETER_MM, mm_to_pt,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to decode image {name}: {source}")]
    Image {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid image {name}: {reason}")]
    InvalidImage { name: String, reason: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PinError>;

/// Supported button sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinSize {
    /// 32 mm buttons
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "32mm"))]
    Small,
    /// 58 mm buttons
    #[cfg_attr(feature = "serde", serde(rename = "58mm"))]
    Large,
}

impl PinSize {
    pub const ALL: [PinSize; 2] = [PinSize::Small, PinSize::Large];

    pub fn name(self) -> &'static str {
        match self {
            PinSize::Small => "32mm",
            PinSize::Large => "58mm",
        }
    }

    pub fn profile(self) -> PinProfile {
        match self {
            PinSize::Small => PinProfile {
                pin_diameter_pt: mm_to_pt(SMALL_PIN_DIAMETER_MM),
                circle_diameter_pt: mm_to_pt(SMALL_CIRCLE_DIAMETER_MM),
                circles_per_page: SMALL_CIRCLES_PER_PAGE,
            },
            PinSize::Large => PinProfile {
                pin_diameter_pt: mm_to_pt(LARGE_PIN_DIAMETER_MM),
                circle_diameter_pt: mm_to_pt(LARGE_CIRCLE_DIAMETER_MM),
                circles_per_page: LARGE_CIRCLES_PER_PAGE,
            },
        }
    }
}

impl std::str::FromStr for PinSize {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "32mm" | "32" | "small" => Ok(PinSize::Small),
            "58mm" | "58" | "large" => Ok(PinSize::Large),
            other => Err(PinError::Config(format!("Unknown pin size: {other}"))),
        }
    }
}

/// Geometry of one button size.
///
/// The cutting circle always encloses the pin disc; the ring between them is
/// the paper that wraps around the shell when pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinProfile {
    /// Diameter of the visible image disc in points
    pub pin_diameter_pt: f32,
    /// Diameter of the cut line in points
    pub circle_diameter_pt: f32,
    /// Fixed number of circles placed on each full page
    pub circles_per_page: usize,
}

impl PinProfile {
    pub fn pin_radius_pt(&self) -> f32 {
        self.pin_diameter_pt / 2.0
    }

    pub fn circle_radius_pt(&self) -> f32 {
        self.circle_diameter_pt / 2.0
    }
}

/// Page geometry shared by every profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub spacing_pt: f32,
}

impl PageGeometry {
    /// A4 portrait with a 10 mm margin and 3 mm between circles
    pub fn a4() -> Self {
        Self {
            page_width_pt: mm_to_pt(PAGE_WIDTH_MM),
            page_height_pt: mm_to_pt(PAGE_HEIGHT_MM),
            margin_pt: mm_to_pt(PAGE_MARGIN_MM),
            spacing_pt: mm_to_pt(PAGE_SPACING_MM),
        }
    }

    pub fn available_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }

    pub fn available_height_pt(&self) -> f32 {
        self.page_height_pt - 2.0 * self.margin_pt
    }
}

/// 8-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 0.0..=1.0
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// Average colour sampled from the border of a prepared raster
pub type EdgeColor = RgbColor;

/// Vertical anchor for text overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextPosition {
    Top,
    #[default]
    Center,
    Bottom,
}

impl TextPosition {
    pub fn name(self) -> &'static str {
        match self {
            TextPosition::Top => "top",
            TextPosition::Center => "center",
            TextPosition::Bottom => "bottom",
        }
    }
}

impl std::str::FromStr for TextPosition {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(TextPosition::Top),
            "center" | "centre" | "middle" => Ok(TextPosition::Center),
            "bottom" => Ok(TextPosition::Bottom),
            other => Err(PinError::Config(format!("Invalid text position: {other}"))),
        }
    }
}

/// One line of overlay text
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextLine {
    pub text: String,
    /// Font size in points; resolved against the default when unset
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: Option<f32>,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: None,
        }
    }

    pub fn with_size(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size: Some(size),
        }
    }
}

/// The text printed on one pin, top to bottom
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    /// Split on `|` into one line per segment
    pub fn from_delimited(text: &str) -> Self {
        Self {
            lines: text
                .split('|')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(TextLine::new)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.text.trim().is_empty())
    }
}

/// Per-slot override of the global styling. Unset fields fall back to the
/// document-wide option.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlotStyle {
    pub zoom: Option<f32>,
    /// Horizontal pan in points, positive moves the image right
    pub offset_x: Option<f32>,
    /// Vertical pan in points, positive moves the image down
    pub offset_y: Option<f32>,
    pub fill_with_edge_color: Option<bool>,
    pub background_color: Option<RgbColor>,
    pub border_color: Option<RgbColor>,
    pub border_width_mm: Option<f32>,
}

/// Styling of one slot after merging overrides with defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub zoom: f32,
    pub offset_x_pt: f32,
    pub offset_y_pt: f32,
    pub fill_with_edge_color: bool,
    pub background_color: Option<RgbColor>,
    pub border_color: Option<RgbColor>,
    pub border_width_mm: f32,
}

impl ResolvedStyle {
    /// Border colour and width in points, if a ring should be drawn
    pub fn border(&self) -> Option<(RgbColor, f32)> {
        match self.border_color {
            Some(color) if self.border_width_mm > 0.0 => Some((color, mm_to_pt(self.border_width_mm))),
            _ => None,
        }
    }
}

/// Text styling shared by every slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub position: TextPosition,
    pub color: RgbColor,
    pub default_size: Option<f32>,
    pub outline_color: Option<RgbColor>,
    pub outline_width_pt: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            position: TextPosition::Center,
            color: RgbColor::BLACK,
            default_size: None,
            outline_color: None,
            outline_width_pt: 0.0,
        }
    }
}

impl TextStyle {
    pub fn outline(&self) -> Option<(RgbColor, f32)> {
        match self.outline_color {
            Some(color) if self.outline_width_pt > 0.0 => Some((color, self.outline_width_pt)),
            _ => None,
        }
    }
}

/// Statistics about a pin sheet before it is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    pub pin_size: PinSize,
    pub circles_per_page: usize,
    pub total_slots: usize,
    pub pages: usize,
    pub circles_on_last_page: usize,
    /// Distinct source images that appear on at least one slot
    pub images_used: usize,
    /// Distinct text blocks that appear on at least one slot
    pub text_blocks_used: usize,
    /// Slots rendered without an image
    pub blank_slots: usize,
}
