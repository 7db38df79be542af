use crate::constants::{DEFAULT_RASTER_DPI, MAX_RASTER_DPI, MAX_ZOOM};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete configuration of one pin sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinOptions {
    /// Document title stored in the PDF metadata
    pub title: String,

    // Profile
    pub size: PinSize,
    pub duplicate: bool,

    // Background and border
    pub fill_with_edge_color: bool,
    pub background_color: Option<RgbColor>,
    pub border_color: Option<RgbColor>,
    pub border_width_mm: f32,

    // Text
    pub text_blocks: Vec<TextBlock>,
    pub text_position: TextPosition,
    pub text_color: RgbColor,
    pub default_text_size: Option<f32>,
    pub text_outline_color: Option<RgbColor>,
    pub text_outline_width_pt: f32,

    // Per-slot overrides, indexed by slot
    pub slot_styles: Vec<SlotStyle>,

    /// Resolution images are rasterized at before embedding
    pub raster_dpi: f32,
}

impl Default for PinOptions {
    fn default() -> Self {
        Self {
            title: "Pins".to_string(),
            size: PinSize::Small,
            duplicate: false,
            fill_with_edge_color: false,
            background_color: None,
            border_color: None,
            border_width_mm: 0.0,
            text_blocks: Vec::new(),
            text_position: TextPosition::Center,
            text_color: RgbColor::BLACK,
            default_text_size: None,
            text_outline_color: None,
            text_outline_width_pt: 0.0,
            slot_styles: Vec::new(),
            raster_dpi: DEFAULT_RASTER_DPI,
        }
    }
}

impl PinOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PinError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PinError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn profile(&self) -> PinProfile {
        self.size.profile()
    }

    /// Build per-slot framing overrides from parallel arrays. Missing entries
    /// keep the default zoom of 1 and no offset.
    pub fn with_framing(mut self, zooms: &[f32], offsets_x: &[f32], offsets_y: &[f32]) -> Self {
        let count = zooms.len().max(offsets_x.len()).max(offsets_y.len());
        if self.slot_styles.len() < count {
            self.slot_styles.resize(count, SlotStyle::default());
        }

        for (slot, style) in self.slot_styles.iter_mut().enumerate().take(count) {
            if let Some(&zoom) = zooms.get(slot) {
                style.zoom = Some(zoom);
            }
            if let Some(&x) = offsets_x.get(slot) {
                style.offset_x = Some(x);
            }
            if let Some(&y) = offsets_y.get(slot) {
                style.offset_y = Some(y);
            }
        }
        self
    }

    /// Merge the override for `slot` with the document-wide settings
    pub fn style_for(&self, slot: usize) -> ResolvedStyle {
        let o = self.slot_styles.get(slot).copied().unwrap_or_default();
        ResolvedStyle {
            zoom: o.zoom.unwrap_or(1.0),
            offset_x_pt: o.offset_x.unwrap_or(0.0),
            offset_y_pt: o.offset_y.unwrap_or(0.0),
            fill_with_edge_color: o.fill_with_edge_color.unwrap_or(self.fill_with_edge_color),
            background_color: o.background_color.or(self.background_color),
            border_color: o.border_color.or(self.border_color),
            border_width_mm: o.border_width_mm.unwrap_or(self.border_width_mm),
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            position: self.text_position,
            color: self.text_color,
            default_size: self.default_text_size,
            outline_color: self.text_outline_color,
            outline_width_pt: self.text_outline_width_pt,
        }
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let dpi = self.raster_dpi;
        if !(dpi.is_finite() && dpi > 0.0 && dpi <= MAX_RASTER_DPI) {
            return Err(PinError::Config(format!(
                "Raster DPI must be greater than 0 and at most {}, got {}",
                MAX_RASTER_DPI, dpi
            )));
        }

        check_width("Border width", self.border_width_mm)?;
        check_width("Text outline width", self.text_outline_width_pt)?;

        if let Some(size) = self.default_text_size {
            check_font_size(size)?;
        }

        for (index, block) in self.text_blocks.iter().enumerate() {
            for line in &block.lines {
                if let Some(size) = line.size {
                    check_font_size(size).map_err(|e| {
                        PinError::Config(format!("Text block {}: {}", index + 1, config_message(e)))
                    })?;
                }
            }
        }

        for (slot, style) in self.slot_styles.iter().enumerate() {
            match style.zoom {
                Some(zoom) if !(zoom.is_finite() && zoom > 0.0 && zoom <= MAX_ZOOM) => {
                    return Err(PinError::Config(format!(
                        "Slot {}: zoom must be greater than 0 and at most {}, got {}",
                        slot + 1,
                        MAX_ZOOM,
                        zoom
                    )));
                }
                _ => {}
            }
            for offset in [style.offset_x, style.offset_y].into_iter().flatten() {
                if !offset.is_finite() {
                    return Err(PinError::Config(format!(
                        "Slot {}: offset must be a finite number",
                        slot + 1
                    )));
                }
            }
            if let Some(width) = style.border_width_mm {
                check_width("Border width", width).map_err(|e| {
                    PinError::Config(format!("Slot {}: {}", slot + 1, config_message(e)))
                })?;
            }
        }

        Ok(())
    }
}

fn check_width(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PinError::Config(format!(
            "{what} cannot be negative, got {value}"
        )))
    }
}

fn check_font_size(size: f32) -> Result<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(PinError::Config(format!("Font size must be positive, got {size}")))
    }
}

fn config_message(error: PinError) -> String {
    match error {
        PinError::Config(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = PinOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.size, PinSize::Small);
        assert_eq!(options.text_color, RgbColor::BLACK);
    }

    #[test]
    fn test_style_for_merges_overrides() {
        let options = PinOptions {
            border_color: Some(RgbColor::BLACK),
            border_width_mm: 1.0,
            slot_styles: vec![
                SlotStyle::default(),
                SlotStyle {
                    zoom: Some(1.5),
                    border_width_mm: Some(0.0),
                    background_color: Some(RgbColor::WHITE),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let first = options.style_for(0);
        assert_eq!(first.zoom, 1.0);
        assert!(first.border().is_some());

        let second = options.style_for(1);
        assert_eq!(second.zoom, 1.5);
        assert_eq!(second.background_color, Some(RgbColor::WHITE));
        assert!(second.border().is_none());

        // Slots past the override list use the globals
        assert_eq!(options.style_for(99).border_width_mm, 1.0);
    }

    #[test]
    fn test_with_framing_fills_parallel_arrays() {
        let options = PinOptions::default().with_framing(&[2.0], &[5.0, -5.0], &[]);
        assert_eq!(options.slot_styles.len(), 2);
        assert_eq!(options.style_for(0).zoom, 2.0);
        assert_eq!(options.style_for(0).offset_x_pt, 5.0);
        assert_eq!(options.style_for(1).zoom, 1.0);
        assert_eq!(options.style_for(1).offset_x_pt, -5.0);
        assert_eq!(options.style_for(1).offset_y_pt, 0.0);
    }

    #[test]
    fn test_zoom_and_dpi_upper_bounds() {
        let options = PinOptions::default().with_framing(&[1.0, 1000.0], &[], &[]);
        assert!(matches!(options.validate(), Err(PinError::Config(_))));

        let options = PinOptions::default().with_framing(&[MAX_ZOOM], &[], &[]);
        assert!(options.validate().is_ok());

        let options = PinOptions {
            raster_dpi: 100_000.0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(PinError::Config(_))));
    }
}
