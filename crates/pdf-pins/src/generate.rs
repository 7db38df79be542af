//! Document assembly
//!
//! Layout and distribution are computed once. Rasters are then prepared in
//! parallel, one per distinct (image, framing, edge colour) combination, and
//! embedded once each. Drawing runs in slot order on the calling thread,
//! starting a new page whenever the slot's page index changes.

use crate::constants::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM, pt_to_px};
use crate::distribute::{assign_slots, slot_count};
use crate::layout::calculate_layout_on;
use crate::options::PinOptions;
use crate::render::{SlotDrawing, SlotImage, draw_slot};
use crate::transform::{Framing, PinImage, PreparedImage, prepare};
use crate::types::{PageGeometry, ResolvedStyle, Result};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, RawImage, RawImageData, RawImageFormat};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Identity of one prepared raster. Slots sharing a key share the embedded
/// image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RasterKey {
    image: usize,
    zoom: u32,
    offset_x: u32,
    offset_y: u32,
    edge_color: bool,
}

impl RasterKey {
    fn new(image: usize, style: &ResolvedStyle) -> Self {
        Self {
            image,
            zoom: style.zoom.to_bits(),
            offset_x: style.offset_x_pt.to_bits(),
            offset_y: style.offset_y_pt.to_bits(),
            edge_color: style.fill_with_edge_color && style.background_color.is_none(),
        }
    }

    fn framing(&self, dpi: f32) -> Framing {
        Framing::new(
            f32::from_bits(self.zoom),
            pt_to_px(f32::from_bits(self.offset_x), dpi),
            pt_to_px(f32::from_bits(self.offset_y), dpi),
        )
    }
}

/// Generate the sheet and write it to `output_path`
pub async fn generate_pdf(
    images: Vec<PinImage>,
    options: &PinOptions,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let output_path = output_path.as_ref().to_owned();
    let bytes = generate(images, options).await?;
    tokio::fs::write(&output_path, bytes).await?;
    log::info!("Wrote {}", output_path.display());
    Ok(())
}

/// Generate the sheet off the async runtime
pub async fn generate(images: Vec<PinImage>, options: &PinOptions) -> Result<Vec<u8>> {
    let options = options.clone();
    tokio::task::spawn_blocking(move || generate_pdf_bytes(&images, &options)).await?
}

/// Generate the sheet and return the PDF bytes.
///
/// Fails without producing output if the options are invalid or any image
/// cannot be prepared.
pub fn generate_pdf_bytes(images: &[PinImage], options: &PinOptions) -> Result<Vec<u8>> {
    options.validate()?;

    let profile = options.profile();
    let page = PageGeometry::a4();

    let total_slots = slot_count(
        images.len(),
        options.text_blocks.len(),
        profile.circles_per_page,
        options.duplicate,
    );
    let assignment = assign_slots(
        images.len(),
        options.text_blocks.len(),
        total_slots,
        options.duplicate,
    );
    let positions = calculate_layout_on(&page, total_slots, &profile);
    let styles: Vec<ResolvedStyle> = (0..total_slots).map(|slot| options.style_for(slot)).collect();

    let slot_keys: Vec<Option<RasterKey>> = (0..total_slots)
        .map(|slot| {
            assignment
                .image_for(slot)
                .map(|image| RasterKey::new(image, &styles[slot]))
        })
        .collect();

    let mut seen = HashSet::new();
    let unique_keys: Vec<RasterKey> = slot_keys
        .iter()
        .flatten()
        .copied()
        .filter(|key| seen.insert(*key))
        .collect();

    log::info!(
        "Generating {} slots ({}) from {} images, {} distinct rasters",
        total_slots,
        options.size.name(),
        images.len(),
        unique_keys.len()
    );

    let dpi = options.raster_dpi;
    let pin_px = pt_to_px(profile.pin_diameter_pt, dpi);
    let circle_px = pt_to_px(profile.circle_diameter_pt, dpi);

    let prepared: Vec<PreparedImage> = unique_keys
        .par_iter()
        .map(|key| {
            prepare(
                &images[key.image],
                pin_px,
                circle_px,
                &key.framing(dpi),
                key.edge_color,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let mut doc = PdfDocument::new(&options.title);

    let mut embedded: HashMap<RasterKey, SlotImage> = HashMap::with_capacity(unique_keys.len());
    for (key, image) in unique_keys.iter().zip(prepared) {
        embedded.insert(*key, embed_raster(&mut doc, image));
    }

    let text_style = options.text_style();
    let mut pages = Vec::new();
    let mut ops = Vec::new();
    let mut current_page = 0;

    for (slot, position) in positions.iter().enumerate() {
        if position.page != current_page {
            pages.push(PdfPage::new(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                std::mem::take(&mut ops),
            ));
            current_page = position.page;
        }

        let drawing = SlotDrawing {
            position,
            profile: &profile,
            style: &styles[slot],
            image: slot_keys[slot].as_ref().and_then(|key| embedded.get(key)),
            text: assignment
                .text_for(slot)
                .and_then(|index| options.text_blocks.get(index)),
        };
        draw_slot(&mut ops, &drawing, &text_style, page.page_height_pt);
    }

    if !positions.is_empty() {
        pages.push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));
    }

    let page_count = pages.len();
    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    if !warnings.is_empty() {
        log::debug!("PDF writer reported {} warnings", warnings.len());
    }
    log::info!("Generated {} pages, {} bytes", page_count, bytes.len());

    Ok(bytes)
}

fn embed_raster(doc: &mut PdfDocument, image: PreparedImage) -> SlotImage {
    let (width, height) = image.raster.dimensions();
    let raw = RawImage {
        pixels: RawImageData::U8(image.raster.into_raw()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGBA8,
        tag: Vec::new(),
    };

    SlotImage {
        xobject: doc.add_image(&raw),
        pixel_size: width,
        edge_color: image.edge_color,
    }
}
