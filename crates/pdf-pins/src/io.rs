use crate::transform::PinImage;
use crate::types::{PinError, Result, TextBlock, TextLine};
use std::path::Path;

/// Decode one image file
pub async fn load_image(path: impl AsRef<Path>) -> Result<PinImage> {
    let path = path.as_ref().to_owned();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = tokio::fs::read(&path).await?;

    let image = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|image| PinImage::new(name.clone(), image))
            .map_err(|source| PinError::Image { name, source })
    })
    .await??;

    log::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.image.width(),
        image.image.height()
    );
    Ok(image)
}

/// Decode several image files, keeping their order
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<PinImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_image(path).await?);
    }
    Ok(images)
}

/// Read text blocks from a CSV file: one record per pin, one field per line.
/// Empty fields are skipped and records with no text are dropped.
pub async fn load_text_blocks_from_csv(path: impl AsRef<Path>) -> Result<Vec<TextBlock>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let blocks = tokio::task::spawn_blocking(move || {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(contents.as_bytes());
        let mut blocks = Vec::new();

        for result in reader.records() {
            let record = result?;
            let lines: Vec<TextLine> = record
                .iter()
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(TextLine::new)
                .collect();
            if !lines.is_empty() {
                blocks.push(TextBlock::new(lines));
            }
        }
        Ok::<_, PinError>(blocks)
    })
    .await??;

    log::debug!("Loaded {} text blocks from {}", blocks.len(), path.display());
    Ok(blocks)
}

/// Write finished document bytes to `path`
pub async fn save_pdf(bytes: Vec<u8>, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
