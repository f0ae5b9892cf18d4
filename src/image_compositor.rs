use anyhow::{anyhow, Context, Result};
use image::imageops::FilterType;
use image::{imageops, DynamicImage, Rgb, RgbImage};
use log::{debug, info};
use std::path::Path;

// @module: Background image compositing

/// Scale an image so it fully covers the target canvas and crop the overflow.
///
/// The scale factor is the larger of the width and height ratios, so the
/// resized image covers the whole canvas without distortion; whatever hangs
/// over on one axis is cropped by the centered paste. The canvas starts out
/// black, so a degenerate source still produces a frame of exactly the
/// target size.
pub fn cover_resize(image: &DynamicImage, target_size: (u32, u32)) -> Result<RgbImage> {
    let (target_width, target_height) = target_size;
    if target_width == 0 || target_height == 0 {
        return Err(anyhow!(
            "Invalid target resolution: {}x{}",
            target_width,
            target_height
        ));
    }

    let source = image.to_rgb8();
    let (original_width, original_height) = source.dimensions();
    if original_width == 0 || original_height == 0 {
        return Err(anyhow!("Source image has zero dimensions"));
    }

    let width_ratio = f64::from(target_width) / f64::from(original_width);
    let height_ratio = f64::from(target_height) / f64::from(original_height);
    let scale_factor = width_ratio.max(height_ratio);

    let new_width = ((f64::from(original_width) * scale_factor).round() as u32).max(1);
    let new_height = ((f64::from(original_height) * scale_factor).round() as u32).max(1);

    debug!(
        "Cover resize {}x{} -> {}x{} (canvas {}x{})",
        original_width, original_height, new_width, new_height, target_width, target_height
    );

    let resized = imageops::resize(&source, new_width, new_height, FilterType::Lanczos3);

    let mut canvas = RgbImage::from_pixel(target_width, target_height, Rgb([0, 0, 0]));
    let x = (i64::from(target_width) - i64::from(new_width)) / 2;
    let y = (i64::from(target_height) - i64::from(new_height)) / 2;
    imageops::overlay(&mut canvas, &resized, x, y);

    Ok(canvas)
}

/// Load a background image, cover-resize it, and write the result as PNG
pub fn prepare_background<P1: AsRef<Path>, P2: AsRef<Path>>(
    source_path: P1,
    target_size: (u32, u32),
    output_path: P2,
) -> Result<()> {
    let source_path = source_path.as_ref();
    let output_path = output_path.as_ref();

    let original = image::open(source_path)
        .with_context(|| format!("Failed to open background image: {:?}", source_path))?;

    let composited = cover_resize(&original, target_size)?;

    composited
        .save(output_path)
        .with_context(|| format!("Failed to save composited background: {:?}", output_path))?;

    info!("Background prepared: {:?}", output_path);

    Ok(())
}
