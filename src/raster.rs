use anyhow::{Context, Result};
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::fs;
use std::path::Path;

use crate::canvas::RenderedIcon;

/// Resamples the canvas to `size` x `size` straight-alpha RGBA
///
/// Filtering runs on the premultiplied pixels so that transparent
/// surroundings don't bleed dark fringes into the squircle's edge.
pub fn resample(icon: &RenderedIcon, size: u32) -> Result<RgbaImage> {
    let native = icon.size();
    let premultiplied = RgbaImage::from_raw(native, native, icon.pixmap.data().to_vec())
        .context("Canvas buffer does not match its dimensions")?;

    let mut scaled = if size == native {
        premultiplied
    } else {
        imageops::resize(&premultiplied, size, size, FilterType::Lanczos3)
    };

    for pixel in scaled.pixels_mut() {
        *pixel = demultiply(*pixel);
    }
    Ok(scaled)
}

fn demultiply(pixel: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    // Lanczos ringing can push a channel past its alpha
    let unscale = |c: u8| ((c.min(a) as u32 * 255 + a as u32 / 2) / a as u32) as u8;
    Rgba([unscale(r), unscale(g), unscale(b), a])
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}

/// Writes the canvas as a `size` x `size` PNG, replacing any existing file
pub fn save_png(icon: &RenderedIcon, path: &Path, size: u32) -> Result<()> {
    let image = resample(icon, size)?;
    let bytes = encode_png(&image)?;
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    println!("  Created: {} ({}x{})", name, size, size);
    Ok(())
}
