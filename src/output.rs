use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::{IconRenderer, RenderMode};
use crate::config::IconConfig;
use crate::constants::output::{APPICONSET_DIR, FOREGROUND_DIR, FOREGROUND_FILE};
use crate::typeface::Typeface;

/// Asset directories of the jjstats app, relative to a project root
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputLayout { root: root.into() }
    }

    pub fn appiconset_dir(&self) -> PathBuf {
        self.root.join(APPICONSET_DIR)
    }

    pub fn foreground_dir(&self) -> PathBuf {
        self.root.join(FOREGROUND_DIR)
    }

    pub fn icon_path(&self, size: u32) -> PathBuf {
        self.appiconset_dir().join(icon_file_name(size))
    }

    pub fn foreground_path(&self) -> PathBuf {
        self.foreground_dir().join(FOREGROUND_FILE)
    }
}

pub fn icon_file_name(size: u32) -> String {
    format!("appicon_{}.png", size)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

/// Renders the full icon once and writes every configured size into the
/// asset catalog. Returns the written paths in size order.
pub fn generate_full(layout: &OutputLayout, config: &IconConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let dir = layout.appiconset_dir();
    ensure_dir(&dir)?;

    let typeface = Typeface::resolve(&config.font)?;
    log::info!("Using {:?}", typeface);

    println!("Creating icon with '{}' text...", config.text);
    let icon = IconRenderer::new(config, &typeface).render(config.canvas_size, RenderMode::Full)?;

    println!();
    println!("Generating PNG icons...");
    let mut written = Vec::with_capacity(config.output_sizes.len());
    for &size in &config.output_sizes {
        let path = layout.icon_path(size);
        crate::raster::save_png(&icon, &path, size)?;
        written.push(path);
    }

    println!();
    println!("All icons generated successfully!");
    Ok(written)
}

/// Renders the label alone on a transparent canvas for Icon Composer
pub fn generate_foreground(layout: &OutputLayout, config: &IconConfig) -> Result<PathBuf> {
    config.validate()?;
    let dir = layout.foreground_dir();
    ensure_dir(&dir)?;

    let typeface = Typeface::resolve(&config.font)?;
    log::info!("Using {:?}", typeface);

    println!("Creating foreground layer ('{}' text only) for Icon Composer...", config.text);
    let icon = IconRenderer::new(config, &typeface)
        .render(config.canvas_size, RenderMode::ForegroundOnly)?;

    let path = layout.foreground_path();
    crate::raster::save_png(&icon, &path, config.canvas_size)?;

    println!();
    println!("Foreground layer saved to: {}", path.display());
    Ok(path)
}
