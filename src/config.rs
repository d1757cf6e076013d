use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{background, geometry, output, text};

/// Where the glyphs for the label come from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontSource {
    /// First bold sans-serif face found in the usual system locations,
    /// falling back to the builtin glyphs when none is installed
    #[default]
    System,
    /// A specific TrueType/OpenType file
    File(PathBuf),
    /// Procedural vector glyphs, only covers 'j'
    Builtin,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IconConfig {
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    #[serde(default = "default_icon_scale")]
    pub icon_scale: f32,
    #[serde(default = "default_corner_ratio")]
    pub corner_ratio: f32,
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default)]
    pub font: FontSource,
    #[serde(default = "default_text_color")]
    pub text_color: [f32; 4],
    #[serde(default = "default_gradient_top")]
    pub gradient_top: [f32; 4],
    #[serde(default = "default_gradient_bottom")]
    pub gradient_bottom: [f32; 4],
    #[serde(default = "default_output_sizes")]
    pub output_sizes: Vec<u32>,
}

fn default_canvas_size() -> u32 {
    geometry::CANVAS_SIZE
}

fn default_icon_scale() -> f32 {
    geometry::ICON_SCALE
}

fn default_corner_ratio() -> f32 {
    geometry::CORNER_RATIO
}

fn default_text() -> String {
    text::LABEL.to_string()
}

fn default_font_scale() -> f32 {
    text::FONT_SCALE
}

fn default_text_color() -> [f32; 4] {
    text::COLOR
}

fn default_gradient_top() -> [f32; 4] {
    background::GRADIENT_TOP
}

fn default_gradient_bottom() -> [f32; 4] {
    background::GRADIENT_BOTTOM
}

fn default_output_sizes() -> Vec<u32> {
    output::ICON_SIZES.to_vec()
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            canvas_size: default_canvas_size(),
            icon_scale: default_icon_scale(),
            corner_ratio: default_corner_ratio(),
            text: default_text(),
            font_scale: default_font_scale(),
            font: FontSource::default(),
            text_color: default_text_color(),
            gradient_top: default_gradient_top(),
            gradient_bottom: default_gradient_bottom(),
            output_sizes: default_output_sizes(),
        }
    }
}

impl IconConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: IconConfig = serde_yaml::from_str(contents)
            .context("Failed to parse icon config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read icon config {}", path.display()))?;
        Self::from_yaml_str(&contents)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 {
            bail!("canvas_size must be greater than 0");
        }

        if !(self.icon_scale > 0.0 && self.icon_scale <= 1.0) {
            bail!("icon_scale must be in (0.0, 1.0]");
        }

        // Anything above 0.5 is clipped by the squircle builder anyway
        if !(0.0..=0.5).contains(&self.corner_ratio) {
            bail!("corner_ratio must be in [0.0, 0.5]");
        }

        if self.font_scale <= 0.0 || !self.font_scale.is_finite() {
            bail!("font_scale must be greater than 0");
        }

        if self.text.trim().is_empty() {
            bail!("text cannot be empty");
        }

        if self.font == FontSource::Builtin && self.text.chars().any(|c| c != 'j') {
            bail!("builtin glyphs only cover 'j', got {:?}", self.text);
        }

        for (name, color) in [
            ("text_color", &self.text_color),
            ("gradient_top", &self.gradient_top),
            ("gradient_bottom", &self.gradient_bottom),
        ] {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                bail!("{} components must be in [0.0, 1.0]", name);
            }
        }

        if self.output_sizes.is_empty() {
            bail!("output_sizes cannot be empty");
        }
        if self.output_sizes.contains(&0) {
            bail!("output_sizes must all be greater than 0");
        }

        Ok(())
    }
}
