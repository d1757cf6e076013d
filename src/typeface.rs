//! Glyph sources for the icon label
//!
//! Text is rasterized into a standalone coverage buffer first, and the
//! visible ink is measured from that buffer. Font metrics (ascent, advance,
//! even per-glyph outline boxes from some APIs) do not account for the dots
//! of a "j", so centering on them puts the label visibly off-center.

use anyhow::{Context, Result, bail};
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tiny_skia::{FillRule, Mask, PathBuilder, Rect, Transform};

use crate::config::FontSource;
use crate::constants::fonts::SYSTEM_BOLD_CANDIDATES;
use crate::constants::text::INK_THRESHOLD;

/// Tight box around coverage above [`INK_THRESHOLD`], in mask pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InkBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl InkBounds {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 8-bit coverage of rasterized text plus its measured ink box
#[derive(Debug, Clone)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
    pub ink: InkBounds,
}

impl GlyphMask {
    /// A buffer shorter than `width * height` is treated as having no ink
    pub fn from_coverage(width: u32, height: u32, coverage: Vec<u8>) -> Self {
        let ink = measure_ink(width, height, &coverage, INK_THRESHOLD);
        GlyphMask { width, height, coverage, ink }
    }

    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage.get((y * self.width + x) as usize).copied().unwrap_or(0)
    }
}

/// Scans `coverage` for the rows and columns holding values above `threshold`
pub fn measure_ink(width: u32, height: u32, coverage: &[u8], threshold: u8) -> InkBounds {
    if coverage.len() < width as usize * height as usize {
        log::warn!("Coverage holds {} bytes, expected {}x{}", coverage.len(), width, height);
        return InkBounds::default();
    }

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;

    for y in 0..height {
        let row = &coverage[(y * width) as usize..((y + 1) * width) as usize];
        for (x, &value) in row.iter().enumerate() {
            if value > threshold {
                let x = x as u32;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    if min_x == u32::MAX {
        return InkBounds::default();
    }

    InkBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    }
}

pub enum Typeface {
    Font { font: fontdue::Font, path: PathBuf },
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::Font { path, .. } => write!(f, "Typeface::Font({})", path.display()),
            Typeface::Builtin => write!(f, "Typeface::Builtin"),
        }
    }
}

impl Typeface {
    pub fn resolve(source: &FontSource) -> Result<Self> {
        match source {
            FontSource::File(path) => Self::load(path),
            FontSource::Builtin => Ok(Typeface::Builtin),
            FontSource::System => {
                for candidate in SYSTEM_BOLD_CANDIDATES {
                    let path = Path::new(candidate.path);
                    if !path.exists() {
                        continue;
                    }
                    match Self::load_face(path, candidate.collection_index) {
                        Ok(typeface) => return Ok(typeface),
                        Err(e) => log::warn!("Skipping font {}: {:#}", path.display(), e),
                    }
                }
                log::warn!("No bold system font found, using builtin glyphs");
                Ok(Typeface::Builtin)
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::load_face(path, 0)
    }

    /// Loads face `collection_index` of a font file (0 for plain .ttf/.otf)
    pub fn load_face(path: &Path, collection_index: u32) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        let settings = fontdue::FontSettings {
            collection_index,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings)
            .map_err(|e| anyhow::anyhow!("Failed to parse font {}: {}", path.display(), e))?;
        log::debug!("Loaded font {} (face {})", path.display(), collection_index);
        Ok(Typeface::Font { font, path: path.to_path_buf() })
    }

    /// Rasterizes `text` at `px` pixels per em into a coverage mask
    pub fn rasterize(&self, text: &str, px: f32) -> Result<GlyphMask> {
        if !(px > 0.0 && px.is_finite()) {
            bail!("font size must be positive, got {}", px);
        }
        match self {
            Typeface::Font { font, .. } => Ok(rasterize_font(font, text, px)),
            Typeface::Builtin => rasterize_builtin(text, px),
        }
    }
}

fn rasterize_font(font: &fontdue::Font, text: &str, px: f32) -> GlyphMask {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px, 0));

    let glyphs: Vec<_> = layout
        .glyphs()
        .iter()
        .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
        .map(|g| (g.key, g.x.round() as i32, g.y.round() as i32))
        .collect();

    if glyphs.is_empty() {
        return GlyphMask::from_coverage(0, 0, Vec::new());
    }

    // Left side bearings can be negative ('j' often is), so the buffer origin
    // is the union of all glyph boxes rather than the layout origin.
    let mut bitmaps = Vec::with_capacity(glyphs.len());
    let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
    let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);
    for (key, x, y) in glyphs {
        let (metrics, bitmap) = font.rasterize_config(key);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x + metrics.width as i32);
        max_y = max_y.max(y + metrics.height as i32);
        bitmaps.push((x, y, metrics.width, bitmap));
    }

    let width = (max_x - min_x) as u32;
    let height = (max_y - min_y) as u32;
    let mut coverage = vec![0u8; (width * height) as usize];

    for (x, y, glyph_width, bitmap) in bitmaps {
        let ox = (x - min_x) as usize;
        let oy = (y - min_y) as usize;
        for (row, line) in bitmap.chunks(glyph_width.max(1)).enumerate() {
            let start = (oy + row) * width as usize + ox;
            for (dst, &src) in coverage[start..start + line.len()].iter_mut().zip(line) {
                *dst = (*dst).max(src);
            }
        }
    }

    GlyphMask::from_coverage(width, height, coverage)
}

/// Proportions of the builtin bold 'j', in ems
mod builtin {
    pub const X_HEIGHT: f32 = 0.53;
    pub const STEM: f32 = 0.17;
    /// Where the stem starts bending into the hook, below the baseline
    pub const BEND: f32 = 0.02;
    pub const DESCENT: f32 = 0.21;
    pub const HOOK: f32 = 0.16;
    pub const HOOK_THICKNESS: f32 = 0.13;
    pub const DOT_RADIUS: f32 = 0.095;
    pub const DOT_GAP: f32 = 0.07;
    pub const SPACING: f32 = 0.06;
}

fn builtin_path(text: &str, px: f32) -> Option<tiny_skia::Path> {
    use builtin::*;

    let mut pb = PathBuilder::new();
    let advance = HOOK + STEM + SPACING;

    for (i, _) in text.chars().enumerate() {
        let left = (HOOK + i as f32 * advance) * px;
        let right = left + STEM * px;
        let top = -X_HEIGHT * px;
        let bend = BEND * px;
        let bottom = DESCENT * px;
        let hook_end = left - HOOK * px;

        // stem and descender hook
        pb.move_to(left, top);
        pb.line_to(right, top);
        pb.line_to(right, bend);
        pb.quad_to(right, bottom, hook_end, bottom);
        pb.line_to(hook_end, bottom - HOOK_THICKNESS * px);
        pb.quad_to(left, bottom - HOOK_THICKNESS * px, left, bend);
        pb.close();

        // dot
        let cx = left + STEM * px / 2.0;
        let cy = top - (DOT_GAP + DOT_RADIUS) * px;
        pb.push_circle(cx, cy, DOT_RADIUS * px);
    }

    pb.finish()
}

fn rasterize_builtin(text: &str, px: f32) -> Result<GlyphMask> {
    if let Some(c) = text.chars().find(|&c| c != 'j') {
        bail!("builtin glyphs cannot draw {:?}", c);
    }

    let Some(path) = builtin_path(text, px) else {
        return Ok(GlyphMask::from_coverage(0, 0, Vec::new()));
    };

    // One pixel of padding keeps anti-aliased edges inside the mask
    let bounds: Rect = path.bounds();
    let width = bounds.width().ceil() as u32 + 2;
    let height = bounds.height().ceil() as u32 + 2;
    let mut mask = Mask::new(width, height)
        .with_context(|| format!("Failed to allocate {}x{} glyph mask", width, height))?;
    let transform = Transform::from_translate(1.0 - bounds.left(), 1.0 - bounds.top());
    mask.fill_path(&path, FillRule::Winding, true, transform);

    Ok(GlyphMask::from_coverage(width, height, mask.data().to_vec()))
}
