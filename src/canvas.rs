use anyhow::{Context, Result};
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Mask, Paint, Pixmap, Point, Rect, SpreadMode,
    Transform,
};

use crate::config::IconConfig;
use crate::squircle::Squircle;
use crate::typeface::{GlyphMask, InkBounds, Typeface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Squircle background plus label
    Full,
    /// Label only, on a transparent canvas (Icon Composer foreground layer)
    ForegroundOnly,
}

/// Placement of the icon body inside the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconLayout {
    pub canvas_size: u32,
    pub icon_size: f32,
    pub margin: f32,
    pub font_size: f32,
}

impl IconLayout {
    pub fn compute(canvas_size: u32, config: &IconConfig) -> Self {
        let size = canvas_size as f32;
        let icon_size = size * config.icon_scale;
        IconLayout {
            canvas_size,
            icon_size,
            margin: (size - icon_size) / 2.0,
            font_size: icon_size * config.font_scale,
        }
    }
}

/// A drawn canvas and where the label ended up on it
pub struct RenderedIcon {
    pub pixmap: Pixmap,
    pub layout: IconLayout,
    /// Canvas position of the glyph mask's top-left corner
    pub glyph_origin: (i32, i32),
    /// Measured ink box of the label, in canvas pixels
    pub ink_rect: InkBounds,
}

impl RenderedIcon {
    pub fn size(&self) -> u32 {
        self.layout.canvas_size
    }
}

pub struct IconRenderer<'a> {
    config: &'a IconConfig,
    typeface: &'a Typeface,
}

impl<'a> IconRenderer<'a> {
    pub fn new(config: &'a IconConfig, typeface: &'a Typeface) -> Self {
        IconRenderer { config, typeface }
    }

    pub fn render(&self, size: u32, mode: RenderMode) -> Result<RenderedIcon> {
        let layout = IconLayout::compute(size, self.config);
        log::debug!(
            "Canvas {}px, icon {:.1}px, margin {:.1}px, font {:.1}px, mode {:?}",
            size, layout.icon_size, layout.margin, layout.font_size, mode
        );

        let mut pixmap = Pixmap::new(size, size)
            .with_context(|| format!("Failed to allocate {}x{} canvas", size, size))?;

        if mode == RenderMode::Full {
            self.draw_background(&mut pixmap, &layout)?;
        }

        let glyphs = self.typeface.rasterize(&self.config.text, layout.font_size)?;
        let glyph_origin = center_ink(&glyphs, &layout);
        self.draw_glyphs(&mut pixmap, &glyphs, glyph_origin)?;

        let ink_rect = visible_ink(&glyphs.ink, glyph_origin, size);
        log::debug!("Label ink box {:?}", ink_rect);

        Ok(RenderedIcon { pixmap, layout, glyph_origin, ink_rect })
    }

    fn draw_background(&self, pixmap: &mut Pixmap, layout: &IconLayout) -> Result<()> {
        let squircle = Squircle::with_corner_ratio(
            layout.margin,
            layout.margin,
            layout.icon_size,
            layout.icon_size,
            self.config.corner_ratio,
        );
        let Some(path) = squircle.to_path() else {
            log::warn!("Degenerate squircle at {}px, skipping background", layout.canvas_size);
            return Ok(());
        };

        // Vertical: lighter at the bottom edge, light gray at the top edge
        let top = layout.margin;
        let bottom = layout.margin + layout.icon_size;
        let shader = LinearGradient::new(
            Point::from_xy(0.0, bottom),
            Point::from_xy(0.0, top),
            vec![
                GradientStop::new(0.0, color(self.config.gradient_bottom)?),
                GradientStop::new(1.0, color(self.config.gradient_top)?),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        )
        .context("Failed to create background gradient")?;

        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        Ok(())
    }

    fn draw_glyphs(
        &self,
        pixmap: &mut Pixmap,
        glyphs: &GlyphMask,
        origin: (i32, i32),
    ) -> Result<()> {
        if glyphs.ink.is_empty() {
            log::warn!("Label {:?} produced no ink", self.config.text);
            return Ok(());
        }

        let (width, height) = (pixmap.width(), pixmap.height());
        let mut mask = Mask::new(width, height).context("Failed to allocate label mask")?;
        let data = mask.data_mut();

        for gy in 0..glyphs.height {
            let y = origin.1 + gy as i32;
            if y < 0 || y >= height as i32 {
                continue;
            }
            for gx in 0..glyphs.width {
                let x = origin.0 + gx as i32;
                if x < 0 || x >= width as i32 {
                    continue;
                }
                data[(y as u32 * width + x as u32) as usize] = glyphs.coverage_at(gx, gy);
            }
        }

        let mut paint = Paint::default();
        paint.set_color(color(self.config.text_color)?);
        paint.anti_alias = true;

        let canvas = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
            .context("Invalid canvas rect")?;
        pixmap.fill_rect(canvas, &paint, Transform::identity(), Some(&mask));
        Ok(())
    }
}

/// Top-left position that puts the mask's ink box at the center of the icon body
fn center_ink(glyphs: &GlyphMask, layout: &IconLayout) -> (i32, i32) {
    let ink = glyphs.ink;
    let x = layout.margin + (layout.icon_size - ink.width as f32) / 2.0 - ink.x as f32;
    let y = layout.margin + (layout.icon_size - ink.height as f32) / 2.0 - ink.y as f32;
    (x.round() as i32, y.round() as i32)
}

/// The part of the mask's ink box that lands on a `canvas_size` canvas
fn visible_ink(ink: &InkBounds, origin: (i32, i32), canvas_size: u32) -> InkBounds {
    let clip = |start: i32, len: u32| -> (u32, u32) {
        let lo = start.clamp(0, canvas_size as i32);
        let hi = (start + len as i32).clamp(0, canvas_size as i32);
        (lo as u32, (hi - lo) as u32)
    };
    let (x, width) = clip(origin.0 + ink.x as i32, ink.width);
    let (y, height) = clip(origin.1 + ink.y as i32, ink.height);
    if width == 0 || height == 0 {
        return InkBounds::default();
    }
    InkBounds { x, y, width, height }
}

fn color(rgba: [f32; 4]) -> Result<Color> {
    Color::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
        .with_context(|| format!("Invalid color {:?}", rgba))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_macos_grid() {
        let layout = IconLayout::compute(1024, &IconConfig::default());
        assert_eq!(layout.icon_size, 832.0);
        assert_eq!(layout.margin, 96.0);
        assert!((layout.font_size - 582.4).abs() < 1e-3);
    }

    #[test]
    fn test_center_ink_accounts_for_mask_padding() {
        let glyphs = GlyphMask {
            width: 20,
            height: 10,
            coverage: vec![0; 200],
            ink: InkBounds { x: 5, y: 2, width: 10, height: 6 },
        };
        let layout = IconLayout {
            canvas_size: 100,
            icon_size: 80.0,
            margin: 10.0,
            font_size: 56.0,
        };
        let (x, y) = center_ink(&glyphs, &layout);
        // ink box lands at (45, 47), centered on (50, 50)
        assert_eq!((x + 5, y + 2), (45, 47));
    }

    #[test]
    fn test_visible_ink_inside_canvas_is_unchanged() {
        let ink = InkBounds { x: 5, y: 2, width: 10, height: 6 };
        let rect = visible_ink(&ink, (40, 45), 100);
        assert_eq!(rect, InkBounds { x: 45, y: 47, width: 10, height: 6 });
    }

    #[test]
    fn test_visible_ink_clips_top_left_overflow() {
        let ink = InkBounds { x: 0, y: 0, width: 30, height: 20 };
        let rect = visible_ink(&ink, (-10, -5), 100);
        assert_eq!(rect, InkBounds { x: 0, y: 0, width: 20, height: 15 });
    }

    #[test]
    fn test_visible_ink_clips_bottom_right_overflow() {
        let ink = InkBounds { x: 0, y: 0, width: 30, height: 20 };
        let rect = visible_ink(&ink, (90, 95), 100);
        assert_eq!(rect, InkBounds { x: 90, y: 95, width: 10, height: 5 });
    }

    #[test]
    fn test_visible_ink_off_canvas_is_empty() {
        let ink = InkBounds { x: 0, y: 0, width: 30, height: 20 };
        assert!(visible_ink(&ink, (-50, 10), 100).is_empty());
    }

    #[test]
    fn test_oversized_label_reports_clipped_ink() {
        let config = IconConfig {
            font: crate::config::FontSource::Builtin,
            font_scale: 3.0,
            ..IconConfig::default()
        };
        let icon = IconRenderer::new(&config, &Typeface::Builtin)
            .render(64, RenderMode::ForegroundOnly)
            .unwrap();
        let ink = icon.ink_rect;
        assert!(ink.x + ink.width <= 64);
        assert!(ink.y + ink.height <= 64);
        assert_eq!((ink.y, ink.height), (0, 64));
    }
}
