use jjstats_icon::canvas::{IconRenderer, RenderMode, RenderedIcon};
use jjstats_icon::config::{FontSource, IconConfig};
use jjstats_icon::constants::text::INK_THRESHOLD;
use jjstats_icon::raster::{encode_png, resample};
use jjstats_icon::typeface::{measure_ink, Typeface};

fn builtin_config() -> IconConfig {
    IconConfig {
        font: FontSource::Builtin,
        ..IconConfig::default()
    }
}

fn render(mode: RenderMode) -> RenderedIcon {
    let config = builtin_config();
    let typeface = Typeface::resolve(&config.font).unwrap();
    IconRenderer::new(&config, &typeface)
        .render(1024, mode)
        .unwrap()
}

fn alpha(icon: &RenderedIcon, x: u32, y: u32) -> u8 {
    icon.pixmap.pixel(x, y).unwrap().alpha()
}

fn alpha_channel(icon: &RenderedIcon) -> Vec<u8> {
    icon.pixmap.pixels().iter().map(|p| p.alpha()).collect()
}

#[test]
fn test_full_icon_is_opaque_inside_body() {
    let icon = render(RenderMode::Full);

    // left of the label, vertically centered
    assert_eq!(alpha(&icon, 180, 512), 255);
    // canvas margin stays transparent
    assert_eq!(alpha(&icon, 0, 0), 0);
    assert_eq!(alpha(&icon, 1023, 1023), 0);
    // the squircle corner is cut away
    assert_eq!(alpha(&icon, 97, 97), 0);
}

#[test]
fn test_background_gradient_darkens_upwards() {
    let icon = render(RenderMode::Full);

    let top = icon.pixmap.pixel(512, 100).unwrap();
    let bottom = icon.pixmap.pixel(512, 924).unwrap();

    assert_eq!(top.alpha(), 255);
    assert_eq!(bottom.alpha(), 255);
    assert!(top.red() < bottom.red(), "top {} bottom {}", top.red(), bottom.red());
    assert!(top.red() <= 245);
    assert!(bottom.red() >= 250);
}

#[test]
fn test_foreground_only_is_transparent_behind_label() {
    let icon = render(RenderMode::ForegroundOnly);

    assert_eq!(alpha(&icon, 180, 512), 0);
    assert_eq!(alpha(&icon, 512, 100), 0);

    let inked = alpha_channel(&icon).iter().filter(|&&a| a > INK_THRESHOLD).count();
    assert!(inked > 10_000, "only {} ink pixels", inked);
}

#[test]
fn test_glyph_placement_matches_between_modes() {
    let full = render(RenderMode::Full);
    let foreground = render(RenderMode::ForegroundOnly);

    assert_eq!(full.glyph_origin, foreground.glyph_origin);
    assert_eq!(full.ink_rect, foreground.ink_rect);
}

#[test]
fn test_label_ink_is_centered() {
    let icon = render(RenderMode::ForegroundOnly);
    let ink = measure_ink(1024, 1024, &alpha_channel(&icon), INK_THRESHOLD);

    let center_x = ink.x as f32 + ink.width as f32 / 2.0;
    let center_y = ink.y as f32 + ink.height as f32 / 2.0;
    assert!((center_x - 512.0).abs() <= 1.5, "center x {}", center_x);
    assert!((center_y - 512.0).abs() <= 1.5, "center y {}", center_y);

    // label is sized from the icon body, not the canvas
    assert!(ink.height > 500 && ink.height < 650, "ink height {}", ink.height);
}

#[test]
fn test_label_is_dark_gray() {
    let icon = render(RenderMode::Full);
    let y = icon.ink_rect.y + icon.ink_rect.height / 2;

    // darkest pixel across the middle row is fully covered label
    let pixel = (icon.ink_rect.x..icon.ink_rect.x + icon.ink_rect.width)
        .filter_map(|x| icon.pixmap.pixel(x, y))
        .min_by_key(|p| p.red())
        .expect("label row inside canvas");
    assert!((66..=72).contains(&pixel.red()), "red {}", pixel.red());
    assert_eq!(pixel.red(), pixel.green());
    assert_eq!(pixel.green(), pixel.blue());
}

#[test]
fn test_resample_to_every_icon_size() {
    let icon = render(RenderMode::Full);

    for size in [16, 32, 64, 128, 256, 512] {
        let image = resample(&icon, size).unwrap();
        assert_eq!(image.dimensions(), (size, size));

        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (size, size));
    }
}

#[test]
fn test_native_size_skips_resampling() {
    let icon = render(RenderMode::Full);
    let image = resample(&icon, 1024).unwrap();

    let source = icon.pixmap.pixel(180, 512).unwrap().demultiply();
    let copied = image.get_pixel(180, 512);
    assert_eq!(copied.0, [source.red(), source.green(), source.blue(), source.alpha()]);
}

#[test]
fn test_small_canvas_renders() {
    let config = IconConfig {
        canvas_size: 64,
        ..builtin_config()
    };
    let icon = IconRenderer::new(&config, &Typeface::Builtin)
        .render(config.canvas_size, RenderMode::Full)
        .unwrap();
    assert_eq!(icon.size(), 64);
    assert_eq!(alpha(&icon, 32, 10), 255);
}

#[test]
fn test_system_font_label_is_centered_in_both_modes() {
    // Default font source, as the binary uses; hosts without fonts get builtin glyphs
    let config = IconConfig::default();
    let typeface = Typeface::resolve(&config.font).unwrap();
    let renderer = IconRenderer::new(&config, &typeface);

    let full = renderer.render(1024, RenderMode::Full).unwrap();
    let foreground = renderer.render(1024, RenderMode::ForegroundOnly).unwrap();

    assert_eq!(full.glyph_origin, foreground.glyph_origin);
    assert_eq!(full.ink_rect, foreground.ink_rect);
    assert!(!foreground.ink_rect.is_empty(), "{:?} drew nothing", typeface);

    let ink = measure_ink(1024, 1024, &alpha_channel(&foreground), INK_THRESHOLD);
    let center_x = ink.x as f32 + ink.width as f32 / 2.0;
    let center_y = ink.y as f32 + ink.height as f32 / 2.0;
    assert!((center_x - 512.0).abs() <= 1.0, "{:?}: center x {}", typeface, center_x);
    assert!((center_y - 512.0).abs() <= 1.0, "{:?}: center y {}", typeface, center_y);
}
