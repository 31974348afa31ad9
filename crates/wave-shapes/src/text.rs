use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent};
use glam::Vec3;
use wave_core::{Surface, Triangle};

/// Configuration for text rasterisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextConfig {
    /// Font size in pixels. Default: 24.0
    pub font_size: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { font_size: 24.0 }
    }
}

fn bytes_per_pixel(content: SwashContent) -> usize {
    match content {
        SwashContent::Mask => 1,
        SwashContent::SubpixelMask => 3,
        SwashContent::Color => 4,
    }
}

/// Alpha of the pixel starting at `px[0]`.
fn coverage(content: SwashContent, px: &[u8]) -> u8 {
    match content {
        SwashContent::Mask => px[0],
        // Average of the subpixel channels
        SwashContent::SubpixelMask => ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8,
        SwashContent::Color => px[3],
    }
}

/// Push the one-pixel-tall quad covering columns `start..end` of raster row `y`.
///
/// Y is negated to flip from raster (Y-down) to scene (Y-up).
fn push_run(triangles: &mut Vec<Triangle>, start: f32, end: f32, y: f32) {
    let a = Vec3::new(start, -y, 0.0);
    let b = Vec3::new(end, -y, 0.0);
    let c = Vec3::new(end, -y - 1.0, 0.0);
    let d = Vec3::new(start, -y - 1.0, 0.0);
    triangles.push(Triangle::new(a, b, c));
    triangles.push(Triangle::new(a, c, d));
}

/// Rasterise a text string into a flat surface covering its glyphs.
///
/// Each character is rasterised using `cosmic-text` and then converted into
/// horizontal runs by scanning alpha rows; every run becomes a one-pixel
/// quad. The result is normalized to unit size. Fails when nothing visible
/// was rendered (empty text, whitespace only, or no fonts installed).
pub fn parse_text(text: &str, config: &TextConfig) -> Result<Surface, String> {
    if text.trim().is_empty() {
        return Err("text is empty".to_string());
    }
    if !(config.font_size.is_finite() && config.font_size > 0.0) {
        return Err(format!("font size must be positive, got {}", config.font_size));
    }

    let mut font_system = FontSystem::new();
    let metrics = Metrics::new(config.font_size, config.font_size * 1.2);
    let mut buffer = Buffer::new(&mut font_system, metrics);
    buffer.set_text(
        &mut font_system,
        text,
        Attrs::new().family(Family::SansSerif),
        Shaping::Advanced,
    );
    buffer.shape_until_scroll(&mut font_system, false);

    let mut cache = SwashCache::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for run in buffer.layout_runs() {
        for glyph in run.glyphs.iter() {
            let physical = glyph.physical((0.0, 0.0), 1.0);
            let Some(image) = cache.get_image(&mut font_system, physical.cache_key) else {
                continue;
            };

            let w = image.placement.width as usize;
            let h = image.placement.height as usize;
            let bpp = bytes_per_pixel(image.content);
            if w == 0 || h == 0 || image.data.len() < w * h * bpp {
                continue;
            }

            // Top-left of the glyph in pixel space
            let gx = physical.x + image.placement.left;
            let gy = physical.y - image.placement.top;

            for (row, pixels) in image.data.chunks_exact(w * bpp).take(h).enumerate() {
                let y = (gy + row as i32) as f32;
                let mut run_start: Option<usize> = None;

                for col in 0..=w {
                    let covered = col < w && coverage(image.content, &pixels[col * bpp..]) > 128;
                    match (covered, run_start) {
                        (true, None) => run_start = Some(col),
                        (false, Some(start)) => {
                            let x0 = (gx + start as i32) as f32;
                            let x1 = (gx + col as i32) as f32;
                            push_run(&mut triangles, x0, x1, y);
                            run_start = None;
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    if triangles.is_empty() {
        return Err(format!("no glyphs rendered for {text:?}"));
    }

    let mut surface = Surface::new(triangles);
    surface.normalize();
    log::debug!("text {:?} rasterised into {} triangles", text, surface.len());
    Ok(surface)
}
