use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::path::{Path, PathBuf};

use super::canvas::{Canvas, Color};

/// Fonts tried when neither `--font` nor `--font-url` is given.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

pub struct TextOverlay {
    font: Font,
    font_size: f32,
}

impl TextOverlay {
    /// Load a font from downloaded bytes, an explicit path, or the first
    /// system font found, in that order.
    pub fn new(font_size: f32, font_path: Option<&Path>, font_bytes: Option<&[u8]>) -> Result<Self> {
        let data = match (font_bytes, font_path) {
            (Some(bytes), _) => bytes.to_vec(),
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("Failed to read font: {}", path.display()))?,
            (None, None) => {
                let path = find_system_font().context("No system font found; pass --font")?;
                log::debug!("Using system font {}", path.display());
                std::fs::read(&path)
                    .with_context(|| format!("Failed to read font: {}", path.display()))?
            }
        };

        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font: {}", e))?;
        Ok(Self { font, font_size })
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn line_height(&self) -> u32 {
        (self.font_size * 1.25).ceil() as u32
    }

    /// Composite text onto the canvas with its top-left corner at `(x, y)`.
    pub fn composite(&self, canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color) {
        let mut cursor_x = x;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            let glyph_y = y + self.font_size as i32 - metrics.height as i32 - metrics.ymin;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = bitmap[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    canvas.blend_pixel(
                        cursor_x + metrics.xmin + gx as i32,
                        glyph_y + gy as i32,
                        color,
                        alpha as f32 / 255.0,
                    );
                }
            }

            cursor_x += metrics.advance_width.round() as i32;
        }
    }

    /// Measure the width of rendered text in pixels.
    pub fn measure_width(&self, text: &str) -> u32 {
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, self.font_size).advance_width)
            .sum();
        width.ceil() as u32
    }
}

pub fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Download a TTF/OTF font.
pub fn load_font_from_url(url: &str) -> Result<Vec<u8>> {
    log::info!("Downloading font from {}", url);
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch font: {}", url))?
        .error_for_status()
        .with_context(|| format!("Font download failed: {}", url))?;
    let bytes = response.bytes().context("Failed to read font response")?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_path_is_an_error() {
        let result = TextOverlay::new(16.0, Some(Path::new("/nonexistent/font.ttf")), None);
        assert!(result.is_err());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = TextOverlay::new(16.0, None, Some(&b"not a font"[..]));
        assert!(result.is_err());
    }

    #[test]
    fn system_font_renders_when_available() {
        let Some(path) = find_system_font() else {
            return;
        };
        let overlay = TextOverlay::new(16.0, Some(&path), None).unwrap();
        assert!(overlay.measure_width("400 Hz") > overlay.measure_width("4"));

        let background = [0, 0, 0, 255];
        let mut canvas = Canvas::new(120, 40, background);
        overlay.composite(&mut canvas, "Hz", 2, 2, [255, 255, 255, 255]);
        assert!(canvas.pixels().chunks(4).any(|px| px[0] > 0));
    }
}
