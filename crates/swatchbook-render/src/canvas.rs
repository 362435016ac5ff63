//! Transparent raster scenes.
//!
//! A [`Canvas`] records drawing operations (outline rects, filled rects,
//! text runs) against a transparent background of a fixed pixel size, then
//! rasterizes them in one step: the recorded scene is emitted as SVG, parsed
//! with `usvg`, and rendered antialiased into a `tiny_skia::Pixmap` by
//! `resvg`. Text shaping uses the system font database, loaded once per
//! process and shared across all canvases.
//!
//! The scene/rasterize split keeps paint attempts cheap to throw away: a
//! failed attempt simply drops its canvas, and nothing has touched a pixmap
//! yet.

use std::fmt::Write as _;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tiny_skia::Pixmap;
use usvg::fontdb;

use crate::color::Rgba;
use crate::error::ReportError;
use crate::util::escape_text;
use crate::value::FontSpec;

static FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// A fixed-size transparent drawing surface.
pub struct Canvas {
    width: u32,
    height: u32,
    body: String,
}

impl Canvas {
    /// Allocates a transparent canvas. Dimensions are clamped to at least
    /// one pixel; zero-area previews are the caller's decision to skip.
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            width: width.max(1),
            height: height.max(1),
            body: String::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draws a one-pixel rectangle outline.
    ///
    /// The half-pixel offset centers the stroke on the pixel grid so a unit
    /// outline rasterizes crisp instead of blurring across two rows.
    pub fn stroke_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let _ = write!(
            self.body,
            "<rect x=\"{}.5\" y=\"{}.5\" width=\"{}\" height=\"{}\" fill=\"none\" \
             stroke=\"#{}\" stroke-opacity=\"{}\" stroke-width=\"1\"/>",
            x,
            y,
            width.saturating_sub(1),
            height.saturating_sub(1),
            color.to_rgb_hex(),
            color.opacity(),
        );
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#{}\" fill-opacity=\"{}\"/>",
            x,
            y,
            width,
            height,
            color.to_rgb_hex(),
            color.opacity(),
        );
    }

    /// Draws a text run with its baseline at `(x, y)`.
    ///
    /// Families missing from the system database fall back through the
    /// shaper's defaults; a canvas with unresolvable text still rasterizes.
    pub fn text(&mut self, x: f32, y: f32, content: &str, font: &FontSpec, color: Rgba) {
        let weight = if font.bold { "bold" } else { "normal" };
        let style = if font.italic { "italic" } else { "normal" };
        let _ = write!(
            self.body,
            "<text x=\"{x}\" y=\"{y}\" font-family=\"{}\" font-size=\"{}\" \
             font-weight=\"{weight}\" font-style=\"{style}\" fill=\"#{}\" fill-opacity=\"{}\">{}</text>",
            escape_text(&font.family),
            font.size,
            color.to_rgb_hex(),
            color.opacity(),
            escape_text(content),
        );
    }

    /// Rasterizes the recorded scene into a pixmap of the canvas size.
    pub fn rasterize(&self) -> Result<Pixmap, ReportError> {
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">{body}</svg>",
            w = self.width,
            h = self.height,
            body = self.body,
        );

        let mut options = usvg::Options::default();
        options.fontdb = FONTS.clone();
        let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
            .map_err(|err| ReportError::Raster(format!("scene parse failed: {err}")))?;

        let mut pixmap = Pixmap::new(self.width, self.height).ok_or_else(|| {
            ReportError::Raster(format!(
                "pixmap allocation failed for {} x {}",
                self.width, self.height
            ))
        })?;
        let mut pixmap_ref = pixmap.as_mut();
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap_ref);
        Ok(pixmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_matches_requested_size() {
        let mut canvas = Canvas::new(40, 25);
        canvas.stroke_rect(0, 0, 40, 25, Rgba::RED);
        let pixmap = canvas.rasterize().unwrap();
        assert_eq!(pixmap.width(), 40);
        assert_eq!(pixmap.height(), 25);
    }

    #[test]
    fn test_empty_scene_is_fully_transparent() {
        let canvas = Canvas::new(8, 8);
        let pixmap = canvas.rasterize().unwrap();
        assert!(pixmap.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_fill_covers_pixels() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(0, 0, 4, 4, Rgba::RED);
        let pixmap = canvas.rasterize().unwrap();
        assert!(pixmap.data().iter().any(|&byte| byte != 0));
    }

    #[test]
    fn test_zero_dimensions_clamp_to_one() {
        let canvas = Canvas::new(0, 0);
        assert_eq!(canvas.width(), 1);
        assert_eq!(canvas.height(), 1);
        assert!(canvas.rasterize().is_ok());
    }

    #[test]
    fn test_text_is_escaped_into_scene() {
        let mut canvas = Canvas::new(100, 20);
        canvas.text(
            2.0,
            14.0,
            "a < b",
            &FontSpec::new("sans-serif", 12.0),
            Rgba::BLACK,
        );
        // Unescaped '<' would make the scene unparsable.
        assert!(canvas.rasterize().is_ok());
    }
}
