//! Drawing seams between the particle systems and a concrete canvas.
//!
//! The particle systems only ever talk to [`Surface`]. The browser implementation
//! lives in [`crate::web`]; tests use a recording fake.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::color::Rgba;
use crate::error::FireworksError;
use crate::geom::{Point, Rect, Size};
use crate::sizing::Sizable;

/// A pre-rendered bitmap that can be blitted onto a [`Surface`].
pub trait Texture {
    fn size(&self) -> Size;
}

/// A glyph to pre-render into a trail texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSpec<'a> {
    pub symbol: &'a str,
    pub size_px: f64,
    /// Any CSS color.
    pub color: &'a str,
}

impl GlyphSpec<'_> {
    /// Canvas2D font shorthand for this glyph.
    #[must_use]
    pub fn font(&self) -> String {
        format!("{}px serif", self.size_px)
    }
}

/// Tight texture dimensions for a measured glyph: `ceil(width)` by
/// `ceil(ascent + descent)`, never smaller than 1×1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn glyph_box(width: f64, ascent: f64, descent: f64) -> (u32, u32) {
    let clamp = |v: f64| if v.is_finite() { v.ceil().clamp(1.0, f64::from(u32::MAX)) as u32 } else { 1 };
    (clamp(width), clamp(ascent + descent))
}

/// Text alignment a glyph is measured and filled with.
pub const GLYPH_TEXT_ALIGN: &str = "center";
/// Text baseline a glyph is measured and filled with.
pub const GLYPH_TEXT_BASELINE: &str = "middle";

/// Bounding box of a measured run of text, relative to the current baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// The Canvas2D text calls needed to pre-render a glyph.
pub trait GlyphPen {
    fn set_text_style(&self, font: &str, align: &str, baseline: &str);

    /// # Errors
    ///
    /// Returns `Err` if the context cannot measure `text`.
    fn measure(&self, text: &str) -> Result<TextExtent, FireworksError>;

    /// # Errors
    ///
    /// Returns `Err` if the context rejects the fill.
    fn fill(&self, text: &str, color: &str, at: Point) -> Result<(), FireworksError>;
}

/// Measure `glyph` on `measure_on`, then fill it into a tight pen made by `create`.
///
/// Both contexts use the same font, alignment and baseline, so the glyph's top
/// lands on the texture's top edge.
///
/// # Errors
///
/// Returns `Err` if measuring, creating the pen or filling fails.
pub fn draw_glyph<P: GlyphPen>(
    measure_on: &P,
    glyph: &GlyphSpec<'_>,
    create: impl FnOnce(u32, u32) -> Result<P, FireworksError>,
) -> Result<P, FireworksError> {
    let font = glyph.font();
    measure_on.set_text_style(&font, GLYPH_TEXT_ALIGN, GLYPH_TEXT_BASELINE);
    let extent = measure_on.measure(glyph.symbol)?;
    let (width, height) = glyph_box(extent.width, extent.ascent, extent.descent);

    let pen = create(width, height)?;
    // Sizing a canvas resets its context state.
    pen.set_text_style(&font, GLYPH_TEXT_ALIGN, GLYPH_TEXT_BASELINE);
    pen.fill(glyph.symbol, glyph.color, Point::new(f64::from(width) / 2.0, extent.ascent))?;
    Ok(pen)
}

/// A 2D drawing target.
///
/// Methods take `&self`: implementations wrap handles with interior mutability.
pub trait Surface: Sizable {
    type Texture: Texture;

    /// Backing-store size in pixels.
    fn size(&self) -> Size;

    /// Viewport position of the surface's top-left corner.
    fn origin(&self) -> Point;

    /// Clear every pixel.
    fn clear(&self);

    /// # Errors
    ///
    /// Returns `Err` if the underlying context rejects the path.
    fn fill_circle(&self, center: Point, radius: f64, color: Rgba) -> Result<(), FireworksError>;

    /// # Errors
    ///
    /// Returns `Err` if the texture cannot be drawn.
    fn draw_texture(&self, texture: &Self::Texture, dest: Rect) -> Result<(), FireworksError>;

    /// Render `glyph` into a new tightly sized texture.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an off-screen canvas or its context cannot be created.
    fn rasterize_glyph(&self, glyph: &GlyphSpec<'_>) -> Result<Self::Texture, FireworksError>;
}
