//! Canvas sizing: keep the backing store and the CSS box at the same pixel size.
//!
//! A canvas whose `width`/`height` attributes differ from its CSS size gets
//! resampled by the browser; setting both to the same value keeps one drawing
//! unit equal to one CSS pixel. Applying a box is idempotent, so callers simply
//! re-apply on every resize.

#[cfg(test)]
#[path = "sizing_test.rs"]
mod sizing_test;

use crate::error::FireworksError;
use crate::geom::Size;

/// Backing-store and CSS dimensions for one canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasBox {
    pub width: u32,
    pub height: u32,
    pub css_width: String,
    pub css_height: String,
}

impl CanvasBox {
    #[must_use]
    pub fn new(size: Size) -> Self {
        let width = to_pixels(size.width);
        let height = to_pixels(size.height);
        Self { width, height, css_width: format!("{width}px"), css_height: format!("{height}px") }
    }
}

/// Anything whose backing store and CSS box can be set.
pub trait Sizable {
    /// # Errors
    ///
    /// Returns `Err` if the style declaration rejects the new size.
    fn apply_box(&self, canvas_box: &CanvasBox) -> Result<(), FireworksError>;
}

/// Size `canvas` to `size`, or to `viewport` when no explicit size is given.
///
/// # Errors
///
/// Propagates failures from [`Sizable::apply_box`].
pub fn set_canvas_size<S: Sizable + ?Sized>(
    canvas: &S,
    size: Option<Size>,
    viewport: Size,
) -> Result<CanvasBox, FireworksError> {
    let canvas_box = CanvasBox::new(size.unwrap_or(viewport));
    canvas.apply_box(&canvas_box)?;
    Ok(canvas_box)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as u32
}
