use std::cell::RefCell;

use super::*;

#[test]
fn glyph_font_uses_serif_pixels() {
    let glyph = GlyphSpec { symbol: "✦", size_px: 21.0, color: "#fff" };
    assert_eq!(glyph.font(), "21px serif");
}

#[test]
fn glyph_box_rounds_up() {
    assert_eq!(glyph_box(14.2, 10.1, 3.0), (15, 14));
}

#[test]
fn glyph_box_is_never_empty() {
    assert_eq!(glyph_box(0.0, 0.0, 0.0), (1, 1));
    assert_eq!(glyph_box(f64::NAN, -4.0, 1.0), (1, 1));
}

// =============================================================
// draw_glyph
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum PenOp {
    Style { font: String, align: String, baseline: String },
    Measure { baseline: String },
    Fill { color: String, at: Point },
}

/// Reports a larger ascent for the alphabetic baseline, like a real context.
#[derive(Default)]
struct RecordingPen {
    baseline: RefCell<String>,
    ops: RefCell<Vec<PenOp>>,
    size: RefCell<Option<(u32, u32)>>,
}

impl GlyphPen for RecordingPen {
    fn set_text_style(&self, font: &str, align: &str, baseline: &str) {
        *self.baseline.borrow_mut() = baseline.to_owned();
        self.ops.borrow_mut().push(PenOp::Style {
            font: font.to_owned(),
            align: align.to_owned(),
            baseline: baseline.to_owned(),
        });
    }

    fn measure(&self, _text: &str) -> Result<TextExtent, FireworksError> {
        let baseline = self.baseline.borrow().clone();
        let ascent = if baseline == "middle" { 8.0 } else { 16.0 };
        self.ops.borrow_mut().push(PenOp::Measure { baseline });
        Ok(TextExtent { width: 17.4, ascent, descent: 8.0 })
    }

    fn fill(&self, _text: &str, color: &str, at: Point) -> Result<(), FireworksError> {
        self.ops.borrow_mut().push(PenOp::Fill { color: color.to_owned(), at });
        Ok(())
    }
}

fn star() -> GlyphSpec<'static> {
    GlyphSpec { symbol: "✦", size_px: 21.0, color: "#e65f5f" }
}

fn middle_style() -> PenOp {
    PenOp::Style { font: "21px serif".into(), align: "center".into(), baseline: "middle".into() }
}

#[test]
fn draw_glyph_measures_with_middle_baseline() {
    let overlay = RecordingPen::default();
    let texture = draw_glyph(&overlay, &star(), |width, height| {
        let pen = RecordingPen::default();
        *pen.size.borrow_mut() = Some((width, height));
        Ok(pen)
    })
    .unwrap();

    assert_eq!(overlay.ops.borrow().as_slice(), &[middle_style(), PenOp::Measure { baseline: "middle".into() }]);
    assert_eq!(*texture.size.borrow(), Some((18, 16)));
}

#[test]
fn draw_glyph_fills_at_half_width_and_ascent() {
    let overlay = RecordingPen::default();
    let texture = draw_glyph(&overlay, &star(), |_, _| Ok(RecordingPen::default())).unwrap();

    assert_eq!(
        texture.ops.borrow().as_slice(),
        &[middle_style(), PenOp::Fill { color: "#e65f5f".into(), at: Point::new(9.0, 8.0) }]
    );
}

#[test]
fn draw_glyph_stops_when_texture_cannot_be_created() {
    let overlay = RecordingPen::default();
    let result = draw_glyph(&overlay, &star(), |_, _| Err(FireworksError::ContextUnavailable));
    assert!(matches!(result, Err(FireworksError::ContextUnavailable)));
}
