use std::cell::RefCell;

use super::*;

#[derive(Default)]
struct FakeCanvas {
    applied: RefCell<Vec<CanvasBox>>,
}

impl Sizable for FakeCanvas {
    fn apply_box(&self, canvas_box: &CanvasBox) -> Result<(), FireworksError> {
        self.applied.borrow_mut().push(canvas_box.clone());
        Ok(())
    }
}

#[test]
fn explicit_size_sets_attributes_and_css() {
    let canvas = FakeCanvas::default();
    let result = set_canvas_size(&canvas, Some(Size::new(800.0, 600.0)), Size::new(1.0, 1.0));
    let Ok(b) = result else {
        panic!("sizing should succeed");
    };
    assert_eq!(b.width, 800);
    assert_eq!(b.height, 600);
    assert_eq!(b.css_width, "800px");
    assert_eq!(b.css_height, "600px");
    assert_eq!(canvas.applied.borrow().as_slice(), &[b]);
}

#[test]
fn missing_size_uses_viewport() {
    let canvas = FakeCanvas::default();
    let result = set_canvas_size(&canvas, None, Size::new(1024.0, 768.0));
    assert!(matches!(result, Ok(ref b) if b.width == 1024 && b.css_height == "768px"));
}

#[test]
fn reapplying_is_idempotent() {
    let canvas = FakeCanvas::default();
    for _ in 0..3 {
        assert!(set_canvas_size(&canvas, Some(Size::new(320.0, 240.0)), Size::default()).is_ok());
    }
    let applied = canvas.applied.borrow();
    assert_eq!(applied.len(), 3);
    assert!(applied.iter().all(|b| *b == applied[0]));
}

#[test]
fn fractional_sizes_round_to_whole_pixels() {
    let b = CanvasBox::new(Size::new(799.6, 600.4));
    assert_eq!((b.width, b.height), (800, 600));
    assert_eq!(b.css_width, "800px");
}

#[test]
fn negative_or_nan_sizes_collapse_to_zero() {
    let b = CanvasBox::new(Size::new(-5.0, f64::NAN));
    assert_eq!((b.width, b.height), (0, 0));
    assert_eq!(b.css_height, "0px");
}
