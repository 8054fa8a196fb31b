//! Pointer input model and the coordinate extractor.
//!
//! Mouse and touch events are flattened into a [`PointerSnapshot`] at the DOM
//! boundary (see [`crate::web`]), so everything downstream works on plain
//! values and can be tested without a browser.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;

/// The coordinate sources carried by a mouse- or touch-family event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSnapshot {
    /// `clientX`/`clientY`, present on mouse and pointer events.
    pub client: Option<Point>,
    /// Client positions of the active `touches` list.
    pub touches: Vec<Point>,
    /// Client positions of the `changedTouches` list.
    pub changed_touches: Vec<Point>,
}

impl PointerSnapshot {
    /// A snapshot for a mouse event at `(x, y)`.
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self { client: Some(Point::new(x, y)), ..Self::default() }
    }

    /// A snapshot for a touch event.
    #[must_use]
    pub fn touch(touches: Vec<Point>, changed_touches: Vec<Point>) -> Self {
        Self { client: None, touches, changed_touches }
    }
}

/// Resolve the viewport position of a pointer event.
///
/// Direct client coordinates win, then the first active touch, then the first
/// changed touch (covers `touchend`/`touchcancel`, where `touches` is empty).
/// Returns `None` only for events carrying none of the three.
#[must_use]
pub fn coords_from_event(event: &PointerSnapshot) -> Option<Point> {
    event
        .client
        .or_else(|| event.touches.first().copied())
        .or_else(|| event.changed_touches.first().copied())
}

/// Which DOM event a listener is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseMove,
    TouchMove,
    TouchStart,
    MouseDown,
    Resize,
}

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenTarget {
    Document,
    Window,
}

impl EventKind {
    /// Every listener the effect installs, in registration order.
    pub const ALL: [EventKind; 5] = [Self::MouseMove, Self::TouchMove, Self::TouchStart, Self::MouseDown, Self::Resize];

    /// DOM event type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MouseMove => "mousemove",
            Self::TouchMove => "touchmove",
            Self::TouchStart => "touchstart",
            Self::MouseDown => "mousedown",
            Self::Resize => "resize",
        }
    }

    #[must_use]
    pub fn target(self) -> ListenTarget {
        match self {
            Self::Resize => ListenTarget::Window,
            _ => ListenTarget::Document,
        }
    }

    /// Touch listeners never call `preventDefault`, so they are registered passive.
    #[must_use]
    pub fn passive(self) -> bool {
        matches!(self, Self::TouchMove | Self::TouchStart)
    }
}
