//! Host abstraction: canvas lookup, event listeners and animation frames.
//!
//! The controller never touches globals. It receives a [`Platform`] and owns
//! whatever handles it returns; dropping a listener handle unregisters it and
//! dropping a frame handle cancels the pending frame, which is what makes
//! teardown exact.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::FireworksError;
use crate::geom::Size;
use crate::input::{EventKind, PointerSnapshot};
use crate::surface::Surface;

/// Callback invoked with the flattened event for every dispatch.
pub type EventHandler = Box<dyn FnMut(&PointerSnapshot)>;

/// Callback invoked once with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait Platform {
    type Surface: Surface + 'static;
    /// Unregisters its listener when dropped.
    type Listener: 'static;
    /// Cancels its pending frame when dropped.
    type Frame: 'static;

    /// Current viewport size in CSS pixels.
    fn viewport(&self) -> Size;

    /// The primary canvas and its 2D context.
    ///
    /// # Errors
    ///
    /// [`FireworksError::CanvasNotFound`] or [`FireworksError::ContextUnavailable`].
    fn find_canvas(&self, selector: &str) -> Result<Self::Surface, FireworksError>;

    /// Create the full-viewport trail overlay and attach it to the document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element cannot be created or attached.
    fn create_overlay(&self) -> Result<Self::Surface, FireworksError>;

    /// Detach the overlay if it is still attached; a no-op otherwise.
    fn remove_overlay(&self, overlay: &Self::Surface);

    fn listen(&self, kind: EventKind, handler: EventHandler) -> Self::Listener;

    fn request_frame(&self, callback: FrameCallback) -> Self::Frame;
}

/// A self-rescheduling per-frame callback.
///
/// `start` is idempotent; `stop` cancels the pending frame and breaks the
/// reference cycle between the loop and its scheduled callback.
pub struct FrameLoop<P: Platform> {
    platform: Rc<P>,
    step: RefCell<Box<dyn FnMut(f64)>>,
    pending: RefCell<Option<P::Frame>>,
    running: Cell<bool>,
}

impl<P: Platform + 'static> FrameLoop<P> {
    pub fn new(platform: Rc<P>, step: impl FnMut(f64) + 'static) -> Rc<Self> {
        Rc::new(Self {
            platform,
            step: RefCell::new(Box::new(step)),
            pending: RefCell::new(None),
            running: Cell::new(false),
        })
    }

    /// Begin running on the next frame. Does nothing if already running.
    pub fn start(self: &Rc<Self>) {
        if self.running.replace(true) {
            return;
        }
        self.schedule();
    }

    pub fn stop(&self) {
        self.running.set(false);
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    fn schedule(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let frame = self.platform.request_frame(Box::new(move |timestamp| this.tick(timestamp)));
        *self.pending.borrow_mut() = Some(frame);
    }

    fn tick(self: &Rc<Self>, timestamp: f64) {
        if !self.running.get() {
            return;
        }
        {
            let mut step = self.step.borrow_mut();
            (*step)(timestamp);
        }
        if self.running.get() {
            self.schedule();
        }
    }
}
