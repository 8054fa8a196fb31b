//! Effect controller: installs one effect on a page and hands back its teardown.
//!
//! `create_fireworks` wires an [`EffectCore`] to the host [`Platform`]: five
//! listeners, a trail loop that runs from install until teardown, and a shared
//! burst loop that starts on the first pointer-down. Everything it registers is
//! owned by the returned [`Teardown`].

#[cfg(test)]
#[path = "fireworks_test.rs"]
mod fireworks_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::FireworksConfig;
use crate::engine::EffectCore;
use crate::error::FireworksError;
use crate::input::{EventKind, PointerSnapshot};
use crate::platform::{EventHandler, FrameLoop, Platform};
use crate::random::Sampler;

/// Releases everything an installed effect registered.
///
/// Steps run in registration order. Running twice is a no-op, and dropping
/// an unrun teardown runs it.
#[derive(Default)]
pub struct Teardown {
    steps: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
    pub fn push(&mut self, step: impl FnOnce() + 'static) {
        self.steps.push(Box::new(step));
    }

    pub fn run(&mut self) {
        if self.is_done() {
            return;
        }
        log::debug!("fireworks teardown: {} steps", self.steps.len());
        for step in self.steps.drain(..) {
            step();
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.steps.is_empty()
    }

    /// A callback for the host: the first call runs the teardown, later calls do nothing.
    pub fn into_callback(mut self) -> impl FnMut() + 'static {
        move || self.run()
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

/// Install the effect described by `config` on `platform`.
///
/// # Errors
///
/// Returns [`FireworksError::CanvasNotFound`] if the selector matches nothing,
/// or whatever the platform reports while creating or sizing the canvases.
/// Nothing stays registered on failure.
pub fn create_fireworks<P: Platform + 'static>(
    platform: Rc<P>,
    config: FireworksConfig,
    sampler: Box<dyn Sampler>,
) -> Result<Teardown, FireworksError> {
    let settings = config.sanitized();
    let viewport = platform.viewport();

    let primary = platform.find_canvas(&settings.selector)?;
    let overlay = platform.create_overlay()?;
    let trail_enabled = settings.enable_particle_trail;
    let selector = settings.selector.clone();
    let particle_count = settings.number_of_particles;

    let mut core = EffectCore::new(settings, primary, overlay, sampler, viewport);
    if let Err(err) = core.init(viewport) {
        platform.remove_overlay(core.overlay());
        return Err(err);
    }
    let core = Rc::new(RefCell::new(core));

    let trail_loop = if trail_enabled {
        let core = Rc::clone(&core);
        let frame_loop = FrameLoop::new(Rc::clone(&platform), move |_| core.borrow_mut().trail_frame());
        frame_loop.start();
        Some(frame_loop)
    } else {
        None
    };

    let burst_loop = {
        let core = Rc::clone(&core);
        FrameLoop::new(Rc::clone(&platform), move |now| core.borrow_mut().burst_frame(now))
    };

    let listeners = EventKind::ALL
        .iter()
        .map(|&kind| {
            let core = Rc::clone(&core);
            let handler: EventHandler = match kind {
                EventKind::MouseMove | EventKind::TouchMove | EventKind::TouchStart => {
                    Box::new(move |event: &PointerSnapshot| {
                        core.borrow_mut().on_pointer_move(event);
                    })
                }
                EventKind::MouseDown => {
                    let burst_loop = Rc::clone(&burst_loop);
                    Box::new(move |event: &PointerSnapshot| {
                        burst_loop.start();
                        core.borrow_mut().on_pointer_down(event);
                    })
                }
                EventKind::Resize => {
                    let platform = Rc::clone(&platform);
                    Box::new(move |_: &PointerSnapshot| core.borrow_mut().on_resize(platform.viewport()))
                }
            };
            platform.listen(kind, handler)
        })
        .collect::<Vec<_>>();

    let mut teardown = Teardown::default();
    teardown.push(move || drop(listeners));
    if let Some(trail_loop) = trail_loop {
        teardown.push(move || trail_loop.stop());
    }
    teardown.push(move || burst_loop.stop());
    teardown.push(move || platform.remove_overlay(core.borrow().overlay()));

    log::info!(
        "fireworks installed on {selector}: {particle_count} particles per burst, trail {}",
        if trail_enabled { "on" } else { "off" }
    );
    Ok(teardown)
}
