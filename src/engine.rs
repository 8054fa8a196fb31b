use crate::burst::BurstField;
use crate::config::Settings;
use crate::error::FireworksError;
use crate::geom::Size;
use crate::input::{PointerSnapshot, coords_from_event};
use crate::random::Sampler;
use crate::sizing::set_canvas_size;
use crate::surface::Surface;
use crate::trail::TrailSystem;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// State of one installed effect: both canvases, both particle systems and
/// the sampler feeding them.
///
/// Nothing in here knows about DOM listeners or animation frames, so the
/// whole effect can be driven by hand in tests.
pub struct EffectCore<S: Surface> {
    settings: Settings,
    primary: S,
    overlay: S,
    trail: TrailSystem<S::Texture>,
    bursts: BurstField,
    sampler: Box<dyn Sampler>,
}

impl<S: Surface> EffectCore<S> {
    /// The trail emission marker starts at the centre of `viewport`.
    pub fn new(settings: Settings, primary: S, overlay: S, sampler: Box<dyn Sampler>, viewport: Size) -> Self {
        Self {
            settings,
            primary,
            overlay,
            trail: TrailSystem::new(viewport.center()),
            bursts: BurstField::new(),
            sampler,
        }
    }

    /// Size both canvases to the viewport and, if trails are enabled, build
    /// the glyph textures.
    ///
    /// # Errors
    ///
    /// Returns `Err` if sizing or glyph rasterization fails.
    pub fn init(&mut self, viewport: Size) -> Result<(), FireworksError> {
        set_canvas_size(&self.primary, None, viewport)?;
        set_canvas_size(&self.overlay, None, viewport)?;
        if self.settings.enable_particle_trail {
            self.trail.init_textures(
                &self.overlay,
                &self.settings.particle_symbol,
                self.settings.particle_size,
                &self.settings.particle_colors,
            )?;
        }
        Ok(())
    }

    // --- Input events ---

    /// Pointer or touch movement. Returns whether a trail particle was emitted.
    pub fn on_pointer_move(&mut self, event: &PointerSnapshot) -> bool {
        if !self.settings.enable_particle_trail {
            return false;
        }
        let Some(at) = coords_from_event(event) else {
            return false;
        };
        self.trail.add(at, self.sampler.as_mut())
    }

    /// Pointer-down: spawn a burst at the pointer in canvas-local coordinates.
    /// Returns the number of particles spawned.
    pub fn on_pointer_down(&mut self, event: &PointerSnapshot) -> usize {
        let Some(at) = coords_from_event(event) else {
            return 0;
        };
        let local = at.relative_to(self.primary.origin());
        self.bursts.spawn(local, &self.settings, self.sampler.as_mut()).particles().len()
    }

    /// Re-apply viewport sizing to both canvases.
    pub fn on_resize(&mut self, viewport: Size) {
        for canvas in [&self.primary, &self.overlay] {
            if let Err(err) = set_canvas_size(canvas, None, viewport) {
                log::debug!("resize failed: {err}");
            }
        }
    }

    // --- Frames ---

    /// One tick of the trail loop on the overlay canvas.
    pub fn trail_frame(&mut self) {
        if let Err(err) = self.trail.update(&self.overlay) {
            log::debug!("trail frame: {err}");
        }
    }

    /// One tick of the shared burst driver: clear the primary canvas, then
    /// advance and redraw every live burst.
    pub fn burst_frame(&mut self, now_ms: f64) {
        self.primary.clear();
        if let Err(err) = self.bursts.frame(&self.primary, now_ms) {
            log::debug!("burst frame: {err}");
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn trail(&self) -> &TrailSystem<S::Texture> {
        &self.trail
    }

    #[must_use]
    pub fn bursts(&self) -> &BurstField {
        &self.bursts
    }

    #[must_use]
    pub fn overlay(&self) -> &S {
        &self.overlay
    }
}
