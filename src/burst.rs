//! Burst particles: the radial firework spawned by a pointer-down.
//!
//! Every particle in a burst gets its own end position and a two-segment
//! timeline. Both segments start at offset 0 and run concurrently:
//!
//! 1. outward: position to the end point, radius to 0.1, `anime_duration` ms, ease-out-expo;
//! 2. orbit: radius to a sampled orbit radius over 1200–1800 ms, ease-out-expo,
//!    while opacity fades linearly to 0 over 600–800 ms.
//!
//! Durations and the orbit radius are sampled once per burst and shared by its
//! particles. A [`BurstField`] owns the live bursts and is driven by the shared
//! clear-and-redraw loop.

#[cfg(test)]
#[path = "burst_test.rs"]
mod burst_test;

use crate::color::Rgba;
use crate::config::{Range, Settings};
use crate::consts::{
    BURST_ALPHA_MAX, BURST_ALPHA_MIN, BURST_COLLAPSED_RADIUS, FADE_DURATION_MAX_MS, FADE_DURATION_MIN_MS,
    ORBIT_DURATION_MAX_MS, ORBIT_DURATION_MIN_MS,
};
use crate::easing::Easing;
use crate::error::FireworksError;
use crate::geom::Point;
use crate::random::Sampler;
use crate::surface::Surface;
use crate::timeline::{Property, Segment, Timeline};

/// Where a particle is headed: the sampled direction and signed travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    pub angle_deg: f64,
    /// Travel distance; negative means the opposite direction.
    pub magnitude: f64,
}

impl Heading {
    /// Uniform angle in `[0, 360)`, magnitude uniform in `diffuse` with a 50/50 sign.
    pub fn sample(diffuse: Range, sampler: &mut dyn Sampler) -> Self {
        let angle_deg = sampler.between(0.0, 360.0);
        let value = sampler.in_range(diffuse);
        let magnitude = if sampler.coin() { -value } else { value };
        Self { angle_deg, magnitude }
    }

    #[must_use]
    pub fn end_from(self, origin: Point) -> Point {
        origin.displaced(self.angle_deg.to_radians(), self.magnitude)
    }
}

/// Per-burst random draws shared by every particle in the batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstTimings {
    pub outward_ms: f64,
    pub orbit_radius: f64,
    pub fade_ms: f64,
    pub orbit_ms: f64,
}

impl BurstTimings {
    pub fn sample(settings: &Settings, sampler: &mut dyn Sampler) -> Self {
        Self {
            outward_ms: sampler.in_range(settings.anime_duration),
            orbit_radius: sampler.in_range(settings.orbit_radius),
            fade_ms: sampler.between(FADE_DURATION_MIN_MS, FADE_DURATION_MAX_MS),
            orbit_ms: sampler.between(ORBIT_DURATION_MIN_MS, ORBIT_DURATION_MAX_MS),
        }
    }

    /// The two concurrent segments for a particle headed to `end`.
    #[must_use]
    pub fn timeline(&self, end: Point) -> Timeline {
        Timeline::new()
            .add(
                Segment::new(0.0, self.outward_ms, Easing::EaseOutExpo)
                    .tween(Property::X, end.x)
                    .tween(Property::Y, end.y)
                    .tween(Property::Radius, BURST_COLLAPSED_RADIUS),
            )
            .add(
                Segment::new(0.0, self.orbit_ms, Easing::EaseOutExpo)
                    .tween(Property::Radius, self.orbit_radius)
                    .tween_with(Property::Opacity, 0.0, self.fade_ms, Easing::Linear),
            )
    }
}

#[derive(Debug, Clone)]
pub struct BurstParticle {
    pub origin: Point,
    pub position: Point,
    pub end: Point,
    pub heading: Heading,
    pub start_radius: f64,
    pub radius: f64,
    /// Palette color carrying the particle's fixed alpha.
    pub color: Rgba,
    /// Fade multiplier in `0..=1`.
    pub opacity: f64,
    timeline: Timeline,
}

impl BurstParticle {
    fn spawn(origin: Point, settings: &Settings, sampler: &mut dyn Sampler) -> Self {
        let radius = sampler.in_range(settings.circle_radius);
        let base = settings
            .burst_colors
            .get(sampler.index(settings.burst_colors.len()))
            .copied()
            .unwrap_or(Rgba::opaque(0x66, 0xa7, 0xdd));
        let color = base.with_alpha(sampler.between(BURST_ALPHA_MIN, BURST_ALPHA_MAX));
        let heading = Heading::sample(settings.diffuse_radius, sampler);
        Self {
            origin,
            position: origin,
            end: heading.end_from(origin),
            heading,
            start_radius: radius,
            radius,
            color,
            opacity: 1.0,
            timeline: Timeline::new(),
        }
    }

    /// Current fill: the palette color with its alpha scaled by the fade.
    #[must_use]
    pub fn fill(&self) -> Rgba {
        self.color.with_alpha(self.color.a * self.opacity)
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn apply(&mut self, elapsed_ms: f64) {
        let t = &self.timeline;
        self.position = Point::new(
            t.value(Property::X, self.origin.x, elapsed_ms),
            t.value(Property::Y, self.origin.y, elapsed_ms),
        );
        self.radius = t.value(Property::Radius, self.start_radius, elapsed_ms).max(0.0);
        self.opacity = t.value(Property::Opacity, 1.0, elapsed_ms).clamp(0.0, 1.0);
    }

    fn draw<S: Surface>(&self, surface: &S) -> Result<(), FireworksError> {
        surface.fill_circle(self.position, self.radius, self.fill())
    }
}

/// One pointer-down's worth of particles.
#[derive(Debug, Clone)]
pub struct Burst {
    particles: Vec<BurstParticle>,
    timings: BurstTimings,
    started_at: Option<f64>,
    finished: bool,
}

impl Burst {
    /// Spawn `settings.number_of_particles` particles at `origin`.
    pub fn spawn(origin: Point, settings: &Settings, sampler: &mut dyn Sampler) -> Self {
        let mut particles = (0..settings.number_of_particles)
            .map(|_| BurstParticle::spawn(origin, settings, sampler))
            .collect::<Vec<_>>();
        let timings = BurstTimings::sample(settings, sampler);
        for particle in &mut particles {
            particle.timeline = timings.timeline(particle.end);
        }
        Self { particles, timings, started_at: None, finished: false }
    }

    #[must_use]
    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    #[must_use]
    pub fn timings(&self) -> BurstTimings {
        self.timings
    }

    /// Move every particle to its state at `now_ms`. The first call pins the start time.
    ///
    /// Returns whether the burst has finished.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let elapsed = (now_ms - started_at).max(0.0);
        for particle in &mut self.particles {
            particle.apply(elapsed);
        }
        self.finished = self.particles.iter().all(|particle| particle.timeline.is_finished(elapsed));
        self.finished
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Redraw every particle. Keeps drawing after a failure and reports the first one.
    ///
    /// # Errors
    ///
    /// Returns the first failed draw call.
    pub fn draw<S: Surface>(&self, surface: &S) -> Result<(), FireworksError> {
        let mut outcome = Ok(());
        for particle in &self.particles {
            if let Err(err) = particle.draw(surface) {
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        outcome
    }
}

/// Every live burst, in spawn order.
#[derive(Debug, Default)]
pub struct BurstField {
    bursts: Vec<Burst>,
}

impl BurstField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a burst at `origin` (canvas-local) and return it.
    pub fn spawn(&mut self, origin: Point, settings: &Settings, sampler: &mut dyn Sampler) -> &Burst {
        let index = self.bursts.len();
        self.bursts.push(Burst::spawn(origin, settings, sampler));
        &self.bursts[index]
    }

    /// One driver frame after the canvas was cleared: advance and redraw every
    /// burst, then drop the finished ones.
    ///
    /// # Errors
    ///
    /// Returns the first failed draw call; all bursts are still advanced.
    pub fn frame<S: Surface>(&mut self, surface: &S, now_ms: f64) -> Result<(), FireworksError> {
        let mut outcome = Ok(());
        for burst in &mut self.bursts {
            burst.advance(now_ms);
            if let Err(err) = burst.draw(surface) {
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        self.bursts.retain(|burst| !burst.is_finished());
        outcome
    }

    #[must_use]
    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }
}
