//! Trail particles: glyphs shed along the pointer path that fall and shrink away.
//!
//! One texture is pre-rendered per trail color ([`TrailSystem::init_textures`]).
//! Pointer movement emits particles, throttled by travel distance
//! ([`TrailSystem::add`]); every animation frame clears the overlay, advances and
//! redraws every particle, then drops the expired ones ([`TrailSystem::update`]).

#[cfg(test)]
#[path = "trail_test.rs"]
mod trail_test;

use crate::consts::{
    TRAIL_DRIFT_MAX, TRAIL_FALL_MIN, TRAIL_FALL_SPREAD, TRAIL_GRAVITY, TRAIL_LIFE_MIN, TRAIL_LIFE_SPREAD,
    TRAIL_MIN_DISTANCE_PX,
};
use crate::error::FireworksError;
use crate::geom::{Point, Rect, Size};
use crate::random::Sampler;
use crate::surface::{GlyphSpec, Surface, Texture};

/// A single falling glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailParticle {
    pub position: Point,
    /// Pixels per tick.
    pub velocity: Point,
    /// Remaining ticks; the particle is dropped once this goes negative.
    pub life: i32,
    pub initial_life: i32,
    /// Index into the system's textures.
    pub texture: usize,
}

impl TrailParticle {
    /// A particle at `position` using one of `texture_count` textures.
    #[allow(clippy::cast_possible_truncation)]
    pub fn spawn(position: Point, texture_count: usize, sampler: &mut dyn Sampler) -> Self {
        let initial_life = TRAIL_LIFE_MIN + (sampler.unit() * f64::from(TRAIL_LIFE_SPREAD)).floor() as i32;
        let direction = if sampler.coin() { -1.0 } else { 1.0 };
        let drift = direction * sampler.unit() * TRAIL_DRIFT_MAX;
        let fall = TRAIL_FALL_MIN + sampler.unit() * TRAIL_FALL_SPREAD;
        let texture = sampler.index(texture_count);
        Self { position, velocity: Point::new(drift, fall), life: initial_life, initial_life, texture }
    }

    /// Draw scale: remaining share of life, never negative.
    #[must_use]
    pub fn scale(&self) -> f64 {
        if self.initial_life <= 0 {
            return 0.0;
        }
        (f64::from(self.life) / f64::from(self.initial_life)).max(0.0)
    }

    /// Advance one tick: move, age, then accelerate downwards.
    pub fn step(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self.life -= 1;
        self.velocity.y += TRAIL_GRAVITY;
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.life < 0
    }

    /// Destination of a `texture`-sized blit, scaled and centred on the particle.
    #[must_use]
    pub fn dest(&self, texture: Size) -> Rect {
        let scale = self.scale();
        Rect::centered(self.position, Size::new(texture.width * scale, texture.height * scale))
    }
}

/// The set of live trail particles plus their textures and emission marker.
pub struct TrailSystem<T> {
    textures: Vec<T>,
    particles: Vec<TrailParticle>,
    last_position: Point,
}

impl<T: Texture> TrailSystem<T> {
    /// An empty system whose emission marker starts at `marker`.
    #[must_use]
    pub fn new(marker: Point) -> Self {
        Self { textures: Vec::new(), particles: Vec::new(), last_position: marker }
    }

    /// Pre-render one glyph texture per color. Replaces any existing textures.
    ///
    /// # Errors
    ///
    /// Returns the first rasterization failure; no textures are kept in that case.
    pub fn init_textures<S>(
        &mut self,
        surface: &S,
        symbol: &str,
        size_px: f64,
        colors: &[String],
    ) -> Result<(), FireworksError>
    where
        S: Surface<Texture = T>,
    {
        let textures = colors
            .iter()
            .map(|color| surface.rasterize_glyph(&GlyphSpec { symbol, size_px, color }))
            .collect::<Result<Vec<_>, _>>()?;
        self.textures = textures;
        Ok(())
    }

    /// Emit a particle at `at` if the pointer travelled more than the threshold
    /// since the last emission. Returns whether a particle was created.
    pub fn add(&mut self, at: Point, sampler: &mut dyn Sampler) -> bool {
        if self.textures.is_empty() {
            return false;
        }
        if at.distance(self.last_position) <= TRAIL_MIN_DISTANCE_PX {
            return false;
        }
        self.particles.push(TrailParticle::spawn(at, self.textures.len(), sampler));
        self.last_position = at;
        true
    }

    /// One animation frame: clear, advance and draw every particle, then drop
    /// the expired ones.
    ///
    /// Every particle is advanced and expired even if a draw call fails.
    ///
    /// # Errors
    ///
    /// Returns the first draw failure of the frame.
    pub fn update<S>(&mut self, surface: &S) -> Result<(), FireworksError>
    where
        S: Surface<Texture = T>,
    {
        surface.clear();

        let mut outcome = Ok(());
        for particle in &mut self.particles {
            particle.step();
            let Some(texture) = self.textures.get(particle.texture) else {
                continue;
            };
            if let Err(err) = surface.draw_texture(texture, particle.dest(texture.size())) {
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }

        // Walk backwards so removals never shift an index still to be visited.
        for i in (0..self.particles.len()).rev() {
            if self.particles[i].is_expired() {
                self.particles.remove(i);
            }
        }

        outcome
    }

    #[must_use]
    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    #[must_use]
    pub fn textures(&self) -> &[T] {
        &self.textures
    }

    #[must_use]
    pub fn last_position(&self) -> Point {
        self.last_position
    }
}
