//! Effect configuration: JSON shape, defaults and sanitization.
//!
//! The host passes a plain object with camelCase keys; every key is optional.
//! Keys are read one at a time, so a malformed value only costs that key its
//! override. [`FireworksConfig::sanitized`] turns whatever arrived into a configuration
//! that upholds the invariants the particle systems rely on: ordered ranges,
//! non-empty palettes, a drawable glyph.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::color::Rgba;
use crate::error::FireworksError;

pub const DEFAULT_SELECTOR: &str = "canvas.fireworks";
pub const DEFAULT_PARTICLE_COUNT: usize = 10;
pub const DEFAULT_PARTICLE_SIZE: f64 = 21.0;
pub const DEFAULT_PARTICLE_SYMBOL: &str = "✦";
pub const DEFAULT_TRAIL_COLORS: [&str; 3] = ["#D61C59", "#E7D84B", "#1B8798"];
pub const DEFAULT_BURST_COLORS: [&str; 3] = ["#66A7DD", "#3E83E1", "#214EC2"];

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The same bounds with `min <= max`, or `fallback` if either bound is not finite.
    #[must_use]
    pub fn ordered_or(self, fallback: Range) -> Self {
        if !self.min.is_finite() || !self.max.is_finite() {
            return fallback;
        }
        if self.min <= self.max { self } else { Self { min: self.max, max: self.min } }
    }

    #[cfg(test)]
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Options accepted by `createFireworks`.
#[derive(Debug, Clone, PartialEq)]
pub struct FireworksConfig {
    /// CSS selector of the primary canvas.
    pub selector: String,
    /// Particles spawned per burst.
    pub number_of_particles: usize,
    /// Initial burst particle radius.
    pub circle_radius: Range,
    /// Distance a burst particle travels in the outward segment.
    pub diffuse_radius: Range,
    /// Radius a burst particle expands to in the orbit segment.
    pub orbit_radius: Range,
    /// Outward segment duration in milliseconds.
    pub anime_duration: Range,
    /// Trail glyph colors, any CSS color string.
    pub particle_colors: Vec<String>,
    /// Trail glyph font size in CSS pixels.
    pub particle_size: f64,
    /// Trail glyph.
    pub particle_symbol: String,
    pub enable_particle_trail: bool,
    /// Burst palette; empty means the built-in blues.
    pub colors: Vec<String>,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_owned(),
            number_of_particles: DEFAULT_PARTICLE_COUNT,
            circle_radius: Range::new(5.0, 10.0),
            diffuse_radius: Range::new(20.0, 40.0),
            orbit_radius: Range::new(20.0, 40.0),
            anime_duration: Range::new(500.0, 1500.0),
            particle_colors: DEFAULT_TRAIL_COLORS.iter().map(|c| (*c).to_owned()).collect(),
            particle_size: DEFAULT_PARTICLE_SIZE,
            particle_symbol: DEFAULT_PARTICLE_SYMBOL.to_owned(),
            enable_particle_trail: true,
            colors: Vec::new(),
        }
    }
}

impl<'de> Deserialize<'de> for FireworksConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl FireworksConfig {
    /// Parse a JSON object; `null` yields the defaults.
    ///
    /// A key whose value has the wrong shape keeps its default and logs a
    /// warning. Fractional particle counts are floored.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::Config`] if the text is not valid JSON.
    pub fn from_json(raw: &str) -> Result<Self, FireworksError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Overlay the keys of a JSON object onto the defaults.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::default();
        let Some(fields) = value.as_object() else {
            if !value.is_null() {
                log::warn!("fireworks config is not an object, using defaults");
            }
            return config;
        };

        read_field(fields, "selector", &mut config.selector);
        read_count(fields, "numberOfParticles", &mut config.number_of_particles);
        read_range(fields, "circleRadius", &mut config.circle_radius);
        read_range(fields, "diffuseRadius", &mut config.diffuse_radius);
        read_range(fields, "orbitRadius", &mut config.orbit_radius);
        read_range(fields, "animeDuration", &mut config.anime_duration);
        read_strings(fields, "particleColors", &mut config.particle_colors);
        read_field(fields, "particleSize", &mut config.particle_size);
        read_field(fields, "particleSymbol", &mut config.particle_symbol);
        read_field(fields, "enableParticleTrail", &mut config.enable_particle_trail);
        read_strings(fields, "colors", &mut config.colors);
        config
    }

    /// Resolve defaults and enforce invariants.
    #[must_use]
    pub fn sanitized(self) -> Settings {
        let defaults = Self::default();

        let selector = if self.selector.trim().is_empty() { defaults.selector } else { self.selector };

        let particle_colors = self
            .particle_colors
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .collect::<Vec<_>>();
        let particle_colors = if particle_colors.is_empty() { defaults.particle_colors } else { particle_colors };

        let mut burst_colors = Vec::with_capacity(self.colors.len());
        for raw in &self.colors {
            match Rgba::parse(raw) {
                Some(color) => burst_colors.push(color),
                None => log::warn!("ignoring unparseable burst color {raw:?}"),
            }
        }
        if burst_colors.is_empty() {
            burst_colors = default_burst_palette();
        }

        let particle_size = if self.particle_size.is_finite() && self.particle_size > 0.0 {
            self.particle_size
        } else {
            defaults.particle_size
        };
        let particle_symbol =
            if self.particle_symbol.is_empty() { defaults.particle_symbol } else { self.particle_symbol };

        Settings {
            selector,
            number_of_particles: self.number_of_particles,
            circle_radius: self.circle_radius.ordered_or(defaults.circle_radius),
            diffuse_radius: self.diffuse_radius.ordered_or(defaults.diffuse_radius),
            orbit_radius: self.orbit_radius.ordered_or(defaults.orbit_radius),
            anime_duration: self.anime_duration.ordered_or(defaults.anime_duration),
            particle_colors,
            particle_size,
            particle_symbol,
            enable_particle_trail: self.enable_particle_trail,
            burst_colors,
        }
    }
}

/// The value under `key`, treating `null` as absent.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn read_field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(value) = present(fields, key) else {
        return;
    };
    match T::deserialize(value) {
        Ok(parsed) => *slot = parsed,
        Err(err) => log::warn!("fireworks config {key} ignored: {err}"),
    }
}

fn read_count(fields: &Map<String, Value>, key: &str, slot: &mut usize) {
    let Some(value) = present(fields, key) else {
        return;
    };
    match value.as_f64() {
        Some(count) if count.is_finite() => *slot = floor_count(count),
        _ => log::warn!("fireworks config {key} ignored: expected a number, got {value}"),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_count(count: f64) -> usize {
    count.max(0.0).floor() as usize
}

/// A missing or non-numeric bound keeps the current one.
fn read_range(fields: &Map<String, Value>, key: &str, slot: &mut Range) {
    let Some(value) = present(fields, key) else {
        return;
    };
    let Some(bounds) = value.as_object() else {
        log::warn!("fireworks config {key} ignored: expected {{min, max}}, got {value}");
        return;
    };
    if let Some(min) = bounds.get("min").and_then(Value::as_f64) {
        slot.min = min;
    }
    if let Some(max) = bounds.get("max").and_then(Value::as_f64) {
        slot.max = max;
    }
}

/// Non-string entries are skipped.
fn read_strings(fields: &Map<String, Value>, key: &str, slot: &mut Vec<String>) {
    let Some(value) = present(fields, key) else {
        return;
    };
    let Some(items) = value.as_array() else {
        log::warn!("fireworks config {key} ignored: expected an array, got {value}");
        return;
    };
    *slot = items.iter().filter_map(Value::as_str).map(str::to_owned).collect();
}

fn default_burst_palette() -> Vec<Rgba> {
    DEFAULT_BURST_COLORS.iter().filter_map(|c| Rgba::parse(c)).collect()
}

/// A sanitized, immutable configuration owned by one installed effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub selector: String,
    pub number_of_particles: usize,
    pub circle_radius: Range,
    pub diffuse_radius: Range,
    pub orbit_radius: Range,
    pub anime_duration: Range,
    pub particle_colors: Vec<String>,
    pub particle_size: f64,
    pub particle_symbol: String,
    pub enable_particle_trail: bool,
    /// Never empty.
    pub burst_colors: Vec<Rgba>,
}

impl Default for Settings {
    fn default() -> Self {
        FireworksConfig::default().sanitized()
    }
}
