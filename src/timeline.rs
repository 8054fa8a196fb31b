//! Declarative tween timelines.
//!
//! A [`Timeline`] is a flat list of [`Track`]s, each describing one property
//! moving to a target value over a window `[offset, offset + duration]` with an
//! easing curve. [`Segment`] groups tracks that share an offset, duration and
//! easing, and lets individual tracks override the latter two.
//!
//! Interpolation always starts from the property's value when the timeline was
//! built. When several started tracks drive the same property, the one declared
//! last wins, so a later segment layered at offset 0 overrides an earlier one
//! for as long as both exist.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use crate::easing::Easing;

/// An animatable particle property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    Radius,
    /// Multiplier applied to the particle's palette alpha.
    Opacity,
}

/// One property tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub property: Property,
    pub to: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    pub offset_ms: f64,
}

impl Track {
    /// Time at which this track reaches its target.
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.offset_ms + self.duration_ms.max(0.0)
    }

    /// Raw progress in `0..=1`, or `None` before the track starts.
    #[must_use]
    pub fn progress(&self, elapsed_ms: f64) -> Option<f64> {
        if elapsed_ms < self.offset_ms {
            return None;
        }
        if self.duration_ms <= 0.0 {
            return Some(1.0);
        }
        Some(((elapsed_ms - self.offset_ms) / self.duration_ms).clamp(0.0, 1.0))
    }

    /// Interpolated value at `elapsed_ms`, starting from `from`.
    #[must_use]
    pub fn sample(&self, from: f64, elapsed_ms: f64) -> Option<f64> {
        let t = self.easing.apply(self.progress(elapsed_ms)?);
        Some(from + (self.to - from) * t)
    }
}

/// Tracks sharing a start offset, duration and easing.
#[derive(Debug, Clone)]
pub struct Segment {
    offset_ms: f64,
    duration_ms: f64,
    easing: Easing,
    tracks: Vec<Track>,
}

impl Segment {
    #[must_use]
    pub fn new(offset_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self { offset_ms, duration_ms, easing, tracks: Vec::new() }
    }

    /// Tween `property` to `to` with the segment's duration and easing.
    #[must_use]
    pub fn tween(self, property: Property, to: f64) -> Self {
        let (duration_ms, easing) = (self.duration_ms, self.easing);
        self.tween_with(property, to, duration_ms, easing)
    }

    /// Tween `property` with its own duration and easing, still starting at the segment offset.
    #[must_use]
    pub fn tween_with(mut self, property: Property, to: f64, duration_ms: f64, easing: Easing) -> Self {
        self.tracks.push(Track { property, to, duration_ms, easing, offset_ms: self.offset_ms });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment's tracks after everything already declared.
    #[must_use]
    pub fn add(mut self, segment: Segment) -> Self {
        self.tracks.extend(segment.tracks);
        self
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Time at which the last track completes.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.tracks.iter().map(Track::end_ms).fold(0.0, f64::max)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms()
    }

    /// Value of `property` at `elapsed_ms`, given its value `from` at build time.
    #[must_use]
    pub fn value(&self, property: Property, from: f64, elapsed_ms: f64) -> f64 {
        self.tracks
            .iter()
            .filter(|track| track.property == property)
            .filter_map(|track| track.sample(from, elapsed_ms))
            .last()
            .unwrap_or(from)
    }
}
