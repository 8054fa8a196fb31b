//! Shared numeric constants for the fireworks crate.

// ── Trail ───────────────────────────────────────────────────────

/// Minimum pointer travel in CSS pixels before another trail particle is emitted.
pub const TRAIL_MIN_DISTANCE_PX: f64 = 1.5;

/// Added to a trail particle's vertical velocity on every tick.
pub const TRAIL_GRAVITY: f64 = 0.02;

/// Shortest trail life span, in ticks.
pub const TRAIL_LIFE_MIN: i32 = 60;

/// Number of distinct life spans above [`TRAIL_LIFE_MIN`] (life is `60..90`).
pub const TRAIL_LIFE_SPREAD: i32 = 30;

/// Largest magnitude of the horizontal drift.
pub const TRAIL_DRIFT_MAX: f64 = 0.5;

/// Slowest initial fall speed.
pub const TRAIL_FALL_MIN: f64 = 0.9;

/// Spread of the initial fall speed above [`TRAIL_FALL_MIN`].
pub const TRAIL_FALL_SPREAD: f64 = 0.7;

// ── Burst ───────────────────────────────────────────────────────

/// Palette alpha bounds for a burst particle.
pub const BURST_ALPHA_MIN: f64 = 0.2;
pub const BURST_ALPHA_MAX: f64 = 0.8;

/// Radius every particle shrinks towards during the outward segment.
pub const BURST_COLLAPSED_RADIUS: f64 = 0.1;

/// Duration bounds of the orbit segment, in milliseconds.
pub const ORBIT_DURATION_MIN_MS: f64 = 1200.0;
pub const ORBIT_DURATION_MAX_MS: f64 = 1800.0;

/// Duration bounds of the opacity fade inside the orbit segment, in milliseconds.
pub const FADE_DURATION_MIN_MS: f64 = 600.0;
pub const FADE_DURATION_MAX_MS: f64 = 800.0;

// ── Overlay ─────────────────────────────────────────────────────

/// Inline style applied to the trail overlay canvas.
pub const OVERLAY_CSS: &str = "position: fixed; top: 0; left: 0; pointer-events: none; z-index: 9999;";
