#![allow(clippy::float_cmp)]

use super::*;
use crate::fake::FakeSurface;
use crate::random::{RngSampler, Sequence};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Heading / timings
// =============================================================

#[test]
fn heading_coin_flips_the_sign() {
    let diffuse = Range::new(20.0, 40.0);
    let plus = Heading::sample(diffuse, &mut Sequence::new(vec![0.25, 0.5, 0.9]));
    assert_eq!(plus.angle_deg, 90.0);
    assert_eq!(plus.magnitude, 30.0);
    let minus = Heading::sample(diffuse, &mut Sequence::new(vec![0.25, 0.5, 0.1]));
    assert_eq!(minus.magnitude, -30.0);
}

#[test]
fn heading_end_is_magnitude_away() {
    let heading = Heading { angle_deg: 0.0, magnitude: -25.0 };
    let end = heading.end_from(Point::new(100.0, 100.0));
    assert!(close(end.x, 75.0));
    assert!(close(end.y, 100.0));
}

#[test]
fn timings_sample_configured_and_fixed_ranges() {
    let timings = BurstTimings::sample(&Settings::default(), &mut Sequence::constant(0.5));
    assert_eq!(timings.outward_ms, 1000.0);
    assert_eq!(timings.orbit_radius, 30.0);
    assert_eq!(timings.fade_ms, 700.0);
    assert_eq!(timings.orbit_ms, 1500.0);
}

#[test]
fn timeline_has_outward_then_orbit_tracks() {
    let timings = BurstTimings { outward_ms: 1000.0, orbit_radius: 30.0, fade_ms: 700.0, orbit_ms: 1500.0 };
    let timeline = timings.timeline(Point::new(50.0, 60.0));
    let tracks = timeline.tracks();
    assert_eq!(tracks.len(), 5);
    assert!(tracks.iter().all(|t| t.offset_ms == 0.0));
    assert_eq!(tracks[2].property, Property::Radius);
    assert_eq!(tracks[2].to, BURST_COLLAPSED_RADIUS);
    assert_eq!(tracks[3].property, Property::Radius);
    assert_eq!(tracks[3].to, 30.0);
    assert_eq!(tracks[4].property, Property::Opacity);
    assert_eq!(tracks[4].easing, Easing::Linear);
    assert_eq!(tracks[4].duration_ms, 700.0);
    assert_eq!(timeline.duration_ms(), 1500.0);
}

// =============================================================
// Burst
// =============================================================

#[test]
fn spawn_creates_configured_particle_count() {
    let settings = Settings { number_of_particles: 7, ..Settings::default() };
    let burst = Burst::spawn(Point::new(10.0, 10.0), &settings, &mut RngSampler::seeded(3));
    assert_eq!(burst.particles().len(), 7);
}

#[test]
fn particles_share_the_burst_timings() {
    let burst = Burst::spawn(Point::default(), &Settings::default(), &mut RngSampler::seeded(7));
    let timings = burst.timings();
    assert!((FADE_DURATION_MIN_MS..FADE_DURATION_MAX_MS).contains(&timings.fade_ms));
    assert!((ORBIT_DURATION_MIN_MS..ORBIT_DURATION_MAX_MS).contains(&timings.orbit_ms));
    for p in burst.particles() {
        assert_eq!(p.timeline().tracks(), timings.timeline(p.end).tracks());
    }
}

#[test]
fn zero_particles_spawns_an_empty_burst() {
    let settings = Settings { number_of_particles: 0, ..Settings::default() };
    let burst = Burst::spawn(Point::default(), &settings, &mut Sequence::constant(0.5));
    assert!(burst.particles().is_empty());
}

#[test]
fn particles_respect_configured_ranges() {
    let settings = Settings::default();
    let origin = Point::new(200.0, 150.0);
    let burst = Burst::spawn(origin, &settings, &mut RngSampler::seeded(11));
    for p in burst.particles() {
        assert!(settings.circle_radius.contains(p.start_radius));
        assert!((BURST_ALPHA_MIN..=BURST_ALPHA_MAX).contains(&p.color.a));
        assert!((0.0..360.0).contains(&p.heading.angle_deg));
        let travel = origin.distance(p.end);
        assert!(close(travel, p.heading.magnitude.abs()));
        assert!(travel >= 20.0 - 1e-9 && travel <= 40.0 + 1e-9);
        assert!(settings.burst_colors.iter().any(|c| (c.r, c.g, c.b) == (p.color.r, p.color.g, p.color.b)));
    }
}

#[test]
fn custom_palette_replaces_defaults() {
    let settings = Settings { burst_colors: vec![Rgba::opaque(0, 0, 0)], ..Settings::default() };
    let surface = FakeSurface::new();
    let mut burst = Burst::spawn(Point::new(50.0, 50.0), &settings, &mut RngSampler::seeded(5));
    burst.advance(0.0);
    burst.draw(&surface).expect("draw");
    let circles = surface.circles();
    assert_eq!(circles.len(), 10);
    assert!(circles.iter().all(|(_, _, color)| color.starts_with("rgba(0, 0, 0,")));
}

#[test]
fn first_advance_pins_start_time() {
    let settings = Settings::default();
    let origin = Point::new(100.0, 100.0);
    let mut burst = Burst::spawn(origin, &settings, &mut Sequence::constant(0.5));

    assert!(!burst.advance(5_000.0));
    let p = &burst.particles()[0];
    assert_eq!(p.position, origin);
    assert_eq!(p.radius, 7.5);
    assert_eq!(p.opacity, 1.0);
    assert!(close(p.fill().a, 0.5));
}

#[test]
fn particles_reach_their_targets_at_the_end() {
    let settings = Settings::default();
    let origin = Point::new(100.0, 100.0);
    let mut burst = Burst::spawn(origin, &settings, &mut Sequence::constant(0.5));

    burst.advance(1_000.0);
    assert!(burst.advance(2_500.0));
    assert!(burst.is_finished());
    let p = &burst.particles()[0];
    assert!(close(p.position.x, p.end.x));
    assert!(close(p.position.y, p.end.y));
    assert!(close(p.radius, 30.0));
    assert_eq!(p.opacity, 0.0);
    assert_eq!(p.fill().a, 0.0);
}

#[test]
fn opacity_fades_before_the_orbit_ends() {
    let mut burst = Burst::spawn(Point::default(), &Settings::default(), &mut Sequence::constant(0.5));
    burst.advance(0.0);
    assert!(!burst.advance(700.0));
    assert_eq!(burst.particles()[0].opacity, 0.0);
}

#[test]
fn draw_reports_failure_after_drawing_the_rest() {
    let surface = FakeSurface::new();
    surface.fail_draws.set(true);
    let burst = Burst::spawn(Point::default(), &Settings::default(), &mut Sequence::constant(0.5));
    assert!(burst.draw(&surface).is_err());
}

// =============================================================
// BurstField
// =============================================================

#[test]
fn field_drops_finished_bursts() {
    let settings = Settings::default();
    let surface = FakeSurface::new();
    let mut field = BurstField::new();
    field.spawn(Point::default(), &settings, &mut Sequence::constant(0.5));

    field.frame(&surface, 0.0).expect("frame");
    assert_eq!(field.bursts().len(), 1);
    assert_eq!(surface.circles().len(), 10);

    field.frame(&surface, 1_499.0).expect("frame");
    assert_eq!(field.bursts().len(), 1);

    field.frame(&surface, 1_500.0).expect("frame");
    assert!(field.is_empty());
}

#[test]
fn field_bursts_keep_their_own_clocks() {
    let settings = Settings::default();
    let surface = FakeSurface::new();
    let mut field = BurstField::new();
    field.spawn(Point::default(), &settings, &mut Sequence::constant(0.5));
    field.frame(&surface, 0.0).expect("frame");

    field.spawn(Point::new(300.0, 300.0), &settings, &mut Sequence::constant(0.5));
    field.frame(&surface, 1_000.0).expect("frame");
    assert_eq!(field.bursts().len(), 2);

    field.frame(&surface, 1_600.0).expect("frame");
    assert_eq!(field.bursts().len(), 1);
    assert_eq!(field.bursts()[0].particles()[0].origin, Point::new(300.0, 300.0));
}
