//! Shape builders: raw waypoint construction per path shape.
//!
//! Each builder returns a raw polyline; validation and fallback live in
//! the crate root. All randomness comes from the caller's seeded RNG.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::types::Position;

/// Control points spanning the field, smoothed by quadratic Bézier
/// interpolation. The workhorse shape.
pub fn build_default(rng: &mut ChaCha8Rng, width: f64, height: f64) -> Vec<Position> {
    const CONTROL_POINTS: usize = 6;
    const SAMPLES_PER_SEGMENT: usize = 10;

    let mid = height / 2.0;
    let jitter = height / 4.0;

    let mut controls: Vec<DVec2> = Vec::with_capacity(CONTROL_POINTS);
    for i in 0..CONTROL_POINTS {
        let x = width * i as f64 / (CONTROL_POINTS - 1) as f64;
        let y = if i == 0 || i == CONTROL_POINTS - 1 {
            mid
        } else {
            (mid + rng.gen_range(-jitter..jitter)).clamp(height * 0.1, height * 0.9)
        };
        controls.push(DVec2::new(x, y));
    }

    // Quadratic Bézier through each interior control point, anchored at
    // the midpoints of the adjacent segments.
    let mut out: Vec<Position> = vec![to_position(controls[0])];
    for i in 1..CONTROL_POINTS - 1 {
        let p0 = if i == 1 {
            controls[0]
        } else {
            controls[i - 1].midpoint(controls[i])
        };
        let p2 = if i == CONTROL_POINTS - 2 {
            controls[i + 1]
        } else {
            controls[i].midpoint(controls[i + 1])
        };
        for s in 1..=SAMPLES_PER_SEGMENT {
            let t = s as f64 / SAMPLES_PER_SEGMENT as f64;
            out.push(to_position(bezier(p0, controls[i], p2, t)));
        }
    }
    out
}

/// Inward angular sweep around the field center, then an exit east.
pub fn build_spiral(rng: &mut ChaCha8Rng, width: f64, height: f64) -> Vec<Position> {
    const TURNS: f64 = 2.25;
    const SAMPLES: usize = 48;

    let center = DVec2::new(width / 2.0, height / 2.0);
    let start_radius = width.min(height) / 2.0 * 0.9;
    let end_radius = width.min(height) * 0.08;
    let phase = rng.gen_range(-0.2..0.2);

    let mut out = vec![Position::new(0.0, height / 2.0)];
    for i in 0..=SAMPLES {
        let t = i as f64 / SAMPLES as f64;
        let angle = std::f64::consts::PI + phase + t * TURNS * std::f64::consts::TAU;
        let radius = start_radius + (end_radius - start_radius) * t;
        out.push(to_position(
            center + DVec2::new(angle.cos(), angle.sin()) * radius,
        ));
    }
    out.push(Position::new(width, height / 2.0));
    out
}

/// Alternating high/low waypoints, monotonic in x.
pub fn build_zigzag(rng: &mut ChaCha8Rng, width: f64, height: f64) -> Vec<Position> {
    const LEGS: usize = 7;

    let high = height * 0.2;
    let low = height * 0.8;

    let mut out = vec![Position::new(0.0, height / 2.0)];
    for i in 1..LEGS {
        let x = width * i as f64 / LEGS as f64;
        let base = if i % 2 == 1 { high } else { low };
        let y = (base + rng.gen_range(-height * 0.05..height * 0.05))
            .clamp(height * 0.1, height * 0.9);
        out.push(Position::new(x, y));
    }
    out.push(Position::new(width, height / 2.0));
    out
}

/// A straight run with a full circular loop mid-field.
pub fn build_loop(rng: &mut ChaCha8Rng, width: f64, height: f64) -> Vec<Position> {
    const SAMPLES: usize = 16;

    let radius = width.min(height) / 4.0 * rng.gen_range(0.9..1.1);
    let center = DVec2::new(width / 2.0, height / 2.0);
    let entry = center - DVec2::new(radius, 0.0);

    let mut out = vec![Position::new(0.0, height / 2.0), to_position(entry)];
    for i in 1..=SAMPLES {
        let angle = std::f64::consts::PI + i as f64 / SAMPLES as f64 * std::f64::consts::TAU;
        out.push(to_position(
            center + DVec2::new(angle.cos(), angle.sin()) * radius,
        ));
    }
    out.push(Position::new(width, height / 2.0));
    out
}

/// A horizontal run with a vertical detour crossing the field center.
pub fn build_cross(rng: &mut ChaCha8Rng, width: f64, height: f64) -> Vec<Position> {
    let top = height * rng.gen_range(0.15..0.25);
    let bottom = height * rng.gen_range(0.75..0.85);
    let mid = height / 2.0;

    vec![
        Position::new(0.0, mid),
        Position::new(width * 0.4, mid),
        Position::new(width * 0.5, top),
        Position::new(width * 0.5, bottom),
        Position::new(width * 0.6, mid),
        Position::new(width, mid),
    ]
}

fn bezier(p0: DVec2, p1: DVec2, p2: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn to_position(v: DVec2) -> Position {
    Position::new(v.x, v.y)
}
