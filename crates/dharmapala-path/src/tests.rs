use dharmapala_core::enums::PathShape;
use dharmapala_core::types::Position;

use crate::{Path, PathSpec};

fn spec(seed: u64, shape: PathShape) -> PathSpec {
    PathSpec {
        seed,
        shape,
        width: 800.0,
        height: 600.0,
    }
}

const ALL_SHAPES: [PathShape; 5] = [
    PathShape::Default,
    PathShape::Spiral,
    PathShape::Zigzag,
    PathShape::Loop,
    PathShape::Cross,
];

#[test]
fn every_shape_produces_valid_polyline() {
    for shape in ALL_SHAPES {
        let path = Path::generate(&spec(42, shape));
        assert!(path.points().len() >= 2, "{shape:?} too short");
        assert!(path.total_length() > 0.0, "{shape:?} has no length");

        // Consecutive points distinct.
        let pts = path.points();
        for i in 1..pts.len() {
            assert!(
                pts[i - 1].distance_to(&pts[i]) > 0.0,
                "{shape:?} has duplicate consecutive points at {i}"
            );
        }
    }
}

#[test]
fn endpoints_are_on_path() {
    for shape in ALL_SHAPES {
        let path = Path::generate(&spec(7, shape));
        assert!(path.is_on_path(path.start()), "{shape:?} start off-path");
        assert!(path.is_on_path(path.end()), "{shape:?} end off-path");
    }
}

#[test]
fn generation_is_deterministic() {
    for shape in ALL_SHAPES {
        let a = Path::generate(&spec(123, shape));
        let b = Path::generate(&spec(123, shape));
        assert_eq!(a.points(), b.points(), "{shape:?} diverged for same seed");
    }
}

#[test]
fn different_seeds_jitter_the_default_shape() {
    let a = Path::generate(&spec(1, PathShape::Default));
    let b = Path::generate(&spec(2, PathShape::Default));
    assert_ne!(a.points(), b.points());
}

#[test]
fn position_at_interpolates_linearly() {
    let path = Path::fallback(800.0, 600.0);
    let (start, _) = path.position_at(0.0);
    assert_eq!(start, Position::new(0.0, 300.0));
    let (mid, tangent) = path.position_at(0.5);
    assert_eq!(mid, Position::new(400.0, 300.0));
    assert!(tangent.abs() < 1e-12, "straight east tangent should be 0");
    let (end, _) = path.position_at(1.0);
    assert_eq!(end, Position::new(800.0, 300.0));

    // Out-of-range progress clamps.
    let (clamped, _) = path.position_at(2.0);
    assert_eq!(clamped, Position::new(800.0, 300.0));
}

#[test]
fn distance_to_path_measures_perpendicular() {
    let path = Path::fallback(800.0, 600.0);
    assert_eq!(path.distance_to_path(Position::new(400.0, 300.0)), 0.0);
    assert_eq!(path.distance_to_path(Position::new(400.0, 350.0)), 50.0);
    // Beyond an endpoint the distance is to the endpoint itself.
    let d = path.distance_to_path(Position::new(-30.0, 340.0));
    assert!((d - 50.0).abs() < 1e-9);
}

#[test]
fn is_on_path_uses_half_width() {
    let path = Path::fallback(800.0, 600.0);
    assert!(path.is_on_path(Position::new(100.0, 310.0)));
    assert!(path.is_on_path(Position::new(100.0, 320.0)));
    assert!(!path.is_on_path(Position::new(100.0, 321.0)));
}

#[test]
fn progress_near_tracks_waypoint_approach() {
    let path = Path::fallback(800.0, 600.0);
    // Standing at the start, approaching waypoint 1: nothing covered yet.
    assert_eq!(path.progress_near(1, Position::new(0.0, 300.0)), 0.0);
    // Halfway along.
    assert_eq!(path.progress_near(1, Position::new(400.0, 300.0)), 0.5);
    // Past the last waypoint index.
    assert_eq!(path.progress_near(2, Position::new(800.0, 300.0)), 1.0);
}

#[test]
fn waypoint_at_is_monotonic_in_progress() {
    let path = Path::generate(&spec(9, PathShape::Zigzag));
    let mut last = 0;
    for i in 0..=100 {
        let wp = path.waypoint_at(i as f64 / 100.0);
        assert!(wp >= last, "waypoint index went backwards");
        last = wp;
    }
    assert_eq!(path.waypoint_at(1.0), path.points().len() - 1);
}

#[test]
fn degenerate_points_fall_back_to_straight_line() {
    // All-identical points collapse to fewer than 2 distinct ones.
    let raw = vec![Position::new(5.0, 5.0); 4];
    assert!(Path::from_points(raw).is_none());

    let fallback = Path::fallback(800.0, 600.0);
    assert_eq!(fallback.points().len(), 2);
    assert_eq!(fallback.start(), Position::new(0.0, 300.0));
    assert_eq!(fallback.end(), Position::new(800.0, 300.0));
}

#[test]
fn monotonic_x_for_linear_shapes() {
    for shape in [PathShape::Default, PathShape::Zigzag] {
        let path = Path::generate(&spec(5, shape));
        let pts = path.points();
        for i in 1..pts.len() {
            assert!(
                pts[i].x >= pts[i - 1].x - 1e-9,
                "{shape:?} should be monotonic in x"
            );
        }
    }
}
