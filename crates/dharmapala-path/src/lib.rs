//! Procedural path generation for the Dharmapala Shield simulation.
//!
//! A [`Path`] is an ordered polyline in world coordinates, built once per
//! game from `(seed, shape, width, height)` and immutable afterwards. It
//! supplies arc-length parameterized position queries for enemy traversal
//! and perpendicular-distance queries for placement validation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::constants::PATH_HALF_WIDTH;
use dharmapala_core::enums::PathShape;
use dharmapala_core::types::Position;

mod shapes;

#[cfg(test)]
mod tests;

/// Inputs to path generation.
#[derive(Debug, Clone, Copy)]
pub struct PathSpec {
    pub seed: u64,
    pub shape: PathShape,
    pub width: f64,
    pub height: f64,
}

/// An immutable polyline with arc-length bookkeeping.
#[derive(Debug, Clone)]
pub struct Path {
    points: Vec<Position>,
    /// cumulative[i] = arc length from the start to points[i].
    cumulative: Vec<f64>,
    total_length: f64,
}

impl Path {
    /// Generate the path for a game. Degenerate shape output falls back to
    /// a straight line across the middle of the field.
    pub fn generate(spec: &PathSpec) -> Path {
        let mut rng = ChaCha8Rng::seed_from_u64(spec.seed);
        let raw = match spec.shape {
            PathShape::Default => shapes::build_default(&mut rng, spec.width, spec.height),
            PathShape::Spiral => shapes::build_spiral(&mut rng, spec.width, spec.height),
            PathShape::Zigzag => shapes::build_zigzag(&mut rng, spec.width, spec.height),
            PathShape::Loop => shapes::build_loop(&mut rng, spec.width, spec.height),
            PathShape::Cross => shapes::build_cross(&mut rng, spec.width, spec.height),
        };

        Path::from_points(raw)
            .unwrap_or_else(|| Path::fallback(spec.width, spec.height))
    }

    /// Straight line from the middle of the left edge to the middle of the
    /// right edge.
    pub fn fallback(width: f64, height: f64) -> Path {
        let points = vec![
            Position::new(0.0, height / 2.0),
            Position::new(width, height / 2.0),
        ];
        Path::from_points(points).expect("fallback line is non-degenerate")
    }

    /// Validate and wrap a polyline. Consecutive duplicates are dropped;
    /// returns None when fewer than 2 distinct points remain or the total
    /// length is zero.
    pub fn from_points(raw: Vec<Position>) -> Option<Path> {
        let mut points: Vec<Position> = Vec::with_capacity(raw.len());
        for p in raw {
            if !p.x.is_finite() || !p.y.is_finite() {
                return None;
            }
            if points.last().map_or(true, |last: &Position| last.distance_to(&p) > 1e-9) {
                points.push(p);
            }
        }
        if points.len() < 2 {
            return None;
        }

        let mut cumulative = Vec::with_capacity(points.len());
        cumulative.push(0.0);
        let mut total = 0.0;
        for i in 1..points.len() {
            total += points[i - 1].distance_to(&points[i]);
            cumulative.push(total);
        }
        if total <= 0.0 {
            return None;
        }

        Some(Path {
            points,
            cumulative,
            total_length: total,
        })
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn start(&self) -> Position {
        self.points[0]
    }

    pub fn end(&self) -> Position {
        *self.points.last().expect("path has >= 2 points")
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Position and tangent angle at `progress` in [0, 1], linear in arc
    /// length. Input outside the range is clamped.
    pub fn position_at(&self, progress: f64) -> (Position, f64) {
        let target = progress.clamp(0.0, 1.0) * self.total_length;
        let seg = self.segment_at_length(target);
        let seg_start = self.cumulative[seg - 1];
        let seg_len = self.cumulative[seg] - seg_start;
        let t = if seg_len > 0.0 {
            (target - seg_start) / seg_len
        } else {
            0.0
        };

        let a = self.points[seg - 1];
        let b = self.points[seg];
        let pos = Position::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        (pos, a.angle_to(&b))
    }

    /// Index of the waypoint being approached at `progress` (i.e. the end
    /// of the segment containing that arc length). Always >= 1.
    pub fn waypoint_at(&self, progress: f64) -> usize {
        let target = progress.clamp(0.0, 1.0) * self.total_length;
        self.segment_at_length(target)
    }

    /// Progress of an enemy approaching waypoint `next` from `pos`:
    /// the arc length to that waypoint minus the straight-line distance
    /// still to cover, as a fraction of the total.
    pub fn progress_near(&self, next: usize, pos: Position) -> f64 {
        if next >= self.points.len() {
            return 1.0;
        }
        let covered = self.cumulative[next] - pos.distance_to(&self.points[next]);
        (covered / self.total_length).clamp(0.0, 1.0)
    }

    /// Minimum perpendicular distance from `point` to any path segment.
    pub fn distance_to_path(&self, point: Position) -> f64 {
        let mut best = f64::INFINITY;
        for i in 1..self.points.len() {
            let d = segment_distance(self.points[i - 1], self.points[i], point);
            if d < best {
                best = d;
            }
        }
        best
    }

    /// Whether `point` lies within the path corridor.
    pub fn is_on_path(&self, point: Position) -> bool {
        self.distance_to_path(point) <= PATH_HALF_WIDTH
    }

    /// Segment index (end-waypoint index) containing arc length `target`.
    fn segment_at_length(&self, target: f64) -> usize {
        match self.cumulative.binary_search_by(|len| len.total_cmp(&target)) {
            Ok(i) => i.max(1),
            Err(i) => i.min(self.points.len() - 1).max(1),
        }
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(a: Position, b: Position, p: Position) -> f64 {
    let av = glam::DVec2::new(a.x, a.y);
    let bv = glam::DVec2::new(b.x, b.y);
    let pv = glam::DVec2::new(p.x, p.y);
    let ab = bv - av;
    let len_sq = ab.length_squared();
    if len_sq <= 0.0 {
        return pv.distance(av);
    }
    let t = ((pv - av).dot(ab) / len_sq).clamp(0.0, 1.0);
    pv.distance(av + ab * t)
}
