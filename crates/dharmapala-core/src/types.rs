//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in world coordinates (field units, origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking. Milliseconds are the one time unit of the
/// engine; every duration, cooldown and timestamp is `f64` ms.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub now_ms: f64,
}

/// A grid cell address. Defenses occupy whole cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub gx: i32,
    pub gy: i32,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle toward another position in radians (0 = +x, counterclockwise).
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (units/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Heading in radians (0 = +x, counterclockwise).
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl SimTime {
    /// Advance by one tick of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.now_ms += dt_ms;
    }
}

impl GridCell {
    pub fn new(gx: i32, gy: i32) -> Self {
        Self { gx, gy }
    }

    /// World-space center of this cell for the given grid size.
    pub fn center(&self, grid_size: f64) -> Position {
        Position::new(
            self.gx as f64 * grid_size + grid_size / 2.0,
            self.gy as f64 * grid_size + grid_size / 2.0,
        )
    }
}
