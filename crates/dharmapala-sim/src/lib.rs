//! Simulation engine for Dharmapala Shield.
//!
//! Owns the hecs ECS world, runs the fixed-order tick pipeline, and
//! produces `GameSnapshot`s and a per-tick event stream. Completely
//! headless; rendering, audio and input live elsewhere.

pub mod achievements;
pub mod engine;
pub mod pending;
pub mod plan;
pub mod save;
pub mod spawn;
pub mod systems;

pub use dharmapala_core as core;
pub use dharmapala_path as path;
pub use engine::{EngineConfig, GameEngine};
