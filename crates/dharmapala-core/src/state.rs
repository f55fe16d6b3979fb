//! Game state snapshot — the complete visible state built after each tick.

use serde::{Deserialize, Serialize};

use crate::economy::Resources;
use crate::enums::*;
use crate::types::{GridCell, Position, SimTime, Velocity};

/// Complete game state, built read-only from the world. Views are sorted
/// by id so identical simulations serialize identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub resources: Resources,
    pub lives: u32,
    pub wave: u32,
    pub score: u64,
    pub enemies: Vec<EnemyView>,
    pub defenses: Vec<DefenseView>,
    pub projectiles: Vec<ProjectileView>,
    pub wave_state: WaveView,
    pub selected_defense_type: Option<DefenseKind>,
}

/// A visible enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: AttackerKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub progress: f64,
    pub waypoint_index: usize,
    /// Active effects as `(kind, remaining_ms)` pairs.
    pub effects: Vec<(EffectKind, f64)>,
    /// Recent positions for trail rendering.
    pub trail: Vec<Position>,
    pub boss: Option<BossView>,
}

/// Boss extension of an enemy view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub kind: BossKind,
    pub phase: u8,
    pub phases: u8,
    pub shield_active: bool,
    pub shield_health: f64,
    pub shield_max: f64,
}

/// A placed defense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseView {
    pub id: u32,
    pub kind: DefenseKind,
    pub cell: GridCell,
    pub position: Position,
    pub level: u8,
    pub experience: u64,
    pub experience_to_next: u64,
    pub target_id: Option<u32>,
    pub facing: f64,
    pub active: bool,
    pub special_ready: bool,
    pub special_active_ms: f64,
    pub special_cooldown_ms: f64,
    pub effects: Vec<(EffectKind, f64)>,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub kind: ProjectileKind,
    pub position: Position,
    pub velocity: Velocity,
    pub damage: f64,
    pub target_id: Option<u32>,
}

/// Wave scheduler status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub current: u32,
    pub in_progress: bool,
    /// Countdown until the next wave auto-starts, if armed.
    pub next_wave_in_ms: Option<f64>,
    /// Spawns still pending across all groups of the current wave.
    pub pending_spawns: u32,
}
