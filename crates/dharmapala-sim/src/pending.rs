//! Per-tick pending-operation queues.
//!
//! Actors mutate only themselves during their own update phase. Every
//! cross-actor mutation — damage, healing, status application, ledger
//! operations, mid-tick spawns — is enqueued here and applied by the
//! damage-resolution phase, so results never depend on iteration order
//! within a phase.

use dharmapala_core::enums::{DefenseKind, EnemyKind};
use dharmapala_core::status::Effect;
use dharmapala_core::types::Position;

/// A damage application queued by the projectile phase (or injected by
/// boss abilities and damage-over-time effects).
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Present when the damage came from a projectile impact.
    pub projectile_id: Option<u32>,
    pub target_id: u32,
    /// Damage before target resistance.
    pub damage: f64,
    /// Kind of the firing defense; drives resistance lookup and on-hit
    /// side effects. None for damage-over-time.
    pub source_kind: Option<DefenseKind>,
    /// Defense credited with experience on a kill.
    pub origin_defense_id: Option<u32>,
    /// Impact point, used for splash lookups.
    pub impact: Position,
}

/// A status application queued against an enemy.
#[derive(Debug, Clone)]
pub struct EnemyEffect {
    pub target_id: u32,
    pub effect: Effect,
}

/// A status application queued against a defense.
#[derive(Debug, Clone)]
pub struct DefenseEffect {
    pub target_id: u32,
    pub effect: Effect,
    /// Enemy-inflicted debuffs are blocked by an active cloak;
    /// friendly buffs never are.
    pub hostile: bool,
}

/// A minion spawn requested by a boss ability.
#[derive(Debug, Clone)]
pub struct MinionSpawn {
    pub kind: EnemyKind,
    pub around: Position,
    pub waypoint_index: usize,
    pub progress: f64,
    pub count: u32,
    pub health: f64,
    pub speed: f64,
}

/// All queues, drained once per tick by the damage-resolution phase.
#[derive(Debug, Default)]
pub struct TickQueue {
    pub hits: Vec<HitRecord>,
    pub heals: Vec<(u32, f64)>,
    pub enemy_effects: Vec<EnemyEffect>,
    pub defense_effects: Vec<DefenseEffect>,
    pub minion_spawns: Vec<MinionSpawn>,
    /// Fractions of the player's ledger stolen by boss abilities.
    pub thefts: Vec<f64>,
}

impl TickQueue {
    pub fn clear(&mut self) {
        self.hits.clear();
        self.heals.clear();
        self.enemy_effects.clear();
        self.defense_effects.clear();
        self.minion_spawns.clear();
        self.thefts.clear();
    }
}
