//! ECS components for hecs entities.
//!
//! Components are plain data structs with no simulation logic; systems in
//! the engine crate drive them. Cross-entity references use stable actor
//! ids (`u32`), resolved through the engine's id index — a missing id
//! means the referenced actor is gone and reads as "no target".

use serde::{Deserialize, Serialize};

use crate::constants::{EXPERIENCE_PER_LEVEL, MIN_FIRE_RATE_MS};
use crate::economy::Resources;
use crate::enums::{AttackerKind, BossKind, DefenseKind, EffectKind};
use crate::status::StatusEffects;
use crate::types::{GridCell, Position};

/// Marks an entity as an attacker following the path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks an entity as a placed defense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Defense;

/// Marks an entity as a projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Damage multiplier per attacking defense kind. 1.0 = full damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Resistances([f64; 6]);

impl Default for Resistances {
    fn default() -> Self {
        Self([1.0; 6])
    }
}

impl Resistances {
    pub fn factor(&self, source: DefenseKind) -> f64 {
        self.0[source.index()]
    }

    pub fn set(&mut self, source: DefenseKind, factor: f64) {
        self.0[source.index()] = factor;
    }
}

/// Attacker state: path traversal, health, reward, lifecycle flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyState {
    pub id: u32,
    pub kind: AttackerKind,
    pub health: f64,
    pub max_health: f64,
    /// Unmodified speed in units/s; effects and passives multiply it.
    pub base_speed: f64,
    /// Collision radius (half the nominal size).
    pub radius: f64,
    pub reward: Resources,
    pub resistances: Resistances,
    /// Index of the waypoint currently being approached. Monotonic.
    pub waypoint_index: usize,
    /// Fraction of total path arc length covered, in [0, 1]. Monotonic.
    pub progress: f64,
    /// Lives lost if this enemy reaches the path end.
    pub end_damage: u32,
    pub dead: bool,
    pub reached_end: bool,
}

/// Shield carried by some bosses. Depletes before hull damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shield {
    pub active: bool,
    pub health: f64,
    pub max_health: f64,
}

/// Boss extension carried alongside [`EnemyState`] on boss entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossState {
    pub kind: BossKind,
    pub phases: u8,
    /// Starts at 1, monotonically non-decreasing, never exceeds `phases`.
    pub current_phase: u8,
    pub shield: Option<Shield>,
    /// Countdown to the next minion spawn (raidTeam).
    pub minion_timer_ms: f64,
    /// Countdown to the next EMP blast (raidTeam).
    pub blast_timer_ms: f64,
    /// Countdown to the next shield regeneration (megaCorpTitan).
    pub regen_timer_ms: f64,
}

/// Placed defense state: grid anchor, level, base stats, firing bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseState {
    pub id: u32,
    pub kind: DefenseKind,
    pub cell: GridCell,
    /// 1..=5.
    pub level: u8,
    pub experience: u64,
    /// Base stats copied from the kind table at placement.
    pub damage: f64,
    pub range: f64,
    pub fire_rate_ms: f64,
    pub projectile_speed: f64,
    /// Total cost sunk into this defense (placement + upgrades).
    pub invested: Resources,
    /// Currently bound target's enemy id, if any.
    pub target_id: Option<u32>,
    /// Facing angle in radians, toward the last target.
    pub facing: f64,
    /// Timestamp of the last shot; `None` until the first.
    pub last_fire_ms: Option<f64>,
    /// Remaining special-ability cooldown.
    pub special_cooldown_ms: f64,
    /// Remaining special-ability active window.
    pub special_active_ms: f64,
    /// Permanently disabled by corruption.
    pub corrupted: bool,
}

impl DefenseState {
    /// Whether this defense may target and fire right now.
    pub fn is_active(&self, fx: &StatusEffects) -> bool {
        !self.corrupted && !fx.has(EffectKind::Emp)
    }

    pub fn effective_damage(&self, fx: &StatusEffects) -> f64 {
        let boosted = if fx.has(EffectKind::Boosted) { 1.5 } else { 1.0 };
        let weakened = if fx.has(EffectKind::Weakened) { 0.7 } else { 1.0 };
        (self.damage * (1.0 + 0.2 * self.level as f64) * boosted * weakened).floor()
    }

    pub fn effective_range(&self, fx: &StatusEffects) -> f64 {
        let boosted = if fx.has(EffectKind::Boosted) { 1.2 } else { 1.0 };
        let blinded = if fx.has(EffectKind::Blinded) { 0.8 } else { 1.0 };
        self.range * (1.0 + 0.1 * self.level as f64) * boosted * blinded
    }

    pub fn effective_fire_rate_ms(&self, fx: &StatusEffects) -> f64 {
        let boosted = if fx.has(EffectKind::Boosted) { 0.7 } else { 1.0 };
        let slowed = if fx.has(EffectKind::Slowed) { 1.3 } else { 1.0 };
        (self.fire_rate_ms * (1.0 - 0.1 * self.level as f64) * boosted * slowed)
            .max(MIN_FIRE_RATE_MS)
    }

    pub fn effective_projectile_speed(&self, fx: &StatusEffects) -> f64 {
        let boosted = if fx.has(EffectKind::Boosted) { 1.3 } else { 1.0 };
        self.projectile_speed * boosted
    }

    pub fn experience_to_next(&self) -> u64 {
        EXPERIENCE_PER_LEVEL * self.level as u64
    }
}

/// Projectile state: damage payload, targeting handles, pierce bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileState {
    pub id: u32,
    pub kind: crate::enums::ProjectileKind,
    /// Kind of the defense that fired it; drives on-hit side effects.
    pub source_kind: DefenseKind,
    pub damage: f64,
    pub radius: f64,
    /// Flight speed in units/s.
    pub speed: f64,
    /// Id of the defense that fired this projectile.
    pub origin_id: u32,
    /// Current target's enemy id; cleared when the target dies.
    pub target_id: Option<u32>,
    /// Enemy ids already damaged (piercing hits each at most once).
    pub hit_ids: Vec<u32>,
    /// Remaining target-less flight time before expiry.
    pub wander_ms: f64,
}

/// Bounded ring of recent positions for trail rendering. Visual only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    /// Recent positions, newest first.
    pub positions: Vec<Position>,
}

impl Trail {
    pub fn record(&mut self, pos: Position, capacity: usize) {
        self.positions.insert(0, pos);
        self.positions.truncate(capacity);
    }
}
