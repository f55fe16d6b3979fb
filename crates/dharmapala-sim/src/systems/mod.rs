//! Simulation systems, run in fixed order each tick.

pub mod boss;
pub mod cleanup;
pub mod damage;
pub mod defense;
pub mod enemy;
pub mod projectile;
pub mod snapshot;
pub mod status;
pub mod wave;

use hecs::World;

use dharmapala_core::components::{Defense, DefenseState, Enemy, EnemyState};
use dharmapala_core::enums::{AttackerKind, DefenseKind, EffectKind};
use dharmapala_core::status::StatusEffects;
use dharmapala_core::types::{Position, Velocity};
use dharmapala_path::Path;

/// Per-phase view of a live enemy, captured once and shared so the phase
/// does not depend on world iteration order.
#[derive(Debug, Clone)]
pub struct EnemyRef {
    pub entity: hecs::Entity,
    pub id: u32,
    pub kind: AttackerKind,
    pub position: Position,
    pub radius: f64,
    pub health: f64,
    pub max_health: f64,
    pub progress: f64,
    /// Current effective speed, after status and passive modifiers.
    pub speed: f64,
    /// Velocity estimate along the path tangent, for lead aiming.
    pub velocity: Velocity,
    pub reward_dharma: u64,
    pub stealthed: bool,
}

/// Per-phase view of a placed defense.
#[derive(Debug, Clone)]
pub struct DefenseSite {
    pub entity: hecs::Entity,
    pub id: u32,
    pub kind: DefenseKind,
    pub position: Position,
}

/// Collect all live enemies, sorted by id.
pub fn collect_enemies(world: &World, path: &Path, sites: &[DefenseSite]) -> Vec<EnemyRef> {
    let mut refs: Vec<EnemyRef> = world
        .query::<(&Enemy, &EnemyState, &Position, &StatusEffects)>()
        .iter()
        .filter(|(_, (_, st, _, _))| !st.dead && !st.reached_end)
        .map(|(entity, (_, st, pos, fx))| {
            let speed = enemy::effective_speed(st, fx, pos, sites);
            let (_, tangent) = path.position_at(st.progress);
            EnemyRef {
                entity,
                id: st.id,
                kind: st.kind,
                position: *pos,
                radius: st.radius,
                health: st.health,
                max_health: st.max_health,
                progress: st.progress,
                speed,
                velocity: Velocity::new(tangent.cos() * speed, tangent.sin() * speed),
                reward_dharma: st.reward.dharma,
                stealthed: fx.has(EffectKind::Stealthed),
            }
        })
        .collect();
    refs.sort_by_key(|r| r.id);
    refs
}

/// Collect all placed defenses, sorted by id.
pub fn collect_defenses(world: &World) -> Vec<DefenseSite> {
    let mut sites: Vec<DefenseSite> = world
        .query::<(&Defense, &DefenseState, &Position)>()
        .iter()
        .map(|(entity, (_, st, pos))| DefenseSite {
            entity,
            id: st.id,
            kind: st.kind,
            position: *pos,
        })
        .collect();
    sites.sort_by_key(|s| s.id);
    sites
}
