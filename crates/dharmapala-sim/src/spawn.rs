//! Entity spawn factories.
//!
//! Assembles component bundles for enemies, bosses, defenses, and
//! projectiles. Id allocation and event emission stay with the caller.

use hecs::World;

use dharmapala_core::components::*;
use dharmapala_core::constants::*;
use dharmapala_core::economy::Resources;
use dharmapala_core::enums::{BossKind, DefenseKind, EnemyKind, ProjectileKind};
use dharmapala_core::status::StatusEffects;
use dharmapala_core::types::{GridCell, Position, Velocity};
use dharmapala_path::Path;

/// Spawn a regular enemy at the path start.
pub fn spawn_enemy(
    world: &mut World,
    path: &Path,
    id: u32,
    kind: EnemyKind,
    health_multiplier: f64,
) -> hecs::Entity {
    let base = enemy_base(kind);
    let state = EnemyState {
        id,
        kind: kind.into(),
        health: base.health * health_multiplier,
        max_health: base.health * health_multiplier,
        base_speed: base.speed,
        radius: base.size / 2.0,
        reward: base.reward,
        resistances: Resistances::default(),
        waypoint_index: 1,
        progress: 0.0,
        end_damage: 1,
        dead: false,
        reached_end: false,
    };
    world.spawn((
        Enemy,
        state,
        path.start(),
        StatusEffects::new(),
        Trail::default(),
    ))
}

/// Spawn a boss at the path start: an enemy entity with a BossState
/// extension. The megaCorpTitan starts with a full active shield.
pub fn spawn_boss(world: &mut World, path: &Path, id: u32, kind: BossKind) -> hecs::Entity {
    let base = boss_base(kind);
    let state = EnemyState {
        id,
        kind: kind.into(),
        health: base.health,
        max_health: base.health,
        base_speed: base.speed,
        radius: base.size / 2.0,
        reward: base.reward,
        resistances: Resistances::default(),
        waypoint_index: 1,
        progress: 0.0,
        end_damage: 5,
        dead: false,
        reached_end: false,
    };
    let boss = BossState {
        kind,
        phases: base.phases,
        current_phase: 1,
        shield: match kind {
            BossKind::MegaCorpTitan => Some(Shield {
                active: true,
                health: TITAN_SHIELD_MAX,
                max_health: TITAN_SHIELD_MAX,
            }),
            BossKind::RaidTeam => None,
        },
        minion_timer_ms: RAID_MINION_PERIOD_MS,
        blast_timer_ms: RAID_EMP_PERIOD_MS,
        regen_timer_ms: TITAN_REGEN_PERIOD_MS,
    };
    world.spawn((
        Enemy,
        state,
        boss,
        path.start(),
        StatusEffects::new(),
        Trail::default(),
    ))
}

/// Spawn a boss minion mid-path, near its parent boss.
pub fn spawn_minion(
    world: &mut World,
    id: u32,
    kind: EnemyKind,
    position: Position,
    waypoint_index: usize,
    progress: f64,
    health: f64,
    speed: f64,
) -> hecs::Entity {
    let base = enemy_base(kind);
    let state = EnemyState {
        id,
        kind: kind.into(),
        health,
        max_health: health,
        base_speed: speed,
        radius: base.size / 2.0,
        reward: base.reward,
        resistances: Resistances::default(),
        waypoint_index,
        progress,
        end_damage: 1,
        dead: false,
        reached_end: false,
    };
    world.spawn((Enemy, state, position, StatusEffects::new(), Trail::default()))
}

/// Spawn a defense on a grid cell. Base stats come from the kind table;
/// `invested` starts at the placement cost.
pub fn spawn_defense(
    world: &mut World,
    id: u32,
    kind: DefenseKind,
    cell: GridCell,
    grid_size: f64,
) -> hecs::Entity {
    let base = defense_base(kind);
    let state = DefenseState {
        id,
        kind,
        cell,
        level: 1,
        experience: 0,
        damage: base.damage,
        range: base.range,
        fire_rate_ms: base.fire_rate_ms,
        projectile_speed: base.projectile_speed,
        invested: base.cost,
        target_id: None,
        facing: 0.0,
        last_fire_ms: None,
        special_cooldown_ms: 0.0,
        special_active_ms: 0.0,
        corrupted: false,
    };
    world.spawn((Defense, state, cell.center(grid_size), StatusEffects::new()))
}

/// Spawn a projectile at `origin` flying with `velocity`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    world: &mut World,
    id: u32,
    source_kind: DefenseKind,
    kind: ProjectileKind,
    origin_id: u32,
    target_id: u32,
    origin: Position,
    velocity: Velocity,
    damage: f64,
    speed: f64,
) -> hecs::Entity {
    let state = ProjectileState {
        id,
        kind,
        source_kind,
        damage,
        radius: PROJECTILE_RADIUS,
        speed,
        origin_id,
        target_id: Some(target_id),
        hit_ids: Vec::new(),
        wander_ms: PROJECTILE_WANDER_TIMEOUT_MS,
    };
    world.spawn((Projectile, state, origin, velocity, StatusEffects::new()))
}

/// Reward credited for killing an enemy, after the resource boost.
pub fn boosted_reward(reward: &Resources, boost: f64) -> Resources {
    if boost > 1.0 {
        reward.scaled(boost)
    } else {
        *reward
    }
}
