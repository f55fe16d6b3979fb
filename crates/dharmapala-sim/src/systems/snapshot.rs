//! Snapshot system: queries the ECS world and builds a complete
//! `GameSnapshot`. Read-only; never modifies the world.

use hecs::World;

use dharmapala_core::components::*;
use dharmapala_core::economy::Resources;
use dharmapala_core::enums::{DefenseKind, GamePhase};
use dharmapala_core::state::*;
use dharmapala_core::status::StatusEffects;
use dharmapala_core::types::{Position, SimTime, Velocity};

use crate::systems::wave::WaveState;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    resources: &Resources,
    lives: u32,
    score: u64,
    wave: &WaveState,
    grid_size: f64,
    selected_defense_type: Option<DefenseKind>,
) -> GameSnapshot {
    GameSnapshot {
        time: *time,
        phase,
        resources: *resources,
        lives,
        wave: wave.current,
        score,
        enemies: build_enemies(world),
        defenses: build_defenses(world, grid_size),
        projectiles: build_projectiles(world),
        wave_state: WaveView {
            current: wave.current,
            in_progress: wave.in_progress,
            next_wave_in_ms: wave.inter_wave_timer_ms,
            pending_spawns: wave.pending_spawns(),
        },
        selected_defense_type,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<EnemyView> = world
        .query::<(
            &Enemy,
            &EnemyState,
            &Position,
            &StatusEffects,
            &Trail,
            Option<&BossState>,
        )>()
        .iter()
        .map(|(_, (_, st, pos, fx, trail, boss))| EnemyView {
            id: st.id,
            kind: st.kind,
            position: *pos,
            health: st.health,
            max_health: st.max_health,
            progress: st.progress,
            waypoint_index: st.waypoint_index,
            effects: fx.to_pairs(),
            trail: trail.positions.clone(),
            boss: boss.map(|b| BossView {
                kind: b.kind,
                phase: b.current_phase,
                phases: b.phases,
                shield_active: b.shield.map(|s| s.active).unwrap_or(false),
                shield_health: b.shield.map(|s| s.health).unwrap_or(0.0),
                shield_max: b.shield.map(|s| s.max_health).unwrap_or(0.0),
            }),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_defenses(world: &World, grid_size: f64) -> Vec<DefenseView> {
    let mut views: Vec<DefenseView> = world
        .query::<(&Defense, &DefenseState, &StatusEffects)>()
        .iter()
        .map(|(_, (_, st, fx))| DefenseView {
            id: st.id,
            kind: st.kind,
            cell: st.cell,
            position: st.cell.center(grid_size),
            level: st.level,
            experience: st.experience,
            experience_to_next: st.experience_to_next(),
            target_id: st.target_id,
            facing: st.facing,
            active: st.is_active(fx),
            special_ready: st.special_cooldown_ms <= 0.0 && !st.corrupted,
            special_active_ms: st.special_active_ms,
            special_cooldown_ms: st.special_cooldown_ms,
            effects: fx.to_pairs(),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Projectile, &ProjectileState, &Position, &Velocity)>()
        .iter()
        .map(|(_, (_, st, pos, vel))| ProjectileView {
            id: st.id,
            kind: st.kind,
            position: *pos,
            velocity: *vel,
            damage: st.damage,
            target_id: st.target_id,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
