//! Enemy movement and per-kind passive behaviors.
//!
//! Each enemy chases its current waypoint at its effective speed, then
//! runs its kind's passive. Cross-actor effects (monk auras) read the
//! start-of-tick position buffer and enqueue their mutations.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::components::{Enemy, EnemyState, Trail};
use dharmapala_core::constants::*;
use dharmapala_core::enums::{AttackerKind, EffectKind, EnemyKind};
use dharmapala_core::status::{Effect, StatusEffects};
use dharmapala_core::types::Position;
use dharmapala_path::Path;

use crate::pending::{DefenseEffect, HitRecord, TickQueue};
use crate::systems::DefenseSite;

/// Enemy positions captured before any system ran this tick. Aura-type
/// passives read these so results don't depend on update order.
#[derive(Debug, Clone)]
pub struct StartEnemy {
    pub id: u32,
    pub kind: AttackerKind,
    pub position: Position,
}

/// Capture the start-of-tick enemy buffer.
pub fn capture_start_positions(world: &World, out: &mut Vec<StartEnemy>) {
    out.clear();
    out.extend(
        world
            .query::<(&Enemy, &EnemyState, &Position)>()
            .iter()
            .filter(|(_, (_, st, _))| !st.dead && !st.reached_end)
            .map(|(_, (_, st, pos))| StartEnemy {
                id: st.id,
                kind: st.kind,
                position: *pos,
            }),
    );
    out.sort_by_key(|e| e.id);
}

/// Effective speed in units/s: base speed times status modifiers times
/// kind modifiers (monk crawl, agent sprint near defenses).
pub fn effective_speed(
    st: &EnemyState,
    fx: &StatusEffects,
    pos: &Position,
    sites: &[DefenseSite],
) -> f64 {
    let mut speed = st.base_speed * fx.speed_factor();
    match st.kind {
        AttackerKind::Enemy(EnemyKind::CorruptedMonk) => speed *= MONK_SPEED_FACTOR,
        AttackerKind::Enemy(EnemyKind::FederalAgent) => {
            let near_defense = sites
                .iter()
                .any(|s| s.position.distance_to(pos) <= AGENT_SENSE_RADIUS);
            if near_defense && !fx.has(EffectKind::Scrambled) {
                speed *= AGENT_SPEED_FACTOR;
            }
        }
        _ => {}
    }
    speed
}

/// Run movement and passives for every live enemy.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    path: &Path,
    rng: &mut ChaCha8Rng,
    dt_ms: f64,
    start_enemies: &[StartEnemy],
    sites: &[DefenseSite],
    queue: &mut TickQueue,
) {
    let dt_secs = dt_ms / 1000.0;

    for (_entity, (_, st, pos, fx, trail)) in world.query_mut::<(
        &Enemy,
        &mut EnemyState,
        &mut Position,
        &mut StatusEffects,
        &mut Trail,
    )>() {
        if st.dead || st.reached_end {
            continue;
        }

        // Damage-over-time resolves with the rest of the damage this tick.
        for kind in [EffectKind::Burning, EffectKind::Poisoned] {
            if let Some(effect) = fx.get(kind) {
                let per_sec = effect.magnitude.unwrap_or(0.0);
                if per_sec > 0.0 {
                    queue.hits.push(HitRecord {
                        projectile_id: None,
                        target_id: st.id,
                        damage: per_sec * dt_secs,
                        source_kind: None,
                        origin_defense_id: None,
                        impact: *pos,
                    });
                }
            }
        }

        let speed = effective_speed(st, fx, pos, sites);
        advance_along_path(st, pos, path, speed * dt_secs);

        // Scrambled enemies lose their special behavior for the duration.
        if !fx.has(EffectKind::Scrambled) {
            if let AttackerKind::Enemy(kind) = st.kind {
                run_passive(kind, st, pos, fx, path, rng, dt_ms, speed, start_enemies, sites, queue);
            }
        }

        st.progress = st
            .progress
            .max(path.progress_near(st.waypoint_index, *pos));
        if st.progress >= 1.0 {
            st.reached_end = true;
        }

        trail.record(*pos, TRAIL_CAPACITY);
    }
}

/// Chase waypoints, consuming up to `step` units of travel. Arrival within
/// tolerance advances the waypoint index; running out of waypoints marks
/// the end of the path.
fn advance_along_path(st: &mut EnemyState, pos: &mut Position, path: &Path, step: f64) {
    let points = path.points();
    let mut remaining = step;
    loop {
        if st.waypoint_index >= points.len() {
            st.reached_end = true;
            return;
        }
        let target = points[st.waypoint_index];
        let dist = pos.distance_to(&target);
        if dist <= WAYPOINT_TOLERANCE {
            st.waypoint_index += 1;
            continue;
        }
        if remaining <= 0.0 {
            return;
        }
        let travel = remaining.min(dist);
        let angle = pos.angle_to(&target);
        pos.x += angle.cos() * travel;
        pos.y += angle.sin() * travel;
        remaining -= travel;
    }
}

/// Per-kind passive, applied after base movement.
#[allow(clippy::too_many_arguments)]
fn run_passive(
    kind: EnemyKind,
    st: &mut EnemyState,
    pos: &mut Position,
    fx: &mut StatusEffects,
    path: &Path,
    rng: &mut ChaCha8Rng,
    dt_ms: f64,
    speed: f64,
    start_enemies: &[StartEnemy],
    sites: &[DefenseSite],
    queue: &mut TickQueue,
) {
    let dt_secs = dt_ms / 1000.0;
    match kind {
        EnemyKind::ScriptKiddie => {
            // Erratic drift, bounded by a fraction of this tick's travel.
            let amplitude = KIDDIE_JITTER_FACTOR * speed * dt_secs;
            pos.x += rng.gen_range(-1.0..1.0) * amplitude;
            pos.y += rng.gen_range(-1.0..1.0) * amplitude;
        }
        EnemyKind::FederalAgent => {
            // Sprint handled in effective_speed.
        }
        EnemyKind::CorporateSaboteur => {
            if rng.gen_bool(SABOTEUR_STEALTH_CHANCE) {
                fx.apply(Effect::new(EffectKind::Stealthed, SABOTEUR_STEALTH_MS));
            }
        }
        EnemyKind::AiSurveillance => {
            // Drift away from nearby defenses, never against path progress.
            let mut rx = 0.0;
            let mut ry = 0.0;
            for site in sites {
                let d = site.position.distance_to(pos);
                if d > 0.0 && d <= SURVEILLANCE_REPULSE_RADIUS {
                    let w = SURVEILLANCE_REPULSE_WEIGHT / d;
                    rx += (pos.x - site.position.x) / d * w;
                    ry += (pos.y - site.position.y) / d * w;
                }
            }
            let (_, tangent) = path.position_at(st.progress);
            let (tx, ty) = (tangent.cos(), tangent.sin());
            let along = rx * tx + ry * ty;
            if along < 0.0 {
                rx -= tx * along;
                ry -= ty * along;
            }
            pos.x += rx * dt_secs;
            pos.y += ry * dt_secs;
        }
        EnemyKind::QuantumHacker => {
            if rng.gen_bool(HACKER_TELEPORT_CHANCE) {
                st.progress = (st.progress + HACKER_TELEPORT_JUMP).min(1.0);
                let (jumped, _) = path.position_at(st.progress);
                *pos = jumped;
                st.waypoint_index = st.waypoint_index.max(path.waypoint_at(st.progress));
                if st.progress >= 1.0 {
                    st.reached_end = true;
                }
            }
        }
        EnemyKind::CorruptedMonk => {
            // Both auras use start-of-tick positions.
            let own = start_enemies.iter().find(|e| e.id == st.id);
            if let Some(own) = own {
                for other in start_enemies {
                    if other.id != st.id
                        && other.kind == AttackerKind::Enemy(EnemyKind::CorruptedMonk)
                        && own.position.distance_to(&other.position) <= MONK_HEAL_RADIUS
                    {
                        queue.heals.push((other.id, MONK_HEAL_PER_MS * dt_ms));
                    }
                }
                for site in sites {
                    if own.position.distance_to(&site.position) <= MONK_CORRUPT_RADIUS {
                        queue.defense_effects.push(DefenseEffect {
                            target_id: site.id,
                            effect: Effect::new(EffectKind::Corrupted, MONK_CORRUPT_MS),
                            hostile: true,
                        });
                    }
                }
            }
        }
    }
}
