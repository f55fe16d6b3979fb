//! Defense targeting and firing.
//!
//! Targeting validates or replaces each defense's bound target, scoring
//! candidates on progress, remaining health, speed, bounty, and closeness.
//! Firing is cadence-gated; projectiles spawn after the scan so world
//! iteration never observes a half-updated tick.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::components::{Defense, DefenseState};
use dharmapala_core::constants::*;
use dharmapala_core::enums::{DefenseKind, EffectKind};
use dharmapala_core::events::GameEvent;
use dharmapala_core::status::{Effect, StatusEffects};
use dharmapala_core::types::{Position, Velocity};

use crate::pending::{DefenseEffect, EnemyEffect, TickQueue};
use crate::spawn;
use crate::systems::{DefenseSite, EnemyRef};

struct FireOrder {
    defense_id: u32,
    kind: DefenseKind,
    origin: Position,
    target: usize,
    damage: f64,
    projectile_speed: f64,
    range: f64,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    now_ms: f64,
    dt_ms: f64,
    enemies: &[EnemyRef],
    sites: &[DefenseSite],
    queue: &mut TickQueue,
    events: &mut Vec<GameEvent>,
    next_projectile_id: &mut u32,
) {
    let mut orders: Vec<FireOrder> = Vec::new();

    for (_entity, (_, st, fx, pos)) in
        world.query_mut::<(&Defense, &mut DefenseState, &StatusEffects, &Position)>()
    {
        st.special_cooldown_ms = (st.special_cooldown_ms - dt_ms).max(0.0);
        st.special_active_ms = (st.special_active_ms - dt_ms).max(0.0);

        if !st.is_active(fx) {
            st.target_id = None;
            continue;
        }
        if st.kind == DefenseKind::Decoy {
            continue;
        }

        let range = st.effective_range(fx);

        // Drop an invalid target: gone, dead, stealthed, or out of range.
        let current = st.target_id.and_then(|id| {
            enemies.iter().position(|e| {
                e.id == id && !e.stealthed && e.position.distance_to(pos) <= range
            })
        });

        let target = current.or_else(|| acquire_target(enemies, pos, range));
        st.target_id = target.map(|i| enemies[i].id);

        let Some(target_idx) = target else {
            continue;
        };
        st.facing = pos.angle_to(&enemies[target_idx].position);

        let due = match st.last_fire_ms {
            None => true,
            Some(last) => now_ms - last >= st.effective_fire_rate_ms(fx),
        };
        if due {
            st.last_fire_ms = Some(now_ms);
            orders.push(FireOrder {
                defense_id: st.id,
                kind: st.kind,
                origin: *pos,
                target: target_idx,
                damage: st.effective_damage(fx),
                projectile_speed: st.effective_projectile_speed(fx) * PROJECTILE_SPEED_SCALE,
                range,
            });
        }
    }

    for order in orders {
        fire(world, rng, &order, enemies, sites, queue, events, next_projectile_id);
    }
}

/// Score every eligible candidate and return the best index. Ties go to
/// the lower enemy id (candidates are sorted by id).
fn acquire_target(enemies: &[EnemyRef], pos: &Position, range: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, enemy) in enemies.iter().enumerate() {
        if enemy.stealthed {
            continue;
        }
        let dist = enemy.position.distance_to(pos);
        if dist > range {
            continue;
        }
        let score = 100.0 * enemy.progress
            + 50.0 * (1.0 - enemy.health / enemy.max_health)
            + 0.5 * enemy.speed
            + 2.0 * enemy.reward_dharma as f64
            + 0.1 * (range - dist);
        match best {
            Some((_, s)) if s >= score => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Spawn the projectile for a fire order and apply the defense's on-fire
/// side effects.
#[allow(clippy::too_many_arguments)]
fn fire(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    order: &FireOrder,
    enemies: &[EnemyRef],
    sites: &[DefenseSite],
    queue: &mut TickQueue,
    events: &mut Vec<GameEvent>,
    next_projectile_id: &mut u32,
) {
    let target = &enemies[order.target];

    let id = *next_projectile_id;
    *next_projectile_id += 1;

    let velocity = lead_velocity(order.origin, target, order.projectile_speed);
    spawn::spawn_projectile(
        world,
        id,
        order.kind,
        order.kind.projectile_kind(),
        order.defense_id,
        target.id,
        order.origin,
        velocity,
        order.damage,
        order.projectile_speed,
    );
    events.push(GameEvent::DefenseFired {
        id: order.defense_id,
        projectile_id: id,
        target_id: target.id,
    });

    match order.kind {
        DefenseKind::Encryption => {
            let radius = order.range * SCRAMBLE_RANGE_FACTOR;
            for enemy in enemies {
                if enemy.position.distance_to(&order.origin) <= radius {
                    queue.enemy_effects.push(EnemyEffect {
                        target_id: enemy.id,
                        effect: Effect::new(EffectKind::Scrambled, SCRAMBLE_ON_FIRE_MS),
                    });
                }
            }
        }
        DefenseKind::Mirror => {
            // Occasional reflection shimmer; purely cosmetic.
            if rng.gen_bool(MIRROR_REFLECT_CHANCE) {
                queue.defense_effects.push(DefenseEffect {
                    target_id: order.defense_id,
                    effect: Effect::new(EffectKind::Reflection, 500.0),
                    hostile: false,
                });
            }
        }
        DefenseKind::Anonymity => {
            let radius = order.range * CLOAK_RANGE_FACTOR;
            for site in sites {
                if site.id != order.defense_id
                    && site.position.distance_to(&order.origin) <= radius
                {
                    queue.defense_effects.push(DefenseEffect {
                        target_id: site.id,
                        effect: Effect::new(EffectKind::Cloaked, CLOAK_ON_FIRE_MS),
                        hostile: false,
                    });
                }
            }
        }
        DefenseKind::Distributor => {
            let radius = order.range * BOOST_RANGE_FACTOR;
            for site in sites {
                if site.id != order.defense_id
                    && site.position.distance_to(&order.origin) <= radius
                {
                    queue.defense_effects.push(DefenseEffect {
                        target_id: site.id,
                        effect: Effect::new(EffectKind::Boosted, BOOST_ON_FIRE_MS),
                        hostile: false,
                    });
                }
            }
        }
        DefenseKind::Firewall | DefenseKind::Decoy => {}
    }
}

/// Aim at a predicted intercept point: two refinement passes of
/// time-to-target against the target's tangent velocity.
fn lead_velocity(origin: Position, target: &EnemyRef, speed: f64) -> Velocity {
    let mut aim = target.position;
    for _ in 0..2 {
        let dist = origin.distance_to(&aim);
        let tti = if speed > 0.0 { dist / speed } else { 0.0 };
        aim = Position::new(
            target.position.x + target.velocity.x * tti,
            target.position.y + target.velocity.y * tti,
        );
    }
    let dist = origin.distance_to(&aim);
    if dist < 1.0 {
        return Velocity::new(speed, 0.0);
    }
    let angle = origin.angle_to(&aim);
    Velocity::new(angle.cos() * speed, angle.sin() * speed)
}
