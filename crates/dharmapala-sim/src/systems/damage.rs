//! Damage resolution and death bookkeeping.
//!
//! The single application point for everything the earlier phases queued:
//! projectile hits (with shields, resistances, splash, and on-hit status),
//! damage-over-time, heals, status applications, ledger theft, minion
//! spawns, and end-of-path life loss. Boss phase transitions happen here,
//! on damage application.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::components::{BossState, Defense, DefenseState, Enemy, EnemyState};
use dharmapala_core::constants::*;
use dharmapala_core::economy::Resources;
use dharmapala_core::enums::{DefenseKind, EffectKind, GamePhase};
use dharmapala_core::events::GameEvent;
use dharmapala_core::status::{Effect, StatusEffects};
use dharmapala_core::types::Position;

use crate::achievements::{self, AchievementMonitor, Counter};
use crate::pending::{HitRecord, TickQueue};
use crate::spawn;

#[allow(clippy::too_many_arguments)]
pub fn resolve(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    queue: &mut TickQueue,
    events: &mut Vec<GameEvent>,
    resources: &mut Resources,
    lives: &mut u32,
    score: &mut u64,
    phase: &mut GamePhase,
    monitor: &mut AchievementMonitor,
    resource_boost: f64,
    next_enemy_id: &mut u32,
    wave: u32,
) {
    // Id lookups and frozen positions for this phase.
    let mut enemy_map: HashMap<u32, Entity> = HashMap::new();
    let mut enemy_positions: Vec<(u32, Position)> = Vec::new();
    for (entity, (_, st, pos)) in world.query::<(&Enemy, &EnemyState, &Position)>().iter() {
        enemy_map.insert(st.id, entity);
        if !st.dead && !st.reached_end {
            enemy_positions.push((st.id, *pos));
        }
    }
    enemy_positions.sort_by_key(|(id, _)| *id);

    let mut defense_map: HashMap<u32, Entity> = HashMap::new();
    let mut defense_positions: Vec<(u32, Position)> = Vec::new();
    for (entity, (_, st, pos)) in world.query::<(&Defense, &DefenseState, &Position)>().iter() {
        defense_map.insert(st.id, entity);
        defense_positions.push((st.id, *pos));
    }
    defense_positions.sort_by_key(|(id, _)| *id);

    // Hits, plus any splash hits they fan out into.
    let mut pending: VecDeque<HitRecord> = std::mem::take(&mut queue.hits).into();
    while let Some(hit) = pending.pop_front() {
        apply_hit(
            world,
            &enemy_map,
            &defense_map,
            &enemy_positions,
            &defense_positions,
            &hit,
            &mut pending,
            events,
            resources,
            score,
            monitor,
            resource_boost,
        );
    }

    // Heals (monk aura). Clamped to max health, dead actors skipped.
    for (target_id, amount) in queue.heals.drain(..) {
        if let Some(&entity) = enemy_map.get(&target_id) {
            if let Ok(mut st) = world.get::<&mut EnemyState>(entity) {
                if !st.dead {
                    st.health = (st.health + amount).min(st.max_health);
                }
            }
        }
    }

    // Queued status applications.
    for item in queue.enemy_effects.drain(..) {
        if let Some(&entity) = enemy_map.get(&item.target_id) {
            let alive = world
                .get::<&EnemyState>(entity)
                .map(|st| !st.dead)
                .unwrap_or(false);
            if alive {
                if let Ok(mut fx) = world.get::<&mut StatusEffects>(entity) {
                    fx.apply(item.effect);
                }
            }
        }
    }

    for item in queue.defense_effects.drain(..) {
        let Some(&entity) = defense_map.get(&item.target_id) else {
            continue;
        };
        // An active cloak shrugs off enemy-inflicted debuffs.
        if item.hostile {
            let cloaked = world
                .get::<&StatusEffects>(entity)
                .map(|fx| fx.has(EffectKind::Cloaked))
                .unwrap_or(false);
            if cloaked {
                continue;
            }
        }
        if item.effect.kind == EffectKind::Corrupted {
            if let Ok(mut st) = world.get::<&mut DefenseState>(entity) {
                st.corrupted = true;
            }
        }
        if let Ok(mut fx) = world.get::<&mut StatusEffects>(entity) {
            fx.apply(item.effect);
        }
    }

    // Resource theft.
    for fraction in queue.thefts.drain(..) {
        let cut = resources.scaled(fraction);
        resources.debit(&cut);
    }

    // Boss minion spawns, scattered around the parent.
    let spawns: Vec<_> = queue.minion_spawns.drain(..).collect();
    for request in spawns {
        for _ in 0..request.count {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let radius = rng.gen_range(10.0..30.0);
            let position = Position::new(
                request.around.x + angle.cos() * radius,
                request.around.y + angle.sin() * radius,
            );
            let id = *next_enemy_id;
            *next_enemy_id += 1;
            spawn::spawn_minion(
                world,
                id,
                request.kind,
                position,
                request.waypoint_index,
                request.progress,
                request.health,
                request.speed,
            );
            events.push(GameEvent::EnemySpawned {
                id,
                kind: request.kind.into(),
                wave,
            });
        }
    }

    // End-of-path life loss. Terminal: the enemy is finished either way.
    let mut arrivals: Vec<(u32, dharmapala_core::enums::AttackerKind, u32)> = Vec::new();
    for (_entity, (_, st)) in world.query_mut::<(&Enemy, &mut EnemyState)>() {
        if st.reached_end && !st.dead {
            st.dead = true;
            arrivals.push((st.id, st.kind, st.end_damage));
        }
    }
    for (id, kind, damage) in arrivals {
        *lives = lives.saturating_sub(damage);
        events.push(GameEvent::EnemyReachedEnd {
            id,
            kind,
            lives_lost: damage,
        });
    }

    if *lives == 0 && *phase == GamePhase::Playing {
        *phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        tracing::info!("lives exhausted, game over");
    }
}

/// Apply one queued hit: resistance, shield absorption, health, on-hit
/// status, splash fan-out, death bookkeeping, and boss phase transitions.
#[allow(clippy::too_many_arguments)]
fn apply_hit(
    world: &mut World,
    enemy_map: &HashMap<u32, Entity>,
    defense_map: &HashMap<u32, Entity>,
    enemy_positions: &[(u32, Position)],
    defense_positions: &[(u32, Position)],
    hit: &HitRecord,
    pending: &mut VecDeque<HitRecord>,
    events: &mut Vec<GameEvent>,
    resources: &mut Resources,
    score: &mut u64,
    monitor: &mut AchievementMonitor,
    resource_boost: f64,
) {
    let Some(&entity) = enemy_map.get(&hit.target_id) else {
        return;
    };

    let (killed, kind, max_health, reward, boss_kill) = {
        let Ok(mut st) = world.get::<&mut EnemyState>(entity) else {
            return;
        };
        if st.dead || st.reached_end {
            return;
        }

        let mut amount = match hit.source_kind {
            Some(source) => hit.damage * st.resistances.factor(source),
            None => hit.damage,
        };

        // Shields absorb before the hull.
        if let Ok(mut boss) = world.get::<&mut BossState>(entity) {
            if let Some(shield) = &mut boss.shield {
                if shield.active && shield.health > 0.0 {
                    let absorbed = amount.min(shield.health);
                    shield.health -= absorbed;
                    amount -= absorbed;
                    if shield.health <= 0.0 {
                        shield.health = 0.0;
                        shield.active = false;
                        events.push(GameEvent::ShieldBroken { id: st.id });
                    }
                }
            }
        }

        st.health = (st.health - amount).max(0.0);

        if let Some(projectile_id) = hit.projectile_id {
            events.push(GameEvent::ProjectileHit {
                projectile_id,
                target_id: st.id,
                damage: hit.damage,
            });
        }

        let killed = st.health <= 0.0;
        if killed {
            st.dead = true;
        }
        (killed, st.kind, st.max_health, st.reward, killed && st.kind.is_boss())
    };

    // On-hit side effects from the firing defense's kind.
    if hit.projectile_id.is_some() {
        match hit.source_kind {
            Some(DefenseKind::Encryption) => {
                if let Ok(mut fx) = world.get::<&mut StatusEffects>(entity) {
                    fx.apply(Effect::new(EffectKind::Scrambled, SCRAMBLE_ON_HIT_MS));
                }
            }
            Some(DefenseKind::Anonymity) => {
                if let Ok(mut fx) = world.get::<&mut StatusEffects>(entity) {
                    fx.apply(Effect::new(EffectKind::Stealthed, STEALTH_ON_HIT_MS));
                }
            }
            Some(DefenseKind::Distributor) => {
                // Area damage at half strength, excluding the direct victim,
                // plus a boost pulse for nearby defenses.
                for &(other_id, pos) in enemy_positions {
                    if other_id != hit.target_id
                        && pos.distance_to(&hit.impact) <= SPLASH_RADIUS
                    {
                        pending.push_back(HitRecord {
                            projectile_id: None,
                            target_id: other_id,
                            damage: hit.damage * SPLASH_DAMAGE_FACTOR,
                            source_kind: None,
                            origin_defense_id: hit.origin_defense_id,
                            impact: hit.impact,
                        });
                    }
                }
                for &(defense_id, pos) in defense_positions {
                    if pos.distance_to(&hit.impact) <= SPLASH_BOOST_RADIUS {
                        if let Some(&defense_entity) = defense_map.get(&defense_id) {
                            if let Ok(mut fx) =
                                world.get::<&mut StatusEffects>(defense_entity)
                            {
                                fx.apply(Effect::new(EffectKind::Boosted, SPLASH_BOOST_MS));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if killed {
        if let Ok(mut fx) = world.get::<&mut StatusEffects>(entity) {
            fx.clear();
        }

        let credited = spawn::boosted_reward(&reward, resource_boost);
        resources.credit(&credited);
        *score += max_health.floor() as u64;

        if let Some(origin) = hit.origin_defense_id.and_then(|id| defense_map.get(&id)) {
            if let Ok(mut defense) = world.get::<&mut DefenseState>(*origin) {
                defense.experience += max_health.floor() as u64;
            }
        }

        events.push(GameEvent::EnemyKilled {
            id: hit.target_id,
            kind,
            reward: credited,
        });
        achievements::record(monitor, Counter::EnemiesKilled, 1, resources, events);
        if boss_kill {
            achievements::record(monitor, Counter::BossesKilled, 1, resources, events);
        }
        achievements::record(
            monitor,
            Counter::DharmaEarned,
            credited.dharma,
            resources,
            events,
        );
        return;
    }

    // Phase transitions: one event per threshold crossing.
    let transitions = {
        let Ok(mut boss) = world.get::<&mut BossState>(entity) else {
            return;
        };
        let Ok(mut st) = world.get::<&mut EnemyState>(entity) else {
            return;
        };
        let damage_fraction = 1.0 - st.health / st.max_health;
        let target_phase = ((damage_fraction * boss.phases as f64).ceil() as u8)
            .clamp(1, boss.phases);

        let mut transitions = Vec::new();
        while boss.current_phase < target_phase {
            let from = boss.current_phase;
            boss.current_phase += 1;
            st.base_speed *= BOSS_PHASE_SPEED_FACTOR;
            st.end_damage = (st.end_damage as f64 * BOSS_PHASE_DAMAGE_FACTOR).floor() as u32;
            boss.minion_timer_ms = 0.0;
            boss.blast_timer_ms = 0.0;
            boss.regen_timer_ms = 0.0;
            transitions.push((st.id, boss.kind, from, boss.current_phase));
        }
        transitions
    };
    for (id, kind, from, to) in transitions {
        events.push(GameEvent::BossPhaseChange { id, kind, from, to });
    }
}
