//! Scheduled boss abilities.
//!
//! Ability timers are plain countdowns decremented here and only here;
//! phase transitions (which reset them) happen in the damage phase, so a
//! transition can never re-enter an ability mid-tick.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::components::{BossState, Enemy, EnemyState};
use dharmapala_core::constants::*;
use dharmapala_core::enums::{BossKind, EffectKind, EnemyKind};
use dharmapala_core::status::Effect;
use dharmapala_core::types::Position;

use crate::pending::{DefenseEffect, MinionSpawn, TickQueue};
use crate::systems::DefenseSite;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    dt_ms: f64,
    sites: &[DefenseSite],
    queue: &mut TickQueue,
) {
    for (_entity, (_, st, boss, pos)) in
        world.query_mut::<(&Enemy, &EnemyState, &mut BossState, &Position)>()
    {
        if st.dead || st.reached_end {
            continue;
        }
        match boss.kind {
            BossKind::RaidTeam => {
                boss.minion_timer_ms -= dt_ms;
                if boss.minion_timer_ms <= 0.0 {
                    boss.minion_timer_ms = RAID_MINION_PERIOD_MS;
                    queue.minion_spawns.push(MinionSpawn {
                        kind: EnemyKind::ScriptKiddie,
                        around: *pos,
                        waypoint_index: st.waypoint_index,
                        progress: st.progress,
                        count: RAID_MINION_BASE_COUNT + boss.current_phase as u32,
                        health: RAID_MINION_HEALTH,
                        speed: RAID_MINION_SPEED,
                    });
                }

                boss.blast_timer_ms -= dt_ms;
                if boss.blast_timer_ms <= 0.0 {
                    boss.blast_timer_ms = RAID_EMP_PERIOD_MS;
                    for site in sites {
                        if site.position.distance_to(pos) <= RAID_EMP_RADIUS {
                            queue.defense_effects.push(DefenseEffect {
                                target_id: site.id,
                                effect: Effect::new(EffectKind::Emp, RAID_EMP_MS),
                                hostile: true,
                            });
                        }
                    }
                }
            }
            BossKind::MegaCorpTitan => {
                boss.regen_timer_ms -= dt_ms;
                if boss.regen_timer_ms <= 0.0 {
                    boss.regen_timer_ms = TITAN_REGEN_PERIOD_MS;
                    if let Some(shield) = &mut boss.shield {
                        shield.health = (shield.health + TITAN_REGEN_AMOUNT).min(shield.max_health);
                        if shield.health > 0.0 {
                            shield.active = true;
                        }
                    }
                }

                if rng.gen_bool(TITAN_THEFT_CHANCE) {
                    queue.thefts.push(TITAN_THEFT_FRACTION);
                }
            }
        }
    }
}
