//! Wave plan composition.
//!
//! A wave plan is an ordered list of enemy groups, deterministic in the
//! wave index given the engine RNG state. Kinds escalate with the wave
//! number; every 5th wave adds a boss plus a scriptKiddie swarm.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::constants::{BOSS_WAVE_INTERVAL, GROUP_SPAWN_DELAY_MS};
use dharmapala_core::enums::{BossKind, EnemyKind};

/// What a group spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Enemy(EnemyKind),
    Boss(BossKind),
}

/// One enemy group within a wave.
#[derive(Debug, Clone)]
pub struct EnemyGroup {
    pub spawn: SpawnKind,
    pub count: u32,
    pub spawn_delay_ms: f64,
    pub health_multiplier: f64,
}

/// Compose the plan for `wave` (1-based).
pub fn compose_wave(wave: u32, rng: &mut ChaCha8Rng) -> Vec<EnemyGroup> {
    let kinds = EnemyKind::ALL;
    // Kinds escalate: wave 10 unlocks the full roster. Early waves would
    // round down to zero kinds, so at least one is always included.
    let unlocked = ((wave as f64 / 10.0 * kinds.len() as f64).floor() as usize)
        .clamp(1, kinds.len());
    let health_multiplier = 1.0 + 0.05 * wave as f64;

    let mut groups = Vec::with_capacity(unlocked + 2);
    for &kind in &kinds[..unlocked] {
        let extra_max = (0.3 * wave as f64).floor() as u32;
        let extra = if extra_max > 0 {
            rng.gen_range(0..extra_max)
        } else {
            0
        };
        groups.push(EnemyGroup {
            spawn: SpawnKind::Enemy(kind),
            count: 3 + wave / 2 + extra,
            spawn_delay_ms: GROUP_SPAWN_DELAY_MS,
            health_multiplier,
        });
    }

    if wave % BOSS_WAVE_INTERVAL == 0 {
        let boss = if wave <= 10 {
            BossKind::RaidTeam
        } else {
            BossKind::MegaCorpTitan
        };
        groups.push(EnemyGroup {
            spawn: SpawnKind::Boss(boss),
            count: 1,
            spawn_delay_ms: GROUP_SPAWN_DELAY_MS,
            health_multiplier: 1.0,
        });
        groups.push(EnemyGroup {
            spawn: SpawnKind::Enemy(EnemyKind::ScriptKiddie),
            count: 5 + wave,
            spawn_delay_ms: GROUP_SPAWN_DELAY_MS,
            health_multiplier,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    #[test]
    fn wave_one_spawns_script_kiddies() {
        let groups = compose_wave(1, &mut rng());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].spawn, SpawnKind::Enemy(EnemyKind::ScriptKiddie));
        assert_eq!(groups[0].count, 3);
        assert!((groups[0].health_multiplier - 1.05).abs() < 1e-9);
    }

    #[test]
    fn kinds_escalate_with_wave_number() {
        let w3 = compose_wave(3, &mut rng());
        let w8 = compose_wave(8, &mut rng());
        let w10 = compose_wave(10, &mut rng());
        assert!(w3.len() < w8.len());
        // Wave 10 unlocks the full roster (plus boss and swarm groups).
        assert_eq!(w10.len(), 6 + 2);
    }

    #[test]
    fn boss_waves_every_fifth() {
        for wave in 1..=20 {
            let groups = compose_wave(wave, &mut rng());
            let has_boss = groups
                .iter()
                .any(|g| matches!(g.spawn, SpawnKind::Boss(_)));
            assert_eq!(has_boss, wave % 5 == 0, "wave {wave}");
        }
    }

    #[test]
    fn boss_kind_switches_after_wave_ten() {
        let w5 = compose_wave(5, &mut rng());
        assert!(w5
            .iter()
            .any(|g| g.spawn == SpawnKind::Boss(BossKind::RaidTeam)));
        let w15 = compose_wave(15, &mut rng());
        assert!(w15
            .iter()
            .any(|g| g.spawn == SpawnKind::Boss(BossKind::MegaCorpTitan)));
    }

    #[test]
    fn boss_health_is_not_wave_scaled() {
        let w5 = compose_wave(5, &mut rng());
        let boss = w5
            .iter()
            .find(|g| matches!(g.spawn, SpawnKind::Boss(_)))
            .unwrap();
        assert_eq!(boss.health_multiplier, 1.0);
        assert_eq!(boss.count, 1);
    }

    #[test]
    fn swarm_group_grows_with_wave() {
        let w5 = compose_wave(5, &mut rng());
        let swarm = w5.last().unwrap();
        assert_eq!(swarm.spawn, SpawnKind::Enemy(EnemyKind::ScriptKiddie));
        assert_eq!(swarm.count, 10);

        let w20 = compose_wave(20, &mut rng());
        let swarm = w20.last().unwrap();
        assert_eq!(swarm.count, 25);
    }

    #[test]
    fn composition_is_deterministic_given_rng_state() {
        let a = compose_wave(7, &mut rng());
        let b = compose_wave(7, &mut rng());
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.spawn, y.spawn);
            assert_eq!(x.count, y.count);
        }
    }
}
