//! Save capture and restore.
//!
//! Capture walks the world into the versioned document; restore validates
//! first and builds a complete fresh engine, so a refused document leaves
//! the caller's state untouched. Projectiles and pending wave spawns are
//! not persisted; the RNG restarts from the saved seed.

use dharmapala_core::components::*;
use dharmapala_core::constants::MONK_CORRUPT_MS;
use dharmapala_core::economy::upgrade_cost;
use dharmapala_core::enums::{AttackerKind, EffectKind};
use dharmapala_core::errors::SaveError;
use dharmapala_core::save::*;
use dharmapala_core::status::StatusEffects;
use dharmapala_core::types::{GridCell, Position};

use crate::engine::{EngineConfig, GameEngine};
use crate::spawn;

/// Capture the engine state as a save document.
pub fn to_save(engine: &GameEngine, timestamp: u64) -> SaveDoc {
    let mut defenses: Vec<(u32, SavedDefense)> = engine
        .world
        .query::<(&Defense, &DefenseState, &StatusEffects, &Position)>()
        .iter()
        .map(|(_, (_, st, fx, pos))| {
            let mut buffs = Vec::new();
            let mut debuffs = Vec::new();
            for effect in fx.iter() {
                let pair = (effect.kind, effect.remaining_ms);
                if effect.kind.is_buff() {
                    buffs.push(pair);
                } else {
                    debuffs.push(pair);
                }
            }
            // Corruption is permanent even after the aura tag expires;
            // keep a debuff entry so restore sees it.
            if st.corrupted && !debuffs.iter().any(|(k, _)| *k == EffectKind::Corrupted) {
                debuffs.push((EffectKind::Corrupted, MONK_CORRUPT_MS));
            }
            (
                st.id,
                SavedDefense {
                    x: pos.x,
                    y: pos.y,
                    kind: st.kind,
                    level: st.level,
                    experience: st.experience,
                    exp_to_next: st.experience_to_next(),
                    buffs,
                    debuffs,
                },
            )
        })
        .collect();
    defenses.sort_by_key(|(id, _)| *id);

    let mut enemies: Vec<(u32, SavedEnemy)> = engine
        .world
        .query::<(
            &Enemy,
            &EnemyState,
            &Position,
            &StatusEffects,
            Option<&BossState>,
        )>()
        .iter()
        .filter(|(_, (_, st, _, _, _))| !st.dead)
        .map(|(_, (_, st, pos, fx, boss))| {
            (
                st.id,
                SavedEnemy {
                    x: pos.x,
                    y: pos.y,
                    kind: st.kind,
                    health: st.health,
                    max_health: st.max_health,
                    path_index: st.waypoint_index,
                    progress: st.progress,
                    status: fx.to_pairs(),
                    phase: boss.map(|b| b.current_phase),
                    shield: boss.and_then(|b| b.shield.map(|s| s.active)),
                    shield_hp: boss.and_then(|b| b.shield.map(|s| s.health)),
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(id, _)| *id);

    SaveDoc {
        version: SAVE_VERSION.to_string(),
        timestamp,
        game: SavedGame {
            state: engine.phase,
            resources: engine.resources,
            lives: engine.lives,
            wave: engine.wave.current,
            score: engine.score,
            seed: engine.config.seed,
            path_shape: engine.config.shape,
            defenses: defenses.into_iter().map(|(_, d)| d).collect(),
            enemies: enemies.into_iter().map(|(_, e)| e).collect(),
            level: SavedLevel {
                current_wave: engine.wave.current,
                wave_in_progress: engine.wave.in_progress,
                wave_timer_ms: engine.wave.inter_wave_timer_ms.unwrap_or(0.0),
            },
            selected_defense_type: engine.selected_defense,
        },
    }
}

/// Build a fresh engine from a save document.
pub fn from_save(doc: &SaveDoc, mut config: EngineConfig) -> Result<GameEngine, SaveError> {
    match check_version(&doc.version)? {
        VersionCheck::Exact => {}
        VersionCheck::MinorMismatch => {
            tracing::warn!(
                found = %doc.version,
                supported = SAVE_VERSION,
                "minor save version mismatch, loading best-effort"
            );
        }
    }

    let game = &doc.game;
    config.seed = game.seed;
    config.shape = game.path_shape;

    let mut engine = GameEngine::new(config);
    engine.new_game(game.seed, game.path_shape);
    engine.phase = game.state;
    engine.resources = game.resources;
    engine.lives = game.lives;
    engine.score = game.score;
    engine.selected_defense = game.selected_defense_type;
    engine.wave.current = game.level.current_wave;
    engine.wave.in_progress = game.level.wave_in_progress;
    engine.wave.inter_wave_timer_ms = if game.level.wave_timer_ms > 0.0 {
        Some(game.level.wave_timer_ms)
    } else {
        None
    };

    for saved in &game.defenses {
        restore_defense(&mut engine, saved)?;
    }
    for saved in &game.enemies {
        restore_enemy(&mut engine, saved)?;
    }

    Ok(engine)
}

fn restore_defense(engine: &mut GameEngine, saved: &SavedDefense) -> Result<(), SaveError> {
    let grid = engine.config.grid_size;
    let cell = GridCell::new(
        (saved.x / grid).floor() as i32,
        (saved.y / grid).floor() as i32,
    );
    if engine.occupied.contains_key(&cell) {
        return Err(SaveError::Malformed(format!(
            "two defenses on cell ({}, {})",
            cell.gx, cell.gy
        )));
    }
    if !(1..=dharmapala_core::constants::MAX_DEFENSE_LEVEL).contains(&saved.level) {
        return Err(SaveError::Malformed(format!(
            "defense level {} out of range",
            saved.level
        )));
    }

    let id = engine.next_defense_id;
    engine.next_defense_id += 1;
    let entity = spawn::spawn_defense(&mut engine.world, id, saved.kind, cell, grid);
    engine.occupied.insert(cell, id);

    let base_cost = dharmapala_core::constants::defense_base(saved.kind).cost;
    if let Ok(mut st) = engine.world.get::<&mut DefenseState>(entity) {
        st.level = saved.level;
        st.experience = saved.experience;
        for level in 1..saved.level {
            st.invested.credit(&upgrade_cost(&base_cost, level));
        }
        st.corrupted = saved
            .debuffs
            .iter()
            .any(|(kind, _)| *kind == EffectKind::Corrupted);
    }
    if let Ok(mut fx) = engine.world.get::<&mut StatusEffects>(entity) {
        *fx = StatusEffects::from_pairs(&saved.buffs);
        for &(kind, remaining_ms) in &saved.debuffs {
            fx.apply(dharmapala_core::status::Effect::new(kind, remaining_ms));
        }
    }
    Ok(())
}

fn restore_enemy(engine: &mut GameEngine, saved: &SavedEnemy) -> Result<(), SaveError> {
    let id = engine.next_enemy_id;
    engine.next_enemy_id += 1;

    let entity = match saved.kind {
        AttackerKind::Enemy(kind) => {
            spawn::spawn_enemy(&mut engine.world, &engine.path, id, kind, 1.0)
        }
        AttackerKind::Boss(kind) => spawn::spawn_boss(&mut engine.world, &engine.path, id, kind),
    };

    let waypoint_cap = engine.path.points().len();
    if let Ok(mut st) = engine.world.get::<&mut EnemyState>(entity) {
        st.max_health = saved.max_health;
        st.health = saved.health.clamp(0.0, saved.max_health);
        st.waypoint_index = saved.path_index.clamp(1, waypoint_cap);
        st.progress = saved.progress.clamp(0.0, 1.0);
    }
    if let Ok(mut pos) = engine.world.get::<&mut Position>(entity) {
        *pos = Position::new(saved.x, saved.y);
    }
    if let Ok(mut fx) = engine.world.get::<&mut StatusEffects>(entity) {
        *fx = StatusEffects::from_pairs(&saved.status);
    }

    if let Ok(mut boss) = engine.world.get::<&mut BossState>(entity) {
        let phase = saved.phase.unwrap_or(1).clamp(1, boss.phases);
        boss.current_phase = phase;
        if let Some(shield) = &mut boss.shield {
            if let Some(active) = saved.shield {
                shield.active = active;
            }
            if let Some(hp) = saved.shield_hp {
                shield.health = hp.clamp(0.0, shield.max_health);
            }
        }
        // Per-phase escalation is derived state; reapply it.
        if let Ok(mut st) = engine.world.get::<&mut EnemyState>(entity) {
            for _ in 1..phase {
                st.base_speed *= dharmapala_core::constants::BOSS_PHASE_SPEED_FACTOR;
                st.end_damage = (st.end_damage as f64
                    * dharmapala_core::constants::BOSS_PHASE_DAMAGE_FACTOR)
                    .floor() as u32;
            }
        }
    }
    Ok(())
}
