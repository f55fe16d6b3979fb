//! Wave scheduling: group spawn cursors, completion detection, and the
//! inter-wave countdown.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::components::{Enemy, EnemyState};
use dharmapala_core::constants::*;
use dharmapala_core::economy::Resources;
use dharmapala_core::events::GameEvent;
use dharmapala_path::Path;

use crate::plan::{compose_wave, EnemyGroup, SpawnKind};
use crate::spawn;

/// One group's emission cursor.
#[derive(Debug, Clone)]
pub struct GroupCursor {
    pub group: EnemyGroup,
    pub remaining: u32,
    pub next_spawn_at_ms: f64,
}

/// Scheduler state for the current wave.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Last started wave, 0 before the first.
    pub current: u32,
    pub in_progress: bool,
    pub cursors: Vec<GroupCursor>,
    /// Armed after a wave completes; auto-starts the next wave at zero.
    pub inter_wave_timer_ms: Option<f64>,
}

impl WaveState {
    /// Load the plan for `wave` and arm every group's first spawn for now.
    pub fn start(&mut self, wave: u32, now_ms: f64, rng: &mut ChaCha8Rng) {
        self.current = wave;
        self.in_progress = true;
        self.inter_wave_timer_ms = None;
        self.cursors = compose_wave(wave, rng)
            .into_iter()
            .map(|group| GroupCursor {
                remaining: group.count,
                next_spawn_at_ms: now_ms,
                group,
            })
            .collect();
    }

    pub fn pending_spawns(&self) -> u32 {
        self.cursors.iter().map(|c| c.remaining).sum()
    }

    pub fn all_spawned(&self) -> bool {
        self.cursors.iter().all(|c| c.remaining == 0)
    }
}

/// Emit at most one enemy per due group this tick.
pub fn run_spawns(
    world: &mut World,
    path: &Path,
    state: &mut WaveState,
    now_ms: f64,
    next_enemy_id: &mut u32,
    events: &mut Vec<GameEvent>,
) {
    if !state.in_progress {
        return;
    }
    for cursor in &mut state.cursors {
        if cursor.remaining == 0 || now_ms < cursor.next_spawn_at_ms {
            continue;
        }
        let id = *next_enemy_id;
        *next_enemy_id += 1;

        let kind = match cursor.group.spawn {
            SpawnKind::Enemy(kind) => {
                spawn::spawn_enemy(world, path, id, kind, cursor.group.health_multiplier);
                kind.into()
            }
            SpawnKind::Boss(kind) => {
                spawn::spawn_boss(world, path, id, kind);
                kind.into()
            }
        };
        events.push(GameEvent::EnemySpawned {
            id,
            kind,
            wave: state.current,
        });

        cursor.remaining -= 1;
        cursor.next_spawn_at_ms += cursor.group.spawn_delay_ms;
    }
}

/// A wave completes when every group is exhausted and no enemies remain.
/// Returns the credited bonus when the wave just completed.
pub fn check_completion(
    world: &World,
    state: &mut WaveState,
    resources: &mut Resources,
    score: &mut u64,
    resource_boost: f64,
    events: &mut Vec<GameEvent>,
) -> Option<Resources> {
    if !state.in_progress || !state.all_spawned() {
        return None;
    }
    let any_alive = world
        .query::<(&Enemy, &EnemyState)>()
        .iter()
        .any(|(_, (_, st))| !st.dead);
    if any_alive {
        return None;
    }

    state.in_progress = false;
    state.inter_wave_timer_ms = Some(INTER_WAVE_DELAY_MS);

    let dharma = WAVE_BONUS_BASE + WAVE_BONUS_PER_WAVE * state.current as u64;
    let bonus = Resources::new(
        dharma,
        (dharma as f64 * WAVE_BONUS_BANDWIDTH_FRACTION).floor() as u64,
        (dharma as f64 * WAVE_BONUS_ANONYMITY_FRACTION).floor() as u64,
    );
    let credited = spawn::boosted_reward(&bonus, resource_boost);
    resources.credit(&credited);
    *score += dharma;

    events.push(GameEvent::WaveCompleted {
        wave: state.current,
        bonus: credited,
    });
    Some(credited)
}
