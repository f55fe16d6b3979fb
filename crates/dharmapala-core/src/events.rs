//! Events emitted by the engine for UI, audio, and achievement feedback.
//!
//! Events accumulate in a per-tick buffer and are delivered, in emission
//! order, when the tick completes. Handlers never see mid-tick state.

use serde::{Deserialize, Serialize};

use crate::economy::Resources;
use crate::enums::{AttackerKind, BossKind, DefenseKind};
use crate::types::GridCell;

/// Everything observable on the engine's event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemySpawned {
        id: u32,
        kind: AttackerKind,
        wave: u32,
    },
    EnemyKilled {
        id: u32,
        kind: AttackerKind,
        reward: Resources,
    },
    EnemyReachedEnd {
        id: u32,
        kind: AttackerKind,
        lives_lost: u32,
    },
    DefensePlaced {
        id: u32,
        kind: DefenseKind,
        cell: GridCell,
    },
    DefenseSold {
        id: u32,
        refund: Resources,
    },
    DefenseFired {
        id: u32,
        projectile_id: u32,
        target_id: u32,
    },
    ProjectileHit {
        projectile_id: u32,
        target_id: u32,
        damage: f64,
    },
    WaveStarted {
        wave: u32,
    },
    WaveCompleted {
        wave: u32,
        bonus: Resources,
    },
    BossPhaseChange {
        id: u32,
        kind: BossKind,
        from: u8,
        to: u8,
    },
    ShieldBroken {
        id: u32,
    },
    AchievementUnlocked {
        id: String,
        reward: Resources,
    },
    GameOver,
    Victory,
    CommandRejected {
        reason: String,
    },
}
