//! Player commands sent to the engine.
//!
//! Commands are serviced at tick boundaries, never mid-tick. Each maps to
//! an engine method; this enum exists for embeddings that drive the engine
//! over a serialized channel.

use serde::{Deserialize, Serialize};

use crate::enums::{DefenseKind, PathShape};
use crate::types::GridCell;

/// All player actions expressible over the command surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Reset everything and begin a fresh game.
    NewGame { seed: u64, shape: PathShape },
    /// Start the next wave (or zero the inter-wave countdown).
    StartWave,
    /// Place a defense of `kind` on `cell`.
    PlaceDefense { cell: GridCell, kind: DefenseKind },
    /// Pay to raise a defense one level.
    UpgradeDefense { id: u32 },
    /// Remove a defense and refund part of its invested cost.
    SellDefense { id: u32 },
    /// Trigger a defense's special ability.
    ActivateSpecial { id: u32 },
    /// Remember the build-menu selection (persisted in saves).
    SelectDefenseType { kind: DefenseKind },
}
