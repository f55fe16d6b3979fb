//! Typed error taxonomy for commands and save documents.
//!
//! Every rejected command leaves the engine state untouched.

use thiserror::Error;

use crate::economy::Resources;
use crate::types::GridCell;

/// Reasons a player command is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("cell ({},{}) is already occupied", .0.gx, .0.gy)]
    CellOccupied(GridCell),

    #[error("cell ({},{}) overlaps the path", .0.gx, .0.gy)]
    CellOnPath(GridCell),

    #[error("cell ({},{}) is outside the field", .0.gx, .0.gy)]
    CellOutOfBounds(GridCell),

    #[error("insufficient resources: need {needed:?}, have {available:?}")]
    InsufficientResources {
        needed: Resources,
        available: Resources,
    },

    #[error("defense {0} does not exist")]
    NoSuchDefense(u32),

    #[error("defense {0} is already at max level")]
    MaxLevel(u32),

    #[error("special ability of defense {0} is on cooldown")]
    SpecialOnCooldown(u32),

    #[error("defense {0} is disabled")]
    DefenseDisabled(u32),

    #[error("a wave is already in progress")]
    WaveInProgress,

    #[error("command requires an active game")]
    NotPlaying,
}

/// Reasons a save document is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error("unsupported save version {found} (expected major {expected_major})")]
    VersionUnsupported { found: String, expected_major: u32 },

    #[error("malformed save document: {0}")]
    Malformed(String),
}
