//! Versioned save document.
//!
//! The document is plain serde data; the engine crate owns the
//! capture/restore logic. A major-version mismatch refuses to load; a
//! minor-version mismatch loads best-effort (the caller logs a warning).

use serde::{Deserialize, Serialize};

use crate::economy::Resources;
use crate::enums::{AttackerKind, DefenseKind, EffectKind, GamePhase, PathShape};
use crate::errors::SaveError;

/// Version written by this implementation.
pub const SAVE_VERSION: &str = "1.0";

/// Major version this implementation can load.
pub const SAVE_MAJOR: u32 = 1;

/// Top-level save document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDoc {
    pub version: String,
    /// Wall-clock seconds supplied by the caller; the engine never reads
    /// a clock.
    pub timestamp: u64,
    pub game: SavedGame,
}

/// The serialized game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub state: GamePhase,
    pub resources: Resources,
    pub lives: u32,
    pub wave: u32,
    pub score: u64,
    pub seed: u64,
    pub path_shape: PathShape,
    pub defenses: Vec<SavedDefense>,
    pub enemies: Vec<SavedEnemy>,
    pub level: SavedLevel,
    pub selected_defense_type: Option<DefenseKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDefense {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: DefenseKind,
    pub level: u8,
    pub experience: u64,
    pub exp_to_next: u64,
    /// Beneficial effects as `[kind, remaining_ms]` pairs.
    pub buffs: Vec<(EffectKind, f64)>,
    /// Detrimental effects as `[kind, remaining_ms]` pairs.
    pub debuffs: Vec<(EffectKind, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEnemy {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: AttackerKind,
    pub health: f64,
    pub max_health: f64,
    pub path_index: usize,
    pub progress: f64,
    pub status: Vec<(EffectKind, f64)>,
    /// Boss fields, absent for ordinary enemies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shield: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shield_hp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLevel {
    pub current_wave: u32,
    pub wave_in_progress: bool,
    /// Remaining inter-wave countdown, 0 when not armed.
    pub wave_timer_ms: f64,
}

/// Outcome of a version check on a loadable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    Exact,
    /// Same major, different minor: load best-effort.
    MinorMismatch,
}

/// Validate a document version against what this build can load.
pub fn check_version(version: &str) -> Result<VersionCheck, SaveError> {
    let mut parts = version.split('.');
    let major: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| SaveError::Malformed(format!("bad version string {version:?}")))?;
    let minor: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| SaveError::Malformed(format!("bad version string {version:?}")))?;

    if major != SAVE_MAJOR {
        return Err(SaveError::VersionUnsupported {
            found: version.to_string(),
            expected_major: SAVE_MAJOR,
        });
    }
    if format!("{major}.{minor}") == SAVE_VERSION {
        Ok(VersionCheck::Exact)
    } else {
        Ok(VersionCheck::MinorMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_version_is_exact() {
        assert_eq!(check_version(SAVE_VERSION).unwrap(), VersionCheck::Exact);
    }

    #[test]
    fn minor_mismatch_is_best_effort() {
        assert_eq!(
            check_version("1.3").unwrap(),
            VersionCheck::MinorMismatch
        );
    }

    #[test]
    fn major_mismatch_refuses() {
        assert!(matches!(
            check_version("2.0"),
            Err(SaveError::VersionUnsupported { .. })
        ));
    }

    #[test]
    fn garbage_version_is_malformed() {
        assert!(matches!(
            check_version("abc"),
            Err(SaveError::Malformed(_))
        ));
    }
}
