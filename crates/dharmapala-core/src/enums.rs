//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Defense (tower) kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefenseKind {
    #[default]
    Firewall,
    Encryption,
    /// Never targets or fires; consumes a path-adjacent slot.
    Decoy,
    Mirror,
    Anonymity,
    Distributor,
}

/// Enemy kinds, in the canonical escalation order used by wave plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnemyKind {
    #[default]
    ScriptKiddie,
    FederalAgent,
    CorporateSaboteur,
    AiSurveillance,
    QuantumHacker,
    CorruptedMonk,
}

/// Boss kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BossKind {
    /// 3 phases; spawns minions and fires EMP blasts.
    RaidTeam,
    /// 4 phases; shielded, regenerates, steals resources.
    MegaCorpTitan,
}

/// Any attacker kind: a regular enemy or a boss. Serializes as the
/// underlying name ("scriptKiddie", "raidTeam", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttackerKind {
    Enemy(EnemyKind),
    Boss(BossKind),
}

impl AttackerKind {
    pub fn is_boss(&self) -> bool {
        matches!(self, AttackerKind::Boss(_))
    }

    pub fn as_enemy(&self) -> Option<EnemyKind> {
        match self {
            AttackerKind::Enemy(kind) => Some(*kind),
            AttackerKind::Boss(_) => None,
        }
    }
}

impl From<EnemyKind> for AttackerKind {
    fn from(kind: EnemyKind) -> Self {
        AttackerKind::Enemy(kind)
    }
}

impl From<BossKind> for AttackerKind {
    fn from(kind: BossKind) -> Self {
        AttackerKind::Boss(kind)
    }
}

/// Path generator shape selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathShape {
    #[default]
    Default,
    Spiral,
    Zigzag,
    Loop,
    Cross,
}

/// Projectile flight/impact semantics, inherited from the firing defense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectileKind {
    /// Ballistic; hits its target once.
    #[default]
    Standard,
    /// Passes through enemies, damaging each at most once.
    Piercing,
    /// Steers toward its target and re-acquires when the target dies.
    Homing,
    /// Damages an area around the impact point.
    Splash,
    /// Applies a short stealth tag to the victim on impact.
    Cloak,
}

/// Timed status-effect kinds. At most one active instance per kind per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    Frozen,
    Burning,
    Poisoned,
    Slowed,
    Hasted,
    Stealthed,
    Scrambled,
    Cloaked,
    Boosted,
    Corrupted,
    Emp,
    Reflection,
    Encrypted,
    Weakened,
    Blinded,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    MainMenu,
    Playing,
    GameOver,
    Victory,
}

impl DefenseKind {
    pub const ALL: [DefenseKind; 6] = [
        DefenseKind::Firewall,
        DefenseKind::Encryption,
        DefenseKind::Decoy,
        DefenseKind::Mirror,
        DefenseKind::Anonymity,
        DefenseKind::Distributor,
    ];

    /// Projectile semantics fired by this defense kind.
    /// Decoys never fire; the mapping is unused for them.
    pub fn projectile_kind(&self) -> ProjectileKind {
        match self {
            DefenseKind::Firewall | DefenseKind::Decoy => ProjectileKind::Standard,
            DefenseKind::Encryption => ProjectileKind::Piercing,
            DefenseKind::Mirror => ProjectileKind::Homing,
            DefenseKind::Anonymity => ProjectileKind::Cloak,
            DefenseKind::Distributor => ProjectileKind::Splash,
        }
    }

    /// Dense index for resistance tables.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl EnemyKind {
    /// Canonical escalation order: wave plans introduce kinds in this order.
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::ScriptKiddie,
        EnemyKind::FederalAgent,
        EnemyKind::CorporateSaboteur,
        EnemyKind::AiSurveillance,
        EnemyKind::QuantumHacker,
        EnemyKind::CorruptedMonk,
    ];
}

impl BossKind {
    pub fn phases(&self) -> u8 {
        match self {
            BossKind::RaidTeam => 3,
            BossKind::MegaCorpTitan => 4,
        }
    }
}

impl EffectKind {
    pub const COUNT: usize = 15;

    pub const ALL: [EffectKind; Self::COUNT] = [
        EffectKind::Frozen,
        EffectKind::Burning,
        EffectKind::Poisoned,
        EffectKind::Slowed,
        EffectKind::Hasted,
        EffectKind::Stealthed,
        EffectKind::Scrambled,
        EffectKind::Cloaked,
        EffectKind::Boosted,
        EffectKind::Corrupted,
        EffectKind::Emp,
        EffectKind::Reflection,
        EffectKind::Encrypted,
        EffectKind::Weakened,
        EffectKind::Blinded,
    ];

    /// Dense slot index for the per-actor effect table.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether this effect helps its carrier (buff) or hinders it (debuff).
    pub fn is_buff(&self) -> bool {
        matches!(
            self,
            EffectKind::Hasted
                | EffectKind::Stealthed
                | EffectKind::Cloaked
                | EffectKind::Boosted
                | EffectKind::Reflection
                | EffectKind::Encrypted
        )
    }
}
