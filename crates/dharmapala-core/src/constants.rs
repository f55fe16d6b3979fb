//! Simulation constants, base-stat tables, and tuning parameters.

use crate::economy::Resources;
use crate::enums::{BossKind, DefenseKind, EnemyKind};

// --- Field & grid ---

/// Default field width in world units.
pub const FIELD_WIDTH: f64 = 800.0;

/// Default field height in world units.
pub const FIELD_HEIGHT: f64 = 600.0;

/// Grid cell size in world units.
pub const GRID_SIZE: f64 = 40.0;

/// Grid cell size on compact fields.
pub const COMPACT_GRID_SIZE: f64 = 30.0;

/// No defense may occupy a cell whose center is within this distance of
/// the path centerline.
pub const PATH_HALF_WIDTH: f64 = 20.0;

/// Margin beyond the field bounds at which projectiles expire.
pub const OOB_MARGIN: f64 = 50.0;

// --- Game setup ---

/// Starting ledger: dharma, bandwidth, anonymity.
pub const INITIAL_RESOURCES: Resources = Resources::new(100, 50, 75);

/// Starting lives. Zero is game over.
pub const INITIAL_LIVES: u32 = 20;

/// Total number of waves. Every 5th is a boss wave.
pub const MAX_WAVES: u32 = 20;

/// Wave interval at which a boss group is added.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

/// Delay between wave completion and the automatic start of the next.
pub const INTER_WAVE_DELAY_MS: f64 = 5000.0;

/// Default delay between spawns within an enemy group.
pub const GROUP_SPAWN_DELAY_MS: f64 = 1000.0;

// --- Movement ---

/// Distance at which an enemy is considered to have arrived at a waypoint.
pub const WAYPOINT_TOLERANCE: f64 = 2.0;

/// Base projectile speeds in the stat table are per-frame figures at a
/// nominal 60 Hz; world speed in units/s is base times this.
pub const PROJECTILE_SPEED_SCALE: f64 = 60.0;

/// Collision radius of every projectile.
pub const PROJECTILE_RADIUS: f64 = 5.0;

/// How long a homing projectile may fly with no target before expiring.
pub const PROJECTILE_WANDER_TIMEOUT_MS: f64 = 2000.0;

// --- Defenses ---

pub const MAX_DEFENSE_LEVEL: u8 = 5;

/// Floor on the effective fire interval.
pub const MIN_FIRE_RATE_MS: f64 = 100.0;

/// Special-ability active window.
pub const SPECIAL_DURATION_MS: f64 = 5000.0;

/// Special-ability cooldown, counted from activation.
pub const SPECIAL_COOLDOWN_MS: f64 = 30000.0;

/// Experience required to clear a level: 100 per current level.
pub const EXPERIENCE_PER_LEVEL: u64 = 100;

/// Fraction of invested cost refunded on sale.
pub const SELL_REFUND_FACTOR: f64 = 0.5;

// --- On-fire / on-hit effect tuning ---

/// Encryption scramble radius as a fraction of range, applied on fire.
pub const SCRAMBLE_RANGE_FACTOR: f64 = 0.5;
pub const SCRAMBLE_ON_FIRE_MS: f64 = 2000.0;
pub const SCRAMBLE_ON_HIT_MS: f64 = 1000.0;

/// Mirror reflection visual chance per shot.
pub const MIRROR_REFLECT_CHANCE: f64 = 0.1;

/// Anonymity cloak radius as a fraction of range, applied on fire.
pub const CLOAK_RANGE_FACTOR: f64 = 0.7;
pub const CLOAK_ON_FIRE_MS: f64 = 3000.0;
pub const STEALTH_ON_HIT_MS: f64 = 500.0;

/// Distributor boost radius as a fraction of range, applied on fire.
pub const BOOST_RANGE_FACTOR: f64 = 0.8;
pub const BOOST_ON_FIRE_MS: f64 = 2000.0;

/// Splash impact: area damage fraction and radius, plus a defense boost
/// pulse around the impact point.
pub const SPLASH_RADIUS: f64 = 50.0;
pub const SPLASH_DAMAGE_FACTOR: f64 = 0.5;
pub const SPLASH_BOOST_RADIUS: f64 = 100.0;
pub const SPLASH_BOOST_MS: f64 = 1000.0;

/// Anonymity special cloak radius as a fraction of range.
pub const SPECIAL_CLOAK_RANGE_FACTOR: f64 = 1.5;
pub const SPECIAL_ENCRYPT_MS: f64 = 3000.0;

/// Distributor special: reward multiplier while active.
pub const RESOURCE_BOOST_FACTOR: f64 = 2.0;

// --- Enemy passives ---

/// scriptKiddie jitter amplitude as a fraction of per-tick travel.
pub const KIDDIE_JITTER_FACTOR: f64 = 0.3;

/// federalAgent sprints near defenses.
pub const AGENT_SENSE_RADIUS: f64 = 200.0;
pub const AGENT_SPEED_FACTOR: f64 = 1.5;

/// corporateSaboteur self-stealth roll per tick.
pub const SABOTEUR_STEALTH_CHANCE: f64 = 0.01;
pub const SABOTEUR_STEALTH_MS: f64 = 2000.0;

/// aiSurveillance repulsion field around defenses.
pub const SURVEILLANCE_REPULSE_RADIUS: f64 = 300.0;
pub const SURVEILLANCE_REPULSE_WEIGHT: f64 = 200.0;

/// quantumHacker forward teleport roll per tick.
pub const HACKER_TELEPORT_CHANCE: f64 = 0.005;
pub const HACKER_TELEPORT_JUMP: f64 = 0.1;

/// corruptedMonk aura tuning.
pub const MONK_SPEED_FACTOR: f64 = 0.7;
pub const MONK_HEAL_RADIUS: f64 = 100.0;
pub const MONK_HEAL_PER_MS: f64 = 0.01;
pub const MONK_CORRUPT_RADIUS: f64 = 80.0;
pub const MONK_CORRUPT_MS: f64 = 1000.0;

// --- Bosses ---

/// Per-phase escalation applied on every phase transition.
pub const BOSS_PHASE_SPEED_FACTOR: f64 = 1.2;
pub const BOSS_PHASE_DAMAGE_FACTOR: f64 = 1.3;

/// raidTeam minion spawning.
pub const RAID_MINION_PERIOD_MS: f64 = 5000.0;
pub const RAID_MINION_BASE_COUNT: u32 = 3;
pub const RAID_MINION_HEALTH: f64 = 15.0;
pub const RAID_MINION_SPEED: f64 = 60.0;

/// raidTeam EMP blast.
pub const RAID_EMP_PERIOD_MS: f64 = 10000.0;
pub const RAID_EMP_RADIUS: f64 = 200.0;
pub const RAID_EMP_MS: f64 = 3000.0;

/// megaCorpTitan shield.
pub const TITAN_SHIELD_MAX: f64 = 100.0;
pub const TITAN_REGEN_PERIOD_MS: f64 = 8000.0;
pub const TITAN_REGEN_AMOUNT: f64 = 50.0;

/// megaCorpTitan market manipulation: roll per tick, fraction stolen.
pub const TITAN_THEFT_CHANCE: f64 = 0.01;
pub const TITAN_THEFT_FRACTION: f64 = 0.1;

// --- Wave bonuses ---

pub const WAVE_BONUS_BASE: u64 = 50;
pub const WAVE_BONUS_PER_WAVE: u64 = 10;
pub const WAVE_BONUS_BANDWIDTH_FRACTION: f64 = 0.5;
pub const WAVE_BONUS_ANONYMITY_FRACTION: f64 = 0.3;

// --- Display ---

/// Maximum recent positions kept per enemy trail.
pub const TRAIL_CAPACITY: usize = 10;

// --- Base stat tables ---

/// Base statistics of a defense kind, before level and modifiers.
#[derive(Debug, Clone, Copy)]
pub struct DefenseBase {
    pub cost: Resources,
    pub damage: f64,
    pub range: f64,
    pub fire_rate_ms: f64,
    pub projectile_speed: f64,
}

/// Base statistics of an enemy kind, before wave health scaling.
#[derive(Debug, Clone, Copy)]
pub struct EnemyBase {
    pub health: f64,
    pub speed: f64,
    pub reward: Resources,
    pub size: f64,
}

/// Base statistics of a boss kind.
#[derive(Debug, Clone, Copy)]
pub struct BossBase {
    pub health: f64,
    pub speed: f64,
    pub reward: Resources,
    pub size: f64,
    pub phases: u8,
}

pub fn defense_base(kind: DefenseKind) -> DefenseBase {
    match kind {
        DefenseKind::Firewall => DefenseBase {
            cost: Resources::new(25, 0, 0),
            damage: 15.0,
            range: 200.0,
            fire_rate_ms: 1000.0,
            projectile_speed: 5.0,
        },
        DefenseKind::Encryption => DefenseBase {
            cost: Resources::new(50, 20, 10),
            damage: 25.0,
            range: 180.0,
            fire_rate_ms: 1500.0,
            projectile_speed: 4.0,
        },
        DefenseKind::Decoy => DefenseBase {
            cost: Resources::new(30, 15, 5),
            damage: 0.0,
            range: 150.0,
            fire_rate_ms: 0.0,
            projectile_speed: 0.0,
        },
        DefenseKind::Mirror => DefenseBase {
            cost: Resources::new(75, 40, 20),
            damage: 40.0,
            range: 250.0,
            fire_rate_ms: 2000.0,
            projectile_speed: 8.0,
        },
        DefenseKind::Anonymity => DefenseBase {
            cost: Resources::new(60, 30, 40),
            damage: 20.0,
            range: 300.0,
            fire_rate_ms: 1200.0,
            projectile_speed: 6.0,
        },
        DefenseKind::Distributor => DefenseBase {
            cost: Resources::new(100, 60, 30),
            damage: 30.0,
            range: 350.0,
            fire_rate_ms: 800.0,
            projectile_speed: 7.0,
        },
    }
}

pub fn enemy_base(kind: EnemyKind) -> EnemyBase {
    match kind {
        EnemyKind::ScriptKiddie => EnemyBase {
            health: 20.0,
            speed: 80.0,
            reward: Resources::new(5, 2, 1),
            size: 15.0,
        },
        EnemyKind::FederalAgent => EnemyBase {
            health: 40.0,
            speed: 60.0,
            reward: Resources::new(10, 5, 3),
            size: 18.0,
        },
        EnemyKind::CorporateSaboteur => EnemyBase {
            health: 35.0,
            speed: 70.0,
            reward: Resources::new(15, 8, 5),
            size: 16.0,
        },
        EnemyKind::AiSurveillance => EnemyBase {
            health: 60.0,
            speed: 50.0,
            reward: Resources::new(20, 12, 8),
            size: 20.0,
        },
        EnemyKind::QuantumHacker => EnemyBase {
            health: 80.0,
            speed: 90.0,
            reward: Resources::new(30, 20, 15),
            size: 22.0,
        },
        EnemyKind::CorruptedMonk => EnemyBase {
            health: 100.0,
            speed: 40.0,
            reward: Resources::new(50, 30, 25),
            size: 25.0,
        },
    }
}

pub fn boss_base(kind: BossKind) -> BossBase {
    match kind {
        BossKind::RaidTeam => BossBase {
            health: 500.0,
            speed: 30.0,
            reward: Resources::new(100, 60, 40),
            size: 40.0,
            phases: 3,
        },
        BossKind::MegaCorpTitan => BossBase {
            health: 800.0,
            speed: 20.0,
            reward: Resources::new(200, 120, 80),
            size: 50.0,
            phases: 4,
        },
    }
}
