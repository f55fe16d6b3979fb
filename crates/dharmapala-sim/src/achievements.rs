//! Achievement monitor.
//!
//! Declarative unlock rules over a handful of integer counters. Unlocks
//! latch: once earned they never re-fire, and each credits its reward and
//! emits one event. Category-complete and all-complete meta-achievements
//! fire when their underlying sets close.

use dharmapala_core::economy::Resources;
use dharmapala_core::events::GameEvent;

/// Counters the monitor tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    EnemiesKilled,
    BossesKilled,
    WavesCompleted,
    DefensesBuilt,
    MaxedDefenses,
    DharmaEarned,
    GamesCompleted,
}

impl Counter {
    const COUNT: usize = 7;

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Combat,
    Building,
    Progression,
    Economy,
}

/// A single unlock rule.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub counter: Counter,
    pub requirement: u64,
    pub reward: Resources,
}

/// Meta rule: a category closing, or everything closing.
#[derive(Debug, Clone, Copy)]
pub struct MetaDef {
    pub id: &'static str,
    pub name: &'static str,
    /// None = all achievements complete.
    pub category: Option<Category>,
    pub reward: Resources,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_defense",
        name: "First Line of Defense",
        category: Category::Building,
        counter: Counter::DefensesBuilt,
        requirement: 1,
        reward: Resources::new(25, 10, 5),
    },
    AchievementDef {
        id: "network_architect",
        name: "Network Architect",
        category: Category::Building,
        counter: Counter::DefensesBuilt,
        requirement: 10,
        reward: Resources::new(100, 50, 25),
    },
    AchievementDef {
        id: "fully_realized",
        name: "Fully Realized",
        category: Category::Building,
        counter: Counter::MaxedDefenses,
        requirement: 1,
        reward: Resources::new(150, 75, 40),
    },
    AchievementDef {
        id: "first_blood",
        name: "First Intrusion Repelled",
        category: Category::Combat,
        counter: Counter::EnemiesKilled,
        requirement: 1,
        reward: Resources::new(10, 5, 2),
    },
    AchievementDef {
        id: "exorcist",
        name: "Exorcist",
        category: Category::Combat,
        counter: Counter::EnemiesKilled,
        requirement: 100,
        reward: Resources::new(200, 100, 50),
    },
    AchievementDef {
        id: "boss_slayer",
        name: "Titan Toppler",
        category: Category::Combat,
        counter: Counter::BossesKilled,
        requirement: 1,
        reward: Resources::new(250, 150, 100),
    },
    AchievementDef {
        id: "wave_survivor",
        name: "Storm Rider",
        category: Category::Progression,
        counter: Counter::WavesCompleted,
        requirement: 5,
        reward: Resources::new(100, 50, 30),
    },
    AchievementDef {
        id: "halfway_there",
        name: "Halfway to Nirvana",
        category: Category::Progression,
        counter: Counter::WavesCompleted,
        requirement: 10,
        reward: Resources::new(200, 100, 60),
    },
    AchievementDef {
        id: "liberation",
        name: "Liberation",
        category: Category::Progression,
        counter: Counter::GamesCompleted,
        requirement: 1,
        reward: Resources::new(500, 300, 200),
    },
    AchievementDef {
        id: "merit_accumulator",
        name: "Merit Accumulator",
        category: Category::Economy,
        counter: Counter::DharmaEarned,
        requirement: 1000,
        reward: Resources::new(100, 100, 100),
    },
];

pub const META_ACHIEVEMENTS: &[MetaDef] = &[
    MetaDef {
        id: "combat_mastery",
        name: "Wrathful Guardian",
        category: Some(Category::Combat),
        reward: Resources::new(300, 150, 100),
    },
    MetaDef {
        id: "building_mastery",
        name: "Mandala Builder",
        category: Some(Category::Building),
        reward: Resources::new(300, 150, 100),
    },
    MetaDef {
        id: "progression_mastery",
        name: "Unbroken Path",
        category: Some(Category::Progression),
        reward: Resources::new(300, 150, 100),
    },
    MetaDef {
        id: "economy_mastery",
        name: "Karmic Banker",
        category: Some(Category::Economy),
        reward: Resources::new(300, 150, 100),
    },
    MetaDef {
        id: "enlightened",
        name: "Enlightened",
        category: None,
        reward: Resources::new(1000, 600, 400),
    },
];

/// A newly earned unlock.
#[derive(Debug, Clone, Copy)]
pub struct Unlock {
    pub id: &'static str,
    pub reward: Resources,
}

/// Counter state plus the latched unlock set.
#[derive(Debug, Clone, Default)]
pub struct AchievementMonitor {
    counters: [u64; Counter::COUNT],
    unlocked: Vec<&'static str>,
}

impl AchievementMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, counter: Counter) -> u64 {
        self.counters[counter.index()]
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| *u == id)
    }

    pub fn unlocked(&self) -> &[&'static str] {
        &self.unlocked
    }

    /// Bump a counter and return every unlock it latched, meta included.
    pub fn advance(&mut self, counter: Counter, amount: u64) -> Vec<Unlock> {
        self.counters[counter.index()] =
            self.counters[counter.index()].saturating_add(amount);

        let mut unlocks = Vec::new();
        for def in ACHIEVEMENTS {
            if def.counter == counter
                && self.counters[counter.index()] >= def.requirement
                && !self.is_unlocked(def.id)
            {
                self.unlocked.push(def.id);
                unlocks.push(Unlock {
                    id: def.id,
                    reward: def.reward,
                });
            }
        }

        for meta in META_ACHIEVEMENTS {
            if self.is_unlocked(meta.id) {
                continue;
            }
            let complete = ACHIEVEMENTS
                .iter()
                .filter(|def| meta.category.map_or(true, |c| def.category == c))
                .all(|def| self.is_unlocked(def.id));
            if complete {
                self.unlocked.push(meta.id);
                unlocks.push(Unlock {
                    id: meta.id,
                    reward: meta.reward,
                });
            }
        }

        unlocks
    }
}

/// Bump a counter, credit any latched rewards, and emit unlock events.
pub fn record(
    monitor: &mut AchievementMonitor,
    counter: Counter,
    amount: u64,
    resources: &mut Resources,
    events: &mut Vec<GameEvent>,
) {
    if amount == 0 {
        return;
    }
    for unlock in monitor.advance(counter, amount) {
        resources.credit(&unlock.reward);
        events.push(GameEvent::AchievementUnlocked {
            id: unlock.id.to_string(),
            reward: unlock.reward,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_latches_once() {
        let mut monitor = AchievementMonitor::new();
        let first = monitor.advance(Counter::DefensesBuilt, 1);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "first_defense");

        let again = monitor.advance(Counter::DefensesBuilt, 1);
        assert!(again.is_empty(), "already-latched unlock re-fired");
    }

    #[test]
    fn threshold_crossing_mid_amount() {
        let mut monitor = AchievementMonitor::new();
        monitor.advance(Counter::EnemiesKilled, 99);
        assert!(!monitor.is_unlocked("exorcist"));
        let unlocks = monitor.advance(Counter::EnemiesKilled, 5);
        assert!(unlocks.iter().any(|u| u.id == "exorcist"));
        assert_eq!(monitor.counter(Counter::EnemiesKilled), 104);
    }

    #[test]
    fn category_meta_fires_when_category_closes() {
        let mut monitor = AchievementMonitor::new();
        monitor.advance(Counter::EnemiesKilled, 100);
        assert!(!monitor.is_unlocked("combat_mastery"));
        let unlocks = monitor.advance(Counter::BossesKilled, 1);
        assert!(
            unlocks.iter().any(|u| u.id == "combat_mastery"),
            "combat category complete should latch its meta"
        );
    }

    #[test]
    fn all_complete_meta_fires_last() {
        let mut monitor = AchievementMonitor::new();
        monitor.advance(Counter::EnemiesKilled, 100);
        monitor.advance(Counter::BossesKilled, 1);
        monitor.advance(Counter::DefensesBuilt, 10);
        monitor.advance(Counter::MaxedDefenses, 1);
        monitor.advance(Counter::WavesCompleted, 10);
        monitor.advance(Counter::DharmaEarned, 1000);
        assert!(!monitor.is_unlocked("enlightened"));

        let unlocks = monitor.advance(Counter::GamesCompleted, 1);
        assert!(unlocks.iter().any(|u| u.id == "liberation"));
        assert!(unlocks.iter().any(|u| u.id == "enlightened"));
    }

    #[test]
    fn record_credits_rewards_and_emits_events() {
        let mut monitor = AchievementMonitor::new();
        let mut resources = Resources::ZERO;
        let mut events = Vec::new();
        record(
            &mut monitor,
            Counter::DefensesBuilt,
            1,
            &mut resources,
            &mut events,
        );
        assert_eq!(resources, Resources::new(25, 10, 5));
        assert!(matches!(
            events.as_slice(),
            [GameEvent::AchievementUnlocked { id, .. }] if id == "first_defense"
        ));
    }
}
