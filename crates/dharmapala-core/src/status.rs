//! Per-actor status-effect table.
//!
//! A dense slot array keyed by [`EffectKind`]: application and lookup are
//! O(1), iteration touches a fixed 15 slots. Re-applying an effect keeps
//! the longer remaining duration and the larger magnitude; expiry is
//! silent.

use serde::{Deserialize, Serialize};

use crate::enums::EffectKind;

/// A single timed effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub remaining_ms: f64,
    /// Strength for effects that carry one (e.g. damage-over-time in hp/s).
    pub magnitude: Option<f64>,
}

impl Effect {
    pub fn new(kind: EffectKind, remaining_ms: f64) -> Self {
        Self {
            kind,
            remaining_ms,
            magnitude: None,
        }
    }

    pub fn with_magnitude(kind: EffectKind, remaining_ms: f64, magnitude: f64) -> Self {
        Self {
            kind,
            remaining_ms,
            magnitude: Some(magnitude),
        }
    }
}

/// The status table carried by every actor (enemy, defense, projectile).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    slots: [Option<Effect>; EffectKind::COUNT],
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply or refresh an effect. Duration takes the max of old and new;
    /// magnitude takes the larger when both are present.
    pub fn apply(&mut self, effect: Effect) {
        let slot = &mut self.slots[effect.kind.index()];
        match slot {
            Some(existing) => {
                existing.remaining_ms = existing.remaining_ms.max(effect.remaining_ms);
                existing.magnitude = match (existing.magnitude, effect.magnitude) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => b.or(a),
                };
            }
            None => *slot = Some(effect),
        }
    }

    /// Count down all effects by `dt_ms`, removing the expired ones.
    pub fn tick(&mut self, dt_ms: f64) {
        for slot in &mut self.slots {
            if let Some(effect) = slot {
                effect.remaining_ms -= dt_ms;
                if effect.remaining_ms <= 0.0 {
                    *slot = None;
                }
            }
        }
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub fn get(&self, kind: EffectKind) -> Option<&Effect> {
        self.slots[kind.index()].as_ref()
    }

    pub fn remove(&mut self, kind: EffectKind) {
        self.slots[kind.index()] = None;
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// Movement-speed multiplier from the active effects:
    /// frozen stops, slowed halves, hasted adds 50%.
    pub fn speed_factor(&self) -> f64 {
        let mut factor = 1.0;
        if self.has(EffectKind::Frozen) {
            return 0.0;
        }
        if self.has(EffectKind::Slowed) {
            factor *= 0.5;
        }
        if self.has(EffectKind::Hasted) {
            factor *= 1.5;
        }
        factor
    }

    /// `(kind, remaining_ms)` pairs for snapshots and save documents.
    pub fn to_pairs(&self) -> Vec<(EffectKind, f64)> {
        self.iter().map(|e| (e.kind, e.remaining_ms)).collect()
    }

    pub fn from_pairs(pairs: &[(EffectKind, f64)]) -> Self {
        let mut fx = Self::default();
        for &(kind, remaining_ms) in pairs {
            fx.apply(Effect::new(kind, remaining_ms));
        }
        fx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_refreshes_to_longer_duration() {
        let mut fx = StatusEffects::new();
        fx.apply(Effect::new(EffectKind::Slowed, 2000.0));
        fx.apply(Effect::new(EffectKind::Slowed, 500.0));
        assert_eq!(fx.get(EffectKind::Slowed).unwrap().remaining_ms, 2000.0);
        fx.apply(Effect::new(EffectKind::Slowed, 3000.0));
        assert_eq!(fx.get(EffectKind::Slowed).unwrap().remaining_ms, 3000.0);
    }

    #[test]
    fn apply_keeps_larger_magnitude() {
        let mut fx = StatusEffects::new();
        fx.apply(Effect::with_magnitude(EffectKind::Burning, 1000.0, 2.0));
        fx.apply(Effect::with_magnitude(EffectKind::Burning, 500.0, 5.0));
        assert_eq!(fx.get(EffectKind::Burning).unwrap().magnitude, Some(5.0));
    }

    #[test]
    fn tick_expires_silently() {
        let mut fx = StatusEffects::new();
        fx.apply(Effect::new(EffectKind::Emp, 100.0));
        fx.tick(50.0);
        assert!(fx.has(EffectKind::Emp));
        fx.tick(50.0);
        assert!(!fx.has(EffectKind::Emp));
        assert!(fx.is_empty());
    }

    #[test]
    fn one_instance_per_kind() {
        let mut fx = StatusEffects::new();
        fx.apply(Effect::new(EffectKind::Boosted, 1000.0));
        fx.apply(Effect::new(EffectKind::Boosted, 1000.0));
        assert_eq!(fx.iter().count(), 1);
    }

    #[test]
    fn speed_factor_combines() {
        let mut fx = StatusEffects::new();
        assert_eq!(fx.speed_factor(), 1.0);
        fx.apply(Effect::new(EffectKind::Slowed, 1000.0));
        assert_eq!(fx.speed_factor(), 0.5);
        fx.apply(Effect::new(EffectKind::Hasted, 1000.0));
        assert_eq!(fx.speed_factor(), 0.75);
        fx.apply(Effect::new(EffectKind::Frozen, 1000.0));
        assert_eq!(fx.speed_factor(), 0.0);
    }

    #[test]
    fn pairs_round_trip() {
        let mut fx = StatusEffects::new();
        fx.apply(Effect::new(EffectKind::Scrambled, 1500.0));
        fx.apply(Effect::new(EffectKind::Stealthed, 700.0));
        let restored = StatusEffects::from_pairs(&fx.to_pairs());
        assert!(restored.has(EffectKind::Scrambled));
        assert!(restored.has(EffectKind::Stealthed));
        assert_eq!(restored.get(EffectKind::Stealthed).unwrap().remaining_ms, 700.0);
    }
}
