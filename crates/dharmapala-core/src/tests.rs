#[cfg(test)]
mod tests {
    use crate::commands::Command;
    use crate::components::DefenseState;
    use crate::constants::*;
    use crate::economy::Resources;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::status::{Effect, StatusEffects};
    use crate::types::{GridCell, Position};

    /// Verify the kind enums round-trip through serde_json with the
    /// external camelCase names.
    #[test]
    fn test_defense_kind_serde() {
        for kind in DefenseKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: DefenseKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
        assert_eq!(
            serde_json::to_string(&DefenseKind::Firewall).unwrap(),
            "\"firewall\""
        );
    }

    #[test]
    fn test_enemy_kind_serde() {
        for kind in EnemyKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: EnemyKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
        assert_eq!(
            serde_json::to_string(&EnemyKind::ScriptKiddie).unwrap(),
            "\"scriptKiddie\""
        );
        assert_eq!(
            serde_json::to_string(&EnemyKind::CorruptedMonk).unwrap(),
            "\"corruptedMonk\""
        );
    }

    #[test]
    fn test_attacker_kind_serde_is_flat() {
        // Attacker kinds serialize as the bare kind name and deserialize
        // back into the right arm of the union.
        let enemy = AttackerKind::Enemy(EnemyKind::QuantumHacker);
        assert_eq!(serde_json::to_string(&enemy).unwrap(), "\"quantumHacker\"");
        let boss = AttackerKind::Boss(BossKind::RaidTeam);
        assert_eq!(serde_json::to_string(&boss).unwrap(), "\"raidTeam\"");

        let back: AttackerKind = serde_json::from_str("\"raidTeam\"").unwrap();
        assert_eq!(back, boss);
        assert!(back.is_boss());
        let back: AttackerKind = serde_json::from_str("\"corruptedMonk\"").unwrap();
        assert_eq!(back.as_enemy(), Some(EnemyKind::CorruptedMonk));
    }

    #[test]
    fn test_boss_kind_serde_and_phases() {
        assert_eq!(
            serde_json::to_string(&BossKind::MegaCorpTitan).unwrap(),
            "\"megaCorpTitan\""
        );
        assert_eq!(BossKind::RaidTeam.phases(), 3);
        assert_eq!(BossKind::MegaCorpTitan.phases(), 4);
    }

    #[test]
    fn test_command_serde() {
        let commands = vec![
            Command::NewGame {
                seed: 42,
                shape: PathShape::Spiral,
            },
            Command::StartWave,
            Command::PlaceDefense {
                cell: GridCell::new(5, 7),
                kind: DefenseKind::Firewall,
            },
            Command::UpgradeDefense { id: 3 },
            Command::SellDefense { id: 3 },
            Command::ActivateSpecial { id: 1 },
            Command::SelectDefenseType {
                kind: DefenseKind::Mirror,
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: Command = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::EnemySpawned {
                id: 1,
                kind: AttackerKind::Enemy(EnemyKind::ScriptKiddie),
                wave: 1,
            },
            GameEvent::WaveCompleted {
                wave: 3,
                bonus: Resources::new(80, 40, 24),
            },
            GameEvent::BossPhaseChange {
                id: 9,
                kind: BossKind::RaidTeam,
                from: 1,
                to: 2,
            },
            GameEvent::GameOver,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_grid_cell_center() {
        let cell = GridCell::new(5, 7);
        let center = cell.center(GRID_SIZE);
        assert_eq!(center, Position::new(220.0, 300.0));
    }

    // ---- Base stat tables ----

    #[test]
    fn test_defense_base_table() {
        let firewall = defense_base(DefenseKind::Firewall);
        assert_eq!(firewall.cost, Resources::new(25, 0, 0));
        assert_eq!(firewall.damage, 15.0);
        assert_eq!(firewall.range, 200.0);
        assert_eq!(firewall.fire_rate_ms, 1000.0);

        let decoy = defense_base(DefenseKind::Decoy);
        assert_eq!(decoy.damage, 0.0);
        assert_eq!(decoy.fire_rate_ms, 0.0);

        let distributor = defense_base(DefenseKind::Distributor);
        assert_eq!(distributor.cost, Resources::new(100, 60, 30));
        assert_eq!(distributor.range, 350.0);
    }

    #[test]
    fn test_enemy_base_table() {
        let kiddie = enemy_base(EnemyKind::ScriptKiddie);
        assert_eq!(kiddie.health, 20.0);
        assert_eq!(kiddie.speed, 80.0);
        assert_eq!(kiddie.reward, Resources::new(5, 2, 1));

        let monk = enemy_base(EnemyKind::CorruptedMonk);
        assert_eq!(monk.health, 100.0);
        assert_eq!(monk.speed, 40.0);
        assert_eq!(monk.size, 25.0);
    }

    #[test]
    fn test_boss_base_table() {
        let raid = boss_base(BossKind::RaidTeam);
        assert_eq!(raid.health, 500.0);
        assert_eq!(raid.phases, 3);
        let titan = boss_base(BossKind::MegaCorpTitan);
        assert_eq!(titan.health, 800.0);
        assert_eq!(titan.reward, Resources::new(200, 120, 80));
    }

    // ---- Effective stats ----

    fn defense_at_level(kind: DefenseKind, level: u8) -> DefenseState {
        let base = defense_base(kind);
        DefenseState {
            id: 0,
            kind,
            cell: GridCell::new(0, 0),
            level,
            experience: 0,
            damage: base.damage,
            range: base.range,
            fire_rate_ms: base.fire_rate_ms,
            projectile_speed: base.projectile_speed,
            invested: base.cost,
            target_id: None,
            facing: 0.0,
            last_fire_ms: None,
            special_cooldown_ms: 0.0,
            special_active_ms: 0.0,
            corrupted: false,
        }
    }

    #[test]
    fn test_effective_damage_level_and_boost() {
        let d = defense_at_level(DefenseKind::Encryption, 1);
        let clean = StatusEffects::new();
        // floor(25 * 1.2) = 30
        assert_eq!(d.effective_damage(&clean), 30.0);

        let mut boosted = StatusEffects::new();
        boosted.apply(Effect::new(EffectKind::Boosted, 1000.0));
        // floor(25 * 1.2 * 1.5) = 45
        assert_eq!(d.effective_damage(&boosted), 45.0);

        let mut weakened = StatusEffects::new();
        weakened.apply(Effect::new(EffectKind::Weakened, 1000.0));
        // floor(25 * 1.2 * 0.7) = 21
        assert_eq!(d.effective_damage(&weakened), 21.0);
    }

    #[test]
    fn test_effective_fire_rate_floor() {
        // A max-level boosted firewall still never fires faster than the floor.
        let d = defense_at_level(DefenseKind::Firewall, 5);
        let mut fx = StatusEffects::new();
        fx.apply(Effect::new(EffectKind::Boosted, 1000.0));
        assert!(d.effective_fire_rate_ms(&fx) >= MIN_FIRE_RATE_MS);

        // Decoys have a zero base rate; the floor still applies.
        let decoy = defense_at_level(DefenseKind::Decoy, 1);
        assert_eq!(decoy.effective_fire_rate_ms(&fx), MIN_FIRE_RATE_MS);
    }

    #[test]
    fn test_effective_range_modifiers() {
        let d = defense_at_level(DefenseKind::Firewall, 1);
        let clean = StatusEffects::new();
        assert!((d.effective_range(&clean) - 220.0).abs() < 1e-9);

        let mut blinded = StatusEffects::new();
        blinded.apply(Effect::new(EffectKind::Blinded, 1000.0));
        assert!((d.effective_range(&blinded) - 176.0).abs() < 1e-9);
    }

    #[test]
    fn test_defense_inactive_under_emp_and_corruption() {
        let mut d = defense_at_level(DefenseKind::Firewall, 1);
        let mut fx = StatusEffects::new();
        assert!(d.is_active(&fx));

        fx.apply(Effect::new(EffectKind::Emp, 3000.0));
        assert!(!d.is_active(&fx));

        fx.tick(3000.0);
        assert!(d.is_active(&fx));

        d.corrupted = true;
        assert!(!d.is_active(&fx));
    }

    #[test]
    fn test_projectile_kind_mapping() {
        assert_eq!(
            DefenseKind::Firewall.projectile_kind(),
            ProjectileKind::Standard
        );
        assert_eq!(
            DefenseKind::Encryption.projectile_kind(),
            ProjectileKind::Piercing
        );
        assert_eq!(
            DefenseKind::Mirror.projectile_kind(),
            ProjectileKind::Homing
        );
        assert_eq!(
            DefenseKind::Anonymity.projectile_kind(),
            ProjectileKind::Cloak
        );
        assert_eq!(
            DefenseKind::Distributor.projectile_kind(),
            ProjectileKind::Splash
        );
    }

    #[test]
    fn test_effect_buff_classification() {
        assert!(EffectKind::Boosted.is_buff());
        assert!(EffectKind::Cloaked.is_buff());
        assert!(!EffectKind::Emp.is_buff());
        assert!(!EffectKind::Corrupted.is_buff());
        assert!(!EffectKind::Scrambled.is_buff());
    }
}
