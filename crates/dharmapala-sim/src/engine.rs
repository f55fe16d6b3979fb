//! The game engine.
//!
//! `GameEngine` owns the hecs world, the seeded RNG, and all ledger and
//! scheduler state. Commands are validated and applied between ticks;
//! `tick` runs the systems in fixed order and returns the events the tick
//! emitted. Nothing here consults a wall clock or a global.

use std::collections::HashMap;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dharmapala_core::commands::Command;
use dharmapala_core::components::{Defense, DefenseState, Projectile};
use dharmapala_core::constants::*;
use dharmapala_core::economy::{upgrade_cost, Resources};
use dharmapala_core::enums::{DefenseKind, EffectKind, GamePhase, PathShape};
use dharmapala_core::errors::{CommandError, SaveError};
use dharmapala_core::events::GameEvent;
use dharmapala_core::save::SaveDoc;
use dharmapala_core::state::GameSnapshot;
use dharmapala_core::status::{Effect, StatusEffects};
use dharmapala_core::types::{GridCell, SimTime};
use dharmapala_path::{Path, PathSpec};

use crate::achievements::{self, AchievementMonitor, Counter};
use crate::pending::TickQueue;
use crate::save;
use crate::spawn;
use crate::systems::{self, enemy::StartEnemy, wave::WaveState, DefenseSite};

/// Configuration for a new engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub shape: PathShape,
    pub width: f64,
    pub height: f64,
    pub grid_size: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shape: PathShape::Default,
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            grid_size: GRID_SIZE,
        }
    }
}

/// The simulation engine. Owns the ECS world and all game state.
pub struct GameEngine {
    pub(crate) config: EngineConfig,
    pub(crate) world: World,
    pub(crate) path: Path,
    pub(crate) time: SimTime,
    pub(crate) phase: GamePhase,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) resources: Resources,
    pub(crate) lives: u32,
    pub(crate) score: u64,
    pub(crate) wave: WaveState,
    pub(crate) achievements: AchievementMonitor,
    /// Reward multiplier from active distributor specials; an engine
    /// field, read by the crediting paths.
    pub(crate) resource_boost: f64,
    pub(crate) selected_defense: Option<DefenseKind>,
    pub(crate) next_enemy_id: u32,
    pub(crate) next_defense_id: u32,
    pub(crate) next_projectile_id: u32,
    pub(crate) occupied: HashMap<GridCell, u32>,
    events: Vec<GameEvent>,
    queue: TickQueue,
    despawn_buffer: Vec<hecs::Entity>,
    start_enemies: Vec<StartEnemy>,
    defense_sites: Vec<DefenseSite>,
}

impl GameEngine {
    /// Create an engine in the main menu. Call [`new_game`](Self::new_game)
    /// to start playing.
    pub fn new(config: EngineConfig) -> Self {
        let path = Path::generate(&PathSpec {
            seed: config.seed,
            shape: config.shape,
            width: config.width,
            height: config.height,
        });
        Self {
            config,
            world: World::new(),
            path,
            time: SimTime::default(),
            phase: GamePhase::MainMenu,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            resources: INITIAL_RESOURCES,
            lives: INITIAL_LIVES,
            score: 0,
            wave: WaveState::default(),
            achievements: AchievementMonitor::new(),
            resource_boost: 1.0,
            selected_defense: None,
            next_enemy_id: 0,
            next_defense_id: 0,
            next_projectile_id: 0,
            occupied: HashMap::new(),
            events: Vec::new(),
            queue: TickQueue::default(),
            despawn_buffer: Vec::new(),
            start_enemies: Vec::new(),
            defense_sites: Vec::new(),
        }
    }

    /// Reset everything and begin a fresh game. The achievement monitor
    /// persists across games; everything else restarts from the seed.
    pub fn new_game(&mut self, seed: u64, shape: PathShape) {
        self.config.seed = seed;
        self.config.shape = shape;
        self.world = World::new();
        self.path = Path::generate(&PathSpec {
            seed,
            shape,
            width: self.config.width,
            height: self.config.height,
        });
        self.time = SimTime::default();
        self.phase = GamePhase::Playing;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.resources = INITIAL_RESOURCES;
        self.lives = INITIAL_LIVES;
        self.score = 0;
        self.wave = WaveState::default();
        self.resource_boost = 1.0;
        self.selected_defense = None;
        self.next_enemy_id = 0;
        self.next_defense_id = 0;
        self.next_projectile_id = 0;
        self.occupied.clear();
        self.events.clear();
        self.queue.clear();
        self.despawn_buffer.clear();
        tracing::info!(seed, ?shape, "new game");
    }

    /// Advance the simulation by `dt_ms` and return the events the tick
    /// emitted, in emission order. Rejection events queued by commands
    /// since the last tick are included.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        if self.phase == GamePhase::Playing && dt_ms > 0.0 {
            self.run_systems(dt_ms);
            self.time.advance(dt_ms);
        }
        std::mem::take(&mut self.events)
    }

    /// Build the complete visible state. Read-only.
    pub fn snapshot(&self) -> GameSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.resources,
            self.lives,
            self.score,
            &self.wave,
            self.config.grid_size,
            self.selected_defense,
        )
    }

    /// Dispatch a serialized command.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::NewGame { seed, shape } => {
                self.new_game(seed, shape);
                Ok(())
            }
            Command::StartWave => self.start_wave(),
            Command::PlaceDefense { cell, kind } => self.place_defense(cell, kind).map(|_| ()),
            Command::UpgradeDefense { id } => self.upgrade_defense(id),
            Command::SellDefense { id } => self.sell_defense(id),
            Command::ActivateSpecial { id } => self.activate_special(id),
            Command::SelectDefenseType { kind } => {
                self.select_defense_type(kind);
                Ok(())
            }
        }
    }

    // --- Commands ---

    /// Start the next wave, or zero the inter-wave countdown.
    pub fn start_wave(&mut self) -> Result<(), CommandError> {
        if self.phase != GamePhase::Playing {
            return Err(self.rejected(CommandError::NotPlaying));
        }
        if self.wave.in_progress {
            return Err(self.rejected(CommandError::WaveInProgress));
        }
        self.wave.inter_wave_timer_ms = None;
        self.begin_next_wave();
        Ok(())
    }

    /// Whether a defense of `kind` may be placed on `cell` right now.
    pub fn can_place(&self, cell: GridCell, kind: DefenseKind) -> Result<(), CommandError> {
        if self.phase != GamePhase::Playing {
            return Err(CommandError::NotPlaying);
        }
        let columns = (self.config.width / self.config.grid_size) as i32;
        let rows = (self.config.height / self.config.grid_size) as i32;
        if cell.gx < 0 || cell.gy < 0 || cell.gx >= columns || cell.gy >= rows {
            return Err(CommandError::CellOutOfBounds(cell));
        }
        if self.occupied.contains_key(&cell) {
            return Err(CommandError::CellOccupied(cell));
        }
        if self.path.is_on_path(cell.center(self.config.grid_size)) {
            return Err(CommandError::CellOnPath(cell));
        }
        let cost = defense_base(kind).cost;
        if !self.resources.can_afford(&cost) {
            return Err(CommandError::InsufficientResources {
                needed: cost,
                available: self.resources,
            });
        }
        Ok(())
    }

    /// Place a defense; returns its id.
    pub fn place_defense(
        &mut self,
        cell: GridCell,
        kind: DefenseKind,
    ) -> Result<u32, CommandError> {
        if let Err(err) = self.can_place(cell, kind) {
            return Err(self.rejected(err));
        }
        self.resources.debit(&defense_base(kind).cost);

        let id = self.next_defense_id;
        self.next_defense_id += 1;
        spawn::spawn_defense(&mut self.world, id, kind, cell, self.config.grid_size);
        self.occupied.insert(cell, id);

        self.events.push(GameEvent::DefensePlaced { id, kind, cell });
        achievements::record(
            &mut self.achievements,
            Counter::DefensesBuilt,
            1,
            &mut self.resources,
            &mut self.events,
        );
        Ok(id)
    }

    /// Pay to raise a defense one level.
    pub fn upgrade_defense(&mut self, id: u32) -> Result<(), CommandError> {
        if self.phase != GamePhase::Playing {
            return Err(self.rejected(CommandError::NotPlaying));
        }
        let Some(entity) = self.find_defense(id) else {
            return Err(self.rejected(CommandError::NoSuchDefense(id)));
        };

        let stats = self
            .world
            .get::<&DefenseState>(entity)
            .map(|st| (st.kind, st.level))
            .ok();
        let Some((kind, level)) = stats else {
            return Err(self.rejected(CommandError::NoSuchDefense(id)));
        };
        if level >= MAX_DEFENSE_LEVEL {
            return Err(self.rejected(CommandError::MaxLevel(id)));
        }
        let cost = upgrade_cost(&defense_base(kind).cost, level);
        if !self.resources.can_afford(&cost) {
            return Err(self.rejected(CommandError::InsufficientResources {
                needed: cost,
                available: self.resources,
            }));
        }
        self.resources.debit(&cost);

        let maxed = match self.world.get::<&mut DefenseState>(entity) {
            Ok(mut st) => {
                st.level += 1;
                st.invested.credit(&cost);
                st.level == MAX_DEFENSE_LEVEL
            }
            Err(_) => false,
        };
        if maxed {
            achievements::record(
                &mut self.achievements,
                Counter::MaxedDefenses,
                1,
                &mut self.resources,
                &mut self.events,
            );
        }
        Ok(())
    }

    /// Remove a defense, refunding part of its invested cost.
    pub fn sell_defense(&mut self, id: u32) -> Result<(), CommandError> {
        if self.phase != GamePhase::Playing {
            return Err(self.rejected(CommandError::NotPlaying));
        }
        let Some(entity) = self.find_defense(id) else {
            return Err(self.rejected(CommandError::NoSuchDefense(id)));
        };

        let sale = self
            .world
            .get::<&DefenseState>(entity)
            .map(|st| (st.cell, st.invested.scaled(SELL_REFUND_FACTOR)))
            .ok();
        let Some((cell, refund)) = sale else {
            return Err(self.rejected(CommandError::NoSuchDefense(id)));
        };
        self.resources.credit(&refund);
        self.occupied.remove(&cell);
        let _ = self.world.despawn(entity);
        self.events.push(GameEvent::DefenseSold { id, refund });
        Ok(())
    }

    /// Trigger a defense's special ability.
    pub fn activate_special(&mut self, id: u32) -> Result<(), CommandError> {
        if self.phase != GamePhase::Playing {
            return Err(self.rejected(CommandError::NotPlaying));
        }
        let Some(entity) = self.find_defense(id) else {
            return Err(self.rejected(CommandError::NoSuchDefense(id)));
        };

        let stats = {
            let st = self.world.get::<&DefenseState>(entity).ok();
            let fx = self.world.get::<&StatusEffects>(entity).ok();
            match (st, fx) {
                (Some(st), Some(fx)) => Some((
                    st.kind,
                    st.cell.center(self.config.grid_size),
                    st.effective_range(&fx),
                    st.corrupted,
                    st.special_cooldown_ms > 0.0,
                )),
                _ => None,
            }
        };
        let Some((kind, center, range, corrupted, on_cooldown)) = stats else {
            return Err(self.rejected(CommandError::NoSuchDefense(id)));
        };
        if corrupted {
            return Err(self.rejected(CommandError::DefenseDisabled(id)));
        }
        if on_cooldown {
            return Err(self.rejected(CommandError::SpecialOnCooldown(id)));
        }

        if let Ok(mut st) = self.world.get::<&mut DefenseState>(entity) {
            st.special_active_ms = SPECIAL_DURATION_MS;
            st.special_cooldown_ms = SPECIAL_COOLDOWN_MS;
        }

        match kind {
            DefenseKind::Firewall | DefenseKind::Decoy => {
                // Barrier shimmer; no simulation effect.
            }
            DefenseKind::Encryption => {
                for (_e, (_, fx)) in self
                    .world
                    .query_mut::<(&Projectile, &mut StatusEffects)>()
                {
                    fx.apply(Effect::new(EffectKind::Encrypted, SPECIAL_ENCRYPT_MS));
                }
            }
            DefenseKind::Mirror => {
                if let Ok(mut fx) = self.world.get::<&mut StatusEffects>(entity) {
                    fx.apply(Effect::new(EffectKind::Reflection, SPECIAL_DURATION_MS));
                }
            }
            DefenseKind::Anonymity => {
                let radius = range * SPECIAL_CLOAK_RANGE_FACTOR;
                for (_e, (_, st, fx)) in self
                    .world
                    .query_mut::<(&Defense, &DefenseState, &mut StatusEffects)>()
                {
                    if st.id != id
                        && st.cell.center(self.config.grid_size).distance_to(&center) <= radius
                    {
                        fx.apply(Effect::new(EffectKind::Cloaked, SPECIAL_DURATION_MS));
                    }
                }
            }
            DefenseKind::Distributor => {
                // The boost multiplier is recomputed from active specials
                // each tick; nothing else to do here.
            }
        }
        Ok(())
    }

    /// Remember the build-menu selection.
    pub fn select_defense_type(&mut self, kind: DefenseKind) {
        self.selected_defense = Some(kind);
    }

    // --- Save / load ---

    /// Capture the full game state as a versioned document.
    pub fn to_save(&self, timestamp: u64) -> SaveDoc {
        save::to_save(self, timestamp)
    }

    /// Build an engine from a save document. Fails without side effects.
    pub fn from_save(doc: &SaveDoc) -> Result<GameEngine, SaveError> {
        save::from_save(doc, EngineConfig::default())
    }

    /// Replace this engine's state with a saved one. The current state is
    /// untouched when the document is refused.
    pub fn load(&mut self, doc: &SaveDoc) -> Result<(), SaveError> {
        let mut restored = save::from_save(doc, self.config)?;
        restored.achievements = std::mem::take(&mut self.achievements);
        *self = restored;
        Ok(())
    }

    // --- Queries ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn can_afford(&self, cost: &Resources) -> bool {
        self.resources.can_afford(cost)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- Internals ---

    fn run_systems(&mut self, dt_ms: f64) {
        // Start-of-tick captures: aura effects and passives read these
        // instead of mid-tick positions.
        systems::enemy::capture_start_positions(&self.world, &mut self.start_enemies);
        self.defense_sites = systems::collect_defenses(&self.world);

        // Inter-wave countdown.
        if let Some(timer) = self.wave.inter_wave_timer_ms {
            let remaining = timer - dt_ms;
            if remaining <= 0.0 {
                self.wave.inter_wave_timer_ms = None;
                self.begin_next_wave();
            } else {
                self.wave.inter_wave_timer_ms = Some(remaining);
            }
        }

        // 1. Wave spawning
        systems::wave::run_spawns(
            &mut self.world,
            &self.path,
            &mut self.wave,
            self.time.now_ms,
            &mut self.next_enemy_id,
            &mut self.events,
        );
        // 2. Status countdown (all actors)
        systems::status::run(&mut self.world, dt_ms);
        // 3. Enemy movement + passives
        systems::enemy::run(
            &mut self.world,
            &self.path,
            &mut self.rng,
            dt_ms,
            &self.start_enemies,
            &self.defense_sites,
            &mut self.queue,
        );
        // 4. Boss scheduled abilities
        systems::boss::run(
            &mut self.world,
            &mut self.rng,
            dt_ms,
            &self.defense_sites,
            &mut self.queue,
        );
        // 5. Defense targeting + firing
        let enemies = systems::collect_enemies(&self.world, &self.path, &self.defense_sites);
        systems::defense::run(
            &mut self.world,
            &mut self.rng,
            self.time.now_ms,
            dt_ms,
            &enemies,
            &self.defense_sites,
            &mut self.queue,
            &mut self.events,
            &mut self.next_projectile_id,
        );
        // 6. Projectile motion + collision
        systems::projectile::run(
            &mut self.world,
            dt_ms,
            self.config.width,
            self.config.height,
            &enemies,
            &mut self.queue,
            &mut self.despawn_buffer,
        );
        // 7. Damage resolution + death bookkeeping
        self.resource_boost = self.compute_resource_boost();
        systems::damage::resolve(
            &mut self.world,
            &mut self.rng,
            &mut self.queue,
            &mut self.events,
            &mut self.resources,
            &mut self.lives,
            &mut self.score,
            &mut self.phase,
            &mut self.achievements,
            self.resource_boost,
            &mut self.next_enemy_id,
            self.wave.current,
        );
        // 8. Prune dead entities
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 9. Wave completion
        if let Some(bonus) = systems::wave::check_completion(
            &self.world,
            &mut self.wave,
            &mut self.resources,
            &mut self.score,
            self.resource_boost,
            &mut self.events,
        ) {
            achievements::record(
                &mut self.achievements,
                Counter::WavesCompleted,
                1,
                &mut self.resources,
                &mut self.events,
            );
            achievements::record(
                &mut self.achievements,
                Counter::DharmaEarned,
                bonus.dharma,
                &mut self.resources,
                &mut self.events,
            );
        }
    }

    /// Start wave `current + 1`, or transition to victory past the last.
    fn begin_next_wave(&mut self) {
        let next = self.wave.current + 1;
        if next > MAX_WAVES {
            if self.phase == GamePhase::Playing {
                self.phase = GamePhase::Victory;
                self.events.push(GameEvent::Victory);
                achievements::record(
                    &mut self.achievements,
                    Counter::GamesCompleted,
                    1,
                    &mut self.resources,
                    &mut self.events,
                );
                tracing::info!(waves = MAX_WAVES, "all waves cleared, victory");
            }
            return;
        }
        self.wave.start(next, self.time.now_ms, &mut self.rng);
        self.events.push(GameEvent::WaveStarted { wave: next });
    }

    /// Doubled while any distributor's special is active.
    fn compute_resource_boost(&self) -> f64 {
        let boosted = self
            .world
            .query::<(&Defense, &DefenseState)>()
            .iter()
            .any(|(_, (_, st))| {
                st.kind == DefenseKind::Distributor && st.special_active_ms > 0.0
            });
        if boosted {
            RESOURCE_BOOST_FACTOR
        } else {
            1.0
        }
    }

    fn find_defense(&self, id: u32) -> Option<hecs::Entity> {
        self.world
            .query::<(&Defense, &DefenseState)>()
            .iter()
            .find(|(_, (_, st))| st.id == id)
            .map(|(entity, _)| entity)
    }

    /// Log and surface a rejected command on the event stream.
    fn rejected(&mut self, err: CommandError) -> CommandError {
        tracing::debug!(%err, "command rejected");
        self.events.push(GameEvent::CommandRejected {
            reason: err.to_string(),
        });
        err
    }

    // --- Test support ---

    /// Spawn an enemy mid-path, bypassing the wave scheduler.
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(
        &mut self,
        kind: dharmapala_core::enums::EnemyKind,
        progress: f64,
    ) -> u32 {
        use dharmapala_core::components::EnemyState;
        use dharmapala_core::types::Position;

        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        let entity = spawn::spawn_enemy(&mut self.world, &self.path, id, kind, 1.0);
        let (pos, _) = self.path.position_at(progress);
        let waypoint = self.path.waypoint_at(progress);
        {
            let mut st = self.world.get::<&mut EnemyState>(entity).unwrap();
            st.progress = progress;
            st.waypoint_index = waypoint;
        }
        *self.world.get::<&mut Position>(entity).unwrap() = pos;
        id
    }

    /// Spawn a boss at the path start, bypassing the wave scheduler.
    #[cfg(test)]
    pub(crate) fn spawn_test_boss(&mut self, kind: dharmapala_core::enums::BossKind) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        spawn::spawn_boss(&mut self.world, &self.path, id, kind);
        id
    }

    /// Queue raw damage against an enemy; resolved by the next tick.
    #[cfg(test)]
    pub(crate) fn inject_damage(&mut self, target_id: u32, amount: f64) {
        self.queue.hits.push(crate::pending::HitRecord {
            projectile_id: None,
            target_id,
            damage: amount,
            source_kind: None,
            origin_defense_id: None,
            impact: dharmapala_core::types::Position::new(0.0, 0.0),
        });
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn wave_state(&self) -> &WaveState {
        &self.wave
    }

    #[cfg(test)]
    pub(crate) fn achievements(&self) -> &AchievementMonitor {
        &self.achievements
    }
}
