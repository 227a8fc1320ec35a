//! Simulation engine: owns the world and runs every turn phase.
//!
//! `SimulationEngine` owns the hecs ECS world, validates and applies host
//! commands, runs the turn systems in their required order, and produces
//! `WorldSnapshot`s. It has no clock of its own: the host decides when a
//! turn happens. All randomness comes from one seeded ChaCha8 stream, so the
//! same seed and command sequence always yield the same world.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use kessler_core::commands::{Command, CommandOutcome};
use kessler_core::config::{GameConfig, Setting};
use kessler_core::constants::*;
use kessler_core::enums::*;
use kessler_core::errors::CommandError;
use kessler_core::events::{CollisionEvent, SimEvent, TurnHistorySample};
use kessler_core::missions::{self, MissionDefinition};
use kessler_core::state::*;
use kessler_core::types::{IdAllocator, ObjectId, TurnClock};
use kessler_drv::profiles;

use crate::systems;
use crate::systems::drv_ops::DrvPassOutput;
use crate::systems::missions::{MissionContext, MissionTransition};
use crate::systems::terminal::TerminalInput;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all game state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    rng: ChaCha8Rng,
    ids: IdAllocator,
    clock: TurnClock,
    phase: GamePhase,
    difficulty: Difficulty,
    budget: i64,
    risk_level: RiskLevel,
    game_over_reason: Option<GameOverReason>,
    command_queue: VecDeque<Command>,
    events: Vec<SimEvent>,

    // --- Bookkeeping ---
    stats: WorldStats,
    cascade: CascadeState,
    collision_events: VecDeque<CollisionEvent>,
    history: VecDeque<TurnHistorySample>,
    missions: Vec<MissionDefinition>,
    score: ScoreBreakdown,
    score_history: Vec<ScoreHistoryEntry>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl SimulationEngine {
    /// Create an engine whose RNG is seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create an engine drawing from an externally seeded stream.
    pub fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Self {
        Self {
            world: World::new(),
            config,
            rng,
            ids: IdAllocator::default(),
            clock: TurnClock::default(),
            phase: GamePhase::Setup,
            difficulty: Difficulty::default(),
            budget: 0,
            risk_level: RiskLevel::Low,
            game_over_reason: None,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            stats: WorldStats::default(),
            cascade: CascadeState::default(),
            collision_events: VecDeque::new(),
            history: VecDeque::new(),
            missions: Vec::new(),
            score: ScoreBreakdown::default(),
            score_history: Vec::new(),
        }
    }

    // --- Lifecycle ---

    /// Start a fresh game, discarding any previous one.
    pub fn initialize_game(&mut self, difficulty: Difficulty) -> Result<(), CommandError> {
        self.config.validate()?;
        let profile = difficulty_profile(difficulty);

        self.world.clear();
        self.ids = IdAllocator::default();
        self.clock = TurnClock::default();
        self.phase = GamePhase::Active;
        self.difficulty = difficulty;
        self.budget = profile.starting_budget;
        self.game_over_reason = None;
        self.stats = WorldStats::default();
        self.cascade = CascadeState::default();
        self.collision_events.clear();
        self.history.clear();
        self.missions = missions::catalog();
        self.score_history.clear();
        self.events.clear();

        world_setup::populate(
            &mut self.world,
            &mut self.ids,
            &mut self.rng,
            &profile,
            self.config.collision.cooperative_debris_ratio,
        );
        self.risk_level = systems::risk::calculate_risk_level(self.debris_count());

        log::info!(
            "game started: {difficulty:?}, seed {}, budget {}",
            self.config.seed,
            self.budget
        );
        self.events.push(SimEvent::GameStarted { difficulty });
        self.refresh_derived();
        Ok(())
    }

    // --- Launches ---

    pub fn launch_satellite(
        &mut self,
        layer: OrbitLayer,
        purpose: SatellitePurpose,
        insurance: InsuranceTier,
    ) -> Result<ObjectId, CommandError> {
        self.ensure_active()?;
        let Some(base_cost) = satellite_launch_cost(layer) else {
            return Err(self.reject(CommandError::InvalidOrbit {
                layer,
                reason: "satellites cannot be launched into the graveyard orbit",
            }));
        };
        self.charge(base_cost + insurance.premium_cost())?;

        let position = world_setup::random_position(&mut self.rng, layer);
        let id = world_setup::spawn_satellite(
            &mut self.world,
            &mut self.ids,
            position,
            purpose,
            insurance,
        );
        log::info!("launched {purpose:?} satellite {id} into {layer:?} ({insurance:?} cover)");
        self.events.push(SimEvent::SatelliteLaunched { id, layer });
        self.refresh_derived();
        Ok(id)
    }

    pub fn launch_drv(
        &mut self,
        layer: OrbitLayer,
        drv_type: DrvType,
        priority: DrvPriority,
    ) -> Result<ObjectId, CommandError> {
        self.ensure_active()?;
        if !profiles::can_operate_in(drv_type, layer) {
            return Err(self.reject(CommandError::UnsupportedDrvOrbit { drv_type, layer }));
        }
        self.charge(profiles::launch_cost(drv_type, priority))?;

        let position = world_setup::random_position(&mut self.rng, layer);
        let id =
            world_setup::spawn_drv(&mut self.world, &mut self.ids, position, drv_type, priority);
        log::info!("launched {drv_type:?} DRV {id} into {layer:?} ({priority:?} priority)");
        self.events.push(SimEvent::DrvLaunched {
            id,
            drv_type,
            layer,
        });
        self.refresh_derived();
        Ok(id)
    }

    // --- Turn phases ---

    /// Move the clock forward one turn: cash flow, movement, aging, history,
    /// then the terminal check.
    pub fn advance_turn(&mut self) -> Result<u64, CommandError> {
        self.ensure_active()?;

        // 1. Clock
        self.clock.advance(self.config.economy.days_per_turn);

        // 2. Cash flow
        self.budget += systems::economy::turn_cash_flow(&self.world, &self.config.economy);

        // 3. Movement and aging
        systems::movement::run(&mut self.world);
        systems::movement::age_all(&mut self.world);

        // 4. History
        self.record_history();

        // 5. Terminal conditions
        self.check_terminal();

        self.refresh_derived();
        Ok(self.clock.step)
    }

    pub fn process_drv_operations(&mut self) -> Result<(), CommandError> {
        self.ensure_active()?;
        let mut out = DrvPassOutput {
            stats: &mut self.stats,
            events: &mut self.events,
        };
        systems::drv_ops::run(&mut self.world, &mut self.rng, &mut out);
        self.refresh_derived();
        Ok(())
    }

    pub fn process_collisions(&mut self) -> Result<CollisionReport, CommandError> {
        self.ensure_active()?;
        let outcome = systems::collision::run(
            &mut self.world,
            &mut self.rng,
            &mut self.ids,
            &self.config.collision,
            self.clock.step,
        );
        let report = outcome.report;

        self.budget += outcome.payout;
        self.stats.insurance_paid += outcome.payout;
        self.stats.satellites_destroyed += outcome.satellites_destroyed;
        systems::collision::record_pass(&mut self.cascade, &report);

        self.collision_events.extend(outcome.events);
        self.prune_collision_events();
        self.events.extend(outcome.sim_events);

        if report.cascade {
            log::info!(
                "collision cascade: {} pairs at turn {}",
                report.pairs,
                self.clock.step
            );
            self.events.push(SimEvent::CascadeTriggered {
                pairs: report.pairs,
            });
        }
        if report.severe {
            self.events.push(SimEvent::SevereCascade {
                pairs: report.pairs,
            });
            self.end_game(GameOverReason::SevereCascade);
        }

        self.refresh_derived();
        Ok(report)
    }

    /// Per-turn storm trial. Returns the debris removed if a storm struck.
    pub fn check_solar_storm(&mut self) -> Result<Option<u32>, CommandError> {
        self.ensure_active()?;
        if !systems::hazard::roll(&mut self.rng, self.config.hazard.solar_storm_probability) {
            return Ok(None);
        }
        Ok(Some(self.run_solar_storm()))
    }

    /// Force a storm without the trial.
    pub fn trigger_solar_storm(&mut self) -> Result<u32, CommandError> {
        self.ensure_active()?;
        Ok(self.run_solar_storm())
    }

    pub fn update_mission_progress(&mut self) -> Result<(), CommandError> {
        self.ensure_active()?;
        self.update_missions();
        Ok(())
    }

    pub fn decommission_expired_drvs(&mut self) -> Result<u32, CommandError> {
        self.ensure_active()?;
        let retired = systems::decommission::run(
            &mut self.world,
            &mut self.ids,
            &mut self.rng,
            self.config.collision.cooperative_debris_ratio,
        );
        for entry in &retired {
            log::info!("DRV {} decommissioned, left debris {}", entry.id, entry.debris);
            self.events.push(SimEvent::DrvDecommissioned {
                id: entry.id,
                debris: entry.debris,
            });
        }
        let count = retired.len() as u32;
        self.stats.drvs_decommissioned += count;
        self.refresh_derived();
        Ok(count)
    }

    /// Run one full turn in order and return the resulting snapshot.
    ///
    /// Phases after the one that ends the game are skipped. The snapshot
    /// carries every event raised since the last drain.
    pub fn run_turn(&mut self) -> Result<WorldSnapshot, CommandError> {
        self.advance_turn()?;
        if self.is_active() {
            self.process_drv_operations()?;
        }
        if self.is_active() {
            self.process_collisions()?;
        }
        if self.is_active() {
            self.check_solar_storm()?;
        }
        if self.is_active() {
            self.update_mission_progress()?;
        }
        if self.is_active() {
            self.decommission_expired_drvs()?;
        }

        let mut snapshot = self.snapshot();
        snapshot.events = self.drain_events();
        Ok(snapshot)
    }

    // --- Tuning ---

    /// Replace the configuration with one that has `setting` applied.
    pub fn apply_setting(&mut self, setting: Setting) -> Result<(), CommandError> {
        match self.config.with_setting(setting.clone()) {
            Ok(config) => {
                log::info!("setting applied: {setting:?}");
                self.config = config;
                Ok(())
            }
            Err(err) => Err(self.reject(err.into())),
        }
    }

    // --- Command interface ---

    /// Execute one command immediately.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        match command {
            Command::InitializeGame { difficulty } => {
                self.initialize_game(difficulty)?;
                Ok(CommandOutcome::Initialized)
            }
            Command::LaunchSatellite {
                layer,
                purpose,
                insurance,
            } => {
                let id = self.launch_satellite(layer, purpose, insurance)?;
                Ok(CommandOutcome::Launched { id })
            }
            Command::LaunchDrv {
                layer,
                drv_type,
                priority,
            } => {
                let id = self.launch_drv(layer, drv_type, priority)?;
                Ok(CommandOutcome::Launched { id })
            }
            Command::AdvanceTurn => {
                let step = self.advance_turn()?;
                Ok(CommandOutcome::TurnAdvanced { step })
            }
            Command::ProcessDrvOperations => {
                self.process_drv_operations()?;
                Ok(CommandOutcome::DrvOperationsProcessed)
            }
            Command::ProcessCollisions => {
                let report = self.process_collisions()?;
                Ok(CommandOutcome::Collisions { report })
            }
            Command::CheckSolarStorm => {
                let removed = self.check_solar_storm()?;
                Ok(CommandOutcome::SolarStorm { removed })
            }
            Command::TriggerSolarStorm => {
                let removed = self.trigger_solar_storm()?;
                Ok(CommandOutcome::SolarStorm {
                    removed: Some(removed),
                })
            }
            Command::UpdateMissionProgress => {
                self.update_mission_progress()?;
                Ok(CommandOutcome::MissionsUpdated)
            }
            Command::DecommissionExpiredDrvs => {
                let count = self.decommission_expired_drvs()?;
                Ok(CommandOutcome::Decommissioned { count })
            }
            Command::RunTurn => {
                self.run_turn()?;
                Ok(CommandOutcome::TurnCompleted {
                    step: self.clock.step,
                })
            }
            Command::ApplySetting { setting } => {
                self.apply_setting(setting)?;
                Ok(CommandOutcome::SettingApplied)
            }
        }
    }

    /// Queue a command for the next `process_commands` call.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Drain the queue in FIFO order, returning each command's result.
    pub fn process_commands(&mut self) -> Vec<Result<CommandOutcome, CommandError>> {
        let mut results = Vec::with_capacity(self.command_queue.len());
        while let Some(command) = self.command_queue.pop_front() {
            results.push(self.execute(command));
        }
        results
    }

    // --- Queries ---

    /// Complete world state. Pending events stay queued; see `drain_events`.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            clock: self.clock,
            phase: self.phase,
            difficulty: self.difficulty,
            max_steps: self.max_steps(),
            budget: self.budget,
            risk_level: self.risk_level,
            game_over: self.is_game_over(),
            game_over_reason: self.game_over_reason,
            cascade: self.cascade,
            stats: self.stats,
            satellites: systems::snapshot::satellite_views(&self.world),
            debris: systems::snapshot::debris_views(&self.world),
            drvs: systems::snapshot::drv_views(&self.world),
            collision_events: self.collision_events.iter().cloned().collect(),
            missions: self.missions.clone(),
            score: self.score,
            config: self.config.clone(),
            events: Vec::new(),
        }
    }

    pub fn score(&self) -> ScoreBreakdown {
        self.score
    }

    /// Append-only log of totals, one entry per turn.
    pub fn score_history(&self) -> &[ScoreHistoryEntry] {
        &self.score_history
    }

    pub fn missions(&self) -> &[MissionDefinition] {
        &self.missions
    }

    /// Missions neither completed nor failed.
    pub fn active_missions(&self) -> Vec<MissionDefinition> {
        self.missions
            .iter()
            .filter(|m| !m.is_terminal())
            .cloned()
            .collect()
    }

    pub fn history(&self) -> Vec<TurnHistorySample> {
        self.history.iter().copied().collect()
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// Multiplier a host applies to its inter-turn delay at the current risk.
    pub fn turn_interval_multiplier(&self) -> f64 {
        systems::risk::interval_multiplier(self.risk_level, &self.config.risk_multipliers)
    }

    /// Final-result record for the host's high-score store.
    pub fn high_score_record(&self) -> HighScoreRecord {
        HighScoreRecord {
            score: self.score.total,
            grade: self.score.grade,
            turn: self.clock.step,
            day: self.clock.day,
            difficulty: self.difficulty,
            seed: self.config.seed,
            game_over_reason: self.game_over_reason,
            missions_completed: self.missions.iter().filter(|m| m.completed).count() as u32,
        }
    }

    /// Take every event raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn clock(&self) -> TurnClock {
        self.clock
    }

    pub fn step(&self) -> u64 {
        self.clock.step
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> WorldStats {
        self.stats
    }

    pub fn cascade_state(&self) -> CascadeState {
        self.cascade
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    /// Turn limit in force: the configured override, else the difficulty's.
    pub fn max_steps(&self) -> u64 {
        self.config
            .limits
            .max_steps
            .unwrap_or_else(|| difficulty_profile(self.difficulty).max_steps)
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- Test helpers ---

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn set_budget(&mut self, budget: i64) {
        self.budget = budget;
    }

    #[cfg(test)]
    pub fn set_step(&mut self, step: u64) {
        self.clock.step = step;
    }

    /// Remove every object, leaving game state otherwise untouched.
    #[cfg(test)]
    pub fn clear_world(&mut self) {
        self.world.clear();
        self.refresh_derived();
    }

    #[cfg(test)]
    pub fn spawn_test_debris(
        &mut self,
        layer: OrbitLayer,
        x: f64,
        y: f64,
        kind: DebrisKind,
    ) -> ObjectId {
        let position = kessler_core::types::OrbitalPosition::new(x, y, layer);
        world_setup::spawn_debris(&mut self.world, &mut self.ids, position, kind)
    }

    #[cfg(test)]
    pub fn spawn_test_satellite(
        &mut self,
        layer: OrbitLayer,
        x: f64,
        y: f64,
        insurance: InsuranceTier,
    ) -> ObjectId {
        let position = kessler_core::types::OrbitalPosition::new(x, y, layer);
        world_setup::spawn_satellite(
            &mut self.world,
            &mut self.ids,
            position,
            SatellitePurpose::Comms,
            insurance,
        )
    }

    #[cfg(test)]
    pub fn spawn_test_drv(
        &mut self,
        layer: OrbitLayer,
        x: f64,
        y: f64,
        drv_type: DrvType,
    ) -> ObjectId {
        let position = kessler_core::types::OrbitalPosition::new(x, y, layer);
        world_setup::spawn_drv(
            &mut self.world,
            &mut self.ids,
            position,
            drv_type,
            DrvPriority::Normal,
        )
    }

    #[cfg(test)]
    pub fn set_age(&mut self, id: ObjectId, turns: u32) {
        if let Some(entity) = world_setup::find_entity(&self.world, id) {
            if let Ok(mut age) = self.world.get::<&mut kessler_core::components::Age>(entity) {
                age.turns = turns;
            }
        }
    }

    #[cfg(test)]
    pub fn set_success_rate(&mut self, id: ObjectId, rate: f64) {
        if let Some(entity) = world_setup::find_entity(&self.world, id) {
            if let Ok(mut drv) = self.world.get::<&mut kessler_core::components::Drv>(entity) {
                let spec = drv.spec;
                drv.spec = kessler_core::components::DrvSpec::new(
                    spec.capacity(),
                    rate,
                    spec.max_age(),
                );
            }
        }
    }

    // --- Internals ---

    fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    fn ensure_active(&self) -> Result<(), CommandError> {
        match (self.phase, self.game_over_reason) {
            (GamePhase::Active, _) => Ok(()),
            (GamePhase::GameOver, Some(reason)) => {
                Err(self.reject(CommandError::GameOver(reason)))
            }
            _ => Err(self.reject(CommandError::NotInitialized)),
        }
    }

    fn reject(&self, err: CommandError) -> CommandError {
        log::warn!("command rejected: {err}");
        err
    }

    /// Deduct `cost`, or reject without touching the budget.
    fn charge(&mut self, cost: i64) -> Result<(), CommandError> {
        if cost > self.budget {
            return Err(self.reject(CommandError::InsufficientBudget {
                required: cost,
                available: self.budget,
            }));
        }
        self.budget -= cost;
        Ok(())
    }

    fn debris_count(&self) -> usize {
        systems::snapshot::count_debris(&self.world)
    }

    fn run_solar_storm(&mut self) -> u32 {
        let removed = systems::hazard::solar_storm(
            &mut self.world,
            &mut self.rng,
            self.config.hazard.solar_storm_fraction,
        );
        self.stats.solar_storms += 1;
        self.stats.storm_debris_cleared += removed;
        log::info!("solar storm cleared {removed} LEO debris");
        self.events.push(SimEvent::SolarStorm { removed });
        self.refresh_derived();
        removed
    }

    fn mission_context(&self) -> MissionContext {
        MissionContext {
            step: self.clock.step,
            debris_count: self.debris_count() as u32,
            active_satellites: systems::snapshot::count_active_satellites(&self.world) as u32,
            collisions_last_turn: self.cascade.collisions_last_turn,
            total_cascades: self.cascade.total_cascades,
            stats: self.stats,
            game_over: self.is_game_over(),
        }
    }

    fn update_missions(&mut self) {
        let ctx = self.mission_context();
        for transition in systems::missions::update(&mut self.missions, &ctx) {
            match transition {
                MissionTransition::Completed { id, turn } => {
                    log::info!("mission {id} completed at turn {turn}");
                    self.events.push(SimEvent::MissionCompleted { mission: id, turn });
                }
                MissionTransition::Failed { id, turn } => {
                    log::info!("mission {id} failed at turn {turn}");
                    self.events.push(SimEvent::MissionFailed { mission: id, turn });
                }
            }
        }
    }

    /// Enter the terminal state. The first reason sticks.
    fn end_game(&mut self, reason: GameOverReason) {
        if self.game_over_reason.is_some() {
            return;
        }
        self.game_over_reason = Some(reason);
        self.phase = GamePhase::GameOver;
        log::info!("game over at turn {}: {reason}", self.clock.step);
        self.events.push(SimEvent::GameOver { reason });
        self.update_missions();
    }

    fn check_terminal(&mut self) {
        let input = TerminalInput {
            budget: self.budget,
            step: self.clock.step,
            max_steps: self.max_steps(),
            debris_count: self.debris_count(),
            debris_limit: self.config.limits.debris_limit,
        };
        if let Some(reason) = systems::terminal::check(&input) {
            self.end_game(reason);
        }
    }

    fn record_history(&mut self) {
        self.history.push_back(TurnHistorySample {
            turn: self.clock.step,
            debris_count: self.debris_count() as u32,
            satellite_count: systems::snapshot::count_satellites(&self.world) as u32,
            debris_removed: self.stats.debris_removed(),
            active_drv_count: systems::snapshot::count_drvs(&self.world) as u32,
        });
        while self.history.len() > MAX_TURN_HISTORY {
            self.history.pop_front();
        }
    }

    fn prune_collision_events(&mut self) {
        let step = self.clock.step;
        while self
            .collision_events
            .front()
            .is_some_and(|e| e.timestamp + COLLISION_EVENT_TTL < step)
        {
            self.collision_events.pop_front();
        }
        while self.collision_events.len() > MAX_COLLISION_EVENTS {
            self.collision_events.pop_front();
        }
    }

    /// Recompute risk and score after a state change.
    fn refresh_derived(&mut self) {
        let level = systems::risk::calculate_risk_level(self.debris_count());
        if level != self.risk_level {
            log::info!("risk level {:?} -> {:?}", self.risk_level, level);
            self.events.push(SimEvent::RiskChanged {
                from: self.risk_level,
                to: level,
            });
            self.risk_level = level;
        }

        let input =
            systems::scoring::gather_input(&self.world, &self.stats, self.budget, self.clock.day);
        self.score = systems::scoring::compute(&input);

        let entry = ScoreHistoryEntry {
            turn: self.clock.step,
            total: self.score.total,
        };
        match self.score_history.last_mut() {
            Some(last) if last.turn == entry.turn => *last = entry,
            _ => self.score_history.push(entry),
        }
    }
}
