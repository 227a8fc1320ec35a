//! World snapshot handed to host collaborators after every command.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::enums::*;
use crate::events::{CollisionEvent, SimEvent};
use crate::missions::MissionDefinition;
use crate::types::{ObjectId, TurnClock};

/// Lifetime counters kept by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    pub debris_removed_cooperative: u32,
    pub debris_removed_uncooperative: u32,
    pub satellites_recovered: u32,
    pub satellites_destroyed: u32,
    pub geo_relocations: u32,
    pub refuels_completed: u32,
    pub drvs_decommissioned: u32,
    pub solar_storms: u32,
    pub storm_debris_cleared: u32,
    pub insurance_paid: i64,
}

impl WorldStats {
    /// Debris removed by DRVs of either kind.
    pub fn debris_removed(&self) -> u32 {
        self.debris_removed_cooperative + self.debris_removed_uncooperative
    }
}

/// Cascade bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeState {
    /// The most recent collision pass was a cascade.
    pub cascade_triggered: bool,
    pub total_cascades: u32,
    pub consecutive_cascade_turns: u32,
    /// Pair count of the most recent collision pass.
    pub collisions_last_turn: u32,
    pub total_collisions: u32,
}

/// Result of one collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub pairs: u32,
    pub debris_spawned: u32,
    pub cascade: bool,
    pub severe: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteView {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub layer: OrbitLayer,
    pub purpose: SatellitePurpose,
    pub age: u32,
    pub insurance: InsuranceTier,
    pub in_graveyard: bool,
    pub collision_radius: f64,
    pub capture_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisView {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub layer: OrbitLayer,
    pub kind: DebrisKind,
    pub collision_radius: f64,
    pub capture_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrvView {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub layer: OrbitLayer,
    pub drv_type: DrvType,
    pub priority: DrvPriority,
    pub phase: DrvPhase,
    pub age: u32,
    pub max_age: u32,
    pub capacity: u32,
    pub success_rate: f64,
    pub debris_removed: u32,
    pub target_debris_id: Option<ObjectId>,
    pub captured_debris_id: Option<ObjectId>,
    pub capture_orbits_remaining: u32,
    pub targeting_turns_remaining: u32,
    pub collision_radius: f64,
    pub capture_radius: f64,
}

/// Score components; `total` is their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub satellite: f64,
    pub debris_removal: f64,
    pub recovery: f64,
    pub budget: f64,
    pub survival: f64,
    pub total: f64,
    pub grade: Grade,
}

/// One row of the append-only score log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub turn: u64,
    pub total: f64,
}

/// Value a host may hand to its high-score store. The engine never stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: f64,
    pub grade: Grade,
    pub turn: u64,
    pub day: u64,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub game_over_reason: Option<GameOverReason>,
    pub missions_completed: u32,
}

/// Complete world state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub clock: TurnClock,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub max_steps: u64,
    pub budget: i64,
    pub risk_level: RiskLevel,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub cascade: CascadeState,
    pub stats: WorldStats,
    pub satellites: Vec<SatelliteView>,
    pub debris: Vec<DebrisView>,
    pub drvs: Vec<DrvView>,
    pub collision_events: Vec<CollisionEvent>,
    pub missions: Vec<MissionDefinition>,
    pub score: ScoreBreakdown,
    pub config: GameConfig,
    pub events: Vec<SimEvent>,
}
