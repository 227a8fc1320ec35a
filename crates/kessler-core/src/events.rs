//! Records and notifications emitted by the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::ObjectId;

/// One colliding pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub layer: OrbitLayer,
    /// Turn on which the collision happened.
    pub timestamp: u64,
    pub objects: (ObjectId, ObjectId),
}

/// Per-turn counts for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnHistorySample {
    pub turn: u64,
    pub debris_count: u32,
    pub satellite_count: u32,
    /// Cumulative debris removed by DRVs.
    pub debris_removed: u32,
    pub active_drv_count: u32,
}

/// Notifications for the rendering/audio layers, drained once per turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    GameStarted { difficulty: Difficulty },
    SatelliteLaunched { id: ObjectId, layer: OrbitLayer },
    DrvLaunched { id: ObjectId, drv_type: DrvType, layer: OrbitLayer },
    TargetAcquired { drv: ObjectId, target: ObjectId },
    Captured { drv: ObjectId, target: ObjectId },
    /// A claim was dropped because its object vanished or a removal roll failed.
    Released { drv: ObjectId, target: ObjectId },
    DebrisRemoved { drv: ObjectId, debris: ObjectId },
    SatelliteRecovered { drv: ObjectId, satellite: ObjectId },
    SatelliteRelocated { drv: ObjectId, satellite: ObjectId },
    Refueled { drv: ObjectId, target: ObjectId },
    DrvDecommissioned { id: ObjectId, debris: ObjectId },
    Collision { event_id: u64, layer: OrbitLayer, x: f64, y: f64 },
    InsurancePayout { satellite: ObjectId, amount: i64 },
    CascadeTriggered { pairs: u32 },
    SevereCascade { pairs: u32 },
    SolarStorm { removed: u32 },
    RiskChanged { from: RiskLevel, to: RiskLevel },
    MissionCompleted { mission: String, turn: u64 },
    MissionFailed { mission: String, turn: u64 },
    GameOver { reason: GameOverReason },
}
