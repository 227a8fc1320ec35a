//! Host commands sent to the simulation.
//!
//! Every command is validated before it mutates anything; see
//! [`CommandError`](crate::errors::CommandError).

use serde::{Deserialize, Serialize};

use crate::config::Setting;
use crate::enums::*;
use crate::state::CollisionReport;
use crate::types::ObjectId;

/// All possible host actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Lifecycle ---
    /// Reset the world and start a new game.
    InitializeGame { difficulty: Difficulty },

    // --- Launches ---
    LaunchSatellite {
        layer: OrbitLayer,
        purpose: SatellitePurpose,
        insurance: InsuranceTier,
    },
    LaunchDrv {
        layer: OrbitLayer,
        drv_type: DrvType,
        priority: DrvPriority,
    },

    // --- Turn phases (in the order a turn runs them) ---
    AdvanceTurn,
    ProcessDrvOperations,
    ProcessCollisions,
    /// Roll the per-turn storm probability.
    CheckSolarStorm,
    /// Force a storm regardless of probability.
    TriggerSolarStorm,
    UpdateMissionProgress,
    DecommissionExpiredDrvs,
    /// All six phases above, in order.
    RunTurn,

    // --- Tuning ---
    ApplySetting { setting: Setting },
}

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandOutcome {
    Initialized,
    Launched { id: ObjectId },
    TurnAdvanced { step: u64 },
    DrvOperationsProcessed,
    Collisions { report: CollisionReport },
    SolarStorm { removed: Option<u32> },
    Decommissioned { count: u32 },
    MissionsUpdated,
    TurnCompleted { step: u64 },
    SettingApplied,
}
