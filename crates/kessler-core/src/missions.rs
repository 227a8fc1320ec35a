//! Mission definitions and the fixed mission catalog.
//!
//! Missions are data; the tracker in `kessler-sim` interprets the
//! [`Tracking`] tag each turn.

use serde::{Deserialize, Serialize};

use crate::enums::{MissionStatus, TrackingType};

/// Event counters a cumulative mission can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Counter {
    /// Debris removed by any DRV.
    DebrisRemoved,
    /// GEO satellites towed to the graveyard.
    GeoRelocations,
    RefuelsCompleted,
}

/// Per-turn conditions a consecutive mission can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakCondition {
    /// The last collision pass found no pairs.
    NoCollisions,
}

/// Instantaneous quantities a snapshot mission can compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotMetric {
    /// Satellites not parked in the graveyard.
    ActiveSatellites,
}

/// Conditions a boolean mission must keep for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Invariant {
    NoCascades,
}

/// How a mission measures progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tracking", rename_all = "kebab-case")]
pub enum Tracking {
    Cumulative { counter: Counter },
    /// Arms once debris reaches `trigger_at`; progress is then how far debris
    /// has fallen below that level.
    Threshold { trigger_at: u32 },
    Consecutive { condition: StreakCondition },
    Snapshot { metric: SnapshotMetric },
    Boolean { invariant: Invariant },
}

impl Tracking {
    pub fn tracking_type(&self) -> TrackingType {
        match self {
            Tracking::Cumulative { .. } => TrackingType::Cumulative,
            Tracking::Threshold { .. } => TrackingType::Threshold,
            Tracking::Consecutive { .. } => TrackingType::Consecutive,
            Tracking::Snapshot { .. } => TrackingType::Snapshot,
            Tracking::Boolean { .. } => TrackingType::Boolean,
        }
    }
}

/// A mission instance, mutated in place until it completes or fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDefinition {
    pub id: String,
    pub title: String,
    pub target: u32,
    pub current_progress: u32,
    pub tracking: Tracking,
    pub tracking_type: TrackingType,
    /// Fails if still incomplete once the turn counter passes this.
    pub turn_limit: Option<u64>,
    pub completed: bool,
    pub failed: bool,
    pub completed_turn: Option<u64>,
    /// Threshold missions only: the trigger level has been reached.
    #[serde(default)]
    pub triggered: bool,
    /// Turn of the most recent evaluation; streaks advance at most once per turn.
    #[serde(default)]
    pub last_evaluated_turn: Option<u64>,
}

impl MissionDefinition {
    pub fn new(
        id: &str,
        title: &str,
        tracking: Tracking,
        target: u32,
        turn_limit: Option<u64>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            target,
            current_progress: 0,
            tracking_type: tracking.tracking_type(),
            tracking,
            turn_limit,
            completed: false,
            failed: false,
            completed_turn: None,
            triggered: false,
            last_evaluated_turn: None,
        }
    }

    pub fn status(&self) -> MissionStatus {
        if self.completed {
            MissionStatus::Completed
        } else if self.failed {
            MissionStatus::Failed
        } else {
            MissionStatus::Active
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.completed || self.failed
    }
}

/// The missions every game starts with.
pub fn catalog() -> Vec<MissionDefinition> {
    vec![
        MissionDefinition::new(
            "debris-sweeper",
            "Remove 25 pieces of debris",
            Tracking::Cumulative {
                counter: Counter::DebrisRemoved,
            },
            25,
            Some(150),
        ),
        MissionDefinition::new(
            "graveyard-shift",
            "Tow 2 GEO satellites to the graveyard orbit",
            Tracking::Cumulative {
                counter: Counter::GeoRelocations,
            },
            2,
            Some(200),
        ),
        MissionDefinition::new(
            "fuel-line",
            "Complete 3 refuelling operations",
            Tracking::Cumulative {
                counter: Counter::RefuelsCompleted,
            },
            3,
            None,
        ),
        MissionDefinition::new(
            "clean-sweep",
            "After debris reaches 80, bring it back down to 40",
            Tracking::Threshold { trigger_at: 80 },
            40,
            None,
        ),
        MissionDefinition::new(
            "quiet-skies",
            "Go 15 turns in a row without a collision",
            Tracking::Consecutive {
                condition: StreakCondition::NoCollisions,
            },
            15,
            None,
        ),
        MissionDefinition::new(
            "constellation",
            "Operate 15 satellites at once",
            Tracking::Snapshot {
                metric: SnapshotMetric::ActiveSatellites,
            },
            15,
            Some(100),
        ),
        MissionDefinition::new(
            "no-cascade",
            "Finish the game without a collision cascade",
            Tracking::Boolean {
                invariant: Invariant::NoCascades,
            },
            1,
            None,
        ),
    ]
}
