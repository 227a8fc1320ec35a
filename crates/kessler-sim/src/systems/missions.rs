//! Mission progress interpreter.
//!
//! Each mission carries a [`Tracking`] tag; this module evaluates it against
//! a per-turn [`MissionContext`] and moves missions to completed or failed.
//! Terminal missions are never touched again.

use serde::{Deserialize, Serialize};

use kessler_core::missions::{
    Counter, Invariant, MissionDefinition, SnapshotMetric, StreakCondition, Tracking,
};
use kessler_core::state::WorldStats;

/// World facts missions are measured against.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MissionContext {
    pub step: u64,
    pub debris_count: u32,
    pub active_satellites: u32,
    pub collisions_last_turn: u32,
    pub total_cascades: u32,
    pub stats: WorldStats,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionTransition {
    Completed { id: String, turn: u64 },
    Failed { id: String, turn: u64 },
}

fn counter_value(counter: Counter, stats: &WorldStats) -> u32 {
    match counter {
        Counter::DebrisRemoved => stats.debris_removed(),
        Counter::GeoRelocations => stats.geo_relocations,
        Counter::RefuelsCompleted => stats.refuels_completed,
    }
}

fn streak_holds(condition: StreakCondition, ctx: &MissionContext) -> bool {
    match condition {
        StreakCondition::NoCollisions => ctx.collisions_last_turn == 0,
    }
}

fn metric_value(metric: SnapshotMetric, ctx: &MissionContext) -> u32 {
    match metric {
        SnapshotMetric::ActiveSatellites => ctx.active_satellites,
    }
}

fn violated(invariant: Invariant, ctx: &MissionContext) -> bool {
    match invariant {
        Invariant::NoCascades => ctx.total_cascades > 0,
    }
}

fn fail(mission: &mut MissionDefinition, turn: u64) -> MissionTransition {
    mission.failed = true;
    MissionTransition::Failed {
        id: mission.id.clone(),
        turn,
    }
}

/// Evaluate one mission. Returns its transition, if any.
pub fn evaluate(
    mission: &mut MissionDefinition,
    ctx: &MissionContext,
) -> Option<MissionTransition> {
    if mission.is_terminal() {
        return None;
    }
    let fresh_turn = mission.last_evaluated_turn != Some(ctx.step);
    mission.last_evaluated_turn = Some(ctx.step);

    match mission.tracking {
        Tracking::Cumulative { counter } => {
            mission.current_progress = counter_value(counter, &ctx.stats);
        }
        Tracking::Threshold { trigger_at } => {
            if !mission.triggered && ctx.debris_count >= trigger_at {
                mission.triggered = true;
            }
            if mission.triggered {
                mission.current_progress = trigger_at.saturating_sub(ctx.debris_count);
            }
        }
        Tracking::Consecutive { condition } => {
            // No streak credit on the game-over evaluation.
            if fresh_turn {
                if !streak_holds(condition, ctx) {
                    mission.current_progress = 0;
                } else if !ctx.game_over {
                    mission.current_progress += 1;
                }
            }
        }
        Tracking::Snapshot { metric } => {
            mission.current_progress = metric_value(metric, ctx);
        }
        Tracking::Boolean { invariant } => {
            if violated(invariant, ctx) {
                return Some(fail(mission, ctx.step));
            }
            if ctx.game_over {
                mission.current_progress = mission.target;
            }
        }
    }

    if mission.current_progress >= mission.target {
        mission.completed = true;
        mission.completed_turn = Some(ctx.step);
        return Some(MissionTransition::Completed {
            id: mission.id.clone(),
            turn: ctx.step,
        });
    }
    if mission.turn_limit.is_some_and(|limit| ctx.step > limit) {
        return Some(fail(mission, ctx.step));
    }
    None
}

/// Evaluate every mission, in catalog order.
pub fn update(missions: &mut [MissionDefinition], ctx: &MissionContext) -> Vec<MissionTransition> {
    missions
        .iter_mut()
        .filter_map(|mission| evaluate(mission, ctx))
        .collect()
}
