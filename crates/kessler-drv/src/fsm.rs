//! DRV capture-cycle finite state machine.
//!
//! Pure functions that compute the next step for a vehicle based on its
//! type, current phase and whether the object it claims still exists.
//! No ECS dependency; operates on plain data. The engine applies the
//! returned [`DrvStep`] to the world.

use kessler_core::components::Drv;
use kessler_core::enums::{DrvPhase, DrvType};

use crate::profiles::get_profile;

/// Input to the FSM for a single vehicle.
pub struct DrvContext {
    pub drv_type: DrvType,
    pub phase: DrvPhase,
    /// Countdown for the current phase (targeting turns or capture orbits).
    pub turns_remaining: u32,
    /// Whether the claimed object (target or capture) is still in the world.
    pub subject_present: bool,
}

impl DrvContext {
    pub fn from_drv(drv: &Drv, subject_present: bool) -> Self {
        let phase = drv.phase();
        let turns_remaining = match phase {
            DrvPhase::Seeking => 0,
            DrvPhase::Targeting => drv.targeting_turns_remaining,
            DrvPhase::Holding => drv.capture_orbits_remaining,
        };
        Self {
            drv_type: drv.drv_type,
            phase,
            turns_remaining,
            subject_present,
        }
    }
}

/// What a completed hold does to the held object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Satellites are recovered; debris gets one removal roll.
    RecoverOrRemove,
    /// Tow to the graveyard orbit, then retire the tug.
    Relocate,
    /// Reset the object's age.
    Refuel,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrvStep {
    /// Attempt `capacity` direct removal rolls this turn.
    Sweep,
    /// Look for an unclaimed eligible target.
    Seek,
    /// Keep counting down the current phase.
    Countdown { remaining: u32 },
    /// Targeting finished; take hold of the target.
    Capture,
    /// Holding finished; apply the type's completion.
    Complete(Completion),
    /// The claimed object is gone; drop the claim.
    Release,
}

/// Evaluate the FSM for one vehicle.
pub fn evaluate(ctx: &DrvContext) -> DrvStep {
    if !get_profile(ctx.drv_type).multi_turn_capture {
        return DrvStep::Sweep;
    }

    match ctx.phase {
        DrvPhase::Seeking => DrvStep::Seek,
        DrvPhase::Targeting => {
            if !ctx.subject_present {
                return DrvStep::Release;
            }
            let remaining = ctx.turns_remaining.saturating_sub(1);
            if remaining == 0 {
                DrvStep::Capture
            } else {
                DrvStep::Countdown { remaining }
            }
        }
        DrvPhase::Holding => {
            if !ctx.subject_present {
                return DrvStep::Release;
            }
            let remaining = ctx.turns_remaining.saturating_sub(1);
            if remaining == 0 {
                DrvStep::Complete(completion_for(ctx.drv_type))
            } else {
                DrvStep::Countdown { remaining }
            }
        }
    }
}

fn completion_for(drv_type: DrvType) -> Completion {
    match drv_type {
        DrvType::Geotug => Completion::Relocate,
        DrvType::Refueling => Completion::Refuel,
        DrvType::Cooperative | DrvType::Uncooperative => Completion::RecoverOrRemove,
    }
}
