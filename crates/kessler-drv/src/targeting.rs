//! Target eligibility and selection.
//!
//! Ownership (whether another vehicle already claims a candidate) is the
//! engine's concern; these functions only judge type and layer rules.

use rand::seq::SliceRandom;
use rand::Rng;

use kessler_core::constants::REFUEL_AGE_FRACTION;
use kessler_core::enums::{DebrisKind, DrvType, OrbitLayer};
use kessler_core::types::ObjectId;

/// What kind of object a candidate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Satellite { in_graveyard: bool },
    Debris(DebrisKind),
    Drv(DrvType),
}

/// Plain-data view of a potential target.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub id: ObjectId,
    pub layer: OrbitLayer,
    pub kind: CandidateKind,
    pub age: u32,
    /// Design life; zero for debris.
    pub max_age: u32,
}

fn is_worn(candidate: &Candidate) -> bool {
    candidate.max_age > 0
        && f64::from(candidate.age) >= f64::from(candidate.max_age) * REFUEL_AGE_FRACTION
}

/// Whether a vehicle of `drv_type` operating in `drv_layer` may claim `candidate`.
pub fn is_eligible(drv_type: DrvType, drv_layer: OrbitLayer, candidate: &Candidate) -> bool {
    if candidate.layer != drv_layer || candidate.layer.is_collision_immune() {
        return false;
    }
    match (drv_type, candidate.kind) {
        (DrvType::Cooperative, CandidateKind::Satellite { in_graveyard }) => !in_graveyard,
        (DrvType::Cooperative, CandidateKind::Debris(kind)) => kind == DebrisKind::Cooperative,
        (DrvType::Uncooperative, CandidateKind::Debris(kind)) => kind == DebrisKind::Uncooperative,
        (DrvType::Geotug, CandidateKind::Satellite { in_graveyard }) => {
            !in_graveyard && candidate.layer == OrbitLayer::Geo
        }
        (DrvType::Refueling, CandidateKind::Satellite { in_graveyard }) => {
            !in_graveyard && is_worn(candidate)
        }
        (DrvType::Refueling, CandidateKind::Drv(other)) => {
            other != DrvType::Refueling && is_worn(candidate)
        }
        _ => false,
    }
}

/// Pick one id uniformly at random.
///
/// Candidates are sorted first so the choice depends only on the RNG state,
/// not on storage order.
pub fn pick_target<R: Rng>(candidates: &mut [ObjectId], rng: &mut R) -> Option<ObjectId> {
    candidates.sort_unstable();
    candidates.choose(rng).copied()
}
