//! Retirement of worn-out DRVs.
//!
//! A DRV past its maximum age with no target and no capture is removed and
//! leaves one piece of debris behind. A DRV that is itself being held by a
//! refueler waits until it is released.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use kessler_core::components::{Age, Drv};
use kessler_core::types::{IdAllocator, ObjectId, OrbitalPosition};

use super::claims;
use crate::world_setup::{random_debris_kind, spawn_debris};

/// A retired DRV and the debris it left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decommissioned {
    pub id: ObjectId,
    pub debris: ObjectId,
}

pub fn is_expired(drv: &Drv, age: &Age) -> bool {
    age.turns >= drv.spec.max_age() && drv.target.is_none() && drv.captured.is_none()
}

pub fn run(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    cooperative_ratio: f64,
) -> Vec<Decommissioned> {
    let held = claims::held_ids(world);

    let mut expired: Vec<(ObjectId, Entity, OrbitalPosition)> = world
        .query::<(&ObjectId, &OrbitalPosition, &Drv, &Age)>()
        .iter()
        .filter(|(_, (id, _, drv, age))| is_expired(drv, age) && !held.contains(*id))
        .map(|(entity, (id, pos, _, _))| (*id, entity, *pos))
        .collect();
    expired.sort_by_key(|&(id, _, _)| id);

    let mut retired = Vec::with_capacity(expired.len());
    for (id, entity, position) in expired {
        let _ = world.despawn(entity);
        let kind = random_debris_kind(rng, cooperative_ratio);
        let debris = spawn_debris(world, ids, position, kind);
        retired.push(Decommissioned { id, debris });
    }
    retired
}
