//! Orbital movement and aging.

use hecs::World;

use kessler_core::components::{Age, Drv};
use kessler_core::constants::{JITTER_MAX, JITTER_MIN};
use kessler_core::types::{ObjectId, OrbitalPosition};

use super::claims;

/// Fixed speed multiplier for an object, in `[JITTER_MIN, JITTER_MAX]`.
///
/// A pure function of the id: the same object always keeps the same relative
/// speed, while neighbouring ids drift apart.
pub fn jitter(id: ObjectId) -> f64 {
    let mut z = id.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    let unit = (z >> 11) as f64 / (1u64 << 53) as f64;
    JITTER_MIN + unit * (JITTER_MAX - JITTER_MIN)
}

/// Advance every free-flying object along its orbit.
///
/// Objects held by a DRV, and DRVs holding something, stay put.
pub fn run(world: &mut World) {
    let held = claims::held_ids(world);

    for (_entity, (id, pos, drv)) in
        world.query_mut::<(&ObjectId, &mut OrbitalPosition, Option<&Drv>)>()
    {
        if held.contains(id) || drv.is_some_and(|d| d.captured.is_some()) {
            continue;
        }
        let distance = pos.layer.base_speed() * jitter(*id);
        pos.advance(distance);
    }
}

/// Age every satellite and DRV by one turn.
pub fn age_all(world: &mut World) {
    for (_entity, age) in world.query_mut::<&mut Age>() {
        age.turns = age.turns.saturating_add(1);
    }
}
