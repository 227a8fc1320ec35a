//! Solar storms: atmospheric drag that clears part of the LEO debris field.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use kessler_core::components::Debris;
use kessler_core::enums::OrbitLayer;
use kessler_core::types::{ObjectId, OrbitalPosition};

/// One Bernoulli trial. `probability` must already be validated to `[0, 1]`.
pub fn roll(rng: &mut ChaCha8Rng, probability: f64) -> bool {
    rng.gen_bool(probability)
}

/// Pieces a storm removes from a field of `leo_debris`: `fraction` rounded down.
pub fn storm_removal_count(leo_debris: usize, fraction: f64) -> usize {
    // Small epsilon so exact products like 10 * 0.3 don't floor to one less.
    let raw = (leo_debris as f64 * fraction + 1e-9).floor() as usize;
    raw.min(leo_debris)
}

/// Remove a random `fraction` of LEO debris. Returns the count removed.
pub fn solar_storm(world: &mut World, rng: &mut ChaCha8Rng, fraction: f64) -> u32 {
    let mut leo: Vec<(ObjectId, Entity)> = world
        .query::<(&ObjectId, &OrbitalPosition, &Debris)>()
        .iter()
        .filter(|(_, (_, pos, _))| pos.layer == OrbitLayer::Leo)
        .map(|(entity, (id, _, _))| (*id, entity))
        .collect();
    leo.sort_by_key(|&(id, _)| id);

    let count = storm_removal_count(leo.len(), fraction);
    let chosen: Vec<Entity> = leo
        .choose_multiple(rng, count)
        .map(|&(_, entity)| entity)
        .collect();

    for entity in &chosen {
        let _ = world.despawn(*entity);
    }
    chosen.len() as u32
}
