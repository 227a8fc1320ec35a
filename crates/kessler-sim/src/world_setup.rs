//! Entity spawn factories for setting up the simulation world.
//!
//! Creates satellites, debris and DRVs with their component bundles, and
//! seeds the starting population for a new game.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use kessler_core::components::*;
use kessler_core::constants::*;
use kessler_core::enums::*;
use kessler_core::types::{IdAllocator, ObjectId, OrbitalPosition};
use kessler_drv::profiles::spec_for;

/// Random position anywhere in `layer`.
pub fn random_position(rng: &mut ChaCha8Rng, layer: OrbitLayer) -> OrbitalPosition {
    let (lo, hi) = layer.y_band();
    let x = rng.gen_range(0.0..ORBIT_CIRCUMFERENCE);
    let y = rng.gen_range(lo..=hi);
    OrbitalPosition::new(x, y, layer)
}

/// Cooperative with probability `cooperative_ratio`, otherwise uncooperative.
pub fn random_debris_kind(rng: &mut ChaCha8Rng, cooperative_ratio: f64) -> DebrisKind {
    if rng.gen_bool(cooperative_ratio) {
        DebrisKind::Cooperative
    } else {
        DebrisKind::Uncooperative
    }
}

pub fn spawn_satellite(
    world: &mut World,
    ids: &mut IdAllocator,
    position: OrbitalPosition,
    purpose: SatellitePurpose,
    insurance: InsuranceTier,
) -> ObjectId {
    let id = ids.next_id();
    let in_graveyard = position.layer == OrbitLayer::Graveyard;
    world.spawn((
        id,
        position,
        Radii::SATELLITE,
        Age::default(),
        Satellite {
            purpose,
            insurance,
            in_graveyard,
        },
    ));
    id
}

pub fn spawn_debris(
    world: &mut World,
    ids: &mut IdAllocator,
    position: OrbitalPosition,
    kind: DebrisKind,
) -> ObjectId {
    let id = ids.next_id();
    world.spawn((id, position, Radii::DEBRIS, Debris { kind }));
    id
}

pub fn spawn_drv(
    world: &mut World,
    ids: &mut IdAllocator,
    position: OrbitalPosition,
    drv_type: DrvType,
    priority: DrvPriority,
) -> ObjectId {
    let id = ids.next_id();
    world.spawn((
        id,
        position,
        Radii::DRV,
        Age::default(),
        Drv::new(drv_type, priority, spec_for(drv_type, priority)),
    ));
    id
}

/// Look up the entity carrying `id`.
pub fn find_entity(world: &World, id: ObjectId) -> Option<Entity> {
    world
        .query::<&ObjectId>()
        .iter()
        .find(|(_, object_id)| **object_id == id)
        .map(|(entity, _)| entity)
}

/// Starting satellites favor LEO, then MEO, then GEO.
fn starting_satellite_layer(rng: &mut ChaCha8Rng) -> OrbitLayer {
    match rng.gen_range(0..10) {
        0..=4 => OrbitLayer::Leo,
        5..=7 => OrbitLayer::Meo,
        _ => OrbitLayer::Geo,
    }
}

/// Starting debris is concentrated in LEO.
fn starting_debris_layer(rng: &mut ChaCha8Rng) -> OrbitLayer {
    match rng.gen_range(0..20) {
        0..=11 => OrbitLayer::Leo,
        12..=16 => OrbitLayer::Meo,
        _ => OrbitLayer::Geo,
    }
}

/// Populate an empty world with the difficulty's starting satellites and debris.
pub fn populate(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    profile: &DifficultyProfile,
    cooperative_ratio: f64,
) {
    for _ in 0..profile.starting_satellites {
        let layer = starting_satellite_layer(rng);
        let position = random_position(rng, layer);
        let purpose = SatellitePurpose::ALL[rng.gen_range(0..SatellitePurpose::ALL.len())];
        spawn_satellite(world, ids, position, purpose, InsuranceTier::None);
    }
    for _ in 0..profile.starting_debris {
        let layer = starting_debris_layer(rng);
        let position = random_position(rng, layer);
        let kind = random_debris_kind(rng, cooperative_ratio);
        spawn_debris(world, ids, position, kind);
    }
}
