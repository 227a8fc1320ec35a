//! Read-only views of the world for host collaborators.
//!
//! Views are sorted by id so identical worlds always serialize identically.

use hecs::World;

use kessler_core::components::{Age, Debris, Drv, Radii, Satellite};
use kessler_core::state::{DebrisView, DrvView, SatelliteView};
use kessler_core::types::{ObjectId, OrbitalPosition};

pub fn satellite_views(world: &World) -> Vec<SatelliteView> {
    let mut views: Vec<SatelliteView> = world
        .query::<(&ObjectId, &OrbitalPosition, &Radii, &Age, &Satellite)>()
        .iter()
        .map(|(_, (id, pos, radii, age, sat))| SatelliteView {
            id: *id,
            x: pos.x,
            y: pos.y,
            layer: pos.layer,
            purpose: sat.purpose,
            age: age.turns,
            insurance: sat.insurance,
            in_graveyard: sat.in_graveyard,
            collision_radius: radii.collision,
            capture_radius: radii.capture,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

pub fn debris_views(world: &World) -> Vec<DebrisView> {
    let mut views: Vec<DebrisView> = world
        .query::<(&ObjectId, &OrbitalPosition, &Radii, &Debris)>()
        .iter()
        .map(|(_, (id, pos, radii, debris))| DebrisView {
            id: *id,
            x: pos.x,
            y: pos.y,
            layer: pos.layer,
            kind: debris.kind,
            collision_radius: radii.collision,
            capture_radius: radii.capture,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

pub fn drv_views(world: &World) -> Vec<DrvView> {
    let mut views: Vec<DrvView> = world
        .query::<(&ObjectId, &OrbitalPosition, &Radii, &Age, &Drv)>()
        .iter()
        .map(|(_, (id, pos, radii, age, drv))| DrvView {
            id: *id,
            x: pos.x,
            y: pos.y,
            layer: pos.layer,
            drv_type: drv.drv_type,
            priority: drv.priority,
            phase: drv.phase(),
            age: age.turns,
            max_age: drv.spec.max_age(),
            capacity: drv.spec.capacity(),
            success_rate: drv.spec.success_rate(),
            debris_removed: drv.debris_removed,
            target_debris_id: drv.target,
            captured_debris_id: drv.captured,
            capture_orbits_remaining: drv.capture_orbits_remaining,
            targeting_turns_remaining: drv.targeting_turns_remaining,
            collision_radius: radii.collision,
            capture_radius: radii.capture,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

pub fn count_debris(world: &World) -> usize {
    world.query::<&Debris>().iter().count()
}

pub fn count_satellites(world: &World) -> usize {
    world.query::<&Satellite>().iter().count()
}

/// Satellites not parked in the graveyard orbit.
pub fn count_active_satellites(world: &World) -> usize {
    world
        .query::<&Satellite>()
        .iter()
        .filter(|(_, sat)| !sat.in_graveyard)
        .count()
}

pub fn count_drvs(world: &World) -> usize {
    world.query::<&Drv>().iter().count()
}
