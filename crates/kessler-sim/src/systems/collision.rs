//! Collision detection and fragmentation.
//!
//! Each pass gathers the collidable satellites and debris, pairs them per
//! layer, then applies the results: both members of every pair are destroyed
//! and (unless the pass is severe) fresh debris is scattered around the
//! impact point.

use std::collections::HashSet;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use kessler_core::components::{Debris, Satellite};
use kessler_core::config::CollisionSettings;
use kessler_core::enums::OrbitLayer;
use kessler_core::events::{CollisionEvent, SimEvent};
use kessler_core::state::{CascadeState, CollisionReport};
use kessler_core::types::{IdAllocator, ObjectId, OrbitalPosition};

use super::claims;
use crate::world_setup::{random_debris_kind, spawn_debris};

/// Plain-data view of one collidable object.
#[derive(Debug, Clone, Copy)]
pub struct Collidable {
    pub entity: Entity,
    pub id: ObjectId,
    pub position: OrbitalPosition,
    /// Insurance payout owed if destroyed; zero for debris.
    pub payout: i64,
    pub is_satellite: bool,
}

/// Everything a collision pass changed, for the engine to fold into its state.
#[derive(Debug, Default)]
pub struct CollisionOutcome {
    pub report: CollisionReport,
    pub events: Vec<CollisionEvent>,
    pub payout: i64,
    pub satellites_destroyed: u32,
    pub sim_events: Vec<SimEvent>,
}

/// Whether two positions in the same layer collide.
pub fn collides(
    a: &OrbitalPosition,
    b: &OrbitalPosition,
    threshold: f64,
    angle_threshold_deg: f64,
) -> bool {
    a.circular_distance(b) < threshold && a.heading_difference(b) <= angle_threshold_deg
}

/// Satellites and debris that can collide this pass, ordered by id.
///
/// Held objects and anything in the graveyard orbit are excluded. DRVs never
/// collide.
pub fn gather(world: &World, held: &HashSet<ObjectId>) -> Vec<Collidable> {
    let mut objects = Vec::new();

    for (entity, (id, pos, sat)) in world
        .query::<(&ObjectId, &OrbitalPosition, &Satellite)>()
        .iter()
    {
        if sat.in_graveyard || pos.layer.is_collision_immune() || held.contains(id) {
            continue;
        }
        objects.push(Collidable {
            entity,
            id: *id,
            position: *pos,
            payout: sat.insurance.payout(),
            is_satellite: true,
        });
    }

    for (entity, (id, pos, _debris)) in world
        .query::<(&ObjectId, &OrbitalPosition, &Debris)>()
        .iter()
    {
        if pos.layer.is_collision_immune() || held.contains(id) {
            continue;
        }
        objects.push(Collidable {
            entity,
            id: *id,
            position: *pos,
            payout: 0,
            is_satellite: false,
        });
    }

    objects.sort_by_key(|o| o.id);
    objects
}

/// Index pairs of colliding objects.
///
/// Layers are scanned LEO, MEO, GEO; within a layer, in slice order. An object
/// joins at most one pair: the first partner found.
pub fn find_pairs(objects: &[Collidable], settings: &CollisionSettings) -> Vec<(usize, usize)> {
    let mut consumed = vec![false; objects.len()];
    let mut pairs = Vec::new();

    for layer in OrbitLayer::COLLIDABLE {
        let Some(threshold) = settings.threshold_for(layer) else {
            continue;
        };
        let members: Vec<usize> = (0..objects.len())
            .filter(|&i| objects[i].position.layer == layer)
            .collect();

        for (k, &i) in members.iter().enumerate() {
            if consumed[i] {
                continue;
            }
            for &j in &members[k + 1..] {
                if consumed[j] {
                    continue;
                }
                if collides(
                    &objects[i].position,
                    &objects[j].position,
                    threshold,
                    settings.angle_threshold_deg,
                ) {
                    consumed[i] = true;
                    consumed[j] = true;
                    pairs.push((i, j));
                    break;
                }
            }
        }
    }

    pairs
}

/// Cascade and severe flags for a pass with `pairs` collisions.
pub fn classify(pairs: u32, settings: &CollisionSettings) -> (bool, bool) {
    (
        pairs >= settings.cascade_threshold,
        pairs >= settings.severe_cascade_threshold,
    )
}

/// Fold one pass into the cascade bookkeeping.
pub fn record_pass(state: &mut CascadeState, report: &CollisionReport) {
    state.collisions_last_turn = report.pairs;
    state.total_collisions += report.pairs;
    state.cascade_triggered = report.cascade;
    if report.cascade {
        state.total_cascades += 1;
        state.consecutive_cascade_turns += 1;
    } else {
        state.consecutive_cascade_turns = 0;
    }
}

/// Run one collision pass over the world.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    settings: &CollisionSettings,
    step: u64,
) -> CollisionOutcome {
    let held = claims::held_ids(world);
    let objects = gather(world, &held);
    let pairs = find_pairs(&objects, settings);

    let pair_count = pairs.len() as u32;
    let (cascade, severe) = classify(pair_count, settings);
    let mut outcome = CollisionOutcome {
        report: CollisionReport {
            pairs: pair_count,
            debris_spawned: 0,
            cascade,
            severe,
        },
        ..CollisionOutcome::default()
    };

    for (i, j) in pairs {
        let (a, b) = (objects[i], objects[j]);
        let layer = a.position.layer;
        let mid = a.position.midpoint(&b.position);

        let event = CollisionEvent {
            id: ids.next_raw(),
            x: mid.x,
            y: layer.clamp_y(mid.y),
            layer,
            timestamp: step,
            objects: (a.id, b.id),
        };
        outcome.sim_events.push(SimEvent::Collision {
            event_id: event.id,
            layer,
            x: event.x,
            y: event.y,
        });
        outcome.events.push(event);

        for member in [a, b] {
            let _ = world.despawn(member.entity);
            if member.is_satellite {
                outcome.satellites_destroyed += 1;
            }
            if member.payout > 0 {
                outcome.payout += member.payout;
                outcome.sim_events.push(SimEvent::InsurancePayout {
                    satellite: member.id,
                    amount: member.payout,
                });
            }
        }

        if severe {
            continue;
        }
        let spread = settings.spawn_jitter;
        for _ in 0..settings.debris_per_collision {
            let offset = DVec2::new(
                rng.gen_range(-spread..=spread),
                rng.gen_range(-spread..=spread),
            );
            let at = mid + offset;
            let kind = random_debris_kind(rng, settings.cooperative_debris_ratio);
            spawn_debris(world, ids, OrbitalPosition::new(at.x, at.y, layer), kind);
            outcome.report.debris_spawned += 1;
        }
    }

    if pair_count > 0 {
        log::debug!(
            "collision pass at turn {step}: {pair_count} pairs, {} debris spawned",
            outcome.report.debris_spawned
        );
    }
    outcome
}
