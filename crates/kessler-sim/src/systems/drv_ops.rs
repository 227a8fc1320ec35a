//! DRV operations: target acquisition, capture and per-type completion.
//!
//! Vehicles are processed in ascending id order. The behavioral decision for
//! each comes from `kessler_drv::fsm::evaluate`; this system applies it to the
//! world and keeps the claim ledger current so no object is ever held by two
//! vehicles. A vehicle held by another (a refueler) sits the pass out.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use kessler_core::components::{Age, Debris, Drv, Satellite};
use kessler_core::constants::{CAPTURE_ORBITS, SATELLITE_DESIGN_LIFE, TARGETING_TURNS};
use kessler_core::enums::{DrvPhase, OrbitLayer};
use kessler_core::events::SimEvent;
use kessler_core::state::WorldStats;
use kessler_core::types::{ObjectId, OrbitalPosition};
use kessler_drv::fsm::{self, Completion, DrvContext, DrvStep};
use kessler_drv::targeting::{is_eligible, pick_target, Candidate, CandidateKind};

use super::claims::{self, ClaimLedger};
use crate::world_setup::find_entity;

/// Mutable engine state a DRV pass reports into.
pub struct DrvPassOutput<'a> {
    pub stats: &'a mut WorldStats,
    pub events: &'a mut Vec<SimEvent>,
}

/// Run one DRV operations pass.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, out: &mut DrvPassOutput<'_>) {
    let mut ledger = ClaimLedger::from_world(world);
    let mut held = claims::held_ids(world);

    let mut vehicles: Vec<(ObjectId, Entity)> = world
        .query::<(&ObjectId, &Drv)>()
        .iter()
        .map(|(entity, (id, _))| (*id, entity))
        .collect();
    vehicles.sort_by_key(|&(id, _)| id);

    for (id, entity) in vehicles {
        if held.contains(&id) {
            continue;
        }
        let (mut drv, layer) = match world.query_one_mut::<(&Drv, &OrbitalPosition)>(entity) {
            Ok((drv, pos)) => (drv.clone(), pos.layer),
            Err(_) => continue,
        };

        let subject_present = drv
            .claim()
            .is_some_and(|subject| find_entity(world, subject).is_some());
        let step = fsm::evaluate(&DrvContext::from_drv(&drv, subject_present));
        let before = drv.captured;

        match step {
            DrvStep::Sweep => sweep(world, rng, &ledger, id, &mut drv, layer, out),
            DrvStep::Seek => seek(world, rng, &mut ledger, id, &mut drv, layer, out),
            DrvStep::Countdown { remaining } => match drv.phase() {
                DrvPhase::Targeting => drv.targeting_turns_remaining = remaining,
                DrvPhase::Holding => drv.capture_orbits_remaining = remaining,
                DrvPhase::Seeking => {}
            },
            DrvStep::Capture => capture(world, &mut ledger, entity, id, &mut drv, out),
            DrvStep::Complete(completion) => {
                complete(world, rng, &mut ledger, entity, id, &mut drv, completion, out)
            }
            DrvStep::Release => release(&mut ledger, id, &mut drv, out),
        }

        if before != drv.captured {
            if let Some(previous) = before {
                held.remove(&previous);
            }
            if let Some(current) = drv.captured {
                held.insert(current);
            }
        }

        if let Ok(mut slot) = world.get::<&mut Drv>(entity) {
            *slot = drv;
        }
    }
}

/// Every satellite, debris piece and other DRV as a targeting candidate.
fn gather_candidates(world: &World, exclude: ObjectId) -> Vec<(Candidate, Entity)> {
    let mut candidates = Vec::new();

    for (entity, (id, pos, sat, age)) in world
        .query::<(&ObjectId, &OrbitalPosition, &Satellite, &Age)>()
        .iter()
    {
        candidates.push((
            Candidate {
                id: *id,
                layer: pos.layer,
                kind: CandidateKind::Satellite {
                    in_graveyard: sat.in_graveyard,
                },
                age: age.turns,
                max_age: SATELLITE_DESIGN_LIFE,
            },
            entity,
        ));
    }

    for (entity, (id, pos, debris)) in world
        .query::<(&ObjectId, &OrbitalPosition, &Debris)>()
        .iter()
    {
        candidates.push((
            Candidate {
                id: *id,
                layer: pos.layer,
                kind: CandidateKind::Debris(debris.kind),
                age: 0,
                max_age: 0,
            },
            entity,
        ));
    }

    for (entity, (id, pos, drv, age)) in world
        .query::<(&ObjectId, &OrbitalPosition, &Drv, &Age)>()
        .iter()
    {
        if *id == exclude {
            continue;
        }
        candidates.push((
            Candidate {
                id: *id,
                layer: pos.layer,
                kind: CandidateKind::Drv(drv.drv_type),
                age: age.turns,
                max_age: drv.spec.max_age(),
            },
            entity,
        ));
    }

    candidates
}

/// Uncooperative DRVs: `capacity` independent removal rolls this turn.
fn sweep(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ledger: &ClaimLedger,
    id: ObjectId,
    drv: &mut Drv,
    layer: OrbitLayer,
    out: &mut DrvPassOutput<'_>,
) {
    let mut pool: Vec<(ObjectId, Entity)> = gather_candidates(world, id)
        .into_iter()
        .filter(|(c, _)| is_eligible(drv.drv_type, layer, c) && !ledger.is_claimed(c.id))
        .map(|(c, entity)| (c.id, entity))
        .collect();
    pool.sort_by_key(|&(debris_id, _)| debris_id);

    for _ in 0..drv.spec.capacity() {
        if pool.is_empty() {
            break;
        }
        let index = rng.gen_range(0..pool.len());
        let (debris_id, debris_entity) = pool.swap_remove(index);
        if rng.gen_bool(drv.spec.success_rate()) {
            let _ = world.despawn(debris_entity);
            drv.debris_removed += 1;
            out.stats.debris_removed_uncooperative += 1;
            out.events.push(SimEvent::DebrisRemoved {
                drv: id,
                debris: debris_id,
            });
        }
    }
}

fn seek(
    world: &World,
    rng: &mut ChaCha8Rng,
    ledger: &mut ClaimLedger,
    id: ObjectId,
    drv: &mut Drv,
    layer: OrbitLayer,
    out: &mut DrvPassOutput<'_>,
) {
    let mut eligible: Vec<ObjectId> = gather_candidates(world, id)
        .into_iter()
        .filter(|(c, _)| is_eligible(drv.drv_type, layer, c) && !ledger.is_claimed(c.id))
        .map(|(c, _)| c.id)
        .collect();

    let Some(target) = pick_target(&mut eligible, rng) else {
        return;
    };
    if ledger.claim(target, id) {
        drv.target = Some(target);
        drv.targeting_turns_remaining = TARGETING_TURNS;
        log::debug!("DRV {id} targeting {target}");
        out.events.push(SimEvent::TargetAcquired { drv: id, target });
    }
}

/// Targeting finished: attach to the target and start holding it.
fn capture(
    world: &mut World,
    ledger: &mut ClaimLedger,
    entity: Entity,
    id: ObjectId,
    drv: &mut Drv,
    out: &mut DrvPassOutput<'_>,
) {
    let Some(target) = drv.target else {
        return;
    };
    let target_pos = find_entity(world, target)
        .and_then(|e| world.get::<&OrbitalPosition>(e).ok().map(|pos| *pos));
    let Some(target_pos) = target_pos else {
        release(ledger, id, drv, out);
        return;
    };

    if let Ok(mut pos) = world.get::<&mut OrbitalPosition>(entity) {
        *pos = target_pos;
    }
    drv.captured = drv.target.take();
    drv.targeting_turns_remaining = 0;
    drv.capture_orbits_remaining = CAPTURE_ORBITS;
    log::debug!("DRV {id} captured {target}");
    out.events.push(SimEvent::Captured { drv: id, target });
}

/// Holding finished: apply the vehicle's effect on its capture.
#[allow(clippy::too_many_arguments)]
fn complete(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ledger: &mut ClaimLedger,
    entity: Entity,
    id: ObjectId,
    drv: &mut Drv,
    completion: Completion,
    out: &mut DrvPassOutput<'_>,
) {
    let Some(subject) = drv.captured else {
        return;
    };
    let Some(subject_entity) = find_entity(world, subject) else {
        release(ledger, id, drv, out);
        return;
    };

    match completion {
        Completion::RecoverOrRemove => {
            if world.get::<&Satellite>(subject_entity).is_ok() {
                let _ = world.despawn(subject_entity);
                out.stats.satellites_recovered += 1;
                out.events.push(SimEvent::SatelliteRecovered {
                    drv: id,
                    satellite: subject,
                });
            } else if rng.gen_bool(drv.spec.success_rate()) {
                let _ = world.despawn(subject_entity);
                drv.debris_removed += 1;
                out.stats.debris_removed_cooperative += 1;
                out.events.push(SimEvent::DebrisRemoved {
                    drv: id,
                    debris: subject,
                });
            } else {
                out.events.push(SimEvent::Released {
                    drv: id,
                    target: subject,
                });
            }
        }
        Completion::Relocate => {
            if let Ok(mut pos) = world.get::<&mut OrbitalPosition>(subject_entity) {
                pos.relocate(OrbitLayer::Graveyard);
            }
            if let Ok(mut sat) = world.get::<&mut Satellite>(subject_entity) {
                sat.in_graveyard = true;
            }
            // The tow uses up the tug: it retires at the next decommission check.
            if let Ok(mut age) = world.get::<&mut Age>(entity) {
                age.turns = age.turns.max(drv.spec.max_age());
            }
            out.stats.geo_relocations += 1;
            log::info!("geotug {id} moved satellite {subject} to the graveyard orbit");
            out.events.push(SimEvent::SatelliteRelocated {
                drv: id,
                satellite: subject,
            });
        }
        Completion::Refuel => {
            if let Ok(mut age) = world.get::<&mut Age>(subject_entity) {
                age.turns = 0;
            }
            out.stats.refuels_completed += 1;
            out.events.push(SimEvent::Refueled {
                drv: id,
                target: subject,
            });
        }
    }

    ledger.release(subject);
    drv.release();
}

/// Drop the current claim because the object is gone.
fn release(ledger: &mut ClaimLedger, id: ObjectId, drv: &mut Drv, out: &mut DrvPassOutput<'_>) {
    if let Some(subject) = drv.claim() {
        ledger.release(subject);
        log::debug!("DRV {id} lost {subject}");
        out.events.push(SimEvent::Released {
            drv: id,
            target: subject,
        });
    }
    drv.release();
}

