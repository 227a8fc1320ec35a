//! Ownership ledger for DRV targets and captures.
//!
//! At most one live DRV may claim any object. The ledger is rebuilt from the
//! world at the start of a DRV pass and kept in step with every claim and
//! release during it.

use std::collections::{HashMap, HashSet};

use hecs::World;

use kessler_core::components::Drv;
use kessler_core::types::ObjectId;

#[derive(Debug, Default)]
pub struct ClaimLedger {
    owners: HashMap<ObjectId, ObjectId>,
}

impl ClaimLedger {
    pub fn from_world(world: &World) -> Self {
        let mut ledger = Self::default();
        for (_entity, (id, drv)) in world.query::<(&ObjectId, &Drv)>().iter() {
            if let Some(object) = drv.claim() {
                if !ledger.claim(object, *id) {
                    log::warn!("object {object} claimed by more than one DRV; keeping first");
                }
            }
        }
        ledger
    }

    pub fn is_claimed(&self, object: ObjectId) -> bool {
        self.owners.contains_key(&object)
    }

    pub fn owner(&self, object: ObjectId) -> Option<ObjectId> {
        self.owners.get(&object).copied()
    }

    /// Record `drv` as the holder of `object`. Fails if someone else holds it.
    pub fn claim(&mut self, object: ObjectId, drv: ObjectId) -> bool {
        match self.owners.get(&object) {
            Some(owner) => *owner == drv,
            None => {
                self.owners.insert(object, drv);
                true
            }
        }
    }

    pub fn release(&mut self, object: ObjectId) {
        self.owners.remove(&object);
    }
}

/// Ids of every object currently captured (held) by a DRV.
pub fn held_ids(world: &World) -> HashSet<ObjectId> {
    world
        .query::<&Drv>()
        .iter()
        .filter_map(|(_, drv)| drv.captured)
        .collect()
}
