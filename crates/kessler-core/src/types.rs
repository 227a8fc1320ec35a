//! Fundamental identity, geometric and time types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEGREES_PER_UNIT, ORBIT_CIRCUMFERENCE};
use crate::enums::OrbitLayer;

/// Identity of a satellite, debris piece, or DRV.
///
/// Drawn from one counter shared by every collection and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> ObjectId {
        self.next += 1;
        ObjectId(self.next)
    }

    /// Raw counter for ids that are not object ids (collision events).
    pub fn next_raw(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

/// Position in the abstract orbital model.
///
/// `x` is the angular coordinate in `[0, 100)` and wraps; `y` is the
/// secondary coordinate, kept inside the layer's band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalPosition {
    pub x: f64,
    pub y: f64,
    pub layer: OrbitLayer,
}

/// Wrap an angular coordinate into `[0, 100)`.
pub fn wrap_x(x: f64) -> f64 {
    let wrapped = x.rem_euclid(ORBIT_CIRCUMFERENCE);
    // rem_euclid can round up to the modulus for tiny negatives.
    if wrapped >= ORBIT_CIRCUMFERENCE {
        0.0
    } else {
        wrapped
    }
}

/// Shorter-arc separation between two angular coordinates.
pub fn circular_dx(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % ORBIT_CIRCUMFERENCE;
    d.min(ORBIT_CIRCUMFERENCE - d)
}

/// Signed shorter-arc offset from `from` to `to`.
fn signed_dx(from: f64, to: f64) -> f64 {
    let mut d = (to - from) % ORBIT_CIRCUMFERENCE;
    if d > ORBIT_CIRCUMFERENCE / 2.0 {
        d -= ORBIT_CIRCUMFERENCE;
    } else if d < -ORBIT_CIRCUMFERENCE / 2.0 {
        d += ORBIT_CIRCUMFERENCE;
    }
    d
}

impl OrbitalPosition {
    pub fn new(x: f64, y: f64, layer: OrbitLayer) -> Self {
        Self {
            x: wrap_x(x),
            y: layer.clamp_y(y),
            layer,
        }
    }

    /// Distance to another position, wrapping on `x`.
    pub fn circular_distance(&self, other: &OrbitalPosition) -> f64 {
        DVec2::new(circular_dx(self.x, other.x), self.y - other.y).length()
    }

    /// Heading angle on the orbit circle, degrees in `[0, 360)`.
    pub fn heading_deg(&self) -> f64 {
        self.x * DEGREES_PER_UNIT
    }

    /// Shorter-arc difference between the two headings, degrees.
    pub fn heading_difference(&self, other: &OrbitalPosition) -> f64 {
        let d = (self.heading_deg() - other.heading_deg()).abs() % 360.0;
        d.min(360.0 - d)
    }

    /// Point halfway along the shorter arc, averaged on `y`.
    pub fn midpoint(&self, other: &OrbitalPosition) -> DVec2 {
        let x = wrap_x(self.x + signed_dx(self.x, other.x) / 2.0);
        DVec2::new(x, (self.y + other.y) / 2.0)
    }

    /// Advance along the orbit by `distance`, wrapping.
    pub fn advance(&mut self, distance: f64) {
        self.x = wrap_x(self.x + distance);
    }

    /// Move into another layer, keeping the relative height within the band.
    pub fn relocate(&mut self, layer: OrbitLayer) {
        let (lo, hi) = self.layer.y_band();
        let t = if hi > lo { (self.y - lo) / (hi - lo) } else { 0.5 };
        let (new_lo, new_hi) = layer.y_band();
        self.layer = layer;
        self.y = layer.clamp_y(new_lo + t.clamp(0.0, 1.0) * (new_hi - new_lo));
    }
}

/// Turn counter and calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    /// Turns elapsed since the game started.
    pub step: u64,
    /// Simulated days elapsed.
    pub day: u64,
}

impl TurnClock {
    /// Advance by one turn.
    pub fn advance(&mut self, days_per_turn: u32) {
        self.step += 1;
        self.day += u64::from(days_per_turn);
    }
}
