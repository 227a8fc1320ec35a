//! Runtime-tunable configuration.
//!
//! `GameConfig` is an immutable value handed to the engine at construction.
//! Changing a tunable produces a new config through [`GameConfig::with_setting`];
//! persisting it between sessions is the host's business (`to_json` /
//! `from_json` are provided for that).

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{OrbitLayer, RiskLevel};
use crate::errors::ConfigError;

/// Collision detector parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionSettings {
    pub leo_threshold: f64,
    pub meo_threshold: f64,
    pub geo_threshold: f64,
    /// Scales every layer threshold.
    pub radius_multiplier: f64,
    /// Maximum heading difference (degrees) for a pair to collide.
    pub angle_threshold_deg: f64,
    pub debris_per_collision: u32,
    /// Probability that a spawned fragment is cooperative.
    pub cooperative_debris_ratio: f64,
    /// Half-width of the random scatter applied to spawned fragments.
    pub spawn_jitter: f64,
    pub cascade_threshold: u32,
    pub severe_cascade_threshold: u32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            leo_threshold: LEO_COLLISION_THRESHOLD,
            meo_threshold: MEO_COLLISION_THRESHOLD,
            geo_threshold: GEO_COLLISION_THRESHOLD,
            radius_multiplier: 1.0,
            angle_threshold_deg: DEFAULT_ANGLE_THRESHOLD_DEG,
            debris_per_collision: DEFAULT_DEBRIS_PER_COLLISION,
            cooperative_debris_ratio: DEFAULT_COOPERATIVE_DEBRIS_RATIO,
            spawn_jitter: DEFAULT_SPAWN_JITTER,
            cascade_threshold: CASCADE_THRESHOLD,
            severe_cascade_threshold: SEVERE_CASCADE_THRESHOLD,
        }
    }
}

impl CollisionSettings {
    /// Effective distance threshold for a layer, `None` for immune layers.
    pub fn threshold_for(&self, layer: OrbitLayer) -> Option<f64> {
        let base = match layer {
            OrbitLayer::Leo => self.leo_threshold,
            OrbitLayer::Meo => self.meo_threshold,
            OrbitLayer::Geo => self.geo_threshold,
            OrbitLayer::Graveyard => return None,
        };
        Some(base * self.radius_multiplier)
    }
}

/// Solar storm parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSettings {
    /// Per-turn probability of a storm.
    pub solar_storm_probability: f64,
    /// Fraction of LEO debris a storm clears, rounded down.
    pub solar_storm_fraction: f64,
}

impl Default for HazardSettings {
    fn default() -> Self {
        Self {
            solar_storm_probability: DEFAULT_SOLAR_STORM_PROBABILITY,
            solar_storm_fraction: DEFAULT_SOLAR_STORM_FRACTION,
        }
    }
}

/// Terminal-state limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Overrides the difficulty's turn limit when set.
    pub max_steps: Option<u64>,
    /// The game ends once debris count exceeds this.
    pub debris_limit: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_steps: None,
            debris_limit: DEFAULT_DEBRIS_LIMIT,
        }
    }
}

/// Linear per-turn budget flows, on top of satellite revenue and DRV upkeep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomySettings {
    pub budget_drain_per_turn: i64,
    pub budget_income_per_turn: i64,
    pub days_per_turn: u32,
}

impl Default for EconomySettings {
    fn default() -> Self {
        Self {
            budget_drain_per_turn: DEFAULT_BUDGET_DRAIN_PER_TURN,
            budget_income_per_turn: DEFAULT_BUDGET_INCOME_PER_TURN,
            days_per_turn: 1,
        }
    }
}

/// Turn-interval multipliers the host applies per risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMultipliers {
    pub low: f64,
    pub medium: f64,
    pub critical: f64,
}

impl Default for RiskMultipliers {
    fn default() -> Self {
        Self {
            low: 1.0,
            medium: 0.75,
            critical: 0.5,
        }
    }
}

impl RiskMultipliers {
    pub fn for_level(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::Critical => self.critical,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed for determinism. Same seed and commands = same simulation.
    pub seed: u64,
    #[serde(default)]
    pub collision: CollisionSettings,
    #[serde(default)]
    pub hazard: HazardSettings,
    #[serde(default)]
    pub limits: LimitSettings,
    #[serde(default)]
    pub economy: EconomySettings,
    #[serde(default)]
    pub risk_multipliers: RiskMultipliers,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            collision: CollisionSettings::default(),
            hazard: HazardSettings::default(),
            limits: LimitSettings::default(),
            economy: EconomySettings::default(),
            risk_multipliers: RiskMultipliers::default(),
        }
    }
}

/// One tunable and its new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "setting", rename_all = "kebab-case")]
pub enum Setting {
    Seed { seed: u64 },
    LayerThreshold { layer: OrbitLayer, distance: f64 },
    RadiusMultiplier { value: f64 },
    AngleThreshold { degrees: f64 },
    DebrisPerCollision { count: u32 },
    CooperativeDebrisRatio { ratio: f64 },
    SpawnJitter { distance: f64 },
    CascadeThreshold { pairs: u32 },
    SevereCascadeThreshold { pairs: u32 },
    SolarStormProbability { probability: f64 },
    SolarStormFraction { fraction: f64 },
    MaxSteps { turns: Option<u64> },
    DebrisLimit { count: usize },
    BudgetDrain { per_turn: i64 },
    BudgetIncome { per_turn: i64 },
    DaysPerTurn { days: u32 },
    RiskMultiplier { level: RiskLevel, multiplier: f64 },
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            expected: "a positive number",
            value,
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            expected: "zero or more",
            value,
        })
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            expected: "within [0, 1]",
            value,
        })
    }
}

fn angle_threshold(degrees: f64) -> Result<f64, ConfigError> {
    let degrees = positive("angle threshold", degrees)?;
    if degrees > 180.0 {
        return Err(ConfigError::OutOfRange {
            name: "angle threshold",
            expected: "at most 180 degrees",
            value: degrees,
        });
    }
    Ok(degrees)
}

fn at_least_one(name: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value >= 1 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            expected: "at least 1",
            value: value as f64,
        })
    }
}

impl GameConfig {
    /// Return a copy of this config with one setting changed.
    ///
    /// The receiver is left untouched, so a rejected setting has no effect.
    pub fn with_setting(&self, setting: Setting) -> Result<GameConfig, ConfigError> {
        let mut next = self.clone();
        match setting {
            Setting::Seed { seed } => next.seed = seed,
            Setting::LayerThreshold { layer, distance } => {
                let distance = positive("layer threshold", distance)?;
                match layer {
                    OrbitLayer::Leo => next.collision.leo_threshold = distance,
                    OrbitLayer::Meo => next.collision.meo_threshold = distance,
                    OrbitLayer::Geo => next.collision.geo_threshold = distance,
                    OrbitLayer::Graveyard => return Err(ConfigError::ImmuneLayer(layer)),
                }
            }
            Setting::RadiusMultiplier { value } => {
                next.collision.radius_multiplier = positive("radius multiplier", value)?;
            }
            Setting::AngleThreshold { degrees } => {
                next.collision.angle_threshold_deg = angle_threshold(degrees)?;
            }
            Setting::DebrisPerCollision { count } => next.collision.debris_per_collision = count,
            Setting::CooperativeDebrisRatio { ratio } => {
                next.collision.cooperative_debris_ratio =
                    unit_interval("cooperative debris ratio", ratio)?;
            }
            Setting::SpawnJitter { distance } => {
                next.collision.spawn_jitter = non_negative("spawn jitter", distance)?;
            }
            Setting::CascadeThreshold { pairs } => {
                at_least_one("cascade threshold", u64::from(pairs))?;
                next.collision.cascade_threshold = pairs;
            }
            Setting::SevereCascadeThreshold { pairs } => {
                at_least_one("severe cascade threshold", u64::from(pairs))?;
                next.collision.severe_cascade_threshold = pairs;
            }
            Setting::SolarStormProbability { probability } => {
                next.hazard.solar_storm_probability =
                    unit_interval("solar storm probability", probability)?;
            }
            Setting::SolarStormFraction { fraction } => {
                next.hazard.solar_storm_fraction = unit_interval("solar storm fraction", fraction)?;
            }
            Setting::MaxSteps { turns } => {
                if let Some(turns) = turns {
                    at_least_one("max steps", turns)?;
                }
                next.limits.max_steps = turns;
            }
            Setting::DebrisLimit { count } => next.limits.debris_limit = count,
            Setting::BudgetDrain { per_turn } => {
                non_negative("budget drain", per_turn as f64)?;
                next.economy.budget_drain_per_turn = per_turn;
            }
            Setting::BudgetIncome { per_turn } => {
                non_negative("budget income", per_turn as f64)?;
                next.economy.budget_income_per_turn = per_turn;
            }
            Setting::DaysPerTurn { days } => {
                at_least_one("days per turn", u64::from(days))?;
                next.economy.days_per_turn = days;
            }
            Setting::RiskMultiplier { level, multiplier } => {
                let multiplier = positive("risk multiplier", multiplier)?;
                match level {
                    RiskLevel::Low => next.risk_multipliers.low = multiplier,
                    RiskLevel::Medium => next.risk_multipliers.medium = multiplier,
                    RiskLevel::Critical => next.risk_multipliers.critical = multiplier,
                }
            }
        }
        next.validate()?;
        Ok(next)
    }

    /// Cross-field checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.collision;
        if c.severe_cascade_threshold < c.cascade_threshold {
            return Err(ConfigError::CascadeOrdering {
                cascade: c.cascade_threshold,
                severe: c.severe_cascade_threshold,
            });
        }
        positive("LEO threshold", c.leo_threshold)?;
        positive("MEO threshold", c.meo_threshold)?;
        positive("GEO threshold", c.geo_threshold)?;
        positive("radius multiplier", c.radius_multiplier)?;
        angle_threshold(c.angle_threshold_deg)?;
        non_negative("spawn jitter", c.spawn_jitter)?;
        unit_interval("cooperative debris ratio", c.cooperative_debris_ratio)?;
        unit_interval("solar storm probability", self.hazard.solar_storm_probability)?;
        unit_interval("solar storm fraction", self.hazard.solar_storm_fraction)?;
        if let Some(turns) = self.limits.max_steps {
            at_least_one("max steps", turns)?;
        }
        let e = &self.economy;
        non_negative("budget drain", e.budget_drain_per_turn as f64)?;
        non_negative("budget income", e.budget_income_per_turn as f64)?;
        at_least_one("days per turn", u64::from(e.days_per_turn))?;
        let r = &self.risk_multipliers;
        positive("risk multiplier", r.low)?;
        positive("risk multiplier", r.medium)?;
        positive("risk multiplier", r.critical)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<GameConfig, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
