//! Agent configuration constants and tunable parameters.
//!
//! Every section has a `Default` holding the tuned values for the standard
//! 4000×4000 arena, so a config file only needs to list overrides.

use crate::error::ConfigError;
use crate::geometry::Point;

/// Complete static configuration of one agent.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub arena: ArenaConfig,
    pub path: PathConfig,
    pub forces: ForceConfig,
    pub sensing: SensingConfig,
    pub health: HealthThresholds,
    pub fighter: FighterConfig,
}

impl AgentConfig {
    /// Checks ranges and internal consistency of every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        self.path.validate()?;
        self.forces.validate()?;
        self.sensing.validate()?;
        self.health.validate()?;
        self.fighter.validate()
    }
}

/// Arena extents and grid resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    /// Edge length of one grid cell.
    pub node_width: f64,
}

impl ArenaConfig {
    pub const DEFAULT_SIZE: f64 = 4000.0;
    pub const DEFAULT_NODE_WIDTH: f64 = 50.0;

    fn validate(&self) -> Result<(), ConfigError> {
        if self.node_width.is_nan() || self.node_width <= 0.0 {
            return Err(ConfigError::InvalidNodeWidth(self.node_width));
        }
        if self.width < self.node_width || self.height < self.node_width {
            return Err(ConfigError::ArenaTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            node_width: Self::DEFAULT_NODE_WIDTH,
        }
    }
}

/// Path search costs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    pub orthogonal_cost: u32,
    pub diagonal_cost: u32,
    /// Multiplier applied to obstacle coverage when stamping cell costs.
    pub uncertainty_cost: u32,
    /// Distance at which the destination counts as reached.
    pub destination_tolerance: f64,
}

impl PathConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.diagonal_cost <= self.orthogonal_cost {
            return Err(ConfigError::InconsistentMoveCosts {
                orthogonal: self.orthogonal_cost,
                diagonal: self.diagonal_cost,
            });
        }
        positive("path.destination_tolerance", self.destination_tolerance)
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            orthogonal_cost: 10,
            diagonal_cost: 14,
            uncertainty_cost: 4,
            destination_tolerance: 20.0,
        }
    }
}

/// Potential-field force magnitudes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForceConfig {
    /// Constant attraction towards the next waypoint.
    pub waypoint: f64,
    /// Repulsion scale, divided by `clearance ^ decay_exponent`.
    pub obstacle: f64,
    pub decay_exponent: f64,
    /// Obstacles farther than this clearance are ignored.
    pub max_distance: f64,
    /// Clearance floor so overlapping obstacles stay finite.
    pub min_clearance: f64,
}

impl ForceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("forces.waypoint", self.waypoint)?;
        positive("forces.obstacle", self.obstacle)?;
        positive("forces.decay_exponent", self.decay_exponent)?;
        positive("forces.max_distance", self.max_distance)?;
        positive("forces.min_clearance", self.min_clearance)
    }
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            waypoint: 1.0,
            obstacle: 50.0,
            decay_exponent: 2.0,
            max_distance: 40.0,
            min_clearance: 1.0,
        }
    }
}

/// Perception radii and lane-progress tolerances.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensingConfig {
    pub ally_radius: f64,
    pub enemy_radius: f64,
    pub waypoint_tolerance: f64,
    /// Around the enemy base the agent stops picking fights.
    pub enemy_base_radius: f64,
    /// Used when the enemy base is not part of the snapshot.
    pub enemy_base_fallback: Point,
}

impl SensingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("sensing.ally_radius", self.ally_radius)?;
        positive("sensing.enemy_radius", self.enemy_radius)?;
        positive("sensing.waypoint_tolerance", self.waypoint_tolerance)?;
        positive("sensing.enemy_base_radius", self.enemy_base_radius)
    }
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            ally_radius: 600.0,
            enemy_radius: 600.0,
            waypoint_tolerance: 100.0,
            enemy_base_radius: 800.0,
            enemy_base_fallback: Point::new(3600.0, 400.0),
        }
    }
}

/// Health fractions used for target bucketing and self-preservation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HealthThresholds {
    pub weak: f64,
    pub injured: f64,
    pub cautious: f64,
    pub low: f64,
}

impl HealthThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        fraction("health.weak", self.weak)?;
        fraction("health.injured", self.injured)?;
        fraction("health.cautious", self.cautious)?;
        fraction("health.low", self.low)
    }
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            weak: 0.3,
            injured: 0.6,
            cautious: 0.6,
            low: 0.4,
        }
    }
}

/// Fighter micro-positioning parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FighterConfig {
    pub too_close_distance: f64,
    /// Engage distance as a fraction of cast range.
    pub engage_coefficient: f64,
    pub flee_ticks: u32,
    /// Angular offset of the steer point from the target bearing.
    pub steer_angle: f64,
    /// Slack below cast range before the agent backs off.
    pub retreat_margin: f64,
}

impl FighterConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("fighter.too_close_distance", self.too_close_distance)?;
        fraction("fighter.engage_coefficient", self.engage_coefficient)
    }
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            too_close_distance: 300.0,
            engage_coefficient: 0.8,
            flee_ticks: 30,
            steer_angle: std::f64::consts::FRAC_PI_3,
            retreat_margin: 5.0,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(AgentConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_node_width() {
        let mut config = AgentConfig::default();
        config.arena.node_width = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidNodeWidth(0.0)));
    }

    #[test]
    fn rejects_fraction_above_one() {
        let mut config = AgentConfig::default();
        config.health.weak = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FractionOutOfRange { name: "health.weak", .. })
        ));
    }

    #[test]
    fn rejects_diagonal_not_above_orthogonal() {
        let mut config = AgentConfig::default();
        config.path.diagonal_cost = config.path.orthogonal_cost;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InconsistentMoveCosts { .. })
        ));
    }
}
