//! Command record emitted once per tick.

/// Discrete combat action requested for this tick.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CombatAction {
    #[default]
    None,
    /// Projectile attack, limited by cast range and cooldown.
    Ranged,
    /// Close-range strike.
    Melee,
}

/// Movement and combat instructions for the controlled hero.
///
/// Speeds are expressed in the hero's local frame: `speed` along the facing
/// direction, `strafe_speed` perpendicular to it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub speed: f64,
    pub strafe_speed: f64,
    pub turn: f64,
    pub cast_angle: f64,
    pub min_cast_distance: f64,
    pub action: CombatAction,
}

impl Command {
    /// A command that neither moves nor acts.
    pub const fn idle() -> Self {
        Self {
            speed: 0.0,
            strafe_speed: 0.0,
            turn: 0.0,
            cast_angle: 0.0,
            min_cast_distance: 0.0,
            action: CombatAction::None,
        }
    }
}
