//! High-level behavior mode chosen by the critic each tick.

/// What the hero is trying to do right now.
///
/// Travellers follow their lane and only fight opportunistically. Fighters
/// run the micro-positioning table against their current target.
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
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BehaviorState {
    #[default]
    Traveller,
    Fighter,
}
