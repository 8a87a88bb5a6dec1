//! Per-tick world snapshot delivered by the game server.
//!
//! Snapshot data is read-only from the agent's point of view. Entities are
//! replaced wholesale every tick, so anything that must survive between ticks
//! refers to them by [`EntityId`] and re-resolves the id against the next
//! snapshot.

use std::fmt;

use crate::error::SnapshotError;
use crate::geometry::Point;

/// Unique identifier for any unit, structure or tree in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team allegiance of an entity.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    #[default]
    Academy,
    Renegades,
    /// Creeps that attack whoever provokes them.
    Neutral,
    /// Trees and other unowned scenery.
    Other,
}

impl Faction {
    /// Neutral-like factions are never treated as enemies by faction alone.
    pub const fn is_neutral(self) -> bool {
        matches!(self, Faction::Neutral | Faction::Other)
    }
}

/// Classification of an entity.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitKind {
    /// Player-controlled mobile unit.
    Hero,
    Minion,
    Tower,
    /// Faction headquarters. Destroying the enemy base wins the game.
    Base,
    /// Destructible terrain.
    Tree,
}

impl UnitKind {
    pub const fn is_structure(self) -> bool {
        matches!(self, UnitKind::Tower | UnitKind::Base)
    }
}

/// Snapshot of a single entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: EntityId,
    pub kind: UnitKind,
    pub faction: Faction,
    pub position: Point,
    pub radius: f64,
    pub health: u32,
    pub max_health: u32,
}

impl Unit {
    pub fn new(id: EntityId, kind: UnitKind, faction: Faction, position: Point, radius: f64) -> Self {
        Self {
            id,
            kind,
            faction,
            position,
            radius,
            health: 100,
            max_health: 100,
        }
    }

    /// Sets health values (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: u32, max_health: u32) -> Self {
        self.health = health;
        self.max_health = max_health;
        self
    }

    /// Returns true if current health is strictly below `fraction` of maximum.
    pub fn health_below(&self, fraction: f64) -> bool {
        f64::from(self.health) < f64::from(self.max_health) * fraction
    }

    pub fn is_hero(&self) -> bool {
        self.kind == UnitKind::Hero
    }
}

/// Full state of the controlled hero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelfState {
    pub unit: Unit,
    /// Facing angle in radians.
    pub facing: f64,
    /// Maximum ranged attack distance.
    pub cast_range: f64,
    /// Remaining ticks before the ranged attack can be used again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranged_cooldown: u32,
}

impl SelfState {
    pub fn new(unit: Unit, facing: f64, cast_range: f64) -> Self {
        Self {
            unit,
            facing,
            cast_range,
            ranged_cooldown: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.unit.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.unit.position
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.unit.health == 0
    }
}

/// Static game-rule constants, repeated with every snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRules {
    /// Reach of the melee attack, measured to the target's boundary.
    pub melee_range: f64,
    /// Full angle of the cone in which attacks can be cast.
    pub melee_sector: f64,
    pub projectile_radius: f64,
    /// Maximum displacement per tick.
    pub max_speed: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            melee_range: 70.0,
            melee_sector: std::f64::consts::PI / 6.0,
            projectile_radius: 10.0,
            max_speed: 4.0,
        }
    }
}

/// Everything the agent sees during one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub tick: u64,
    pub me: SelfState,
    /// All visible entities. May include the controlled hero itself.
    pub units: Vec<Unit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: GameRules,
}

impl WorldSnapshot {
    pub fn new(tick: u64, me: SelfState, units: Vec<Unit>) -> Self {
        Self {
            tick,
            me,
            units,
            rules: GameRules::default(),
        }
    }

    /// Resolves an id against this tick's entities.
    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Entities other than the controlled hero.
    pub fn others(&self) -> impl Iterator<Item = &Unit> {
        let me = self.me.id();
        self.units.iter().filter(move |unit| unit.id != me)
    }

    /// The opposing faction's base, if visible.
    pub fn enemy_base(&self) -> Option<&Unit> {
        let faction = self.me.unit.faction;
        self.units
            .iter()
            .find(|unit| unit.kind == UnitKind::Base && unit.faction != faction)
    }

    /// Rejects snapshots the decision layer cannot reason about.
    ///
    /// Lane assignment is not checked here since the lane table lives with
    /// the agent.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !self.me.facing.is_finite() {
            return Err(SnapshotError::NonFiniteFacing);
        }
        for unit in std::iter::once(&self.me.unit).chain(&self.units) {
            if !unit.position.is_finite() {
                return Err(SnapshotError::NonFinitePosition { id: unit.id });
            }
            if !unit.radius.is_finite() || unit.radius < 0.0 {
                return Err(SnapshotError::InvalidRadius {
                    id: unit.id,
                    radius: unit.radius,
                });
            }
            if unit.max_health == 0 {
                return Err(SnapshotError::ZeroMaxHealth { id: unit.id });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(id: u64, faction: Faction, x: f64, y: f64) -> Unit {
        Unit::new(EntityId(id), UnitKind::Hero, faction, Point::new(x, y), 35.0)
    }

    #[test]
    fn others_skips_self() {
        let me = SelfState::new(hero(1, Faction::Academy, 0.0, 0.0), 0.0, 500.0);
        let snapshot = WorldSnapshot::new(
            0,
            me.clone(),
            vec![me.unit.clone(), hero(2, Faction::Renegades, 10.0, 0.0)],
        );

        let ids: Vec<_> = snapshot.others().map(|u| u.id).collect();
        assert_eq!(ids, vec![EntityId(2)]);
    }

    #[test]
    fn enemy_base_ignores_own_base() {
        let me = SelfState::new(hero(1, Faction::Academy, 0.0, 0.0), 0.0, 500.0);
        let own = Unit::new(
            EntityId(10),
            UnitKind::Base,
            Faction::Academy,
            Point::new(400.0, 3600.0),
            100.0,
        );
        let theirs = Unit::new(
            EntityId(11),
            UnitKind::Base,
            Faction::Renegades,
            Point::new(3600.0, 400.0),
            100.0,
        );
        let snapshot = WorldSnapshot::new(0, me, vec![own, theirs]);

        assert_eq!(snapshot.enemy_base().map(|u| u.id), Some(EntityId(11)));
    }

    #[test]
    fn validate_rejects_malformed_entities() {
        let me = SelfState::new(hero(1, Faction::Academy, 0.0, 0.0), 0.0, 500.0);
        let good = WorldSnapshot::new(3, me.clone(), vec![hero(2, Faction::Renegades, 5.0, 5.0)]);
        assert_eq!(good.validate(), Ok(()));

        let mut lost = good.clone();
        lost.units[0].position.x = f64::NAN;
        assert_eq!(
            lost.validate(),
            Err(SnapshotError::NonFinitePosition { id: EntityId(2) })
        );

        let mut shrunk = good.clone();
        shrunk.units[0].radius = -1.0;
        assert!(matches!(
            shrunk.validate(),
            Err(SnapshotError::InvalidRadius { id: EntityId(2), .. })
        ));

        let mut boundless = good.clone();
        boundless.me.unit.radius = f64::INFINITY;
        assert!(matches!(
            boundless.validate(),
            Err(SnapshotError::InvalidRadius { id: EntityId(1), .. })
        ));

        let mut hollow = good.clone();
        hollow.me.unit.max_health = 0;
        assert_eq!(
            hollow.validate(),
            Err(SnapshotError::ZeroMaxHealth { id: EntityId(1) })
        );

        let mut dizzy = good;
        dizzy.me.facing = f64::INFINITY;
        assert_eq!(dizzy.validate(), Err(SnapshotError::NonFiniteFacing));
    }

    #[test]
    fn health_below_is_strict() {
        let unit = hero(3, Faction::Renegades, 0.0, 0.0).with_health(30, 100);
        assert!(!unit.health_below(0.3));
        assert!(unit.health_below(0.31));
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!("tree".parse::<UnitKind>().ok(), Some(UnitKind::Tree));
        assert_eq!(Faction::Renegades.to_string(), "renegades");
    }
}
