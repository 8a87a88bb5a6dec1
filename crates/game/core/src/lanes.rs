//! Lane routes and identity-to-lane assignment.
//!
//! The lane table is loaded once at startup and shared by reference. A hero's
//! lane is fixed for its lifetime and derived from its persistent id.

use crate::error::ConfigError;
use crate::geometry::Point;
use crate::world::EntityId;

/// One of the fixed travel routes across the arena.
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
pub enum Lane {
    Top,
    Middle,
    Bottom,
}

/// Maps a hero id onto a lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneAssignment {
    pub id: EntityId,
    pub lane: Lane,
}

/// Ordered waypoints for every lane plus the id assignment table.
///
/// Waypoints run from the friendly base towards the enemy base; the last
/// waypoint of every lane is the enemy base itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneTable {
    pub top: Vec<Point>,
    pub middle: Vec<Point>,
    pub bottom: Vec<Point>,
    pub assignments: Vec<LaneAssignment>,
}

impl LaneTable {
    pub fn waypoints(&self, lane: Lane) -> &[Point] {
        match lane {
            Lane::Top => &self.top,
            Lane::Middle => &self.middle,
            Lane::Bottom => &self.bottom,
        }
    }

    /// Lane assigned to the given hero, if any.
    pub fn lane_for(&self, id: EntityId) -> Option<Lane> {
        self.assignments
            .iter()
            .find(|assignment| assignment.id == id)
            .map(|assignment| assignment.lane)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        use strum::IntoEnumIterator;

        for lane in Lane::iter() {
            let waypoints = self.waypoints(lane);
            if waypoints.is_empty() {
                return Err(ConfigError::EmptyLane(lane));
            }
            if let Some(index) = waypoints.iter().position(|p| !p.is_finite()) {
                return Err(ConfigError::NonFiniteWaypoint { lane, index });
            }
        }
        Ok(())
    }
}

impl Default for LaneTable {
    fn default() -> Self {
        let assign = |ids: &[u64], lane: Lane| {
            ids.iter()
                .map(move |&id| LaneAssignment {
                    id: EntityId(id),
                    lane,
                })
                .collect::<Vec<_>>()
        };

        let mut assignments = assign(&[1, 2, 6, 7], Lane::Top);
        assignments.extend(assign(&[3, 8], Lane::Middle));
        assignments.extend(assign(&[4, 5, 9, 10], Lane::Bottom));

        Self {
            top: vec![
                Point::new(200.0, 3400.0),
                Point::new(200.0, 2000.0),
                Point::new(200.0, 600.0),
                Point::new(600.0, 200.0),
                Point::new(2000.0, 200.0),
                Point::new(3400.0, 200.0),
                Point::new(3600.0, 400.0),
            ],
            middle: vec![
                Point::new(600.0, 3400.0),
                Point::new(1200.0, 2800.0),
                Point::new(2000.0, 2000.0),
                Point::new(2800.0, 1200.0),
                Point::new(3400.0, 600.0),
                Point::new(3600.0, 400.0),
            ],
            bottom: vec![
                Point::new(600.0, 3800.0),
                Point::new(2000.0, 3800.0),
                Point::new(3400.0, 3800.0),
                Point::new(3800.0, 3400.0),
                Point::new(3800.0, 2000.0),
                Point::new(3800.0, 600.0),
                Point::new(3600.0, 400.0),
            ],
            assignments,
        }
    }
}
