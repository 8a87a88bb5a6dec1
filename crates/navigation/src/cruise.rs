//! Potential-field steering along an A* route.
//!
//! Each tick the controller restamps the [`Grid`], plans a cell path to the
//! destination, and sums an attraction toward the farthest path point in
//! clear line of sight with a repulsion from every nearby obstacle and arena
//! edge. The resultant's
//! direction becomes the desired heading, which is then expressed in the
//! agent's own frame as forward and strafe speeds.

use arena_core::{
    AgentConfig, ArenaConfig, EntityId, ForceConfig, PathConfig, Point, Vector, WorldSnapshot,
    to_local,
};

use crate::grid::Grid;
use crate::search::search;

/// Whether the controller currently has somewhere to go.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum CruiseState {
    #[default]
    Idle,
    Navigating,
}

/// Per-tick displacement in the agent's frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Steering {
    pub forward: f64,
    pub strafe: f64,
}

pub struct CruiseControl {
    arena: ArenaConfig,
    costs: PathConfig,
    forces: ForceConfig,
    grid: Grid,
    destination: Option<Point>,
    state: CruiseState,
    path: Vec<Point>,
    aim: Option<Point>,
    force: Vector,
    move_vector: Vector,
    move_angle: f64,
    steering: Steering,
}

impl CruiseControl {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            arena: config.arena.clone(),
            costs: config.path.clone(),
            forces: config.forces.clone(),
            grid: Grid::new(&config.arena, &config.path),
            destination: None,
            state: CruiseState::Idle,
            path: Vec::new(),
            aim: None,
            force: Vector::ZERO,
            move_vector: Vector::ZERO,
            move_angle: 0.0,
            steering: Steering::default(),
        }
    }

    /// Sets or clears the point to travel to. Takes effect on the next update.
    pub fn set_destination(&mut self, destination: Option<Point>) {
        self.destination = destination;
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    /// Recomputes the path, the force field and the steering output.
    ///
    /// `target` is excluded from the obstacle set so the agent can close in
    /// on whatever it is attacking.
    pub fn update(&mut self, snapshot: &WorldSnapshot, target: Option<EntityId>) {
        let me = &snapshot.me;
        let position = me.position();

        self.grid.update(&snapshot.units, me.id(), target);

        self.path.clear();
        self.state = match self.destination {
            Some(destination) if position.distance(destination) > self.costs.destination_tolerance => {
                self.path = self.plan(position, destination);
                CruiseState::Navigating
            }
            _ => CruiseState::Idle,
        };

        self.aim = self.aim_point(position);
        let mut force = self.attraction(position);
        force += self.repulsion(position);
        self.force = force;

        if force == Vector::ZERO {
            self.move_angle = me.facing;
            self.move_vector = Vector::ZERO;
        } else {
            self.move_angle = force.to_angle();
            self.move_vector = Vector::from_angle(self.move_angle);
        }

        let local = to_local(self.move_vector, me.facing) * snapshot.rules.max_speed;
        self.steering = Steering {
            forward: local.x,
            strafe: local.y,
        };

        tracing::trace!(
            state = %self.state,
            waypoints = self.path.len(),
            forward = self.steering.forward,
            strafe = self.steering.strafe,
            "cruise updated"
        );
    }

    pub fn steering_output(&self) -> Steering {
        self.steering
    }

    /// World-space waypoints of the current plan. The last entry is the
    /// literal destination.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Point the attraction pulled toward in the last update.
    pub fn aim(&self) -> Option<Point> {
        self.aim
    }

    pub fn move_angle(&self) -> f64 {
        self.move_angle
    }

    pub fn move_vector(&self) -> Vector {
        self.move_vector
    }

    /// Unnormalized resultant of the last update.
    pub fn force(&self) -> Vector {
        self.force
    }

    pub fn state(&self) -> CruiseState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Forgets the destination and everything derived from it.
    pub fn reset(&mut self) {
        self.destination = None;
        self.state = CruiseState::Idle;
        self.path.clear();
        self.aim = None;
        self.force = Vector::ZERO;
        self.move_vector = Vector::ZERO;
        self.move_angle = 0.0;
        self.steering = Steering::default();
    }

    fn plan(&self, position: Point, destination: Point) -> Vec<Point> {
        let start = self.grid.cell_of(position);
        let goal = self.grid.cell_of(destination);

        let cells = match (start, goal) {
            (Some(start), Some(goal)) if !self.grid.is_wall(goal) => {
                search(&self.grid, start, goal, &self.costs)
            }
            _ => Vec::new(),
        };
        if cells.is_empty() && start != goal {
            tracing::debug!(%position, %destination, "no path found, steering by force only");
        }

        let mut path: Vec<Point> = cells
            .into_iter()
            .map(|cell| self.grid.cell_center(cell))
            .collect();
        path.push(destination);
        path
    }

    /// Farthest leading path point reachable along a clear straight line,
    /// or the first one when even that is obstructed.
    fn aim_point(&self, position: Point) -> Option<Point> {
        let first = *self.path.first()?;
        let visible = self
            .path
            .iter()
            .take_while(|&&point| self.grid.is_clear(position, point))
            .last();
        Some(visible.copied().unwrap_or(first))
    }

    fn attraction(&self, position: Point) -> Vector {
        match self.aim {
            Some(next) if next != position => {
                Vector::from_angle(position.bearing(next)) * self.forces.waypoint
            }
            _ => Vector::ZERO,
        }
    }

    fn repulsion(&self, position: Point) -> Vector {
        let mut total = Vector::ZERO;
        for obstacle in self.grid.obstacles() {
            total += self.repel(position, obstacle.center, obstacle.radius);
        }

        let edges = [
            Point::new(position.x, 0.0),
            Point::new(0.0, position.y),
            Point::new(self.arena.width, position.y),
            Point::new(position.x, self.arena.height),
        ];
        for edge in edges {
            total += self.repel(position, edge, 0.0);
        }
        total
    }

    /// Inverse-power push away from a circular source.
    fn repel(&self, position: Point, source: Point, radius: f64) -> Vector {
        let distance = position.distance(source);
        if distance == 0.0 {
            return Vector::ZERO;
        }
        let clearance = distance - radius;
        if clearance >= self.forces.max_distance {
            return Vector::ZERO;
        }

        let magnitude = self.forces.obstacle
            / clearance
                .max(self.forces.min_clearance)
                .powf(self.forces.decay_exponent);
        Vector::from_angle(source.bearing(position)) * magnitude
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{Faction, SelfState, Unit, UnitKind};

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn hero_at(x: f64, y: f64, facing: f64) -> SelfState {
        let unit = Unit::new(EntityId(1), UnitKind::Hero, Faction::Academy, Point::new(x, y), 35.0);
        SelfState::new(unit, facing, 500.0)
    }

    fn snapshot(me: SelfState, others: Vec<Unit>) -> WorldSnapshot {
        let mut units = vec![me.unit.clone()];
        units.extend(others);
        WorldSnapshot::new(1, me, units)
    }

    #[test]
    fn open_field_heads_straight_for_destination() {
        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.set_destination(Some(Point::new(2525.0, 2025.0)));
        cruise.update(&snapshot(hero_at(2025.0, 2025.0, 0.0), Vec::new()), None);

        assert_eq!(cruise.state(), CruiseState::Navigating);
        assert_eq!(cruise.path().first(), Some(&Point::new(2075.0, 2025.0)));
        assert_eq!(cruise.path().last(), Some(&Point::new(2525.0, 2025.0)));
        assert!(approx(cruise.move_angle(), 0.0));

        let steering = cruise.steering_output();
        assert!(approx(steering.forward, 4.0));
        assert!(approx(steering.strafe, 0.0));
    }

    #[test]
    fn off_center_start_aims_straight_at_destination() {
        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.set_destination(Some(Point::new(2500.0, 2000.0)));
        cruise.update(&snapshot(hero_at(2000.0, 2000.0, 0.0), Vec::new()), None);

        assert_eq!(cruise.aim(), Some(Point::new(2500.0, 2000.0)));
        assert!(approx(cruise.move_angle(), 0.0));
        let steering = cruise.steering_output();
        assert!(approx(steering.forward, 4.0));
        assert!(approx(steering.strafe, 0.0));
    }

    #[test]
    fn blocked_line_of_sight_follows_path_cells() {
        let rock = Unit::new(
            EntityId(60),
            UnitKind::Tree,
            Faction::Neutral,
            Point::new(2250.0, 2000.0),
            60.0,
        );
        let destination = Point::new(2500.0, 2000.0);

        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.set_destination(Some(destination));
        cruise.update(&snapshot(hero_at(2000.0, 2000.0, 0.0), vec![rock]), None);

        let aim = cruise.aim().unwrap();
        assert_ne!(aim, destination);
        assert!(cruise.path().contains(&aim));
        assert!(cruise.grid().is_clear(Point::new(2000.0, 2000.0), aim));
    }

    #[test]
    fn walled_goal_falls_back_to_direct_steering() {
        let tree = Unit::new(
            EntityId(50),
            UnitKind::Tree,
            Faction::Neutral,
            Point::new(3000.0, 2025.0),
            60.0,
        );
        let destination = Point::new(3000.0, 2025.0);

        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.set_destination(Some(destination));
        cruise.update(&snapshot(hero_at(2025.0, 2025.0, 0.0), vec![tree]), None);

        assert_eq!(cruise.path(), &[destination]);
        assert!(approx(cruise.move_angle(), 0.0));
        assert!(approx(cruise.steering_output().forward, 4.0));
    }

    #[test]
    fn idle_without_destination_still_repels() {
        let minion = Unit::new(
            EntityId(20),
            UnitKind::Minion,
            Faction::Renegades,
            Point::new(2050.0, 2000.0),
            40.0,
        );
        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.update(&snapshot(hero_at(2000.0, 2000.0, 0.0), vec![minion]), None);

        assert_eq!(cruise.state(), CruiseState::Idle);
        assert!(cruise.path().is_empty());
        // Clearance 10 with the default law: 50 / 10^2.
        assert!(approx(cruise.force().x, -0.5));
        assert!(approx(cruise.force().y, 0.0));
        assert!(cruise.steering_output().forward < 0.0);
    }

    #[test]
    fn arriving_within_tolerance_goes_idle() {
        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.set_destination(Some(Point::new(2010.0, 2000.0)));
        cruise.update(&snapshot(hero_at(2000.0, 2000.0, 1.0), Vec::new()), None);

        assert_eq!(cruise.state(), CruiseState::Idle);
        assert_eq!(cruise.force(), Vector::ZERO);
        assert!(approx(cruise.move_angle(), 1.0));
        assert_eq!(cruise.steering_output(), Steering::default());
    }

    #[test]
    fn target_is_not_an_obstacle() {
        let enemy = Unit::new(
            EntityId(30),
            UnitKind::Hero,
            Faction::Renegades,
            Point::new(2030.0, 2000.0),
            35.0,
        );
        let me = hero_at(2000.0, 2000.0, 0.0);

        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.update(&snapshot(me.clone(), vec![enemy.clone()]), Some(enemy.id));
        assert_eq!(cruise.force(), Vector::ZERO);

        cruise.update(&snapshot(me, vec![enemy]), None);
        assert!(cruise.force().x < 0.0);
    }

    #[test]
    fn arena_edges_push_inward() {
        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.update(&snapshot(hero_at(10.0, 2000.0, 0.0), Vec::new()), None);
        assert!(cruise.force().x > 0.0);
        assert!(approx(cruise.force().y, 0.0));

        cruise.update(&snapshot(hero_at(2000.0, 3995.0, 0.0), Vec::new()), None);
        assert!(cruise.force().y < 0.0);
    }

    #[test]
    fn overlapping_obstacle_yields_finite_force() {
        let rock = Unit::new(
            EntityId(40),
            UnitKind::Tree,
            Faction::Neutral,
            Point::new(2010.0, 2000.0),
            50.0,
        );
        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.update(&snapshot(hero_at(2000.0, 2000.0, 0.0), vec![rock]), None);

        let force = cruise.force();
        assert!(force.x.is_finite() && force.x < 0.0);
        // Clearance clamps to the configured minimum of 1.
        assert!(approx(force.x, -50.0));
    }

    #[test]
    fn reset_clears_plan() {
        let mut cruise = CruiseControl::new(&AgentConfig::default());
        cruise.set_destination(Some(Point::new(2525.0, 2025.0)));
        cruise.update(&snapshot(hero_at(2025.0, 2025.0, 0.0), Vec::new()), None);
        assert!(!cruise.path().is_empty());

        cruise.reset();
        assert_eq!(cruise.destination(), None);
        assert!(cruise.path().is_empty());
        assert_eq!(cruise.state(), CruiseState::Idle);
    }
}
