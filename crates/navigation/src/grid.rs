//! Arena rasterization into a traversal-cost grid.
//!
//! Every tick the grid is zeroed and restamped from the current obstacle set.
//! A cell whose center lies strictly inside an obstacle becomes a wall; cells
//! within half a cell width of an obstacle's boundary receive a partial cost
//! proportional to how deeply the obstacle reaches into them.

use arena_core::{ArenaConfig, EntityId, PathConfig, Point, Unit};
use arrayvec::ArrayVec;

/// Integer cell coordinates. `(0, 0)` covers the arena's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance between two cells.
    pub fn chebyshev(self, other: Cell) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// True when the two cells touch, including diagonally.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self != other && self.chebyshev(other) == 1
    }
}

/// Circular footprint that repels movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub center: Point,
    pub radius: f64,
}

impl Obstacle {
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl From<&Unit> for Obstacle {
    fn from(unit: &Unit) -> Self {
        Self::new(unit.position, unit.radius)
    }
}

/// One 8-connected move out of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub cell: Cell,
    pub diagonal: bool,
}

/// Fixed-size cost map with a parallel wall set.
#[derive(Clone, Debug)]
pub struct Grid {
    node_width: f64,
    columns: usize,
    rows: usize,
    uncertainty_cost: u32,
    costs: Vec<u32>,
    blocked: Vec<bool>,
    walls: Vec<Cell>,
    obstacles: Vec<Obstacle>,
}

impl Grid {
    /// Creates an empty grid covering the configured arena.
    pub fn new(arena: &ArenaConfig, path: &PathConfig) -> Self {
        let columns = (arena.width / arena.node_width).floor().max(1.0) as usize;
        let rows = (arena.height / arena.node_width).floor().max(1.0) as usize;
        Self {
            node_width: arena.node_width,
            columns,
            rows,
            uncertainty_cost: path.uncertainty_cost,
            costs: vec![0; columns * rows],
            blocked: vec![false; columns * rows],
            walls: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    /// Rebuilds obstacles, costs and walls for the current tick.
    ///
    /// Every unit except the controlled hero (`self_id`) and the current target
    /// (`excluded`) becomes an obstacle.
    pub fn update<'a>(
        &mut self,
        units: impl IntoIterator<Item = &'a Unit>,
        self_id: EntityId,
        excluded: Option<EntityId>,
    ) {
        let obstacles = units
            .into_iter()
            .filter(|unit| unit.id != self_id && Some(unit.id) != excluded)
            .map(Obstacle::from)
            .collect();
        self.stamp(obstacles);
    }

    /// Replaces the obstacle set and rasterizes it.
    pub fn stamp(&mut self, obstacles: Vec<Obstacle>) {
        self.costs.fill(0);
        self.blocked.fill(false);
        self.walls.clear();
        self.obstacles = obstacles;

        let wall_cost = self.wall_cost();
        let half = (self.node_width / 2.0).floor();

        for index in 0..self.obstacles.len() {
            let obstacle = self.obstacles[index];
            // Zero-radius repulsors only matter to the force field.
            if obstacle.radius <= 0.0 {
                continue;
            }

            let Some((x0, x1)) = self.clip(obstacle.center.x, obstacle.radius, self.columns) else {
                continue;
            };
            let Some((y0, y1)) = self.clip(obstacle.center.y, obstacle.radius, self.rows) else {
                continue;
            };

            for x in x0..=x1 {
                for y in y0..=y1 {
                    let cell = Cell::new(x, y);
                    let slot = self.slot(cell);
                    if self.blocked[slot] {
                        continue;
                    }

                    let d = self.cell_center(cell).distance(obstacle.center);
                    if d > obstacle.radius + half {
                        continue;
                    }
                    if d < obstacle.radius {
                        self.costs[slot] = wall_cost;
                        self.blocked[slot] = true;
                        self.walls.push(cell);
                    } else {
                        let coverage = (half + obstacle.radius - d).trunc() as u32;
                        self.costs[slot] += coverage * self.uncertainty_cost;
                    }
                }
            }
        }

        tracing::trace!(
            obstacles = self.obstacles.len(),
            walls = self.walls.len(),
            "grid restamped"
        );
    }

    /// Cost assigned to a wall cell. Scales with the cell width.
    pub fn wall_cost(&self) -> u32 {
        (self.node_width.round() as u32).saturating_mul(self.uncertainty_cost)
    }

    pub fn node_width(&self) -> f64 {
        self.node_width
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell at signed coordinates, if inside the grid.
    pub fn cell_at(&self, x: i64, y: i64) -> Option<Cell> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.columns)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.rows)?;
        Some(Cell::new(x, y))
    }

    /// Cell containing a world point, if inside the grid.
    pub fn cell_of(&self, point: Point) -> Option<Cell> {
        let x = (point.x / self.node_width).floor();
        let y = (point.y / self.node_width).floor();
        self.cell_at(x as i64, y as i64)
    }

    /// World coordinates of a cell's center.
    pub fn cell_center(&self, cell: Cell) -> Point {
        Point::new(
            (cell.x as f64 + 0.5) * self.node_width,
            (cell.y as f64 + 0.5) * self.node_width,
        )
    }

    pub fn cost(&self, cell: Cell) -> u32 {
        self.costs[self.slot(cell)]
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.blocked[self.slot(cell)]
    }

    /// Wall cells in the order they were claimed.
    pub fn walls(&self) -> &[Cell] {
        &self.walls
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// In-bounds, non-wall neighbors of `cell`.
    pub fn neighbors(&self, cell: Cell) -> ArrayVec<Step, 8> {
        let mut steps = ArrayVec::new();
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let Some(next) = self.cell_at(cell.x as i64 + dx, cell.y as i64 + dy) else {
                    continue;
                };
                if self.is_wall(next) {
                    continue;
                }
                steps.push(Step {
                    cell: next,
                    diagonal: dx != 0 && dy != 0,
                });
            }
        }
        steps
    }

    /// Whether the segment `from -> to` stays inside the grid and crosses
    /// only zero-cost cells. Sampled every quarter cell.
    pub fn is_clear(&self, from: Point, to: Point) -> bool {
        let samples = (from.distance(to) / (self.node_width / 4.0)).ceil().max(1.0) as usize;
        (0..=samples).all(|i| {
            let point = Point::from(from.to_vec().lerp(to.to_vec(), i as f64 / samples as f64));
            self.cell_of(point)
                .is_some_and(|cell| self.cost(cell) == 0 && !self.is_wall(cell))
        })
    }

    pub(crate) fn slot(&self, cell: Cell) -> usize {
        cell.y * self.columns + cell.x
    }

    pub(crate) fn len(&self) -> usize {
        self.costs.len()
    }

    pub(crate) fn cell_from_slot(&self, slot: usize) -> Cell {
        Cell::new(slot % self.columns, slot / self.columns)
    }

    /// Cell index range covered by `center ± radius` on one axis, clipped.
    fn clip(&self, center: f64, radius: f64, extent: usize) -> Option<(usize, usize)> {
        let lo = ((center - radius) / self.node_width).floor() as i64;
        let hi = ((center + radius) / self.node_width).floor() as i64;
        let lo = lo.max(0);
        let hi = hi.min(extent as i64 - 1);
        (lo <= hi).then_some((lo as usize, hi as usize))
    }
}
