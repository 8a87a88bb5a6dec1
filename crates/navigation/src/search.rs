//! Weighted 8-directional A* over the [`Grid`].
//!
//! Edge cost is the orthogonal or diagonal move constant plus the accumulated
//! cost of the cell being entered. The octile heuristic uses the same
//! constants and never overestimates, since stamped costs are non-negative.
//!
//! The frontier is keyed by `(priority, discovery sequence)`, so equal
//! priorities are expanded in the order they were discovered. This keeps
//! returned paths reproducible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use arena_core::PathConfig;

use crate::grid::{Cell, Grid};

/// Finds the cheapest cell path from `start` to `goal`.
///
/// The returned path excludes `start` and ends with `goal`. It is empty when
/// `start == goal`, when either endpoint lies outside the grid, or when the
/// frontier runs dry without reaching `goal`. Callers are expected to skip the
/// search entirely when `goal` is a wall.
pub fn search(grid: &Grid, start: Cell, goal: Cell, costs: &PathConfig) -> Vec<Cell> {
    if start == goal || !contains(grid, start) || !contains(grid, goal) {
        return Vec::new();
    }

    let mut cost_so_far = vec![u64::MAX; grid.len()];
    let mut came_from: Vec<Option<usize>> = vec![None; grid.len()];
    let mut closed = vec![false; grid.len()];
    let mut frontier: BinaryHeap<Reverse<(u64, u64, usize)>> = BinaryHeap::new();
    let mut sequence = 0u64;

    let start_slot = grid.slot(start);
    let goal_slot = grid.slot(goal);
    cost_so_far[start_slot] = 0;
    frontier.push(Reverse((0, sequence, start_slot)));

    let mut expanded = 0usize;
    while let Some(Reverse((_, _, slot))) = frontier.pop() {
        if closed[slot] {
            continue;
        }
        if slot == goal_slot {
            tracing::trace!(expanded, "path found");
            return reconstruct(grid, &came_from, start_slot, goal_slot);
        }
        closed[slot] = true;
        expanded += 1;

        let current = grid.cell_from_slot(slot);
        for step in grid.neighbors(current) {
            let next = grid.slot(step.cell);
            if closed[next] {
                continue;
            }

            let move_cost = if step.diagonal {
                costs.diagonal_cost
            } else {
                costs.orthogonal_cost
            };
            let new_cost = cost_so_far[slot]
                .saturating_add(u64::from(move_cost))
                .saturating_add(u64::from(grid.cost(step.cell)));

            if new_cost < cost_so_far[next] {
                cost_so_far[next] = new_cost;
                came_from[next] = Some(slot);
                sequence += 1;
                let priority = new_cost.saturating_add(heuristic(step.cell, goal, costs));
                frontier.push(Reverse((priority, sequence, next)));
            }
        }
    }

    tracing::trace!(expanded, "frontier exhausted");
    Vec::new()
}

/// Octile distance: diagonal moves for the shorter axis, straight for the rest.
pub fn heuristic(from: Cell, to: Cell, costs: &PathConfig) -> u64 {
    let dx = from.x.abs_diff(to.x) as u64;
    let dy = from.y.abs_diff(to.y) as u64;
    let (short, long) = if dx < dy { (dx, dy) } else { (dy, dx) };
    short * u64::from(costs.diagonal_cost) + (long - short) * u64::from(costs.orthogonal_cost)
}

fn contains(grid: &Grid, cell: Cell) -> bool {
    cell.x < grid.columns() && cell.y < grid.rows()
}

fn reconstruct(grid: &Grid, came_from: &[Option<usize>], start: usize, goal: usize) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        path.push(grid.cell_from_slot(current));
        match came_from[current] {
            Some(previous) => current = previous,
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
