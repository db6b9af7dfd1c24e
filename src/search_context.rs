//! Reusable buffers and the two phases of a search: propagating unit costs outward
//! from the start cell until the goal is settled, then walking back from the goal
//! along strictly decreasing costs.
//!
//! The open list is a plain [Vec] scanned linearly on every step. The first entry
//! with the smallest key wins, so insertion order breaks ties. Entries are not
//! deduplicated: a cell whose cost drops again is pushed a second time, and whether
//! to push is decided by the cost stored in the [Grid], not by list membership.
use crate::{Grid, Path, BACKTRACK_LIMIT, UNVISITED};
use fxhash::FxHashSet;
use grid_util::Point;
use log::{debug, warn};

/// A cell waiting in the open list together with the cost it had when it was pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenEntry {
    pub point: Point,
    pub cost: i32,
}

/// Returns the index of the first entry with the smallest key.
pub fn best_index<F>(open: &[OpenEntry], mut key: F) -> Option<usize>
where
    F: FnMut(&OpenEntry) -> i32,
{
    let mut best: Option<(usize, i32)> = None;
    for (ix, entry) in open.iter().enumerate() {
        let k = key(entry);
        if best.map_or(true, |(_, best_key)| k < best_key) {
            best = Some((ix, k));
        }
    }
    best.map(|(ix, _)| ix)
}

#[derive(Clone, Debug, Default)]
pub struct SearchContext {
    open: Vec<OpenEntry>,
    closed: FxHashSet<Point>,
    expansions: usize,
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext::default()
    }

    fn clear(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.expansions = 0;
    }

    /// Number of open list entries taken out and expanded by the last propagation.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
    /// Number of distinct cells settled by the last propagation.
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }
    pub fn is_closed(&self, point: &Point) -> bool {
        self.closed.contains(point)
    }

    /// Resets all costs in `grid`, seeds `start` with cost 0 and expands open cells in
    /// order of `key` until `goal` is taken from the open list. Returns `None` if the
    /// open list runs dry first. `start` and `goal` must lie inside the grid.
    pub fn propagate<F>(
        &mut self,
        grid: &mut Grid,
        start: &Point,
        goal: &Point,
        mut key: F,
    ) -> Option<Point>
    where
        F: FnMut(&OpenEntry) -> i32,
    {
        self.clear();
        grid.reset_values();
        grid.set_value_at(start, 0);
        self.open.push(OpenEntry {
            point: *start,
            cost: 0,
        });

        while let Some(ix) = best_index(&self.open, &mut key) {
            let current = self.open.remove(ix);
            self.closed.insert(current.point);
            self.expansions += 1;

            let next_cost = current.cost + 1;
            for neighbour in grid.neighborhood_points(&current.point) {
                if !grid.node_at(&neighbour).is_wall && grid.value_at(&neighbour) > next_cost {
                    grid.set_value_at(&neighbour, next_cost);
                    self.open.push(OpenEntry {
                        point: neighbour,
                        cost: next_cost,
                    });
                }
            }

            if current.point == *goal {
                debug!(
                    "Settled {} after {} expansions with cost {}",
                    goal, self.expansions, current.cost
                );
                return Some(current.point);
            }
        }
        None
    }

    /// Walks from `end` back to `start` over the costs left in `grid` by
    /// [propagate](Self::propagate) and returns the world positions from `start` to `end`.
    ///
    /// Each step moves to the neighbour with the lowest cost that is strictly below the
    /// lowest cost seen so far during the whole walk; walls are never stepped on.
    /// Gives up with `None` after [BACKTRACK_LIMIT] steps.
    pub fn backtrack(&self, grid: &Grid, start: &Point, end: &Point) -> Option<Path> {
        let mut current = *end;
        let mut smallest = UNVISITED;
        let mut path: Path = vec![grid.node_at(end).position];
        let mut steps = 0;
        loop {
            for neighbour in grid.neighborhood_points(&current) {
                let node = grid.node_at(&neighbour);
                let value = grid.value_at(&neighbour);
                if value < smallest && !node.is_wall {
                    current = neighbour;
                    smallest = value;
                }
            }

            let position = grid.node_at(&current).position;
            if path.last() != Some(&position) {
                path.push(position);
            }

            if current == *start {
                path.reverse();
                return Some(path);
            }

            steps += 1;
            if steps > BACKTRACK_LIMIT {
                warn!(
                    "Backtracking from {} to {} exceeded {} steps, stuck at {}",
                    end, start, BACKTRACK_LIMIT, current
                );
                return None;
            }
        }
    }
}
