use crate::{search_context::OpenEntry, solver::GridSolver};
use grid_util::Point;

/// Expands the open cell closest to the goal by Manhattan distance. The cost so far is
/// not part of the key, so this is greedy best-first search rather than A*: it tends
/// to expand fewer cells but the path it backtracks can be longer than the shortest one.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver;

impl GridSolver for GreedySolver {
    fn selection_key(&self, entry: &OpenEntry, goal: &Point) -> i32 {
        self.heuristic(&entry.point, goal)
    }
}
