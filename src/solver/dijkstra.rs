use crate::{search_context::OpenEntry, solver::GridSolver};
use grid_util::Point;

/// Expands the open cell with the lowest propagated cost, which yields shortest paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn selection_key(&self, entry: &OpenEntry, _goal: &Point) -> i32 {
        entry.cost
    }
}
