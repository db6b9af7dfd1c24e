use crate::search_context::{OpenEntry, SearchContext};
use crate::{Grid, GridError, Path};
use grid_util::Point;
use log::{debug, info, warn};

pub mod dijkstra;
pub mod greedy;

/// A [GridSolver] decides which open cell is expanded next. Everything else about a
/// search (early exits, cost propagation, backtracking) is shared.
pub trait GridSolver {
    /// Ordering key of an open entry, lower is expanded first.
    fn selection_key(&self, entry: &OpenEntry, goal: &Point) -> i32;

    /// Manhattan distance, the only heuristic used on a 4-grid with unit steps.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        p1.manhattan_distance(p2)
    }

    /// Computes a path of world positions from `start` to `goal`.
    ///
    /// Fails only if either cell lies outside the grid. An empty path is returned when
    /// start and goal coincide, when either of them is a wall, when they lie in different
    /// components, or when the search or the backtracking gives up.
    fn get_path_single_goal(
        &self,
        grid: &mut Grid,
        context: &mut SearchContext,
        start: Point,
        goal: Point,
    ) -> Result<Path, GridError> {
        grid.node(start.x, start.y)?;
        let goal_is_wall = grid.is_wall(goal.x, goal.y)?;
        if start == goal {
            debug!("Start and goal are both {}, nothing to do", start);
            return Ok(Path::new());
        }
        if goal_is_wall {
            debug!("Goal {} is a wall", goal);
            return Ok(Path::new());
        }
        if grid.is_wall(start.x, start.y)? {
            debug!("Start {} is a wall", start);
            return Ok(Path::new());
        }
        grid.update();
        if grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(Path::new());
        }

        let reached =
            context.propagate(grid, &start, &goal, |entry| self.selection_key(entry, &goal));
        let Some(end) = reached else {
            warn!("Reachable goal {} could not be pathed to from {}", goal, start);
            return Ok(Path::new());
        };
        let path = context.backtrack(grid, &start, &end).unwrap_or_default();
        debug!(
            "Path from {} to {} has {} points after {} expansions",
            start,
            goal,
            path.len(),
            context.expansions()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::dijkstra::DijkstraSolver;
    use super::greedy::GreedySolver;
    use super::*;
    use crate::UNVISITED;

    fn solvers() -> [Box<dyn GridSolver>; 2] {
        [Box::new(DijkstraSolver), Box::new(GreedySolver)]
    }

    #[test]
    fn equal_start_goal_is_empty() {
        for solver in solvers() {
            let mut grid = Grid::new(3, 3, 1.0).unwrap();
            let mut ct = SearchContext::new();
            let p = Point::new(1, 1);
            let path = solver.get_path_single_goal(&mut grid, &mut ct, p, p).unwrap();
            assert!(path.is_empty());
        }
    }

    #[test]
    fn out_of_range_is_an_error() {
        for solver in solvers() {
            let mut grid = Grid::new(3, 3, 1.0).unwrap();
            let mut ct = SearchContext::new();
            let inside = Point::new(0, 0);
            let outside = Point::new(3, 0);
            assert!(solver
                .get_path_single_goal(&mut grid, &mut ct, inside, outside)
                .is_err());
            assert!(solver
                .get_path_single_goal(&mut grid, &mut ct, outside, inside)
                .is_err());
        }
    }

    #[test]
    fn walled_goal_skips_search() {
        for solver in solvers() {
            let mut grid = Grid::new(3, 3, 1.0).unwrap();
            grid.set_wall(2, 2).unwrap();
            let mut ct = SearchContext::new();
            let path = solver
                .get_path_single_goal(&mut grid, &mut ct, Point::new(0, 0), Point::new(2, 2))
                .unwrap();
            assert!(path.is_empty());
            assert_eq!(ct.expansions(), 0);
        }
    }

    #[test]
    fn walled_start_is_empty() {
        for solver in solvers() {
            let mut grid = Grid::new(3, 3, 1.0).unwrap();
            grid.set_wall(0, 0).unwrap();
            let mut ct = SearchContext::new();
            let path = solver
                .get_path_single_goal(&mut grid, &mut ct, Point::new(0, 0), Point::new(2, 2))
                .unwrap();
            assert!(path.is_empty());
        }
    }

    /// A stale cost left on the grid must not leak into the next search.
    #[test]
    fn stale_values_are_reset() {
        for solver in solvers() {
            let mut grid = Grid::new(4, 1, 1.0).unwrap();
            let mut ct = SearchContext::new();
            grid.set_value(1, 0, -5).unwrap();
            let path = solver
                .get_path_single_goal(&mut grid, &mut ct, Point::new(0, 0), Point::new(3, 0))
                .unwrap();
            assert_eq!(path.len(), 4);
            assert_eq!(grid.value(1, 0).unwrap(), 1);
            assert_ne!(grid.value(1, 0).unwrap(), UNVISITED);
        }
    }

    #[test]
    fn path_around_pillar() {
        // |..G|
        // |.#.|
        // |S..|
        for solver in solvers() {
            let mut grid = Grid::new(3, 3, 1.0).unwrap();
            grid.set_wall(1, 1).unwrap();
            let mut ct = SearchContext::new();
            let path = solver
                .get_path_single_goal(&mut grid, &mut ct, Point::new(0, 0), Point::new(2, 2))
                .unwrap();
            assert_eq!(path.len(), 5);
            assert!(path.iter().all(|p| !(p.x == 1.0 && p.y == 1.0)));
        }
    }
}
