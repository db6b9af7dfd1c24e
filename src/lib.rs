//! # grid_pathsearch
//!
//! Pathfinding over a fixed-size rectangular lattice in which some cells are walls.
//! Costs are propagated from the start cell with uniform unit steps in the
//! [von Neumann neighbourhood](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood),
//! after which the path is recovered by walking back from the goal along strictly
//! decreasing costs. The next cell to expand is picked either by lowest cost
//! ([Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)) or by lowest
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the goal
//! (greedy best-first search, which is not guaranteed to find the shortest path).
//!
//! Paths are returned as world-space positions, each cell `(x, y)` being placed at
//! `(x * spacing, y * spacing, 0)`.
pub mod config;
pub mod error;
pub mod grid;
pub mod path_search;
pub mod position;
pub mod search_context;
pub mod solver;

pub use config::{GridConfig, SearchMode};
pub use error::GridError;
pub use grid::{Grid, GridNode};
pub use path_search::PathSearch;
pub use position::WorldPosition;

use grid_util::Point;

/// Cost of a cell that has not been reached by the current search.
pub const UNVISITED: i32 = 10000;
/// Maximum number of backtracking steps before giving up on reconstructing a path.
pub const BACKTRACK_LIMIT: usize = 30000;
/// Small inline capacity for neighbourhoods, which never exceed four cells.
pub(crate) const N_SMALLVEC_SIZE: usize = 4;

/// Ordered world positions from start to goal. Empty means no path.
pub type Path = Vec<WorldPosition>;

/// Maps a continuous grid coordinate to the nearest lattice cell. Halves round up,
/// so `(0.5, -0.5)` lands on `(1, 0)`.
pub fn round_to_cell(x: f32, y: f32) -> Point {
    Point::new((x + 0.5).floor() as i32, (y + 0.5).floor() as i32)
}

/// Total travelled distance along a path in world units.
pub fn path_length(path: &Path) -> f32 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
