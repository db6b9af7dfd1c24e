use crate::search_context::SearchContext;
use crate::solver::{dijkstra::DijkstraSolver, greedy::GreedySolver, GridSolver};
use crate::{round_to_cell, Grid, GridConfig, GridError, Path, SearchMode, WorldPosition};
use core::fmt;
use grid_util::Point;

/// [PathSearch] bundles a [Grid] with the search mode chosen at configuration time and a
/// [SearchContext] whose buffers are reused between searches. Searches borrow it mutably
/// because the grid's cost field is used as scratch space.
#[derive(Clone, Debug)]
pub struct PathSearch {
    pub grid: Grid,
    mode: SearchMode,
    context: SearchContext,
}

impl PathSearch {
    pub fn new(config: &GridConfig) -> Result<PathSearch, GridError> {
        config.validate()?;
        Ok(PathSearch {
            grid: Grid::from_config(config)?,
            mode: config.search_mode(),
            context: SearchContext::new(),
        })
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }
    /// Statistics of the last search.
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Computes a path between two continuous grid coordinates, each rounded to the
    /// nearest cell. See [find_path_cells](Self::find_path_cells). NaN or infinite
    /// coordinates are rejected with [GridError::NonFinite].
    pub fn find_path(&mut self, start: (f32, f32), end: (f32, f32)) -> Result<Path, GridError> {
        let start = nearest_cell(start)?;
        let end = nearest_cell(end)?;
        self.find_path_cells(start, end)
    }

    /// Computes a path of world positions from `start` to `end`, both inclusive.
    /// An empty path means there is none to follow; an error means a cell lies
    /// outside the grid.
    pub fn find_path_cells(&mut self, start: Point, end: Point) -> Result<Path, GridError> {
        match self.mode {
            SearchMode::SingleSource => {
                DijkstraSolver.get_path_single_goal(&mut self.grid, &mut self.context, start, end)
            }
            SearchMode::Greedy => {
                GreedySolver.get_path_single_goal(&mut self.grid, &mut self.context, start, end)
            }
        }
    }

    pub fn get_position(&self, x: i32, y: i32) -> Result<WorldPosition, GridError> {
        self.grid.get_position(x, y)
    }
    pub fn set_walls(&mut self, walls: &[Point]) -> Result<(), GridError> {
        self.grid.set_walls(walls)
    }
    pub fn clear_walls(&mut self) {
        self.grid.clear_walls()
    }
}

fn nearest_cell((x, y): (f32, f32)) -> Result<Point, GridError> {
    if x.is_finite() && y.is_finite() {
        Ok(round_to_cell(x, y))
    } else {
        Err(GridError::NonFinite { x, y })
    }
}

impl fmt::Display for PathSearch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:?} search on", self.mode)?;
        write!(f, "{}", self.grid)
    }
}
