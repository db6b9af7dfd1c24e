use crate::config::validate_dimensions;
use crate::{GridConfig, GridError, WorldPosition, N_SMALLVEC_SIZE, UNVISITED};
use core::fmt;
use grid_util::grid::{Grid as _, SimpleGrid};
use grid_util::point::Point;
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Persistent attributes of a single lattice cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridNode {
    pub point: Point,
    pub position: WorldPosition,
    pub is_wall: bool,
}

impl GridNode {
    fn open(point: Point, spacing: f32) -> GridNode {
        GridNode {
            point,
            position: WorldPosition::new(point.x as f32 * spacing, point.y as f32 * spacing, 0.0),
            is_wall: false,
        }
    }
}

/// [Grid] owns the cells of a fixed rectangular lattice. Wall flags and world positions
/// persist until changed, while the per-cell search cost is scratch space that every
/// search resets to [UNVISITED] before use. Connected components of the open cells are
/// kept in a [UnionFind] and regenerated lazily after walls change.
#[derive(Clone, Debug)]
pub struct Grid {
    spacing: f32,
    nodes: SimpleGrid<GridNode>,
    costs: SimpleGrid<i32>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Creates a grid of `width * height` open cells with unvisited costs.
    pub fn new(width: usize, height: usize, spacing: f32) -> Result<Grid, GridError> {
        validate_dimensions(width, height, spacing)?;
        let mut nodes = SimpleGrid::new(width, height, GridNode::open(Point::new(0, 0), spacing));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let point = Point::new(x, y);
                nodes.set_point(point, GridNode::open(point, spacing));
            }
        }
        let mut grid = Grid {
            spacing,
            nodes,
            costs: SimpleGrid::new(width, height, UNVISITED),
            components: UnionFind::new(0),
            components_dirty: true,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn from_config(config: &GridConfig) -> Result<Grid, GridError> {
        Grid::new(config.width, config.height, config.spacing)
    }

    /// Regenerates the lattice, replacing all previous state including walls. An invalid
    /// configuration leaves the grid untouched.
    pub fn generate(&mut self, width: usize, height: usize, spacing: f32) -> Result<(), GridError> {
        *self = Grid::new(width, height, spacing)?;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.nodes.width()
    }
    pub fn height(&self) -> usize {
        self.nodes.height()
    }
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.nodes.point_in_bounds(Point::new(x, y))
    }
    pub fn point_in_bounds(&self, point: &Point) -> bool {
        self.nodes.point_in_bounds(*point)
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<Point, GridError> {
        let point = Point::new(x, y);
        if self.nodes.point_in_bounds(point) {
            Ok(point)
        } else {
            Err(GridError::OutOfRange {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }
    pub(crate) fn get_ix_point(&self, point: &Point) -> usize {
        debug_assert!(self.point_in_bounds(point));
        self.nodes.get_ix_point(point)
    }

    pub fn node(&self, x: i32, y: i32) -> Result<GridNode, GridError> {
        let point = self.check_bounds(x, y)?;
        Ok(self.nodes.get_point(point))
    }
    /// World-space position of the cell at `(x, y)`.
    pub fn get_position(&self, x: i32, y: i32) -> Result<WorldPosition, GridError> {
        self.node(x, y).map(|node| node.position)
    }
    pub fn value(&self, x: i32, y: i32) -> Result<i32, GridError> {
        let point = self.check_bounds(x, y)?;
        Ok(self.costs.get_point(point))
    }
    pub fn set_value(&mut self, x: i32, y: i32, value: i32) -> Result<(), GridError> {
        let point = self.check_bounds(x, y)?;
        self.costs.set_point(point, value);
        Ok(())
    }
    pub fn is_wall(&self, x: i32, y: i32) -> Result<bool, GridError> {
        self.node(x, y).map(|node| node.is_wall)
    }

    /// Marks a single cell as a wall.
    pub fn set_wall(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let point = self.check_bounds(x, y)?;
        self.place_wall(point);
        Ok(())
    }
    /// Marks every listed cell as a wall. All cells are bounds-checked before any is
    /// changed, so an out of range entry leaves the grid as it was.
    pub fn set_walls(&mut self, walls: &[Point]) -> Result<(), GridError> {
        let points = walls
            .iter()
            .map(|p| self.check_bounds(p.x, p.y))
            .collect::<Result<Vec<Point>, GridError>>()?;
        for point in points {
            self.place_wall(point);
        }
        Ok(())
    }
    fn place_wall(&mut self, point: Point) {
        let mut node = self.nodes.get_point(point);
        if !node.is_wall {
            node.is_wall = true;
            self.nodes.set_point(point, node);
            // Adding a wall can split a component
            self.components_dirty = true;
        }
    }
    /// Opens every cell again.
    pub fn clear_walls(&mut self) {
        for node in self.nodes.values.iter_mut() {
            node.is_wall = false;
        }
        self.components_dirty = true;
    }

    /// Sets every cost back to [UNVISITED].
    pub fn reset_values(&mut self) {
        self.costs.values.fill(UNVISITED);
    }

    pub(crate) fn node_at(&self, point: &Point) -> GridNode {
        self.nodes.get_point(*point)
    }
    pub(crate) fn value_at(&self, point: &Point) -> i32 {
        self.costs.get_point(*point)
    }
    pub(crate) fn set_value_at(&mut self, point: &Point, value: i32) {
        self.costs.set_point(*point, value);
    }
    pub(crate) fn can_move_to(&self, point: &Point) -> bool {
        self.point_in_bounds(point) && !self.node_at(point).is_wall
    }

    /// In-bounds cells of the 4-neighbourhood in the order right, left, up, down.
    /// The order decides ties during both expansion and backtracking, and differs from
    /// [Point::neumann_neighborhood], which visits up before left.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        [
            Point::new(1, 0),
            Point::new(-1, 0),
            Point::new(0, 1),
            Point::new(0, -1),
        ]
        .into_iter()
        .map(|offset| *point + offset)
        .filter(|p| self.nodes.point_in_bounds(*p))
        .collect()
    }

    /// Representative cell index of the 4-connected open region containing `point`.
    /// Only meaningful for open cells once [update](Self::update) has run.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }
    /// True if an open path of unit steps joins `start` and `goal`.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// True if `start` and `goal` lie in different open regions. A wall or an out of
    /// bounds cell at either end is always unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.can_move_to(start) && self.can_move_to(goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Rebuilds the open regions if walls changed since the last rebuild.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Rebuilds the open regions from scratch by joining every open cell with its open
    /// right and upper neighbour. Walls stay in singleton sets of their own.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for y in 0..h {
            for x in 0..w {
                if self.nodes.get(x, y).is_wall {
                    continue;
                }
                let parent_ix = self.nodes.get_ix(x, y);
                // Left and lower links are made when visiting those cells
                let right = Point::new(x as i32 + 1, y as i32);
                let up = Point::new(x as i32, y as i32 + 1);
                for n in [right, up] {
                    if self.can_move_to(&n) {
                        let ix = self.nodes.get_ix_point(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.height()).rev() {
            let row = (0..self.width())
                .map(|x| if self.nodes.get(x, y).is_wall { '#' } else { '.' })
                .join("");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_places_cells_by_spacing() {
        let grid = Grid::new(5, 3, 100.0).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get_position(0, 0).unwrap(), WorldPosition::new(0.0, 0.0, 0.0));
        assert_eq!(
            grid.get_position(4, 2).unwrap(),
            WorldPosition::new(400.0, 200.0, 0.0)
        );
        let node = grid.node(3, 1).unwrap();
        assert_eq!(node.point, Point::new(3, 1));
        assert!(!node.is_wall);
        assert_eq!(grid.value(3, 1).unwrap(), UNVISITED);
    }

    #[test]
    fn accessors_reject_out_of_range() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        assert_eq!(
            grid.get_position(2, 0),
            Err(GridError::OutOfRange {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert!(grid.get_position(0, -1).is_err());
        assert!(grid.set_value(-1, 0, 3).is_err());
        assert!(grid.set_wall(0, 2).is_err());
        assert!(grid.value(5, 5).is_err());
    }

    #[test]
    fn set_walls_is_all_or_nothing() {
        let mut grid = Grid::new(3, 3, 1.0).unwrap();
        let walls = [Point::new(1, 1), Point::new(3, 0)];
        assert!(grid.set_walls(&walls).is_err());
        assert!(!grid.is_wall(1, 1).unwrap());

        grid.set_walls(&[Point::new(1, 1), Point::new(2, 1)]).unwrap();
        assert!(grid.is_wall(1, 1).unwrap());
        assert!(grid.is_wall(2, 1).unwrap());
        grid.clear_walls();
        assert!(!grid.is_wall(1, 1).unwrap());
        assert!(!grid.is_wall(2, 1).unwrap());
    }

    #[test]
    fn reset_values_restores_unvisited() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        grid.set_value(1, 0, 4).unwrap();
        assert_eq!(grid.value(1, 0).unwrap(), 4);
        grid.reset_values();
        assert_eq!(grid.value(1, 0).unwrap(), UNVISITED);
    }

    #[test]
    fn regenerate_replaces_state() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        grid.set_wall(1, 1).unwrap();
        grid.generate(4, 3, 10.0).unwrap();
        assert_eq!(grid.width(), 4);
        assert!(!grid.is_wall(1, 1).unwrap());
        assert_eq!(grid.get_position(3, 2).unwrap(), WorldPosition::new(30.0, 20.0, 0.0));
        assert!(grid.generate(0, 3, 10.0).is_err());
        assert_eq!(grid.width(), 4);
    }

    #[test]
    fn neighbourhood_is_clipped_and_ordered() {
        let grid = Grid::new(3, 3, 1.0).unwrap();
        let centre = grid.neighborhood_points(&Point::new(1, 1));
        assert_eq!(
            centre.as_slice(),
            &[
                Point::new(2, 1),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(1, 0)
            ]
        );
        let corner = grid.neighborhood_points(&Point::new(0, 0));
        assert_eq!(corner.as_slice(), &[Point::new(1, 0), Point::new(0, 1)]);
    }

    /// Same cells as grid_util's von Neumann neighbourhood, but left comes before up.
    #[test]
    fn neighbourhood_reorders_neumann_neighbourhood() {
        let grid = Grid::new(3, 3, 1.0).unwrap();
        let centre = Point::new(1, 1);
        let ours = grid.neighborhood_points(&centre);
        let neumann = centre.neumann_neighborhood();
        assert_ne!(ours.as_slice(), neumann.as_slice());
        assert_eq!(
            ours.iter().sorted().collect::<Vec<_>>(),
            neumann.iter().sorted().collect::<Vec<_>>()
        );
    }

    #[test]
    fn cells_are_stored_row_wise() {
        let grid = Grid::new(4, 3, 1.0).unwrap();
        assert_eq!(grid.get_ix_point(&Point::new(0, 0)), 0);
        assert_eq!(grid.get_ix_point(&Point::new(3, 0)), 3);
        assert_eq!(grid.get_ix_point(&Point::new(1, 2)), 9);
        assert_eq!(grid.node(1, 2).unwrap().point, Point::new(1, 2));
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let mut grid = Grid::new(3, 2, 1.0).unwrap();
        grid.set_walls(&[Point::new(1, 0), Point::new(1, 1)]).unwrap();
        grid.update();
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(0, 1)));
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 1)));
        grid.clear_walls();
        grid.update();
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    /// Diagonal contact does not connect cells on a 4-grid.
    #[test]
    fn diagonal_contact_is_not_connected() {
        // |#.|
        // |.#|
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        grid.set_walls(&[Point::new(1, 0), Point::new(0, 1)]).unwrap();
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn display_marks_walls() {
        let mut grid = Grid::new(3, 2, 1.0).unwrap();
        grid.set_wall(0, 1).unwrap();
        grid.set_wall(2, 0).unwrap();
        assert_eq!(format!("{}", grid), "#..\n..#\n");
    }
}
