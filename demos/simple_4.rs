use grid_pathsearch::{GridConfig, PathSearch};
use grid_util::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |  E|
// | # |
// |S  |
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells are 100 world units apart and nodes have a 4-neighborhood.

fn main() {
    let config = GridConfig::new(3, 3, 100.0);
    let mut search = PathSearch::new(&config).unwrap();
    search.set_walls(&[Point::new(1, 1)]).unwrap();
    println!("{}", search);
    let path = search.find_path((0.0, 0.0), (2.0, 2.0)).unwrap();
    println!("Path:");
    for p in path {
        println!("{}", p);
    }
}
