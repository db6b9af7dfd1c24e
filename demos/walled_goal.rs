use grid_pathsearch::{GridConfig, PathSearch};
use grid_util::Point;

// A goal that is a wall, or that is sealed off by walls, yields an empty path rather
// than an error. Clearing the walls makes it reachable again.

fn main() {
    let mut search = PathSearch::new(&GridConfig::new(5, 5, 1.0)).unwrap();
    let ring = [
        Point::new(1, 2),
        Point::new(3, 2),
        Point::new(2, 1),
        Point::new(2, 3),
    ];
    search.set_walls(&ring).unwrap();
    println!("{}", search);
    let sealed = search.find_path((0.0, 0.0), (2.0, 2.0)).unwrap();
    println!("Sealed goal gives {} points", sealed.len());

    let onto_wall = search.find_path((0.0, 0.0), (2.0, 1.0)).unwrap();
    println!("Walled goal gives {} points", onto_wall.len());

    search.clear_walls();
    let open = search.find_path((0.0, 0.0), (2.0, 2.0)).unwrap();
    println!("After clearing walls: {} points", open.len());

    match search.find_path((0.0, 0.0), (7.0, 2.0)) {
        Ok(_) => println!("Unexpected path outside the grid"),
        Err(e) => println!("Error: {}", e),
    }
}
