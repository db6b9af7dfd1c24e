use grid_pathsearch::{path_length, GridConfig, PathSearch, SearchMode};
use grid_util::Point;

// Greedy best-first search only looks at the distance to the goal when picking the
// next cell. It expands fewer cells but can settle for a longer path than Dijkstra:
//  ___
// |.....E|
// |.#.#..|
// |....##|
// |.....#|
// |.###..|
// |S.....|
//  ___

fn main() {
    let mut search = PathSearch::new(&GridConfig::new(6, 6, 1.0)).unwrap();
    search
        .set_walls(&[
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(3, 1),
            Point::new(1, 4),
            Point::new(3, 4),
            Point::new(4, 3),
            Point::new(5, 2),
            Point::new(5, 3),
        ])
        .unwrap();
    println!("{}", search.grid);
    for mode in [SearchMode::SingleSource, SearchMode::Greedy] {
        search.set_mode(mode);
        let path = search.find_path((0.0, 0.0), (5.0, 5.0)).unwrap();
        println!(
            "{:?}: {} points, length {}, {} expansions",
            mode,
            path.len(),
            path_length(&path),
            search.context().expansions()
        );
    }
}
