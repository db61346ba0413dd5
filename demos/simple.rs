use grid_astar::{path, AstarSolver, Grid, SearchState};
use grid_util::Point;

// In this demo a path is found on a grid with shape
// S....
// .###.
// ...#.
// ...#.
// ....E
// S marks the start
// E marks the end
fn main() {
    let mut grid = Grid::new(5, 5);
    for p in [
        Point::new(1, 1),
        Point::new(2, 1),
        Point::new(3, 1),
        Point::new(3, 2),
        Point::new(3, 3),
    ] {
        let ix = grid.index_of(p).unwrap();
        grid.set_obstacle(ix, true).unwrap();
    }
    grid.generate_components();
    let start = grid.index_of(Point::new(0, 0)).unwrap();
    let end = grid.index_of(Point::new(4, 4)).unwrap();
    let solver = AstarSolver::new();
    let mut state = SearchState::new(&grid);
    let found = solver
        .shortest_path(&mut grid, &mut state, start, end)
        .unwrap();
    if let Some(indices) = found {
        println!("A path has been found:");
        for p in path::extract_points(&state, &grid, end).unwrap().unwrap() {
            println!("{:?}", p);
        }
        println!("total cost: {}", indices.len() - 1);
    }
}
