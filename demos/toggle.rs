use grid_astar::{path, AstarSolver, Grid, SearchState};
use grid_util::Point;

// Emulates an interactive editor session on the default 16x16 map: a wall
// is built one toggle at a time and the path is recomputed after every
// edit, the way a redraw loop would re-run solve-then-extract.
fn main() {
    let mut grid = Grid::default();
    grid.generate_components();
    let start = grid.index_of(Point::new(2, 1)).unwrap();
    let end = grid.index_of(Point::new(5, 12)).unwrap();
    let solver = AstarSolver::new();
    let mut state = SearchState::new(&grid);

    for x in 0..12 {
        let ix = grid.index_of(Point::new(x, 6)).unwrap();
        grid.toggle_obstacle(ix).unwrap();
        let found = solver
            .shortest_path(&mut grid, &mut state, start, end)
            .unwrap();
        match found {
            Some(indices) => println!("wall length {}: path cost {}", x + 1, indices.len() - 1),
            None => println!("wall length {}: no path", x + 1),
        }
    }
    println!("{}", grid);
    if let Some(points) = path::extract_points(&state, &grid, end).unwrap() {
        println!("final path: {:?}", points);
    }
}
