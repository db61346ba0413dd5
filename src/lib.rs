//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a
//! uniform 4-connected grid with toggleable obstacles. The grid is a static
//! arena of nodes whose adjacency is fixed at construction; every solve
//! writes its annotations (visited flags, costs, parent links) into a
//! separate [SearchState] so that one grid can serve many queries.
//! Pre-computes [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_astar::{AstarSolver, Grid, SearchState, path};
//! use grid_util::Point;
//!
//! let mut grid = Grid::new(4, 4);
//! let wall = grid.index_of(Point::new(1, 1)).unwrap();
//! grid.toggle_obstacle(wall).unwrap();
//! let mut state = SearchState::new(&grid);
//! let solver = AstarSolver::new();
//! let start = grid.index_of(Point::new(0, 0)).unwrap();
//! let end = grid.index_of(Point::new(3, 3)).unwrap();
//! solver.solve(&grid, &mut state, start, end).unwrap();
//! let path = path::extract(&state, end).unwrap();
//! assert_eq!(path.len(), 7);
//! ```

pub mod error;
pub mod grid;
pub mod path;
pub mod search;

pub use error::GridError;
pub use grid::{Grid, Node, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use search::{euclidean_distance, AstarSolver, SearchState};
