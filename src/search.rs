use std::cmp::Ordering;
use std::collections::BinaryHeap;

use grid_util::Point;
use log::{info, warn};

use crate::error::GridError;
use crate::grid::Grid;
use crate::path;

/// Straight-line distance between two grid coordinates, used both as edge
/// cost and as the heuristic. Admissible for 4-directional unit movement.
pub fn euclidean_distance(a: Point, b: Point) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Per-run annotations of a single node.
#[derive(Clone, Debug)]
struct SearchNode {
    visited: bool,
    local: f32,
    global: f32,
    parent: Option<usize>,
}

impl Default for SearchNode {
    fn default() -> Self {
        SearchNode {
            visited: false,
            local: f32::INFINITY,
            global: f32::INFINITY,
            parent: None,
        }
    }
}

/// Dense per-node search annotations, kept separate from the static [Grid]
/// so that the graph can be shared while each solve owns its own state.
/// [AstarSolver::solve](crate::AstarSolver::solve) resets this fully before
/// every run; nothing leaks between runs.
///
/// The per-node accessors panic on an index outside [len](Self::len);
/// [path::extract] treats an out-of-range end as unreached instead.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    nodes: Vec<SearchNode>,
    start: Option<usize>,
}

impl SearchState {
    /// Creates a state sized to the given grid.
    pub fn new(grid: &Grid) -> SearchState {
        SearchState {
            nodes: vec![SearchNode::default(); grid.len()],
            start: None,
        }
    }

    /// Reinitialises every slot: not visited, infinite costs, no parent.
    pub fn reset(&mut self, grid: &Grid) {
        self.nodes.clear();
        self.nodes.resize(grid.len(), SearchNode::default());
        self.start = None;
    }

    /// Start node of the run that produced these annotations, if any.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Number of node slots; matches the grid the state was last sized to.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn visited(&self, index: usize) -> bool {
        self.nodes[index].visited
    }

    /// Best known cost from the start to a node, `f32::INFINITY` if the
    /// node was never relaxed.
    pub fn local_cost(&self, index: usize) -> f32 {
        self.nodes[index].local
    }

    /// Local cost plus the heuristic estimate to the goal.
    pub fn global_cost(&self, index: usize) -> f32 {
        self.nodes[index].global
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes[index].parent
    }
}

/// Open-list entry referencing a node by arena index. The node may be
/// pushed several times as its cost improves; stale entries are skipped on
/// pop via the visited flag.
struct OpenEntry {
    global: f32,
    local: f32,
    index: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.global.eq(&other.global) && self.local.eq(&other.local)
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per global cost, then creates a subordering based on
        // local cost, favoring exploration of nodes deeper along their path
        match other.global.total_cmp(&self.global) {
            Ordering::Equal => self.local.total_cmp(&other.local),
            s => s,
        }
    }
}

/// Frontier-driven A* over a [Grid], writing its progress into a
/// [SearchState]. The open list is a genuine binary heap keyed by global
/// cost with lazy deletion of stale duplicate entries.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Multiplier applied to the heuristic. 1.0 keeps it admissible and the
    /// resulting paths optimal; larger values trade optimality for speed.
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    /// Runs the search from `start` to `end`, mutating `state` in place.
    /// The state is fully reset first, so a stale state may be passed in.
    /// The path, if one was found, is read out afterwards with
    /// [path::extract].
    ///
    /// Blocked cells are excluded from expansion and from relaxation, so a
    /// blocked `end` is never reached and extraction reports no path.
    pub fn solve(
        &self,
        grid: &Grid,
        state: &mut SearchState,
        start: usize,
        end: usize,
    ) -> Result<(), GridError> {
        let start_point = grid.point_of(start)?;
        let end_point = grid.point_of(end)?;

        state.reset(grid);
        state.start = Some(start);
        state.nodes[start].local = 0.0;
        state.nodes[start].global =
            euclidean_distance(start_point, end_point) * self.heuristic_factor;

        let mut open = BinaryHeap::new();
        open.push(OpenEntry {
            global: state.nodes[start].global,
            local: 0.0,
            index: start,
        });

        while let Some(OpenEntry { index: current, .. }) = open.pop() {
            // Skip stale duplicates of an already expanded node.
            if state.nodes[current].visited {
                continue;
            }
            state.nodes[current].visited = true;
            if current == end {
                break;
            }
            let current_point = grid.point_of(current)?;
            let current_local = state.nodes[current].local;
            for &n in grid.neighbours_of(current)? {
                if state.nodes[n].visited || grid.is_obstacle(n)? {
                    continue;
                }
                let n_point = grid.point_of(n)?;
                let candidate = current_local + euclidean_distance(current_point, n_point);
                if candidate < state.nodes[n].local {
                    state.nodes[n].parent = Some(current);
                    state.nodes[n].local = candidate;
                    state.nodes[n].global =
                        candidate + euclidean_distance(n_point, end_point) * self.heuristic_factor;
                    open.push(OpenEntry {
                        global: state.nodes[n].global,
                        local: candidate,
                        index: n,
                    });
                }
            }
        }
        Ok(())
    }

    /// Computes the shortest path from `start` to `end` as a sequence of
    /// node indices. The connected components of the grid are refreshed and
    /// consulted first so that a query between separated regions returns
    /// [None] without running a search.
    pub fn shortest_path(
        &self,
        grid: &mut Grid,
        state: &mut SearchState,
        start: usize,
        end: usize,
    ) -> Result<Option<Vec<usize>>, GridError> {
        grid.point_of(start)?;
        grid.point_of(end)?;
        grid.update();
        if grid.is_obstacle(start)? || grid.is_obstacle(end)? || grid.unreachable(start, end) {
            info!("{} is not reachable from {}", end, start);
            return Ok(None);
        }
        self.solve(grid, state, start, end)?;
        let found = path::extract(state, end);
        if found.is_none() {
            warn!("Reachable goal {} could not be pathed to from {}", end, start);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn euclidean_distance_is_symmetric() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(euclidean_distance(a, b), 5.0);
        assert_eq!(euclidean_distance(b, a), 5.0);
    }

    /// Asserts that the case in which start and end are equal is handled
    /// correctly.
    #[test]
    fn equal_start_end() {
        let grid = Grid::new(1, 1);
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        solver.solve(&grid, &mut state, 0, 0).unwrap();
        assert_eq!(path::extract(&state, 0), Some(vec![0]));
    }

    /// Asserts that the straight 4 node corridor solution is found with
    /// total cost 3.
    #[test]
    fn solve_straight_line() {
        let grid = Grid::new(4, 4);
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        let start = grid.index_of(Point::new(0, 0)).unwrap();
        let end = grid.index_of(Point::new(3, 0)).unwrap();
        solver.solve(&grid, &mut state, start, end).unwrap();
        assert_eq!(path::extract(&state, end), Some(vec![0, 1, 2, 3]));
        assert_eq!(state.local_cost(end), 3.0);
        // The heuristic is zero at the end node.
        assert_eq!(state.global_cost(end), state.local_cost(end));
    }

    /// A wall with a single gap at x=3 forces a detour around it.
    #[test]
    fn solve_detour_around_wall() {
        let mut grid = Grid::new(4, 4);
        for x in 0..3 {
            let ix = grid.index_of(Point::new(x, 1)).unwrap();
            grid.set_obstacle(ix, true).unwrap();
        }
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        let start = grid.index_of(Point::new(0, 0)).unwrap();
        let end = grid.index_of(Point::new(0, 2)).unwrap();
        solver.solve(&grid, &mut state, start, end).unwrap();
        let found = path::extract(&state, end).unwrap();
        let gap = grid.index_of(Point::new(3, 1)).unwrap();
        assert!(found.contains(&gap));
        assert_eq!(*found.first().unwrap(), start);
        assert_eq!(*found.last().unwrap(), end);
        // 3 right, down, down, 3 left: 8 unit steps.
        assert_eq!(found.len(), 9);
        assert_eq!(state.local_cost(end), 8.0);
    }

    /// A fully walled-off end exhausts the open list without a panic and
    /// extraction reports no path.
    #[test]
    fn walled_off_end_has_no_path() {
        let mut grid = Grid::new(4, 4);
        for p in [Point::new(2, 0), Point::new(2, 1), Point::new(3, 1)] {
            let ix = grid.index_of(p).unwrap();
            grid.set_obstacle(ix, true).unwrap();
        }
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        let start = grid.index_of(Point::new(0, 0)).unwrap();
        let end = grid.index_of(Point::new(3, 0)).unwrap();
        solver.solve(&grid, &mut state, start, end).unwrap();
        assert_eq!(path::extract(&state, end), None);
    }

    /// A blocked end is never relaxed, so no path is reported even though
    /// its free neighbours are all reached.
    #[test]
    fn obstacle_end_has_no_path() {
        let mut grid = Grid::new(3, 3);
        let end = grid.index_of(Point::new(2, 2)).unwrap();
        grid.set_obstacle(end, true).unwrap();
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        solver.solve(&grid, &mut state, 0, end).unwrap();
        assert_eq!(path::extract(&state, end), None);
        assert_eq!(state.parent(end), None);
    }

    /// Solving twice in a row with the same inputs extracts the same path.
    #[test]
    fn solve_is_idempotent() {
        let mut grid = Grid::new(5, 5);
        for p in [Point::new(1, 1), Point::new(1, 2), Point::new(3, 3)] {
            let ix = grid.index_of(p).unwrap();
            grid.set_obstacle(ix, true).unwrap();
        }
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        let start = grid.index_of(Point::new(0, 4)).unwrap();
        let end = grid.index_of(Point::new(4, 0)).unwrap();
        solver.solve(&grid, &mut state, start, end).unwrap();
        let first = path::extract(&state, end);
        solver.solve(&grid, &mut state, start, end).unwrap();
        let second = path::extract(&state, end);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    /// The state is reset internally, so a state carrying annotations from
    /// an unrelated run does not contaminate the next solve.
    #[test]
    fn stale_state_is_reset() {
        let grid = Grid::new(3, 3);
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        solver.solve(&grid, &mut state, 8, 0).unwrap();
        solver.solve(&grid, &mut state, 0, 2).unwrap();
        assert_eq!(state.start(), Some(0));
        assert_eq!(path::extract(&state, 2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn invalid_endpoints_are_signalled() {
        let grid = Grid::new(2, 2);
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        assert!(matches!(
            solver.solve(&grid, &mut state, 0, 7),
            Err(GridError::IndexOutOfBounds { index: 7, len: 4 })
        ));
    }

    /// A freshly constructed grid needs no manual component generation
    /// before its first path query.
    #[test]
    fn fresh_grid_is_pathable_without_component_generation() {
        let mut grid = Grid::new(4, 4);
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        let end = grid.len() - 1;
        let found = solver.shortest_path(&mut grid, &mut state, 0, end).unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().len(), 7);
    }

    #[test]
    fn shortest_path_uses_component_precheck() {
        let mut grid = Grid::new(3, 1);
        grid.set_obstacle(1, true).unwrap();
        grid.generate_components();
        let mut state = SearchState::new(&grid);
        let solver = AstarSolver::new();
        assert_eq!(solver.shortest_path(&mut grid, &mut state, 0, 2).unwrap(), None);
        grid.set_obstacle(1, false).unwrap();
        assert_eq!(
            solver.shortest_path(&mut grid, &mut state, 0, 2).unwrap(),
            Some(vec![0, 1, 2])
        );
    }
}
