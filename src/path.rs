//! Path reconstruction from the parent links a solve leaves behind.

use grid_util::Point;

use crate::error::GridError;
use crate::grid::Grid;
use crate::search::SearchState;

/// Walks the parent chain from `end` back to the start of the run and
/// returns the node indices in start..=end order.
///
/// Returns [None] when `end` was never reached or lies outside the state's
/// node slots. The degenerate run with
/// start == end has no parent link either but is a genuine path of length
/// one, so the two cases are told apart through the start recorded in the
/// state.
pub fn extract(state: &SearchState, end: usize) -> Option<Vec<usize>> {
    if end >= state.len() {
        return None;
    }
    if state.parent(end).is_none() && state.start() != Some(end) {
        return None;
    }
    let mut path: Vec<usize> = itertools::unfold(Some(end), |cursor| {
        let ix = (*cursor)?;
        *cursor = state.parent(ix);
        Some(ix)
    })
    .collect();
    path.reverse();
    Some(path)
}

/// [extract] with the indices resolved to grid coordinates, in the form a
/// display driver consumes.
pub fn extract_points(
    state: &SearchState,
    grid: &Grid,
    end: usize,
) -> Result<Option<Vec<Point>>, GridError> {
    match extract(state, end) {
        Some(indices) => {
            let mut points = Vec::with_capacity(indices.len());
            for ix in indices {
                points.push(grid.point_of(ix)?);
            }
            Ok(Some(points))
        }
        None => Ok(None),
    }
}
