//! Path reconstruction for a chosen target.
//!
//! A depth-first search from the piece's station to its destination under
//! the same direction rules the target search uses, so a returned path is
//! always one the piece may legally travel. The finishing hub is terminal:
//! a path may start there but never runs through it.

use crate::board::{Position, PositionSet};

use super::rules::legal_next;

/// A loop-free sequence of stations joined by graph edges, both endpoints
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: Vec<Position>,
}

impl Route {
    /// The station the piece stands on before moving.
    pub fn start(&self) -> Position {
        self.path[0]
    }

    pub fn destination(&self) -> Position {
        self.path[self.path.len() - 1]
    }

    /// The stations a moving piece visits, in order, without its start.
    pub fn steps(&self) -> &[Position] {
        &self.path[1..]
    }

    /// Number of edges travelled.
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Finds a path from `from` to `to` for a roll that started at
/// `original_start`. Returns `None` when the rules allow no such path.
pub fn find_route(from: Position, to: Position, original_start: Position) -> Option<Route> {
    find_route_avoiding(from, to, original_start, PositionSet::empty())
}

/// Like [`find_route`], never entering a station in `visited`.
pub fn find_route_avoiding(
    from: Position,
    to: Position,
    original_start: Position,
    visited: PositionSet,
) -> Option<Route> {
    let mut path = search(from, to, original_start, visited, true)?;
    path.reverse();
    Some(Route { path })
}

/// Returns the path from `current` to `to` in reverse order.
fn search(
    current: Position,
    to: Position,
    origin: Position,
    visited: PositionSet,
    at_start: bool,
) -> Option<Vec<Position>> {
    if current == to {
        return Some(vec![current]);
    }
    if current.is_finish() && !at_start {
        return None;
    }
    let visited = visited.with(current);
    legal_next(current, origin)
        .filter(|n| !visited.contains(*n))
        .find_map(|n| search(n, to, origin, visited, false))
        .map(|mut path| {
            path.push(current);
            path
        })
}
