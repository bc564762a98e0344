//! Directed movement graph of the Yut-nori board.
//!
//! Each entry records a directed edge `from -> to` in the direction pieces
//! travel. Unlike a map adjacency table the graph is not symmetric: pieces
//! never move backwards. All data is compile-time `static`; the per-position
//! `next`/`prev` slices are built once on first use.
//!
//! Branching is limited to three stations. The two top hubs continue either
//! along the perimeter or into their diagonal, and the center continues into
//! either bottom diagonal. Which branch is legal is decided by the movement
//! rules, not by the graph.

use std::sync::LazyLock;

use super::position::{Position, POSITION_COUNT};

/// A single directed edge between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: Position,
    pub to: Position,
}

const fn edge(from: Position, to: Position) -> Edge {
    Edge { from, to }
}

use Position::*;

/// Total number of directed edges.
///
/// Breakdown:
/// - Perimeter ring: 20
/// - Top-right hub to center: 3
/// - Top-left hub to center: 3
/// - Center to bottom-left hub: 3
/// - Center to finishing hub: 3
/// Total: 32
pub const EDGE_COUNT: usize = 32;

/// Complete edge table. For the branching stations the perimeter edge is
/// listed before the diagonal one, and the bottom-left exit of the center
/// before the bottom-right exit.
pub static EDGES: [Edge; EDGE_COUNT] = [
    // ====================================================================
    // Perimeter ring, counter-clockwise from the finishing hub
    // ====================================================================
    edge(BottomRight, Right1),
    edge(Right1, Right2),
    edge(Right2, Right3),
    edge(Right3, Right4),
    edge(Right4, TopRight),
    edge(TopRight, Top1),
    edge(Top1, Top2),
    edge(Top2, Top3),
    edge(Top3, Top4),
    edge(Top4, TopLeft),
    edge(TopLeft, Left1),
    edge(Left1, Left2),
    edge(Left2, Left3),
    edge(Left3, Left4),
    edge(Left4, BottomLeft),
    edge(BottomLeft, Bottom1),
    edge(Bottom1, Bottom2),
    edge(Bottom2, Bottom3),
    edge(Bottom3, Bottom4),
    edge(Bottom4, BottomRight),
    // ====================================================================
    // Shortcuts into the center
    // ====================================================================
    edge(TopRight, TopRightDiag1),
    edge(TopRightDiag1, TopRightDiag2),
    edge(TopRightDiag2, Center),
    edge(TopLeft, TopLeftDiag1),
    edge(TopLeftDiag1, TopLeftDiag2),
    edge(TopLeftDiag2, Center),
    // ====================================================================
    // Shortcuts out of the center
    // ====================================================================
    edge(Center, BottomLeftDiag1),
    edge(BottomLeftDiag1, BottomLeftDiag2),
    edge(BottomLeftDiag2, BottomLeft),
    edge(Center, BottomRightDiag1),
    edge(BottomRightDiag1, BottomRightDiag2),
    edge(BottomRightDiag2, BottomRight),
];

/// Grouped neighbour lists, one contiguous range per position.
struct GraphIndex {
    next: Vec<Position>,
    next_offsets: [(u8, u8); POSITION_COUNT],
    prev: Vec<Position>,
    prev_offsets: [(u8, u8); POSITION_COUNT],
}

/// Groups the edge table by one endpoint, preserving table order.
fn group_by(
    key: impl Fn(&Edge) -> Position,
    value: impl Fn(&Edge) -> Position,
) -> (Vec<Position>, [(u8, u8); POSITION_COUNT]) {
    let mut list = Vec::with_capacity(EDGE_COUNT);
    let mut offsets = [(0u8, 0u8); POSITION_COUNT];
    for i in 0..POSITION_COUNT {
        let start = list.len() as u8;
        list.extend(EDGES.iter().filter(|e| key(*e) as usize == i).map(&value));
        offsets[i] = (start, list.len() as u8);
    }
    (list, offsets)
}

static GRAPH_INDEX: LazyLock<GraphIndex> = LazyLock::new(|| {
    let (next, next_offsets) = group_by(|e| e.from, |e| e.to);
    let (prev, prev_offsets) = group_by(|e| e.to, |e| e.from);
    GraphIndex {
        next,
        next_offsets,
        prev,
        prev_offsets,
    }
});

/// Returns the stations reachable from `pos` in one step, in table order.
pub fn next(pos: Position) -> &'static [Position] {
    let idx = &*GRAPH_INDEX;
    let (start, end) = idx.next_offsets[pos as usize];
    &idx.next[start as usize..end as usize]
}

/// Returns the stations that lead into `pos` in one step, in table order.
pub fn prev(pos: Position) -> &'static [Position] {
    let idx = &*GRAPH_INDEX;
    let (start, end) = idx.prev_offsets[pos as usize];
    &idx.prev[start as usize..end as usize]
}

/// Returns true if a piece can step directly from `src` to `dst`.
pub fn is_edge(src: Position, dst: Position) -> bool {
    next(src).contains(&dst)
}
