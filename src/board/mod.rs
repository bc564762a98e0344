//! Board representation.
//!
//! Contains the fixed station layout, the directed movement graph, stick
//! rolls, pieces and the ledger recording which stack stands where.

pub mod graph;
pub mod ledger;
pub mod piece;
pub mod position;
pub mod roll;

pub use graph::{is_edge, next, prev, Edge, EDGES, EDGE_COUNT};
pub use ledger::{Ledger, LedgerError};
pub use piece::{PieceId, Player, Stack, ALL_PLAYERS};
pub use position::{
    Diagonal, Position, PositionInfo, PositionSet, Region, ALL_POSITIONS, FINISH,
    PERIMETER_COUNT, POSITION_COUNT, POSITION_INFO,
};
pub use roll::{Roll, ALL_ROLLS, STICK_COUNT};
