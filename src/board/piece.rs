//! Players, piece handles and piece stacks.
//!
//! A stack is one or more pieces of the same player travelling together. It
//! is identified by the handle of the piece that first occupied it; pieces
//! that ride along give up their own handle.

use serde::{Deserialize, Serialize};

/// One of the two sides in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

/// All players in turn order.
pub const ALL_PLAYERS: [Player; 2] = [Player::Red, Player::Blue];

impl Player {
    /// Returns the lowercase player name.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }

    /// Parses a player from its lowercase name.
    pub fn from_name(name: &str) -> Option<Player> {
        match name {
            "red" => Some(Player::Red),
            "blue" => Some(Player::Blue),
            _ => None,
        }
    }

    /// Returns the side this player captures and is captured by.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque handle for a piece. The presentation layer keeps its own mapping
/// from handles to whatever it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pieces of one player sharing a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stack {
    pub id: PieceId,
    /// Number of pieces in the stack, always at least 1.
    pub level: u8,
}

impl Stack {
    /// A stack holding a single piece.
    pub const fn single(id: PieceId) -> Self {
        Stack { id, level: 1 }
    }
}
