//! Ownership ledger: which stack of which player stands where.
//!
//! Occupation is exclusive across players, so the ledger stores at most one
//! `(player, stack)` pair per position in a fixed array indexed by
//! `Position as usize`. This is the player -> position -> stack mapping with
//! the exclusivity invariant built into its shape.

use super::piece::{PieceId, Player, Stack};
use super::position::{Position, ALL_POSITIONS, POSITION_COUNT};

/// Errors raised by ledger mutations whose preconditions do not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("position '{0}' is already occupied")]
    Occupied(Position),

    #[error("piece {0} is already on the board")]
    AlreadyTracked(PieceId),

    #[error("piece {0} is not on the board")]
    UnknownPiece(PieceId),

    #[error("pieces {0} and {1} belong to different players")]
    DifferentOwners(PieceId, PieceId),

    #[error("piece {0} cannot ride on itself")]
    SelfMerge(PieceId),

    #[error("stack {0} cannot hold more pieces")]
    LevelOverflow(PieceId),
}

/// Piece stacks on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    cells: [Option<(Player, Stack)>; POSITION_COUNT],
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger {
            cells: [None; POSITION_COUNT],
        }
    }

    /// Records a new single-piece stack for `player` at `position`.
    pub fn assign(
        &mut self,
        piece: PieceId,
        position: Position,
        player: Player,
    ) -> Result<(), LedgerError> {
        self.place(Stack::single(piece), position, player)
    }

    /// Records an existing stack, keeping its level.
    pub fn place(
        &mut self,
        stack: Stack,
        position: Position,
        player: Player,
    ) -> Result<(), LedgerError> {
        if self.cells[position as usize].is_some() {
            return Err(LedgerError::Occupied(position));
        }
        if self.find_position(stack.id).is_some() {
            return Err(LedgerError::AlreadyTracked(stack.id));
        }
        self.cells[position as usize] = Some((player, Stack { level: stack.level.max(1), ..stack }));
        Ok(())
    }

    /// Moves `player`'s stack identified by `piece` to `new_position`.
    ///
    /// Returns false and leaves the ledger unchanged if the piece is not
    /// tracked for that player or the destination holds another stack.
    pub fn reassign(&mut self, piece: PieceId, new_position: Position, player: Player) -> bool {
        let from = match self.position_of(piece, player) {
            Some(p) => p,
            None => return false,
        };
        if from == new_position {
            return true;
        }
        if self.cells[new_position as usize].is_some() {
            return false;
        }
        self.cells[new_position as usize] = self.cells[from as usize].take();
        true
    }

    /// Piggybacks `rider` onto `carrier`: the carrier's level grows by the
    /// rider's and the rider stops being tracked. Returns the grown stack.
    pub fn merge(&mut self, rider: PieceId, carrier: PieceId) -> Result<Stack, LedgerError> {
        if rider == carrier {
            return Err(LedgerError::SelfMerge(rider));
        }
        let rider_pos = self.find_position(rider).ok_or(LedgerError::UnknownPiece(rider))?;
        let carrier_pos = self
            .find_position(carrier)
            .ok_or(LedgerError::UnknownPiece(carrier))?;
        let (rider_owner, rider_stack) = self.cells[rider_pos as usize].ok_or(LedgerError::UnknownPiece(rider))?;
        let (carrier_owner, _) = self.cells[carrier_pos as usize].ok_or(LedgerError::UnknownPiece(carrier))?;
        if rider_owner != carrier_owner {
            return Err(LedgerError::DifferentOwners(rider, carrier));
        }
        let grown = self.reinforce(carrier, rider_stack.level)?;
        self.cells[rider_pos as usize] = None;
        Ok(grown)
    }

    /// Adds `levels` pieces to the stack identified by `carrier`. Used when a
    /// piece entering from the reserve lands on its own side's stack.
    pub fn reinforce(&mut self, carrier: PieceId, levels: u8) -> Result<Stack, LedgerError> {
        let pos = self
            .find_position(carrier)
            .ok_or(LedgerError::UnknownPiece(carrier))?;
        match &mut self.cells[pos as usize] {
            Some((_, stack)) => {
                stack.level = stack
                    .level
                    .checked_add(levels)
                    .ok_or(LedgerError::LevelOverflow(carrier))?;
                Ok(*stack)
            }
            None => Err(LedgerError::UnknownPiece(carrier)),
        }
    }

    /// Detaches whatever stack `player` has at `position`.
    pub fn remove(&mut self, position: Position, player: Player) -> Option<Stack> {
        match self.cells[position as usize] {
            Some((owner, stack)) if owner == player => {
                self.cells[position as usize] = None;
                Some(stack)
            }
            _ => None,
        }
    }

    /// Reverse lookup across all players.
    pub fn find_position(&self, piece: PieceId) -> Option<Position> {
        self.cells
            .iter()
            .position(|c| matches!(c, Some((_, s)) if s.id == piece))
            .and_then(Position::from_index)
    }

    /// Returns the owner and stack standing at `position`.
    pub fn find_piece(&self, position: Position) -> Option<(Player, Stack)> {
        self.cells[position as usize]
    }

    /// Number of pieces `player` has on the board, stacked pieces included.
    pub fn stack_count(&self, player: Player) -> u32 {
        self.stacks(player).map(|(_, s)| u32::from(s.level)).sum()
    }

    /// Pieces of `player` neither on the board nor accounted for in
    /// `finished`, out of `total`.
    pub fn reserve(&self, player: Player, total: u32, finished: u32) -> u32 {
        total.saturating_sub(self.stack_count(player) + finished)
    }

    /// Iterates over `player`'s stacks in position order.
    pub fn stacks(&self, player: Player) -> impl Iterator<Item = (Position, Stack)> + '_ {
        self.cells
            .iter()
            .zip(ALL_POSITIONS)
            .filter_map(move |(cell, pos)| match cell {
                Some((owner, stack)) if *owner == player => Some((pos, *stack)),
                _ => None,
            })
    }

    /// Total number of stacks on the board.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Position of `piece` if it belongs to `player`.
    fn position_of(&self, piece: PieceId, player: Player) -> Option<Position> {
        self.stacks(player)
            .find(|(_, s)| s.id == piece)
            .map(|(pos, _)| pos)
    }
}
