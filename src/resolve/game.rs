//! Turn context and move application.
//!
//! `Game` is the explicit owner of everything one game's moves mutate: the
//! ledger, the active player, the unused rolls and the count of finished
//! pieces. Callers throw, ask for targets, and commit moves; the game picks
//! the cheapest roll for the chosen destination, computes the route and
//! settles captures, piggybacks and scoring on the ledger.

use std::collections::BTreeSet;

use crate::board::{Ledger, LedgerError, PieceId, Player, Position, Roll, Stack, ALL_PLAYERS, FINISH};
use crate::config::RulesConfig;
use crate::movegen::{
    cheapest_scoring_target, cheapest_target, compute_targets_with, find_route, Route, TargetNode,
};

/// What the active player is expected to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Throw,
    Move,
}

impl Phase {
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Throw => "throw",
            Phase::Move => "move",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The piece a player wants to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// A piece from the reserve, entering at the finishing hub.
    New,
    /// The player's stack standing on a position.
    At(Position),
}

impl Selection {
    /// The origin handed to target generation.
    pub const fn origin(self) -> Option<Position> {
        match self {
            Selection::New => None,
            Selection::At(p) => Some(p),
        }
    }
}

/// Where the selected piece should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    To(Position),
    /// Leave the board through the finishing hub.
    Score,
}

/// The active player's state within the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub player: Player,
    pub phase: Phase,
    /// Unused rolls, in the order thrown.
    pub rolls: Vec<Roll>,
    /// Throws the player still has to make before moving.
    pub throws_owed: u8,
}

impl Turn {
    fn start(player: Player) -> Self {
        Turn {
            player,
            phase: Phase::Throw,
            rolls: Vec::new(),
            throws_owed: 1,
        }
    }
}

/// How a committed move changed the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The stack moved onto an empty position.
    Advance,
    /// The stack landed on an opposing stack and sent it back to the reserve.
    Capture { victim: Player, level: u8 },
    /// The stack joined a stack of its own side.
    Piggyback { level: u8 },
    /// The stack left the board and its pieces are finished.
    Score { level: u8 },
}

/// Record of one committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: Player,
    pub selection: Selection,
    pub target: TargetNode,
    pub route: Route,
    pub effect: Effect,
}

/// Reasons a requested action cannot be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("expected the {expected} phase, but it is the {actual} phase")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("{0} has no pieces left in reserve")]
    NoReserve(Player),

    #[error("{player} has no stack at '{position}'")]
    NotOwned { player: Player, position: Position },

    #[error("no unused roll reaches '{0}'")]
    Unreachable(Position),

    #[error("no unused roll finishes the selected stack")]
    NothingToScore,

    #[error("no legal route from '{from}' to '{to}'")]
    NoRoute { from: Position, to: Position },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    rules: RulesConfig,
    ledger: Ledger,
    turn: Turn,
    finished: [u32; 2],
    next_piece: u16,
}

impl Game {
    /// Starts a game with `Player::Red` to throw first.
    pub fn new(rules: RulesConfig) -> Self {
        Game {
            rules,
            ledger: Ledger::new(),
            turn: Turn::start(Player::Red),
            finished: [0; 2],
            next_piece: 0,
        }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    /// Pieces `player` has brought home.
    pub fn finished(&self, player: Player) -> u32 {
        self.finished[player.index()]
    }

    /// Pieces `player` has neither on the board nor home.
    pub fn reserve(&self, player: Player) -> u32 {
        self.ledger
            .reserve(player, self.rules.pieces_per_player, self.finished(player))
    }

    /// The first player to bring every piece home.
    pub fn winner(&self) -> Option<Player> {
        ALL_PLAYERS
            .iter()
            .copied()
            .find(|p| self.finished(*p) >= self.rules.pieces_per_player)
    }

    /// Records a throw of the sticks for the active player.
    pub fn throw(&mut self, roll: Roll) -> Result<(), MoveError> {
        self.expect_phase(Phase::Throw)?;
        self.turn.rolls.push(roll);
        self.turn.throws_owed = self.turn.throws_owed.saturating_sub(1);
        if roll.grants_extra_throw() {
            self.turn.throws_owed += 1;
        }
        tracing::debug!(player = %self.turn.player, %roll, owed = self.turn.throws_owed, "throw");
        self.settle_turn();
        Ok(())
    }

    /// The moves the active player could choose from right now.
    pub fn selections(&self) -> Vec<Selection> {
        let player = self.turn.player;
        let mut out = Vec::new();
        if self.reserve(player) > 0 {
            out.push(Selection::New);
        }
        out.extend(self.ledger.stacks(player).map(|(pos, _)| Selection::At(pos)));
        out
    }

    /// Destinations reachable by `selection` with the unused rolls.
    pub fn targets(&self, selection: Selection) -> Result<BTreeSet<TargetNode>, MoveError> {
        self.check_selection(selection)?;
        Ok(compute_targets_with(
            selection.origin(),
            &self.turn.rolls,
            self.rules.finish_rule,
        ))
    }

    /// Every (selection, target) pair available to the active player.
    pub fn legal_moves(&self) -> Vec<(Selection, TargetNode)> {
        self.selections()
            .into_iter()
            .flat_map(|sel| {
                compute_targets_with(sel.origin(), &self.turn.rolls, self.rules.finish_rule)
                    .into_iter()
                    .map(move |t| (sel, t))
            })
            .collect()
    }

    /// Commits a move of `selection` and settles its effect on the board.
    pub fn play(&mut self, selection: Selection, choice: Choice) -> Result<MoveOutcome, MoveError> {
        self.expect_phase(Phase::Move)?;
        let targets = self.targets(selection)?;
        let target = match choice {
            Choice::To(p) => cheapest_target(&targets, p).ok_or(MoveError::Unreachable(p))?,
            Choice::Score => cheapest_scoring_target(&targets).ok_or(MoveError::NothingToScore)?,
        };
        self.commit(selection, target)
    }

    /// Commits a move to one specific target, spending exactly its roll.
    ///
    /// `target` must be one of `targets(selection)`; its scoring flag is
    /// taken from there.
    pub fn play_target(
        &mut self,
        selection: Selection,
        target: TargetNode,
    ) -> Result<MoveOutcome, MoveError> {
        self.expect_phase(Phase::Move)?;
        let target = self
            .targets(selection)?
            .get(&target)
            .copied()
            .ok_or(MoveError::Unreachable(target.position))?;
        self.commit(selection, target)
    }

    fn commit(&mut self, selection: Selection, target: TargetNode) -> Result<MoveOutcome, MoveError> {
        let start = selection.origin().unwrap_or(FINISH);
        let route = find_route(start, target.position, start).ok_or(MoveError::NoRoute {
            from: start,
            to: target.position,
        })?;

        let player = self.turn.player;
        let effect = self.apply(player, selection, target)?;

        if let Some(i) = self.turn.rolls.iter().position(|r| *r == target.roll) {
            self.turn.rolls.remove(i);
        }
        if matches!(effect, Effect::Capture { .. }) && self.rules.capture_bonus {
            self.turn.throws_owed += 1;
        }

        let outcome = MoveOutcome {
            player,
            selection,
            target,
            route,
            effect,
        };
        tracing::debug!(
            %player,
            ?selection,
            to = %target.position,
            roll = %target.roll,
            ?effect,
            "move"
        );
        self.settle_turn();
        Ok(outcome)
    }

    /// Updates the ledger for `player` moving `selection` to `target`.
    fn apply(
        &mut self,
        player: Player,
        selection: Selection,
        target: TargetNode,
    ) -> Result<Effect, MoveError> {
        let moving = match selection {
            Selection::At(pos) => self.owned_stack(player, pos)?,
            Selection::New => Stack::single(self.issue_piece()),
        };

        if target.scoring {
            if let Selection::At(pos) = selection {
                self.ledger.remove(pos, player);
            }
            self.finished[player.index()] += u32::from(moving.level);
            return Ok(Effect::Score { level: moving.level });
        }

        let dest = target.position;
        match self.ledger.find_piece(dest) {
            Some((owner, carrier)) if owner == player => {
                let grown = match selection {
                    Selection::At(_) => self.ledger.merge(moving.id, carrier.id)?,
                    Selection::New => self.ledger.reinforce(carrier.id, moving.level)?,
                };
                Ok(Effect::Piggyback { level: grown.level })
            }
            Some((owner, victim)) => {
                self.ledger.remove(dest, owner);
                self.land(player, selection, moving, dest)?;
                Ok(Effect::Capture {
                    victim: owner,
                    level: victim.level,
                })
            }
            None => {
                self.land(player, selection, moving, dest)?;
                Ok(Effect::Advance)
            }
        }
    }

    /// Puts the moving stack on an empty `dest`.
    fn land(
        &mut self,
        player: Player,
        selection: Selection,
        moving: Stack,
        dest: Position,
    ) -> Result<(), MoveError> {
        match selection {
            Selection::At(pos) => {
                if !self.ledger.reassign(moving.id, dest, player) {
                    return Err(MoveError::NotOwned { player, position: pos });
                }
                Ok(())
            }
            Selection::New => Ok(self.ledger.place(moving, dest, player)?),
        }
    }

    fn issue_piece(&mut self) -> PieceId {
        let id = PieceId(self.next_piece);
        self.next_piece = self.next_piece.wrapping_add(1);
        id
    }

    fn owned_stack(&self, player: Player, position: Position) -> Result<Stack, MoveError> {
        match self.ledger.find_piece(position) {
            Some((owner, stack)) if owner == player => Ok(stack),
            _ => Err(MoveError::NotOwned { player, position }),
        }
    }

    fn check_selection(&self, selection: Selection) -> Result<(), MoveError> {
        let player = self.turn.player;
        match selection {
            Selection::New if self.reserve(player) == 0 => Err(MoveError::NoReserve(player)),
            Selection::New => Ok(()),
            Selection::At(pos) => self.owned_stack(player, pos).map(|_| ()),
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), MoveError> {
        if self.winner().is_some() {
            return Err(MoveError::GameOver);
        }
        if self.turn.phase != expected {
            return Err(MoveError::WrongPhase {
                expected,
                actual: self.turn.phase,
            });
        }
        Ok(())
    }

    /// Moves the turn forward after a throw or a move: more throws, more
    /// moves, or the next player. Rolls no selection can use are dropped.
    fn settle_turn(&mut self) {
        if self.winner().is_some() {
            return;
        }
        if self.turn.throws_owed > 0 {
            self.turn.phase = Phase::Throw;
            return;
        }
        self.turn.phase = Phase::Move;
        if !self.turn.rolls.is_empty() && self.legal_moves().is_empty() {
            tracing::debug!(
                player = %self.turn.player,
                rolls = ?self.turn.rolls,
                "no legal move, rolls forfeited"
            );
            self.turn.rolls.clear();
        }
        if self.turn.rolls.is_empty() {
            self.turn = Turn::start(self.turn.player.opponent());
        }
    }
}
