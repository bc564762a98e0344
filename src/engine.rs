//! Engine state management.
//!
//! Holds the rules, the game in progress and the random source for stick
//! throws, and answers protocol commands by writing response lines.

use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Position, Roll};
use crate::config::{ConfigError, RulesConfig};
use crate::movegen::find_route;
use crate::protocol::notation::{format_outcome, format_route, format_state, format_targets};
use crate::resolve::{Choice, Game, MoveError, Selection};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    /// Rules applied by the next `newgame`.
    pub rules: RulesConfig,
    pub game: Game,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(RulesConfig::default())
    }
}

impl Engine {
    /// Creates an engine with a fresh game under `rules`.
    pub fn new(rules: RulesConfig) -> Self {
        Engine {
            game: Game::new(rules.clone()),
            rules,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Starts a new game with the current rules.
    pub fn new_game(&mut self) {
        self.game = Game::new(self.rules.clone());
    }

    /// Sets an engine option. `Seed` reseeds the stick throws; every other
    /// name is a rule and takes effect at the next `newgame`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.unwrap_or("");
        if name == "Seed" {
            let seed: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
            })?;
            self.rng = SmallRng::seed_from_u64(seed);
            return Ok(());
        }
        self.rules.set_option(name, value)
    }

    /// Handles the handshake: writes id, options and `yutok`.
    pub fn handle_yut<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name {}", env!("CARGO_PKG_NAME"))?;
        writeln!(out, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        writeln!(
            out,
            "option name Pieces type spin default {} min 1 max {}",
            self.rules.pieces_per_player,
            crate::config::MAX_PIECES
        )?;
        writeln!(
            out,
            "option name FinishRule type combo default {} var pass var reach var exact",
            self.rules.finish_rule.name()
        )?;
        writeln!(
            out,
            "option name CaptureBonus type check default {}",
            self.rules.capture_bonus
        )?;
        writeln!(
            out,
            "option name StickBias type string default {}",
            self.rules.flat_probability
        )?;
        writeln!(out, "option name Seed type string")?;
        writeln!(out, "yutok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `throw`, drawing a random roll when none is given.
    pub fn handle_throw<W: Write>(&mut self, roll: Option<Roll>, out: &mut W) -> io::Result<()> {
        let roll =
            roll.unwrap_or_else(|| Roll::throw(&mut self.rng, self.game.rules().flat_probability));
        match self.game.throw(roll) {
            Ok(()) => {
                let turn = self.game.turn();
                writeln!(
                    out,
                    "rolled {} turn {} phase {}",
                    roll.name(),
                    turn.player,
                    turn.phase.name()
                )?;
            }
            Err(e) => reject(out, &e)?,
        }
        out.flush()
    }

    /// Handles `targets <sel>`.
    pub fn handle_targets<W: Write>(&self, selection: Selection, out: &mut W) -> io::Result<()> {
        match self.game.targets(selection) {
            Ok(targets) => writeln!(out, "targets {}", format_targets(&targets))?,
            Err(e) => reject(out, &e)?,
        }
        out.flush()
    }

    /// Handles `move <sel> <pos>` and `score <sel>`.
    pub fn handle_move<W: Write>(
        &mut self,
        selection: Selection,
        choice: Choice,
        out: &mut W,
    ) -> io::Result<()> {
        match self.game.play(selection, choice) {
            Ok(outcome) => {
                writeln!(out, "moved {}", format_outcome(&outcome))?;
                if let Some(winner) = self.game.winner() {
                    writeln!(out, "winner {}", winner)?;
                }
            }
            Err(e) => reject(out, &e)?,
        }
        out.flush()
    }

    /// Handles `route <from> <to>` for a piece starting its roll at `from`.
    pub fn handle_route<W: Write>(&self, from: Position, to: Position, out: &mut W) -> io::Result<()> {
        let route = find_route(from, to, from);
        writeln!(out, "route {}", format_route(route.as_ref()))?;
        out.flush()
    }

    /// Handles `state`.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "state {}", format_state(&self.game))?;
        out.flush()
    }
}

/// Reports a refused action to the client.
fn reject<W: Write>(out: &mut W, err: &MoveError) -> io::Result<()> {
    tracing::warn!("rejected: {}", err);
    writeln!(out, "error {}", err)
}
