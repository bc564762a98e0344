//! Compact text notation for selections, targets, routes and game state.
//!
//! Positions use their short abbreviations (`br`, `r1`, `tr1`, `c`, ...).
//! A piece still in the reserve is written `new`. Lists are separated by
//! commas inside a field and by spaces between fields; an empty list is `-`.
//!
//! ```text
//! targets r3/gae br/mo/score
//! moved new r3 geol path br,r1,r2,r3 advance
//! route tl,tl1,tl2,c
//! state turn red phase move rolls gae,yut board r3=red1,t2=blue2 reserve 2,3 home 1,0
//! ```

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::board::{Player, Position, Roll, ALL_PLAYERS};
use crate::movegen::{Route, TargetNode};
use crate::resolve::{Effect, Game, MoveOutcome, Selection};

/// Token for a piece that has not entered the board.
pub const NEW_PIECE: &str = "new";

/// Errors from parsing notation tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("unknown position '{0}'")]
    UnknownPosition(String),

    #[error("unknown roll '{0}'")]
    UnknownRoll(String),
}

/// Parses a position abbreviation.
pub fn parse_position(token: &str) -> Result<Position, NotationError> {
    Position::from_abbr(token).ok_or_else(|| NotationError::UnknownPosition(token.to_string()))
}

/// Parses `new` or a position abbreviation.
pub fn parse_selection(token: &str) -> Result<Selection, NotationError> {
    if token == NEW_PIECE {
        return Ok(Selection::New);
    }
    parse_position(token).map(Selection::At)
}

/// Parses a roll by name (`do`, `gae`, ...) or by the number of sticks
/// that landed flat side up (`0`-`4`).
pub fn parse_roll(token: &str) -> Result<Roll, NotationError> {
    if let Some(roll) = Roll::from_name(token) {
        return Ok(roll);
    }
    token
        .parse::<u8>()
        .ok()
        .and_then(Roll::from_flat_count)
        .ok_or_else(|| NotationError::UnknownRoll(token.to_string()))
}

pub fn format_selection(selection: Selection) -> String {
    match selection {
        Selection::New => NEW_PIECE.to_string(),
        Selection::At(p) => p.abbr().to_string(),
    }
}

/// Formats one target as `pos/roll`, with a `/score` suffix when scoring.
pub fn format_target(target: &TargetNode) -> String {
    let mut s = format!("{}/{}", target.position.abbr(), target.roll.name());
    if target.scoring {
        s.push_str("/score");
    }
    s
}

pub fn format_targets(targets: &BTreeSet<TargetNode>) -> String {
    if targets.is_empty() {
        return "-".to_string();
    }
    targets.iter().map(format_target).collect::<Vec<_>>().join(" ")
}

/// Formats a route as comma-joined abbreviations, or `none`.
pub fn format_route(route: Option<&Route>) -> String {
    match route {
        Some(r) => join_positions(&r.path),
        None => "none".to_string(),
    }
}

fn join_positions(path: &[Position]) -> String {
    path.iter().map(|p| p.abbr()).collect::<Vec<_>>().join(",")
}

fn format_effect(effect: Effect) -> String {
    match effect {
        Effect::Advance => "advance".to_string(),
        Effect::Capture { victim, level } => format!("capture {} {}", victim, level),
        Effect::Piggyback { level } => format!("stack {}", level),
        Effect::Score { level } => format!("score {}", level),
    }
}

/// Formats a committed move for the `moved` response.
pub fn format_outcome(outcome: &MoveOutcome) -> String {
    format!(
        "{} {} {} path {} {}",
        format_selection(outcome.selection),
        outcome.target.position.abbr(),
        outcome.target.roll.name(),
        join_positions(&outcome.route.path),
        format_effect(outcome.effect),
    )
}

fn format_rolls(rolls: &[Roll]) -> String {
    if rolls.is_empty() {
        return "-".to_string();
    }
    rolls.iter().map(|r| r.name()).collect::<Vec<_>>().join(",")
}

fn per_player(f: impl Fn(Player) -> u32) -> String {
    ALL_PLAYERS
        .iter()
        .map(|p| f(*p).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats the whole game for the `state` response. Per-player counts are
/// listed red first.
pub fn format_state(game: &Game) -> String {
    let turn = game.turn();
    let mut out = format!(
        "turn {} phase {} rolls {}",
        turn.player,
        turn.phase.name(),
        format_rolls(&turn.rolls)
    );

    let mut board = Vec::new();
    for player in ALL_PLAYERS {
        for (pos, stack) in game.ledger().stacks(player) {
            board.push((pos, format!("{}={}{}", pos.abbr(), player, stack.level)));
        }
    }
    board.sort_by_key(|(pos, _)| *pos);
    let cells: Vec<String> = board.into_iter().map(|(_, cell)| cell).collect();
    let cells = if cells.is_empty() {
        "-".to_string()
    } else {
        cells.join(",")
    };

    let _ = write!(
        out,
        " board {} reserve {} home {}",
        cells,
        per_player(|p| game.reserve(p)),
        per_player(|p| game.finished(p)),
    );
    if let Some(winner) = game.winner() {
        let _ = write!(out, " winner {}", winner);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::movegen::{compute_targets, find_route};
    use crate::resolve::Choice;
    use Position::*;

    #[test]
    fn selections_parse() {
        assert_eq!(parse_selection("new"), Ok(Selection::New));
        assert_eq!(parse_selection("tl2"), Ok(Selection::At(TopLeftDiag2)));
        assert_eq!(
            parse_selection("zz"),
            Err(NotationError::UnknownPosition("zz".to_string()))
        );
    }

    #[test]
    fn rolls_parse_by_name_or_flat_count() {
        assert_eq!(parse_roll("geol"), Ok(Roll::Geol));
        assert_eq!(parse_roll("0"), Ok(Roll::Mo));
        assert_eq!(parse_roll("4"), Ok(Roll::Yut));
        assert!(parse_roll("5").is_err());
        assert!(parse_roll("back-do").is_err());
    }

    #[test]
    fn target_list_formats() {
        let targets = compute_targets(Some(Bottom3), &[Roll::Gae, Roll::Mo]);
        assert_eq!(format_targets(&targets), "br/gae br/mo/score");
        assert_eq!(format_targets(&BTreeSet::new()), "-");
    }

    #[test]
    fn route_formats() {
        let route = find_route(TopLeft, Center, TopLeft);
        assert_eq!(format_route(route.as_ref()), "tl,tl1,tl2,c");
        assert_eq!(format_route(None), "none");
    }

    #[test]
    fn fresh_state_formats() {
        let game = Game::new(RulesConfig::default());
        assert_eq!(
            format_state(&game),
            "turn red phase throw rolls - board - reserve 4,4 home 0,0"
        );
    }

    #[test]
    fn outcome_and_state_after_a_move() {
        let mut game = Game::new(RulesConfig::default());
        game.throw(Roll::Yut).unwrap();
        game.throw(Roll::Geol).unwrap();
        let outcome = game.play(Selection::New, Choice::To(Right3)).unwrap();
        assert_eq!(format_outcome(&outcome), "new r3 geol path br,r1,r2,r3 advance");
        assert_eq!(
            format_state(&game),
            "turn red phase move rolls yut board r3=red1 reserve 3,4 home 0,0"
        );
    }
}
