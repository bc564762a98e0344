//! Command parser for the engine's stdin protocol.
//!
//! Parses incoming lines into structured `Command` variants that the main
//! loop dispatches on. Lines that cannot be parsed are logged and dropped.

use crate::board::{Position, Roll};
use crate::resolve::Selection;

use super::notation::{parse_position, parse_roll, parse_selection};

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Yut,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a fresh game with the current rules.
    NewGame,

    /// Throw the sticks, or record a given result.
    Throw { roll: Option<Roll> },

    /// List where a selection can go with the unused rolls.
    Targets { selection: Selection },

    /// Move a selection to a destination.
    Move {
        selection: Selection,
        to: Position,
    },

    /// Finish a selection through the home hub.
    Score { selection: Selection },

    /// Ask for the path between two stations.
    Route { from: Position, to: Position },

    /// Print the whole game.
    State,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines, unknown commands and malformed arguments.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "yut" => Some(Command::Yut),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "state" => Some(Command::State),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(args),
        "throw" => parse_throw(args),
        "targets" => parse_targets(args),
        "move" => parse_move(args),
        "score" => parse_score(args),
        "route" => parse_route(args),

        other => {
            tracing::warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }
    let rest = &args[1..];
    let (name_parts, value) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => {
            let value = &rest[vi + 1..];
            let value = (!value.is_empty()).then(|| value.join(" "));
            (&rest[..vi], value)
        }
        None => (rest, None),
    };
    if name_parts.is_empty() {
        tracing::warn!("malformed setoption: empty name");
        return None;
    }
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `throw [<roll>]`.
fn parse_throw(args: &[&str]) -> Option<Command> {
    match args {
        [] => Some(Command::Throw { roll: None }),
        [token] => match parse_roll(token) {
            Ok(roll) => Some(Command::Throw { roll: Some(roll) }),
            Err(e) => {
                tracing::warn!("malformed throw: {}", e);
                None
            }
        },
        _ => {
            tracing::warn!("malformed throw: expected 'throw [<roll>]'");
            None
        }
    }
}

/// Parses `targets <sel>`.
fn parse_targets(args: &[&str]) -> Option<Command> {
    let [sel] = args else {
        tracing::warn!("malformed targets: expected 'targets <sel>'");
        return None;
    };
    logged(parse_selection(sel)).map(|selection| Command::Targets { selection })
}

/// Parses `move <sel> <pos>`.
fn parse_move(args: &[&str]) -> Option<Command> {
    let [sel, to] = args else {
        tracing::warn!("malformed move: expected 'move <sel> <pos>'");
        return None;
    };
    let selection = logged(parse_selection(sel))?;
    let to = logged(parse_position(to))?;
    Some(Command::Move { selection, to })
}

/// Parses `score <sel>`.
fn parse_score(args: &[&str]) -> Option<Command> {
    let [sel] = args else {
        tracing::warn!("malformed score: expected 'score <sel>'");
        return None;
    };
    logged(parse_selection(sel)).map(|selection| Command::Score { selection })
}

/// Parses `route <from> <to>`.
fn parse_route(args: &[&str]) -> Option<Command> {
    let [from, to] = args else {
        tracing::warn!("malformed route: expected 'route <from> <to>'");
        return None;
    };
    let from = logged(parse_position(from))?;
    let to = logged(parse_position(to))?;
    Some(Command::Route { from, to })
}

fn logged<T, E: std::fmt::Display>(result: Result<T, E>) -> Option<T> {
    result
        .map_err(|e| tracing::warn!("malformed command: {}", e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("yut"), Some(Command::Yut));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("state"), Some(Command::State));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name FinishRule value exact"),
            Some(Command::SetOption {
                name: "FinishRule".to_string(),
                value: Some("exact".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        assert_eq!(
            parse_command("setoption name CaptureBonus"),
            Some(Command::SetOption {
                name: "CaptureBonus".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_throw_variants() {
        assert_eq!(parse_command("throw"), Some(Command::Throw { roll: None }));
        assert_eq!(
            parse_command("throw 3"),
            Some(Command::Throw {
                roll: Some(Roll::Geol)
            })
        );
        assert_eq!(
            parse_command("throw mo"),
            Some(Command::Throw { roll: Some(Roll::Mo) })
        );
        assert_eq!(parse_command("throw 9"), None);
        assert_eq!(parse_command("throw 1 2"), None);
    }

    #[test]
    fn parse_targets_selection() {
        assert_eq!(
            parse_command("targets new"),
            Some(Command::Targets {
                selection: Selection::New
            })
        );
        assert_eq!(
            parse_command("targets tr"),
            Some(Command::Targets {
                selection: Selection::At(TopRight)
            })
        );
        assert_eq!(parse_command("targets"), None);
        assert_eq!(parse_command("targets xx"), None);
    }

    #[test]
    fn parse_move_and_score() {
        assert_eq!(
            parse_command("move r2 tr"),
            Some(Command::Move {
                selection: Selection::At(Right2),
                to: TopRight
            })
        );
        assert_eq!(
            parse_command("score c"),
            Some(Command::Score {
                selection: Selection::At(Center)
            })
        );
        assert_eq!(parse_command("move r2"), None);
        assert_eq!(parse_command("move r2 new"), None);
    }

    #[test]
    fn parse_route_positions() {
        assert_eq!(
            parse_command("route tl br"),
            Some(Command::Route {
                from: TopLeft,
                to: BottomRight
            })
        );
        assert_eq!(parse_command("route tl"), None);
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  yut  "), Some(Command::Yut));
        assert_eq!(parse_command("  isready  "), Some(Command::IsReady));
    }
}
