//! Yutnori movement engine speaking a line-oriented text protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Diagnostics go
//! to stderr through `tracing`; set `RUST_LOG` to adjust verbosity.
//!
//! Usage: yutnori [--rules <file.json>]

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use yutnori::config::RulesConfig;
use yutnori::engine::Engine;
use yutnori::protocol::parser::{parse_command, Command};
use yutnori::resolve::Choice;

fn parse_args() -> Result<RulesConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut rules = RulesConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rules" => {
                i += 1;
                let path = args.get(i).ok_or("--rules requires a file path")?;
                rules = RulesConfig::from_json_file(&PathBuf::from(path))
                    .map_err(|e| format!("{}: {}", path, e))?;
            }
            "--help" | "-h" => {
                eprintln!("Usage: yutnori [--rules <file.json>]");
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(rules)
}

/// Runs the protocol loop until `quit` or end of input.
fn run(engine: &mut Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let Some(cmd) = parse_command(&line?) else {
            continue;
        };

        match cmd {
            Command::Yut => engine.handle_yut(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    tracing::warn!("setoption: {}", e);
                }
            }
            Command::NewGame => engine.new_game(),
            Command::Throw { roll } => engine.handle_throw(roll, &mut out)?,
            Command::Targets { selection } => engine.handle_targets(selection, &mut out)?,
            Command::Move { selection, to } => {
                engine.handle_move(selection, Choice::To(to), &mut out)?
            }
            Command::Score { selection } => {
                engine.handle_move(selection, Choice::Score, &mut out)?
            }
            Command::Route { from, to } => engine.handle_route(from, to, &mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let rules = match parse_args() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let mut engine = Engine::new(rules);
    if let Err(e) = run(&mut engine) {
        tracing::error!("i/o error: {}", e);
        process::exit(1);
    }
}
