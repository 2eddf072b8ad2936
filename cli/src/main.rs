// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triangular peg solitaire in the terminal
//!
//! Reads hole ids from stdin and forwards them to the game controller as taps. The board is
//! redrawn from the controller's display intents, or with `--json` the intents themselves are
//! printed one per line so another program can act as the presentation layer.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tripeg_cli::config::{self, CliConfig};
use tripeg_cli::render::TerminalView;
use tripeg_core::adapter::present;
use tripeg_core::{DisplayIntent, GameController, HoleId, Phase};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "tripeg",
    about = "Triangular peg solitaire",
    version
)]
struct Args {
    /// Number of rows on the board (overrides the config file)
    #[clap(short, long)]
    rows: Option<usize>,

    /// Hole to take out at the start (overrides the config file)
    #[clap(short, long)]
    first: Option<usize>,

    /// Path to a TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Taps to replay before reading stdin, e.g. `--moves 0,3,0`
    #[clap(long, value_delimiter = ',')]
    moves: Vec<usize>,

    /// Print display intents as JSON lines instead of drawing the board
    #[clap(long)]
    json: bool,

    /// Hide hole ids on the board
    #[clap(long)]
    no_ids: bool,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Tap(HoleId),
    NewGame(Option<usize>),
    Help,
    Quit,
}

fn parse_command(input: &str) -> Result<Command> {
    let input = input.trim().to_lowercase();
    let mut words = input.split_whitespace();

    match words.next() {
        Some("quit") | Some("exit") | Some("q") => Ok(Command::Quit),
        Some("help") | Some("?") => Ok(Command::Help),
        Some("new") => {
            let rows = words
                .next()
                .map(|w| w.parse::<usize>().with_context(|| format!("Invalid row count '{}'", w)))
                .transpose()?;
            Ok(Command::NewGame(rows))
        }
        Some(word) => word
            .parse::<usize>()
            .map(|id| Command::Tap(HoleId(id)))
            .map_err(|_| anyhow!("Expected a hole id, 'new [rows]', 'help' or 'quit', got '{}'", word)),
        None => Err(anyhow!("Empty input")),
    }
}

/// The terminal side of the game: owns the controller and whatever is on screen
struct Shell {
    game: GameController,
    view: TerminalView,
    json: bool,
}

impl Shell {
    fn new(rows: usize, show_ids: bool, json: bool) -> Result<Self> {
        let mut shell = Self {
            game: GameController::new(rows)?,
            view: TerminalView::new(show_ids),
            json,
        };
        let intents = shell.game.settle();
        shell.show(&intents)?;
        Ok(shell)
    }

    fn show(&mut self, intents: &[DisplayIntent]) -> Result<()> {
        if self.json {
            for intent in intents {
                println!("{}", serde_json::to_string(intent).context("Failed to encode intent")?);
            }
            return Ok(());
        }

        present(intents, &mut self.view);
        println!("\n{}", self.view.render(self.game.board()));
        println!("Pegs left: {} of {}", self.game.remaining_pegs(), self.game.total_peg_count());
        Ok(())
    }

    fn tap(&mut self, hole: HoleId) -> Result<()> {
        if !self.game.on_gesture(hole) {
            if !self.json {
                println!("Hole {} can't be picked right now", hole);
            }
            return Ok(());
        }

        let intents = self.game.settle();
        self.show(&intents)?;

        if self.game.phase() == Phase::GameOver && !self.json {
            println!("Type 'new' to play again or 'quit' to leave.");
        }
        Ok(())
    }

    fn new_game(&mut self, rows: Option<usize>) -> Result<()> {
        let rows = rows.unwrap_or_else(|| self.game.board().num_rows());
        if rows > config::MAX_ROWS {
            return Err(anyhow!("Board can have at most {} rows", config::MAX_ROWS));
        }

        self.game.new_game(rows)?;
        self.view.clear();
        let intents = self.game.settle();
        self.show(&intents)
    }

    /// Returns false when the player wants to leave
    fn handle(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Tap(hole) => self.tap(hole)?,
            Command::NewGame(rows) => self.new_game(rows)?,
            Command::Help => print_help(),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <id>         tap the hole with that id");
    println!("  new [rows]   start over, optionally with a different board size");
    println!("  help         show this text");
    println!("  quit         leave");
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr so they never interleave with the board or the JSON stream
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_settings(args: &Args) -> Result<CliConfig> {
    let mut settings = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config().unwrap_or_else(|e| {
            tracing::warn!("Using default settings: {:#}", e);
            CliConfig::default()
        }),
    };

    if let Some(rows) = args.rows {
        settings.rows = rows;
        // A first peg from the file may not fit the requested board
        if args.first.is_none() {
            settings.first_peg = None;
        }
    }
    if let Some(first) = args.first {
        settings.first_peg = Some(first);
    }
    if args.no_ids {
        settings.show_ids = false;
    }

    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let settings = load_settings(&args)?;
    tracing::debug!(?settings, "Loaded settings");

    let mut shell = Shell::new(settings.rows, settings.show_ids, args.json)?;

    let scripted = settings.first_peg.into_iter().chain(args.moves.iter().copied());
    for hole in scripted {
        shell.tap(HoleId(hole))?;
    }

    if !args.json {
        println!("Enter a hole id to tap it, or 'help'.");
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match shell.handle(command) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("{:#}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("3").unwrap(), Command::Tap(HoleId(3)));
        assert_eq!(parse_command("  12 \n").unwrap(), Command::Tap(HoleId(12)));
        assert_eq!(parse_command("new").unwrap(), Command::NewGame(None));
        assert_eq!(parse_command("NEW 6").unwrap(), Command::NewGame(Some(6)));
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert_eq!(parse_command("?").unwrap(), Command::Help);
        assert!(parse_command("new lots").is_err());
        assert!(parse_command("-1").is_err());
        assert!(parse_command("jump").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn test_shell_plays_to_the_end() {
        let mut shell = Shell::new(3, true, true).unwrap();
        for hole in [0, 3, 0, 5, 3, 0, 5] {
            shell.tap(HoleId(hole)).unwrap();
        }
        assert_eq!(shell.game.phase(), Phase::GameOver);
        assert_eq!(shell.game.remaining_pegs(), 2);

        assert!(shell.handle(Command::NewGame(Some(4))).unwrap());
        assert_eq!(shell.game.board().len(), 10);
        assert_eq!(shell.game.phase(), Phase::RemoveFirstPeg);
        assert!(!shell.handle(Command::Quit).unwrap());
    }

    #[test]
    fn test_shell_rejects_bad_sizes() {
        let mut shell = Shell::new(3, false, true).unwrap();
        assert!(shell.new_game(Some(1)).is_err());
        assert!(shell.new_game(Some(config::MAX_ROWS + 1)).is_err());
        assert_eq!(shell.game.board().num_rows(), 3);
    }
}
