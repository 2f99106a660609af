use anyhow::{Context, Result, bail};
use clap::Parser;
use keeper::{Change, ChangeListener, Direction, GameState, LevelCatalog, parse_moves};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Undo,
    Next,
    Previous,
    Random,
    Restart,
    Quit,
}

impl Command {
    fn from_char(ch: char) -> Option<Command> {
        match ch {
            'w' | 'k' => Some(Command::Move(Direction::Up)),
            's' | 'j' => Some(Command::Move(Direction::Down)),
            'a' | 'h' => Some(Command::Move(Direction::Left)),
            'd' | 'l' => Some(Command::Move(Direction::Right)),
            'u' => Some(Command::Undo),
            'n' => Some(Command::Next),
            'p' => Some(Command::Previous),
            'x' => Some(Command::Random),
            'r' => Some(Command::Restart),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

const HELP: &str = "w/a/s/d or k/h/j/l: move  u: undo  n/p: next/previous level  \
                    x: random level  r: restart  q: quit";

fn print_status(game: &GameState) {
    let (width, height) = game.current_dimensions();
    let status = if game.is_solved() {
        "solved"
    } else if game.completed() {
        "completed earlier"
    } else {
        "unsolved"
    };
    println!(
        "level: {:<3}  size: {}x{}  moves: {:<5}  pushes: {:<5}  {}",
        game.level_index() + 1,
        width,
        height,
        game.move_count(),
        game.push_count(),
        status
    );
}

/// Redraws the board after every change.
struct BoardPrinter;

impl ChangeListener for BoardPrinter {
    fn changed(&mut self, game: &GameState<'_>, change: &Change) {
        if let Change::Loaded { index } = change {
            match game.level_info() {
                Some(info) => println!("\nLevel {}: {}", index + 1, info),
                None => println!("\nLevel {}", index + 1),
            }
        }
        print!("{}", game);
        print_status(game);
    }
}

fn list_levels(catalog: &LevelCatalog) {
    for (index, level) in catalog.iter().enumerate() {
        let (width, height) = catalog.dimensions_of(level);
        println!(
            "level: {:<3}  size: {:>2}x{:<2}  {}",
            index + 1,
            width,
            height,
            level.info().unwrap_or("")
        );
    }
}

fn play(game: &mut GameState, rng: &mut ChaCha8Rng) -> Result<()> {
    game.set_listener(BoardPrinter);
    game.restart().context("failed to load level")?;
    println!("{}", HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
            let Some(command) = Command::from_char(ch) else {
                warn!(%ch, "unknown command");
                println!("{}", HELP);
                continue;
            };

            match command {
                Command::Move(direction) => {
                    game.attempt_move(direction);
                }
                Command::Undo => {
                    if game.undo().is_none() {
                        info!("nothing to undo");
                    }
                }
                Command::Next => game.next_level()?,
                Command::Previous => game.previous_level()?,
                Command::Random => game.random_level(rng)?,
                Command::Restart => game.restart()?,
                Command::Quit => return Ok(()),
            }
        }
        io::stdout().flush().context("failed to flush stdout")?;
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "keeper")]
#[command(about = "Play box-pushing puzzles in the terminal", long_about = None)]
struct Args {
    /// Level number to start on (1-indexed, wraps around the catalog)
    #[arg(value_name = "LEVEL", default_value = "1")]
    level: usize,

    /// List the built-in levels and exit
    #[arg(short, long)]
    list: bool,

    /// Replay a move string (u/d/l/r steps, U/D/L/R pushes), print the result and exit
    #[arg(short, long, value_name = "CODES")]
    moves: Option<String>,

    /// Seed for random level selection
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = LevelCatalog::builtin();

    if args.list {
        list_levels(catalog);
        return Ok(());
    }

    if args.level == 0 {
        bail!("level numbers must be at least 1");
    }

    let mut game = GameState::new(catalog).context("failed to start game")?;
    game.load_level((args.level - 1) % catalog.count())
        .context("failed to load level")?;

    if let Some(codes) = args.moves {
        let actions = parse_moves(&codes).context("invalid move string")?;
        let applied = game.replay(&actions);
        print!("{}", game);
        print_status(&game);
        println!("applied: {}/{}  history: {}", applied, actions.len(), game.move_log());
        return Ok(());
    }

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    play(&mut game, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_keys() {
        assert_eq!(Command::from_char('w'), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::from_char('j'), Some(Command::Move(Direction::Down)));
        assert_eq!(Command::from_char('a'), Some(Command::Move(Direction::Left)));
        assert_eq!(Command::from_char('l'), Some(Command::Move(Direction::Right)));
        assert_eq!(Command::from_char('u'), Some(Command::Undo));
        assert_eq!(Command::from_char('q'), Some(Command::Quit));
        assert_eq!(Command::from_char('?'), None);
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["keeper", "3", "--moves", "uuL", "-vv"]);
        assert_eq!(args.level, 3);
        assert_eq!(args.moves.as_deref(), Some("uuL"));
        assert_eq!(args.verbose, 2);
        assert!(!args.list);

        let args = Args::parse_from(["keeper"]);
        assert_eq!(args.level, 1);
        assert_eq!(args.seed, None);
    }
}
