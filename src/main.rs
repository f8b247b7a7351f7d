//! Ludo-Engine command line.
//!
//! ## Usage
//!
//! - `ludo-engine` - Play a seeded demo match
//! - `ludo-engine play` - Simulate a match between selector-driven players
//! - `ludo-engine train` - Train a Q-table and write it to disk
//! - `ludo-engine lookup` - Read one value from a Q-table file

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use ludo_engine::constants::{ALPHA, GAMMA, ITERATIONS, PLAYERS, QTABLE_FILE};
use ludo_engine::dice::FairDice;
use ludo_engine::game::{GameState, MatchConfig, Theme, TurnOutcome};
use ludo_engine::player::PlayerColor;
use ludo_engine::qlearning::{QLearning, TrainerConfig};
use ludo_engine::qtable::QTable;
use ludo_engine::selector::{FirstCandidate, MoveSelector, RandomSelector};

/// Ludo-Engine: rules engine and Q-learning trainer for Ludo
#[derive(Parser)]
#[command(name = "ludo-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a match between selector-driven players
    Play {
        /// Seats taking part
        #[arg(long, value_delimiter = ',', default_value = "yellow,red,green,blue")]
        players: Vec<PlayerColor>,
        /// Disable stars, globes, and safe start cells
        #[arg(long)]
        regular: bool,
        #[arg(long, default_value = "plain")]
        theme: Theme,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = SelectorKind::Random)]
        selector: SelectorKind,
        /// Give up after this many rolls
        #[arg(long, default_value_t = 1_000_000)]
        max_rolls: usize,
        /// Print every turn
        #[arg(long)]
        verbose: bool,
    },
    /// Train a Q-table on the abstract track and write it to disk
    Train {
        #[arg(long, default_value_t = ITERATIONS)]
        iterations: u64,
        #[arg(long, default_value_t = ALPHA)]
        alpha: f64,
        #[arg(long, default_value_t = GAMMA)]
        gamma: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = QTABLE_FILE)]
        output: PathBuf,
        /// Print the table after training
        #[arg(long)]
        print: bool,
    },
    /// Read one value from a Q-table file
    Lookup {
        #[arg(long, default_value = QTABLE_FILE)]
        table: PathBuf,
        /// Die face (1-6)
        #[arg(long)]
        face: usize,
        /// Cell on the abstract track
        #[arg(long)]
        cell: usize,
    },
    /// Play a seeded four-player match and print the ranking
    Demo,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SelectorKind {
    First,
    Random,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = ludo_engine::logging::init(&cli.log_level).context("starting logger")?;

    match cli.command {
        Some(Commands::Play {
            players,
            regular,
            theme,
            seed,
            selector,
            max_rolls,
            verbose,
        }) => {
            let config = MatchConfig {
                players,
                special_board: !regular,
                theme,
                auto: [true; PLAYERS],
            };
            run_match(&config, seed, selector, max_rolls, verbose)
        }
        Some(Commands::Train {
            iterations,
            alpha,
            gamma,
            seed,
            output,
            print,
        }) => train(
            TrainerConfig {
                alpha,
                gamma,
                iterations,
                seed,
            },
            output,
            print,
        ),
        Some(Commands::Lookup { table, face, cell }) => {
            if !(1..=6).contains(&face) {
                bail!("die face must be between 1 and 6, got {face}");
            }
            let value = QTable::lookup(&table, face - 1, cell)
                .with_context(|| format!("reading {}", table.display()))?;
            println!("{value}");
            Ok(())
        }
        Some(Commands::Demo) | None => {
            run_match(&MatchConfig::default(), Some(2014), SelectorKind::Random, 1_000_000, false)
        }
    }
}

fn run_match(
    config: &MatchConfig,
    seed: Option<u64>,
    kind: SelectorKind,
    max_rolls: usize,
    verbose: bool,
) -> Result<()> {
    if config.players.is_empty() {
        bail!("at least one player is required");
    }
    let dice = match seed {
        Some(s) => FairDice::with_seed(s),
        None => FairDice::new(),
    };
    let mut selector: Box<dyn MoveSelector> = match (kind, seed) {
        (SelectorKind::First, _) => Box::new(FirstCandidate),
        (SelectorKind::Random, Some(s)) => Box::new(RandomSelector::with_seed(s.wrapping_add(1))),
        (SelectorKind::Random, None) => Box::new(RandomSelector::default()),
    };

    let mut game = GameState::new(config, dice);
    info!(
        "new match: {} players, {} board, {} theme",
        config.players.len(),
        if config.special_board { "special" } else { "regular" },
        game.theme()
    );

    for _ in 0..max_rolls {
        match game.play_turn(selector.as_mut()) {
            TurnOutcome::GameOver => break,
            TurnOutcome::Passed { player, roll } if verbose => {
                println!("{} rolls {} and passes", game.player(player).color(), roll.value());
            }
            TurnOutcome::Moved {
                player,
                roll,
                token,
            } if verbose => {
                let p = game.player(player);
                println!(
                    "{} rolls {} and moves token {token} to {}",
                    p.color(),
                    roll.value(),
                    p.token(token).state()
                );
            }
            _ => {}
        }
    }

    if game.is_playing() {
        bail!("match still running after {max_rolls} rolls");
    }
    println!("Results:\n");
    print!("{}", game.results());
    println!(
        "\n{} turns, {} rolls",
        game.turn_count(),
        game.dice_roll_count()
    );
    Ok(())
}

fn train(config: TrainerConfig, output: PathBuf, print: bool) -> Result<()> {
    let mut trainer = QLearning::new(config);
    let table = trainer.learn();
    if print {
        print!("{}", table.to_pretty_string());
    }
    table
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}
