//! Ludo-Engine: rules engine and Q-learning trainer for four-player Ludo.
//!
//! This crate implements the full turn state machine of a Ludo match (token
//! movement, captures, special tiles, win detection) and an offline trainer
//! that produces a value table for move selectors.
//!
//! ## Modules
//!
//! - [`constants`] - Track geometry, tile layouts, and trainer parameters
//! - [`token`] - Token state and track arithmetic
//! - [`board`] - Special-tile layout
//! - [`player`] - Per-seat movement rules
//! - [`game`] - Turn orchestration, captures, and rankings
//! - [`dice`] - Dice sources
//! - [`selector`] - Move selectors
//! - [`qlearning`] - Offline Q-learning trainer
//! - [`qtable`] - The learned table and its file format
//! - [`logging`] - Logger setup
//!
//! ## Example
//!
//! ```
//! use ludo_engine::dice::FairDice;
//! use ludo_engine::game::{GameState, MatchConfig};
//! use ludo_engine::selector::RandomSelector;
//!
//! let config = MatchConfig {
//!     auto: [true; 4],
//!     ..MatchConfig::default()
//! };
//! let mut game = GameState::new(&config, FairDice::with_seed(1));
//! let mut selector = RandomSelector::with_seed(2);
//!
//! // Play until every seat has brought all four tokens home.
//! assert!(game.play_to_end(&mut selector, 1_000_000));
//! print!("{}", game.results());
//! ```

pub mod board;
pub mod constants;
pub mod dice;
pub mod game;
pub mod logging;
pub mod player;
pub mod qlearning;
pub mod qtable;
pub mod selector;
pub mod token;
