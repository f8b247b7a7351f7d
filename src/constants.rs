//! Constants for track geometry, special tiles, and trainer parameters.
//!
//! The shared track is circular. Positions advance modulo [`TRACK_WRAP`], and
//! each player leaves the shared track for a private final stretch once the
//! distance travelled from its own start cell reaches [`FINAL_ENTRY`].

// =============================================================================
// Match Layout
// =============================================================================

/// Number of seats around the board.
pub const PLAYERS: usize = 4;

/// Number of tokens owned by each player.
pub const TOKENS: usize = 4;

// =============================================================================
// Track Geometry
// =============================================================================

/// Modulus applied to shared-track positions.
pub const TRACK_WRAP: u8 = 52;

/// Relative distance at which a token leaves the shared track.
pub const FINAL_ENTRY: u8 = 51;

/// Distance between the start cells of consecutive seats.
pub const START_DISTANCE: u8 = 13;

/// Last cell of the final stretch. Reaching it retires the token.
pub const GOAL: u8 = 5;

/// Face that brings a token out of home and grants a bonus action.
pub const SIX: u8 = 6;

// =============================================================================
// Special Tiles
// =============================================================================

/// Start cells, one per seat.
pub const START_TILES: [u8; PLAYERS] = [0, 13, 26, 39];

/// Globe cells. Landing on one grants a bonus action.
pub const GLOBE_TILES: [u8; 4] = [8, 21, 34, 47];

/// Star cells. Landing on one jumps the token to the next star.
pub const STAR_TILES: [u8; 8] = [5, 11, 18, 24, 31, 37, 44, 50];

// =============================================================================
// Q-Learning Parameters
// =============================================================================

/// Length of the abstract single-token track used by the trainer.
pub const BOARDLENGTH: usize = 57;

/// Last cell of the abstract track.
pub const LASTSQUARE: usize = BOARDLENGTH - 1;

/// Number of die faces, one table column per face.
pub const FACES: usize = 6;

/// Learning rate.
pub const ALPHA: f64 = 0.001;

/// Discount factor.
pub const GAMMA: f64 = 0.75;

/// Default number of training steps.
pub const ITERATIONS: u64 = 100_000_000;

/// Progress report period (training steps between log lines).
pub const REPORT_PERIOD: u64 = 10_000_000;

/// Reward for landing exactly on the last cell.
pub const REWARD_GOAL: f64 = 1.0;

/// Reward for landing on a star or a globe.
pub const REWARD_SPECIAL: f64 = 0.1;

/// Abstract-track cell that is penalised.
pub const PENALTY_CELL: usize = 50;

/// Reward for landing on [`PENALTY_CELL`].
pub const REWARD_PENALTY: f64 = -0.5;

/// Default file name for the persisted table.
pub const QTABLE_FILE: &str = "qtable.txt";
