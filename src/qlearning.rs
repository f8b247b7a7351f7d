//! Offline Q-learning over an abstract single-token track.
//!
//! The trainer does not play real matches. A lone token walks a linear track
//! of [`BOARDLENGTH`] cells, rolling a fair die each step. Rolls that would
//! overshoot the last cell bounce back from it, and reaching the last cell
//! starts a new walk from cell 0. Every step applies the tabular update
//!
//! ```text
//! Q[i][d] = (1 - alpha) * Q[i][d] + alpha * (r + gamma * max_d' Q[i'][d'])
//! ```
//!
//! where `i'` is the landing cell and `r` the reward for the raw sum `i + d`.
//! The resulting [`QTable`] is fully determined by the seed.

use log::{debug, info};

use crate::board::Board;
use crate::constants::{
    ALPHA, BOARDLENGTH, GAMMA, ITERATIONS, LASTSQUARE, PENALTY_CELL, REPORT_PERIOD, REWARD_GOAL,
    REWARD_PENALTY, REWARD_SPECIAL, SIX,
};
use crate::qtable::QTable;

/// Hyperparameters for a training run.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainerConfig {
    pub alpha: f64,
    pub gamma: f64,
    pub iterations: u64,
    /// Seed for the die; `None` draws one from system entropy.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            alpha: ALPHA,
            gamma: GAMMA,
            iterations: ITERATIONS,
            seed: None,
        }
    }
}

/// Cell reached from a raw sum, reflecting off the last cell.
#[inline]
pub fn landing(sum: usize) -> usize {
    if sum < BOARDLENGTH {
        sum
    } else {
        LASTSQUARE - (sum - LASTSQUARE)
    }
}

pub struct QLearning {
    config: TrainerConfig,
    board: Board,
    table: QTable,
    rng: fastrand::Rng,
    /// Current cell of the walking token.
    cell: usize,
}

impl QLearning {
    pub fn new(config: TrainerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            config,
            board: Board::new(true),
            table: QTable::new(),
            rng,
            cell: 0,
        }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    /// Reward for a roll whose raw sum is `sum`.
    ///
    /// The last cell is checked first, then stars and globes, then the
    /// penalty cell.
    pub fn reward(&self, sum: usize) -> f64 {
        if sum == LASTSQUARE {
            return REWARD_GOAL;
        }
        let special = u8::try_from(sum)
            .map(|c| self.board.is_star(c) || self.board.is_globe(c))
            .unwrap_or(false);
        if special {
            REWARD_SPECIAL
        } else if sum == PENALTY_CELL {
            REWARD_PENALTY
        } else {
            0.0
        }
    }

    /// Apply one update for rolling `face` from `cell` and return the cell
    /// the next step starts from.
    pub fn update(&mut self, cell: usize, face: u8) -> usize {
        let sum = cell + face as usize;
        let next = landing(sum);
        let r = self.reward(sum);
        let target = r + self.config.gamma * self.table.max_action(next);

        let alpha = self.config.alpha;
        let q = self.table.get_mut(cell, face);
        *q = (1.0 - alpha) * *q + alpha * target;

        if next == LASTSQUARE { 0 } else { next }
    }

    /// Roll once and update.
    pub fn step(&mut self) {
        let face = self.rng.u8(1..=SIX);
        self.cell = self.update(self.cell, face);
    }

    /// Run the configured number of steps and return the table.
    pub fn learn(&mut self) -> &QTable {
        info!(
            "training {} steps (alpha={}, gamma={})",
            self.config.iterations, self.config.alpha, self.config.gamma
        );
        for cnt in 0..self.config.iterations {
            self.step();
            if cnt > 0 && cnt % REPORT_PERIOD == 0 {
                debug!("step {cnt}: Q[0] max {:.4}", self.table.max_action(0));
            }
        }
        info!("training done, Q[0] max {:.4}", self.table.max_action(0));
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer(iterations: u64, seed: u64) -> QLearning {
        QLearning::new(TrainerConfig {
            iterations,
            seed: Some(seed),
            ..TrainerConfig::default()
        })
    }

    #[test]
    fn test_landing_reflects() {
        assert_eq!(landing(10), 10);
        assert_eq!(landing(LASTSQUARE), LASTSQUARE);
        assert_eq!(landing(LASTSQUARE + 1), LASTSQUARE - 1);
        assert_eq!(landing(59), 53);
    }

    #[test]
    fn test_rewards() {
        let t = trainer(0, 1);
        assert_eq!(t.reward(LASTSQUARE), REWARD_GOAL);
        assert_eq!(t.reward(5), REWARD_SPECIAL);
        assert_eq!(t.reward(8), REWARD_SPECIAL);
        assert_eq!(t.reward(3), 0.0);
        assert_eq!(t.reward(60), 0.0);
        // 50 is also a star, which takes precedence.
        assert_eq!(t.reward(PENALTY_CELL), REWARD_SPECIAL);
    }

    #[test]
    fn test_update_rule() {
        let mut t = trainer(0, 1);
        assert_eq!(t.update(50, 6), 0);
        assert!((t.table().get(50, 6) - ALPHA * REWARD_GOAL).abs() < 1e-15);

        assert_eq!(t.update(0, 5), 5);
        assert!((t.table().get(0, 5) - ALPHA * REWARD_SPECIAL).abs() < 1e-15);

        assert_eq!(t.update(53, 6), 53);
        assert_eq!(t.table().get(53, 6), 0.0);
    }

    #[test]
    fn test_update_discounts_next_cell() {
        let mut t = trainer(0, 1);
        t.update(51, 5);
        let before = t.table().max_action(51);
        assert!(before > 0.0);
        assert_eq!(t.update(49, 2), 51);
        let expected = ALPHA * GAMMA * before;
        assert!((t.table().get(49, 2) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_same_seed_same_table() {
        let mut a = trainer(50_000, 9);
        let mut b = trainer(50_000, 9);
        assert_eq!(a.learn(), b.learn());
    }

    #[test]
    fn test_learning_rewards_goal_rolls() {
        let mut t = trainer(200_000, 11);
        let table = t.learn();
        assert!(table.get(LASTSQUARE - 6, 6) > 0.0);
        assert!(table.get(LASTSQUARE - 1, 1) > 0.0);
        for cell in 0..BOARDLENGTH {
            for face in 1..=6 {
                let v = table.get(cell, face);
                assert!(
                    v.is_finite() && v.abs() <= REWARD_GOAL / (1.0 - GAMMA),
                    "Q[{cell}][{face}] = {v}"
                );
            }
        }
    }
}
