//! Move selectors.
//!
//! A selector picks one token out of the candidates offered for the current
//! roll. The engine trusts the answer; returning a token outside
//! [`GameState::candidates`] is a contract violation.

use crate::game::GameState;
use crate::token::TokenIndex;

/// Chooses which token the current player moves.
pub trait MoveSelector {
    fn select_token(&mut self, game: &GameState) -> TokenIndex;
}

/// Always moves the first offered candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl MoveSelector for FirstCandidate {
    fn select_token(&mut self, game: &GameState) -> TokenIndex {
        game.candidates()[0]
    }
}

/// Moves a uniformly random candidate.
pub struct RandomSelector {
    rng: fastrand::Rng,
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl RandomSelector {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl MoveSelector for RandomSelector {
    fn select_token(&mut self, game: &GameState) -> TokenIndex {
        let candidates = game.candidates();
        candidates[self.rng.usize(..candidates.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::game::MatchConfig;

    fn rolled_six() -> GameState {
        let mut game = GameState::new(&MatchConfig::default(), ScriptedDice::new([6]));
        game.roll_and_check_active_tokens();
        game
    }

    #[test]
    fn test_first_candidate() {
        let game = rolled_six();
        assert_eq!(FirstCandidate.select_token(&game), 0);
    }

    #[test]
    fn test_random_selector_stays_in_candidates() {
        let game = rolled_six();
        let mut selector = RandomSelector::with_seed(3);
        for _ in 0..100 {
            let t = selector.select_token(&game);
            assert!(game.candidates().contains(&t));
        }
    }
}
