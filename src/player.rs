//! Players and their tokens.
//!
//! A [`Player`] owns its four tokens by value and tracks which of them are
//! out of home. All movement rules that concern a single player live here:
//! leaving home, moving along the track, entering the final stretch, goal
//! retirement, and special-tile effects. Interactions between players
//! (captures, turn order) belong to [`crate::game`].

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::board::Board;
use crate::constants::{PLAYERS, TOKENS};
use crate::token::{TokenIndex, Token, reaches_final, relative_distance, start_cell};

/// Index of a seat around the board (0..4).
pub type PlayerIndex = usize;

/// Seat colors, in seat order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerColor {
    Yellow,
    Red,
    Green,
    Blue,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; PLAYERS] = [
        PlayerColor::Yellow,
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Blue,
    ];

    /// Seat index of this color.
    pub fn index(self) -> PlayerIndex {
        match self {
            PlayerColor::Yellow => 0,
            PlayerColor::Red => 1,
            PlayerColor::Green => 2,
            PlayerColor::Blue => 3,
        }
    }

    pub fn from_index(index: PlayerIndex) -> Self {
        Self::ALL[index]
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Yellow => "yellow",
            PlayerColor::Red => "red",
            PlayerColor::Green => "green",
            PlayerColor::Blue => "blue",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a configuration value given as text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown player color: {0}")]
    UnknownColor(String),
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}

impl FromStr for PlayerColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerColor::ALL
            .into_iter()
            .find(|c| s.trim().eq_ignore_ascii_case(c.name()))
            .ok_or_else(|| ParseError::UnknownColor(s.to_string()))
    }
}

/// One seat in a match.
#[derive(Clone, Debug)]
pub struct Player {
    color: PlayerColor,
    index: PlayerIndex,
    /// Participating in the current match.
    active: bool,
    /// Driven by a move selector rather than externally.
    auto: bool,
    /// Granted another action (six or globe).
    bonus_turn: bool,
    /// Number of retired tokens.
    goal: u8,
    /// Tokens on the board, in the order they left home.
    tokens_out: Vec<TokenIndex>,
    tokens: [Token; TOKENS],
}

impl Player {
    pub fn new(color: PlayerColor) -> Self {
        Self {
            color,
            index: color.index(),
            active: false,
            auto: false,
            bonus_turn: false,
            goal: 0,
            tokens_out: Vec::with_capacity(TOKENS),
            tokens: [Token::new(); TOKENS],
        }
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn index(&self) -> PlayerIndex {
        self.index
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn set_auto(&mut self, auto: bool) {
        self.auto = auto;
    }

    pub fn has_bonus_turn(&self) -> bool {
        self.bonus_turn
    }

    pub fn set_bonus_turn(&mut self, bonus: bool) {
        self.bonus_turn = bonus;
    }

    pub fn goal(&self) -> u8 {
        self.goal
    }

    pub fn has_finished(&self) -> bool {
        self.goal as usize == TOKENS
    }

    pub fn tokens_out(&self) -> &[TokenIndex] {
        &self.tokens_out
    }

    pub fn token(&self, t: TokenIndex) -> &Token {
        &self.tokens[t]
    }

    pub fn tokens(&self) -> &[Token; TOKENS] {
        &self.tokens
    }

    /// Put all tokens back home and clear per-match counters.
    pub fn reset(&mut self) {
        self.tokens = [Token::new(); TOKENS];
        self.tokens_out.clear();
        self.goal = 0;
        self.bonus_turn = false;
    }

    /// Move a home token to this seat's start cell.
    pub fn start(&mut self, t: TokenIndex) {
        assert!(self.tokens[t].is_home(), "token {t} is not at home");
        self.tokens[t].place(start_cell(self.index));
        self.tokens_out.push(t);
    }

    /// Move token `t` by the dice result, following every movement rule that
    /// concerns this player alone.
    pub fn move_selected_token(&mut self, t: TokenIndex, dice: u8) {
        if self.tokens[t].is_home() {
            self.start(t);
            self.bonus_turn = false;
            return;
        }
        let token = &mut self.tokens[t];
        match token.track_cell() {
            Some(cell) => {
                let distance = relative_distance(cell, self.index) + dice;
                if reaches_final(distance) {
                    token.enter_final(distance);
                } else {
                    token.move_by(dice);
                }
            }
            None => token.move_by(dice),
        }
        self.check_goal(t);
    }

    /// Retire token `t` if it sits on the goal cell and is still counted out.
    pub fn check_goal(&mut self, t: TokenIndex) {
        if !self.tokens[t].is_retired() {
            return;
        }
        if let Some(i) = self.tokens_out.iter().position(|&x| x == t) {
            self.tokens_out.remove(i);
            self.goal += 1;
            trace!("{} token {t} reached the goal ({} in)", self.color, self.goal);
        }
    }

    /// Apply the effect of the tile token `t` stands on.
    pub fn check_special(&mut self, t: TokenIndex, board: &Board) {
        if !board.is_special() {
            return;
        }
        let token = &mut self.tokens[t];
        let Some(cell) = token.track_cell() else {
            return;
        };
        token.set_safe(false);

        if board.is_star(cell) {
            loop {
                token.move_by(1);
                match token.track_cell() {
                    Some(c) if board.is_star(c) => break,
                    _ => {}
                }
            }
            trace!("{} token {t} jumps star {cell} -> {}", self.color, token.state());
        } else if board.is_globe(cell) {
            self.bonus_turn = true;
            trace!("{} token {t} on globe {cell}", self.color);
        } else if cell == board.start_of(self.index) {
            token.set_safe(true);
            trace!("{} token {t} safe on start {cell}", self.color);
        }
    }

    /// Send token `t` home after a capture. Final-stretch tokens are immune.
    ///
    /// Returns whether the token was sent home.
    pub fn out_of_board(&mut self, t: TokenIndex) -> bool {
        if self.tokens[t].is_on_final() {
            return false;
        }
        self.tokens[t].send_home();
        self.tokens_out.retain(|&x| x != t);
        true
    }
}
