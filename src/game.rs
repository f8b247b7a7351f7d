//! Turn orchestration for a match.
//!
//! [`GameState`] owns the board, the dice, and all four seats. A turn is
//! driven in two steps:
//!
//! 1. [`GameState::roll_and_check_active_tokens`] rolls for the current
//!    player and collects the tokens that may move, then
//!    [`GameState::check_move_or_pass`] either waits for a move or passes.
//! 2. [`GameState::select_and_move`] applies the chosen move, resolves
//!    captures and special tiles, records finishers, and hands the turn on.
//!
//! The current seat is always `x_players[turn % x_players.len()]`, so play
//! rotates round-robin over whichever seats are still in the match.

use std::fmt;
use std::str::FromStr;

use log::{debug, info, trace};

use crate::board::Board;
use crate::constants::{PLAYERS, TOKENS};
use crate::dice::{Dice, DiceRoll, FairDice};
use crate::player::{ParseError, Player, PlayerColor, PlayerIndex};
use crate::selector::MoveSelector;
use crate::token::TokenIndex;

/// Visual theme chosen for the match. Carried for the front end only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Plain,
    Solid,
    Fruits,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Plain, Theme::Solid, Theme::Fruits];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Plain => "plain",
            Theme::Solid => "solid",
            Theme::Fruits => "fruits",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| s.trim().eq_ignore_ascii_case(t.name()))
            .ok_or_else(|| ParseError::UnknownTheme(s.to_string()))
    }
}

/// Settings for a new match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Seats taking part. Order does not matter.
    pub players: Vec<PlayerColor>,
    /// Enable stars, globes, and safe start cells.
    pub special_board: bool,
    pub theme: Theme,
    /// Per-seat flag for selector-driven play.
    pub auto: [bool; PLAYERS],
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            players: PlayerColor::ALL.to_vec(),
            special_board: true,
            theme: Theme::Plain,
            auto: [false; PLAYERS],
        }
    }
}

/// What happened during one call to [`GameState::play_turn`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The match is over; nothing was rolled.
    GameOver,
    /// No token could move.
    Passed {
        player: PlayerIndex,
        roll: DiceRoll,
    },
    /// A token was moved.
    Moved {
        player: PlayerIndex,
        roll: DiceRoll,
        token: TokenIndex,
    },
    /// The current seat is not selector-driven and must pick from
    /// [`GameState::candidates`] through [`GameState::select_and_move`].
    AwaitingMove { player: PlayerIndex, roll: DiceRoll },
}

/// The full state of one match.
pub struct GameState {
    board: Board,
    dice: Box<dyn Dice>,
    players: [Player; PLAYERS],
    theme: Theme,
    current_player: PlayerIndex,
    /// Turns handed on since the match started.
    turn: usize,
    /// Waiting for a roll (true) or for a move (false).
    dice_roller: bool,
    playing: bool,
    /// Seats still in the match, sorted ascending.
    x_players: Vec<PlayerIndex>,
    /// Tokens the current player may move with the last roll.
    x_tokens: Vec<TokenIndex>,
    /// Seats in the order they finished.
    winners: Vec<PlayerIndex>,
    results: String,
    roll: Option<DiceRoll>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&MatchConfig::default(), FairDice::new())
    }
}

impl GameState {
    /// Start a match with the given seats and dice.
    ///
    /// # Panics
    /// Panics if `config.players` is empty.
    pub fn new(config: &MatchConfig, dice: impl Dice + 'static) -> Self {
        assert!(!config.players.is_empty(), "a match needs at least one player");

        let players = PlayerColor::ALL.map(|color| {
            let mut p = Player::new(color);
            p.set_active(config.players.contains(&color));
            p.set_auto(config.auto[color.index()]);
            p
        });
        let x_players: Vec<PlayerIndex> = players
            .iter()
            .filter(|p| p.is_active())
            .map(Player::index)
            .collect();

        Self {
            board: Board::new(config.special_board),
            dice: Box::new(dice),
            players,
            theme: config.theme,
            current_player: x_players[0],
            turn: 0,
            dice_roller: true,
            playing: true,
            x_players,
            x_tokens: Vec::with_capacity(TOKENS),
            winners: Vec::with_capacity(PLAYERS),
            results: String::new(),
            roll: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn players(&self) -> &[Player; PLAYERS] {
        &self.players
    }

    pub fn player(&self, p: PlayerIndex) -> &Player {
        &self.players[p]
    }

    pub fn player_by_color(&self, color: PlayerColor) -> &Player {
        &self.players[color.index()]
    }

    pub fn current_player(&self) -> PlayerIndex {
        self.current_player
    }

    /// Seats still in the match, ascending.
    pub fn x_players(&self) -> &[PlayerIndex] {
        &self.x_players
    }

    /// Tokens offered for the last roll.
    pub fn candidates(&self) -> &[TokenIndex] {
        &self.x_tokens
    }

    pub fn winners(&self) -> &[PlayerIndex] {
        &self.winners
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True while waiting for a roll, false while waiting for a move.
    pub fn is_awaiting_roll(&self) -> bool {
        self.dice_roller
    }

    pub fn turn_count(&self) -> usize {
        self.turn
    }

    pub fn last_roll(&self) -> Option<DiceRoll> {
        self.roll
    }

    pub fn dice_roll_count(&self) -> u64 {
        self.dice.roll_count()
    }

    /// Final ranking, one line per place. Empty until the match ends.
    pub fn results(&self) -> &str {
        &self.results
    }

    fn seat_for_turn(&self) -> PlayerIndex {
        self.x_players[self.turn % self.x_players.len()]
    }

    /// Roll for the next seat and collect the tokens it may move.
    ///
    /// A six offers every token that has not retired; any other face offers
    /// only tokens already on the board. Returns `None` once the match is over.
    pub fn roll_and_check_active_tokens(&mut self) -> Option<DiceRoll> {
        if !self.playing {
            return None;
        }
        self.current_player = self.seat_for_turn();
        let roll = self.dice.roll_for(self.current_player);
        self.roll = Some(roll);
        self.x_tokens.clear();

        let player = &mut self.players[self.current_player];
        debug!("{} rolls {}", player.color(), roll.value());
        if roll.is_six() {
            player.set_bonus_turn(true);
            self.x_tokens.extend(
                player
                    .tokens()
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| !t.is_retired())
                    .map(|(i, _)| i),
            );
        } else {
            player.set_bonus_turn(false);
            self.x_tokens.extend_from_slice(player.tokens_out());
        }
        Some(roll)
    }

    /// Wait for a move if any token can move, otherwise pass to the next seat.
    ///
    /// Returns whether a move is now awaited.
    pub fn check_move_or_pass(&mut self) -> bool {
        if self.x_tokens.is_empty() {
            debug!("{} passes", self.players[self.current_player].color());
            self.turn += 1;
        } else {
            self.dice_roller = false;
        }
        if self.playing {
            self.current_player = self.seat_for_turn();
        }
        !self.dice_roller
    }

    /// Move token `t` of the current player with the last roll.
    ///
    /// Retired tokens are ignored.
    ///
    /// # Panics
    /// Panics if nothing has been rolled yet or `t` is not a token index.
    pub fn select_and_move(&mut self, t: TokenIndex) {
        assert!(t < TOKENS, "token index {t} out of range");
        let Some(roll) = self.roll else {
            panic!("select_and_move called before any roll");
        };
        let p = self.current_player;
        if self.players[p].token(t).is_retired() {
            return;
        }

        self.players[p].move_selected_token(t, roll.value());
        if !self.players[p].token(t).is_on_final() {
            self.check_other_tokens(p, t);
            if self.board.is_special() {
                self.players[p].check_special(t, &self.board);
            }
        }
        debug!(
            "{} moves token {t} to {}",
            self.players[p].color(),
            self.players[p].token(t).state()
        );

        let mut anchored = false;
        if self.players[p].has_finished() && !self.winners.contains(&p) {
            self.winners.push(p);
            self.x_players.retain(|&x| x != p);
            info!(
                "{} finishes in place {}",
                self.players[p].color(),
                self.winners.len()
            );
            if self.x_players.is_empty() {
                self.finish();
            } else {
                // The seat after the finisher plays next, bonus or not.
                self.turn = self.x_players.partition_point(|&x| x < p);
                anchored = true;
            }
        }

        if !anchored && !self.players[p].has_bonus_turn() {
            self.turn += 1;
        }
        self.dice_roller = true;
        if self.playing {
            self.current_player = self.seat_for_turn();
        }
    }

    /// Send home every opposing token sharing the moved token's cell.
    fn check_other_tokens(&mut self, p: PlayerIndex, t: TokenIndex) {
        let Some(cell) = self.players[p].token(t).track_cell() else {
            return;
        };
        for i in 0..self.x_players.len() {
            let q = self.x_players[i];
            if q == p {
                continue;
            }
            for j in 0..TOKENS {
                let other = self.players[q].token(j);
                if other.track_cell() == Some(cell) && !other.is_safe() {
                    self.players[q].out_of_board(j);
                    trace!(
                        "{} token {t} captures {} token {j} on {cell}",
                        self.players[p].color(),
                        self.players[q].color()
                    );
                }
            }
        }
    }

    fn finish(&mut self) {
        self.playing = false;
        self.results = self
            .winners
            .iter()
            .enumerate()
            .map(|(i, &w)| format!("{} place - {} player\n", i + 1, self.players[w].color()))
            .collect();
        info!("game over after {} turns", self.turn);
    }

    /// Ask `selector` for a token and move it.
    pub fn auto_move(&mut self, selector: &mut dyn MoveSelector) -> TokenIndex {
        let t = selector.select_token(self);
        self.select_and_move(t);
        t
    }

    /// Roll, then either pass or let `selector` move.
    ///
    /// Seats without the auto flag stop at [`TurnOutcome::AwaitingMove`].
    /// While that move is pending no new roll is made.
    pub fn play_turn(&mut self, selector: &mut dyn MoveSelector) -> TurnOutcome {
        if !self.playing {
            return TurnOutcome::GameOver;
        }
        let roll = match self.roll {
            Some(roll) if !self.dice_roller => roll,
            _ => {
                let Some(roll) = self.roll_and_check_active_tokens() else {
                    return TurnOutcome::GameOver;
                };
                let player = self.current_player;
                if !self.check_move_or_pass() {
                    return TurnOutcome::Passed { player, roll };
                }
                roll
            }
        };

        let player = self.current_player;
        if !self.players[player].is_auto() {
            return TurnOutcome::AwaitingMove { player, roll };
        }
        let token = self.auto_move(selector);
        TurnOutcome::Moved {
            player,
            roll,
            token,
        }
    }

    /// Play turns until the match ends, a seat without the auto flag has to
    /// move, or `max_rolls` rolls have been made.
    ///
    /// Returns whether the match ended.
    pub fn play_to_end(&mut self, selector: &mut dyn MoveSelector, max_rolls: usize) -> bool {
        for _ in 0..max_rolls {
            match self.play_turn(selector) {
                TurnOutcome::GameOver | TurnOutcome::AwaitingMove { .. } => break,
                _ => {}
            }
        }
        !self.playing
    }

    /// Hand a seat to the selector (`true`) or to the driver (`false`).
    pub fn set_auto(&mut self, color: PlayerColor, auto: bool) {
        self.players[color.index()].set_auto(auto);
    }

    /// Put every active seat back at the start of a fresh match.
    pub fn restart(&mut self) {
        for p in self.players.iter_mut().filter(|p| p.is_active()) {
            p.reset();
        }
        self.x_players = self
            .players
            .iter()
            .filter(|p| p.is_active())
            .map(Player::index)
            .collect();
        self.x_tokens.clear();
        self.winners.clear();
        self.results.clear();
        self.roll = None;
        self.turn = 0;
        self.dice_roller = true;
        self.playing = !self.x_players.is_empty();
        if let Some(&first) = self.x_players.first() {
            self.current_player = first;
        }
    }

    /// Bring an inactive seat into the match with fresh tokens.
    pub fn add_player(&mut self, color: PlayerColor) {
        let p = color.index();
        if self.players[p].is_active() {
            return;
        }
        self.players[p].reset();
        self.players[p].set_active(true);
        if let Err(i) = self.x_players.binary_search(&p) {
            self.x_players.insert(i, p);
        }
        self.anchor_turn();
        if !self.playing {
            self.playing = true;
            self.results.clear();
        }
    }

    /// Take a seat out of the match. Ends the match if no seat remains.
    pub fn remove_player(&mut self, color: PlayerColor) {
        let p = color.index();
        self.players[p].set_active(false);
        self.x_players.retain(|&x| x != p);
        if self.x_players.is_empty() {
            if self.playing {
                self.finish();
            }
            return;
        }
        if p == self.current_player {
            self.dice_roller = true;
            self.x_tokens.clear();
        }
        self.anchor_turn();
    }

    /// Point the turn counter at the current seat, or at the next seat after
    /// it if the current seat left.
    fn anchor_turn(&mut self) {
        let current = self.current_player;
        self.turn = self.x_players.partition_point(|&x| x < current);
        self.current_player = self.seat_for_turn();
    }
}
