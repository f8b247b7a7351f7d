//! Token state and track geometry.
//!
//! A token is always in exactly one of three places: at home, somewhere on
//! the shared circular track, or on its owner's private final stretch. The
//! final-stretch position [`GOAL`] is the goal cell; a token that reaches it
//! is retired and never moves again.

use std::fmt;

use crate::constants::{FINAL_ENTRY, GOAL, START_DISTANCE, TRACK_WRAP};

/// Index of a token within its owner's token array (0..4).
pub type TokenIndex = usize;

/// Where a token currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TokenState {
    /// In the home area, not on any track.
    #[default]
    Home,
    /// On the shared track at the given absolute cell.
    OnTrack(u8),
    /// On the owner's final stretch at the given offset (0..=GOAL).
    OnFinal(u8),
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenState::Home => write!(f, "home"),
            TokenState::OnTrack(p) => write!(f, "track {p}"),
            TokenState::OnFinal(p) if *p == GOAL => write!(f, "goal"),
            TokenState::OnFinal(p) => write!(f, "final {p}"),
        }
    }
}

/// Shared-track cell where the given seat enters the board.
#[inline]
pub fn start_cell(player: usize) -> u8 {
    (player as u8 % 4) * START_DISTANCE
}

/// Distance travelled from the seat's start cell to `position`.
#[inline]
pub fn relative_distance(position: u8, player: usize) -> u8 {
    (TRACK_WRAP + position - start_cell(player)) % TRACK_WRAP
}

/// Whether travelling `distance` from the start cell ends on the final stretch.
#[inline]
pub fn reaches_final(distance: u8) -> bool {
    distance >= FINAL_ENTRY
}

/// Final-stretch offset after moving `delta` cells from `position`.
///
/// Moves that overshoot the goal bounce back toward the start of the stretch.
#[inline]
pub fn bounce(position: u8, delta: u8) -> u8 {
    let period = 2 * GOAL as u16;
    let x = (position as u16 + delta as u16) % period;
    if x > GOAL as u16 {
        (period - x) as u8
    } else {
        x as u8
    }
}

/// One of a player's four pieces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    state: TokenState,
    /// Immune to capture. Only set on the owner's start cell on a special board.
    safe: bool,
}

impl Token {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> TokenState {
        self.state
    }

    #[inline]
    pub fn is_home(&self) -> bool {
        self.state == TokenState::Home
    }

    #[inline]
    pub fn is_on_final(&self) -> bool {
        matches!(self.state, TokenState::OnFinal(_))
    }

    /// Shared-track cell, if the token is on the shared track.
    #[inline]
    pub fn track_cell(&self) -> Option<u8> {
        match self.state {
            TokenState::OnTrack(p) => Some(p),
            _ => None,
        }
    }

    /// Reached the goal cell and no longer takes part in play.
    #[inline]
    pub fn is_retired(&self) -> bool {
        self.state == TokenState::OnFinal(GOAL)
    }

    /// Left home and not yet retired.
    #[inline]
    pub fn is_out(&self) -> bool {
        !self.is_home() && !self.is_retired()
    }

    #[inline]
    pub fn is_safe(&self) -> bool {
        self.safe
    }

    pub fn set_safe(&mut self, safe: bool) {
        self.safe = safe;
    }

    /// Put the token on the shared track at `cell`.
    pub fn place(&mut self, cell: u8) {
        assert!(cell < TRACK_WRAP, "track cell {cell} out of range");
        self.state = TokenState::OnTrack(cell);
    }

    /// Advance the token by `delta` cells along whichever track it is on.
    ///
    /// # Panics
    /// Panics if the token is at home.
    pub fn move_by(&mut self, delta: u8) {
        self.state = match self.state {
            TokenState::OnTrack(p) => TokenState::OnTrack((p + delta) % TRACK_WRAP),
            TokenState::OnFinal(p) => TokenState::OnFinal(bounce(p, delta)),
            TokenState::Home => panic!("move_by called on a token at home"),
        };
    }

    /// Return the token to its home area. Idempotent.
    pub fn send_home(&mut self) {
        self.state = TokenState::Home;
        self.safe = false;
    }

    /// Move onto the final stretch, given the total distance travelled from
    /// the owner's start cell. The part past the lap becomes the offset.
    pub fn enter_final(&mut self, distance: u8) {
        let offset = distance % FINAL_ENTRY;
        assert!(offset <= GOAL, "final-stretch offset {offset} past goal");
        self.state = TokenState::OnFinal(offset);
        self.safe = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_track(cell: u8) -> Token {
        let mut t = Token::new();
        t.place(cell);
        t
    }

    fn on_final(offset: u8) -> Token {
        let mut t = Token::new();
        t.enter_final(FINAL_ENTRY + offset);
        t
    }

    #[test]
    fn test_new_token_is_home() {
        let t = Token::new();
        assert!(t.is_home());
        assert!(!t.is_out());
        assert!(!t.is_safe());
    }

    #[test]
    fn test_move_on_track() {
        let mut t = on_track(4);
        t.move_by(2);
        assert_eq!(t.state(), TokenState::OnTrack(6));

        let mut t = on_track(14);
        t.move_by(3);
        assert_eq!(t.state(), TokenState::OnTrack(17));
    }

    #[test]
    fn test_move_wraps_track() {
        let mut t = on_track(49);
        t.move_by(5);
        assert_eq!(t.state(), TokenState::OnTrack(2));

        let mut t = on_track(50);
        t.move_by(1);
        assert_eq!(t.state(), TokenState::OnTrack(51));
    }

    #[test]
    fn test_final_bounce_back() {
        let mut t = on_final(1);
        t.move_by(6);
        assert_eq!(t.state(), TokenState::OnFinal(3));

        let mut t = on_final(0);
        t.move_by(4);
        assert_eq!(t.state(), TokenState::OnFinal(GOAL));
        assert!(t.is_retired());
    }

    #[test]
    fn test_bounce_never_leaves_stretch() {
        for p in 0..GOAL {
            for d in 1..=6 {
                assert!(bounce(p, d) <= GOAL, "p={p} d={d}");
            }
        }
        assert_eq!(bounce(4, 6), 0);
    }

    #[test]
    fn test_send_home_idempotent() {
        let mut tokens = [Token::new(), on_track(30), on_final(2)];
        for t in &mut tokens {
            t.set_safe(true);
            t.send_home();
            assert!(t.is_home());
            t.send_home();
            assert_eq!(*t, Token::new());
        }
    }

    #[test]
    fn test_enter_final_offset() {
        let mut t = on_track(49);
        t.enter_final(53);
        assert_eq!(t.state(), TokenState::OnFinal(2));
        assert!(t.is_out());
        assert_eq!(t.track_cell(), None);
    }

    #[test]
    fn test_relative_distance() {
        assert_eq!(relative_distance(0, 0), 0);
        assert_eq!(relative_distance(13, 1), 0);
        assert_eq!(relative_distance(12, 1), 51);
        assert_eq!(relative_distance(2, 3), 15);
        assert_eq!(start_cell(2), 26);
    }

    #[test]
    #[should_panic]
    fn test_move_home_token_panics() {
        Token::new().move_by(3);
    }
}
