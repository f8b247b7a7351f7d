use crate::constants::{GLOBE_TILES, PLAYERS, STAR_TILES, START_TILES};

/// The special-tile layout of a board.
///
/// A regular board (`special == false`) keeps the same layout but none of the
/// tiles have any effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    special: bool,
    start_tiles: [u8; PLAYERS],
    globe_tiles: [u8; 4],
    star_tiles: [u8; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Board {
    pub fn new(special: bool) -> Self {
        Self {
            special,
            start_tiles: START_TILES,
            globe_tiles: GLOBE_TILES,
            star_tiles: STAR_TILES,
        }
    }

    pub fn is_special(&self) -> bool {
        self.special
    }

    pub fn set_special(&mut self, special: bool) {
        self.special = special;
    }

    pub fn is_start(&self, cell: u8) -> bool {
        self.start_tiles.contains(&cell)
    }

    pub fn is_globe(&self, cell: u8) -> bool {
        self.globe_tiles.contains(&cell)
    }

    pub fn is_star(&self, cell: u8) -> bool {
        self.star_tiles.contains(&cell)
    }

    /// Start cell of the given seat.
    pub fn start_of(&self, player: usize) -> u8 {
        self.start_tiles[player]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_membership() {
        let board = Board::new(true);
        assert!(board.is_star(5));
        assert!(board.is_star(50));
        assert!(!board.is_star(8));
        assert!(board.is_globe(8));
        assert!(board.is_start(39));
        assert!(!board.is_start(40));
    }

    #[test]
    fn test_start_cells_spaced() {
        let board = Board::default();
        for p in 0..PLAYERS {
            assert_eq!(board.start_of(p), 13 * p as u8);
        }
    }

    #[test]
    fn test_regular_board_keeps_layout() {
        let mut board = Board::new(false);
        assert!(!board.is_special());
        assert!(board.is_globe(21));
        board.set_special(true);
        assert!(board.is_special());
    }
}
