use serde::{Deserialize, Serialize};

/// State of one grid position as stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_bomb: bool,
    pub(crate) is_cleared: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_bombs: u8,
}

impl Cell {
    pub const fn is_bomb(self) -> bool {
        self.is_bomb
    }

    pub const fn is_cleared(self) -> bool {
        self.is_cleared
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Bomb count around this cell; only meaningful once it is cleared.
    pub const fn adjacent_bombs(self) -> u8 {
        self.adjacent_bombs
    }

    pub const fn is_unflagged_bomb(self) -> bool {
        self.is_bomb && !self.is_flagged
    }

    /// Neither cleared nor flagged.
    pub const fn is_flaggable(self) -> bool {
        !self.is_cleared && !self.is_flagged
    }
}
