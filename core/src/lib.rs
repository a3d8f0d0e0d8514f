#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;
pub use view::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;
mod view;

/// Smallest accepted grid side.
pub const MIN_SIDE: Coord = 5;
/// Largest accepted grid side.
pub const MAX_SIDE: Coord = 50;
pub const MIN_BOMBS: CellCount = 5;
pub const MAX_BOMBS: CellCount = 2490;
/// Cells in the block around the first click that never hold a bomb.
pub const SAFE_ZONE_CELLS: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub cols: Coord,
    pub rows: Coord,
    pub bombs: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(cols: Coord, rows: Coord, bombs: CellCount) -> Self {
        Self { cols, rows, bombs }
    }

    pub fn new(cols: Coord, rows: Coord, bombs: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(cols, rows, bombs);
        config.validate()?;
        Ok(config)
    }

    /// Checks the same limits as [`GameConfig::new`], in the order a player would be told about them.
    pub fn validate(&self) -> core::result::Result<(), ConfigIssue> {
        let sides = MIN_SIDE..=MAX_SIDE;
        if !sides.contains(&self.cols) {
            return Err(ConfigIssue::Width(self.cols));
        }
        if !sides.contains(&self.rows) {
            return Err(ConfigIssue::Height(self.rows));
        }
        if !(MIN_BOMBS..=MAX_BOMBS).contains(&self.bombs) {
            return Err(ConfigIssue::BombCount(self.bombs));
        }
        if self.bombs >= self.total_cells() - SAFE_ZONE_CELLS {
            return Err(ConfigIssue::TooManyBombs {
                cols: self.cols,
                rows: self.rows,
                bombs: self.bombs,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.cols, self.rows)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.cols, self.rows)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.bombs)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Preset::Beginner.config()
    }
}

/// The fixed grid choices offered next to a custom size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    /// 9x9 with 15 bombs.
    Beginner,
    /// 16x16 with 50 bombs.
    Intermediate,
    /// 30x16 with 100 bombs.
    Expert,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked(9, 9, 15),
            Self::Intermediate => GameConfig::new_unchecked(16, 16, 50),
            Self::Expert => GameConfig::new_unchecked(30, 16, 100),
        }
    }
}

/// A single cleared cell together with its bomb count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub coords: Coord2,
    pub count: u8,
}

/// Result of [`GridEngine::activate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    NoOp,
    /// Flood fill from a zero cell, in reveal order; boundary cells carry their counts.
    RevealedEmpty(Vec<Reveal>),
    RevealedNumber { coords: Coord2, count: u8 },
    /// The unflagged bomb that was hit.
    Lost(Coord2),
    /// The move cleared the last safe cell; carries what this move revealed.
    Won(Vec<Reveal>),
    /// Flag mode turned the activation into a flag toggle.
    Toggled(FlagToggle),
}

impl Activation {
    pub fn has_update(&self) -> bool {
        match self {
            Self::NoOp => false,
            Self::Toggled(toggle) => toggle.has_update(),
            _ => true,
        }
    }

    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::Lost(_) | Self::Won(_))
    }
}

/// Placeholder a renderer shows on a cell that just lost its flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Blank,
    FlagIndicator,
}

/// Result of [`GridEngine::toggle_flag`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagToggle {
    NoOp,
    Flagged,
    Unflagged(Marker),
}

impl FlagToggle {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

/// What a lost game shows beyond the bomb that was hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exposure {
    Bomb,
    FalseFlag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            assert_eq!(preset.config().validate(), Ok(()));
        }
        assert_eq!(Preset::Expert.config().size(), (30, 16));
    }

    #[test]
    fn config_rejects_out_of_range_sides() {
        assert_eq!(
            GameConfig::new(4, 9, 10),
            Err(GameError::InvalidConfiguration(ConfigIssue::Width(4)))
        );
        assert_eq!(
            GameConfig::new(9, 51, 10),
            Err(GameError::InvalidConfiguration(ConfigIssue::Height(51)))
        );
    }

    #[test]
    fn config_rejects_bad_bomb_counts() {
        assert_eq!(
            GameConfig::new(9, 9, 4),
            Err(GameError::InvalidConfiguration(ConfigIssue::BombCount(4)))
        );
        assert_eq!(
            GameConfig::new(50, 50, 2491),
            Err(GameError::InvalidConfiguration(ConfigIssue::BombCount(2491)))
        );
    }

    #[test]
    fn config_keeps_room_for_the_safe_zone() {
        assert!(GameConfig::new(5, 5, 15).is_ok());
        assert_eq!(
            GameConfig::new(5, 5, 16),
            Err(GameError::InvalidConfiguration(ConfigIssue::TooManyBombs {
                cols: 5,
                rows: 5,
                bombs: 16
            }))
        );
        assert!(GameConfig::new(50, 50, 2490).is_ok());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Preset::Intermediate.config();

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"cols":16,"rows":16,"bombs":50}"#);
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
    }
}
