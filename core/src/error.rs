use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Coordinates {0:?} are out of bounds")]
    OutOfBounds(Coord2),
}

/// What exactly is wrong with a rejected [`GameConfig`](crate::GameConfig).
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("grid width {0} is outside 5..=50")]
    Width(Coord),
    #[error("grid height {0} is outside 5..=50")]
    Height(Coord),
    #[error("bomb count {0} is outside 5..=2490")]
    BombCount(CellCount),
    #[error("{bombs} bombs do not leave a clear 3x3 start on a {cols}x{rows} grid")]
    TooManyBombs {
        cols: Coord,
        rows: Coord,
        bombs: CellCount,
    },
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
