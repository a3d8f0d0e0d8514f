use std::str::FromStr;

use minegrid_core::{CellCount, ConfigIssue, Coord, Coord2, GameConfig};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    /// Reveal by linear cell index, `x + y * cols`.
    RevealIndex(usize),
    FlagMode,
    Hint,
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command, type `?` for help")]
    Empty,
    #[error("Unknown command `{0}`, type `?` for help")]
    Unknown(String),
    #[error("Expected {0}")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid number")]
    BadNumber(String),
    #[error("Unexpected trailing input `{0}`")]
    Trailing(String),
}

fn number<T: FromStr>(
    parts: &mut std::str::SplitWhitespace<'_>,
    what: &'static str,
) -> Result<T, CommandError> {
    let part = parts.next().ok_or(CommandError::MissingArgument(what))?;
    part.parse()
        .map_err(|_| CommandError::BadNumber(part.to_owned()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or(CommandError::Empty)?;

        let command = match verb {
            "r" | "reveal" => Self::Reveal((number(&mut parts, "x")?, number(&mut parts, "y")?)),
            "f" | "flag" => Self::Flag((number(&mut parts, "x")?, number(&mut parts, "y")?)),
            "c" | "cell" => Self::RevealIndex(number(&mut parts, "a cell index")?),
            "m" | "mode" => Self::FlagMode,
            "h" | "hint" => Self::Hint,
            "n" | "new" | "restart" => Self::Restart,
            "?" | "help" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };

        match parts.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

pub const HELP: &str = "\
Commands:
  r X Y   reveal a cell (or toggle its flag in flag mode)
  f X Y   toggle a flag
  c N     reveal cell number N (x + y * width)
  m       toggle flag mode
  h       toggle hint mode
  n       restart with the same grid
  q       quit";

/// Message shown for a rejected custom grid.
pub fn issue_message(issue: ConfigIssue) -> &'static str {
    match issue {
        ConfigIssue::Width(_) => "Invalid Grid Width! Please enter a number between 5 and 50.",
        ConfigIssue::Height(_) => "Invalid Grid Height! Please enter a number between 5 and 50.",
        ConfigIssue::BombCount(_) => "Invalid Bomb Count! Please enter a number between 5 and 2490.",
        ConfigIssue::TooManyBombs { .. } => "Invalid Bomb Count! Too many bombs!",
    }
}

/// Validates raw custom values before they are narrowed to grid types.
pub fn custom_config(cols: u32, rows: u32, bombs: u32) -> Result<GameConfig, ConfigIssue> {
    let config = GameConfig::new_unchecked(
        Coord::try_from(cols).unwrap_or(Coord::MAX),
        Coord::try_from(rows).unwrap_or(Coord::MAX),
        CellCount::try_from(bombs).unwrap_or(CellCount::MAX),
    );
    config.validate().map(|()| config)
}
