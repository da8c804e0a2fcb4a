use thiserror::Error;

use crate::{Coord2, GameMode};

/// Problems decoding an authored level description.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Level header must start with `rows columns`")]
    InvalidHeader,
    #[error("Level size {0}x{1} is outside the supported range")]
    DimensionsOutOfRange(u32, u32),
    #[error("Level body ended after {found} of {expected} tiles")]
    Truncated { expected: usize, found: usize },
    #[error("Unexpected character {0:?} in level body")]
    UnexpectedCharacter(char),
}

/// Structurally valid input that breaks a game rule.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A level needs at least one mine")]
    NoMines,
    #[error("A level needs at least one plain tile")]
    NoSafeTiles,
    #[error("Mine at {0:?} lies outside the board")]
    MineOutOfBounds(Coord2),
    #[error("Board size {0:?} is not playable")]
    InvalidSize(Coord2),
    #[error("Leaderboard entries are not ordered by time")]
    UnsortedRecords,
    #[error("Leaderboard holds more than {0} entries")]
    TooManyRecords(usize),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("The name must contain between 3 to 20 characters")]
    BadLength,
    #[error("The name must only contain letters from the English alphabet")]
    NotAlphabetic,
    #[error("The name is reserved")]
    Reserved,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Malformed level: {0}")]
    Format(#[from] FormatError),
    #[error("Invalid layout: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0} mode has no preset board")]
    NoPreset(GameMode),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Invalid player name: {0}")]
    InvalidName(#[from] NameError),
}

pub type Result<T> = core::result::Result<T, GameError>;
