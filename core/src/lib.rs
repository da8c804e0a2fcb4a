//! Core rules of Evade, a turn-based mine puzzle: board generation, adjacency,
//! cascading reveal, win/loss detection and per-mode leaderboards.
//!
//! Rendering, input, timing and file formats belong to the host; everything here
//! works on in-memory values.
#![no_std]

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use leaderboard::*;
pub use profile::*;
pub use store::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod leaderboard;
mod profile;
mod store;
mod tile;
mod types;

/// Smallest and largest row count of an authored level.
pub const LEVEL_ROWS: (Coord, Coord) = (5, 10);
/// Smallest and largest column count of an authored level.
pub const LEVEL_COLUMNS: (Coord, Coord) = (5, 15);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, columns)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const EASY: Self = Self::new_unchecked((8, 8), 10);
    pub const DIFFICULT: Self = Self::new_unchecked((10, 15), 35);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the request into a board with at least one mine and one safe tile.
    pub fn new((rows, columns): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let columns = columns.clamp(1, Coord::MAX);
        // a 1x1 board cannot hold both, so it gets a second column
        let columns = if rows == 1 { columns.max(2) } else { columns };
        let mines = mines.clamp(1, mult(rows, columns) - 1);
        Self::new_unchecked((rows, columns), mines)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(ValidationError::InvalidSize(self.size).into());
        }
        validate_mine_count(self.mines, self.total_tiles())
    }
}

/// Checks `size` against the authored-level bounds.
pub fn validate_level_size((rows, columns): Coord2) -> core::result::Result<(), FormatError> {
    let rows_ok = (LEVEL_ROWS.0..=LEVEL_ROWS.1).contains(&rows);
    let columns_ok = (LEVEL_COLUMNS.0..=LEVEL_COLUMNS.1).contains(&columns);
    if rows_ok && columns_ok {
        Ok(())
    } else {
        Err(FormatError::DimensionsOutOfRange(rows.into(), columns.into()))
    }
}

/// Game modes, each with its own statistics and leaderboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Easy,
    Difficult,
    Custom,
}

impl GameMode {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Difficult, Self::Custom];

    /// Fixed board of the classic modes; custom boards come from a level.
    pub const fn config(self) -> Option<GameConfig> {
        match self {
            Self::Easy => Some(GameConfig::EASY),
            Self::Difficult => Some(GameConfig::DIFFICULT),
            Self::Custom => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Classic->Easy",
            Self::Difficult => "Classic->Difficult",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    Quit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Won => "Won",
            Self::Lost => "Lost",
            Self::Quit => "Quit",
        })
    }
}

/// Summary of a concluded session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub mode: GameMode,
    pub outcome: Outcome,
    pub elapsed_seconds: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
