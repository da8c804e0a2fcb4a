use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Records kept per mode.
pub const LEADERBOARD_CAPACITY: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub seconds: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, seconds: u32) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

/// Fastest winning times of one mode, ascending, at most [`LEADERBOARD_CAPACITY`] long.
///
/// Deserialisation goes through [`TryFrom`] so stored boards that break the
/// ordering or capacity are rejected instead of silently trusted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LeaderboardEntry>", into = "Vec<LeaderboardEntry>")]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= LEADERBOARD_CAPACITY
    }

    /// Index after every entry with a time `<= seconds`, found by binary search.
    pub fn insertion_index(&self, seconds: u32) -> usize {
        self.entries.partition_point(|entry| entry.seconds <= seconds)
    }

    /// Inserts a winning time, returning its 1-based rank if it made the board.
    ///
    /// Ties rank behind existing equal times. A full board drops its slowest
    /// entry to make room.
    pub fn insert(&mut self, name: impl Into<String>, seconds: u32) -> Option<usize> {
        let index = self.insertion_index(seconds);
        if index >= LEADERBOARD_CAPACITY {
            log::debug!("{seconds}s does not qualify for the leaderboard");
            return None;
        }

        self.entries.insert(index, LeaderboardEntry::new(name, seconds));
        self.entries.truncate(LEADERBOARD_CAPACITY);
        Some(index + 1)
    }
}

impl TryFrom<Vec<LeaderboardEntry>> for Leaderboard {
    type Error = ValidationError;

    fn try_from(entries: Vec<LeaderboardEntry>) -> core::result::Result<Self, Self::Error> {
        if entries.len() > LEADERBOARD_CAPACITY {
            return Err(ValidationError::TooManyRecords(LEADERBOARD_CAPACITY));
        }
        if !entries.is_sorted_by_key(|entry| entry.seconds) {
            return Err(ValidationError::UnsortedRecords);
        }
        Ok(Self { entries })
    }
}

impl From<Leaderboard> for Vec<LeaderboardEntry> {
    fn from(board: Leaderboard) -> Self {
        board.entries
    }
}

/// One independent leaderboard per [`GameMode`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboards {
    pub easy: Leaderboard,
    pub difficult: Leaderboard,
    pub custom: Leaderboard,
}

impl Leaderboards {
    pub fn get(&self, mode: GameMode) -> &Leaderboard {
        match mode {
            GameMode::Easy => &self.easy,
            GameMode::Difficult => &self.difficult,
            GameMode::Custom => &self.custom,
        }
    }

    pub fn get_mut(&mut self, mode: GameMode) -> &mut Leaderboard {
        match mode {
            GameMode::Easy => &mut self.easy,
            GameMode::Difficult => &mut self.difficult,
            GameMode::Custom => &mut self.custom,
        }
    }

    pub fn insert(&mut self, mode: GameMode, name: impl Into<String>, seconds: u32) -> Option<usize> {
        let rank = self.get_mut(mode).insert(name, seconds);
        if let Some(rank) = rank {
            log::debug!("New #{rank} record for {mode}: {seconds}s");
        }
        rank
    }

    /// Ranks a concluded game; only wins are eligible.
    pub fn record(&mut self, name: impl Into<String>, result: &GameResult) -> Option<usize> {
        if result.outcome != Outcome::Won {
            return None;
        }
        self.insert(result.mode, name, result.elapsed_seconds)
    }
}

/// Records `result` into the stored leaderboards and writes them back.
pub fn record_and_save<S>(
    store: &mut S,
    name: &str,
    result: &GameResult,
) -> core::result::Result<Option<usize>, S::Error>
where
    S: Store<Leaderboards>,
{
    store.update(|boards| boards.record(name, result))
}
