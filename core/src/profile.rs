use alloc::collections::VecDeque;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of concluded games a profile remembers.
pub const RECENT_GAMES: usize = 3;

const RESERVED_NAMES: [&str; 1] = ["GUEST"];

/// Upper-cased profile name of 3 to 20 ASCII letters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: &str) -> Result<Self> {
        if !(3..=20).contains(&name.len()) {
            return Err(NameError::BadLength.into());
        }
        if !name.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(NameError::NotAlphabetic.into());
        }
        let name = name.to_ascii_uppercase();
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(NameError::Reserved.into());
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = GameError;

    fn try_from(name: String) -> Result<Self> {
        Self::new(&name)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw per-mode counters; rates and averages are left to the display layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStats {
    pub won: u32,
    pub lost: u32,
    /// Sum of winning times only.
    pub total_seconds: u64,
}

impl ModeStats {
    pub fn record(&mut self, result: &GameResult) {
        match result.outcome {
            Outcome::Won => {
                self.won += 1;
                self.total_seconds += u64::from(result.elapsed_seconds);
            }
            // quitting counts against the player
            Outcome::Lost | Outcome::Quit => self.lost += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.won + self.lost
    }
}

/// A concluded game as shown in a profile's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentGame {
    pub result: GameResult,
    /// Board as it stood when the game ended.
    pub board: Grid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    name: PlayerName,
    /// Host-supplied creation stamp; the core never interprets it.
    created: u64,
    lifetime_games: u32,
    easy: ModeStats,
    difficult: ModeStats,
    custom: ModeStats,
    recent: VecDeque<RecentGame>,
}

impl PlayerProfile {
    pub fn new(name: PlayerName, created: u64) -> Self {
        Self {
            name,
            created,
            lifetime_games: 0,
            easy: ModeStats::default(),
            difficult: ModeStats::default(),
            custom: ModeStats::default(),
            recent: VecDeque::with_capacity(RECENT_GAMES),
        }
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn lifetime_games(&self) -> u32 {
        self.lifetime_games
    }

    pub fn stats(&self, mode: GameMode) -> &ModeStats {
        match mode {
            GameMode::Easy => &self.easy,
            GameMode::Difficult => &self.difficult,
            GameMode::Custom => &self.custom,
        }
    }

    /// Most recent first.
    pub fn recent_games(&self) -> impl Iterator<Item = &RecentGame> {
        self.recent.iter()
    }

    pub fn record(&mut self, game: RecentGame) {
        self.lifetime_games += 1;
        self.stats_mut(game.result.mode).record(&game.result);

        self.recent.push_front(game);
        self.recent.truncate(RECENT_GAMES);
    }

    fn stats_mut(&mut self, mode: GameMode) -> &mut ModeStats {
        match mode {
            GameMode::Easy => &mut self.easy,
            GameMode::Difficult => &mut self.difficult,
            GameMode::Custom => &mut self.custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn result(mode: GameMode, outcome: Outcome, elapsed_seconds: u32) -> GameResult {
        GameResult {
            mode,
            outcome,
            elapsed_seconds,
        }
    }

    #[test]
    fn names_are_upper_cased() {
        assert_eq!(PlayerName::new("amy").unwrap().as_str(), "AMY");
        assert_eq!(PlayerName::new("McKenzie").unwrap().to_string(), "MCKENZIE");
    }

    #[test]
    fn name_rules() {
        assert_eq!(
            PlayerName::new("al"),
            Err(GameError::InvalidName(NameError::BadLength))
        );
        assert_eq!(
            PlayerName::new("abcdefghijklmnopqrstu"),
            Err(GameError::InvalidName(NameError::BadLength))
        );
        assert_eq!(
            PlayerName::new("r2d2"),
            Err(GameError::InvalidName(NameError::NotAlphabetic))
        );
        assert_eq!(
            PlayerName::new("guest"),
            Err(GameError::InvalidName(NameError::Reserved))
        );
    }

    #[test]
    fn stats_count_quits_as_losses_and_only_winning_time() {
        let mut stats = ModeStats::default();
        stats.record(&result(GameMode::Easy, Outcome::Won, 40));
        stats.record(&result(GameMode::Easy, Outcome::Lost, 15));
        stats.record(&result(GameMode::Easy, Outcome::Quit, 99));

        assert_eq!(stats.won, 1);
        assert_eq!(stats.lost, 2);
        assert_eq!(stats.total_seconds, 40);
        assert_eq!(stats.games(), 3);
    }

    fn recent(mode: GameMode, outcome: Outcome, elapsed_seconds: u32) -> RecentGame {
        RecentGame {
            result: result(mode, outcome, elapsed_seconds),
            board: Grid::new((5, 5)).unwrap(),
        }
    }

    #[test]
    fn profile_keeps_three_recent_games_newest_first() {
        let mut profile = PlayerProfile::new(PlayerName::new("amy").unwrap(), 1_700_000_000);
        for seconds in 1..=5 {
            profile.record(recent(GameMode::Difficult, Outcome::Won, seconds));
        }

        let recent: Vec<u32> = profile
            .recent_games()
            .map(|game| game.result.elapsed_seconds)
            .collect();
        assert_eq!(recent, [5, 4, 3]);
        assert_eq!(profile.lifetime_games(), 5);
        assert_eq!(profile.stats(GameMode::Difficult).won, 5);
        assert_eq!(profile.stats(GameMode::Easy).games(), 0);
        assert_eq!(profile.created(), 1_700_000_000);
    }

    #[test]
    fn recent_games_keep_their_boards_through_serde() {
        let mut profile = PlayerProfile::new(PlayerName::new("amy").unwrap(), 7);
        let mut game = recent(GameMode::Custom, Outcome::Lost, 9);
        game.board[(1, 3)].revealed = true;
        profile.record(game.clone());

        let json = serde_json::to_string(&profile).unwrap();
        let restored: PlayerProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, profile);
        assert_eq!(restored.created(), 7);
        assert_eq!(restored.recent_games().next(), Some(&game));
    }

    #[test]
    fn deserialising_revalidates_the_name() {
        assert!(serde_json::from_str::<PlayerName>(r#""r2d2""#).is_err());
        assert_eq!(
            serde_json::from_str::<PlayerName>(r#""amy""#).unwrap().as_str(),
            "AMY"
        );
    }
}
