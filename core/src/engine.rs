use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ongoing -> Won
/// - Ongoing -> Lost
/// - Ongoing -> Quit
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Ongoing,
    Won,
    Lost,
    Quit,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Ongoing => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
            Self::Quit => Some(Outcome::Quit),
        }
    }
}

/// Reveals `coords` and cascades through connected zero-adjacency tiles.
///
/// Out-of-bounds or already revealed positions are a no-op. Flags do not block
/// the reveal; a revealed tile loses its flag. Returns the number of tiles that
/// were newly revealed.
pub fn reveal(grid: &mut Grid, coords: Coord2) -> CellCount {
    let mut revealed = 0;
    let mut to_visit = Vec::from([coords]);

    while let Some(pos) = to_visit.pop() {
        let Some(tile) = grid.get_mut(pos) else {
            continue;
        };
        if tile.revealed {
            continue;
        }

        tile.revealed = true;
        tile.flagged = false;
        revealed += 1;

        if tile.kind == TileKind::Blank(0) {
            to_visit.extend(
                grid.iter_neighbors(pos)
                    .filter(|&neighbor| !grid[neighbor].revealed),
            );
        }
    }

    log::debug!("Revealed {revealed} tiles from {coords:?}");
    revealed
}

/// Classifies the board, marking the first revealed mine (row-major) as exploded.
pub fn evaluate(grid: &mut Grid, mines: &MineSet) -> GameState {
    // `MineSet` iterates row-major
    let triggered = mines
        .iter()
        .copied()
        .find(|&pos| grid.get(pos).is_some_and(|tile| tile.revealed));
    if let Some(pos) = triggered {
        grid[pos].kind = TileKind::ExplodedMine;
        return GameState::Lost;
    }

    let all_safe_revealed = grid
        .iter()
        .all(|(_, tile)| tile.is_mine() || tile.revealed);
    if all_safe_revealed {
        GameState::Won
    } else {
        GameState::Ongoing
    }
}

/// A single game in flight; owns its board for its whole lifetime.
///
/// Serialisable for display snapshots only; a session is never restored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSession {
    mode: GameMode,
    grid: Grid,
    mines: MineSet,
    state: GameState,
    exploded_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(mode: GameMode, size: Coord2, mines: MineSet) -> Result<Self> {
        GameConfig::new_unchecked(size, mines.len() as CellCount).validate()?;
        let grid = Grid::from_mines(size, &mines)?;
        Ok(Self {
            mode,
            grid,
            mines,
            state: GameState::Ongoing,
            exploded_mine: None,
        })
    }

    /// Randomly generated board for a classic mode.
    pub fn classic(mode: GameMode, seed: u64) -> Result<Self> {
        let Some(config) = mode.config() else {
            return Err(GameError::NoPreset(mode));
        };
        let mines = RandomLayoutGenerator::new(seed).generate(config)?;
        Self::new(mode, config.size, mines)
    }

    pub fn custom(level: &AuthoredLayout) -> Result<Self> {
        let mines = level.generate(level.config())?;
        Self::new(GameMode::Custom, level.size(), mines)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mines(&self) -> &MineSet {
        &self.mines
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    /// Mines minus flags; negative once the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.grid.flagged_count() as isize)
    }

    pub fn exploded_mine(&self) -> Option<Coord2> {
        self.exploded_mine
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<GameState> {
        self.check_not_finished()?;

        if reveal(&mut self.grid, coords) > 0 {
            self.state = evaluate(&mut self.grid, &self.mines);
            match self.state {
                GameState::Lost => {
                    self.exploded_mine = self
                        .mines
                        .iter()
                        .copied()
                        .find(|&pos| {
                            self.grid
                                .get(pos)
                                .is_some_and(|tile| tile.kind == TileKind::ExplodedMine)
                        });
                    log::info!("{} game lost at {:?}", self.mode, coords);
                }
                GameState::Won => log::info!("{} game won", self.mode),
                GameState::Ongoing | GameState::Quit => {}
            }
        }
        Ok(self.state)
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.set_flag(coords, true)
    }

    pub fn unflag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.set_flag(coords, false)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let flagged = self.tile_at(coords)?.flagged;
        self.set_flag(coords, !flagged)
    }

    /// Player cancellation. Only an ongoing game can be quit.
    pub fn quit(&mut self) -> Result<GameState> {
        self.check_not_finished()?;
        self.state = GameState::Quit;
        log::info!("{} game quit", self.mode);
        Ok(self.state)
    }

    /// Result of a concluded session, `None` while still ongoing.
    pub fn finish(&self, elapsed_seconds: u32) -> Option<GameResult> {
        self.state.outcome().map(|outcome| GameResult {
            mode: self.mode,
            outcome,
            elapsed_seconds,
        })
    }

    /// Concluded game together with its final board, for a profile's history.
    pub fn recent_game(&self, elapsed_seconds: u32) -> Option<RecentGame> {
        self.finish(elapsed_seconds).map(|result| RecentGame {
            result,
            board: self.grid.clone(),
        })
    }

    fn set_flag(&mut self, coords: Coord2, flagged: bool) -> Result<MarkOutcome> {
        self.check_not_finished()?;
        let tile = self.grid.get_mut(coords).ok_or(GameError::InvalidCoords)?;

        if tile.revealed || tile.flagged == flagged {
            return Ok(MarkOutcome::NoChange);
        }
        tile.flagged = flagged;
        Ok(MarkOutcome::Changed)
    }

    fn tile_at(&self, coords: Coord2) -> Result<&Tile> {
        self.grid.get(coords).ok_or(GameError::InvalidCoords)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
