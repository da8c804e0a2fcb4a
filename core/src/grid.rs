use alloc::collections::BTreeSet;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Unique mine positions, ordered row-major.
pub type MineSet = BTreeSet<Coord2>;

/// Fixed-bounds board of tiles, indexed by `(row, column)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    /// Empty board of hidden zero blanks.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ValidationError::InvalidSize(size).into());
        }
        Ok(Self {
            tiles: Array2::default(size.to_nd_index()),
        })
    }

    /// Board with `mines` placed and every adjacency count computed.
    pub fn from_mines(size: Coord2, mines: &MineSet) -> Result<Self> {
        let mut grid = Self::new(size)?;
        if let Some(&outside) = mines.iter().find(|&&pos| !in_bounds(pos, size)) {
            return Err(ValidationError::MineOutOfBounds(outside).into());
        }
        compute_adjacency(&mut grid, mines);
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.tiles.dim();
        // dimensions originate from a `Coord2`, so they always fit
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn total_tiles(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn get(&self, coords: Coord2) -> Option<&Tile> {
        self.contains(coords)
            .then(|| &self.tiles[coords.to_nd_index()])
    }

    pub fn get_mut(&mut self, coords: Coord2) -> Option<&mut Tile> {
        if self.contains(coords) {
            Some(&mut self.tiles[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// Neighbor positions; the iterator does not borrow the grid.
    pub fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, self.size())
    }

    /// Tiles with their positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Tile)> {
        iter_positions(self.size()).map(|pos| (pos, &self[pos]))
    }

    pub fn mine_count(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.is_mine()).count() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.revealed).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.flagged).count() as CellCount
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}

/// Marks every position of `mines` as a mine and every other tile with its
/// neighboring mine count. Out-of-bounds positions are ignored.
pub fn compute_adjacency(grid: &mut Grid, mines: &MineSet) {
    for pos in iter_positions(grid.size()) {
        grid[pos].kind = if mines.contains(&pos) {
            TileKind::Mine
        } else {
            TileKind::Blank(0)
        };
    }

    for &mine in mines {
        if !grid.contains(mine) {
            continue;
        }
        for neighbor in grid.iter_neighbors(mine) {
            if let TileKind::Blank(count) = &mut grid[neighbor].kind {
                *count += 1;
            }
        }
    }
}

/// True when the board has at least one mine and at least one safe tile.
pub fn is_valid_layout(grid: &Grid) -> bool {
    validate_mine_count(grid.mine_count(), grid.total_tiles()).is_ok()
}

pub(crate) fn validate_mine_count(mines: CellCount, total: CellCount) -> Result<()> {
    if mines == 0 {
        Err(ValidationError::NoMines.into())
    } else if mines >= total {
        Err(ValidationError::NoSafeTiles.into())
    } else {
        Ok(())
    }
}
