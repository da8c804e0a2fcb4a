use serde::{Deserialize, Serialize};

/// What a tile holds once the layout is finalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Safe tile with its number of neighboring mines (0..=8).
    Blank(u8),
    Mine,
    /// The mine that ended the game. Display state only.
    ExplodedMine,
}

impl TileKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::ExplodedMine)
    }

    /// Adjacency count of a safe tile, `None` for mines.
    pub const fn adjacency(self) -> Option<u8> {
        match self {
            Self::Blank(count) => Some(count),
            Self::Mine | Self::ExplodedMine => None,
        }
    }
}

impl Default for TileKind {
    fn default() -> Self {
        Self::Blank(0)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub flagged: bool,
    pub revealed: bool,
}

impl Tile {
    pub const fn is_mine(&self) -> bool {
        self.kind.is_mine()
    }

    /// A revealed tile with no neighboring mines, which triggers the cascade.
    pub const fn is_open_blank(&self) -> bool {
        self.revealed && matches!(self.kind, TileKind::Blank(0))
    }
}
