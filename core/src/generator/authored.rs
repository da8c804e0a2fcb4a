use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use super::*;

pub const MINE_MARKER: char = 'X';
pub const BLANK_MARKER: char = '.';

/// How the level parser treats characters that are neither markers nor whitespace.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Skip the character and keep filling the same tile.
    #[default]
    Lenient,
    /// Fail with [`FormatError::UnexpectedCharacter`].
    Strict,
}

/// A user-designed mine arrangement within the level bounds.
///
/// Text form is a `rows columns` header followed by `rows` lines of `columns`
/// markers, `X` for a mine and `.` for a plain tile:
///
/// ```text
/// 5 5
/// X....
/// .....
/// ..X..
/// .....
/// ....X
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct AuthoredLayout {
    size: Coord2,
    mines: MineSet,
}

/// Unchecked wire shape of [`AuthoredLayout`].
#[derive(Deserialize)]
struct RawLayout {
    size: Coord2,
    mines: MineSet,
}

impl TryFrom<RawLayout> for AuthoredLayout {
    type Error = GameError;

    fn try_from(raw: RawLayout) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl AuthoredLayout {
    pub fn new(size: Coord2, mines: MineSet) -> Result<Self> {
        validate_level_size(size)?;
        if let Some(&outside) = mines.iter().find(|&&pos| !in_bounds(pos, size)) {
            return Err(ValidationError::MineOutOfBounds(outside).into());
        }
        validate_mine_count(mines.len() as CellCount, mult(size.0, size.1))?;
        Ok(Self { size, mines })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mines(&self) -> &MineSet {
        &self.mines
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mines.len() as CellCount)
    }

    pub fn into_parts(self) -> (Coord2, MineSet) {
        (self.size, self.mines)
    }

    /// Text form accepted by [`parse_authored_layout`].
    pub fn encode(&self) -> alloc::string::String {
        self.to_string()
    }
}

impl fmt::Display for AuthoredLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, columns) = self.size;
        writeln!(f, "{rows} {columns}")?;
        for row in 0..rows {
            for column in 0..columns {
                let marker = if self.mines.contains(&(row, column)) {
                    MINE_MARKER
                } else {
                    BLANK_MARKER
                };
                write!(f, "{marker}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for AuthoredLayout {
    type Err = GameError;

    fn from_str(source: &str) -> Result<Self> {
        parse_authored_layout(source)
    }
}

impl LayoutGenerator for &AuthoredLayout {
    /// Replays the authored mines; `config` must describe the same board.
    fn generate(self, config: GameConfig) -> Result<MineSet> {
        if config != self.config() {
            return Err(ValidationError::InvalidSize(config.size).into());
        }
        Ok(self.mines.clone())
    }
}

/// Parses a level leniently, see [`Strictness::Lenient`].
pub fn parse_authored_layout(source: &str) -> Result<AuthoredLayout> {
    parse_authored_layout_with(source, Strictness::default())
}

pub fn parse_authored_layout_with(source: &str, strictness: Strictness) -> Result<AuthoredLayout> {
    let (rows, rest) = next_number(source)?;
    let (columns, body) = next_number(rest)?;

    let size = match (Coord::try_from(rows), Coord::try_from(columns)) {
        (Ok(rows), Ok(columns)) => (rows, columns),
        _ => return Err(FormatError::DimensionsOutOfRange(rows, columns).into()),
    };
    validate_level_size(size)?;

    let expected = usize::from(mult(size.0, size.1));
    let columns = usize::from(size.1);
    let mut mines = MineSet::new();
    let mut filled = 0;
    let mut chars = body.chars();

    while filled < expected {
        let Some(ch) = chars.next() else {
            return Err(FormatError::Truncated {
                expected,
                found: filled,
            }
            .into());
        };
        match ch {
            MINE_MARKER | BLANK_MARKER => {
                if ch == MINE_MARKER {
                    // both quotients are bounded by the validated level size
                    mines.insert(((filled / columns) as Coord, (filled % columns) as Coord));
                }
                filled += 1;
            }
            ch if ch.is_whitespace() => {}
            ch => match strictness {
                Strictness::Lenient => {
                    log::warn!("Skipping unexpected character {ch:?} in level body");
                }
                Strictness::Strict => return Err(FormatError::UnexpectedCharacter(ch).into()),
            },
        }
    }

    if strictness == Strictness::Strict {
        if let Some(ch) = chars.find(|ch| !ch.is_whitespace()) {
            return Err(FormatError::UnexpectedCharacter(ch).into());
        }
    }

    AuthoredLayout::new(size, mines)
}

/// Splits the leading whitespace-delimited unsigned number off `source`.
fn next_number(source: &str) -> Result<(u32, &str)> {
    let source = source.trim_start();
    let end = source
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(source.len());
    let number = source[..end]
        .parse()
        .map_err(|_| FormatError::InvalidHeader)?;
    Ok((number, &source[end..]))
}

/// Interactive builder for authored levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelEditor {
    size: Coord2,
    mines: MineSet,
}

impl LevelEditor {
    pub fn new(rows: Coord, columns: Coord) -> Result<Self> {
        let size = (rows, columns);
        validate_level_size(size)?;
        Ok(Self {
            size,
            mines: MineSet::new(),
        })
    }

    /// Reopens an existing level for editing.
    pub fn from_layout(layout: AuthoredLayout) -> Self {
        let (size, mines) = layout.into_parts();
        Self { size, mines }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn has_mine(&self, coords: Coord2) -> bool {
        self.mines.contains(&coords)
    }

    pub fn place_mine(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_coords(coords)?;
        Ok(if self.mines.insert(coords) {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        })
    }

    pub fn remove_mine(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_coords(coords)?;
        Ok(if self.mines.remove(&coords) {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        })
    }

    /// Accepts the level once it has at least one mine and one plain tile.
    pub fn finish(&self) -> Result<AuthoredLayout> {
        AuthoredLayout::new(self.size, self.mines.clone())
    }

    fn check_coords(&self, coords: Coord2) -> Result<()> {
        if in_bounds(coords, self.size) {
            Ok(())
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = "5 6\nX.....\n......\n..X...\n......\n.....X\n";

    #[test]
    fn parses_header_and_markers() {
        let layout = parse_authored_layout(LEVEL).unwrap();

        assert_eq!(layout.size(), (5, 6));
        let mines: alloc::vec::Vec<_> = layout.mines().iter().copied().collect();
        assert_eq!(mines, [(0, 0), (2, 2), (4, 5)]);
        assert_eq!(layout.config().mines, 3);
    }

    #[test]
    fn encode_reproduces_the_source() {
        let layout: AuthoredLayout = LEVEL.parse().unwrap();
        assert_eq!(layout.encode(), LEVEL);
    }

    #[test]
    fn lenient_parser_skips_garbage_without_consuming_a_tile() {
        let noisy = "5 5\nX?....\n.....\n..#...\n.....\n....X\n";
        let layout = parse_authored_layout(noisy).unwrap();

        assert!(layout.mines().contains(&(0, 0)));
        assert!(layout.mines().contains(&(4, 4)));
        assert_eq!(layout.mines().len(), 2);
    }

    #[test]
    fn strict_parser_rejects_garbage() {
        let noisy = "5 5\nX?...\n.....\n.....\n.....\n....X\n";
        assert_eq!(
            parse_authored_layout_with(noisy, Strictness::Strict),
            Err(GameError::Format(FormatError::UnexpectedCharacter('?')))
        );

        let trailing = "5 5\nX....\n.....\n.....\n.....\n....X\nZ";
        assert_eq!(
            parse_authored_layout_with(trailing, Strictness::Strict),
            Err(GameError::Format(FormatError::UnexpectedCharacter('Z')))
        );
        assert!(parse_authored_layout(trailing).is_ok());
    }

    #[test]
    fn rejects_bad_headers_and_sizes() {
        assert_eq!(
            parse_authored_layout("five 5\n"),
            Err(GameError::Format(FormatError::InvalidHeader))
        );
        assert_eq!(
            parse_authored_layout(""),
            Err(GameError::Format(FormatError::InvalidHeader))
        );
        assert_eq!(
            parse_authored_layout("4 5\n"),
            Err(GameError::Format(FormatError::DimensionsOutOfRange(4, 5)))
        );
        assert_eq!(
            parse_authored_layout("10 300\n"),
            Err(GameError::Format(FormatError::DimensionsOutOfRange(10, 300)))
        );
    }

    #[test]
    fn rejects_truncated_body() {
        assert_eq!(
            parse_authored_layout("5 5\nX....\n..."),
            Err(GameError::Format(FormatError::Truncated {
                expected: 25,
                found: 8
            }))
        );
    }

    #[test]
    fn rejects_levels_without_mines_or_plain_tiles() {
        let empty = "5 5\n.....\n.....\n.....\n.....\n.....\n";
        assert_eq!(
            parse_authored_layout(empty),
            Err(GameError::Validation(ValidationError::NoMines))
        );

        let full = "5 5\nXXXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n";
        assert_eq!(
            parse_authored_layout(full),
            Err(GameError::Validation(ValidationError::NoSafeTiles))
        );
    }

    #[test]
    fn editor_builds_a_valid_level() {
        let mut editor = LevelEditor::new(5, 7).unwrap();
        assert!(editor.finish().is_err());

        assert_eq!(editor.place_mine((1, 6)).unwrap(), MarkOutcome::Changed);
        assert_eq!(editor.place_mine((1, 6)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(editor.place_mine((3, 3)).unwrap(), MarkOutcome::Changed);
        assert_eq!(editor.remove_mine((3, 3)).unwrap(), MarkOutcome::Changed);
        assert_eq!(editor.place_mine((5, 0)), Err(GameError::InvalidCoords));

        let layout = editor.finish().unwrap();
        assert_eq!(layout.mines().len(), 1);
        assert_eq!(parse_authored_layout(&layout.encode()).unwrap(), layout);
    }

    #[test]
    fn editor_rejects_out_of_range_sizes() {
        assert!(LevelEditor::new(11, 5).is_err());
        assert!(LevelEditor::new(5, 4).is_err());
    }

    #[test]
    fn authored_generator_requires_matching_config() {
        let layout = parse_authored_layout(LEVEL).unwrap();
        assert_eq!(layout.generate(layout.config()).unwrap(), *layout.mines());
        assert!(layout.generate(GameConfig::EASY).is_err());
    }

    #[test]
    fn deserialising_revalidates_the_layout() {
        let level = parse_authored_layout(LEVEL).unwrap();
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(serde_json::from_str::<AuthoredLayout>(&json).unwrap(), level);

        let too_large = r#"{"size":[200,200],"mines":[[0,0]]}"#;
        assert!(serde_json::from_str::<AuthoredLayout>(too_large).is_err());

        let no_mines = r#"{"size":[5,5],"mines":[]}"#;
        assert!(serde_json::from_str::<AuthoredLayout>(no_mines).is_err());

        let outside = r#"{"size":[5,5],"mines":[[5,0]]}"#;
        assert!(serde_json::from_str::<AuthoredLayout>(outside).is_err());
    }
}
