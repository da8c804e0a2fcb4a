/// Single coordinate axis, used for row/column indices and board dimensions.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional position `(row, column)`, or a board size `(rows, columns)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Row-major iterator over every position of a board of `size`.
pub fn iter_positions((rows, columns): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
}

/// The up-to-8 in-bounds neighbors of `center`, row-major.
pub fn neighbors(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, column) = center;
    let rows = row.saturating_sub(1)..=row.saturating_add(1);
    rows.flat_map(move |r| {
        (column.saturating_sub(1)..=column.saturating_add(1)).map(move |c| (r, c))
    })
    .filter(move |&pos| pos != center && in_bounds(pos, size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(neighbors((0, 0), (8, 8)).count(), 3);
        assert_eq!(neighbors((7, 7), (8, 8)).count(), 3);
    }

    #[test]
    fn edge_and_interior_neighbor_counts() {
        assert_eq!(neighbors((0, 4), (8, 8)).count(), 5);
        assert_eq!(neighbors((4, 4), (8, 8)).count(), 8);
    }

    #[test]
    fn neighbors_exclude_center_and_stay_in_bounds() {
        let size = (5, 6);
        for pos in iter_positions(size) {
            for neighbor in neighbors(pos, size) {
                assert_ne!(neighbor, pos);
                assert!(in_bounds(neighbor, size));
                assert!(neighbor.0.abs_diff(pos.0) <= 1 && neighbor.1.abs_diff(pos.1) <= 1);
            }
        }
    }

    #[test]
    fn neighbors_at_the_coordinate_limit() {
        let size = (Coord::MAX, Coord::MAX);
        let last = (Coord::MAX - 1, Coord::MAX - 1);
        let found: alloc::vec::Vec<_> = neighbors(last, size).collect();
        assert_eq!(found, [(253, 253), (253, 254), (254, 253)]);
    }

    #[test]
    fn positions_are_row_major() {
        let mut positions = iter_positions((2, 3));
        assert_eq!(positions.next(), Some((0, 0)));
        assert_eq!(positions.next(), Some((0, 1)));
        assert_eq!(positions.nth(1), Some((1, 0)));
        assert_eq!(positions.count(), 2);
    }
}
