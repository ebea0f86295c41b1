/// Single board axis used for row and column counts.
pub type Coord = u8;

/// Card position on a board, numbered row-major from zero.
pub type CardId = u16;

/// Count type used for card and pair totals.
pub type CellCount = u16;

/// Board dimensions `(rows, cols)`.
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

/// Maps a card id to its `[row, col]` slot on a board with `cols` columns.
pub const fn id_to_nd_index(id: CardId, cols: Coord) -> [usize; 2] {
    let id = id as usize;
    let cols = cols as usize;
    [id / cols, id % cols]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_laid_out_row_major() {
        assert_eq!(id_to_nd_index(0, 4), [0, 0]);
        assert_eq!(id_to_nd_index(3, 4), [0, 3]);
        assert_eq!(id_to_nd_index(4, 4), [1, 0]);
        assert_eq!(id_to_nd_index(23, 6), [3, 5]);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(4, 6), 24);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 255 * 255);
    }
}
