//! 8x8 board representation and line operations.
//!
//! The board is a `u64` bitmask where bit `row * 8 + col` is set for a filled
//! cell. All mutating primitives return a new board; the type is `Copy`, so
//! every search branch works on its own cheap copy and inputs are never
//! aliased.

use crate::figure::Figure;
use crate::InputError;

/// Board side length.
pub const BOARD_DIM: usize = 8;

/// Total number of board cells.
pub const BOARD_CELLS: usize = BOARD_DIM * BOARD_DIM;

/// Builds the per-row cell masks: mask `i` covers bits of row `i`.
const fn build_row_masks() -> [u64; BOARD_DIM] {
    let mut masks = [0u64; BOARD_DIM];
    let mut row = 0;
    while row < BOARD_DIM {
        masks[row] = 0xFF << (row * BOARD_DIM);
        row += 1;
    }
    masks
}

/// Builds the per-column cell masks: mask `j` covers bits of column `j`.
const fn build_col_masks() -> [u64; BOARD_DIM] {
    let mut masks = [0u64; BOARD_DIM];
    let mut col = 0;
    while col < BOARD_DIM {
        masks[col] = 0x0101_0101_0101_0101 << col;
        col += 1;
    }
    masks
}

const ROW_MASKS: [u64; BOARD_DIM] = build_row_masks();
const COL_MASKS: [u64; BOARD_DIM] = build_col_masks();

/// Orientation of a full line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Horizontal,
    Vertical,
}

/// A full row (`Horizontal`) or column (`Vertical`) identified by its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub index: usize,
}

impl Line {
    /// Bitmask covering every cell of this line.
    #[inline]
    fn mask(&self) -> u64 {
        match self.kind {
            LineKind::Horizontal => ROW_MASKS[self.index],
            LineKind::Vertical => COL_MASKS[self.index],
        }
    }
}

/// An 8x8 occupancy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board(u64);

impl Board {
    /// A board with every cell empty.
    pub const EMPTY: Self = Self(0);

    /// Builds a board from an 8x8 matrix of `{0, 1}` cell values.
    ///
    /// Rejects wrong dimensions and out-of-range values; this is the
    /// validation boundary for the extractor contract.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, InputError> {
        if rows.len() != BOARD_DIM {
            return Err(InputError::BoardRowCount(rows.len()));
        }

        let mut bits = 0u64;
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != BOARD_DIM {
                return Err(InputError::BoardRowWidth {
                    row,
                    got: cells.len(),
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                match value {
                    0 => {}
                    1 => bits |= 1 << (row * BOARD_DIM + col),
                    _ => return Err(InputError::CellValue { row, col, value }),
                }
            }
        }

        Ok(Self(bits))
    }

    /// Returns the board as an 8x8 matrix of `{0, 1}` values.
    pub fn to_rows(&self) -> [[u8; BOARD_DIM]; BOARD_DIM] {
        let mut rows = [[0u8; BOARD_DIM]; BOARD_DIM];
        for (row, cells) in rows.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = u8::from(self.filled(row, col));
            }
        }
        rows
    }

    /// True if the cell at (row, col) is filled.
    #[inline]
    pub fn filled(&self, row: usize, col: usize) -> bool {
        self.0 & (1 << (row * BOARD_DIM + col)) != 0
    }

    /// Number of filled cells in a row.
    #[inline]
    pub fn row_fill(&self, row: usize) -> u32 {
        (self.0 & ROW_MASKS[row]).count_ones()
    }

    /// Number of filled cells in a column.
    #[inline]
    pub fn col_fill(&self, col: usize) -> u32 {
        (self.0 & COL_MASKS[col]).count_ones()
    }

    /// True iff every occupied cell of the figure, anchored at (row, col),
    /// lands on an empty in-bounds board cell.
    ///
    /// Empty bounding-box cells of the figure are ignored: they neither need
    /// to be in bounds nor empty.
    #[inline]
    pub fn can_place(&self, figure: &Figure, row: usize, col: usize) -> bool {
        // bounds first: the shifted mask is only row-wrap-free in bounds
        figure.fits_at(row, col) && self.0 & figure.shifted_mask(row, col) == 0
    }

    /// Returns a new board with the figure's occupied cells filled.
    #[inline]
    pub fn place(&self, figure: &Figure, row: usize, col: usize) -> Self {
        debug_assert!(self.can_place(figure, row, col));
        Self(self.0 | figure.shifted_mask(row, col))
    }

    /// Inverse of [`Board::place`]: returns a new board with the figure's
    /// occupied cells emptied.
    #[inline]
    pub fn remove(&self, figure: &Figure, row: usize, col: usize) -> Self {
        debug_assert!(figure.fits_at(row, col));
        Self(self.0 & !figure.shifted_mask(row, col))
    }

    /// All completed lines, rows `0..8` first, then columns `0..8`.
    ///
    /// A completed row and a completed column may both be reported for the
    /// same board.
    pub fn completed_lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        for index in 0..BOARD_DIM {
            if self.0 & ROW_MASKS[index] == ROW_MASKS[index] {
                lines.push(Line {
                    kind: LineKind::Horizontal,
                    index,
                });
            }
        }
        for index in 0..BOARD_DIM {
            if self.0 & COL_MASKS[index] == COL_MASKS[index] {
                lines.push(Line {
                    kind: LineKind::Vertical,
                    index,
                });
            }
        }
        lines
    }

    /// Returns a new board with every cell of the given lines emptied.
    ///
    /// The whole batch is applied in one call. Whether this runs after each
    /// placement or once at the end of a sequence is the strategies'
    /// defining behavioral difference, so callers control the timing.
    pub fn clear_lines(&self, lines: &[Line]) -> Self {
        let mut cleared = 0u64;
        for line in lines {
            cleared |= line.mask();
        }
        Self(self.0 & !cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[u8; 8]; 8]) -> Board {
        Board::from_rows(&rows).unwrap()
    }

    fn one_by_one() -> Figure {
        Figure::from_rows(&[[1u8]]).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_wrong_row_count() {
        let rows = vec![vec![0u8; 8]; 7];
        assert_eq!(
            Board::from_rows(&rows),
            Err(InputError::BoardRowCount(7))
        );
    }

    #[test]
    fn test_from_rows_rejects_wrong_row_width() {
        let mut rows = vec![vec![0u8; 8]; 8];
        rows[3] = vec![0u8; 9];
        assert_eq!(
            Board::from_rows(&rows),
            Err(InputError::BoardRowWidth { row: 3, got: 9 })
        );
    }

    #[test]
    fn test_from_rows_rejects_bad_cell_value() {
        let mut rows = [[0u8; 8]; 8];
        rows[2][5] = 2;
        assert_eq!(
            Board::from_rows(&rows),
            Err(InputError::CellValue {
                row: 2,
                col: 5,
                value: 2
            })
        );
    }

    #[test]
    fn test_to_rows_roundtrip() {
        let mut rows = [[0u8; 8]; 8];
        rows[0][0] = 1;
        rows[4][7] = 1;
        rows[7][3] = 1;
        assert_eq!(board(rows).to_rows(), rows);
    }

    #[test]
    fn test_place_then_remove_restores_board() {
        let mut rows = [[0u8; 8]; 8];
        rows[1][1] = 1;
        rows[6][2] = 1;
        let original = board(rows);
        let figure = Figure::from_rows(&[[1u8, 1], [1, 0]]).unwrap();

        for row in 0..8 {
            for col in 0..8 {
                if original.can_place(&figure, row, col) {
                    let placed = original.place(&figure, row, col);
                    assert_eq!(placed.remove(&figure, row, col), original);
                }
            }
        }
    }

    #[test]
    fn test_can_place_respects_bounds_and_collisions() {
        let mut rows = [[0u8; 8]; 8];
        rows[0][0] = 1;
        let b = board(rows);
        let figure = Figure::from_rows(&[[1u8, 1]]).unwrap();

        assert!(!b.can_place(&figure, 0, 0), "collides with filled cell");
        assert!(!b.can_place(&figure, 0, 7), "hangs off the right edge");
        assert!(!b.can_place(&figure, 8, 0), "below the board");
        assert!(b.can_place(&figure, 0, 1));
        assert!(b.can_place(&figure, 7, 6));
    }

    #[test]
    fn test_completed_row_and_column_report_together() {
        let mut rows = [[0u8; 8]; 8];
        rows[2] = [1; 8];
        for r in 0..8 {
            rows[r][5] = 1;
        }
        let lines = board(rows).completed_lines();
        assert_eq!(
            lines,
            vec![
                Line {
                    kind: LineKind::Horizontal,
                    index: 2
                },
                Line {
                    kind: LineKind::Vertical,
                    index: 5
                },
            ]
        );
    }

    #[test]
    fn test_incomplete_lines_not_reported() {
        let mut rows = [[0u8; 8]; 8];
        rows[4] = [1, 1, 1, 1, 1, 1, 1, 0];
        assert!(board(rows).completed_lines().is_empty());
    }

    #[test]
    fn test_clear_lines_empties_whole_batch() {
        let b = board([[1u8; 8]; 8]);
        let cleared = b.clear_lines(&[
            Line {
                kind: LineKind::Horizontal,
                index: 0,
            },
            Line {
                kind: LineKind::Vertical,
                index: 3,
            },
        ]);

        for col in 0..8 {
            assert!(!cleared.filled(0, col));
        }
        for row in 0..8 {
            assert!(!cleared.filled(row, 3));
        }
        assert!(cleared.filled(1, 0));
        assert!(cleared.filled(7, 7));
    }

    #[test]
    fn test_place_does_not_mutate_input() {
        let original = Board::EMPTY;
        let _ = original.place(&one_by_one(), 3, 3);
        assert_eq!(original, Board::EMPTY);
    }
}
