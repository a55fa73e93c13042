//! Figure definitions: the polyomino pieces offered each round.
//!
//! A figure arrives as a rectangular binary matrix (the piece's bounding
//! box) and is stored as an origin-anchored bitmask plus its occupied cell
//! offsets. Fixed-size arrays keep the type `Copy` and heap-free in the
//! solver's hot loop.

use crate::board::BOARD_DIM;
use crate::InputError;

/// Maximum figure bounding-box side length.
pub const MAX_FIGURE_DIM: usize = 5;

/// Maximum number of occupied cells in a figure.
pub const MAX_FIGURE_CELLS: usize = MAX_FIGURE_DIM * MAX_FIGURE_DIM;

/// A polyomino piece as a validated binary bounding-box matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    /// Occupied cells as board-layout bits: bit `i * 8 + j` for offset (i, j).
    mask: u64,
    /// Occupied extent in rows: `max(i) + 1` over occupied cells.
    height: u8,
    /// Occupied extent in columns: `max(j) + 1` over occupied cells.
    width: u8,
    /// Occupied (row, col) offsets in row-major order.
    cells: [(u8, u8); MAX_FIGURE_CELLS],
    cell_count: u8,
}

impl Figure {
    /// Builds a figure from a rectangular matrix of `{0, 1}` values.
    ///
    /// Rejects matrices larger than 5x5, ragged rows, out-of-range values,
    /// and figures with no filled cell at all.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, InputError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || height > MAX_FIGURE_DIM || width == 0 || width > MAX_FIGURE_DIM {
            return Err(InputError::FigureTooLarge {
                rows: height,
                cols: width,
            });
        }

        let mut mask = 0u64;
        let mut cells = [(0u8, 0u8); MAX_FIGURE_CELLS];
        let mut cell_count = 0usize;
        let mut max_row = 0usize;
        let mut max_col = 0usize;

        for (row, row_cells) in rows.iter().enumerate() {
            let row_cells = row_cells.as_ref();
            if row_cells.len() != width {
                return Err(InputError::FigureRaggedRow {
                    row,
                    got: row_cells.len(),
                    expected: width,
                });
            }
            for (col, &value) in row_cells.iter().enumerate() {
                match value {
                    0 => {}
                    1 => {
                        mask |= 1 << (row * BOARD_DIM + col);
                        cells[cell_count] = (row as u8, col as u8);
                        cell_count += 1;
                        max_row = max_row.max(row);
                        max_col = max_col.max(col);
                    }
                    _ => return Err(InputError::CellValue { row, col, value }),
                }
            }
        }

        if cell_count == 0 {
            return Err(InputError::EmptyFigure);
        }

        Ok(Self {
            mask,
            height: (max_row + 1) as u8,
            width: (max_col + 1) as u8,
            cells,
            cell_count: cell_count as u8,
        })
    }

    /// Occupied (row, col) offsets in row-major order.
    #[inline]
    pub fn cells(&self) -> &[(u8, u8)] {
        &self.cells[..self.cell_count as usize]
    }

    /// Number of occupied cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_count as usize
    }

    /// Occupied extent in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Occupied extent in columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// True iff every occupied cell stays on the board when the figure is
    /// anchored at (row, col). Trailing empty bounding-box rows/columns may
    /// hang off the edge.
    #[inline]
    pub fn fits_at(&self, row: usize, col: usize) -> bool {
        row + self.height() <= BOARD_DIM && col + self.width() <= BOARD_DIM
    }

    /// Board bitmask of the figure anchored at (row, col).
    ///
    /// Only valid when `fits_at(row, col)` holds; otherwise the shift wraps
    /// occupied cells into the next row.
    #[inline]
    pub(crate) fn shifted_mask(&self, row: usize, col: usize) -> u64 {
        self.mask << (row * BOARD_DIM + col)
    }

    /// Absolute board cells covered by the figure anchored at (row, col),
    /// in figure row-major order.
    pub fn absolute_cells(&self, row: usize, col: usize) -> Vec<(u8, u8)> {
        self.cells()
            .iter()
            .map(|&(r, c)| (r + row as u8, c + col as u8))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_oversized_matrix() {
        let rows = vec![vec![1u8; 6]; 2];
        assert_eq!(
            Figure::from_rows(&rows),
            Err(InputError::FigureTooLarge { rows: 2, cols: 6 })
        );
        let rows = vec![vec![1u8; 2]; 6];
        assert_eq!(
            Figure::from_rows(&rows),
            Err(InputError::FigureTooLarge { rows: 6, cols: 2 })
        );
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let rows = vec![vec![1u8, 1], vec![1u8]];
        assert_eq!(
            Figure::from_rows(&rows),
            Err(InputError::FigureRaggedRow {
                row: 1,
                got: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn test_rejects_empty_figure() {
        assert_eq!(
            Figure::from_rows(&[[0u8, 0], [0, 0]]),
            Err(InputError::EmptyFigure)
        );
    }

    #[test]
    fn test_rejects_bad_cell_value() {
        assert_eq!(
            Figure::from_rows(&[[1u8, 3]]),
            Err(InputError::CellValue {
                row: 0,
                col: 1,
                value: 3
            })
        );
    }

    #[test]
    fn test_cells_are_row_major() {
        let figure = Figure::from_rows(&[[1u8, 1, 0], [0, 1, 1]]).unwrap();
        assert_eq!(figure.cells(), &[(0, 0), (0, 1), (1, 1), (1, 2)]);
        assert_eq!(figure.height(), 2);
        assert_eq!(figure.width(), 3);
    }

    #[test]
    fn test_extent_ignores_trailing_empty_rows() {
        // bounding box is 3x2 but only the top-left cell is occupied
        let figure = Figure::from_rows(&[[1u8, 0], [0, 0], [0, 0]]).unwrap();
        assert_eq!(figure.height(), 1);
        assert_eq!(figure.width(), 1);
        assert!(figure.fits_at(7, 7));
    }

    #[test]
    fn test_fits_at_occupied_extent() {
        let figure = Figure::from_rows(&[[1u8, 1, 1]]).unwrap();
        assert!(figure.fits_at(0, 5));
        assert!(!figure.fits_at(0, 6));
        assert!(figure.fits_at(7, 0));
        assert!(!figure.fits_at(8, 0));
    }

    #[test]
    fn test_absolute_cells_offsets_anchor() {
        let figure = Figure::from_rows(&[[0u8, 1], [1, 1]]).unwrap();
        assert_eq!(
            figure.absolute_cells(2, 3),
            vec![(2, 4), (3, 3), (3, 4)]
        );
    }
}
