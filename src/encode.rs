//! Text serialization contracts for external tooling.
//!
//! Three flat dump formats are stable interfaces, not UI:
//! - board dump: 64 space-separated `0`/`1` values, row-major;
//! - figure dump: 25 contiguous `0`/`1` characters, the figure zero-padded
//!   to 5x5 and flattened row-major;
//! - the `Figure N: ...` log line combining the per-figure dumps.
//!
//! The module also parses the text input format of the CLI (blank-line
//! separated board and figure blocks) and renders boards for humans.

use crate::board::{Board, BOARD_CELLS, BOARD_DIM};
use crate::figure::{Figure, MAX_FIGURE_DIM};
use crate::InputError;

/// Flattens a board into 64 space-separated `0`/`1` values, row-major.
pub fn board_dump(board: &Board) -> String {
    let mut output = String::with_capacity(BOARD_CELLS * 2);
    for row in 0..BOARD_DIM {
        for col in 0..BOARD_DIM {
            if !output.is_empty() {
                output.push(' ');
            }
            output.push(if board.filled(row, col) { '1' } else { '0' });
        }
    }
    output
}

/// Flattens a figure into 25 contiguous `0`/`1` characters, zero-padded to
/// 5x5 row-major.
pub fn figure_dump(figure: &Figure) -> String {
    let mut padded = [[b'0'; MAX_FIGURE_DIM]; MAX_FIGURE_DIM];
    for &(row, col) in figure.cells() {
        padded[row as usize][col as usize] = b'1';
    }
    padded
        .iter()
        .flat_map(|row| row.iter().map(|&b| b as char))
        .collect()
}

/// The per-round figure log line: `Figure 1: <dump> Figure 2: <dump> ...`.
pub fn figures_log_line(figures: &[Figure]) -> String {
    figures
        .iter()
        .enumerate()
        .map(|(i, figure)| format!("Figure {}: {}", i + 1, figure_dump(figure)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a board as 8 lines of 8 characters, `.` for empty and `#` for
/// filled, for human-readable step output.
pub fn render_board(board: &Board) -> String {
    let mut output = String::with_capacity(BOARD_DIM * (BOARD_DIM + 1));
    for row in 0..BOARD_DIM {
        for col in 0..BOARD_DIM {
            output.push(if board.filled(row, col) { '#' } else { '.' });
        }
        output.push('\n');
    }
    output
}

/// Parses the CLI input text: blank-line separated blocks of cell rows, the
/// first block being the 8x8 board and every following block a figure.
///
/// `0`/`.` mean empty and `1`/`#` mean filled; whitespace inside a row is
/// ignored, so both `01000011` and `0 1 0 0 0 0 1 1` parse.
pub fn parse_input(text: &str) -> Result<(Board, Vec<Figure>), InputError> {
    let mut blocks: Vec<Vec<Vec<u8>>> = Vec::new();
    let mut current: Vec<Vec<u8>> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(parse_row(line)?);
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    let mut blocks = blocks.into_iter();
    let board_rows = blocks.next().ok_or(InputError::MissingBoard)?;
    let board = Board::from_rows(&board_rows)?;
    let figures = blocks
        .map(|rows| Figure::from_rows(&rows))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((board, figures))
}

fn parse_row(line: &str) -> Result<Vec<u8>, InputError> {
    line.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| match ch {
            '0' | '.' => Ok(0),
            '1' | '#' => Ok(1),
            other => Err(InputError::BadChar(other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[u8; 8]; 8]) -> Board {
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_board_dump_is_row_major() {
        let mut rows = [[0u8; 8]; 8];
        rows[0][1] = 1;
        rows[7][7] = 1;
        let dump = board_dump(&board(rows));

        let tokens: Vec<&str> = dump.split(' ').collect();
        assert_eq!(tokens.len(), 64);
        assert_eq!(tokens[1], "1");
        assert_eq!(tokens[63], "1");
        assert_eq!(tokens.iter().filter(|&&t| t == "1").count(), 2);
    }

    #[test]
    fn test_figure_dump_pads_to_5x5() {
        let figure = Figure::from_rows(&[[1u8, 1], [1, 0]]).unwrap();
        assert_eq!(figure_dump(&figure), "1100010000000000000000000");
    }

    #[test]
    fn test_figures_log_line_is_one_indexed() {
        let dot = Figure::from_rows(&[[1u8]]).unwrap();
        let bar = Figure::from_rows(&[[1u8, 1]]).unwrap();
        assert_eq!(
            figures_log_line(&[dot, bar]),
            "Figure 1: 1000000000000000000000000 Figure 2: 1100000000000000000000000"
        );
    }

    #[test]
    fn test_render_board_snapshot() {
        let mut rows = [[0u8; 8]; 8];
        rows[0] = [1, 1, 1, 0, 0, 0, 0, 0];
        rows[4][4] = 1;
        insta::assert_snapshot!(render_board(&board(rows)), @r"
        ###.....
        ........
        ........
        ........
        ....#...
        ........
        ........
        ........
        ");
    }

    #[test]
    fn test_parse_input_roundtrips_both_alphabets() {
        let text = "\
10000000
00000000
00000000
00000000
00000000
00000000
00000000
00000001

11
10

#.
.#
";
        let (parsed_board, figures) = parse_input(text).unwrap();
        assert!(parsed_board.filled(0, 0));
        assert!(parsed_board.filled(7, 7));
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0], Figure::from_rows(&[[1u8, 1], [1, 0]]).unwrap());
        assert_eq!(figures[1], Figure::from_rows(&[[1u8, 0], [0, 1]]).unwrap());
    }

    #[test]
    fn test_parse_input_accepts_spaced_rows() {
        let mut text = String::new();
        for _ in 0..8 {
            text.push_str("0 0 0 0 0 0 0 0\n");
        }
        text.push_str("\n1 1\n");
        let (parsed_board, figures) = parse_input(&text).unwrap();
        assert_eq!(parsed_board, Board::EMPTY);
        assert_eq!(figures.len(), 1);
    }

    #[test]
    fn test_parse_input_rejects_garbage() {
        assert_eq!(parse_input(""), Err(InputError::MissingBoard));
        assert_eq!(
            parse_input("abc"),
            Err(InputError::BadChar('a'))
        );
    }
}
