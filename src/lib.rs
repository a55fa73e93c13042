//! Block Puzzle Round Solver Library
//!
//! Solves a single round of an 8x8 block-placement puzzle: given the current
//! occupancy grid and up to three pending figures, finds the placement
//! sequence that clears the most full rows/columns, falling back to a
//! compactness heuristic when no sequence clears anything.
//!
//! The grid and figures are handed in as plain binary matrices by an external
//! extractor; the solver returns an immutable [`Solution`] for an external
//! presenter to consume.

pub mod board;
pub mod encode;
mod fallback;
pub mod figure;
pub mod solution;
pub mod solver;

pub use board::{Board, Line, LineKind, BOARD_DIM};
pub use figure::{Figure, MAX_FIGURE_DIM};
pub use solution::{Placement, Solution, Step};
pub use solver::{Solver, Strategy, MAX_MOVEMENTS};

use thiserror::Error;

/// Precondition violations in the matrices handed in by the extractor.
///
/// These are rejected synchronously before any search runs; the solver never
/// produces a `Solution` from malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("board must have {BOARD_DIM} rows, got {0}")]
    BoardRowCount(usize),
    #[error("board row {row} has {got} cells, expected {BOARD_DIM}")]
    BoardRowWidth { row: usize, got: usize },
    #[error("figure must fit within {MAX_FIGURE_DIM}x{MAX_FIGURE_DIM}, got {rows}x{cols}")]
    FigureTooLarge { rows: usize, cols: usize },
    #[error("figure row {row} has {got} cells, expected {expected}")]
    FigureRaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("figure has no filled cells")]
    EmptyFigure,
    #[error("cell at ({row}, {col}) must be 0 or 1, got {value}")]
    CellValue { row: usize, col: usize, value: u8 },
    #[error("unexpected character {0:?} in input")]
    BadChar(char),
    #[error("input contains no board block")]
    MissingBoard,
}

/// Failures of one solve call.
///
/// A round where no placement clears any line is *not* an error; the solver
/// recovers with the compactness fallback and returns a `Solution` with an
/// empty completed-lines list. `NoPlacementPossible` is the only genuine
/// "no solution" outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("no figures supplied")]
    NoFigures,
    #[error("expected at most {MAX_MOVEMENTS} figures, got {count}")]
    TooManyFigures { count: usize },
    #[error("no figure fits anywhere on the board")]
    NoPlacementPossible,
}
