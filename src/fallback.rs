//! Fallback heuristics for rounds where nothing clears.
//!
//! Single-best-fit pairs with the bounded strategy: one figure, one
//! placement, chosen to keep the board as compact as possible. Greedy-partial
//! pairs with the exhaustive strategy: seat as many figures as will fit, in
//! order, first position that works.

use log::debug;

use crate::board::{Board, BOARD_DIM};
use crate::figure::Figure;
use crate::solution::{Placement, Solution, Step};
use crate::solver::apply_step;

/// Compactness of a board: the sum over all filled cells of their filled
/// 4-neighbor counts. Edge cells simply have fewer neighbors to check.
pub(crate) fn proximity_score(board: &Board) -> u32 {
    let mut score = 0;
    for row in 0..BOARD_DIM {
        for col in 0..BOARD_DIM {
            if board.filled(row, col) {
                score += adjacent_filled(board, row, col);
            }
        }
    }
    score
}

fn adjacent_filled(board: &Board, row: usize, col: usize) -> u32 {
    let mut count = 0;
    if row > 0 && board.filled(row - 1, col) {
        count += 1;
    }
    if row < BOARD_DIM - 1 && board.filled(row + 1, col) {
        count += 1;
    }
    if col > 0 && board.filled(row, col - 1) {
        count += 1;
    }
    if col < BOARD_DIM - 1 && board.filled(row, col + 1) {
        count += 1;
    }
    count
}

/// Places the single figure that maximizes the resulting proximity score.
///
/// Every figure is tried at every position; ties keep the first candidate in
/// (figure index, row-major position) order. `None` only when no figure fits
/// anywhere.
pub(crate) fn single_best_fit(board: Board, figures: &[Figure]) -> Option<Solution> {
    let mut best: Option<(u32, Solution)> = None;

    for (figure_index, figure) in figures.iter().enumerate() {
        for row in 0..BOARD_DIM {
            for col in 0..BOARD_DIM {
                if !board.can_place(figure, row, col) {
                    continue;
                }
                let placed = board.place(figure, row, col);
                let score = proximity_score(&placed);
                if best.as_ref().map_or(true, |&(s, _)| score > s) {
                    let step = Step {
                        placement: Placement {
                            figure_index,
                            row,
                            col,
                            cells: figure.absolute_cells(row, col),
                        },
                        before: board,
                        placed,
                        cleared: Vec::new(),
                        after: placed,
                    };
                    best = Some((score, Solution::new(vec![step], placed)));
                }
            }
        }
    }

    if let Some((score, _)) = &best {
        debug!("single best fit: proximity score {score}");
    }
    best.map(|(_, solution)| solution)
}

/// Seats figures strictly in supplied order, each at the first valid
/// position in row-major scan, clearing completed lines before moving on.
///
/// A figure that fits nowhere is skipped; the accumulated partial result is
/// returned even when it is empty.
pub(crate) fn greedy_partial(board: Board, figures: &[Figure]) -> Solution {
    let mut steps = Vec::new();
    let mut current = board;

    for (figure_index, figure) in figures.iter().enumerate() {
        let Some((row, col)) = first_fit(&current, figure) else {
            debug!("greedy partial: figure {figure_index} fits nowhere, skipping");
            continue;
        };
        let step = apply_step(current, figure, figure_index, row, col);
        current = step.after;
        steps.push(step);
    }

    Solution::new(steps, current)
}

fn first_fit(board: &Board, figure: &Figure) -> Option<(usize, usize)> {
    for row in 0..BOARD_DIM {
        for col in 0..BOARD_DIM {
            if board.can_place(figure, row, col) {
                return Some((row, col));
            }
        }
    }
    None
}
