//! Placement search engine.
//!
//! Two selectable strategies behind one interface:
//!
//! - [`Strategy::Bounded`] tries every subset of the offered figures up to a
//!   movement cap, visiting positions near near-complete lines first, and
//!   checks for completed lines only once the whole sequence is down.
//! - [`Strategy::Exhaustive`] places *all* figures in supplied order over
//!   every valid position, clearing completed lines immediately after each
//!   placement, so an early clear can open space for a later figure.
//!
//! Whichever strategy runs, every branch works on its own `Copy` of the
//! board; the inputs are never mutated.

use std::cmp::Reverse;

use log::debug;

use crate::board::{Board, Line, BOARD_DIM};
use crate::fallback;
use crate::figure::Figure;
use crate::solution::{Placement, Solution, Step};
use crate::SolveError;

/// Maximum number of figures placed in one round.
pub const MAX_MOVEMENTS: usize = 3;

/// Search strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Bounded-subset search with end-of-sequence clearing.
    Bounded,
    /// Exhaustive full-assignment search with per-step clearing.
    Exhaustive,
}

/// One-round solver over an extracted board and figure set.
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    strategy: Strategy,
}

impl Solver {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Solves one round.
    ///
    /// Returns a solution even when nothing clears (the fallback heuristics
    /// guarantee at least one placement); fails only with
    /// [`SolveError::NoPlacementPossible`] when no figure fits anywhere.
    pub fn solve(&self, board: Board, figures: &[Figure]) -> Result<Solution, SolveError> {
        if figures.is_empty() {
            return Err(SolveError::NoFigures);
        }
        if figures.len() > MAX_MOVEMENTS {
            return Err(SolveError::TooManyFigures {
                count: figures.len(),
            });
        }

        match self.strategy {
            Strategy::Bounded => {
                if let Some(candidate) = bounded_search(board, figures) {
                    return Ok(assemble_bounded(board, figures, &candidate));
                }
                debug!("no clearing sequence found, falling back to single best fit");
                fallback::single_best_fit(board, figures).ok_or(SolveError::NoPlacementPossible)
            }
            Strategy::Exhaustive => {
                if let Some(mut solution) = exhaustive_search(board, figures) {
                    recenter_last_step(&mut solution, board, figures);
                    return Ok(solution);
                }
                debug!("no full assignment seats every figure, falling back to greedy partial");
                let solution = fallback::greedy_partial(board, figures);
                if solution.steps().is_empty() {
                    Err(SolveError::NoPlacementPossible)
                } else {
                    Ok(solution)
                }
            }
        }
    }
}

/// Builds one step: place the figure, detect completed lines, clear them.
pub(crate) fn apply_step(
    board: Board,
    figure: &Figure,
    figure_index: usize,
    row: usize,
    col: usize,
) -> Step {
    let placed = board.place(figure, row, col);
    let cleared = placed.completed_lines();
    let after = placed.clear_lines(&cleared);
    Step {
        placement: Placement {
            figure_index,
            row,
            col,
            cells: figure.absolute_cells(row, col),
        },
        before: board,
        placed,
        cleared,
        after,
    }
}

// ---------------------------------------------------------------------------
// Bounded strategy
// ---------------------------------------------------------------------------

/// A clearing sequence found by the bounded search. The board is the state
/// with all placements down and the line batch not yet cleared.
struct BoundedCandidate {
    board: Board,
    placements: Vec<(usize, usize, usize)>,
    lines: Vec<Line>,
}

/// All 64 board positions, sorted stable-descending by how close the
/// position's row or column is to completion on the input board.
///
/// The stable sort keeps row-major order among equal scores, which fixes the
/// first-found winner for tied candidates.
fn sorted_positions(board: &Board) -> Vec<(usize, usize)> {
    let mut positions: Vec<(usize, usize)> = (0..BOARD_DIM)
        .flat_map(|row| (0..BOARD_DIM).map(move |col| (row, col)))
        .collect();
    positions.sort_by_key(|&(row, col)| Reverse(board.row_fill(row).max(board.col_fill(col))));
    positions
}

/// Tries movement budgets 1..=min(3, figure count) and keeps the candidate
/// with strictly the most completed lines; the first found wins ties.
fn bounded_search(board: Board, figures: &[Figure]) -> Option<BoundedCandidate> {
    let positions = sorted_positions(&board);
    let cap = figures.len().min(MAX_MOVEMENTS);

    let mut best: Option<BoundedCandidate> = None;
    for budget in 1..=cap {
        let mut used = [false; MAX_MOVEMENTS];
        let mut path = Vec::with_capacity(budget);
        let found = bounded_dfs(board, figures, budget, &positions, &mut used, &mut path);
        if let Some(candidate) = found {
            debug!("bounded search: budget {budget} -> {} lines", candidate.lines.len());
            if best
                .as_ref()
                .map_or(true, |b| candidate.lines.len() > b.lines.len())
            {
                best = Some(candidate);
            }
        } else {
            debug!("bounded search: budget {budget} -> no clearing sequence");
        }
    }
    best
}

/// Depth-first assignment of unused figures to positions, one per level.
///
/// Positions are the outer loop and figures the inner one, so tied results
/// resolve toward near-complete lines. The recursive call receives its own
/// board copy from `place`; the caller's board is never touched, so there is
/// nothing to undo when a branch returns.
fn bounded_dfs(
    board: Board,
    figures: &[Figure],
    remaining: usize,
    positions: &[(usize, usize)],
    used: &mut [bool; MAX_MOVEMENTS],
    path: &mut Vec<(usize, usize, usize)>,
) -> Option<BoundedCandidate> {
    if remaining == 0 {
        let lines = board.completed_lines();
        if lines.is_empty() {
            return None;
        }
        return Some(BoundedCandidate {
            board,
            placements: path.clone(),
            lines,
        });
    }

    let mut best: Option<BoundedCandidate> = None;
    for &(row, col) in positions {
        for (figure_index, figure) in figures.iter().enumerate() {
            if used[figure_index] || !board.can_place(figure, row, col) {
                continue;
            }

            used[figure_index] = true;
            path.push((figure_index, row, col));
            let found = bounded_dfs(
                board.place(figure, row, col),
                figures,
                remaining - 1,
                positions,
                used,
                path,
            );
            path.pop();
            used[figure_index] = false;

            if let Some(candidate) = found {
                if best
                    .as_ref()
                    .map_or(true, |b| candidate.lines.len() > b.lines.len())
                {
                    best = Some(candidate);
                }
            }
        }
    }
    best
}

/// Replays a bounded candidate into a per-step trace.
///
/// The bounded strategy clears only once at the end of the sequence, so the
/// whole line batch is attributed to the final step.
fn assemble_bounded(input: Board, figures: &[Figure], candidate: &BoundedCandidate) -> Solution {
    let last = candidate.placements.len() - 1;
    let mut steps = Vec::with_capacity(candidate.placements.len());
    let mut board = input;

    for (i, &(figure_index, row, col)) in candidate.placements.iter().enumerate() {
        let figure = &figures[figure_index];
        let placed = board.place(figure, row, col);
        let (cleared, after) = if i == last {
            (
                candidate.lines.clone(),
                placed.clear_lines(&candidate.lines),
            )
        } else {
            (Vec::new(), placed)
        };
        steps.push(Step {
            placement: Placement {
                figure_index,
                row,
                col,
                cells: figure.absolute_cells(row, col),
            },
            before: board,
            placed,
            cleared,
            after,
        });
        board = after;
    }

    debug_assert_eq!(steps.last().map(|s| s.placed), Some(candidate.board));
    Solution::new(steps, board)
}

// ---------------------------------------------------------------------------
// Exhaustive strategy
// ---------------------------------------------------------------------------

/// Enumerates every full assignment (all figures, supplied order, row-major
/// positions) and keeps the best one under [`beats_current`].
fn exhaustive_search(board: Board, figures: &[Figure]) -> Option<Solution> {
    let mut best: Option<Solution> = None;
    let mut evaluated = 0usize;
    exhaustive_dfs(board, figures, 0, &mut Vec::new(), &mut best, &mut evaluated);
    debug!("exhaustive search evaluated {evaluated} full assignments");
    best
}

fn exhaustive_dfs(
    board: Board,
    figures: &[Figure],
    index: usize,
    steps: &mut Vec<Step>,
    best: &mut Option<Solution>,
    evaluated: &mut usize,
) {
    if index == figures.len() {
        *evaluated += 1;
        let replace = match best {
            None => true,
            Some(current) => beats_current(steps, current),
        };
        if replace {
            *best = Some(Solution::new(steps.clone(), board));
        }
        return;
    }

    let figure = &figures[index];
    for row in 0..BOARD_DIM {
        for col in 0..BOARD_DIM {
            if !board.can_place(figure, row, col) {
                continue;
            }
            let step = apply_step(board, figure, index, row, col);
            let next = step.after;
            steps.push(step);
            exhaustive_dfs(next, figures, index + 1, steps, best, evaluated);
            steps.pop();
        }
    }
}

/// Full-candidate comparator, strict on every criterion so the earlier
/// candidate in enumeration order wins ties:
///
/// 1. more completed lines in total;
/// 2. fewer placements (degenerate while every full assignment places all
///    figures, kept for the contract);
/// 3. earlier first clearing step; a no-op when neither candidate cleared.
fn beats_current(steps: &[Step], current: &Solution) -> bool {
    let lines: usize = steps.iter().map(|step| step.cleared.len()).sum();
    let current_lines = current.completed_line_count();
    if lines != current_lines {
        return lines > current_lines;
    }

    if steps.len() != current.movement_count() {
        return steps.len() < current.movement_count();
    }

    let earliest = steps.iter().position(|step| !step.cleared.is_empty());
    match (earliest, current.earliest_clearing_step()) {
        (Some(candidate), Some(current)) => candidate < current,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Post-processor
// ---------------------------------------------------------------------------

/// Cosmetic refinement of the exhaustive winner: when the final step cleared
/// nothing, re-place that figure on the board preceding it at the valid
/// anchor closest to the board center (3.5, 3.5).
///
/// Line-clearing is not re-run; the branch condition already established this
/// step clears nothing.
fn recenter_last_step(solution: &mut Solution, input: Board, figures: &[Figure]) {
    let Some(last) = solution.steps().last() else {
        return;
    };
    if !last.cleared.is_empty() {
        return;
    }

    let figure_index = last.placement.figure_index;
    let figure = &figures[figure_index];
    let base = match solution.steps().len().checked_sub(2) {
        Some(i) => solution.steps()[i].after,
        None => input,
    };

    let mut best: Option<(f64, (usize, usize))> = None;
    for row in 0..BOARD_DIM {
        for col in 0..BOARD_DIM {
            if !base.can_place(figure, row, col) {
                continue;
            }
            // squared distance orders identically to the distance itself
            let dr = row as f64 - 3.5;
            let dc = col as f64 - 3.5;
            let distance = dr * dr + dc * dc;
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, (row, col)));
            }
        }
    }

    // the step's own anchor is always a valid candidate, so `best` is set
    if let Some((_, (row, col))) = best {
        debug!("recentering final placement to ({row}, {col})");
        let placed = base.place(figure, row, col);
        solution.replace_last_step(Step {
            placement: Placement {
                figure_index,
                row,
                col,
                cells: figure.absolute_cells(row, col),
            },
            before: base,
            placed,
            cleared: Vec::new(),
            after: placed,
        });
    }
}
