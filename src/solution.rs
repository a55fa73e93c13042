//! Result objects handed to the external presenter.
//!
//! A [`Solution`] is assembled once by the solver and never mutated after it
//! is returned; the presenter reads it and throws it away.

use crate::board::{Board, Line};

/// One figure anchored on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Index of the figure in the supplied figure list.
    pub figure_index: usize,
    /// Anchor row of the figure's bounding box.
    pub row: usize,
    /// Anchor column of the figure's bounding box.
    pub col: usize,
    /// Absolute board cells covered, in figure row-major order.
    pub cells: Vec<(u8, u8)>,
}

/// One placement with the board states around its line-clearing, for
/// step-by-step replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub placement: Placement,
    /// Board before the placement.
    pub before: Board,
    /// Board after the placement, before any clearing.
    pub placed: Board,
    /// Lines cleared by this step. Empty for intermediate bounded-strategy
    /// steps, whose batch is attributed to the final step of the sequence.
    pub cleared: Vec<Line>,
    /// Board after clearing; equals `placed` when nothing cleared.
    pub after: Board,
}

/// The ordered placement sequence for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    steps: Vec<Step>,
    final_board: Board,
}

impl Solution {
    pub(crate) fn new(steps: Vec<Step>, final_board: Board) -> Self {
        Self { steps, final_board }
    }

    /// Per-figure trace, in placement order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Board state after all placements and clearings.
    pub fn final_board(&self) -> Board {
        self.final_board
    }

    /// Placements in order, one per step.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.steps.iter().map(|step| &step.placement)
    }

    /// Number of figures placed.
    pub fn movement_count(&self) -> usize {
        self.steps.len()
    }

    /// All completed lines across steps, in step order.
    ///
    /// A line index may repeat: a line cleared by an early step can be
    /// re-completed by a later one.
    pub fn completed_lines(&self) -> Vec<Line> {
        self.steps
            .iter()
            .flat_map(|step| step.cleared.iter().copied())
            .collect()
    }

    /// Total number of completed lines without collecting them.
    pub fn completed_line_count(&self) -> usize {
        self.steps.iter().map(|step| step.cleared.len()).sum()
    }

    /// Index of the first step that completed a line, if any.
    pub(crate) fn earliest_clearing_step(&self) -> Option<usize> {
        self.steps.iter().position(|step| !step.cleared.is_empty())
    }

    /// Swaps out the final step, used by the post-processor to reposition a
    /// non-clearing last placement.
    pub(crate) fn replace_last_step(&mut self, step: Step) {
        debug_assert!(!self.steps.is_empty());
        self.final_board = step.after;
        if let Some(last) = self.steps.last_mut() {
            *last = step;
        }
    }
}
