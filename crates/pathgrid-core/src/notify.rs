//! The step-notification seam between the search engine and its caller.
//!
//! The engine calls [`StepNotifier::on_step`] synchronously and waits for it
//! to return. Renderers draw from the lent [`Step`] view; a caller that wants
//! to stop the search returns [`Cancelled`].

use crate::cell::Pos;
use crate::grid::Grid;
use crate::search::UNREACHABLE;

/// Returned by a notifier to stop the running search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search cancelled by caller")]
pub struct Cancelled;

/// What a notifier returns: `Err(Cancelled)` stops the search.
pub type StepResult = Result<(), Cancelled>;

/// Which part of the search produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// End of one expansion: the current cell's neighbors were relaxed.
    Relaxing,
    /// One cell was just marked as part of the reconstructed path.
    Tracing,
}

/// Read-only view of the search lent to a notifier.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) g: &'a [u32],
    pub(crate) current: Pos,
    pub(crate) phase: Phase,
    pub(crate) iteration: usize,
}

impl<'a> Step<'a> {
    /// The grid, with roles as of this step.
    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The cell just expanded (`Relaxing`) or just marked (`Tracing`).
    #[inline]
    pub fn current(&self) -> Pos {
        self.current
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Best known cost from start to `pos`, [`UNREACHABLE`] if unknown.
    pub fn g_score(&self, pos: Pos) -> u32 {
        match self.grid.index(pos) {
            Some(i) => self.g[i],
            None => UNREACHABLE,
        }
    }
}

/// Observer invoked by the search engine after each step.
pub trait StepNotifier {
    fn on_step(&mut self, step: &Step<'_>) -> StepResult;
}

impl<F> StepNotifier for F
where
    F: FnMut(&Step<'_>) -> StepResult,
{
    #[inline]
    fn on_step(&mut self, step: &Step<'_>) -> StepResult {
        self(step)
    }
}

/// Runs without observing anything.
impl StepNotifier for () {
    #[inline]
    fn on_step(&mut self, _: &Step<'_>) -> StepResult {
        Ok(())
    }
}

