//! A* search over a [`Grid`].
//!
//! [`AStar`] owns the per-run bookkeeping (g/f score maps, came-from links,
//! the [`Frontier`] and its membership set) and writes its progress into the
//! grid's roles as it goes: discovered cells become `Open`, expanded cells
//! `Closed`, and the reconstructed path `Path`.
//!
//! Neighbors come from the grid's cache, so callers must call
//! [`Grid::refresh_all_neighbors`] after editing barriers and before
//! searching. [`Board::plan`](crate::Board::plan) does this for you.

use log::{debug, trace};

use crate::cell::{Pos, Role};
use crate::distance::manhattan;
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::notify::{Phase, Step, StepNotifier, StepResult};

/// Score of a cell no path has reached yet.
pub const UNREACHABLE: u32 = u32::MAX;

/// Cost of one orthogonal move.
const STEP_COST: u32 = 1;

/// Lifecycle of an [`AStar`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Initialized,
    Running,
    Succeeded,
    Exhausted,
    Cancelled,
}

impl SearchState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchState::Succeeded | SearchState::Exhausted | SearchState::Cancelled
        )
    }
}

/// Terminal outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchResult {
    /// The end cell was reached; `length` is the number of moves.
    Succeeded { length: u32 },
    /// The frontier ran dry without reaching the end cell.
    Exhausted,
    /// The step notifier asked to stop.
    Cancelled,
}

impl SearchResult {
    pub fn is_success(self) -> bool {
        matches!(self, SearchResult::Succeeded { .. })
    }

    /// Path length in moves, if the search succeeded.
    pub fn length(self) -> Option<u32> {
        match self {
            SearchResult::Succeeded { length } => Some(length),
            _ => None,
        }
    }
}

/// One A* run from `start` to `end` over a borrowed grid.
pub struct AStar<'g> {
    grid: &'g mut Grid,
    start: Pos,
    end: Pos,
    start_idx: usize,
    end_idx: usize,
    g: Vec<u32>,
    f: Vec<u32>,
    came_from: Vec<Option<Pos>>,
    frontier: Frontier,
    open: Vec<bool>,
    // scratch copy of the current cell's neighbors
    nbuf: Vec<Pos>,
    state: SearchState,
    result: Option<SearchResult>,
    path: Vec<Pos>,
    expanded: usize,
}

impl<'g> AStar<'g> {
    /// Seed a search: `g[start] = 0`, `f[start] = h(start, end)`, frontier
    /// and open set hold only `start`.
    ///
    /// Fails with `OutOfRange` if either endpoint lies outside the grid.
    pub fn new(grid: &'g mut Grid, start: Pos, end: Pos) -> Result<Self> {
        let start_idx = checked_index(grid, start)?;
        let end_idx = checked_index(grid, end)?;
        let len = grid.len();

        let mut g = vec![UNREACHABLE; len];
        let mut f = vec![UNREACHABLE; len];
        g[start_idx] = 0;
        f[start_idx] = manhattan(start, end);

        let mut frontier = Frontier::new();
        frontier.push(f[start_idx], start);
        let mut open = vec![false; len];
        open[start_idx] = true;

        Ok(Self {
            grid,
            start,
            end,
            start_idx,
            end_idx,
            g,
            f,
            came_from: vec![None; len],
            frontier,
            open,
            nbuf: Vec::with_capacity(4),
            state: SearchState::Initialized,
            result: None,
            path: Vec::new(),
            expanded: 0,
        })
    }

    /// Drive the search to a terminal outcome.
    ///
    /// `notifier` is called once per expanded cell and once per cell marked
    /// on the reconstructed path. Once terminal, further calls return the
    /// recorded outcome without searching again.
    pub fn run<N>(&mut self, notifier: &mut N) -> Result<SearchResult>
    where
        N: StepNotifier + ?Sized,
    {
        if let Some(result) = self.result {
            return Ok(result);
        }
        self.state = SearchState::Running;
        debug!(
            "astar: {} -> {} on {}x{} grid",
            self.start,
            self.end,
            self.grid.size(),
            self.grid.size()
        );

        let result = self.search(notifier)?;

        self.state = match result {
            SearchResult::Succeeded { .. } => SearchState::Succeeded,
            SearchResult::Exhausted => SearchState::Exhausted,
            SearchResult::Cancelled => SearchState::Cancelled,
        };
        self.result = Some(result);
        debug!("astar: {:?} after {} expansions", result, self.expanded);
        Ok(result)
    }

    fn search<N>(&mut self, notifier: &mut N) -> Result<SearchResult>
    where
        N: StepNotifier + ?Sized,
    {
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let result = loop {
            if self.frontier.is_empty() {
                break SearchResult::Exhausted;
            }
            let current = self.frontier.pop_min()?.pos;
            let ci = self.idx(current);
            self.open[ci] = false;
            self.expanded += 1;

            if ci == self.end_idx {
                break self.reconstruct(notifier)?;
            }

            let current_g = self.g[ci];
            trace!("astar: expand {} g={} f={}", current, current_g, self.f[ci]);

            nbuf.clear();
            nbuf.extend_from_slice(self.grid.neighbors(current));

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.index(np) else {
                    continue;
                };
                let tentative_g = current_g + STEP_COST;
                if tentative_g >= self.g[ni] {
                    continue;
                }
                self.came_from[ni] = Some(current);
                self.g[ni] = tentative_g;
                self.f[ni] = tentative_g + manhattan(np, self.end);
                if !self.open[ni] {
                    self.frontier.push(self.f[ni], np);
                    self.open[ni] = true;
                    self.grid.set_role(np, Role::Open)?;
                }
            }

            if self.notify(notifier, current, Phase::Relaxing).is_err() {
                break SearchResult::Cancelled;
            }

            if ci != self.start_idx {
                self.grid.set_role(current, Role::Closed)?;
            }
        };

        self.nbuf = nbuf;
        Ok(result)
    }

    /// Walk came-from links back from the end, marking every cell strictly
    /// between the endpoints as `Path`, then give the end cell its `End` role.
    fn reconstruct<N>(&mut self, notifier: &mut N) -> Result<SearchResult>
    where
        N: StepNotifier + ?Sized,
    {
        let mut path = vec![self.end];
        let mut current = self.end;
        while let Some(prev) = self.came_from[self.idx(current)] {
            path.push(prev);
            if prev != self.start {
                self.grid.set_role(prev, Role::Path)?;
                if self.notify(notifier, prev, Phase::Tracing).is_err() {
                    return Ok(SearchResult::Cancelled);
                }
            }
            current = prev;
        }
        path.reverse();
        self.path = path;
        self.grid.set_role(self.end, Role::End)?;
        Ok(SearchResult::Succeeded {
            length: self.g[self.end_idx],
        })
    }

    fn notify<N>(&self, notifier: &mut N, current: Pos, phase: Phase) -> StepResult
    where
        N: StepNotifier + ?Sized,
    {
        notifier.on_step(&Step {
            grid: &*self.grid,
            g: &self.g,
            current,
            phase,
            iteration: self.expanded,
        })
    }

    /// Flat index of a position taken from the grid itself (frontier
    /// entries, neighbor lists, came-from links). Those are always in
    /// range, so the fallback is never taken.
    #[inline]
    fn idx(&self, p: Pos) -> usize {
        let i = self.grid.index(p);
        debug_assert!(i.is_some(), "{p} is outside the grid");
        i.unwrap_or(self.start_idx)
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Outcome, once the run is terminal.
    pub fn result(&self) -> Option<SearchResult> {
        self.result
    }

    /// Best known cost from start to `pos`.
    pub fn g_score(&self, pos: Pos) -> u32 {
        self.grid.index(pos).map_or(UNREACHABLE, |i| self.g[i])
    }

    /// `g + h` for `pos`.
    pub fn f_score(&self, pos: Pos) -> u32 {
        self.grid.index(pos).map_or(UNREACHABLE, |i| self.f[i])
    }

    /// Predecessor of `pos` on its best known path.
    pub fn came_from(&self, pos: Pos) -> Option<Pos> {
        self.grid.index(pos).and_then(|i| self.came_from[i])
    }

    /// The reconstructed path, start to end inclusive. Empty unless the run
    /// succeeded.
    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    /// Number of cells popped from the frontier.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}

fn checked_index(grid: &Grid, pos: Pos) -> Result<usize> {
    grid.index(pos).ok_or(Error::OutOfRange {
        row: pos.row,
        col: pos.col,
        n: grid.size(),
    })
}

/// Run A* from `start` to `end` on `grid`, notifying after every step.
///
/// The grid's neighbor cache must be fresh.
pub fn run_search<N>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    notifier: &mut N,
) -> Result<SearchResult>
where
    N: StepNotifier + ?Sized,
{
    AStar::new(grid, start, end)?.run(notifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Cancelled;

    fn open_grid(n: i32) -> Grid {
        let mut g = Grid::new(n, n * 10).unwrap();
        g.refresh_all_neighbors();
        g
    }

    /// 3x3 grid with a wall down column 1, optionally leaving (1, 1) open.
    fn walled(gap: bool) -> Grid {
        let mut g = Grid::new(3, 30).unwrap();
        for row in 0..3 {
            g.set_role(Pos::new(row, 1), Role::Barrier).unwrap();
        }
        if gap {
            g.cell_at_mut(1, 1).unwrap().reset();
        }
        g.refresh_all_neighbors();
        g
    }

    #[test]
    fn open_grid_path_is_manhattan() {
        for n in [2, 3, 5, 8] {
            for (start, end) in [
                (Pos::new(0, 0), Pos::new(n - 1, n - 1)),
                (Pos::new(n - 1, 0), Pos::new(0, n - 1)),
                (Pos::new(0, 1), Pos::new(n - 1, 0)),
                (Pos::new(n / 2, n / 2), Pos::new(0, 0)),
            ] {
                if start == end {
                    continue;
                }
                let mut grid = open_grid(n);
                let result = run_search(&mut grid, start, end, &mut ()).unwrap();
                assert_eq!(
                    result,
                    SearchResult::Succeeded {
                        length: manhattan(start, end)
                    },
                    "n={n} {start} -> {end}"
                );
            }
        }
    }

    #[test]
    fn five_by_five_corner_to_corner() {
        let mut grid = open_grid(5);
        let (start, end) = (Pos::new(0, 0), Pos::new(4, 4));
        grid.set_role(start, Role::Start).unwrap();
        grid.set_role(end, Role::End).unwrap();

        let mut astar = AStar::new(&mut grid, start, end).unwrap();
        let result = astar.run(&mut ()).unwrap();
        assert_eq!(result, SearchResult::Succeeded { length: 8 });
        assert_eq!(astar.state(), SearchState::Succeeded);

        let path = astar.path().to_vec();
        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        drop(astar);

        for p in &path[1..path.len() - 1] {
            assert_eq!(grid.role_at(*p).unwrap(), Role::Path, "{p}");
        }
        assert_eq!(grid.role_at(end).unwrap(), Role::End);
        assert_eq!(grid.role_at(start).unwrap(), Role::Start);
        assert_eq!(grid.count(Role::Path), 7);
    }

    #[test]
    fn path_is_contiguous() {
        let mut grid = Grid::new(7, 70).unwrap();
        for row in 0..6 {
            grid.set_role(Pos::new(row, 3), Role::Barrier).unwrap();
        }
        grid.refresh_all_neighbors();

        let mut astar = AStar::new(&mut grid, Pos::new(0, 0), Pos::new(0, 6)).unwrap();
        let result = astar.run(&mut ()).unwrap();
        // Down to row 6, across and back up.
        assert_eq!(result, SearchResult::Succeeded { length: 18 });
        for w in astar.path().windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn single_gap_is_used() {
        let mut grid = walled(true);
        let mut astar = AStar::new(&mut grid, Pos::new(0, 0), Pos::new(2, 2)).unwrap();
        let result = astar.run(&mut ()).unwrap();
        assert_eq!(result, SearchResult::Succeeded { length: 4 });
        assert!(astar.path().contains(&Pos::new(1, 1)));
    }

    #[test]
    fn closed_wall_exhausts() {
        let mut grid = walled(false);
        let mut astar = AStar::new(&mut grid, Pos::new(0, 0), Pos::new(2, 2)).unwrap();
        assert_eq!(astar.run(&mut ()).unwrap(), SearchResult::Exhausted);
        assert_eq!(astar.state(), SearchState::Exhausted);
        assert!(astar.path().is_empty());
        assert_eq!(astar.g_score(Pos::new(2, 2)), UNREACHABLE);
    }

    #[test]
    fn enclosed_end_exhausts() {
        for n in [4, 6, 9] {
            let mut grid = Grid::new(n, n).unwrap();
            let end = Pos::new(n / 2, n / 2);
            for (dr, dc) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                grid.set_role(end.shift(dr, dc), Role::Barrier).unwrap();
            }
            grid.refresh_all_neighbors();
            let result = run_search(&mut grid, Pos::new(0, 0), end, &mut ()).unwrap();
            assert_eq!(result, SearchResult::Exhausted, "n={n}");
        }
    }

    #[test]
    fn g_scores_never_increase() {
        let mut grid = Grid::new(6, 60).unwrap();
        for p in [Pos::new(1, 1), Pos::new(1, 2), Pos::new(3, 3), Pos::new(4, 1)] {
            grid.set_role(p, Role::Barrier).unwrap();
        }
        grid.refresh_all_neighbors();

        let mut last = vec![UNREACHABLE; grid.len()];
        let mut steps = 0;
        let mut watch = |step: &Step<'_>| -> StepResult {
            for (i, cell) in step.grid().iter().enumerate() {
                let g = step.g_score(cell.pos());
                assert!(g <= last[i], "g rose at {}", cell.pos());
                last[i] = g;
            }
            steps += 1;
            Ok(())
        };
        let result = run_search(&mut grid, Pos::new(0, 0), Pos::new(5, 5), &mut watch).unwrap();
        assert!(result.is_success());
        assert!(steps > 0);
    }

    #[test]
    fn notifier_sees_relaxing_then_tracing() {
        let mut grid = open_grid(4);
        let mut phases = Vec::new();
        let mut record = |step: &Step<'_>| -> StepResult {
            phases.push(step.phase());
            Ok(())
        };
        let result = run_search(&mut grid, Pos::new(0, 0), Pos::new(0, 3), &mut record).unwrap();
        assert_eq!(result, SearchResult::Succeeded { length: 3 });

        let tracing = phases.iter().filter(|p| **p == Phase::Tracing).count();
        // Two cells strictly between the endpoints.
        assert_eq!(tracing, 2);
        let first_trace = phases.iter().position(|p| *p == Phase::Tracing).unwrap();
        assert!(phases[..first_trace].iter().all(|p| *p == Phase::Relaxing));
        assert!(phases[first_trace..].iter().all(|p| *p == Phase::Tracing));
    }

    #[test]
    fn first_expansion_opens_neighbors() {
        let mut grid = open_grid(5);
        let start = Pos::new(2, 2);
        grid.set_role(start, Role::Start).unwrap();
        let mut stop_after_one = |_: &Step<'_>| -> StepResult { Err(Cancelled) };
        let result = run_search(&mut grid, start, Pos::new(4, 4), &mut stop_after_one).unwrap();
        assert_eq!(result, SearchResult::Cancelled);
        // Start expanded once; its four neighbors discovered, start kept.
        assert_eq!(grid.count(Role::Open), 4);
        assert_eq!(grid.role_at(start).unwrap(), Role::Start);
    }

    #[test]
    fn cancellation_stops_after_k_steps() {
        let mut grid = open_grid(10);
        let mut calls = 0;
        let mut stop_at_three = |_: &Step<'_>| -> StepResult {
            calls += 1;
            if calls == 3 { Err(Cancelled) } else { Ok(()) }
        };
        let mut astar = AStar::new(&mut grid, Pos::new(0, 0), Pos::new(9, 9)).unwrap();
        assert_eq!(astar.run(&mut stop_at_three).unwrap(), SearchResult::Cancelled);
        assert_eq!(astar.state(), SearchState::Cancelled);
        assert_eq!(astar.expanded(), 3);
        assert!(astar.path().is_empty());
        assert_eq!(calls, 3);
    }

    #[test]
    fn cancellation_during_tracing() {
        let mut grid = open_grid(4);
        let mut stop_on_trace = |step: &Step<'_>| -> StepResult {
            match step.phase() {
                Phase::Tracing => Err(Cancelled),
                Phase::Relaxing => Ok(()),
            }
        };
        let result = run_search(&mut grid, Pos::new(0, 0), Pos::new(3, 3), &mut stop_on_trace);
        assert_eq!(result.unwrap(), SearchResult::Cancelled);
        assert_eq!(grid.count(Role::Path), 1);
    }

    #[test]
    fn terminal_run_is_not_repeated() {
        let mut grid = open_grid(3);
        let mut astar = AStar::new(&mut grid, Pos::new(0, 0), Pos::new(2, 0)).unwrap();
        let first = astar.run(&mut ()).unwrap();
        assert!(astar.state().is_terminal());
        assert_eq!(astar.result(), Some(first));
        let mut calls = 0;
        let mut count = |_: &Step<'_>| -> StepResult {
            calls += 1;
            Ok(())
        };
        assert_eq!(astar.run(&mut count).unwrap(), first);
        assert_eq!(calls, 0);
    }

    #[test]
    fn unit_notifier_observes_nothing() {
        let mut grid = open_grid(3);
        let result = run_search(&mut grid, Pos::new(0, 0), Pos::new(2, 2), &mut ()).unwrap();
        assert_eq!(result, SearchResult::Succeeded { length: 4 });
        assert_eq!(result.length(), Some(4));
        assert_eq!(SearchResult::Exhausted.length(), None);
    }

    #[test]
    fn start_equal_to_end_succeeds_immediately() {
        let mut grid = open_grid(3);
        let p = Pos::new(1, 1);
        let result = run_search(&mut grid, p, p, &mut ()).unwrap();
        assert_eq!(result, SearchResult::Succeeded { length: 0 });
        assert_eq!(grid.role_at(p).unwrap(), Role::End);
    }

    #[test]
    fn stale_neighbors_are_used_as_is() {
        let mut grid = Grid::new(3, 30).unwrap();
        for row in 0..3 {
            grid.set_role(Pos::new(row, 1), Role::Barrier).unwrap();
        }
        // No refresh: every neighbor list is still empty.
        let result = run_search(&mut grid, Pos::new(0, 0), Pos::new(0, 2), &mut ()).unwrap();
        assert_eq!(result, SearchResult::Exhausted);
    }

    #[test]
    fn endpoints_are_bounds_checked() {
        let mut grid = open_grid(3);
        assert!(matches!(
            AStar::new(&mut grid, Pos::new(0, 0), Pos::new(3, 0)),
            Err(Error::OutOfRange { row: 3, col: 0, n: 3 })
        ));
        assert_eq!(
            AStar::new(&mut grid, Pos::new(-1, 0), Pos::new(0, 0)).err(),
            Some(Error::OutOfRange { row: -1, col: 0, n: 3 })
        );
    }

    #[test]
    fn seeds_start_scores() {
        let mut grid = open_grid(5);
        let astar = AStar::new(&mut grid, Pos::new(0, 0), Pos::new(3, 4)).unwrap();
        assert_eq!(astar.state(), SearchState::Initialized);
        assert_eq!(astar.g_score(Pos::new(0, 0)), 0);
        assert_eq!(astar.f_score(Pos::new(0, 0)), 7);
        assert_eq!(astar.g_score(Pos::new(1, 1)), UNREACHABLE);
        assert_eq!(astar.came_from(Pos::new(0, 0)), None);
    }

    #[test]
    fn came_from_never_holds_start() {
        let mut grid = open_grid(4);
        let start = Pos::new(1, 1);
        let mut astar = AStar::new(&mut grid, start, Pos::new(3, 3)).unwrap();
        astar.run(&mut ()).unwrap();
        assert_eq!(astar.came_from(start), None);
        assert_eq!(astar.came_from(Pos::new(2, 1)), Some(start));
    }
}
