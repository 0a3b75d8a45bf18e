//! The [`Board`]: a [`Grid`] plus its designated start and end cells.
//!
//! `Board` is the editing surface a UI talks to. It keeps at most one
//! `Start` and one `End` cell by silently replacing: designating a new start
//! resets the previous one to `Empty`, and overwriting an endpoint with
//! another role clears that endpoint's slot.

use log::debug;

use crate::cell::{Pos, Role};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::notify::StepNotifier;
use crate::search::{AStar, SearchResult};

/// A grid with single-start / single-end bookkeeping.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    start: Option<Pos>,
    end: Option<Pos>,
    path: Vec<Pos>,
}

impl Board {
    /// An empty `n`×`n` board over `total_width` pixels.
    pub fn new(n: i32, total_width: i32) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(n, total_width)?,
            start: None,
            end: None,
            path: Vec::new(),
        })
    }

    /// Parse a square text layout, one line per row.
    ///
    /// `.` empty, `#` barrier, `S` start, `E` end; the search glyphs `o`,
    /// `x` and `*` are accepted too. Blank lines are ignored. A second `S` or
    /// `E` replaces the first.
    pub fn from_layout(text: &str, total_width: i32) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let n = lines.len();
        for (i, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != n {
                return Err(Error::InconsistentLayout {
                    line: i + 1,
                    expected: n,
                    found,
                });
            }
        }

        let mut board = Board::new(n as i32, total_width)?;
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                let role = Role::from_glyph(ch).ok_or(Error::InvalidGlyph {
                    ch,
                    row: pos.row,
                    col: pos.col,
                })?;
                match role {
                    Role::Start => board.set_start(pos)?,
                    Role::End => board.set_end(pos)?,
                    Role::Barrier => board.set_barrier(pos)?,
                    other => board.grid.set_role(pos, other)?,
                }
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Path found by the last successful [`plan`](Board::plan), start to end
    /// inclusive. Empty otherwise.
    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    /// Forget the slot(s) currently pointing at `pos`.
    fn release(&mut self, pos: Pos) {
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
    }

    /// Make `pos` the start cell, resetting any previous start.
    pub fn set_start(&mut self, pos: Pos) -> Result<()> {
        self.grid.role_at(pos)?;
        if let Some(old) = self.start.filter(|&old| old != pos) {
            self.grid.set_role(old, Role::Empty)?;
        }
        self.release(pos);
        self.grid.set_role(pos, Role::Start)?;
        self.start = Some(pos);
        Ok(())
    }

    /// Make `pos` the end cell, resetting any previous end.
    pub fn set_end(&mut self, pos: Pos) -> Result<()> {
        self.grid.role_at(pos)?;
        if let Some(old) = self.end.filter(|&old| old != pos) {
            self.grid.set_role(old, Role::Empty)?;
        }
        self.release(pos);
        self.grid.set_role(pos, Role::End)?;
        self.end = Some(pos);
        Ok(())
    }

    /// Turn `pos` into a barrier. Takes over an endpoint if it sits there.
    pub fn set_barrier(&mut self, pos: Pos) -> Result<()> {
        self.grid.set_role(pos, Role::Barrier)?;
        self.release(pos);
        Ok(())
    }

    /// Reset `pos` to `Empty`, whatever it was.
    pub fn clear(&mut self, pos: Pos) -> Result<()> {
        self.grid.set_role(pos, Role::Empty)?;
        self.release(pos);
        Ok(())
    }

    /// Primary-click placement: the first free slot among start, end,
    /// barrier.
    ///
    /// Returns the role given to `pos`, or `None` if `pos` is the current
    /// start or end and was left alone.
    pub fn place(&mut self, pos: Pos) -> Result<Option<Role>> {
        self.grid.role_at(pos)?;
        let on_start = self.start == Some(pos);
        let on_end = self.end == Some(pos);
        if self.start.is_none() && !on_end {
            self.set_start(pos)?;
            Ok(Some(Role::Start))
        } else if self.end.is_none() && !on_start {
            self.set_end(pos)?;
            Ok(Some(Role::End))
        } else if !on_start && !on_end {
            self.set_barrier(pos)?;
            Ok(Some(Role::Barrier))
        } else {
            Ok(None)
        }
    }

    /// Empty the whole board, endpoints included.
    pub fn clear_all(&mut self) {
        self.grid.reset_all();
        self.start = None;
        self.end = None;
        self.path.clear();
    }

    /// Plan a path between the designated endpoints.
    ///
    /// Marks from the previous run are wiped and the neighbor cache is
    /// rebuilt from the current barriers before searching. Endpoint roles
    /// are restored afterwards, even when the search was cancelled.
    pub fn plan<N>(&mut self, notifier: &mut N) -> Result<SearchResult>
    where
        N: StepNotifier + ?Sized,
    {
        let start = self.start.ok_or(Error::MissingEndpoint("start"))?;
        let end = self.end.ok_or(Error::MissingEndpoint("end"))?;

        self.path.clear();
        self.grid.clear_search_marks();
        self.grid.set_role(start, Role::Start)?;
        self.grid.set_role(end, Role::End)?;
        self.grid.refresh_all_neighbors();

        let mut astar = AStar::new(&mut self.grid, start, end)?;
        let result = astar.run(notifier)?;
        self.path = astar.path().to_vec();

        self.grid.set_role(start, Role::Start)?;
        self.grid.set_role(end, Role::End)?;
        debug!("board: planned {start} -> {end}: {result:?}");
        Ok(result)
    }
}
