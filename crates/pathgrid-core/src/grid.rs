//! The [`Grid`] type: a square, row-major matrix of [`Cell`]s.
//!
//! Besides the cells themselves, a `Grid` caches each cell's orthogonal
//! neighbor list. The cache is derived from the barrier layout at the time of
//! the last [`refresh_all_neighbors`](Grid::refresh_all_neighbors) call and is
//! *not* kept up to date by role changes: refresh it right before a search.

use std::fmt;

use crate::cell::{Cell, Pos, Role};
use crate::error::{Error, Result};

/// Neighbor offsets in exploration order: down, up, right, left.
const DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// An N×N grid of cells with cached neighbor lists.
#[derive(Debug, Clone)]
pub struct Grid {
    n: i32,
    cell_size: i32,
    cells: Vec<Cell>,
    neighbors: Vec<Vec<Pos>>,
}

impl Grid {
    /// Create an `n`×`n` grid of `Empty` cells spread over `total_width`
    /// pixels.
    ///
    /// Cell size is `total_width / n`; remainder pixels are left unused.
    pub fn new(n: i32, total_width: i32) -> Result<Self> {
        if n <= 0 || total_width <= 0 {
            return Err(Error::InvalidDimension {
                rows: n,
                width: total_width,
            });
        }
        let cell_size = total_width / n;
        let len = (n as usize) * (n as usize);
        let mut cells = Vec::with_capacity(len);
        for row in 0..n {
            for col in 0..n {
                cells.push(Cell::new(Pos::new(row, col), cell_size));
            }
        }
        Ok(Self {
            n,
            cell_size,
            cells,
            neighbors: vec![Vec::new(); len],
        })
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> i32 {
        self.n
    }

    /// Side length of a cell in pixels.
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies inside `[0, n)` on both axes.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.n && pos.col < self.n
    }

    /// Flat row-major index of `pos`, or `None` if out of range.
    #[inline]
    pub fn index(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.row * self.n + pos.col) as usize)
    }

    fn checked_index(&self, pos: Pos) -> Result<usize> {
        self.index(pos).ok_or(Error::OutOfRange {
            row: pos.row,
            col: pos.col,
            n: self.n,
        })
    }

    /// Bounds-checked cell access.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell> {
        let i = self.checked_index(Pos::new(row, col))?;
        Ok(&self.cells[i])
    }

    /// Bounds-checked mutable cell access.
    pub fn cell_at_mut(&mut self, row: i32, col: i32) -> Result<&mut Cell> {
        let i = self.checked_index(Pos::new(row, col))?;
        Ok(&mut self.cells[i])
    }

    /// Role of the cell at `pos`.
    pub fn role_at(&self, pos: Pos) -> Result<Role> {
        self.cell_at(pos.row, pos.col).map(Cell::role)
    }

    /// Set the role of the cell at `pos`.
    pub fn set_role(&mut self, pos: Pos, role: Role) -> Result<()> {
        self.cell_at_mut(pos.row, pos.col)?.set_role(role);
        Ok(())
    }

    /// Derive the current neighbors of `pos` from the live barrier layout.
    ///
    /// Order is down, up, right, left; barriers and out-of-range positions
    /// are skipped.
    pub fn neighbors_of(&self, pos: Pos) -> Result<Vec<Pos>> {
        self.checked_index(pos)?;
        Ok(self.derive_neighbors(pos))
    }

    fn derive_neighbors(&self, pos: Pos) -> Vec<Pos> {
        let mut buf = Vec::with_capacity(4);
        for (dr, dc) in DIRS {
            let n = pos.shift(dr, dc);
            match self.index(n) {
                Some(i) if !self.cells[i].is_barrier() => buf.push(n),
                _ => {}
            }
        }
        buf
    }

    /// Recompute every cell's cached neighbor list from the current roles.
    pub fn refresh_all_neighbors(&mut self) {
        let fresh: Vec<Vec<Pos>> = self
            .cells
            .iter()
            .map(|c| self.derive_neighbors(c.pos()))
            .collect();
        self.neighbors = fresh;
    }

    /// Cached neighbors of `pos` as of the last refresh. Empty if `pos` is
    /// out of range.
    pub fn neighbors(&self, pos: Pos) -> &[Pos] {
        match self.index(pos) {
            Some(i) => &self.neighbors[i],
            None => &[],
        }
    }

    /// Set every cell back to `Empty`.
    pub fn reset_all(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset();
        }
    }

    /// Reset `Open`, `Closed` and `Path` cells, keeping endpoints and
    /// barriers.
    pub fn clear_search_marks(&mut self) {
        for c in self.cells.iter_mut() {
            if c.role().is_search_mark() {
                c.reset();
            }
        }
    }

    /// Count the cells holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.cells.iter().filter(|c| c.role() == role).count()
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.n as usize) {
            for c in row {
                write!(f, "{}", c.role().glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
