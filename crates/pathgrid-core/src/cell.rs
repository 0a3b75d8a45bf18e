//! The [`Cell`] type: one grid unit with a fixed position and a [`Role`].

use std::fmt;

/// A `(row, col)` grid position. Rows grow downward, columns to the right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Pos) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a cell currently represents.
///
/// Renderers translate roles into colors; the search only ever reads
/// `Barrier` (through neighbor derivation) and writes `Open`, `Closed`,
/// `Path` and `End`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded.
    Closed,
    /// On the reconstructed path.
    Path,
}

impl Role {
    /// Layout character for this role.
    pub const fn glyph(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Barrier => '#',
            Role::Open => 'o',
            Role::Closed => 'x',
            Role::Path => '*',
        }
    }

    /// Inverse of [`glyph`](Role::glyph).
    pub const fn from_glyph(ch: char) -> Option<Role> {
        match ch {
            '.' => Some(Role::Empty),
            'S' => Some(Role::Start),
            'E' => Some(Role::End),
            '#' => Some(Role::Barrier),
            'o' => Some(Role::Open),
            'x' => Some(Role::Closed),
            '*' => Some(Role::Path),
            _ => None,
        }
    }

    /// Roles written by a search run, cleared before re-planning.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Role::Open | Role::Closed | Role::Path)
    }
}

/// A single grid unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    role: Role,
    size: i32,
}

impl Cell {
    /// Create an `Empty` cell at `pos`, `size` pixels wide.
    pub const fn new(pos: Pos, size: i32) -> Self {
        Self {
            pos,
            role: Role::Empty,
            size,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Back to `Empty`, whatever the current role (Start and End included).
    #[inline]
    pub fn reset(&mut self) {
        self.role = Role::Empty;
    }

    /// Side length in pixels.
    #[inline]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Top-left pixel corner. Rows advance along `x`, columns along `y`.
    #[inline]
    pub const fn origin(&self) -> (i32, i32) {
        (self.pos.row * self.size, self.pos.col * self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.role == Role::Empty
    }

    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }

    pub fn is_end(&self) -> bool {
        self.role == Role::End
    }

    pub fn is_barrier(&self) -> bool {
        self.role == Role::Barrier
    }

    pub fn is_open(&self) -> bool {
        self.role == Role::Open
    }

    pub fn is_closed(&self) -> bool {
        self.role == Role::Closed
    }

    pub fn is_path(&self) -> bool {
        self.role == Role::Path
    }
}
