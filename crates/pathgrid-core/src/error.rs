//! Error types for pathgrid-core.

use thiserror::Error;

/// Errors raised by grid construction, cell access and search setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A grid was requested with a non-positive row count or pixel width.
    #[error("invalid grid dimension: {rows} rows over {width} pixels")]
    InvalidDimension { rows: i32, width: i32 },

    /// A cell position outside `[0, n)` on either axis.
    #[error("cell ({row}, {col}) is outside the {n}x{n} grid")]
    OutOfRange { row: i32, col: i32, n: i32 },

    /// `pop_min` on an empty frontier.
    #[error("pop from an empty frontier")]
    EmptyFrontier,

    /// Planning was requested before both endpoints were designated.
    #[error("no {0} cell designated")]
    MissingEndpoint(&'static str),

    /// A layout line whose length differs from the number of rows.
    #[error("layout line {line} has {found} cells, expected {expected}")]
    InconsistentLayout {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A layout character that maps to no role.
    #[error("layout contains invalid glyph '{ch}' at ({row}, {col})")]
    InvalidGlyph { ch: char, row: i32, col: i32 },
}

pub type Result<T> = std::result::Result<T, Error>;
