//! **pathgrid-core**: A* shortest-path planning over an editable obstacle
//! grid.
//!
//! The crate is organised leaf-first:
//!
//! - [`Cell`] / [`Role`] / [`Pos`]: one grid unit, its role tag and identity.
//! - [`Grid`]: an N×N matrix of cells with cached 4-directional neighbor
//!   lists that skip barriers.
//! - [`Frontier`]: the `(f, insertion order)` min-heap behind the open set.
//! - [`AStar`] / [`run_search`]: the search engine, writing `Open`, `Closed`
//!   and `Path` roles as it explores.
//! - [`StepNotifier`]: the synchronous callback a UI uses to watch a search
//!   and to cancel it.
//! - [`Board`]: designation API enforcing one start and one end, plus
//!   re-planning.
//!
//! ```
//! use pathgrid_core::{Board, SearchResult, Step, StepResult};
//!
//! let mut board = Board::from_layout("S#.\n...\n.#E", 300).unwrap();
//! let result = board.plan(&mut |_: &Step<'_>| -> StepResult { Ok(()) }).unwrap();
//! assert_eq!(result, SearchResult::Succeeded { length: 4 });
//! ```

mod board;
mod cell;
mod distance;
mod error;
mod frontier;
mod grid;
mod notify;
mod search;

pub use board::Board;
pub use cell::{Cell, Pos, Role};
pub use distance::manhattan;
pub use error::{Error, Result};
pub use frontier::{Frontier, FrontierEntry};
pub use grid::Grid;
pub use notify::{Cancelled, Phase, Step, StepNotifier, StepResult};
pub use search::{AStar, SearchResult, SearchState, UNREACHABLE, run_search};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pos_round_trip() {
        let p = Pos::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        let back: Pos = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn search_result_round_trip() {
        let r = SearchResult::Succeeded { length: 8 };
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
