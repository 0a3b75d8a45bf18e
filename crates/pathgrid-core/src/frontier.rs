//! The A* open set: a min-heap keyed by `(f_score, insertion_order)`.
//!
//! Lower f-scores are popped first; ties are broken by insertion order
//! (FIFO), so cells discovered earlier are expanded earlier.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::cell::Pos;
use crate::error::{Error, Result};

/// An entry in the frontier.
///
/// Field order matters: the derived ordering is lexicographic over
/// `(f, seq, pos)`, and `seq` is unique, so `pos` never decides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierEntry {
    pub f: u32,
    /// Monotonically increasing counter. Lower = pushed earlier.
    pub seq: u64,
    pub pos: Pos,
}

/// Priority-ordered open set.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `pos` with priority `f`, stamping it with the next sequence
    /// number.
    pub fn push(&mut self, f: u32, pos: Pos) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(FrontierEntry { f, seq, pos }));
    }

    /// Remove the entry with the smallest `(f, seq)`.
    pub fn pop_min(&mut self) -> Result<FrontierEntry> {
        self.heap
            .pop()
            .map(|Reverse(entry)| entry)
            .ok_or(Error::EmptyFrontier)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
