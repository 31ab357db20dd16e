//! Boolean operators over cursors.
//!
//! Each operator reads the whole snapshot of its operands (not just what is
//! left after the current position) and returns a fresh cursor over a new
//! ascending list. Inputs are consumed but never observed in a modified state,
//! so `and(and(a, b), c)` style nesting builds arbitrary expression trees.

use std::ops::{BitAnd, BitOr, Not};

use log::trace;

use crate::query::cursor::Cursor;

/// Documents matching both `a` and `b`.
///
/// The result carries the universe of `a`.
pub fn and(a: Cursor, b: Cursor) -> Cursor {
    let list = a.postings().intersect(b.postings());
    trace!("and: {} & {} -> {}", a.len(), b.len(), list.len());
    Cursor::new(list, a.shared_universe())
}

/// Documents matching `a`, `b`, or both.
///
/// The result carries the universe of `a`.
pub fn or(a: Cursor, b: Cursor) -> Cursor {
    let list = a.postings().union(b.postings());
    trace!("or: {} | {} -> {}", a.len(), b.len(), list.len());
    Cursor::new(list, a.shared_universe())
}

/// Documents of the universe that do not match `a`.
pub fn not(a: Cursor) -> Cursor {
    let list = a.universe().difference(a.postings());
    trace!("not: {} of {} -> {}", a.len(), a.universe().len(), list.len());
    Cursor::new(list, a.shared_universe())
}

impl BitAnd for Cursor {
    type Output = Cursor;

    fn bitand(self, rhs: Cursor) -> Cursor {
        and(self, rhs)
    }
}

impl BitOr for Cursor {
    type Output = Cursor;

    fn bitor(self, rhs: Cursor) -> Cursor {
        or(self, rhs)
    }
}

impl Not for Cursor {
    type Output = Cursor;

    fn not(self) -> Cursor {
        not(self)
    }
}
