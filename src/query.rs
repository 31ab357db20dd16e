//! Query algebra.
//!
//! [`InvertedIndex::search`](crate::index::InvertedIndex::search) produces a
//! [`Cursor`]; [`and`], [`or`] and [`not`] combine cursors into new ones.
//! Results are always strictly ascending and duplicate free.

pub mod cursor;
pub mod ops;

pub use cursor::Cursor;
pub use ops::{and, not, or};
