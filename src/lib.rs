//! # invidx
//!
//! A compact boolean-retrieval inverted index.
//!
//! - [`index::InvertedIndex`] maps normalized terms to posting lists and
//!   remembers every document id it has seen.
//! - [`query`] turns term lookups into [`query::Cursor`]s and combines them
//!   with `and`, `or` and `not`.
//! - [`codec`] stores a posting list as its first id plus varint gaps.
//! - [`index::format`] saves the whole term dictionary to a single file.
//!
//! ```
//! use invidx::index::InvertedIndex;
//! use invidx::query::{and, not, or};
//!
//! let mut index = InvertedIndex::new();
//! index.insert(0, ["rust", "fast"]);
//! index.insert(1, ["go", "fast"]);
//! index.insert(2, ["rust", "safe"]);
//!
//! let hits: Vec<u64> = and(index.search("fast"), not(index.search("go"))).collect();
//! assert_eq!(hits, vec![0]);
//!
//! let hits: Vec<u64> = or(index.search("go"), index.search("safe")).collect();
//! assert_eq!(hits, vec![1, 2]);
//! ```

pub mod analysis;
pub mod cli;
pub mod codec;
pub mod document;
pub mod error;
pub mod index;
pub mod posting;
pub mod query;
pub mod util;

pub mod prelude {
    pub use crate::document::Document;
    pub use crate::error::{IndexError, Result};
    pub use crate::index::{IndexConfig, InvertedIndex};
    pub use crate::posting::{DocId, PostingList};
    pub use crate::query::{Cursor, and, not, or};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
