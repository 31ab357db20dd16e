//! The inverted index and its on-disk form.

pub mod config;
pub mod format;
pub mod store;

pub use config::IndexConfig;
pub use store::{IndexStats, InvertedIndex};
