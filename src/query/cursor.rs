//! Forward-only cursor over a posting-list snapshot.

use std::sync::Arc;

use crate::posting::{DocId, PostingList};

/// A position over one materialized posting list.
///
/// A cursor owns its list, so it stays valid however the originating
/// [`InvertedIndex`](crate::index::InvertedIndex) changes afterwards. It also
/// carries a shared snapshot of that index's document universe, which is what
/// [`not`](crate::query::not) complements against.
///
/// Walk it either with `has_next` / `current` / `advance`:
///
/// ```
/// use invidx::index::InvertedIndex;
///
/// let mut index = InvertedIndex::new();
/// index.insert(4, ["rust"]);
/// index.insert(9, ["rust"]);
///
/// let mut cursor = index.search("rust");
/// let mut seen = Vec::new();
/// while cursor.has_next() {
///     seen.extend(cursor.current());
///     cursor.advance();
/// }
/// assert_eq!(seen, vec![4, 9]);
/// ```
///
/// or as an [`Iterator`] over the remaining ids.
#[derive(Debug, Clone)]
pub struct Cursor {
    list: PostingList,
    position: usize,
    universe: Arc<PostingList>,
}

impl Cursor {
    pub(crate) fn new(list: PostingList, universe: Arc<PostingList>) -> Self {
        Cursor {
            list,
            position: 0,
            universe,
        }
    }

    /// Create an empty cursor with an empty universe.
    pub fn empty() -> Self {
        Cursor::new(PostingList::new(), Arc::new(PostingList::new()))
    }

    /// Check whether the cursor points at an id.
    pub fn has_next(&self) -> bool {
        self.position < self.list.len()
    }

    /// Move to the next id. Does nothing once exhausted.
    pub fn advance(&mut self) {
        if self.has_next() {
            self.position += 1;
        }
    }

    /// The id under the cursor, or `None` when exhausted.
    pub fn current(&self) -> Option<DocId> {
        self.list.as_slice().get(self.position).copied()
    }

    /// Advance to the first id `>= target`. Returns false if there is none.
    pub fn skip_to(&mut self, target: DocId) -> bool {
        let rest = &self.list.as_slice()[self.position..];
        self.position += rest.partition_point(|&id| id < target);
        self.has_next()
    }

    /// Rewind to the first id.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Total number of ids in the snapshot, regardless of position.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the snapshot holds no ids.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// All ids of the snapshot in ascending order.
    pub fn doc_ids(&self) -> &[DocId] {
        self.list.as_slice()
    }

    /// The snapshot this cursor walks.
    pub fn postings(&self) -> &PostingList {
        &self.list
    }

    /// The document universe of the originating index.
    pub fn universe(&self) -> &PostingList {
        &self.universe
    }

    pub(crate) fn shared_universe(&self) -> Arc<PostingList> {
        Arc::clone(&self.universe)
    }

    /// Consume the cursor, returning every id of the snapshot.
    pub fn into_vec(self) -> Vec<DocId> {
        self.list.into_vec()
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::empty()
    }
}

impl Iterator for Cursor {
    type Item = DocId;

    fn next(&mut self) -> Option<Self::Item> {
        let doc_id = self.current()?;
        self.position += 1;
        Some(doc_id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cursor {}
