//! Posting lists.
//!
//! A [`PostingList`] is the sorted, duplicate-free sequence of document ids
//! that contain one term. Every constructor and mutator keeps that invariant,
//! so the set operations below can run as single linear merges.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{IndexError, Result};

/// Caller-assigned document identifier.
pub type DocId = u64;

/// A strictly ascending list of document ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PostingList {
    doc_ids: Vec<DocId>,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        PostingList {
            doc_ids: Vec::new(),
        }
    }

    /// Build a posting list from ids the caller claims are strictly ascending.
    ///
    /// Fails with [`IndexError::InvalidInput`] on the first out-of-order or
    /// repeated id.
    pub fn from_sorted(doc_ids: Vec<DocId>) -> Result<Self> {
        check_ascending(&doc_ids)?;
        Ok(PostingList { doc_ids })
    }

    /// Build a posting list from ids in any order, sorting and dropping repeats.
    pub fn from_unsorted<I: IntoIterator<Item = DocId>>(doc_ids: I) -> Self {
        let mut doc_ids: Vec<DocId> = doc_ids.into_iter().collect();
        doc_ids.sort_unstable();
        doc_ids.dedup();
        PostingList { doc_ids }
    }

    /// Wrap ids produced by a merge that already guarantees the invariant.
    pub(crate) fn from_merged(doc_ids: Vec<DocId>) -> Self {
        debug_assert!(check_ascending(&doc_ids).is_ok());
        PostingList { doc_ids }
    }

    /// Insert `doc_id` at its sorted position.
    ///
    /// Returns false if the id was already present; the list is unchanged then.
    pub fn insert(&mut self, doc_id: DocId) -> bool {
        // Fast path for the common append-in-order case
        if self.doc_ids.last().is_none_or(|&last| last < doc_id) {
            self.doc_ids.push(doc_id);
            return true;
        }

        match self.doc_ids.binary_search(&doc_id) {
            Ok(_) => false,
            Err(pos) => {
                self.doc_ids.insert(pos, doc_id);
                true
            }
        }
    }

    /// Check whether the list contains `doc_id`.
    pub fn contains(&self, doc_id: DocId) -> bool {
        self.doc_ids.binary_search(&doc_id).is_ok()
    }

    /// Get the length of the posting list.
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// The ids as an ascending slice.
    pub fn as_slice(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// Get an iterator over the ids.
    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.doc_ids.iter().copied()
    }

    /// Consume the list, returning the underlying ids.
    pub fn into_vec(self) -> Vec<DocId> {
        self.doc_ids
    }

    /// Ids present in both lists.
    pub fn intersect(&self, other: &PostingList) -> PostingList {
        PostingList::from_merged(intersect_sorted(&self.doc_ids, &other.doc_ids))
    }

    /// Ids present in either list, each once.
    pub fn union(&self, other: &PostingList) -> PostingList {
        PostingList::from_merged(union_sorted(&self.doc_ids, &other.doc_ids))
    }

    /// Ids in `self` that are not in `other`.
    pub fn difference(&self, other: &PostingList) -> PostingList {
        PostingList::from_merged(difference_sorted(&self.doc_ids, &other.doc_ids))
    }
}

impl fmt::Display for PostingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.doc_ids)
    }
}

impl AsRef<[DocId]> for PostingList {
    fn as_ref(&self) -> &[DocId] {
        &self.doc_ids
    }
}

/// Verify that `doc_ids` is strictly ascending.
pub fn check_ascending(doc_ids: &[DocId]) -> Result<()> {
    for (i, pair) in doc_ids.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(IndexError::invalid_input(format!(
                "posting list not strictly ascending at position {}: {} followed by {}",
                i + 1,
                pair[0],
                pair[1]
            )));
        }
    }
    Ok(())
}

/// Intersect two strictly ascending slices.
pub(crate) fn intersect_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Union of two strictly ascending slices.
pub(crate) fn union_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Elements of `a` absent from `b`, both strictly ascending.
pub(crate) fn difference_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut list = PostingList::new();
        assert!(list.is_empty());

        assert!(list.insert(5));
        assert!(list.insert(1));
        assert!(list.insert(3));
        assert!(list.insert(9));

        assert_eq!(list.as_slice(), &[1, 3, 5, 9]);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut list = PostingList::new();
        assert!(list.insert(2));
        assert!(!list.insert(2));
        assert!(list.insert(0));
        assert!(!list.insert(0));

        assert_eq!(list.as_slice(), &[0, 2]);
        assert!(list.contains(2));
        assert!(!list.contains(1));
    }

    #[test]
    fn test_from_sorted_validation() {
        assert!(PostingList::from_sorted(vec![]).is_ok());
        assert!(PostingList::from_sorted(vec![1, 2, 10]).is_ok());

        let err = PostingList::from_sorted(vec![1, 3, 3]).unwrap_err();
        assert!(matches!(err, IndexError::InvalidInput(_)));
        assert!(PostingList::from_sorted(vec![4, 2]).is_err());
    }

    #[test]
    fn test_from_unsorted() {
        let list = PostingList::from_unsorted(vec![7, 3, 7, 1, 3]);
        assert_eq!(list.into_vec(), vec![1, 3, 7]);
    }

    #[test]
    fn test_intersect() {
        let cases: [(&[DocId], &[DocId], &[DocId]); 5] = [
            (&[1, 2, 3, 4], &[1, 4], &[1, 4]),
            (&[1, 4], &[1, 2, 3, 4], &[1, 4]),
            (&[1, 2, 4, 5, 6], &[0, 9, 21], &[]),
            (&[1, 2, 4, 6, 7, 12, 123, 1222], &[], &[]),
            (&[100, 200, 300, 400], &[100, 200, 300, 400], &[100, 200, 300, 400]),
        ];

        for (a, b, expected) in cases {
            assert_eq!(intersect_sorted(a, b), expected, "{a:?} & {b:?}");
        }
    }

    #[test]
    fn test_union() {
        let cases: [(&[DocId], &[DocId], &[DocId]); 5] = [
            (&[1, 2, 3, 4], &[1, 4], &[1, 2, 3, 4]),
            (&[1, 4], &[1, 2, 3, 4], &[1, 2, 3, 4]),
            (&[1, 2, 4, 5, 6], &[0, 9, 21], &[0, 1, 2, 4, 5, 6, 9, 21]),
            (&[1, 2, 4, 6, 7, 12, 123, 1222], &[], &[1, 2, 4, 6, 7, 12, 123, 1222]),
            (&[100, 200, 300, 400], &[100, 200, 300, 400], &[100, 200, 300, 400]),
        ];

        for (a, b, expected) in cases {
            assert_eq!(union_sorted(a, b), expected, "{a:?} | {b:?}");
        }
    }

    #[test]
    fn test_difference() {
        let cases: [(&[DocId], &[DocId], &[DocId]); 5] = [
            (&[1, 2, 3, 4], &[1, 4], &[2, 3]),
            (&[1, 4], &[1, 2, 3, 4], &[]),
            (&[1, 2, 4, 5, 6], &[0, 9, 21], &[1, 2, 4, 5, 6]),
            (&[1, 2, 4, 6, 7, 12, 123, 1222], &[], &[1, 2, 4, 6, 7, 12, 123, 1222]),
            (&[100, 200, 300, 400], &[100, 200, 300, 400], &[]),
        ];

        for (a, b, expected) in cases {
            assert_eq!(difference_sorted(a, b), expected, "{a:?} - {b:?}");
        }
    }

    #[test]
    fn test_list_set_operations() {
        let a = PostingList::from_unsorted([1, 3, 5, 7]);
        let b = PostingList::from_unsorted([3, 4, 5]);

        assert_eq!(a.intersect(&b).as_slice(), &[3, 5]);
        assert_eq!(a.union(&b).as_slice(), &[1, 3, 4, 5, 7]);
        assert_eq!(a.difference(&b).as_slice(), &[1, 7]);
        assert_eq!(b.difference(&a).as_slice(), &[4]);

        // Inputs are untouched
        assert_eq!(a.as_slice(), &[1, 3, 5, 7]);
        assert_eq!(b.as_slice(), &[3, 4, 5]);
    }
}
