//! In-memory inverted index.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenize;
use crate::codec;
use crate::document::Document;
use crate::error::{IndexError, Result};
use crate::index::config::IndexConfig;
use crate::index::format;
use crate::posting::{DocId, PostingList};
use crate::query::Cursor;

/// Maps terms to posting lists and tracks every document id ever inserted.
///
/// The index has no internal locking. Queries take `&self` and insertions
/// `&mut self`, so sharing one across threads requires an external lock such
/// as `RwLock<InvertedIndex>`. Cursors returned by [`search`](Self::search)
/// own a snapshot and stay valid across later insertions.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    /// Term dictionary mapping terms to posting lists.
    terms: AHashMap<String, PostingList>,
    /// Every document id inserted so far, shared with outstanding cursors.
    universe: Arc<PostingList>,
    config: IndexConfig,
}

impl InvertedIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create a new empty index with the given configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        InvertedIndex {
            terms: AHashMap::new(),
            universe: Arc::new(PostingList::new()),
            config,
        }
    }

    pub(crate) fn from_parts(
        terms: AHashMap<String, PostingList>,
        universe: PostingList,
        config: IndexConfig,
    ) -> Self {
        InvertedIndex {
            terms,
            universe: Arc::new(universe),
            config,
        }
    }

    /// Build an index from raw documents, normalizing and tokenizing their text.
    ///
    /// Fails with [`IndexError::EmptyCollection`] when `docs` is empty.
    pub fn from_documents(docs: &[Document]) -> Result<Self> {
        Self::from_documents_with_config(docs, IndexConfig::default())
    }

    /// Like [`from_documents`](Self::from_documents), with an explicit configuration.
    pub fn from_documents_with_config(docs: &[Document], config: IndexConfig) -> Result<Self> {
        if docs.is_empty() {
            return Err(IndexError::EmptyCollection);
        }

        let mut index = InvertedIndex::with_config(config);
        for doc in docs {
            index.add_document(doc);
        }
        Ok(index)
    }

    /// Build an index from already tokenized documents.
    ///
    /// Fails with [`IndexError::EmptyCollection`] when `docs` yields nothing.
    pub fn from_token_streams<I, T, S>(docs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DocId, T)>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = InvertedIndex::new();
        for (doc_id, tokens) in docs {
            index.insert(doc_id, tokens);
        }

        if index.universe.is_empty() {
            return Err(IndexError::EmptyCollection);
        }
        Ok(index)
    }

    /// Index a document under each distinct token.
    ///
    /// A token repeated within `tokens` still yields a single posting, and
    /// ids may arrive in any order. The id joins the document universe even
    /// when `tokens` is empty.
    pub fn insert<I, S>(&mut self, doc_id: DocId, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<S> = tokens.into_iter().collect();
        let mut seen = AHashSet::with_capacity(tokens.len());

        for token in &tokens {
            let term = token.as_ref();
            if !seen.insert(term) {
                continue;
            }

            if let Some(list) = self.terms.get_mut(term) {
                list.insert(doc_id);
            } else {
                let mut list = PostingList::new();
                list.insert(doc_id);
                self.terms.insert(term.to_owned(), list);
            }
        }

        if !self.universe.contains(doc_id) {
            Arc::make_mut(&mut self.universe).insert(doc_id);
        }

        debug!("Indexed document {doc_id} under {} distinct terms", seen.len());
    }

    /// Normalize, tokenize and insert a raw document.
    pub fn add_document(&mut self, doc: &Document) {
        self.insert(doc.id, tokenize(&doc.text));
    }

    /// Cursor over the documents containing `term`; empty if the term is unknown.
    pub fn search(&self, term: &str) -> Cursor {
        let list = self.terms.get(term).cloned().unwrap_or_default();
        debug!("Search {term:?} matched {} documents", list.len());
        Cursor::new(list, Arc::clone(&self.universe))
    }

    /// Get a posting list for a term.
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// All document ids known to this index, ascending.
    pub fn universe(&self) -> &PostingList {
        &self.universe
    }

    /// Get all terms in the index, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Iterate over `(term, posting list)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(term, list)| (term.as_str(), list))
    }

    /// Get the number of unique terms in the index.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Get the number of documents in the universe.
    pub fn doc_count(&self) -> usize {
        self.universe.len()
    }

    /// Check whether nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.universe.is_empty()
    }

    /// The configuration this index persists with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Write the index to `path`, replacing any existing file atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        format::save(self, path)
    }

    /// Read an index from `path`.
    ///
    /// The file holds only the term dictionary; `universe` must be the set of
    /// document ids the index was built from, otherwise [`not`](crate::query::not)
    /// queries complement against the wrong set.
    pub fn load<P, U>(path: P, universe: U) -> Result<Self>
    where
        P: AsRef<Path>,
        U: IntoIterator<Item = DocId>,
    {
        format::load(path, universe, IndexConfig::default())
    }

    /// Like [`load`](Self::load), with an explicit configuration.
    pub fn load_with_config<P, U>(path: P, universe: U, config: IndexConfig) -> Result<Self>
    where
        P: AsRef<Path>,
        U: IntoIterator<Item = DocId>,
    {
        format::load(path, universe, config)
    }

    /// Get statistics about the index.
    pub fn stats(&self) -> IndexStats {
        let total_postings = self.terms.values().map(PostingList::len).sum();
        let max_posting_list_len = self.terms.values().map(PostingList::len).max().unwrap_or(0);
        let encoded_posting_bytes = self.terms.values().map(codec::encoded_size).sum();

        IndexStats {
            term_count: self.terms.len(),
            doc_count: self.universe.len(),
            total_postings,
            max_posting_list_len,
            encoded_posting_bytes,
        }
    }

    /// Terms sorted lexicographically with their posting lists.
    pub(crate) fn sorted_entries(&self) -> Vec<(&str, &PostingList)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(term, _)| *term);
        entries
    }
}

impl fmt::Display for InvertedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (term, list) in self.sorted_entries() {
            writeln!(f, "{term}: {list}")?;
        }
        Ok(())
    }
}

/// Statistics about an inverted index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub term_count: usize,
    pub doc_count: usize,
    pub total_postings: usize,
    pub max_posting_list_len: usize,
    /// Bytes the posting lists occupy once delta/varint encoded.
    pub encoded_posting_bytes: usize,
}
