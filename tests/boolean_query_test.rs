//! Integration tests for boolean queries over an in-memory index

use invidx::prelude::*;

fn sample_documents() -> Vec<Document> {
    vec![
        Document::new(0, "This is a sample document."),
        Document::new(1, "Another document with sample words."),
        Document::new(2, "This is a third document."),
        Document::new(3, "This is a new document for test"),
    ]
}

fn sample_index() -> InvertedIndex {
    InvertedIndex::from_documents(&sample_documents()).unwrap()
}

#[test]
fn test_single_term_queries() {
    let index = sample_index();

    assert_eq!(index.search("this").into_vec(), vec![0, 2, 3]);
    assert_eq!(index.search("is").into_vec(), vec![0, 2, 3]);
    assert_eq!(index.search("another").into_vec(), vec![1]);
    assert_eq!(index.search("document").into_vec(), vec![0, 1, 2, 3]);
    assert!(index.search("missing").is_empty());
}

#[test]
fn test_nested_queries() {
    let index = sample_index();

    let result = and(and(index.search("this"), index.search("is")), index.search("new"));
    assert_eq!(result.into_vec(), vec![3]);

    let result = and(or(index.search("this"), index.search("another")), index.search("a"));
    assert_eq!(result.into_vec(), vec![0, 2, 3]);

    // "this" and "another" never share a document, and document 1 has no "a"
    let result = or(and(index.search("this"), index.search("another")), index.search("a"));
    assert_eq!(result.into_vec(), vec![0, 2, 3]);

    let result = not(index.search("is"));
    assert_eq!(result.into_vec(), vec![1]);
}

#[test]
fn test_queries_in_sequence_leave_postings_intact() {
    let index = sample_index();

    let results = [
        and(and(index.search("this"), index.search("is")), index.search("new")).into_vec(),
        and(or(index.search("this"), index.search("another")), index.search("a")).into_vec(),
        or(and(index.search("this"), index.search("another")), index.search("a")).into_vec(),
        not(index.search("is")).into_vec(),
    ];
    assert_eq!(results, [vec![3], vec![0, 2, 3], vec![0, 2, 3], vec![1]]);

    assert_eq!(index.search("this").into_vec(), vec![0, 2, 3]);
    assert_eq!(index.search("another").into_vec(), vec![1]);
    assert_eq!(index.search("a").into_vec(), vec![0, 2, 3]);
    assert_eq!(index.search("is").into_vec(), vec![0, 2, 3]);
}

#[test]
fn test_cursor_protocol_drains_in_order() {
    let index = sample_index();

    let mut cursor = index.search("document");
    let mut seen = Vec::new();
    while cursor.has_next() {
        seen.push(cursor.current().unwrap());
        cursor.advance();
    }

    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(cursor.current(), None);
}

#[test]
fn test_and_or_commute() {
    let index = sample_index();
    let terms: Vec<&str> = index.terms().chain(["missing"]).collect();

    for &t1 in &terms {
        for &t2 in &terms {
            assert_eq!(
                and(index.search(t1), index.search(t2)).into_vec(),
                and(index.search(t2), index.search(t1)).into_vec(),
                "{t1} && {t2}"
            );
            assert_eq!(
                or(index.search(t1), index.search(t2)).into_vec(),
                or(index.search(t2), index.search(t1)).into_vec(),
                "{t1} || {t2}"
            );
        }
    }
}

#[test]
fn test_and_or_associate() {
    let index = sample_index();
    let (a, b, c) = ("this", "sample", "document");

    assert_eq!(
        and(and(index.search(a), index.search(b)), index.search(c)).into_vec(),
        and(index.search(a), and(index.search(b), index.search(c))).into_vec()
    );
    assert_eq!(
        or(or(index.search(a), index.search(b)), index.search(c)).into_vec(),
        or(index.search(a), or(index.search(b), index.search(c))).into_vec()
    );
}

#[test]
fn test_not_is_the_complement() {
    let index = sample_index();
    let universe = index.universe().clone();
    let terms: Vec<&str> = index.terms().chain(["missing"]).collect();

    for term in terms {
        let expected: Vec<DocId> = universe
            .iter()
            .filter(|&id| !index.search(term).doc_ids().contains(&id))
            .collect();
        assert_eq!(not(index.search(term)).into_vec(), expected, "!{term}");
    }

    assert_eq!(not(index.search("missing")).into_vec(), vec![0, 1, 2, 3]);
}

#[test]
fn test_queries_do_not_mutate_the_index() {
    let index = sample_index();
    let before = index.to_string();

    let _ = not(or(index.search("this"), and(index.search("a"), index.search("new"))));

    assert_eq!(index.to_string(), before);
    assert_eq!(index.search("this").into_vec(), vec![0, 2, 3]);
}

#[test]
fn test_sparse_and_unordered_ids() {
    let mut index = InvertedIndex::new();
    index.insert(1_000_000, ["rare", "common"]);
    index.insert(7, ["common"]);
    index.insert(42, ["common", "common", "other"]);

    assert_eq!(index.search("common").into_vec(), vec![7, 42, 1_000_000]);
    assert_eq!(not(index.search("rare")).into_vec(), vec![7, 42]);
    assert_eq!(
        or(index.search("rare"), index.search("other")).into_vec(),
        vec![42, 1_000_000]
    );
}
