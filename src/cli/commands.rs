//! Command implementations for the invidx CLI.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::tokenize;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::{Document, read_jsonl};
use crate::error::{IndexError, Result};
use crate::index::{IndexConfig, InvertedIndex};
use crate::query::{Cursor, and, not, or};

/// Execute a CLI command.
pub fn execute_command(args: InvidxArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            IndexConfig::from_json_file(path)?
        }
        None => IndexConfig::default(),
    };

    match &args.command {
        Command::Build(build_args) => build_index(build_args, config, &args),
        Command::Search(search_args) => search_index(search_args, config, &args),
        Command::Dump(dump_args) => dump_index(dump_args, config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, config, &args),
        Command::Demo => run_demo(config, &args),
    }
}

/// Build an index from a document file and save it.
fn build_index(args: &BuildArgs, config: IndexConfig, cli_args: &InvidxArgs) -> Result<()> {
    let start_time = Instant::now();

    let docs = read_jsonl(&args.document_file)?;
    let index = InvertedIndex::from_documents_with_config(&docs, config)?;
    index.save(&args.index_path)?;

    let result = BuildResult {
        path: args.index_path.display().to_string(),
        documents: docs.len(),
        terms: index.term_count(),
        file_size_bytes: std::fs::metadata(&args.index_path)?.len(),
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    output_result("Index built successfully", &result, cli_args)
}

/// Evaluate `(t1 op t2 op ...) AND NOT e1 AND NOT e2 ...` against a saved index.
fn search_index(args: &SearchArgs, config: IndexConfig, cli_args: &InvidxArgs) -> Result<()> {
    let index = open_index(&args.index_path, &args.document_file, config)?;

    let terms = normalize_terms(&args.terms);
    let excluded = normalize_terms(&args.exclude);
    if terms.is_empty() {
        return Err(IndexError::invalid_input("no search terms left after normalization"));
    }

    let mut cursors = terms.iter().map(|term| index.search(term));
    let first = cursors.next().unwrap_or_default();
    let mut cursor = cursors.fold(first, |acc, next| match args.mode {
        MatchMode::And => and(acc, next),
        MatchMode::Or => or(acc, next),
    });
    for term in &excluded {
        cursor = and(cursor, not(index.search(term)));
    }

    let result = QueryResult::new(describe_query(&terms, args.mode, &excluded), cursor.collect());
    info!("Query {} matched {} documents", result.query, result.total_hits);
    output_result("Search results", &result, cli_args)
}

fn dump_index(args: &DumpArgs, config: IndexConfig, cli_args: &InvidxArgs) -> Result<()> {
    let index = open_index(&args.index_path, &args.document_file, config)?;

    let result = DumpResult {
        terms: index
            .sorted_entries()
            .into_iter()
            .map(|(term, list)| (term.to_owned(), list.as_slice().to_vec()))
            .collect(),
    };
    output_result("Index contents", &result, cli_args)
}

fn show_stats(args: &DumpArgs, config: IndexConfig, cli_args: &InvidxArgs) -> Result<()> {
    let index = open_index(&args.index_path, &args.document_file, config)?;

    let result = StatsResult {
        stats: index.stats(),
        file_size_bytes: std::fs::metadata(&args.index_path)?.len(),
    };
    output_result("Index statistics", &result, cli_args)
}

/// Index four sample documents, save and reload them, and run sample queries.
fn run_demo(config: IndexConfig, cli_args: &InvidxArgs) -> Result<()> {
    let result = demo_results(config, cli_args.verbosity() > 1)?;
    output_result("Demo queries", &result, cli_args)
}

fn demo_results(config: IndexConfig, show_index: bool) -> Result<QueryResults> {
    let docs = vec![
        Document::new(0, "This is a sample document."),
        Document::new(1, "Another document with sample words."),
        Document::new(2, "This is a third document."),
        Document::new(3, "This is a new document for test"),
    ];

    let built = InvertedIndex::from_documents_with_config(&docs, config.clone())?;
    if show_index {
        for doc in &docs {
            println!("{}: {}", doc.id, doc.text);
        }
        print!("{built}");
    }

    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("demo.index");
    built.save(&path)?;
    let reloaded = InvertedIndex::load_with_config(&path, docs.iter().map(|d| d.id), config)?;

    let queries: Vec<(&str, Cursor)> = vec![
        ("this", reloaded.search("this")),
        ("another", reloaded.search("another")),
        ("is", reloaded.search("is")),
        ("!is", not(reloaded.search("is"))),
        (
            "this && is && new",
            and(and(reloaded.search("this"), reloaded.search("is")), reloaded.search("new")),
        ),
        (
            "(this || another) && a",
            and(or(reloaded.search("this"), reloaded.search("another")), reloaded.search("a")),
        ),
        (
            "(this && another) || a",
            or(and(reloaded.search("this"), reloaded.search("another")), reloaded.search("a")),
        ),
    ];

    Ok(QueryResults {
        results: queries
            .into_iter()
            .map(|(query, cursor)| QueryResult::new(query, cursor.collect()))
            .collect(),
    })
}

fn open_index(index_path: &Path, document_file: &Path, config: IndexConfig) -> Result<InvertedIndex> {
    let docs = read_jsonl(document_file)?;
    InvertedIndex::load_with_config(index_path, docs.iter().map(|d| d.id), config)
}

fn normalize_terms(raw: &[String]) -> Vec<String> {
    raw.iter().flat_map(|term| tokenize(term)).collect()
}

fn describe_query(terms: &[String], mode: MatchMode, excluded: &[String]) -> String {
    let op = match mode {
        MatchMode::And => " && ",
        MatchMode::Or => " || ",
    };
    let mut query = terms.join(op);
    if !excluded.is_empty() {
        if terms.len() > 1 {
            query = format!("({query})");
        }
        for term in excluded {
            query.push_str(&format!(" && !{term}"));
        }
    }
    query
}
