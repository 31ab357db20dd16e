//! Output formatting for CLI commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::args::{InvidxArgs, OutputFormat};
use crate::error::Result;
use crate::index::IndexStats;
use crate::posting::DocId;

/// Result structure for index builds.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub path: String,
    pub documents: usize,
    pub terms: usize,
    pub file_size_bytes: u64,
    pub duration_ms: u64,
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index: {}", self.path)?;
        writeln!(f, "Documents: {}", self.documents)?;
        writeln!(f, "Terms: {}", self.terms)?;
        writeln!(f, "File size: {} bytes", self.file_size_bytes)?;
        write!(f, "Took: {} ms", self.duration_ms)
    }
}

/// Result structure for a single query.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResult {
    pub query: String,
    pub hits: Vec<DocId>,
    pub total_hits: usize,
}

impl QueryResult {
    pub fn new(query: impl Into<String>, hits: Vec<DocId>) -> Self {
        let total_hits = hits.len();
        QueryResult {
            query: query.into(),
            hits,
            total_hits,
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hits: Vec<String> = self.hits.iter().map(|id| id.to_string()).collect();
        write!(f, "{}: {}", self.query, hits.join(" "))
    }
}

/// Results of several queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResults {
    pub results: Vec<QueryResult>,
}

impl fmt::Display for QueryResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{result}")?;
        }
        Ok(())
    }
}

/// A full listing of the index.
#[derive(Debug, Serialize, Deserialize)]
pub struct DumpResult {
    pub terms: Vec<(String, Vec<DocId>)>,
}

impl fmt::Display for DumpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (term, ids)) in self.terms.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{term}: {ids:?}")?;
        }
        Ok(())
    }
}

/// Index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    #[serde(flatten)]
    pub stats: IndexStats,
    pub file_size_bytes: u64,
}

impl fmt::Display for StatsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Documents: {}", self.stats.doc_count)?;
        writeln!(f, "Terms: {}", self.stats.term_count)?;
        writeln!(f, "Postings: {}", self.stats.total_postings)?;
        writeln!(f, "Longest posting list: {}", self.stats.max_posting_list_len)?;
        writeln!(f, "Encoded postings: {} bytes", self.stats.encoded_posting_bytes)?;
        write!(f, "File size: {} bytes", self.file_size_bytes)
    }
}

/// Output a result in the format selected on the command line.
pub fn output_result<T>(message: &str, result: &T, args: &InvidxArgs) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            println!("{result}");
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_result_display() {
        let result = QueryResult::new("this && is", vec![0, 2, 3]);
        assert_eq!(result.to_string(), "this && is: 0 2 3");
        assert_eq!(result.total_hits, 3);
    }

    #[test]
    fn test_dump_json_shape() {
        let dump = DumpResult {
            terms: vec![("a".to_string(), vec![1, 2])],
        };
        let json = serde_json::to_string(&dump).unwrap();
        assert_eq!(json, r#"{"terms":[["a",[1,2]]]}"#);
    }
}
