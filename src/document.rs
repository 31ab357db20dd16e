//! Source documents.
//!
//! Documents are read from JSON Lines files, one object per line:
//!
//! ```jsonl
//! {"id": 0, "text": "This is a sample document."}
//! {"id": 1, "text": "Another document with sample words."}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};
use crate::posting::DocId;

/// A document: a caller-assigned id and its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>>(id: DocId, text: S) -> Self {
        Document {
            id,
            text: text.into(),
        }
    }
}

/// Read documents from a JSONL file. Blank lines are skipped.
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let file = File::open(path)?;
    parse_jsonl(BufReader::new(file))
}

/// Parse documents from JSONL text.
pub fn parse_jsonl<R: BufRead>(reader: R) -> Result<Vec<Document>> {
    let mut docs = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let doc = serde_json::from_str(&line).map_err(|e| {
            IndexError::invalid_input(format!("document on line {}: {e}", line_num + 1))
        })?;
        docs.push(doc);
    }

    Ok(docs)
}
