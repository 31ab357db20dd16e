//! Index configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for index persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Whether to fsync the temporary file before publishing it on save.
    pub sync_writes: bool,

    /// Initial capacity of the in-memory buffer a save is assembled in.
    pub write_buffer_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            sync_writes: true,
            write_buffer_size: 4096,
        }
    }
}

impl IndexConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: IndexConfig = serde_json::from_str(r#"{"sync_writes": false}"#).unwrap();
        assert!(!config.sync_writes);
        assert_eq!(config.write_buffer_size, 4096);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"write_buffer_size": 128}"#).unwrap();

        let config = IndexConfig::from_json_file(&path).unwrap();
        assert_eq!(config.write_buffer_size, 128);
        assert!(config.sync_writes);

        assert!(IndexConfig::from_json_file(dir.path().join("missing.json")).is_err());
    }
}
