//! CI output channel
//!
//! Append-only key/value results file in the workflow-output format:
//! single-line values as `key=value`, multi-line values as a delimited
//! `key<<EOF … EOF` block.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Delimiter for multi-line value blocks
const BLOCK_DELIMITER: &str = "EOF";

/// Writer for the CI output file
pub struct CiOutput {
    path: PathBuf,
}

impl CiOutput {
    /// Creates a writer for an output file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a single-line `key=value` result
    pub fn write_value(&self, key: &str, value: &str) -> io::Result<()> {
        self.append(&format!("{}={}\n", key, value))
    }

    /// Appends a multi-line result as a delimited block
    pub fn write_multiline(&self, key: &str, value: &str) -> io::Result<()> {
        let mut block = format!("{}<<{}\n{}", key, BLOCK_DELIMITER, value);
        if !block.ends_with('\n') {
            block.push('\n');
        }
        block.push_str(BLOCK_DELIMITER);
        block.push('\n');
        self.append(&block)
    }

    fn append(&self, content: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(content.as_bytes())
    }
}
