//! GitHub Actions step outputs.
//!
//! Outputs are appended to the file named by `GITHUB_OUTPUT`, one
//! `name=value` line per value, or a heredoc-style block for multi-line
//! values:
//!
//! ```text
//! release_notes<<EOF
//! ...
//! EOF
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default end marker of multi-line values.
const DELIMITER: &str = "EOF";

/// Step output file.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    /// Targets the given output file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one named output, creating the file if needed.
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output file: {}", self.path.display()))?;

        file.write_all(format_output(name, value).as_bytes())
            .with_context(|| format!("Failed to write output file: {}", self.path.display()))
    }
}

/// Formats one output entry.
pub fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let delimiter = choose_delimiter(value);
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Picks an end marker that no line of `value` equals.
///
/// `EOF` when possible, otherwise the first free `EOF_<n>`.
pub fn choose_delimiter(value: &str) -> String {
    let mut delimiter = DELIMITER.to_string();
    let mut suffix = 0;
    while value.lines().any(|line| line == delimiter) {
        suffix += 1;
        delimiter = format!("{DELIMITER}_{suffix}");
    }
    delimiter
}
