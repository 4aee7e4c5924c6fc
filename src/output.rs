use crate::patterns::absolutize;
use anyhow::{Context, Result};
use arboard::Clipboard;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Run-scoped accumulator for the combined artifact: the optional tree
/// report, numbered file blocks, and the set of absolute paths already
/// emitted. First occurrence of a path wins; later duplicates are refused
/// at `claim` time, before any read happens.
pub struct CombinedOutput {
    buffer: String,
    count: usize,
    seen: HashSet<PathBuf>,
}

impl CombinedOutput {
    pub fn new(tree_report: Option<String>) -> Self {
        let mut buffer = String::new();
        if let Some(report) = tree_report {
            buffer.push_str(&report);
            if !buffer.ends_with('\n') {
                buffer.push('\n');
            }
        }
        CombinedOutput {
            buffer,
            count: 0,
            seen: HashSet::new(),
        }
    }

    /// Claims a path for emission. Returns false when an earlier file
    /// already resolved to the same absolute path.
    pub fn claim(&mut self, path: &Path) -> bool {
        let resolved = absolutize(path);
        if self.seen.insert(resolved) {
            true
        } else {
            debug!("Skipping duplicate {}", path.display());
            false
        }
    }

    /// Appends one numbered block for a file that passed classification.
    /// A file that vanishes between classification and this read gets the
    /// read-error marker instead of aborting the run.
    pub fn append_file(&mut self, path: &Path) {
        self.count += 1;
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer
            .push_str(&format!("{}. {}:\n", self.count, display_path(path)));

        match fs::read(path) {
            Ok(bytes) if bytes.is_empty() => self.buffer.push_str("(empty file)\n"),
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                self.buffer.push_str(&content);
                if !content.ends_with('\n') {
                    self.buffer.push('\n');
                }
            }
            Err(err) => {
                warn!("Could not read {}: {}", path.display(), err);
                self.buffer.push_str("(Error reading file content)\n");
            }
        }
    }

    pub fn file_count(&self) -> usize {
        self.count
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Writes the artifact. An effectively empty artifact never creates a
    /// new output file, but truncates one left over from a previous run.
    /// Returns whether a non-empty artifact was written.
    pub fn write(&self, output: &Path) -> Result<bool> {
        if self.buffer.trim().is_empty() {
            if output.exists() {
                fs::write(output, "")
                    .with_context(|| format!("Failed to truncate {}", output.display()))?;
            }
            return Ok(false);
        }
        fs::write(output, &self.buffer)
            .with_context(|| format!("Failed to write to {}", output.display()))?;
        Ok(true)
    }

    /// Best-effort clipboard copy of the full artifact. Both a missing
    /// clipboard and a failed write degrade to a warning.
    pub fn copy_to_clipboard(&self) {
        let mut clipboard = match Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(err) => {
                warn!("Clipboard unavailable: {}", err);
                return;
            }
        };
        match clipboard.set_text(self.buffer.as_str()) {
            Ok(()) => println!("Copied to clipboard."),
            Err(err) => warn!("Could not copy to clipboard: {}", err),
        }
    }
}

fn display_path(path: &Path) -> String {
    let given = path.display().to_string();
    given.strip_prefix("./").map(str::to_owned).unwrap_or(given)
}
