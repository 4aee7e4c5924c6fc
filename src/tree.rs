use crate::patterns::SkipPatterns;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

const TREE_DEPTH: &str = "3";

/// Renders a depth-limited directory listing per search directory by
/// shelling out to the `tree` utility, with skip patterns passed along as
/// ignore filters. Purely cosmetic: returns None when the utility is
/// missing or there is nothing to list, and a placeholder line replaces
/// any listing that cannot be produced.
pub fn render_tree_report(dirs: &[PathBuf], skip: &SkipPatterns) -> Option<String> {
    if dirs.is_empty() {
        return None;
    }
    if !tree_available() {
        debug!("'tree' utility not found; skipping the directory listing");
        return None;
    }

    let mut report = String::new();
    for dir in dirs {
        if skip.is_skipped(dir) {
            report.push_str(&format!("{} (Skipped)\n", dir.display()));
            continue;
        }

        let mut cmd = Command::new("tree");
        cmd.arg("-L").arg(TREE_DEPTH);
        if !skip.is_empty() {
            let ignored: Vec<&str> = skip.patterns().collect();
            cmd.arg("-I").arg(ignored.join("|"));
        }
        cmd.arg(dir);

        match cmd.output() {
            Ok(output) if output.status.success() => {
                report.push_str(&String::from_utf8_lossy(&output.stdout));
            }
            Ok(output) => {
                warn!("tree exited with {} for {}", output.status, dir.display());
                report.push_str(&format!("{} (could not generate)\n", dir.display()));
            }
            Err(err) => {
                warn!("Could not run tree for {}: {}", dir.display(), err);
                report.push_str(&format!("{} (could not generate)\n", dir.display()));
            }
        }
    }
    Some(report)
}

fn tree_available() -> bool {
    Command::new("tree")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
