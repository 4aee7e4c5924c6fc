use globset::{Glob, GlobMatcher};
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

/// User-supplied exclusion globs, compiled once per run.
///
/// A path is skipped when any pattern matches its base name, the path as
/// it was given, or its absolute form. The same predicate backs explicit
/// file filtering, directory pruning, per-file re-checks during search,
/// and tree-report skipping.
#[derive(Clone, Default)]
pub struct SkipPatterns {
    matchers: Vec<(String, GlobMatcher)>,
}

impl SkipPatterns {
    pub fn new(patterns: &[String]) -> Self {
        let mut matchers = Vec::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => matchers.push((pattern.clone(), glob.compile_matcher())),
                Err(err) => warn!("Ignoring invalid skip pattern '{}': {}", pattern, err),
            }
        }
        SkipPatterns { matchers }
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// The original pattern strings, for handing to external tools.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|(pattern, _)| pattern.as_str())
    }

    pub fn is_skipped(&self, path: &Path) -> bool {
        if self.matchers.is_empty() {
            return false;
        }
        let absolute = absolutize(path);
        let name = path.file_name().map(Path::new);
        self.matchers.iter().any(|(_, matcher)| {
            name.map_or(false, |name| matcher.is_match(name))
                || matcher.is_match(path)
                || matcher.is_match(&absolute)
        })
    }
}

/// Resolves a path to its canonical absolute form, falling back to joining
/// it onto the working directory when it cannot be canonicalized (e.g. it
/// vanished mid-run). Also used as the deduplication key.
pub fn absolutize(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(resolved) => resolved,
        Err(_) => env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf()),
    }
}
