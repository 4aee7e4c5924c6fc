use crate::patterns::SkipPatterns;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File-name globs that narrow a directory search. With no patterns every
/// file name matches; with patterns a name must match at least one.
pub struct NamePatterns {
    set: Option<GlobSet>,
}

impl NamePatterns {
    pub fn new(patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return NamePatterns { set: None };
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => warn!("Ignoring invalid name pattern '{}': {}", pattern, err),
            }
        }
        match builder.build() {
            Ok(set) => NamePatterns { set: Some(set) },
            Err(err) => {
                warn!("Could not compile name patterns: {}", err);
                NamePatterns { set: None }
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.set
            .as_ref()
            .map_or(true, |set| set.is_match(Path::new(name)))
    }
}

/// Searches each directory for regular files, honoring recursion depth,
/// name patterns, and skip patterns.
///
/// Skip-matched directories are pruned so their contents are never
/// visited; surviving files are still re-checked individually, which
/// catches patterns that name a file rather than a directory. Results are
/// sorted per directory for reproducible output.
pub fn collect_from_directories(
    dirs: &[PathBuf],
    recursive: bool,
    names: &NamePatterns,
    skip: &SkipPatterns,
) -> Vec<PathBuf> {
    let mut collected = Vec::new();

    for dir in dirs {
        if skip.is_skipped(dir) {
            info!("Skipping directory {} (matches skip pattern)", dir.display());
            continue;
        }

        let mut builder = WalkBuilder::new(dir);
        // No gitignore or hidden-file handling; skip patterns are the
        // only exclusion source.
        builder.standard_filters(false);
        if !recursive {
            builder.max_depth(Some(1));
        }
        let prune = skip.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
            if is_dir && prune.is_skipped(entry.path()) {
                debug!("Pruning directory {}", entry.path().display());
                return false;
            }
            true
        });

        let mut found = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Error while searching {}: {}", dir.display(), err);
                    continue;
                }
            };
            if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            let name = entry.file_name().to_string_lossy();
            if !names.matches(name.as_ref()) {
                continue;
            }
            if skip.is_skipped(path) {
                info!("Skipping {} (matches skip pattern)", path.display());
                continue;
            }
            found.push(path.to_path_buf());
        }
        found.sort();
        collected.extend(found);
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!("filecat-test-{nanos}"));
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn create_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = fs::File::create(path).unwrap();
        writeln!(file, "{contents}").unwrap();
    }

    fn relative_to(results: &[PathBuf], root: &Path) -> Vec<PathBuf> {
        results
            .iter()
            .map(|path| path.strip_prefix(root).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn non_recursive_search_stays_at_depth_one() {
        let root = unique_temp_dir();
        create_file(&root.join("top.txt"), "top");
        create_file(&root.join("sub/nested.txt"), "nested");

        let results = collect_from_directories(
            &[root.clone()],
            false,
            &NamePatterns::new(&[]),
            &SkipPatterns::new(&[]),
        );

        assert_eq!(relative_to(&results, &root), vec![PathBuf::from("top.txt")]);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn recursive_search_descends_and_sorts() {
        let root = unique_temp_dir();
        create_file(&root.join("zebra.txt"), "z");
        create_file(&root.join("alpha.txt"), "a");
        create_file(&root.join("sub/nested.txt"), "nested");

        let results = collect_from_directories(
            &[root.clone()],
            true,
            &NamePatterns::new(&[]),
            &SkipPatterns::new(&[]),
        );

        assert_eq!(
            relative_to(&results, &root),
            vec![
                PathBuf::from("alpha.txt"),
                PathBuf::from("sub/nested.txt"),
                PathBuf::from("zebra.txt"),
            ]
        );

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn skip_pattern_prunes_directories_entirely() {
        let root = unique_temp_dir();
        create_file(&root.join("keep.py"), "keep");
        create_file(&root.join("vendored/inner.py"), "inner");
        create_file(&root.join("vendored/deep/more.py"), "more");

        let results = collect_from_directories(
            &[root.clone()],
            true,
            &NamePatterns::new(&["*.py".to_string()]),
            &SkipPatterns::new(&["vendored".to_string()]),
        );

        assert_eq!(relative_to(&results, &root), vec![PathBuf::from("keep.py")]);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn name_patterns_and_file_skips_combine() {
        let root = unique_temp_dir();
        create_file(&root.join("a.py"), "a");
        create_file(&root.join("readme.md"), "docs");
        create_file(&root.join("sub/b.py"), "b");
        create_file(&root.join("sub/_test.py"), "test");

        let results = collect_from_directories(
            &[root.clone()],
            true,
            &NamePatterns::new(&["*.py".to_string()]),
            &SkipPatterns::new(&["*_test.py".to_string()]),
        );

        assert_eq!(
            relative_to(&results, &root),
            vec![PathBuf::from("a.py"), PathBuf::from("sub/b.py")]
        );

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn skipped_search_directory_yields_nothing() {
        let root = unique_temp_dir();
        let project = root.join("project");
        create_file(&project.join("a.txt"), "a");

        let results = collect_from_directories(
            &[project.clone()],
            true,
            &NamePatterns::new(&[]),
            &SkipPatterns::new(&["project".to_string()]),
        );

        assert!(results.is_empty());

        fs::remove_dir_all(root).unwrap();
    }
}
