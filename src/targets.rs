use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Positional targets partitioned by what actually exists on disk.
#[derive(Debug, Default)]
pub struct ResolvedTargets {
    /// Targets naming an existing regular file, in the order given.
    pub files: Vec<PathBuf>,
    /// Targets naming an existing directory, in the order given.
    pub dirs: Vec<PathBuf>,
    /// Everything else, treated as file-name globs during search.
    pub name_patterns: Vec<String>,
}

/// Classifies each target at invocation time: an existing regular file is
/// taken as-is, an existing directory is searched, and anything else
/// becomes a name pattern.
pub fn resolve(targets: &[String], recursive: bool) -> ResolvedTargets {
    let mut resolved = ResolvedTargets::default();

    for target in targets {
        let path = Path::new(target);
        if path.is_file() {
            resolved.files.push(path.to_path_buf());
        } else if path.is_dir() {
            resolved.dirs.push(path.to_path_buf());
        } else {
            debug!("Treating '{}' as a name pattern", target);
            resolved.name_patterns.push(target.clone());
        }
    }

    if targets.is_empty() {
        resolved.dirs.push(PathBuf::from("."));
    } else if resolved.dirs.is_empty() && !resolved.name_patterns.is_empty() {
        if recursive && resolved.files.is_empty() {
            // Patterns alone don't pick a search root.
            resolved.dirs.push(PathBuf::from("."));
        } else if !recursive {
            warn!(
                "Name patterns given without a directory to search; \
                 pass -r to search the current directory tree"
            );
        }
    }

    resolved
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

    #[test]
    fn no_targets_default_to_current_directory() {
        let resolved = resolve(&[], false);
        assert!(resolved.files.is_empty());
        assert_eq!(resolved.dirs, vec![PathBuf::from(".")]);
        assert!(resolved.name_patterns.is_empty());
    }

    #[test]
    fn targets_partition_by_disk_state() {
        let root = unique_temp_dir();
        let file = root.join("a.txt");
        create_file(&file, "a");
        let dir = root.join("sub");
        fs::create_dir_all(&dir).unwrap();

        let targets = vec![
            file.to_string_lossy().into_owned(),
            dir.to_string_lossy().into_owned(),
            "*.nope".to_string(),
        ];
        let resolved = resolve(&targets, false);

        assert_eq!(resolved.files, vec![file]);
        assert_eq!(resolved.dirs, vec![dir]);
        assert_eq!(resolved.name_patterns, vec!["*.nope".to_string()]);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn recursive_patterns_alone_add_current_directory() {
        let resolved = resolve(&["*.zz-never-a-file".to_string()], true);
        assert_eq!(resolved.dirs, vec![PathBuf::from(".")]);
    }

    #[test]
    fn non_recursive_patterns_alone_do_not_search() {
        let resolved = resolve(&["*.zz-never-a-file".to_string()], false);
        assert!(resolved.dirs.is_empty());
        assert_eq!(resolved.name_patterns.len(), 1);
    }

    #[test]
    fn patterns_with_explicit_files_do_not_add_directory() {
        let root = unique_temp_dir();
        let file = root.join("a.txt");
        create_file(&file, "a");

        let targets = vec![
            file.to_string_lossy().into_owned(),
            "*.zz-never-a-file".to_string(),
        ];
        let resolved = resolve(&targets, true);
        assert!(resolved.dirs.is_empty());
        assert_eq!(resolved.files, vec![file]);

        fs::remove_dir_all(root).unwrap();
    }
}
