pub mod args;
pub mod classify;
pub mod logger;
pub mod output;
pub mod patterns;
pub mod targets;
pub mod tree;
pub mod walker;

use crate::args::Args;
use crate::output::CombinedOutput;
use crate::patterns::SkipPatterns;
use crate::walker::NamePatterns;
use anyhow::Result;
use tracing::info;

/// Runs one collection pass: resolve targets, render the optional tree
/// report, gather explicit files then directory-search results, and hand
/// the combined artifact to the output file and the clipboard.
///
/// Explicit files are processed first so they win deduplication and take
/// the lowest ordinals. Per-file problems are logged and skipped; only a
/// failure to write the artifact itself is an error.
pub fn run(args: Args) -> Result<()> {
    let skip = SkipPatterns::new(&args.skip);
    let resolved = targets::resolve(&args.targets, args.recursive);
    let names = NamePatterns::new(&resolved.name_patterns);

    let tree_report = tree::render_tree_report(&resolved.dirs, &skip);
    let mut output = CombinedOutput::new(tree_report);

    for file in &resolved.files {
        if skip.is_skipped(file) {
            info!("Skipping {} (matches skip pattern)", file.display());
            continue;
        }
        if !output.claim(file) || !classify::is_text_candidate(file) {
            continue;
        }
        output.append_file(file);
    }

    for found in walker::collect_from_directories(&resolved.dirs, args.recursive, &names, &skip) {
        if !output.claim(&found) || !classify::is_text_candidate(&found) {
            continue;
        }
        output.append_file(&found);
    }

    if output.write(&args.output)? {
        println!(
            "Combined {} file(s) into {}.",
            output.file_count(),
            args.output.display()
        );
        output.copy_to_clipboard();
    } else {
        info!("No file contents collected; nothing written");
    }

    Ok(())
}
