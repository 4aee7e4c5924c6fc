use clap::Parser;
use std::path::PathBuf;

/// A tool to combine file contents into a single artifact and copy it to
/// the clipboard.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Descend into all subdirectory levels when searching directories.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Glob pattern to skip; matched against file names, paths as given,
    /// and absolute paths. May be repeated.
    #[arg(short = 's', long = "skip", value_name = "GLOB")]
    pub skip: Vec<String>,

    /// Output file, overwritten on every run.
    #[arg(
        long,
        value_name = "FILE",
        env = "FILECAT_OUTPUT",
        default_value = "combined_files.txt"
    )]
    pub output: PathBuf,

    /// Files, directories, or file-name patterns to collect
    /// (default: current directory).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub targets: Vec<String>,
}
