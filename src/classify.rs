use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Files larger than this are only included when the content-type probe
/// confirms they are text.
const LARGE_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// How much of a file the shebang and sniffing heuristics look at.
const HEAD_BYTES: u64 = 512;

/// Probed content types accepted beyond the `text/*` family.
const TEXT_LIKE_MIMES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/javascript",
    "application/ecmascript",
    "application/x-sh",
    "application/x-shellscript",
    "application/x-csh",
    "application/x-python-code",
    "application/x-perl",
    "application/x-executable",
    "application/x-empty",
    "inode/x-empty",
];

/// Decides whether a file is safe to embed verbatim in the combined
/// output. Unreadable files and anything that still looks binary after
/// every heuristic are excluded.
pub fn is_text_candidate(path: &Path) -> bool {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!("Skipping {}: {}", path.display(), err);
            return false;
        }
    };
    let head = match read_head(path) {
        Ok(head) => head,
        Err(err) => {
            warn!("Skipping {}: {}", path.display(), err);
            return false;
        }
    };
    let mime = probe_mime(path);

    let text = is_text(metadata.len(), mime.as_deref(), &head);
    if !text {
        info!(
            "Skipping {} (not text-like, probed type: {})",
            path.display(),
            mime.as_deref().unwrap_or("unknown")
        );
    }
    text
}

fn is_text(len: u64, mime: Option<&str>, head: &[u8]) -> bool {
    if len > LARGE_FILE_BYTES {
        // Huge logs stay in, huge binaries stay out.
        return match mime {
            Some(mime) => matches!(primary_category(mime), "text" | "inode"),
            None => looks_like_text(head),
        };
    }

    match mime {
        Some(mime) => {
            if mime.starts_with("text/") || TEXT_LIKE_MIMES.contains(&mime) {
                return true;
            }
            // Scripts without an extension often probe as plain binary.
            if mime == "application/octet-stream" && head.starts_with(b"#!") {
                return true;
            }
            len == 0
        }
        None => {
            if len == 0 || head.starts_with(b"#!") {
                return true;
            }
            looks_like_text(head)
        }
    }
}

fn primary_category(mime: &str) -> &str {
    mime.split('/').next().unwrap_or(mime)
}

fn looks_like_text(head: &[u8]) -> bool {
    !head.is_empty() && !head.contains(&0)
}

fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(HEAD_BYTES as usize);
    fs::File::open(path)?.take(HEAD_BYTES).read_to_end(&mut head)?;
    Ok(head)
}

/// Asks the external `file` utility for a MIME type. Returns None when the
/// utility is missing or the probe fails, in which case classification
/// falls back to content sniffing.
fn probe_mime(path: &Path) -> Option<String> {
    if !probe_available() {
        return None;
    }
    let output = Command::new("file")
        .arg("--brief")
        .arg("--mime-type")
        .arg(path)
        .output();
    match output {
        Ok(output) if output.status.success() => {
            let mime = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if mime.is_empty() {
                None
            } else {
                Some(mime)
            }
        }
        Ok(output) => {
            debug!("file probe failed for {}: {}", path.display(), output.status);
            None
        }
        Err(err) => {
            debug!("file probe failed for {}: {}", path.display(), err);
            None
        }
    }
}

fn probe_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        let found = Command::new("file")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        if !found {
            debug!("'file' utility not found; falling back to content sniffing");
        }
        found
    })
}
