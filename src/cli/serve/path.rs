//! URL to media file resolution.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Resolve a request URL under `prefix` to a file below `root`.
///
/// Returns `None` for URLs outside the prefix, missing files, directories,
/// and anything that would escape `root`.
pub fn resolve_media(url: &str, prefix: &str, root: &Path) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let rest = path.strip_prefix(prefix)?;
    let decoded = percent_decode_str(rest).decode_utf8().ok()?;
    let clean = decoded.trim_matches('/');

    // Reject paths with suspicious patterns early
    if clean.is_empty() || clean.contains("..") {
        return None;
    }

    // Canonicalize to resolve symlinks and verify path is under root
    let canonical = root.join(clean).canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    canonical.is_file().then_some(canonical)
}
