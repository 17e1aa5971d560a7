//! Path utilities for pxscale.
//!
//! - Cross-platform path normalization for display
//! - Candidate file discovery by file-name glob

use std::path::{Path, PathBuf};

use anyhow::Context;
use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use pxscale::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\Ad1_V5.tsx")), "src/Ad1_V5.tsx");
/// assert_eq!(normalize_display_path(Path::new("./src/ads-v5")), "src/ads-v5");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Display name of `file` relative to `root`; the bare name for top-level files.
#[must_use]
pub fn display_relative(file: &Path, root: &Path) -> String {
    normalize_display_path(file.strip_prefix(root).unwrap_or(file))
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    for exclude in excludes {
        if exclude.starts_with("*.") {
            if name.ends_with(&exclude[1..]) {
                return true;
            }
        } else if name == exclude {
            return true;
        }
    }
    false
}

/// Compiles a file-name glob such as `Ad*_V5.tsx`.
///
/// # Errors
///
/// Returns an error if the glob is malformed.
pub fn file_name_matcher(root: &Path, pattern: &str) -> anyhow::Result<Override> {
    let mut builder = OverrideBuilder::new(root);
    builder
        .add(pattern)
        .with_context(|| format!("Invalid file pattern '{pattern}'"))?;
    builder
        .build()
        .with_context(|| format!("Invalid file pattern '{pattern}'"))
}

/// Collects files under `root` whose name matches `pattern`, sorted by path.
///
/// Only the root itself is listed unless `recursive` is set. A flat listing
/// takes every matching file, ignored or not. Recursive walks honour
/// `.gitignore`/`.ignore` files and skip the default folders plus `exclude`.
/// Hidden entries are always skipped.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob.
pub fn collect_candidate_files(
    root: &Path,
    pattern: &str,
    recursive: bool,
    exclude: &[String],
    verbose: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let matcher = file_name_matcher(root, pattern)?;

    let excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS.iter().map(|&s| s.to_owned()))
        .collect();
    let root_for_filter = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .max_depth(if recursive { None } else { Some(1) })
        .ignore(recursive)
        .parents(recursive)
        .git_ignore(recursive)
        .git_global(recursive)
        .git_exclude(recursive)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !is_excluded(name, &excludes))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                // Match on the bare name so the glob never sees directory parts.
                let name = Path::new(entry.file_name());
                if matcher.matched(name, false).is_whitelist() {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                if verbose {
                    eprintln!("Walk error: {e}");
                }
            }
        }
    }

    files.sort();
    Ok(files)
}
