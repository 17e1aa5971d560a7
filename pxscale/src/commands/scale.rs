//! Batch rewrite command.

use crate::output;
use crate::rewrite::{ChangeResult, Pass, Rewriter};
use crate::utils::{collect_candidate_files, display_relative, normalize_display_path};

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Options for a batch run.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScaleRunOptions {
    /// Directory scanned for candidate files.
    pub root: PathBuf,
    /// File-name glob.
    pub pattern: String,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Extra folders to skip while descending.
    pub exclude_folders: Vec<String>,
    /// Report only, never write.
    pub dry_run: bool,
    /// Dry run that fails when anything would change.
    pub check: bool,
    /// Emit one JSON document instead of text.
    pub json: bool,
    /// Print the per-pass table.
    pub stats: bool,
    /// Log per-file pass counts to stderr.
    pub verbose: bool,
}

impl ScaleRunOptions {
    /// True when no file may be written.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.check
    }
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Content changed (and was written unless dry-running).
    Updated,
    /// Nothing to rewrite.
    Unchanged,
    /// Reading or writing failed.
    Failed,
}

/// Per-file entry of a run.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the root.
    pub file: String,
    /// Outcome.
    pub status: FileStatus,
    /// Edits per pass; passes that did nothing are omitted.
    pub passes: BTreeMap<Pass, usize>,
    /// I/O error message for failed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a batch run, also the `--json` document.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Scanned directory.
    pub root: String,
    /// File-name glob used.
    pub pattern: String,
    /// Whether writes were suppressed.
    pub dry_run: bool,
    /// Number of candidate files.
    pub total: usize,
    /// Files that changed.
    pub updated: usize,
    /// Files left as they were.
    pub unchanged: usize,
    /// Files that could not be read or written.
    pub failed: usize,
    /// One entry per candidate, sorted by path.
    pub files: Vec<FileReport>,
}

impl RunSummary {
    fn new(root: String, pattern: String, dry_run: bool, files: Vec<FileReport>) -> Self {
        let count = |status: FileStatus| files.iter().filter(|f| f.status == status).count();
        Self {
            root,
            pattern,
            dry_run,
            total: files.len(),
            updated: count(FileStatus::Updated),
            unchanged: count(FileStatus::Unchanged),
            failed: count(FileStatus::Failed),
            files,
        }
    }

    /// Files touched and edits made per pass, over the whole run.
    #[must_use]
    pub fn pass_totals(&self) -> BTreeMap<Pass, (usize, usize)> {
        let mut totals = BTreeMap::new();
        for report in &self.files {
            for (pass, edits) in &report.passes {
                let entry = totals.entry(*pass).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += edits;
            }
        }
        totals
    }

    /// 1 if any file failed, or if `check` is set and any file would change.
    #[must_use]
    pub fn exit_code(&self, check: bool) -> i32 {
        i32::from(self.failed > 0 || (check && self.updated > 0))
    }
}

/// I/O failure on a single file. The batch continues past it.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The file could not be read (missing, unreadable, or not UTF-8).
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The rewritten text could not be written back.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Rewrites one file in place. Unchanged files are never written.
///
/// # Errors
///
/// Returns [`FileError`] if the file cannot be read or written.
pub fn process_file(
    path: &Path,
    rewriter: &Rewriter,
    dry_run: bool,
) -> Result<ChangeResult, FileError> {
    let source = fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let result = rewriter.rewrite(&source);
    if result.changed && !dry_run {
        fs::write(path, &result.text).map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(result)
}

fn file_report(file: String, outcome: Result<ChangeResult, FileError>) -> FileReport {
    match outcome {
        Ok(result) => FileReport {
            file,
            status: if result.changed {
                FileStatus::Updated
            } else {
                FileStatus::Unchanged
            },
            passes: result.passes.into_iter().filter(|(_, n)| *n > 0).collect(),
            error: None,
        },
        Err(e) => FileReport {
            file,
            status: FileStatus::Failed,
            passes: BTreeMap::new(),
            error: Some(e.to_string()),
        },
    }
}

fn log_passes(file: &str, passes: &BTreeMap<Pass, usize>) {
    if passes.is_empty() {
        eprintln!("[VERBOSE] {file}: no edits");
        return;
    }
    let counts = passes
        .iter()
        .map(|(pass, n)| format!("{pass}={n}"))
        .collect::<Vec<_>>()
        .join(", ");
    eprintln!("[VERBOSE] {file}: {counts}");
}

/// Discovers candidate files and rewrites them in parallel.
///
/// Reports are emitted in sorted path order regardless of scheduling.
///
/// # Errors
///
/// Returns an error if the pattern is invalid or writing to `writer` fails.
/// Per-file I/O failures are reported, not returned.
pub fn run_scale<W: Write>(
    rewriter: &Rewriter,
    options: &ScaleRunOptions,
    mut writer: W,
) -> Result<RunSummary> {
    let dry_run = options.is_dry_run();
    let root_display = normalize_display_path(&options.root);

    let files = collect_candidate_files(
        &options.root,
        &options.pattern,
        options.recursive,
        &options.exclude_folders,
        options.verbose,
    )?;

    if !options.json {
        output::print_found(&mut writer, files.len(), &options.pattern, &root_display)?;
    }

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            let outcome = process_file(path, rewriter, dry_run);
            file_report(display_relative(path, &options.root), outcome)
        })
        .collect();

    if options.verbose {
        for report in &reports {
            log_passes(&report.file, &report.passes);
        }
    }

    let summary = RunSummary::new(root_display, options.pattern.clone(), dry_run, reports);

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(summary);
    }

    for report in &summary.files {
        output::print_file_status(&mut writer, report, dry_run)?;
    }
    output::print_run_summary(&mut writer, &summary)?;
    if options.stats {
        output::print_pass_table(&mut writer, &summary)?;
    }

    Ok(summary)
}

/// Rewrites a single source read from `reader` and writes the result to `writer`.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn run_stdin<R: Read, W: Write>(
    rewriter: &Rewriter,
    mut reader: R,
    mut writer: W,
    verbose: bool,
) -> Result<ChangeResult> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    let result = rewriter.rewrite(&source);
    writer.write_all(result.text.as_bytes())?;
    writer.flush()?;
    if verbose {
        let passes: BTreeMap<Pass, usize> =
            result.passes.iter().copied().filter(|(_, n)| *n > 0).collect();
        log_passes("<stdin>", &passes);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::ScaleOptions;
    use tempfile::TempDir;

    const NEEDS_SCALING: &str = "const style = { fontSize: 48, gap: 12 };\n";
    const ALREADY_SCALED: &str = "const style = { fontSize: s(48), gap: 2 };\n";

    fn rewriter() -> Rewriter {
        Rewriter::new(&ScaleOptions::default()).unwrap()
    }

    fn options(root: &Path) -> ScaleRunOptions {
        ScaleRunOptions {
            root: root.to_path_buf(),
            pattern: "Ad*_V5.tsx".to_owned(),
            recursive: false,
            exclude_folders: Vec::new(),
            dry_run: false,
            check: false,
            json: false,
            stats: false,
            verbose: false,
        }
    }

    #[test]
    fn test_process_file_writes_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Ad1_V5.tsx");
        fs::write(&path, NEEDS_SCALING).unwrap();

        let result = process_file(&path, &rewriter(), false).unwrap();
        assert!(result.changed);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "const style = { fontSize: s(48), gap: s(12) };\n"
        );
    }

    #[test]
    fn test_process_file_dry_run_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Ad1_V5.tsx");
        fs::write(&path, NEEDS_SCALING).unwrap();

        let result = process_file(&path, &rewriter(), true).unwrap();
        assert!(result.changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), NEEDS_SCALING);
    }

    #[test]
    fn test_unchanged_file_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Ad1_V5.tsx");
        fs::write(&path, ALREADY_SCALED).unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let result = process_file(&path, &rewriter(), false).unwrap();
        assert!(!result.changed);
        let after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = process_file(&dir.path().join("Ad404_V5.tsx"), &rewriter(), false).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.to_string().contains("Ad404_V5.tsx"));
    }

    #[test]
    fn test_run_scale_reports_each_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Ad1_Intro_V5.tsx"), NEEDS_SCALING).unwrap();
        fs::write(dir.path().join("Ad2_Outro_V5.tsx"), ALREADY_SCALED).unwrap();
        fs::write(dir.path().join("Notes.tsx"), NEEDS_SCALING).unwrap();

        let mut out = Vec::new();
        let summary = run_scale(&rewriter(), &options(dir.path()), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.exit_code(false), 0);
        assert!(text.contains("Found 2 files matching Ad*_V5.tsx"));
        assert!(text.contains("[UPDATED]"));
        assert!(text.contains("Ad1_Intro_V5.tsx"));
        assert!(text.contains("[NO CHANGE]"));
        assert!(text.contains("Updated 1/2 files"));
        assert_eq!(
            fs::read_to_string(dir.path().join("Notes.tsx")).unwrap(),
            NEEDS_SCALING
        );
    }

    #[test]
    fn test_run_scale_check_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Ad1_V5.tsx");
        fs::write(&path, NEEDS_SCALING).unwrap();

        let mut opts = options(dir.path());
        opts.check = true;
        let mut out = Vec::new();
        let summary = run_scale(&rewriter(), &opts, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.exit_code(true), 1);
        assert!(text.contains("[WOULD UPDATE]"));
        assert!(text.contains("Would update 1/1 files"));
        assert_eq!(fs::read_to_string(&path).unwrap(), NEEDS_SCALING);
    }

    #[test]
    fn test_run_scale_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Ad1_V5.tsx"), NEEDS_SCALING).unwrap();

        let mut opts = options(dir.path());
        opts.json = true;
        opts.dry_run = true;
        let mut out = Vec::new();
        run_scale(&rewriter(), &opts, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["updated"], 1);
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["files"][0]["file"], "Ad1_V5.tsx");
        assert_eq!(value["files"][0]["status"], "updated");
        assert_eq!(value["files"][0]["passes"]["fontSize"], 1);
        assert_eq!(value["files"][0]["passes"]["gap"], 1);
        assert!(value["files"][0].get("error").is_none());
    }

    #[test]
    fn test_pass_totals_and_stats_table() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Ad1_V5.tsx"), NEEDS_SCALING).unwrap();
        fs::write(dir.path().join("Ad2_V5.tsx"), "const a = { fontSize: 30 };").unwrap();

        let mut opts = options(dir.path());
        opts.stats = true;
        let mut out = Vec::new();
        let summary = run_scale(&rewriter(), &opts, &mut out).unwrap();

        let totals = summary.pass_totals();
        assert_eq!(totals.get(&Pass::FontSize), Some(&(2, 2)));
        assert_eq!(totals.get(&Pass::Gap), Some(&(1, 1)));
        assert!(String::from_utf8(out).unwrap().contains("fontSize"));
    }

    #[test]
    fn test_run_stdin() {
        let mut out = Vec::new();
        let result = run_stdin(&rewriter(), NEEDS_SCALING.as_bytes(), &mut out, false).unwrap();
        assert!(result.changed);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "const style = { fontSize: s(48), gap: s(12) };\n"
        );
    }
}
