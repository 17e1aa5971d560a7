//! Human-readable run output: status lines, summary, and the per-pass table.

use crate::commands::{FileReport, FileStatus, RunSummary};
use crate::rewrite::Pass;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::io::Write;

/// Print the discovery line that opens every run.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_found(
    writer: &mut impl Write,
    total: usize,
    pattern: &str,
    root: &str,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "Found {} files matching {} in {}",
        total,
        pattern,
        root.dimmed()
    )
}

/// Print one `[UPDATED]` / `[NO CHANGE]` / `[FAILED]` line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_file_status(
    writer: &mut impl Write,
    report: &FileReport,
    dry_run: bool,
) -> std::io::Result<()> {
    match report.status {
        FileStatus::Updated if dry_run => {
            writeln!(writer, "  {} {}", "[WOULD UPDATE]".yellow(), report.file)
        }
        FileStatus::Updated => writeln!(writer, "  {} {}", "[UPDATED]".green(), report.file),
        FileStatus::Unchanged => {
            writeln!(writer, "  {} {}", "[NO CHANGE]".dimmed(), report.file)
        }
        FileStatus::Failed => writeln!(
            writer,
            "  {} {}: {}",
            "[FAILED]".red().bold(),
            report.file,
            report.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

/// Print the closing `Updated X/Y files` line, plus a failure count if any.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_run_summary(writer: &mut impl Write, summary: &RunSummary) -> std::io::Result<()> {
    let verb = if summary.dry_run {
        "Would update"
    } else {
        "Updated"
    };
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        format!("{verb} {}/{} files", summary.updated, summary.total).bold()
    )?;
    if summary.failed > 0 {
        writeln!(
            writer,
            "{}",
            format!("Failed: {} files", summary.failed).red().bold()
        )?;
    }
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print edits per pass across the run, in pipeline order.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_pass_table(writer: &mut impl Write, summary: &RunSummary) -> std::io::Result<()> {
    let totals = summary.pass_totals();
    let mut table = create_table(vec!["Pass", "Files", "Edits"]);
    for pass in Pass::ORDER {
        let (files, edits) = totals.get(&pass).copied().unwrap_or((0, 0));
        let edits_cell = if edits == 0 {
            Cell::new(edits).fg(Color::DarkGrey)
        } else {
            Cell::new(edits).fg(Color::Green).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![Cell::new(pass.as_str()), Cell::new(files), edits_cell]);
    }
    writeln!(writer)?;
    writeln!(writer, "{table}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn report(file: &str, status: FileStatus) -> FileReport {
        FileReport {
            file: file.to_owned(),
            status,
            passes: BTreeMap::new(),
            error: None,
        }
    }

    #[test]
    fn test_status_lines() {
        let mut out = Vec::new();
        print_file_status(&mut out, &report("Ad1_V5.tsx", FileStatus::Updated), false).unwrap();
        print_file_status(&mut out, &report("Ad2_V5.tsx", FileStatus::Updated), true).unwrap();
        print_file_status(&mut out, &report("Ad3_V5.tsx", FileStatus::Unchanged), false).unwrap();
        let mut failed = report("Ad4_V5.tsx", FileStatus::Failed);
        failed.error = Some("failed to read Ad4_V5.tsx: denied".to_owned());
        print_file_status(&mut out, &failed, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[UPDATED]"));
        assert!(text.contains("[WOULD UPDATE]"));
        assert!(text.contains("[NO CHANGE]"));
        assert!(text.contains("[FAILED]"));
        assert!(text.contains("Ad4_V5.tsx: failed to read Ad4_V5.tsx: denied"));
    }

    #[test]
    fn test_pass_table_lists_every_pass() {
        let summary = RunSummary {
            root: "src/ads-v5".to_owned(),
            pattern: "Ad*_V5.tsx".to_owned(),
            dry_run: false,
            total: 0,
            updated: 0,
            unchanged: 0,
            failed: 0,
            files: Vec::new(),
        };
        let mut out = Vec::new();
        print_pass_table(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        for pass in Pass::ORDER {
            assert!(text.contains(pass.as_str()), "missing {pass}");
        }
    }
}
