use crate::cli::Cli;
use crate::commands::{run_scale, run_stdin, ScaleRunOptions};
use crate::config::Config;
use crate::constants::{DEFAULT_PATTERN, DEFAULT_ROOT};
use crate::rewrite::{Rewriter, ScaleOptions};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Runs pxscale with the given arguments.
///
/// # Errors
///
/// Returns an error if writing output fails or the pipeline cannot be built.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run pxscale with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
/// `--stdin` still reads the process's standard input.
///
/// # Errors
///
/// Returns an error if writing output fails or the pipeline cannot be built.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["pxscale".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    // Config is looked up from the target directory, or the current one.
    let config_start = cli_var.root.as_deref().unwrap_or_else(|| Path::new("."));
    let config = Config::load_from_path(config_start);

    let mut scale_options = config.scale_options();
    if let Some(helper) = &cli_var.helper {
        scale_options.helper.clone_from(helper);
    }

    if cli_var.output.verbose && !cli_var.output.json {
        log_configuration(&config, &scale_options);
    }

    let rewriter = Rewriter::new(&scale_options).context("Failed to build rewrite pipeline")?;

    if cli_var.mode.stdin {
        let stdin = std::io::stdin();
        run_stdin(&rewriter, stdin.lock(), &mut *writer, cli_var.output.verbose)?;
        return Ok(0);
    }

    let root = cli_var
        .root
        .clone()
        .or_else(|| config.resolved_root())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
    if !root.is_dir() {
        eprintln!(
            "Error: The directory '{}' does not exist.",
            root.display()
        );
        return Ok(1);
    }

    let mut exclude_folders = config.pxscale.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(cli_var.exclude_folders.clone());

    let options = ScaleRunOptions {
        root,
        pattern: cli_var
            .pattern
            .clone()
            .or_else(|| config.pxscale.pattern.clone())
            .unwrap_or_else(|| DEFAULT_PATTERN.to_owned()),
        recursive: cli_var.recursive || config.pxscale.recursive.unwrap_or(false),
        exclude_folders,
        dry_run: cli_var.mode.dry_run,
        check: cli_var.mode.check,
        json: cli_var.output.json,
        stats: cli_var.output.stats,
        verbose: cli_var.output.verbose,
    };

    let summary = match run_scale(&rewriter, &options, &mut *writer) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Ok(1);
        }
    };
    Ok(summary.exit_code(options.check))
}

fn log_configuration(config: &Config, options: &ScaleOptions) {
    eprintln!("[VERBOSE] pxscale v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
    match &config.config_file_path {
        Some(path) => eprintln!("[VERBOSE] Config: {}", path.display()),
        None => eprintln!("[VERBOSE] Config: defaults (no .pxscale.toml found)"),
    }
    for key in config.unknown_threshold_keys() {
        eprintln!("[VERBOSE] Ignoring unknown threshold '{key}'");
    }
    eprintln!(
        "[VERBOSE] Binding: {} from {} ({}*)",
        options.binding_line(),
        options.import_module,
        options.component_prefix
    );
    eprintln!("[VERBOSE] Thresholds: {:?}", options.thresholds);
    eprintln!();
}
