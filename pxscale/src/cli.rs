use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.pxscale.toml):
  Looked up from the target directory upwards. Command-line flags win.

  [pxscale]
  root = \"src/ads-v5\"          # Relative to this file
  pattern = \"Ad*_V5.tsx\"       # File-name glob
  recursive = false
  exclude_folders = [\"node_modules\", \"dist\"]

  # Naming conventions
  helper = \"s\"
  hook = \"useScale\"
  import_module = \"./shared\"
  component_prefix = \"Scene\"
  context_calls = [\"useVideoConfig()\", \"useCurrentFrame()\"]
  glow_component = \"RadialGlow\"

  [pxscale.thresholds]         # Literals <= threshold stay unscaled
  fontSize = 10
  gap = 4
  marginTop = 4
  marginBottom = 4
  borderRadius = 4
  top = 10
  bottom = 10
  left = 10
  right = 10
";

/// Options controlling whether and where results are written.
#[derive(Args, Debug, Default, Clone)]
pub struct ModeOptions {
    /// Report what would change without writing any file.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with code 1 if any file would change (for CI).
    #[arg(long)]
    pub check: bool,

    /// Read one source from stdin and write the rewritten text to stdout.
    #[arg(long, conflicts_with_all = ["root", "dry_run", "check", "json", "stats"])]
    pub stdin: bool,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Print a table of edits per pass after the summary.
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose output for debugging (shows configuration and per-pass edits).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    name = "pxscale",
    author,
    version,
    about = "pxscale - Make hard-coded pixel literals in Remotion components responsive",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Directory containing the component files.
    /// Defaults to the configured root, then `src/ads-v5`.
    pub root: Option<PathBuf>,

    /// File-name glob selecting candidate files (e.g. `Ad*_V5.tsx`).
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Descend into subdirectories of the root.
    #[arg(short, long)]
    pub recursive: bool,

    /// Folders to skip while descending.
    #[arg(long, short = 'e', alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Name of the scaling function (overrides config).
    #[arg(long)]
    pub helper: Option<String>,

    /// Write mode options.
    #[command(flatten)]
    pub mode: ModeOptions,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,
}
