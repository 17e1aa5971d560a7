use regex::Regex;
use std::sync::OnceLock;

/// Name of the project configuration file.
pub const CONFIG_FILENAME: &str = ".pxscale.toml";

/// Directory scanned when neither the CLI nor the config names one.
pub const DEFAULT_ROOT: &str = "src/ads-v5";

/// File-name glob for candidate component files.
pub const DEFAULT_PATTERN: &str = "Ad*_V5.tsx";

/// Name of the scaling function bound inside each component.
pub const DEFAULT_HELPER: &str = "s";

/// Hook that produces the scaling function.
pub const DEFAULT_HOOK: &str = "useScale";

/// Module the hook is imported from.
pub const DEFAULT_IMPORT_MODULE: &str = "./shared";

/// Prefix of scene component names (`const SceneIntro: React.FC = ...`).
pub const DEFAULT_COMPONENT_PREFIX: &str = "Scene";

/// Component whose `size` prop is always scaled.
pub const DEFAULT_GLOW_COMPONENT: &str = "RadialGlow";

/// Calls that establish per-frame or per-video-config context.
pub const DEFAULT_CONTEXT_CALLS: [&str; 2] = ["useVideoConfig()", "useCurrentFrame()"];

/// Number of lines after a context call searched for an existing hook call.
pub const INJECT_LOOKAHEAD_LINES: usize = 4;

/// Width/height literals are scaled only strictly inside this band.
pub const DIMENSION_BAND: (u64, u64) = (10, 500);

/// Interpolation endpoints are scaled when their magnitude exceeds this.
pub const INTERPOLATE_THRESHOLD: u64 = 10;

/// Folders never descended into during recursive discovery.
pub const DEFAULT_EXCLUDE_FOLDERS: [&str; 6] =
    ["node_modules", ".git", "dist", "build", "out", ".turbo"];

/// `padding`/`margin` given as a double-quoted list of pixel values.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_px_shorthand_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r#"(padding|margin):\s*"([0-9\s]+px[0-9px\s]*)""#)
            .expect("Invalid px shorthand regex pattern")
    })
}

/// `margin` given as a double-quoted string holding at least one pixel token.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_mixed_margin_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r#"(margin):\s*"([^"]*[0-9]+px[^"]*)""#)
            .expect("Invalid mixed margin regex pattern")
    })
}

/// `interpolate(<expr>, [0, 1], [A, B])` with integer endpoints.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_interpolate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"interpolate\([^,]+,\s*\[0,\s*1\],\s*\[(-?[0-9]+),\s*(-?[0-9]+)\]\)")
            .expect("Invalid interpolate regex pattern")
    })
}

pub use get_interpolate_re as INTERPOLATE_RE;
pub use get_mixed_margin_re as MIXED_MARGIN_RE;
pub use get_px_shorthand_re as PX_SHORTHAND_RE;
