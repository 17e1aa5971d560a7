//! The text-transformation pipeline.
//!
//! A [`Rewriter`] owns an ordered list of [`TextPass`]es. Each pass is a pure
//! function of its input text: it scans for one textual shape, decides per
//! match with an explicit predicate, and emits byte-range edits. Passes that
//! find nothing return the text untouched, so malformed input never fails.
//!
//! Order matters. Later passes rely on the output shape of earlier ones and
//! the double-wrap cleanup must run after every wrapping pass; see
//! [`Pass::ORDER`].

mod cleanup;
mod compound;
mod imports;
mod inject;
mod interpolate;
mod literals;
mod options;
mod props;

pub use cleanup::CleanupPass;
pub use compound::{MixedMarginPass, PxShorthandPass};
pub use imports::ImportPass;
pub use inject::InjectPass;
pub use interpolate::InterpolatePass;
pub use literals::LiteralPass;
pub use options::{ScaleOptions, Thresholds};
pub use props::GlowSizePass;

use crate::fix::{ByteRangeRewriter, Edit};
use serde::Serialize;
use std::fmt;

/// Identifies one step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Pass {
    /// Add the hook to the shared named import.
    #[serde(rename = "import")]
    Import,
    /// Bind the helper inside each scene component.
    #[serde(rename = "inject")]
    Inject,
    /// `fontSize: N`
    #[serde(rename = "fontSize")]
    FontSize,
    /// `gap: N`
    #[serde(rename = "gap")]
    Gap,
    /// `marginTop: N`
    #[serde(rename = "marginTop")]
    MarginTop,
    /// `marginBottom: N`
    #[serde(rename = "marginBottom")]
    MarginBottom,
    /// `borderRadius: N`
    #[serde(rename = "borderRadius")]
    BorderRadius,
    /// `padding: "Apx Bpx ..."` and `margin: "Apx Bpx ..."`
    #[serde(rename = "pxShorthand")]
    PxShorthand,
    /// `margin: "0 0 10px"`
    #[serde(rename = "mixedMargin")]
    MixedMargin,
    /// `width: N` and `height: N`
    #[serde(rename = "dimensions")]
    Dimensions,
    /// `top`/`bottom`/`left`/`right: N`
    #[serde(rename = "position")]
    Position,
    /// `interpolate(x, [0, 1], [A, B])` output ranges
    #[serde(rename = "interpolate")]
    Interpolate,
    /// `<RadialGlow size={N}>`
    #[serde(rename = "glowSize")]
    GlowSize,
    /// `s(s(N))` collapse
    #[serde(rename = "cleanup")]
    Cleanup,
}

impl Pass {
    /// Every pass, in the order the pipeline runs them.
    pub const ORDER: [Pass; 14] = [
        Pass::Import,
        Pass::Inject,
        Pass::FontSize,
        Pass::Gap,
        Pass::MarginTop,
        Pass::MarginBottom,
        Pass::BorderRadius,
        Pass::PxShorthand,
        Pass::MixedMargin,
        Pass::Dimensions,
        Pass::Position,
        Pass::Interpolate,
        Pass::GlowSize,
        Pass::Cleanup,
    ];

    /// Stable name used in reports and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Pass::Import => "import",
            Pass::Inject => "inject",
            Pass::FontSize => "fontSize",
            Pass::Gap => "gap",
            Pass::MarginTop => "marginTop",
            Pass::MarginBottom => "marginBottom",
            Pass::BorderRadius => "borderRadius",
            Pass::PxShorthand => "pxShorthand",
            Pass::MixedMargin => "mixedMargin",
            Pass::Dimensions => "dimensions",
            Pass::Position => "position",
            Pass::Interpolate => "interpolate",
            Pass::GlowSize => "glowSize",
            Pass::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text produced by one pass plus the number of edits it made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutput {
    /// Resulting source text.
    pub text: String,
    /// Number of edits applied (0 means the text is unchanged).
    pub edits: usize,
}

impl PassOutput {
    /// Output of a pass that found nothing to do.
    #[must_use]
    pub fn unchanged(source: &str) -> Self {
        Self {
            text: source.to_owned(),
            edits: 0,
        }
    }
}

/// One step of the pipeline.
pub trait TextPass: Send + Sync {
    /// Which pass this is.
    fn pass(&self) -> Pass;

    /// Transform `source`. Must be pure and must never fail.
    fn run(&self, source: &str) -> PassOutput;
}

/// Applies `edits` to `source`.
///
/// Invalid edit sets leave the text as it was; a pass never corrupts text
/// produced by an earlier one.
pub(crate) fn apply_edits(source: &str, edits: Vec<Edit>) -> PassOutput {
    if edits.is_empty() {
        return PassOutput::unchanged(source);
    }
    let count = edits.len();
    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_edits(edits);
    match rewriter.apply() {
        Ok(text) => PassOutput { text, edits: count },
        Err(_) => PassOutput::unchanged(source),
    }
}

/// True for characters that can continue a JS identifier.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// True when the match starting at `start` is not glued to a preceding identifier.
pub(crate) fn starts_identifier(source: &str, start: usize) -> bool {
    !source[..start].chars().next_back().is_some_and(is_ident_char)
}

/// First non-whitespace byte at or after `pos`.
pub(crate) fn next_significant_byte(source: &str, pos: usize) -> Option<u8> {
    source.as_bytes()[pos..]
        .iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}

/// Result of running the whole pipeline over one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeResult {
    /// Final text.
    pub text: String,
    /// Whether `text` differs from the input.
    pub changed: bool,
    /// Edits made by each pass, in pipeline order.
    pub passes: Vec<(Pass, usize)>,
}

impl ChangeResult {
    /// Edits made by `pass`.
    #[must_use]
    pub fn edits_for(&self, pass: Pass) -> usize {
        self.passes
            .iter()
            .find(|(p, _)| *p == pass)
            .map_or(0, |(_, n)| *n)
    }
}

/// The ordered pipeline.
pub struct Rewriter {
    passes: Vec<Box<dyn TextPass>>,
}

impl Rewriter {
    /// Build the pipeline for `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured name produces an invalid pattern
    /// (names are escaped, so this only happens for pathological input).
    pub fn new(options: &ScaleOptions) -> Result<Self, regex::Error> {
        let t = &options.thresholds;
        let helper = options.helper.as_str();
        let passes: Vec<Box<dyn TextPass>> = vec![
            Box::new(ImportPass::new(&options.hook, &options.import_module)?),
            Box::new(InjectPass::new(options)?),
            Box::new(LiteralPass::font_size(helper, t.font_size)?),
            Box::new(LiteralPass::gap(helper, t.gap)?),
            Box::new(LiteralPass::margin_top(helper, t.margin_top)?),
            Box::new(LiteralPass::margin_bottom(helper, t.margin_bottom)?),
            Box::new(LiteralPass::border_radius(helper, t.border_radius)?),
            Box::new(PxShorthandPass::new(helper)),
            Box::new(MixedMarginPass::new(helper)),
            Box::new(LiteralPass::dimensions(helper)?),
            Box::new(LiteralPass::position(helper, t)?),
            Box::new(InterpolatePass::new(helper)),
            Box::new(GlowSizePass::new(&options.glow_component, helper)?),
            Box::new(CleanupPass::new(helper)?),
        ];
        debug_assert!(passes
            .iter()
            .map(|p| p.pass())
            .eq(Pass::ORDER.iter().copied()));
        Ok(Self { passes })
    }

    /// Run every pass over `source` in order.
    #[must_use]
    pub fn rewrite(&self, source: &str) -> ChangeResult {
        let mut text = source.to_owned();
        let mut counts = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            let out = pass.run(&text);
            counts.push((pass.pass(), out.edits));
            text = out.text;
        }
        let changed = text != source;
        ChangeResult {
            text,
            changed,
            passes: counts,
        }
    }
}

impl fmt::Debug for Rewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.passes.iter().map(|p| p.pass()))
            .finish()
    }
}

/// Rewrite `source` with the default conventions.
///
/// # Errors
///
/// Never fails for the built-in defaults; the `Result` mirrors [`Rewriter::new`].
pub fn rewrite_source(source: &str) -> Result<ChangeResult, regex::Error> {
    Ok(Rewriter::new(&ScaleOptions::default())?.rewrite(source))
}
