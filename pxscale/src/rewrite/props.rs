//! Scales the `size` prop of the glow component.

use super::options::wrap;
use super::{apply_edits, Pass, PassOutput, TextPass};
use crate::fix::Edit;
use regex::Regex;

/// `<RadialGlow ... size={600}>` → `<RadialGlow ... size={s(600)}>`, no threshold.
#[derive(Debug)]
pub struct GlowSizePass {
    helper: String,
    size_re: Regex,
}

impl GlowSizePass {
    /// Build the pass for the glow `component`.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped component name does not compile.
    pub fn new(component: &str, helper: &str) -> Result<Self, regex::Error> {
        // `size` must start a new attribute so `fontSize={..}` is not matched.
        let size_re = Regex::new(&format!(
            r"<{}\b[^>]*?\ssize=\{{([0-9]+)\}}",
            regex::escape(component)
        ))?;
        Ok(Self {
            helper: helper.to_owned(),
            size_re,
        })
    }
}

impl TextPass for GlowSizePass {
    fn pass(&self) -> Pass {
        Pass::GlowSize
    }

    fn run(&self, source: &str) -> PassOutput {
        let edits = self
            .size_re
            .captures_iter(source)
            .filter_map(|caps| caps.get(1))
            .map(|n| Edit::new(n.start(), n.end(), wrap(&self.helper, n.as_str())))
            .collect();
        apply_edits(source, edits)
    }
}
