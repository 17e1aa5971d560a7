//! Collapses accidental `s(s(N))` nesting.

use super::{apply_edits, starts_identifier, Pass, PassOutput, TextPass};
use crate::fix::Edit;
use regex::Regex;

/// Rewrites `s(s(N))` to `s(N)` until no nested call remains.
///
/// Must run after every wrapping pass.
#[derive(Debug)]
pub struct CleanupPass {
    helper: String,
    nested_re: Regex,
}

impl CleanupPass {
    /// Build the pass for `helper`.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped helper name does not compile.
    pub fn new(helper: &str) -> Result<Self, regex::Error> {
        let h = regex::escape(helper);
        let nested_re = Regex::new(&format!(r"{h}\({h}\((-?[0-9]+)\)\)"))?;
        Ok(Self {
            helper: helper.to_owned(),
            nested_re,
        })
    }

    fn collapse_once(&self, source: &str) -> PassOutput {
        let edits = self
            .nested_re
            .captures_iter(source)
            .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?)))
            .filter(|(whole, _)| starts_identifier(source, whole.start()))
            .map(|(whole, n)| {
                Edit::new(
                    whole.start(),
                    whole.end(),
                    format!("{}({})", self.helper, n.as_str()),
                )
            })
            .collect();
        apply_edits(source, edits)
    }
}

impl TextPass for CleanupPass {
    fn pass(&self) -> Pass {
        Pass::Cleanup
    }

    fn run(&self, source: &str) -> PassOutput {
        let mut out = self.collapse_once(source);
        let mut total = out.edits;
        // Every collapse shortens the text, so this terminates.
        while out.edits > 0 {
            out = self.collapse_once(&out.text);
            total += out.edits;
        }
        PassOutput {
            text: out.text,
            edits: total,
        }
    }
}
