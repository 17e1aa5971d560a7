//! Rewrites `padding`/`margin` pixel strings into template literals.

use super::options::wrap;
use super::{apply_edits, starts_identifier, Pass, PassOutput, TextPass};
use crate::constants::{MIXED_MARGIN_RE, PX_SHORTHAND_RE};
use crate::fix::Edit;

/// Shorthand strings with this many `Npx` values are rewritten.
const SHORTHAND_VALUES: std::ops::RangeInclusive<usize> = 2..=4;

/// The digits of a token written exactly as `Npx`.
fn px_digits(token: &str) -> Option<&str> {
    let digits = token.strip_suffix("px")?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// `padding: "120px 50px 60px"` → `` padding: `${s(120)}px ${s(50)}px ${s(60)}px` ``.
///
/// Every token must be `Npx`. Strings with a bare `0` or any other token, or
/// with fewer than two or more than four values, are left alone.
#[derive(Debug)]
pub struct PxShorthandPass {
    helper: String,
}

impl PxShorthandPass {
    /// Build the pass for `helper`.
    #[must_use]
    pub fn new(helper: &str) -> Self {
        Self {
            helper: helper.to_owned(),
        }
    }

    fn rewrite_value(&self, prop: &str, value: &str) -> Option<String> {
        let values = value
            .split_whitespace()
            .map(px_digits)
            .collect::<Option<Vec<&str>>>()?;
        if !SHORTHAND_VALUES.contains(&values.len()) {
            return None;
        }
        let parts: Vec<String> = values
            .iter()
            .map(|v| format!("${{{}}}px", wrap(&self.helper, v)))
            .collect();
        Some(format!("{prop}: `{}`", parts.join(" ")))
    }
}

impl TextPass for PxShorthandPass {
    fn pass(&self) -> Pass {
        Pass::PxShorthand
    }

    fn run(&self, source: &str) -> PassOutput {
        let mut edits = Vec::new();
        for caps in PX_SHORTHAND_RE().captures_iter(source) {
            let (Some(whole), Some(prop), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if !starts_identifier(source, whole.start()) {
                continue;
            }
            if let Some(replacement) = self.rewrite_value(prop.as_str(), value.as_str()) {
                edits.push(Edit::new(whole.start(), whole.end(), replacement));
            }
        }
        apply_edits(source, edits)
    }
}

/// `margin: "0 0 10px"` → `` margin: `0 0 ${s(10)}px` ``.
///
/// Positive `Npx` tokens are wrapped; zeros and anything else pass through.
/// The string is only rewritten when at least one token was wrapped.
#[derive(Debug)]
pub struct MixedMarginPass {
    helper: String,
}

impl MixedMarginPass {
    /// Build the pass for `helper`.
    #[must_use]
    pub fn new(helper: &str) -> Self {
        Self {
            helper: helper.to_owned(),
        }
    }

    fn rewrite_token(&self, token: &str) -> Option<String> {
        let digits = px_digits(token)?;
        let n: u64 = digits.parse().ok()?;
        (n > 0).then(|| format!("${{{}}}px", wrap(&self.helper, digits)))
    }

    fn rewrite_value(&self, prop: &str, value: &str) -> Option<String> {
        let mut wrapped_any = false;
        let parts: Vec<String> = value
            .split_whitespace()
            .map(|token| match self.rewrite_token(token) {
                Some(t) => {
                    wrapped_any = true;
                    t
                }
                None => token.to_owned(),
            })
            .collect();
        wrapped_any.then(|| format!("{prop}: `{}`", parts.join(" ")))
    }
}

impl TextPass for MixedMarginPass {
    fn pass(&self) -> Pass {
        Pass::MixedMargin
    }

    fn run(&self, source: &str) -> PassOutput {
        let mut edits = Vec::new();
        for caps in MIXED_MARGIN_RE().captures_iter(source) {
            let (Some(whole), Some(prop), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if !starts_identifier(source, whole.start()) {
                continue;
            }
            if let Some(replacement) = self.rewrite_value(prop.as_str(), value.as_str()) {
                edits.push(Edit::new(whole.start(), whole.end(), replacement));
            }
        }
        apply_edits(source, edits)
    }
}
