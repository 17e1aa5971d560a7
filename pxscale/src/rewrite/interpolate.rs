//! Scales the output range of `interpolate(x, [0, 1], [A, B])` calls.
//!
//! Slide-in distances like `[-30, 0]` have to grow with the layout. Each
//! endpoint is wrapped on its own when its magnitude exceeds the threshold;
//! the driving expression and the `[0, 1]` input range are never touched.

use super::options::wrap;
use super::{apply_edits, starts_identifier, Pass, PassOutput, TextPass};
use crate::constants::{INTERPOLATE_RE, INTERPOLATE_THRESHOLD};
use crate::fix::Edit;

/// Wraps large endpoints of `[0, 1]`-driven interpolations.
#[derive(Debug)]
pub struct InterpolatePass {
    helper: String,
}

impl InterpolatePass {
    /// Build the pass for `helper`.
    #[must_use]
    pub fn new(helper: &str) -> Self {
        Self {
            helper: helper.to_owned(),
        }
    }
}

fn exceeds_threshold(endpoint: &str) -> bool {
    endpoint
        .parse::<i64>()
        .is_ok_and(|n| n.unsigned_abs() > INTERPOLATE_THRESHOLD)
}

impl TextPass for InterpolatePass {
    fn pass(&self) -> Pass {
        Pass::Interpolate
    }

    fn run(&self, source: &str) -> PassOutput {
        let mut edits = Vec::new();
        for caps in INTERPOLATE_RE().captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if !starts_identifier(source, whole.start()) {
                continue;
            }
            for endpoint in [caps.get(1), caps.get(2)].into_iter().flatten() {
                if exceeds_threshold(endpoint.as_str()) {
                    edits.push(Edit::new(
                        endpoint.start(),
                        endpoint.end(),
                        wrap(&self.helper, endpoint.as_str()),
                    ));
                }
            }
        }
        apply_edits(source, edits)
    }
}
