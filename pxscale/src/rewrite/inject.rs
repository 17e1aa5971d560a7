//! Injects `const s = useScale();` into each scene component.
//!
//! This is a line scanner, not a parser. A block opens on a scene
//! declaration line and closes when the running brace count drops to zero on
//! a line ending in `};`. Braces of object literals and JSX expressions count
//! the same as the function body's, so unusual layouts can close a block
//! early or late; that behavior is kept for parity with earlier output.

use super::{apply_edits, Pass, PassOutput, ScaleOptions, TextPass};
use crate::constants::INJECT_LOOKAHEAD_LINES;
use crate::fix::Edit;
use regex::Regex;

/// Scanner state for the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    InBlock { depth: i64, injected: bool },
}

/// Adds the helper binding after the first context call of each component.
#[derive(Debug)]
pub struct InjectPass {
    component_re: Regex,
    context_calls: Vec<String>,
    hook_call: String,
    binding: String,
}

impl InjectPass {
    /// Build the pass from the configured names.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped component prefix does not compile.
    pub fn new(options: &ScaleOptions) -> Result<Self, regex::Error> {
        // `const SceneIntro: React.FC...` or `const SceneIntro = () => {`
        let component_re = Regex::new(&format!(
            r"^const\s+{}\w+(?::\s*React\.FC|\s*=\s*\(\)\s*=>\s*\{{)",
            regex::escape(&options.component_prefix)
        ))?;
        Ok(Self {
            component_re,
            context_calls: options.context_calls.clone(),
            hook_call: format!("{}()", options.hook),
            binding: options.binding_line(),
        })
    }

    fn is_context_line(&self, line: &str) -> bool {
        self.context_calls.iter().any(|c| line.contains(c.as_str()))
    }
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

impl TextPass for InjectPass {
    fn pass(&self) -> Pass {
        Pass::Inject
    }

    fn run(&self, source: &str) -> PassOutput {
        let lines: Vec<&str> = source.split('\n').collect();
        let mut edits = Vec::new();
        let mut state = BlockState::Outside;
        let mut offset = 0;

        for (i, line) in lines.iter().enumerate() {
            let line_end = offset + line.len();
            offset = line_end + 1;
            let stripped = line.trim();

            if self.component_re.is_match(stripped) {
                state = BlockState::InBlock {
                    depth: 0,
                    injected: false,
                };
            }

            let BlockState::InBlock { depth, injected } = state else {
                continue;
            };
            let depth = depth + brace_delta(stripped);
            if depth <= 0 && stripped.ends_with("};") {
                state = BlockState::Outside;
                continue;
            }

            let mut injected = injected || line.contains(&self.hook_call);
            if !injected && self.is_context_line(stripped) {
                let window_end = (i + 1 + INJECT_LOOKAHEAD_LINES).min(lines.len());
                let upcoming = &lines[(i + 1).min(lines.len())..window_end];
                if !upcoming.iter().any(|l| l.contains(&self.hook_call)) {
                    let indent = &line[..line.len() - line.trim_start().len()];
                    let cr = if line.ends_with('\r') { "\r" } else { "" };
                    edits.push(Edit::insert(
                        line_end,
                        format!("\n{indent}{}{cr}", self.binding),
                    ));
                }
                injected = true;
            }
            state = BlockState::InBlock { depth, injected };
        }

        apply_edits(source, edits)
    }
}
