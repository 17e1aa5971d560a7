//! Adds the scaling hook to the named import from the shared module.

use super::{apply_edits, Pass, PassOutput, TextPass};
use crate::fix::Edit;
use regex::Regex;

/// Inserts `hook` into `import { ... } from "<module>"` unless the file
/// already mentions it anywhere.
#[derive(Debug)]
pub struct ImportPass {
    hook: String,
    import_re: Regex,
}

impl ImportPass {
    /// Build the pass for `hook` imported from `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped module path does not compile.
    pub fn new(hook: &str, module: &str) -> Result<Self, regex::Error> {
        let import_re = Regex::new(&format!(
            r#"import\s*\{{([^}}]*)\}}\s*from\s*['"]{}['"]"#,
            regex::escape(module)
        ))?;
        Ok(Self {
            hook: hook.to_owned(),
            import_re,
        })
    }
}

impl TextPass for ImportPass {
    fn pass(&self) -> Pass {
        Pass::Import
    }

    fn run(&self, source: &str) -> PassOutput {
        if source.contains(&self.hook) {
            return PassOutput::unchanged(source);
        }
        let Some(body) = self.import_re.captures(source).and_then(|c| c.get(1)) else {
            return PassOutput::unchanged(source);
        };
        let replacement = append_import_entry(body.as_str(), &self.hook);
        apply_edits(
            source,
            vec![Edit::new(body.start(), body.end(), replacement)],
        )
    }
}

/// Returns the import-list body (the text between the braces) with `name`
/// appended as the last entry.
///
/// Multi-line lists keep one entry per line and a trailing comma; single-line
/// lists stay on one line.
fn append_import_entry(body: &str, name: &str) -> String {
    if !body.contains('\n') {
        let inner = body.trim().trim_end_matches(',').trim_end();
        return if inner.is_empty() {
            format!(" {name} ")
        } else {
            format!(" {inner}, {name} ")
        };
    }

    let indent = body
        .lines()
        .find(|l| !l.trim().is_empty())
        .map_or("  ", |l| &l[..l.len() - l.trim_start().len()]);
    // Whitespace between the last newline and `}` belongs to the closing brace.
    let closing = body
        .rfind('\n')
        .map_or("", |i| &body[i + 1..])
        .trim_end_matches('\r');
    let closing = if closing.trim().is_empty() { closing } else { "" };

    let entries = body.trim_end();
    let mut out = String::with_capacity(body.len() + name.len() + indent.len() + 4);
    out.push_str(entries);
    if !entries.trim().is_empty() && !entries.ends_with(',') {
        out.push(',');
    }
    if entries.trim().is_empty() {
        // Keep whatever opened the list (`{` followed by a newline).
        out.clear();
    }
    let newline = if body.contains("\r\n") { "\r\n" } else { "\n" };
    out.push_str(newline);
    out.push_str(indent);
    out.push_str(name);
    out.push(',');
    out.push_str(newline);
    out.push_str(closing);
    out
}
