//! Applies a batch of byte-range edits to one source text.
//!
//! Every edit is expressed against the offsets of the unmodified text. The
//! batch is checked up front and spliced back to front, so an edit never sees
//! offsets moved by another.
//!
//! # Usage
//!
//! ```
//! use pxscale::fix::{ByteRangeRewriter, Edit};
//!
//! let mut rewriter = ByteRangeRewriter::new("fontSize: 48,");
//! rewriter.add_edit(Edit::new(10, 12, "s(48)"));
//! assert_eq!(rewriter.apply().unwrap(), "fontSize: s(48),");
//! ```

use std::ops::Range;

/// Replace `range` of the source with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range in the unmodified source.
    pub range: Range<usize>,
    /// Text spliced in.
    pub text: String,
}

impl Edit {
    /// Replace `start..end` with `text`.
    #[must_use]
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            range: start..end,
            text: text.into(),
        }
    }

    /// Insert `text` at `at` without removing anything.
    #[must_use]
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }

    /// Whether applying both edits would be ambiguous.
    ///
    /// Ranges that merely touch are fine. Two insertions at one offset clash
    /// since either order is plausible.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        if self.is_insertion() && other.is_insertion() {
            return self.range.start == other.range.start;
        }
        self.range.start < other.range.end && other.range.start < self.range.end
    }
}

/// Why a batch of edits was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Two edits touch the same bytes.
    #[error("edits {first} and {second} overlap")]
    OverlappingEdits {
        /// Lower index of the pair.
        first: usize,
        /// Higher index of the pair.
        second: usize,
    },
    /// Range is reversed or runs past the end of the source.
    #[error("edit {index} ({start}..{end}) is outside the {len}-byte source")]
    OutOfBounds {
        /// Edit index.
        index: usize,
        /// Range start.
        start: usize,
        /// Range end.
        end: usize,
        /// Source length.
        len: usize,
    },
    /// Range boundary falls inside a multi-byte character.
    #[error("edit {index} splits a UTF-8 character")]
    NotCharBoundary {
        /// Edit index.
        index: usize,
    },
}

/// Edits queued against one source text.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    source: String,
    edits: Vec<Edit>,
}

impl ByteRangeRewriter {
    /// Start with no edits.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Queue one edit.
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Queue several edits.
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Check the queued edits against the source.
    ///
    /// # Errors
    ///
    /// See [`RewriteError`].
    pub fn validate(&self) -> Result<(), RewriteError> {
        let len = self.source.len();
        for (index, edit) in self.edits.iter().enumerate() {
            let Range { start, end } = edit.range;
            if start > end || end > len {
                return Err(RewriteError::OutOfBounds {
                    index,
                    start,
                    end,
                    len,
                });
            }
            if !self.source.is_char_boundary(start) || !self.source.is_char_boundary(end) {
                return Err(RewriteError::NotCharBoundary { index });
            }
        }

        // Sorted by position, any conflict shows up between neighbours.
        let mut order: Vec<usize> = (0..self.edits.len()).collect();
        order.sort_by_key(|&i| (self.edits[i].range.start, self.edits[i].range.end));
        if let Some(pair) = order
            .windows(2)
            .find(|w| self.edits[w[0]].conflicts_with(&self.edits[w[1]]))
        {
            return Err(RewriteError::OverlappingEdits {
                first: pair[0].min(pair[1]),
                second: pair[0].max(pair[1]),
            });
        }
        Ok(())
    }

    /// Validate, then splice every edit into the source.
    ///
    /// # Errors
    ///
    /// See [`RewriteError`]; the source is not modified on error.
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;
        let Self {
            mut source,
            mut edits,
        } = self;
        // Back to front. At a shared start the replacement goes first, so an
        // insertion there ends up in front of the replaced text.
        edits.sort_by(|a, b| {
            (b.range.start, b.range.end).cmp(&(a.range.start, a.range.end))
        });
        for edit in edits {
            source.replace_range(edit.range, &edit.text);
        }
        Ok(source)
    }
}
