//! Byte-range editing shared by every rewrite pass.
//!
//! Passes never splice strings by hand. They scan the source, emit
//! [`Edit`]s against the original byte offsets, and hand them to
//! [`ByteRangeRewriter`], which validates and applies them back to front.

mod rewriter;

pub use rewriter::{ByteRangeRewriter, Edit, RewriteError};
