//! Groups matching bracket pairs of a buffer into nested blocks.
//!
//! [`build`] never fails: unmatched, mismatched and unterminated brackets
//! all produce a best-effort tree, and [`diagnostics`] reports what could
//! not be matched.

use bracken_syntax::TokenTree;
use bracken_tokenizer::BracketConfig;

mod diagnostics;
#[cfg(test)]
mod tests;
mod tree_builder;

pub use diagnostics::diagnostics;

/// Builds the token tree of `text` for the given bracket pairs.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn build(text: &str, config: &BracketConfig) -> TokenTree {
    let mut builder = tree_builder::TreeBuilder::new(text, config);
    builder.run();
    builder.finish()
}
