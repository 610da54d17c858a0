//! Caches token trees per buffer revision.
//!
//! Building a tree is cheap and pure; the database only makes sure that a
//! tree is rebuilt when the text or the bracket configuration of a file
//! changes, and reused otherwise.

use bracken_syntax::TokenTree;
use bracken_tokenizer::BracketConfig;
use camino::Utf8PathBuf;
pub use bracken_errors::Diagnostic;
use salsa::{Accumulator as _, Database};

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    #[returns(ref)]
    pub brackets: BracketConfig,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref))]
    pub fn token_tree(self, db: &dyn Database) -> TokenTree {
        bracken_build::build(self.text(db), self.brackets(db))
    }
}

#[salsa::tracked]
pub fn check_file(db: &dyn Database, file: File) {
    for diagnostic in bracken_build::diagnostics(file.token_tree(db)) {
        diagnostic.accumulate(db);
    }
}
