//! Editor features on top of the token tree.

mod analysis;

pub use analysis::Analysis;
use bracken_db::File;
use text_size::TextSize;

#[derive(Clone, Copy, Debug)]
pub struct FilePosition {
    pub file: File,
    pub offset: TextSize,
}
