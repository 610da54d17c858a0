use bracken_syntax::{Block, Node, TokenTree};
use text_size::{TextRange, TextSize};

use crate::FilePosition;

impl super::Analysis {
    /// Returns the open and close bracket of the block whose bracket
    /// touches `offset`.
    ///
    /// A bracket starting at `offset` wins over one ending there. Blocks
    /// without a closing bracket have no match.
    pub fn matching_brackets(
        &self,
        FilePosition { file, offset }: FilePosition,
    ) -> Option<(TextRange, TextRange)> {
        let tree = file.token_tree(self.db());

        let block = bracket_at(tree, offset)
            .or_else(|| bracket_at(tree, offset.checked_sub(TextSize::from(1))?))?;
        let close = block.close()?;

        Some((block.open().trimmed_range(), close.trimmed_range()))
    }
}

/// Finds the block whose open or close leaf covers `offset`, trivia
/// excluded.
fn bracket_at(tree: &TokenTree, offset: TextSize) -> Option<&Block> {
    let path = tree.path_to_offset(offset);
    let [.., Node::Block(block), Node::Leaf(leaf)] = path[..] else {
        return None;
    };
    leaf.trimmed_range().contains_inclusive(offset).then_some(block)
}
