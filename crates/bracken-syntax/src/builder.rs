//! Incremental builder for the immutable token tree.

use text_size::{TextRange, TextSize};

use crate::tree::{Block, Element, Leaf, NodeList, TokenTree};
use crate::{SyntaxKind, TriviaPiece, trivia_len};

struct OpenBlock {
    open: Leaf,
    children: Vec<Element>,
}

/// Builds a `TokenTree` from a left-to-right token stream.
///
/// Leaves must be created in text order with [`Builder::leaf`]; every byte
/// of the text ends up in exactly one leaf.
pub struct Builder {
    text: Box<str>,
    root: Vec<Element>,
    opened: Vec<OpenBlock>,
    children_pool: Vec<Vec<Element>>,
    text_len: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should close or abandon every block before `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 32;
const DEFAULT_CHILDREN_LEN: usize = 8;

impl Builder {
    /// Creates a new builder for `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            root: Vec::new(),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
        }
    }

    /// Number of blocks currently open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.opened.len()
    }

    /// Retrieves a recycled children buffer or allocates a new one.
    fn new_children_vec(&mut self) -> Vec<Element> {
        self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    /// Returns the children of the innermost open block, or the root.
    fn current(&mut self) -> &mut Vec<Element> {
        match self.opened.last_mut() {
            Some(block) => &mut block.children,
            None => &mut self.root,
        }
    }

    /// Creates the leaf for the next token, with its leading and trailing
    /// trivia.
    ///
    /// The leaf must start exactly where the previous one ended.
    #[track_caller]
    pub fn leaf(
        &mut self,
        leading_trivia: &[TriviaPiece],
        kind: SyntaxKind,
        kind_range: TextRange,
        trailing_trivia: &[TriviaPiece],
        pair: Option<u32>,
    ) -> Leaf {
        let start = kind_range.start() - trivia_len(leading_trivia);
        let end = kind_range.end() + trivia_len(trailing_trivia);
        assert_eq!(start, self.text_len, "leaves must be contiguous");
        assert!(self.text.is_char_boundary(usize::from(end)));
        self.text_len = end;

        Leaf { kind, range: TextRange::new(start, end), trimmed_range: kind_range, pair }
    }

    /// Appends a leaf to the innermost open block.
    pub fn push(&mut self, leaf: Leaf) {
        self.current().push(Element::Leaf(leaf));
    }

    /// Opens a new block whose open bracket is `open`.
    pub fn start_block(&mut self, open: Leaf) {
        let children = self.new_children_vec();
        self.opened.push(OpenBlock { open, children });
    }

    /// Closes the innermost open block.
    ///
    /// With `close` set to `None` the block ends at its last child.
    pub fn finish_block(&mut self, close: Option<Leaf>) {
        let OpenBlock { open, children } = self.opened.pop().expect("no opened blocks?");

        let elements_start = open.range.end();
        let elements_end = children.last().map_or(elements_start, |child| child.range().end());
        let elements = NodeList { range: TextRange::new(elements_start, elements_end), children };

        let end = close.as_ref().map_or(elements_end, |close| close.range.end());
        let range = TextRange::new(open.range.start(), end);

        self.current().push(Element::Block(Block { range, open, elements, close }));
    }

    /// Drops the innermost open block, keeping its content.
    ///
    /// The open bracket becomes a `TEXT` leaf and the block's children are
    /// moved into the enclosing block.
    pub fn abandon_block(&mut self) {
        let OpenBlock { open, mut children } = self.opened.pop().expect("no opened blocks?");
        debug_assert!(open.kind.is_bracket());

        let open = Leaf { kind: SyntaxKind::TEXT, ..open };
        let parent = self.current();
        parent.push(Element::Leaf(open));
        parent.append(&mut children);
        self.children_pool.push(children);
    }

    /// Finishes building and returns the immutable `TokenTree`.
    pub fn finish(mut self) -> TokenTree {
        assert!(self.opened.is_empty());
        debug_assert_eq!(usize::from(self.text_len), self.text.len());

        let root = NodeList {
            range: TextRange::up_to(self.text_len),
            children: std::mem::take(&mut self.root),
        };
        TokenTree { text: std::mem::take(&mut self.text), root }
    }
}
