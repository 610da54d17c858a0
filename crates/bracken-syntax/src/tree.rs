//! Owned token tree and borrowed node handles.

use std::fmt::{self, Write as _};

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;
use crate::walk::{Preorder, WalkEvent};

/// Token tree for a single source text.
///
/// The root is always a [`NodeList`] covering the whole text.
#[derive(PartialEq, Eq)]
pub struct TokenTree {
    pub(crate) text: Box<str>,
    pub(crate) root: NodeList,
}

impl TokenTree {
    /// Returns the root node list.
    #[inline]
    pub fn root(&self) -> &NodeList {
        &self.root
    }

    /// Returns the root as a node handle.
    #[inline]
    pub fn root_node(&self) -> Node<'_> {
        Node::List(&self.root)
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Walks every node in the tree, entering parents before children.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self.root_node())
    }

    /// Returns the chain of nodes containing `offset`, outermost first.
    ///
    /// At each level the child whose range contains `offset` is taken; an
    /// offset at the very end of a node resolves to its last child. The
    /// returned path is empty only when `offset` is outside the text.
    pub fn path_to_offset(&self, offset: TextSize) -> Vec<Node<'_>> {
        let mut path = Vec::new();
        let mut current = self.root_node();
        if !current.range().contains_inclusive(offset) {
            return path;
        }

        loop {
            path.push(current);
            let next = current
                .children()
                .find(|child| child.range().contains(offset))
                .or_else(|| {
                    current.children().filter(|child| child.range().end() == offset).last()
                });
            match next {
                Some(child) => current = child,
                None => break,
            }
        }

        path
    }

    /// Renders the tree as an indented list of `KIND@range` lines.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;

        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    let indent = "  ".repeat(depth);
                    match node {
                        Node::Leaf(leaf) => {
                            _ = writeln!(
                                out,
                                "{indent}{:?}@{:?} {:?}",
                                leaf.kind,
                                leaf.range,
                                leaf.full_text(self)
                            );
                        }
                        _ => _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.range()),
                    }
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
        }

        out
    }
}

impl fmt::Debug for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenTree").field("text_len", &self.text.len()).finish_non_exhaustive()
    }
}

/// Ordered sequence of sibling blocks and leaves.
///
/// Nesting depth is unbounded, so dropping and comparing lists walk the
/// tree with an explicit stack.
pub struct NodeList {
    pub(crate) range: TextRange,
    pub(crate) children: Vec<Element>,
}

impl Drop for NodeList {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(element) = stack.pop() {
            if let Element::Block(mut block) = element {
                stack.append(&mut block.elements.children);
            }
        }
    }
}

impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((left, right)) = stack.pop() {
            if left.range != right.range || left.children.len() != right.children.len() {
                return false;
            }
            for pair in left.children.iter().zip(&right.children) {
                match pair {
                    (Element::Leaf(left), Element::Leaf(right)) if left == right => {}
                    (Element::Block(left), Element::Block(right))
                        if left.range == right.range
                            && left.open == right.open
                            && left.close == right.close =>
                    {
                        stack.push((&left.elements, &right.elements));
                    }
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for NodeList {}

impl fmt::Debug for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeList")
            .field("range", &self.range)
            .field("children", &self.children.len())
            .finish()
    }
}

impl NodeList {
    #[inline]
    pub fn range(&self) -> TextRange {
        self.range
    }

    #[inline]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A child of a [`NodeList`].
#[derive(Debug, PartialEq, Eq)]
pub enum Element {
    Block(Block),
    Leaf(Leaf),
}

impl Element {
    #[inline]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Block(block) => block.range,
            Self::Leaf(leaf) => leaf.range,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(block) => Some(block),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Block(_) => None,
        }
    }
}

/// One bracket pair and its interior.
///
/// `close` is `None` when the input ended before the closing bracket.
#[derive(Debug, PartialEq, Eq)]
pub struct Block {
    pub(crate) range: TextRange,
    pub(crate) open: Leaf,
    pub(crate) elements: NodeList,
    pub(crate) close: Option<Leaf>,
}

impl Block {
    #[inline]
    pub fn range(&self) -> TextRange {
        self.range
    }

    #[inline]
    pub fn open(&self) -> &Leaf {
        &self.open
    }

    #[inline]
    pub fn elements(&self) -> &NodeList {
        &self.elements
    }

    #[inline]
    pub fn close(&self) -> Option<&Leaf> {
        self.close.as_ref()
    }

    /// Index of the bracket pair this block was opened with.
    #[inline]
    pub fn pair(&self) -> Option<u32> {
        self.open.pair
    }
}

/// A single token with its attached whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) trimmed_range: TextRange,
    pub(crate) pair: Option<u32>,
}

impl Leaf {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Range including attached trivia.
    #[inline]
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Range of the token itself, without trivia.
    #[inline]
    pub fn trimmed_range(&self) -> TextRange {
        self.trimmed_range
    }

    /// Bracket pair index for bracket leaves.
    ///
    /// `TEXT` leaves keep the pair of the bracket they were demoted from.
    #[inline]
    pub fn pair(&self) -> Option<u32> {
        self.pair
    }

    /// Returns `true` for a bracket that did not take part in a block.
    #[inline]
    pub fn is_unmatched_bracket(&self) -> bool {
        self.kind == SyntaxKind::TEXT && self.pair.is_some()
    }

    /// Token text without trivia.
    #[inline]
    pub fn text<'a>(&self, tree: &'a TokenTree) -> &'a str {
        &tree.text[self.trimmed_range]
    }

    /// Token text including trivia.
    #[inline]
    pub fn full_text<'a>(&self, tree: &'a TokenTree) -> &'a str {
        &tree.text[self.range]
    }
}

/// Borrowed handle to any node of a [`TokenTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<'a> {
    List(&'a NodeList),
    Block(&'a Block),
    Leaf(&'a Leaf),
}

impl<'a> Node<'a> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            Self::List(_) => SyntaxKind::NODE_LIST,
            Self::Block(_) => SyntaxKind::BLOCK,
            Self::Leaf(leaf) => leaf.kind,
        }
    }

    pub fn range(self) -> TextRange {
        match self {
            Self::List(list) => list.range,
            Self::Block(block) => block.range,
            Self::Leaf(leaf) => leaf.range,
        }
    }

    /// Range from the first to the last non-trivia token under this node.
    pub fn trimmed_range(self) -> Option<TextRange> {
        match self {
            Self::Leaf(leaf) if leaf.kind.is_trivia() => None,
            Self::Leaf(leaf) => Some(leaf.trimmed_range),
            Self::List(list) => {
                let start = list.children.iter().find_map(|child| match child {
                    Element::Block(block) => Some(block.open.trimmed_range),
                    Element::Leaf(leaf) => (!leaf.kind.is_trivia()).then_some(leaf.trimmed_range),
                })?;
                Some(start.cover(last_trimmed(list, None)?))
            }
            Self::Block(block) => {
                let start = block.open.trimmed_range;
                let end = match &block.close {
                    Some(close) => close.trimmed_range,
                    None => last_trimmed(&block.elements, Some(start)).unwrap_or(start),
                };
                Some(start.cover(end))
            }
        }
    }

    pub fn children(self) -> Children<'a> {
        match self {
            Self::List(list) => Children::List(list.children.iter()),
            Self::Block(block) => Children::Block { block, next: 0 },
            Self::Leaf(_) => Children::Leaf,
        }
    }

    pub fn as_leaf(self) -> Option<&'a Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_block(self) -> Option<&'a Block> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }
}

/// Trimmed range of the last token under `list`, or `fallback` when it has
/// none. Unclosed blocks end at their content, which is followed downwards.
fn last_trimmed(mut list: &NodeList, mut fallback: Option<TextRange>) -> Option<TextRange> {
    loop {
        let last = list
            .children
            .iter()
            .rev()
            .find(|child| !matches!(child, Element::Leaf(leaf) if leaf.kind.is_trivia()));
        match last {
            None => return fallback,
            Some(Element::Leaf(leaf)) => return Some(leaf.trimmed_range),
            Some(Element::Block(block)) => match &block.close {
                Some(close) => return Some(close.trimmed_range),
                None => {
                    fallback = Some(block.open.trimmed_range);
                    list = &block.elements;
                }
            },
        }
    }
}

impl<'a> From<&'a Element> for Node<'a> {
    fn from(element: &'a Element) -> Self {
        match element {
            Element::Block(block) => Self::Block(block),
            Element::Leaf(leaf) => Self::Leaf(leaf),
        }
    }
}

/// Iterator over the direct children of a [`Node`].
///
/// A block yields its open leaf, its interior list and, if present, its
/// close leaf.
#[derive(Clone, Debug)]
pub enum Children<'a> {
    List(std::slice::Iter<'a, Element>),
    Block { block: &'a Block, next: u8 },
    Leaf,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::List(iter) => iter.next().map(Node::from),
            Self::Block { block, next } => {
                let child = match *next {
                    0 => Node::Leaf(&block.open),
                    1 => Node::List(&block.elements),
                    2 => Node::Leaf(block.close.as_ref()?),
                    _ => return None,
                };
                *next += 1;
                Some(child)
            }
            Self::Leaf => None,
        }
    }
}
