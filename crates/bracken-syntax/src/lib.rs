//! Immutable token tree of nested bracket blocks.
//!
//! A tree is built once from a token stream and then navigated through
//! borrowed [`Node`] handles. Every byte of the source text belongs to
//! exactly one leaf; whitespace is attached to tokens as trivia.

mod builder;
mod syntax_kind;
mod tree;
mod trivia;
mod walk;

/// Incremental builder for constructing a `TokenTree`.
pub use builder::Builder;
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Primary token tree API types.
pub use tree::{Block, Children, Element, Leaf, Node, NodeList, TokenTree};
/// Trivia pieces attached to tokens.
pub use trivia::{TriviaPiece, TriviaPieceKind, trivia_len};
/// Preorder traversal over nodes.
pub use walk::{Preorder, WalkEvent};
