use bracken_errors::Diagnostic;
use bracken_syntax::{Node, TokenTree, WalkEvent};

/// Reports brackets that did not end up as a complete block.
///
/// Blocks cut off by the end of the buffer are warnings, brackets demoted to
/// text are errors. Diagnostics are in text order.
pub fn diagnostics(tree: &TokenTree) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for event in tree.preorder() {
        let WalkEvent::Enter(node) = event else { continue };
        match node {
            Node::Block(block) if block.close().is_none() => {
                let open = block.open();
                diagnostics.push(Diagnostic::warning(
                    format!("unclosed bracket `{}`", open.text(tree)),
                    open.trimmed_range(),
                ));
            }
            Node::Leaf(leaf) if leaf.is_unmatched_bracket() => {
                diagnostics.push(Diagnostic::error(
                    format!("unmatched bracket `{}`", leaf.text(tree)),
                    leaf.trimmed_range(),
                ));
            }
            _ => {}
        }
    }

    diagnostics
}
