use bracken_syntax::Node;
use text_size::{TextRange, TextSize};

use crate::FilePosition;

impl super::Analysis {
    /// Ranges to select when expanding the selection outward from `offset`.
    ///
    /// Starts at the token under the cursor, then for each enclosing block
    /// its interior followed by the whole block, and ends with the whole
    /// buffer. Every range strictly contains the one before it.
    pub fn selection_ranges(&self, FilePosition { file, offset }: FilePosition) -> Vec<TextRange> {
        let db = self.db();
        let tree = file.token_tree(db);
        let path = tree.path_to_offset(offset);
        if path.is_empty() {
            return Vec::new();
        }

        let mut ranges = Vec::new();
        let mut push = |range: TextRange| {
            if ranges.last().is_none_or(|&last| range != last && range.contains_range(last)) {
                ranges.push(range);
            }
        };

        // Trivia leaves and empty interiors have no trimmed range.
        if let Some(range) = path.last().and_then(|node| node.trimmed_range()) {
            push(range);
        }

        for block in path.iter().rev().filter_map(|&node| node.as_block()) {
            if let Some(interior) = Node::List(block.elements()).trimmed_range() {
                push(interior);
            }
            if let Some(whole) = Node::Block(block).trimmed_range() {
                push(whole);
            }
        }

        push(TextRange::up_to(TextSize::of(tree.text())));
        ranges
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use crate::analysis::fixture::position;

    #[track_caller]
    fn check(fixture: &str, expected: &[&str]) {
        let (analysis, position, text) = position(fixture);
        let ranges = analysis.selection_ranges(position);
        let actual = ranges.iter().map(|&range| &text[range]).collect::<Vec<_>>();
        assert_eq!(actual, expected);
    }

    #[test]
    fn expands_through_enclosing_blocks() {
        check(
            "foo(bar, [b$0az]) qux",
            &["baz", "[baz]", "bar, [baz]", "(bar, [baz])", "foo(bar, [baz]) qux"],
        );
    }

    #[test]
    fn skips_ranges_that_do_not_grow() {
        check("{\n  {\n    x$0\n  }\n}", &["x", "{\n    x\n  }", "{\n  {\n    x\n  }\n}"]);
    }

    #[test]
    fn unclosed_blocks_end_at_their_content() {
        check("f(a, [b$0", &["b", "[b", "a, [b", "(a, [b", "f(a, [b"]);
    }

    #[test]
    fn cursor_on_bracket() {
        check("a $0(b c) d", &["(", "(b c)", "a (b c) d"]);
    }

    #[test]
    fn whitespace_only_buffer() {
        check("  $0  ", &["    "]);
    }

    #[test]
    fn offset_outside_text() {
        let (analysis, mut position, _) = position("ab$0");
        position.offset += TextSize::from(1);
        assert!(analysis.selection_ranges(position).is_empty());
    }
}
