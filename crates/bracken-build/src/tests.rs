use std::fs;
use std::path::{Path, PathBuf};

use bracken_syntax::{Element, Node, SyntaxKind, TokenTree, WalkEvent};
use bracken_tokenizer::BracketConfig;
use expect_test::expect_file;
use proptest::prelude::*;
use text_size::{TextRange, TextSize};

use crate::{build, diagnostics};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "txt" {
                    let expected = path.with_extension("tree");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

#[test]
fn token_trees() {
    let config = BracketConfig::default();

    for case in TestCase::list() {
        let tree = build(&case.text, &config);
        let diagnostics = diagnostics(&tree)
            .iter()
            .map(|d| format!("  {:?}@{:?}: {}\n", d.severity(), d.range(), d.message()))
            .collect::<String>();

        let actual = format!("{}Diagnostics:\n{diagnostics}", tree.debug_dump());
        expect_file![&case.expected].assert_eq(&actual);
    }
}

fn assert_covering(tree: &TokenTree) {
    assert_eq!(usize::from(tree.root().range().end()), tree.text().len());

    let mut lists = vec![tree.root()];
    while let Some(list) = lists.pop() {
        let mut offset = list.range().start();
        for child in list.children() {
            assert_eq!(child.range().start(), offset, "gap or overlap in {list:?}");
            offset = child.range().end();
            if let Element::Block(block) = child {
                assert_eq!(block.open().range().start(), block.range().start());
                assert_eq!(block.elements().range().start(), block.open().range().end());
                match block.close() {
                    Some(close) => {
                        assert_eq!(close.range().start(), block.elements().range().end());
                        assert_eq!(close.range().end(), block.range().end());
                    }
                    None => assert_eq!(block.elements().range().end(), block.range().end()),
                }
                lists.push(block.elements());
            }
        }
        assert_eq!(offset, list.range().end(), "children do not reach the end of {list:?}");
    }
}

fn blocks(tree: &TokenTree) -> Vec<(&str, Option<&str>)> {
    tree.preorder()
        .filter_map(|event| match event {
            WalkEvent::Enter(Node::Block(block)) => {
                Some((block.open().text(tree), block.close().map(|close| close.text(tree))))
            }
            _ => None,
        })
        .collect()
}

/// Every block is closed by the bracket of the pair that opened it.
fn assert_matching_pairs(tree: &TokenTree, config: &BracketConfig) {
    for event in tree.preorder() {
        let WalkEvent::Enter(Node::Block(block)) = event else { continue };
        let close = block.close().expect("balanced input leaves no block open");
        assert_eq!(close.pair(), block.pair());

        let pair = block.pair().and_then(|index| config.pair(index)).unwrap();
        assert_eq!(block.open().text(tree), pair.open());
        assert_eq!(close.text(tree), pair.close());
    }
}

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "{\n {\n\n }\n}",
    "fn main() { let x = [1, (2 + 3)]; }",
    "(]",
    "{",
    ")(",
    "{ ( }",
    "((([[[{{{",
    "}}} ]]] )))",
    "a ( b [ c ) d ] e",
    "\t{\r\n  é ü (ß) \r\n}\r\n",
];

#[test]
fn nested_blocks_with_empty_line() {
    let tree = build("{\n {\n\n }\n}", &BracketConfig::default());

    let [Element::Block(outer)] = tree.root().children() else {
        panic!("expected a single block, got {:?}", tree.root().children());
    };
    let [Element::Block(inner)] = outer.elements().children() else {
        panic!("expected a single nested block, got {:?}", outer.elements().children());
    };
    assert!(inner.elements().is_empty());
    assert!(inner.close().is_some());
    assert!(outer.close().is_some());
}

#[test]
fn mismatched_pair_creates_no_block() {
    let tree = build("(]", &BracketConfig::default());

    let kinds = tree.root_node().children().map(Node::kind).collect::<Vec<_>>();
    assert_eq!(kinds, [SyntaxKind::TEXT, SyntaxKind::TEXT]);
    assert!(blocks(&tree).is_empty());
}

#[test]
fn unterminated_block_has_no_close() {
    let tree = build("{", &BracketConfig::default());

    let [Element::Block(block)] = tree.root().children() else {
        panic!("expected a single block, got {:?}", tree.root().children());
    };
    assert_eq!(block.open().kind(), SyntaxKind::OPEN_BRACKET);
    assert!(block.close().is_none());
}

#[test]
fn children_cover_their_parent() {
    let config = BracketConfig::default();
    for text in SAMPLES {
        assert_covering(&build(text, &config));
    }
}

#[test]
fn build_is_idempotent() {
    let config = BracketConfig::default();
    for text in SAMPLES {
        assert_eq!(build(text, &config), build(text, &config), "{text:?}");
    }
}

#[test]
fn balanced_blocks_use_matching_pairs() {
    let config = BracketConfig::default();
    let tree = build("a(b[c]{d(e)}[])f", &config);

    assert_eq!(blocks(&tree).len(), 5);
    assert_matching_pairs(&tree, &config);
    assert!(diagnostics(&tree).is_empty());
}

#[test]
fn stray_closer_at_top_level_keeps_structure() {
    let tree = build(") {x}", &BracketConfig::default());

    assert_eq!(blocks(&tree), [("{", Some("}"))]);
    let first = tree.root().children()[0].as_leaf().unwrap();
    assert!(first.is_unmatched_bracket());
}

#[test]
fn unclosed_blocks_survive_without_mismatch() {
    let tree = build("f(a, [b", &BracketConfig::default());
    assert_eq!(blocks(&tree), [("(", None), ("[", None)]);
}

#[test]
fn mismatch_dissolves_enclosing_unclosed_blocks() {
    let tree = build("( { ]", &BracketConfig::default());

    assert!(blocks(&tree).is_empty());
    let kinds = tree.root_node().children().map(Node::kind).collect::<Vec<_>>();
    assert_eq!(kinds, [SyntaxKind::TEXT, SyntaxKind::TEXT, SyntaxKind::TEXT]);
}

#[test]
fn symmetric_brackets() {
    let config = BracketConfig::new([("|", "|"), ("(", ")")]).unwrap();
    let tree = build("|a (|b|) c|", &config);

    assert_eq!(blocks(&tree), [("|", Some("|")), ("(", Some(")")), ("|", Some("|"))]);
    assert_covering(&tree);
}

#[test]
fn word_brackets() {
    let config = BracketConfig::new([("begin", "end")]).unwrap();
    let tree = build("begin append; begin x end end", &config);

    assert_eq!(blocks(&tree), [("begin", Some("end")), ("begin", Some("end"))]);
}

#[test]
fn deep_nesting() {
    const DEPTH: usize = 100_000;

    let config = BracketConfig::default();
    let unclosed = "(".repeat(DEPTH);
    let closed = format!("{unclosed}x{}", ")".repeat(DEPTH));

    for text in [unclosed, closed] {
        let tree = build(&text, &config);
        let again = build(&text, &config);
        assert!(tree == again);
        assert_covering(&tree);
        assert_eq!(blocks(&tree).len(), DEPTH);
        assert_eq!(tree.root_node().trimmed_range(), Some(TextRange::up_to(TextSize::of(&*text))));
        drop(tree);
        drop(again);
    }
}

#[test]
fn structural_equality() {
    let config = BracketConfig::default();
    let tree = build("((a))", &config);

    assert!(tree.root() == build("((b))", &config).root());
    assert!(tree.root() != build("(( a))", &config).root());
    assert!(tree.root() != build("({a})", &config).root());
    assert!(tree.root() != build("((a)", &config).root());
}

const PAIRS: [(&str, &str); 3] = [("(", ")"), ("{", "}"), ("[", "]")];

const PIECES: &[&str] = &[
    "(", ")", "{", "}", "[", "]", "a", "foo,", " ", "\t", "\n", "\r\n", "\r", "é", "日本", "ß",
];

const FILLERS: &[&str] = &["", "x", " ", "a b", "\n", " é\r\n"];

fn any_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..64).prop_map(|pieces| pieces.concat())
}

/// Balanced bracket text with the number of blocks it contains.
fn balanced_text() -> impl Strategy<Value = (String, usize)> {
    let filler = prop::sample::select(FILLERS).prop_map(|text| (text.to_owned(), 0));
    filler.prop_recursive(8, 64, 4, |inner| {
        prop_oneof![
            (0..PAIRS.len(), inner.clone()).prop_map(|(pair, (body, blocks))| {
                let (open, close) = PAIRS[pair];
                (format!("{open}{body}{close}"), blocks + 1)
            }),
            prop::collection::vec(inner, 1..4).prop_map(|parts| {
                parts.into_iter().fold((String::new(), 0), |(text, blocks), (part, count)| {
                    (text + &part, blocks + count)
                })
            }),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_children_cover_their_parent(text in any_text()) {
        assert_covering(&build(&text, &BracketConfig::default()));
    }

    #[test]
    fn prop_build_is_idempotent(text in any_text()) {
        let config = BracketConfig::default();
        prop_assert_eq!(build(&text, &config), build(&text, &config));
    }

    #[test]
    fn prop_nested_text_keeps_covering(
        depth in 0usize..2_000,
        closed in any::<bool>(),
        body in any_text(),
    ) {
        let close = if closed { ")".repeat(depth) } else { String::new() };
        let text = format!("{}{body}{close}", "(".repeat(depth));
        let config = BracketConfig::default();

        let tree = build(&text, &config);
        assert_covering(&tree);
        prop_assert!(tree == build(&text, &config));
    }

    #[test]
    fn prop_balanced_blocks_use_matching_pairs((text, count) in balanced_text()) {
        let config = BracketConfig::default();
        let tree = build(&text, &config);

        prop_assert_eq!(blocks(&tree).len(), count);
        assert_matching_pairs(&tree, &config);
        prop_assert!(diagnostics(&tree).is_empty());
    }
}
