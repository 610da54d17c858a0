use bracken_syntax::{Builder, Leaf, SyntaxKind, TokenTree};
use bracken_tokenizer::{BracketConfig, Token, Tokenizer};
use text_size::TextRange;

/// An open block on the stack.
struct Frame {
    pair: u32,
    /// Set when a closer that matches no open block was seen inside.
    mismatched: bool,
}

#[derive(Default)]
struct Stats {
    tokens: usize,
    blocks: usize,
    unclosed: usize,
    dissolved: usize,
}

pub(crate) struct TreeBuilder<'a> {
    tokenizer: Tokenizer<'a>,
    builder: Builder,
    frames: Vec<Frame>,
    stats: Stats,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(text: &'a str, config: &'a BracketConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(text, config),
            builder: Builder::new(text),
            frames: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub(crate) fn run(&mut self) {
        loop {
            let token = self.tokenizer.next_token();
            match token.kind {
                SyntaxKind::EOF => {
                    self.eof(&token);
                    break;
                }
                SyntaxKind::OPEN_BRACKET => self.open(&token),
                SyntaxKind::CLOSE_BRACKET => self.close(&token),
                SyntaxKind::BRACKET_AMBIGUOUS => {
                    let closes_top = self
                        .frames
                        .last()
                        .is_some_and(|frame| Some(frame.pair) == token.close_pair);
                    if closes_top { self.close(&token) } else { self.open(&token) }
                }
                _ => self.text(&token, None),
            }
            self.stats.tokens += 1;
        }

        while let Some(frame) = self.frames.pop() {
            if frame.mismatched {
                self.dissolve();
            } else {
                self.stats.unclosed += 1;
                self.builder.finish_block(None);
            }
        }
    }

    pub(crate) fn finish(self) -> TokenTree {
        let Stats { tokens, blocks, unclosed, dissolved } = self.stats;
        tracing::debug!(tokens, blocks, unclosed, dissolved, "built token tree");
        self.builder.finish()
    }

    fn leaf(&mut self, token: &Token, kind: SyntaxKind, pair: Option<u32>) -> Leaf {
        self.builder.leaf(&token.leading, kind, token.kind_range, &token.trailing, pair)
    }

    /// Pushes `token` as a `TEXT` leaf; demoted brackets keep their pair.
    fn text(&mut self, token: &Token, pair: Option<u32>) {
        let leaf = self.leaf(token, SyntaxKind::TEXT, pair);
        self.builder.push(leaf);
    }

    fn open(&mut self, token: &Token) {
        let Some(pair) = token.open_pair else {
            return self.text(token, token.close_pair);
        };
        let leaf = self.leaf(token, SyntaxKind::OPEN_BRACKET, Some(pair));
        self.builder.start_block(leaf);
        self.frames.push(Frame { pair, mismatched: false });
    }

    fn close(&mut self, token: &Token) {
        let Some(pair) = token.close_pair else {
            return self.text(token, token.open_pair);
        };

        match self.frames.iter().rposition(|frame| frame.pair == pair) {
            Some(depth) => {
                while self.frames.len() > depth + 1 {
                    self.frames.pop();
                    self.dissolve();
                }
                self.frames.pop();
                let leaf = self.leaf(token, SyntaxKind::CLOSE_BRACKET, Some(pair));
                self.builder.finish_block(Some(leaf));
                self.stats.blocks += 1;
            }
            None => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.mismatched = true;
                }
                self.text(token, Some(pair));
            }
        }
    }

    /// Abandons the innermost block, whose frame was already popped.
    ///
    /// A mismatch inside it now belongs to the enclosing block.
    fn dissolve(&mut self) {
        tracing::trace!(depth = self.builder.depth(), "dissolving unmatched block");
        self.builder.abandon_block();
        self.stats.dissolved += 1;
        if let Some(parent) = self.frames.last_mut() {
            parent.mismatched = true;
        }
    }

    fn eof(&mut self, token: &Token) {
        if token.leading.is_empty() {
            return;
        }

        // Only a whitespace-only buffer leaves trivia for `EOF`.
        let leaf = self.builder.leaf(
            &[],
            SyntaxKind::WHITESPACE,
            TextRange::up_to(token.kind_range.end()),
            &[],
            None,
        );
        self.builder.push(leaf);
    }
}
