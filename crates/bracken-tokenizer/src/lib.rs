mod brackets;
mod cursor;

pub use brackets::{BracketConfig, BracketPair, ConfigError, Side};
use cursor::Cursor;
pub use bracken_syntax::SyntaxKind;
use bracken_syntax::SyntaxKind::*;
use bracken_syntax::{TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub leading: Vec<TriviaPiece>,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: Vec<TriviaPiece>,
    /// Pair opened by this token, for `OPEN_BRACKET` and `BRACKET_AMBIGUOUS`.
    pub open_pair: Option<u32>,
    /// Pair closed by this token, for `CLOSE_BRACKET` and `BRACKET_AMBIGUOUS`.
    pub close_pair: Option<u32>,
}

impl Token {
    const EOF: Self = Self {
        leading: Vec::new(),
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        trailing: Vec::new(),
        open_pair: None,
        close_pair: None,
    };
}

/// Splits a buffer into bracket and text tokens with whitespace trivia.
///
/// Any occurrence of a configured bracket string is a bracket token; there
/// is no notion of strings or comments.
pub struct Tokenizer<'a> {
    text: &'a str,
    config: &'a BracketConfig,
    cursor: Cursor<'a>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, config: &'a BracketConfig) -> Self {
        let mut tokenizer = Self {
            text,
            config,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range, open_pair, close_pair) = self.syntax_kind();
        self.trivia();

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let token = Token {
            leading: leading.to_vec(),
            kind,
            kind_range,
            trailing: trailing.to_vec(),
            open_pair,
            close_pair,
        };

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, token)
    }

    fn trivia(&mut self) {
        loop {
            let kind = match self.cursor.peek() {
                '\n' => {
                    self.cursor.advance();
                    TriviaPieceKind::Newline
                }
                '\r' => {
                    self.cursor.advance();
                    if self.cursor.peek() == '\n' {
                        self.cursor.advance();
                    }
                    TriviaPieceKind::Newline
                }
                first_char if first_char.is_whitespace() && !self.cursor.is_eof() => {
                    self.cursor.advance_while(|c| c.is_whitespace() && c != '\n' && c != '\r');
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange, Option<u32>, Option<u32>) {
        let config = self.config;
        let (kind, open_pair, close_pair) = if self.cursor.is_eof() {
            (EOF, None, None)
        } else if let Some(bracket) = config.lookup(self.cursor.as_str(), self.cursor.previous()) {
            self.cursor.advance_str(&bracket.text);
            let kind = match (bracket.open, bracket.close) {
                (Some(_), Some(_)) => BRACKET_AMBIGUOUS,
                (Some(_), None) => OPEN_BRACKET,
                _ => CLOSE_BRACKET,
            };
            (kind, bracket.open, bracket.close)
        } else {
            self.text_run();
            (TEXT, None, None)
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range, open_pair, close_pair)
    }

    /// Consumes text up to whitespace or the start of a bracket.
    fn text_run(&mut self) {
        self.cursor.advance();
        while !self.cursor.is_eof()
            && !self.cursor.peek().is_whitespace()
            && self.config.lookup(self.cursor.as_str(), self.cursor.previous()).is_none()
        {
            self.cursor.advance();
        }
    }
}
