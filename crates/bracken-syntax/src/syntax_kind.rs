#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum SyntaxKind {
    OPEN_BRACKET,
    CLOSE_BRACKET,
    /// A bracket string configured both as an opener and as a closer.
    BRACKET_AMBIGUOUS,
    TEXT,

    WHITESPACE,
    NEWLINE,

    EOF,

    NODE_LIST,
    BLOCK,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    pub fn is_bracket(self) -> bool {
        matches!(self, Self::OPEN_BRACKET | Self::CLOSE_BRACKET | Self::BRACKET_AMBIGUOUS)
    }
}
