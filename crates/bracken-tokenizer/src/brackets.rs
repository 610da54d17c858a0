//! Bracket pair configuration for one language.

use std::fmt;

use rustc_hash::FxHashMap;

/// An open/close delimiter pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BracketPair {
    open: Box<str>,
    close: Box<str>,
}

impl BracketPair {
    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Open,
    Close,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Close => "close",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("bracket pair {index} has an empty {side} bracket")]
    EmptyBracket { index: usize, side: Side },
    #[error("bracket `{bracket}` of pair {index} contains whitespace")]
    Whitespace { index: usize, bracket: String },
    #[error("bracket `{bracket}` is the {side} bracket of both pair {first} and pair {second}")]
    Duplicate { bracket: String, side: Side, first: usize, second: usize },
}

/// A configured bracket string and the pairs it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) text: Box<str>,
    pub(crate) open: Option<u32>,
    pub(crate) close: Option<u32>,
}

/// Ordered set of bracket pairs recognized in a buffer.
///
/// The index of a pair is its position in the list the configuration was
/// created from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracketConfig {
    pairs: Vec<BracketPair>,
    /// Candidates by first char, longest first.
    candidates: FxHashMap<char, Vec<Candidate>>,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self::new([("(", ")"), ("{", "}"), ("[", "]")]).expect("default brackets are valid")
    }
}

impl BracketConfig {
    pub fn new<I, O, C>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (O, C)>,
        O: Into<Box<str>>,
        C: Into<Box<str>>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(open, close)| BracketPair { open: open.into(), close: close.into() })
            .collect::<Vec<_>>();

        let mut by_text: FxHashMap<&str, Candidate> = FxHashMap::default();
        for (index, pair) in pairs.iter().enumerate() {
            for (side, bracket) in [(Side::Open, &pair.open), (Side::Close, &pair.close)] {
                if bracket.is_empty() {
                    return Err(ConfigError::EmptyBracket { index, side });
                }
                if bracket.chars().any(char::is_whitespace) {
                    return Err(ConfigError::Whitespace { index, bracket: bracket.to_string() });
                }

                let candidate = by_text.entry(&**bracket).or_insert_with(|| Candidate {
                    text: bracket.clone(),
                    open: None,
                    close: None,
                });
                let slot = match side {
                    Side::Open => &mut candidate.open,
                    Side::Close => &mut candidate.close,
                };
                if let Some(first) = *slot {
                    return Err(ConfigError::Duplicate {
                        bracket: bracket.to_string(),
                        side,
                        first: first as usize,
                        second: index,
                    });
                }
                *slot = Some(index as u32);
            }
        }

        let mut candidates: FxHashMap<char, Vec<Candidate>> = FxHashMap::default();
        for candidate in by_text.into_values() {
            let Some(first) = candidate.text.chars().next() else { continue };
            candidates.entry(first).or_default().push(candidate);
        }
        for list in candidates.values_mut() {
            list.sort_by(|a, b| b.text.len().cmp(&a.text.len()).then_with(|| a.text.cmp(&b.text)));
        }

        Ok(Self { pairs, candidates })
    }

    pub fn pairs(&self) -> &[BracketPair] {
        &self.pairs
    }

    pub fn pair(&self, index: u32) -> Option<&BracketPair> {
        self.pairs.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Finds the longest bracket string at the start of `rest`.
    ///
    /// Bracket strings that begin or end with a word character only match at
    /// word boundaries; `previous` is the char before `rest`.
    pub(crate) fn lookup(&self, rest: &str, previous: char) -> Option<&Candidate> {
        let first = rest.chars().next()?;
        self.candidates.get(&first)?.iter().find(|candidate| {
            let text = &*candidate.text;
            if !rest.starts_with(text) {
                return false;
            }
            if is_word_char(first) && is_word_char(previous) {
                return false;
            }
            let last = text.chars().next_back().unwrap_or(first);
            let next = rest[text.len()..].chars().next();
            !(is_word_char(last) && next.is_some_and(is_word_char))
        })
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
