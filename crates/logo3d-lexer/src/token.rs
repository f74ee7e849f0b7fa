//! Token types for the logo3d lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the command language and
//! [`Token`], which pairs a kind with a source [`Span`].

use logo3d_types::Span;
use std::fmt;

/// Reserved command words, short and long spellings.
///
/// Matching is case-insensitive, as in classic Logo.
pub const ALL_KEYWORDS: &[&str] = &[
    "fd", "forward", "bk", "back", "lt", "left", "rt", "right", "print", "make", "for", "if",
];

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every token kind in the language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// Unsigned numeric literal, kept as written: `42`, `2.5`
    Number(String),
    /// `"word`, carrying the word without the quote.
    QuotedWord(String),
    /// `:name`, carrying the name without the colon.
    Deref(String),

    // ── Names ─────────────────────────────────────────────────
    /// Any other alphanumeric word: a loop variable or word-list content.
    Identifier(String),
    /// A run of characters with no other meaning. Only valid inside word lists.
    Word(String),

    // ── Commands ──────────────────────────────────────────────
    /// `fd` / `forward`
    Forward,
    /// `bk` / `back`
    Backward,
    /// `lt` / `left`
    Left,
    /// `rt` / `right`
    Right,
    /// `print`
    Print,
    /// `make`
    Make,
    /// `for`
    For,
    /// `if`
    If,

    // ── Operators ─────────────────────────────────────────────
    Plus,
    Minus,
    Star,
    Slash,
    Less,
    Greater,
    Eq,

    // ── Punctuation ───────────────────────────────────────────
    LBracket,
    RBracket,

    // ── Special ───────────────────────────────────────────────
    Newline,
    Eof,
}

impl TokenKind {
    /// Look up a command word. Returns `None` for ordinary identifiers.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s.to_ascii_lowercase().as_str() {
            "fd" | "forward" => TokenKind::Forward,
            "bk" | "back" => TokenKind::Backward,
            "lt" | "left" => TokenKind::Left,
            "rt" | "right" => TokenKind::Right,
            "print" => TokenKind::Print,
            "make" => TokenKind::Make,
            "for" => TokenKind::For,
            "if" => TokenKind::If,
            _ => return None,
        })
    }

    /// Returns `true` for tokens that begin a statement.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Forward
                | TokenKind::Backward
                | TokenKind::Left
                | TokenKind::Right
                | TokenKind::Print
                | TokenKind::Make
                | TokenKind::For
                | TokenKind::If
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(text) => write!(f, "{text}"),
            TokenKind::QuotedWord(word) => write!(f, "\"{word}"),
            TokenKind::Deref(name) => write!(f, ":{name}"),
            TokenKind::Identifier(name) | TokenKind::Word(name) => write!(f, "{name}"),
            TokenKind::Forward => write!(f, "fd"),
            TokenKind::Backward => write!(f, "bk"),
            TokenKind::Left => write!(f, "lt"),
            TokenKind::Right => write!(f, "rt"),
            TokenKind::Print => write!(f, "print"),
            TokenKind::Make => write!(f, "make"),
            TokenKind::For => write!(f, "for"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
