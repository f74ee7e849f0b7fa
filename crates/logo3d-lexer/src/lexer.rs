//! Core lexer: converts command text to a token stream.
//!
//! Features:
//! - Command words in short and long spelling, case-insensitive
//! - Numbers kept as written; signs are separate tokens so the parser decides
//!   between a signed literal and a binary operator
//! - `"word` and `:name` scanned as single tokens
//! - `;` comments run to end of line
//! - Anything else becomes a `Word`, which only word lists accept
//! - Error recovery: collects up to 20 errors instead of stopping at the first

use logo3d_types::{Diagnostics, ErrorCode, LogoError, SourceFile, Span};

use crate::token::{Token, TokenKind};

/// The logo3d lexer.
///
/// Converts source text into a vector of [`Token`]s, collecting up to
/// [`logo3d_types::MAX_ERRORS`] errors along the way.
pub struct Lexer<'src> {
    /// The full source text as bytes.
    source: &'src [u8],
    /// Source file for error reporting.
    source_file: &'src SourceFile,
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based, in bytes).
    col: u32,
    errors: Diagnostics,
}

/// Result of lexing: tokens + any errors collected.
pub struct LexResult {
    /// The token stream (always ends with [`TokenKind::Eof`]).
    pub tokens: Vec<Token>,
    pub errors: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: source_file.source.as_bytes(),
            source_file,
            pos: 0,
            line: 1,
            col: 1,
            errors: Diagnostics::empty(),
        }
    }

    /// Lex the entire source file into a token stream.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();

        loop {
            if self.errors.is_full() {
                break;
            }
            let token = self.scan_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, self.current_span()));
        }

        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    fn text_from(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.source[start..self.pos]).into_owned()
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let source_line = self.source_file.line(span.start_line).unwrap_or("");
        let err = LogoError::new(&self.source_file.name, code, message, span, source_line);
        self.errors.push_error(err);
    }

    /// Consume bytes while `pred` holds.
    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip spaces, tabs and `\r` (NOT newlines, those are tokens) and
    /// `;` comments up to the end of the line.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => {
                    self.advance();
                }
                Some(b';') => self.eat_while(|ch| ch != b'\n'),
                _ => break,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Token {
        self.skip_trivia();

        // Error recovery re-enters here; stop once the cap is hit
        if self.errors.is_full() {
            return Token::new(TokenKind::Eof, self.current_span());
        }

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, self.current_span());
        };

        let kind = match ch {
            b'\n' => TokenKind::Newline,
            b'0'..=b'9' => self.scan_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.eat_while(|c| c.is_ascii_alphanumeric() || c == b'_');
                let text = self.text_from(start);
                TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier(text))
            }
            b'"' => {
                let word_start = self.pos;
                self.eat_while(is_word_byte);
                if self.pos == word_start {
                    let span = self.span_from(start_line, start_col);
                    self.emit_error(
                        ErrorCode::EMPTY_QUOTED_WORD,
                        "expected a word after '\"'",
                        span,
                    );
                    return self.scan_token();
                }
                TokenKind::QuotedWord(self.text_from(word_start))
            }
            b':' => {
                let name_start = self.pos;
                self.eat_while(|c| c.is_ascii_alphanumeric() || c == b'_');
                if self.pos == name_start {
                    let span = self.span_from(start_line, start_col);
                    self.emit_error(
                        ErrorCode::UNEXPECTED_TOKEN,
                        "expected a variable name after ':'",
                        span,
                    );
                    return self.scan_token();
                }
                TokenKind::Deref(self.text_from(name_start))
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b'=' => TokenKind::Eq,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            _ => {
                self.eat_while(is_word_byte);
                TokenKind::Word(self.text_from(start))
            }
        };

        Token::new(kind, self.span_from(start_line, start_col))
    }

    fn scan_number(&mut self, start: usize) -> TokenKind {
        // First digit already consumed
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some(b'.')
            && self
                .source
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            self.eat_while(|c| c.is_ascii_digit());
        }
        TokenKind::Number(self.text_from(start))
    }
}

/// Bytes that may continue a free-form word: everything but blanks and brackets.
fn is_word_byte(ch: u8) -> bool {
    !matches!(ch, b' ' | b'\t' | b'\r' | b'\n' | b'[' | b']')
}
