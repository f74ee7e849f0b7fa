//! Core parser infrastructure: token cursor, error reporting, helpers.

use logo3d_lexer::token::{Token, TokenKind};
use logo3d_types::ast::{Ident, Program};
use logo3d_types::{Diagnostics, ErrorCode, LogoError, SourceFile, Span};

/// Maximum nesting depth of `[ ... ]` blocks.
pub const MAX_BLOCK_DEPTH: u32 = 32;

/// The logo3d parser.
///
/// Consumes a token stream produced by the lexer and builds an AST.
/// Collects errors and attempts recovery when possible.
pub struct Parser<'src> {
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Source file for error context and word-list text.
    pub(crate) source_file: &'src SourceFile,
    errors: Diagnostics,
    /// Current block nesting depth.
    pub(crate) block_depth: u32,
    /// Returned by `peek` if the stream is empty.
    eof: Token,
}

/// Result of parsing.
///
/// `program` is `None` whenever `errors` is non-empty.
pub struct ParseResult {
    pub program: Option<Program>,
    pub errors: Diagnostics,
}

impl<'src> Parser<'src> {
    /// Create a new parser from a token stream and source file.
    pub fn new(tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        Self {
            tokens,
            pos: 0,
            source_file,
            errors: Diagnostics::empty(),
            block_depth: 0,
            eof: Token::new(TokenKind::Eof, Span::point(1, 1)),
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .unwrap_or(&self.eof)
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(1, 1)
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check_exact(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// A sign glued to the number after it but spaced from the token before it
    /// (`1 -1`) starts a new signed literal instead of continuing a sum.
    pub(crate) fn sign_starts_literal(&self) -> bool {
        let prev = self.pos.checked_sub(1).and_then(|i| self.tokens.get(i));
        let (Some(prev), Some(sign), Some(next)) =
            (prev, self.tokens.get(self.pos), self.tokens.get(self.pos + 1))
        else {
            return false;
        };
        let spaced_before = prev.span.end_line != sign.span.start_line
            || prev.span.end_col + 1 < sign.span.start_col;
        let glued_after = matches!(next.kind, TokenKind::Number(_))
            && next.span.start_line == sign.span.end_line
            && next.span.start_col == sign.span.end_col + 1;
        spaced_before && glued_after
    }

    /// Skip all consecutive newline tokens.
    pub(crate) fn skip_newlines(&mut self) {
        while self.check_exact(&TokenKind::Newline) {
            self.advance();
        }
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Expect a specific token kind. Returns the token if matched, or emits an error.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> Option<Token> {
        if self.check_exact(expected) {
            Some(self.advance())
        } else {
            self.error_at_current(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected '{}', got '{}'", expected, self.peek_kind()),
            );
            None
        }
    }

    /// Expect an identifier token (a loop variable name).
    pub(crate) fn expect_identifier(&mut self) -> Option<Ident> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                Some(Ident::new(name, span))
            }
            kind if kind.is_keyword() => {
                self.error_at_current(
                    ErrorCode::MISPLACED_KEYWORD,
                    format!("'{kind}' is a command and cannot name a variable"),
                );
                None
            }
            kind => {
                self.error_at_current(
                    ErrorCode::UNEXPECTED_TOKEN,
                    format!("expected variable name, got '{kind}'"),
                );
                None
            }
        }
    }

    /// Expect a `"word` token (the target of `make`).
    pub(crate) fn expect_quoted_word(&mut self) -> Option<Ident> {
        match self.peek_kind().clone() {
            TokenKind::QuotedWord(name) => {
                let span = self.advance().span;
                Some(Ident::new(name, span))
            }
            kind => {
                let span = self.current_span();
                let error = self
                    .make_error(
                        ErrorCode::UNEXPECTED_TOKEN,
                        format!("expected quoted name, got '{kind}'"),
                        span,
                    )
                    .with_suggestion("write the name with a leading quote: make \"size 10");
                self.errors.push_error(error);
                None
            }
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    fn make_error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> LogoError {
        let source_line = self.source_file.line(span.start_line).unwrap_or("");
        LogoError::new(&self.source_file.name, code, message, span, source_line)
    }

    /// Report an error at the current token position.
    pub(crate) fn error_at_current(&mut self, code: ErrorCode, message: impl Into<String>) {
        let span = self.current_span();
        self.error_at(code, message, span);
    }

    /// Report an error at a specific span.
    pub(crate) fn error_at(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let error = self.make_error(code, message, span);
        self.errors.push_error(error);
    }

    /// Returns `true` if we've hit the error limit and should stop.
    pub(crate) fn too_many_errors(&self) -> bool {
        self.errors.is_full()
    }

    // ── Synchronization ───────────────────────────────────────────────────────

    /// Skip tokens until the next statement can start: after a newline, at a
    /// command word, or at a closing bracket.
    pub(crate) fn synchronize(&mut self) {
        while !self.at_end() {
            if self.check_exact(&TokenKind::Newline) {
                self.advance();
                self.skip_newlines();
                return;
            }
            if self.peek_kind().is_keyword() || self.check_exact(&TokenKind::RBracket) {
                return;
            }
            self.advance();
        }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a `Program` AST.
    pub fn parse(mut self) -> ParseResult {
        let program = self.parse_program();
        let program = if self.errors.has_errors() {
            None
        } else {
            Some(program)
        };
        ParseResult {
            program,
            errors: self.errors,
        }
    }

    /// `program = { stmt } EOF`
    fn parse_program(&mut self) -> Program {
        self.skip_newlines();
        let start = self.current_span();
        let mut stmts = Vec::new();
        while !self.at_end() {
            if self.too_many_errors() {
                break;
            }
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            } else {
                self.synchronize();
            }
            self.skip_newlines();
        }
        let span = start.merge(self.previous_span());
        Program { stmts, span }
    }
}
