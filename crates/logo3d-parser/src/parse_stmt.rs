//! Statement and block parsing.
//!
//! ```text
//! stmt   = move expr | "print" value | "make" QUOTED value
//!        | "for" "[" IDENT expr expr expr "]" block
//!        | "if" condition block
//! move   = "fd" | "bk" | "lt" | "rt"
//! block  = "[" { stmt } "]"
//! ```

use logo3d_lexer::token::TokenKind;
use logo3d_types::ast::*;
use logo3d_types::ErrorCode;

use crate::parser::{Parser, MAX_BLOCK_DEPTH};

impl<'src> Parser<'src> {
    /// Parse one statement. On failure the offending tokens are reported and
    /// `None` is returned; the caller resynchronizes.
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        match self.peek_kind() {
            TokenKind::Forward => self.parse_move().map(Stmt::Forward),
            TokenKind::Backward => self.parse_move().map(Stmt::Backward),
            TokenKind::Left => self.parse_move().map(Stmt::TurnLeft),
            TokenKind::Right => self.parse_move().map(Stmt::TurnRight),
            TokenKind::Print => self.parse_print(),
            TokenKind::Make => self.parse_make(),
            TokenKind::For => self.parse_for(),
            TokenKind::If => self.parse_if(),
            TokenKind::RBracket => {
                self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, "unmatched ']'");
                self.advance();
                None
            }
            other => {
                let message = format!("expected a command, got '{other}'");
                self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, message);
                self.advance();
                None
            }
        }
    }

    /// `fd expr`, `bk expr`, `lt expr`, `rt expr`
    fn parse_move(&mut self) -> Option<MoveStmt> {
        let start = self.advance().span;
        let amount = self.parse_expression()?;
        let span = start.merge(amount.span);
        Some(MoveStmt { amount, span })
    }

    /// `print value`
    fn parse_print(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let arg = self.parse_expression()?;
        let span = start.merge(arg.span);
        Some(Stmt::Print(PrintStmt { arg, span }))
    }

    /// `make "name value`
    fn parse_make(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let name = self.expect_quoted_word()?;
        let value = self.parse_expression()?;
        let span = start.merge(value.span);
        Some(Stmt::Assign(AssignStmt { name, value, span }))
    }

    /// `for [var start end step] block`
    fn parse_for(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        self.expect(&TokenKind::LBracket)?;
        self.skip_newlines();
        let var = self.expect_identifier()?;
        let from = self.parse_expression()?;
        let to = self.parse_expression()?;
        let step = self.parse_expression()?;
        self.skip_newlines();
        self.expect(&TokenKind::RBracket)?;
        self.skip_newlines();
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Stmt::For(ForStmt {
            var,
            start: from,
            end: to,
            step,
            body,
            span,
        }))
    }

    /// `if condition block`
    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let condition = self.parse_condition()?;
        self.skip_newlines();
        let then_block = self.parse_block()?;
        let span = start.merge(then_block.span);
        Some(Stmt::If(IfStmt {
            condition,
            then_block,
            span,
        }))
    }

    /// `[ { stmt } ]`, newlines allowed anywhere between statements.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let open = self.expect(&TokenKind::LBracket)?.span;
        if self.block_depth >= MAX_BLOCK_DEPTH {
            self.error_at(
                ErrorCode::NESTING_LIMIT_EXCEEDED,
                format!("blocks nested deeper than {MAX_BLOCK_DEPTH} levels"),
                open,
            );
            return None;
        }

        self.block_depth += 1;
        let stmts = self.parse_block_body();
        self.block_depth -= 1;

        if self.at_end() {
            self.error_at(
                ErrorCode::UNCLOSED_BRACKET,
                "'[' is never closed",
                open,
            );
            return None;
        }
        let close = self.advance().span;
        Some(Block {
            stmts: stmts?,
            span: open.merge(close),
        })
    }

    /// Statements up to (not including) the closing `]` or end of input.
    /// Returns `None` if any statement failed, after consuming the rest of the
    /// body so the enclosing block still lines up.
    fn parse_block_body(&mut self) -> Option<Vec<Stmt>> {
        let mut stmts = Vec::new();
        let mut failed = false;
        self.skip_newlines();
        while !self.at_end() && !self.check_exact(&TokenKind::RBracket) {
            if self.too_many_errors() {
                return None;
            }
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => {
                    failed = true;
                    self.synchronize();
                }
            }
            self.skip_newlines();
        }
        (!failed).then_some(stmts)
    }
}
