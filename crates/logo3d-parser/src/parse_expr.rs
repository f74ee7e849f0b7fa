//! Expression parsing with precedence climbing.
//!
//! Precedence (low to high):
//! 1. Comparison: `<` `>` `=` (only in `if` conditions, non-chaining)
//! 2. Additive: `+` `-`
//! 3. Multiplicative: `*` `/`
//! 4. Factor: number, signed number, `:name`, `"word`, `[word list]`

use logo3d_lexer::token::TokenKind;
use logo3d_types::ast::*;
use logo3d_types::ErrorCode;

use crate::parser::Parser;

impl<'src> Parser<'src> {
    /// `condition = expr [ ("<" | ">" | "=") expr ]`
    pub(crate) fn parse_condition(&mut self) -> Option<Expr> {
        let left = self.parse_expression()?;
        let Some(op) = comparison_op(self.peek_kind()) else {
            return Some(left);
        };
        self.advance();
        let right = self.parse_expression()?;

        if comparison_op(self.peek_kind()).is_some() {
            let error_span = self.current_span();
            self.error_at(
                ErrorCode::CHAINED_COMPARISON,
                "comparisons cannot be chained",
                error_span,
            );
            return None;
        }

        let span = left.span.merge(right.span);
        Some(Expr::new(
            ExprKind::Comparison {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        ))
    }

    /// `expr = term { ("+" | "-") term }`
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus | TokenKind::Minus if self.sign_starts_literal() => break,
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = binary(left, op, right);
        }
        Some(left)
    }

    /// `term = factor { ("*" | "/") factor }`
    fn parse_term(&mut self) -> Option<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = binary(left, op, right);
        }
        Some(left)
    }

    fn parse_factor(&mut self) -> Option<Expr> {
        match self.peek_kind().clone() {
            TokenKind::Number(text) => {
                let span = self.advance().span;
                Some(Expr::new(ExprKind::NumberLit(text), span))
            }
            kind @ (TokenKind::Plus | TokenKind::Minus) => {
                let sign_span = self.advance().span;
                let TokenKind::Number(digits) = self.peek_kind().clone() else {
                    self.error_at(
                        ErrorCode::EXPECTED_NUMBER_AFTER_SIGN,
                        format!("'{kind}' must be followed by a number"),
                        sign_span,
                    );
                    return None;
                };
                let span = sign_span.merge(self.advance().span);
                Some(Expr::new(
                    ExprKind::SignedNumberLit(format!("{kind}{digits}")),
                    span,
                ))
            }
            TokenKind::Deref(name) => {
                let span = self.advance().span;
                Some(Expr::new(ExprKind::Deref(Ident::new(name, span)), span))
            }
            TokenKind::QuotedWord(word) => {
                let span = self.advance().span;
                Some(Expr::new(
                    ExprKind::StringLit(StringLiteral::PlainString(word)),
                    span,
                ))
            }
            TokenKind::LBracket => self.parse_word_list(),
            kind if kind.is_keyword() => {
                self.error_at_current(
                    ErrorCode::MISPLACED_KEYWORD,
                    format!("expected a value, got command '{kind}'"),
                );
                None
            }
            TokenKind::Word(word) | TokenKind::Identifier(word) => {
                self.error_at_current(
                    ErrorCode::UNEXPECTED_TOKEN,
                    format!("'{word}' is only allowed inside a word list"),
                );
                None
            }
            kind => {
                self.error_at_current(
                    ErrorCode::UNEXPECTED_TOKEN,
                    format!("expected a value, got '{kind}'"),
                );
                None
            }
        }
    }

    /// `[ anything ]` with balanced nesting. The literal keeps the exact
    /// source text, outer brackets included.
    fn parse_word_list(&mut self) -> Option<Expr> {
        let open = self.advance().span;
        let mut depth = 1u32;
        loop {
            match self.peek_kind() {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof => {
                    self.error_at(ErrorCode::UNCLOSED_BRACKET, "'[' is never closed", open);
                    return None;
                }
                _ => {}
            }
            self.advance();
        }
        let close = self.advance().span;
        let span = open.merge(close);
        let text = self.source_file.slice(span).unwrap_or("[]").to_string();
        Some(Expr::new(
            ExprKind::StringLit(StringLiteral::QuotedWordList(text)),
            span,
        ))
    }
}

fn comparison_op(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Less => Some(BinOp::Less),
        TokenKind::Greater => Some(BinOp::Greater),
        TokenKind::Eq => Some(BinOp::Eq),
        _ => None,
    }
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}
