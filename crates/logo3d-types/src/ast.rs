//! AST node types for the logo3d command language.
//!
//! Every node carries a [`Span`] for error reporting.
//! The tree is produced once per submission and only ever read afterwards.

use crate::Span;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// One submission: the statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// `[ stmts... ]`: the body of a `for` or `if`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A command.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `fd expr`
    Forward(MoveStmt),
    /// `bk expr`
    Backward(MoveStmt),
    /// `lt expr`
    TurnLeft(MoveStmt),
    /// `rt expr`
    TurnRight(MoveStmt),
    /// `print [word list]` or `print value`
    Print(PrintStmt),
    /// `make "name value`
    Assign(AssignStmt),
    /// `for [name start end step] [block]`
    For(ForStmt),
    /// `if condition [block]`
    If(IfStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Forward(s) | Stmt::Backward(s) | Stmt::TurnLeft(s) | Stmt::TurnRight(s) => {
                s.span
            }
            Stmt::Print(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::If(s) => s.span,
        }
    }

    /// The command word, for logs.
    pub fn keyword(&self) -> &'static str {
        match self {
            Stmt::Forward(_) => "fd",
            Stmt::Backward(_) => "bk",
            Stmt::TurnLeft(_) => "lt",
            Stmt::TurnRight(_) => "rt",
            Stmt::Print(_) => "print",
            Stmt::Assign(_) => "make",
            Stmt::For(_) => "for",
            Stmt::If(_) => "if",
        }
    }
}

/// The single numeric argument of a movement or turn.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStmt {
    pub amount: Expr,
    pub span: Span,
}

/// `print arg`, where `arg` is either a word list literal or any value expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub arg: Expr,
    pub span: Span,
}

/// `make "name value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    /// The quoted name, without its leading `"`.
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// `for [var start end step] [body]`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub var: Ident,
    pub start: Expr,
    pub end: Expr,
    pub step: Expr,
    pub body: Block,
    pub span: Span,
}

/// `if condition [then_block]`. There is no else branch.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Block,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node. Uses `Box` for recursive variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`, `2.5`: the literal text as written.
    NumberLit(String),
    /// `-10`, `+3`: the sign belongs to the literal text.
    SignedNumberLit(String),
    /// `a + b`, `a * b`
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `:name`
    Deref(Ident),
    /// `a > b`, only produced for `if` conditions.
    Comparison {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `"word` or `[word list]`
    StringLit(StringLiteral),
}

/// Literal string forms.
#[derive(Debug, Clone, PartialEq)]
pub enum StringLiteral {
    /// The full bracketed source text, outer brackets included: `[hello [little] world]`.
    QuotedWordList(String),
    /// `"word`, holding the word without the quote.
    PlainString(String),
}

// ── Operators ─────────────────────────────────────────────────────────────────

/// Binary operators. Arithmetic nodes only carry `Add`..`Div`; comparison
/// nodes only carry `Less`, `Greater` and `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    Greater,
    Eq,
}

impl BinOp {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::Eq => "=",
        }
    }
}
