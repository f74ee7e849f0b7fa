//! Parser tests.
//!
//! Covers: movement commands, print and word lists, make, for, if,
//! precedence, signed literals, error codes and recovery.

use logo3d_lexer::Lexer;
use logo3d_parser::{ParseResult, Parser, MAX_BLOCK_DEPTH};
use logo3d_types::ast::*;
use logo3d_types::{ErrorCode, SourceFile};
use pretty_assertions::assert_eq;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Parse source and return the result (program + errors).
fn parse(source: &str) -> ParseResult {
    let sf = SourceFile::new("console", source);
    let lex = Lexer::new(&sf).lex();
    Parser::new(lex.tokens, &sf).parse()
}

/// Parse source and return the program, panicking if there are errors.
fn parse_ok(source: &str) -> Program {
    let result = parse(source);
    if result.errors.has_errors() {
        for e in &result.errors.errors {
            eprintln!("  ERROR: {} ({})", e.message, e.code);
        }
        panic!("unexpected parse errors (see above)");
    }
    result.program.expect("no program returned")
}

fn error_codes(source: &str) -> Vec<ErrorCode> {
    parse(source).errors.errors.iter().map(|e| e.code).collect()
}

fn single_stmt(source: &str) -> Stmt {
    let program = parse_ok(source);
    assert_eq!(program.stmts.len(), 1, "expected one statement");
    program.stmts.into_iter().next().expect("one statement")
}

fn move_amount(stmt: Stmt) -> ExprKind {
    match stmt {
        Stmt::Forward(m) | Stmt::Backward(m) | Stmt::TurnLeft(m) | Stmt::TurnRight(m) => {
            m.amount.kind
        }
        other => panic!("expected movement, got {other:?}"),
    }
}

fn print_arg(source: &str) -> ExprKind {
    match single_stmt(source) {
        Stmt::Print(p) => p.arg.kind,
        other => panic!("expected print, got {other:?}"),
    }
}

fn num(text: &str) -> ExprKind {
    ExprKind::NumberLit(text.into())
}

// ─────────────────────────────────────────────────────────────────────
// Movement
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_each_movement_command() {
    let program = parse_ok("fd 10\nbk 20\nlt 30\nrt 40");
    let kinds: Vec<&str> = program.stmts.iter().map(Stmt::keyword).collect();
    assert_eq!(kinds, vec!["fd", "bk", "lt", "rt"]);
}

#[test]
fn test_several_statements_on_one_line() {
    let program = parse_ok("fd 10 rt 90 fd 10");
    assert_eq!(program.stmts.len(), 3);
}

#[test]
fn test_blank_lines_and_comments_are_ignored() {
    let program = parse_ok("\n\n; square corner\nfd 10\n\n");
    assert_eq!(program.stmts.len(), 1);
}

#[test]
fn test_empty_program() {
    assert!(parse_ok("").stmts.is_empty());
    assert!(parse_ok("\n").stmts.is_empty());
}

#[test]
fn test_signed_literal() {
    assert_eq!(
        move_amount(single_stmt("fd -10")),
        ExprKind::SignedNumberLit("-10".into())
    );
    assert_eq!(
        move_amount(single_stmt("fd +2.5")),
        ExprKind::SignedNumberLit("+2.5".into())
    );
}

#[test]
fn test_minus_between_numbers_is_subtraction() {
    match move_amount(single_stmt("fd 40-10")) {
        ExprKind::Binary { left, op, right } => {
            assert_eq!(left.kind, num("40"));
            assert_eq!(op, BinOp::Sub);
            assert_eq!(right.kind, num("10"));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_spaced_sign_glued_to_number_starts_new_literal() {
    // `10 -5` is two values, not a difference
    let result = parse("fd 10 -5");
    assert!(result.program.is_none());
    assert_eq!(result.errors.errors[0].message, "expected a command, got '-'");
}

#[test]
fn test_spaced_minus_is_subtraction() {
    assert!(matches!(
        move_amount(single_stmt("fd 10 - 5")),
        ExprKind::Binary { op: BinOp::Sub, .. }
    ));
}

// ─────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_multiplication_binds_tighter() {
    // 1 + (2 * 3)
    match move_amount(single_stmt("fd 1 + 2 * 3")) {
        ExprKind::Binary { left, op, right } => {
            assert_eq!(op, BinOp::Add);
            assert_eq!(left.kind, num("1"));
            assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_operators_are_left_associative() {
    // (10 - 4) - 3
    match move_amount(single_stmt("fd 10 - 4 - 3")) {
        ExprKind::Binary { left, op, right } => {
            assert_eq!(op, BinOp::Sub);
            assert!(matches!(left.kind, ExprKind::Binary { op: BinOp::Sub, .. }));
            assert_eq!(right.kind, num("3"));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_deref_in_expression() {
    match move_amount(single_stmt("fd :size * 2")) {
        ExprKind::Binary { left, .. } => match left.kind {
            ExprKind::Deref(ident) => assert_eq!(ident.name, "size"),
            other => panic!("expected deref, got {other:?}"),
        },
        other => panic!("expected binary, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Print & word lists
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_print_word_list_keeps_source_text() {
    assert_eq!(
        print_arg("print [hello [little] world]"),
        ExprKind::StringLit(StringLiteral::QuotedWordList("[hello [little] world]".into()))
    );
}

#[test]
fn test_word_list_accepts_any_words() {
    assert_eq!(
        print_arg("print [fd 10 + ! :x]"),
        ExprKind::StringLit(StringLiteral::QuotedWordList("[fd 10 + ! :x]".into()))
    );
}

#[test]
fn test_empty_word_list() {
    assert_eq!(
        print_arg("print []"),
        ExprKind::StringLit(StringLiteral::QuotedWordList("[]".into()))
    );
}

#[test]
fn test_print_expression() {
    assert!(matches!(
        print_arg("print 2 + 2"),
        ExprKind::Binary { op: BinOp::Add, .. }
    ));
}

#[test]
fn test_print_quoted_word() {
    assert_eq!(
        print_arg("print \"bonjour"),
        ExprKind::StringLit(StringLiteral::PlainString("bonjour".into()))
    );
}

// ─────────────────────────────────────────────────────────────────────
// Make
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_make_with_number() {
    match single_stmt("make \"size 25") {
        Stmt::Assign(a) => {
            assert_eq!(a.name.name, "size");
            assert_eq!(a.value.kind, num("25"));
        }
        other => panic!("expected make, got {other:?}"),
    }
}

#[test]
fn test_make_with_word() {
    match single_stmt("make \"greeting \"hi") {
        Stmt::Assign(a) => assert_eq!(
            a.value.kind,
            ExprKind::StringLit(StringLiteral::PlainString("hi".into()))
        ),
        other => panic!("expected make, got {other:?}"),
    }
}

#[test]
fn test_make_without_quote_is_an_error() {
    let result = parse("make size 25");
    assert!(result.program.is_none());
    let err = &result.errors.errors[0];
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert!(err.suggestion.is_some());
}

// ─────────────────────────────────────────────────────────────────────
// For & if
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_for_loop() {
    match single_stmt("for [i 9 13 1] [print :i]") {
        Stmt::For(f) => {
            assert_eq!(f.var.name, "i");
            assert_eq!(f.start.kind, num("9"));
            assert_eq!(f.end.kind, num("13"));
            assert_eq!(f.step.kind, num("1"));
            assert_eq!(f.body.stmts.len(), 1);
        }
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn test_for_loop_with_negative_step() {
    match single_stmt("for [i 5 1 -1] [fd :i]") {
        Stmt::For(f) => assert_eq!(f.step.kind, ExprKind::SignedNumberLit("-1".into())),
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn test_multiline_block() {
    let source = "for [i 1 4 1] [\n  fd 10\n  rt 90\n]\n";
    match single_stmt(source) {
        Stmt::For(f) => assert_eq!(f.body.stmts.len(), 2),
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn test_nested_blocks() {
    match single_stmt("for [i 1 3 1] [for [j 1 3 1] [if :i = :j [print :i]]]") {
        Stmt::For(outer) => match &outer.body.stmts[0] {
            Stmt::For(inner) => assert!(matches!(inner.body.stmts[0], Stmt::If(_))),
            other => panic!("expected inner for, got {other:?}"),
        },
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn test_if_with_comparison() {
    match single_stmt("if :x > 5 [fd 1]") {
        Stmt::If(i) => {
            assert!(matches!(
                i.condition.kind,
                ExprKind::Comparison { op: BinOp::Greater, .. }
            ));
            assert_eq!(i.then_block.stmts.len(), 1);
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_comparison_operands_are_full_expressions() {
    match single_stmt("if :x + 1 = 2 * 3 [fd 1]") {
        Stmt::If(i) => match i.condition.kind {
            ExprKind::Comparison { left, op, right } => {
                assert_eq!(op, BinOp::Eq);
                assert!(matches!(left.kind, ExprKind::Binary { op: BinOp::Add, .. }));
                assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected comparison, got {other:?}"),
        },
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_empty_block() {
    match single_stmt("if 1 < 2 []") {
        Stmt::If(i) => assert!(i.then_block.stmts.is_empty()),
        other => panic!("expected if, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_chained_comparison_is_rejected() {
    assert_eq!(error_codes("if 1 < 2 < 3 [fd 1]")[0], ErrorCode::CHAINED_COMPARISON);
}

#[test]
fn test_comparison_outside_if_is_rejected() {
    assert!(parse("fd 1 < 2").errors.has_errors());
}

#[test]
fn test_sign_without_number() {
    assert_eq!(
        error_codes("fd - :x"),
        vec![ErrorCode::EXPECTED_NUMBER_AFTER_SIGN]
    );
}

#[test]
fn test_unclosed_word_list() {
    assert_eq!(error_codes("print [hello"), vec![ErrorCode::UNCLOSED_BRACKET]);
}

#[test]
fn test_unclosed_block() {
    assert_eq!(error_codes("for [i 1 2 1] [fd 1"), vec![ErrorCode::UNCLOSED_BRACKET]);
}

#[test]
fn test_stray_closing_bracket() {
    assert_eq!(error_codes("fd 1 ]"), vec![ErrorCode::UNEXPECTED_TOKEN]);
}

#[test]
fn test_unknown_word_is_rejected() {
    let result = parse("jump 10");
    assert!(result.program.is_none());
    assert_eq!(result.errors.errors[0].message, "expected a command, got 'jump'");
}

#[test]
fn test_keyword_in_value_position() {
    assert_eq!(error_codes("fd print")[0], ErrorCode::MISPLACED_KEYWORD);
}

#[test]
fn test_missing_argument() {
    let result = parse("fd");
    assert!(result.program.is_none());
    assert_eq!(result.errors.errors[0].message, "expected a value, got 'end of input'");
}

#[test]
fn test_keyword_as_loop_variable() {
    assert_eq!(
        error_codes("for [fd 1 2 1] [print 1]")[0],
        ErrorCode::MISPLACED_KEYWORD
    );
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_BLOCK_DEPTH as usize + 1;
    let source = format!("{}fd 1{}", "if 1 < 2 [".repeat(depth), "]".repeat(depth));
    assert!(error_codes(&source).contains(&ErrorCode::NESTING_LIMIT_EXCEEDED));
}

#[test]
fn test_nesting_at_limit_is_accepted() {
    let depth = MAX_BLOCK_DEPTH as usize;
    let source = format!("{}fd 1{}", "if 1 < 2 [".repeat(depth), "]".repeat(depth));
    parse_ok(&source);
}

// ─────────────────────────────────────────────────────────────────────
// Recovery
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_recovery_reports_each_bad_line() {
    let result = parse("fd\nrt 90\nbk\njump");
    assert!(result.program.is_none());
    assert_eq!(result.errors.total_errors, 3);
}

#[test]
fn test_recovery_inside_block() {
    let result = parse("for [i 1 2 1] [fd print 1]\nrt 90");
    assert_eq!(result.errors.total_errors, 1);
}

#[test]
fn test_error_cap_stops_parsing() {
    let source = "jump\n".repeat(50);
    let result = parse(&source);
    assert_eq!(result.errors.total_errors, logo3d_types::MAX_ERRORS);
}

#[test]
fn test_error_spans_point_at_token() {
    let result = parse("fd 1\nrt jump");
    let err = &result.errors.errors[0];
    assert_eq!(err.span.start_line, 2);
    assert_eq!(err.span.start_col, 4);
    assert_eq!(err.source_line, "rt jump");
}
