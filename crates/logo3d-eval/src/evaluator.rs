//! Core statement and expression evaluator.

use logo3d_types::ast::*;
use tracing::{debug, trace};

use crate::actions::TurtleActions;
use crate::error::{EvalError, EvalResult};
use crate::options::{ConditionalMode, EvalOptions, LoopBound};
use crate::store::VariableStore;
use crate::value::Value;

/// Walks one AST against a variable store, issuing turtle calls.
///
/// The evaluator owns nothing: the store and the port belong to the caller
/// and outlive any single program.
pub struct Evaluator<'a, A: TurtleActions + ?Sized> {
    store: &'a mut VariableStore,
    actions: &'a mut A,
    options: &'a EvalOptions,
}

impl<'a, A: TurtleActions + ?Sized> Evaluator<'a, A> {
    pub fn new(store: &'a mut VariableStore, actions: &'a mut A, options: &'a EvalOptions) -> Self {
        Self {
            store,
            actions,
            options,
        }
    }

    /// Run every statement in order. The first failure stops the program;
    /// effects issued before it remain.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Value> {
        self.eval_stmts(&program.stmts)
    }

    fn eval_stmts(&mut self, stmts: &[Stmt]) -> EvalResult<Value> {
        for stmt in stmts {
            self.eval_stmt(stmt)?;
        }
        Ok(Value::Void)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Statements
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate one statement. Statements always yield `Void`.
    pub fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult<Value> {
        trace!(command = stmt.keyword(), at = %stmt.span(), "eval statement");
        match stmt {
            Stmt::Forward(m) => {
                let v = self.eval_number(&m.amount)?;
                if v < 0.0 {
                    self.actions.backward(-v);
                } else {
                    self.actions.forward(v);
                }
            }
            Stmt::Backward(m) => {
                let v = self.eval_number(&m.amount)?;
                if v < 0.0 {
                    self.actions.forward(-v);
                } else {
                    self.actions.backward(v);
                }
            }
            Stmt::TurnLeft(m) => {
                let v = self.eval_number(&m.amount)?;
                self.actions.turn_left(v);
            }
            Stmt::TurnRight(m) => {
                let v = self.eval_number(&m.amount)?;
                self.actions.turn_right(v);
            }
            Stmt::Print(p) => {
                let text = self.eval_expr(&p.arg)?.as_string();
                self.actions.print(&text);
            }
            Stmt::Assign(a) => {
                let value = self.eval_expr(&a.value)?;
                self.store.set(a.name.name.as_str(), value);
            }
            Stmt::For(f) => self.eval_for(f)?,
            Stmt::If(i) => self.eval_if(i)?,
        }
        Ok(Value::Void)
    }

    fn eval_for(&mut self, f: &ForStmt) -> EvalResult<()> {
        let start = self.eval_number(&f.start)?;
        let end = self.eval_number(&f.end)?;
        let step = self.eval_number(&f.step)?;
        let include_end = match self.options.loop_bound {
            LoopBound::Inclusive => true,
            LoopBound::Legacy => start == step,
        };

        let limit = self.options.max_loop_iterations;
        let mut cursor = start;
        let mut iterations: u64 = 0;
        while in_range(cursor, end, step, include_end) {
            if iterations == limit {
                return Err(EvalError::LoopLimitExceeded {
                    var: f.var.name.clone(),
                    limit,
                });
            }
            self.store.set(f.var.name.as_str(), Value::Number(cursor));
            self.eval_stmts(&f.body.stmts)?;
            iterations += 1;
            cursor += step;
        }
        debug!(var = %f.var.name, start, end, step, iterations, "for loop finished");
        Ok(())
    }

    fn eval_if(&mut self, i: &IfStmt) -> EvalResult<()> {
        let condition = self.eval_expr(&i.condition)?;
        let run = match self.options.conditionals {
            ConditionalMode::Strict => condition.as_number()? != 0.0,
            ConditionalMode::Legacy => {
                if condition == Value::Number(0.0) {
                    debug!(at = %i.span, "condition is false, running block anyway");
                }
                true
            }
        };
        if run {
            self.eval_stmts(&i.then_block.stmts)?;
        }
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate an expression to exactly one value.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::NumberLit(text) | ExprKind::SignedNumberLit(text) => parse_number(text),
            ExprKind::StringLit(StringLiteral::PlainString(word)) => {
                Ok(Value::String(word.clone()))
            }
            ExprKind::StringLit(StringLiteral::QuotedWordList(text)) => {
                Ok(Value::String(join_word_list(text)))
            }
            ExprKind::Deref(ident) => self.store.get(&ident.name),
            ExprKind::Binary { left, op, right } => {
                let lv = self.eval_expr(left)?;
                let rv = self.eval_expr(right)?;
                eval_arith(&lv, *op, &rv)
            }
            ExprKind::Comparison { left, op, right } => {
                let lv = self.eval_expr(left)?;
                let rv = self.eval_expr(right)?;
                eval_comparison(&lv, *op, &rv)
            }
        }
    }

    fn eval_number(&mut self, expr: &Expr) -> EvalResult<f64> {
        self.eval_expr(expr)?.as_number()
    }
}

/// Whether the loop cursor still lies inside the bound, in the step's direction.
fn in_range(cursor: f64, end: f64, step: f64, include_end: bool) -> bool {
    match (step < 0.0, include_end) {
        (false, true) => cursor <= end,
        (false, false) => cursor < end,
        (true, true) => cursor >= end,
        (true, false) => cursor > end,
    }
}

fn parse_number(text: &str) -> EvalResult<Value> {
    text.parse::<f64>()
        .map(Value::Number)
        .map_err(|_| EvalError::TypeMismatch(format!("'{text}' is not a number")))
}

/// `[hello [little] world]` → `hello[little]world`: drop the outer brackets
/// and the blanks between words; inner brackets stay as written.
fn join_word_list(text: &str) -> String {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    inner.split_whitespace().collect()
}

fn eval_arith(lv: &Value, op: BinOp, rv: &Value) -> EvalResult<Value> {
    let apply: fn(f64, f64) -> f64 = match op {
        BinOp::Add => |a, b| a + b,
        BinOp::Sub => |a, b| a - b,
        BinOp::Mul => |a, b| a * b,
        BinOp::Div => |a, b| a / b,
        BinOp::Less | BinOp::Greater | BinOp::Eq => {
            return Err(EvalError::UnknownOperator(op.as_str().to_string()))
        }
    };
    match (lv, rv) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(*a, *b))),
        _ => Err(EvalError::TypeMismatch(format!(
            "cannot apply '{}' to {} and {}",
            op.as_str(),
            lv.type_name(),
            rv.type_name()
        ))),
    }
}

/// Comparisons yield `1.0` for true and `0.0` for false.
fn eval_comparison(lv: &Value, op: BinOp, rv: &Value) -> EvalResult<Value> {
    let holds = match (op, lv, rv) {
        (BinOp::Eq, _, _) => lv == rv,
        (BinOp::Less, Value::Number(a), Value::Number(b)) => a < b,
        (BinOp::Greater, Value::Number(a), Value::Number(b)) => a > b,
        (BinOp::Less | BinOp::Greater, _, _) => {
            return Err(EvalError::TypeMismatch(format!(
                "cannot compare {} and {} with '{}'",
                lv.type_name(),
                rv.type_name(),
                op.as_str()
            )))
        }
        (BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div, _, _) => {
            return Err(EvalError::UnknownOperator(op.as_str().to_string()))
        }
    };
    Ok(Value::Number(if holds { 1.0 } else { 0.0 }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_word_list() {
        assert_eq!(join_word_list("[hello [little] world]"), "hello[little]world");
        assert_eq!(join_word_list("[  a \n b ]"), "ab");
        assert_eq!(join_word_list("[]"), "");
    }

    #[test]
    fn test_parse_number_with_sign() {
        assert_eq!(parse_number("-10"), Ok(Value::Number(-10.0)));
        assert_eq!(parse_number("+2.5"), Ok(Value::Number(2.5)));
        assert_eq!(parse_number("007"), Ok(Value::Number(7.0)));
    }

    #[test]
    fn test_arith_rejects_comparison_operator() {
        let one = Value::Number(1.0);
        assert_eq!(
            eval_arith(&one, BinOp::Less, &one),
            Err(EvalError::UnknownOperator("<".into()))
        );
    }

    #[test]
    fn test_comparison_rejects_arith_operator() {
        let one = Value::Number(1.0);
        assert_eq!(
            eval_comparison(&one, BinOp::Mul, &one),
            Err(EvalError::UnknownOperator("*".into()))
        );
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let r = eval_arith(&Value::Number(1.0), BinOp::Div, &Value::Number(0.0));
        assert_eq!(r, Ok(Value::Number(f64::INFINITY)));
    }

    #[test]
    fn test_in_range_directions() {
        assert!(in_range(1.0, 2.0, 1.0, false));
        assert!(!in_range(2.0, 2.0, 1.0, false));
        assert!(in_range(2.0, 2.0, 1.0, true));
        assert!(in_range(5.0, 1.0, -1.0, false));
        assert!(!in_range(1.0, 1.0, -1.0, false));
        assert!(in_range(1.0, 1.0, -1.0, true));
    }
}
