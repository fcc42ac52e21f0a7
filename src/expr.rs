//! Local qualifier expressions.
//!
//! Restriction clauses are never sent to the remote side. The plan fragment
//! carries them as [`Expr`] trees and the executor re-checks each fetched row
//! against them. Column references are resolved to positional indices when
//! the clause is built, so evaluation is O(1) per column access.

use std::cmp::Ordering;
use std::fmt;

use crate::datum::Value;
use crate::error::ExecutionError;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "<>",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }

    fn matches(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Neq => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::LtEq => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::GtEq => ord != Ordering::Less,
        }
    }
}

/// A boolean or scalar expression over one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value.
    Const(Value),
    /// Column reference resolved to a positional index.
    Column {
        /// Positional index into the row.
        index: usize,
        /// Column name for display.
        name: String,
    },
    /// Binary comparison.
    Compare {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },
    /// Conjunction of all arguments.
    And(Vec<Expr>),
    /// Disjunction of all arguments.
    Or(Vec<Expr>),
    /// Logical negation.
    Not(Box<Expr>),
    /// IS [NOT] NULL test.
    IsNull { expr: Box<Expr>, negated: bool },
}

impl Expr {
    /// Column reference shorthand.
    pub fn column(index: usize, name: impl Into<String>) -> Self {
        Expr::Column {
            index,
            name: name.into(),
        }
    }

    /// Comparison shorthand.
    pub fn compare(left: Expr, op: CompareOp, right: Expr) -> Self {
        Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Evaluates this expression against a row.
    ///
    /// NULL propagates through comparisons; AND/OR follow three-valued logic.
    pub fn evaluate(&self, row: &[Value]) -> Result<Value, ExecutionError> {
        match self {
            Expr::Const(v) => Ok(v.clone()),
            Expr::Column { index, name } => row.get(*index).cloned().ok_or_else(|| {
                ExecutionError::Qual(format!(
                    "column \"{}\" (index {}) out of bounds for row with {} columns",
                    name,
                    index,
                    row.len()
                ))
            }),
            Expr::Compare { left, op, right } => {
                let l = left.evaluate(row)?;
                let r = right.evaluate(row)?;
                if l.is_null() || r.is_null() {
                    return Ok(Value::Null);
                }
                let ord = compare_values(&l, &r)?;
                Ok(Value::Boolean(op.matches(ord)))
            }
            Expr::And(args) => {
                let mut saw_null = false;
                for arg in args {
                    match as_bool(arg.evaluate(row)?)? {
                        Some(false) => return Ok(Value::Boolean(false)),
                        Some(true) => {}
                        None => saw_null = true,
                    }
                }
                Ok(if saw_null { Value::Null } else { Value::Boolean(true) })
            }
            Expr::Or(args) => {
                let mut saw_null = false;
                for arg in args {
                    match as_bool(arg.evaluate(row)?)? {
                        Some(true) => return Ok(Value::Boolean(true)),
                        Some(false) => {}
                        None => saw_null = true,
                    }
                }
                Ok(if saw_null { Value::Null } else { Value::Boolean(false) })
            }
            Expr::Not(inner) => Ok(match as_bool(inner.evaluate(row)?)? {
                Some(b) => Value::Boolean(!b),
                None => Value::Null,
            }),
            Expr::IsNull { expr, negated } => {
                let is_null = expr.evaluate(row)?.is_null();
                Ok(Value::Boolean(is_null != *negated))
            }
        }
    }

    /// Returns true only if the expression evaluates to TRUE (NULL fails).
    pub fn is_satisfied(&self, row: &[Value]) -> Result<bool, ExecutionError> {
        Ok(matches!(self.evaluate(row)?, Value::Boolean(true)))
    }
}

fn as_bool(value: Value) -> Result<Option<bool>, ExecutionError> {
    match value {
        Value::Boolean(b) => Ok(Some(b)),
        Value::Null => Ok(None),
        other => Err(ExecutionError::Qual(format!(
            "argument must be type boolean, not {}",
            other.data_type().map_or_else(|| "unknown".to_string(), |t| t.to_string())
        ))),
    }
}

fn compare_values(l: &Value, r: &Value) -> Result<Ordering, ExecutionError> {
    if let (Some(a), Some(b)) = (l.as_i64(), r.as_i64()) {
        return Ok(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (l.as_f64(), r.as_f64()) {
        return a
            .partial_cmp(&b)
            .ok_or_else(|| ExecutionError::Qual("cannot compare NaN".to_string()));
    }
    match (l, r) {
        (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
        (Value::Bytea(a), Value::Bytea(b)) => Ok(a.cmp(b)),
        _ => Err(ExecutionError::Qual(format!(
            "cannot compare {} with {}",
            type_name(l),
            type_name(r)
        ))),
    }
}

fn type_name(v: &Value) -> String {
    v.data_type()
        .map_or_else(|| "unknown".to_string(), |t| t.to_string())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(Value::Text(s)) => write!(f, "'{}'", s.replace('\'', "''")),
            Expr::Const(v) => write!(f, "{}", v),
            Expr::Column { name, .. } => write!(f, "{}", name),
            Expr::Compare { left, op, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
            Expr::And(args) | Expr::Or(args) => {
                let sep = if matches!(self, Expr::And(_)) { " AND " } else { " OR " };
                let parts: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "({})", parts.join(sep))
            }
            Expr::Not(inner) => write!(f, "(NOT {})", inner),
            Expr::IsNull { expr, negated } => {
                write!(f, "({} IS {}NULL)", expr, if *negated { "NOT " } else { "" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<Value> {
        vec![Value::Int32(2), Value::Text("b".into()), Value::Null]
    }

    #[test]
    fn test_compare_mixed_integer_widths() {
        let e = Expr::compare(Expr::column(0, "id"), CompareOp::Gt, Expr::Const(Value::Int64(1)));
        assert!(e.is_satisfied(&row()).unwrap());
    }

    #[test]
    fn test_compare_text() {
        let e = Expr::compare(
            Expr::column(1, "name"),
            CompareOp::Eq,
            Expr::Const(Value::Text("b".into())),
        );
        assert!(e.is_satisfied(&row()).unwrap());
    }

    #[test]
    fn test_null_comparison_is_not_satisfied() {
        let e = Expr::compare(Expr::column(2, "note"), CompareOp::Eq, Expr::Const(Value::Int32(1)));
        assert_eq!(e.evaluate(&row()).unwrap(), Value::Null);
        assert!(!e.is_satisfied(&row()).unwrap());
    }

    #[test]
    fn test_three_valued_logic() {
        let null = Expr::Const(Value::Null);
        let t = Expr::Const(Value::Boolean(true));
        let f = Expr::Const(Value::Boolean(false));
        assert_eq!(Expr::And(vec![t.clone(), null.clone()]).evaluate(&[]).unwrap(), Value::Null);
        assert_eq!(
            Expr::And(vec![f.clone(), null.clone()]).evaluate(&[]).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            Expr::Or(vec![t.clone(), null.clone()]).evaluate(&[]).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(Expr::Or(vec![f, null.clone()]).evaluate(&[]).unwrap(), Value::Null);
        assert_eq!(Expr::Not(Box::new(null)).evaluate(&[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_is_null() {
        let e = Expr::IsNull {
            expr: Box::new(Expr::column(2, "note")),
            negated: false,
        };
        assert!(e.is_satisfied(&row()).unwrap());
    }

    #[test]
    fn test_type_errors() {
        let e = Expr::compare(Expr::column(0, "id"), CompareOp::Eq, Expr::column(1, "name"));
        assert!(matches!(e.evaluate(&row()), Err(ExecutionError::Qual(_))));
        let e = Expr::And(vec![Expr::column(0, "id")]);
        assert!(e.evaluate(&row()).is_err());
        assert!(Expr::column(9, "ghost").evaluate(&row()).is_err());
    }

    #[test]
    fn test_display() {
        let e = Expr::And(vec![
            Expr::compare(Expr::column(0, "id"), CompareOp::GtEq, Expr::Const(Value::Int32(2))),
            Expr::IsNull {
                expr: Box::new(Expr::column(2, "note")),
                negated: true,
            },
        ]);
        assert_eq!(e.to_string(), "((id >= 2) AND (note IS NOT NULL))");
    }
}
