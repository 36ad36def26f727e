use crate::functions::elementary::{divide, finite, power};
use crate::functions::trigonometric::AngleMode;
use crate::functions::{self, Function, Symbol};
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};
use crate::CalcError;

/// Evaluate an expression tree to a finite number.
///
/// Pure: the result depends only on the tree and the angle mode.
pub fn evaluate_expr(expr: &Expr, angle: AngleMode) -> Result<f64, CalcError> {
  match expr {
    Expr::Number(n) => Ok(*n),
    Expr::Constant(name) => match functions::lookup(name) {
      Some(Symbol::Constant(constant)) => Ok(constant.value()),
      _ => Err(CalcError::UnknownIdentifier(name.clone())),
    },
    Expr::UnaryOp { op, operand } => {
      let value = evaluate_expr(operand, angle)?;
      Ok(match op {
        UnaryOperator::Minus => -value,
        UnaryOperator::Plus => value,
      })
    }
    Expr::BinaryOp { op, left, right } => {
      let left = evaluate_expr(left, angle)?;
      let right = evaluate_expr(right, angle)?;
      let result = match op {
        BinaryOperator::Plus => left + right,
        BinaryOperator::Minus => left - right,
        BinaryOperator::Times => left * right,
        BinaryOperator::Divide => divide(left, right)?,
        BinaryOperator::Power => power(left, right)?,
      };
      finite(op.symbol(), result)
    }
    Expr::FunctionCall { func, args } => {
      // left to right; the first failing argument aborts the call
      let values = args
        .iter()
        .map(|arg| evaluate_expr(arg, angle))
        .collect::<Result<Vec<f64>, CalcError>>()?;
      apply_function(*func, &values, angle)
    }
  }
}

/// The one place where kernels are invoked, so angle conversion is applied
/// identically for every call.
pub fn apply_function(
  func: Function,
  args: &[f64],
  angle: AngleMode,
) -> Result<f64, CalcError> {
  let args: Vec<f64> = args
    .iter()
    .map(|&x| angle.apply_forward(func, x))
    .collect();
  let raw = func.apply(&args)?;
  finite(func.name(), angle.apply_inverse(func, raw))
}
