use std::fmt;
use std::sync::LazyLock;

use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};

use crate::functions::{self, Function, Symbol};
use crate::{CalcError, Rule, format_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

impl BinaryOperator {
  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOperator::Plus => "+",
      BinaryOperator::Minus => "-",
      BinaryOperator::Times => "*",
      BinaryOperator::Divide => "/",
      BinaryOperator::Power => "^",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Minus,
  Plus,
}

impl UnaryOperator {
  pub fn symbol(self) -> &'static str {
    match self {
      UnaryOperator::Minus => "-",
      UnaryOperator::Plus => "+",
    }
  }
}

/// Parsed expression tree. Children are boxed and never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  Constant(String),
  FunctionCall {
    func: Function,
    args: Vec<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
}

/// Fully parenthesized rendering, so the tree shape is visible in the text.
impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Number(n) => write!(f, "{}", format_number(*n)),
      Expr::Constant(name) => write!(f, "{}", name),
      Expr::FunctionCall { func, args } => {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", func.name(), args.join(", "))
      }
      Expr::BinaryOp { op, left, right } => {
        write!(f, "({} {} {})", left, op.symbol(), right)
      }
      Expr::UnaryOp { op, operand } => {
        write!(f, "({}{})", op.symbol(), operand)
      }
    }
  }
}

// Later entries bind tighter.
static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
  PrattParser::new()
    .op(
      Op::infix(Rule::Add, Assoc::Left)
        | Op::infix(Rule::Subtract, Assoc::Left),
    )
    .op(
      Op::infix(Rule::Multiply, Assoc::Left)
        | Op::infix(Rule::Divide, Assoc::Left),
    )
    .op(Op::infix(Rule::Power, Assoc::Right))
    .op(Op::prefix(Rule::Negate) | Op::prefix(Rule::Identity))
});

/// Convert a pest pair into an expression tree.
pub fn pair_to_expr(pair: Pair<Rule>) -> Result<Expr, CalcError> {
  match pair.as_rule() {
    Rule::Program => {
      let expression = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::Expression)
        .ok_or_else(|| CalcError::Syntax("empty expression".into()))?;
      pair_to_expr(expression)
    }
    Rule::Expression => build_expression(pair.into_inner()),
    Rule::Number => {
      let text = pair.as_str();
      let value = text
        .parse::<f64>()
        .map_err(|_| CalcError::Syntax(format!("invalid number '{}'", text)))?;
      // digit strings past f64::MAX parse to infinity
      if !value.is_finite() {
        return Err(CalcError::Overflow(format!(
          "number '{}' is too large",
          text
        )));
      }
      Ok(Expr::Number(value))
    }
    Rule::Constant => constant(pair),
    Rule::FunctionCall => function_call(pair),
    rule => Err(CalcError::Syntax(format!("unexpected {:?}", rule))),
  }
}

fn build_expression(pairs: Pairs<Rule>) -> Result<Expr, CalcError> {
  PRATT
    .map_primary(pair_to_expr)
    .map_prefix(|op, operand| {
      let op = match op.as_rule() {
        Rule::Negate => UnaryOperator::Minus,
        Rule::Identity => UnaryOperator::Plus,
        rule => unreachable!("{:?} is not a prefix operator", rule),
      };
      Ok(Expr::UnaryOp {
        op,
        operand: Box::new(operand?),
      })
    })
    .map_infix(|left, op, right| {
      let op = match op.as_rule() {
        Rule::Add => BinaryOperator::Plus,
        Rule::Subtract => BinaryOperator::Minus,
        Rule::Multiply => BinaryOperator::Times,
        Rule::Divide => BinaryOperator::Divide,
        Rule::Power => BinaryOperator::Power,
        rule => unreachable!("{:?} is not an infix operator", rule),
      };
      Ok(Expr::BinaryOp {
        op,
        left: Box::new(left?),
        right: Box::new(right?),
      })
    })
    .parse(pairs)
}

fn constant(pair: Pair<Rule>) -> Result<Expr, CalcError> {
  let name = pair.as_str();
  if let Some(Symbol::Function(func)) = functions::lookup(name) {
    return Err(CalcError::Syntax(format!(
      "function '{}' must be followed by '('",
      func.name()
    )));
  }
  Ok(Expr::Constant(name.to_string()))
}

fn function_call(pair: Pair<Rule>) -> Result<Expr, CalcError> {
  let mut inner = pair.into_inner();
  let name = inner.next().map(|p| p.as_str()).unwrap_or_default();

  let func = match functions::lookup(name) {
    Some(Symbol::Function(func)) => func,
    Some(Symbol::Constant(_)) => {
      return Err(CalcError::Syntax(format!(
        "'{}' is a constant and cannot be called",
        name
      )));
    }
    None => return Err(CalcError::UnknownIdentifier(name.to_string())),
  };

  let args = inner.map(pair_to_expr).collect::<Result<Vec<_>, _>>()?;
  if args.len() != func.arity() {
    return Err(CalcError::ArityMismatch {
      name: func.name().to_string(),
      expected: func.arity(),
      found: args.len(),
    });
  }

  Ok(Expr::FunctionCall { func, args })
}
