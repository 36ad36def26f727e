use pest::Parser;
use pest::error::{ErrorVariant, InputLocation};
use pest_derive::Parser;
use thiserror::Error;

pub mod evaluator;
pub mod functions;
pub mod preprocess;
pub mod session;
pub mod syntax;

pub use functions::trigonometric::AngleMode;
pub use session::{LastResult, Session, ShiftState, TrigKey};
pub use syntax::Expr;

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
  #[error("Syntax error: {0}")]
  Syntax(String),
  #[error("Unknown identifier: {0}")]
  UnknownIdentifier(String),
  #[error("{name} expects {expected} argument(s), got {found}")]
  ArityMismatch {
    name: String,
    expected: usize,
    found: usize,
  },
  #[error("Domain error: {0}")]
  Domain(String),
  #[error("Division by zero")]
  DivisionByZero,
  #[error("Overflow: {0}")]
  Overflow(String),
  #[error("Expression too complex: {0}")]
  Complexity(String),
}

impl CalcError {
  /// Stable name of the error kind, used in machine-readable output.
  pub fn kind(&self) -> &'static str {
    match self {
      CalcError::Syntax(_) => "SyntaxError",
      CalcError::UnknownIdentifier(_) => "UnknownIdentifierError",
      CalcError::ArityMismatch { .. } => "ArityMismatchError",
      CalcError::Domain(_) => "DomainError",
      CalcError::DivisionByZero => "DivisionByZeroError",
      CalcError::Overflow(_) => "OverflowError",
      CalcError::Complexity(_) => "ComplexityError",
    }
  }
}

impl From<pest::error::Error<Rule>> for CalcError {
  fn from(err: pest::error::Error<Rule>) -> Self {
    let position = match err.location {
      InputLocation::Pos(pos) => pos,
      InputLocation::Span((start, _)) => start,
    } + 1;
    let message = match err.variant {
      ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
        let mut expected: Vec<&str> = Vec::new();
        for rule in &positives {
          let name = describe_rule(rule);
          if !expected.contains(&name) {
            expected.push(name);
          }
        }
        format!("expected {} at position {}", expected.join(" or "), position)
      }
      ErrorVariant::ParsingError { .. } => {
        format!("unexpected input at position {}", position)
      }
      ErrorVariant::CustomError { message } => message,
    };
    CalcError::Syntax(message)
  }
}

fn describe_rule(rule: &Rule) -> &'static str {
  match rule {
    Rule::EOI => "end of input",
    Rule::Add
    | Rule::Subtract
    | Rule::Multiply
    | Rule::Divide
    | Rule::Power => "operator",
    _ => "operand",
  }
}

/// Bounds on input size, checked before any parsing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
  /// Maximum nesting depth as measured by [`preprocess::nesting_depth`].
  pub max_depth: usize,
  /// Maximum expression length in characters.
  pub max_length: usize,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      max_depth: 64,
      max_length: 4096,
    }
  }
}

/// Parse canonical text with the raw pest grammar.
pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  CalcParser::parse(Rule::Program, input).map_err(Box::new)
}

/// Preprocess and parse an expression into a tree without evaluating it.
pub fn parse_expression(input: &str, limits: Limits) -> Result<Expr, CalcError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(CalcError::Syntax("empty expression".into()));
  }

  let length = trimmed.chars().count();
  if length > limits.max_length {
    return Err(CalcError::Complexity(format!(
      "{} characters exceeds the limit of {}",
      length, limits.max_length
    )));
  }
  let depth = preprocess::nesting_depth(trimmed);
  if depth > limits.max_depth {
    return Err(CalcError::Complexity(format!(
      "nesting depth {} exceeds the limit of {}",
      depth, limits.max_depth
    )));
  }
  preprocess::check_parentheses(trimmed)?;

  let canonical = preprocess::canonicalize(trimmed);
  log::debug!("canonical form: {}", canonical);

  let mut pairs = parse(&canonical).map_err(|err| CalcError::from(*err))?;
  let program = pairs
    .next()
    .ok_or_else(|| CalcError::Syntax("empty expression".into()))?;
  let expr = syntax::pair_to_expr(program)?;
  log::debug!("parsed tree: {}", expr);
  Ok(expr)
}

/// Evaluate an expression under the given angle mode with default limits.
pub fn evaluate(expression: &str, angle: AngleMode) -> Result<f64, CalcError> {
  evaluate_with_limits(expression, angle, Limits::default())
}

pub fn evaluate_with_limits(
  expression: &str,
  angle: AngleMode,
  limits: Limits,
) -> Result<f64, CalcError> {
  let expr = parse_expression(expression, limits)?;
  let result = evaluator::evaluate_expr(&expr, angle);
  match &result {
    Ok(value) => log::debug!("{} = {} ({})", expression.trim(), value, angle),
    Err(err) => log::debug!("{} failed: {}", expression.trim(), err),
  }
  result
}

/// Canonical text of a result, as shown on the display and re-inserted by
/// the Ans and MR keys. Parsing it back yields the same value.
pub fn format_number(value: f64) -> String {
  if value == 0.0 {
    // also normalises -0
    "0".to_string()
  } else {
    value.to_string()
  }
}
