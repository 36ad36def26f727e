//! The closed catalog of names an expression may use: two constants and a
//! fixed set of real functions with declared arities.

pub mod elementary;
pub mod trigonometric;

use crate::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
  Pi,
  E,
}

impl Constant {
  pub fn name(self) -> &'static str {
    match self {
      Constant::Pi => "pi",
      Constant::E => "e",
    }
  }

  pub fn value(self) -> f64 {
    match self {
      Constant::Pi => std::f64::consts::PI,
      Constant::E => std::f64::consts::E,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
  Sin,
  Cos,
  Tan,
  Asin,
  Acos,
  Atan,
  Sinh,
  Cosh,
  Tanh,
  Ln,
  Log10,
  Sqrt,
  Exp,
  Abs,
  Factorial,
  Rad,
  Deg,
  Pow,
}

impl Function {
  pub const ALL: [Function; 18] = [
    Function::Sin,
    Function::Cos,
    Function::Tan,
    Function::Asin,
    Function::Acos,
    Function::Atan,
    Function::Sinh,
    Function::Cosh,
    Function::Tanh,
    Function::Ln,
    Function::Log10,
    Function::Sqrt,
    Function::Exp,
    Function::Abs,
    Function::Factorial,
    Function::Rad,
    Function::Deg,
    Function::Pow,
  ];

  /// Canonical name, as written in canonical text and error messages.
  pub fn name(self) -> &'static str {
    match self {
      Function::Sin => "sin",
      Function::Cos => "cos",
      Function::Tan => "tan",
      Function::Asin => "asin",
      Function::Acos => "acos",
      Function::Atan => "atan",
      Function::Sinh => "sinh",
      Function::Cosh => "cosh",
      Function::Tanh => "tanh",
      Function::Ln => "ln",
      Function::Log10 => "log10",
      Function::Sqrt => "sqrt",
      Function::Exp => "exp",
      Function::Abs => "abs",
      Function::Factorial => "factorial",
      Function::Rad => "rad",
      Function::Deg => "deg",
      Function::Pow => "pow",
    }
  }

  pub fn arity(self) -> usize {
    match self {
      Function::Pow => 2,
      _ => 1,
    }
  }

  /// Run the numeric kernel. Trigonometric kernels work in radians; angle
  /// conversion is the caller's job.
  pub fn apply(self, args: &[f64]) -> Result<f64, CalcError> {
    use elementary::*;

    match (self, args) {
      (Function::Sin, [x]) => Ok(x.sin()),
      (Function::Cos, [x]) => Ok(x.cos()),
      (Function::Tan, [x]) => Ok(x.tan()),
      (Function::Asin, [x]) => asin(*x),
      (Function::Acos, [x]) => acos(*x),
      (Function::Atan, [x]) => Ok(x.atan()),
      (Function::Sinh, [x]) => Ok(x.sinh()),
      (Function::Cosh, [x]) => Ok(x.cosh()),
      (Function::Tanh, [x]) => Ok(x.tanh()),
      (Function::Ln, [x]) => ln(*x),
      (Function::Log10, [x]) => log10(*x),
      (Function::Sqrt, [x]) => sqrt(*x),
      (Function::Exp, [x]) => Ok(x.exp()),
      (Function::Abs, [x]) => Ok(x.abs()),
      (Function::Factorial, [x]) => factorial(*x),
      (Function::Rad, [x]) => Ok(x.to_radians()),
      (Function::Deg, [x]) => Ok(x.to_degrees()),
      (Function::Pow, [base, exponent]) => power(*base, *exponent),
      _ => Err(CalcError::ArityMismatch {
        name: self.name().to_string(),
        expected: self.arity(),
        found: args.len(),
      }),
    }
  }
}

/// What a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
  Constant(Constant),
  Function(Function),
}

/// Resolve a name against the catalog, including the aliases the keypad
/// labels use (`log` is the natural logarithm).
pub fn lookup(name: &str) -> Option<Symbol> {
  let symbol = match name {
    "pi" => Symbol::Constant(Constant::Pi),
    "e" => Symbol::Constant(Constant::E),
    "log" => Symbol::Function(Function::Ln),
    "radians" => Symbol::Function(Function::Rad),
    "degrees" => Symbol::Function(Function::Deg),
    "arcsin" => Symbol::Function(Function::Asin),
    "arccos" => Symbol::Function(Function::Acos),
    "arctan" => Symbol::Function(Function::Atan),
    _ => {
      return Function::ALL
        .iter()
        .copied()
        .find(|f| f.name() == name)
        .map(Symbol::Function);
    }
  };
  Some(symbol)
}
