use crate::CalcError;

/// Largest n whose factorial is finite in f64.
const MAX_FACTORIAL: f64 = 170.0;

/// sqrt(x) - Square root, defined for x >= 0
pub fn sqrt(x: f64) -> Result<f64, CalcError> {
  if x < 0.0 {
    return Err(CalcError::Domain(
      "sqrt: argument must be non-negative".into(),
    ));
  }
  Ok(x.sqrt())
}

/// ln(x) - Natural logarithm, defined for x > 0
pub fn ln(x: f64) -> Result<f64, CalcError> {
  if x <= 0.0 {
    return Err(CalcError::Domain("ln: argument must be positive".into()));
  }
  Ok(x.ln())
}

/// log10(x) - Base 10 logarithm, defined for x > 0
pub fn log10(x: f64) -> Result<f64, CalcError> {
  if x <= 0.0 {
    return Err(CalcError::Domain("log10: argument must be positive".into()));
  }
  Ok(x.log10())
}

/// asin(x) - Inverse sine in radians, defined on [-1, 1]
pub fn asin(x: f64) -> Result<f64, CalcError> {
  if !(-1.0..=1.0).contains(&x) {
    return Err(CalcError::Domain(
      "asin: argument must be between -1 and 1".into(),
    ));
  }
  Ok(x.asin())
}

/// acos(x) - Inverse cosine in radians, defined on [-1, 1]
pub fn acos(x: f64) -> Result<f64, CalcError> {
  if !(-1.0..=1.0).contains(&x) {
    return Err(CalcError::Domain(
      "acos: argument must be between -1 and 1".into(),
    ));
  }
  Ok(x.acos())
}

/// factorial(n) - n!, defined for non-negative integers
pub fn factorial(n: f64) -> Result<f64, CalcError> {
  if n < 0.0 {
    return Err(CalcError::Domain(
      "factorial: argument must be non-negative".into(),
    ));
  }
  if n.fract() != 0.0 {
    return Err(CalcError::Domain(
      "factorial: argument must be an integer".into(),
    ));
  }
  if n > MAX_FACTORIAL {
    return Err(CalcError::Overflow(format!(
      "factorial: {}! is too large",
      n
    )));
  }

  let mut result = 1.0_f64;
  for i in 2..=(n as u32) {
    result *= i as f64;
  }
  Ok(result)
}

/// pow(x, y) / x^y - Real power
pub fn power(base: f64, exponent: f64) -> Result<f64, CalcError> {
  if base == 0.0 && exponent < 0.0 {
    return Err(CalcError::DivisionByZero);
  }
  if base < 0.0 && exponent.fract() != 0.0 {
    return Err(CalcError::Domain(
      "power: negative base with a non-integer exponent has no real value"
        .into(),
    ));
  }
  Ok(base.powf(exponent))
}

/// x / y
pub fn divide(dividend: f64, divisor: f64) -> Result<f64, CalcError> {
  if divisor == 0.0 {
    return Err(CalcError::DivisionByZero);
  }
  Ok(dividend / divisor)
}

/// Reject NaN and infinities; `what` names the operation for the message.
pub fn finite(what: &str, value: f64) -> Result<f64, CalcError> {
  if value.is_nan() {
    Err(CalcError::Domain(format!("{}: result is undefined", what)))
  } else if value.is_infinite() {
    Err(CalcError::Overflow(format!("{}: result is infinite", what)))
  } else {
    Ok(value)
  }
}
