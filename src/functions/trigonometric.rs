//! Angle unit policy for the trigonometric functions.
//!
//! Kernels always work in radians. In degree mode the arguments of
//! sin/cos/tan are converted before the kernel runs and the results of
//! asin/acos/atan are converted after it; every other function ignores the
//! mode.

use std::fmt;
use std::str::FromStr;

use super::Function;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
  #[default]
  Degrees,
  Radians,
}

impl AngleMode {
  pub fn toggle(self) -> Self {
    match self {
      AngleMode::Degrees => AngleMode::Radians,
      AngleMode::Radians => AngleMode::Degrees,
    }
  }

  /// Convert the argument of a forward trigonometric function into radians.
  pub fn apply_forward(self, func: Function, x: f64) -> f64 {
    match (self, func) {
      (AngleMode::Degrees, Function::Sin | Function::Cos | Function::Tan) => {
        x.to_radians()
      }
      _ => x,
    }
  }

  /// Convert the radian result of an inverse trigonometric function into
  /// the active unit.
  pub fn apply_inverse(self, func: Function, raw: f64) -> f64 {
    match (self, func) {
      (
        AngleMode::Degrees,
        Function::Asin | Function::Acos | Function::Atan,
      ) => raw.to_degrees(),
      _ => raw,
    }
  }
}

impl fmt::Display for AngleMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AngleMode::Degrees => write!(f, "DEG"),
      AngleMode::Radians => write!(f, "RAD"),
    }
  }
}

impl FromStr for AngleMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
      "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
      other => Err(format!(
        "unknown angle mode '{}', expected 'deg' or 'rad'",
        other
      )),
    }
  }
}
