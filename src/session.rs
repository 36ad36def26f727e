//! Calculator session state: the pending expression, the angle mode, the
//! SHIFT latch, the memory register and the last result.
//!
//! Everything here is plain owned data, so independent sessions never
//! share state. The evaluator itself is pure; only [`Session::equals`]
//! feeds its result back into the session.

use std::fmt;
use std::str::FromStr;

use crate::{evaluate_with_limits, format_number, AngleMode, CalcError, Limits};

/// SHIFT key latch. Set by [`Session::toggle_shift`], consumed by the next
/// trig key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftState {
  #[default]
  Off,
  On,
}

impl ShiftState {
  pub fn toggle(self) -> Self {
    match self {
      ShiftState::Off => ShiftState::On,
      ShiftState::On => ShiftState::Off,
    }
  }

  pub fn is_on(self) -> bool {
    self == ShiftState::On
  }
}

impl fmt::Display for ShiftState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShiftState::Off => write!(f, "OFF"),
      ShiftState::On => write!(f, "ON"),
    }
  }
}

/// The trig keys that SHIFT redirects to their inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigKey {
  Sin,
  Cos,
  Tan,
}

impl TrigKey {
  pub fn direct(self) -> &'static str {
    match self {
      TrigKey::Sin => "sin",
      TrigKey::Cos => "cos",
      TrigKey::Tan => "tan",
    }
  }

  pub fn inverse(self) -> &'static str {
    match self {
      TrigKey::Sin => "asin",
      TrigKey::Cos => "acos",
      TrigKey::Tan => "atan",
    }
  }
}

impl FromStr for TrigKey {
  type Err = CalcError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "sin" => Ok(TrigKey::Sin),
      "cos" => Ok(TrigKey::Cos),
      "tan" => Ok(TrigKey::Tan),
      other => Err(CalcError::UnknownIdentifier(other.to_string())),
    }
  }
}

/// The most recent successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct LastResult {
  pub value: f64,
  pub text: String,
}

impl LastResult {
  pub fn new(value: f64) -> Self {
    Self {
      value,
      text: format_number(value),
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
  expression: String,
  angle_mode: AngleMode,
  shift: ShiftState,
  memory: f64,
  last: Option<LastResult>,
  limits: Limits,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
    Self {
      angle_mode,
      ..Self::default()
    }
  }

  pub fn with_limits(mut self, limits: Limits) -> Self {
    self.limits = limits;
    self
  }

  pub fn expression(&self) -> &str {
    &self.expression
  }

  pub fn angle_mode(&self) -> AngleMode {
    self.angle_mode
  }

  pub fn shift(&self) -> ShiftState {
    self.shift
  }

  pub fn last_result(&self) -> Option<&LastResult> {
    self.last.as_ref()
  }

  pub fn limits(&self) -> Limits {
    self.limits
  }

  /* ------------------------ expression entry ------------------------ */

  /// Append key text to the pending expression.
  pub fn push_str(&mut self, text: &str) {
    self.expression.push_str(text);
  }

  /// DEL: drop the last character of the pending expression.
  pub fn delete_last(&mut self) {
    self.expression.pop();
  }

  /// C: clear the pending expression only.
  pub fn clear_entry(&mut self) {
    self.expression.clear();
  }

  /// AC: clear the pending expression and the last result.
  pub fn all_clear(&mut self) {
    self.expression.clear();
    self.last = None;
  }

  /// Ans: append the last result. No-op when there is none.
  pub fn insert_ans(&mut self) -> bool {
    match &self.last {
      Some(last) => {
        let text = operand_text(last.value);
        self.expression.push_str(&text);
        true
      }
      None => false,
    }
  }

  /// +/-: negate the pending expression, or the last result when the
  /// expression is empty.
  pub fn toggle_sign(&mut self) {
    let current = if self.expression.trim().is_empty() {
      match &self.last {
        Some(last) => last.text.clone(),
        None => return,
      }
    } else {
      self.expression.trim().to_string()
    };
    self.expression = negate_text(&current);
  }

  /* ------------------------ modes ------------------------ */

  pub fn set_angle_mode(&mut self, mode: AngleMode) {
    self.angle_mode = mode;
  }

  pub fn toggle_angle_mode(&mut self) -> AngleMode {
    self.angle_mode = self.angle_mode.toggle();
    log::trace!("angle mode {}", self.angle_mode);
    self.angle_mode
  }

  pub fn toggle_shift(&mut self) -> ShiftState {
    self.shift = self.shift.toggle();
    log::trace!("shift {}", self.shift);
    self.shift
  }

  /// Consume the SHIFT latch for a trig key: the inverse name when SHIFT
  /// was on, the direct name otherwise. SHIFT is off afterwards either way.
  pub fn consume_shift(&mut self, key: TrigKey) -> (&'static str, ShiftState) {
    let name = if self.shift.is_on() {
      key.inverse()
    } else {
      key.direct()
    };
    self.shift = ShiftState::Off;
    log::trace!("trig key {:?} -> {}", key, name);
    (name, self.shift)
  }

  /// Trig key press: consume SHIFT and append `name(`.
  pub fn press_trig(&mut self, key: TrigKey) -> &'static str {
    let (name, _) = self.consume_shift(key);
    self.expression.push_str(name);
    self.expression.push('(');
    name
  }

  /* ------------------------ memory ------------------------ */

  pub fn memory_add(&mut self, value: f64) {
    self.memory += value;
  }

  pub fn memory_subtract(&mut self, value: f64) {
    self.memory -= value;
  }

  pub fn memory_clear(&mut self) {
    self.memory = 0.0;
  }

  pub fn memory_read(&self) -> f64 {
    self.memory
  }

  /// M+: add the last result to memory. Silently does nothing when there is
  /// no last result.
  pub fn memory_add_last(&mut self) -> bool {
    match self.last.as_ref().map(|last| last.value) {
      Some(value) => {
        self.memory_add(value);
        true
      }
      None => false,
    }
  }

  /// M-: subtract the last result from memory, like [`Self::memory_add_last`].
  pub fn memory_subtract_last(&mut self) -> bool {
    match self.last.as_ref().map(|last| last.value) {
      Some(value) => {
        self.memory_subtract(value);
        true
      }
      None => false,
    }
  }

  /// MR: append the memory register to the pending expression.
  pub fn recall_memory(&mut self) {
    let text = operand_text(self.memory);
    self.expression.push_str(&text);
  }

  /* ------------------------ evaluation ------------------------ */

  /// Evaluate the pending expression without changing the session.
  pub fn evaluate(&self) -> Result<f64, CalcError> {
    evaluate_with_limits(&self.expression, self.angle_mode, self.limits)
  }

  /// =: evaluate the pending expression. On success the result becomes the
  /// last result and replaces the pending expression; on failure nothing
  /// changes.
  pub fn equals(&mut self) -> Result<f64, CalcError> {
    let value = self.evaluate()?;
    let last = LastResult::new(value);
    self.expression = last.text.clone();
    self.last = Some(last);
    Ok(value)
  }
}

/// Text for a value inserted into an expression; negatives are wrapped so
/// they stay a single operand after whatever precedes them.
fn operand_text(value: f64) -> String {
  let text = format_number(value);
  if value < 0.0 {
    format!("({})", text)
  } else {
    text
  }
}

fn negate_text(text: &str) -> String {
  if let Some(rest) = text.strip_prefix('-') {
    if rest.parse::<f64>().is_ok() || is_single_group(rest) {
      return rest.to_string();
    }
  }
  if text.parse::<f64>().is_ok() || is_single_group(text) {
    format!("-{}", text)
  } else {
    format!("-({})", text)
  }
}

/// True when `text` is one parenthesized group from first to last char.
fn is_single_group(text: &str) -> bool {
  if !text.starts_with('(') || !text.ends_with(')') {
    return false;
  }
  let mut depth = 0usize;
  for (i, c) in text.char_indices() {
    match c {
      '(' => depth += 1,
      ')' => {
        depth = depth.saturating_sub(1);
        if depth == 0 && i != text.len() - 1 {
          return false;
        }
      }
      _ => {}
    }
  }
  depth == 0
}
