//! Surface syntax rewrites applied before parsing.
//!
//! The grammar only knows `^` for exponentiation and has no postfix
//! operators, so `**` and `!` are rewritten here:
//!
//! * `2**3` becomes `2^3`
//! * `5!` becomes `factorial(5)`, `(2+3)!` becomes `factorial((2+3))`
//! * a call's argument list carries its callee: `sin(30)!` becomes
//!   `factorial(sin(30))`
//!
//! A `!` that follows anything else is left alone for the parser to reject.

use std::iter::Peekable;
use std::str::Chars;

use crate::CalcError;

/// Rewrite raw input into the canonical form the grammar accepts.
pub fn canonicalize(input: &str) -> String {
  let mut out = String::with_capacity(input.len() + 16);
  let mut chars = input.chars().peekable();

  // output offsets where each open group starts (callee included)
  let mut groups: Vec<usize> = Vec::new();
  // start of the identifier just written, if it may become a callee
  let mut callee: Option<usize> = None;
  // start of the number or group just written, if `!` may wrap it
  let mut operand: Option<usize> = None;

  while let Some(c) = chars.next() {
    match c {
      c if c.is_whitespace() => out.push(c),
      c if c.is_ascii_digit() || c == '.' => {
        let start = out.len();
        out.push(c);
        while let Some(&next) = chars.peek() {
          if !(next.is_ascii_digit() || next == '.') {
            break;
          }
          out.push(next);
          chars.next();
        }
        if let Some(exponent) = exponent_suffix(&chars) {
          for _ in exponent.chars() {
            chars.next();
          }
          out.push_str(&exponent);
        }
        operand = Some(start);
        callee = None;
      }
      c if c.is_ascii_alphabetic() || c == '_' => {
        let start = out.len();
        out.push(c);
        while let Some(&next) = chars.peek() {
          if !(next.is_ascii_alphanumeric() || next == '_') {
            break;
          }
          out.push(next);
          chars.next();
        }
        callee = Some(start);
        operand = None;
      }
      'π' => {
        callee = Some(out.len());
        operand = None;
        out.push_str("pi");
      }
      '(' => {
        groups.push(callee.unwrap_or(out.len()));
        out.push('(');
        callee = None;
        operand = None;
      }
      ')' => {
        out.push(')');
        operand = groups.pop();
        callee = None;
      }
      '!' => match operand {
        Some(start) => {
          out.insert_str(start, "factorial(");
          out.push(')');
        }
        None => {
          out.push('!');
          callee = None;
        }
      },
      '*' if chars.peek() == Some(&'*') => {
        chars.next();
        out.push('^');
        callee = None;
        operand = None;
      }
      other => {
        out.push(match other {
          '×' => '*',
          '÷' => '/',
          other => other,
        });
        callee = None;
        operand = None;
      }
    }
  }

  out
}

/// An exponent (`e5`, `E-3`, `e+20`) directly after a number's digits. A
/// lone `e` is left for the constant.
fn exponent_suffix(chars: &Peekable<Chars>) -> Option<String> {
  let mut ahead = chars.clone();
  let mut suffix = String::new();
  match ahead.next() {
    Some(c @ ('e' | 'E')) => suffix.push(c),
    _ => return None,
  }
  if let Some(&sign @ ('+' | '-')) = ahead.peek() {
    suffix.push(sign);
    ahead.next();
  }
  let digits: String = ahead.take_while(|c| c.is_ascii_digit()).collect();
  if digits.is_empty() {
    return None;
  }
  suffix.push_str(&digits);
  Some(suffix)
}

/// Upper bound on the depth of the tree parsing `input` builds: open
/// parentheses, prefix signs, binary operators and postfix `!` all nest.
/// A left-associative chain like `1+1+1` is as deep as it is long.
pub fn nesting_depth(input: &str) -> usize {
  // one entry per open parenthesis, plus the top level
  let mut levels: Vec<Level> = vec![Level::default()];
  let mut chars = input.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '(' => levels.push(Level::default()),
      ')' => close_level(&mut levels),
      ',' => {
        if let Some(level) = levels.last_mut() {
          level.finish_argument();
        }
      }
      '*' if chars.peek() == Some(&'*') => {
        chars.next();
        bump(&mut levels);
      }
      '+' | '-' | '*' | '/' | '×' | '÷' | '^' | '!' => bump(&mut levels),
      _ => {}
    }
  }

  // unclosed groups still count; the parenthesis check reports them
  while levels.len() > 1 {
    close_level(&mut levels);
  }
  levels.last().map(Level::depth).unwrap_or(0)
}

#[derive(Default)]
struct Level {
  /// operators seen in the current argument
  operators: usize,
  /// deepest closed group inside the current argument
  deepest_group: usize,
  /// deepest finished argument of a call
  deepest_argument: usize,
}

impl Level {
  fn depth(&self) -> usize {
    self
      .deepest_argument
      .max(self.operators + self.deepest_group)
  }

  fn finish_argument(&mut self) {
    self.deepest_argument = self.depth();
    self.operators = 0;
    self.deepest_group = 0;
  }
}

fn close_level(levels: &mut Vec<Level>) {
  if levels.len() < 2 {
    return;
  }
  if let Some(group) = levels.pop() {
    if let Some(parent) = levels.last_mut() {
      parent.deepest_group = parent.deepest_group.max(group.depth() + 1);
    }
  }
}

fn bump(levels: &mut [Level]) {
  if let Some(level) = levels.last_mut() {
    level.operators += 1;
  }
}

/// Reject input whose parentheses do not pair up.
pub fn check_parentheses(input: &str) -> Result<(), CalcError> {
  let mut open = 0usize;
  for (i, c) in input.chars().enumerate() {
    match c {
      '(' => open += 1,
      ')' if open == 0 => {
        return Err(CalcError::Syntax(format!(
          "unmatched ')' at position {}",
          i + 1
        )));
      }
      ')' => open -= 1,
      _ => {}
    }
  }
  if open > 0 {
    return Err(CalcError::Syntax(format!(
      "unbalanced parentheses: {} '(' not closed",
      open
    )));
  }
  Ok(())
}
