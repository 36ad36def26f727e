use super::*;
use fxcalc::{evaluate_with_limits, Limits};

mod domain {
  use super::*;

  #[test]
  fn square_root_of_negative() {
    assert!(matches!(deg("sqrt(-1)"), Err(CalcError::Domain(_))));
    assert_eq!(deg("sqrt(0)").unwrap(), 0.0);
  }

  #[test]
  fn logarithms_of_non_positive() {
    assert!(matches!(deg("ln(0)"), Err(CalcError::Domain(_))));
    assert!(matches!(deg("ln(-1)"), Err(CalcError::Domain(_))));
    assert!(matches!(deg("log10(-5)"), Err(CalcError::Domain(_))));
  }

  #[test]
  fn inverse_trig_outside_unit_interval() {
    assert!(matches!(deg("asin(2)"), Err(CalcError::Domain(_))));
    assert!(matches!(rad("acos(-1.5)"), Err(CalcError::Domain(_))));
    assert!(rad("asin(1)").is_ok());
  }

  #[test]
  fn factorial_of_negative_or_fraction() {
    assert!(matches!(deg("(-2)!"), Err(CalcError::Domain(_))));
    assert!(matches!(deg("2.5!"), Err(CalcError::Domain(_))));
    assert!(matches!(deg("factorial(-1)"), Err(CalcError::Domain(_))));
  }

  #[test]
  fn negative_base_with_fractional_exponent() {
    assert!(matches!(deg("(-8)^(1/3)"), Err(CalcError::Domain(_))));
    assert!(matches!(deg("pow(-2, 0.5)"), Err(CalcError::Domain(_))));
  }
}

mod division {
  use super::*;

  #[test]
  fn division_by_zero() {
    assert_eq!(deg("1/0"), Err(CalcError::DivisionByZero));
    assert_eq!(deg("0/0"), Err(CalcError::DivisionByZero));
    assert_eq!(deg("1/(2-2)"), Err(CalcError::DivisionByZero));
  }

  #[test]
  fn zero_to_a_negative_power() {
    assert_eq!(deg("0^-1"), Err(CalcError::DivisionByZero));
    assert_eq!(deg("pow(0, -2)"), Err(CalcError::DivisionByZero));
  }
}

mod overflow {
  use super::*;

  #[test]
  fn results_must_be_finite() {
    assert!(matches!(deg("exp(1000)"), Err(CalcError::Overflow(_))));
    assert!(matches!(deg("171!"), Err(CalcError::Overflow(_))));
    assert!(matches!(deg("10^400"), Err(CalcError::Overflow(_))));
    assert!(matches!(deg("-(10^308)*10"), Err(CalcError::Overflow(_))));
  }

  #[test]
  fn literals_past_the_largest_float() {
    let huge = format!("1{}", "0".repeat(400));
    assert!(matches!(deg(&huge), Err(CalcError::Overflow(_))));
    assert!(matches!(deg(&format!("-{huge}")), Err(CalcError::Overflow(_))));
    assert!(matches!(deg("1e400"), Err(CalcError::Overflow(_))));
  }
}

mod syntax {
  use super::*;

  #[test]
  fn empty_input() {
    assert!(matches!(deg(""), Err(CalcError::Syntax(_))));
    assert!(matches!(deg("   "), Err(CalcError::Syntax(_))));
  }

  #[test]
  fn unbalanced_parentheses() {
    assert!(matches!(deg("(2+3"), Err(CalcError::Syntax(_))));
    assert!(matches!(deg("2+3)"), Err(CalcError::Syntax(_))));
    assert!(matches!(deg("sin(30"), Err(CalcError::Syntax(_))));
  }

  #[test]
  fn missing_operands() {
    for input in ["2+", "*2", "2+*3", "()", "pow(2,)", "-"] {
      assert!(
        matches!(deg(input), Err(CalcError::Syntax(_))),
        "{input}: {:?}",
        deg(input)
      );
    }
  }

  #[test]
  fn no_implicit_multiplication() {
    assert!(matches!(deg("2pi"), Err(CalcError::Syntax(_))));
    assert!(matches!(deg("2(3)"), Err(CalcError::Syntax(_))));
    assert!(matches!(deg("2 3"), Err(CalcError::Syntax(_))));
  }

  #[test]
  fn bang_after_a_name_is_rejected() {
    assert!(matches!(deg("pi!"), Err(CalcError::Syntax(_))));
    assert!(matches!(deg("!5"), Err(CalcError::Syntax(_))));
  }

  #[test]
  fn function_names_need_arguments() {
    assert!(matches!(deg("sin"), Err(CalcError::Syntax(_))));
    assert!(matches!(deg("sqrt+1"), Err(CalcError::Syntax(_))));
  }

  #[test]
  fn constants_cannot_be_called() {
    assert!(matches!(deg("pi(2)"), Err(CalcError::Syntax(_))));
  }

  #[test]
  fn messages_name_what_was_expected() {
    let err = deg("2+").unwrap_err();
    assert!(err.to_string().starts_with("Syntax error: expected operand"));
    let err = deg("(2+3").unwrap_err();
    assert!(err.to_string().contains("not closed"));
  }
}

mod identifiers {
  use super::*;

  #[test]
  fn unknown_function() {
    assert_eq!(
      deg("foo(2)"),
      Err(CalcError::UnknownIdentifier("foo".into()))
    );
  }

  #[test]
  fn unknown_constant() {
    assert_eq!(deg("x+1"), Err(CalcError::UnknownIdentifier("x".into())));
    assert_eq!(deg("PI"), Err(CalcError::UnknownIdentifier("PI".into())));
  }

  #[test]
  fn wrong_argument_count() {
    assert_eq!(
      deg("pow(2)"),
      Err(CalcError::ArityMismatch {
        name: "pow".into(),
        expected: 2,
        found: 1,
      })
    );
    assert_eq!(
      deg("sqrt(1, 2)"),
      Err(CalcError::ArityMismatch {
        name: "sqrt".into(),
        expected: 1,
        found: 2,
      })
    );
    assert!(matches!(
      deg("sin()"),
      Err(CalcError::ArityMismatch { found: 0, .. })
    ));
  }
}

mod complexity {
  use super::*;

  #[test]
  fn deep_parentheses() {
    let input = format!("{}1{}", "(".repeat(65), ")".repeat(65));
    assert!(matches!(deg(&input), Err(CalcError::Complexity(_))));
    let input = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(deg(&input).unwrap(), 1.0);
  }

  #[test]
  fn long_sign_runs() {
    let input = format!("{}1", "-".repeat(100));
    assert!(matches!(deg(&input), Err(CalcError::Complexity(_))));
  }

  #[test]
  fn long_input() {
    let input = "1+".repeat(3000) + "1";
    assert!(matches!(deg(&input), Err(CalcError::Complexity(_))));
  }

  #[test]
  fn long_operator_chains() {
    let within = vec!["1"; 60].join("+");
    assert_eq!(deg(&within).unwrap(), 60.0);

    // under the length limit, but as deep as it is long once parsed
    let chain = vec!["1"; 2000].join("+");
    let result = std::thread::Builder::new()
      .stack_size(2 * 1024 * 1024)
      .spawn(move || deg(&chain))
      .unwrap()
      .join()
      .unwrap();
    assert!(matches!(result, Err(CalcError::Complexity(_))));
  }

  #[test]
  fn custom_limits() {
    let limits = Limits {
      max_depth: 2,
      max_length: 16,
    };
    let angle = AngleMode::Degrees;
    assert_eq!(evaluate_with_limits("((1))", angle, limits), Ok(1.0));
    assert!(matches!(
      evaluate_with_limits("(((1)))", angle, limits),
      Err(CalcError::Complexity(_))
    ));
    assert!(matches!(
      evaluate_with_limits("1+1+1+1+1+1+1+1+1", angle, limits),
      Err(CalcError::Complexity(_))
    ));
  }
}

mod reporting {
  use super::*;

  #[test]
  fn first_failure_wins() {
    assert!(matches!(deg("sqrt(-1) + 1/0"), Err(CalcError::Domain(_))));
    assert_eq!(deg("1/0 + sqrt(-1)"), Err(CalcError::DivisionByZero));
  }

  #[test]
  fn kinds_and_messages() {
    let err = deg("1/0").unwrap_err();
    assert_eq!(err.kind(), "DivisionByZeroError");
    assert_eq!(err.to_string(), "Division by zero");

    let err = deg("pow(1)").unwrap_err();
    assert_eq!(err.kind(), "ArityMismatchError");
    assert_eq!(err.to_string(), "pow expects 2 argument(s), got 1");

    assert_eq!(deg("(1").unwrap_err().kind(), "SyntaxError");
    assert_eq!(deg("y").unwrap_err().kind(), "UnknownIdentifierError");
    assert_eq!(deg("sqrt(-4)").unwrap_err().kind(), "DomainError");
  }
}
