use super::*;
use std::f64::consts::{FRAC_PI_2, PI};

mod degrees {
  use super::*;

  #[test]
  fn forward_functions_take_degrees() {
    assert_close(deg("sin(30)"), 0.5);
    assert_close(deg("cos(60)"), 0.5);
    assert_close(deg("tan(45)"), 1.0);
    assert_close(deg("sin(90)"), 1.0);
  }

  #[test]
  fn inverse_functions_return_degrees() {
    assert_close(deg("asin(0.5)"), 30.0);
    assert_close(deg("acos(0)"), 90.0);
    assert_close(deg("atan(1)"), 45.0);
  }

  #[test]
  fn round_trips() {
    for angle in [10.0, 30.0, 45.0, 60.0, 80.0] {
      assert_close(deg(&format!("asin(sin({}))", angle)), angle);
      assert_close(deg(&format!("atan(tan({}))", angle)), angle);
    }
  }
}

mod radians {
  use super::*;

  #[test]
  fn forward_functions_take_radians() {
    assert_close(rad("sin(pi/6)"), 0.5);
    assert_close(rad("cos(pi)"), -1.0);
    assert_close(rad("sin(30)"), 30f64.sin());
  }

  #[test]
  fn inverse_functions_return_radians() {
    assert_close(rad("asin(1)"), FRAC_PI_2);
    assert_close(rad("acos(-1)"), PI);
  }

  #[test]
  fn explicit_conversions_compose() {
    assert_close(rad("sin(rad(30))"), 0.5);
    assert_close(rad("deg(asin(0.5))"), 30.0);
  }
}

mod mode_independence {
  use super::*;

  #[test]
  fn only_trig_calls_depend_on_the_mode() {
    for expression in ["sinh(1)", "sqrt(2)", "exp(1)", "ln(10)", "2^0.5"] {
      assert_eq!(deg(expression), rad(expression), "{}", expression);
    }
  }

  #[test]
  fn the_mode_changes_trig_results() {
    assert_ne!(deg("sin(30)"), rad("sin(30)"));
  }
}
