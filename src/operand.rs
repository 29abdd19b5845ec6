//! Classification of raw operand tokens

use crate::error::Fault;

/// Whether `token` reads as an integer literal: a single optional `+` or `-`
/// followed by at least one ASCII digit and nothing else.
pub fn is_int(token: &str) -> bool {
  let digits = token
    .strip_prefix(['+', '-'])
    .unwrap_or(token);
  !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Converts an integer literal, failing on anything `i64` can't hold.
pub fn parse_int(token: &str) -> Result<i64, Fault> {
  if !is_int(token) {
    return Err(Fault::Conversion(token.to_owned()));
  }
  token
    .parse()
    .map_err(|_| Fault::Conversion(token.to_owned()))
}

/// Parses a delay given in (possibly fractional) seconds.
pub fn parse_float(token: &str) -> Option<f64> {
  token.parse().ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn int_literals() {
    assert!(is_int("0"));
    assert!(is_int("42"));
    assert!(is_int("-7"));
    assert!(is_int("+007"));
  }

  #[test]
  fn not_int_literals() {
    assert!(!is_int(""));
    assert!(!is_int("-"));
    assert!(!is_int("+"));
    assert!(!is_int("--1"));
    assert!(!is_int("+-1"));
    assert!(!is_int("1.5"));
    assert!(!is_int("a"));
    assert!(!is_int("1a"));
    assert!(!is_int(" 1"));
  }

  #[test]
  fn parse_int_values() {
    assert_eq!(parse_int("+007"), Ok(7));
    assert_eq!(parse_int("-12"), Ok(-12));
  }

  #[test]
  fn parse_int_overflow() {
    let token = "99999999999999999999";
    assert_eq!(parse_int(token), Err(Fault::Conversion(token.into())));
  }

  #[test]
  fn parse_int_rejects_registers() {
    assert_eq!(parse_int("x"), Err(Fault::Conversion("x".into())));
  }

  #[test]
  fn float_literals() {
    assert_eq!(parse_float("0.1"), Some(0.1));
    assert_eq!(parse_float("2"), Some(2.0));
    assert_eq!(parse_float("1e-3"), Some(0.001));
    assert_eq!(parse_float("a"), None);
  }
}
