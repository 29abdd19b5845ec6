use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::Fault;

/// The contents of a single register.
///
/// Registers start out as integers. `idiv` produces a float, so does integer
/// arithmetic that overflows `i64`, and once a float is involved every
/// result stays one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
  Int(i64),
  Float(f64),
}

impl Value {
  pub const ZERO: Value = Value::Int(0);

  pub fn as_f64(self) -> f64 {
    match self {
      Value::Int(i) => i as f64,
      Value::Float(f) => f,
    }
  }

  /// True division, always producing a float
  pub fn divide(self, divisor: Value) -> Result<Value, Fault> {
    let divisor = divisor.as_f64();
    if divisor == 0.0 {
      return Err(Fault::DivisionByZero);
    }
    Ok(Value::Float(self.as_f64() / divisor))
  }

  /// Numeric equality, so `3` and `3.0` compare equal
  pub fn equals(self, other: Value) -> bool {
    match (self, other) {
      (Value::Int(a), Value::Int(b)) => a == b,
      (a, b) => a.as_f64() == b.as_f64(),
    }
  }

  // an int result that doesn't fit in i64 is redone in floating point
  fn combine(
    self,
    rhs: Value,
    int: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
  ) -> Value {
    if let (Value::Int(a), Value::Int(b)) = (self, rhs) {
      if let Some(result) = int(a, b) {
        return Value::Int(result);
      }
    }
    Value::Float(float(self.as_f64(), rhs.as_f64()))
  }
}

impl Default for Value {
  fn default() -> Self {
    Self::ZERO
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Value::Int(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Value::Float(value)
  }
}

impl Add for Value {
  type Output = Value;

  fn add(self, rhs: Value) -> Value {
    self.combine(rhs, i64::checked_add, |a, b| a + b)
  }
}

impl Sub for Value {
  type Output = Value;

  fn sub(self, rhs: Value) -> Value {
    self.combine(rhs, i64::checked_sub, |a, b| a - b)
  }
}

impl Mul for Value {
  type Output = Value;

  fn mul(self, rhs: Value) -> Value {
    self.combine(rhs, i64::checked_mul, |a, b| a * b)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Value::Int(i) => write!(f, "{i}"),
      Value::Float(x) => write_float(f, x),
    }
  }
}

/// Shortest round-trip digits, positional for exponents in `-4..16` and
/// scientific (`1e-05`, `1.5e+20`) outside of it. Positional floats always
/// carry a `.` so they never read as ints.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
  if x.is_nan() {
    return f.write_str("nan");
  }
  if x.is_infinite() {
    return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
  }
  let scientific = format!("{x:e}");
  let (mantissa, exponent) = match scientific.split_once('e') {
    Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
    None => (scientific.as_str(), 0),
  };
  if (-4..16).contains(&exponent) {
    let positional = x.to_string();
    if positional.contains('.') {
      f.write_str(&positional)
    } else {
      write!(f, "{positional}.0")
    }
  } else {
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
  }
}
