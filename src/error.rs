use std::io;

/// A recoverable problem with a single instruction.
///
/// The `Display` output of a fault is the exact diagnostic line the machine
/// writes before moving on to the next line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
  #[error("cannot find register {0}")]
  InvalidRegister(String),

  #[error("cannot convert {0} to int")]
  Conversion(String),

  #[error("cannot find label {0}")]
  UndefinedLabel(String),

  #[error("missing operand for {0}")]
  MissingOperand(&'static str),

  #[error("cannot divide by zero")]
  DivisionByZero,
}

/// An error that stops the machine
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("failed to write program output")]
  Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
