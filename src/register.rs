use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::Fault;
use crate::value::Value;

/// One of the eight named registers, `a` through `h`
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
  A = 0,
  B,
  C,
  D,
  E,
  F,
  G,
  H,
}

impl Register {
  pub const COUNT: usize = 8;

  pub const ALL: [Register; Self::COUNT] = [
    Register::A,
    Register::B,
    Register::C,
    Register::D,
    Register::E,
    Register::F,
    Register::G,
    Register::H,
  ];

  /// Looks up a register by its name, names are case sensitive.
  pub fn parse(name: &str) -> Result<Self, Fault> {
    Self::lookup(name).ok_or_else(|| Fault::InvalidRegister(name.to_owned()))
  }

  pub fn lookup(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|r| r.name() == name)
  }

  pub fn name(self) -> &'static str {
    match self {
      Register::A => "a",
      Register::B => "b",
      Register::C => "c",
      Register::D => "d",
      Register::E => "e",
      Register::F => "f",
      Register::G => "g",
      Register::H => "h",
    }
  }
}

impl fmt::Display for Register {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// The register store, every register starts at integer zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterFile {
  values: [Value; Register::COUNT],
}

impl RegisterFile {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Register, Value)> + '_ {
    Register::ALL.into_iter().zip(self.values.iter().copied())
  }
}

impl Index<Register> for RegisterFile {
  type Output = Value;

  fn index(&self, register: Register) -> &Value {
    &self.values[register as usize]
  }
}

impl IndexMut<Register> for RegisterFile {
  fn index_mut(&mut self, register: Register) -> &mut Value {
    &mut self.values[register as usize]
  }
}
