use crate::error::Fault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
  /// Copies a literal or another register into a register.
  ///
  /// | Operation | Semantics        | Assembly      |
  /// |-----------|------------------|---------------|
  /// | Move      | `r[d] ← v`       | `mov v d`     |
  /// | Move      | `r[d] ← r[s]`    | `mov s d`     |
  Mov,

  /// | Operation | Semantics            | Assembly  |
  /// |-----------|----------------------|-----------|
  /// | Add       | `r[d] ← r[d] + r[s]` | `add s d` |
  Add,

  /// | Operation | Semantics            | Assembly  |
  /// |-----------|----------------------|-----------|
  /// | Subtract  | `r[d] ← r[d] − r[s]` | `sub s d` |
  Sub,

  /// | Operation | Semantics         | Assembly |
  /// |-----------|-------------------|----------|
  /// | Increment | `r[d] ← r[d] + 1` | `inc d`  |
  Inc,

  /// | Operation | Semantics         | Assembly |
  /// |-----------|-------------------|----------|
  /// | Decrement | `r[d] ← r[d] − 1` | `dec d`  |
  Dec,

  /// | Operation | Semantics            | Assembly   |
  /// |-----------|----------------------|------------|
  /// | Multiply  | `r[d] ← r[d] × r[s]` | `imul s d` |
  Imul,

  /// Despite the name this is true division, the result is always a float.
  ///
  /// | Operation | Semantics            | Assembly   |
  /// |-----------|----------------------|------------|
  /// | Divide    | `r[d] ← r[d] ÷ r[s]` | `idiv s d` |
  Idiv,

  /// Continues execution on the line after `label:`.
  ///
  /// | Operation | Semantics         | Assembly    |
  /// |-----------|-------------------|-------------|
  /// | Jump      | `pc ← labels[l]`  | `jmp l`     |
  Jmp,

  /// Pauses for a number of seconds once the current line is done.
  ///
  /// | Operation | Semantics            | Assembly |
  /// |-----------|----------------------|----------|
  /// | Halt      | `sleep(v)`           | `hlt v`  |
  /// | Halt      | `sleep(r[s])`        | `hlt s`  |
  Hlt,

  /// | Operation | Semantics        | Assembly |
  /// |-----------|------------------|----------|
  /// | Print     | `out ← v`        | `prnt v` |
  /// | Print     | `out ← r[s]`     | `prnt s` |
  Prnt,

  /// Sets the compare flag for a following `je` or `jne`.
  ///
  /// | Operation | Semantics              | Assembly  |
  /// |-----------|------------------------|-----------|
  /// | Compare   | `flag ← r[s] == r[t]`  | `cmp s t` |
  Cmp,

  /// | Operation     | Semantics                  | Assembly |
  /// |---------------|----------------------------|----------|
  /// | Jump if equal | `if flag : pc ← labels[l]` | `je l`   |
  Je,

  /// | Operation         | Semantics                   | Assembly |
  /// |-------------------|-----------------------------|----------|
  /// | Jump if not equal | `if !flag : pc ← labels[l]` | `jne l`  |
  Jne,
}

impl Opcode {
  pub fn from_keyword(keyword: &str) -> Option<Self> {
    let op = match keyword {
      "mov" => Self::Mov,
      "add" => Self::Add,
      "sub" => Self::Sub,
      "inc" => Self::Inc,
      "dec" => Self::Dec,
      "imul" => Self::Imul,
      "idiv" => Self::Idiv,
      "jmp" => Self::Jmp,
      "hlt" => Self::Hlt,
      "prnt" => Self::Prnt,
      "cmp" => Self::Cmp,
      "je" => Self::Je,
      "jne" => Self::Jne,
      _ => return None,
    };
    Some(op)
  }

  pub fn keyword(self) -> &'static str {
    match self {
      Self::Mov => "mov",
      Self::Add => "add",
      Self::Sub => "sub",
      Self::Inc => "inc",
      Self::Dec => "dec",
      Self::Imul => "imul",
      Self::Idiv => "idiv",
      Self::Jmp => "jmp",
      Self::Hlt => "hlt",
      Self::Prnt => "prnt",
      Self::Cmp => "cmp",
      Self::Je => "je",
      Self::Jne => "jne",
    }
  }

  /// The number of operands the instruction reads
  pub fn arity(self) -> usize {
    match self {
      Self::Mov
      | Self::Add
      | Self::Sub
      | Self::Imul
      | Self::Idiv
      | Self::Cmp => 2,
      Self::Inc
      | Self::Dec
      | Self::Jmp
      | Self::Hlt
      | Self::Prnt
      | Self::Je
      | Self::Jne => 1,
    }
  }
}

/// A decoded instruction, operands are still raw tokens since their meaning
/// (literal or register) is only settled when the instruction runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
  Mov { src: &'a str, dst: &'a str },
  Add { src: &'a str, dst: &'a str },
  Sub { src: &'a str, dst: &'a str },
  Inc { dst: &'a str },
  Dec { dst: &'a str },
  Imul { src: &'a str, dst: &'a str },
  Idiv { src: &'a str, dst: &'a str },
  Jmp { label: &'a str },
  Hlt { arg: &'a str },
  Prnt { arg: &'a str },
  Cmp { lhs: &'a str, rhs: &'a str },
  Je { label: &'a str },
  Jne { label: &'a str },
}

impl<'a> Instruction<'a> {
  /// Decodes a keyword and its operands.
  ///
  /// Unknown keywords decode to `None`, surplus operands are ignored.
  pub fn decode(keyword: &str, args: &[&'a str]) -> Result<Option<Self>, Fault> {
    let Some(op) = Opcode::from_keyword(keyword) else {
      return Ok(None);
    };
    if args.len() < op.arity() {
      return Err(Fault::MissingOperand(op.keyword()));
    }
    let instruction = match op {
      Opcode::Mov => Self::Mov { src: args[0], dst: args[1] },
      Opcode::Add => Self::Add { src: args[0], dst: args[1] },
      Opcode::Sub => Self::Sub { src: args[0], dst: args[1] },
      Opcode::Inc => Self::Inc { dst: args[0] },
      Opcode::Dec => Self::Dec { dst: args[0] },
      Opcode::Imul => Self::Imul { src: args[0], dst: args[1] },
      Opcode::Idiv => Self::Idiv { src: args[0], dst: args[1] },
      Opcode::Jmp => Self::Jmp { label: args[0] },
      Opcode::Hlt => Self::Hlt { arg: args[0] },
      Opcode::Prnt => Self::Prnt { arg: args[0] },
      Opcode::Cmp => Self::Cmp { lhs: args[0], rhs: args[1] },
      Opcode::Je => Self::Je { label: args[0] },
      Opcode::Jne => Self::Jne { label: args[0] },
    };
    Ok(Some(instruction))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keywords_round_trip() {
    for kw in [
      "mov", "add", "sub", "inc", "dec", "imul", "idiv", "jmp", "hlt", "prnt",
      "cmp", "je", "jne",
    ] {
      let op = Opcode::from_keyword(kw).unwrap();
      assert_eq!(op.keyword(), kw);
    }
  }

  #[test]
  fn unknown_keyword() {
    assert_eq!(Opcode::from_keyword("jz"), None);
    assert_eq!(Opcode::from_keyword("MOV"), None);
    assert_eq!(Instruction::decode("nop", &["a"]), Ok(None));
  }

  #[test]
  fn decode_two_operands() {
    assert_eq!(
      Instruction::decode("mov", &["5", "a"]),
      Ok(Some(Instruction::Mov { src: "5", dst: "a" }))
    );
  }

  #[test]
  fn decode_conditional() {
    assert_eq!(
      Instruction::decode("cmp", &["a", "b"]),
      Ok(Some(Instruction::Cmp { lhs: "a", rhs: "b" }))
    );
    assert_eq!(
      Instruction::decode("jne", &["top"]),
      Ok(Some(Instruction::Jne { label: "top" }))
    );
    assert_eq!(
      Instruction::decode("je", &[]),
      Err(Fault::MissingOperand("je"))
    );
  }

  #[test]
  fn decode_ignores_surplus() {
    assert_eq!(
      Instruction::decode("inc", &["a", "b"]),
      Ok(Some(Instruction::Inc { dst: "a" }))
    );
  }

  #[test]
  fn decode_missing_operand() {
    assert_eq!(
      Instruction::decode("add", &["a"]),
      Err(Fault::MissingOperand("add"))
    );
    assert_eq!(
      Instruction::decode("prnt", &[]),
      Err(Fault::MissingOperand("prnt"))
    );
  }
}
