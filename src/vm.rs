use std::io::Write;
use std::mem;
use std::thread;
use std::time::Duration;

use crate::error::{Fault, Result};
use crate::opcode::Instruction;
use crate::operand;
use crate::region::{Line, Region};
use crate::register::{Register, RegisterFile};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
  Active,
  Halted,
}

/// Something that can block the machine for a while, used by `hlt`
pub trait Sleeper {
  fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
  fn sleep(&mut self, duration: Duration) {
    thread::sleep(duration);
  }
}

/// How a call to [`Vm::run`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
  /// Ran past the last line
  Completed { steps: u64 },
  /// Stopped early by the step limit
  StepLimit { steps: u64 },
}

/// The interpreter state: registers, the instruction counter and a pending
/// delay.
///
/// A `Vm` only ever holds mutable state, the program it runs is passed in on
/// every call and never changes.
#[derive(Debug)]
pub struct Vm<S = ThreadSleeper> {
  // index of the next line to fetch
  ip: usize,
  registers: RegisterFile,
  // seconds to sleep once the current line is done
  halt: f64,
  // result of the last `cmp`
  flag: bool,
  state: State,
  steps: u64,
  step_limit: Option<u64>,
  sleeper: S,
}

impl Vm {
  /// Create a new machine with zeroed registers
  pub fn new() -> Self {
    Self::with_sleeper(ThreadSleeper)
  }
}

impl Default for Vm {
  fn default() -> Self {
    Self::new()
  }
}

impl<S> Vm<S>
where
  S: Sleeper,
{
  pub fn with_sleeper(sleeper: S) -> Self {
    Self {
      ip: 0,
      registers: RegisterFile::new(),
      halt: 0.0,
      flag: false,
      state: State::Active,
      steps: 0,
      step_limit: None,
      sleeper,
    }
  }

  /// Stop [`Vm::run`] after `limit` lines have been executed
  pub fn with_step_limit(mut self, limit: u64) -> Self {
    self.step_limit = Some(limit);
    self
  }

  pub fn registers(&self) -> &RegisterFile {
    &self.registers
  }

  pub fn ip(&self) -> usize {
    self.ip
  }

  /// Whether the last `cmp` found its registers equal
  pub fn flag(&self) -> bool {
    self.flag
  }

  /// Number of lines fetched so far, labels and blanks included
  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn is_halted(&self) -> bool {
    self.state == State::Halted
  }

  pub fn sleeper(&self) -> &S {
    &self.sleeper
  }

  /// Execute a single line, returning whether there is anything left to run.
  ///
  /// Printed values and diagnostics for faulty instructions are written to
  /// `out`, only a failure to write there is an error.
  pub fn step<R, W>(&mut self, region: &R, out: &mut W) -> Result<bool>
  where
    R: Region,
    W: Write,
  {
    if self.state == State::Halted {
      return Ok(false);
    }
    let Some(line) = region.lines().get(self.ip) else {
      self.state = State::Halted;
      return Ok(false);
    };
    log::trace!("{:>4}: {line}", self.ip);

    if let Line::Code { keyword, args } = Line::parse(line) {
      let mut task = Task::new(self, region);
      match task.run(keyword, &args) {
        Ok(Effect::Print(value)) => writeln!(out, "{value}")?,
        Ok(Effect::None) => {}
        Err(fault) => writeln!(out, "{fault}")?,
      }
      self.pause();
    }

    // after a `jmp` this moves past the label line
    self.ip += 1;
    self.steps += 1;
    if self.ip >= region.lines().len() {
      self.state = State::Halted;
    }
    Ok(self.state == State::Active)
  }

  /// Run until the instruction counter passes the last line, or the step
  /// limit is reached.
  pub fn run<R, W>(&mut self, region: &R, out: &mut W) -> Result<Exit>
  where
    R: Region,
    W: Write,
  {
    while self.state == State::Active && self.ip < region.lines().len() {
      if self.step_limit.is_some_and(|limit| self.steps >= limit) {
        return Ok(Exit::StepLimit { steps: self.steps });
      }
      self.step(region, out)?;
    }
    self.state = State::Halted;
    Ok(Exit::Completed { steps: self.steps })
  }

  fn pause(&mut self) {
    let seconds = mem::take(&mut self.halt);
    if seconds == 0.0 {
      return;
    }
    match Duration::try_from_secs_f64(seconds) {
      Ok(duration) => self.sleeper.sleep(duration),
      Err(err) => log::warn!("ignoring delay of {seconds} seconds: {err}"),
    }
  }
}

/// What an instruction wants done besides mutating the machine
#[derive(Debug, Clone, Copy, PartialEq)]
enum Effect {
  None,
  Print(Value),
}

struct Task<'vm, 'region, R, S> {
  vm: &'vm mut Vm<S>,
  region: &'region R,
}

impl<'vm, 'region, R, S> Task<'vm, 'region, R, S>
where
  R: Region,
{
  fn new(vm: &'vm mut Vm<S>, region: &'region R) -> Self {
    Self { vm, region }
  }

  fn run(&mut self, keyword: &str, args: &[&str]) -> std::result::Result<Effect, Fault> {
    let Some(instruction) = Instruction::decode(keyword, args)? else {
      // unknown keywords are skipped without a word
      return Ok(Effect::None);
    };
    match instruction {
      Instruction::Mov { src, dst } => mov(self, src, dst),
      Instruction::Add { src, dst } => add(self, src, dst),
      Instruction::Sub { src, dst } => sub(self, src, dst),
      Instruction::Inc { dst } => inc(self, dst),
      Instruction::Dec { dst } => dec(self, dst),
      Instruction::Imul { src, dst } => imul(self, src, dst),
      Instruction::Idiv { src, dst } => idiv(self, src, dst),
      Instruction::Jmp { label } => jmp(self, label),
      Instruction::Hlt { arg } => hlt(self, arg),
      Instruction::Prnt { arg } => prnt(self, arg),
      Instruction::Cmp { lhs, rhs } => cmp(self, lhs, rhs),
      Instruction::Je { label } => branch_if(self, label, true),
      Instruction::Jne { label } => branch_if(self, label, false),
    }
  }
}

type Outcome = std::result::Result<Effect, Fault>;

// r[d] ← v
// r[d] ← r[s]
fn mov<R, S>(task: &mut Task<'_, '_, R, S>, src: &str, dst: &str) -> Outcome
where
  R: Region,
{
  let d = Register::parse(dst)?;
  let value = match Register::lookup(src) {
    Some(s) => task.vm.registers[s],
    // not a register, so it has to be a literal
    None => Value::Int(operand::parse_int(src)?),
  };
  task.vm.registers[d] = value;
  Ok(Effect::None)
}

// r[d] ← r[d] + r[s]
fn add<R, S>(task: &mut Task<'_, '_, R, S>, src: &str, dst: &str) -> Outcome
where
  R: Region,
{
  let s = Register::parse(src)?;
  let d = Register::parse(dst)?;
  let registers = &mut task.vm.registers;
  registers[d] = registers[d] + registers[s];
  Ok(Effect::None)
}

// r[d] ← r[d] − r[s]
fn sub<R, S>(task: &mut Task<'_, '_, R, S>, src: &str, dst: &str) -> Outcome
where
  R: Region,
{
  let s = Register::parse(src)?;
  let d = Register::parse(dst)?;
  let registers = &mut task.vm.registers;
  registers[d] = registers[d] - registers[s];
  Ok(Effect::None)
}

// r[d] ← r[d] + 1
fn inc<R, S>(task: &mut Task<'_, '_, R, S>, dst: &str) -> Outcome
where
  R: Region,
{
  let d = Register::parse(dst)?;
  let registers = &mut task.vm.registers;
  registers[d] = registers[d] + Value::Int(1);
  Ok(Effect::None)
}

// r[d] ← r[d] − 1
fn dec<R, S>(task: &mut Task<'_, '_, R, S>, dst: &str) -> Outcome
where
  R: Region,
{
  let d = Register::parse(dst)?;
  let registers = &mut task.vm.registers;
  registers[d] = registers[d] - Value::Int(1);
  Ok(Effect::None)
}

// r[d] ← r[d] × r[s]
fn imul<R, S>(task: &mut Task<'_, '_, R, S>, src: &str, dst: &str) -> Outcome
where
  R: Region,
{
  let s = Register::parse(src)?;
  let d = Register::parse(dst)?;
  let registers = &mut task.vm.registers;
  registers[d] = registers[d] * registers[s];
  Ok(Effect::None)
}

// r[d] ← r[d] ÷ r[s]
fn idiv<R, S>(task: &mut Task<'_, '_, R, S>, src: &str, dst: &str) -> Outcome
where
  R: Region,
{
  let s = Register::parse(src)?;
  let d = Register::parse(dst)?;
  let registers = &mut task.vm.registers;
  registers[d] = registers[d].divide(registers[s])?;
  Ok(Effect::None)
}

// pc ← labels[l]
// an unknown label leaves pc alone, so execution falls through
fn jmp<R, S>(task: &mut Task<'_, '_, R, S>, label: &str) -> Outcome
where
  R: Region,
{
  let target = task
    .region
    .label(label)
    .ok_or_else(|| Fault::UndefinedLabel(label.to_owned()))?;
  task.vm.ip = target;
  Ok(Effect::None)
}

// flag ← r[s] == r[t]
fn cmp<R, S>(task: &mut Task<'_, '_, R, S>, lhs: &str, rhs: &str) -> Outcome
where
  R: Region,
{
  let s = Register::parse(lhs)?;
  let t = Register::parse(rhs)?;
  let equal = task.vm.registers[s].equals(task.vm.registers[t]);
  task.vm.flag = equal;
  Ok(Effect::None)
}

// if flag == expected : pc ← labels[l]
// the label is only looked up when the branch is taken
fn branch_if<R, S>(task: &mut Task<'_, '_, R, S>, label: &str, expected: bool) -> Outcome
where
  R: Region,
{
  if task.vm.flag != expected {
    return Ok(Effect::None);
  }
  jmp(task, label)
}

// sleep(v) ∨ sleep(r[s]), once the line is done
fn hlt<R, S>(task: &mut Task<'_, '_, R, S>, arg: &str) -> Outcome
where
  R: Region,
{
  task.vm.halt = match operand::parse_float(arg) {
    Some(seconds) => seconds,
    None => task.vm.registers[Register::parse(arg)?].as_f64(),
  };
  Ok(Effect::None)
}

// out ← v
// out ← r[s]
fn prnt<R, S>(task: &mut Task<'_, '_, R, S>, arg: &str) -> Outcome
where
  R: Region,
{
  let value = if operand::is_int(arg) {
    Value::Int(operand::parse_int(arg)?)
  } else {
    task.vm.registers[Register::parse(arg)?]
  };
  Ok(Effect::Print(value))
}
