use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use interpreter::region::Program;
use interpreter::vm::{Exit, Vm};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Interpreter for a tiny register machine language
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Program to run, one instruction or label per line
  #[arg(value_name = "FILE")]
  path: Option<PathBuf>,

  /// Same as FILE
  #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "path")]
  file: Option<PathBuf>,

  /// Stop after this many lines have been executed
  #[arg(long, value_name = "N")]
  max_steps: Option<u64>,

  /// More logging on stderr, may be repeated
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
  match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

fn main() -> Result<()> {
  let args = Args::parse();
  SimpleLogger::new()
    .with_level(level(args.verbose))
    .init()
    .context("failed to set up logging")?;

  let stdout = io::stdout();
  let mut out = stdout.lock();
  run(args, &mut out)?;
  out.flush()?;
  Ok(())
}

/// Runs the program named on the command line, doing nothing without one
fn run<W>(args: Args, out: &mut W) -> Result<()>
where
  W: Write,
{
  let Some(path) = args.path.or(args.file) else {
    return Ok(());
  };
  let source = fs::read_to_string(&path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  let program = Program::from(source.as_str());

  let mut vm = Vm::new();
  if let Some(limit) = args.max_steps {
    vm = vm.with_step_limit(limit);
  }

  log::info!("running {}", path.display());
  match vm.run(&program, out)? {
    Exit::Completed { steps } => log::info!("finished after {steps} steps"),
    Exit::StepLimit { steps } => log::warn!("stopped at step limit after {steps} steps"),
  }
  Ok(())
}
