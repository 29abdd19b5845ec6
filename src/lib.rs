//! A tiny line-oriented register machine
//!
//! Programs are plain text, one instruction or label per line:
//!
//! ```text
//! mov 7 a
//! mov 2 b
//! idiv b a
//! prnt a
//! ```
//!
//! Nothing a program does can abort the interpreter, bad instructions are
//! reported and skipped.

pub mod error;
pub mod label;
pub mod opcode;
pub mod operand;
pub mod region;
pub mod register;
pub mod value;
pub mod vm;
