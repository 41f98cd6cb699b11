#![crate_name = "spellhell"]

//! Spell-checks the string literals of a compiled program.
//!
//! Statements of the program's IR are handed to a `LiteralLint`; every
//! operand that resolves to a string constant is split into words, and
//! each word the dictionary doesn't know is reported against the
//! statement's location.

#[macro_use] extern crate tracing;

pub mod config;
pub mod dict;
pub mod error;
pub mod ir;
pub mod report;
pub mod resolve;
pub mod visitor;
pub mod words;

mod lint;

pub use crate::config::Config;
pub use crate::dict::{Dictionary, Speller};
pub use crate::error::{Error, Result};
pub use crate::lint::{read_dump, LiteralLint, Summary};
pub use crate::report::{Diagnostic, Reporter, WarningPrinter};
pub use crate::resolve::Resolver;
pub use crate::words::OverflowPolicy;
