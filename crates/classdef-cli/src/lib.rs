//! classdef CLI library.
//!
//! Exposes the argument definitions, the generate command and the
//! summary formatters so they can be tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod formatters;

pub use cli::{Cli, TargetSelector};
pub use commands::generate::{GenerateArgs, GenerationSummary};
