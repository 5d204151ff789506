//! classdef binding generator.
//!
//! Reads a classdef schema and writes one side of the WASM scripting
//! boundary: AssemblyScript declarations for guest scripts, or the C++
//! function types and trampolines the host links them against.
//!
//! # Examples
//!
//! ```bash
//! classdef-gen as-binding classdefs/Transform.toml bindings/TransformComponent.ts
//! classdef-gen wasm-linker classdefs/Transform.toml codegen/Transform.cc
//! ```
//!
//! Exit codes: 0 success, 1 usage, 2 invalid schema, 3 configuration or
//! template, 4 I/O.

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use classdef_cli::Cli;
use classdef_cli::commands::{exit_code_for, generate};
use classdef_core::cli::{ExitCode, OutputFormat};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::USAGE,
            };
            // Help goes to stdout, usage errors to stderr
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    init_logging(cli.verbose);

    let exit_code = match execute(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging to stderr so stdout carries only the summary.
///
/// `RUST_LOG` applies unless `--verbose` forces debug level.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn execute(cli: &Cli) -> Result<ExitCode> {
    let output_format = cli.format.parse::<OutputFormat>()?;

    let args = generate::GenerateArgs {
        target: cli.target.into(),
        input: cli.input.clone(),
        output: cli.output.clone(),
        config: cli.config.clone(),
    };
    generate::run(&args, output_format, cli.quiet)
}
