//! Generate command implementation.
//!
//! One run:
//! 1. Loads the generator configuration (built-in defaults without `--config`)
//! 2. Reads and validates the schema
//! 3. Emits every method for the selected target into memory
//! 4. Writes the artifact atomically, only if every step succeeded
//! 5. Prints the summary

use crate::formatters::format_output;
use anyhow::{Context, Result};
use classdef_codegen::{BindingGenerator, FileSink, GenerationReport};
use classdef_core::cli::{ExitCode, OutputFormat};
use classdef_core::{Error, GeneratorConfig, RawSchema, Schema, Target};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// Schema name
    pub schema: String,
    /// Target generated
    pub target: Target,
    /// Generated class name
    pub class_name: String,
    /// Artifact path
    pub output: String,
    /// Number of bound methods
    pub method_count: usize,
    /// Import symbols, in method order
    pub symbols: Vec<String>,
}

impl GenerationSummary {
    fn new(report: GenerationReport, output: &Path) -> Self {
        Self {
            schema: report.schema,
            target: report.target,
            class_name: report.class_name,
            output: output.display().to_string(),
            method_count: report.symbols.len(),
            symbols: report.symbols,
        }
    }
}

/// Inputs of the generate command.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Artifact to produce
    pub target: Target,
    /// Schema file
    pub input: PathBuf,
    /// Artifact path
    pub output: PathBuf,
    /// Optional configuration file
    pub config: Option<PathBuf>,
}

/// Reads a schema file and validates it.
///
/// # Errors
///
/// Returns [`Error::IoError`] if the file cannot be read, otherwise the
/// errors of [`RawSchema::from_toml_str`] and [`Schema::parse`].
pub fn load_schema(path: &Path) -> classdef_core::Result<Schema> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::IoError {
        path: path.display().to_string(),
        source: e,
    })?;
    Schema::parse(RawSchema::from_toml_str(&text)?)
}

/// Runs one generation and returns its summary. Nothing is printed.
///
/// # Errors
///
/// Returns the first configuration, schema, emission or I/O error. On
/// error the output path is left untouched.
pub fn generate(args: &GenerateArgs) -> Result<GenerationSummary> {
    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let schema = load_schema(&args.input)
        .with_context(|| format!("loading schema {}", args.input.display()))?;
    let generator = BindingGenerator::new(config)?;
    let report = generator.generate_to(&schema, args.target, &mut FileSink::new(&args.output))?;

    info!(
        "Generated {} for '{}' at {}",
        args.target,
        report.schema,
        args.output.display()
    );
    Ok(GenerationSummary::new(report, &args.output))
}

/// Runs the generate command and prints the summary unless `quiet`.
///
/// # Errors
///
/// Returns the errors of [`generate`], or a serialization error while
/// formatting the summary.
pub fn run(args: &GenerateArgs, output_format: OutputFormat, quiet: bool) -> Result<ExitCode> {
    let summary = generate(args)?;

    if !quiet {
        let formatted = format_output(&summary, output_format)?;
        println!("{formatted}");
    }

    Ok(ExitCode::SUCCESS)
}
