//! One generation run: schema in, one artifact out.
//!
//! # Examples
//!
//! ```
//! use classdef_codegen::{BindingGenerator, MemorySink};
//! use classdef_core::{GeneratorConfig, RawSchema, Schema, Target};
//!
//! let schema = Schema::parse(RawSchema::from_toml_str(r#"
//!     name = "Transform"
//!     storage_kind = "component"
//!     [methods.setPosition]
//!     param_list = ["x", "y", "z"]
//!     params = { x = "double", y = "double", z = "double" }
//! "#).unwrap()).unwrap();
//!
//! let generator = BindingGenerator::new(GeneratorConfig::default()).unwrap();
//! let mut sink = MemorySink::new();
//! let report = generator.generate_to(&schema, Target::AsBinding, &mut sink).unwrap();
//!
//! assert_eq!(report.symbols, ["Transform_setPosition"]);
//! assert!(sink.content().unwrap().contains("setPosition(x: f64, y: f64, z: f64): void;"));
//! ```

use crate::code_builder::GeneratedArtifact;
use crate::emitter::{EmitContext, EmitterRegistry};
use crate::sink::OutputSink;
use crate::template_engine::TemplateEngine;
use classdef_core::{GeneratorConfig, Result, Schema, Target};
use serde::Serialize;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Schema name
    pub schema: String,
    /// Target generated
    pub target: Target,
    /// Generated class name
    pub class_name: String,
    /// Import symbols, in method order
    pub symbols: Vec<String>,
    /// Lines in the artifact
    pub line_count: usize,
}

/// Generates binding artifacts for schemas.
///
/// Holds the configuration, printer and emitter registry shared by any
/// number of runs. Runs are independent; a generator can be shared
/// across threads.
#[derive(Debug)]
pub struct BindingGenerator {
    config: GeneratorConfig,
    engine: TemplateEngine,
    registry: EmitterRegistry,
}

impl BindingGenerator {
    /// Creates a generator with the built-in emitters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`](classdef_core::Error::TemplateError)
    /// if a built-in template fails to compile.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_registry(config, EmitterRegistry::builtin())
    }

    /// Creates a generator with a caller-supplied registry.
    ///
    /// # Errors
    ///
    /// Same as [`BindingGenerator::new`].
    pub fn with_registry(config: GeneratorConfig, registry: EmitterRegistry) -> Result<Self> {
        Ok(Self {
            config,
            engine: TemplateEngine::new()?,
            registry,
        })
    }

    /// Configuration of every run.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs every method of `schema` through the emitter for `target` and
    /// returns the sealed artifact with its report. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the first error of emitter construction, any method, or
    /// the epilogue. No partial artifact is returned.
    pub fn generate(
        &self,
        schema: &Schema,
        target: Target,
    ) -> Result<(GeneratedArtifact, GenerationReport)> {
        tracing::info!(
            "Generating {} for '{}' ({} methods)",
            target,
            schema.name(),
            schema.method_count()
        );

        let ctx = EmitContext::new(schema, &self.config, &self.engine);
        let mut emitter = self.registry.create(target, ctx)?;
        for (name, method) in schema.methods() {
            emitter.emit_method(name, method)?;
        }

        let symbols = emitter
            .symbols()
            .iter()
            .map(ToString::to_string)
            .collect();
        let artifact = emitter.finish()?;

        let report = GenerationReport {
            schema: schema.name().to_string(),
            target,
            class_name: schema.class_name(),
            symbols,
            line_count: artifact.line_count(),
        };
        Ok((artifact, report))
    }

    /// Generates and, only on success, flushes the artifact to `sink`.
    ///
    /// # Errors
    ///
    /// Returns any error of [`BindingGenerator::generate`], in which case
    /// the sink is never called, or the sink's own error.
    pub fn generate_to(
        &self,
        schema: &Schema,
        target: Target,
        sink: &mut dyn OutputSink,
    ) -> Result<GenerationReport> {
        let (artifact, report) = self.generate(schema, target)?;
        artifact.flush(sink)?;
        Ok(report)
    }
}
