//! The emitter interface and the registry that selects an emitter per
//! target.
//!
//! Emitters form a closed set: [`BindingEmitter`] has one variant per
//! [`Target`] and forwards `emit_method` / `finish` to it. The driver
//! owns an [`EmitterRegistry`] and asks it for the emitter of a target.

use crate::code_builder::GeneratedArtifact;
use crate::guest::GuestDeclarationEmitter;
use crate::host::HostLinkageEmitter;
use crate::template_engine::TemplateEngine;
use classdef_core::{Error, GeneratorConfig, MethodName, MethodSpec, Result, Schema, Symbol, Target};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything an emitter reads, borrowed for one run.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'s> {
    /// Validated schema
    pub schema: &'s Schema,
    /// Run configuration, including the type tables
    pub config: &'s GeneratorConfig,
    /// Printer
    pub engine: &'s TemplateEngine,
}

#[derive(Serialize)]
struct HeaderView<'a> {
    project: &'a str,
    url: Option<&'a str>,
    description: &'a str,
    schema: &'a str,
}

impl<'s> EmitContext<'s> {
    /// Bundles the run inputs.
    #[must_use]
    pub const fn new(
        schema: &'s Schema,
        config: &'s GeneratorConfig,
        engine: &'s TemplateEngine,
    ) -> Self {
        Self {
            schema,
            config,
            engine,
        }
    }

    /// Renders the standard header for `target`.
    pub(crate) fn header(&self, target: Target) -> Result<String> {
        self.engine.render(
            "header",
            &HeaderView {
                project: &self.config.preamble.project,
                url: self.config.preamble.url.as_deref(),
                description: target.artifact_description(),
                schema: self.schema.name().as_str(),
            },
        )
    }
}

/// One emitter per target behind a single interface.
#[derive(Debug)]
pub enum BindingEmitter<'s> {
    /// `as-binding`
    Guest(GuestDeclarationEmitter<'s>),
    /// `wasm-linker`
    Host(HostLinkageEmitter<'s>),
}

impl<'s> BindingEmitter<'s> {
    /// Target this emitter produces.
    #[must_use]
    pub const fn target(&self) -> Target {
        match self {
            Self::Guest(_) => GuestDeclarationEmitter::TARGET,
            Self::Host(_) => HostLinkageEmitter::TARGET,
        }
    }

    /// Emits one method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if a kind has no token for the
    /// target, or [`Error::TemplateError`] if rendering fails.
    pub fn emit_method(&mut self, name: &MethodName, method: &MethodSpec) -> Result<()> {
        match self {
            Self::Guest(emitter) => emitter.add_method(name, method),
            Self::Host(emitter) => emitter.add_method(name, method),
        }
    }

    /// Symbols emitted so far, in order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        match self {
            Self::Guest(emitter) => emitter
                .declarations()
                .iter()
                .map(|decl| decl.symbol.clone())
                .collect(),
            Self::Host(emitter) => emitter
                .registrations()
                .iter()
                .map(|reg| reg.symbol.clone())
                .collect(),
        }
    }

    /// Appends the epilogue and seals the artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the epilogue fails to render.
    pub fn finish(self) -> Result<GeneratedArtifact> {
        match self {
            Self::Guest(emitter) => emitter.finish(),
            Self::Host(emitter) => emitter.finish(),
        }
    }
}

/// Constructor of an emitter for one run.
pub type EmitterFactory = for<'s> fn(EmitContext<'s>) -> Result<BindingEmitter<'s>>;

fn guest_factory(ctx: EmitContext<'_>) -> Result<BindingEmitter<'_>> {
    GuestDeclarationEmitter::new(ctx).map(BindingEmitter::Guest)
}

fn host_factory(ctx: EmitContext<'_>) -> Result<BindingEmitter<'_>> {
    HostLinkageEmitter::new(ctx).map(BindingEmitter::Host)
}

/// Explicit target-to-emitter table.
#[derive(Debug, Clone)]
pub struct EmitterRegistry {
    factories: BTreeMap<Target, EmitterFactory>,
}

impl EmitterRegistry {
    /// Registry with no emitters.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with an emitter for every built-in target.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Target::AsBinding, guest_factory);
        registry.register(Target::WasmLinker, host_factory);
        registry
    }

    fn register(&mut self, target: Target, factory: EmitterFactory) {
        self.factories.insert(target, factory);
    }

    /// Constructs the emitter for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] if no emitter is registered for
    /// `target`, otherwise whatever emitter construction returns.
    pub fn create<'s>(&self, target: Target, ctx: EmitContext<'s>) -> Result<BindingEmitter<'s>> {
        let factory = self
            .factories
            .get(&target)
            .ok_or_else(|| Error::InvalidTarget(target.to_string()))?;
        factory(ctx)
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classdef_core::RawSchema;

    fn schema() -> Schema {
        Schema::parse(
            RawSchema::from_toml_str(
                r#"
                name = "Transform"
                storage_kind = "component"
                [methods.getX]
                return = "double"
                "#,
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_registry_covers_all_targets() {
        let registry = EmitterRegistry::builtin();
        assert_eq!(registry.factories.keys().copied().collect::<Vec<_>>(), Target::ALL);
    }

    #[test]
    fn test_create_selects_variant() {
        let schema = schema();
        let config = GeneratorConfig::default();
        let engine = TemplateEngine::new().unwrap();
        let ctx = EmitContext::new(&schema, &config, &engine);
        let registry = EmitterRegistry::builtin();

        for target in Target::ALL {
            let emitter = registry.create(target, ctx).unwrap();
            assert_eq!(emitter.target(), target);
        }
    }

    #[test]
    fn test_empty_registry_rejects_target() {
        let schema = schema();
        let config = GeneratorConfig::default();
        let engine = TemplateEngine::new().unwrap();
        let ctx = EmitContext::new(&schema, &config, &engine);

        let err = EmitterRegistry::empty()
            .create(Target::WasmLinker, ctx)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(ref t) if t == "wasm-linker"));
    }

    #[test]
    fn test_symbols_track_emitted_methods() {
        let schema = schema();
        let config = GeneratorConfig::default();
        let engine = TemplateEngine::new().unwrap();
        let ctx = EmitContext::new(&schema, &config, &engine);

        for target in Target::ALL {
            let mut emitter = EmitterRegistry::builtin().create(target, ctx).unwrap();
            assert!(emitter.symbols().is_empty());
            for (name, method) in schema.methods() {
                emitter.emit_method(name, method).unwrap();
            }
            let symbols = emitter.symbols();
            assert_eq!(symbols.len(), 1);
            assert_eq!(symbols[0].as_str(), "Transform_getX");
        }
    }

    #[test]
    fn test_header_carries_preamble() {
        let schema = schema();
        let mut config = GeneratorConfig::default();
        config.preamble.project = "Mondradiko scripting API".to_string();
        config.preamble.url = Some("https://mondradiko.github.io/".to_string());
        let engine = TemplateEngine::new().unwrap();

        let header = EmitContext::new(&schema, &config, &engine)
            .header(Target::WasmLinker)
            .unwrap();
        assert!(header.starts_with(
            "// Mondradiko scripting API: linking implementation for Transform\n"
        ));
        assert!(header.contains("// https://mondradiko.github.io/\n"));
    }
}
