//! Binding emitters for classdef schemas.
//!
//! Turns a validated [`Schema`](classdef_core::Schema) into one of two
//! artifacts that meet at link time inside the engine:
//!
//! - `as-binding`: AssemblyScript declarations the guest imports
//!   ([`GuestDeclarationEmitter`])
//! - `wasm-linker`: C++ function-type descriptors and trampoline
//!   registrations compiled into the host ([`HostLinkageEmitter`])
//!
//! Emitters produce structured records first and render them through
//! Handlebars templates, so the ABI agreement between the two sides can
//! be checked on the records alone.
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
//!     [methods.getX]
//!     return = "double"
//! "#).unwrap()).unwrap();
//!
//! let generator = BindingGenerator::new(GeneratorConfig::default()).unwrap();
//! let mut sink = MemorySink::new();
//! generator.generate_to(&schema, Target::WasmLinker, &mut sink).unwrap();
//!
//! let text = sink.content().unwrap();
//! assert!(text.contains("methodType_TransformComponent_getX"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod code_builder;
pub mod docs;
pub mod emitter;
pub mod generator;
pub mod guest;
pub mod host;
pub mod sink;
pub mod template_engine;

pub use code_builder::{BuilderState, CodeBuilder, GeneratedArtifact};
pub use emitter::{BindingEmitter, EmitContext, EmitterFactory, EmitterRegistry};
pub use generator::{BindingGenerator, GenerationReport};
pub use guest::{GuestDeclaration, GuestDeclarationEmitter, GuestParam};
pub use host::{DispatchPath, FunctionTypeDescriptor, HostLinkageEmitter, TrampolineRegistration};
pub use sink::{FileSink, MemorySink, OutputSink};
pub use template_engine::TemplateEngine;
