//! Host-side C++ linkage.
//!
//! For every method the host artifact carries a function-type descriptor
//! constructor, which tells the engine the import's parameter and result
//! kinds, and a trampoline registration binding the import symbol to the
//! native method. Registrations are collected while methods are emitted
//! and printed together inside `linkScriptApi` by
//! [`HostLinkageEmitter::finish`].

mod emitter;

pub use emitter::HostLinkageEmitter;

use classdef_core::{MethodName, StorageKind, Symbol, TypeRef, TypeToken};
use serde::Serialize;

/// Engine-level signature of one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionTypeDescriptor {
    /// Name of the generated constructor function
    pub function: String,
    /// Parameter kinds, self-handle first
    pub param_kinds: Vec<TypeRef>,
    /// Host spelling of each parameter kind
    pub param_tokens: Vec<TypeToken>,
    /// Result kinds: empty or exactly one
    pub result_kinds: Vec<TypeRef>,
    /// Host spelling of each result kind
    pub result_tokens: Vec<TypeToken>,
}

/// How a trampoline finds the instance a call acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPath {
    /// Resolve the self-handle to an entity in the host registry, then
    /// call the method on that entity's component.
    EntityRegistry,
    /// Call the method directly on the object the self-handle names.
    DirectObject,
}

impl DispatchPath {
    /// Dispatch path for instances stored as `storage_kind`.
    #[must_use]
    pub const fn for_storage(storage_kind: StorageKind) -> Self {
        match storage_kind {
            StorageKind::Component => Self::EntityRegistry,
            StorageKind::DynamicObject => Self::DirectObject,
        }
    }

    /// Whether the trampoline consults the entity registry.
    #[must_use]
    pub const fn uses_registry(&self) -> bool {
        matches!(self, Self::EntityRegistry)
    }

    const fn template(self) -> &'static str {
        match self {
            Self::EntityRegistry => "host/link_component",
            Self::DirectObject => "host/link_dynamic_object",
        }
    }
}

/// Binding of one import symbol to a native method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrampolineRegistration {
    /// Instance lookup strategy
    pub dispatch: DispatchPath,
    /// Native class owning the method
    pub class_name: String,
    /// Native method name
    pub method: MethodName,
    /// Import symbol
    pub symbol: Symbol,
    /// Descriptor constructor the registration passes to the engine
    pub descriptor: String,
}
