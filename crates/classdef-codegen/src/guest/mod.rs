//! Guest-side AssemblyScript declarations.
//!
//! Each bound method becomes an `@external` method of an `@unmanaged`
//! wrapper class. The self-handle is the implicit `this` receiver of that
//! method, so it is recorded in [`GuestDeclaration::params`] but not
//! spelled out in the printed parameter list.

mod emitter;

pub use emitter::GuestDeclarationEmitter;

use classdef_core::{MethodName, ParamName, Symbol, TypeRef, TypeToken};
use serde::Serialize;

/// One guest parameter after type mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestParam {
    /// Parameter name
    pub name: ParamName,
    /// Engine-level kind
    pub kind: TypeRef,
    /// Guest spelling of the kind
    pub token: TypeToken,
}

/// Structured form of one guest import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestDeclaration {
    /// Import symbol the host registers under
    pub symbol: Symbol,
    /// Method name on the wrapper class
    pub method: MethodName,
    /// Parameters, self-handle first
    pub params: Vec<GuestParam>,
    /// Declared return: `void`, a primitive token, or a wrapper class name
    pub return_type: String,
    /// Engine-level result kinds
    pub result_kinds: Vec<TypeRef>,
    /// Documentation string
    pub brief: Option<String>,
}

impl GuestDeclaration {
    /// Engine-level parameter kinds, self-handle first.
    #[must_use]
    pub fn param_kinds(&self) -> Vec<TypeRef> {
        self.params.iter().map(|param| param.kind).collect()
    }

    /// Parameters after the implicit receiver.
    #[must_use]
    pub fn explicit_params(&self) -> &[GuestParam] {
        self.params.get(1..).unwrap_or_default()
    }
}
