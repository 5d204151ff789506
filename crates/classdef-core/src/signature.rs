//! The ABI signature of one bound method.
//!
//! Guest and host artifacts are compiled independently and only meet at
//! link time inside the engine. Both emitters derive everything they emit
//! from the same [`Signature`], so the parameter and result kind sequences
//! cannot drift apart between them.

use crate::names::{MethodName, ParamName, Symbol};
use crate::{ReturnSpec, TypeRef};
use serde::Serialize;

/// One resolved parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Param {
    /// Parameter name
    pub name: ParamName,
    /// Declared kind
    pub kind: TypeRef,
}

/// Parameters, results and import symbol of a method.
///
/// # Examples
///
/// ```
/// use classdef_core::{RawSchema, Schema, TypeRef};
///
/// let schema = Schema::parse(RawSchema::from_toml_str(r#"
///     name = "Transform"
///     storage_kind = "component"
///     [methods.setPosition]
///     param_list = ["x", "y", "z"]
///     params = { x = "double", y = "double", z = "double" }
/// "#).unwrap()).unwrap();
///
/// let (name, method) = schema.methods().next().unwrap();
/// let signature = schema.signature(name, method);
///
/// assert_eq!(signature.symbol().as_str(), "Transform_setPosition");
/// assert_eq!(signature.param_kinds().len(), 4);
/// assert_eq!(signature.param_kinds()[0], TypeRef::SelfHandle);
/// assert!(signature.result_kinds().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    symbol: Symbol,
    method: MethodName,
    params: Vec<Param>,
    ret: ReturnSpec,
}

impl Signature {
    /// Name of the implicit first parameter.
    pub const SELF_PARAM: &'static str = "self";

    pub(crate) fn new(symbol: Symbol, method: MethodName, declared: &[Param], ret: ReturnSpec) -> Self {
        let mut params = Vec::with_capacity(declared.len() + 1);
        params.push(Param {
            name: ParamName::self_handle(),
            kind: TypeRef::SelfHandle,
        });
        params.extend_from_slice(declared);

        Self {
            symbol,
            method,
            params,
            ret,
        }
    }

    /// Canonical import symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Method name.
    #[must_use]
    pub const fn method(&self) -> &MethodName {
        &self.method
    }

    /// All parameters, self-handle first.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameters declared in the schema, without the self-handle.
    #[must_use]
    pub fn declared_params(&self) -> &[Param] {
        &self.params[1..]
    }

    /// Return shape.
    #[must_use]
    pub const fn ret(&self) -> &ReturnSpec {
        &self.ret
    }

    /// Engine-level parameter kinds, self-handle first.
    #[must_use]
    pub fn param_kinds(&self) -> Vec<TypeRef> {
        self.params.iter().map(|param| param.kind).collect()
    }

    /// Engine-level result kinds: empty for no return, exactly one entry
    /// otherwise. A class reference travels as a handle.
    #[must_use]
    pub fn result_kinds(&self) -> Vec<TypeRef> {
        match &self.ret {
            ReturnSpec::None => Vec::new(),
            ReturnSpec::Primitive(kind) => vec![*kind],
            ReturnSpec::ClassReference(_) => vec![TypeRef::SelfHandle],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{ClassName, ComponentName};

    fn signature(declared: &[(&str, TypeRef)], ret: ReturnSpec) -> Signature {
        let component = ComponentName::new("Transform").unwrap();
        let method = MethodName::new("call").unwrap();
        let declared: Vec<_> = declared
            .iter()
            .map(|(name, kind)| Param {
                name: ParamName::new(*name).unwrap(),
                kind: *kind,
            })
            .collect();
        Signature::new(Symbol::canonical(&component, &method), method, &declared, ret)
    }

    #[test]
    fn test_self_handle_is_first() {
        let sig = signature(&[("x", TypeRef::Double)], ReturnSpec::None);
        assert_eq!(sig.params()[0].name.as_str(), "self");
        assert_eq!(sig.params()[0].kind, TypeRef::SelfHandle);
        assert_eq!(sig.declared_params().len(), 1);
        assert_eq!(sig.declared_params()[0].name.as_str(), "x");
    }

    #[test]
    fn test_no_params_still_has_self() {
        let sig = signature(&[], ReturnSpec::None);
        assert_eq!(sig.param_kinds(), [TypeRef::SelfHandle]);
        assert!(sig.declared_params().is_empty());
    }

    #[test]
    fn test_result_kinds() {
        assert!(signature(&[], ReturnSpec::None).result_kinds().is_empty());
        assert_eq!(
            signature(&[], ReturnSpec::Primitive(TypeRef::Bool)).result_kinds(),
            [TypeRef::Bool]
        );
        assert_eq!(
            signature(
                &[],
                ReturnSpec::ClassReference(ClassName::new("TransformComponent").unwrap())
            )
            .result_kinds(),
            [TypeRef::SelfHandle]
        );
    }
}
