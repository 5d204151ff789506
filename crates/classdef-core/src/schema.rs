//! Binding schemas: the raw record handed over by a loader and the
//! validated, immutable [`Schema`] every emitter works from.
//!
//! A schema is parsed exactly once per run. Everything that can be wrong
//! with it (missing fields, unknown storage kinds, undeclared parameter
//! types, contradictory returns) is rejected here, before any emitter is
//! constructed.
//!
//! # Examples
//!
//! ```
//! use classdef_core::{RawSchema, ReturnSpec, Schema, StorageKind, TypeRef};
//!
//! let raw = RawSchema::from_toml_str(r#"
//!     name = "Transform"
//!     storage_kind = "component"
//!
//!     [methods.setPosition]
//!     param_list = ["x", "y", "z"]
//!     params = { x = "double", y = "double", z = "double" }
//! "#).unwrap();
//!
//! let schema = Schema::parse(raw).unwrap();
//! assert_eq!(schema.storage_kind(), StorageKind::Component);
//!
//! let (name, method) = schema.methods().next().unwrap();
//! assert_eq!(name.as_str(), "setPosition");
//!
//! let params = Schema::resolve_params(method);
//! assert_eq!(params.len(), 3);
//! assert!(params.iter().all(|p| p.kind == TypeRef::Double));
//! assert_eq!(Schema::resolve_return(method), &ReturnSpec::None);
//! ```

use crate::names::{ClassName, ComponentName, MethodName, ParamName, Symbol};
use crate::signature::{Param, Signature};
use crate::{Error, Result, TypeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const UNNAMED: &str = "<unnamed>";

/// Schema record as deserialized by a loader, before validation.
///
/// Every field is optional here so that a missing field becomes a
/// [`Error::SchemaError`] naming it, not a deserializer message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSchema {
    /// Component or object name
    pub name: Option<String>,
    /// `component` or `dynamic_object`
    #[serde(alias = "storage_type")]
    pub storage_kind: Option<String>,
    /// Other generated classes this one refers to
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Methods in declaration order
    pub methods: Option<IndexMap<String, RawMethod>>,
}

/// One method entry of a [`RawSchema`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMethod {
    /// Parameter order
    pub param_list: Option<Vec<String>>,
    /// Parameter types, looked up through `param_list`
    #[serde(default)]
    pub params: IndexMap<String, String>,
    /// Primitive return type
    #[serde(rename = "return")]
    pub return_type: Option<String>,
    /// Reference return naming another generated class
    pub return_class: Option<String>,
    /// One-line documentation
    pub brief: Option<String>,
}

impl RawSchema {
    /// Deserializes a TOML document into a raw schema.
    ///
    /// Method order follows the document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaError`] if the text is not valid TOML or a
    /// field has the wrong shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::SchemaError {
            schema: UNNAMED.to_string(),
            message: format!("failed to deserialize schema: {e}"),
        })
    }
}

/// How the host stores the instances a schema binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// A component attached to an entity in the host's entity registry.
    Component,
    /// A free-standing object addressed directly by its handle.
    DynamicObject,
}

impl StorageKind {
    /// Returns the schema spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::DynamicObject => "dynamic_object",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "component" => Ok(Self::Component),
            "dynamic_object" => Ok(Self::DynamicObject),
            other => Err(Error::InvalidStorageKind {
                schema: UNNAMED.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// What a method returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum ReturnSpec {
    /// Nothing.
    None,
    /// A primitive value.
    Primitive(TypeRef),
    /// A handle to an instance of another generated class.
    ClassReference(ClassName),
}

/// A validated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    params: Vec<Param>,
    ret: ReturnSpec,
    brief: Option<String>,
}

impl MethodSpec {
    /// Documentation string, if the schema gave one.
    #[must_use]
    pub fn brief(&self) -> Option<&str> {
        self.brief.as_deref()
    }
}

/// A validated, immutable binding schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: ComponentName,
    storage_kind: StorageKind,
    dependencies: Vec<ClassName>,
    methods: IndexMap<MethodName, MethodSpec>,
}

impl Schema {
    /// Validates a raw record.
    ///
    /// # Errors
    ///
    /// - [`Error::SchemaError`] if `name`, `storage_kind` or `methods` is
    ///   missing, an identifier is invalid, a `param_list` entry has no
    ///   type, or a method sets both `return` and `return_class`
    /// - [`Error::InvalidStorageKind`] if `storage_kind` is not recognized
    /// - [`Error::UnknownType`] if a type name is not a declared kind
    pub fn parse(raw: RawSchema) -> Result<Self> {
        let raw_name = raw.name.ok_or_else(|| schema_error(UNNAMED, "missing required field 'name'"))?;
        let name = ComponentName::new(raw_name).map_err(|bad| {
            schema_error(&bad, format!("'{bad}' is not a valid component name"))
        })?;
        let schema_name = name.as_str();

        let storage_kind = raw
            .storage_kind
            .ok_or_else(|| schema_error(schema_name, "missing required field 'storage_kind'"))?
            .parse::<StorageKind>()
            .map_err(|e| match e {
                Error::InvalidStorageKind { value, .. } => Error::InvalidStorageKind {
                    schema: schema_name.to_string(),
                    value,
                },
                other => other,
            })?;

        let raw_methods = raw
            .methods
            .ok_or_else(|| schema_error(schema_name, "missing required field 'methods'"))?;

        let mut dependencies = Vec::with_capacity(raw.dependencies.len());
        for dependency in raw.dependencies {
            let class = ClassName::new(dependency).map_err(|bad| {
                schema_error(schema_name, format!("'{bad}' is not a valid dependency name"))
            })?;
            if dependencies.contains(&class) {
                return Err(schema_error(
                    schema_name,
                    format!("dependency '{class}' is listed twice"),
                ));
            }
            dependencies.push(class);
        }

        let mut methods = IndexMap::with_capacity(raw_methods.len());
        for (raw_method_name, raw_method) in raw_methods {
            let method_name = MethodName::new(raw_method_name).map_err(|bad| {
                schema_error(schema_name, format!("'{bad}' is not a valid method name"))
            })?;
            let method = parse_method(schema_name, &method_name, raw_method, &dependencies)?;
            methods.insert(method_name, method);
        }

        tracing::info!(
            "Parsed schema '{}' ({}, {} methods, {} dependencies)",
            name,
            storage_kind,
            methods.len(),
            dependencies.len()
        );

        Ok(Self {
            name,
            storage_kind,
            dependencies,
            methods,
        })
    }

    /// Declared parameters of `method`, in `param_list` order.
    ///
    /// This is the only ordering every emitter uses; the implicit
    /// self-handle is not part of it (see [`Schema::signature`]).
    #[must_use]
    pub fn resolve_params(method: &MethodSpec) -> &[Param] {
        &method.params
    }

    /// Return shape of `method`.
    #[must_use]
    pub const fn resolve_return(method: &MethodSpec) -> &ReturnSpec {
        &method.ret
    }

    /// Builds the ABI signature of a method: self-handle first, then the
    /// resolved parameters, then the return shape.
    #[must_use]
    pub fn signature(&self, name: &MethodName, method: &MethodSpec) -> Signature {
        Signature::new(
            Symbol::canonical(&self.name, name),
            name.clone(),
            Self::resolve_params(method),
            Self::resolve_return(method).clone(),
        )
    }

    /// Schema name.
    #[must_use]
    pub const fn name(&self) -> &ComponentName {
        &self.name
    }

    /// Storage kind of the bound instances.
    #[must_use]
    pub const fn storage_kind(&self) -> StorageKind {
        self.storage_kind
    }

    /// Classes this schema imports, in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[ClassName] {
        &self.dependencies
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = (&MethodName, &MethodSpec)> {
        self.methods.iter()
    }

    /// Number of methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Name of the generated guest wrapper class and of the bound native
    /// type: `{name}Component` for components, `{name}` for dynamic objects.
    #[must_use]
    pub fn class_name(&self) -> String {
        match self.storage_kind {
            StorageKind::Component => format!("{}Component", self.name),
            StorageKind::DynamicObject => self.name.to_string(),
        }
    }
}

fn schema_error(schema: &str, message: impl Into<String>) -> Error {
    Error::SchemaError {
        schema: schema.to_string(),
        message: message.into(),
    }
}

fn parse_method(
    schema: &str,
    method_name: &MethodName,
    raw: RawMethod,
    dependencies: &[ClassName],
) -> Result<MethodSpec> {
    let param_list = raw.param_list.unwrap_or_default();
    let mut seen = HashSet::with_capacity(param_list.len());
    let mut params = Vec::with_capacity(param_list.len());

    for raw_param in param_list {
        let type_name = raw.params.get(&raw_param).ok_or_else(|| {
            schema_error(
                schema,
                format!("parameter '{raw_param}' of method '{method_name}' has no type in 'params'"),
            )
        })?;
        let kind = type_name.parse::<TypeRef>()?;

        let name = ParamName::new(raw_param).map_err(|bad| {
            schema_error(
                schema,
                format!("'{bad}' is not a valid parameter name in method '{method_name}'"),
            )
        })?;
        if name.as_str() == Signature::SELF_PARAM {
            return Err(schema_error(
                schema,
                format!(
                    "method '{method_name}' lists '{}', which is reserved for the implicit handle",
                    Signature::SELF_PARAM
                ),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(schema_error(
                schema,
                format!("parameter '{name}' appears twice in method '{method_name}'"),
            ));
        }

        params.push(Param { name, kind });
    }

    for unused in raw.params.keys().filter(|key| !seen.iter().any(|p| p.as_str() == *key)) {
        tracing::debug!("Ignoring '{unused}' in '{schema}.{method_name}': not in param_list");
    }

    let ret = match (raw.return_type, raw.return_class) {
        (Some(_), Some(_)) => {
            return Err(schema_error(
                schema,
                format!("method '{method_name}' sets both 'return' and 'return_class'"),
            ));
        }
        (Some(type_name), None) => ReturnSpec::Primitive(type_name.parse::<TypeRef>()?),
        (None, Some(class)) => {
            let class = ClassName::new(class).map_err(|bad| {
                schema_error(
                    schema,
                    format!("'{bad}' is not a valid return_class in method '{method_name}'"),
                )
            })?;
            if !dependencies.contains(&class) {
                return Err(schema_error(
                    schema,
                    format!(
                        "method '{method_name}' returns '{class}', which is not listed in 'dependencies'"
                    ),
                ));
            }
            ReturnSpec::ClassReference(class)
        }
        (None, None) => ReturnSpec::None,
    };

    Ok(MethodSpec {
        params,
        ret,
        brief: raw.brief,
    })
}
