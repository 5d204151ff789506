//! Abstract type kinds and the per-target tables that spell them.
//!
//! Every type translation in the workspace goes through [`TypeMapper::map`].
//! A table maps one [`TypeRef`] to exactly one [`TypeToken`], so a kind
//! always occupies one slot in every target; only the spelling differs.
//!
//! # Examples
//!
//! ```
//! use classdef_core::{Target, TypeMapper, TypeRef};
//!
//! let mapper = TypeMapper::builtin();
//! assert_eq!(mapper.map(TypeRef::Double, Target::AsBinding).unwrap().as_str(), "f64");
//! assert_eq!(mapper.map(TypeRef::Double, Target::WasmLinker).unwrap().as_str(), "WASM_F64");
//! ```

use crate::{Error, Result, Target};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Primitive kinds a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TypeRef {
    /// Opaque integer handle to a live host-side entity or object.
    #[serde(rename = "self")]
    SelfHandle,
    /// Boolean, passed as a 32-bit integer.
    #[serde(rename = "bool")]
    Bool,
    /// Signed 32-bit integer.
    #[serde(rename = "int")]
    Int,
    /// Unsigned 32-bit integer.
    #[serde(rename = "uint")]
    Uint,
    /// Signed 64-bit integer.
    #[serde(rename = "int64")]
    Int64,
    /// Single-precision float.
    #[serde(rename = "float")]
    Float,
    /// Double-precision float.
    #[serde(rename = "double")]
    Double,
}

impl TypeRef {
    /// Every declared kind.
    pub const ALL: [Self; 7] = [
        Self::SelfHandle,
        Self::Bool,
        Self::Int,
        Self::Uint,
        Self::Int64,
        Self::Float,
        Self::Double,
    ];

    /// Returns the schema spelling of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelfHandle => "self",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownType {
                type_name: s.to_string(),
                target: None,
            })
    }
}

/// A target-specific spelling of one [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeToken(String);

impl TypeToken {
    /// Creates a token from its rendered text.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping table for a single target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    entries: BTreeMap<TypeRef, TypeToken>,
}

impl TypeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the token for `kind`.
    #[must_use]
    pub fn with(mut self, kind: TypeRef, token: impl Into<String>) -> Self {
        self.insert(kind, token);
        self
    }

    /// Adds or replaces the token for `kind` in place.
    pub fn insert(&mut self, kind: TypeRef, token: impl Into<String>) {
        self.entries.insert(kind, TypeToken::new(token));
    }

    /// Looks up the token for `kind`.
    #[must_use]
    pub fn get(&self, kind: TypeRef) -> Option<&TypeToken> {
        self.entries.get(&kind)
    }

    /// Number of kinds the table covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default guest table: AssemblyScript value types.
    #[must_use]
    pub fn builtin_guest() -> Self {
        Self::new()
            .with(TypeRef::SelfHandle, "i32")
            .with(TypeRef::Bool, "bool")
            .with(TypeRef::Int, "i32")
            .with(TypeRef::Uint, "u32")
            .with(TypeRef::Int64, "i64")
            .with(TypeRef::Float, "f32")
            .with(TypeRef::Double, "f64")
    }

    /// Default host table: `wasm_valkind_t` constants of the C API.
    #[must_use]
    pub fn builtin_host() -> Self {
        Self::new()
            .with(TypeRef::SelfHandle, "WASM_I32")
            .with(TypeRef::Bool, "WASM_I32")
            .with(TypeRef::Int, "WASM_I32")
            .with(TypeRef::Uint, "WASM_I32")
            .with(TypeRef::Int64, "WASM_I64")
            .with(TypeRef::Float, "WASM_F32")
            .with(TypeRef::Double, "WASM_F64")
    }
}

/// Immutable set of per-target tables, built once and shared by every
/// emitter of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapper {
    tables: BTreeMap<Target, TypeTable>,
}

impl TypeMapper {
    /// Tables for every built-in target.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_tables([
            (Target::AsBinding, TypeTable::builtin_guest()),
            (Target::WasmLinker, TypeTable::builtin_host()),
        ])
    }

    /// Builds a mapper from explicit tables.
    ///
    /// Targets left out have no entries at all, so every lookup for them
    /// fails with [`Error::UnknownType`].
    #[must_use]
    pub fn from_tables(tables: impl IntoIterator<Item = (Target, TypeTable)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// Translates `kind` into `target`'s token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if the target's table has no entry
    /// for `kind`.
    pub fn map(&self, kind: TypeRef, target: Target) -> Result<&TypeToken> {
        self.tables
            .get(&target)
            .and_then(|table| table.get(kind))
            .ok_or_else(|| Error::UnknownType {
                type_name: kind.as_str().to_string(),
                target: Some(target.as_str().to_string()),
            })
    }

    /// Translates a kind sequence, preserving its order and length.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::UnknownType`] encountered.
    pub fn map_all(&self, kinds: &[TypeRef], target: Target) -> Result<Vec<TypeToken>> {
        kinds
            .iter()
            .map(|&kind| self.map(kind, target).cloned())
            .collect()
    }

    /// Returns the table for `target`, if any.
    #[must_use]
    pub fn table(&self, target: Target) -> Option<&TypeTable> {
        self.tables.get(&target)
    }

    /// Replaces a single token, keeping every other entry.
    #[must_use]
    pub fn with_override(mut self, target: Target, kind: TypeRef, token: impl Into<String>) -> Self {
        self.tables.entry(target).or_default().insert(kind, token);
        self
    }
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::builtin()
    }
}
