//! Emission targets.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A closed set of emission targets.
///
/// # Examples
///
/// ```
/// use classdef_core::Target;
///
/// let target: Target = "wasm-linker".parse().unwrap();
/// assert_eq!(target, Target::WasmLinker);
///
/// assert!("cpp-binding".parse::<Target>().unwrap_err().is_usage_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// AssemblyScript `.d.ts` declarations imported by guest scripts.
    AsBinding,
    /// C++ function-type descriptors and trampolines linked into the host.
    WasmLinker,
}

impl Target {
    /// Every target, in selector order.
    pub const ALL: [Self; 2] = [Self::AsBinding, Self::WasmLinker];

    /// Returns the command-line selector for this target.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AsBinding => "as-binding",
            Self::WasmLinker => "wasm-linker",
        }
    }

    /// Human-readable artifact kind used in the generated header.
    #[must_use]
    pub const fn artifact_description(&self) -> &'static str {
        match self {
            Self::AsBinding => "AssemblyScript bindings",
            Self::WasmLinker => "linking implementation",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| Error::InvalidTarget(s.to_string()))
    }
}
