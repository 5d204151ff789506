//! Generator configuration.
//!
//! A [`GeneratorConfig`] is built once per run and handed to every
//! emitter. It carries the header text, the C++ names the host linkage
//! refers to, and the [`TypeMapper`] tables. Everything has a built-in
//! default; a TOML file may override any part of it.
//!
//! # Examples
//!
//! ```
//! use classdef_core::{GeneratorConfig, Target, TypeRef};
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     [preamble]
//!     project = "Mondradiko scripting API"
//!     url = "https://mondradiko.github.io/"
//!
//!     [host]
//!     namespace = "mondradiko"
//!
//!     [types.as-binding]
//!     self = "usize"
//! "#).unwrap();
//!
//! assert_eq!(config.host.namespace, "mondradiko");
//! let token = config.type_mapper.map(TypeRef::SelfHandle, Target::AsBinding).unwrap();
//! assert_eq!(token.as_str(), "usize");
//! ```

use crate::{Error, Result, Target, TypeMapper, TypeRef};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Text placed at the top of every generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreambleConfig {
    /// Project display name, e.g. "Mondradiko scripting API"
    pub project: String,
    /// Optional project URL printed under the title line
    pub url: Option<String>,
}

impl Default for PreambleConfig {
    fn default() -> Self {
        Self {
            project: "Scripting API".to_string(),
            url: None,
        }
    }
}

/// C++ names the host linkage refers to.
///
/// Header patterns are Handlebars templates over `class_name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Outer namespace of the engine
    pub namespace: String,
    /// Namespace holding the generated function-type constructors
    pub codegen_namespace: String,
    /// Namespace of the bound native classes
    pub core_namespace: String,
    /// Header declaring `linkComponentMethod` / `linkDynamicObjectMethod`
    pub common_header: String,
    /// Include path pattern for component classes
    pub component_header: String,
    /// Include path pattern for dynamic object classes
    pub dynamic_object_header: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            namespace: "engine".to_string(),
            codegen_namespace: "codegen".to_string(),
            core_namespace: "core".to_string(),
            common_header: "codegen/linker_common.h".to_string(),
            component_header: "core/components/{{class_name}}.h".to_string(),
            dynamic_object_header: "core/scripting/{{class_name}}.h".to_string(),
        }
    }
}

/// Configuration file as written on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    preamble: PreambleConfig,
    host: HostConfig,
    /// target selector -> type spelling -> token
    types: BTreeMap<String, BTreeMap<String, String>>,
}

/// Immutable configuration of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    /// Artifact header
    pub preamble: PreambleConfig,
    /// Host-side C++ names
    pub host: HostConfig,
    /// Type tables for every target
    pub type_mapper: TypeMapper,
}

impl GeneratorConfig {
    /// Parses a TOML configuration, falling back to defaults for anything
    /// it leaves out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML, has
    /// unknown keys, or overrides a type for an unknown target or kind.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("failed to parse configuration: {e}"),
        })?;

        let mut type_mapper = TypeMapper::builtin();
        for (selector, overrides) in file.types {
            let target = selector.parse::<Target>().map_err(|_| Error::ConfigError {
                message: format!("unknown target '{selector}' in [types]"),
            })?;
            for (spelling, token) in overrides {
                let kind = spelling.parse::<TypeRef>().map_err(|_| Error::ConfigError {
                    message: format!("unknown type '{spelling}' in [types.{selector}]"),
                })?;
                if token.trim().is_empty() {
                    return Err(Error::ConfigError {
                        message: format!("empty token for '{spelling}' in [types.{selector}]"),
                    });
                }
                tracing::debug!("Overriding {kind} for {target}: {token}");
                type_mapper = type_mapper.with_override(target, kind, token);
            }
        }

        Ok(Self {
            preamble: file.preamble,
            host: file.host,
            type_mapper,
        })
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IoError`] if the file cannot be read, otherwise the
    /// errors of [`GeneratorConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::info!("Loaded generator configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Replaces the type tables, keeping everything else.
    #[must_use]
    pub fn with_type_mapper(mut self, type_mapper: TypeMapper) -> Self {
        self.type_mapper = type_mapper;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.preamble.project, "Scripting API");
        assert_eq!(config.preamble.url, None);
        assert_eq!(config.host.codegen_namespace, "codegen");
        assert_eq!(config.type_mapper, TypeMapper::builtin());
    }

    #[test]
    fn test_empty_text_is_default() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            [host]
            namespace = "mondradiko"
            "#,
        )
        .unwrap();
        assert_eq!(config.host.namespace, "mondradiko");
        assert_eq!(config.host.common_header, "codegen/linker_common.h");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GeneratorConfig::from_toml_str(
            r#"
            [host]
            namespaces = "typo"
            "#,
        )
        .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_unknown_override_target() {
        let err = GeneratorConfig::from_toml_str(
            r#"
            [types.rust-binding]
            double = "f64"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("rust-binding"));
    }

    #[test]
    fn test_unknown_override_type() {
        let err = GeneratorConfig::from_toml_str(
            r#"
            [types.wasm-linker]
            vec3 = "WASM_V128"
            "#,
        )
        .unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("vec3"));
    }

    #[test]
    fn test_empty_override_token() {
        let err = GeneratorConfig::from_toml_str(
            r#"
            [types.wasm-linker]
            double = " "
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty token"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[preamble]\nproject = \"Test API\"").unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.preamble.project, "Test API");
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load("/nonexistent/classdef.toml").unwrap_err();
        assert!(err.is_io_error());
    }
}
