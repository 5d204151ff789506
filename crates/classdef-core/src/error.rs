//! Error types for classdef binding generation.
//!
//! Every failure in a generation run is fatal: there is no retry and no
//! partial success. The variants mirror the places a run can fail, from
//! malformed schemas through type resolution down to writing the artifact.
//!
//! # Examples
//!
//! ```
//! use classdef_core::{Error, Result};
//!
//! fn require_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::SchemaError {
//!             schema: "<unnamed>".to_string(),
//!             message: "missing required field 'name'".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_name("").unwrap_err();
//! assert!(err.is_schema_error());
//! assert_eq!(err.exit_code().as_i32(), 2);
//! ```

use crate::cli::ExitCode;
use thiserror::Error;

/// Main error type for binding generation.
///
/// All errors in the workspace use this type so the driver can report
/// them uniformly and choose an exit code.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed required schema fields.
    #[error("Schema error in '{schema}': {message}")]
    SchemaError {
        /// Name of the schema (or `<unnamed>` when the name itself is missing)
        schema: String,
        /// Description of the problem
        message: String,
    },

    /// A type name that has no entry in the active target's table.
    ///
    /// Raised with `target: None` when the spelling is not one of the
    /// declared primitive kinds at all.
    #[error(
        "Unknown type '{type_name}' for target {}",
        target.as_deref().unwrap_or("<any>")
    )]
    UnknownType {
        /// The type name as written in the schema
        type_name: String,
        /// Selector of the target whose table lacks the entry
        target: Option<String>,
    },

    /// The schema's `storage_kind` is not one of the known variants.
    #[error(
        "Invalid storage kind '{value}' in '{schema}' (expected: component or dynamic_object)"
    )]
    InvalidStorageKind {
        /// Name of the schema
        schema: String,
        /// The rejected value
        value: String,
    },

    /// Unrecognized target selector.
    #[error("Invalid target: '{0}' (expected: as-binding or wasm-linker)")]
    InvalidTarget(String),

    /// Wrong command-line usage.
    #[error("Usage error: {0}")]
    Usage(String),

    /// Generator configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// A code template failed to register or render.
    #[error("Template '{template}' failed: {message}")]
    TemplateError {
        /// Template name
        template: String,
        /// Underlying failure
        message: String,
    },

    /// Reading an input or writing the artifact failed.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        /// Path involved in the failed operation
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if the schema itself is malformed.
    ///
    /// An unrecognized storage kind counts as a malformed schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use classdef_core::Error;
    ///
    /// let err = Error::InvalidStorageKind {
    ///     schema: "Transform".to_string(),
    ///     value: "unknown".to_string(),
    /// };
    /// assert!(err.is_schema_error());
    /// assert!(err.is_invalid_storage_kind());
    /// ```
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaError { .. } | Self::InvalidStorageKind { .. }
        )
    }

    /// Returns `true` if this is an unknown type error.
    ///
    /// # Examples
    ///
    /// ```
    /// use classdef_core::Error;
    ///
    /// let err = Error::UnknownType {
    ///     type_name: "vec3".to_string(),
    ///     target: None,
    /// };
    /// assert!(err.is_unknown_type());
    /// assert!(!err.is_schema_error());
    /// ```
    #[must_use]
    pub const fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }

    /// Returns `true` if this is an invalid storage kind error.
    #[must_use]
    pub const fn is_invalid_storage_kind(&self) -> bool {
        matches!(self, Self::InvalidStorageKind { .. })
    }

    /// Returns `true` for driver-level argument problems.
    ///
    /// # Examples
    ///
    /// ```
    /// use classdef_core::Error;
    ///
    /// assert!(Error::InvalidTarget("cpp".to_string()).is_usage_error());
    /// assert!(Error::Usage("expected 3 arguments".to_string()).is_usage_error());
    /// ```
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidTarget(_) | Self::Usage(_))
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Maps the error to the process exit code the driver terminates with.
    ///
    /// # Examples
    ///
    /// ```
    /// use classdef_core::Error;
    /// use classdef_core::cli::ExitCode;
    ///
    /// let err = Error::InvalidTarget("cpp".to_string());
    /// assert_eq!(err.exit_code(), ExitCode::USAGE);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidTarget(_) | Self::Usage(_) => ExitCode::USAGE,
            Self::SchemaError { .. } | Self::UnknownType { .. } | Self::InvalidStorageKind { .. } => {
                ExitCode::INVALID_SCHEMA
            }
            Self::ConfigError { .. } | Self::TemplateError { .. } => ExitCode::CONFIG_ERROR,
            Self::IoError { .. } => ExitCode::IO_ERROR,
        }
    }
}

/// Result type alias for binding generation.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_detection() {
        let err = Error::SchemaError {
            schema: "Transform".to_string(),
            message: "missing required field 'methods'".to_string(),
        };
        assert!(err.is_schema_error());
        assert!(!err.is_unknown_type());
        assert!(!err.is_usage_error());
    }

    #[test]
    fn test_unknown_type_display_with_target() {
        let err = Error::UnknownType {
            type_name: "double".to_string(),
            target: Some("wasm-linker".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("'double'"));
        assert!(display.contains("wasm-linker"));
    }

    #[test]
    fn test_unknown_type_display_without_target() {
        let err = Error::UnknownType {
            type_name: "vec3".to_string(),
            target: None,
        };
        assert!(err.to_string().contains("<any>"));
    }

    #[test]
    fn test_invalid_storage_kind_display() {
        let err = Error::InvalidStorageKind {
            schema: "Transform".to_string(),
            value: "unknown".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("'unknown'"));
        assert!(display.contains("Transform"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Usage("x".to_string()).exit_code().as_i32(), 1);
        assert_eq!(Error::InvalidTarget("x".to_string()).exit_code().as_i32(), 1);
        assert_eq!(
            Error::UnknownType {
                type_name: "x".to_string(),
                target: None,
            }
            .exit_code()
            .as_i32(),
            2
        );
        assert_eq!(
            Error::ConfigError {
                message: "x".to_string(),
            }
            .exit_code()
            .as_i32(),
            3
        );
        assert_eq!(
            Error::IoError {
                path: "out.ts".to_string(),
                source: std::io::Error::other("disk full"),
            }
            .exit_code()
            .as_i32(),
            4
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::IoError {
            path: "out.ts".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.is_io_error());
        assert!(err.source().is_some());
    }
}
