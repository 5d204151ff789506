//! Strong name types for schema identifiers.
//!
//! Component, method and dependency names end up verbatim in two source
//! languages (AssemblyScript and C++), so they are validated once at the
//! schema boundary and carried as newtypes afterwards.
//!
//! # Examples
//!
//! ```
//! use classdef_core::{ComponentName, MethodName, Symbol};
//!
//! let component = ComponentName::new("Transform").unwrap();
//! let method = MethodName::new("setPosition").unwrap();
//!
//! let symbol = Symbol::canonical(&component, &method);
//! assert_eq!(symbol.as_str(), "Transform_setPosition");
//! ```

use serde::Serialize;
use std::fmt;

/// Keywords of AssemblyScript and C++, sorted. A schema name is printed
/// verbatim into both languages, so none of these can be used.
const RESERVED_WORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "arguments", "asm", "auto", "await", "bitand",
    "bitor", "bool", "break", "case", "catch", "char", "char16_t", "char32_t", "char8_t",
    "class", "co_await", "co_return", "co_yield", "compl", "concept", "const", "const_cast",
    "consteval", "constexpr", "constinit", "continue", "debugger", "decltype", "default",
    "delete", "do", "double", "dynamic_cast", "else", "enum", "eval", "explicit", "export",
    "extends", "extern", "false", "finally", "float", "for", "friend", "function", "goto",
    "if", "implements", "import", "in", "inline", "instanceof", "int", "interface", "let",
    "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq", "null", "nullptr",
    "operator", "or", "or_eq", "package", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "super", "switch", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "typeof", "union",
    "unsigned", "using", "var", "virtual", "void", "volatile", "wchar_t", "while", "with",
    "xor", "xor_eq", "yield",
];

/// Checks whether `name` is a keyword in either output language.
fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

/// Checks that `name` is a plain ASCII identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

macro_rules! identifier_newtype {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a validated ", $what, ".")]
            ///
            /// # Errors
            ///
            /// Returns the rejected name if it is empty, not an ASCII
            /// identifier (`[A-Za-z_][A-Za-z0-9_]*`) or a reserved word.
            pub fn new(name: impl Into<String>) -> std::result::Result<Self, String> {
                let name = name.into();
                if is_identifier(&name) && !is_reserved_word(&name) {
                    Ok(Self(name))
                } else {
                    Err(name)
                }
            }

            #[doc = concat!("Returns the ", $what, " as a string slice.")]
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

identifier_newtype!(
    /// Name of a bound component or dynamic object (the schema `name`).
    ComponentName,
    "component name"
);

identifier_newtype!(
    /// Name of a bound method.
    MethodName,
    "method name"
);

identifier_newtype!(
    /// Name of a method parameter.
    ParamName,
    "parameter name"
);

identifier_newtype!(
    /// Name of another generated class, as used in `dependencies` and
    /// `return_class`.
    ClassName,
    "class name"
);

impl ParamName {
    /// Name of the implicit handle parameter.
    pub(crate) fn self_handle() -> Self {
        Self(crate::Signature::SELF_PARAM.to_string())
    }
}

/// Import symbol shared by the guest declaration and the host trampoline.
///
/// Both artifacts spell the symbol through [`Symbol::canonical`], which is
/// the only constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Builds the canonical `{Component}_{method}` symbol.
    #[must_use]
    pub fn canonical(component: &ComponentName, method: &MethodName) -> Self {
        Self(format!("{component}_{method}"))
    }

    /// Returns the symbol as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
