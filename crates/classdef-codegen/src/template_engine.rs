//! Handlebars printer for emission records.
//!
//! Every piece of generated text goes through a template compiled into
//! the binary. Emitters build serializable views of their records and
//! hand them to [`TemplateEngine::render`]; they never concatenate
//! target syntax themselves.
//!
//! # Examples
//!
//! ```
//! use classdef_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let line = engine
//!     .render("guest/import", &json!({"class_name": "TransformComponent"}))
//!     .unwrap();
//! assert_eq!(line, "import TransformComponent from \"./TransformComponent\";\n");
//! ```

use classdef_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Built-in templates, keyed by registration name.
const TEMPLATES: &[(&str, &str)] = &[
    ("header", include_str!("../templates/header.hbs")),
    ("guest/import", include_str!("../templates/guest/import.hbs")),
    (
        "guest/class_open",
        include_str!("../templates/guest/class_open.hbs"),
    ),
    ("guest/method", include_str!("../templates/guest/method.hbs")),
    (
        "guest/epilogue",
        include_str!("../templates/guest/epilogue.hbs"),
    ),
    (
        "host/prologue",
        include_str!("../templates/host/prologue.hbs"),
    ),
    (
        "host/valtype_vec",
        include_str!("../templates/host/valtype_vec.hbs"),
    ),
    (
        "host/functype",
        include_str!("../templates/host/functype.hbs"),
    ),
    (
        "host/link_component",
        include_str!("../templates/host/link_component.hbs"),
    ),
    (
        "host/link_dynamic_object",
        include_str!("../templates/host/link_dynamic_object.hbs"),
    ),
    (
        "host/epilogue",
        include_str!("../templates/host/epilogue.hbs"),
    ),
];

/// Template engine for binding generation.
///
/// Strict mode is on, so a view missing a field is a render error rather
/// than an empty string. HTML escaping is off: the output is source code.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; one engine can serve any number of
/// independent generation runs.
#[derive(Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Creates an engine with every built-in template registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    template: (*name).to_string(),
                    message: format!("failed to register: {e}"),
                })?;
        }

        tracing::debug!("Registered {} templates", TEMPLATES.len());
        Ok(Self { handlebars })
    }

    /// Renders a registered template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered
    /// or the context lacks a field the template uses.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                template: template_name.to_string(),
                message: e.to_string(),
            })
    }

    /// Renders an ad hoc template string, such as a configured include
    /// path pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the pattern does not compile or
    /// references a field the context lacks.
    pub fn render_pattern<T: Serialize>(&self, pattern: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(pattern, context)
            .map_err(|e| Error::TemplateError {
                template: pattern.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_every_builtin_template_registered() {
        let engine = TemplateEngine::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(engine.handlebars.has_template(name), "{name}");
        }
    }

    #[test]
    fn test_header_without_url() {
        let engine = TemplateEngine::new().unwrap();
        let header = engine
            .render(
                "header",
                &json!({
                    "project": "Scripting API",
                    "description": "AssemblyScript bindings",
                    "schema": "Transform",
                    "url": null
                }),
            )
            .unwrap();

        let lines: Vec<_> = header.lines().collect();
        assert_eq!(
            lines,
            [
                "// Scripting API: AssemblyScript bindings for Transform",
                "// Generated by classdef-gen. Do not edit.",
                "",
            ]
        );
    }

    #[test]
    fn test_header_with_url() {
        let engine = TemplateEngine::new().unwrap();
        let header = engine
            .render(
                "header",
                &json!({
                    "project": "Scripting API",
                    "description": "linking implementation",
                    "schema": "Transform",
                    "url": "https://example.org/"
                }),
            )
            .unwrap();
        assert!(header.contains("\n// https://example.org/\n"));
    }

    #[test]
    fn test_no_html_escaping() {
        let engine = TemplateEngine::new().unwrap();
        let line = engine
            .render(
                "host/link_component",
                &json!({
                    "codegen_namespace": "codegen",
                    "class_name": "TransformComponent",
                    "method": "setPosition",
                    "symbol": "Transform_setPosition",
                    "descriptor": "methodType_TransformComponent_setPosition"
                }),
            )
            .unwrap();
        assert!(line.contains("<TransformComponent, &TransformComponent::setPosition>"));
        assert!(line.contains("\"Transform_setPosition\""));
    }

    #[test]
    fn test_missing_field_is_error() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("guest/import", &json!({})).unwrap_err();
        assert!(matches!(err, Error::TemplateError { .. }));
    }

    #[test]
    fn test_unknown_template_is_error() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.render("guest/missing", &json!({})).is_err());
    }

    #[test]
    fn test_render_pattern() {
        let engine = TemplateEngine::new().unwrap();
        let path = engine
            .render_pattern(
                "core/components/{{class_name}}.h",
                &json!({"class_name": "TransformComponent"}),
            )
            .unwrap();
        assert_eq!(path, "core/components/TransformComponent.h");
    }
}
