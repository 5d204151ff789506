use super::{DispatchPath, FunctionTypeDescriptor, TrampolineRegistration};
use crate::code_builder::{CodeBuilder, GeneratedArtifact};
use crate::emitter::EmitContext;
use classdef_core::{HostConfig, MethodName, MethodSpec, Result, Signature, Target, TypeRef, TypeToken};
use serde::Serialize;

#[derive(Serialize)]
struct ClassView<'a> {
    class_name: &'a str,
}

#[derive(Serialize)]
struct PrologueView<'a> {
    class_header: String,
    common_header: &'a str,
    namespace: &'a str,
    codegen_namespace: &'a str,
    core_namespace: &'a str,
}

#[derive(Serialize)]
struct ValtypeVecView<'a> {
    name: &'a str,
    kinds: &'a [TypeToken],
    count: usize,
}

#[derive(Serialize)]
struct FunctypeView<'a> {
    function: &'a str,
    params: String,
    results: String,
}

#[derive(Serialize)]
struct LinkView<'a> {
    codegen_namespace: &'a str,
    class_name: &'a str,
    method: &'a str,
    symbol: &'a str,
    descriptor: &'a str,
}

#[derive(Serialize)]
struct EpilogueView<'a> {
    namespace: &'a str,
    codegen_namespace: &'a str,
    core_namespace: &'a str,
    class_name: &'a str,
    registrations: Vec<String>,
}

/// Emits the C++ linkage of a schema against the engine's C API.
///
/// The dispatch path is fixed at construction from the schema's storage
/// kind and applies to every registration.
#[derive(Debug)]
pub struct HostLinkageEmitter<'s> {
    ctx: EmitContext<'s>,
    class_name: String,
    dispatch: DispatchPath,
    builder: CodeBuilder,
    descriptors: Vec<FunctionTypeDescriptor>,
    registrations: Vec<TrampolineRegistration>,
}

impl<'s> HostLinkageEmitter<'s> {
    /// Target this emitter produces.
    pub const TARGET: Target = Target::WasmLinker;

    /// Starts the artifact: header, includes and namespace openings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`](classdef_core::Error::TemplateError)
    /// if the prologue or the configured include pattern fails to render.
    pub fn new(ctx: EmitContext<'s>) -> Result<Self> {
        let class_name = ctx.schema.class_name();
        let dispatch = DispatchPath::for_storage(ctx.schema.storage_kind());
        let host = &ctx.config.host;

        let header_pattern = match dispatch {
            DispatchPath::EntityRegistry => &host.component_header,
            DispatchPath::DirectObject => &host.dynamic_object_header,
        };
        let class_header = ctx.engine.render_pattern(
            header_pattern,
            &ClassView {
                class_name: &class_name,
            },
        )?;

        let mut builder = CodeBuilder::new(&ctx.header(Self::TARGET)?);
        builder.push_block(&ctx.engine.render(
            "host/prologue",
            &PrologueView {
                class_header,
                common_header: &host.common_header,
                namespace: &host.namespace,
                codegen_namespace: &host.codegen_namespace,
                core_namespace: &host.core_namespace,
            },
        )?);

        tracing::debug!("Host linkage for {class_name} dispatches via {dispatch:?}");

        Ok(Self {
            ctx,
            class_name,
            dispatch,
            builder,
            descriptors: Vec::new(),
            registrations: Vec::new(),
        })
    }

    const fn host(&self) -> &HostConfig {
        &self.ctx.config.host
    }

    /// Emits the descriptor constructor of one method and records its
    /// registration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`](classdef_core::Error::UnknownType) if
    /// a kind has no host token.
    pub fn add_method(&mut self, name: &MethodName, method: &MethodSpec) -> Result<()> {
        let signature = self.ctx.schema.signature(name, method);
        let descriptor = self.describe(&signature)?;

        let text = self.ctx.engine.render(
            "host/functype",
            &FunctypeView {
                function: &descriptor.function,
                params: self.valtype_vec("params", &descriptor.param_tokens)?,
                results: self.valtype_vec("results", &descriptor.result_tokens)?,
            },
        )?;
        self.builder.push_block(&text);

        let registration = TrampolineRegistration {
            dispatch: self.dispatch,
            class_name: self.class_name.clone(),
            method: signature.method().clone(),
            symbol: signature.symbol().clone(),
            descriptor: descriptor.function.clone(),
        };

        tracing::debug!(
            "Linked {} ({} params, {} results)",
            registration.symbol,
            descriptor.param_kinds.len(),
            descriptor.result_kinds.len()
        );
        self.descriptors.push(descriptor);
        self.registrations.push(registration);
        Ok(())
    }

    fn describe(&self, signature: &Signature) -> Result<FunctionTypeDescriptor> {
        let mapper = &self.ctx.config.type_mapper;
        let param_kinds: Vec<TypeRef> = signature.param_kinds();
        let result_kinds: Vec<TypeRef> = signature.result_kinds();

        Ok(FunctionTypeDescriptor {
            function: format!("methodType_{}_{}", self.class_name, signature.method()),
            param_tokens: mapper.map_all(&param_kinds, Self::TARGET)?,
            result_tokens: mapper.map_all(&result_kinds, Self::TARGET)?,
            param_kinds,
            result_kinds,
        })
    }

    fn valtype_vec(&self, name: &str, kinds: &[TypeToken]) -> Result<String> {
        self.ctx.engine.render(
            "host/valtype_vec",
            &ValtypeVecView {
                name,
                kinds,
                count: kinds.len(),
            },
        )
    }

    /// Descriptors emitted so far, in method order.
    #[must_use]
    pub fn descriptors(&self) -> &[FunctionTypeDescriptor] {
        &self.descriptors
    }

    /// Registrations recorded so far, in method order.
    #[must_use]
    pub fn registrations(&self) -> &[TrampolineRegistration] {
        &self.registrations
    }

    /// Dispatch path of every registration.
    #[must_use]
    pub const fn dispatch(&self) -> DispatchPath {
        self.dispatch
    }

    /// Closes the codegen namespace, prints `linkScriptApi` with every
    /// registration, and seals the artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`](classdef_core::Error::TemplateError)
    /// if a registration or the epilogue fails to render.
    pub fn finish(self) -> Result<GeneratedArtifact> {
        let host = self.host();

        let registrations = self
            .registrations
            .iter()
            .map(|registration| {
                self.ctx
                    .engine
                    .render(
                        registration.dispatch.template(),
                        &LinkView {
                            codegen_namespace: &host.codegen_namespace,
                            class_name: &registration.class_name,
                            method: registration.method.as_str(),
                            symbol: registration.symbol.as_str(),
                            descriptor: &registration.descriptor,
                        },
                    )
                    .map(|line| line.trim_end().to_string())
            })
            .collect::<Result<Vec<_>>>()?;

        let epilogue = self.ctx.engine.render(
            "host/epilogue",
            &EpilogueView {
                namespace: &host.namespace,
                codegen_namespace: &host.codegen_namespace,
                core_namespace: &host.core_namespace,
                class_name: &self.class_name,
                registrations,
            },
        )?;

        tracing::info!(
            "Finished host linkage for {} ({} registrations)",
            self.class_name,
            self.registrations.len()
        );
        Ok(self.builder.finish(&epilogue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_engine::TemplateEngine;
    use classdef_core::{GeneratorConfig, RawSchema, Schema};

    const TRANSFORM: &str = r#"
        name = "Transform"
        storage_kind = "component"

        [methods.setPosition]
        param_list = ["x", "y", "z"]
        params = { x = "double", y = "double", z = "double" }

        [methods.isVisible]
        return = "bool"
    "#;

    const ENTITY: &str = r#"
        name = "Entity"
        storage_kind = "dynamic_object"
        dependencies = ["TransformComponent"]

        [methods.getTransform]
        return_class = "TransformComponent"
    "#;

    struct Emitted {
        descriptors: Vec<FunctionTypeDescriptor>,
        registrations: Vec<TrampolineRegistration>,
        text: String,
    }

    fn emit(text: &str) -> Emitted {
        let schema = Schema::parse(RawSchema::from_toml_str(text).unwrap()).unwrap();
        let config = GeneratorConfig::default();
        let engine = TemplateEngine::new().unwrap();
        let mut emitter =
            HostLinkageEmitter::new(EmitContext::new(&schema, &config, &engine)).unwrap();
        for (name, method) in schema.methods() {
            emitter.add_method(name, method).unwrap();
        }
        Emitted {
            descriptors: emitter.descriptors().to_vec(),
            registrations: emitter.registrations().to_vec(),
            text: emitter.finish().unwrap().content(),
        }
    }

    #[test]
    fn test_void_method_descriptor() {
        let emitted = emit(TRANSFORM);
        let descriptor = &emitted.descriptors[0];

        assert_eq!(descriptor.function, "methodType_TransformComponent_setPosition");
        assert_eq!(
            descriptor.param_kinds,
            [TypeRef::SelfHandle, TypeRef::Double, TypeRef::Double, TypeRef::Double]
        );
        let tokens: Vec<_> = descriptor.param_tokens.iter().map(TypeToken::as_str).collect();
        assert_eq!(tokens, ["WASM_I32", "WASM_F64", "WASM_F64", "WASM_F64"]);
        assert!(descriptor.result_kinds.is_empty());
        assert!(descriptor.result_tokens.is_empty());
    }

    #[test]
    fn test_bool_result_travels_as_i32() {
        let emitted = emit(TRANSFORM);
        let descriptor = &emitted.descriptors[1];
        assert_eq!(descriptor.result_kinds, [TypeRef::Bool]);
        assert_eq!(descriptor.result_tokens[0].as_str(), "WASM_I32");
    }

    #[test]
    fn test_component_registration() {
        let emitted = emit(TRANSFORM);
        let registration = &emitted.registrations[0];

        assert_eq!(registration.dispatch, DispatchPath::EntityRegistry);
        assert_eq!(registration.symbol.as_str(), "Transform_setPosition");
        assert_eq!(registration.class_name, "TransformComponent");
        assert!(emitted.text.contains(
            "  codegen::linkComponentMethod<TransformComponent, &TransformComponent::setPosition>(scripts, world, \"Transform_setPosition\", codegen::methodType_TransformComponent_setPosition);\n"
        ));
    }

    #[test]
    fn test_rendered_descriptor() {
        let emitted = emit(TRANSFORM);
        let expected = "\
const wasm_functype_t* methodType_TransformComponent_setPosition() {
  wasm_valtype_vec_t params;
  wasm_valtype_t* params_data[] = {
    wasm_valtype_new(WASM_I32),
    wasm_valtype_new(WASM_F64),
    wasm_valtype_new(WASM_F64),
    wasm_valtype_new(WASM_F64),
  };
  wasm_valtype_vec_new(&params, 4, params_data);

  wasm_valtype_vec_t results;
  wasm_valtype_vec_new_empty(&results);

  return wasm_functype_new(&params, &results);
}
";
        assert!(emitted.text.contains(expected), "{}", emitted.text);
    }

    #[test]
    fn test_prologue_and_epilogue() {
        let text = emit(TRANSFORM).text;

        assert!(text.contains("#include \"core/components/TransformComponent.h\"\n"));
        assert!(text.contains("#include \"codegen/linker_common.h\"\n"));
        assert!(text.contains("namespace engine {\nnamespace codegen {\n\nusing namespace core;\n"));
        assert!(text.contains(
            "}  // namespace codegen\n\nvoid core::TransformComponent::linkScriptApi(ScriptEnvironment* scripts, World* world) {\n"
        ));
        assert!(text.ends_with("}\n\n}  // namespace engine\n"));
    }

    #[test]
    fn test_dynamic_object_dispatch() {
        let emitted = emit(ENTITY);
        let registration = &emitted.registrations[0];

        assert_eq!(registration.dispatch, DispatchPath::DirectObject);
        assert_eq!(emitted.descriptors[0].result_kinds, [TypeRef::SelfHandle]);
        assert!(emitted.text.contains("#include \"core/scripting/Entity.h\"\n"));
        assert!(emitted.text.contains(
            "  codegen::linkDynamicObjectMethod<Entity, &Entity::getTransform>(scripts, \"Entity_getTransform\", codegen::methodType_Entity_getTransform);\n"
        ));
        assert!(!emitted.text.contains("linkComponentMethod"));
    }

    #[test]
    fn test_configured_names() {
        let schema = Schema::parse(RawSchema::from_toml_str(TRANSFORM).unwrap()).unwrap();
        let config = GeneratorConfig::from_toml_str(
            r#"
            [host]
            namespace = "mondradiko"
            component_header = "components/{{class_name}}.hpp"
            "#,
        )
        .unwrap();
        let engine = TemplateEngine::new().unwrap();

        let text = HostLinkageEmitter::new(EmitContext::new(&schema, &config, &engine))
            .unwrap()
            .finish()
            .unwrap()
            .content();
        assert!(text.contains("#include \"components/TransformComponent.hpp\"\n"));
        assert!(text.ends_with("}  // namespace mondradiko\n"));
    }

    #[test]
    fn test_bad_include_pattern() {
        let schema = Schema::parse(RawSchema::from_toml_str(TRANSFORM).unwrap()).unwrap();
        let config = GeneratorConfig::from_toml_str(
            r#"
            [host]
            component_header = "{{component}}.h"
            "#,
        )
        .unwrap();
        let engine = TemplateEngine::new().unwrap();

        let err = HostLinkageEmitter::new(EmitContext::new(&schema, &config, &engine)).unwrap_err();
        assert!(matches!(err, classdef_core::Error::TemplateError { .. }));
    }
}
