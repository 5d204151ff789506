use super::{GuestDeclaration, GuestParam};
use crate::code_builder::{CodeBuilder, GeneratedArtifact};
use crate::docs::{DOC_MARGIN, doc_comment};
use crate::emitter::EmitContext;
use classdef_core::{MethodName, MethodSpec, Result, ReturnSpec, Signature, Target};
use serde::Serialize;

/// Return spelling of a method without a result.
const VOID_TYPE: &str = "void";

#[derive(Serialize)]
struct ClassView<'a> {
    class_name: &'a str,
}

#[derive(Serialize)]
struct MethodView<'a> {
    doc: Option<String>,
    symbol: &'a str,
    method: &'a str,
    params: String,
    return_type: &'a str,
}

/// Emits the AssemblyScript wrapper class of a schema.
///
/// Construction writes the header, one import per dependency and the
/// class opening; [`finish`](Self::finish) closes the class and adds the
/// default export.
#[derive(Debug)]
pub struct GuestDeclarationEmitter<'s> {
    ctx: EmitContext<'s>,
    class_name: String,
    builder: CodeBuilder,
    declarations: Vec<GuestDeclaration>,
}

impl<'s> GuestDeclarationEmitter<'s> {
    /// Target this emitter produces.
    pub const TARGET: Target = Target::AsBinding;

    /// Starts the artifact for `ctx.schema`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`](classdef_core::Error::TemplateError)
    /// if the prologue fails to render.
    pub fn new(ctx: EmitContext<'s>) -> Result<Self> {
        let class_name = ctx.schema.class_name();
        let mut builder = CodeBuilder::new(&ctx.header(Self::TARGET)?);

        let dependencies = ctx.schema.dependencies();
        for dependency in dependencies {
            builder.push_block(&ctx.engine.render(
                "guest/import",
                &ClassView {
                    class_name: dependency.as_str(),
                },
            )?);
        }
        if !dependencies.is_empty() {
            builder.push_blank();
        }

        builder.push_block(&ctx.engine.render(
            "guest/class_open",
            &ClassView {
                class_name: &class_name,
            },
        )?);

        Ok(Self {
            ctx,
            class_name,
            builder,
            declarations: Vec::new(),
        })
    }

    /// Emits the declaration of one method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`](classdef_core::Error::UnknownType) if
    /// a parameter or return kind has no guest token.
    pub fn add_method(&mut self, name: &MethodName, method: &MethodSpec) -> Result<()> {
        let signature = self.ctx.schema.signature(name, method);
        let declaration = self.declare(&signature, method.brief())?;

        let params = declaration
            .explicit_params()
            .iter()
            .map(|param| format!("{}: {}", param.name, param.token))
            .collect::<Vec<_>>()
            .join(", ");

        let text = self.ctx.engine.render(
            "guest/method",
            &MethodView {
                doc: declaration
                    .brief
                    .as_deref()
                    .and_then(|brief| doc_comment("brief", brief, 2, DOC_MARGIN)),
                symbol: declaration.symbol.as_str(),
                method: declaration.method.as_str(),
                params,
                return_type: &declaration.return_type,
            },
        )?;
        self.builder.push_block(&text);

        tracing::debug!(
            "Declared {} ({} params) -> {}",
            declaration.symbol,
            declaration.params.len(),
            declaration.return_type
        );
        self.declarations.push(declaration);
        Ok(())
    }

    fn declare(&self, signature: &Signature, brief: Option<&str>) -> Result<GuestDeclaration> {
        let mapper = &self.ctx.config.type_mapper;
        let tokens = mapper.map_all(&signature.param_kinds(), Self::TARGET)?;

        let params = signature
            .params()
            .iter()
            .zip(tokens)
            .map(|(param, token)| GuestParam {
                name: param.name.clone(),
                kind: param.kind,
                token,
            })
            .collect();

        let return_type = match signature.ret() {
            ReturnSpec::None => VOID_TYPE.to_string(),
            ReturnSpec::Primitive(kind) => mapper.map(*kind, Self::TARGET)?.to_string(),
            ReturnSpec::ClassReference(class) => class.to_string(),
        };

        Ok(GuestDeclaration {
            symbol: signature.symbol().clone(),
            method: signature.method().clone(),
            params,
            return_type,
            result_kinds: signature.result_kinds(),
            brief: brief.map(str::to_string),
        })
    }

    /// Declarations emitted so far, in method order.
    #[must_use]
    pub fn declarations(&self) -> &[GuestDeclaration] {
        &self.declarations
    }

    /// Closes the class and seals the artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`](classdef_core::Error::TemplateError)
    /// if the epilogue fails to render.
    pub fn finish(self) -> Result<GeneratedArtifact> {
        let epilogue = self.ctx.engine.render(
            "guest/epilogue",
            &ClassView {
                class_name: &self.class_name,
            },
        )?;
        tracing::info!(
            "Finished guest bindings for {} ({} methods)",
            self.class_name,
            self.declarations.len()
        );
        Ok(self.builder.finish(&epilogue))
    }
}
