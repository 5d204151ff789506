//! CLI argument definitions and parsing.
//!
//! `classdef-gen [OPTIONS] <TARGET> <INPUT> <OUTPUT>`

use clap::{Parser, ValueEnum};
use classdef_core::Target;
use std::path::PathBuf;

/// Generates WASM guest bindings and host linkage from classdef schemas.
///
/// Each run reads one schema and writes one artifact. Run it once per
/// target to get both sides of the boundary.
#[derive(Parser, Debug)]
#[command(name = "classdef-gen")]
#[command(version, about, long_about = None)]
#[command(author = "Classdef Bindgen Team")]
pub struct Cli {
    /// Artifact to generate
    #[arg(value_enum)]
    pub target: TargetSelector,

    /// Schema file (TOML)
    pub input: PathBuf,

    /// Path of the generated artifact
    pub output: PathBuf,

    /// Generator configuration file (TOML)
    #[arg(short, long, env = "CLASSDEF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Summary format (json, text, pretty)
    #[arg(long = "format", default_value = "text")]
    pub format: String,

    /// Do not print the summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Command-line spelling of a [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetSelector {
    /// AssemblyScript declarations for guest scripts
    AsBinding,
    /// C++ linkage compiled into the host
    WasmLinker,
}

impl From<TargetSelector> for Target {
    fn from(selector: TargetSelector) -> Self {
        match selector {
            TargetSelector::AsBinding => Self::AsBinding,
            TargetSelector::WasmLinker => Self::WasmLinker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_parsing_positionals() {
        let cli = Cli::parse_from(["classdef-gen", "as-binding", "Transform.toml", "Transform.ts"]);
        assert_eq!(cli.target, TargetSelector::AsBinding);
        assert_eq!(cli.input, PathBuf::from("Transform.toml"));
        assert_eq!(cli.output, PathBuf::from("Transform.ts"));
        assert_eq!(cli.format, "text");
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_parsing_options() {
        let cli = Cli::parse_from([
            "classdef-gen",
            "--verbose",
            "--format",
            "json",
            "--config",
            "classdef.toml",
            "wasm-linker",
            "Transform.toml",
            "Transform.cc",
        ]);
        assert_eq!(cli.target, TargetSelector::WasmLinker);
        assert!(cli.verbose);
        assert_eq!(cli.format, "json");
        assert_eq!(cli.config, Some(PathBuf::from("classdef.toml")));
    }

    #[test]
    fn test_selector_maps_to_target() {
        for (selector, target) in [
            (TargetSelector::AsBinding, Target::AsBinding),
            (TargetSelector::WasmLinker, Target::WasmLinker),
        ] {
            assert_eq!(Target::from(selector), target);
            assert_eq!(
                selector.to_possible_value().unwrap().get_name(),
                target.as_str()
            );
        }
    }

    #[test]
    fn test_unknown_target_rejected() {
        let err = Cli::try_parse_from(["classdef-gen", "cpp-binding", "a.toml", "a.h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_missing_arguments_rejected() {
        let err = Cli::try_parse_from(["classdef-gen", "as-binding", "a.toml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_arguments_rejected() {
        let err = Cli::try_parse_from(["classdef-gen", "as-binding", "a.toml", "a.ts", "b.ts"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Cli::try_parse_from(["classdef-gen", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
