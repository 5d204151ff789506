//! Core types, schema model and errors for classdef binding generation.
//!
//! This crate provides the foundational types shared by the emitters and
//! the command-line driver.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong name types (`ComponentName`, `MethodName`, `Symbol`)
//! - The validated binding [`Schema`] and its method [`Signature`]s
//! - The [`TypeMapper`] tables translating declared kinds per [`Target`]
//! - Generator configuration and the error hierarchy

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod names;
mod schema;
mod signature;
mod target;
mod type_mapper;

pub mod cli;

pub use config::{GeneratorConfig, HostConfig, PreambleConfig};
pub use error::{Error, Result};
pub use names::{ClassName, ComponentName, MethodName, ParamName, Symbol};
pub use schema::{MethodSpec, RawMethod, RawSchema, ReturnSpec, Schema, StorageKind};
pub use signature::{Param, Signature};
pub use target::Target;
pub use type_mapper::{TypeMapper, TypeRef, TypeTable, TypeToken};
