//! Command implementations.

pub mod generate;

use classdef_core::cli::ExitCode;

/// Exit code for a failed run.
///
/// Library errors carry their own code; anything else only happens
/// while printing the summary.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<classdef_core::Error>())
        .map_or(ExitCode::IO_ERROR, classdef_core::Error::exit_code)
}
