//! Unified error type hierarchy for vcbuild
//!
//! Provides structured error handling with ConfigError, PhaseError and the
//! top-level BuildError that maps onto process exit codes.

use std::io;
use thiserror::Error;

/// Environment, argument and project layout errors.
///
/// Everything in here fails the run before any subprocess is spawned.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is not set or empty")]
    EnvVarMissing(String),

    #[error("Toolchain binary not found: {0}")]
    ToolMissing(String),

    #[error("Source file not found: {0}")]
    SourceMissing(String),

    #[error("Failed to create build directory '{path}': {source}")]
    BuildDirCreate { path: String, source: io::Error },

    #[error("No build phase specified")]
    MissingPhase,

    #[error("Unknown build phase: '{0}'")]
    UnknownPhase(String),

    #[error("Phase '{0}' cannot chain into link")]
    InvalidChain(String),

    #[error("Unexpected argument: '{0}'")]
    UnexpectedArgument(String),

    #[error("IO error resolving project paths: {0}")]
    IoError(#[from] io::Error),
}

/// Tool invocation errors.
#[derive(Error, Debug)]
pub enum PhaseError {
    #[error("Failed to start '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("Phase '{phase}' failed with exit code {code}")]
    ToolFailed { phase: String, code: i32 },
}

/// Global error type for all vcbuild modules.
///
/// The binary maps this onto the process exit code in exactly one place;
/// library code never exits the process itself.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Phase(#[from] PhaseError),
}

impl BuildError {
    /// Process exit code for this error.
    ///
    /// Configuration and spawn failures exit 1; a tool's nonzero exit code
    /// is propagated verbatim.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Config(_) => 1,
            BuildError::Phase(PhaseError::Spawn { .. }) => 1,
            BuildError::Phase(PhaseError::ToolFailed { code, .. }) => *code,
        }
    }
}

/// Top-level result type for operations that may fail.
/// Use this as the return type for all fallible functions.
pub type Result<T> = std::result::Result<T, BuildError>;
