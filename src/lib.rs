//! vcbuild: MSVC build orchestrator.
//!
//! Drives cl.exe and link.exe over a fixed C++ project layout. The
//! toolchain is resolved from the `VCToolsInstallDir` environment variable,
//! the path table is derived from the current working directory, and one of
//! four phases runs per invocation: clean, precompile, compile or link
//! (compile can chain into link when the compile step exits 0).
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy and exit-code mapping
//! - **models**: Phases, requests and outcome types
//! - **logging**: Console logger behind the `log` facade
//! - **toolchain**: Toolchain resolution from the environment
//! - **project**: Path table derivation and MSVC argument assembly
//! - **orchestrator**: Phase execution and run state tracking

// Core foundational modules
pub mod error;
pub mod models;

// Console logging behind the `log` facade
pub mod logging;

// Toolchain resolution from the environment
pub mod toolchain;

// Path table and MSVC argument tables
pub mod project;

// Phase execution and run state tracking
pub mod orchestrator;

// Re-export the log crate for macro usage
pub use log;

// Re-export error types for easy access
pub use error::{BuildError, ConfigError, PhaseError, Result};

// Re-export model types for easy access
pub use models::{CleanSummary, Phase, PhaseOutcome, PhaseRequest, ProcessResult};

// Re-export logging setup
pub use logging::{init as init_logging, ColorMode};

// Re-export the toolchain resolver
pub use toolchain::{Toolchain, TOOLS_ENV_VAR};

// Re-export the path table
pub use project::ProjectLayout;

// Re-export the orchestrator and its state machine
pub use orchestrator::{Orchestrator, RunState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
