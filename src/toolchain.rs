//! MSVC toolchain resolution.
//!
//! The toolchain is located strictly through the environment: the
//! `VCToolsInstallDir` variable names the toolset root and the compiler and
//! linker sit at fixed host/target suffixes below it. Resolution happens
//! before any filesystem mutation, so a run with a broken environment
//! leaves no trace behind.

use crate::error::ConfigError;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the MSVC toolset root.
pub const TOOLS_ENV_VAR: &str = "VCToolsInstallDir";

/// Compiler location relative to the toolset root.
const COMPILER_SUFFIX: &str = "bin/HostX64/x64/cl.exe";
/// Linker location relative to the toolset root.
const LINKER_SUFFIX: &str = "bin/HostX64/x64/link.exe";

/// Resolved MSVC toolchain.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub root: PathBuf,     // Toolset root from the environment
    pub compiler: PathBuf, // cl.exe
    pub linker: PathBuf,   // link.exe
}

impl Toolchain {
    /// Resolve the toolchain from `VCToolsInstallDir`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(TOOLS_ENV_VAR)
    }

    /// Resolve the toolchain from an arbitrary environment variable.
    ///
    /// Tests use private variable names here to stay hermetic.
    pub fn from_env_var(var: &str) -> Result<Self, ConfigError> {
        let root = env::var(var)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::EnvVarMissing(var.to_string()))?;
        Self::from_root(PathBuf::from(root))
    }

    /// Resolve the toolchain from an explicit toolset root.
    ///
    /// Both binaries must exist on disk; the first missing one is reported.
    pub fn from_root(root: PathBuf) -> Result<Self, ConfigError> {
        let compiler = root.join(COMPILER_SUFFIX);
        let linker = root.join(LINKER_SUFFIX);
        ensure_tool(&compiler)?;
        ensure_tool(&linker)?;

        Ok(Toolchain {
            root,
            compiler,
            linker,
        })
    }
}

fn ensure_tool(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::ToolMissing(path.display().to_string()))
    }
}
