//! Project path table.
//!
//! The layout is fixed: sources sit at known names under the source root
//! and every generated artifact lands in the build directory. Deriving the
//! table is pure; the validation and build-directory helpers are the only
//! places this module touches the filesystem.

use crate::error::ConfigError;
use std::fs;
use std::path::PathBuf;

/// Name of the build directory under the source root.
pub const BUILD_DIR_NAME: &str = "build";

/// Closed table of project paths, derived once per run.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub source_root: PathBuf, // Project sources
    pub build_dir: PathBuf,   // Generated artifacts
    pub utils_dir: PathBuf,   // Second include directory

    // Sources
    pub main_source: PathBuf, // main.cpp
    pub util_source: PathBuf, // utils/util.cpp
    pub util_header: PathBuf, // utils/utils.h
    pub pch_source: PathBuf,  // pch.cpp
    pub pch_header: PathBuf,  // pch.h

    // Artifacts
    pub executable: PathBuf,     // app.exe
    pub debug_database: PathBuf, // app.pdb
    pub incremental_db: PathBuf, // app.ilk
    pub import_library: PathBuf, // app.lib
    pub main_object: PathBuf,    // main.obj
    pub util_object: PathBuf,    // util.obj
    pub pch_object: PathBuf,     // pch.obj
    pub pch_binary: PathBuf,     // pch.pch
}

impl ProjectLayout {
    /// Derive the table for a source root and build directory.
    pub fn new(source_root: PathBuf, build_dir: PathBuf) -> Self {
        let utils_dir = source_root.join("utils");

        ProjectLayout {
            main_source: source_root.join("main.cpp"),
            util_source: utils_dir.join("util.cpp"),
            util_header: utils_dir.join("utils.h"),
            pch_source: source_root.join("pch.cpp"),
            pch_header: source_root.join("pch.h"),
            executable: build_dir.join("app.exe"),
            debug_database: build_dir.join("app.pdb"),
            incremental_db: build_dir.join("app.ilk"),
            import_library: build_dir.join("app.lib"),
            main_object: build_dir.join("main.obj"),
            util_object: build_dir.join("util.obj"),
            pch_object: build_dir.join("pch.obj"),
            pch_binary: build_dir.join("pch.pch"),
            utils_dir,
            source_root,
            build_dir,
        }
    }

    /// Derive the table for the current working directory.
    pub fn from_cwd() -> Result<Self, ConfigError> {
        let source_root = std::env::current_dir()?;
        let build_dir = source_root.join(BUILD_DIR_NAME);
        Ok(Self::new(source_root, build_dir))
    }

    /// File name of the PCH header, as consumed by `/Yc` and `/Yu`.
    pub fn pch_header_name(&self) -> String {
        self.pch_header
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Check that every expected source file exists.
    ///
    /// Reports the first missing one.
    pub fn validate_sources(&self) -> Result<(), ConfigError> {
        for path in [
            &self.main_source,
            &self.util_source,
            &self.util_header,
            &self.pch_source,
            &self.pch_header,
        ] {
            if !path.is_file() {
                return Err(ConfigError::SourceMissing(path.display().to_string()));
            }
        }
        Ok(())
    }

    /// Create the build directory if it does not exist yet.
    ///
    /// Returns whether it was created by this call.
    pub fn ensure_build_dir(&self) -> Result<bool, ConfigError> {
        if self.build_dir.is_dir() {
            return Ok(false);
        }

        fs::create_dir_all(&self.build_dir).map_err(|source| ConfigError::BuildDirCreate {
            path: self.build_dir.display().to_string(),
            source,
        })?;
        Ok(true)
    }
}
