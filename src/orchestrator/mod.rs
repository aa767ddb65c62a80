//! Build orchestration: one phase request end to end,
//! Idle -> Resolving -> Executing -> Done/Failed.

pub mod executor;
pub mod state;

pub use state::RunState;

use crate::error::{PhaseError, Result};
use crate::models::{CleanSummary, Phase, PhaseOutcome, PhaseRequest};
use crate::project::{profile, ProjectLayout};
use crate::toolchain::{Toolchain, TOOLS_ENV_VAR};
use log::{debug, error, info, warn};
use std::fs;

/// Drives a single phase request over the resolved toolchain.
pub struct Orchestrator {
    /// Environment variable consulted for the toolchain root
    tools_var: String,

    /// Project path table
    layout: ProjectLayout,

    /// Lifecycle state of this run
    state: RunState,
}

impl Orchestrator {
    /// Orchestrator over the current working directory and the standard
    /// toolchain variable.
    pub fn from_cwd() -> Result<Self> {
        Ok(Self::new(TOOLS_ENV_VAR, ProjectLayout::from_cwd()?))
    }

    /// Orchestrator over an explicit layout, consulting `tools_var` for the
    /// toolchain root. One orchestrator drives exactly one request.
    pub fn new(tools_var: &str, layout: ProjectLayout) -> Self {
        Orchestrator {
            tools_var: tools_var.to_string(),
            layout,
            state: RunState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute the request end to end.
    ///
    /// Resolves the toolchain, runs the phase (and its chained link, if
    /// requested) and lands in `Done` or `Failed`.
    pub fn execute(&mut self, request: PhaseRequest) -> Result<PhaseOutcome> {
        match self.run(request) {
            Ok(outcome) => {
                self.advance(RunState::Done);
                Ok(outcome)
            }
            Err(err) => {
                self.advance(RunState::Failed);
                Err(err)
            }
        }
    }

    fn run(&mut self, request: PhaseRequest) -> Result<PhaseOutcome> {
        self.advance(RunState::Resolving);

        // Toolchain first: a run with a broken environment must leave the
        // filesystem untouched.
        let toolchain = Toolchain::from_env_var(&self.tools_var)?;
        debug!("Source   {}", self.layout.source_root.display());
        debug!("Build    {}", self.layout.build_dir.display());
        debug!("Compiler {}", toolchain.compiler.display());
        debug!("Linker   {}", toolchain.linker.display());

        if request.phase != Phase::Clean {
            self.layout.validate_sources()?;
            if self.layout.ensure_build_dir()? {
                info!("Created build directory.");
            }
        }

        self.advance(RunState::Executing);
        match request.phase {
            Phase::Clean => Ok(PhaseOutcome::Cleaned(self.clean())),
            Phase::Precompile => {
                self.precompile(&toolchain)?;
                Ok(self.built(request))
            }
            Phase::Compile => {
                self.compile(&toolchain)?;
                if request.then_link {
                    self.link(&toolchain)?;
                }
                Ok(self.built(request))
            }
            Phase::Link => {
                self.link(&toolchain)?;
                Ok(self.built(request))
            }
        }
    }

    fn built(&self, request: PhaseRequest) -> PhaseOutcome {
        PhaseOutcome::Built {
            phase: request.phase,
            chained_link: request.then_link,
        }
    }

    /// Best-effort removal of every entry in the build directory.
    ///
    /// Failures are warnings, not errors; a missing directory removes
    /// nothing.
    fn clean(&self) -> CleanSummary {
        info!("Cleaning directory: {}", self.layout.build_dir.display());
        let mut summary = CleanSummary::default();

        let entries = match fs::read_dir(&self.layout.build_dir) {
            Ok(entries) => entries,
            Err(_) => {
                info!("Files removed: 0");
                return summary;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            debug!("Removing file: {}", path.display());
            match fs::remove_file(&path) {
                Ok(()) => summary.removed += 1,
                Err(err) => {
                    warn!("Could not remove {}: {}", path.display(), err);
                    summary.failed += 1;
                }
            }
        }

        info!("Files removed: {}", summary.removed);
        if summary.failed > 0 {
            warn!("Entries left behind: {}", summary.failed);
        }
        summary
    }

    /// Create the precompiled header from the PCH source.
    fn precompile(&self, toolchain: &Toolchain) -> Result<()> {
        info!("Precompiling: pch");
        let args = profile::precompile_args(&self.layout);
        self.run_checked(Phase::Precompile, "Compiler", toolchain, &args)
    }

    /// Compile each translation unit against the precompiled header.
    ///
    /// Units build in order; the first failing unit stops the phase and its
    /// exit code becomes the phase's.
    fn compile(&self, toolchain: &Toolchain) -> Result<()> {
        for job in profile::compile_jobs(&self.layout) {
            info!("Compiling: {}", job.unit);
            self.run_checked(Phase::Compile, "Compiler", toolchain, &job.args)?;
        }
        Ok(())
    }

    /// Link the objects into the executable.
    fn link(&self, toolchain: &Toolchain) -> Result<()> {
        info!("Linking: app.exe");
        let args = profile::link_args(&self.layout);
        self.run_checked(Phase::Link, "Linker", toolchain, &args)
    }

    fn run_checked(
        &self,
        phase: Phase,
        label: &str,
        toolchain: &Toolchain,
        args: &[String],
    ) -> Result<()> {
        let program = match phase {
            Phase::Link => &toolchain.linker,
            _ => &toolchain.compiler,
        };
        let result = executor::run_tool(label, program, args, &self.layout.source_root)?;
        if result.success() {
            Ok(())
        } else {
            Err(PhaseError::ToolFailed {
                phase: phase.as_str().to_string(),
                code: result.exit_code,
            }
            .into())
        }
    }

    fn advance(&mut self, next: RunState) {
        if let Err(err) = self.state.transition_to(next) {
            error!("{}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BuildError, ConfigError};
    use std::path::Path;
    use tempfile::tempdir;

    fn orchestrator_for(tools_var: &str, root: &Path) -> Orchestrator {
        Orchestrator::new(tools_var, ProjectLayout::new(root.to_path_buf(), root.join("build")))
    }

    /// Toolchain root whose binaries exist but are never executed.
    fn stub_toolchain(root: &Path) {
        let bin = root.join("bin/HostX64/x64");
        fs::create_dir_all(&bin).expect("Failed to create toolchain bin dir");
        fs::write(bin.join("cl.exe"), "").expect("Failed to create cl.exe stub");
        fs::write(bin.join("link.exe"), "").expect("Failed to create link.exe stub");
    }

    #[test]
    fn test_clean_missing_build_dir() {
        let dir = tempdir().expect("Failed to create temp dir");
        let orch = orchestrator_for("VCBUILD_TEST_UNUSED", dir.path());

        let summary = orch.clean();
        assert_eq!(summary, CleanSummary { removed: 0, failed: 0 });
    }

    #[test]
    fn test_clean_counts_removed_and_leftovers() {
        let dir = tempdir().expect("Failed to create temp dir");
        let build = dir.path().join("build");
        fs::create_dir_all(build.join("nested")).expect("Failed to create subdir");
        for name in ["app.exe", "main.obj", "pch.pch"] {
            fs::write(build.join(name), "x").expect("Failed to write artifact");
        }

        let orch = orchestrator_for("VCBUILD_TEST_UNUSED", dir.path());
        let summary = orch.clean();

        // Subdirectories resist remove_file and are counted as leftovers.
        assert_eq!(summary, CleanSummary { removed: 3, failed: 1 });
        assert!(build.join("nested").is_dir());
        assert!(!build.join("app.exe").exists());
    }

    #[test]
    fn test_unresolved_toolchain_leaves_filesystem_untouched() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut orch = orchestrator_for("VCBUILD_TEST_NO_TOOLCHAIN", dir.path());

        let err = orch
            .execute(PhaseRequest {
                phase: Phase::Compile,
                then_link: false,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            BuildError::Config(ConfigError::EnvVarMissing(_))
        ));
        assert_eq!(orch.state(), RunState::Failed);
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn test_clean_request_lands_in_done() {
        let tools = tempdir().expect("Failed to create toolchain dir");
        stub_toolchain(tools.path());
        std::env::set_var("VCBUILD_TEST_TOOLS_FOR_CLEAN", tools.path());

        let project = tempdir().expect("Failed to create project dir");
        let mut orch = orchestrator_for("VCBUILD_TEST_TOOLS_FOR_CLEAN", project.path());

        let outcome = orch
            .execute(PhaseRequest {
                phase: Phase::Clean,
                then_link: false,
            })
            .expect("Clean should succeed");

        match outcome {
            PhaseOutcome::Cleaned(summary) => {
                assert_eq!(summary, CleanSummary { removed: 0, failed: 0 })
            }
            other => panic!("Expected Cleaned outcome, got {:?}", other),
        }
        assert_eq!(orch.state(), RunState::Done);
    }

    #[test]
    fn test_build_phase_requires_sources() {
        let tools = tempdir().expect("Failed to create toolchain dir");
        stub_toolchain(tools.path());
        std::env::set_var("VCBUILD_TEST_TOOLS_FOR_SOURCES", tools.path());

        let project = tempdir().expect("Failed to create project dir");
        let mut orch = orchestrator_for("VCBUILD_TEST_TOOLS_FOR_SOURCES", project.path());

        let err = orch
            .execute(PhaseRequest {
                phase: Phase::Precompile,
                then_link: false,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            BuildError::Config(ConfigError::SourceMissing(_))
        ));
        // Validation failed before the build directory was created.
        assert!(!project.path().join("build").exists());
    }
}
