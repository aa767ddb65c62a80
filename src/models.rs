//! Core data types for vcbuild.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Build phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Clean,
    Precompile,
    Compile,
    Link,
}

impl Phase {
    /// Canonical lowercase name, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Clean => "clean",
            Phase::Precompile => "precompile",
            Phase::Compile => "compile",
            Phase::Link => "link",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clean" => Ok(Phase::Clean),
            "precompile" => Ok(Phase::Precompile),
            "compile" => Ok(Phase::Compile),
            "link" => Ok(Phase::Link),
            _ => Err(ConfigError::UnknownPhase(s.to_string())),
        }
    }
}

/// A parsed invocation request: one phase, optionally chained into link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRequest {
    pub phase: Phase,    // Requested phase
    pub then_link: bool, // compile -> link chain
}

impl PhaseRequest {
    /// Parse the positional arguments (everything after the program name).
    ///
    /// The optional second argument must be `link` and is only valid after
    /// `compile`; anything else is a configuration error.
    pub fn parse(args: &[String]) -> Result<Self, ConfigError> {
        let phase_arg = args.first().ok_or(ConfigError::MissingPhase)?;
        let phase: Phase = phase_arg.parse()?;

        let then_link = match args.get(1) {
            None => false,
            Some(second) if second.eq_ignore_ascii_case("link") => {
                if phase != Phase::Compile {
                    return Err(ConfigError::InvalidChain(phase.as_str().to_string()));
                }
                true
            }
            Some(second) => return Err(ConfigError::UnexpectedArgument(second.clone())),
        };

        if let Some(extra) = args.get(2) {
            return Err(ConfigError::UnexpectedArgument(extra.clone()));
        }

        Ok(PhaseRequest { phase, then_link })
    }
}

/// Outcome of a single tool invocation.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub exit_code: i32,     // Child exit code (signal death -> 1)
    pub transcript: String, // Combined stdout + stderr
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Result of a clean pass over the build directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub removed: usize, // Entries deleted
    pub failed: usize,  // Entries left behind
}

/// Successful result of an executed phase request.
#[derive(Debug, Clone)]
pub enum PhaseOutcome {
    /// Clean finished; never fatal regardless of leftovers.
    Cleaned(CleanSummary),
    /// A build phase (and its chained link, if any) ran to completion.
    Built { phase: Phase, chained_link: bool },
}
