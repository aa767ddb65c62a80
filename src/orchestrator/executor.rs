//! Tool invocation: blocking subprocess runs with captured transcripts.
//!
//! Each tool is spawned with an explicit argument vector (no shell) and
//! runs to completion. Stdout and stderr are captured in full, combined
//! into one transcript, logged, and scanned for MSVC diagnostics.

use crate::error::PhaseError;
use crate::models::ProcessResult;
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Command;

/// MSVC diagnostic markers: `error C2065`, `warning C4100`, `fatal error
/// LNK1181`, command-line diagnostics like `warning D9002`.
static DIAGNOSTIC_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\b(error|warning)\s+(?:C|D|LNK|RC)\d{1,5}\b").ok());

/// Run one tool to completion and capture its combined output.
///
/// `label` names the tool in log lines ("Compiler", "Linker"). The child's
/// exit code is taken verbatim; a child killed without one reports 1.
/// Spawn failures are phase execution errors, distinct from nonzero exits.
pub fn run_tool(
    label: &str,
    program: &Path,
    args: &[String],
    cwd: &Path,
) -> Result<ProcessResult, PhaseError> {
    debug!("{} arguments:\n{}", label, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|source| PhaseError::Spawn {
            tool: program.display().to_string(),
            source,
        })?;

    let mut transcript = String::from_utf8_lossy(&output.stdout).into_owned();
    transcript.push_str(&String::from_utf8_lossy(&output.stderr));
    let exit_code = output.status.code().unwrap_or(1);

    if exit_code == 0 {
        info!("{} success", label);
        if !transcript.trim().is_empty() {
            info!("{} output:\n{}", label, transcript.trim_end());
        }
    } else {
        error!("{} error code [{}]", label, exit_code);
        error!("{} output:\n{}", label, transcript.trim_end());
    }

    let (errors, warnings) = count_diagnostics(&transcript);
    if errors > 0 || warnings > 0 {
        info!(
            "{} diagnostics: {} error(s), {} warning(s)",
            label, errors, warnings
        );
    }

    Ok(ProcessResult {
        exit_code,
        transcript,
    })
}

/// Count MSVC error and warning diagnostics in a transcript.
pub fn count_diagnostics(transcript: &str) -> (usize, usize) {
    let re = match DIAGNOSTIC_RE.as_ref() {
        Some(re) => re,
        None => return (0, 0),
    };

    let mut errors = 0;
    let mut warnings = 0;
    for caps in re.captures_iter(transcript) {
        if &caps[1] == "error" {
            errors += 1;
        } else {
            warnings += 1;
        }
    }
    (errors, warnings)
}
