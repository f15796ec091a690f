//! External process execution for migration steps.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::{Error, Result};

/// Captured result of a successful process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect both streams and return them.
    Capture,
    /// Share the parent's terminal; nothing is captured.
    Inherit,
}

/// Run `argv` in `cwd` and wait for it.
///
/// The first element is the program; no shell is involved. A non-zero exit
/// is [`Error::StepFailed`] carrying whatever was captured.
#[instrument(level = "debug", skip(argv), fields(program = argv.first().map(String::as_str).unwrap_or_default()))]
pub async fn run_argv(step: &str, argv: &[String], cwd: &Path, mode: OutputMode) -> Result<ProcessOutput> {
    let Some((program, args)) = argv.split_first() else {
        return Err(Error::Config(format!("{step}: command is empty")));
    };

    let mut command = Command::new(program);
    command.args(args).current_dir(cwd).stdin(Stdio::null());
    if mode == OutputMode::Inherit {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        let status = command.status().await.map_err(|e| spawn_error(step, program, &e))?;
        if !status.success() {
            return Err(Error::StepFailed {
                step: step.to_string(),
                status: status.to_string(),
                stdout: String::new(),
                stderr: String::new(),
            });
        }
        return Ok(ProcessOutput::default());
    }

    let output = command.output().await.map_err(|e| spawn_error(step, program, &e))?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        warn!(
            exit_code = ?output.status.code(),
            stderr = %stderr,
            "{step} command failed"
        );
        return Err(Error::StepFailed {
            step: step.to_string(),
            status: output.status.to_string(),
            stdout,
            stderr,
        });
    }

    debug!("{step}: {} bytes of output", stdout.len());
    Ok(ProcessOutput { stdout, stderr })
}

fn spawn_error(step: &str, program: &str, err: &std::io::Error) -> Error {
    Error::StepFailed {
        step: step.to_string(),
        status: format!("could not start '{program}'"),
        stdout: String::new(),
        stderr: err.to_string(),
    }
}
