//! Spawning external programs.
//!
//! [`ProcessRunner`] is the seam between reposync and the outside world:
//! the real implementation forks a child, tests substitute a scripted fake.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Where the child's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to our own stdout/stderr as it runs.
    Inherit,
    /// Child output is collected into [`ProcessOutput`].
    Capture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub output: OutputMode,
}

/// Exit code of a finished child; `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl std::fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "termination by signal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: ExitOutcome,
    /// Empty in [`OutputMode::Inherit`].
    pub stdout: Vec<u8>,
    /// Empty in [`OutputMode::Inherit`].
    pub stderr: Vec<u8>,
}

pub trait ProcessRunner {
    /// Runs the program to completion. Errors only if it could not be started
    /// or waited on; a non-zero exit is reported through `status`.
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Runs programs found on `PATH` via `std::process::Command`.
pub struct SystemProcess;

impl ProcessRunner for SystemProcess {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::inherit());

        match invocation.output {
            OutputMode::Inherit => {
                let status = cmd
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .with_context(|| format!("Failed to run {}", invocation.program))?;

                Ok(ProcessOutput {
                    status: ExitOutcome {
                        code: status.code(),
                    },
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                })
            }
            OutputMode::Capture => {
                let output = cmd
                    .stdin(Stdio::null())
                    .output()
                    .with_context(|| format!("Failed to run {}", invocation.program))?;

                Ok(ProcessOutput {
                    status: ExitOutcome {
                        code: output.status.code(),
                    },
                    stdout: output.stdout,
                    stderr: output.stderr,
                })
            }
        }
    }
}
