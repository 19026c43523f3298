use crate::app::models::Direction;
use crate::app::process::{Invocation, OutputMode, ProcessRunner};
use anyhow::{bail, Result};
use std::path::Path;

const RSYNC: &str = "rsync";

/// Flags passed on every transfer, between the endpoints and the excludes.
const BEHAVIOR_FLAGS: [&str; 8] = [
    "--verbose",
    "--archive",
    "--progress",
    "--human-readable",
    "--compress",
    "--itemize-changes",
    "--prune-empty-dirs",
    // per-directory merge of .gitignore exclusions; a missing file is fine
    "--filter=:- .gitignore",
];

/// Drives rsync through a [`ProcessRunner`].
pub struct Rsync<P: ProcessRunner> {
    runner: P,
    program: String,
}

impl<P: ProcessRunner> Rsync<P> {
    pub fn new(runner: P) -> Self {
        Self {
            runner,
            program: RSYNC.to_string(),
        }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &P {
        &self.runner
    }

    /// Probes `rsync --version` so a missing tool is reported before any transfer.
    pub fn check_available(&self) -> Result<()> {
        let probe = Invocation {
            program: self.program.clone(),
            args: vec!["--version".to_string()],
            output: OutputMode::Capture,
        };

        match self.runner.run(&probe) {
            Ok(output) if output.status.success() => {
                if let Some(first_line) = String::from_utf8_lossy(&output.stdout).lines().next() {
                    log::debug!("{}", first_line);
                }
                Ok(())
            }
            Ok(output) => {
                log::debug!(
                    "{} --version returned {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                bail!("{} not found on PATH", self.program)
            }
            Err(err) => {
                log::debug!("{} --version failed: {:#}", self.program, err);
                bail!("{} not found on PATH", self.program)
            }
        }
    }

    /// Runs one transfer with output streamed to the console.
    pub fn sync(&self, source: &str, target: &str, dry_run: bool, excludes: &[String]) -> Result<()> {
        println!("{} {} {}", self.program, source, target);

        let args = build_args(source, target, dry_run, excludes);
        log::debug!("{} {}", self.program, args.join(" "));

        let output = self.runner.run(&Invocation {
            program: self.program.clone(),
            args,
            output: OutputMode::Inherit,
        })?;

        if !output.status.success() {
            bail!("{} failed with {}", self.program, output.status);
        }
        Ok(())
    }
}

/// Full rsync argument vector, excluding the program name.
pub fn build_args(source: &str, target: &str, dry_run: bool, excludes: &[String]) -> Vec<String> {
    let mut args = vec![source.to_string(), target.to_string()];
    args.extend(BEHAVIOR_FLAGS.iter().map(|flag| flag.to_string()));
    args.extend(format_excludes(excludes));
    if dry_run {
        args.push("--dry-run".to_string());
    }
    args
}

pub fn format_excludes(excludes: &[String]) -> Vec<String> {
    excludes
        .iter()
        .map(|pattern| format!("--exclude={}", pattern))
        .collect()
}

/// `(source, target)` for a transfer between the local root and `host:<project>/`.
pub fn endpoints(
    direction: Direction,
    repo_path: &Path,
    host: &str,
    project_name: &str,
) -> (String, String) {
    let local = repo_path.to_string_lossy().into_owned();
    let remote = format!("{}:{}/", host, project_name);

    match direction {
        Direction::Push => (local, remote),
        Direction::Pull => (remote, local),
    }
}
