use crate::app::models::RepoRoot;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

/// Entry whose presence marks a directory as a repository root.
const REPO_MARKER: &str = ".git";

/// Finds the project root starting from the current working directory.
pub fn locate() -> Result<RepoRoot> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(locate_from(&cwd))
}

/// Walks up from `start` and returns the nearest directory containing `.git`.
///
/// Falls back to `start` itself (with a warning) when no ancestor matches.
pub fn locate_from(start: &Path) -> RepoRoot {
    // `.git` may be a file for worktrees and submodules
    if let Some(dir) = start
        .ancestors()
        .find(|dir| dir.join(REPO_MARKER).exists())
    {
        return RepoRoot {
            path: dir.to_path_buf(),
            marker_found: true,
        };
    }

    log::warn!(
        "No git repository found above {}, using the current working directory",
        start.display()
    );
    RepoRoot {
        path: start.to_path_buf(),
        marker_found: false,
    }
}

/// Name of the project on the remote side: the root's final path segment.
pub fn project_name(root: &Path) -> Result<String> {
    root.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive a project name from {}", root.display()))
}
