use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Excludes that are always passed to rsync, ahead of anything configured.
pub const DEFAULT_EXCLUDES: [&str; 4] = [".git", "target", "__pycache__", ".DS_Store"];

/// Contents of `reposync.yaml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub global_excludes: Vec<String>,
    pub repos: Vec<RepoEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            global_excludes: default_excludes(),
            repos: Vec::new(),
        }
    }
}

/// Per-project exclude overrides, matched by project name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub name: String,
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl Config {
    /// Defaults, then global excludes, then the excludes of every repo entry
    /// named `project_name`. First occurrence wins.
    pub fn effective_excludes(&self, project_name: &str) -> Vec<String> {
        let repo_excludes = self
            .repos
            .iter()
            .filter(|repo| repo.name == project_name)
            .flat_map(|repo| repo.excludes.iter().cloned());

        let mut combined: Vec<String> = default_excludes()
            .into_iter()
            .chain(self.global_excludes.iter().cloned())
            .chain(repo_excludes)
            .collect();

        let mut seen = HashSet::new();
        combined.retain(|item| seen.insert(item.clone()));
        combined
    }
}

pub fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

/// Result of searching for the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRoot {
    pub path: PathBuf,
    /// False when no `.git` was found and `path` is the starting directory.
    pub marker_found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Push,
    Pull,
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub direction: Direction,
    pub host: String,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_config_carries_default_excludes() {
        let config = Config::default();
        assert!(!config.debug);
        assert_eq!(
            config.global_excludes,
            strings(&[".git", "target", "__pycache__", ".DS_Store"])
        );
        assert!(config.repos.is_empty());
    }

    #[test]
    fn effective_excludes_merges_global_and_matching_repo() {
        let config = Config {
            debug: false,
            global_excludes: strings(&["node_modules", ".git"]),
            repos: vec![
                RepoEntry {
                    name: "other".into(),
                    excludes: strings(&["secrets"]),
                },
                RepoEntry {
                    name: "demo".into(),
                    excludes: strings(&["build", "target"]),
                },
            ],
        };

        assert_eq!(
            config.effective_excludes("demo"),
            strings(&[
                ".git",
                "target",
                "__pycache__",
                ".DS_Store",
                "node_modules",
                "build"
            ])
        );
    }

    #[test]
    fn effective_excludes_without_config_is_defaults() {
        let config = Config {
            debug: false,
            global_excludes: Vec::new(),
            repos: Vec::new(),
        };
        assert_eq!(config.effective_excludes("demo"), default_excludes());
    }

    #[test]
    fn repo_entries_with_the_same_name_all_apply() {
        let config = Config {
            debug: false,
            global_excludes: Vec::new(),
            repos: vec![
                RepoEntry {
                    name: "demo".into(),
                    excludes: strings(&["a"]),
                },
                RepoEntry {
                    name: "demo".into(),
                    excludes: strings(&["b"]),
                },
            ],
        };
        let excludes = config.effective_excludes("demo");
        assert_eq!(&excludes[4..], &strings(&["a", "b"])[..]);
    }
}
