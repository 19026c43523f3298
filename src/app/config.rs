use crate::app::models::Config;
use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points reposync at a different config file.
pub const CONFIG_ENV: &str = "REPOSYNC_CONFIG";

/// Configuration as loaded, plus whether this run had to create the file.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub created: bool,
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// `$REPOSYNC_CONFIG` if set, otherwise `<config dir>/reposync/reposync.yaml`.
    pub fn default_location() -> Result<Self> {
        resolve_path(env::var_os(CONFIG_ENV), dirs::config_dir()).map(Self::at)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, writing the defaults first if it does not exist.
    ///
    /// A freshly written file is not read back; the in-memory defaults are
    /// returned as-is.
    pub fn load(&self) -> Result<LoadedConfig> {
        if !self.path.exists() {
            let config = Config::default();
            self.write(&config)?;
            return Ok(LoadedConfig {
                config,
                created: true,
            });
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config at {:?}", self.path))?;

        let config: Config = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config at {:?}", self.path))?;

        Ok(LoadedConfig {
            config,
            created: false,
        })
    }

    fn write(&self, config: &Config) -> Result<()> {
        let data = serde_yaml_ng::to_string(config).context("Failed to serialize default config")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write config at {:?}", self.path))
    }
}

/// Picks the config file path: an explicit override wins over the config dir.
fn resolve_path(env_override: Option<OsString>, config_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = env_override {
        return Ok(PathBuf::from(path));
    }

    let config_dir = config_dir.context("Could not determine config directory")?;
    Ok(config_dir.join("reposync").join("reposync.yaml"))
}
