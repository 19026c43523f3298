// Declare modules
pub mod cli;
pub mod config;
pub mod locator;
pub mod models;
pub mod process;
pub mod runner;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::Path;

use self::cli::Cli;
use self::config::ConfigStore;
use self::models::{Config, SyncRequest};
use self::process::{ProcessRunner, SystemProcess};
use self::runner::{endpoints, Rsync};

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    let request = args.request();

    // 2. Load (or create) Configuration
    let store = ConfigStore::default_location()?;
    let loaded = store.load()?;

    // 3. Logging, at the level the config and flags ask for
    init_logging(log_level(args.debug || loaded.config.debug));
    if loaded.created {
        log::info!("Wrote default configuration to {}", store.path().display());
    }
    log::debug!("loaded config {:?}", loaded.config);

    // 4. Locate, probe and transfer
    let root = locator::locate()?;
    log::debug!(
        "repository root {} (git marker found: {})",
        root.path.display(),
        root.marker_found
    );
    let rsync = Rsync::new(SystemProcess);
    sync_project(&request, &loaded.config, &root.path, &rsync)
}

/// Everything after locating the root: check rsync, then run the transfer.
pub fn sync_project<P: ProcessRunner>(
    request: &SyncRequest,
    config: &Config,
    root: &Path,
    rsync: &Rsync<P>,
) -> Result<()> {
    let project_name = locator::project_name(root)?;
    log::debug!("project {} at {}", project_name, root.display());

    rsync.check_available()?;

    let excludes = config.effective_excludes(&project_name);
    let (source, target) = endpoints(request.direction, root, &request.host, &project_name);

    rsync.sync(&source, &target, request.dry_run, &excludes)
}

fn log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// `RUST_LOG` still overrides the level chosen here.
fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
