use crate::app::models::{Direction, SyncRequest};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sync current git repo with remote host"
)]
pub struct Cli {
    /// Log debug output regardless of the config file
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send files to remote host
    Push(TransferArgs),
    /// Get files from remote host
    Pull(TransferArgs),
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Remote host, as understood by rsync (e.g. `user@box`)
    pub host: String,

    /// Add --dry-run to the rsync command
    #[arg(long, short = 'n', short_alias = 'd')]
    pub dry_run: bool,
}

impl Cli {
    pub fn request(&self) -> SyncRequest {
        let (direction, args) = match &self.command {
            Commands::Push(args) => (Direction::Push, args),
            Commands::Pull(args) => (Direction::Pull, args),
        };
        SyncRequest {
            direction,
            host: args.host.clone(),
            dry_run: args.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SyncRequest {
        Cli::try_parse_from(args).unwrap().request()
    }

    #[test]
    fn push_and_pull() {
        assert_eq!(
            parse(&["reposync", "push", "box"]),
            SyncRequest {
                direction: Direction::Push,
                host: "box".into(),
                dry_run: false,
            }
        );
        assert_eq!(parse(&["reposync", "pull", "box"]).direction, Direction::Pull);
    }

    #[test]
    fn dry_run_aliases() {
        for flag in ["--dry-run", "-n", "-d"] {
            assert!(parse(&["reposync", "push", "box", flag]).dry_run, "{flag}");
        }
        assert!(parse(&["reposync", "pull", "-n", "box"]).dry_run);
    }

    #[test]
    fn debug_is_global() {
        let cli = Cli::try_parse_from(["reposync", "push", "box", "--debug"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn host_is_required() {
        assert!(Cli::try_parse_from(["reposync", "push"]).is_err());
        assert!(Cli::try_parse_from(["reposync"]).is_err());
    }
}
