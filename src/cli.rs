use std::path::PathBuf;

use clap::{Parser, Subcommand};
use git_remote_sync::DEFAULT_PACKAGE_DIR;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "git-remote-sync.json";

/// git-remote-sync - deploy the files changed between two git revisions over FTP
#[derive(Parser, Debug)]
#[command(name = "git-remote-sync")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'git-remote-sync' without arguments for the interactive menu.")]
pub struct Cli {
    /// Emit progress as NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the upload package
    #[arg(long, global = true, default_value = DEFAULT_PACKAGE_DIR)]
    pub package_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package the files changed between two revisions (no upload)
    Package {
        /// Deployment config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Earlier revision (defaults to the last synced revision in the config)
        #[arg(long)]
        from: Option<String>,

        /// Newer revision
        #[arg(long, default_value = "HEAD")]
        to: String,
    },

    /// Upload the existing package
    Upload {
        /// Deployment config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Upload without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Package the changes, then upload them
    Run {
        /// Deployment config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Earlier revision (defaults to the last synced revision in the config)
        #[arg(long)]
        from: Option<String>,

        /// Newer revision
        #[arg(long, default_value = "HEAD")]
        to: String,

        /// Upload without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}
