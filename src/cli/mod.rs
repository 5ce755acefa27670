//! CLI surface: argument definitions and command dispatch.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "glsweep",
    version,
    about = "Prune stale GitLab container registry tags and offline CI runners"
)]
pub struct Cli {
    /// GitLab access token
    #[arg(
        short = 't',
        long,
        global = true,
        env = "GITLAB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// GitLab instance base URL
    #[arg(long, global = true, env = "GITLAB_URL")]
    pub url: Option<String>,

    /// Path to a config file (default: $XDG_CONFIG_HOME/glsweep/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}
