//! CLI command implementations
//!
//! Each subcommand has its own module with an Args struct and a run()
//! function; dispatch happens here.

use clap::Subcommand;

pub mod auto;
pub mod clean;
pub mod show;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show registry repositories, tags, or offline runners
    Show(show::ShowArgs),

    /// Clean up registry tags or offline runners
    Clean(clean::CleanArgs),

    /// Automatable mode: clean all registries of an account, then runners
    Auto(auto::AutoArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Show(args) => show::run(ctx, args),
        Commands::Clean(args) => clean::run(ctx, args),
        Commands::Auto(args) => auto::run(ctx, args),
    }
}
