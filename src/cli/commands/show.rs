//! glsweep show - list registry repositories, tags, or offline runners

use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::cli::output;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub target: ShowCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShowCommand {
    /// Show registry repositories of a project
    Repos {
        /// Project path (user/project or group/project)
        project: String,
    },

    /// Show tags in a registry repository
    Tags {
        /// Project path (user/project or group/project)
        project: String,

        /// Repository name (omit for the project-level root repository)
        #[arg(default_value = "")]
        repository: String,
    },

    /// Show offline runners
    Runners,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    match &args.target {
        ShowCommand::Repos { project } => {
            let repos = ctx.sweeper.list_repositories(project)?;
            if repos.is_empty() {
                output::note(&format!("no registry repositories in {project}"));
                return Ok(());
            }
            for repo in &repos {
                output::item(&format!("{project} {}", repo.name));
            }
            Ok(())
        }

        ShowCommand::Tags {
            project,
            repository,
        } => {
            let tags = ctx.sweeper.list_tags(project, repository)?;
            if tags.is_empty() {
                output::note("no tags found");
                return Ok(());
            }
            for tag in &tags {
                output::item(&tag.location);
            }
            Ok(())
        }

        ShowCommand::Runners => {
            let runners = ctx.sweeper.list_runners()?;
            if runners.is_empty() {
                output::note("no offline runners found");
                return Ok(());
            }
            for runner in &runners {
                output::item(&format!("runner id {} is {}", runner.id, runner.status));
            }
            Ok(())
        }
    }
}
