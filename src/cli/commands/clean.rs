//! glsweep clean - delete stale registry tags or offline runners

use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::cli::output;
use crate::error::{Result, SweepError};
use crate::sweep::RetentionPolicy;

#[derive(Args, Debug)]
pub struct CleanArgs {
    #[command(subcommand)]
    pub target: CleanCommand,
}

#[derive(Subcommand, Debug)]
pub enum CleanCommand {
    /// Clean up tags in one registry repository
    Repo {
        /// Project path (user/project or group/project)
        project: String,

        /// Repository name (omit for the project-level root repository)
        #[arg(default_value = "")]
        repository: String,

        /// Keep the newest N tags
        #[arg(short = 'k', long)]
        keep: Option<u32>,

        /// Regex of the tag names to be cleaned up
        #[arg(short = 'n', long = "nameregex")]
        name_regex: Option<String>,
    },

    /// Clean up tags in all projects of a user or group
    All {
        /// Name of the user or group
        account: String,

        /// Keep the newest N tags
        #[arg(short = 'k', long)]
        keep: Option<u32>,

        /// Regex of the tag names to be cleaned up
        #[arg(short = 'n', long = "nameregex")]
        name_regex: Option<String>,
    },

    /// Delete offline runners
    Runners,
}

pub fn run(ctx: &AppContext, args: &CleanArgs) -> Result<()> {
    match &args.target {
        CleanCommand::Repo {
            project,
            repository,
            keep,
            name_regex,
        } => {
            let policy = RetentionPolicy::resolve(*keep, name_regex.clone())?;
            ctx.sweeper.clean_repository(project, repository, &policy)
        }

        CleanCommand::All {
            account,
            keep,
            name_regex,
        } => {
            let policy = RetentionPolicy::resolve(*keep, name_regex.clone())?;
            clean_all(ctx, account, &policy)
        }

        CleanCommand::Runners => clean_runners(ctx),
    }
}

pub(crate) fn clean_all(ctx: &AppContext, account: &str, policy: &RetentionPolicy) -> Result<()> {
    let report = ctx.sweeper.clean_group(account, policy)?;
    output::sweep_summary(&report);
    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(SweepError::SweepIncomplete {
            failed: report.failures.len(),
            total: report.total(),
        })
    }
}

pub(crate) fn clean_runners(ctx: &AppContext) -> Result<()> {
    let report = ctx.sweeper.clean_runners()?;
    if report.deleted.is_empty() && report.failed.is_empty() {
        output::note("no offline runners found");
        return Ok(());
    }
    output::runner_summary(&report);
    Ok(())
}
