//! glsweep auto - unattended mode: clean all registries, then runners

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::clean;
use crate::error::{Result, SweepError};
use crate::sweep::RetentionPolicy;

#[derive(Args, Debug)]
pub struct AutoArgs {
    /// Name of the user or group
    pub account: String,

    /// Keep the newest N tags
    #[arg(short = 'k', long)]
    pub keep: Option<u32>,

    /// Regex of the tag names to be cleaned up
    #[arg(short = 'n', long = "nameregex")]
    pub name_regex: Option<String>,
}

pub fn run(ctx: &AppContext, args: &AutoArgs) -> Result<()> {
    let policy = RetentionPolicy::resolve(args.keep, args.name_regex.clone())?;

    // Runner cleanup still runs when the sweep had per-repository
    // failures; only a listing error short-circuits.
    let sweep_result = match clean::clean_all(ctx, &args.account, &policy) {
        Err(err @ SweepError::SweepIncomplete { .. }) => Err(err),
        Err(err) => return Err(err),
        Ok(()) => Ok(()),
    };
    clean::clean_runners(ctx)?;
    sweep_result
}
