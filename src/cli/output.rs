//! Human-readable result output.
//!
//! Result lines the user asked for go to stdout; progress and per-item
//! sweep logging go through `tracing` to stderr.

use console::style;

use crate::sweep::{RunnerReport, SweepReport};

/// Informational outcome that is not an error ("no offline runners found").
pub fn note(message: &str) {
    println!("{}", style(message).dim());
}

pub fn item(text: &str) {
    println!("{text}");
}

pub fn sweep_summary(report: &SweepReport) {
    if report.failures.is_empty() {
        println!(
            "{} {} repositories cleaned",
            style("ok").green().bold(),
            report.cleaned
        );
        return;
    }

    println!(
        "{} {} of {} repositories failed",
        style("warning").yellow().bold(),
        report.failures.len(),
        report.total()
    );
    for failure in &report.failures {
        println!(
            "  {} {} ({}): {}",
            style("failed").red(),
            failure.repository,
            failure.project,
            failure.reason
        );
    }
}

pub fn runner_summary(report: &RunnerReport) {
    for id in &report.deleted {
        println!("{} runner {id} deleted", style("ok").green());
    }
    for (id, reason) in &report.failed {
        println!("{} runner {id}: {reason}", style("failed").red());
    }
}
