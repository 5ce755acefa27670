//! glsweep - prune stale GitLab container registry tags and offline CI runners.
//!
//! Thin client over the GitLab v4 REST API: enumerate paginated resources,
//! apply a keep-N/name-regex retention policy server-side, report results.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod sweep;

pub use error::{Result, SweepError};
