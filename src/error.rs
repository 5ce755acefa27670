use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SweepError>;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request to GitLab failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitLab API returned HTTP {status} for {url}")]
    Api { status: u16, url: String },

    #[error("repository {name:?} not found in project {project}; check with 'show repos'")]
    RepositoryNotFound { project: String, name: String },

    #[error("malformed registry path {0:?}: expected namespace/project[/repository]")]
    MalformedPath(String),

    #[error("invalid tag name regex {pattern:?}: {reason}")]
    InvalidNameRegex { pattern: String, reason: String },

    #[error("group sweep finished with {failed} of {total} repositories failing")]
    SweepIncomplete { failed: usize, total: usize },

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
