use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Result, SweepError};

pub const DEFAULT_URL: &str = "https://gitlab.com";
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Resolved client configuration.
///
/// Precedence, lowest to highest: built-in defaults, config file,
/// environment (`GITLAB_URL` / `GITLAB_TOKEN`, via clap), CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub token: String,
    pub per_page: u32,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: String::new(),
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: 30,
        }
    }
}

/// Optional overrides read from a TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigPatch {
    pub url: Option<String>,
    pub token: Option<String>,
    pub per_page: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = Self::default();

        let file = match &cli.config {
            Some(path) => Some(path.clone()),
            None => default_config_path(),
        };
        if let Some(path) = file {
            if let Some(patch) = Self::load_patch(&path, cli.config.is_some())? {
                config.merge_patch(patch);
            }
        }

        // clap already folded GITLAB_URL / GITLAB_TOKEN into the flags.
        if let Some(url) = &cli.url {
            config.url = url.clone();
        }
        if let Some(token) = &cli.token {
            config.token = token.clone();
        }

        if config.token.trim().is_empty() {
            return Err(SweepError::Config(
                "no GitLab token; pass --token or set GITLAB_TOKEN".to_string(),
            ));
        }
        if config.per_page == 0 {
            return Err(SweepError::Config("per_page must be at least 1".to_string()));
        }

        Ok(config)
    }

    fn load_patch(path: &Path, explicit: bool) -> Result<Option<ConfigPatch>> {
        if !path.is_file() {
            if explicit {
                return Err(SweepError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path).map_err(|source| SweepError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let patch = toml::from_str(&raw).map_err(|source| SweepError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(token) = patch.token {
            self.token = token;
        }
        if let Some(per_page) = patch.per_page {
            self.per_page = per_page;
        }
        if let Some(timeout_secs) = patch.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glsweep/config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["glsweep"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["show", "runners"]);
        Cli::parse_from(argv)
    }

    #[test]
    fn flag_token_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token = \"from-file\"\nurl = \"https://git.example.com\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = cli(&["--config", &path, "--token", "from-flag"]);
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.token, "from-flag");
        assert_eq!(config.url, "https://git.example.com");
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn file_supplies_token_and_per_page() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token = \"from-file\"\nper_page = 25").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = cli(&["--config", &path]);
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.token, "from-file");
        assert_eq!(config.per_page, 25);
        assert_eq!(config.url, DEFAULT_URL);
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "per_page = 10").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = Config::load(&cli(&["--config", &path])).unwrap_err();
        assert!(matches!(err, SweepError::Config(_)));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let err = Config::load(&cli(&["--config", "/nonexistent/glsweep.toml"])).unwrap_err();
        assert!(matches!(err, SweepError::Config(_)));
    }

    #[test]
    fn unknown_config_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token = \"t\"\nkeep = 3").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = Config::load(&cli(&["--config", &path])).unwrap_err();
        assert!(matches!(err, SweepError::ConfigParse { .. }));
    }
}
