//! The registry sweeper: retention policy, single-repository cleanup,
//! group-wide sweep, and offline runner cleanup.

use regex::Regex;
use tracing::{info, warn};

use crate::error::{Result, SweepError};
use crate::gitlab::{Client, RegistryRepository, RegistryTag, Runner};

pub const DEFAULT_KEEP: u32 = 5;
pub const MATCH_ALL: &str = ".*";

/// Which tags survive a cleanup. Applied server-side: `name_regex`
/// selects deletion candidates, `keep` spares the newest N of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub keep: Option<u32>,
    pub name_regex: String,
}

impl RetentionPolicy {
    /// Build a policy from the CLI flags.
    ///
    /// When neither flag is given the policy falls back to keeping the
    /// newest five tags of every name. An explicit flag disables that
    /// substitution: `--nameregex` alone sends no `keep_n` at all, and
    /// `--keep` alone applies to every tag name.
    pub fn resolve(keep: Option<u32>, name_regex: Option<String>) -> Result<Self> {
        let policy = match (keep, name_regex) {
            (None, None) => Self {
                keep: Some(DEFAULT_KEEP),
                name_regex: MATCH_ALL.to_string(),
            },
            (keep, name_regex) => Self {
                keep,
                name_regex: name_regex.unwrap_or_else(|| MATCH_ALL.to_string()),
            },
        };

        // Validate locally before any API call; the server would otherwise
        // reject the whole request with an opaque 400.
        if let Err(err) = Regex::new(&policy.name_regex) {
            return Err(SweepError::InvalidNameRegex {
                pattern: policy.name_regex,
                reason: err.to_string(),
            });
        }

        Ok(policy)
    }
}

/// Derive the sub-repository name from a registry repository path.
///
/// `namespace/project` is the project-level root repository (empty name),
/// `namespace/project/repository` a named sub-repository. Any other shape
/// is malformed.
pub fn sub_repository_name(path: &str) -> Result<&str> {
    let parts: Vec<&str> = path.split('/').collect();
    match parts.as_slice() {
        [_, _] => Ok(""),
        [_, _, name] => Ok(name),
        _ => Err(SweepError::MalformedPath(path.to_string())),
    }
}

/// Outcome of a group-wide sweep. Failures are per repository; the sweep
/// itself keeps going.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub cleaned: usize,
    pub failures: Vec<SweepFailure>,
}

#[derive(Debug)]
pub struct SweepFailure {
    pub project: String,
    pub repository: String,
    pub reason: String,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.cleaned + self.failures.len()
    }
}

/// Outcome of an offline-runner cleanup.
#[derive(Debug, Default)]
pub struct RunnerReport {
    pub deleted: Vec<u64>,
    pub failed: Vec<(u64, String)>,
}

/// Wraps a pre-authenticated API client; all state lives server-side.
pub struct Sweeper {
    client: Client,
}

impl Sweeper {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Registry repositories of a project, for `show repos`.
    pub fn list_repositories(&self, project: &str) -> Result<Vec<RegistryRepository>> {
        self.client.registry_repositories(project)
    }

    /// Tags of the named repository, for `show tags`.
    pub fn list_tags(&self, project: &str, repository: &str) -> Result<Vec<RegistryTag>> {
        let repo = self.find_repository(project, repository)?;
        self.client.registry_tags(project, repo.id)
    }

    /// Offline runners, for `show runners`.
    pub fn list_runners(&self) -> Result<Vec<Runner>> {
        self.client.runners(Some("offline"))
    }

    /// Delete stale tags in one repository under the given policy.
    ///
    /// The repository is matched by exact name against the project's
    /// repository list; no match is a [`SweepError::RepositoryNotFound`].
    pub fn clean_repository(
        &self,
        project: &str,
        repository: &str,
        policy: &RetentionPolicy,
    ) -> Result<()> {
        let repo = self.find_repository(project, repository)?;
        let status =
            self.client
                .delete_tags(project, repo.id, &policy.name_regex, policy.keep)?;
        info!(target: "sweep", project, repository, status, "cleaned repository");
        Ok(())
    }

    /// Sweep every registry repository of every project in a group.
    ///
    /// Listing failures abort the sweep; per-repository cleanup failures
    /// are logged and recorded in the report, and the sweep continues.
    pub fn clean_group(&self, group: &str, policy: &RetentionPolicy) -> Result<SweepReport> {
        let mut report = SweepReport::default();

        let projects = self.client.group_projects(group)?;
        info!(target: "sweep", group, projects = projects.len(), "sweeping group");

        for project in &projects {
            let path = project.path_with_namespace.as_str();
            let repos = self.client.registry_repositories(path)?;

            for repo in &repos {
                match self.clean_sub_repository(path, repo, policy) {
                    Ok(()) => report.cleaned += 1,
                    Err(err) => {
                        warn!(
                            target: "sweep",
                            project = path,
                            repository = %repo.path,
                            error = %err,
                            "skipping repository"
                        );
                        report.failures.push(SweepFailure {
                            project: path.to_string(),
                            repository: repo.path.clone(),
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }

        Ok(report)
    }

    /// Delete every offline runner. Per-runner failures do not abort the
    /// batch; the report carries both outcomes.
    pub fn clean_runners(&self) -> Result<RunnerReport> {
        let mut report = RunnerReport::default();

        let runners = self.client.runners(Some("offline"))?;
        for runner in &runners {
            match self.client.remove_runner(runner.id) {
                Ok(()) => {
                    info!(target: "sweep", id = runner.id, "runner deleted");
                    report.deleted.push(runner.id);
                }
                Err(err) => {
                    warn!(target: "sweep", id = runner.id, error = %err, "runner deletion failed");
                    report.failed.push((runner.id, err.to_string()));
                }
            }
        }

        Ok(report)
    }

    fn clean_sub_repository(
        &self,
        project: &str,
        repo: &RegistryRepository,
        policy: &RetentionPolicy,
    ) -> Result<()> {
        let name = sub_repository_name(&repo.path)?;
        self.clean_repository(project, name, policy)
    }

    fn find_repository(&self, project: &str, name: &str) -> Result<RegistryRepository> {
        let repos = self.client.registry_repositories(project)?;
        repos
            .into_iter()
            .find(|repo| repo.name == name)
            .ok_or_else(|| SweepError::RepositoryNotFound {
                project: project.to_string(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_defaults_when_neither_flag_given() {
        let policy = RetentionPolicy::resolve(None, None).unwrap();
        assert_eq!(policy.keep, Some(DEFAULT_KEEP));
        assert_eq!(policy.name_regex, MATCH_ALL);
    }

    #[test]
    fn explicit_keep_disables_default_substitution() {
        let policy = RetentionPolicy::resolve(Some(10), None).unwrap();
        assert_eq!(policy.keep, Some(10));
        assert_eq!(policy.name_regex, MATCH_ALL);
    }

    #[test]
    fn explicit_regex_sends_no_keep() {
        let policy = RetentionPolicy::resolve(None, Some("^v.*".to_string())).unwrap();
        assert_eq!(policy.keep, None);
        assert_eq!(policy.name_regex, "^v.*");
    }

    #[test]
    fn explicit_keep_and_regex_pass_through() {
        let policy = RetentionPolicy::resolve(Some(3), Some("^rc-".to_string())).unwrap();
        assert_eq!(policy.keep, Some(3));
        assert_eq!(policy.name_regex, "^rc-");
    }

    #[test]
    fn invalid_regex_is_rejected_before_any_request() {
        let err = RetentionPolicy::resolve(None, Some("[".to_string())).unwrap_err();
        assert!(matches!(err, SweepError::InvalidNameRegex { .. }));
    }

    #[test]
    fn two_segment_path_is_the_root_repository() {
        assert_eq!(sub_repository_name("group/project").unwrap(), "");
    }

    #[test]
    fn three_segment_path_names_a_sub_repository() {
        assert_eq!(sub_repository_name("group/project/cache").unwrap(), "cache");
    }

    #[test]
    fn other_segment_counts_are_malformed() {
        assert!(matches!(
            sub_repository_name("group"),
            Err(SweepError::MalformedPath(_))
        ));
        assert!(matches!(
            sub_repository_name("a/b/c/d"),
            Err(SweepError::MalformedPath(_))
        ));
    }
}
