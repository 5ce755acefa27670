//! Minimal blocking client for the GitLab v4 REST API.
//!
//! Covers exactly the endpoints the sweeper needs: group project listing,
//! container registry repositories/tags, and CI runners. Listing endpoints
//! are paginated with `page`/`per_page` request parameters and
//! `x-page`/`x-total-pages` response headers.

use std::time::Duration;

use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Result, SweepError};

pub mod types;

pub use types::{Project, RegistryRepository, RegistryTag, Runner};

pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
    per_page: u32,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| SweepError::Config(format!("http client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            per_page: config.per_page,
        })
    }

    /// List all projects of a group or user namespace.
    pub fn group_projects(&self, group: &str) -> Result<Vec<Project>> {
        self.get_paged(
            &format!("groups/{}/projects", urlencoding::encode(group)),
            &[],
        )
    }

    /// List the container registry repositories of a project.
    pub fn registry_repositories(&self, project: &str) -> Result<Vec<RegistryRepository>> {
        self.get_paged(
            &format!(
                "projects/{}/registry/repositories",
                urlencoding::encode(project)
            ),
            &[],
        )
    }

    /// List the tags of one registry repository.
    pub fn registry_tags(&self, project: &str, repository_id: u64) -> Result<Vec<RegistryTag>> {
        self.get_paged(
            &format!(
                "projects/{}/registry/repositories/{repository_id}/tags",
                urlencoding::encode(project)
            ),
            &[],
        )
    }

    /// Bulk-delete tags of a registry repository.
    ///
    /// The server applies the filter: `name_regex_delete` selects deletion
    /// candidates and `keep_n` (when present) spares the N newest of them.
    /// Returns the HTTP status code on success (GitLab answers 202).
    pub fn delete_tags(
        &self,
        project: &str,
        repository_id: u64,
        name_regex: &str,
        keep: Option<u32>,
    ) -> Result<u16> {
        let url = self.url(&format!(
            "projects/{}/registry/repositories/{repository_id}/tags",
            urlencoding::encode(project)
        ));
        let mut query: Vec<(&str, String)> = vec![("name_regex_delete", name_regex.to_string())];
        if let Some(keep) = keep {
            query.push(("keep_n", keep.to_string()));
        }

        debug!(target: "gitlab", %url, name_regex, ?keep, "deleting tags");
        let response = self
            .http
            .delete(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(&query)
            .send()?;
        let status = check_status(response)?.status().as_u16();
        Ok(status)
    }

    /// List runners owned by the token, optionally filtered by scope
    /// (e.g. `offline`) server-side.
    pub fn runners(&self, scope: Option<&str>) -> Result<Vec<Runner>> {
        let query: Vec<(&str, String)> = match scope {
            Some(scope) => vec![("scope", scope.to_string())],
            None => Vec::new(),
        };
        self.get_paged("runners", &query)
    }

    /// Remove a runner by id.
    pub fn remove_runner(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("runners/{id}"));
        let response = self
            .http
            .delete(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()?;
        check_status(response)?;
        Ok(())
    }

    /// Fetch every page of a listing endpoint, in server order.
    ///
    /// Requests pages starting at 1 and stops once the `x-page` header
    /// reaches `x-total-pages`. The first failing request aborts the
    /// whole fetch.
    fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.url(path);
        let mut items: Vec<T> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let response = self
                .http
                .get(&url)
                .header("PRIVATE-TOKEN", &self.token)
                .query(query)
                .query(&[
                    ("per_page", self.per_page.to_string()),
                    ("page", page.to_string()),
                ])
                .send()?;
            let response = check_status(response)?;

            let current = header_u32(&response, "x-page").unwrap_or(page);
            let total = header_u32(&response, "x-total-pages").unwrap_or(1);
            trace!(target: "gitlab", %url, current, total, "fetched page");

            let mut batch: Vec<T> = response.json()?;
            items.append(&mut batch);

            if current >= total {
                break;
            }
            page = current + 1;
        }

        Ok(items)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v4/{path}", self.base_url)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SweepError::Api {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

fn header_u32(response: &Response, name: &str) -> Option<u32> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}
