//! Wire models for the GitLab v4 REST API.
//!
//! Only the fields this tool reads are declared; everything else in the
//! API payloads is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// A project as returned by the group-projects listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub path_with_namespace: String,
}

/// A container registry repository within a project.
///
/// `path` encodes `namespace/project[/repository]`; a third segment marks
/// a named sub-repository, its absence the project-level root repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRepository {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub location: String,
}

/// A tag within a registry repository. Immutable once pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryTag {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub location: String,
}

/// A CI runner. Only `status == "offline"` runners are ever deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    pub id: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}
