//! Projects listing (`GET /projects`)

use super::list::List;
use super::options::ListOptions;
use crate::http::HttpClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitLab project, reduced to the fields listings commonly need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
    #[serde(default)]
    pub description: Option<String>,
    pub web_url: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Projects service
#[derive(Debug, Clone)]
pub struct Projects {
    client: HttpClient,
}

impl Projects {
    /// Create the service
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// All projects visible to the caller
    pub fn list(&self, options: &ListOptions) -> List<Project> {
        List::new(self.client.clone(), "projects", options.to_query())
    }

    /// Projects the caller is a member of
    pub fn list_membership(&self, options: &ListOptions) -> List<Project> {
        let options = options.clone().param("membership", true);
        self.list(&options)
    }

    /// Projects explicitly owned by the caller
    pub fn list_owned(&self, options: &ListOptions) -> List<Project> {
        let options = options.clone().param("owned", true);
        self.list(&options)
    }
}
