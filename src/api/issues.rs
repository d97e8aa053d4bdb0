//! Project issues listing (`GET /projects/:id/issues`)

use super::list::List;
use super::options::ListOptions;
use crate::http::HttpClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Issue state filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Opened,
    Closed,
    All,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::All => "all",
        })
    }
}

/// A GitLab issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Issues service
#[derive(Debug, Clone)]
pub struct Issues {
    client: HttpClient,
}

impl Issues {
    /// Create the service
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Issues of one project
    ///
    /// `project` is a numeric ID or a full path such as `group/project`.
    pub fn list(&self, project: &str, options: &ListOptions) -> List<Issue> {
        List::new(
            self.client.clone(),
            format!("projects/{}/issues", encode_project(project)),
            options.to_query(),
        )
    }

    /// Issues of one project in the given state
    pub fn list_in_state(
        &self,
        project: &str,
        state: IssueState,
        options: &ListOptions,
    ) -> List<Issue> {
        let options = options.clone().param("state", state);
        self.list(project, &options)
    }
}

/// Path-escape a project ID or namespaced path (`a/b` -> `a%2Fb`)
pub(crate) fn encode_project(project: &str) -> String {
    form_urlencoded::byte_serialize(project.as_bytes()).collect()
}
