use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Result, SiremError};
use crate::jira::{Issue, IssueTracker, TrackerVersion};

/// Issues fetched per search over all pages; larger scopes are truncated
const MAX_SEARCH_RESULTS: usize = 1000;

/// Jira REST API v2 client using basic authentication
pub struct JiraClient {
    base_url: String,
    username: String,
    password: String,
    http: Client,
}

/// One page of search results; the server may return fewer issues than asked for
#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<IssueResponse>,
    #[serde(default)]
    total: usize,
}

#[derive(Deserialize)]
struct IssueResponse {
    key: String,
    fields: IssueFields,
}

#[derive(Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    priority: Option<Priority>,
}

#[derive(Deserialize)]
struct Priority {
    name: String,
}

#[derive(Serialize)]
struct CreateVersion<'a> {
    project: &'a str,
    name: &'a str,
    description: &'a str,
    #[serde(rename = "releaseDate", skip_serializing_if = "Option::is_none")]
    release_date: Option<NaiveDate>,
}

impl JiraClient {
    /// Create a client for the Jira instance at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("sirem/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(JiraClient {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(SiremError::tracker(format!("Jira returned {}: {}", status, body)))
        }
    }
}

impl IssueResponse {
    fn into_issue(self) -> Issue {
        Issue {
            key: self.key,
            summary: self.fields.summary,
            priority: self.fields.priority.map(|p| p.name).unwrap_or_default(),
        }
    }
}

/// Request pages with `fetch(start_at, max_results)` until `total` or `limit` issues
fn collect_pages<F>(limit: usize, mut fetch: F) -> Result<Vec<Issue>>
where
    F: FnMut(usize, usize) -> Result<SearchResponse>,
{
    let mut issues: Vec<Issue> = Vec::new();

    loop {
        let page = fetch(issues.len(), limit - issues.len())?;
        let fetched = page.issues.len();
        issues.extend(page.issues.into_iter().map(IssueResponse::into_issue));
        tracing::trace!(fetched, collected = issues.len(), total = page.total, "search page");

        if issues.len() >= limit {
            if page.total > limit {
                tracing::warn!(total = page.total, limit, "search truncated");
            }
            issues.truncate(limit);
            break;
        }
        if fetched == 0 || issues.len() >= page.total {
            break;
        }
    }

    Ok(issues)
}

impl IssueTracker for JiraClient {
    fn search(&self, jql: &str) -> Result<Vec<Issue>> {
        tracing::debug!(jql, "searching issues");
        collect_pages(MAX_SEARCH_RESULTS, |start_at, max_results| {
            let request = self.http.get(self.url("search")).query(&[
                ("jql", jql.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", max_results.to_string()),
                ("fields", "summary,priority".to_string()),
            ]);
            Ok(self.send(request)?.json()?)
        })
    }

    fn project_versions(&self, project: &str) -> Result<BTreeMap<String, TrackerVersion>> {
        let request = self.http.get(self.url(&format!("project/{}/versions", project)));
        let versions: Vec<TrackerVersion> = self.send(request)?.json()?;

        Ok(versions
            .into_iter()
            .map(|version| (version.name.clone(), version))
            .collect())
    }

    fn create_version(
        &self,
        project: &str,
        name: &str,
        description: &str,
        release_date: Option<NaiveDate>,
    ) -> Result<()> {
        let body = CreateVersion {
            project,
            name,
            description,
            release_date,
        };
        self.send(self.http.post(self.url("version")).json(&body))?;
        Ok(())
    }

    fn update_description(&self, version_id: &str, description: &str) -> Result<()> {
        let request = self
            .http
            .put(self.url(&format!("version/{}", version_id)))
            .json(&json!({ "description": description }));
        self.send(request)?;
        Ok(())
    }

    fn update_release_date(&self, version_id: &str, release_date: NaiveDate) -> Result<()> {
        let request = self
            .http
            .put(self.url(&format!("version/{}", version_id)))
            .json(&json!({ "releaseDate": release_date }));
        self.send(request)?;
        Ok(())
    }
}
