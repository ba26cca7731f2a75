use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::Body;

use crate::error::JiraError;

use super::WorklogSubmitter;
use super::types::{JiraIssue, JiraUser, SearchResponse, WorklogRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Longest response body quoted back in an error message
const MAX_ERROR_BODY: usize = 500;

/// Blocking Jira REST client authenticated with a personal access token
pub(crate) struct JiraClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl JiraClient {
    pub(crate) fn new(base_url: &str, token: impl Into<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{path}", self.base_url)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// `GET /rest/api/2/myself`
    pub(crate) fn myself(&self) -> Result<JiraUser, JiraError> {
        let response = self
            .agent
            .get(&self.url("myself"))
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| JiraError::Transport(e.to_string()))?;
        read_json(response)
    }

    /// Issues currently assigned to `assignee` (email or user name)
    pub(crate) fn assigned_issues(&self, assignee: &str) -> Result<Vec<JiraIssue>, JiraError> {
        let jql = format!("assignee=\"{assignee}\"");
        let response = self
            .agent
            .get(&self.url("search"))
            .query("jql", &jql)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| JiraError::Transport(e.to_string()))?;
        let search: SearchResponse = read_json(response)?;
        Ok(search.issues)
    }
}

impl WorklogSubmitter for JiraClient {
    fn submit(&self, issue_key: &str, worklog: &WorklogRequest) -> Result<(), JiraError> {
        if !is_issue_key(issue_key) {
            return Err(JiraError::InvalidIssueKey(issue_key.to_string()));
        }
        let url = self.url(&format!("issue/{issue_key}/worklog"));
        tracing::debug!(%url, seconds = worklog.time_spent_seconds, "submitting worklog");
        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .send_json(worklog)
            .map_err(|e| JiraError::Transport(e.to_string()))?;
        ensure_success(response).map(|_| ())
    }
}

/// Keys go into the URL path verbatim, so only `[A-Za-z0-9_-]+` is allowed
fn is_issue_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn ensure_success(mut response: Response<Body>) -> Result<Response<Body>, JiraError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.body_mut().read_to_string().unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    Err(JiraError::Status {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

fn read_json<T: DeserializeOwned>(response: Response<Body>) -> Result<T, JiraError> {
    let mut response = ensure_success(response)?;
    response
        .body_mut()
        .read_json::<T>()
        .map_err(|e| JiraError::Decode(e.to_string()))
}
