//! Jira REST payloads (API v2)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::utils::Timezone;

/// Jira's worklog `started` format: millisecond precision, numeric offset
const STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Body of `POST /rest/api/2/issue/{key}/worklog`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WorklogRequest {
    pub(crate) comment: String,
    pub(crate) started: String,
    pub(crate) time_spent_seconds: i64,
}

impl WorklogRequest {
    pub(crate) fn from_session(session: &Session, comment: &str, timezone: Timezone) -> Self {
        Self {
            comment: comment.to_string(),
            started: format_started(session.start(), timezone),
            time_spent_seconds: session.duration_seconds(),
        }
    }
}

pub(crate) fn format_started(start: DateTime<Utc>, timezone: Timezone) -> String {
    timezone
        .to_fixed_offset(start)
        .format(STARTED_FORMAT)
        .to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JiraUser {
    #[serde(default)]
    pub(crate) key: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) email_address: Option<String>,
    #[serde(default)]
    pub(crate) display_name: Option<String>,
}

impl JiraUser {
    /// Value used in the `assignee = "..."` JQL clause
    pub(crate) fn assignee(&self) -> Option<&str> {
        self.email_address
            .as_deref()
            .or(self.name.as_deref())
            .or(self.key.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JiraIssue {
    pub(crate) id: String,
    pub(crate) key: String,
    pub(crate) fields: JiraIssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct JiraIssueFields {
    #[serde(default)]
    pub(crate) summary: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub(super) issues: Vec<JiraIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn worklog_request_serializes_camel_case() {
        let session = Session::new("ABC", at("2024-01-01T10:00:00Z"), at("2024-01-01T10:02:00Z"))
            .unwrap();
        let request =
            WorklogRequest::from_session(&session, "Logged", Timezone::Named(chrono_tz::UTC));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["comment"], "Logged");
        assert_eq!(json["started"], "2024-01-01T10:00:00.000+0000");
        assert_eq!(json["timeSpentSeconds"], 120);
    }

    #[test]
    fn started_uses_numeric_offset() {
        let tz = Timezone::parse(Some("Asia/Kolkata")).unwrap();
        assert_eq!(
            format_started(at("2024-01-01T10:00:00Z"), tz),
            "2024-01-01T15:30:00.000+0530"
        );
    }

    #[test]
    fn search_response_parses_issues() {
        let raw = r#"{"total":1,"issues":[{"id":"10001","key":"ABC-1","fields":{"summary":"Fix it","description":null}}]}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(parsed.issues[0].key, "ABC-1");
        assert_eq!(parsed.issues[0].fields.summary, "Fix it");
    }

    #[test]
    fn user_assignee_prefers_email() {
        let raw = r#"{"key":"jdoe","name":"jdoe","emailAddress":"jdoe@example.com","displayName":"J Doe"}"#;
        let user: JiraUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.assignee(), Some("jdoe@example.com"));

        let user: JiraUser = serde_json::from_str(r#"{"name":"jdoe"}"#).unwrap();
        assert_eq!(user.assignee(), Some("jdoe"));
    }
}
