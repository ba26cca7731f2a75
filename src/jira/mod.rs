//! Jira integration
//!
//! The tracker only needs to hand a finished session to something that can
//! submit a worklog; `JiraClient` is the real implementation.

mod client;
mod types;

pub(crate) use client::JiraClient;
pub(crate) use types::{JiraIssue, WorklogRequest};

use crate::consts::MIN_SUBMIT_SECONDS;
use crate::error::JiraError;

/// Sends a worklog entry for an issue
pub(crate) trait WorklogSubmitter {
    fn submit(&self, issue_key: &str, worklog: &WorklogRequest) -> Result<(), JiraError>;
}

/// Sessions of a minute or less are kept local only
pub(crate) fn should_submit(duration_seconds: i64) -> bool {
    duration_seconds > MIN_SUBMIT_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_threshold_is_exclusive() {
        assert!(!should_submit(0));
        assert!(!should_submit(60));
        assert!(should_submit(61));
        assert!(should_submit(120));
    }
}
