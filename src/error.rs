use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid time \"{input}\" (expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or HH:MM[:SS])")]
    InvalidTime { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("No issue key given; nothing was started")]
    MissingTaskId,

    #[error("Already tracking {task_id}; stop it before starting another session")]
    AlreadyActive { task_id: String },

    #[error("Stop time is {seconds}s before the session start")]
    NegativeDuration { seconds: i64 },

    #[error("Malformed worklog line {line_number} (\"{line}\"): {reason}")]
    MalformedLogLine {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session state in {}: {source}", .path.display())]
    State {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No Jira URL configured (set jira_url in config.toml)")]
    MissingJiraUrl,

    #[error("No Jira token available (run `jiratime login` or set JIRATIME_TOKEN)")]
    MissingToken,

    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("{0}")]
    Jira(#[from] JiraError),
}

impl AppError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum JiraError {
    #[error("Jira returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request to Jira failed: {0}")]
    Transport(String),

    #[error("Unexpected response from Jira: {0}")]
    Decode(String),

    #[error("\"{0}\" is not a Jira issue key (letters, digits, '-' and '_' only)")]
    InvalidIssueKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn app_error_display_malformed_line() {
        let e = AppError::MalformedLogLine {
            line_number: 3,
            line: "2024-01-01 - ABC".to_string(),
            reason: "expected 3 fields, found 2".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Malformed worklog line 3 ("2024-01-01 - ABC"): expected 3 fields, found 2"#
        );
    }

    #[test]
    fn app_error_display_io_includes_path() {
        let e = AppError::io(
            "Failed to write",
            "/tmp/worklog.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(e.to_string(), "Failed to write /tmp/worklog.txt: denied");
    }

    #[test]
    fn jira_error_status() {
        let e = JiraError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(e.to_string(), "Jira returned HTTP 401: Unauthorized");
    }

    #[test]
    fn app_error_from_jira_error() {
        let jira = JiraError::Transport("connection refused".to_string());
        let app: AppError = jira.into();
        assert_eq!(app.to_string(), "Request to Jira failed: connection refused");
    }
}
