use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::jira::JiraIssue;
use crate::session::{SessionState, StopOutcome, Submission};
use crate::worklog::LogLine;

use super::format::format_elapsed;

pub(crate) fn to_json_string(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {}", e);
        "{}".to_string()
    })
}

pub(crate) fn status_json(state: &SessionState, now: DateTime<Utc>) -> Value {
    match state {
        SessionState::Idle => json!({ "active": false }),
        SessionState::Active(active) => {
            let elapsed = active.elapsed_seconds(now);
            json!({
                "active": true,
                "task_id": active.task_id,
                "start": active.start.to_rfc3339(),
                "elapsed_seconds": elapsed,
                "elapsed": format_elapsed(elapsed),
            })
        }
    }
}

pub(crate) fn stop_json(outcome: &StopOutcome) -> Value {
    let StopOutcome::Stopped(report) = outcome else {
        return json!({ "stopped": false });
    };
    let (log_path, log_error) = match &report.log {
        Ok(path) => (Some(path.display().to_string()), None),
        Err(e) => (None, Some(e.to_string())),
    };
    let (submission, submission_error) = match &report.submission {
        Submission::Sent => ("sent", None),
        Submission::TooShort => ("too_short", None),
        Submission::Offline => ("offline", None),
        Submission::Unavailable(reason) => ("unavailable", Some(reason.clone())),
        Submission::Failed(e) => ("failed", Some(e.to_string())),
    };
    json!({
        "stopped": true,
        "task_id": report.session.task_id(),
        "start": report.session.start().to_rfc3339(),
        "end": report.session.end().to_rfc3339(),
        "duration_seconds": report.session.duration_seconds(),
        "log_path": log_path,
        "log_error": log_error,
        "submission": submission,
        "submission_error": submission_error,
    })
}

pub(crate) fn worklog_json(lines: &[&LogLine], skipped: usize) -> Value {
    let entries: Vec<Value> = lines
        .iter()
        .map(|line| {
            json!({
                "date": line.date_label,
                "task_id": line.task_id,
                "hours": line.duration.hours,
                "minutes": line.duration.minutes,
                "seconds": line.duration.seconds,
                "total_seconds": line.duration.total_seconds(),
            })
        })
        .collect();
    json!({ "entries": entries, "skipped_lines": skipped })
}

pub(crate) fn issues_json(issues: &[JiraIssue]) -> Value {
    Value::Array(
        issues
            .iter()
            .map(|issue| {
                json!({
                    "id": issue.id,
                    "key": issue.key,
                    "summary": issue.fields.summary,
                })
            })
            .collect(),
    )
}
