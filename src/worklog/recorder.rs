//! Merge a finished session into the worklog text
//!
//! Pure text transformation; reading and writing the file lives in
//! [`super::file`].

use crate::consts::{DATE_FORMAT, FIELD_SEPARATOR};
use crate::error::AppError;
use crate::session::Session;
use crate::utils::Timezone;

use super::duration::LogDuration;
use super::line::{LogLine, split_fields};

#[derive(Debug, Clone, Copy)]
pub(crate) struct WorklogRecorder {
    timezone: Timezone,
}

impl WorklogRecorder {
    pub(crate) fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }

    /// Date label for a session: the calendar date its end falls on
    pub(crate) fn date_label(&self, session: &Session) -> String {
        self.timezone
            .date_of(session.end())
            .format(DATE_FORMAT)
            .to_string()
    }

    /// Return `existing` with `session` merged in.
    ///
    /// The first line containing both the date label and the task id has the
    /// session's time added to it field by field. Otherwise a new line is
    /// appended. Every other line is left untouched. A matched line that
    /// cannot be parsed fails the whole call.
    pub(crate) fn record(&self, existing: &str, session: &Session) -> Result<String, AppError> {
        let date_label = self.date_label(session);
        let task_id = session.task_id();
        let added = LogDuration::from_seconds(u64::try_from(session.duration_seconds()).unwrap_or(0));

        let mut lines: Vec<String> = existing.split('\n').map(str::to_string).collect();
        let matched = lines
            .iter()
            .position(|line| line.contains(&date_label) && line.contains(task_id));

        if let Some(index) = matched {
            let merged = merge_line(&lines[index], added).map_err(|reason| {
                AppError::MalformedLogLine {
                    line_number: index + 1,
                    line: lines[index].trim_end_matches('\r').to_string(),
                    reason,
                }
            })?;
            lines[index] = merged;
            tracing::debug!(line = index + 1, %task_id, %date_label, "merged into existing worklog line");
            return Ok(lines.join("\n"));
        }

        let entry = LogLine {
            date_label,
            task_id: task_id.to_string(),
            duration: added,
        };
        let newline = if existing.contains("\r\n") { "\r\n" } else { "\n" };
        let mut updated = String::with_capacity(existing.len() + 64);
        updated.push_str(existing);
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push_str(newline);
        }
        updated.push_str(&entry.to_string());
        updated.push_str(newline);
        tracing::debug!(%entry, "appended worklog line");
        Ok(updated)
    }
}

fn merge_line(line: &str, added: LogDuration) -> Result<String, String> {
    let (body, line_end) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };
    let [date, task, duration] = split_fields(body)?;
    let total = LogDuration::parse(duration)?.add(added)?;
    Ok(format!(
        "{date}{FIELD_SEPARATOR}{task}{FIELD_SEPARATOR}{total}{line_end}"
    ))
}
