use std::fmt;

use crate::consts::FIELD_SEPARATOR;

use super::duration::LogDuration;

/// One "{date} - {task} - {h}h {m}m {s}s" record
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogLine {
    pub(crate) date_label: String,
    pub(crate) task_id: String,
    pub(crate) duration: LogDuration,
}

impl LogLine {
    pub(crate) fn parse(line: &str) -> Result<Self, String> {
        let parts = split_fields(line)?;
        Ok(Self {
            date_label: parts[0].to_string(),
            task_id: parts[1].to_string(),
            duration: LogDuration::parse(parts[2])?,
        })
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.date_label, self.task_id, self.duration
        )
    }
}

/// Split a line into its three fields, keeping each field verbatim
pub(super) fn split_fields(line: &str) -> Result<[&str; 3], String> {
    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    match parts.as_slice() {
        [date, task, duration] => Ok([*date, *task, *duration]),
        _ => Err(format!("expected 3 fields, found {}", parts.len())),
    }
}
