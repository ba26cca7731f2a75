mod format;
mod json;
mod table;

pub(crate) use format::format_elapsed;
pub(crate) use json::{issues_json, status_json, stop_json, to_json_string, worklog_json};
pub(crate) use table::{render_issue_table, render_worklog_table};
