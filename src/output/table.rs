use comfy_table::{Cell, Color};

use crate::jira::JiraIssue;
use crate::worklog::LogLine;

use super::format::{create_styled_table, format_elapsed, right_cell, styled_cell};

/// Worklog lines with the recorded duration and its normalised total
pub(crate) fn render_worklog_table(lines: &[&LogLine], use_color: bool) -> String {
    let mut table = create_styled_table(&["Date", "Task", "Recorded", "Total"], use_color);

    let mut total_seconds = 0u64;
    for line in lines {
        let seconds = line.duration.total_seconds();
        total_seconds = total_seconds.saturating_add(seconds);
        table.add_row(vec![
            Cell::new(&line.date_label),
            Cell::new(&line.task_id),
            right_cell(&line.duration.to_string(), None, false),
            right_cell(&elapsed(seconds), None, false),
        ]);
    }

    let total_color = use_color.then_some(Color::Green);
    table.add_row(vec![
        styled_cell("Total", total_color, true),
        styled_cell(&format!("{} entries", lines.len()), None, false),
        Cell::new(""),
        right_cell(&elapsed(total_seconds), total_color, true),
    ]);
    table.to_string()
}

fn elapsed(seconds: u64) -> String {
    format_elapsed(i64::try_from(seconds).unwrap_or(i64::MAX))
}

pub(crate) fn render_issue_table(issues: &[JiraIssue], use_color: bool) -> String {
    let mut table = create_styled_table(&["Key", "Summary"], use_color);
    let key_color = use_color.then_some(Color::Yellow);
    for issue in issues {
        table.add_row(vec![
            styled_cell(&issue.key, key_color, false),
            Cell::new(&issue.fields.summary),
        ]);
    }
    table.to_string()
}
