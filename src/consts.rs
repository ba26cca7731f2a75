/// Date label written into worklog lines: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between the date, task and duration fields of a worklog line
pub(crate) const FIELD_SEPARATOR: &str = " - ";

/// Sessions must be strictly longer than this to be sent to Jira
pub(crate) const MIN_SUBMIT_SECONDS: i64 = 60;

/// Application name used for config, cache and token directories
pub(crate) const APP_NAME: &str = "jiratime";

/// Environment variable holding the Jira personal access token
pub(crate) const TOKEN_ENV: &str = "JIRATIME_TOKEN";
