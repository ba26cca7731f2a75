use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::consts::DATE_FORMAT;
use crate::credentials::{ensure_token, prompt_token, store_token};
use crate::error::{AppError, JiraError};
use crate::jira::JiraClient;
use crate::output::{
    format_elapsed, issues_json, render_issue_table, render_worklog_table, status_json,
    stop_json, to_json_string, worklog_json,
};
use crate::session::{Remote, SessionState, SessionStore, StopOutcome, StopReport, Submission, Tracker};
use crate::utils::{Timezone, parse_date, parse_time};
use crate::worklog::WorklogFile;

const DEFAULT_COMMENT: &str = "Logged with jiratime";
const DEFAULT_TICK_SECONDS: u64 = 1;

/// Exit status for successful runs and informational no-ops
pub(crate) const EXIT_OK: i32 = 0;
/// Exit status for rejected input and state errors
pub(crate) const EXIT_REJECTED: i32 = 1;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) timezone: Timezone,
    pub(crate) now: DateTime<Utc>,
}

impl CommandContext<'_> {
    fn worklog(&self) -> WorklogFile {
        WorklogFile::for_workspace(&self.cli.workspace_dir(), self.cli.log_layout())
    }

    fn tracker(&self) -> Result<Tracker, AppError> {
        let store_path = SessionStore::default_path().ok_or(AppError::NoHomeDir)?;
        Tracker::load(
            SessionStore::new(store_path),
            self.worklog(),
            self.timezone,
            Remote::Offline,
        )
    }

    fn jira_client(&self) -> Result<JiraClient, AppError> {
        let base_url = self
            .cli
            .jira_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(AppError::MissingJiraUrl)?;
        let token = ensure_token(self.config)?;
        Ok(JiraClient::new(base_url, token))
    }

    /// Credentials are resolved once, before the command runs
    fn remote(&self) -> Remote {
        if self.cli.offline {
            return Remote::Offline;
        }
        match self.jira_client() {
            Ok(client) => Remote::Enabled {
                submitter: Box::new(client),
                comment: self
                    .cli
                    .comment
                    .clone()
                    .unwrap_or_else(|| DEFAULT_COMMENT.to_string()),
            },
            Err(e) => Remote::Unavailable(e),
        }
    }

    fn resolve_time(&self, at: Option<&str>) -> Result<DateTime<Utc>, AppError> {
        match at {
            Some(raw) => parse_time(raw, self.timezone, self.now),
            None => Ok(self.now),
        }
    }

    fn local_time(&self, instant: DateTime<Utc>) -> String {
        self.timezone
            .to_fixed_offset(instant)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Run the parsed command and return the process exit status
pub(crate) fn run(cli: &Cli, config: &Config) -> Result<i32, AppError> {
    let ctx = CommandContext {
        cli,
        config,
        timezone: Timezone::parse(cli.timezone.as_deref())?,
        now: Utc::now(),
    };

    match &cli.command {
        Commands::Start { issue, at } => handle_start(&ctx, issue, at.as_deref()),
        Commands::Stop { at } => handle_stop(&ctx, at.as_deref()),
        Commands::Status => handle_status(&ctx),
        Commands::Track { issue } => handle_track(&ctx, issue),
        Commands::Show { date } => handle_show(&ctx, date.as_deref()),
        Commands::Issues => handle_issues(&ctx),
        Commands::Login { token } => handle_login(token.as_deref()),
    }
}

fn warn_rejected(e: &AppError) -> i32 {
    eprintln!("Warning: {e}");
    EXIT_REJECTED
}

fn handle_start(ctx: &CommandContext<'_>, issue: &str, at: Option<&str>) -> Result<i32, AppError> {
    let start = ctx.resolve_time(at)?;
    let mut tracker = ctx.tracker()?;
    match tracker.start(issue, start) {
        Ok(active) => {
            if ctx.cli.json {
                println!("{}", to_json_string(&status_json(tracker.state(), ctx.now)));
            } else {
                println!(
                    "Started {} at {}",
                    active.task_id,
                    ctx.local_time(active.start)
                );
            }
            Ok(EXIT_OK)
        }
        Err(e @ (AppError::MissingTaskId | AppError::AlreadyActive { .. })) => Ok(warn_rejected(&e)),
        Err(e) => Err(e),
    }
}

fn handle_stop(ctx: &CommandContext<'_>, at: Option<&str>) -> Result<i32, AppError> {
    let end = ctx.resolve_time(at)?;
    let mut tracker = ctx.tracker()?;
    let outcome = match stop_at(ctx, &mut tracker, end) {
        Ok(outcome) => outcome,
        Err(e @ AppError::NegativeDuration { .. }) => return Ok(warn_rejected(&e)),
        Err(e) => return Err(e),
    };
    print_stop_outcome(ctx, &outcome);
    Ok(EXIT_OK)
}

/// Credentials are only resolved when the session will actually be sent
fn stop_at(
    ctx: &CommandContext<'_>,
    tracker: &mut Tracker,
    end: DateTime<Utc>,
) -> Result<StopOutcome, AppError> {
    if tracker.would_submit(end)? {
        tracker.set_remote(ctx.remote());
    }
    tracker.stop(end)
}

fn print_stop_outcome(ctx: &CommandContext<'_>, outcome: &StopOutcome) {
    if ctx.cli.json {
        println!("{}", to_json_string(&stop_json(outcome)));
        return;
    }
    match outcome {
        StopOutcome::Idle => println!("No active session."),
        StopOutcome::Stopped(report) => print_stop_report(report),
    }
}

fn print_stop_report(report: &StopReport) {
    let session = &report.session;
    let elapsed = format_elapsed(session.duration_seconds());
    println!("Stopped {} after {}", session.task_id(), elapsed);

    match &report.log {
        Ok(path) => println!("Logged to {}", path.display()),
        Err(e) => eprintln!("Error: Failed to update worklog: {e}"),
    }

    match &report.submission {
        Submission::Sent => println!("Sent {} to Jira issue {}", elapsed, session.task_id()),
        Submission::TooShort => println!("Not sent to Jira (sessions of a minute or less stay local)"),
        Submission::Offline => println!("Not sent to Jira (offline)"),
        Submission::Unavailable(reason) => eprintln!("Warning: Not sent to Jira: {reason}"),
        Submission::Failed(e) => eprintln!("Error: Jira worklog submission failed: {e}"),
    }
}

fn handle_status(ctx: &CommandContext<'_>) -> Result<i32, AppError> {
    let tracker = ctx.tracker()?;
    if ctx.cli.json {
        println!("{}", to_json_string(&status_json(tracker.state(), ctx.now)));
        return Ok(EXIT_OK);
    }
    match tracker.state() {
        SessionState::Idle => println!("No active session."),
        SessionState::Active(active) => println!(
            "Tracking {} for {} (since {})",
            active.task_id,
            format_elapsed(active.elapsed_seconds(ctx.now)),
            ctx.local_time(active.start)
        ),
    }
    Ok(EXIT_OK)
}

/// Foreground session: progress ticks on stderr until Enter, end of input
/// or Ctrl-C, then a normal stop.
///
/// The remote is resolved up front because a token prompt needs stdin,
/// which is then held by the wait for Enter.
fn handle_track(ctx: &CommandContext<'_>, issue: &str) -> Result<i32, AppError> {
    let mut tracker = ctx.tracker()?;
    if tracker.state().active().is_none() {
        tracker.set_remote(ctx.remote());
    }
    let active = match tracker.start(issue, Utc::now()) {
        Ok(active) => active,
        Err(e @ (AppError::MissingTaskId | AppError::AlreadyActive { .. })) => {
            return Ok(warn_rejected(&e));
        }
        Err(e) => return Err(e),
    };

    eprintln!("Tracking {}. Press Enter to stop.", active.task_id);
    let interval = Duration::from_secs(ctx.cli.tick_seconds.unwrap_or(DEFAULT_TICK_SECONDS).max(1));
    let task_id = active.task_id.clone();
    tracker.start_ticker(interval, move |elapsed| {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "\rWorking on {task_id} for {}", format_elapsed(elapsed));
        let _ = stderr.flush();
    });

    wait_for_stop_signal();
    eprintln!();

    let outcome = tracker.stop(Utc::now())?;
    print_stop_outcome(ctx, &outcome);
    Ok(EXIT_OK)
}

/// Block until Enter, end of input or Ctrl-C
fn wait_for_stop_signal() {
    let (tx, rx) = mpsc::channel::<()>();

    let interrupt = tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = interrupt.send(());
    }) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    // Enter, EOF and read errors all end the session. The reader is left
    // blocked on stdin after a Ctrl-C; the process exits right after the stop.
    thread::spawn(move || {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        let _ = tx.send(());
    });

    let _ = rx.recv();
}

fn handle_show(ctx: &CommandContext<'_>, date: Option<&str>) -> Result<i32, AppError> {
    let label = date
        .map(|raw| parse_date(raw).map(|d| d.format(DATE_FORMAT).to_string()))
        .transpose()?;
    let worklog = ctx.worklog();
    let entries = worklog.entries()?;
    let lines: Vec<_> = entries
        .lines
        .iter()
        .filter(|line| label.as_deref().is_none_or(|l| line.date_label == l))
        .collect();

    if ctx.cli.json {
        println!("{}", to_json_string(&worklog_json(&lines, entries.skipped)));
        return Ok(EXIT_OK);
    }
    if lines.is_empty() {
        println!("No worklog entries found in {}.", worklog.path().display());
        return Ok(EXIT_OK);
    }
    println!("{}", render_worklog_table(&lines, ctx.cli.use_color()));
    if entries.skipped > 0 {
        eprintln!("Skipped {} unparseable line(s)", entries.skipped);
    }
    Ok(EXIT_OK)
}

fn handle_issues(ctx: &CommandContext<'_>) -> Result<i32, AppError> {
    if ctx.cli.offline {
        eprintln!("Warning: `issues` needs Jira; drop --offline to use it");
        return Ok(EXIT_REJECTED);
    }
    let client = ctx.jira_client()?;
    let user = client.myself()?;
    let Some(assignee) = user.assignee() else {
        return Err(JiraError::Decode("current user has no email address or name".to_string()).into());
    };
    tracing::debug!(%assignee, display_name = ?user.display_name, "listing assigned issues");
    let issues = client.assigned_issues(assignee)?;

    if ctx.cli.json {
        println!("{}", to_json_string(&issues_json(&issues)));
    } else if issues.is_empty() {
        println!("No issues assigned to {assignee}.");
    } else {
        println!("{}", render_issue_table(&issues, ctx.cli.use_color()));
    }
    Ok(EXIT_OK)
}

fn handle_login(token: Option<&str>) -> Result<i32, AppError> {
    let token = match token.map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => token.to_string(),
        None => prompt_token().ok_or(AppError::MissingToken)?,
    };
    let path = store_token(&token)?;
    println!("Token stored in {}", path.display());
    Ok(EXIT_OK)
}
