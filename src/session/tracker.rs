//! Session controller
//!
//! Owns the Idle/Active state, the progress ticker, the worklog file and
//! the Jira submitter. `start` and `stop` are the only state transitions.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::jira::{WorklogRequest, WorklogSubmitter, should_submit};
use crate::utils::Timezone;
use crate::worklog::{WorklogFile, WorklogRecorder};

use super::store::SessionStore;
use super::ticker::Ticker;
use super::types::{ActiveSession, Session, SessionState};

/// Whether finished sessions can be sent to Jira
pub(crate) enum Remote {
    /// Submission disabled by the user
    Offline,
    /// Submission wanted but not possible (no URL or token)
    Unavailable(AppError),
    Enabled {
        submitter: Box<dyn WorklogSubmitter>,
        comment: String,
    },
}

/// What happened to the Jira side of a stop
#[derive(Debug)]
pub(crate) enum Submission {
    Sent,
    /// Duration not above the submission threshold
    TooShort,
    Offline,
    Unavailable(String),
    Failed(AppError),
}

#[derive(Debug)]
pub(crate) struct StopReport {
    pub(crate) session: Session,
    /// Path written, or why the local write failed
    pub(crate) log: Result<PathBuf, AppError>,
    pub(crate) submission: Submission,
}

#[derive(Debug)]
pub(crate) enum StopOutcome {
    /// Nothing was running
    Idle,
    Stopped(StopReport),
}

pub(crate) struct Tracker {
    state: SessionState,
    store: SessionStore,
    worklog: WorklogFile,
    recorder: WorklogRecorder,
    timezone: Timezone,
    remote: Remote,
    ticker: Option<Ticker>,
}

impl Tracker {
    pub(crate) fn load(
        store: SessionStore,
        worklog: WorklogFile,
        timezone: Timezone,
        remote: Remote,
    ) -> Result<Self, AppError> {
        let state = store.load()?;
        tracing::debug!(?state, path = %store.path().display(), "loaded session state");
        Ok(Self {
            state,
            store,
            worklog,
            recorder: WorklogRecorder::new(timezone),
            timezone,
            remote,
            ticker: None,
        })
    }

    /// Credentials are only resolved once a command knows it may submit
    pub(crate) fn set_remote(&mut self, remote: Remote) {
        self.remote = remote;
    }

    pub(crate) fn state(&self) -> &SessionState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn worklog(&self) -> &WorklogFile {
        &self.worklog
    }

    /// Idle -> Active. Rejected without touching state when the task id is
    /// blank or a session is already running.
    pub(crate) fn start(&mut self, task_id: &str, at: DateTime<Utc>) -> Result<ActiveSession, AppError> {
        let task_id = task_id.trim();
        if task_id.is_empty() {
            return Err(AppError::MissingTaskId);
        }
        if let SessionState::Active(active) = &self.state {
            return Err(AppError::AlreadyActive {
                task_id: active.task_id.clone(),
            });
        }

        let active = ActiveSession {
            task_id: task_id.to_string(),
            start: at,
        };
        let next = SessionState::Active(active.clone());
        self.store.save(&next)?;
        self.state = next;
        tracing::info!(%task_id, start = %at, "session started");
        Ok(active)
    }

    /// Whether stopping at `at` would send a worklog, i.e. whether the
    /// command needs credentials at all.
    pub(crate) fn would_submit(&self, at: DateTime<Utc>) -> Result<bool, AppError> {
        match &self.state {
            SessionState::Idle => Ok(false),
            SessionState::Active(active) => Ok(should_submit(active.finish(at)?.duration_seconds())),
        }
    }

    /// Active -> Idle, then record the session locally and remotely.
    ///
    /// Failures of the local write and of the submission are reported in the
    /// returned `StopReport`; neither undoes the other.
    pub(crate) fn stop(&mut self, at: DateTime<Utc>) -> Result<StopOutcome, AppError> {
        let SessionState::Active(active) = &self.state else {
            return Ok(StopOutcome::Idle);
        };
        let session = active.finish(at)?;

        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.store.save(&SessionState::Idle)?;
        self.state = SessionState::Idle;
        tracing::info!(
            task_id = session.task_id(),
            seconds = session.duration_seconds(),
            "session stopped"
        );

        let log = self
            .worklog
            .append_session(&self.recorder, &session)
            .map(|()| self.worklog.path().to_path_buf());
        if let Err(e) = &log {
            tracing::warn!(error = %e, "local worklog write failed");
        }

        let submission = self.submit(&session);

        Ok(StopOutcome::Stopped(StopReport {
            session,
            log,
            submission,
        }))
    }

    fn submit(&self, session: &Session) -> Submission {
        if !should_submit(session.duration_seconds()) {
            return Submission::TooShort;
        }
        match &self.remote {
            Remote::Offline => Submission::Offline,
            Remote::Unavailable(reason) => Submission::Unavailable(reason.to_string()),
            Remote::Enabled { submitter, comment } => {
                let request = WorklogRequest::from_session(session, comment, self.timezone);
                match submitter.submit(session.task_id(), &request) {
                    Ok(()) => Submission::Sent,
                    Err(e) => {
                        tracing::warn!(error = %e, "worklog submission failed");
                        Submission::Failed(e.into())
                    }
                }
            }
        }
    }

    /// Start the repeating progress callback. It receives the seconds
    /// elapsed in the active session and is torn down on `stop` or drop.
    pub(crate) fn start_ticker<F>(&mut self, interval: Duration, mut on_tick: F)
    where
        F: FnMut(i64) + Send + 'static,
    {
        let Some(active) = self.state.active().cloned() else {
            return;
        };
        if let Some(previous) = self.ticker.take() {
            previous.cancel();
        }
        self.ticker = Some(Ticker::spawn(interval, move |_| {
            on_tick(active.elapsed_seconds(Utc::now()));
        }));
    }
}
