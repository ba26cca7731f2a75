//! Session value types and the two-state tracking machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A completed, timed interval of work attributed to one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Session {
    task_id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(
        task_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let task_id = task_id.into().trim().to_string();
        if task_id.is_empty() {
            return Err(AppError::MissingTaskId);
        }
        let seconds = (end - start).num_seconds();
        if end < start {
            return Err(AppError::NegativeDuration { seconds: -seconds });
        }
        Ok(Self {
            task_id,
            start,
            end,
        })
    }

    pub(crate) fn task_id(&self) -> &str {
        &self.task_id
    }

    pub(crate) fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub(crate) fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whole seconds between start and end; sub-second remainders are dropped
    pub(crate) fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Payload of the Active state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ActiveSession {
    pub(crate) task_id: String,
    pub(crate) start: DateTime<Utc>,
}

impl ActiveSession {
    pub(crate) fn finish(&self, end: DateTime<Utc>) -> Result<Session, AppError> {
        Session::new(self.task_id.clone(), self.start, end)
    }

    /// Seconds elapsed at `now`, clamped to zero for clocks that went backwards
    pub(crate) fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start).num_seconds().max(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub(crate) enum SessionState {
    #[default]
    Idle,
    Active(ActiveSession),
}

impl SessionState {
    pub(crate) fn active(&self) -> Option<&ActiveSession> {
        match self {
            SessionState::Idle => None,
            SessionState::Active(active) => Some(active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn duration_is_end_minus_start() {
        let s = Session::new("ABC", at("2024-01-01T10:00:00Z"), at("2024-01-01T10:01:30Z"))
            .unwrap();
        assert_eq!(s.duration_seconds(), 90);
        assert_eq!(s.task_id(), "ABC");
    }

    #[test]
    fn duration_truncates_subseconds() {
        let s = Session::new(
            "ABC",
            at("2024-01-01T10:00:00Z"),
            at("2024-01-01T10:00:59.999Z"),
        )
        .unwrap();
        assert_eq!(s.duration_seconds(), 59);
    }

    #[test]
    fn zero_duration_is_allowed() {
        let t = at("2024-01-01T10:00:00Z");
        assert_eq!(Session::new("ABC", t, t).unwrap().duration_seconds(), 0);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = Session::new("ABC", at("2024-01-01T10:00:10Z"), at("2024-01-01T10:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, AppError::NegativeDuration { seconds: 10 }));
    }

    #[test]
    fn blank_task_id_is_rejected() {
        let t = at("2024-01-01T10:00:00Z");
        assert!(matches!(
            Session::new("   ", t, t).unwrap_err(),
            AppError::MissingTaskId
        ));
    }

    #[test]
    fn task_id_is_trimmed() {
        let t = at("2024-01-01T10:00:00Z");
        assert_eq!(Session::new(" ABC-1 ", t, t).unwrap().task_id(), "ABC-1");
    }

    #[test]
    fn elapsed_clamps_to_zero() {
        let active = ActiveSession {
            task_id: "ABC".to_string(),
            start: at("2024-01-01T10:00:00Z"),
        };
        assert_eq!(active.elapsed_seconds(at("2024-01-01T09:59:00Z")), 0);
        assert_eq!(active.elapsed_seconds(at("2024-01-01T10:02:00Z")), 120);
    }

    #[test]
    fn state_serializes_with_tag() {
        let state = SessionState::Active(ActiveSession {
            task_id: "ABC-1".to_string(),
            start: at("2024-01-01T10:00:00Z"),
        });
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "active");
        assert_eq!(json["task_id"], "ABC-1");

        let idle = serde_json::to_value(SessionState::Idle).unwrap();
        assert_eq!(idle["state"], "idle");
    }
}
