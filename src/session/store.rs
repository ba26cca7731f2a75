//! Session state persistence
//!
//! The active session survives between CLI invocations as a small JSON file.
//! Idle is represented by the file being absent.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::consts::APP_NAME;
use crate::error::AppError;

use super::types::SessionState;

pub(crate) struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ~/.cache/jiratime/session.json
    pub(crate) fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".cache").join(APP_NAME).join("session.json"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn load(&self) -> Result<SessionState, AppError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionState::Idle),
            Err(e) => return Err(AppError::io("Failed to read", &self.path, e)),
        };
        serde_json::from_reader(file).map_err(|source| AppError::State {
            path: self.path.clone(),
            source,
        })
    }

    pub(crate) fn save(&self, state: &SessionState) -> Result<(), AppError> {
        if matches!(state, SessionState::Idle) {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(AppError::io("Failed to remove", &self.path, e)),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create", parent, e))?;
        }
        let json = serde_json::to_string_pretty(state).map_err(|source| AppError::State {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|e| AppError::io("Failed to write", &self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::ActiveSession;

    fn active() -> SessionState {
        SessionState::Active(ActiveSession {
            task_id: "ABC-1".to_string(),
            start: "2024-01-01T10:00:00Z".parse().unwrap(),
        })
    }

    #[test]
    fn missing_file_loads_as_idle() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), SessionState::Idle);
    }

    #[test]
    fn active_state_round_trips_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        store.save(&active()).unwrap();
        assert_eq!(store.load().unwrap(), active());
    }

    #[test]
    fn saving_idle_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&active()).unwrap();
        store.save(&SessionState::Idle).unwrap();
        assert!(!store.path().exists());
        // idempotent
        store.save(&SessionState::Idle).unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let err = SessionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::State { .. }));
    }
}
