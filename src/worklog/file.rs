//! The on-disk log resource

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::session::Session;

use super::line::LogLine;
use super::recorder::WorklogRecorder;

const LOG_FILE_NAME: &str = "worklog.txt";
const OUTPUT_DIR_NAME: &str = "output";

/// Where the log lives relative to the workspace root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LogLayout {
    /// <workspace>/worklog.txt
    #[default]
    Root,
    /// <workspace>/output/worklog.txt
    Output,
}

/// Entries read back for display
#[derive(Debug, Default)]
pub(crate) struct LogEntries {
    pub(crate) lines: Vec<LogLine>,
    pub(crate) skipped: usize,
}

pub(crate) struct WorklogFile {
    path: PathBuf,
}

impl WorklogFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn for_workspace(workspace: &Path, layout: LogLayout) -> Self {
        let path = match layout {
            LogLayout::Root => workspace.join(LOG_FILE_NAME),
            LogLayout::Output => workspace.join(OUTPUT_DIR_NAME).join(LOG_FILE_NAME),
        };
        Self::new(path)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; a missing file reads as empty
    pub(crate) fn read(&self) -> Result<String, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(AppError::io("Failed to read", &self.path, e)),
        }
    }

    /// Read, merge and write back. The file is left untouched if the merge fails.
    pub(crate) fn append_session(
        &self,
        recorder: &WorklogRecorder,
        session: &Session,
    ) -> Result<(), AppError> {
        let existing = self.read()?;
        let updated = recorder.record(&existing, session)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create", parent, e))?;
        }
        fs::write(&self.path, updated).map_err(|e| AppError::io("Failed to write", &self.path, e))?;
        tracing::debug!(path = %self.path.display(), "worklog written");
        Ok(())
    }

    /// Parse every well-formed line; anything else is counted as skipped
    pub(crate) fn entries(&self) -> Result<LogEntries, AppError> {
        let text = self.read()?;
        let mut entries = LogEntries::default();
        for raw in text.lines() {
            if raw.trim().is_empty() {
                continue;
            }
            match LogLine::parse(raw) {
                Ok(line) => entries.lines.push(line),
                Err(reason) => {
                    tracing::debug!(line = raw, %reason, "skipping unparseable worklog line");
                    entries.skipped += 1;
                }
            }
        }
        Ok(entries)
    }
}
