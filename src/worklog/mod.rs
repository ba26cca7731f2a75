//! Local worklog: the "{date} - {task} - {h}h {m}m {s}s" text file

mod duration;
mod file;
mod line;
mod recorder;

pub(crate) use duration::LogDuration;
pub(crate) use file::{LogLayout, WorklogFile};
pub(crate) use line::LogLine;
pub(crate) use recorder::WorklogRecorder;
