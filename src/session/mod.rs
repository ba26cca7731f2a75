//! Time-tracking sessions: value types, persistence, the progress ticker
//! and the controller that ties them together

mod store;
mod ticker;
mod tracker;
mod types;

pub(crate) use store::SessionStore;
pub(crate) use tracker::{Remote, StopOutcome, StopReport, Submission, Tracker};
pub(crate) use types::{Session, SessionState};
