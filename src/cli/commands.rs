//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start tracking time against an issue
    Start {
        /// Jira issue key, e.g. ABC-123
        issue: String,
        /// Start time instead of now (RFC 3339, YYYY-MM-DDTHH:MM[:SS] or HH:MM[:SS])
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },
    /// Stop the active session and log it
    Stop {
        /// Stop time instead of now
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },
    /// Show the active session, if any
    Status,
    /// Track an issue in the foreground; press Enter to stop
    Track {
        /// Jira issue key, e.g. ABC-123
        issue: String,
    },
    /// Print the local worklog
    Show {
        /// Only entries for this date (YYYYMMDD or YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// List issues assigned to you in Jira
    Issues,
    /// Store a Jira personal access token
    Login {
        /// Token to store (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
}
