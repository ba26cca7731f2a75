//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigLayout};
use crate::worklog::LogLayout;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum Layout {
    /// <workspace>/worklog.txt (default)
    #[default]
    Root,
    /// <workspace>/output/worklog.txt
    Output,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "jiratime")]
#[command(about = "Track time against Jira issues and log it locally and to Jira", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Workspace root that holds the worklog (default: current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub(crate) workspace: Option<PathBuf>,

    /// Worklog location inside the workspace
    #[arg(long, global = true, value_enum, default_value = "root")]
    pub(crate) layout: Layout,

    /// Jira base URL (e.g. https://jira.example.com)
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) jira_url: Option<String>,

    /// Only write the local worklog; never contact Jira
    #[arg(short = 'O', long, global = true)]
    pub(crate) offline: bool,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Timezone for date labels and --at times (e.g. "Europe/Berlin", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Worklog comment sent to Jira (set via config `comment`)
    #[arg(skip)]
    pub(crate) comment: Option<String>,

    /// Progress interval for `track` (set via config `tick_seconds`)
    #[arg(skip)]
    pub(crate) tick_seconds: Option<u64>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.offline && config.offline {
            self.offline = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        // For enum values, apply config only if CLI is at its default
        if let Some(layout) = config.layout
            && self.layout == Layout::Root
        {
            self.layout = match layout {
                ConfigLayout::Root => Layout::Root,
                ConfigLayout::Output => Layout::Output,
            };
        }
        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // String options: only apply if CLI didn't set them
        if self.workspace.is_none() {
            self.workspace = config.workspace.clone();
        }
        if self.jira_url.is_none() {
            self.jira_url = config.jira_url.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        self.comment = config.comment.clone();
        self.tick_seconds = config.tick_seconds;

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn log_layout(&self) -> LogLayout {
        match self.layout {
            Layout::Root => LogLayout::Root,
            Layout::Output => LogLayout::Output,
        }
    }

    pub(crate) fn workspace_dir(&self) -> PathBuf {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jiratime").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_flags_win_over_config() {
        let config: Config = toml::from_str(
            r#"
workspace = "/from/config"
layout = "output"
timezone = "Europe/Berlin"
"#,
        )
        .unwrap();
        let cli = parse(&["status", "-w", "/from/cli", "--timezone", "UTC"]).with_config(&config);
        assert_eq!(cli.workspace_dir(), PathBuf::from("/from/cli"));
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        // --layout was left at its default, so config applies
        assert_eq!(cli.log_layout(), LogLayout::Output);
    }

    #[test]
    fn config_fills_unset_options() {
        let config: Config = toml::from_str(
            r#"
jira_url = "https://jira.example.com"
offline = true
comment = "Pairing"
tick_seconds = 10
"#,
        )
        .unwrap();
        let cli = parse(&["stop"]).with_config(&config);
        assert!(cli.offline);
        assert_eq!(cli.jira_url.as_deref(), Some("https://jira.example.com"));
        assert_eq!(cli.comment.as_deref(), Some("Pairing"));
        assert_eq!(cli.tick_seconds, Some(10));
    }

    #[test]
    fn no_color_overrides_color_mode() {
        let cli = parse(&["status", "--color", "always", "--no-color"]);
        assert!(!cli.use_color());
        let cli = parse(&["status", "--color", "always"]);
        assert!(cli.use_color());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["start", "ABC-1", "-O", "--layout", "output"]);
        assert!(cli.offline);
        assert_eq!(cli.layout, Layout::Output);
    }
}
