use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::consts::APP_NAME;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigLayout {
    Root,
    Output,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Jira base URL, e.g. "https://jira.example.com"
    #[serde(default)]
    pub(crate) jira_url: Option<String>,
    #[serde(default)]
    pub(crate) token: Option<String>,
    #[serde(default)]
    pub(crate) workspace: Option<PathBuf>,
    #[serde(default)]
    pub(crate) layout: Option<ConfigLayout>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) offline: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    /// Worklog comment sent to Jira
    #[serde(default)]
    pub(crate) comment: Option<String>,
    /// Progress interval for `track`
    #[serde(default)]
    pub(crate) tick_seconds: Option<u64>,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/jiratime/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join(APP_NAME).join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/jiratime/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let macos_path = config_dir.join(APP_NAME).join("config.toml");
            if !paths.contains(&macos_path) {
                paths.push(macos_path);
            }
        }

        // 3. Home directory: ~/.jiratime.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{APP_NAME}.toml")));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains(APP_NAME)));
    }

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
jira_url = "https://jira.example.com"
workspace = "/home/me/project"
layout = "output"
timezone = "Europe/Berlin"
offline = true
comment = "Pairing"
tick_seconds = 5
color = "never"
"#,
        )
        .unwrap();
        assert_eq!(config.jira_url.as_deref(), Some("https://jira.example.com"));
        assert!(matches!(config.layout, Some(ConfigLayout::Output)));
        assert!(matches!(config.color, Some(ConfigColorMode::Never)));
        assert!(config.offline);
        assert_eq!(config.tick_seconds, Some(5));
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.jira_url.is_none());
        assert!(!config.offline);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!(toml::from_str::<Config>(r#"layout = "nested""#).is_err());
    }
}
