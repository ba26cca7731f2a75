//! Personal access token lookup and storage
//!
//! Lookup order: `JIRATIME_TOKEN`, the `token` config key, then the token
//! file in the user config directory.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::consts::{APP_NAME, TOKEN_ENV};
use crate::error::AppError;

/// <config_dir>/jiratime/token
pub(crate) fn token_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join(APP_NAME).join("token"))
}

pub(crate) fn retrieve_token(config: &Config) -> Option<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV)
        && let Some(token) = non_empty(&token)
    {
        tracing::debug!("using token from {TOKEN_ENV}");
        return Some(token);
    }
    if let Some(token) = config.token.as_deref().and_then(non_empty) {
        tracing::debug!("using token from config file");
        return Some(token);
    }
    let path = token_path()?;
    let stored = fs::read_to_string(&path).ok()?;
    tracing::debug!(path = %path.display(), "using stored token");
    non_empty(&stored)
}

/// Persist the token, readable by the owner only
pub(crate) fn store_token_at(path: &Path, token: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::io("Failed to create", parent, e))?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    // mode only applies on creation; tighten files left over from older runs first
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if path.exists() {
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AppError::io("Failed to restrict permissions on", path, e))?;
        }
    }

    let mut file = options
        .open(path)
        .map_err(|e| AppError::io("Failed to open", path, e))?;
    file.write_all(token.trim().as_bytes())
        .map_err(|e| AppError::io("Failed to write", path, e))
}

pub(crate) fn store_token(token: &str) -> Result<PathBuf, AppError> {
    let path = token_path().ok_or(AppError::NoHomeDir)?;
    store_token_at(&path, token)?;
    Ok(path)
}

/// Ask for a token on stdin. Returns None when stdin is not a terminal or
/// the user enters nothing.
pub(crate) fn prompt_token() -> Option<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return None;
    }
    eprint!("Enter your Jira personal access token: ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    stdin.lock().read_line(&mut line).ok()?;
    non_empty(&line)
}

/// Existing token, or prompt for one and persist it
pub(crate) fn ensure_token(config: &Config) -> Result<String, AppError> {
    if let Some(token) = retrieve_token(config) {
        return Ok(token);
    }
    let token = prompt_token().ok_or(AppError::MissingToken)?;
    let path = store_token(&token)?;
    eprintln!("Token stored in {}", path.display());
    Ok(token)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
