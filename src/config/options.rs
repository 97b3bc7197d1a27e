// src/config/options.rs
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::consts::*;
use crate::error::{OpsError, Result};

/// Raw, not-yet-validated inputs (CLI flags and positional ids).
#[derive(Clone, Debug, Default)]
pub struct ConfigInputs {
    pub player_sheet: Option<String>,
    pub game_sheet: Option<String>,
    pub credentials: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

/// Where tables come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Live Sheets API; credential file holds an API key or access token.
    Sheets { credentials: PathBuf },
    /// Directory of CSV exports, one file per sheet.
    Snapshot { dir: PathBuf },
}

/// Fully resolved configuration. Built once at startup, then passed down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpsConfig {
    pub player_sheet: Option<String>,
    pub game_sheet: Option<String>,
    pub source: SourceKind,
    pub out_dir: PathBuf,
    pub log_file: PathBuf,
    pub verbose: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl OpsConfig {
    /// Resolve against the real process environment and `config/environment.env`.
    pub fn resolve(inputs: ConfigInputs) -> Self {
        Self::resolve_with(inputs, |k| std::env::var(k).ok(), Path::new(ENV_FILE))
    }

    /// Precedence for sheet ids: explicit input, then environment, then env file.
    pub fn resolve_with(
        inputs: ConfigInputs,
        env: impl Fn(&str) -> Option<String>,
        env_file: &Path,
    ) -> Self {
        let file_vars: HashMap<String, String> = fs::read_to_string(env_file)
            .map(|text| parse_env_file(&text).into_iter().collect())
            .unwrap_or_default();

        let lookup = |key: &str| -> Option<String> {
            env(key)
                .or_else(|| file_vars.get(key).cloned())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let player_sheet = non_empty(inputs.player_sheet).or_else(|| lookup(ENV_PLAYER_SHEET));
        let game_sheet = non_empty(inputs.game_sheet).or_else(|| lookup(ENV_GAME_SHEET));

        let source = match inputs.snapshot {
            Some(dir) => SourceKind::Snapshot { dir },
            None => SourceKind::Sheets {
                credentials: inputs.credentials.unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS)),
            },
        };

        Self {
            player_sheet,
            game_sheet,
            source,
            out_dir: inputs.out_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            log_file: inputs.log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            verbose: inputs.verbose,
        }
    }

    pub fn require_player_sheet(&self) -> Result<&str> {
        self.player_sheet.as_deref().ok_or_else(|| {
            OpsError::Config(format!(
                "player spreadsheet id not provided (argument, {ENV_PLAYER_SHEET} or {ENV_FILE})"
            ))
        })
    }

    pub fn require_game_sheet(&self) -> Result<&str> {
        self.game_sheet.as_deref().ok_or_else(|| {
            OpsError::Config(format!(
                "game spreadsheet id not provided (argument, {ENV_GAME_SHEET} or {ENV_FILE})"
            ))
        })
    }

    pub fn out_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            OpsError::Config(format!("credential file {} unreadable: {e}", path.display()))
        })?;
        let creds: Credentials = serde_json::from_str(&text).map_err(|e| {
            OpsError::Config(format!("credential file {} is not valid JSON: {e}", path.display()))
        })?;
        if creds.api_key.is_none() && creds.access_token.is_none() {
            return Err(OpsError::Config(format!(
                "credential file {} has neither api_key nor access_token",
                path.display()
            )));
        }
        Ok(creds)
    }
}

/// `KEY=value` lines; `#` comments and blank lines ignored.
pub fn parse_env_file(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
