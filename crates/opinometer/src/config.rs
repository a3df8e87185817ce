use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::source::Platform;

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub run: Option<RunCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunCfg {
    pub query: Option<String>,
    pub limit: Option<usize>,
    /// `platform=path` entries.
    pub inputs: Option<Vec<String>>,
    pub results_dir: Option<String>,
    pub sort_by_date: Option<bool>,
    pub show_all: Option<bool>,
    pub show_network: Option<bool>,
    pub top_words: Option<usize>,
    pub vocabulary_file: Option<String>,
    pub proximity_window: Option<usize>,
}

pub fn load_user_config(home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let cfg: UserConfig = toml::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(cfg))
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// `explicit` if set, else `$HOME/.opinometer`, else `./.opinometer`.
pub fn resolve_home(explicit: &str) -> PathBuf {
    if !explicit.is_empty() {
        expand_home(explicit)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".opinometer")
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".opinometer")
    }
}

/// Parse one `platform=path` input.
pub fn parse_input(entry: &str) -> anyhow::Result<(Platform, PathBuf)> {
    let (platform, path) = entry
        .split_once('=')
        .with_context(|| format!("input '{}' is not platform=path", entry.trim()))?;
    let path = path.trim();
    anyhow::ensure!(!path.is_empty(), "input '{}' has an empty path", entry.trim());
    let platform: Platform = platform.parse()?;
    Ok((platform, expand_home(path)))
}

/// Parse comma-separated `platform=path` inputs; blank entries are ignored.
pub fn parse_inputs(list: &str) -> anyhow::Result<Vec<(Platform, PathBuf)>> {
    list.split(',')
        .filter(|e| !e.trim().is_empty())
        .map(parse_input)
        .collect()
}
