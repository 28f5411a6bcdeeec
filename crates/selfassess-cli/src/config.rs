//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use selfassess_core::storage::validate_key;

/// Top-level selfassess configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfassessConfig {
    /// Directory holding saved progress.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Key the in-progress survey is saved under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// URL included when sharing the survey.
    #[serde(default)]
    pub share_url: String,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./.selfassess")
}
fn default_storage_key() -> String {
    "lebanese-assessment-progress".to_string()
}

impl Default for SelfassessConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            storage_key: default_storage_key(),
            share_url: String::new(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `path`, if given (must exist)
/// 2. `selfassess.toml` in the current directory
/// 3. `~/.config/selfassess/config.toml`
///
/// Environment variable overrides: `SELFASSESS_STATE_DIR`, `SELFASSESS_SHARE_URL`.
pub fn load_config_from(path: Option<&Path>) -> Result<SelfassessConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("selfassess.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join(".config/selfassess/config.toml"))
                .filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(p) => {
            let content = std::fs::read_to_string(&p)
                .with_context(|| format!("failed to read config: {}", p.display()))?;
            tracing::debug!("loaded config from {}", p.display());
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", p.display()))?
        }
        None => SelfassessConfig::default(),
    };

    if let Ok(dir) = std::env::var("SELFASSESS_STATE_DIR") {
        config.state_dir = PathBuf::from(dir);
    }
    if let Ok(url) = std::env::var("SELFASSESS_SHARE_URL") {
        config.share_url = url;
    }

    Ok(config)
}

/// Parse a config document and expand `${VAR}` references.
pub fn parse_config(content: &str) -> Result<SelfassessConfig> {
    let mut config: SelfassessConfig = toml::from_str(content)?;
    config.state_dir = PathBuf::from(resolve_env_vars(&config.state_dir.to_string_lossy()));
    config.storage_key = resolve_env_vars(&config.storage_key);
    config.share_url = resolve_env_vars(&config.share_url);
    validate_key(&config.storage_key)?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
