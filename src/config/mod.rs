use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use toml::Value;

use crate::hover::DEFAULT_HIDE_DELAY;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Grace period before the revert control hides, in milliseconds
    pub hover_hide_delay_ms: Option<u64>,
    /// Whether accept/reject block controls are derived at all
    pub accept_reject: Option<bool>,
}

impl AppConfig {
    pub fn hover_hide_delay(&self) -> Duration {
        self.hover_hide_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_HIDE_DELAY)
    }

    pub fn accept_reject_enabled(&self) -> bool {
        self.accept_reject.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLoadOutcome {
    pub config: Option<AppConfig>,
    pub warnings: Vec<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let appdata = std::env::var_os("APPDATA").map(PathBuf::from);

    config_path_from_parts(xdg_config_home, home, appdata)
}

fn config_path_from_parts(
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
    _appdata: Option<PathBuf>,
) -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let base = _appdata
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| anyhow!("Could not determine APPDATA for config directory"))?;
        return Ok(base.join("revmark").join("config.toml"));
    }

    #[cfg(not(windows))]
    {
        if let Some(base) = xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(base.join("revmark").join("config.toml"));
        }

        let home = home
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| anyhow!("Could not determine HOME for config directory"))?;
        Ok(home.join(".config").join("revmark").join("config.toml"))
    }
}

pub fn load_config() -> Result<ConfigLoadOutcome> {
    let path = config_path()?;
    load_config_from_path(&path)
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoadOutcome> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ConfigLoadOutcome::default()),
        Err(err) => return Err(err.into()),
    };

    let value: Value = toml::from_str(&contents)?;
    let table = value
        .as_table()
        .ok_or_else(|| anyhow!("Config root must be a TOML table"))?;

    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    if let Some(delay) = table.get("hover_hide_delay_ms") {
        match delay.as_integer().filter(|v| *v >= 0) {
            Some(ms) => config.hover_hide_delay_ms = Some(ms as u64),
            None => warnings.push(
                "Warning: Config key 'hover_hide_delay_ms' must be a non-negative integer; ignoring value"
                    .to_string(),
            ),
        }
    }

    if let Some(accept_reject) = table.get("accept_reject") {
        match accept_reject.as_bool() {
            Some(enabled) => config.accept_reject = Some(enabled),
            None => warnings.push(
                "Warning: Config key 'accept_reject' must be a boolean; ignoring value".to_string(),
            ),
        }
    }

    for key in table.keys() {
        if key != "hover_hide_delay_ms" && key != "accept_reject" {
            warnings.push(format!("Warning: Unknown config key '{key}', ignoring"));
        }
    }

    Ok(ConfigLoadOutcome {
        config: Some(config),
        warnings,
    })
}
