//! Settings file for kubepulse
//!
//! Settings are read once at startup from `~/.kubepulse/config.toml`.
//! The file is optional; every key falls back to the built-in default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use kubepulse_report::ReportConfig;

/// Contents of the settings file
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Namespace of the pod inspected in detail
    pub namespace: Option<String>,
    /// Name of the pod inspected in detail
    pub pod: Option<String>,
    /// Seconds between sweeps
    pub interval_secs: Option<u64>,
    /// Only count events from this many seconds back
    pub event_window_secs: Option<u64>,
}

impl Settings {
    /// Get the settings file path
    pub fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".kubepulse").join("config.toml"))
    }

    /// Load settings from disk; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read settings from {}", path.display()));
            }
        };

        Self::parse(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;

        if settings.interval_secs == Some(0) {
            bail!("interval_secs must be greater than zero");
        }
        if settings.event_window_secs == Some(0) {
            bail!("event_window_secs must be greater than zero");
        }

        Ok(settings)
    }

    /// Fill a report config, keeping defaults for anything unset
    pub fn into_report_config(self) -> ReportConfig {
        let defaults = ReportConfig::default();

        ReportConfig {
            namespace: self.namespace.unwrap_or(defaults.namespace),
            pod_name: self.pod.unwrap_or(defaults.pod_name),
            poll_interval: self
                .interval_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            event_window: self
                .event_window_secs
                .map(Duration::from_secs)
                .or(defaults.event_window),
        }
    }
}
