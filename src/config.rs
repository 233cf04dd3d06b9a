//! Configuration file handling.
//!
//! All fields are optional with defaults matching the behavior of the
//! original hard-coded delays. The settle delays are best-effort tunables
//! for the paste/propagation race, not correctness guarantees.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Executable name or path for the primary converter.
    pub pandoc_program: String,
    /// Wait after the synthetic Cmd+C before checking whether the
    /// clipboard changed.
    pub copy_settle_ms: u64,
    /// Wait after the synthetic Cmd+V before restoring the clipboard.
    pub paste_settle_ms: u64,
    /// Gap between the key-down and key-up halves of a synthetic keystroke.
    pub key_tap_gap_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pandoc_program: "pandoc".to_string(),
            copy_settle_ms: 100,
            paste_settle_ms: 100,
            key_tap_gap_ms: 10,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`. A missing default file yields the defaults; an
    /// explicitly given path must exist. A malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// `~/.config/pastemark/config.toml` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pastemark").join("config.toml"))
    }

    pub fn copy_settle(&self) -> Duration {
        Duration::from_millis(self.copy_settle_ms)
    }

    pub fn paste_settle(&self) -> Duration {
        Duration::from_millis(self.paste_settle_ms)
    }

    pub fn key_tap_gap(&self) -> Duration {
        Duration::from_millis(self.key_tap_gap_ms)
    }
}
