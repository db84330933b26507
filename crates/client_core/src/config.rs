use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::keyboard::KeyCombo;

pub const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub save_shortcut: String,
    pub cancel_shortcut: String,
    pub search_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".into(),
            save_shortcut: "ctrl+s".into(),
            cancel_shortcut: "escape".into(),
            search_debounce_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcuts {
    pub save: KeyCombo,
    pub cancel: KeyCombo,
}

impl Settings {
    pub fn shortcuts(&self) -> anyhow::Result<Shortcuts> {
        let save = self
            .save_shortcut
            .parse()
            .with_context(|| format!("invalid save_shortcut '{}'", self.save_shortcut))?;
        let cancel = self
            .cancel_shortcut
            .parse()
            .with_context(|| format!("invalid cancel_shortcut '{}'", self.cancel_shortcut))?;
        Ok(Shortcuts { save, cancel })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Loads [`SETTINGS_FILE`] from the working directory, then applies `APP__*`
/// environment overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// A missing file means defaults; a malformed one is an error.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__SAVE_SHORTCUT") {
        settings.save_shortcut = v;
    }
    if let Some(v) = env("APP__CANCEL_SHORTCUT") {
        settings.cancel_shortcut = v;
    }
    if let Some(v) = env("APP__SEARCH_DEBOUNCE_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.search_debounce_ms = parsed,
            Err(err) => warn!(value = %v, error = %err, "ignoring invalid APP__SEARCH_DEBOUNCE_MS"),
        }
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
