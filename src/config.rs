use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::Command;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// User overlay location, relative to `$HOME`.
const USER_CONFIG_PATH: &str = ".config/cmdchain/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub env: EnvConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub check_syntax: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file path; `~` is expanded. Empty means stderr only.
    #[serde(default)]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: String::new(),
        }
    }
}

fn default_level() -> String {
    "warn".into()
}

impl LoggingConfig {
    /// The configured level, falling back to `warn` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

/// Environment injected into the head command of every rendered chain.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct EnvConfig {
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
    #[serde(default)]
    env: EnvOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    check_syntax: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<String>,
    file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct EnvOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    defaults: BTreeMap<String, String>,
    #[serde(default)]
    remove: Vec<String>,
}

// ── Merge logic ──

/// Merge a user map into a default map.
/// In replace mode: user map replaces default entirely.
/// In merge mode: remove keys first, then insert additions (user wins).
fn merge_map(
    base: &mut BTreeMap<String, String>,
    add: BTreeMap<String, String>,
    remove: &[String],
    replace: bool,
) {
    if replace {
        *base = add;
    } else {
        base.retain(|k, _| !remove.contains(k));
        base.extend(add);
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Embedded defaults merged with `~/.config/cmdchain/config.toml`, if present.
    ///
    /// A broken user file is reported on stderr and otherwise ignored.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        let Some(home) = std::env::var_os("HOME") else {
            return config;
        };
        let path = std::path::Path::new(&home).join(USER_CONFIG_PATH);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return config;
        };
        match toml::from_str::<ConfigOverlay>(&content) {
            Ok(overlay) => config.apply_overlay(overlay),
            Err(e) => eprintln!("cmdchain: config parse error: {e}"),
        }
        config
    }

    /// Embedded defaults merged with an explicitly named overlay file.
    ///
    /// Unlike [`Config::load`], a missing or invalid file is an error.
    pub fn load_from(path: &str) -> Result<Self, Error> {
        let expanded = shellexpand::tilde(path);
        let content = std::fs::read_to_string(&*expanded).map_err(|source| Error::Io {
            context: format!("reading config {expanded}"),
            source,
        })?;
        let overlay: ConfigOverlay = toml::from_str(&content).map_err(|source| Error::Config {
            path: expanded.to_string(),
            source,
        })?;
        let mut config = Self::default_config();
        config.apply_overlay(overlay);
        Ok(config)
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(v) = overlay.settings.check_syntax {
            self.settings.check_syntax = v;
        }

        if let Some(v) = overlay.logging.level {
            self.logging.level = v;
        }
        if let Some(v) = overlay.logging.file {
            self.logging.file = v;
        }

        let e = overlay.env;
        merge_map(&mut self.env.defaults, e.defaults, &e.remove, e.replace);
    }

    /// Fill in default environment entries the head command does not set.
    pub fn apply_env_defaults(&self, cmd: &mut Command) {
        for (key, value) in &self.env.defaults {
            cmd.env
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
