use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::collections::BTreeMap;
use crate::layout_engine::{Direction, LayoutCommand, LayoutRegistry};

const MAX_GAP_SIZE: u32 = 500;

pub fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("forge").join("config.toml"))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    /// Accelerator, e.g. `<Super><Shift>1`, to the command it triggers.
    #[serde(default = "default_keys")]
    pub keys: BTreeMap<String, LayoutCommand>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Settings {
    /// Pixels inserted on all four sides of every tiled window.
    #[serde(default = "default_gap_size")]
    pub gap_size: u32,
    /// Layout for workspaces that have not picked one.
    #[serde(default = "default_layout")]
    pub default_layout: String,
    /// Application ids (or WM classes) that are never tiled.
    #[serde(default)]
    pub excluded_apps: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            gap_size: default_gap_size(),
            default_layout: default_layout(),
            excluded_apps: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            settings: Settings::default(),
            keys: default_keys(),
        }
    }
}

fn default_gap_size() -> u32 { 8 }

fn default_layout() -> String { "grid".to_string() }

fn default_keys() -> BTreeMap<String, LayoutCommand> {
    let mut keys = BTreeMap::new();
    keys.insert("<Super>f".to_string(), LayoutCommand::ToggleFloating);
    keys.insert("<Super>m".to_string(), LayoutCommand::MaximizeWindow);
    for (key, dir) in [
        ("h", Direction::Left),
        ("l", Direction::Right),
        ("k", Direction::Up),
        ("j", Direction::Down),
    ] {
        keys.insert(format!("<Super>{key}"), LayoutCommand::FocusDirection(dir));
    }
    for (key, layout) in [("g", "grid"), ("c", "columns"), ("r", "rows")] {
        keys.insert(format!("<Super>{key}"), LayoutCommand::SetLayout(layout.to_string()));
    }
    for n in 1..=9 {
        keys.insert(format!("<Super><Shift>{n}"), LayoutCommand::MoveToWorkspace(n - 1));
    }
    keys
}

impl Settings {
    /// Validates settings against the available layouts and returns a list
    /// of issues found.
    pub fn validate(&self, registry: &LayoutRegistry) -> Vec<String> {
        let mut issues = Vec::new();

        if !registry.has(&self.default_layout) {
            issues.push(format!(
                "default-layout {:?} is not one of: {}",
                self.default_layout,
                registry.names().collect::<Vec<_>>().join(", ")
            ));
        }
        if self.gap_size > MAX_GAP_SIZE {
            issues.push(format!(
                "gap-size must be at most {MAX_GAP_SIZE}, got {}",
                self.gap_size
            ));
        }
        if self.excluded_apps.iter().any(|app| app.trim().is_empty()) {
            issues.push("excluded-apps must not contain empty app ids".to_string());
        }

        issues
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&buf).with_context(|| format!("parsing {}", path.display()))
    }

    /// Reads `path`, falling back to the built-in defaults if it is missing
    /// or broken. Startup never fails because of configuration.
    pub fn read_or_default(path: &Path) -> Config {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Config::default();
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err:#}; using default config");
                Config::default()
            }
        }
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> { Ok(toml::from_str(buf)?) }

    pub fn validate(&self) -> Vec<String> {
        let registry = LayoutRegistry::default();
        let mut issues = self.settings.validate(&registry);

        for (key, command) in &self.keys {
            if key.trim().is_empty() {
                issues.push(format!("empty accelerator bound to {command}"));
            }
            if let LayoutCommand::SetLayout(name) = command
                && !registry.has(name)
            {
                issues.push(format!("{key} is bound to unknown layout {name:?}"));
            }
        }

        issues
    }
}
