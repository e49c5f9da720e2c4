use crate::error::DemoError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "POINTER_DEMO_CONFIG";
pub const HIDE_ADDRESSES_VAR: &str = "POINTER_DEMO_HIDE_ADDRESSES";
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// How the demos present themselves. Nothing here changes what they do.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub color: bool,
    /// Real addresses differ run to run; turn them off for stable output.
    pub show_addresses: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            color: true,
            show_addresses: true,
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, DemoError> {
        toml::from_str(content).map_err(|err| DemoError::config(origin, err.message()))
    }

    pub fn from_file(path: &Path) -> Result<Self, DemoError> {
        let content = fs::read_to_string(path)
            .map_err(|err| DemoError::config(path, err.to_string()))?;
        Self::from_toml_str(&content, path)
    }

    /// File named by `POINTER_DEMO_CONFIG` (if any), then the environment on top.
    pub fn from_env() -> Result<Self, DemoError> {
        let base = match env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|name| env::var(name).ok()))
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // NO_COLOR counts when present at all, whatever its value
        if lookup(NO_COLOR_VAR).is_some() {
            self.color = false;
        }
        if let Some(value) = lookup(HIDE_ADDRESSES_VAR) {
            if is_truthy(&value) {
                self.show_addresses = false;
            }
        }
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
