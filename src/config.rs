//! Configuration handling for newfile.
//! Loads an optional JSON or YAML config file and hands each plugin its own
//! view of it, merged with the shared `global` section.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Supported configuration file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["newfile.json", "newfile.yml", "newfile.yaml"];

/// Section holding orchestration settings.
pub const PLUGINS_SECTION: &str = "plugins";

/// Section whose values are shared by every plugin.
pub const GLOBAL_SECTION: &str = "global";

/// File name used when a plugin is picked by name and no file name is given.
pub const DEFAULT_FILENAME: &str = "new_file";

/// Key/value settings for a single plugin.
pub trait ConfigProvider {
    /// Returns the value stored under `key`, or `default` when it is missing.
    fn get(&self, key: &str, default: Value) -> Value;

    fn get_str(&self, key: &str, default: &str) -> String {
        match self.get(key, Value::Null) {
            Value::String(s) if !s.is_empty() => s,
            _ => default.to_string(),
        }
    }

    fn get_opt_str(&self, key: &str) -> Option<String> {
        match self.get(key, Value::Null) {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Reads a list of strings. A single string is treated as a one-item list.
    fn get_strings(&self, key: &str) -> Vec<String> {
        match self.get(key, Value::Null) {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Value::String(s) => vec![s],
            _ => Vec::new(),
        }
    }
}

/// Orchestration settings from the `plugins` section.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PluginsSettings {
    /// Creator used when the file name carries no extension at all.
    pub default_plugin: Option<String>,
    /// File name used when a plugin is named without a file name.
    pub default_filename: Option<String>,
    #[serde(default)]
    pub disabled_types: Vec<String>,
    #[serde(default)]
    pub disabled_post: Vec<String>,
    #[serde(default)]
    pub disabled_deferred: Vec<String>,
}

/// A plugin's own config section merged with the `global` section.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PluginConfig {
    values: serde_json::Map<String, Value>,
}

impl PluginConfig {
    pub fn new(values: serde_json::Map<String, Value>) -> Self {
        Self { values }
    }

    /// Builds a config from a JSON object. Non-object values give an empty config.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

impl ConfigProvider for PluginConfig {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values.get(key).cloned().unwrap_or(default)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}

/// The whole configuration file.
#[derive(Debug, Default, Clone)]
pub struct Config {
    sections: IndexMap<String, Value>,
    source: Option<PathBuf>,
}

impl Config {
    /// Returns the directory searched for config files when none is given.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("newfile"))
    }

    /// Loads the first config file found in `config_dir`.
    ///
    /// A missing file gives an empty config. A file that is neither valid
    /// JSON nor valid YAML is a `ConfigError`.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        for file in CONFIG_FILES {
            let config_path = config_dir.join(file);
            if config_path.exists() {
                debug!("Loading configuration from {}", config_path.display());
                let content = std::fs::read_to_string(&config_path)?;
                let mut config = Self::parse(&content)?;
                config.source = Some(config_path);
                return Ok(config);
            }
        }

        debug!(
            "No config file in {} (tried: {})",
            config_dir.display(),
            CONFIG_FILES.join(", ")
        );
        Ok(Self::default())
    }

    /// Parses config content, trying JSON first and YAML second.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let sections: IndexMap<String, Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
        };
        Ok(Self {
            sections,
            source: None,
        })
    }

    /// Path of the file this config was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.sections
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Orchestration settings from the `plugins` section.
    pub fn settings(&self) -> Result<PluginsSettings> {
        match self.sections.get(PLUGINS_SECTION) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                Error::ConfigError(format!("Invalid '{PLUGINS_SECTION}' section: {e}"))
            }),
            None => Ok(PluginsSettings::default()),
        }
    }

    /// Config for a single plugin: its own section, with `global` values
    /// filling in keys that are missing or empty.
    pub fn for_plugin(&self, name: &str) -> PluginConfig {
        let mut values = match self.sections.get(name) {
            Some(Value::Object(values)) => values.clone(),
            _ => {
                debug!("No config for {name}");
                serde_json::Map::new()
            }
        };

        if let Some(Value::Object(global)) = self.sections.get(GLOBAL_SECTION) {
            for (key, value) in global {
                if is_blank(value) {
                    continue;
                }
                let missing = values.get(key).map_or(true, is_blank);
                if missing {
                    values.insert(key.clone(), value.clone());
                }
            }
        }

        PluginConfig::new(values)
    }
}
