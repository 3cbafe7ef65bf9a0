//! Flat section/key/value configuration persisted as TOML.
//!
//! The store lives at `$YUDO_CONFIG` when set, otherwise under the user
//! config directory. A missing file is an empty store.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "YUDO_CONFIG";

type Section = BTreeMap<String, String>;

/// In-memory copy of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
    sections: BTreeMap<String, Section>,
}

impl ConfigStore {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("yudo").join("yudo.toml"))
    }

    /// Loads the store from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::default_path().context("Failed to determine config directory")?;
        Self::open(path)
    }

    /// Loads the store from `path`; a missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, starting empty");
            return Ok(Self {
                path,
                sections: BTreeMap::new(),
            });
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let sections: BTreeMap<String, Section> = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(Self { path, sections })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the store back, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }
        let text = toml::to_string(&self.sections).context("Failed to serialize config")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write config file: {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    /// Sets a value, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Removes one key; returns the old value.
    pub fn remove_key(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections.get_mut(section).and_then(|s| s.remove(key))
    }

    /// Removes a whole section; returns whether it existed.
    pub fn remove_section(&mut self, section: &str) -> bool {
        self.sections.remove(section).is_some()
    }

    /// Resolves a command default: explicit flag, then config, then built-in.
    pub fn resolve(&self, flag: Option<&str>, section: &str, key: &str, builtin: &str) -> String {
        flag.or_else(|| self.get(section, key))
            .unwrap_or(builtin)
            .to_string()
    }
}

/// A parsed `SECTION[.KEY[=VALUE]]` argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPath {
    pub section: String,
    pub key: Option<String>,
    pub value: Option<String>,
}

impl ConfigPath {
    /// Splits on the first `=`, then on the last `.` of the part before it.
    pub fn parse(text: &str) -> Result<Self> {
        let (path, value) = match text.split_once('=') {
            Some((path, value)) => (path, Some(value.to_string())),
            None => (text, None),
        };
        let (section, key) = match path.rsplit_once('.') {
            Some((section, key)) => (section, Some(key.to_string())),
            None => (path, None),
        };

        if key.is_none() && value.is_some() {
            bail!("a value needs a key: use SECTION.KEY=VALUE");
        }
        if matches!(key.as_deref(), Some("")) {
            bail!("empty key in '{}'", text);
        }

        Ok(Self {
            section: section.to_string(),
            key,
            value,
        })
    }
}
