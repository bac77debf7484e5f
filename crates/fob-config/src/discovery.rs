//! Locating the dev server configuration of a project directory.
//!
//! A project configures the dev server either in `fob.toml` or under the
//! `fob` key of its `package.json`. Both end up as the same [`UserConfig`].

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::UserConfig;
use crate::error::{ConfigError, Result};

/// Dedicated configuration file, checked first.
pub const CONFIG_FILE: &str = "fob.toml";

pub const PACKAGE_JSON: &str = "package.json";

/// Key of the dev server section inside `package.json`.
pub const PACKAGE_FIELD: &str = "fob";

/// Looks up the dev server configuration of a project directory.
///
/// Embedders that already hold their settings should build a [`UserConfig`]
/// directly or go through `UserConfig::from_value()`.
///
/// # Example
///
/// ```no_run
/// use fob_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new("my-nette-app").load_or_default().unwrap();
/// println!("dev server port: {:?}", config.server.port);
/// ```
pub struct ConfigDiscovery {
    project_dir: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding the project's dev server settings.
    ///
    /// `fob.toml` wins over `package.json`. A `package.json` only counts when
    /// it carries a non-null `fob` section; unreadable manifests are skipped.
    pub fn find(&self) -> Option<PathBuf> {
        let config_file = self.project_dir.join(CONFIG_FILE);
        if config_file.is_file() {
            return Some(config_file);
        }

        let manifest = self.project_dir.join(PACKAGE_JSON);
        let has_section = fs::read_to_string(&manifest)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|parsed| package_section(&parsed).is_some());
        has_section.then_some(manifest)
    }

    /// Load the project's settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when the project has no settings file.
    pub fn load(&self) -> Result<UserConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.project_dir.clone()))?;
        Self::load_from(&path)
    }

    /// Load the project's settings, starting from an empty config when it has none.
    pub fn load_or_default(&self) -> Result<UserConfig> {
        match self.find() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!(
                    project = %self.project_dir.display(),
                    "no dev server settings found, using defaults"
                );
                Ok(UserConfig::default())
            }
        }
    }

    /// Load settings from an explicit file, such as one passed with `--config`.
    ///
    /// `package.json` is read through its `fob` section, other `.json` files
    /// and `.toml` files as a whole.
    pub fn load_from(path: &Path) -> Result<UserConfig> {
        tracing::debug!(path = %path.display(), "loading dev server settings");

        let is_manifest = path.file_name() == Some(OsStr::new(PACKAGE_JSON));
        let extension = path.extension().and_then(OsStr::to_str);
        if !is_manifest && !matches!(extension, Some("toml" | "json")) {
            return Err(ConfigError::UnsupportedFormat(extension.unwrap_or("<none>").to_string()));
        }

        let content = fs::read_to_string(path)?;
        if is_manifest {
            let manifest = parse_json(&content, PACKAGE_JSON)?;
            return match manifest.get(PACKAGE_FIELD) {
                Some(Value::Null) => Err(ConfigError::InvalidValue {
                    field: PACKAGE_FIELD.to_string(),
                    hint: Some("The 'fob' section of package.json cannot be null".to_string()),
                }),
                Some(section) => UserConfig::from_value(section.clone()),
                None => Err(ConfigError::InvalidValue {
                    field: PACKAGE_FIELD.to_string(),
                    hint: Some("Add a 'fob' section with the dev server settings to package.json".to_string()),
                }),
            };
        }

        let value = if extension == Some("toml") {
            parse_toml(&content)?
        } else {
            parse_json(&content, &path.display().to_string())?
        };
        UserConfig::from_value(value)
    }
}

fn package_section(manifest: &Value) -> Option<&Value> {
    manifest.get(PACKAGE_FIELD).filter(|section| !section.is_null())
}

fn parse_json(content: &str, field: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })
}

fn parse_toml(content: &str) -> Result<Value> {
    let table: toml::Value = toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("Invalid TOML syntax: {e}")),
    })?;

    serde_json::to_value(table).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("TOML to JSON conversion failed: {e}")),
    })
}
