use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NetteError, Result};

/// Info file location relative to `build.outDir`.
pub const DEFAULT_INFO_FILE: &str = ".vite/nette.json";

/// Options for the Nette plugin, read from the `[plugins.nette]` table.
///
/// # Example
///
/// ```rust
/// use fob_plugin_nette::NetteOptions;
///
/// let options = NetteOptions::new()
///     .with_host("192.168.1.200")
///     .with_entry(["main.js", "admin.js"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NetteOptions {
    /// Where the dev server URL is published, relative to `build.outDir`
    #[serde(default = "default_info_file_path")]
    pub info_file_path: PathBuf,

    /// Host advertised in the dev server URL and trusted for CORS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Build entry points, relative to the resolved root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<Entry>,
}

fn default_info_file_path() -> PathBuf {
    PathBuf::from(DEFAULT_INFO_FILE)
}

impl Default for NetteOptions {
    fn default() -> Self {
        Self {
            info_file_path: default_info_file_path(),
            host: None,
            entry: None,
        }
    }
}

impl NetteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.info_file_path = path.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_entry<I, P>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.entry = Some(Entry::Many(entries.into_iter().map(Into::into).collect()));
        self
    }

    /// Parse options from a plugin table, e.g. `UserConfig::plugin_options("nette")`.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(NetteError::InvalidOptions)
    }
}

/// One entry point or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Single(PathBuf),
    Many(Vec<PathBuf>),
}

impl Entry {
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Entry::Single(path) => std::slice::from_ref(path),
            Entry::Many(paths) => paths,
        }
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Single(Path::new(value).to_path_buf())
    }
}
