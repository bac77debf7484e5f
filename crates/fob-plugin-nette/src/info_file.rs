//! The dev server info file read by the Nette backend.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{NetteError, Result};

/// Contents of the info file.
///
/// Its presence means a dev server is running at `dev_server`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoFile {
    pub dev_server: String,
}

impl InfoFile {
    pub fn new(dev_server: impl Into<String>) -> Self {
        Self {
            dev_server: dev_server.into(),
        }
    }

    /// Pretty-printed JSON, indented with tabs.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the file, creating missing parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| NetteError::io(parent, e))?;
        }
        fs::write(path, self.to_json()?).map_err(|e| NetteError::io(path, e))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| NetteError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Remove the file. Returns `false` if there was nothing to remove.
    pub fn remove(path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NetteError::io(path, e)),
        }
    }
}
