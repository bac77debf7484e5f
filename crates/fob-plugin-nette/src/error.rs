//! Error types for the Nette integration.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = NetteError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum NetteError {
    /// `build.outDir` was not set and could not be derived from the project layout
    #[error(
        "Cannot derive the output directory: {} does not exist\n\nHint: Create the www directory or set build.outDir explicitly",
        expected.display()
    )]
    OutputDirMissing { expected: PathBuf },

    /// The `[plugins.nette]` table could not be parsed
    #[error("Invalid nette plugin options: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    /// Reading, writing or removing the info file failed
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode dev server info: {0}")]
    Json(#[from] serde_json::Error),

    /// `Listening` fired for a listener that reports no bound address
    #[error("Dev server reported listening without a bound address")]
    NotListening,

    #[error(transparent)]
    Dev(#[from] fob_dev::DevError),
}

impl NetteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NetteError::Io {
            path: path.into(),
            source,
        }
    }
}
