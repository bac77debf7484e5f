use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use fob_config::{ConfigDiscovery, UserConfig};
use fob_plugin_nette::{NetteOptions, PLUGIN_NAME};
use serde::Serialize;

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};

/// Values set on the command line, layered over everything else.
#[derive(Debug, Default, Serialize)]
struct Overrides {
    server: ServerOverrides,
}

#[derive(Debug, Default, Serialize)]
struct ServerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    https: Option<bool>,
}

impl From<&ProjectArgs> for Overrides {
    fn from(args: &ProjectArgs) -> Self {
        Self {
            server: ServerOverrides {
                host: args.host.clone(),
                port: args.port,
                https: args.https.then_some(true),
            },
        }
    }
}

/// Absolute project directory: `--cwd` or the current directory.
pub fn project_dir(args: &ProjectArgs) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let dir = match &args.cwd {
        Some(cwd) => current.join(cwd),
        None => current,
    };

    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }
    Ok(dir)
}

/// Load the user configuration for the project in `cwd`.
///
/// Sources, lowest priority first:
/// 1. `--config <file>`, or the discovered `fob.toml` / `package.json#fob`
/// 2. `FOB_*` environment variables, nested with `__` (`FOB_SERVER__PORT=3000`)
/// 3. `--host`, `--port` and `--https`
pub fn load_user_config(args: &ProjectArgs, cwd: &Path) -> Result<UserConfig> {
    let file_config = match &args.config {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(CliError::FileNotFound(path));
            }
            ConfigDiscovery::load_from(&path)?
        }
        None => ConfigDiscovery::new(cwd).load_or_default()?,
    };

    let config = Figment::new()
        .merge(Serialized::defaults(file_config))
        .merge(Env::prefixed("FOB_").split("__"))
        .merge(Serialized::defaults(Overrides::from(args)))
        .extract()?;

    tracing::debug!(?config, "loaded user config");
    Ok(config)
}

/// Options of the nette plugin from its `[plugins.nette]` table.
pub fn nette_options(config: &UserConfig) -> Result<NetteOptions> {
    match config.plugin_options(PLUGIN_NAME) {
        Some(value) => Ok(NetteOptions::from_value(value.clone())?),
        None => Ok(NetteOptions::default()),
    }
}
