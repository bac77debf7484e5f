//! Nette project conventions applied on top of the user configuration.
//!
//! A Nette project keeps its frontend sources in `assets/` and serves the
//! built files from `www/assets/`. Every default here yields to an explicit
//! user value.

use std::path::{Path, PathBuf};

use fob_config::{ALL_INTERFACES, CorsOrigin, ResolvedConfig, UserConfig};
use path_clean::PathClean;

use crate::error::{NetteError, Result};
use crate::options::NetteOptions;
use crate::url::{self, LOCALHOST};

pub const DEFAULT_ROOT: &str = "assets";

/// Public web directory of a Nette project, relative to the working directory.
pub const WEB_DIR: &str = "www";

/// Fill in Nette defaults for everything the user left unset.
///
/// # Errors
///
/// Returns [`NetteError::OutputDirMissing`] when `build.outDir` is unset and
/// `<cwd>/www` is not a directory.
pub fn apply_defaults(mut user: UserConfig, options: &NetteOptions, cwd: &Path) -> Result<UserConfig> {
    let root = cwd
        .join(user.root.get_or_insert_with(|| PathBuf::from(DEFAULT_ROOT)))
        .clean();

    if user.build.out_dir.is_none() {
        user.build.out_dir = Some(default_out_dir(cwd)?);
    }

    user.base.get_or_insert_with(String::new);
    user.build.manifest.get_or_insert(true);
    user.build.assets_dir.get_or_insert_with(String::new);

    let https = user.server.https.unwrap_or(false);
    let host = url::advertised_host(options.host.as_deref(), user.server.host.as_ref());

    // User origins extend the bundler defaults instead of replacing them.
    let cors = user.server.cors.get_or_insert_with(Vec::new);
    let own_origin = CorsOrigin::exact(format!("{}://{}", url::protocol(https), host));
    for origin in CorsOrigin::defaults().into_iter().chain([own_origin]) {
        if !cors.contains(&origin) {
            cors.push(origin);
        }
    }

    if let Some(host) = options
        .host
        .as_deref()
        .filter(|host| *host != LOCALHOST && *host != ALL_INTERFACES)
    {
        let allowed = user.server.allowed_hosts.get_or_insert_with(Vec::new);
        if !allowed.iter().any(|allowed| allowed == host) {
            allowed.push(host.to_string());
        }
    }

    if let Some(entry) = &options.entry {
        user.build.input = Some(entry.paths().iter().map(|path| root.join(path).clean()).collect());
    }

    user.server.origin = Some(String::new());

    tracing::debug!(root = %root.display(), host = %host, "applied nette defaults");
    Ok(user)
}

/// Resolve the user configuration with Nette defaults applied.
pub fn resolve_config(user: &UserConfig, options: &NetteOptions, cwd: &Path) -> Result<ResolvedConfig> {
    let user = apply_defaults(user.clone(), options, cwd)?;
    Ok(ResolvedConfig::resolve(&user, cwd))
}

fn default_out_dir(cwd: &Path) -> Result<PathBuf> {
    let web_dir = cwd.join(WEB_DIR);
    if !web_dir.is_dir() {
        return Err(NetteError::OutputDirMissing { expected: web_dir });
    }
    Ok(web_dir.join(DEFAULT_ROOT))
}
