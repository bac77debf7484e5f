//! Resolved configuration and the shared handle passed between hooks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use path_clean::PathClean;
use serde::Serialize;

use crate::config::{CorsOrigin, HostSetting, UserConfig};

pub const DEFAULT_PORT: u16 = 5173;

/// Final configuration after every plugin had a chance to contribute defaults.
///
/// All paths are absolute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub root: PathBuf,
    pub base: String,
    pub build: ResolvedBuild,
    pub server: ResolvedServer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBuild {
    pub out_dir: PathBuf,
    pub manifest: bool,
    pub assets_dir: String,
    pub input: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedServer {
    pub host: Option<HostSetting>,
    pub port: u16,
    pub https: bool,
    pub cors: Vec<CorsOrigin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_hosts: Option<Vec<String>>,
    pub origin: String,
}

impl ResolvedConfig {
    /// Resolve user overrides against `cwd`, applying the dev server's own
    /// defaults for anything left unset.
    ///
    /// `root` is resolved against `cwd`; `build.outDir` and relative entries
    /// are resolved against `root`.
    pub fn resolve(user: &UserConfig, cwd: &Path) -> Self {
        let root = cwd.join(user.root.as_deref().unwrap_or(Path::new("."))).clean();

        let out_dir = root
            .join(user.build.out_dir.as_deref().unwrap_or(Path::new("dist")))
            .clean();

        let input = user
            .build
            .input
            .iter()
            .flatten()
            .map(|entry| root.join(entry).clean())
            .collect();

        let server = &user.server;

        Self {
            root,
            base: user.base.clone().unwrap_or_else(|| "/".to_string()),
            build: ResolvedBuild {
                out_dir,
                manifest: user.build.manifest.unwrap_or(false),
                assets_dir: user
                    .build
                    .assets_dir
                    .clone()
                    .unwrap_or_else(|| "assets".to_string()),
                input,
            },
            server: ResolvedServer {
                host: server.host.clone(),
                port: server.port.unwrap_or(DEFAULT_PORT),
                https: server.https.unwrap_or(false),
                cors: server.cors.clone().unwrap_or_else(CorsOrigin::defaults),
                allowed_hosts: server.allowed_hosts.clone(),
                origin: server.origin.clone().unwrap_or_default(),
            },
        }
    }

    pub fn protocol(&self) -> &'static str {
        if self.server.https { "https" } else { "http" }
    }

    /// `host:port` string the dev server binds to.
    pub fn bind_address(&self) -> String {
        let host = self
            .server
            .host
            .as_ref()
            .map(HostSetting::bind_host)
            .unwrap_or("localhost");
        format!("{}:{}", host, self.server.port)
    }
}

/// Shared handle to the resolved configuration.
///
/// Readers take short-lived read guards. The only mutation exposed is
/// [`SharedConfig::set_origin`], which the component that learns the dev
/// server's public URL calls once the listener is bound.
#[derive(Debug, Clone)]
pub struct SharedConfig(Arc<RwLock<ResolvedConfig>>);

impl SharedConfig {
    pub fn new(config: ResolvedConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ResolvedConfig> {
        self.0.read()
    }

    /// Clone of the current configuration.
    pub fn snapshot(&self) -> ResolvedConfig {
        self.0.read().clone()
    }

    pub fn origin(&self) -> String {
        self.0.read().server.origin.clone()
    }

    pub fn set_origin(&self, origin: impl Into<String>) {
        let origin = origin.into();
        tracing::debug!(%origin, "updating server.origin");
        self.0.write().server.origin = origin;
    }
}
