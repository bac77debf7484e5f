//! Plugin hooks for the dev server.
//!
//! Plugins take part in three stages, in order:
//!
//! 1. `config` — receive the user configuration and return it with the
//!    plugin's own defaults merged in
//! 2. `config_resolved` — observe the final [`SharedConfig`]
//! 3. `configure_server` — get hold of the [`DevServer`] before it starts
//!    listening, typically to subscribe to listener events
//!
//! Every hook has a no-op default, so plugins only implement what they use.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use fob_config::{ResolvedConfig, SharedConfig, UserConfig};

use crate::error::{DevError, Result};
use crate::server::DevServer;

/// What the host is about to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Build,
}

/// Context handed to the `config` hook.
#[derive(Debug, Clone)]
pub struct ConfigEnv {
    pub command: Command,
    /// Working directory the configuration is resolved against
    pub cwd: PathBuf,
}

impl ConfigEnv {
    pub fn serve(cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: Command::Serve,
            cwd: cwd.into(),
        }
    }
}

pub trait DevPlugin: Send + Sync {
    /// Plugin name for logging and error messages.
    fn name(&self) -> Cow<'static, str>;

    /// Merge plugin defaults into the user configuration.
    fn config(&self, config: UserConfig, _env: &ConfigEnv) -> anyhow::Result<UserConfig> {
        Ok(config)
    }

    /// Called once with the configuration every later stage shares.
    fn config_resolved(&self, _config: &SharedConfig) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called with the dev server before it starts listening.
    fn configure_server(&self, _server: &DevServer) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Runs hooks across the registered plugins in registration order.
#[derive(Clone, Default)]
pub struct PluginDriver {
    plugins: Vec<Arc<dyn DevPlugin>>,
}

impl PluginDriver {
    pub fn new(plugins: Vec<Arc<dyn DevPlugin>>) -> Self {
        Self { plugins }
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every `config` hook, resolve the result against `env.cwd` and
    /// hand the shared configuration to every `config_resolved` hook.
    pub fn resolve_config(&self, user: UserConfig, env: &ConfigEnv) -> Result<SharedConfig> {
        let mut config = user;
        for plugin in &self.plugins {
            tracing::debug!(plugin = %plugin.name(), "config hook");
            config = plugin
                .config(config, env)
                .map_err(|e| DevError::hook(plugin.name(), "config", e))?;
        }

        let shared = SharedConfig::new(ResolvedConfig::resolve(&config, &env.cwd));

        for plugin in &self.plugins {
            tracing::debug!(plugin = %plugin.name(), "configResolved hook");
            plugin
                .config_resolved(&shared)
                .map_err(|e| DevError::hook(plugin.name(), "configResolved", e))?;
        }

        Ok(shared)
    }

    pub fn configure_server(&self, server: &DevServer) -> Result<()> {
        for plugin in &self.plugins {
            tracing::debug!(plugin = %plugin.name(), "configureServer hook");
            plugin
                .configure_server(server)
                .map_err(|e| DevError::hook(plugin.name(), "configureServer", e))?;
        }
        Ok(())
    }
}
