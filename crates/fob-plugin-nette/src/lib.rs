//! Nette integration for the fob dev server.
//!
//! The plugin applies the conventions of a Nette project (sources in
//! `assets/`, build output in `www/assets/`) and tells the PHP backend where
//! the dev server runs. While the server is listening its URL is published in
//! `<outDir>/.vite/nette.json`:
//!
//! ```json
//! {
//! 	"devServer": "http://localhost:5173"
//! }
//! ```
//!
//! The file is removed once the server closes or the process is interrupted.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fob_config::UserConfig;
//! use fob_dev::{ConfigEnv, DevServer, PluginDriver};
//! use fob_plugin_nette::{NetteOptions, NettePlugin};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let plugin = NettePlugin::with_options(NetteOptions::new().with_entry(["main.js"]));
//! let driver = PluginDriver::new(vec![Arc::new(plugin)]);
//!
//! let config = driver.resolve_config(UserConfig::default(), &ConfigEnv::serve("."))?;
//! let server = DevServer::new(config);
//! driver.configure_server(&server)?;
//! server.listen().await?;
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use fob_config::{SharedConfig, UserConfig};
use fob_dev::{ConfigEnv, CtrlC, DevPlugin, DevServer, InterruptSource, ProcessTerminator, Terminator};
use parking_lot::Mutex;

pub mod coordinator;
pub mod error;
pub mod info_file;
pub mod options;
pub mod resolve;
pub mod url;

pub use coordinator::{CoordinatorState, DevServerCoordinator};
pub use error::{NetteError, Result};
pub use info_file::InfoFile;
pub use options::{DEFAULT_INFO_FILE, Entry, NetteOptions};
pub use resolve::{apply_defaults, resolve_config};
pub use url::{advertised_host, dev_server_url};

/// Name under which the plugin is registered and its options are read.
pub const PLUGIN_NAME: &str = "nette";

/// Dev server plugin for Nette projects.
pub struct NettePlugin {
    options: NetteOptions,
    interrupts: Arc<dyn InterruptSource>,
    terminator: Arc<dyn Terminator>,
    config: Mutex<Option<SharedConfig>>,
    coordinator: Mutex<Option<DevServerCoordinator>>,
}

impl NettePlugin {
    /// Create a plugin with default options.
    pub fn new() -> Self {
        Self::with_options(NetteOptions::default())
    }

    pub fn with_options(options: NetteOptions) -> Self {
        Self {
            options,
            interrupts: Arc::new(CtrlC),
            terminator: Arc::new(ProcessTerminator),
            config: Mutex::new(None),
            coordinator: Mutex::new(None),
        }
    }

    /// Replace the Ctrl+C handler as the source of interrupts.
    pub fn with_interrupts(mut self, interrupts: Arc<dyn InterruptSource>) -> Self {
        self.interrupts = interrupts;
        self
    }

    /// Replace `std::process::exit` as the way the process ends on interrupt.
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn options(&self) -> &NetteOptions {
        &self.options
    }

    /// The coordinator, once a server has been configured.
    pub fn coordinator(&self) -> Option<DevServerCoordinator> {
        self.coordinator.lock().clone()
    }
}

impl Default for NettePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl DevPlugin for NettePlugin {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(PLUGIN_NAME)
    }

    fn config(&self, config: UserConfig, env: &ConfigEnv) -> anyhow::Result<UserConfig> {
        Ok(apply_defaults(config, &self.options, &env.cwd)?)
    }

    fn config_resolved(&self, config: &SharedConfig) -> anyhow::Result<()> {
        *self.config.lock() = Some(config.clone());
        Ok(())
    }

    fn configure_server(&self, server: &DevServer) -> anyhow::Result<()> {
        let config = self
            .config
            .lock()
            .clone()
            .unwrap_or_else(|| server.config().clone());

        let coordinator = self
            .coordinator
            .lock()
            .get_or_insert_with(|| {
                DevServerCoordinator::new(self.options.clone(), config, Arc::clone(&self.terminator))
            })
            .clone();

        coordinator.attach(server.listener(), self.interrupts.as_ref())?;
        Ok(())
    }
}
