//! Development server command implementation.
//!
//! - Load the user configuration and the nette plugin options
//! - Resolve the configuration through the plugin hooks
//! - Serve until the listener closes
//!
//! Ctrl+C is handled by the nette plugin: it closes the server, which removes
//! the dev server info file, and then exits the process.

use std::sync::Arc;

use fob_dev::{ConfigEnv, DevPlugin, DevServer, ListenerEvent, PluginDriver};
use fob_plugin_nette::NettePlugin;

use crate::cli::DevArgs;
use crate::config::{load_user_config, nette_options, project_dir};
use crate::error::Result;
use crate::ui;

/// Execute the dev command.
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration or a missing `www` directory
/// - Server startup failures
/// - Failure to write the dev server info file
pub async fn execute(args: DevArgs) -> Result<()> {
    let cwd = project_dir(&args.project)?;
    let user = load_user_config(&args.project, &cwd)?;

    ui::info("Starting development server...");
    ui::info(&format!("Working directory: {}", cwd.display()));

    let plugin = Arc::new(NettePlugin::with_options(nette_options(&user)?));
    let driver = PluginDriver::new(vec![plugin.clone() as Arc<dyn DevPlugin>]);

    let config = driver.resolve_config(user, &ConfigEnv::serve(&cwd))?;
    let server = DevServer::new(config.clone());
    driver.configure_server(&server)?;

    let info_file = plugin
        .coordinator()
        .map(|coordinator| coordinator.info_file_path())
        .unwrap_or_default();

    // Registered after the plugin, so `origin` is already set when this runs.
    let _summary = server.listener().on(
        ListenerEvent::Listening,
        Arc::new(move || {
            let root = config.read().root.clone();
            ui::print_server_summary(&config.origin(), &root, &info_file);
            ui::info("Press Ctrl+C to stop");
            Ok(())
        }),
    );

    server.listen().await?;

    ui::success("Development server stopped");
    Ok(())
}
