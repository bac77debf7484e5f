//! Configuration loading for the CLI.
//!
//! Merges the config file, environment variables and command-line flags into
//! one [`fob_config::UserConfig`].
//! Priority: CLI > Environment > File > Defaults

mod loading;

pub use loading::{load_user_config, nette_options, project_dir};
