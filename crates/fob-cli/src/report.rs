//! Miette diagnostic conversion for CLI errors.

use fob_dev::DevError;
use fob_plugin_nette::NetteError;
use miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Dev(e) => dev_error_to_miette(e),
        CliError::Nette(e) => nette_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert DevError to miette Report
///
/// Plugin failures are unwrapped so the user sees the plugin's own message
/// instead of the hook plumbing around it.
pub fn dev_error_to_miette(err: DevError) -> Report {
    match err {
        DevError::Hook { plugin, hook, source } => match source.downcast::<NetteError>() {
            Ok(nette) => nette_error_to_miette(nette),
            Err(source) => miette::miette!("Plugin '{}' failed in {}: {:#}", plugin, hook, source),
        },
        DevError::Lifecycle { event, source } => match source.downcast::<NetteError>() {
            Ok(nette) => nette_error_to_miette(nette),
            Err(source) => miette::miette!("Dev server {:?} handler failed: {:#}", event, source),
        },
        _ => miette::miette!("{}", err),
    }
}

/// Convert NetteError to miette Report
pub fn nette_error_to_miette(err: NetteError) -> Report {
    match err {
        NetteError::OutputDirMissing { expected } => miette::miette!(
            help = "Create the www directory or set build.outDir in fob.toml",
            "Cannot derive the output directory: {} does not exist",
            expected.display()
        ),
        NetteError::Io { path, source } => miette::miette!(
            help = "Check that build.outDir is writable",
            "Failed to access dev server info file {}: {}",
            path.display(),
            source
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_hook_error_unwraps_nette_error() {
        let err = CliError::Dev(DevError::Hook {
            plugin: "nette".to_string(),
            hook: "config",
            source: NetteError::OutputDirMissing {
                expected: PathBuf::from("/app/www"),
            }
            .into(),
        });

        let report = cli_error_to_miette(err);
        assert_eq!(
            report.to_string(),
            "Cannot derive the output directory: /app/www does not exist"
        );
        assert!(report.help().is_some());
    }

    #[test]
    fn test_other_hook_errors_keep_plugin_name() {
        let err = CliError::Dev(DevError::Hook {
            plugin: "other".to_string(),
            hook: "configureServer",
            source: anyhow::anyhow!("boom"),
        });

        let report = cli_error_to_miette(err);
        assert_eq!(report.to_string(), "Plugin 'other' failed in configureServer: boom");
    }
}
