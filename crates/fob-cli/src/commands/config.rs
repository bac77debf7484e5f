//! `fob config`: print the configuration the dev server would use.

use crate::cli::ConfigArgs;
use crate::config::{load_user_config, nette_options, project_dir};
use crate::error::Result;

/// Execute the config command.
///
/// Prints the resolved configuration as JSON on stdout, or with `--raw` the
/// merged user configuration before the nette defaults are applied.
pub fn execute(args: ConfigArgs) -> Result<()> {
    let cwd = project_dir(&args.project)?;
    let user = load_user_config(&args.project, &cwd)?;

    let json = if args.raw {
        serde_json::to_string_pretty(&user)?
    } else {
        let options = nette_options(&user)?;
        let resolved = fob_plugin_nette::resolve_config(&user, &options, &cwd)?;
        serde_json::to_string_pretty(&resolved)?
    };

    println!("{json}");
    Ok(())
}
