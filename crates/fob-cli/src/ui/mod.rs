//! Terminal output: status messages and the dev server summary.
//!
//! # Examples
//!
//! ```no_run
//! use fob_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Dev server ready");
//! ui::error("Failed to read configuration file");
//! ```

mod format;
mod messages;

pub use format::print_server_summary;
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support for terminal output.
///
/// `--no-color` always wins over the environment.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
