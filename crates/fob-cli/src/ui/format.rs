//! Dev server summary printed once the server is listening.

use std::path::Path;

use console::Term;
use owo_colors::OwoColorize;

/// Print where the dev server runs and where its URL was published.
pub fn print_server_summary(url: &str, root: &Path, info_file: &Path) {
    let width = Term::stderr().size().1 as usize;
    let rule = "─".repeat(width.clamp(20, 80));

    if console::colors_enabled_stderr() {
        eprintln!("\n{}", "Dev Server".bold().underline());
        eprintln!("{}", rule.dimmed());
        eprintln!("  {} {}", "Local:".bold(), url.cyan());
        eprintln!("  {} {}", "Root:".bold(), root.display().dimmed());
        eprintln!("  {} {}", "Info:".bold(), info_file.display().dimmed());
        eprintln!("{}", rule.dimmed());
    } else {
        eprintln!("\nDev Server");
        eprintln!("{}", rule);
        eprintln!("  Local: {}", url);
        eprintln!("  Root: {}", root.display());
        eprintln!("  Info: {}", info_file.display());
        eprintln!("{}", rule);
    }
}
