//! Dev server URL construction.

use fob_config::{ALL_INTERFACES, HostSetting};

pub const LOCALHOST: &str = "localhost";

/// Host name browsers should use to reach the dev server.
///
/// An explicit override wins, then `server.host`. Whichever is picked, binding
/// to every interface (`true` or `0.0.0.0`) is not reachable as-is, so it
/// falls back to `localhost` like an unset host does.
pub fn advertised_host(override_host: Option<&str>, configured: Option<&HostSetting>) -> String {
    override_host
        .or_else(|| configured.and_then(HostSetting::as_name))
        .filter(|host| *host != ALL_INTERFACES)
        .unwrap_or(LOCALHOST)
        .to_string()
}

pub fn protocol(https: bool) -> &'static str {
    if https { "https" } else { "http" }
}

/// `protocol://host[:port]`, omitting the port when it is 80.
pub fn dev_server_url(protocol: &str, host: &str, port: u16) -> String {
    if port == 80 {
        format!("{protocol}://{host}")
    } else {
        format!("{protocol}://{host}:{port}")
    }
}
