/// Parse and validate a `--host` value.
///
/// Accepts a host name or IP address, without scheme, path or port.
///
/// # Errors
///
/// Returns an error message if the value is not a bare host.
pub fn parse_host(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Host cannot be empty".to_string());
    }

    if s.contains("://") {
        return Err(format!("Host must not include a scheme: '{}'", s));
    }

    if s.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(format!("Host must be a bare host name or address: '{}'", s));
    }

    Ok(s.to_string())
}
