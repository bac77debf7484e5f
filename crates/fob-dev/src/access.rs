//! Request admission: CORS origins and `Host` header validation.

use std::net::IpAddr;

use fob_config::CorsOrigin;
use regex::Regex;

use crate::error::{DevError, Result};

/// Compiled set of allowed CORS origins.
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    exact: Vec<String>,
    patterns: Vec<Regex>,
}

impl AllowedOrigins {
    pub fn new(origins: &[CorsOrigin]) -> Result<Self> {
        let mut exact = Vec::new();
        let mut patterns = Vec::new();

        for origin in origins {
            match origin {
                CorsOrigin::Exact(value) => exact.push(value.clone()),
                CorsOrigin::Pattern { pattern } => {
                    let regex = Regex::new(pattern).map_err(|source| DevError::InvalidOrigin {
                        pattern: pattern.clone(),
                        source,
                    })?;
                    patterns.push(regex);
                }
            }
        }

        Ok(Self { exact, patterns })
    }

    pub fn matches(&self, origin: &str) -> bool {
        self.exact.iter().any(|allowed| allowed == origin)
            || self.patterns.iter().any(|pattern| pattern.is_match(origin))
    }
}

/// Validates the `Host` header of incoming requests.
///
/// `localhost`, its subdomains and IP literals are always accepted. Anything
/// else has to be listed in `server.allowedHosts`; an entry starting with a
/// dot also accepts every subdomain.
#[derive(Debug, Clone, Default)]
pub struct HostFilter {
    allowed: Vec<String>,
}

impl HostFilter {
    pub fn new(allowed: Option<Vec<String>>) -> Self {
        Self {
            allowed: allowed.unwrap_or_default(),
        }
    }

    pub fn is_allowed(&self, host_header: &str) -> bool {
        let host = strip_port(host_header);

        if host == "localhost" || host.ends_with(".localhost") || host.parse::<IpAddr>().is_ok() {
            return true;
        }

        self.allowed.iter().any(|allowed| match allowed.strip_prefix('.') {
            Some(domain) => host == domain || host.ends_with(allowed.as_str()),
            None => host == allowed,
        })
    }
}

fn strip_port(host_header: &str) -> &str {
    if let Some(rest) = host_header.strip_prefix('[') {
        // [::1]:5173
        return rest.split(']').next().unwrap_or(rest);
    }
    host_header.split(':').next().unwrap_or(host_header)
}
