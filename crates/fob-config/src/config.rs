//! User-facing configuration for the fob dev server.
//!
//! Every field is optional: a missing value means "use the default". Plugins
//! receive a [`UserConfig`] through their `config` hook and may fill in
//! defaults of their own before the host resolves it into a
//! [`ResolvedConfig`](crate::ResolvedConfig).

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};

/// Literal address meaning "bind every network interface".
pub const ALL_INTERFACES: &str = "0.0.0.0";

/// Origins the dev server trusts out of the box: anything on localhost,
/// `127.0.0.1` or `[::1]`, on any port.
pub const DEFAULT_ALLOWED_ORIGIN: &str =
    r"^https?://(?:(?:[^:]+\.)?localhost|127\.0\.0\.1|\[::1\])(?::\d+)?$";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Project root that source files and entries are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Public base path the assets are served under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default)]
    pub build: BuildOptions,

    #[serde(default)]
    pub server: ServerOptions,

    /// Plugin-specific tables, keyed by plugin name (`[plugins.<name>]`)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub plugins: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Output directory, relative to `root` unless absolute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    /// Emit a manifest describing the generated assets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<bool>,

    /// Sub-directory of `out_dir` that assets are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,

    /// Entry modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<PathBuf>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<HostSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,

    /// Origins allowed to make cross-origin requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<Vec<CorsOrigin>>,

    /// Host headers accepted in addition to localhost and IP literals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_hosts: Option<Vec<String>>,

    /// Public URL of the dev server, used when generating asset URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Host the dev server binds to.
///
/// Accepts either a boolean (`true` binds every interface, `false` means the
/// default) or an explicit host name / address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostSetting {
    Flag(bool),
    Name(String),
}

impl HostSetting {
    /// `true` for the `true` flag and for the literal `0.0.0.0`.
    pub fn is_all_interfaces(&self) -> bool {
        match self {
            HostSetting::Flag(flag) => *flag,
            HostSetting::Name(name) => name == ALL_INTERFACES,
        }
    }

    /// Host name carried by this setting, if any.
    ///
    /// The `true` flag maps to [`ALL_INTERFACES`]; `false` carries no name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            HostSetting::Flag(true) => Some(ALL_INTERFACES),
            HostSetting::Flag(false) => None,
            HostSetting::Name(name) => Some(name),
        }
    }

    /// Address handed to the socket when binding.
    pub fn bind_host(&self) -> &str {
        self.as_name().unwrap_or("localhost")
    }
}

impl From<&str> for HostSetting {
    fn from(value: &str) -> Self {
        HostSetting::Name(value.to_string())
    }
}

/// An allowed CORS origin: an exact origin string or a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    Exact(String),
    Pattern { pattern: String },
}

impl CorsOrigin {
    pub fn exact(origin: impl Into<String>) -> Self {
        CorsOrigin::Exact(origin.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        CorsOrigin::Pattern {
            pattern: pattern.into(),
        }
    }

    /// The dev server's built-in allowed origins.
    pub fn defaults() -> Vec<CorsOrigin> {
        vec![CorsOrigin::pattern(DEFAULT_ALLOWED_ORIGIN)]
    }
}

impl UserConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use fob_config::{HostSetting, UserConfig};
    /// use serde_json::json;
    ///
    /// let config = UserConfig::from_value(json!({
    ///     "root": "assets",
    ///     "server": { "host": true, "port": 3000 }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.server.host, Some(HostSetting::Flag(true)));
    /// assert_eq!(config.server.port, Some(3000));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Options table for the named plugin, if present.
    pub fn plugin_options(&self, name: &str) -> Option<&Value> {
        self.plugins.get(name).filter(|value| !value.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn host_flag_true_is_all_interfaces() {
        assert!(HostSetting::Flag(true).is_all_interfaces());
        assert!(HostSetting::from("0.0.0.0").is_all_interfaces());
        assert!(!HostSetting::Flag(false).is_all_interfaces());
        assert!(!HostSetting::from("example.com").is_all_interfaces());
    }

    #[test]
    fn host_setting_names() {
        assert_eq!(HostSetting::Flag(true).as_name(), Some("0.0.0.0"));
        assert_eq!(HostSetting::Flag(false).as_name(), None);
        assert_eq!(HostSetting::Flag(false).bind_host(), "localhost");
        assert_eq!(HostSetting::from("10.0.0.2").bind_host(), "10.0.0.2");
    }

    #[test]
    fn host_setting_parses_bool_and_string() {
        let config = UserConfig::from_value(json!({ "server": { "host": "0.0.0.0" } })).unwrap();
        assert_eq!(config.server.host, Some(HostSetting::from("0.0.0.0")));

        let config = UserConfig::from_value(json!({ "server": { "host": false } })).unwrap();
        assert_eq!(config.server.host, Some(HostSetting::Flag(false)));
    }

    #[test]
    fn cors_origins_parse_strings_and_patterns() {
        let config = UserConfig::from_value(json!({
            "server": { "cors": ["https://app.test", { "pattern": "^https://.*\\.test$" }] }
        }))
        .unwrap();

        assert_eq!(
            config.server.cors,
            Some(vec![
                CorsOrigin::exact("https://app.test"),
                CorsOrigin::pattern(r"^https://.*\.test$"),
            ])
        );
    }

    #[test]
    fn camel_case_build_fields() {
        let config = UserConfig::from_value(json!({
            "build": { "outDir": "public/build", "assetsDir": "", "manifest": false }
        }))
        .unwrap();

        assert_eq!(config.build.out_dir, Some(PathBuf::from("public/build")));
        assert_eq!(config.build.assets_dir.as_deref(), Some(""));
        assert_eq!(config.build.manifest, Some(false));
    }

    #[test]
    fn unknown_field_types_are_rejected() {
        let err = UserConfig::from_value(json!({ "server": { "port": "fast" } })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn plugin_options_skips_null() {
        let config = UserConfig::from_value(json!({
            "plugins": { "nette": { "host": "app.test" }, "other": null }
        }))
        .unwrap();

        assert_eq!(config.plugin_options("nette"), Some(&json!({ "host": "app.test" })));
        assert!(config.plugin_options("other").is_none());
        assert!(config.plugin_options("missing").is_none());
    }

    #[test]
    fn to_value_omits_unset_fields() {
        let value = UserConfig::default().to_value().unwrap();
        assert_eq!(value, json!({ "build": {}, "server": {} }));
    }
}
