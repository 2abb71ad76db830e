//! Settings consumed from a configuration store.
//!
//! Settings arrive either as a generic string key-value mapping (the keys
//! `Server`, `User`, `Password`, `Domain`) or as a JSON document:
//!
//! ```json
//! {
//!     "Proxy": { "Server": "10.0.0.1", "User": "proxyuser", "Password": "..." },
//!     "WebApi": { "User": "apiuser", "Password": "..." }
//! }
//! ```
//!
//! An absent key is treated as an empty value throughout.

use serde::Deserialize;
use std::collections::HashMap;

use crate::credentials::Credentials;

/// Settings for connecting through a proxy server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProxySettings {
    /// Proxy server address, either a full URL or a bare hostname/IP.
    pub server: Option<String>,
    /// Username for the proxy account, optionally in the format `domain\user`.
    pub user: Option<String>,
    pub password: Option<String>,
    pub domain: Option<String>,
}

impl ProxySettings {
    /// Reads settings from a string mapping, treating absent keys as empty.
    pub fn from_map(settings: &HashMap<String, String>) -> Self {
        Self {
            server: settings.get("Server").cloned(),
            user: settings.get("User").cloned(),
            password: settings.get("Password").cloned(),
            domain: settings.get("Domain").cloned(),
        }
    }

    /// Resolves the credentials to present to the proxy server.
    pub fn credentials(&self) -> Credentials {
        Credentials::resolve(
            self.user.as_deref(),
            self.password.as_deref(),
            self.domain.as_deref(),
        )
    }
}

/// Settings to use when calling web APIs directly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiSettings {
    /// Username, optionally in the format `domain\user`.
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ApiSettings {
    /// Reads settings from a string mapping, treating absent keys as empty.
    pub fn from_map(settings: &HashMap<String, String>) -> Self {
        Self {
            user: settings.get("User").cloned(),
            password: settings.get("Password").cloned(),
        }
    }

    /// Resolves the credentials to present to the destination API.
    pub fn credentials(&self) -> Credentials {
        Credentials::resolve(self.user.as_deref(), self.password.as_deref(), None)
    }
}

/// Top-level settings document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub proxy: ProxySettings,
    pub web_api: ApiSettings,
}

impl Settings {
    /// Parses a JSON settings document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_settings_from_map() {
        let mut map = HashMap::new();
        map.insert("Server".to_string(), "10.0.0.1".to_string());
        map.insert("User".to_string(), "proxyuser".to_string());

        let settings = ProxySettings::from_map(&map);
        assert_eq!(settings.server.as_deref(), Some("10.0.0.1"));
        assert_eq!(settings.user.as_deref(), Some("proxyuser"));
        assert_eq!(settings.password, None);
        assert_eq!(settings.domain, None);
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{
            "Proxy": { "Server": "proxy.example", "User": "u1", "Password": "p1", "Domain": "CORP" },
            "WebApi": { "User": "api", "Password": "secret" }
        }"#;

        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.proxy.server.as_deref(), Some("proxy.example"));
        assert_eq!(settings.proxy.domain.as_deref(), Some("CORP"));
        assert_eq!(settings.web_api.user.as_deref(), Some("api"));
    }

    #[test]
    fn test_settings_from_json_with_missing_sections() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.proxy.server, None);
        assert_eq!(settings.web_api.credentials(), Credentials::Ambient);
    }

    #[test]
    fn test_api_settings_credentials() {
        let settings = ApiSettings {
            user: Some("alice".to_string()),
            password: None,
        };
        assert_eq!(
            settings.credentials(),
            Credentials::Explicit {
                user: "alice".to_string(),
                password: String::new(),
                domain: None,
            }
        );
    }
}
