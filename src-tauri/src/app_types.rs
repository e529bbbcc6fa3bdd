use serde::Serialize;

use crate::{DEFAULT_GATEWAY_PORT, GATEWAY_HOST};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BindScope {
    Loopback,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AuthMode {
    None,
    Token,
}

/// Gateway connection parameters. Replaced wholesale on every reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectionConfig {
    pub(crate) port: u16,
    pub(crate) bind_scope: BindScope,
    pub(crate) auth_mode: AuthMode,
    pub(crate) auth_token: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_GATEWAY_PORT,
            bind_scope: BindScope::Loopback,
            auth_mode: AuthMode::None,
            auth_token: String::new(),
        }
    }
}

impl ConnectionConfig {
    pub(crate) fn probe_url(&self) -> String {
        format!("http://{GATEWAY_HOST}:{}/", self.port)
    }

    /// Address loaded into the window once the gateway answers.
    pub(crate) fn gateway_url(&self) -> String {
        let base = self.probe_url();
        match self.bearer_token() {
            Some(token) => {
                let encoded: String = url::form_urlencoded::byte_serialize(token.as_bytes()).collect();
                format!("{base}?token={encoded}")
            }
            None => base,
        }
    }

    pub(crate) fn bearer_token(&self) -> Option<&str> {
        match self.auth_mode {
            AuthMode::Token if !self.auth_token.is_empty() => Some(self.auth_token.as_str()),
            _ => None,
        }
    }

    pub(crate) fn bridge_summary(&self) -> GatewayBridgeConfig {
        GatewayBridgeConfig {
            port: self.port,
            auth_mode: self.auth_mode,
            has_token: self.bearer_token().is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GatewayBridgeConfig {
    pub(crate) port: u16,
    pub(crate) auth_mode: AuthMode,
    pub(crate) has_token: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn success() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failure(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

impl From<Result<(), String>> for BridgeResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(reason) => Self::failure(reason),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SystemInfo {
    pub(crate) platform: String,
    pub(crate) arch: String,
    pub(crate) version: String,
    pub(crate) is_dark_mode: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThemeSummary {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThemeListing {
    pub(crate) themes: Vec<ThemeSummary>,
    pub(crate) current: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_url_has_no_query_without_token_mode() {
        let config = ConnectionConfig {
            port: 9000,
            ..ConnectionConfig::default()
        };
        assert_eq!(config.gateway_url(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn gateway_url_appends_token_in_token_mode() {
        let config = ConnectionConfig {
            auth_mode: AuthMode::Token,
            auth_token: "abc123".to_string(),
            ..ConnectionConfig::default()
        };
        assert_eq!(config.gateway_url(), "http://127.0.0.1:18789/?token=abc123");
        assert_eq!(config.probe_url(), "http://127.0.0.1:18789/");
    }

    #[test]
    fn gateway_url_encodes_reserved_token_characters() {
        let config = ConnectionConfig {
            auth_mode: AuthMode::Token,
            auth_token: "a&b=c d".to_string(),
            ..ConnectionConfig::default()
        };
        assert_eq!(
            config.gateway_url(),
            "http://127.0.0.1:18789/?token=a%26b%3Dc+d"
        );
    }

    #[test]
    fn empty_token_is_not_sent_and_not_reported() {
        let config = ConnectionConfig {
            auth_mode: AuthMode::Token,
            ..ConnectionConfig::default()
        };
        assert_eq!(config.bearer_token(), None);
        assert_eq!(config.gateway_url(), "http://127.0.0.1:18789/");

        let summary = config.bridge_summary();
        assert_eq!(summary.auth_mode, AuthMode::Token);
        assert!(!summary.has_token);
    }

    #[test]
    fn token_is_ignored_outside_token_mode() {
        let config = ConnectionConfig {
            auth_token: "leftover".to_string(),
            ..ConnectionConfig::default()
        };
        assert_eq!(config.bearer_token(), None);
    }

    #[test]
    fn bridge_summary_serializes_without_token() {
        let config = ConnectionConfig {
            auth_mode: AuthMode::Token,
            auth_token: "secret".to_string(),
            ..ConnectionConfig::default()
        };
        let json = serde_json::to_value(config.bridge_summary()).expect("serialize summary");
        assert_eq!(
            json,
            serde_json::json!({ "port": 18789, "authMode": "token", "hasToken": true })
        );
        assert!(!json.to_string().contains("secret"));
    }
}
