use serde::{Deserialize, Serialize};

/// Top-level configuration for the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    #[serde(default)]
    pub client: ClientConfig,
}

/// Transport settings for the per-invocation trends client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host of the trends service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Interface language sent as `hl`.
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
    /// Extra attempts for connection errors and 429/500/502/504 responses.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Base delay between attempts, doubled on every retry. 0 retries immediately.
    #[serde(default)]
    pub backoff_millis: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            locale: default_locale(),
            connect_timeout_seconds: default_connect_timeout(),
            read_timeout_seconds: default_read_timeout(),
            retries: default_retries(),
            backoff_millis: 0,
        }
    }
}

fn default_base_url() -> String {
    "https://trends.google.com".to_string()
}
fn default_locale() -> String {
    "en-US".to_string()
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_read_timeout() -> u64 {
    25
}
fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.connect_timeout_seconds, 10);
        assert_eq!(config.read_timeout_seconds, 25);
        assert_eq!(config.retries, 2);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn partial_toml() {
        let toml_str = r#"
[client]
read_timeout_seconds = 40
retries = 0
backoff_millis = 250
"#;
        let config: GatewayConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.client.read_timeout_seconds, 40);
        assert_eq!(config.client.retries, 0);
        assert_eq!(config.client.backoff_millis, 250);
        assert_eq!(config.client.base_url, "https://trends.google.com");
    }

    #[test]
    fn roundtrip_config() {
        let config = GatewayConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: GatewayConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
