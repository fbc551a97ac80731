use tracing::debug;
use trendgate_models::ClientConfig;

use crate::client::TrendsClient;
use crate::error::ClientError;
use crate::google::GoogleTrendsClient;

/// Produces a fresh client for each invocation. Clients are never pooled or
/// shared, so concurrent invocations cannot see each other's payloads.
pub trait ClientFactory: Send + Sync {
    fn create(&self, timezone_offset_minutes: i32) -> Result<Box<dyn TrendsClient>, ClientError>;
}

/// Factory for [`GoogleTrendsClient`]s built from one immutable config.
#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
    config: ClientConfig,
}

impl HttpClientFactory {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self, timezone_offset_minutes: i32) -> Result<Box<dyn TrendsClient>, ClientError> {
        debug!(
            tz = timezone_offset_minutes,
            locale = %self.config.locale,
            "Creating trends client"
        );
        let client = GoogleTrendsClient::new(&self.config, timezone_offset_minutes)?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_independent_clients() {
        let factory = HttpClientFactory::default();
        assert!(factory.create(0).is_ok());
        assert!(factory.create(-330).is_ok());
        assert_eq!(factory.config().retries, 2);
    }

    #[test]
    fn propagates_build_errors() {
        let factory = HttpClientFactory::new(ClientConfig {
            base_url: "::".to_string(),
            ..ClientConfig::default()
        });
        assert!(matches!(factory.create(0), Err(ClientError::Build(_))));
    }
}
