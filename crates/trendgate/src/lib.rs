//! trendgate - validating gateway between LLM agents and Google Trends
//!
//! Agents submit loosely typed `{operation, parameters}` calls. Parameters are
//! checked against a closed schema before any request leaves the process;
//! accepted calls run one isolated lookup per keyword and come back as a
//! bounded envelope where each keyword carries its own result or error.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), trendgate::tools::ToolError> {
//! use trendgate::models::{GatewayConfig, ToolCall};
//!
//! let gateway = trendgate::build_gateway(&GatewayConfig::default());
//! let call: ToolCall = serde_json::from_str(
//!     r#"{"operation": "related_queries", "parameters": {"keywords": ["Pizza"], "region": "US"}}"#,
//! )?;
//! let envelope = gateway.invoke(&call).await?;
//! # Ok(()) }
//! ```

pub use trendgate_client as client;
pub use trendgate_models as models;
pub use trendgate_tools as tools;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde_json::{json, Value};
use trendgate_client::HttpClientFactory;
use trendgate_models::{GatewayConfig, ValidationError};
use trendgate_tools::Gateway;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/trendgate.toml";

/// Build a Gateway backed by the Google Trends HTTP client.
pub fn build_gateway(config: &GatewayConfig) -> Gateway {
    Gateway::new(Arc::new(HttpClientFactory::new(config.client.clone())))
}

/// Load configuration from `path`. Without a path, the default location is
/// used if present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, anyhow::Error> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Path::new(DEFAULT_CONFIG_PATH),
        None => return Ok(GatewayConfig::default()),
    };

    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&config_str).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Error object returned to the agent when its parameters are rejected.
pub fn rejection(error: &ValidationError) -> Value {
    json!({
        "success": false,
        "field": error.field(),
        "error": error.to_string(),
    })
}
