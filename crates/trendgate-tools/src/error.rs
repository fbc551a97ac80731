use thiserror::Error;

/// Invocation-level failures. Per-keyword failures never surface here.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    Validation(#[from] trendgate_models::ValidationError),

    #[error("Client error: {0}")]
    Client(#[from] trendgate_client::ClientError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
