use async_trait::async_trait;
use serde_json::Value;

/// Forwards single requests to fixed cloud endpoints and hands back the
/// decoded JSON body untouched.
#[async_trait]
pub trait CloudProxy: Send + Sync {
    async fn completion(&self, prompt: &str) -> Result<Value, ProxyError>;

    async fn sentiment(&self, text: &str) -> Result<Value, ProxyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("request to upstream failed: {0}")]
    Transport(String),
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("upstream body is not valid JSON: {0}")]
    InvalidBody(String),
}
