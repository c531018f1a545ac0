use async_trait::async_trait;
use maestro_config::HttpMethod;
use thiserror::Error;

/// One remote call, fully resolved and ready to send.
#[derive(Debug, Clone)]
pub struct ActivityCall {
  pub activity_id: String,
  pub method: HttpMethod,
  /// Endpoint with every resolvable placeholder already substituted.
  pub endpoint: String,
  /// Resolved input mapping, always a JSON object.
  pub payload: serde_json::Value,
  /// Advisory. Implementations may apply it; the scheduler never does.
  pub timeout_seconds: Option<f64>,
}

/// Failure surfaced by an invoker implementation.
#[derive(Debug, Error)]
pub enum InvocationError {
  #[error("transport error: {0}")]
  Transport(String),

  #[error("endpoint returned status {status}")]
  Status { status: u16 },

  #[error("invalid endpoint '{endpoint}': {message}")]
  InvalidEndpoint { endpoint: String, message: String },
}

/// The remote-call primitive the scheduler drives.
///
/// Implementations own transport, base URLs, auth, and whether to honor the
/// advisory timeout. The scheduler only promises that `invoke` is called
/// after every declared parent of the activity has completed.
#[async_trait]
pub trait ActivityInvoker: Send + Sync {
  async fn invoke(&self, call: ActivityCall) -> Result<serde_json::Value, InvocationError>;
}
