//! Maestro HTTP
//!
//! The concrete remote-call primitive: an [`ActivityInvoker`] that issues
//! JSON HTTP requests against a base URL. This is where the advisory
//! `timeoutSeconds` finally gets applied: the scheduler forwards it as data
//! and this invoker chooses to honor it per request.

use std::time::Duration;

use async_trait::async_trait;
use maestro_config::HttpMethod;
use maestro_executor::{ActivityCall, ActivityInvoker, InvocationError};
use tracing::debug;
use url::Url;

/// Issues each activity call as an HTTP request relative to a base URL.
pub struct HttpInvoker {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpInvoker {
  pub fn new(base_url: Url) -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url,
    }
  }

  fn endpoint_url(&self, endpoint: &str) -> Result<Url, InvocationError> {
    self
      .base_url
      .join(endpoint)
      .map_err(|e| InvocationError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
      })
  }
}

/// Convert the advisory timeout into a [`Duration`], discarding values a
/// request cannot use. The field comes from an untrusted generator, so
/// negative, NaN, and overflowing numbers are treated as "no timeout"
/// rather than failing the call.
fn advisory_timeout(seconds: Option<f64>) -> Option<Duration> {
  let seconds = seconds?;
  match Duration::try_from_secs_f64(seconds) {
    Ok(timeout) => Some(timeout),
    Err(_) => {
      debug!(seconds, "ignoring unusable advisory timeout");
      None
    }
  }
}

#[async_trait]
impl ActivityInvoker for HttpInvoker {
  async fn invoke(&self, call: ActivityCall) -> Result<serde_json::Value, InvocationError> {
    let url = self.endpoint_url(&call.endpoint)?;

    debug!(
      activity_id = %call.activity_id,
      method = %call.method,
      url = %url,
      "issuing http call"
    );

    let mut request = match call.method {
      HttpMethod::Get => self.client.get(url),
      HttpMethod::Post => self.client.post(url),
    }
    .json(&call.payload);

    if let Some(timeout) = advisory_timeout(call.timeout_seconds) {
      request = request.timeout(timeout);
    }

    let response = request
      .send()
      .await
      .map_err(|e| InvocationError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(InvocationError::Status {
        status: status.as_u16(),
      });
    }

    response
      .json()
      .await
      .map_err(|e| InvocationError::Transport(e.to_string()))
  }
}
