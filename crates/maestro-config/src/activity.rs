use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One remote-call unit of work in a workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
  pub id: String,
  /// The generator's node kind tag. Only [`ActivityKind::HttpCall`] is
  /// executable; everything else is dropped during normalization.
  #[serde(rename = "type")]
  pub kind: ActivityKind,
  pub method: HttpMethod,
  /// Endpoint path, may embed `${activityId.path}` placeholders.
  pub endpoint: String,
  /// Input mapping forwarded to the invoker. String values may embed
  /// placeholders; other values pass through untouched. The generator emits
  /// null for "no inputs" as freely as it omits the field; both mean empty.
  #[serde(
    default,
    deserialize_with = "null_as_empty_map",
    skip_serializing_if = "HashMap::is_empty"
  )]
  pub inputs: HashMap<String, serde_json::Value>,
  /// Grouping label for activities meant to run concurrently.
  /// Pure metadata, never a graph node.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parallel_group: Option<String>,
  /// Advisory retry metadata for a downstream durable-execution runtime.
  /// This engine never retries.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub retry_policy: Option<RetryPolicy>,
  /// Advisory timeout, forwarded to the invoker as data.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timeout_seconds: Option<f64>,
}

/// Closed set of node kinds the generator may emit.
///
/// The generator is known to hallucinate control-flow kinds (fork, join,
/// gateway) that have no meaning here; they deserialize so the definition
/// survives validation, and the normalizer's sanitize pass drops them.
/// Anything else lands on [`ActivityKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  HttpCall,
  Fork,
  Join,
  Gateway,
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
  #[serde(rename = "GET")]
  Get,
  #[serde(rename = "POST")]
  Post,
}

impl std::fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      HttpMethod::Get => write!(f, "GET"),
      HttpMethod::Post => write!(f, "POST"),
    }
  }
}

fn null_as_empty_map<'de, D>(
  deserializer: D,
) -> Result<HashMap<String, serde_json::Value>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<HashMap<String, serde_json::Value>>::deserialize(deserializer)?;
  Ok(value.unwrap_or_default())
}

/// Advisory retry metadata. The generator emits numbers as JSON numbers,
/// which may be fractional; kept as f64 to round-trip faithfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
  pub max_attempts: f64,
  pub backoff_seconds: f64,
}
