use serde::{Deserialize, Deserializer, Serialize};

/// An ordering constraint: `from` must complete before `to` may start.
///
/// `from` is slack on purpose. The generator sometimes omits it entirely or
/// uses a parallelGroup label instead of an activity id; an absent or null
/// `from` deserializes to the empty string, which the normalizer's repair
/// pass treats as "parents unknown, infer them".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
  #[serde(default, deserialize_with = "null_as_empty")]
  pub from: String,
  pub to: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<String>::deserialize(deserializer)?;
  Ok(value.unwrap_or_default())
}
