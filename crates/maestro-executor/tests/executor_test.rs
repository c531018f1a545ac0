//! Scheduler integration tests over a scripted in-memory invoker.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use maestro_config::validate;
use maestro_executor::{
  ActivityCall, ActivityInvoker, ExecutionError, InvocationError, execute,
};
use maestro_normalizer::normalize;
use serde_json::{Value, json};

/// Scripted invoker: per-activity canned outputs, delays, and failures.
/// Records dispatch/completion order and every call it receives.
#[derive(Default)]
struct ScriptedInvoker {
  outputs: HashMap<String, Value>,
  delays: HashMap<String, u64>,
  failures: HashMap<String, String>,
  events: Mutex<Vec<String>>,
  calls: Mutex<Vec<ActivityCall>>,
}

impl ScriptedInvoker {
  fn new() -> Self {
    Self::default()
  }

  fn output(mut self, id: &str, value: Value) -> Self {
    self.outputs.insert(id.to_string(), value);
    self
  }

  fn delay_ms(mut self, id: &str, ms: u64) -> Self {
    self.delays.insert(id.to_string(), ms);
    self
  }

  fn failing(mut self, id: &str, message: &str) -> Self {
    self.failures.insert(id.to_string(), message.to_string());
    self
  }

  fn events(&self) -> Vec<String> {
    self.events.lock().unwrap().clone()
  }

  fn calls(&self) -> Vec<ActivityCall> {
    self.calls.lock().unwrap().clone()
  }

  fn event_index(&self, event: &str) -> usize {
    let events = self.events();
    events
      .iter()
      .position(|e| e == event)
      .unwrap_or_else(|| panic!("event '{}' not recorded in {:?}", event, events))
  }
}

#[async_trait]
impl ActivityInvoker for ScriptedInvoker {
  async fn invoke(&self, call: ActivityCall) -> Result<Value, InvocationError> {
    let id = call.activity_id.clone();
    self.events.lock().unwrap().push(format!("start:{}", id));
    self.calls.lock().unwrap().push(call);

    if let Some(ms) = self.delays.get(&id) {
      tokio::time::sleep(Duration::from_millis(*ms)).await;
    }

    self.events.lock().unwrap().push(format!("end:{}", id));

    if let Some(message) = self.failures.get(&id) {
      return Err(InvocationError::Transport(message.clone()));
    }
    Ok(
      self
        .outputs
        .get(&id)
        .cloned()
        .unwrap_or_else(|| json!({ "ok": true })),
    )
  }
}

fn definition(raw: Value) -> maestro_config::WorkflowDefinition {
  let mut def = validate(&raw).unwrap();
  normalize(&mut def);
  def
}

fn activity(id: &str, endpoint: &str) -> Value {
  json!({ "id": id, "type": "http_call", "method": "GET", "endpoint": endpoint })
}

#[tokio::test]
async fn empty_definition_completes_without_invocations() {
  let def = definition(json!({
    "name": "empty", "entrypoint": "", "activities": [], "dependencies": []
  }));
  let invoker = ScriptedInvoker::new();

  let result = execute(&def, &invoker).await.unwrap();

  assert!(result.results.is_empty());
  assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn single_activity_produces_one_entry() {
  let def = definition(json!({
    "name": "single", "entrypoint": "fetch_user",
    "activities": [activity("fetch_user", "/users/1")],
    "dependencies": []
  }));
  let invoker = ScriptedInvoker::new().output("fetch_user", json!({ "id": 1 }));

  let result = execute(&def, &invoker).await.unwrap();

  assert_eq!(invoker.calls().len(), 1);
  assert_eq!(result.results.len(), 1);
  assert_eq!(result.results["fetch_user"], json!({ "id": 1 }));
}

#[tokio::test(start_paused = true)]
async fn diamond_respects_ordering_and_runs_branches_concurrently() {
  // a -> b, a -> c, b -> d, c -> d
  let def = definition(json!({
    "name": "diamond", "entrypoint": "a",
    "activities": [
      activity("a", "/a"),
      json!({ "id": "b", "type": "http_call", "method": "GET", "endpoint": "/b",
              "parallelGroup": "g" }),
      json!({ "id": "c", "type": "http_call", "method": "GET", "endpoint": "/c",
              "parallelGroup": "g" }),
      activity("d", "/d"),
    ],
    "dependencies": [
      { "from": "a", "to": "b" },
      { "from": "a", "to": "c" },
      { "from": "b", "to": "d" },
      { "from": "c", "to": "d" },
    ]
  }));
  let invoker = ScriptedInvoker::new()
    .delay_ms("a", 1)
    .delay_ms("b", 20)
    .delay_ms("c", 20)
    .delay_ms("d", 1);

  let result = execute(&def, &invoker).await.unwrap();

  assert_eq!(result.results.len(), 4);

  // a runs alone; b and c both start before either finishes; d starts only
  // after both branches completed.
  assert!(invoker.event_index("end:a") < invoker.event_index("start:b"));
  assert!(invoker.event_index("end:a") < invoker.event_index("start:c"));
  assert!(invoker.event_index("start:b") < invoker.event_index("end:c"));
  assert!(invoker.event_index("start:c") < invoker.event_index("end:b"));
  assert!(invoker.event_index("end:b") < invoker.event_index("start:d"));
  assert!(invoker.event_index("end:c") < invoker.event_index("start:d"));
}

#[tokio::test(start_paused = true)]
async fn successor_starts_before_slow_sibling_finishes() {
  // a -> b (slow), a -> c (fast), c -> d. First-completion waiting means d
  // must start while b is still running.
  let def = definition(json!({
    "name": "overlap", "entrypoint": "a",
    "activities": [
      activity("a", "/a"),
      activity("b", "/b"),
      activity("c", "/c"),
      activity("d", "/d"),
    ],
    "dependencies": [
      { "from": "a", "to": "b" },
      { "from": "a", "to": "c" },
      { "from": "c", "to": "d" },
    ]
  }));
  let invoker = ScriptedInvoker::new()
    .delay_ms("a", 1)
    .delay_ms("b", 100)
    .delay_ms("c", 5)
    .delay_ms("d", 5);

  execute(&def, &invoker).await.unwrap();

  assert!(invoker.event_index("start:d") < invoker.event_index("end:b"));
}

#[tokio::test]
async fn cycle_fails_with_deadlock() {
  let def = definition(json!({
    "name": "cycle", "entrypoint": "a",
    "activities": [activity("a", "/a"), activity("b", "/b")],
    "dependencies": [
      { "from": "a", "to": "b" },
      { "from": "b", "to": "a" },
    ]
  }));
  let invoker = ScriptedInvoker::new();

  let err = execute(&def, &invoker).await.unwrap_err();

  assert!(matches!(err, ExecutionError::DeadlockDetected { pending: 2 }));
  assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn remote_failure_aborts_the_run() {
  let def = definition(json!({
    "name": "failing", "entrypoint": "a",
    "activities": [activity("a", "/a"), activity("b", "/b")],
    "dependencies": [ { "from": "a", "to": "b" } ]
  }));
  let invoker = ScriptedInvoker::new().failing("a", "connection refused");

  let err = execute(&def, &invoker).await.unwrap_err();

  match err {
    ExecutionError::ActivityFailed { activity_id, .. } => assert_eq!(activity_id, "a"),
    other => panic!("expected ActivityFailed, got {:?}", other),
  }
  // b never started.
  assert_eq!(invoker.calls().len(), 1);
}

#[tokio::test]
async fn placeholders_resolve_against_parent_results_at_dispatch() {
  let def = definition(json!({
    "name": "enrich", "entrypoint": "fetch_user",
    "activities": [
      activity("fetch_user", "/users/1"),
      json!({
        "id": "enrich", "type": "http_call", "method": "POST",
        "endpoint": "/enrich/${fetch_user.id}",
        "inputs": { "name": "${fetch_user.profile.name}", "keep": "${nobody.here}", "n": 7 }
      }),
    ],
    "dependencies": [ { "from": "fetch_user", "to": "enrich" } ]
  }));
  let invoker = ScriptedInvoker::new()
    .output("fetch_user", json!({ "id": 42, "profile": { "name": "ada" } }));

  execute(&def, &invoker).await.unwrap();

  let calls = invoker.calls();
  let enrich = calls.iter().find(|c| c.activity_id == "enrich").unwrap();
  assert_eq!(enrich.endpoint, "/enrich/42");
  assert_eq!(enrich.payload["name"], json!("ada"));
  // Unresolvable reference degrades to the literal placeholder.
  assert_eq!(enrich.payload["keep"], json!("${nobody.here}"));
  assert_eq!(enrich.payload["n"], json!(7));
}

#[tokio::test]
async fn edge_with_unknown_endpoint_is_ignored_at_setup() {
  // Bypass normalization to prove the scheduler defends itself.
  let def = validate(&json!({
    "name": "raw", "entrypoint": "a",
    "activities": [activity("a", "/a")],
    "dependencies": [ { "from": "ghost", "to": "a" } ]
  }))
  .unwrap();
  let invoker = ScriptedInvoker::new();

  let result = execute(&def, &invoker).await.unwrap();

  assert_eq!(result.results.len(), 1);
}
