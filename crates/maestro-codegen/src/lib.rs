//! Maestro Codegen
//!
//! Renders a validated definition as source text for a separate
//! durable-execution deployment target (Temporal TypeScript): entrypoint
//! first, one concurrent fan-out block per parallelGroup, then the remaining
//! activities sequentially.
//!
//! Known limitation: this faithfully represents only single-wave parallel
//! structures. It does not claim to reproduce the arbitrary nested dependency
//! graphs the dynamic scheduler handles; it is a review artifact, not an
//! executable twin.

use std::fmt::Write;

use maestro_config::{Activity, WorkflowDefinition};

/// Render the definition as a Temporal TypeScript workflow module.
pub fn render(def: &WorkflowDefinition) -> String {
  let mut code = String::new();

  code.push_str("import { proxyActivities } from \"@temporalio/workflow\";\n");
  code.push_str("import type * as activities from \"./activities\";\n\n");
  code.push_str("const { httpCallActivity } = proxyActivities<typeof activities>({\n");
  code.push_str("  startToCloseTimeout: \"30s\",\n");
  code.push_str("});\n\n");

  let function_name: String = def
    .name
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("_");
  let _ = writeln!(
    code,
    "export async function {}(args: any): Promise<void> {{",
    function_name
  );

  // Entrypoint first.
  code.push_str("  // Entrypoint\n");
  if let Some(entry) = def.activity(&def.entrypoint) {
    let _ = writeln!(code, "  // Method: {} {}", entry.method, entry.endpoint);
    let _ = writeln!(code, "  const {}Result = await httpCallActivity({{", entry.id);
    let _ = writeln!(code, "    method: \"{}\",", entry.method);
    let _ = writeln!(code, "    endpoint: \"{}\"", entry.endpoint);
    code.push_str("  });\n\n");
  }

  // One fan-out block per parallelGroup, in first-seen order.
  for (group, members) in parallel_groups(def) {
    let _ = writeln!(code, "  // Parallel Group: {}", group);
    code.push_str("  await Promise.all([\n");
    for activity in members {
      let _ = writeln!(
        code,
        "    httpCallActivity({{ method: \"{}\", endpoint: \"{}\" }}),",
        activity.method, activity.endpoint
      );
    }
    code.push_str("  ]);\n\n");
  }

  // Whatever is neither the entrypoint nor grouped runs sequentially.
  let remaining: Vec<&Activity> = def
    .activities
    .iter()
    .filter(|a| a.id != def.entrypoint && a.parallel_group.is_none())
    .collect();
  if !remaining.is_empty() {
    code.push_str("  // Remaining Sequential Activities\n");
    for activity in remaining {
      let _ = writeln!(
        code,
        "  await httpCallActivity({{ method: \"{}\", endpoint: \"{}\" }});",
        activity.method, activity.endpoint
      );
    }
  }

  code.push_str("}\n");
  code
}

/// Group membership in first-seen order so rendering is deterministic.
fn parallel_groups(def: &WorkflowDefinition) -> Vec<(&str, Vec<&Activity>)> {
  let mut groups: Vec<(&str, Vec<&Activity>)> = Vec::new();
  for activity in &def.activities {
    let Some(label) = activity.parallel_group.as_deref() else {
      continue;
    };
    match groups.iter_mut().find(|(g, _)| *g == label) {
      Some((_, members)) => members.push(activity),
      None => groups.push((label, vec![activity])),
    }
  }
  groups
}

#[cfg(test)]
mod tests {
  use maestro_config::validate;
  use serde_json::json;

  use super::*;

  fn sample() -> WorkflowDefinition {
    validate(&json!({
      "name": "user enrichment flow",
      "entrypoint": "fetch_user",
      "activities": [
        { "id": "fetch_user", "type": "http_call", "method": "GET", "endpoint": "/users/1" },
        { "id": "fetch_orders", "type": "http_call", "method": "GET",
          "endpoint": "/orders", "parallelGroup": "g" },
        { "id": "fetch_prefs", "type": "http_call", "method": "GET",
          "endpoint": "/prefs", "parallelGroup": "g" },
        { "id": "merge", "type": "http_call", "method": "POST", "endpoint": "/merge" }
      ],
      "dependencies": []
    }))
    .unwrap()
  }

  #[test]
  fn renders_entrypoint_before_groups_before_remaining() {
    let code = render(&sample());

    let entry = code.find("const fetch_userResult = await httpCallActivity").unwrap();
    let group = code.find("// Parallel Group: g").unwrap();
    let rest = code.find("// Remaining Sequential Activities").unwrap();
    assert!(entry < group && group < rest);
  }

  #[test]
  fn group_members_render_inside_promise_all() {
    let code = render(&sample());

    let block_start = code.find("await Promise.all([").unwrap();
    let block_end = code[block_start..].find("]);").unwrap() + block_start;
    let block = &code[block_start..block_end];
    assert!(block.contains("endpoint: \"/orders\""));
    assert!(block.contains("endpoint: \"/prefs\""));
  }

  #[test]
  fn workflow_name_whitespace_becomes_underscores() {
    let code = render(&sample());
    assert!(code.contains("export async function user_enrichment_flow(args: any)"));
  }

  #[test]
  fn missing_entrypoint_is_tolerated() {
    let mut def = sample();
    def.entrypoint = "ghost".to_string();

    let code = render(&def);

    assert!(!code.contains("ghostResult"));
    assert!(code.contains("await Promise.all(["));
  }
}
