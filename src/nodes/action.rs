//! ReadAction and SearchAction, always inlined

use serde_json::{json, Value};

use crate::config::ResolveContext;
use crate::id::with_base;
use crate::node::{set_if_empty, Node};
use crate::resolver::{no_defaults, no_relations, object_cast, Definer, IdStrategy, ResolveScope};

const SEARCH_TERM: &str = "search_term_string";

pub static READ_ACTION: Definer = Definer {
    name: "ReadAction",
    default_type: "ReadAction",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["target"],
    cast: object_cast,
    defaults: no_defaults,
    resolve: resolve_read_action,
    merge_relations: no_relations,
};

pub static SEARCH_ACTION: Definer = Definer {
    name: "SearchAction",
    default_type: "SearchAction",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["target"],
    cast: cast_search_action,
    defaults: search_action_defaults,
    resolve: resolve_search_action,
    merge_relations: no_relations,
};

fn resolve_read_action(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let url = scope.ctx.url().to_string();
    let host = scope.ctx.host();
    if let Some(target) = node.get_mut("target") {
        *target = match std::mem::take(target) {
            Value::Array(items) => Value::Array(items.into_iter().map(|t| absolute(host, t)).collect()),
            other => Value::Array(vec![absolute(host, other)]),
        };
    }
    set_if_empty(&mut node, "target", json!([url]));
    node
}

fn absolute(host: &str, value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(with_base(host, &s)),
        other => other,
    }
}

/// A bare string is the search url template
fn cast_search_action(value: &Value) -> Option<Node> {
    match value {
        Value::String(template) => {
            let mut node = Node::new();
            node.insert("target".to_string(), Value::String(template.clone()));
            Some(node)
        }
        Value::Object(obj) => Some(obj.clone()),
        _ => None,
    }
}

fn search_action_defaults(_: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert(
        "query-input".to_string(),
        Value::String(format!("required name={}", SEARCH_TERM)),
    );
    node
}

fn resolve_search_action(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let host = scope.ctx.host();
    let template = match node.get("target") {
        Some(Value::String(s)) => with_base(host, s),
        Some(Value::Object(entry)) => match entry.get("urlTemplate").and_then(Value::as_str) {
            Some(s) => with_base(host, s),
            None => return node,
        },
        Some(_) => return node,
        None => format!("{}?q={{{}}}", host, SEARCH_TERM),
    };
    node.insert(
        "target".to_string(),
        json!({"@type": "EntryPoint", "urlTemplate": template}),
    );
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{define_read_action, define_search_action};

    #[test]
    fn test_read_action_targets_page() {
        let ctx = ResolveContext::new("https://example.com/").with_url("https://example.com/blog/");
        let resolution = define_read_action(json!({})).resolve(&ctx);
        let action = resolution.primary().unwrap();
        assert_eq!(action["@type"], "ReadAction");
        assert_eq!(action["target"], json!(["https://example.com/blog/"]));
        assert!(action.get("@id").is_none());
    }

    #[test]
    fn test_search_action_default_template() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_search_action(json!({})).resolve(&ctx);
        let action = resolution.primary().unwrap();
        assert_eq!(
            action["target"],
            json!({
                "@type": "EntryPoint",
                "urlTemplate": "https://example.com/?q={search_term_string}"
            })
        );
    }
}
