//! Helpers over untyped Schema.org nodes
//!
//! A node is a JSON object carrying `@type` and `@id` plus arbitrary
//! type-specific fields.

use serde_json::{Map, Value};

/// A Schema.org entity: an insertion-ordered JSON object
pub type Node = Map<String, Value>;

/// Extract `@id` from a node
pub fn extract_id(node: &Node) -> Option<&str> {
    node.get("@id").and_then(|v| v.as_str())
}

/// Extract `@type` as a list of type names
pub fn extract_types(node: &Node) -> Vec<String> {
    types_of(node.get("@type"))
}

/// First `@type`, if any
pub fn primary_type(node: &Node) -> Option<String> {
    extract_types(node).into_iter().next()
}

/// Check if a node has a specific `@type`
pub fn has_type(node: &Node, type_name: &str) -> bool {
    extract_types(node).iter().any(|t| t == type_name)
}

pub(crate) fn types_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(t)) => vec![t.clone()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => vec![],
    }
}

/// Write a type list back as a string (one type) or an array
pub fn set_types(node: &mut Node, types: Vec<String>) {
    match types.len() {
        0 => {
            node.remove("@type");
        }
        1 => {
            node.insert("@type".to_string(), Value::String(types[0].clone()));
        }
        _ => {
            node.insert(
                "@type".to_string(),
                Value::Array(types.into_iter().map(Value::String).collect()),
            );
        }
    }
}

/// Normalize `@type` so `default_type` comes first.
///
/// A node typed only as the default keeps a plain string; any augmentation
/// produces an ordered-unique array with the default type first.
pub fn resolve_default_type(node: &mut Node, default_type: &str) {
    let mut types = vec![default_type.to_string()];
    for t in extract_types(node) {
        if !types.contains(&t) {
            types.push(t);
        }
    }
    set_types(node, types);
}

/// Move `@id` then `@type` to the front, keeping the order of other keys
pub fn lead_with_id_and_type(node: &mut Node) {
    let entries: Vec<(String, Value)> = std::mem::take(node).into_iter().collect();
    let (mut head, tail): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|(k, _)| k == "@id" || k == "@type");
    head.sort_by_key(|(k, _)| k != "@id");
    node.extend(head);
    node.extend(tail);
}

/// Check whether a value carries no information
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(obj) => obj.is_empty(),
        _ => false,
    }
}

/// Set `key` only when the node has no meaningful value there yet
pub fn set_if_empty(node: &mut Node, key: &str, value: Value) {
    if is_empty_value(&value) {
        return;
    }
    if node.get(key).map_or(true, is_empty_value) {
        node.insert(key.to_string(), value);
    }
}

/// Fill every empty key of `node` from `defaults`, keeping node values
pub fn apply_defaults(node: &mut Node, defaults: Node) {
    for (key, value) in defaults {
        set_if_empty(node, &key, value);
    }
}

/// Wrap a value in an array unless it already is one
pub fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(arr) => arr,
        Value::Null => vec![],
        other => vec![other],
    }
}

/// Append `value` to the array at `key` unless an equal value is present
pub fn push_unique(node: &mut Node, key: &str, value: Value) {
    match node.get_mut(key) {
        Some(slot) => {
            let mut items = as_array(std::mem::take(slot));
            if !items.contains(&value) {
                items.push(value);
            }
            *slot = Value::Array(items);
        }
        None => {
            node.insert(key.to_string(), Value::Array(vec![value]));
        }
    }
}

/// Remove null, empty-string, empty-array and empty-object values recursively
pub fn strip_empty_properties(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            for v in obj.values_mut() {
                strip_empty_properties(v);
            }
            obj.retain(|_, v| !is_empty_value(v));
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                strip_empty_properties(v);
            }
            arr.retain(|v| !is_empty_value(v));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> Node {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_extract_types() {
        let single = node(json!({"@type": "Person"}));
        assert_eq!(extract_types(&single), vec!["Person"]);

        let multiple = node(json!({"@type": ["WebPage", "FAQPage"]}));
        assert_eq!(extract_types(&multiple), vec!["WebPage", "FAQPage"]);
        assert!(has_type(&multiple, "FAQPage"));
        assert_eq!(primary_type(&multiple).as_deref(), Some("WebPage"));
    }

    #[test]
    fn test_resolve_default_type() {
        let mut plain = node(json!({"@type": "Article"}));
        resolve_default_type(&mut plain, "Article");
        assert_eq!(plain["@type"], json!("Article"));

        let mut augmented = node(json!({"@type": "BlogPosting"}));
        resolve_default_type(&mut augmented, "Article");
        assert_eq!(augmented["@type"], json!(["Article", "BlogPosting"]));

        let mut duplicated = node(json!({"@type": ["BlogPosting", "Article", "BlogPosting"]}));
        resolve_default_type(&mut duplicated, "Article");
        assert_eq!(duplicated["@type"], json!(["Article", "BlogPosting"]));

        let mut untyped = Node::new();
        resolve_default_type(&mut untyped, "Thing");
        assert_eq!(untyped["@type"], json!("Thing"));
    }

    #[test]
    fn test_lead_with_id_and_type() {
        let mut n = Node::new();
        n.insert("name".to_string(), json!("x"));
        n.insert("@type".to_string(), json!("Thing"));
        n.insert("url".to_string(), json!("/x"));
        n.insert("@id".to_string(), json!("#x"));
        lead_with_id_and_type(&mut n);
        let keys: Vec<&str> = n.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@id", "@type", "name", "url"]);
    }

    #[test]
    fn test_set_if_empty() {
        let mut n = node(json!({"name": "kept", "description": ""}));
        set_if_empty(&mut n, "name", json!("ignored"));
        set_if_empty(&mut n, "description", json!("filled"));
        set_if_empty(&mut n, "url", json!("https://example.com/"));
        set_if_empty(&mut n, "image", Value::Null);

        assert_eq!(n["name"], "kept");
        assert_eq!(n["description"], "filled");
        assert_eq!(n["url"], "https://example.com/");
        assert!(n.get("image").is_none());
    }

    #[test]
    fn test_push_unique() {
        let mut n = node(json!({"mainEntity": {"@id": "#a"}}));
        push_unique(&mut n, "mainEntity", json!({"@id": "#b"}));
        push_unique(&mut n, "mainEntity", json!({"@id": "#a"}));
        assert_eq!(n["mainEntity"], json!([{"@id": "#a"}, {"@id": "#b"}]));
    }

    #[test]
    fn test_strip_empty_properties() {
        let mut value = json!({
            "name": "x",
            "empty": "",
            "none": null,
            "list": [null, "", "a"],
            "nested": {"inner": null},
            "flag": false,
            "count": 0
        });
        strip_empty_properties(&mut value);
        assert_eq!(
            value,
            json!({"name": "x", "list": ["a"], "flag": false, "count": 0})
        );
    }
}
