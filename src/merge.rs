//! Dedupe-and-flatten merge for nodes sharing an `@id`
//!
//! Policy:
//! - keys: union
//! - `@type`: ordered-unique union, the first node's primary type stays first
//! - arrays: concatenated, deduplicated by deep equality
//! - array meets scalar: the scalar joins the array
//! - scalar or object conflicts: first wins, unless the first value is empty

use serde_json::Value;
use std::collections::HashMap;

use crate::error::ResolveWarning;
use crate::node::{
    extract_id, extract_types, is_empty_value, lead_with_id_and_type, set_types, Node,
};

/// Merge two field values using the array-union / first-wins policy
pub fn merge_values(a: &Value, b: &Value) -> Value {
    if values_equal(a, b) {
        return a.clone();
    }

    match (a, b) {
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            let mut result = arr_a.clone();
            for item in arr_b {
                if !contains_value(&result, item) {
                    result.push(item.clone());
                }
            }
            Value::Array(result)
        }
        (Value::Array(arr), other) if !is_empty_value(other) => {
            let mut result = arr.clone();
            if !contains_value(&result, other) {
                result.push(other.clone());
            }
            Value::Array(result)
        }
        (other, Value::Array(arr)) if !is_empty_value(other) => {
            let mut result = vec![other.clone()];
            for item in arr {
                if !contains_value(&result, item) {
                    result.push(item.clone());
                }
            }
            Value::Array(result)
        }
        _ if is_empty_value(a) => b.clone(),
        _ => a.clone(),
    }
}

/// Check if two values are semantically equal
/// Handles @id reference normalization
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            // Special case: both are @id references
            if obj_a.len() == 1 && obj_b.len() == 1 {
                if let (Some(id_a), Some(id_b)) = (obj_a.get("@id"), obj_b.get("@id")) {
                    return id_a == id_b;
                }
            }
            obj_a == obj_b
        }
        _ => a == b,
    }
}

/// Check if an array contains a value (using semantic equality)
fn contains_value(arr: &[Value], value: &Value) -> bool {
    arr.iter().any(|v| values_equal(v, value))
}

/// Merge `b` into `a`, both sharing one `@id`.
///
/// Returns a warning when the two disagree on their primary type.
pub fn merge_nodes(a: &mut Node, b: Node) -> Option<ResolveWarning> {
    let types_a = extract_types(a);
    let types_b = extract_types(&b);

    let conflict = match (types_a.first(), types_b.first()) {
        (Some(kept), Some(other)) if kept != other && !types_a.contains(other) => {
            Some(ResolveWarning::ConflictingTypes {
                id: extract_id(a).unwrap_or_default().to_string(),
                kept: kept.clone(),
                discarded: other.clone(),
            })
        }
        _ => None,
    };

    let mut merged_types = types_a;
    for t in types_b {
        if !merged_types.contains(&t) {
            merged_types.push(t);
        }
    }

    for (key, value_b) in b {
        if key == "@id" || key == "@type" {
            continue;
        }
        let merged = match a.get(&key) {
            Some(value_a) => merge_values(value_a, &value_b),
            None => value_b,
        };
        a.insert(key, merged);
    }

    let had_type = a.contains_key("@type");
    set_types(a, merged_types);
    if !had_type {
        lead_with_id_and_type(a);
    }

    conflict
}

/// Group nodes by `@id` and merge duplicates.
///
/// Output keeps the first-appearance order of each distinct id; nodes
/// without an id are kept where they appeared.
pub fn dedupe_and_flatten(nodes: Vec<Node>) -> (Vec<Node>, Vec<ResolveWarning>) {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut warnings = Vec::new();

    for node in nodes {
        let Some(id) = extract_id(&node).map(String::from) else {
            merged.push(node);
            continue;
        };

        match by_id.get(&id) {
            Some(&idx) => {
                if let Some(warning) = merge_nodes(&mut merged[idx], node) {
                    warnings.push(warning);
                }
            }
            None => {
                by_id.insert(id, merged.len());
                merged.push(node);
            }
        }
    }

    (merged, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> Node {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_values_equal() {
        assert_eq!(merge_values(&json!("test"), &json!("test")), json!("test"));
    }

    #[test]
    fn test_merge_values_scalar_first_wins() {
        assert_eq!(merge_values(&json!("first"), &json!("second")), json!("first"));
        assert_eq!(merge_values(&json!(""), &json!("second")), json!("second"));
        assert_eq!(
            merge_values(&json!({"a": 1}), &json!({"b": 2})),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_merge_values_arrays() {
        assert_eq!(
            merge_values(&json!(["a", "b"]), &json!(["b", "c"])),
            json!(["a", "b", "c"])
        );
        assert_eq!(merge_values(&json!(["a", "b"]), &json!("c")), json!(["a", "b", "c"]));
        assert_eq!(merge_values(&json!("a"), &json!(["a", "b"])), json!(["a", "b"]));
    }

    #[test]
    fn test_id_reference_dedup() {
        let a = json!([{"@id": "#person1"}, {"@id": "#person2"}]);
        let b = json!([{"@id": "#person1"}, {"@id": "#person3"}]);
        let result = merge_values(&a, &b);
        assert_eq!(result.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_merge_nodes_law() {
        let mut a = node(json!({
            "@id": "https://example.com/#identity",
            "@type": "Organization",
            "name": "Co",
            "sameAs": ["https://x.com/co"]
        }));
        let b = node(json!({
            "@id": "https://example.com/#identity",
            "@type": ["Organization", "Corporation"],
            "name": "Co Inc",
            "url": "https://example.com/",
            "sameAs": ["https://github.com/co", "https://x.com/co"]
        }));

        let warning = merge_nodes(&mut a, b);
        assert!(warning.is_none());

        assert_eq!(a["@type"], json!(["Organization", "Corporation"]));
        assert_eq!(a["name"], json!("Co"));
        assert_eq!(a["url"], json!("https://example.com/"));
        assert_eq!(a["sameAs"], json!(["https://x.com/co", "https://github.com/co"]));

        let keys: Vec<&str> = a.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@id", "@type", "name", "sameAs", "url"]);
    }

    #[test]
    fn test_merge_nodes_conflicting_primary_type() {
        let mut a = node(json!({"@id": "#identity", "@type": "Organization"}));
        let b = node(json!({"@id": "#identity", "@type": "Person"}));

        let warning = merge_nodes(&mut a, b);
        assert_eq!(
            warning,
            Some(ResolveWarning::ConflictingTypes {
                id: "#identity".to_string(),
                kept: "Organization".to_string(),
                discarded: "Person".to_string(),
            })
        );
        assert_eq!(a["@type"], json!(["Organization", "Person"]));
    }

    #[test]
    fn test_dedupe_and_flatten_order() {
        let nodes = vec![
            node(json!({"@id": "#a", "name": "A"})),
            node(json!({"@id": "#b", "name": "B"})),
            node(json!({"name": "anonymous"})),
            node(json!({"@id": "#a", "description": "more A"})),
        ];

        let (merged, warnings) = dedupe_and_flatten(nodes);
        assert!(warnings.is_empty());
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0]["@id"], "#a");
        assert_eq!(merged[0]["description"], "more A");
        assert_eq!(merged[1]["@id"], "#b");
        assert_eq!(merged[2]["name"], "anonymous");
    }
}
