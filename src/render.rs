//! JSON-LD serialization
//!
//! A graph of one node is flattened into the envelope object; any other
//! size is emitted as `{"@context": ..., "@graph": [...]}`.

use serde_json::{json, Map, Value};

use crate::error::SchemaOrgError;
use crate::node::Node;
use crate::vocab::SCHEMA_CONTEXT;

/// Options for serialization
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Indent the output
    pub pretty: bool,
    /// Wrap the output in a `<script type="application/ld+json">` tag
    pub script_tag: bool,
}

/// Build the JSON-LD document for `nodes`
pub fn to_jsonld(nodes: &[Node]) -> Value {
    match nodes {
        [node] => {
            let mut doc = Map::new();
            doc.insert("@context".to_string(), json!(SCHEMA_CONTEXT));
            doc.extend(node.iter().map(|(k, v)| (k.clone(), v.clone())));
            Value::Object(doc)
        }
        _ => json!({
            "@context": SCHEMA_CONTEXT,
            "@graph": nodes
        }),
    }
}

/// Serialize `nodes` into a JSON-LD string
pub fn render_graph(nodes: &[Node], options: &RenderOptions) -> Result<String, SchemaOrgError> {
    let doc = to_jsonld(nodes);
    let json = if options.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };

    if options.script_tag {
        Ok(format!(
            r#"<script type="application/ld+json">{}</script>"#,
            escape_script(&json)
        ))
    } else {
        Ok(json)
    }
}

/// Keep the payload from closing its surrounding script element
fn escape_script(json: &str) -> String {
    json.replace("</", r"<\/")
}

/// Parse a rendered document back into its nodes.
///
/// Accepts both envelope shapes, with or without a surrounding script tag.
pub fn parse_graph(input: &str) -> Result<Vec<Node>, SchemaOrgError> {
    let input = strip_script_tag(input.trim());
    let doc: Value = serde_json::from_str(input)?;

    let Value::Object(doc) = doc else {
        return Err(SchemaOrgError::InvalidInput(
            "JSON-LD document must be an object".to_string(),
        ));
    };
    let (mut graph, mut node) = (None, Node::new());
    for (key, value) in doc {
        match key.as_str() {
            "@context" => {}
            "@graph" => graph = Some(value),
            _ => {
                node.insert(key, value);
            }
        }
    }

    match graph {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(node) => Ok(node),
                other => Err(SchemaOrgError::InvalidInput(format!(
                    "@graph entry is not an object: {}",
                    other
                ))),
            })
            .collect(),
        Some(other) => Err(SchemaOrgError::InvalidInput(format!(
            "@graph must be an array, got {}",
            other
        ))),
        None if node.is_empty() => Ok(vec![]),
        None => Ok(vec![node]),
    }
}

fn strip_script_tag(input: &str) -> &str {
    match (input.find('>'), input.rfind("</script>")) {
        (Some(start), Some(end)) if input.starts_with("<script") && start < end => {
            input[start + 1..end].trim()
        }
        _ => input,
    }
}
