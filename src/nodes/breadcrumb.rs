//! BreadcrumbList and ListItem
//!
//! Items are positioned `1..n` in input order. The last item conventionally
//! names the current page and carries no `item` url unless the caller gave one.

use serde_json::{json, Value};

use crate::config::ResolveContext;
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{cast_string_to, link_from, resolve_urls};
use crate::resolver::{
    no_defaults, no_relations, object_cast, Definer, Graph, IdStrategy, ResolveScope,
};
use crate::vocab::{BREADCRUMB_ID, WEBPAGE_ID};

pub static BREADCRUMB: Definer = Definer {
    name: "BreadcrumbList",
    default_type: "BreadcrumbList",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: BREADCRUMB_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: BREADCRUMB_ID,
    },
    required: &["itemListElement"],
    cast: object_cast,
    defaults: no_defaults,
    resolve: resolve_breadcrumb,
    merge_relations: merge_breadcrumb,
};

pub static LIST_ITEM: Definer = Definer {
    name: "ListItem",
    default_type: "ListItem",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["name"],
    cast: cast_list_item,
    defaults: no_defaults,
    resolve: resolve_list_item,
    merge_relations: no_relations,
};

fn cast_list_item(value: &Value) -> Option<Node> {
    cast_string_to(value, "name")
}

fn resolve_breadcrumb(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let Some(slot) = node.get_mut("itemListElement") else {
        return node;
    };
    let items = match std::mem::take(slot) {
        Value::Array(items) => items,
        Value::Null => vec![],
        other => vec![other],
    };

    let mut resolved = Vec::with_capacity(items.len());
    for item in items {
        let position = resolved.len() + 1;
        let mut item = scope.relation(item, &LIST_ITEM, false);
        if let Value::Object(obj) = &mut item {
            obj.insert("position".to_string(), json!(position));
            resolved.push(item);
        }
    }
    node.insert("itemListElement".to_string(), Value::Array(resolved));
    node
}

fn resolve_list_item(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["item"], scope.ctx.host());
    node
}

fn merge_breadcrumb(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_from(graph, WEBPAGE_ID, "breadcrumb", idx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_breadcrumb;

    #[test]
    fn test_breadcrumb_positions() {
        let ctx = ResolveContext::new("https://example.com/")
            .with_url("https://example.com/blog/my-article");
        let resolution = define_breadcrumb(json!({
            "itemListElement": [
                {"name": "Home", "item": "/"},
                {"name": "Blog", "item": "/blog"},
                {"name": "My Article"}
            ]
        }))
        .resolve(&ctx);

        let list = resolution.primary().unwrap();
        assert_eq!(list["@id"], "https://example.com/blog/my-article#breadcrumb");
        assert_eq!(
            list["itemListElement"],
            json!([
                {"@type": "ListItem", "name": "Home", "item": "https://example.com/", "position": 1},
                {"@type": "ListItem", "name": "Blog", "item": "https://example.com/blog", "position": 2},
                {"@type": "ListItem", "name": "My Article", "position": 3}
            ])
        );
    }

    #[test]
    fn test_string_items() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution =
            define_breadcrumb(json!({"itemListElement": ["Home", "Docs"]})).resolve(&ctx);
        let items = &resolution.primary().unwrap()["itemListElement"];
        assert_eq!(items[1]["name"], "Docs");
        assert_eq!(items[1]["position"], 2);
    }
}
