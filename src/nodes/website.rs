//! WebSite

use serde_json::Value;

use crate::config::{opt_value, ResolveContext};
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{action, link_to, organization, resolve_urls};
use crate::resolver::{object_cast, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{IDENTITY_ID, WEBSITE_ID};

pub static WEBSITE: Definer = Definer {
    name: "WebSite",
    default_type: "WebSite",
    id: IdStrategy::Fixed {
        scope: IdScope::Host,
        fragment: WEBSITE_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Host,
        fragment: WEBSITE_ID,
    },
    required: &["name", "url"],
    cast: object_cast,
    defaults: website_defaults,
    resolve: resolve_website,
    merge_relations: merge_website,
};

fn website_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("url".to_string(), Value::String(ctx.host().to_string()));
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_website(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url"], scope.ctx.host());
    scope.resolve_field(&mut node, "publisher", &organization::ORGANIZATION, true);
    scope.resolve_field(&mut node, "potentialAction", &action::SEARCH_ACTION, false);
    node
}

fn merge_website(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_to(graph, idx, "publisher", IDENTITY_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_web_site;
    use serde_json::json;

    #[test]
    fn test_website_defaults() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_web_site(json!({"name": "test"})).resolve(&ctx);
        assert_eq!(
            Value::Object(resolution.primary().unwrap().clone()),
            json!({
                "@id": "https://example.com/#website",
                "@type": "WebSite",
                "name": "test",
                "url": "https://example.com/"
            })
        );
    }

    #[test]
    fn test_search_action_is_inlined() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_web_site(json!({
            "name": "test",
            "potentialAction": {"target": "/search?q={search_term_string}"}
        }))
        .resolve(&ctx);

        let action = &resolution.primary().unwrap()["potentialAction"];
        assert_eq!(action["@type"], "SearchAction");
        assert_eq!(
            action["target"]["urlTemplate"],
            "https://example.com/search?q={search_term_string}"
        );
        assert_eq!(action["query-input"], "required name=search_term_string");
    }
}
