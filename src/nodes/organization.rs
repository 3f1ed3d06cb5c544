//! Organization and the shared identity relations
//!
//! Registered directly, an organization takes the `#identity` role and its
//! logo becomes the site-wide `#logo` image.

use serde_json::Value;

use crate::config::ResolveContext;
use crate::id::{is_id_reference, prefix_id, resolve_raw_id, IdScope};
use crate::node::{extract_id, set_if_empty, Node};
use crate::nodes::{address, cast_string_to, image, link_from, resolve_urls};
use crate::resolver::{no_defaults, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{IDENTITY_ID, LOGO_ID, ORGANIZATION_ID_PREFIX, WEBPAGE_ID, WEBSITE_ID};

pub static ORGANIZATION: Definer = Definer {
    name: "Organization",
    default_type: "Organization",
    id: IdStrategy::Fixed {
        scope: IdScope::Host,
        fragment: IDENTITY_ID,
    },
    nested_id: IdStrategy::Hashed {
        scope: IdScope::Host,
        prefix: ORGANIZATION_ID_PREFIX,
        keys: &["name", "url"],
    },
    required: &["name"],
    cast: cast_organization,
    defaults: no_defaults,
    resolve: resolve_organization,
    merge_relations: merge_identity,
};

fn cast_organization(value: &Value) -> Option<Node> {
    cast_string_to(value, "name")
}

/// Whether a node holds the `#identity` role
pub fn is_identity(node: &Node) -> bool {
    extract_id(node).map(resolve_raw_id) == Some(IDENTITY_ID)
}

pub(crate) fn resolve_organization(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let host = scope.ctx.host().to_string();
    resolve_urls(&mut node, &["url", "sameAs"], &host);
    scope.resolve_field(&mut node, "address", &address::POSTAL_ADDRESS, false);

    let identity = is_identity(&node);
    if identity {
        set_if_empty(&mut node, "url", Value::String(host));
    }

    if let Some(logo) = node.remove("logo") {
        let name = node.get("name").cloned().unwrap_or(Value::Null);
        let caption = &name;
        let resolved = if identity {
            scope.relation_with(logo, &image::IMAGE, true, move |img, ctx| {
                img.insert(
                    "@id".to_string(),
                    Value::String(prefix_id(ctx.host(), LOGO_ID)),
                );
                set_if_empty(img, "caption", caption.clone());
            })
        } else {
            scope.relation(logo, &image::IMAGE, true)
        };
        if !resolved.is_null() {
            node.insert("logo".to_string(), resolved);
        }
    }

    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    node
}

/// Identity relations shared by organizations and people.
///
/// The identity is what the home page is `about`, supplies the page's
/// primary image through its logo and publishes the website.
pub(crate) fn merge_identity(idx: usize, graph: &mut Graph, ctx: &ResolveContext) {
    if !is_identity(graph.node(idx)) {
        return;
    }

    if ctx.is_home_page() {
        link_from(graph, WEBPAGE_ID, "about", idx);
    }

    let logo = match graph.node(idx).get("logo") {
        Some(Value::Array(items)) => items.first().cloned(),
        Some(value) => Some(value.clone()),
        None => None,
    };
    if let (Some(logo), Some(page)) = (logo.filter(is_id_reference), graph.find(WEBPAGE_ID)) {
        set_if_empty(graph.node_mut(page), "primaryImageOfPage", logo);
    }

    link_from(graph, WEBSITE_ID, "publisher", idx);
}

#[cfg(test)]
mod tests {
    use crate::config::ResolveContext;
    use crate::nodes::define_organization;
    use serde_json::json;

    #[test]
    fn test_identity_logo_is_extracted() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution =
            define_organization(json!({"name": "Co", "logo": "/logo.png"})).resolve(&ctx);

        let org = resolution.primary().unwrap();
        assert_eq!(org["@id"], "https://example.com/#identity");
        assert_eq!(org["url"], "https://example.com/");
        assert_eq!(org["logo"], json!({"@id": "https://example.com/#logo"}));

        let logo = &resolution.nodes[1].node;
        assert_eq!(logo["@id"], "https://example.com/#logo");
        assert_eq!(logo["@type"], "ImageObject");
        assert_eq!(logo["url"], "https://example.com/logo.png");
        assert_eq!(logo["caption"], "Co");
    }

    #[test]
    fn test_non_identity_logo_gets_hashed_id() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_organization(json!({
            "@id": "#partner",
            "name": "Partner",
            "logo": "https://partner.org/logo.png"
        }))
        .resolve(&ctx);

        let org = resolution.primary().unwrap();
        assert_eq!(org["@id"], "https://example.com/#partner");
        assert!(org.get("url").is_none());
        let logo_id = org["logo"]["@id"].as_str().unwrap();
        assert!(logo_id.starts_with("https://example.com/#/schema/image/"));
    }
}
