//! WebPage and its subtypes
//!
//! The page subtype is inferred from the last path segment of the canonical
//! url, so `/faq` becomes `["WebPage", "FAQPage"]` without caller input.

use serde_json::{json, Value};

use crate::config::{opt_value, ResolveContext};
use crate::date::{coerce_fields, to_iso};
use crate::id::IdScope;
use crate::node::{extract_types, set_if_empty, Node};
use crate::nodes::{action, breadcrumb, image, link_to, organization, person, resolve_urls};
use crate::resolver::{object_cast, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{BREADCRUMB_ID, IDENTITY_ID, LOGO_ID, WEBPAGE_ID, WEBSITE_ID};

pub static WEBPAGE: Definer = Definer {
    name: "WebPage",
    default_type: "WebPage",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: WEBPAGE_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: WEBPAGE_ID,
    },
    required: &["url"],
    cast: object_cast,
    defaults: webpage_defaults,
    resolve: resolve_webpage,
    merge_relations: merge_webpage,
};

/// Page subtype implied by the last path segment of `url`
pub fn infer_page_type(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.split_once("://").map_or(path, |(_, rest)| {
        rest.find('/').map_or("", |pos| &rest[pos..])
    });
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    match segment.to_ascii_lowercase().as_str() {
        "about" | "about-us" => Some("AboutPage"),
        "search" => Some("SearchResultsPage"),
        "checkout" => Some("CheckoutPage"),
        "contact" | "get-in-touch" | "contact-us" => Some("ContactPage"),
        "faq" => Some("FAQPage"),
        _ => None,
    }
}

fn webpage_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("url".to_string(), Value::String(ctx.url().to_string()));
    node.insert("name".to_string(), opt_value(ctx.meta.title.as_deref()));
    node.insert(
        "description".to_string(),
        opt_value(ctx.meta.description.as_deref()),
    );
    node.insert(
        "datePublished".to_string(),
        opt_value(ctx.meta.date_published.as_deref()),
    );
    node.insert(
        "dateModified".to_string(),
        opt_value(ctx.meta.date_modified.as_deref()),
    );
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_webpage(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let url = scope.ctx.url().to_string();
    // an explicit plain "WebPage" still gets its subtype
    if extract_types(&node) == ["WebPage"] {
        if let Some(subtype) = infer_page_type(&url) {
            node.insert("@type".to_string(), json!(["WebPage", subtype]));
        }
    }
    resolve_urls(&mut node, &["url"], scope.ctx.host());
    coerce_fields(&mut node, &["datePublished", "dateModified"], to_iso);

    scope.resolve_field(&mut node, "about", &organization::ORGANIZATION, true);
    scope.resolve_field(&mut node, "breadcrumb", &breadcrumb::BREADCRUMB, true);
    scope.resolve_field(&mut node, "author", &person::PERSON, true);
    scope.resolve_field(&mut node, "primaryImageOfPage", &image::IMAGE, true);
    scope.resolve_field(&mut node, "potentialAction", &action::READ_ACTION, false);

    if !node.contains_key("potentialAction") {
        let read = scope.relation(json!({"target": [url]}), &action::READ_ACTION, false);
        set_if_empty(&mut node, "potentialAction", json!([read]));
    }
    node
}

fn merge_webpage(idx: usize, graph: &mut Graph, ctx: &ResolveContext) {
    if ctx.is_home_page() {
        link_to(graph, idx, "about", IDENTITY_ID);
    }
    link_to(graph, idx, "primaryImageOfPage", LOGO_ID);
    link_to(graph, idx, "isPartOf", WEBSITE_ID);
    link_to(graph, idx, "breadcrumb", BREADCRUMB_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageMeta;
    use crate::nodes::define_web_page;

    #[test]
    fn test_infer_page_type() {
        assert_eq!(infer_page_type("https://example.com/about"), Some("AboutPage"));
        assert_eq!(infer_page_type("https://example.com/about-us/"), Some("AboutPage"));
        assert_eq!(infer_page_type("https://example.com/help/faq?x=1"), Some("FAQPage"));
        assert_eq!(infer_page_type("https://example.com/contact-us"), Some("ContactPage"));
        assert_eq!(infer_page_type("https://example.com/search"), Some("SearchResultsPage"));
        assert_eq!(infer_page_type("https://example.com/checkout/"), Some("CheckoutPage"));
        assert_eq!(infer_page_type("https://example.com/"), None);
        assert_eq!(infer_page_type("https://about.com/"), None);
        assert_eq!(infer_page_type("https://example.com/blog/post"), None);
    }

    #[test]
    fn test_webpage_from_meta() {
        let ctx = ResolveContext::new("https://example.com/")
            .with_url("https://example.com/faq")
            .with_meta(PageMeta {
                title: Some("FAQ".to_string()),
                date_published: Some("2024-01-02".to_string()),
                ..Default::default()
            });
        let resolution = define_web_page(()).resolve(&ctx);
        let page = resolution.primary().unwrap();

        assert_eq!(page["@id"], "https://example.com/faq#webpage");
        assert_eq!(page["@type"], json!(["WebPage", "FAQPage"]));
        assert_eq!(page["url"], "https://example.com/faq");
        assert_eq!(page["name"], "FAQ");
        assert_eq!(page["datePublished"], "2024-01-02T00:00:00.000Z");
        assert!(page.get("description").is_none());
        assert_eq!(
            page["potentialAction"],
            json!([{"@type": "ReadAction", "target": ["https://example.com/faq"]}])
        );
    }

    #[test]
    fn test_explicit_subtype_keeps_webpage_first() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_web_page(json!({"@type": "CollectionPage"})).resolve(&ctx);
        assert_eq!(
            resolution.primary().unwrap()["@type"],
            json!(["WebPage", "CollectionPage"])
        );
    }

    #[test]
    fn test_plain_webpage_type_still_infers_subtype() {
        let ctx = ResolveContext::new("https://example.com/").with_url("https://example.com/faq");
        let resolution = define_web_page(json!({"@type": "WebPage"})).resolve(&ctx);
        assert_eq!(
            resolution.primary().unwrap()["@type"],
            json!(["WebPage", "FAQPage"])
        );

        let home = define_web_page(json!({"@type": "WebPage"}))
            .resolve(&ResolveContext::new("https://example.com/"));
        assert_eq!(home.primary().unwrap()["@type"], "WebPage");
    }
}
