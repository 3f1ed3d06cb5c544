//! SoftwareApplication (and Mobile/Web application subtypes)

use crate::config::ResolveContext;
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{image, link_to, offer, organization, rating, resolve_urls};
use crate::resolver::{no_defaults, object_cast, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{SOFTWARE_APP_ID, WEBPAGE_ID};

pub static SOFTWARE_APP: Definer = Definer {
    name: "SoftwareApplication",
    default_type: "SoftwareApplication",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: SOFTWARE_APP_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: SOFTWARE_APP_ID,
    },
    required: &["name", "offers"],
    cast: object_cast,
    defaults: no_defaults,
    resolve: resolve_software_app,
    merge_relations: merge_software_app,
};

fn resolve_software_app(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url", "downloadUrl", "installUrl"], scope.ctx.host());
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    scope.resolve_field(&mut node, "author", &organization::ORGANIZATION, true);
    scope.resolve_field(&mut node, "offers", &offer::OFFER, false);
    scope.resolve_field(&mut node, "aggregateRating", &rating::AGGREGATE_RATING, false);
    scope.resolve_field(&mut node, "review", &rating::REVIEW, false);
    node
}

fn merge_software_app(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_to(graph, idx, "mainEntityOfPage", WEBPAGE_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_software_app;
    use serde_json::json;

    #[test]
    fn test_mobile_app_subtype() {
        let ctx = ResolveContext::new("https://example.com/").with_url("https://example.com/app");
        let resolution = define_software_app(json!({
            "@type": "MobileApplication",
            "name": "App",
            "offers": {"price": 0},
            "aggregateRating": 4.6
        }))
        .resolve(&ctx);

        let app = resolution.primary().unwrap();
        assert_eq!(app["@id"], "https://example.com/app#software");
        assert_eq!(app["@type"], json!(["SoftwareApplication", "MobileApplication"]));
        assert_eq!(app["offers"]["@type"], "Offer");
        assert_eq!(
            app["aggregateRating"],
            json!({"@type": "AggregateRating", "ratingValue": 4.6})
        );
    }
}
