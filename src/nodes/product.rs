//! Product

use serde_json::Value;

use crate::config::ResolveContext;
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{image, link_to, offer, organization, rating, resolve_urls};
use crate::resolver::{no_defaults, object_cast, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{IDENTITY_ID, PRODUCT_ID, WEBPAGE_ID};

pub static PRODUCT: Definer = Definer {
    name: "Product",
    default_type: "Product",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: PRODUCT_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: PRODUCT_ID,
    },
    required: &["name"],
    cast: object_cast,
    defaults: no_defaults,
    resolve: resolve_product,
    merge_relations: merge_product,
};

fn resolve_product(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url"], scope.ctx.host());
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    scope.resolve_field(&mut node, "brand", &organization::ORGANIZATION, true);
    scope.resolve_field(&mut node, "aggregateRating", &rating::AGGREGATE_RATING, false);
    scope.resolve_field(&mut node, "review", &rating::REVIEW, false);

    // a single `{lowPrice, highPrice}` object describes a price range
    let definer = match node.get("offers") {
        Some(Value::Object(obj)) if obj.contains_key("lowPrice") => &offer::AGGREGATE_OFFER,
        _ => &offer::OFFER,
    };
    scope.resolve_field(&mut node, "offers", definer, false);
    node
}

fn merge_product(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_to(graph, idx, "mainEntityOfPage", WEBPAGE_ID);
    link_to(graph, idx, "brand", IDENTITY_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaOrgOptions;
    use crate::nodes::define_product;
    use serde_json::json;

    #[test]
    fn test_product_offers_and_rating() {
        let ctx = ResolveContext::new("https://example.com/")
            .with_url("https://example.com/shop/widget")
            .with_options(SchemaOrgOptions {
                default_currency: Some("USD".to_string()),
                ..Default::default()
            });
        let resolution = define_product(json!({
            "name": "Widget",
            "image": "/widget.png",
            "offers": [{"price": 10, "availability": "InStock"}],
            "aggregateRating": {"ratingValue": 4.5, "reviewCount": 10}
        }))
        .resolve(&ctx);

        let product = resolution.primary().unwrap();
        assert_eq!(product["@id"], "https://example.com/shop/widget#product");
        assert_eq!(product["offers"][0]["@type"], "Offer");
        assert_eq!(product["offers"][0]["priceCurrency"], "USD");
        assert_eq!(
            product["offers"][0]["availability"],
            "https://schema.org/InStock"
        );
        assert_eq!(product["aggregateRating"]["@type"], "AggregateRating");
        assert!(product["image"]["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/#/schema/image/"));
    }

    #[test]
    fn test_price_range_is_aggregate_offer() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_product(json!({
            "name": "Widget",
            "offers": {"lowPrice": 5, "highPrice": 10}
        }))
        .resolve(&ctx);
        assert_eq!(
            resolution.primary().unwrap()["offers"]["@type"],
            "AggregateOffer"
        );
    }
}
