//! Offer and AggregateOffer, always inlined

use serde_json::{json, Value};

use crate::config::{opt_value, ResolveContext};
use crate::date::{coerce_fields, to_date};
use crate::node::{set_if_empty, Node};
use crate::nodes::resolve_urls;
use crate::resolver::{no_relations, object_cast, Definer, IdStrategy, ResolveScope};
use crate::vocab::expand_enum_member;

pub static OFFER: Definer = Definer {
    name: "Offer",
    default_type: "Offer",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["price"],
    cast: cast_offer,
    defaults: offer_defaults,
    resolve: resolve_offer,
    merge_relations: no_relations,
};

pub static AGGREGATE_OFFER: Definer = Definer {
    name: "AggregateOffer",
    default_type: "AggregateOffer",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["lowPrice"],
    cast: object_cast,
    defaults: offer_defaults,
    resolve: resolve_aggregate_offer,
    merge_relations: no_relations,
};

/// A bare number or string is the price
fn cast_offer(value: &Value) -> Option<Node> {
    match value {
        Value::Number(_) | Value::String(_) => {
            let mut node = Node::new();
            node.insert("price".to_string(), value.clone());
            Some(node)
        }
        Value::Object(obj) => Some(obj.clone()),
        _ => None,
    }
}

fn offer_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("priceCurrency".to_string(), opt_value(ctx.currency()));
    node
}

fn resolve_offer(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url"], scope.ctx.host());
    coerce_fields(&mut node, &["priceValidUntil"], to_date);
    expand_enum_fields(&mut node, &["availability", "itemCondition"]);
    node
}

fn resolve_aggregate_offer(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    scope.resolve_field(&mut node, "offers", &OFFER, false);
    let count = node
        .get("offers")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if count > 0 {
        set_if_empty(&mut node, "offerCount", json!(count));
    }
    node
}

/// Expand short enumeration members such as `InStock` to schema.org urls
pub(crate) fn expand_enum_fields(node: &mut Node, keys: &[&str]) {
    for key in keys {
        if let Some(Value::String(member)) = node.get_mut(*key) {
            *member = expand_enum_member(member);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaOrgOptions;
    use crate::nodes::{define_aggregate_offer, define_offer};

    fn ctx() -> ResolveContext {
        ResolveContext::new("https://example.com/").with_options(SchemaOrgOptions {
            default_currency: Some("USD".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_offer_defaults() {
        let resolution = define_offer(json!({
            "price": "9.99",
            "availability": "InStock",
            "priceValidUntil": "2025-12-31T10:00:00Z",
            "url": "/shop/item"
        }))
        .resolve(&ctx());

        let offer = resolution.primary().unwrap();
        assert_eq!(offer["@type"], "Offer");
        assert_eq!(offer["priceCurrency"], "USD");
        assert_eq!(offer["availability"], "https://schema.org/InStock");
        assert_eq!(offer["priceValidUntil"], "2025-12-31");
        assert_eq!(offer["url"], "https://example.com/shop/item");
    }

    #[test]
    fn test_explicit_currency_wins() {
        let resolution =
            define_offer(json!({"price": 5, "priceCurrency": "EUR"})).resolve(&ctx());
        assert_eq!(resolution.primary().unwrap()["priceCurrency"], "EUR");
    }

    #[test]
    fn test_aggregate_offer_counts_offers() {
        let resolution = define_aggregate_offer(json!({
            "lowPrice": 5,
            "highPrice": 10,
            "offers": [5, 10]
        }))
        .resolve(&ctx());

        let aggregate = resolution.primary().unwrap();
        assert_eq!(aggregate["offerCount"], 2);
        assert_eq!(aggregate["offers"][1]["price"], 10);
        assert_eq!(aggregate["offers"][1]["priceCurrency"], "USD");
    }
}
