//! LocalBusiness and OpeningHoursSpecification
//!
//! A local business is an organization with an address and opening hours;
//! it shares the organization's identity handling.

use serde_json::{json, Value};

use crate::config::ResolveContext;
use crate::id::IdScope;
use crate::node::{as_array, extract_types, set_types, Node};
use crate::nodes::{offer, organization, rating};
use crate::resolver::{no_relations, object_cast, Definer, IdStrategy, ResolveScope};
use crate::vocab::{expand_enum_member, IDENTITY_ID, ORGANIZATION_ID_PREFIX};

pub static LOCAL_BUSINESS: Definer = Definer {
    name: "LocalBusiness",
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
    required: &["name", "address"],
    cast: object_cast,
    defaults: local_business_defaults,
    resolve: resolve_local_business,
    merge_relations: organization::merge_identity,
};

pub static OPENING_HOURS: Definer = Definer {
    name: "OpeningHoursSpecification",
    default_type: "OpeningHoursSpecification",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["dayOfWeek"],
    cast: object_cast,
    defaults: opening_hours_defaults,
    resolve: resolve_opening_hours,
    merge_relations: no_relations,
};

fn local_business_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    if let Some(currency) = ctx.currency() {
        node.insert("currenciesAccepted".to_string(), json!(currency));
    }
    node
}

fn resolve_local_business(node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let mut node = organization::resolve_organization(node, scope);

    // subtypes such as Restaurant sit after LocalBusiness
    let mut types = vec!["Organization".to_string(), "LocalBusiness".to_string()];
    for t in extract_types(&node) {
        if !types.contains(&t) {
            types.push(t);
        }
    }
    set_types(&mut node, types);

    scope.resolve_field(&mut node, "openingHoursSpecification", &OPENING_HOURS, false);
    scope.resolve_field(&mut node, "aggregateRating", &rating::AGGREGATE_RATING, false);
    scope.resolve_field(&mut node, "review", &rating::REVIEW, false);
    scope.resolve_field(&mut node, "makesOffer", &offer::OFFER, false);
    node
}

fn opening_hours_defaults(_: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("opens".to_string(), json!("00:00"));
    node.insert("closes".to_string(), json!("23:59"));
    node
}

fn resolve_opening_hours(mut node: Node, _: &mut ResolveScope<'_>) -> Node {
    if let Some(slot) = node.get_mut("dayOfWeek") {
        let days: Vec<Value> = as_array(std::mem::take(slot))
            .into_iter()
            .map(|day| match day {
                Value::String(s) => Value::String(expand_enum_member(&s)),
                other => other,
            })
            .collect();
        *slot = Value::Array(days);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_local_business;

    #[test]
    fn test_local_business() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_local_business(json!({
            "@type": "Restaurant",
            "name": "Diner",
            "address": {"streetAddress": "1 Main St", "addressCountry": "US"},
            "openingHoursSpecification": [{"dayOfWeek": ["Monday", "Tuesday"], "opens": "09:00"}]
        }))
        .resolve(&ctx);

        let node = resolution.primary().unwrap();
        assert_eq!(
            node["@type"],
            json!(["Organization", "LocalBusiness", "Restaurant"])
        );
        assert_eq!(node["@id"], "https://example.com/#identity");
        assert_eq!(node["address"]["@type"], "PostalAddress");

        let hours = &node["openingHoursSpecification"][0];
        assert_eq!(hours["@type"], "OpeningHoursSpecification");
        assert_eq!(hours["opens"], "09:00");
        assert_eq!(hours["closes"], "23:59");
        assert_eq!(
            hours["dayOfWeek"],
            json!(["https://schema.org/Monday", "https://schema.org/Tuesday"])
        );
    }

    #[test]
    fn test_local_business_without_subtype() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_local_business(json!({"name": "Shop"})).resolve(&ctx);
        assert_eq!(
            resolution.primary().unwrap()["@type"],
            json!(["Organization", "LocalBusiness"])
        );
    }
}
