//! Event, Place and VirtualLocation
//!
//! A string location is a venue name, or a virtual location when it is a url.

use serde_json::Value;

use crate::config::{opt_value, ResolveContext};
use crate::date::{coerce_fields, to_iso};
use crate::id::{has_protocol, IdScope};
use crate::node::Node;
use crate::nodes::{address, image, link_to, offer, organization, person, resolve_urls};
use crate::resolver::{
    keep_node, no_defaults, no_relations, object_cast, Definer, Graph, IdStrategy, ResolveScope,
};
use crate::vocab::{EVENT_ID, WEBPAGE_ID};

pub static EVENT: Definer = Definer {
    name: "Event",
    default_type: "Event",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: EVENT_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: EVENT_ID,
    },
    required: &["name", "startDate", "location"],
    cast: object_cast,
    defaults: event_defaults,
    resolve: resolve_event,
    merge_relations: merge_event,
};

pub static PLACE: Definer = Definer {
    name: "Place",
    default_type: "Place",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["address"],
    cast: object_cast,
    defaults: no_defaults,
    resolve: resolve_place,
    merge_relations: no_relations,
};

pub static VIRTUAL_LOCATION: Definer = Definer {
    name: "VirtualLocation",
    default_type: "VirtualLocation",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["url"],
    cast: object_cast,
    defaults: no_defaults,
    resolve: keep_node,
    merge_relations: no_relations,
};

fn event_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("name".to_string(), opt_value(ctx.meta.title.as_deref()));
    node.insert(
        "description".to_string(),
        opt_value(ctx.meta.description.as_deref()),
    );
    node.insert("image".to_string(), opt_value(ctx.meta.image.as_deref()));
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_event(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url"], scope.ctx.host());
    coerce_fields(&mut node, &["startDate", "endDate", "previousStartDate"], to_iso);
    offer::expand_enum_fields(&mut node, &["eventStatus", "eventAttendanceMode"]);

    if let Some(slot) = node.get_mut("location") {
        let locations = std::mem::take(slot);
        *slot = resolve_location(locations, scope);
    }

    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    scope.resolve_field(&mut node, "performer", &person::PERSON, true);
    scope.resolve_field(&mut node, "organizer", &organization::ORGANIZATION, true);
    scope.resolve_field(&mut node, "offers", &offer::OFFER, false);
    node
}

fn resolve_location(value: Value, scope: &mut ResolveScope<'_>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| resolve_location(item, scope))
                .collect(),
        ),
        Value::String(s) if has_protocol(&s) => {
            scope.relation(serde_json::json!({ "url": s }), &VIRTUAL_LOCATION, false)
        }
        Value::String(s) => scope.relation(serde_json::json!({ "name": s }), &PLACE, false),
        Value::Object(obj) => {
            let definer = match obj.get("@type").and_then(Value::as_str) {
                Some("VirtualLocation") => &VIRTUAL_LOCATION,
                _ => &PLACE,
            };
            scope.relation(Value::Object(obj), definer, false)
        }
        other => other,
    }
}

fn resolve_place(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    scope.resolve_field(&mut node, "address", &address::POSTAL_ADDRESS, false);
    node
}

fn merge_event(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_to(graph, idx, "mainEntityOfPage", WEBPAGE_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_event;
    use serde_json::json;

    #[test]
    fn test_event_locations() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_event(json!({
            "name": "Launch",
            "startDate": "2024-05-01T18:00:00+02:00",
            "eventStatus": "EventScheduled",
            "eventAttendanceMode": "MixedEventAttendanceMode",
            "location": [
                "https://stream.example.com/launch",
                {"name": "Hall", "address": "1 Main St"}
            ]
        }))
        .resolve(&ctx);

        let event = resolution.primary().unwrap();
        assert_eq!(event["startDate"], "2024-05-01T16:00:00.000Z");
        assert_eq!(event["eventStatus"], "https://schema.org/EventScheduled");
        assert_eq!(
            event["location"][0],
            json!({"@type": "VirtualLocation", "url": "https://stream.example.com/launch"})
        );
        assert_eq!(event["location"][1]["@type"], "Place");
        assert_eq!(
            event["location"][1]["address"],
            json!({"@type": "PostalAddress", "streetAddress": "1 Main St"})
        );
    }

    #[test]
    fn test_missing_location_is_reported_later() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_event(json!({"name": "Launch"})).resolve(&ctx);
        let event = resolution.primary().unwrap();
        let missing = EVENT.missing_required(event);
        assert_eq!(missing.len(), 2);
    }
}
