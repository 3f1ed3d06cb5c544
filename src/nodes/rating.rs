//! Rating, AggregateRating and Review, always inlined

use serde_json::Value;

use crate::date::{coerce_fields, to_iso};
use crate::node::Node;
use crate::nodes::person;
use crate::resolver::{
    keep_node, no_defaults, no_relations, object_cast, Definer, IdStrategy, ResolveScope,
};

pub static RATING: Definer = Definer {
    name: "Rating",
    default_type: "Rating",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["ratingValue"],
    cast: cast_rating,
    defaults: no_defaults,
    resolve: keep_node,
    merge_relations: no_relations,
};

pub static AGGREGATE_RATING: Definer = Definer {
    name: "AggregateRating",
    default_type: "AggregateRating",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["ratingValue"],
    cast: cast_rating,
    defaults: no_defaults,
    resolve: keep_node,
    merge_relations: no_relations,
};

pub static REVIEW: Definer = Definer {
    name: "Review",
    default_type: "Review",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["author", "reviewRating"],
    cast: object_cast,
    defaults: no_defaults,
    resolve: resolve_review,
    merge_relations: no_relations,
};

/// A bare number is the rating value
fn cast_rating(value: &Value) -> Option<Node> {
    match value {
        Value::Number(_) | Value::String(_) => {
            let mut node = Node::new();
            node.insert("ratingValue".to_string(), value.clone());
            Some(node)
        }
        Value::Object(obj) => Some(obj.clone()),
        _ => None,
    }
}

fn resolve_review(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    coerce_fields(&mut node, &["datePublished"], to_iso);
    scope.resolve_field(&mut node, "author", &person::PERSON, true);
    scope.resolve_field(&mut node, "reviewRating", &RATING, false);
    node
}

#[cfg(test)]
mod tests {
    use crate::config::ResolveContext;
    use crate::nodes::define_review;
    use serde_json::json;

    #[test]
    fn test_review() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolution = define_review(json!({
            "author": "Jane",
            "reviewRating": 4,
            "reviewBody": "Good"
        }))
        .resolve(&ctx);

        let review = resolution.primary().unwrap();
        assert_eq!(
            review["reviewRating"],
            json!({"@type": "Rating", "ratingValue": 4})
        );

        let author = &resolution.nodes[1].node;
        assert_eq!(author["name"], "Jane");
        assert_eq!(review["author"]["@id"], author["@id"]);
    }
}
