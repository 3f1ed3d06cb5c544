//! Fallback for types without a dedicated definer
//!
//! Keeps the caller's own `@type` (Thing when absent) and only assigns an id
//! and resolves references.

use crate::id::IdScope;
use crate::resolver::{keep_node, no_defaults, no_relations, object_cast, Definer, IdStrategy};
use crate::vocab::THING_ID_PREFIX;

const THING_ID: IdStrategy = IdStrategy::Hashed {
    scope: IdScope::Host,
    prefix: THING_ID_PREFIX,
    keys: &["name", "url"],
};

pub static THING: Definer = Definer {
    name: "Thing",
    default_type: "",
    id: THING_ID,
    nested_id: THING_ID,
    required: &[],
    cast: object_cast,
    defaults: no_defaults,
    resolve: keep_node,
    merge_relations: no_relations,
};

#[cfg(test)]
mod tests {
    use crate::config::ResolveContext;
    use crate::nodes::define_typed;
    use serde_json::json;

    #[test]
    fn test_unknown_type_is_kept() {
        let ctx = ResolveContext::new("https://example.com/");
        let resolver = define_typed(json!({"@type": "Movie", "name": "Heat"}));
        assert_eq!(resolver.definer().name, "Thing");

        let resolution = resolver.resolve(&ctx);
        let node = resolution.primary().unwrap();
        assert_eq!(node["@type"], "Movie");
        assert!(node["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/#/schema/thing/"));
    }
}
