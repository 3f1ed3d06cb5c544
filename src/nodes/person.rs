//! Person
//!
//! Registered directly, a person takes the `#identity` role. Extracted from
//! another node (article authors, reviewers) it gets a name-hashed id so the
//! same person mentioned twice collapses into one node.

use serde_json::Value;

use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{cast_string_to, image, organization, resolve_urls};
use crate::resolver::{no_defaults, Definer, IdStrategy, ResolveScope};
use crate::vocab::{IDENTITY_ID, PERSON_ID_PREFIX};

pub static PERSON: Definer = Definer {
    name: "Person",
    default_type: "Person",
    id: IdStrategy::Fixed {
        scope: IdScope::Host,
        fragment: IDENTITY_ID,
    },
    nested_id: IdStrategy::Hashed {
        scope: IdScope::Host,
        prefix: PERSON_ID_PREFIX,
        keys: &["name", "url"],
    },
    required: &["name"],
    cast: cast_person,
    defaults: no_defaults,
    resolve: resolve_person,
    merge_relations: organization::merge_identity,
};

fn cast_person(value: &Value) -> Option<Node> {
    cast_string_to(value, "name")
}

fn resolve_person(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url", "sameAs"], scope.ctx.host());
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    node
}
