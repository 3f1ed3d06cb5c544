//! PostalAddress, always inlined

use serde_json::Value;

use crate::node::Node;
use crate::nodes::cast_string_to;
use crate::resolver::{keep_node, no_defaults, no_relations, Definer, IdStrategy};

pub static POSTAL_ADDRESS: Definer = Definer {
    name: "PostalAddress",
    default_type: "PostalAddress",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &[],
    cast: cast_address,
    defaults: no_defaults,
    resolve: keep_node,
    merge_relations: no_relations,
};

fn cast_address(value: &Value) -> Option<Node> {
    cast_string_to(value, "streetAddress")
}
