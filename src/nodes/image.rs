//! ImageObject

use serde_json::Value;

use crate::config::opt_value;
use crate::id::IdScope;
use crate::node::{set_if_empty, Node};
use crate::nodes::{cast_string_to, resolve_urls};
use crate::resolver::{no_defaults, no_relations, Definer, IdStrategy, ResolveScope};
use crate::vocab::IMAGE_ID_PREFIX;

const IMAGE_ID: IdStrategy = IdStrategy::Hashed {
    scope: IdScope::Host,
    prefix: IMAGE_ID_PREFIX,
    keys: &["url", "contentUrl"],
};

pub static IMAGE: Definer = Definer {
    name: "ImageObject",
    default_type: "ImageObject",
    id: IMAGE_ID,
    nested_id: IMAGE_ID,
    required: &["url"],
    cast: cast_image,
    defaults: no_defaults,
    resolve: resolve_image,
    merge_relations: no_relations,
};

fn cast_image(value: &Value) -> Option<Node> {
    cast_string_to(value, "url")
}

fn resolve_image(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url", "contentUrl"], scope.ctx.host());

    if let Some(url) = node.get("url").cloned() {
        set_if_empty(&mut node, "contentUrl", url);
    }
    if node.contains_key("caption") {
        set_if_empty(&mut node, "inLanguage", opt_value(scope.ctx.language()));
    }
    node
}
