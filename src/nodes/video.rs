//! VideoObject

use serde_json::Value;

use crate::config::opt_value;
use crate::date::{coerce_fields, to_iso};
use crate::id::IdScope;
use crate::node::{set_if_empty, Node};
use crate::nodes::{cast_string_to, image, resolve_urls};
use crate::resolver::{no_defaults, no_relations, Definer, IdStrategy, ResolveScope};
use crate::vocab::VIDEO_ID_PREFIX;

const VIDEO_ID: IdStrategy = IdStrategy::Hashed {
    scope: IdScope::Host,
    prefix: VIDEO_ID_PREFIX,
    keys: &["contentUrl", "embedUrl", "name"],
};

pub static VIDEO: Definer = Definer {
    name: "VideoObject",
    default_type: "VideoObject",
    id: VIDEO_ID,
    nested_id: VIDEO_ID,
    required: &["name", "thumbnailUrl", "uploadDate"],
    cast: cast_video,
    defaults: no_defaults,
    resolve: resolve_video,
    merge_relations: no_relations,
};

fn cast_video(value: &Value) -> Option<Node> {
    cast_string_to(value, "contentUrl")
}

fn resolve_video(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let host = scope.ctx.host();
    resolve_urls(&mut node, &["contentUrl", "embedUrl", "url"], host);
    coerce_fields(&mut node, &["uploadDate"], to_iso);

    // thumbnails stay plain urls, the form search engines require
    if let Some(slot) = node.get_mut("thumbnailUrl") {
        if let Value::Object(thumbnail) = slot {
            let url = thumbnail.get("url").cloned().unwrap_or(Value::Null);
            *slot = url;
        }
    }
    resolve_urls(&mut node, &["thumbnailUrl"], host);

    if node.contains_key("description") || node.contains_key("caption") {
        set_if_empty(&mut node, "inLanguage", opt_value(scope.ctx.language()));
    }
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    node
}
