//! CreativeWork, the generic fallback for works without a dedicated definer

use crate::config::{opt_value, ResolveContext};
use crate::date::{coerce_fields, to_iso};
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{image, organization, person, resolve_urls};
use crate::resolver::{no_relations, object_cast, Definer, IdStrategy, ResolveScope};
use crate::vocab::CREATIVE_WORK_ID_PREFIX;

const CREATIVE_WORK_ID: IdStrategy = IdStrategy::Hashed {
    scope: IdScope::Url,
    prefix: CREATIVE_WORK_ID_PREFIX,
    keys: &["name", "url"],
};

pub static CREATIVE_WORK: Definer = Definer {
    name: "CreativeWork",
    default_type: "CreativeWork",
    id: CREATIVE_WORK_ID,
    nested_id: CREATIVE_WORK_ID,
    required: &[],
    cast: object_cast,
    defaults: creative_work_defaults,
    resolve: resolve_creative_work,
    merge_relations: no_relations,
};

fn creative_work_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_creative_work(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url"], scope.ctx.host());
    coerce_fields(
        &mut node,
        &["dateCreated", "datePublished", "dateModified"],
        to_iso,
    );
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    scope.resolve_field(&mut node, "author", &person::PERSON, true);
    scope.resolve_field(&mut node, "publisher", &organization::ORGANIZATION, true);
    node
}
