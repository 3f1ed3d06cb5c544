//! HowTo and HowToStep

use serde_json::Value;

use crate::config::{opt_value, ResolveContext};
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{cast_string_to, image, link_to, resolve_urls, video};
use crate::resolver::{
    no_defaults, no_relations, object_cast, Definer, Graph, IdStrategy, ResolveScope,
};
use crate::vocab::{HOWTO_ID, WEBPAGE_ID};

pub static HOW_TO: Definer = Definer {
    name: "HowTo",
    default_type: "HowTo",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: HOWTO_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: HOWTO_ID,
    },
    required: &["name", "step"],
    cast: object_cast,
    defaults: how_to_defaults,
    resolve: resolve_how_to,
    merge_relations: merge_how_to,
};

pub static HOW_TO_STEP: Definer = Definer {
    name: "HowToStep",
    default_type: "HowToStep",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["text"],
    cast: cast_step,
    defaults: no_defaults,
    resolve: resolve_step,
    merge_relations: no_relations,
};

fn cast_step(value: &Value) -> Option<Node> {
    cast_string_to(value, "text")
}

fn how_to_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("name".to_string(), opt_value(ctx.meta.title.as_deref()));
    node.insert(
        "description".to_string(),
        opt_value(ctx.meta.description.as_deref()),
    );
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_how_to(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    scope.resolve_field(&mut node, "video", &video::VIDEO, true);
    scope.resolve_field(&mut node, "step", &HOW_TO_STEP, false);
    node
}

fn resolve_step(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    resolve_urls(&mut node, &["url"], scope.ctx.host());
    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    node
}

fn merge_how_to(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_to(graph, idx, "mainEntityOfPage", WEBPAGE_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_how_to;
    use serde_json::json;

    #[test]
    fn test_steps_are_inlined() {
        let ctx = ResolveContext::new("https://example.com/")
            .with_url("https://example.com/guides/tie");
        let resolution = define_how_to(json!({
            "name": "Tie a knot",
            "step": ["Loop", {"text": "Pull", "url": "/guides/tie#pull", "image": "/pull.png"}]
        }))
        .resolve(&ctx);

        let how_to = resolution.primary().unwrap();
        assert_eq!(how_to["@id"], "https://example.com/guides/tie#howto");
        assert_eq!(how_to["step"][0], json!({"@type": "HowToStep", "text": "Loop"}));
        assert_eq!(how_to["step"][1]["url"], "https://example.com/guides/tie#pull");

        let image_id = how_to["step"][1]["image"]["@id"].as_str().unwrap();
        assert!(resolution.nodes.iter().any(|r| r.node["@id"] == image_id));
    }
}
