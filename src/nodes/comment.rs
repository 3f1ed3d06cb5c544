//! Comment

use serde_json::Value;

use crate::config::ResolveContext;
use crate::date::{coerce_fields, to_iso};
use crate::id::IdScope;
use crate::node::Node;
use crate::nodes::{cast_string_to, link_to, person};
use crate::resolver::{no_defaults, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{ARTICLE_ID, COMMENT_ID_PREFIX};

const COMMENT_ID: IdStrategy = IdStrategy::Hashed {
    scope: IdScope::Url,
    prefix: COMMENT_ID_PREFIX,
    keys: &["text"],
};

pub static COMMENT: Definer = Definer {
    name: "Comment",
    default_type: "Comment",
    id: COMMENT_ID,
    nested_id: COMMENT_ID,
    required: &["text", "author"],
    cast: cast_comment,
    defaults: no_defaults,
    resolve: resolve_comment,
    merge_relations: merge_comment,
};

fn cast_comment(value: &Value) -> Option<Node> {
    cast_string_to(value, "text")
}

fn resolve_comment(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    coerce_fields(&mut node, &["dateCreated", "datePublished"], to_iso);
    scope.resolve_field(&mut node, "author", &person::PERSON, true);
    node
}

fn merge_comment(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    link_to(graph, idx, "about", ARTICLE_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_comment;
    use serde_json::json;

    #[test]
    fn test_comment_author_is_extracted() {
        let ctx =
            ResolveContext::new("https://example.com/").with_url("https://example.com/post");
        let resolution =
            define_comment(json!({"text": "Nice", "author": "Sam"})).resolve(&ctx);

        let comment = resolution.primary().unwrap();
        assert!(comment["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/post#/schema/comment/"));
        assert_eq!(resolution.nodes[1].node["name"], "Sam");
        assert_eq!(comment["author"]["@id"], resolution.nodes[1].node["@id"]);
    }
}
