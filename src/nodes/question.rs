//! Question and Answer
//!
//! Questions on an FAQ page are collected into the page's `mainEntity`.
//! The shorthand `{question, answer}` is accepted alongside the schema.org
//! `{name, acceptedAnswer}` form.

use serde_json::Value;

use crate::config::{opt_value, ResolveContext};
use crate::id::IdScope;
use crate::node::{push_unique, set_if_empty, Node};
use crate::nodes::{cast_string_to, reference_to};
use crate::resolver::{no_defaults, no_relations, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{QUESTION_ID_PREFIX, WEBPAGE_ID};

const QUESTION_ID: IdStrategy = IdStrategy::Hashed {
    scope: IdScope::Url,
    prefix: QUESTION_ID_PREFIX,
    keys: &["name", "question"],
};

pub static QUESTION: Definer = Definer {
    name: "Question",
    default_type: "Question",
    id: QUESTION_ID,
    nested_id: QUESTION_ID,
    required: &["name", "acceptedAnswer"],
    cast: cast_question,
    defaults: question_defaults,
    resolve: resolve_question,
    merge_relations: merge_question,
};

pub static ANSWER: Definer = Definer {
    name: "Answer",
    default_type: "Answer",
    id: IdStrategy::None,
    nested_id: IdStrategy::None,
    required: &["text"],
    cast: cast_answer,
    defaults: no_defaults,
    resolve: resolve_answer,
    merge_relations: no_relations,
};

fn cast_question(value: &Value) -> Option<Node> {
    cast_string_to(value, "name").map(normalize_aliases)
}

fn cast_answer(value: &Value) -> Option<Node> {
    cast_string_to(value, "text")
}

/// Rename `question`/`answer` to `name`/`acceptedAnswer`, keeping explicit values
fn normalize_aliases(mut node: Node) -> Node {
    for (alias, key) in [("question", "name"), ("answer", "acceptedAnswer")] {
        if let Some(value) = node.remove(alias) {
            set_if_empty(&mut node, key, value);
        }
    }
    node
}

fn question_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_question(node: Node, scope: &mut ResolveScope<'_>) -> Node {
    let mut node = normalize_aliases(node);
    scope.resolve_field(&mut node, "acceptedAnswer", &ANSWER, false);
    node
}

fn resolve_answer(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    set_if_empty(&mut node, "inLanguage", opt_value(scope.ctx.language()));
    node
}

fn merge_question(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    let Some(page) = graph.find(WEBPAGE_ID) else {
        return;
    };
    if !graph.has_type(WEBPAGE_ID, "FAQPage") {
        return;
    }
    if let Some(reference) = reference_to(graph, idx) {
        push_unique(graph.node_mut(page), "mainEntity", reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::define_question;
    use serde_json::json;

    #[test]
    fn test_question_aliases() {
        let ctx =
            ResolveContext::new("https://example.com/").with_url("https://example.com/faq");
        let resolution = define_question(json!({
            "question": "What is this?",
            "answer": "A test."
        }))
        .resolve(&ctx);

        let question = resolution.primary().unwrap();
        assert!(question.get("question").is_none());
        assert_eq!(question["name"], "What is this?");
        assert_eq!(
            question["acceptedAnswer"],
            json!({"@type": "Answer", "text": "A test."})
        );
        assert!(question["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/faq#/schema/question/"));
    }

    #[test]
    fn test_same_question_same_id() {
        let ctx = ResolveContext::new("https://example.com/");
        let a = define_question(json!({"name": "Why?", "acceptedAnswer": "Because."}));
        let b = define_question(json!({"question": "Why?", "answer": "Because."}));
        let (a, b) = (a.resolve(&ctx), b.resolve(&ctx));
        assert_eq!(a.primary().unwrap()["@id"], b.primary().unwrap()["@id"]);
    }
}
