//! Article and its subtypes (BlogPosting, NewsArticle, TechArticle, ...)

use serde_json::Value;

use crate::config::{opt_value, ResolveContext};
use crate::date::{coerce_fields, to_iso};
use crate::id::IdScope;
use crate::node::{extract_id, set_if_empty, Node};
use crate::nodes::{image, link_to, organization, person, resolve_urls};
use crate::resolver::{object_cast, Definer, Graph, IdStrategy, ResolveScope};
use crate::vocab::{ARTICLE_ID, HEADLINE_MAX_CHARS, IDENTITY_ID, WEBPAGE_ID};

pub static ARTICLE: Definer = Definer {
    name: "Article",
    default_type: "Article",
    id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: ARTICLE_ID,
    },
    nested_id: IdStrategy::Fixed {
        scope: IdScope::Url,
        fragment: ARTICLE_ID,
    },
    required: &["headline", "image", "author"],
    cast: object_cast,
    defaults: article_defaults,
    resolve: resolve_article,
    merge_relations: merge_article,
};

/// Cut a headline to at most [`HEADLINE_MAX_CHARS`] characters, preferring
/// the last word boundary inside the limit
pub fn truncate_headline(headline: &str) -> String {
    if headline.chars().count() <= HEADLINE_MAX_CHARS {
        return headline.to_string();
    }
    let cut: String = headline.chars().take(HEADLINE_MAX_CHARS).collect();
    let next_is_break = headline
        .chars()
        .nth(HEADLINE_MAX_CHARS)
        .is_some_and(char::is_whitespace);
    if next_is_break {
        return cut.trim_end().to_string();
    }
    match cut.rfind(char::is_whitespace) {
        Some(pos) => cut[..pos].trim_end().to_string(),
        None => cut,
    }
}

fn article_defaults(ctx: &ResolveContext) -> Node {
    let mut node = Node::new();
    node.insert("headline".to_string(), opt_value(ctx.meta.title.as_deref()));
    node.insert(
        "description".to_string(),
        opt_value(ctx.meta.description.as_deref()),
    );
    node.insert("image".to_string(), opt_value(ctx.meta.image.as_deref()));
    node.insert(
        "datePublished".to_string(),
        opt_value(ctx.meta.date_published.as_deref()),
    );
    node.insert(
        "dateModified".to_string(),
        opt_value(ctx.meta.date_modified.as_deref()),
    );
    node.insert("inLanguage".to_string(), opt_value(ctx.language()));
    node
}

fn resolve_article(mut node: Node, scope: &mut ResolveScope<'_>) -> Node {
    if let Some(Value::String(headline)) = node.get_mut("headline") {
        *headline = truncate_headline(headline);
    }
    coerce_fields(&mut node, &["datePublished", "dateModified"], to_iso);
    resolve_urls(&mut node, &["url", "thumbnailUrl"], scope.ctx.host());

    scope.resolve_field(&mut node, "image", &image::IMAGE, true);
    scope.resolve_field(&mut node, "author", &person::PERSON, true);
    scope.resolve_field(&mut node, "publisher", &organization::ORGANIZATION, true);

    let thumbnail = first_reference(node.get("image"))
        .and_then(|id| scope.extracted(&id))
        .and_then(|img| img.get("url").cloned());
    if let Some(url) = thumbnail {
        set_if_empty(&mut node, "thumbnailUrl", url);
    }
    node
}

fn first_reference(value: Option<&Value>) -> Option<String> {
    let first = match value? {
        Value::Array(items) => items.first()?,
        other => other,
    };
    first
        .as_object()
        .and_then(extract_id)
        .map(String::from)
}

fn merge_article(idx: usize, graph: &mut Graph, _: &ResolveContext) {
    if link_to(graph, idx, "isPartOf", WEBPAGE_ID) {
        link_to(graph, idx, "mainEntityOfPage", WEBPAGE_ID);

        let article = graph.node(idx);
        let published = article.get("datePublished").cloned();
        let modified = article.get("dateModified").cloned();
        if let Some(page) = graph.find(WEBPAGE_ID) {
            let page = graph.node_mut(page);
            if let Some(date) = published {
                set_if_empty(page, "datePublished", date);
            }
            if let Some(date) = modified {
                set_if_empty(page, "dateModified", date);
            }
        }
    }

    link_to(graph, idx, "publisher", IDENTITY_ID);
    link_to(graph, idx, "author", IDENTITY_ID);
}
