//! Identifier classification and resolution
//!
//! Turns relative fragments (`#webpage`) and root-relative paths into
//! fully-qualified `@id`s against the canonical host or page URL, and
//! derives stable content-hash ids for non-singleton entities.

use serde_json::{json, Map, Value};
use url::Url;

use crate::vocab::{
    ARTICLE_ID, BREADCRUMB_ID, COMMENT_ID_PREFIX, CREATIVE_WORK_ID_PREFIX, EVENT_ID, HOWTO_ID,
    PRODUCT_ID, QUESTION_ID_PREFIX, RECIPE_ID, SOFTWARE_APP_ID, WEBPAGE_ID,
};

/// Classification of an `@id` or url string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Fragment identifier: "#webpage", "#/schema/person/abc"
    Fragment,
    /// Relative path: "/about", "about", "./team"
    Relative,
    /// Absolute URI: "https://...", "urn:...", "mailto:..."
    Absolute,
}

/// Which base an id is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScope {
    /// Site-level entities: website, identity, logo, people, images
    Host,
    /// Page-level entities: webpage, article, breadcrumb, questions
    Url,
}

impl IdScope {
    /// Scope a well-known fragment belongs to.
    ///
    /// Used to resolve user-authored references such as `{"@id": "#webpage"}`
    /// to the same absolute id the referenced node will receive.
    pub fn for_fragment(fragment: &str) -> Self {
        const PAGE_IDS: [&str; 8] = [
            WEBPAGE_ID,
            BREADCRUMB_ID,
            ARTICLE_ID,
            PRODUCT_ID,
            RECIPE_ID,
            HOWTO_ID,
            EVENT_ID,
            SOFTWARE_APP_ID,
        ];
        const PAGE_PREFIXES: [&str; 3] =
            [QUESTION_ID_PREFIX, COMMENT_ID_PREFIX, CREATIVE_WORK_ID_PREFIX];

        if PAGE_IDS.contains(&fragment) || PAGE_PREFIXES.iter().any(|p| fragment.starts_with(p)) {
            IdScope::Url
        } else {
            IdScope::Host
        }
    }
}

/// Check whether a string carries a scheme
pub fn has_protocol(id: &str) -> bool {
    id.contains("://")
        || id.starts_with("urn:")
        || id.starts_with("mailto:")
        || id.starts_with("tel:")
        || id.starts_with("data:")
}

/// Classify an `@id` string
pub fn classify_id(id: &str) -> IdKind {
    if has_protocol(id) {
        IdKind::Absolute
    } else if id.starts_with('#') {
        IdKind::Fragment
    } else {
        IdKind::Relative
    }
}

fn is_path(id: &str) -> bool {
    id.starts_with('/') || id.starts_with("./")
}

/// Read a bare relative id (`partner`) as the fragment `#partner`.
///
/// Paths, fragments and absolute ids are returned unchanged.
pub fn as_fragment(id: &str) -> String {
    match classify_id(id) {
        IdKind::Relative if !is_path(id) => format!("#{}", id),
        _ => id.to_string(),
    }
}

/// Prefix a fragment id with `host`.
///
/// Absolute ids are returned unchanged, so prefixing twice is a no-op.
/// Ids without a leading `#` get one, unless they are paths.
pub fn prefix_id(host: &str, id: &str) -> String {
    match classify_id(id) {
        IdKind::Absolute => id.to_string(),
        IdKind::Fragment => join_fragment(host, id),
        IdKind::Relative if is_path(id) => join_path(host, id),
        IdKind::Relative => join_fragment(host, &as_fragment(id)),
    }
}

/// Rewrite a node's relative `@id` in place against `base`.
///
/// Resolves exactly like a reference to the same id, see [`prefix_id`].
pub fn resolve_id(node: &mut Map<String, Value>, base: &str) {
    let Some(Value::String(id)) = node.get("@id") else {
        return;
    };
    if classify_id(id) == IdKind::Absolute {
        return;
    }
    let resolved = prefix_id(base, id);
    node.insert("@id".to_string(), Value::String(resolved));
}

/// Trailing `#fragment` of an id, or the whole id when it has none.
///
/// `https://example.com/#website` and `#website` share the raw id `#website`.
pub fn resolve_raw_id(id: &str) -> &str {
    match id.rfind('#') {
        Some(pos) => &id[pos..],
        None => id,
    }
}

/// Make a root-relative url absolute against `base`.
///
/// Anything that is not a root-relative path (absolute urls, fragments,
/// protocol-relative urls, plain text) is returned unchanged.
pub fn with_base(base: &str, value: &str) -> String {
    if value.starts_with('/') && !value.starts_with("//") {
        join_path(base, value)
    } else {
        value.to_string()
    }
}

/// Apply [`with_base`] to a string value, leaving other values untouched
pub fn value_with_base(base: &str, value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(with_base(base, s)),
        other => other.clone(),
    }
}

/// Short, stable content hash used in generated ids
pub fn hash_key(content: &str) -> String {
    let hash = blake3::hash(content.as_bytes());
    hash.to_hex().as_str()[..8].to_string()
}

/// Build a namespaced content-hash id, e.g. `https://example.com/#/schema/person/1a2b3c4d`
pub fn hashed_id(base: &str, prefix: &str, content: &str) -> String {
    prefix_id(base, &format!("{}{}", prefix, hash_key(content)))
}

/// Build an IdReference pointing at `id`
pub fn id_reference(id: &str) -> Value {
    json!({ "@id": id })
}

/// Check whether a value is a bare IdReference (`{"@id": "..."}`)
pub fn is_id_reference(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj.len() == 1 && matches!(obj.get("@id"), Some(Value::String(_))),
        _ => false,
    }
}

/// Rewrite relative `@id` references within a value (recursive).
///
/// Finds all `{"@id": "..."}` pointers and resolves fragments against the
/// base their target lives under, as chosen by `base_for`.
pub fn resolve_references(value: &mut Value, base_for: &dyn Fn(IdScope) -> String) {
    match value {
        Value::Object(obj) => {
            if obj.len() == 1 {
                if let Some(Value::String(id)) = obj.get("@id") {
                    if classify_id(id) != IdKind::Absolute {
                        let scope = IdScope::for_fragment(resolve_raw_id(&as_fragment(id)));
                        let resolved = prefix_id(&base_for(scope), id);
                        obj.insert("@id".to_string(), Value::String(resolved));
                    }
                    return;
                }
            }
            for (key, v) in obj.iter_mut() {
                if key != "@id" && key != "@type" {
                    resolve_references(v, base_for);
                }
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                resolve_references(item, base_for);
            }
        }
        _ => {}
    }
}

fn join_fragment(base: &str, fragment: &str) -> String {
    if base.is_empty() {
        return fragment.to_string();
    }
    match Url::parse(base) {
        Ok(mut url) => {
            url.set_fragment(Some(fragment.trim_start_matches('#')));
            url.to_string()
        }
        Err(_) => {
            let without_fragment = base.split('#').next().unwrap_or(base);
            format!("{}{}", without_fragment, fragment)
        }
    }
}

fn join_path(base: &str, path: &str) -> String {
    if base.is_empty() {
        return path.to_string();
    }
    match Url::parse(base).and_then(|url| url.join(path)) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches("./").trim_start_matches('/')
        ),
    }
}
