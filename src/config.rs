//! Resolution context: canonical urls, page metadata and options
//!
//! Supplied by the host environment for every resolution pass. All
//! structs deserialize from the camelCase JSON bag hosts already produce.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::IdScope;

/// Options shared by every node of a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaOrgOptions {
    /// Fills `inLanguage` on pages, articles and other creative works
    pub default_language: Option<String>,
    /// Fills `priceCurrency` on offers
    pub default_currency: Option<String>,
}

/// Page metadata supplied by the host's router
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
    /// Arbitrary extra metadata, kept for host-defined definers
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything a resolution pass may read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveContext {
    /// Site origin, e.g. `https://example.com/`
    pub canonical_host: String,
    /// Url of the current page; falls back to the host when empty
    pub canonical_url: String,
    pub meta: PageMeta,
    pub options: SchemaOrgOptions,
    /// Resolution pass this context belongs to
    #[serde(skip)]
    pub(crate) pass: u64,
}

impl ResolveContext {
    pub fn new(canonical_host: impl Into<String>) -> Self {
        Self {
            canonical_host: canonical_host.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, canonical_url: impl Into<String>) -> Self {
        self.canonical_url = canonical_url.into();
        self
    }

    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_options(mut self, options: SchemaOrgOptions) -> Self {
        self.options = options;
        self
    }

    pub fn host(&self) -> &str {
        &self.canonical_host
    }

    /// The page url, or the host for contexts describing the home page
    pub fn url(&self) -> &str {
        if self.canonical_url.is_empty() {
            &self.canonical_host
        } else {
            &self.canonical_url
        }
    }

    /// Base for ids of the given scope
    pub fn base(&self, scope: IdScope) -> &str {
        match scope {
            IdScope::Host => self.host(),
            IdScope::Url => self.url(),
        }
    }

    /// Whether the current page is the site's home page
    pub fn is_home_page(&self) -> bool {
        trim_slash(self.url()) == trim_slash(self.host())
    }

    pub fn language(&self) -> Option<&str> {
        self.options.default_language.as_deref()
    }

    pub fn currency(&self) -> Option<&str> {
        self.options.default_currency.as_deref()
    }

    pub(crate) fn for_pass(&self, pass: u64) -> Self {
        let mut ctx = self.clone();
        ctx.pass = pass;
        ctx
    }
}

fn trim_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Convert an optional string into a JSON value (`null` when absent)
pub(crate) fn opt_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_falls_back_to_host() {
        let ctx = ResolveContext::new("https://example.com/");
        assert_eq!(ctx.url(), "https://example.com/");
        assert!(ctx.is_home_page());

        let page = ctx.with_url("https://example.com/blog");
        assert_eq!(page.url(), "https://example.com/blog");
        assert!(!page.is_home_page());
    }

    #[test]
    fn test_home_page_ignores_trailing_slash() {
        let ctx = ResolveContext::new("https://example.com").with_url("https://example.com/");
        assert!(ctx.is_home_page());
    }

    #[test]
    fn test_deserialize_context_bag() {
        let ctx: ResolveContext = serde_json::from_value(json!({
            "canonicalHost": "https://example.com/",
            "canonicalUrl": "https://example.com/about",
            "meta": {"title": "About", "datePublished": "2024-01-02", "section": "company"},
            "options": {"defaultLanguage": "en-US", "defaultCurrency": "EUR"}
        }))
        .unwrap();

        assert_eq!(ctx.host(), "https://example.com/");
        assert_eq!(ctx.meta.title.as_deref(), Some("About"));
        assert_eq!(ctx.meta.date_published.as_deref(), Some("2024-01-02"));
        assert_eq!(ctx.meta.extra.get("section"), Some(&json!("company")));
        assert_eq!(ctx.language(), Some("en-US"));
        assert_eq!(ctx.currency(), Some("EUR"));
    }
}
