//! Route changes
//!
//! On client-side navigation the host swaps the page metadata and replaces
//! the nodes of the page it left, so nothing from the previous route leaks
//! into the next graph.

use serde::{Deserialize, Serialize};

use crate::config::PageMeta;
use crate::context::{ContextId, GraphContext, PendingBatch};
use crate::id::with_base;

/// The route a host is rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    /// Path relative to the canonical host, e.g. `/blog/post`
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn meta(&self) -> PageMeta {
        PageMeta {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            date_published: self.date_published.clone(),
            date_modified: self.date_modified.clone(),
            ..Default::default()
        }
    }
}

impl GraphContext {
    /// Point the context at `route`: new canonical url, new page metadata
    pub fn navigate(&mut self, route: &Route) {
        let ctx = self.context_mut();
        let path = if route.path.starts_with('/') {
            route.path.clone()
        } else {
            format!("/{}", route.path)
        };
        ctx.canonical_url = with_base(&ctx.canonical_host, &path);
        ctx.meta = route.meta();
        tracing::debug!(url = %ctx.canonical_url, "navigated");
    }

    /// Remove everything under `ctx_id`, then register `batch` under it
    pub fn replace_context(
        &mut self,
        ctx_id: impl Into<ContextId>,
        batch: impl Into<PendingBatch>,
    ) -> usize {
        let ctx_id = ctx_id.into();
        self.remove_context(&ctx_id);
        self.add_node(batch, ctx_id)
    }
}
