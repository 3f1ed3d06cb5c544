//! Registration of pending nodes
//!
//! A [`GraphContext`] owns every resolver registered for the current page,
//! each tagged with the [`ContextId`] of the call site that registered it so
//! that call site can later withdraw all of its nodes at once.

use std::cell::Cell;
use std::fmt;

use serde_json::Value;
use ulid::Ulid;

use crate::config::ResolveContext;
use crate::error::SchemaOrgError;
use crate::graph::{resolve_graph, ResolvedGraph};
use crate::node::Node;
use crate::nodes::define_typed;
use crate::render::{render_graph, RenderOptions};
use crate::resolver::NodeResolver;

/// Opaque id of a registering call site
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextId(String);

impl ContextId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh, unique id
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContextId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContextId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ContextId> for ContextId {
    fn from(id: &ContextId) -> Self {
        id.clone()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolvers handed to [`GraphContext::add_node`] in one call
#[derive(Debug, Default)]
pub struct PendingBatch(Vec<NodeResolver>);

impl PendingBatch {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<NodeResolver> for PendingBatch {
    fn from(resolver: NodeResolver) -> Self {
        Self(vec![resolver])
    }
}

impl From<Vec<NodeResolver>> for PendingBatch {
    fn from(resolvers: Vec<NodeResolver>) -> Self {
        Self(resolvers)
    }
}

impl From<Node> for PendingBatch {
    fn from(node: Node) -> Self {
        Self(vec![define_typed(node)])
    }
}

/// Raw JSON: an object or an array of objects, each routed by its `@type`.
/// Anything else is skipped.
impl From<Value> for PendingBatch {
    fn from(value: Value) -> Self {
        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        Self(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(node) => Some(define_typed(node)),
                    other => {
                        tracing::debug!(value = %other, "skipping non-object node input");
                        None
                    }
                })
                .collect(),
        )
    }
}

/// Every pending registration plus the resolve context of the current page
#[derive(Debug, Default)]
pub struct GraphContext {
    entries: Vec<(ContextId, NodeResolver)>,
    context: ResolveContext,
    passes: Cell<u64>,
}

impl GraphContext {
    pub fn new(context: ResolveContext) -> Self {
        Self {
            entries: Vec::new(),
            context,
            passes: Cell::new(0),
        }
    }

    /// Register nodes under `ctx_id`; returns how many resolvers were added
    pub fn add_node(&mut self, input: impl Into<PendingBatch>, ctx_id: impl Into<ContextId>) -> usize {
        let PendingBatch(resolvers) = input.into();
        let ctx_id = ctx_id.into();
        let added = resolvers.len();
        self.entries
            .extend(resolvers.into_iter().map(|r| (ctx_id.clone(), r)));
        added
    }

    /// Register a list of resolvers under `ctx_id`
    pub fn register_nodes(
        &mut self,
        resolvers: impl IntoIterator<Item = NodeResolver>,
        ctx_id: impl Into<ContextId>,
    ) -> usize {
        self.add_node(resolvers.into_iter().collect::<Vec<_>>(), ctx_id)
    }

    /// Withdraw everything registered under `ctx_id`; unknown ids are a no-op.
    /// Returns how many resolvers were removed.
    pub fn remove_context(&mut self, ctx_id: impl Into<ContextId>) -> usize {
        let ctx_id = ctx_id.into();
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != ctx_id);
        before - self.entries.len()
    }

    pub fn context(&self) -> &ResolveContext {
        &self.context
    }

    pub fn set_context(&mut self, context: ResolveContext) {
        self.context = context;
    }

    pub(crate) fn context_mut(&mut self) -> &mut ResolveContext {
        &mut self.context
    }

    /// Number of registered resolvers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every registration into a graph.
    ///
    /// Each call is a new pass: computed fields are re-read once and the
    /// registrations themselves are left untouched.
    pub fn generate_schema(&self) -> ResolvedGraph {
        let pass = self.passes.get() + 1;
        self.passes.set(pass);
        let ctx = self.context.for_pass(pass);
        resolve_graph(self.entries.iter().map(|(_, resolver)| resolver), &ctx)
    }

    /// Resolve and serialize in one step
    pub fn render(&self, options: &RenderOptions) -> Result<String, SchemaOrgError> {
        render_graph(&self.generate_schema().nodes, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NodeInput;
    use crate::nodes::{define_organization, define_web_page, define_web_site};
    use serde_json::json;
    use std::rc::Rc;

    fn context() -> GraphContext {
        GraphContext::new(ResolveContext::new("https://example.com/"))
    }

    #[test]
    fn test_context_id_generate_is_unique() {
        assert_ne!(ContextId::generate(), ContextId::generate());
        assert_eq!(ContextId::from("page").as_str(), "page");
    }

    #[test]
    fn test_add_and_remove_context() {
        let mut graph = context();
        graph.add_node(define_web_site(json!({"name": "test"})), "layout");
        graph.register_nodes(
            vec![define_web_page(()), define_organization(json!({"name": "Co"}))],
            "page",
        );
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.generate_schema().nodes.len(), 3);

        assert_eq!(graph.remove_context("page"), 2);
        assert_eq!(graph.remove_context("page"), 0);
        assert_eq!(graph.remove_context("unknown"), 0);

        let resolved = graph.generate_schema();
        assert_eq!(resolved.nodes.len(), 1);
        assert!(resolved.nodes[0].get("publisher").is_none());
    }

    #[test]
    fn test_raw_json_is_routed_by_type() {
        let mut graph = context();
        let added = graph.add_node(
            json!([
                {"@type": "WebSite", "name": "test"},
                {"@type": "Organization", "name": "Co"},
                "not a node"
            ]),
            ContextId::generate(),
        );
        assert_eq!(added, 2);

        let resolved = graph.generate_schema();
        let site = &resolved.nodes[0];
        assert_eq!(site["@id"], "https://example.com/#website");
        assert_eq!(site["publisher"], json!({"@id": "https://example.com/#identity"}));
    }

    #[test]
    fn test_computed_fields_are_read_once_per_pass() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let input = NodeInput::new().computed("name", move || {
            counter.set(counter.get() + 1);
            json!(format!("title {}", counter.get()))
        });

        let mut graph = context();
        graph.add_node(define_web_site(input), "layout");

        assert_eq!(graph.generate_schema().nodes[0]["name"], "title 1");
        assert_eq!(calls.get(), 1);
        assert_eq!(graph.generate_schema().nodes[0]["name"], "title 2");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_render() {
        let mut graph = context();
        graph.add_node(define_web_site(json!({"name": "test"})), "layout");
        let output = graph.render(&RenderOptions::default()).unwrap();
        assert_eq!(
            output,
            r#"{"@context":"https://schema.org","@id":"https://example.com/#website","@type":"WebSite","name":"test","url":"https://example.com/"}"#
        );
    }
}
