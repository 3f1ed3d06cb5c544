//! Lazy node resolvers and the per-pass working graph
//!
//! A [`Definer`] describes one Schema.org type as a table of functions.
//! A [`NodeResolver`] pairs a definer with caller input and memoizes its
//! [`Resolution`]. The [`Graph`] is the arena that relation merging runs
//! against: resolved nodes plus an index from raw fragment id to position.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::config::ResolveContext;
use crate::error::ResolveWarning;
use crate::id::{
    as_fragment, classify_id, hashed_id, id_reference, is_id_reference, prefix_id, resolve_id,
    resolve_raw_id, resolve_references, with_base, IdKind, IdScope,
};
use crate::input::NodeInput;
use crate::node::{
    apply_defaults, extract_id, has_type, is_empty_value, lead_with_id_and_type, primary_type,
    resolve_default_type, Node,
};

/// Produces default field values from the pass context
pub type DefaultsFn = fn(&ResolveContext) -> Node;
/// Normalizes one node; may resolve nested relations through the scope
pub type ResolveFn = fn(Node, &mut ResolveScope<'_>) -> Node;
/// Cross-links the node at an index with its siblings
pub type MergeFn = fn(usize, &mut Graph, &ResolveContext);
/// Turns shorthand input (usually a string) into a node
pub type CastFn = fn(&Value) -> Option<Node>;

/// How a node receives its `@id` when the caller gave none
#[derive(Debug, Clone, Copy)]
pub enum IdStrategy {
    /// Inline value, no id
    None,
    /// Singleton role, e.g. `#webpage`
    Fixed {
        scope: IdScope,
        fragment: &'static str,
    },
    /// Content hash of the first present key field
    Hashed {
        scope: IdScope,
        prefix: &'static str,
        keys: &'static [&'static str],
    },
}

impl IdStrategy {
    fn scope(&self) -> Option<IdScope> {
        match self {
            IdStrategy::None => None,
            IdStrategy::Fixed { scope, .. } | IdStrategy::Hashed { scope, .. } => Some(*scope),
        }
    }

    fn generate(&self, node: &Node, ctx: &ResolveContext) -> Option<String> {
        match self {
            IdStrategy::None => None,
            IdStrategy::Fixed { scope, fragment } => Some(prefix_id(ctx.base(*scope), fragment)),
            IdStrategy::Hashed {
                scope,
                prefix,
                keys,
            } => {
                // url keys hash the same whether given root-relative or absolute
                let content = keys
                    .iter()
                    .find_map(|k| node.get(*k).and_then(hash_content))
                    .map(|content| with_base(ctx.host(), &content))
                    .unwrap_or_else(|| Value::Object(node.clone()).to_string());
                Some(hashed_id(ctx.base(*scope), prefix, &content))
            }
        }
    }
}

fn hash_content(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(arr) => arr.first().and_then(hash_content),
        Value::Object(obj) => obj.get("url").or_else(|| obj.get("@id")).and_then(hash_content),
        _ => None,
    }
}

/// One Schema.org type: defaults, resolve and relation-merge steps
pub struct Definer {
    /// Registry name, e.g. "Article"
    pub name: &'static str,
    /// Always the first `@type`; empty keeps the input's own types
    pub default_type: &'static str,
    /// Id for nodes registered directly
    pub id: IdStrategy,
    /// Id for nodes extracted from another node's field
    pub nested_id: IdStrategy,
    pub required: &'static [&'static str],
    pub cast: CastFn,
    pub defaults: DefaultsFn,
    pub resolve: ResolveFn,
    pub merge_relations: MergeFn,
}

impl std::fmt::Debug for Definer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Definer").field("name", &self.name).finish()
    }
}

impl Definer {
    /// Required fields absent (or empty) on `node`
    pub fn missing_required(&self, node: &Node) -> Vec<ResolveWarning> {
        self.required
            .iter()
            .filter(|field| node.get(**field).map_or(true, is_empty_value))
            .map(|field| ResolveWarning::MissingRequiredField {
                node_type: primary_type(node).unwrap_or_else(|| self.name.to_string()),
                id: extract_id(node).unwrap_or("(no id)").to_string(),
                field: field.to_string(),
            })
            .collect()
    }
}

pub fn object_cast(value: &Value) -> Option<Node> {
    value.as_object().cloned()
}

pub fn no_defaults(_: &ResolveContext) -> Node {
    Node::new()
}

pub fn keep_node(node: Node, _: &mut ResolveScope<'_>) -> Node {
    node
}

pub fn no_relations(_: usize, _: &mut Graph, _: &ResolveContext) {}

/// A resolved node tagged with the definer that produced it
#[derive(Debug, Clone)]
pub struct ResolvedNode {
    pub node: Node,
    pub definer: &'static Definer,
}

/// Output of one resolver: its primary node followed by extracted
/// sub-entities (images, people, ...), plus inline-node diagnostics
#[derive(Debug, Default)]
pub struct Resolution {
    pub nodes: Vec<ResolvedNode>,
    pub warnings: Vec<ResolveWarning>,
}

impl Resolution {
    pub fn primary(&self) -> Option<&Node> {
        self.nodes.first().map(|r| &r.node)
    }
}

/// Where a node sits: registered directly or pulled out of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Root,
    Nested,
}

/// Mutable state threaded through one resolver's resolve step
pub struct ResolveScope<'a> {
    pub ctx: &'a ResolveContext,
    extracted: Vec<ResolvedNode>,
    warnings: Vec<ResolveWarning>,
}

impl<'a> ResolveScope<'a> {
    fn new(ctx: &'a ResolveContext) -> Self {
        Self {
            ctx,
            extracted: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Resolve a related value with `definer`.
    ///
    /// Arrays are resolved element-wise and IdReferences pass through
    /// untouched. With `root` set, the resolved node is registered as an
    /// independent graph node and replaced by a reference to it; otherwise
    /// it is inlined.
    pub fn relation(&mut self, value: Value, definer: &'static Definer, root: bool) -> Value {
        self.relation_with(value, definer, root, |_, _| {})
    }

    /// [`relation`](Self::relation) with a hook run on each resolved node
    pub fn relation_with(
        &mut self,
        value: Value,
        definer: &'static Definer,
        root: bool,
        after: impl Fn(&mut Node, &ResolveContext) + Copy,
    ) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.relation_with(item, definer, root, after))
                    .filter(|v| !v.is_null())
                    .collect(),
            ),
            v if is_id_reference(&v) => v,
            v => match (definer.cast)(&v) {
                None => v,
                Some(input) => {
                    let mut node = resolve_node(definer, input, self, Position::Nested);
                    after(&mut node, self.ctx);
                    match extract_id(&node).map(String::from) {
                        Some(id) if root => {
                            self.extracted.push(ResolvedNode { node, definer });
                            id_reference(&id)
                        }
                        _ => {
                            self.warnings.extend(definer.missing_required(&node));
                            Value::Object(node)
                        }
                    }
                }
            },
        }
    }

    /// Resolve the value at `key` in place, dropping the key when it resolves to nothing
    pub fn resolve_field(&mut self, node: &mut Node, key: &str, definer: &'static Definer, root: bool) {
        if let Some(slot) = node.get_mut(key) {
            let value = std::mem::take(slot);
            *slot = self.relation(value, definer, root);
            if slot.is_null() {
                node.remove(key);
            }
        }
    }

    /// Look up a node extracted earlier in this resolve step
    pub fn extracted(&self, id: &str) -> Option<&Node> {
        self.extracted
            .iter()
            .map(|r| &r.node)
            .find(|n| extract_id(n) == Some(id))
    }
}

/// Run the full single-node pipeline: defaults, type, id, type-specific
/// resolve, then reference resolution.
pub fn resolve_node(
    definer: &'static Definer,
    mut node: Node,
    scope: &mut ResolveScope<'_>,
    position: Position,
) -> Node {
    let ctx = scope.ctx;
    apply_defaults(&mut node, (definer.defaults)(ctx));

    if definer.default_type.is_empty() {
        if !node.contains_key("@type") {
            node.insert("@type".to_string(), Value::String("Thing".to_string()));
        }
    } else {
        resolve_default_type(&mut node, definer.default_type);
    }

    let strategy = match position {
        Position::Root => definer.id,
        Position::Nested => definer.nested_id,
    };
    match node.get("@id").and_then(|v| v.as_str()).map(String::from) {
        Some(id) => {
            let id = as_fragment(&id);
            let scope_for_id = match classify_id(&id) {
                IdKind::Fragment => strategy
                    .scope()
                    .unwrap_or_else(|| IdScope::for_fragment(resolve_raw_id(&id))),
                _ => IdScope::Host,
            };
            resolve_id(&mut node, ctx.base(scope_for_id));
        }
        None => {
            if let Some(id) = strategy.generate(&node, ctx) {
                node.insert("@id".to_string(), Value::String(id));
            }
        }
    }

    let node = (definer.resolve)(node, scope);

    let mut value = Value::Object(node);
    resolve_references(&mut value, &|s: IdScope| ctx.base(s).to_string());
    match value {
        Value::Object(mut obj) => {
            lead_with_id_and_type(&mut obj);
            obj
        }
        _ => Node::new(),
    }
}

/// A deferred, memoized node computation
pub struct NodeResolver {
    definer: &'static Definer,
    input: NodeInput,
    cache: RefCell<Option<(ResolveContext, Rc<Resolution>)>>,
}

impl std::fmt::Debug for NodeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeResolver")
            .field("definer", &self.definer.name)
            .field("input", &self.input)
            .finish()
    }
}

impl NodeResolver {
    pub fn new(definer: &'static Definer, input: impl Into<NodeInput>) -> Self {
        Self {
            definer,
            input: input.into(),
            cache: RefCell::new(None),
        }
    }

    pub fn definer(&self) -> &'static Definer {
        self.definer
    }

    pub fn input(&self) -> &NodeInput {
        &self.input
    }

    /// Resolve against `ctx`.
    ///
    /// The result is cached per context: resolving twice against the same
    /// context returns the same `Rc`. Every graph pass uses a fresh context,
    /// so computed fields are re-read exactly once per pass.
    pub fn resolve(&self, ctx: &ResolveContext) -> Rc<Resolution> {
        if let Some((cached_ctx, resolution)) = self.cache.borrow().as_ref() {
            if cached_ctx == ctx {
                return Rc::clone(resolution);
            }
        }

        let resolution = Rc::new(self.compute(ctx));
        *self.cache.borrow_mut() = Some((ctx.clone(), Rc::clone(&resolution)));
        resolution
    }

    fn compute(&self, ctx: &ResolveContext) -> Resolution {
        let input = self.input.snapshot();
        if input.len() == 1 && input.get("@id").is_some_and(Value::is_string) {
            tracing::debug!(
                definer = self.definer.name,
                "skipping bare reference registered as a node"
            );
            return Resolution::default();
        }

        let mut scope = ResolveScope::new(ctx);
        let node = resolve_node(self.definer, input, &mut scope, Position::Root);

        let mut nodes = Vec::with_capacity(scope.extracted.len() + 1);
        nodes.push(ResolvedNode {
            node,
            definer: self.definer,
        });
        nodes.extend(scope.extracted);

        Resolution {
            nodes,
            warnings: scope.warnings,
        }
    }
}

/// The in-progress node list of one pass
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<ResolvedNode>,
    index: HashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, resolved: ResolvedNode) -> usize {
        let idx = self.nodes.len();
        if let Some(id) = extract_id(&resolved.node) {
            self.index
                .entry(resolve_raw_id(id).to_string())
                .or_insert(idx);
        }
        self.nodes.push(resolved);
        idx
    }

    /// Position of the first node matching `id`, bare or fully qualified
    pub fn find(&self, id: &str) -> Option<usize> {
        self.index.get(resolve_raw_id(id)).copied()
    }

    /// First node matching `id`, bare or fully qualified
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.find(id).map(|idx| &self.nodes[idx].node)
    }

    /// `@id` of the first node matching `id`
    pub fn find_id(&self, id: &str) -> Option<String> {
        self.find_node(id)
            .and_then(extract_id)
            .map(String::from)
    }

    /// Whether any node registered under `id` carries `type_name`.
    ///
    /// Registrations sharing an id are only merged after the relation phase,
    /// so the type union has to be read across all of them.
    pub fn has_type(&self, id: &str, type_name: &str) -> bool {
        let raw = resolve_raw_id(id);
        self.nodes.iter().any(|r| {
            extract_id(&r.node).is_some_and(|own| resolve_raw_id(own) == raw)
                && has_type(&r.node, type_name)
        })
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx].node
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx].node
    }

    pub fn definer(&self, idx: usize) -> &'static Definer {
        self.nodes[idx].definer
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedNode> {
        self.nodes.iter()
    }

    pub fn into_nodes(self) -> Vec<ResolvedNode> {
        self.nodes
    }
}
