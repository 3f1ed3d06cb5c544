//! Graph resolution pass
//!
//! Turns an ordered list of resolvers into the final `@graph`:
//!
//! 1. Resolve every resolver (memoized per pass) into the working graph;
//!    extracted sub-entities follow their parent
//! 2. Run each node's relation merge, in registration order
//! 3. Group nodes by `@id` and merge duplicates
//! 4. Report required fields still missing on the merged nodes
//! 5. Strip empty values
//!
//! Relation merges only ever fill empty fields, and they run after every
//! node has been resolved, so the output does not depend on registration
//! order.

use serde_json::Value;

use crate::config::ResolveContext;
use crate::error::ResolveWarning;
use crate::merge::dedupe_and_flatten;
use crate::node::{extract_id, strip_empty_properties, Node};
use crate::resolver::{Definer, Graph, NodeResolver};

/// Output of one pass
#[derive(Debug, Default)]
pub struct ResolvedGraph {
    /// Deduplicated nodes in first-appearance order
    pub nodes: Vec<Node>,
    /// Diagnostics; each one has also been logged
    pub warnings: Vec<ResolveWarning>,
    pub stats: GraphStats,
}

/// Statistics from one pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GraphStats {
    /// Resolvers walked
    pub registrations: usize,
    /// Nodes in the working graph, extracted sub-entities included
    pub resolved_nodes: usize,
    /// Nodes folded into an earlier node with the same id
    pub merged_nodes: usize,
    /// Nodes in the final graph
    pub output_nodes: usize,
}

/// Run one resolution pass over `resolvers` in order
pub fn resolve_graph<'a>(
    resolvers: impl IntoIterator<Item = &'a NodeResolver>,
    ctx: &ResolveContext,
) -> ResolvedGraph {
    let mut graph = Graph::new();
    let mut warnings = Vec::new();
    let mut stats = GraphStats::default();

    for resolver in resolvers {
        stats.registrations += 1;
        let resolution = resolver.resolve(ctx);
        warnings.extend(resolution.warnings.iter().cloned());
        for resolved in &resolution.nodes {
            graph.push(resolved.clone());
        }
    }
    stats.resolved_nodes = graph.len();

    if ctx.host().is_empty() && !graph.is_empty() {
        warnings.insert(
            0,
            ResolveWarning::MissingCanonicalHost {
                nodes: graph.len(),
            },
        );
    }

    for idx in 0..graph.len() {
        let merge = graph.definer(idx).merge_relations;
        merge(idx, &mut graph, ctx);
    }

    let working: Vec<Node> = graph.iter().map(|r| r.node.clone()).collect();
    let (merged, conflicts) = dedupe_and_flatten(working);
    stats.merged_nodes = graph.len() - merged.len();
    warnings.extend(conflicts);

    let definers = definers_for(&graph, &merged);
    let mut nodes = Vec::with_capacity(merged.len());
    for (node, definer) in merged.into_iter().zip(definers) {
        if let Some(definer) = definer {
            warnings.extend(definer.missing_required(&node));
        }
        let mut value = Value::Object(node);
        strip_empty_properties(&mut value);
        if let Value::Object(node) = value {
            if !node.is_empty() {
                nodes.push(node);
            }
        }
    }
    stats.output_nodes = nodes.len();

    for warning in &warnings {
        match warning {
            ResolveWarning::MissingCanonicalHost { .. } => {
                tracing::warn!(%warning, "canonical host is not configured, ids stay relative")
            }
            _ => tracing::warn!(%warning, "schema.org graph diagnostic"),
        }
    }
    tracing::debug!(
        registrations = stats.registrations,
        resolved = stats.resolved_nodes,
        merged = stats.merged_nodes,
        output = stats.output_nodes,
        "resolved schema.org graph"
    );

    ResolvedGraph {
        nodes,
        warnings,
        stats,
    }
}

/// Definer of each merged node: the first working node with the same id,
/// or, for id-less nodes, the next id-less working node in order
fn definers_for(graph: &Graph, merged: &[Node]) -> Vec<Option<&'static Definer>> {
    let mut anonymous = graph
        .iter()
        .filter(|r| extract_id(&r.node).is_none())
        .map(|r| r.definer);

    merged
        .iter()
        .map(|node| match extract_id(node) {
            Some(id) => graph
                .iter()
                .find(|r| extract_id(&r.node) == Some(id))
                .map(|r| r.definer),
            None => anonymous.next(),
        })
        .collect()
}
