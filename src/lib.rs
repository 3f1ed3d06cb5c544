//! Schema.org Graph Library
//!
//! This library resolves partial Schema.org node definitions, registered
//! independently by different parts of a page, into a single linked JSON-LD
//! `@graph`.
//!
//! # Overview
//!
//! Callers describe what they know about a page with `define_*` functions
//! (`define_article`, `define_web_page`, ...). Each returns a lazy
//! [`NodeResolver`]. Resolvers are registered on a [`GraphContext`] under a
//! context id, and every call to [`GraphContext::generate_schema`]:
//!
//! 1. Resolves each node: defaults from page metadata, canonical `@id`s,
//!    normalized dates and urls, nested images and people extracted into
//!    their own nodes
//! 2. Cross-links siblings through well-known ids (`#webpage`, `#website`,
//!    `#identity`, `#logo`, ...), filling only empty fields
//! 3. Merges nodes sharing an `@id` (arrays union, scalars first-wins)
//! 4. Strips empty values
//!
//! The result does not depend on registration order.
//!
//! # Usage
//!
//! ```
//! use schema_org_graph::{
//!     define_organization, define_web_page, define_web_site, GraphContext, RenderOptions,
//!     ResolveContext,
//! };
//! use serde_json::json;
//!
//! let mut graph = GraphContext::new(ResolveContext::new("https://example.com/"));
//! graph.add_node(define_web_site(json!({"name": "Example"})), "layout");
//! graph.add_node(define_organization(json!({"name": "Example Co", "logo": "/logo.png"})), "layout");
//! graph.add_node(define_web_page(()), "page");
//!
//! let resolved = graph.generate_schema();
//! assert!(resolved.warnings.is_empty());
//!
//! let json = graph.render(&RenderOptions::default()).unwrap();
//! assert!(json.contains("https://example.com/#identity"));
//! ```

pub mod config;
pub mod context;
pub mod date;
pub mod error;
pub mod graph;
pub mod id;
pub mod input;
pub mod lifecycle;
pub mod merge;
pub mod node;
pub mod nodes;
pub mod render;
pub mod resolver;
pub mod vocab;

// Re-export main types for convenience
pub use crate::config::{PageMeta, ResolveContext, SchemaOrgOptions};
pub use crate::context::{ContextId, GraphContext, PendingBatch};
pub use crate::error::{ResolveWarning, SchemaOrgError};
pub use crate::graph::{resolve_graph, GraphStats, ResolvedGraph};
pub use crate::input::{Field, NodeInput};
pub use crate::lifecycle::Route;
pub use crate::node::{extract_id, extract_types, has_type, Node};
pub use crate::nodes::{
    define_aggregate_offer, define_aggregate_rating, define_article, define_breadcrumb,
    define_comment, define_creative_work, define_event, define_how_to, define_how_to_step,
    define_image, define_list_item, define_local_business, define_offer, define_opening_hours,
    define_organization, define_person, define_place, define_postal_address, define_product,
    define_question, define_rating, define_read_action, define_recipe, define_review,
    define_search_action, define_software_app, define_thing, define_typed, define_video,
    define_virtual_location, define_web_page, define_web_site,
};
pub use crate::render::{parse_graph, render_graph, to_jsonld, RenderOptions};
pub use crate::resolver::{Definer, NodeResolver, Resolution};
