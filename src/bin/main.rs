//! Schema.org graph CLI
//!
//! Resolves a JSON document of partial nodes into a JSON-LD `@graph`, and
//! inspects already rendered documents.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schema_org_graph::{
    extract_id, extract_types, parse_graph, ContextId, GraphContext, RenderOptions,
    ResolveContext, SchemaOrgError,
};

#[derive(Parser)]
#[command(name = "schema-org-graph")]
#[command(about = "Resolve partial Schema.org nodes into a linked JSON-LD graph")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an input document into a JSON-LD graph
    Generate(GenerateArgs),
    /// List the nodes of a rendered JSON-LD document
    Inspect(InspectArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Input document `{"context": {...}, "nodes": [...]}` (default: stdin)
    input: Option<PathBuf>,

    /// Canonical host, e.g. https://example.com/
    #[arg(long)]
    host: Option<String>,

    /// Canonical url of the page
    #[arg(long)]
    url: Option<String>,

    /// Default `inLanguage`
    #[arg(long)]
    language: Option<String>,

    /// Default offer currency
    #[arg(long)]
    currency: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Wrap the output in a <script type="application/ld+json"> tag
    #[arg(long)]
    script: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Rendered JSON-LD, optionally inside a script tag (default: stdin)
    input: Option<PathBuf>,
}

/// The document `generate` reads
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InputDocument {
    context: ResolveContext,
    nodes: Value,
}

fn read_input(path: Option<&PathBuf>) -> Result<String, SchemaOrgError> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(SchemaOrgError::InvalidPath(path.clone()));
            }
            fs::read_to_string(path).map_err(|e| SchemaOrgError::LoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), SchemaOrgError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            tracing::info!(path = %path.display(), "wrote schema.org graph");
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), SchemaOrgError> {
    let content = read_input(args.input.as_ref())?;
    let document: InputDocument = serde_json::from_str(&content)?;

    let mut context = document.context;
    if let Some(host) = args.host {
        context.canonical_host = host;
    }
    if let Some(url) = args.url {
        context.canonical_url = url;
    }
    if let Some(language) = args.language {
        context.options.default_language = Some(language);
    }
    if let Some(currency) = args.currency {
        context.options.default_currency = Some(currency);
    }

    match &document.nodes {
        Value::Array(_) | Value::Object(_) => {}
        Value::Null => {
            return Err(SchemaOrgError::InvalidInput(
                "input document has no \"nodes\"".to_string(),
            ))
        }
        other => {
            return Err(SchemaOrgError::InvalidInput(format!(
                "\"nodes\" must be an object or an array, got {}",
                other
            )))
        }
    }

    let mut graph = GraphContext::new(context);
    graph.add_node(document.nodes, ContextId::generate());

    let resolved = graph.generate_schema();
    tracing::info!(
        nodes = resolved.stats.output_nodes,
        merged = resolved.stats.merged_nodes,
        warnings = resolved.warnings.len(),
        "resolved graph"
    );

    let options = RenderOptions {
        pretty: args.pretty,
        script_tag: args.script,
    };
    let output = schema_org_graph::render_graph(&resolved.nodes, &options)?;
    write_output(&output, args.output.as_ref())
}

fn run_inspect(args: InspectArgs) -> Result<(), SchemaOrgError> {
    let content = read_input(args.input.as_ref())?;
    let nodes = parse_graph(&content)?;

    for node in &nodes {
        println!(
            "{}\t{}",
            extract_id(node).unwrap_or("(no id)"),
            extract_types(node).join(", ")
        );
    }
    tracing::info!(nodes = nodes.len(), "parsed graph");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Inspect(args) => run_inspect(args),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
