//! `refview graph` command implementation.

use std::path::Path;

use colored::Colorize;
use refview::{AssetIdentifier, NodeId, Point, ReferenceGraph};

use super::display::print_node;

/// Run the graph command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    snapshot: &Path,
    roots: &[String],
    depth: Option<u32>,
    breadth: Option<usize>,
    collection: Option<&str>,
    show_natives: bool,
    hard_only: bool,
) -> Result<(), refview::Error> {
    let registry = super::load_registry(snapshot)?;

    let mut identifiers = Vec::with_capacity(roots.len());
    for root in roots {
        identifiers.push(root.parse::<AssetIdentifier>()?);
    }

    let mut graph = ReferenceGraph::new(&registry);
    if let Some(depth) = depth {
        graph.set_max_search_depth(depth);
    }
    if let Some(breadth) = breadth {
        graph.set_max_search_breadth(breadth);
    }
    graph.set_collection_filter(collection.map(ToString::to_string));
    graph.set_show_native_packages(show_natives);
    if hard_only {
        graph.set_show_soft_references(false);
    }
    graph.set_root(identifiers, Point::ORIGIN);

    let Some(root) = graph.rebuild()? else {
        println!("{}", "(empty root set)".dimmed());
        return Ok(());
    };

    let root_node = graph.node(root);
    println!(
        "{} {}",
        root_node.title().cyan().bold(),
        format!("[{}]", root_node.asset_class()).dimmed()
    );
    if !root_node.comment().is_empty() {
        println!("{}", root_node.comment().dimmed());
    }

    println!();
    let referencers = graph.referencers_of(root);
    println!(
        "{} ({}):",
        "Referencers".white().bold(),
        referencers.len().to_string().green()
    );
    if referencers.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        print_referencer_tree(&graph, root, 1);
    }

    println!();
    let dependencies = graph.dependencies_of(root);
    println!(
        "{} ({}):",
        "Dependencies".white().bold(),
        dependencies.len().to_string().green()
    );
    if dependencies.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        print_dependency_tree(&graph, root, 1);
    }

    Ok(())
}

/// Walk inbound edges, printing each referencer under its target.
fn print_referencer_tree(graph: &ReferenceGraph<'_>, id: NodeId, indent: usize) {
    for edge in graph.edges().iter().filter(|edge| edge.dependency == id) {
        print_node(graph, edge.referencer, edge.hard, indent);
        print_referencer_tree(graph, edge.referencer, indent + 1);
    }
}

/// Walk outbound edges, printing each dependency under its owner.
fn print_dependency_tree(graph: &ReferenceGraph<'_>, id: NodeId, indent: usize) {
    for edge in graph.edges().iter().filter(|edge| edge.referencer == id) {
        print_node(graph, edge.dependency, edge.hard, indent);
        print_dependency_tree(graph, edge.dependency, indent + 1);
    }
}
