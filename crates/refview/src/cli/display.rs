//! Common display utilities for CLI commands.

use colored::Colorize;
use refview::{AssetIdentifier, NodeId, ReferenceGraph};

/// Print one node line at the given indent level.
///
/// Hard links get an emphasized bullet; collapsed nodes show their omitted
/// count instead of a class.
pub fn print_node(graph: &ReferenceGraph<'_>, id: NodeId, hard: bool, indent: usize) {
    let node = graph.node(id);
    let pad = "  ".repeat(indent);
    let bullet = if hard {
        "•".red().bold()
    } else {
        "•".dimmed()
    };

    if node.is_collapsed() {
        let count = node.overflow_count().unwrap_or(0);
        println!("{pad}{bullet} {} ({count} more)", node.title().yellow());
        return;
    }

    println!(
        "{pad}{bullet} {} {}",
        node.title(),
        format!("[{}]", node.asset_class()).dimmed()
    );
}

/// Print a flat identifier list with a placeholder for the empty case.
pub fn print_identifiers(identifiers: &[AssetIdentifier], empty_message: &str) {
    if identifiers.is_empty() {
        println!("  {}", empty_message.dimmed());
        return;
    }
    for id in identifiers {
        println!("  {} {id}", "•".dimmed());
    }
}
