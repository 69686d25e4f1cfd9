//! `refview dependencies` command implementation.

use std::path::Path;

use colored::Colorize;
use refview::{AssetIdentifier, AssetRegistry, ClassFilter};

use super::display::print_identifiers;

/// Run the dependencies command: a direct one-hop listing.
pub fn run(snapshot: &Path, root: &str) -> Result<(), refview::Error> {
    let registry = super::load_registry(snapshot)?;
    let id: AssetIdentifier = root.parse()?;

    let filter = ClassFilter {
        soft: true,
        hard: true,
        ..ClassFilter::default()
    };
    let found = registry.dependencies(&id, filter);

    println!("Dependencies of {}:", root.cyan().bold());
    print_identifiers(&found, "(none)");
    Ok(())
}
