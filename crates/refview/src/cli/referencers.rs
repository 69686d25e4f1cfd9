//! `refview referencers` command implementation.

use std::path::Path;

use colored::Colorize;
use refview::{AssetIdentifier, AssetRegistry, ClassFilter};

use super::display::print_identifiers;

/// Run the referencers command: a direct one-hop listing.
pub fn run(snapshot: &Path, root: &str) -> Result<(), refview::Error> {
    let registry = super::load_registry(snapshot)?;
    let id: AssetIdentifier = root.parse()?;

    let filter = ClassFilter {
        soft: true,
        hard: true,
        ..ClassFilter::default()
    };
    let found = registry.referencers(&id, filter);

    println!("Referencers of {}:", root.cyan().bold());
    print_identifiers(&found, "(none)");
    Ok(())
}
