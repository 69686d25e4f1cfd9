//! CLI command implementations.

mod display;

pub mod dependencies;
pub mod graph;
pub mod referencers;

use std::path::Path;

use refview::{MemoryRegistry, RegistrySnapshot};

/// Load a snapshot file into an in-memory registry.
fn load_registry(snapshot: &Path) -> Result<MemoryRegistry, refview::Error> {
    let snapshot = RegistrySnapshot::load(snapshot)?;
    MemoryRegistry::from_snapshot(&snapshot)
}
