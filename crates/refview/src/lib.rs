//! # Refview: bounded asset reference graphs
//!
//! Refview builds the reference graph an asset viewer renders: given a root
//! set of asset identifiers and a read-only asset registry, it walks
//! referencers (inbound) and dependencies (outbound) out to configurable
//! depth and breadth limits and lays the result out for display.
//!
//! ## Design Philosophy
//!
//! - **Library first, CLI second** - the builder has no host dependencies
//! - **Registry is a seam** - asset data comes through the [`AssetRegistry`]
//!   trait, injected at construction; [`MemoryRegistry`] backs it with a JSON
//!   snapshot for offline use and tests
//! - **Rebuild, not update** - every build discards the previous graph; nodes
//!   live in an arena addressed by plain [`NodeId`] indices
//! - **Tolerant of bad data** - missing metadata degrades to a guessed
//!   classification, never an error
//!
//! ## Quick Start
//!
//! ```
//! use refview::{AssetIdentifier, DependencyClass, MemoryRegistry, Point, ReferenceGraph};
//!
//! let mut registry = MemoryRegistry::new();
//! registry.add_edge(
//!     AssetIdentifier::package("/Game/Hero"),
//!     AssetIdentifier::package("/Game/Hero_Mesh"),
//!     DependencyClass::Hard,
//! );
//!
//! let mut graph = ReferenceGraph::new(&registry);
//! graph.set_root(vec![AssetIdentifier::package("/Game/Hero")], Point::ORIGIN);
//! let root = graph.rebuild()?.expect("root set is non-empty");
//!
//! assert_eq!(graph.dependencies_of(root).len(), 1);
//! # Ok::<(), refview::Error>(())
//! ```

mod error;
mod graph;
mod registry;
mod types;

pub use error::{Error, Result};
pub use graph::{GraphEdge, NodeId, NodeKind, ReferenceGraph, ReferenceNode};
pub use registry::{
    AssetEntry, AssetRegistry, EdgeEntry, MemoryRegistry, RegistrySnapshot, RegistrySource,
};
pub use types::{
    AssetIdentifier, AssetRecord, ClassFilter, DependencyClass, PackageName, Point,
    PrimaryAssetId, SCRIPT_NAMESPACE,
};
