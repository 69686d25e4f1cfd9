//! The asset registry seam.
//!
//! The graph builder never owns asset data; it queries a read-only,
//! externally synchronized [`AssetRegistry`] for referencer/dependency edges,
//! metadata, and collection membership. In the host editor this is the live
//! asset registry; here [`MemoryRegistry`] implements the same trait over a
//! JSON snapshot so the core can run and be tested without a host.
//!
//! ## Design
//!
//! - The trait defines the consumed surface, nothing more
//! - Metadata lookups are best-effort and may return nothing
//! - [`RegistrySource`] wraps a registry with cooked-platform filtering

mod memory;
mod snapshot;
mod source;

pub use memory::MemoryRegistry;
pub use snapshot::{AssetEntry, EdgeEntry, RegistrySnapshot};
pub use source::RegistrySource;

use crate::types::{AssetIdentifier, AssetRecord, ClassFilter, PackageName};

/// Read-only view of the asset registry consumed by the graph builder.
///
/// Implementations are queried, never mutated, and are assumed internally
/// consistent for the duration of one graph build.
pub trait AssetRegistry {
    /// Assets that reference `id`, restricted to the given edge classes.
    fn referencers(&self, id: &AssetIdentifier, filter: ClassFilter) -> Vec<AssetIdentifier>;

    /// Assets that `id` depends on, restricted to the given edge classes.
    fn dependencies(&self, id: &AssetIdentifier, filter: ClassFilter) -> Vec<AssetIdentifier>;

    /// Look up a single asset by object path, e.g. `/Game/Props/Chair.Chair`.
    ///
    /// Best-effort; returns `None` when the path resolves to nothing.
    fn asset_by_object_path(&self, object_path: &str) -> Option<AssetRecord>;

    /// All asset records contained in a package.
    fn assets_in_package(&self, package: &PackageName) -> Vec<AssetRecord>;

    /// Package names belonging to a named collection.
    ///
    /// Unknown collection names yield an empty list.
    fn assets_in_collection(&self, collection: &str) -> Vec<PackageName>;

    /// Whether the package is a map/world package on disk.
    ///
    /// Best-effort classification hint; defaults to `false`.
    fn is_map_package(&self, _package: &PackageName) -> bool {
        false
    }

    /// On-disk size of a package, if the registry tracks one.
    ///
    /// A missing or negative size means the package is absent from this
    /// registry's backing source. Defaults to `None`.
    fn package_disk_size(&self, _package: &PackageName) -> Option<i64> {
        None
    }

    /// Refresh the asset-management database before a management-reference
    /// traversal. Best-effort, out-of-band; defaults to a no-op.
    fn refresh_management_database(&self) {}
}
