//! In-memory asset registry backed by a petgraph edge store.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

use super::AssetRegistry;
use super::snapshot::RegistrySnapshot;
use crate::error::Result;
use crate::types::{AssetIdentifier, AssetRecord, ClassFilter, DependencyClass, PackageName};

/// An [`AssetRegistry`] held entirely in memory.
///
/// Edges live in a directed petgraph keyed by [`AssetIdentifier`]; a node map
/// makes identifier lookup O(1). Records, collections, and per-package
/// metadata sit in plain maps. Build one from a [`RegistrySnapshot`] or
/// assemble it programmatically with the `add_*` methods.
pub struct MemoryRegistry {
    graph: DiGraph<AssetIdentifier, DependencyClass>,
    node_map: HashMap<AssetIdentifier, NodeIndex>,
    records: HashMap<PackageName, Vec<AssetRecord>>,
    object_paths: HashMap<String, AssetRecord>,
    map_packages: HashSet<PackageName>,
    disk_sizes: HashMap<PackageName, i64>,
    collections: HashMap<String, Vec<PackageName>>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            records: HashMap::new(),
            object_paths: HashMap::new(),
            map_packages: HashSet::new(),
            disk_sizes: HashMap::new(),
            collections: HashMap::new(),
        }
    }

    /// Build a registry from a parsed snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidIdentifier`] if an edge endpoint does
    /// not parse as an asset identifier.
    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Result<Self> {
        let mut registry = Self::new();

        for entry in &snapshot.assets {
            let package = PackageName::new(&entry.package);
            let asset_name = entry
                .asset_name
                .clone()
                .unwrap_or_else(|| package.short_name().to_string());
            registry.add_asset(AssetRecord {
                package_name: package.clone(),
                asset_name,
                asset_class: entry.class.clone(),
                is_redirector: entry.redirector,
            });
            if entry.map {
                registry.set_map_package(package.clone());
            }
            registry.set_disk_size(package, entry.disk_size);
        }

        for edge in &snapshot.edges {
            let from: AssetIdentifier = edge.from.parse()?;
            let to: AssetIdentifier = edge.to.parse()?;
            registry.add_edge(from, to, edge.class);
        }

        for (name, members) in &snapshot.collections {
            let packages = members.iter().map(PackageName::new).collect();
            registry.add_collection(name.clone(), packages);
        }

        Ok(registry)
    }

    /// Register an asset record, indexing it by package and object path.
    pub fn add_asset(&mut self, record: AssetRecord) {
        let object_path = format!("{}.{}", record.package_name, record.asset_name);
        self.object_paths.insert(object_path, record.clone());
        self.records
            .entry(record.package_name.clone())
            .or_default()
            .push(record);
    }

    /// Record a directed reference edge: `from` references `to`.
    pub fn add_edge(&mut self, from: AssetIdentifier, to: AssetIdentifier, class: DependencyClass) {
        let from_node = self.intern(from);
        let to_node = self.intern(to);
        self.graph.add_edge(from_node, to_node, class);
    }

    /// Mark a package as a map/world package.
    pub fn set_map_package(&mut self, package: PackageName) {
        self.map_packages.insert(package);
    }

    /// Record the on-disk size of a package.
    pub fn set_disk_size(&mut self, package: PackageName, size: i64) {
        self.disk_sizes.insert(package, size);
    }

    /// Define or replace a named collection.
    pub fn add_collection(&mut self, name: String, packages: Vec<PackageName>) {
        self.collections.insert(name, packages);
    }

    fn intern(&mut self, id: AssetIdentifier) -> NodeIndex {
        if let Some(&node) = self.node_map.get(&id) {
            return node;
        }
        let node = self.graph.add_node(id.clone());
        self.node_map.insert(id, node);
        node
    }

    /// Shared neighbor query for both directions.
    ///
    /// Petgraph iterates adjacency most-recent-first, so results are reversed
    /// to present edges in insertion order; duplicate neighbors reached
    /// through multiple edge classes are reported once.
    fn neighbors(
        &self,
        id: &AssetIdentifier,
        filter: ClassFilter,
        direction: Direction,
    ) -> Vec<AssetIdentifier> {
        let Some(&node) = self.node_map.get(id) else {
            return Vec::new();
        };

        let mut found: Vec<AssetIdentifier> = self
            .graph
            .edges_directed(node, direction)
            .filter(|edge| filter.contains(*edge.weight()))
            .map(|edge| {
                let neighbor = match direction {
                    Direction::Incoming => edge.source(),
                    Direction::Outgoing => edge.target(),
                };
                self.graph[neighbor].clone()
            })
            .collect();
        found.reverse();

        let mut seen = HashSet::new();
        found.retain(|id| seen.insert(id.clone()));
        found
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry for MemoryRegistry {
    fn referencers(&self, id: &AssetIdentifier, filter: ClassFilter) -> Vec<AssetIdentifier> {
        self.neighbors(id, filter, Direction::Incoming)
    }

    fn dependencies(&self, id: &AssetIdentifier, filter: ClassFilter) -> Vec<AssetIdentifier> {
        self.neighbors(id, filter, Direction::Outgoing)
    }

    fn asset_by_object_path(&self, object_path: &str) -> Option<AssetRecord> {
        self.object_paths.get(object_path).cloned()
    }

    fn assets_in_package(&self, package: &PackageName) -> Vec<AssetRecord> {
        self.records.get(package).cloned().unwrap_or_default()
    }

    fn assets_in_collection(&self, collection: &str) -> Vec<PackageName> {
        self.collections.get(collection).cloned().unwrap_or_default()
    }

    fn is_map_package(&self, package: &PackageName) -> bool {
        self.map_packages.contains(package)
    }

    fn package_disk_size(&self, package: &PackageName) -> Option<i64> {
        self.disk_sizes.get(package).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard_and_soft() -> ClassFilter {
        ClassFilter {
            soft: true,
            hard: true,
            ..ClassFilter::default()
        }
    }

    fn simple_registry() -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        registry.add_edge(
            AssetIdentifier::package("/Game/A"),
            AssetIdentifier::package("/Game/B"),
            DependencyClass::Hard,
        );
        registry.add_edge(
            AssetIdentifier::package("/Game/A"),
            AssetIdentifier::package("/Game/C"),
            DependencyClass::Soft,
        );
        registry.add_edge(
            AssetIdentifier::package("/Game/D"),
            AssetIdentifier::package("/Game/A"),
            DependencyClass::Hard,
        );
        registry
    }

    #[test]
    fn dependencies_respect_filter_and_order() {
        let registry = simple_registry();
        let a = AssetIdentifier::package("/Game/A");

        let all = registry.dependencies(&a, hard_and_soft());
        assert_eq!(
            all,
            vec![
                AssetIdentifier::package("/Game/B"),
                AssetIdentifier::package("/Game/C"),
            ]
        );

        let hard = registry.dependencies(&a, hard_and_soft().hard_only());
        assert_eq!(hard, vec![AssetIdentifier::package("/Game/B")]);
    }

    #[test]
    fn referencers_walk_incoming_edges() {
        let registry = simple_registry();
        let a = AssetIdentifier::package("/Game/A");

        let refs = registry.referencers(&a, hard_and_soft());
        assert_eq!(refs, vec![AssetIdentifier::package("/Game/D")]);
    }

    #[test]
    fn unknown_identifier_has_no_edges() {
        let registry = simple_registry();
        let ghost = AssetIdentifier::package("/Game/Ghost");

        assert!(registry.dependencies(&ghost, hard_and_soft()).is_empty());
        assert!(registry.referencers(&ghost, hard_and_soft()).is_empty());
    }

    #[test]
    fn duplicate_edges_report_one_neighbor() {
        let mut registry = MemoryRegistry::new();
        let a = AssetIdentifier::package("/Game/A");
        let b = AssetIdentifier::package("/Game/B");
        registry.add_edge(a.clone(), b.clone(), DependencyClass::Hard);
        registry.add_edge(a.clone(), b.clone(), DependencyClass::Soft);

        assert_eq!(registry.dependencies(&a, hard_and_soft()), vec![b]);
    }

    #[test]
    fn asset_lookup_by_object_path() {
        let mut registry = MemoryRegistry::new();
        registry.add_asset(AssetRecord {
            package_name: PackageName::new("/Game/Props/Chair"),
            asset_name: "Chair".to_string(),
            asset_class: "StaticMesh".to_string(),
            is_redirector: false,
        });

        let record = registry
            .asset_by_object_path("/Game/Props/Chair.Chair")
            .expect("should resolve");
        assert_eq!(record.asset_class, "StaticMesh");
        assert!(registry.asset_by_object_path("/Game/Nope.Nope").is_none());
    }

    #[test]
    fn from_snapshot_builds_everything() {
        let json = r#"{
            "assets": [
                { "package": "/Game/A", "class": "Blueprint", "disk_size": 10 },
                { "package": "/Game/M", "map": true }
            ],
            "edges": [
                { "from": "/Game/A", "to": "/Game/M", "class": "soft" }
            ],
            "collections": { "Audit": ["/Game/A"] }
        }"#;
        let snapshot: RegistrySnapshot = serde_json::from_str(json).expect("parse");
        let registry = MemoryRegistry::from_snapshot(&snapshot).expect("build");

        let a = AssetIdentifier::package("/Game/A");
        assert_eq!(
            registry.dependencies(&a, hard_and_soft()),
            vec![AssetIdentifier::package("/Game/M")]
        );
        assert!(registry.is_map_package(&PackageName::new("/Game/M")));
        assert_eq!(
            registry.package_disk_size(&PackageName::new("/Game/A")),
            Some(10)
        );
        assert_eq!(
            registry.assets_in_collection("Audit"),
            vec![PackageName::new("/Game/A")]
        );
    }

    #[test]
    fn from_snapshot_rejects_bad_edge_endpoints() {
        let json = r#"{ "edges": [ { "from": "not-a-path", "to": "/Game/B" } ] }"#;
        let snapshot: RegistrySnapshot = serde_json::from_str(json).expect("parse");

        assert!(MemoryRegistry::from_snapshot(&snapshot).is_err());
    }
}
