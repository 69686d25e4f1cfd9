//! Reference graph construction.
//!
//! This module builds the node graph the viewer renders: referencers of the
//! root on one side, dependencies on the other, bounded by depth and breadth
//! limits.
//!
//! ## Design
//!
//! - Two passes per direction: size gathering, then node construction
//! - Nodes live in an arena addressed by [`NodeId`]; edges are plain records
//! - Each pass/direction carries its own visited set, so a package may
//!   legitimately appear on both sides of the root
//! - The registry and registry source are injected at construction; the
//!   builder holds no callbacks into presentation code

mod node;

pub use node::{NodeId, NodeKind, ReferenceNode};

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::registry::{AssetRegistry, RegistrySource};
use crate::types::{AssetIdentifier, AssetRecord, ClassFilter, PackageName, Point};

/// Horizontal distance between a node column and its children's column.
const COLUMN_STEP: i32 = 800;

/// Vertical extent of one subtree-size unit for package nodes.
const ROW_HEIGHT: i32 = 200;

/// Vertical extent for searchable-value nodes (half a package row).
const VALUE_ROW_HEIGHT: i32 = 100;

/// Default depth limit in hops from the root.
const DEFAULT_MAX_DEPTH: u32 = 1;

/// Default number of explicit children per node before collapsing.
const DEFAULT_MAX_BREADTH: usize = 15;

/// Which edge direction a traversal pass walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraversalDirection {
    /// Inbound edges: assets referencing the current identifier.
    Referencers,
    /// Outbound edges: assets the current identifier depends on.
    Dependencies,
}

/// A directed referencer → dependency link between two nodes' endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    /// The node on the referencing side.
    pub referencer: NodeId,
    /// The node being referenced.
    pub dependency: NodeId,
    /// Whether the link is a hard reference, for visual emphasis.
    pub hard: bool,
}

/// Shared read-only state for one construction pass.
struct ConstructContext<'a> {
    sizes: &'a HashMap<AssetIdentifier, i32>,
    records: &'a HashMap<PackageName, AssetRecord>,
    allowed_packages: &'a HashSet<PackageName>,
}

/// Builder and owner of one reference graph session.
///
/// Owns the node arena and edge list produced by the last
/// [`rebuild`](Self::rebuild); every rebuild discards them wholesale. All
/// traversal runs synchronously on the calling thread.
pub struct ReferenceGraph<'a> {
    registry: &'a dyn AssetRegistry,
    source: RegistrySource<'a>,

    root_identifiers: Vec<AssetIdentifier>,
    root_origin: Point,

    max_search_depth: u32,
    max_search_breadth: usize,
    limit_search_depth: bool,
    limit_search_breadth: bool,

    show_soft_references: bool,
    show_hard_references: bool,
    show_management_references: bool,
    show_searchable_names: bool,
    show_native_packages: bool,

    collection_filter: Option<String>,

    nodes: Vec<ReferenceNode>,
    edges: Vec<GraphEdge>,
}

impl<'a> ReferenceGraph<'a> {
    /// Create a graph over the live editor registry (no source filtering).
    pub fn new(registry: &'a dyn AssetRegistry) -> Self {
        Self::with_source(registry, RegistrySource::Editor)
    }

    /// Create a graph over a registry restricted to the given source.
    pub fn with_source(registry: &'a dyn AssetRegistry, source: RegistrySource<'a>) -> Self {
        Self {
            registry,
            source,
            root_identifiers: Vec::new(),
            root_origin: Point::ORIGIN,
            max_search_depth: DEFAULT_MAX_DEPTH,
            max_search_breadth: DEFAULT_MAX_BREADTH,
            limit_search_depth: true,
            limit_search_breadth: true,
            show_soft_references: true,
            show_hard_references: true,
            show_management_references: false,
            show_searchable_names: false,
            show_native_packages: false,
            collection_filter: None,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    // === Root and settings ===

    /// Replace the root identifier set and origin. Does not traverse.
    ///
    /// Side effects: a value identifier in the root enables searchable-name
    /// inclusion for subsequent builds; an identifier resolving to a primary
    /// asset triggers a management-database refresh on the registry and
    /// enables management-reference inclusion.
    pub fn set_root(&mut self, identifiers: Vec<AssetIdentifier>, origin: Point) {
        for id in &identifiers {
            if id.is_value() {
                self.show_searchable_names = true;
            } else if id.primary_asset_id().is_some() {
                self.registry.refresh_management_database();
                self.show_management_references = true;
            }
        }
        self.root_identifiers = identifiers;
        self.root_origin = origin;
    }

    /// The currently focused root identifiers.
    #[must_use]
    pub fn root_identifiers(&self) -> &[AssetIdentifier] {
        &self.root_identifiers
    }

    /// The root layout origin.
    #[must_use]
    pub fn root_origin(&self) -> Point {
        self.root_origin
    }

    /// Maximum traversal depth in hops from the root.
    pub fn set_max_search_depth(&mut self, depth: u32) {
        self.max_search_depth = depth;
    }

    /// Maximum explicit children per node before an overflow node is emitted.
    pub fn set_max_search_breadth(&mut self, breadth: usize) {
        self.max_search_breadth = breadth;
    }

    /// Enable or disable the depth limit entirely.
    pub fn set_limit_search_depth(&mut self, limit: bool) {
        self.limit_search_depth = limit;
    }

    /// Enable or disable the breadth limit entirely.
    pub fn set_limit_search_breadth(&mut self, limit: bool) {
        self.limit_search_breadth = limit;
    }

    /// Include soft references in traversal.
    pub fn set_show_soft_references(&mut self, show: bool) {
        self.show_soft_references = show;
    }

    /// Include hard references in traversal.
    pub fn set_show_hard_references(&mut self, show: bool) {
        self.show_hard_references = show;
    }

    /// Include management (primary asset) references in traversal.
    pub fn set_show_management_references(&mut self, show: bool) {
        self.show_management_references = show;
    }

    /// Include searchable-name (value) references in traversal.
    pub fn set_show_searchable_names(&mut self, show: bool) {
        self.show_searchable_names = show;
    }

    /// Include native/script packages in traversal.
    pub fn set_show_native_packages(&mut self, show: bool) {
        self.show_native_packages = show;
    }

    /// Restrict traversal to packages in a named collection; `None` clears.
    pub fn set_collection_filter(&mut self, collection: Option<String>) {
        self.collection_filter = collection;
    }

    /// Whether searchable-name references are currently included.
    #[must_use]
    pub fn shows_searchable_names(&self) -> bool {
        self.show_searchable_names
    }

    /// Whether management references are currently included.
    #[must_use]
    pub fn shows_management_references(&self) -> bool {
        self.show_management_references
    }

    // === Build ===

    /// Discard all nodes and rebuild the graph from the current root.
    ///
    /// Returns the new root node, or `None` when the root set is empty — a
    /// defined boundary condition, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyIdentifierBatch`] only if internal bookkeeping
    /// hands an empty batch to a recursive step.
    pub fn rebuild(&mut self) -> Result<Option<NodeId>> {
        self.nodes.clear();
        self.edges.clear();

        if self.root_identifiers.is_empty() {
            debug!("rebuild requested with empty root set");
            return Ok(None);
        }

        let root = self.construct_graph()?;
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "reference graph rebuilt"
        );
        Ok(Some(root))
    }

    fn construct_graph(&mut self) -> Result<NodeId> {
        let roots = self.root_identifiers.clone();
        let allowed_packages = self.allowed_package_names();

        let mut referencer_sizes = HashMap::new();
        let mut visited_referencers = HashSet::new();
        self.gather_sizes(
            TraversalDirection::Referencers,
            &roots,
            &allowed_packages,
            1,
            &mut visited_referencers,
            &mut referencer_sizes,
        )?;

        let mut dependency_sizes = HashMap::new();
        let mut visited_dependencies = HashSet::new();
        self.gather_sizes(
            TraversalDirection::Dependencies,
            &roots,
            &allowed_packages,
            1,
            &mut visited_dependencies,
            &mut dependency_sizes,
        )?;

        // Metadata is only resolvable for packages, not values.
        let mut all_packages = HashSet::new();
        for id in visited_referencers.iter().chain(visited_dependencies.iter()) {
            if !id.is_value() {
                if let Some(package) = id.package_name() {
                    all_packages.insert(package.clone());
                }
            }
        }
        let records = self.gather_asset_data(&all_packages);

        let root_id = self.create_node();
        let root_record = roots
            .first()
            .and_then(AssetIdentifier::package_name)
            .and_then(|p| records.get(p))
            .cloned();
        let root_map_hint = self.map_hint(&roots[0]);
        self.nodes[root_id.as_usize()].setup_regular(
            self.root_origin,
            roots.clone(),
            root_record,
            root_map_hint,
        )?;

        let referencer_ctx = ConstructContext {
            sizes: &referencer_sizes,
            records: &records,
            allowed_packages: &allowed_packages,
        };
        let mut visited = HashSet::new();
        self.construct_nodes(
            TraversalDirection::Referencers,
            root_id,
            &roots,
            self.root_origin,
            &referencer_ctx,
            1,
            &mut visited,
        )?;

        let dependency_ctx = ConstructContext {
            sizes: &dependency_sizes,
            records: &records,
            allowed_packages: &allowed_packages,
        };
        let mut visited = HashSet::new();
        self.construct_nodes(
            TraversalDirection::Dependencies,
            root_id,
            &roots,
            self.root_origin,
            &dependency_ctx,
            1,
            &mut visited,
        )?;

        Ok(root_id)
    }

    /// Pass 1: compute the subtree size of each reachable identifier.
    ///
    /// Subtree size is the sum of the traversed children's sizes (never
    /// counting self while children exist, so chains stay one row tall),
    /// plus one when a collapsed overflow node will be emitted; a childless
    /// identifier has size one.
    fn gather_sizes(
        &self,
        direction: TraversalDirection,
        identifiers: &[AssetIdentifier],
        allowed_packages: &HashSet<PackageName>,
        depth: u32,
        visited: &mut HashSet<AssetIdentifier>,
        sizes: &mut HashMap<AssetIdentifier, i32>,
    ) -> Result<i32> {
        let first = identifiers.first().ok_or(Error::EmptyIdentifierBatch)?;
        visited.extend(identifiers.iter().cloned());

        let mut references = self.query_references(direction, identifiers, false);
        if !self.show_native_packages {
            references.retain(|id| !id.is_native_package());
        }

        let mut node_size = 0;
        if !references.is_empty() && !self.exceeds_max_search_depth(depth) {
            self.filter_for_source(&mut references, direction);

            let mut references_made = 0;
            let mut references_exceeding_max = 0;
            for reference in &references {
                if visited.contains(reference)
                    || !self.passes_collection_filter(reference, allowed_packages)
                {
                    continue;
                }
                if self.exceeds_max_search_breadth(references_made) {
                    references_exceeding_max += 1;
                    continue;
                }
                let batch = [reference.clone()];
                node_size += self.gather_sizes(
                    direction,
                    &batch,
                    allowed_packages,
                    depth + 1,
                    visited,
                    sizes,
                )?;
                references_made += 1;
            }

            if references_exceeding_max > 0 {
                // Account for the collapsed node that will summarize them.
                node_size += 1;
            }
        }

        if node_size == 0 {
            node_size = 1;
        }

        sizes.insert(first.clone(), node_size);
        Ok(node_size)
    }

    /// Pass 2: create nodes, lay them out, and connect edges.
    #[allow(clippy::too_many_arguments)]
    fn construct_nodes(
        &mut self,
        direction: TraversalDirection,
        root_id: NodeId,
        identifiers: &[AssetIdentifier],
        node_loc: Point,
        ctx: &ConstructContext<'_>,
        depth: u32,
        visited: &mut HashSet<AssetIdentifier>,
    ) -> Result<NodeId> {
        let first = identifiers.first().ok_or(Error::EmptyIdentifierBatch)?;
        visited.extend(identifiers.iter().cloned());

        // The root is created once; an identifier that loops back to it
        // reuses the existing node instead of duplicating it.
        let node_id = if self.nodes[root_id.as_usize()].identifier() == Some(first) {
            root_id
        } else {
            let id = self.create_node();
            let record = first
                .package_name()
                .and_then(|p| ctx.records.get(p))
                .cloned();
            let map_hint = self.map_hint(first);
            self.nodes[id.as_usize()].setup_regular(
                node_loc,
                identifiers.to_vec(),
                record,
                map_hint,
            )?;
            id
        };

        let mut hard_references = self.query_references(direction, identifiers, true);
        let mut references = self.query_references(direction, identifiers, false);
        if !self.show_native_packages {
            hard_references.retain(|id| !id.is_native_package());
            references.retain(|id| !id.is_native_package());
        }

        if !references.is_empty() && !self.exceeds_max_search_depth(depth) {
            self.filter_for_source(&mut references, direction);
            self.filter_for_source(&mut hard_references, direction);

            let mut child_loc = node_loc;
            match direction {
                TraversalDirection::Referencers => child_loc.x -= COLUMN_STEP,
                TraversalDirection::Dependencies => child_loc.x += COLUMN_STEP,
            }

            let subtree_size = self.subtree_size(ctx.sizes, first);
            child_loc.y -= subtree_size * ROW_HEIGHT / 2;
            child_loc.y += ROW_HEIGHT / 2;

            let mut references_made = 0;
            let mut references_exceeding_max = 0;
            for reference in &references {
                if visited.contains(reference)
                    || !self.passes_collection_filter(reference, ctx.allowed_packages)
                {
                    continue;
                }
                if self.exceeds_max_search_breadth(references_made) {
                    references_exceeding_max += 1;
                    continue;
                }

                let is_hard = hard_references.contains(reference);
                let row_height = if reference.is_value() {
                    VALUE_ROW_HEIGHT
                } else {
                    ROW_HEIGHT
                };
                let reference_size = self.subtree_size(ctx.sizes, reference);
                let reference_loc = Point::new(
                    child_loc.x,
                    child_loc.y + reference_size * row_height / 2 - row_height / 2,
                );

                let batch = [reference.clone()];
                let child_id = self.construct_nodes(
                    direction,
                    root_id,
                    &batch,
                    reference_loc,
                    ctx,
                    depth + 1,
                    visited,
                )?;

                // Arrows always point from the referencer to the referenced:
                // the referencer pass links child → parent, the dependency
                // pass links parent → child.
                match direction {
                    TraversalDirection::Referencers => self.connect(child_id, node_id, is_hard),
                    TraversalDirection::Dependencies => self.connect(node_id, child_id, is_hard),
                }

                child_loc.y += reference_size * row_height;
                references_made += 1;
            }

            if references_exceeding_max > 0 {
                let collapsed_id = self.create_node();
                self.nodes[collapsed_id.as_usize()]
                    .setup_collapsed(child_loc, references_exceeding_max);
                match direction {
                    TraversalDirection::Referencers => self.connect(collapsed_id, node_id, false),
                    TraversalDirection::Dependencies => self.connect(node_id, collapsed_id, false),
                }
            }
        }

        Ok(node_id)
    }

    // === Traversal helpers ===

    /// Gather edges for a batch of identifiers in query order.
    fn query_references(
        &self,
        direction: TraversalDirection,
        identifiers: &[AssetIdentifier],
        hard_only: bool,
    ) -> Vec<AssetIdentifier> {
        let filter = self.search_flags(hard_only);
        let mut out = Vec::new();
        for id in identifiers {
            let found = match direction {
                TraversalDirection::Referencers => self.registry.referencers(id, filter),
                TraversalDirection::Dependencies => self.registry.dependencies(id, filter),
            };
            out.extend(found);
        }
        out
    }

    /// The edge classes covered by the current show flags.
    fn search_flags(&self, hard_only: bool) -> ClassFilter {
        ClassFilter {
            soft: self.show_soft_references && !hard_only,
            hard: self.show_hard_references,
            searchable_name: self.show_searchable_names && !hard_only,
            soft_manage: self.show_management_references && !hard_only,
            hard_manage: self.show_management_references,
        }
    }

    fn filter_for_source(&self, identifiers: &mut Vec<AssetIdentifier>, direction: TraversalDirection) {
        let forward = direction == TraversalDirection::Dependencies;
        self.source
            .filter_identifiers(self.registry, identifiers, self.search_flags(false), forward);
    }

    /// Collection filtering applies to packages only; values bypass it.
    fn passes_collection_filter(
        &self,
        id: &AssetIdentifier,
        allowed_packages: &HashSet<PackageName>,
    ) -> bool {
        !id.is_package()
            || !self.should_filter_by_collection()
            || id
                .package_name()
                .is_some_and(|package| allowed_packages.contains(package))
    }

    fn should_filter_by_collection(&self) -> bool {
        self.collection_filter
            .as_ref()
            .is_some_and(|name| !name.is_empty())
    }

    fn allowed_package_names(&self) -> HashSet<PackageName> {
        match &self.collection_filter {
            Some(name) if !name.is_empty() => self
                .registry
                .assets_in_collection(name)
                .into_iter()
                .collect(),
            _ => HashSet::new(),
        }
    }

    fn exceeds_max_search_depth(&self, depth: u32) -> bool {
        self.limit_search_depth && depth > self.max_search_depth
    }

    fn exceeds_max_search_breadth(&self, breadth: usize) -> bool {
        self.limit_search_breadth && breadth >= self.max_search_breadth
    }

    /// Resolve metadata for every discovered package.
    ///
    /// Guesses that a package's single asset shares the package's short name
    /// instead of searching; packages where the guess misses simply stay
    /// unresolved.
    fn gather_asset_data(
        &self,
        packages: &HashSet<PackageName>,
    ) -> HashMap<PackageName, AssetRecord> {
        let mut records = HashMap::new();
        for package in packages {
            if let Some(record) = self.registry.asset_by_object_path(&package.guessed_object_path())
            {
                records.insert(package.clone(), record);
            }
        }
        records
    }

    fn subtree_size(&self, sizes: &HashMap<AssetIdentifier, i32>, id: &AssetIdentifier) -> i32 {
        match sizes.get(id) {
            Some(size) => *size,
            None => {
                // Both passes visit in lockstep, so a miss means the size
                // pass was starved somehow; treat the node as a leaf.
                warn!(identifier = %id, "subtree size missing, assuming leaf");
                1
            }
        }
    }

    fn map_hint(&self, id: &AssetIdentifier) -> bool {
        id.package_name()
            .is_some_and(|package| self.registry.is_map_package(package))
    }

    // === Arena ===

    fn create_node(&mut self) -> NodeId {
        self.nodes.push(ReferenceNode::new());
        NodeId(self.nodes.len() - 1)
    }

    /// Attach a directed referencer → dependency edge between two nodes,
    /// unhiding the endpoints it connects.
    fn connect(&mut self, referencer: NodeId, dependency: NodeId, hard: bool) {
        self.nodes[referencer.as_usize()].show_dependency_pin();
        self.nodes[dependency.as_usize()].show_referencer_pin();
        self.edges.push(GraphEdge {
            referencer,
            dependency,
            hard,
        });
    }

    // === Inspection ===

    /// Access a node by id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to the current build.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ReferenceNode {
        &self.nodes[id.as_usize()]
    }

    /// Iterate all nodes with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ReferenceNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Number of nodes in the current build.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All edges in the current build.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Nodes referencing the given node.
    #[must_use]
    pub fn referencers_of(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|edge| edge.dependency == id)
            .map(|edge| edge.referencer)
            .collect()
    }

    /// Nodes the given node references.
    #[must_use]
    pub fn dependencies_of(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|edge| edge.referencer == id)
            .map(|edge| edge.dependency)
            .collect()
    }

    /// Find the node whose first identifier equals `id`, if any.
    #[must_use]
    pub fn find_node(&self, id: &AssetIdentifier) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.identifier() == Some(id))
            .map(|(node_id, _)| node_id)
    }
}
