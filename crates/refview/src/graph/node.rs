//! Reference nodes: the per-node state built by the graph.
//!
//! A node wraps one or more asset identifiers collapsed into a single visual
//! unit and carries everything the presentation layer needs: layout position,
//! title/comment strings, kind flags, cached metadata, and two edge
//! endpoints. Endpoints start hidden and are unhidden when the first edge
//! attaches, which is how a leaf is distinguished visually from a connected
//! node.

use crate::error::{Error, Result};
use crate::types::{AssetIdentifier, AssetRecord, PackageName, Point};

/// Index of a node in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Extract the raw arena index.
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Presentation kind of a node, in title-color precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A primary (management) asset.
    PrimaryAsset,
    /// A regular package asset.
    Package,
    /// A synthetic node summarizing breadth-limited edges.
    Collapsed,
    /// A searchable value.
    Value,
}

/// One node in a built reference graph.
///
/// Created during construction and destroyed wholesale on every rebuild;
/// there is no incremental update.
#[derive(Debug, Clone)]
pub struct ReferenceNode {
    identifiers: Vec<AssetIdentifier>,
    position: Point,
    title: String,
    comment: String,
    is_package: bool,
    is_primary_asset: bool,
    is_collapsed: bool,
    uses_thumbnail: bool,
    overflow_count: Option<usize>,
    cached_record: Option<AssetRecord>,
    guessed_class: Option<String>,
    referencer_pin_hidden: bool,
    dependency_pin_hidden: bool,
}

impl ReferenceNode {
    pub(super) fn new() -> Self {
        Self {
            identifiers: Vec::new(),
            position: Point::ORIGIN,
            title: String::new(),
            comment: String::new(),
            is_package: false,
            is_primary_asset: false,
            is_collapsed: false,
            uses_thumbnail: false,
            overflow_count: None,
            cached_record: None,
            guessed_class: None,
            referencer_pin_hidden: true,
            dependency_pin_hidden: true,
        }
    }

    /// Populate this node as a regular (non-collapsed) node.
    ///
    /// `record` is the best-effort metadata for the first identifier's
    /// package; `is_map_package` is the registry's map hint, consulted only
    /// when the record cannot be cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyIdentifierBatch`] if `identifiers` is empty.
    pub(super) fn setup_regular(
        &mut self,
        position: Point,
        identifiers: Vec<AssetIdentifier>,
        record: Option<AssetRecord>,
        is_map_package: bool,
    ) -> Result<()> {
        let first = identifiers.first().ok_or(Error::EmptyIdentifierBatch)?;

        self.position = position;
        self.is_collapsed = false;
        self.is_package = true;
        self.is_primary_asset = false;

        let mut short_name = first
            .package_name()
            .map(|p| p.short_name().to_string())
            .unwrap_or_default();
        if let Some(primary) = first.primary_asset_id() {
            short_name = primary.to_string();
            self.is_package = false;
            self.is_primary_asset = true;
        } else if first.is_value() {
            short_name = first.short_name();
            self.is_package = false;
        }

        if identifiers.len() == 1 {
            if self.is_package {
                self.comment = first
                    .package_name()
                    .map(ToString::to_string)
                    .unwrap_or_default();
            }
            self.title = short_name;
        } else {
            self.comment = format!("{} nodes", identifiers.len());
            self.title = format!("{short_name} and {} others", identifiers.len() - 1);
        }

        self.identifiers = identifiers;
        self.cache_asset_data(record, is_map_package);
        Ok(())
    }

    /// Populate this node as the synthetic summary of breadth-limited edges.
    pub(super) fn setup_collapsed(&mut self, position: Point, overflow_count: usize) {
        self.position = position;
        self.identifiers.clear();
        self.is_collapsed = true;
        self.is_package = false;
        self.is_primary_asset = false;
        self.overflow_count = Some(overflow_count);
        self.comment = format!("{overflow_count} other nodes");
        self.title = "Collapsed nodes".to_string();
        self.cache_asset_data(None, false);
    }

    /// Cache metadata for presentation, guessing a class when it is missing.
    ///
    /// Valid metadata on a package node enables the thumbnail; otherwise the
    /// class falls back to `Code` for script packages, `World` for map
    /// packages, and `Multiple Nodes` for anything that is not a single
    /// identifier.
    fn cache_asset_data(&mut self, record: Option<AssetRecord>, is_map_package: bool) {
        if record.is_some() && self.is_package {
            self.uses_thumbnail = true;
            self.cached_record = record;
            self.guessed_class = None;
            return;
        }

        self.cached_record = None;
        self.uses_thumbnail = false;
        self.guessed_class = if self.identifiers.len() == 1 {
            let package = self.identifiers[0].package_name();
            if package.is_some_and(PackageName::is_script) {
                Some("Code".to_string())
            } else if is_map_package {
                Some("World".to_string())
            } else {
                None
            }
        } else {
            Some("Multiple Nodes".to_string())
        };
    }

    pub(super) fn show_referencer_pin(&mut self) {
        self.referencer_pin_hidden = false;
    }

    pub(super) fn show_dependency_pin(&mut self) {
        self.dependency_pin_hidden = false;
    }

    /// The first identifier, if any. Collapsed nodes have none.
    #[must_use]
    pub fn identifier(&self) -> Option<&AssetIdentifier> {
        self.identifiers.first()
    }

    /// All identifiers collapsed into this node.
    #[must_use]
    pub fn identifiers(&self) -> &[AssetIdentifier] {
        &self.identifiers
    }

    /// Only the package names on this node, skipping searchable values.
    #[must_use]
    pub fn package_names(&self) -> Vec<&PackageName> {
        let mut names: Vec<&PackageName> = Vec::new();
        for id in &self.identifiers {
            if id.is_package() {
                if let Some(package) = id.package_name() {
                    if !names.contains(&package) {
                        names.push(package);
                    }
                }
            }
        }
        names
    }

    /// Node title shown in the header.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Secondary comment line (full package path or summary text).
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Tooltip text: one identifier per line.
    #[must_use]
    pub fn tooltip(&self) -> String {
        let lines: Vec<String> = self.identifiers.iter().map(ToString::to_string).collect();
        lines.join("\n")
    }

    /// Layout position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Presentation kind, following title-color precedence.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        if self.is_primary_asset {
            NodeKind::PrimaryAsset
        } else if self.is_package {
            NodeKind::Package
        } else if self.is_collapsed {
            NodeKind::Collapsed
        } else {
            NodeKind::Value
        }
    }

    /// Whether this node denotes a plain package asset.
    #[must_use]
    pub fn is_package(&self) -> bool {
        self.is_package
    }

    /// Whether this is a synthetic collapsed-overflow node.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    /// How many edges this collapsed node summarizes, if it is one.
    #[must_use]
    pub fn overflow_count(&self) -> Option<usize> {
        self.overflow_count
    }

    /// Whether a thumbnail can be rendered from cached metadata.
    #[must_use]
    pub fn uses_thumbnail(&self) -> bool {
        self.uses_thumbnail
    }

    /// Cached asset metadata, when resolution succeeded.
    #[must_use]
    pub fn asset_record(&self) -> Option<&AssetRecord> {
        self.cached_record.as_ref()
    }

    /// The asset class for display: cached, guessed, or a placeholder.
    #[must_use]
    pub fn asset_class(&self) -> &str {
        if let Some(record) = &self.cached_record {
            return &record.asset_class;
        }
        self.guessed_class.as_deref().unwrap_or("Unknown")
    }

    /// Whether the referencer-side endpoint has at least one edge.
    #[must_use]
    pub fn referencer_pin_visible(&self) -> bool {
        !self.referencer_pin_hidden
    }

    /// Whether the dependency-side endpoint has at least one edge.
    #[must_use]
    pub fn dependency_pin_visible(&self) -> bool {
        !self.dependency_pin_hidden
    }
}
