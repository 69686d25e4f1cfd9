//! Domain types for asset reference graphs.
//!
//! These types mirror the identifiers the host editor's asset registry deals
//! in: packages (`/Game/Props/Chair`), named values inside a package
//! (`/Game/Tables/Loot.LootTable::RowName`), and primary assets tracked by
//! the asset-management system (`Map:Hub`). An [`AssetIdentifier`] is an
//! immutable key over that space; equality and hashing cover the full
//! package/object/value triple.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Package namespace reserved for native/script classes.
///
/// Identifiers under this prefix are engine code, not content, and are
/// excluded from traversal unless native packages are explicitly shown.
pub const SCRIPT_NAMESPACE: &str = "/Script";

// ============================================================================
// Package names
// ============================================================================

/// A long package name such as `/Game/Props/Chair`.
///
/// Newtype over the raw string so package names cannot be confused with
/// object paths or collection names in function signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Create a package name from a raw string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw package name string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this package lives in the native/script namespace.
    #[must_use]
    pub fn is_script(&self) -> bool {
        self.0.starts_with(SCRIPT_NAMESPACE)
    }

    /// The short asset name: everything after the final `/`.
    ///
    /// `/Game/Props/Chair` has the short name `Chair`. Most packages contain
    /// a single asset sharing this name, which is what metadata resolution
    /// guesses at.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The guessed object path for the package's single asset,
    /// e.g. `/Game/Props/Chair.Chair`.
    #[must_use]
    pub fn guessed_object_path(&self) -> String {
        format!("{}.{}", self.0, self.short_name())
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Primary assets
// ============================================================================

/// Identifier of a primary (management) asset: a type plus a name,
/// e.g. `Map:Hub`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimaryAssetId {
    /// The primary asset type, e.g. `Map`.
    pub asset_type: String,
    /// The asset name within the type, e.g. `Hub`.
    pub asset_name: String,
}

impl fmt::Display for PrimaryAssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.asset_type, self.asset_name)
    }
}

// ============================================================================
// Asset identifiers
// ============================================================================

/// Opaque key for one node-worthy thing in the registry: a package, a named
/// value within a package, or a primary asset.
///
/// Immutable once created; build one with [`AssetIdentifier::package`],
/// [`AssetIdentifier::value`], or [`AssetIdentifier::primary`], or parse the
/// display form back with [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetIdentifier {
    package_name: Option<PackageName>,
    object_name: Option<String>,
    value_name: Option<String>,
    primary_asset_type: Option<String>,
}

impl AssetIdentifier {
    /// Identifier for a whole package.
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            package_name: Some(PackageName::new(name)),
            object_name: None,
            value_name: None,
            primary_asset_type: None,
        }
    }

    /// Identifier for a named (searchable) value inside a package object.
    pub fn value(
        package: impl Into<String>,
        object: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            package_name: Some(PackageName::new(package)),
            object_name: Some(object.into()),
            value_name: Some(value.into()),
            primary_asset_type: None,
        }
    }

    /// Identifier for a primary (management) asset.
    pub fn primary(asset_type: impl Into<String>, asset_name: impl Into<String>) -> Self {
        Self {
            package_name: None,
            object_name: Some(asset_name.into()),
            value_name: None,
            primary_asset_type: Some(asset_type.into()),
        }
    }

    /// The package this identifier belongs to, if any.
    ///
    /// Primary asset identifiers have no package.
    #[must_use]
    pub fn package_name(&self) -> Option<&PackageName> {
        self.package_name.as_ref()
    }

    /// Whether this identifier names a searchable value rather than an asset.
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.value_name.is_some()
    }

    /// Whether this identifier denotes a plain package.
    #[must_use]
    pub fn is_package(&self) -> bool {
        self.package_name.is_some() && self.value_name.is_none()
    }

    /// The primary asset id, if this identifier denotes one.
    #[must_use]
    pub fn primary_asset_id(&self) -> Option<PrimaryAssetId> {
        let asset_type = self.primary_asset_type.clone()?;
        Some(PrimaryAssetId {
            asset_type,
            asset_name: self.object_name.clone().unwrap_or_default(),
        })
    }

    /// Whether this identifier is a native/script package (and not a value).
    ///
    /// Values hanging off script packages still qualify for traversal.
    #[must_use]
    pub fn is_native_package(&self) -> bool {
        self.package_name
            .as_ref()
            .is_some_and(PackageName::is_script)
            && !self.is_value()
    }

    /// A short human-readable name for node titles.
    #[must_use]
    pub fn short_name(&self) -> String {
        if let Some(primary) = self.primary_asset_id() {
            return primary.to_string();
        }
        if let (Some(object), Some(value)) = (&self.object_name, &self.value_name) {
            return format!("{object}::{value}");
        }
        self.package_name
            .as_ref()
            .map(|p| p.short_name().to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for AssetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(primary) = self.primary_asset_id() {
            return write!(f, "{primary}");
        }
        match (&self.package_name, &self.object_name, &self.value_name) {
            (Some(package), Some(object), Some(value)) => {
                write!(f, "{package}.{object}::{value}")
            }
            (Some(package), Some(object), None) => write!(f, "{package}.{object}"),
            (Some(package), None, _) => write!(f, "{package}"),
            (None, _, _) => Ok(()),
        }
    }
}

impl FromStr for AssetIdentifier {
    type Err = Error;

    /// Parse the display form back into an identifier.
    ///
    /// - `/Game/A.Obj::Row` is a value identifier
    /// - `Map:Hub` (no leading `/`) is a primary asset identifier
    /// - anything else is a package
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::InvalidIdentifier(s.to_string()));
        }

        if let Some((head, value)) = s.split_once("::") {
            let (package, object) = head
                .split_once('.')
                .ok_or_else(|| Error::InvalidIdentifier(s.to_string()))?;
            if package.is_empty() || object.is_empty() || value.is_empty() {
                return Err(Error::InvalidIdentifier(s.to_string()));
            }
            return Ok(Self::value(package, object, value));
        }

        if !s.starts_with('/') {
            if let Some((asset_type, asset_name)) = s.split_once(':') {
                if asset_type.is_empty() || asset_name.is_empty() {
                    return Err(Error::InvalidIdentifier(s.to_string()));
                }
                return Ok(Self::primary(asset_type, asset_name));
            }
            return Err(Error::InvalidIdentifier(s.to_string()));
        }

        Ok(Self::package(s))
    }
}

// ============================================================================
// Asset metadata
// ============================================================================

/// Metadata for one asset as the registry knows it.
///
/// Resolution is best-effort: a package with no resolvable record is still a
/// valid graph node, it just renders with a guessed classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// The package containing the asset.
    pub package_name: PackageName,
    /// The asset's object name within the package.
    pub asset_name: String,
    /// The asset's class name, e.g. `Texture2D`.
    pub asset_class: String,
    /// Whether this asset is a redirector left behind by a rename/move.
    #[serde(default)]
    pub is_redirector: bool,
}

// ============================================================================
// Layout
// ============================================================================

/// Integer 2D position in graph layout space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position; referencers extend negative, dependencies positive.
    pub x: i32,
    /// Vertical position; children stack downward.
    pub y: i32,
}

impl Point {
    /// The layout origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a point.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Edge classes and query filters
// ============================================================================

/// How one asset refers to another, as recorded in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyClass {
    /// Optional/lazy pointer; target need not load with its owner.
    Soft,
    /// Target must be loaded together with its owner.
    Hard,
    /// Reference to a searchable name (named value) rather than an asset.
    SearchableName,
    /// Soft reference recorded by the asset-management system.
    SoftManage,
    /// Hard reference recorded by the asset-management system.
    HardManage,
}

impl DependencyClass {
    /// Whether this class counts as a hard reference for visual emphasis.
    #[must_use]
    pub fn is_hard(self) -> bool {
        matches!(self, Self::Hard | Self::HardManage)
    }
}

/// The set of [`DependencyClass`]es a registry query should cover.
///
/// Built from the graph's show flags; [`ClassFilter::hard_only`] narrows an
/// existing filter to the classes that count as hard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassFilter {
    /// Include soft references.
    pub soft: bool,
    /// Include hard references.
    pub hard: bool,
    /// Include searchable-name references.
    pub searchable_name: bool,
    /// Include soft management references.
    pub soft_manage: bool,
    /// Include hard management references.
    pub hard_manage: bool,
}

impl ClassFilter {
    /// Whether a given edge class passes this filter.
    #[must_use]
    pub fn contains(&self, class: DependencyClass) -> bool {
        match class {
            DependencyClass::Soft => self.soft,
            DependencyClass::Hard => self.hard,
            DependencyClass::SearchableName => self.searchable_name,
            DependencyClass::SoftManage => self.soft_manage,
            DependencyClass::HardManage => self.hard_manage,
        }
    }

    /// Narrow this filter to hard classes only.
    ///
    /// Soft, searchable-name, and soft-management inclusion is dropped; hard
    /// and hard-management inclusion is preserved as-is.
    #[must_use]
    pub fn hard_only(&self) -> Self {
        Self {
            soft: false,
            hard: self.hard,
            searchable_name: false,
            soft_manage: false,
            hard_manage: self.hard_manage,
        }
    }

    /// Whether the filter excludes every class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.soft || self.hard || self.searchable_name || self.soft_manage || self.hard_manage)
    }
}
