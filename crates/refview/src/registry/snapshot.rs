//! Serialized registry snapshots.
//!
//! A snapshot is the JSON form of everything [`MemoryRegistry`] needs:
//! asset records, classified reference edges, and named collections. The CLI
//! loads one per invocation; tests write them through `tempfile`.
//!
//! [`MemoryRegistry`]: super::MemoryRegistry

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DependencyClass;

/// One asset in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Long package name, e.g. `/Game/Props/Chair`.
    pub package: String,
    /// Object name within the package; defaults to the package's short name.
    #[serde(default)]
    pub asset_name: Option<String>,
    /// Asset class name, e.g. `Texture2D`.
    #[serde(default = "AssetEntry::default_class")]
    pub class: String,
    /// Whether this asset is a redirector.
    #[serde(default)]
    pub redirector: bool,
    /// Whether the package is a map/world package.
    #[serde(default)]
    pub map: bool,
    /// On-disk package size; negative means absent from the source.
    #[serde(default)]
    pub disk_size: i64,
}

impl AssetEntry {
    fn default_class() -> String {
        "Unknown".to_string()
    }
}

/// One directed reference edge in a snapshot.
///
/// `from` references `to`; both sides use the identifier display form
/// (`/Game/A`, `/Game/A.Obj::Row`, `Map:Hub`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeEntry {
    /// The referencer.
    pub from: String,
    /// The dependency.
    pub to: String,
    /// Edge class; defaults to hard.
    #[serde(default = "EdgeEntry::default_class")]
    pub class: DependencyClass,
}

impl EdgeEntry {
    fn default_class() -> DependencyClass {
        DependencyClass::Hard
    }
}

/// The full serialized registry state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Asset records, one per package object.
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
    /// Directed referencer → dependency edges.
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
    /// Named collections mapping to member package names.
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<String>>,
}

impl RegistrySnapshot {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Snapshot`] if it is not valid snapshot JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the snapshot to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text)?;
        Ok(())
    }
}
