//! Registry source selection and filtering.
//!
//! The viewer can look at the live editor registry or at a custom source
//! built from cooked platform data. A custom source does not contain every
//! editor package: packages absent from it are dropped from query results,
//! and a dropped redirector is transparently replaced by the edges it
//! forwards to, so renamed assets still connect through.

use tracing::debug;

use super::AssetRegistry;
use crate::types::{AssetIdentifier, ClassFilter};

/// Which registry state backs the current view.
///
/// Passed to the graph at construction rather than fetched from module-wide
/// state; the editor source never filters.
pub enum RegistrySource<'a> {
    /// The live editor registry; every package is present.
    Editor,
    /// A custom (cooked) registry state that filters to its own contents.
    Custom {
        /// Display name of the source, e.g. a platform name.
        name: String,
        /// The cooked registry state queried for presence and redirector edges.
        state: &'a dyn AssetRegistry,
    },
}

impl RegistrySource<'_> {
    /// Whether this is the unfiltered editor source.
    #[must_use]
    pub fn is_editor(&self) -> bool {
        matches!(self, Self::Editor)
    }

    /// Display name of the source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Editor => "Editor",
            Self::Custom { name, .. } => name,
        }
    }

    /// Drop identifiers whose packages are absent from this source.
    ///
    /// No-op for the editor source. For a custom source, an absent package is
    /// removed; if `filter` covers any edge class and the removed package
    /// holds a redirector in the editor registry, the redirector's own edges
    /// from the custom state (dependencies when `forward`, referencers
    /// otherwise) are spliced in at the same position. Returns whether the
    /// list changed.
    pub fn filter_identifiers(
        &self,
        editor: &dyn AssetRegistry,
        identifiers: &mut Vec<AssetIdentifier>,
        filter: ClassFilter,
        forward: bool,
    ) -> bool {
        let Self::Custom { name, state } = self else {
            return false;
        };

        let mut changed = false;
        let mut index = 0;
        while index < identifiers.len() {
            let Some(package) = identifiers[index].package_name().cloned() else {
                index += 1;
                continue;
            };

            let present = state
                .package_disk_size(&package)
                .is_some_and(|size| size >= 0);
            if present {
                index += 1;
                continue;
            }

            identifiers.remove(index);
            changed = true;
            debug!(package = %package, source = %name, "package absent from registry source");

            if !filter.is_empty() {
                let is_redirector = editor
                    .assets_in_package(&package)
                    .iter()
                    .any(|asset| asset.is_redirector);
                if is_redirector {
                    let proxy = AssetIdentifier::package(package.as_str());
                    let found = if forward {
                        state.dependencies(&proxy, filter)
                    } else {
                        state.referencers(&proxy, filter)
                    };
                    identifiers.splice(index..index, found);
                }
            }
            // Re-examine this index: it was removed or replaced.
        }

        changed
    }
}
