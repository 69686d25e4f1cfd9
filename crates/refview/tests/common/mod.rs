//! Shared helpers for refview integration tests.

use std::path::Path;
use std::process::{Command, Output};

use refview::{AssetIdentifier, DependencyClass, MemoryRegistry};

/// Run the refview binary with the given arguments.
#[allow(dead_code)]
pub fn run_refview(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--package", "refview", "--"])
        .args(args)
        .output()
        .expect("failed to execute refview")
}

/// Run refview against a snapshot file.
#[allow(dead_code)]
pub fn run_refview_with_snapshot(snapshot: &Path, args: &[&str]) -> Output {
    let snapshot = snapshot.to_str().expect("snapshot path is UTF-8");
    let mut full = vec!["--snapshot", snapshot];
    full.extend_from_slice(args);
    run_refview(&full)
}

/// A registry with a small content tree:
///
/// ```text
/// /Game/Level_01 --hard--> /Game/Hero --hard--> /Game/Hero_Mesh
///                                    \--soft--> /Game/Hero_Portrait
///                                    \--hard--> /Script/Engine
/// ```
#[allow(dead_code)]
pub fn hero_registry() -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    let hero = AssetIdentifier::package("/Game/Hero");
    registry.add_edge(
        AssetIdentifier::package("/Game/Level_01"),
        hero.clone(),
        DependencyClass::Hard,
    );
    registry.add_edge(
        hero.clone(),
        AssetIdentifier::package("/Game/Hero_Mesh"),
        DependencyClass::Hard,
    );
    registry.add_edge(
        hero.clone(),
        AssetIdentifier::package("/Game/Hero_Portrait"),
        DependencyClass::Soft,
    );
    registry.add_edge(
        hero,
        AssetIdentifier::package("/Script/Engine"),
        DependencyClass::Hard,
    );
    registry
}

/// Snapshot JSON matching [`hero_registry`], for CLI and loader tests.
#[allow(dead_code)]
pub const HERO_SNAPSHOT_JSON: &str = r#"{
    "assets": [
        { "package": "/Game/Hero", "class": "Blueprint", "disk_size": 2048 },
        { "package": "/Game/Hero_Mesh", "class": "StaticMesh", "disk_size": 4096 },
        { "package": "/Game/Hero_Portrait", "class": "Texture2D", "disk_size": 1024 },
        { "package": "/Game/Level_01", "class": "World", "map": true, "disk_size": 8192 }
    ],
    "edges": [
        { "from": "/Game/Level_01", "to": "/Game/Hero", "class": "hard" },
        { "from": "/Game/Hero", "to": "/Game/Hero_Mesh", "class": "hard" },
        { "from": "/Game/Hero", "to": "/Game/Hero_Portrait", "class": "soft" },
        { "from": "/Game/Hero", "to": "/Script/Engine", "class": "hard" }
    ],
    "collections": { "HeroAssets": ["/Game/Hero", "/Game/Hero_Mesh"] }
}"#;
