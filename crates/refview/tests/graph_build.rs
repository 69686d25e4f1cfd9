//! End-to-end graph construction tests over an in-memory registry.
//!
//! These cover the observable build contract: node counts, limits, filtering,
//! layout extents, and rebuild stability.

use rstest::rstest;

use refview::{
    AssetIdentifier, DependencyClass, MemoryRegistry, NodeKind, Point, ReferenceGraph,
    RegistrySnapshot,
};

mod common;
use common::{HERO_SNAPSHOT_JSON, hero_registry};

fn pkg(name: &str) -> AssetIdentifier {
    AssetIdentifier::package(name)
}

fn chain_registry(length: usize) -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    for index in 0..length {
        registry.add_edge(
            pkg(&format!("/Game/Chain{index}")),
            pkg(&format!("/Game/Chain{}", index + 1)),
            DependencyClass::Hard,
        );
    }
    registry
}

#[test]
fn hero_graph_shows_both_directions() {
    let registry = hero_registry();
    let mut graph = ReferenceGraph::new(&registry);
    graph.set_root(vec![pkg("/Game/Hero")], Point::ORIGIN);
    let root = graph.rebuild().expect("rebuild").expect("root");

    assert_eq!(graph.referencers_of(root).len(), 1);
    // Mesh and portrait; the script package is filtered out.
    assert_eq!(graph.dependencies_of(root).len(), 2);
    assert!(graph.find_node(&pkg("/Script/Engine")).is_none());
    assert!(graph.find_node(&pkg("/Game/Level_01")).is_some());
}

#[test]
fn snapshot_loaded_registry_builds_the_same_graph() {
    let snapshot: RegistrySnapshot =
        serde_json::from_str(HERO_SNAPSHOT_JSON).expect("snapshot parses");
    let registry = MemoryRegistry::from_snapshot(&snapshot).expect("registry builds");

    let mut graph = ReferenceGraph::new(&registry);
    graph.set_root(vec![pkg("/Game/Hero")], Point::ORIGIN);
    let root = graph.rebuild().expect("rebuild").expect("root");

    assert_eq!(graph.referencers_of(root).len(), 1);
    assert_eq!(graph.dependencies_of(root).len(), 2);

    // Metadata resolved from the snapshot's asset records.
    let mesh = graph.find_node(&pkg("/Game/Hero_Mesh")).expect("mesh node");
    assert_eq!(graph.node(mesh).asset_class(), "StaticMesh");
    assert!(graph.node(mesh).uses_thumbnail());
}

#[rstest]
#[case(1, 2)]
#[case(3, 4)]
#[case(10, 7)]
fn depth_limit_bounds_chain_node_count(#[case] depth: u32, #[case] expected_nodes: usize) {
    // Chain of 6 edges rooted at the start: only the dependency side grows.
    let registry = chain_registry(6);
    let mut graph = ReferenceGraph::new(&registry);
    graph.set_max_search_depth(depth);
    graph.set_root(vec![pkg("/Game/Chain0")], Point::ORIGIN);
    graph.rebuild().expect("rebuild").expect("root");

    assert_eq!(graph.node_count(), expected_nodes);
}

#[test]
fn chain_interior_root_sees_both_sides() {
    let registry = chain_registry(4);
    let mut graph = ReferenceGraph::new(&registry);
    graph.set_max_search_depth(10);
    graph.set_root(vec![pkg("/Game/Chain2")], Point::ORIGIN);
    let root = graph.rebuild().expect("rebuild").expect("root");

    // Two hops of referencers, two of dependencies, plus the root.
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.referencers_of(root).len(), 1);
    assert_eq!(graph.dependencies_of(root).len(), 1);
    // A linear chain never stacks vertically.
    for (_, node) in graph.nodes() {
        assert_eq!(node.position().y, 0);
    }
}

#[rstest]
#[case(15, 20, 15, 5)]
#[case(3, 10, 3, 7)]
fn breadth_limit_collapses_overflow(
    #[case] breadth: usize,
    #[case] fan: usize,
    #[case] explicit: usize,
    #[case] collapsed_count: usize,
) {
    let mut registry = MemoryRegistry::new();
    for index in 0..fan {
        registry.add_edge(
            pkg("/Game/Root"),
            pkg(&format!("/Game/Fan{index}")),
            DependencyClass::Hard,
        );
    }

    let mut graph = ReferenceGraph::new(&registry);
    graph.set_max_search_breadth(breadth);
    graph.set_root(vec![pkg("/Game/Root")], Point::ORIGIN);
    let root = graph.rebuild().expect("rebuild").expect("root");

    let children = graph.dependencies_of(root);
    let (collapsed, regular): (Vec<_>, Vec<_>) = children
        .into_iter()
        .partition(|id| graph.node(*id).is_collapsed());

    assert_eq!(regular.len(), explicit);
    assert_eq!(collapsed.len(), 1);
    assert_eq!(
        graph.node(collapsed[0]).overflow_count(),
        Some(collapsed_count)
    );
    assert_eq!(graph.node(collapsed[0]).kind(), NodeKind::Collapsed);
}

#[test]
fn disabling_the_breadth_limit_expands_everything() {
    let mut registry = MemoryRegistry::new();
    for index in 0..40 {
        registry.add_edge(
            pkg("/Game/Root"),
            pkg(&format!("/Game/Fan{index}")),
            DependencyClass::Hard,
        );
    }

    let mut graph = ReferenceGraph::new(&registry);
    graph.set_limit_search_breadth(false);
    graph.set_root(vec![pkg("/Game/Root")], Point::ORIGIN);
    let root = graph.rebuild().expect("rebuild").expect("root");

    assert_eq!(graph.dependencies_of(root).len(), 40);
    assert!(
        graph.nodes().all(|(_, node)| !node.is_collapsed()),
        "no collapsed node when the limit is off"
    );
}

#[test]
fn diamond_shares_no_duplicate_nodes_within_a_direction() {
    // Root -> {Left, Right} -> Shared.
    let mut registry = MemoryRegistry::new();
    registry.add_edge(pkg("/Game/Root"), pkg("/Game/Left"), DependencyClass::Hard);
    registry.add_edge(pkg("/Game/Root"), pkg("/Game/Right"), DependencyClass::Hard);
    registry.add_edge(pkg("/Game/Left"), pkg("/Game/Shared"), DependencyClass::Hard);
    registry.add_edge(pkg("/Game/Right"), pkg("/Game/Shared"), DependencyClass::Hard);

    let mut graph = ReferenceGraph::new(&registry);
    graph.set_max_search_depth(3);
    graph.set_root(vec![pkg("/Game/Root")], Point::ORIGIN);
    graph.rebuild().expect("rebuild").expect("root");

    let shared_nodes = graph
        .nodes()
        .filter(|(_, node)| node.identifier() == Some(&pkg("/Game/Shared")))
        .count();
    assert_eq!(shared_nodes, 1, "shared target is visited once");
}

#[test]
fn rebuild_after_settings_change_reflects_new_limits() {
    let registry = chain_registry(5);
    let mut graph = ReferenceGraph::new(&registry);
    graph.set_root(vec![pkg("/Game/Chain0")], Point::ORIGIN);

    graph.rebuild().expect("rebuild").expect("root");
    assert_eq!(graph.node_count(), 2);

    graph.set_max_search_depth(4);
    graph.rebuild().expect("rebuild").expect("root");
    assert_eq!(graph.node_count(), 5);
}

#[test]
fn collection_filter_applies_to_snapshot_collections() {
    let snapshot: RegistrySnapshot =
        serde_json::from_str(HERO_SNAPSHOT_JSON).expect("snapshot parses");
    let registry = MemoryRegistry::from_snapshot(&snapshot).expect("registry builds");

    let mut graph = ReferenceGraph::new(&registry);
    graph.set_collection_filter(Some("HeroAssets".to_string()));
    graph.set_root(vec![pkg("/Game/Hero")], Point::ORIGIN);
    graph.rebuild().expect("rebuild").expect("root");

    assert!(graph.find_node(&pkg("/Game/Hero_Mesh")).is_some());
    assert!(
        graph.find_node(&pkg("/Game/Hero_Portrait")).is_none(),
        "portrait is outside the collection"
    );
    assert!(
        graph.find_node(&pkg("/Game/Level_01")).is_none(),
        "level is outside the collection"
    );
}

#[test]
fn multi_root_builds_a_single_summary_node() {
    let mut registry = MemoryRegistry::new();
    registry.add_edge(pkg("/Game/A"), pkg("/Game/Shared"), DependencyClass::Hard);
    registry.add_edge(pkg("/Game/B"), pkg("/Game/Shared"), DependencyClass::Hard);

    let mut graph = ReferenceGraph::new(&registry);
    graph.set_root(vec![pkg("/Game/A"), pkg("/Game/B")], Point::ORIGIN);
    let root = graph.rebuild().expect("rebuild").expect("root");

    let root_node = graph.node(root);
    assert_eq!(root_node.identifiers().len(), 2);
    assert_eq!(root_node.title(), "A and 1 others");
    assert_eq!(root_node.comment(), "2 nodes");
    // Both roots' dependencies merge onto the one root node.
    assert_eq!(graph.dependencies_of(root).len(), 1);
}

#[test]
fn value_nodes_use_half_row_layout() {
    let mut registry = MemoryRegistry::new();
    let table = AssetIdentifier::value("/Game/Tables/Loot", "Loot", "Epic");
    registry.add_edge(
        pkg("/Game/Quest"),
        table.clone(),
        DependencyClass::SearchableName,
    );
    registry.add_edge(pkg("/Game/Quest"), pkg("/Game/Reward"), DependencyClass::Hard);

    let mut graph = ReferenceGraph::new(&registry);
    graph.set_show_searchable_names(true);
    graph.set_root(vec![pkg("/Game/Quest")], Point::ORIGIN);
    graph.rebuild().expect("rebuild").expect("root");

    let value_node = graph.find_node(&table).expect("value node");
    assert_eq!(graph.node(value_node).kind(), NodeKind::Value);
    let reward = graph.find_node(&pkg("/Game/Reward")).expect("reward node");
    assert_ne!(
        graph.node(value_node).position().y,
        graph.node(reward).position().y,
        "siblings occupy distinct rows"
    );
}
