use rankgraph_core::attr::AttrValue;
use rankgraph_core::error::CoreError;
use rankgraph_core::graph::Graph;

#[test]
fn add_node_rejects_duplicate_name() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    assert_eq!(
        g.add_node("a"),
        Err(CoreError::NodeExists { name: "a".into() })
    );
}

#[test]
fn add_edge_requires_existing_endpoints() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    assert_eq!(
        g.add_edge("a", "b", 1.0),
        Err(CoreError::NodeMissing { name: "b".into() })
    );
}

#[test]
fn add_edge_passes_through_negative_weight_unsanitized() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.add_edge("a", "b", -1.0).unwrap();
    assert_eq!(g.edge_weight("a", "b").unwrap(), -1.0);
}

#[test]
fn duplicate_edge_by_name_reports_name_keyed_error() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.add_edge("a", "b", 1.0).unwrap();
    assert_eq!(
        g.add_edge("a", "b", 2.0),
        Err(CoreError::EdgeExists {
            src: "a".into(),
            dst: "b".into(),
        })
    );
}

#[test]
fn remove_node_cascades_to_incident_edge_attrs() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.add_edge_with_attrs("a", "b", 1.0, Default::default()).unwrap();
    g.set_node_attr("a", "color", AttrValue::Str("red".into()))
        .unwrap();

    g.remove_node("a").unwrap();

    assert!(!g.contains_node("a"));
    assert!(g.edge_attrs("a", "b").is_err());
}

#[test]
fn out_and_in_neighbors_reflect_names_not_indices() {
    let mut g = Graph::new();
    for n in ["a", "b", "c"] {
        g.add_node(n).unwrap();
    }
    g.add_edge("a", "b", 1.0).unwrap();
    g.add_edge("a", "c", 1.0).unwrap();

    let mut out = g.out_neighbors("a").unwrap();
    out.sort();
    assert_eq!(out, vec!["b", "c"]);
    assert_eq!(g.in_neighbors("b").unwrap(), vec!["a"]);
}

#[test]
fn compact_nodes_preserves_names_and_attrs_after_removal() {
    let mut g = Graph::new();
    for n in ["a", "b", "c"] {
        g.add_node(n).unwrap();
    }
    g.add_edge("a", "c", 1.0).unwrap();
    g.remove_node("b").unwrap();
    g.compact_nodes();

    assert_eq!(g.num_nodes(), 2);
    assert!(g.contains_node("a"));
    assert!(g.contains_node("c"));
    assert!(g.contains_edge("a", "c"));
}

#[test]
fn update_edge_changes_weight_without_duplicating() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.add_edge("a", "b", 1.0).unwrap();
    g.update_edge("a", "b", 9.0).unwrap();
    assert_eq!(g.num_edges(), 1);
}

#[test]
fn removed_edge_can_be_re_added() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.add_edge("a", "b", 1.0).unwrap();
    g.remove_edge("a", "b").unwrap();
    g.add_edge("a", "b", 2.0).unwrap();
    assert_eq!(g.edge_weight("a", "b").unwrap(), 2.0);
}

#[test]
fn removing_node_frees_its_incident_edges_for_reuse() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    g.add_edge("a", "b", 1.0).unwrap();
    g.remove_node("b").unwrap();
    g.add_node("b").unwrap();
    g.add_edge("a", "b", 5.0).unwrap();
    assert_eq!(g.edge_weight("a", "b").unwrap(), 5.0);
}

#[test]
fn update_missing_edge_fails() {
    let mut g = Graph::new();
    g.add_node("a").unwrap();
    g.add_node("b").unwrap();
    assert_eq!(
        g.update_edge("a", "b", 1.0),
        Err(CoreError::EdgeMissing {
            src: "a".into(),
            dst: "b".into(),
        })
    );
}
