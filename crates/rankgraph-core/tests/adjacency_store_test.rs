use rankgraph_core::error::CoreError;
use rankgraph_core::store::AdjacencyStore;

#[test]
fn add_edge_links_both_chains() {
    let mut s = AdjacencyStore::with_capacity(2);
    let a = s.add_node();
    let b = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();

    assert_eq!(s.out_edges(a).count(), 1);
    assert_eq!(s.in_edges(b).count(), 1);
    assert_eq!(s.out_edges(b).count(), 0);
    assert_eq!(s.in_edges(a).count(), 0);
}

#[test]
fn duplicate_edge_is_rejected() {
    let mut s = AdjacencyStore::with_capacity(2);
    let a = s.add_node();
    let b = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();

    assert_eq!(
        s.add_edge(a, b, 2.0),
        Err(CoreError::DuplicateEdge { src: a, dst: b })
    );
}

#[test]
fn self_loop_is_allowed() {
    let mut s = AdjacencyStore::with_capacity(1);
    let a = s.add_node();
    s.add_edge(a, a, 1.0).unwrap();

    assert_eq!(s.out_edges(a).count(), 1);
    assert_eq!(s.in_edges(a).count(), 1);
}

#[test]
fn remove_edge_unsplices_from_both_chains() {
    let mut s = AdjacencyStore::with_capacity(3);
    let a = s.add_node();
    let b = s.add_node();
    let c = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();
    s.add_edge(a, c, 2.0).unwrap();

    s.remove_edge(a, b).unwrap();

    assert_eq!(s.out_edges(a).count(), 1);
    assert_eq!(s.out_edges(a).next().unwrap().dst(), c);
    assert_eq!(s.in_edges(b).count(), 0);
    assert_eq!(s.num_edges(), 1);
}

#[test]
fn remove_edge_frees_the_slot_for_reuse() {
    let mut s = AdjacencyStore::with_capacity(2);
    let a = s.add_node();
    let b = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();
    s.remove_edge(a, b).unwrap();
    assert_eq!(s.num_edges(), 0);

    s.add_edge(a, b, 5.0).unwrap();
    assert_eq!(s.num_edges(), 1);
    assert_eq!(s.get_edge(a, b).unwrap().weight(), 5.0);
}

#[test]
fn remove_node_removes_all_incident_edges_including_self_loop() {
    let mut s = AdjacencyStore::with_capacity(3);
    let a = s.add_node();
    let b = s.add_node();
    let c = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();
    s.add_edge(c, a, 1.0).unwrap();
    s.add_edge(a, a, 1.0).unwrap();

    s.remove_node(a).unwrap();

    assert!(!s.is_live(a));
    assert_eq!(s.num_edges(), 0);
    assert_eq!(s.out_edges(b).count(), 0);
    assert_eq!(s.out_edges(c).count(), 0);
}

#[test]
fn remove_node_twice_fails() {
    let mut s = AdjacencyStore::with_capacity(1);
    let a = s.add_node();
    s.remove_node(a).unwrap();
    assert_eq!(s.remove_node(a), Err(CoreError::NodeNotFound { id: a }));
}

#[test]
fn compact_nodes_is_noop_without_removals() {
    let mut s = AdjacencyStore::with_capacity(2);
    s.add_node();
    s.add_node();
    assert_eq!(s.compact_nodes(), None);
}

#[test]
fn compact_nodes_renumbers_edges_consistently() {
    let mut s = AdjacencyStore::with_capacity(3);
    let a = s.add_node();
    let b = s.add_node();
    let c = s.add_node();
    s.add_edge(a, c, 1.0).unwrap();
    s.remove_node(b).unwrap();

    let mapping = s.compact_nodes().expect("vacant slot should trigger compaction");
    let new_a = mapping[a];
    let new_c = mapping[c];

    assert_eq!(s.num_nodes(), 2);
    assert_eq!(s.slot_count(), 2);
    assert_eq!(s.get_edge(new_a, new_c).unwrap().weight(), 1.0);
}

#[test]
fn add_edge_to_unknown_endpoint_fails() {
    let mut s = AdjacencyStore::with_capacity(1);
    let a = s.add_node();
    assert_eq!(
        s.add_edge(a, 99, 1.0),
        Err(CoreError::UnknownEndpoint { index: 99 })
    );
}
