use rankgraph_core::graph::Graph;
use rankgraph_core::pagerank::{self, Config};
use rankgraph_core::store::AdjacencyStore;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn uniform_cycle_converges_to_uniform_scores() {
    let mut s = AdjacencyStore::with_capacity(4);
    let nodes: Vec<usize> = (0..4).map(|_| s.add_node()).collect();
    for i in 0..4 {
        s.add_edge(nodes[i], nodes[(i + 1) % 4], 1.0).unwrap();
    }

    let outcome = pagerank::run(&s, &Config::default()).unwrap();
    assert!(outcome.converged);
    for &score in &outcome.scores {
        assert!(approx(score, 0.25, 1e-6), "score {score} not close to 0.25");
    }
}

#[test]
fn scores_sum_to_one_over_live_nodes() {
    let mut s = AdjacencyStore::with_capacity(5);
    let a = s.add_node();
    let b = s.add_node();
    let c = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();
    s.add_edge(b, c, 1.0).unwrap();
    s.add_edge(c, a, 1.0).unwrap();
    s.add_edge(a, c, 2.0).unwrap();

    let outcome = pagerank::run(&s, &Config::default()).unwrap();
    let sum: f64 = outcome.scores.iter().sum();
    assert!(approx(sum, 1.0, 1e-6), "sum {sum} not close to 1.0");
}

#[test]
fn dangling_node_mass_is_redistributed_not_lost() {
    let mut s = AdjacencyStore::with_capacity(3);
    let a = s.add_node();
    let b = s.add_node();
    let dangling = s.add_node();
    s.add_edge(a, dangling, 1.0).unwrap();
    s.add_edge(b, a, 1.0).unwrap();

    let outcome = pagerank::run(&s, &Config::default()).unwrap();
    let sum: f64 = outcome.scores.iter().sum();
    assert!(approx(sum, 1.0, 1e-6), "sum {sum} not close to 1.0, mass was lost");
}

#[test]
fn vacant_slots_get_zero_score_and_are_excluded_from_the_sum() {
    let mut s = AdjacencyStore::with_capacity(3);
    let a = s.add_node();
    let b = s.add_node();
    let c = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();
    s.add_edge(b, c, 1.0).unwrap();
    s.add_edge(c, a, 1.0).unwrap();
    s.remove_node(b).unwrap();

    let outcome = pagerank::run(&s, &Config::default()).unwrap();
    assert_eq!(outcome.scores[b], 0.0);
    let sum: f64 = outcome.scores.iter().sum();
    assert!(approx(sum, 1.0, 1e-6));
}

#[test]
fn personalization_biases_rank_toward_target_node() {
    let mut s = AdjacencyStore::with_capacity(3);
    let a = s.add_node();
    let b = s.add_node();
    let c = s.add_node();
    s.add_edge(a, b, 1.0).unwrap();
    s.add_edge(b, c, 1.0).unwrap();
    s.add_edge(c, a, 1.0).unwrap();

    let mut personalization = vec![0.0; 3];
    personalization[a] = 1.0;
    let config = Config {
        personalization: Some(personalization),
        ..Config::default()
    };

    let outcome = pagerank::run(&s, &config).unwrap();
    assert!(outcome.scores[a] > outcome.scores[b]);
    assert!(outcome.scores[a] > outcome.scores[c]);
}

#[test]
fn non_convergence_is_reported_when_max_iterations_is_too_low() {
    let mut s = AdjacencyStore::with_capacity(4);
    let nodes: Vec<usize> = (0..4).map(|_| s.add_node()).collect();
    for i in 0..4 {
        s.add_edge(nodes[i], nodes[(i + 1) % 4], 1.0).unwrap();
    }

    let config = Config {
        max_iterations: 0,
        ..Config::default()
    };
    let outcome = pagerank::run(&s, &config).unwrap();
    assert!(!outcome.converged);
    assert_eq!(outcome.iterations, 0);
}

#[test]
fn empty_graph_converges_trivially() {
    let s = AdjacencyStore::with_capacity(0);
    let outcome = pagerank::run(&s, &Config::default()).unwrap();
    assert!(outcome.converged);
    assert!(outcome.scores.is_empty());
}

#[test]
fn facade_run_pagerank_keys_results_by_name() {
    let mut g = Graph::new();
    for n in ["a", "b", "c"] {
        g.add_node(n).unwrap();
    }
    g.add_edge("a", "b", 1.0).unwrap();
    g.add_edge("b", "c", 1.0).unwrap();
    g.add_edge("c", "a", 1.0).unwrap();

    let (scores, converged, _iterations) =
        g.run_pagerank(0.85, 1e-6, 100, None, None, None).unwrap();
    assert!(converged);
    assert_eq!(scores.len(), 3);
    assert!(scores.contains_key("a"));
}

#[test]
fn personalization_referencing_unknown_name_is_rejected() {
    use rustc_hash::FxHashMap;

    let mut g = Graph::new();
    g.add_node("a").unwrap();
    let mut personalization = FxHashMap::default();
    personalization.insert("ghost".to_string(), 1.0);

    assert!(g
        .run_pagerank(0.85, 1e-6, 100, Some(&personalization), None, None)
        .is_err());
}

#[test]
fn dangling_weight_overrides_personalization_for_dangling_mass() {
    use rustc_hash::FxHashMap;

    let mut g = Graph::new();
    for n in ["a", "b", "c"] {
        g.add_node(n).unwrap();
    }
    // "c" is dangling: it has no outgoing edges, so all of its rank mass is redistributed
    // according to `dangling_weight` instead of `personalization`.
    g.add_edge("a", "b", 1.0).unwrap();
    g.add_edge("b", "a", 1.0).unwrap();
    g.add_edge("a", "c", 1.0).unwrap();

    let mut personalization = FxHashMap::default();
    personalization.insert("a".to_string(), 1.0);

    let mut dangling_weight = FxHashMap::default();
    dangling_weight.insert("b".to_string(), 1.0);

    let (default_scores, _, _) = g
        .run_pagerank(0.85, 1e-9, 200, Some(&personalization), None, None)
        .unwrap();
    let (overridden_scores, _, _) = g
        .run_pagerank(
            0.85,
            1e-9,
            200,
            Some(&personalization),
            None,
            Some(&dangling_weight),
        )
        .unwrap();

    assert_ne!(default_scores["b"], overridden_scores["b"]);
}
