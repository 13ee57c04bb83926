mod common;

use std::collections::HashSet;

use campusmap_lib::{derive_routes, Category, Position};
use common::record;

#[test]
fn complete_graph_edge_count_for_small_sets() {
    for n in 0..=6usize {
        let locations: Vec<_> = (0..n)
            .map(|i| {
                record(
                    &format!("loc-{i}"),
                    &format!("Point {i}"),
                    i as f64 * 10.0,
                    i as f64 * 5.0,
                    Category::Building,
                )
            })
            .collect();

        let edges = derive_routes(&locations);
        assert_eq!(edges.len(), n * n.saturating_sub(1) / 2, "n = {n}");
    }
}

#[test]
fn no_unordered_pair_appears_twice() {
    let locations: Vec<_> = (0..5)
        .map(|i| {
            record(
                &format!("loc-{i}"),
                &format!("Point {i}"),
                i as f64,
                0.0,
                Category::Hostel,
            )
        })
        .collect();

    let edges = derive_routes(&locations);
    let mut seen = HashSet::new();
    for edge in &edges {
        assert_ne!(edge.from, edge.to, "edges connect distinct locations");
        let mut pair = [edge.from.as_str(), edge.to.as_str()];
        pair.sort_unstable();
        assert!(seen.insert(pair), "duplicate pair {pair:?}");
    }
}

#[test]
fn edge_ids_are_sequential_from_one_within_a_pass() {
    let locations = vec![
        record("a", "Alpha", 0.0, 0.0, Category::Building),
        record("b", "Beta", 10.0, 0.0, Category::Library),
        record("c", "Gamma", 0.0, 10.0, Category::Gym),
    ];

    let edges = derive_routes(&locations);
    let ids: Vec<_> = edges.iter().map(|edge| edge.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn from_precedes_to_in_iteration_order() {
    let locations = vec![
        record("a", "Alpha", 0.0, 0.0, Category::Building),
        record("b", "Beta", 10.0, 0.0, Category::Library),
        record("c", "Gamma", 0.0, 10.0, Category::Gym),
    ];

    let edges = derive_routes(&locations);
    let pairs: Vec<_> = edges
        .iter()
        .map(|edge| (edge.from.as_str(), edge.to.as_str()))
        .collect();
    assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
}

#[test]
fn paths_are_straight_segments_between_the_endpoints() {
    let locations = vec![
        record("a", "Alpha", 0.0, 0.0, Category::Building),
        record("b", "Beta", 3.0, 4.0, Category::Library),
    ];

    let edges = derive_routes(&locations);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].path.start, Position::new(0.0, 0.0));
    assert_eq!(edges[0].path.end, Position::new(3.0, 4.0));
    assert!((edges[0].path.length() - 5.0).abs() < f64::EPSILON);
}

#[test]
fn singleton_and_empty_sets_have_no_edges() {
    assert!(derive_routes(&[]).is_empty());

    let one = vec![record("a", "Alpha", 1.0, 1.0, Category::Cafeteria)];
    assert!(derive_routes(&one).is_empty());
}
