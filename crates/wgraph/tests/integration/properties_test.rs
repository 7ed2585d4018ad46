//! Property tests for edge symmetry, directedness, and search results.

use proptest::prelude::*;
use std::collections::HashMap;
use wgraph::Graph;

fn edge_list(max_vertex: u8) -> impl Strategy<Value = Vec<(u8, u8, i64)>> {
    prop::collection::vec((0..max_vertex, 0..max_vertex, 0i64..100), 0..60)
}

fn build(vertices: u8, edges: &[(u8, u8, i64)]) -> Graph<u8, ()> {
    let graph = Graph::new();
    for key in 0..vertices {
        graph.set(key, ());
    }
    for (from, to, weight) in edges {
        graph.connect(from, to, *weight);
    }
    graph
}

/// Plain Bellman-Ford relaxation as a reference for non-negative weights.
fn reference_cost(vertices: u8, edges: &[(u8, u8, i64)], start: u8, end: u8) -> Option<i64> {
    // last write wins, matching connect's overwrite
    let mut unique: HashMap<(u8, u8), i64> = HashMap::new();
    for (from, to, weight) in edges {
        if from != to {
            unique.insert((*from, *to), *weight);
        }
    }

    let mut dist: Vec<Option<i64>> = vec![None; vertices as usize];
    dist[start as usize] = Some(0);
    for _ in 0..vertices {
        for (&(from, to), &weight) in &unique {
            if let Some(d) = dist[from as usize] {
                let candidate = d + weight;
                if dist[to as usize].map_or(true, |current| candidate < current) {
                    dist[to as usize] = Some(candidate);
                }
            }
        }
    }
    dist[end as usize]
}

proptest! {
    #[test]
    fn prop_connect_is_directed(a in 0u8..20, b in 0u8..20, w in -50i64..50) {
        prop_assume!(a != b);
        let graph = build(20, &[]);

        prop_assert!(graph.connect(&a, &b, w));
        prop_assert_eq!(graph.is_connected(&a, &b), Some(w));
        prop_assert_eq!(graph.is_connected(&b, &a), None);
    }

    #[test]
    fn prop_self_loops_always_rejected(a in 0u8..20, w in any::<i64>()) {
        let graph = build(20, &[]);
        prop_assert!(!graph.connect(&a, &a, w));
        prop_assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn prop_delete_leaves_no_references(edges in edge_list(12), victim in 0u8..12) {
        let graph = build(12, &edges);
        let id = graph.get(&victim).unwrap().id();

        prop_assert!(graph.delete(&victim));
        for vertex in graph.get_all() {
            prop_assert!(!vertex.outgoing().contains_key(&id));
            prop_assert!(!vertex.incoming().contains_key(&id));
        }
    }

    #[test]
    fn prop_edge_maps_stay_symmetric(edges in edge_list(10), removals in edge_list(10)) {
        let graph = build(10, &edges);
        for (from, to, _) in &removals {
            graph.disconnect(from, to);
        }

        let mut out_total = 0usize;
        for vertex in graph.get_all() {
            let key = *vertex.key();
            for (target, weight) in graph.outgoing(&key).unwrap() {
                let incoming = graph.incoming(&target).unwrap();
                prop_assert_eq!(incoming.get(&key), Some(&weight));
                out_total += 1;
            }
        }
        prop_assert_eq!(out_total, graph.edge_count());
    }

    #[test]
    fn prop_dijkstra_matches_reference(edges in edge_list(10), start in 0u8..10, end in 0u8..10) {
        let graph = build(10, &edges);
        let found = graph.shortest_path_dijkstra(&start, &end);
        let expected = reference_cost(10, &edges, start, end);

        prop_assert_eq!(found.as_ref().map(|route| route.cost), expected);
        if let Some(route) = found {
            prop_assert_eq!(route.end(), Some(&end));
            prop_assert_eq!(route.start(), Some(&start));

            // consecutive keys (end -> start order) are real edges summing to the cost
            let mut total = 0i64;
            for pair in route.keys.windows(2) {
                total += graph.is_connected(&pair[1], &pair[0]).unwrap();
            }
            prop_assert_eq!(total, route.cost);
        }
    }
}
