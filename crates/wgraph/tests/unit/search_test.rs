//! Unit tests for A* shortest-path search.

use wgraph::Graph;

// Helper: vertices {1,2,3,4} with edges 1->2(5), 2->3(1), 3->1(9), 4->2(3)
fn create_sample_graph() -> Graph<u32, &'static str> {
    let graph = Graph::new();
    graph.set(1, "123");
    graph.set(2, "678");
    graph.set(3, "abc");
    graph.set(4, "xyz");

    graph.connect(&1, &2, 5);
    graph.connect(&2, &3, 1);
    graph.connect(&3, &1, 9);
    graph.connect(&4, &2, 3);

    graph
}

// Helper: a size x size grid with unit weights in all four directions
fn create_grid(size: i32) -> Graph<(i32, i32), ()> {
    let graph = Graph::new();
    for x in 0..size {
        for y in 0..size {
            graph.set((x, y), ());
        }
    }
    for x in 0..size {
        for y in 0..size {
            if x + 1 < size {
                graph.connect_undirected(&(x, y), &(x + 1, y), 1);
            }
            if y + 1 < size {
                graph.connect_undirected(&(x, y), &(x, y + 1), 1);
            }
        }
    }
    graph
}

fn manhattan(a: &(i32, i32), b: &(i32, i32)) -> i64 {
    i64::from((a.0 - b.0).abs() + (a.1 - b.1).abs())
}

#[test]
fn test_zero_heuristic_finds_cheapest_path() {
    let graph = create_sample_graph();

    let route = graph.shortest_path(&1, &3, |_, _| 0).unwrap();
    assert_eq!(route.cost, 6);
    assert_eq!(route.hops(), 2);
}

#[test]
fn test_path_runs_from_end_to_start() {
    let graph = create_sample_graph();

    let route = graph.shortest_path_dijkstra(&1, &3).unwrap();
    assert_eq!(route.keys, vec![3, 2, 1]);
    assert_eq!(route.end(), Some(&3));
    assert_eq!(route.start(), Some(&1));
}

#[test]
fn test_unreachable_end() {
    let graph = create_sample_graph();

    // nothing leads into 4
    assert!(graph.shortest_path(&1, &4, |_, _| 0).is_none());
}

#[test]
fn test_unknown_start_or_end() {
    let graph = create_sample_graph();

    assert!(graph.shortest_path_dijkstra(&1, &99).is_none());
    assert!(graph.shortest_path_dijkstra(&99, &1).is_none());
}

#[test]
fn test_path_through_cycle() {
    let graph = create_sample_graph();

    // 4 -> 2 -> 3 -> 1
    let route = graph.shortest_path_dijkstra(&4, &1).unwrap();
    assert_eq!(route.keys, vec![1, 3, 2, 4]);
    assert_eq!(route.cost, 13);
}

#[test]
fn test_prefers_cheaper_longer_path() {
    let graph: Graph<&str, ()> = Graph::new();
    for key in ["s", "a", "b", "c", "t"] {
        graph.set(key, ());
    }
    graph.connect(&"s", &"t", 10);
    graph.connect(&"s", &"a", 1);
    graph.connect(&"a", &"b", 1);
    graph.connect(&"b", &"c", 1);
    graph.connect(&"c", &"t", 1);

    let route = graph.shortest_path_dijkstra(&"s", &"t").unwrap();
    assert_eq!(route.keys, vec!["t", "c", "b", "a", "s"]);
    assert_eq!(route.cost, 4);
}

#[test]
fn test_manhattan_heuristic_on_grid() {
    let graph = create_grid(5);

    let informed = graph.shortest_path(&(0, 0), &(4, 4), manhattan).unwrap();
    let plain = graph.shortest_path_dijkstra(&(0, 0), &(4, 4)).unwrap();

    assert_eq!(informed.cost, 8);
    assert_eq!(plain.cost, 8);
    assert_eq!(informed.hops(), 8);
    assert_eq!(informed.start(), Some(&(0, 0)));
    assert_eq!(informed.end(), Some(&(4, 4)));
}

#[test]
fn test_heuristic_receives_end_key() {
    let graph = create_sample_graph();
    let mut seen_ends = Vec::new();

    graph.shortest_path(&1, &3, |_, end| {
        seen_ends.push(*end);
        0
    });

    assert!(!seen_ends.is_empty());
    assert!(seen_ends.iter().all(|end| *end == 3));
}

#[test]
fn test_overestimating_heuristic_still_terminates() {
    let graph = create_grid(4);

    let route = graph
        .shortest_path(&(0, 0), &(3, 3), |a, b| manhattan(a, b) * 50)
        .unwrap();
    assert!(route.cost >= 6);
    assert_eq!(route.start(), Some(&(0, 0)));
}

#[test]
fn test_search_does_not_mutate_graph() {
    let graph = create_sample_graph();
    let before = graph.edges();

    graph.shortest_path_dijkstra(&1, &3);
    graph.shortest_path_dijkstra(&1, &4);

    assert_eq!(graph.edges(), before);
    assert_eq!(graph.len(), 4);
}
