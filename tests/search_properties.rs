use approx::assert_relative_eq;
use pathgraph::{AStar, Dijkstra, Edge, Graph, GraphKind, Heuristic, Node};
use rand::{Rng, SeedableRng, rngs::StdRng};

// Random graph with integer weights so path sums compare exactly
fn random_graph(kind: GraphKind, node_count: u32, rng: &mut StdRng) -> Graph<u32> {
    let mut graph = Graph::new(kind);
    for id in 0..node_count {
        graph.add_node(Node::new(id)).unwrap();
    }

    let mut edge_id = 0;
    for a in 0..node_count {
        for b in 0..node_count {
            if a == b || !rng.random_bool(0.3) {
                continue;
            }
            let weight = rng.random_range(0..10) as f64;
            let edge = match kind {
                GraphKind::Directed => Edge::directed(edge_id, a, b),
                GraphKind::Undirected => Edge::undirected(edge_id, a, b),
            };
            graph.add_edge(edge.with_weight(weight)).unwrap();
            edge_id += 1;
        }
    }
    graph
}

// Cheapest cost over every simple path from `from`, by exhaustive search
fn brute_force_costs(graph: &Graph<u32>, from: u32) -> Vec<f64> {
    fn walk(graph: &Graph<u32>, node: u32, cost: f64, visited: &mut Vec<bool>, best: &mut Vec<f64>) {
        if cost < best[node as usize] {
            best[node as usize] = cost;
        }
        for edge in graph.edges_of(&node).unwrap() {
            let next = if edge.source() == &node { *edge.target() } else { *edge.source() };
            if visited[next as usize] {
                continue;
            }
            visited[next as usize] = true;
            walk(graph, next, cost + edge.weight(), visited, best);
            visited[next as usize] = false;
        }
    }

    let mut visited = vec![false; graph.node_count()];
    let mut best = vec![f64::INFINITY; graph.node_count()];
    visited[from as usize] = true;
    walk(graph, from, 0.0, &mut visited, &mut best);
    best
}

// Sum of the cheapest edge along each consecutive pair, panics on a missing edge
fn path_cost(graph: &Graph<u32>, path: &[u32]) -> f64 {
    path.windows(2)
        .map(|pair| {
            graph
                .edges_of(&pair[0])
                .unwrap()
                .into_iter()
                .filter(|edge| edge.has_nodes(&pair[0], &pair[1]))
                .map(|edge| edge.weight())
                .fold(f64::INFINITY, f64::min)
        })
        .inspect(|cost| assert!(cost.is_finite(), "path uses a missing edge"))
        .sum()
}

#[test]
fn dijkstra_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(17);

    for kind in [GraphKind::Directed, GraphKind::Undirected] {
        for _ in 0..25 {
            let graph = random_graph(kind, 6, &mut rng);
            let dijkstra = Dijkstra::new(&graph);

            for source in 0..6 {
                let shortest_paths = dijkstra.find_shortest_paths(&source).unwrap();
                let expected = brute_force_costs(&graph, source);

                assert_eq!(shortest_paths[&source], (0.0, None));
                for target in 0..6u32 {
                    let (distance, predecessor) = shortest_paths[&target];
                    assert_eq!(distance, expected[target as usize]);
                    if distance.is_infinite() {
                        assert_eq!(predecessor, None);
                        assert_eq!(shortest_paths.path_to(&target), None);
                    } else {
                        let path = shortest_paths.path_to(&target).unwrap();
                        assert_eq!(path_cost(&graph, &path), distance);
                    }
                }
            }
        }
    }
}

#[test]
fn a_star_with_zero_heuristic_matches_dijkstra() {
    let mut rng = StdRng::seed_from_u64(99);

    for kind in [GraphKind::Directed, GraphKind::Undirected] {
        for _ in 0..25 {
            let graph = random_graph(kind, 7, &mut rng);
            let dijkstra = Dijkstra::new(&graph);
            let a_star = AStar::new(&graph, Heuristic::Zero);

            for start in 0..7 {
                let shortest_paths = dijkstra.find_shortest_paths(&start).unwrap();
                for goal in 0..7 {
                    let found = a_star.find_shortest_path_with_cost(&start, &goal).unwrap();
                    match found {
                        None => assert!(!shortest_paths.is_reachable(&goal)),
                        Some((path, cost)) => {
                            assert_eq!(path.first(), Some(&start));
                            assert_eq!(path.last(), Some(&goal));
                            assert_eq!(cost, shortest_paths[&goal].0);
                            assert_eq!(path_cost(&graph, &path), cost);
                        }
                    }
                }
            }
        }
    }
}

// 5x5 grid, each edge at least as long as the Manhattan distance it covers
fn grid_graph(rng: &mut StdRng) -> Graph<u32> {
    let mut graph = Graph::undirected();
    for y in 0..5 {
        for x in 0..5 {
            graph.add_node(Node::with_position(y * 5 + x, x as f64, y as f64)).unwrap();
        }
    }
    let mut edge_id = 0;
    for y in 0..5 {
        for x in 0..5 {
            let id = y * 5 + x;
            let mut link = |other: u32, graph: &mut Graph<u32>| {
                let weight = 1.0 + rng.random_range(0..4) as f64;
                graph.add_edge(Edge::undirected(edge_id, id, other).with_weight(weight)).unwrap();
                edge_id += 1;
            };
            if x < 4 { link(id + 1, &mut graph); }
            if y < 4 { link(id + 5, &mut graph); }
        }
    }
    graph
}

#[test]
fn a_star_heuristics_find_optimal_paths_on_grid() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..10 {
        let graph = grid_graph(&mut rng);
        let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&0).unwrap();

        for heuristic in [Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Chebyshev, Heuristic::Zero] {
            let a_star = AStar::new(&graph, heuristic);
            for goal in [6, 12, 18, 24] {
                let (path, cost) = a_star.find_shortest_path_with_cost(&0, &goal).unwrap().unwrap();
                assert_relative_eq!(cost, shortest_paths[&goal].0);
                assert_relative_eq!(path_cost(&graph, &path), cost);
            }
        }
    }
}

#[test]
fn directed_paths_respect_edge_direction() {
    let mut graph: Graph<&str> = Graph::directed();
    for (id, x) in [("A", 0.0), ("B", 1.0), ("C", 2.0)] {
        graph.add_node(Node::with_position(id, x, 0.0)).unwrap();
    }
    graph.add_edge(Edge::directed("ab", "A", "B")).unwrap();
    graph.add_edge(Edge::directed("cb", "C", "B")).unwrap();

    let a_star = AStar::new(&graph, Heuristic::Manhattan);
    assert_eq!(a_star.find_shortest_path(&"A", &"C").unwrap(), None);
    assert_eq!(a_star.find_shortest_path(&"C", &"B").unwrap(), Some(vec!["C", "B"]));

    let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&"A").unwrap();
    assert_eq!(shortest_paths[&"C"], (f64::INFINITY, None));
}

#[test]
fn disjoint_components_have_no_path() {
    let mut graph: Graph<u32> = Graph::undirected();
    for id in 0..4 {
        graph.add_node(Node::with_position(id, id as f64, 0.0)).unwrap();
    }
    graph.add_edge(Edge::undirected(0, 0, 1)).unwrap();
    graph.add_edge(Edge::undirected(1, 2, 3)).unwrap();

    for heuristic in [Heuristic::Manhattan, Heuristic::Zero] {
        let a_star = AStar::new(&graph, heuristic);
        assert_eq!(a_star.find_shortest_path(&0, &3).unwrap(), None);
        assert_eq!(a_star.find_shortest_path(&3, &2).unwrap(), Some(vec![3, 2]));
    }
}
