use louvain_clusterer::cluster::{FirstMember, MaxDegree};
use louvain_clusterer::{next_level, run_to_convergence, GraphBuilder, Node, WeightedGraph};

fn build(ids: &[&'static str], edges: &[(usize, usize, f64)]) -> WeightedGraph<&'static str> {
    let mut builder = GraphBuilder::with_capacity(ids.len());
    for &id in ids {
        builder.add_node(id);
    }
    for &(a, b, w) in edges {
        builder.add_edge(a, b, w).unwrap();
    }
    builder.build().unwrap()
}

#[test]
fn single_isolated_node_is_a_fixed_point() {
    let graph = build(&["solo"], &[]);

    let level = next_level(&graph, &FirstMember).unwrap();
    assert_eq!(level.assignment.labels(), &[0]);
    assert_eq!(level.graph, graph);

    let hierarchy = run_to_convergence(graph, &FirstMember, 10).unwrap();
    assert!(hierarchy.converged());
    assert_eq!(hierarchy.level_count(), 1);
}

#[test]
fn weighted_triangle_keeps_total_weight() {
    // A-B:10, B-C:10, A-C:1
    let graph = build(&["a", "b", "c"], &[(0, 1, 10.0), (1, 2, 10.0), (0, 2, 1.0)]);

    let level = next_level(&graph, &MaxDegree).unwrap();
    let labels = level.assignment.labels();
    assert_eq!(labels[0], labels[1], "a and b must share a community");
    assert_eq!(level.graph.total_weight(), 21.0);
    assert!(level.graph.is_balanced());

    // With these weights every node ends up together, represented by b
    assert_eq!(level.graph.node_count(), 1);
    assert_eq!(level.graph.nodes()[0].self_loops(), 21.0);
    assert_eq!(*level.graph.nodes()[0].payload(), "b");
}

#[test]
fn disjoint_pairs_stay_apart() {
    let graph = build(&["a", "b", "c", "d"], &[(0, 1, 8.0), (2, 3, 8.0)]);

    let hierarchy = run_to_convergence(graph, &FirstMember, 10).unwrap();
    let final_graph = hierarchy.graph();
    assert!(final_graph.node_count() >= 2);
    assert_eq!(final_graph.total_weight(), 16.0);

    let leaves = hierarchy.leaf_clusters().unwrap().labels();
    assert_eq!(leaves[0], leaves[1]);
    assert_eq!(leaves[2], leaves[3]);
    assert_ne!(leaves[0], leaves[2]);
}

#[test]
fn self_loop_only_node_keeps_its_weight() {
    let nodes = vec![
        Node::with_edges("loop", vec![], 3.0),
        Node::with_edges("y", vec![(2, 2.0)], 0.0),
        Node::with_edges("z", vec![(1, 2.0)], 0.0),
    ];
    let graph = WeightedGraph::new(5.0, nodes).unwrap();

    let level = next_level(&graph, &FirstMember).unwrap();
    let labels = level.assignment.labels();
    assert_ne!(labels[0], labels[1]);
    assert_ne!(labels[0], labels[2]);

    let collapsed = &level.graph.nodes()[labels[0]];
    assert_eq!(*collapsed.payload(), "loop");
    assert_eq!(collapsed.self_loops(), 3.0);
    assert!(collapsed.neighbors().is_empty());
    assert_eq!(level.graph.total_weight(), 5.0);
}
