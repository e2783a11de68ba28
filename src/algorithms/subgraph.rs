//! Subgraph extraction and reachability.
//!
//! Creates new graphs containing only the requested vertices and the edges
//! among them. Used to check structural results (a removed articulation
//! point, a severed bridge) and by the UI for focused views.

use crate::graph::{Graph, Vertex};
use std::collections::VecDeque;

/// Induced subgraph on `keep`.
///
/// The new graph has the same directedness, lists the kept vertices in the
/// order given (duplicates and unknown labels are ignored) and replays the
/// original insertion log for edges with both endpoints kept, so adjacency
/// order matches the source graph.
pub fn extract_subgraph<V: Vertex>(graph: &Graph<V>, keep: &[V]) -> Graph<V> {
    let mut sub = Graph::with_capacity(graph.is_directed(), keep.len(), keep.len() * 2);
    for v in keep {
        if graph.contains(v) {
            sub.add_vertex(v.clone());
        }
    }

    for (u, v, w) in graph.edges() {
        if let (Some(from), Some(to)) = (sub.index_of(u), sub.index_of(v)) {
            sub.insert_indexed(from, to, w);
        }
    }
    sub
}

/// The graph with `removed` and all its incident edges taken out.
pub fn without_vertex<V: Vertex>(graph: &Graph<V>, removed: &V) -> Graph<V> {
    let keep: Vec<V> = graph
        .vertices()
        .iter()
        .filter(|v| *v != removed)
        .cloned()
        .collect();
    extract_subgraph(graph, &keep)
}

/// The graph with every `u - v` edge (either direction, any weight) removed.
pub fn without_edge<V: Vertex>(graph: &Graph<V>, u: &V, v: &V) -> Graph<V> {
    let mut out = Graph::with_capacity(graph.is_directed(), graph.len(), graph.edge_count());
    for x in graph.vertices() {
        out.add_vertex(x.clone());
    }
    for (a, b, w) in graph.edges() {
        if (a == u && b == v) || (a == v && b == u) {
            continue;
        }
        out.add_edge(a.clone(), b.clone(), w);
    }
    out
}

/// Vertices reachable from `source` along outgoing edges, in BFS order.
///
/// Includes `source` itself; empty if `source` is not in the graph.
pub fn reachable_from<V: Vertex>(graph: &Graph<V>, source: &V) -> Vec<V> {
    let Some(source) = graph.index_of(source) else {
        return Vec::new();
    };

    let mut visited = vec![false; graph.len()];
    let mut result = Vec::new();
    let mut queue = VecDeque::new();

    visited[source] = true;
    result.push(source);
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for &(v, _) in graph.successors(u) {
            if !visited[v] {
                visited[v] = true;
                result.push(v);
                queue.push_back(v);
            }
        }
    }

    graph.labels(&result)
}

/// Induced subgraph on the vertices reachable from `source`.
pub fn reachable_subgraph_from<V: Vertex>(graph: &Graph<V>, source: &V) -> Graph<V> {
    extract_subgraph(graph, &reachable_from(graph, source))
}
