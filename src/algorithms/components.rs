//! Connected components by breadth-first search.
//!
//! Directed graphs are read through their undirected view, so the result is
//! the weakly connected components. Components are listed in order of their
//! first vertex, members in BFS visit order.

use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use std::collections::VecDeque;

pub struct ConnectedComponents<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> ConnectedComponents<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        ConnectedComponents { graph }
    }
}

impl<V: Vertex> Algorithm<V> for ConnectedComponents<'_, V> {
    type Output = Vec<Vec<V>>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Vec<Vec<V>>> {
        let graph = self.graph;
        let n = graph.len();
        log::debug!("connected components: vertices={}", n);

        let neighbors = graph.undirected_neighbors();
        let mut visited = vec![false; n];
        let mut components = Vec::new();

        for root in 0..n {
            if visited[root] {
                continue;
            }
            let mut members = Vec::new();
            let mut queue = VecDeque::from([root]);
            while let Some(u) = queue.pop_front() {
                if visited[u] {
                    continue;
                }
                visited[u] = true;
                members.push(u);
                tracer.emit(|| TraceEvent::Visit(graph.label(u)));
                for &v in &neighbors[u] {
                    if !visited[v] {
                        queue.push_back(v);
                    }
                }
            }
            let component = graph.labels(&members);
            tracer.emit(|| TraceEvent::ComponentFound(component.clone()));
            components.push(component);
        }

        log::debug!("connected components: {} found", components.len());
        tracer.emit(|| TraceEvent::Done);
        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_with_tail_is_one_component() {
        let mut g = Graph::undirected();
        for (u, v) in [("A", "B"), ("B", "C"), ("C", "A"), ("B", "D"), ("D", "E"), ("E", "D")] {
            g.add_edge(u, v, 1.0);
        }
        let components = ConnectedComponents::new(&g).run().unwrap();
        assert_eq!(components, vec![vec!["A", "B", "C", "D", "E"]]);
    }

    #[test]
    fn test_isolated_vertices_are_singletons() {
        let mut g = Graph::undirected();
        g.add_edge(1, 2, 1.0);
        g.add_vertex(3);
        g.add_edge(4, 5, 1.0);
        let components = ConnectedComponents::new(&g).run().unwrap();
        assert_eq!(components, vec![vec![1, 2], vec![3], vec![4, 5]]);
    }

    #[test]
    fn test_directed_graph_gives_weak_components() {
        let mut g = Graph::directed();
        g.add_edge("a", "b", 1.0);
        g.add_edge("c", "b", 1.0);
        g.add_edge("d", "e", 1.0);
        let components = ConnectedComponents::new(&g).run().unwrap();
        assert_eq!(components, vec![vec!["a", "b", "c"], vec!["d", "e"]]);
    }

    #[test]
    fn test_trace_announces_each_component() {
        let mut g = Graph::undirected();
        g.add_edge('x', 'y', 1.0);
        g.add_vertex('z');
        let events: Vec<_> = ConnectedComponents::new(&g).run_traced().unwrap().collect();
        assert_eq!(
            events,
            vec![
                TraceEvent::Visit('x'),
                TraceEvent::Visit('y'),
                TraceEvent::ComponentFound(vec!['x', 'y']),
                TraceEvent::Visit('z'),
                TraceEvent::ComponentFound(vec!['z']),
                TraceEvent::Done,
            ]
        );
    }
}
