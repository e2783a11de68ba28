//! Breadth-first and depth-first traversal.
//!
//! Both return the visit order itself. A vertex is marked when it is taken
//! off the frontier, so the frontier may briefly hold duplicates; they are
//! skipped on removal.

use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use std::collections::VecDeque;

/// Breadth-first search from a start vertex.
pub struct Bfs<'g, V> {
    graph: &'g Graph<V>,
    start: V,
}

impl<'g, V: Vertex> Bfs<'g, V> {
    pub fn new(graph: &'g Graph<V>, start: V) -> Self {
        Bfs { graph, start }
    }
}

impl<V: Vertex> Algorithm<V> for Bfs<'_, V> {
    type Output = Vec<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Vec<V>> {
        let graph = self.graph;
        let start = graph.require(&self.start)?;
        log::debug!("bfs: start={:?}, vertices={}", self.start, graph.len());

        let mut visited = vec![false; graph.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(u) = queue.pop_front() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            order.push(u);
            tracer.emit(|| TraceEvent::Visit(graph.label(u)));
            for &(v, _) in graph.successors(u) {
                if !visited[v] {
                    queue.push_back(v);
                }
            }
        }

        log::debug!("bfs: visited {} vertices", order.len());
        tracer.emit(|| TraceEvent::Done);
        Ok(graph.labels(&order))
    }
}

/// Depth-first search from a start vertex with an explicit stack.
///
/// Neighbors are pushed in reverse listed order so the first-listed
/// neighbor is popped, and visited, first.
pub struct Dfs<'g, V> {
    graph: &'g Graph<V>,
    start: V,
}

impl<'g, V: Vertex> Dfs<'g, V> {
    pub fn new(graph: &'g Graph<V>, start: V) -> Self {
        Dfs { graph, start }
    }
}

impl<V: Vertex> Algorithm<V> for Dfs<'_, V> {
    type Output = Vec<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Vec<V>> {
        let graph = self.graph;
        let start = graph.require(&self.start)?;
        log::debug!("dfs: start={:?}, vertices={}", self.start, graph.len());

        let mut visited = vec![false; graph.len()];
        let mut order = Vec::new();
        let mut stack = vec![start];

        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            order.push(u);
            tracer.emit(|| TraceEvent::Visit(graph.label(u)));
            for &(v, _) in graph.successors(u).iter().rev() {
                if !visited[v] {
                    stack.push(v);
                }
            }
        }

        log::debug!("dfs: visited {} vertices", order.len());
        tracer.emit(|| TraceEvent::Done);
        Ok(graph.labels(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn tree() -> Graph<&'static str> {
        //       a
        //     / | \
        //    b  c  d
        //   / \     \
        //  e   f     g
        let mut g = Graph::directed();
        g.add_edge("a", "b", 1.0);
        g.add_edge("a", "c", 1.0);
        g.add_edge("a", "d", 1.0);
        g.add_edge("b", "e", 1.0);
        g.add_edge("b", "f", 1.0);
        g.add_edge("d", "g", 1.0);
        g
    }

    #[test]
    fn test_bfs_level_order() {
        let g = tree();
        let order = Bfs::new(&g, "a").run().unwrap();
        assert_eq!(order, vec!["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_dfs_natural_child_order() {
        let g = tree();
        let order = Dfs::new(&g, "a").run().unwrap();
        assert_eq!(order, vec!["a", "b", "e", "f", "c", "d", "g"]);
    }

    #[test]
    fn test_traversal_visits_each_vertex_once() {
        let mut g = Graph::undirected();
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_vertex(9);
        assert_eq!(Bfs::new(&g, 1).run().unwrap(), vec![1, 2, 3]);
        assert_eq!(Dfs::new(&g, 1).run().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_traversal_missing_start() {
        let g = tree();
        assert!(matches!(
            Bfs::new(&g, "zz").run(),
            Err(GraphError::VertexNotFound(_))
        ));
        assert!(matches!(
            Dfs::new(&g, "zz").run(),
            Err(GraphError::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_bfs_trace_is_visit_order() {
        let g = tree();
        let traced = Bfs::new(&g, "a").run_traced().unwrap();
        let (events, order) = traced.into_parts();
        let visits: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Visit(v) => Some(*v),
                _ => None,
            })
            .collect();
        assert_eq!(visits, order);
        assert_eq!(events.last(), Some(&TraceEvent::Done));
    }
}
