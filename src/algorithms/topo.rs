//! Topological sorting (Kahn's algorithm).
//!
//! Repeatedly removes vertices of in-degree zero. Ties are resolved FIFO in
//! vertex enumeration order, so the output is deterministic.

use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use std::collections::VecDeque;

/// Kahn's topological sort.
///
/// Output is `Some(order)` for a DAG and `None` when a cycle leaves some
/// vertices unordered. An empty graph sorts to `Some(vec![])`.
pub struct TopologicalSort<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> TopologicalSort<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        TopologicalSort { graph }
    }
}

impl<V: Vertex> Algorithm<V> for TopologicalSort<'_, V> {
    type Output = Option<Vec<V>>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Option<Vec<V>>> {
        let graph = self.graph;
        log::debug!("topological sort: vertices={}", graph.len());

        let order = kahn(graph, tracer);
        if order.len() < graph.len() {
            log::debug!(
                "topological sort: cycle, {} of {} vertices ordered",
                order.len(),
                graph.len()
            );
            tracer.emit(|| {
                let mut placed = vec![false; graph.len()];
                for &u in &order {
                    placed[u] = true;
                }
                let rest: Vec<usize> = (0..graph.len()).filter(|&u| !placed[u]).collect();
                TraceEvent::Unsorted(graph.labels(&rest))
            });
            tracer.emit(|| TraceEvent::Done);
            return Ok(None);
        }

        tracer.emit(|| TraceEvent::Done);
        Ok(Some(graph.labels(&order)))
    }
}

/// Kahn's algorithm on vertex indices. The result is shorter than |V| iff
/// the graph has a cycle.
pub(crate) fn kahn<V: Vertex>(graph: &Graph<V>, tracer: &mut Tracer<'_, V>) -> Vec<usize> {
    let n = graph.len();
    let mut in_degree = vec![0usize; n];
    for u in 0..n {
        for &(v, _) in graph.successors(u) {
            in_degree[v] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&u| in_degree[u] == 0).collect();
    for &u in &queue {
        tracer.emit(|| TraceEvent::Enqueue(graph.label(u)));
    }

    let mut order = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        order.push(u);
        tracer.emit(|| TraceEvent::Visit(graph.label(u)));
        for &(v, _) in graph.successors(u) {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
                tracer.emit(|| TraceEvent::Enqueue(graph.label(v)));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position<V: PartialEq>(order: &[V], v: &V) -> usize {
        order.iter().position(|x| x == v).unwrap()
    }

    #[test]
    fn test_topo_diamond() {
        let mut g = Graph::directed();
        g.add_edge("A", "B", 1.0);
        g.add_edge("A", "C", 1.0);
        g.add_edge("B", "D", 1.0);
        g.add_edge("C", "D", 1.0);
        g.add_edge("D", "E", 1.0);
        let order = TopologicalSort::new(&g).run().unwrap().unwrap();
        assert_eq!(order, vec!["A", "B", "C", "D", "E"]);
        for (u, v, _) in g.edges() {
            assert!(position(&order, u) < position(&order, v));
        }
    }

    #[test]
    fn test_topo_cycle_returns_none() {
        let mut g = Graph::directed();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("C", "A", 1.0);
        g.add_edge("X", "A", 1.0);
        let traced = TopologicalSort::new(&g).run_traced().unwrap();
        let (events, order) = traced.into_parts();
        assert_eq!(order, None);
        assert!(events.contains(&TraceEvent::Unsorted(vec!["A", "B", "C"])));
        assert_eq!(events.last(), Some(&TraceEvent::Done));
    }

    #[test]
    fn test_topo_no_edges_is_not_a_cycle() {
        let mut g: Graph<u32> = Graph::directed();
        g.add_vertex(2);
        g.add_vertex(1);
        assert_eq!(TopologicalSort::new(&g).run().unwrap(), Some(vec![2, 1]));

        let empty: Graph<u32> = Graph::directed();
        assert_eq!(TopologicalSort::new(&empty).run().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_topo_self_loop_is_cycle() {
        let mut g = Graph::directed();
        g.add_edge(1, 1, 1.0);
        assert_eq!(TopologicalSort::new(&g).run().unwrap(), None);
    }

    #[test]
    fn test_topo_trace_sequence() {
        let mut g = Graph::directed();
        g.add_edge('a', 'b', 1.0);
        let events: Vec<_> = TopologicalSort::new(&g).run_traced().unwrap().collect();
        assert_eq!(
            events,
            vec![
                TraceEvent::Enqueue('a'),
                TraceEvent::Visit('a'),
                TraceEvent::Enqueue('b'),
                TraceEvent::Visit('b'),
                TraceEvent::Done,
            ]
        );
    }
}
