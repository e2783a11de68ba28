//! Transitive closure (boolean Floyd-Warshall).
//!
//! The closure is reflexive: every vertex reaches itself, with or without a
//! cycle through it.

use crate::error::Result;
use crate::graph::{Graph, Vertex, VertexMap};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use serde::Serialize;

/// Reachability matrix; row `u`, column `v` is true iff `u` reaches `v`.
/// Rows and columns follow the graph's vertex order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Closure<V> {
    pub reach: VertexMap<V, Vec<bool>>,
}

impl<V: Vertex> Closure<V> {
    pub fn vertices(&self) -> &[V] {
        self.reach.keys()
    }

    /// False when either vertex is unknown.
    pub fn reaches(&self, u: &V, v: &V) -> bool {
        match (self.reach.get(u), self.reach.position(v)) {
            (Some(row), Some(j)) => row[j],
            _ => false,
        }
    }

    /// Directed graph with one unit-weight edge per reachable pair,
    /// self-loops included.
    pub fn to_graph(&self) -> Graph<V> {
        let n = self.reach.len();
        let mut g = Graph::with_capacity(true, n, n);
        for v in self.vertices() {
            g.add_vertex(v.clone());
        }
        for (i, row) in self.reach.values().iter().enumerate() {
            for (j, &reachable) in row.iter().enumerate() {
                if reachable {
                    g.insert_indexed(i, j, 1.0);
                }
            }
        }
        g
    }
}

pub struct TransitiveClosure<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> TransitiveClosure<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        TransitiveClosure { graph }
    }
}

impl<V: Vertex> Algorithm<V> for TransitiveClosure<'_, V> {
    type Output = Closure<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Closure<V>> {
        let graph = self.graph;
        let n = graph.len();
        log::debug!("transitive closure: vertices={}", n);

        let mut reach = vec![vec![false; n]; n];
        for (u, row) in reach.iter_mut().enumerate() {
            row[u] = true;
            for &(v, _) in graph.successors(u) {
                row[v] = true;
            }
        }

        for k in 0..n {
            for i in 0..n {
                if !reach[i][k] {
                    continue;
                }
                for j in 0..n {
                    if reach[k][j] && !reach[i][j] {
                        reach[i][j] = true;
                        tracer.emit(|| TraceEvent::Reach {
                            from: graph.label(i),
                            to: graph.label(j),
                            via: graph.label(k),
                        });
                    }
                }
            }
        }

        log::debug!(
            "transitive closure: {} reachable pairs",
            reach.iter().flatten().filter(|&&r| r).count()
        );
        tracer.emit(|| TraceEvent::Done);
        Ok(Closure {
            reach: graph.vertex_map(reach),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph<&'static str> {
        let mut g = Graph::directed();
        g.add_edge("a", "b", 1.0);
        g.add_edge("b", "c", 1.0);
        g.add_vertex("d");
        g
    }

    #[test]
    fn test_closure_chain() {
        let g = chain();
        let c = TransitiveClosure::new(&g).run().unwrap();
        assert!(c.reaches(&"a", &"c"));
        assert!(c.reaches(&"b", &"c"));
        assert!(!c.reaches(&"c", &"a"));
        assert!(!c.reaches(&"a", &"d"));
        assert!(!c.reaches(&"a", &"zz"));
    }

    #[test]
    fn test_closure_is_reflexive() {
        let g = chain();
        let c = TransitiveClosure::new(&g).run().unwrap();
        for v in g.vertices() {
            assert!(c.reaches(v, v));
        }
    }

    #[test]
    fn test_closure_is_idempotent() {
        let mut g = Graph::directed();
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 1, 1.0);
        g.add_edge(3, 4, 1.0);
        let once = TransitiveClosure::new(&g).run().unwrap();
        let twice = TransitiveClosure::new(&once.to_graph()).run().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_undirected_closure_is_symmetric() {
        let mut g = Graph::undirected();
        g.add_edge('x', 'y', 1.0);
        g.add_edge('y', 'z', 1.0);
        let c = TransitiveClosure::new(&g).run().unwrap();
        assert!(c.reaches(&'x', &'z'));
        assert!(c.reaches(&'z', &'x'));
    }

    #[test]
    fn test_trace_reports_new_pairs_only() {
        let g = chain();
        let events: Vec<_> = TransitiveClosure::new(&g).run_traced().unwrap().collect();
        assert_eq!(
            events,
            vec![
                TraceEvent::Reach {
                    from: "a",
                    to: "c",
                    via: "b"
                },
                TraceEvent::Done,
            ]
        );
    }
}
