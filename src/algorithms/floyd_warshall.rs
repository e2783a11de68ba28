//! Floyd-Warshall all-pairs shortest paths.
//!
//! O(V^3) relaxation over a dense matrix with a next-hop table for path
//! reconstruction. Negative edges are fine; a negative cycle shows up as a
//! negative diagonal entry (see [`AllPairs::has_negative_cycle`]).

use crate::algorithms::paths::AllPairs;
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};

pub struct FloydWarshall<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> FloydWarshall<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        FloydWarshall { graph }
    }
}

impl<V: Vertex> Algorithm<V> for FloydWarshall<'_, V> {
    type Output = AllPairs<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<AllPairs<V>> {
        let graph = self.graph;
        let n = graph.len();
        log::debug!("floyd-warshall: vertices={}", n);

        let mut dist = vec![vec![f64::INFINITY; n]; n];
        let mut next: Vec<Vec<Option<usize>>> = vec![vec![None; n]; n];

        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        // Parallel edges and self-loops keep the cheapest entry.
        for u in 0..n {
            for &(v, w) in graph.successors(u) {
                if w < dist[u][v] {
                    dist[u][v] = w;
                    next[u][v] = Some(v);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                if dist[i][k] == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if dist[i][j] > through {
                        dist[i][j] = through;
                        next[i][j] = next[i][k];
                        tracer.emit(|| TraceEvent::PairRelax {
                            from: graph.label(i),
                            to: graph.label(j),
                            distance: through,
                        });
                    }
                }
            }
        }

        tracer.emit(|| TraceEvent::Done);
        Ok(AllPairs {
            distances: graph.vertex_map(dist),
            next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph<char> {
        let mut g = Graph::directed();
        g.add_edge('a', 'b', 3.0);
        g.add_edge('b', 'c', -2.0);
        g.add_edge('a', 'c', 4.0);
        g.add_edge('c', 'd', 2.0);
        g.add_vertex('e');
        g
    }

    #[test]
    fn test_floyd_warshall_distances_and_paths() {
        let g = sample();
        let ap = FloydWarshall::new(&g).run().unwrap();
        assert_eq!(ap.distance(&'a', &'c'), 1.0);
        assert_eq!(ap.distance(&'a', &'d'), 3.0);
        assert_eq!(ap.distance(&'d', &'a'), f64::INFINITY);
        assert_eq!(ap.distance(&'e', &'e'), 0.0);
        assert_eq!(ap.path(&'a', &'d'), vec!['a', 'b', 'c', 'd']);
        assert!(ap.path(&'d', &'a').is_empty());
        assert_eq!(ap.path(&'b', &'b'), vec!['b']);
        assert!(!ap.has_negative_cycle());
    }

    #[test]
    fn test_floyd_warshall_triangle_inequality() {
        let g = sample();
        let ap = FloydWarshall::new(&g).run().unwrap();
        let vs = ap.vertices().to_vec();
        for i in &vs {
            for j in &vs {
                for k in &vs {
                    assert!(ap.distance(i, j) <= ap.distance(i, k) + ap.distance(k, j));
                }
            }
        }
    }

    #[test]
    fn test_floyd_warshall_parallel_edges_and_self_loop() {
        let mut g = Graph::directed();
        g.add_edge(1, 2, 9.0);
        g.add_edge(1, 2, 4.0);
        g.add_edge(1, 1, 5.0);
        let ap = FloydWarshall::new(&g).run().unwrap();
        assert_eq!(ap.distance(&1, &2), 4.0);
        assert_eq!(ap.distance(&1, &1), 0.0);
    }

    #[test]
    fn test_floyd_warshall_negative_cycle_on_diagonal() {
        let mut g = Graph::directed();
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 1, -3.0);
        let ap = FloydWarshall::new(&g).run().unwrap();
        assert!(ap.has_negative_cycle());
    }

    #[test]
    fn test_floyd_warshall_trace_ends_with_done() {
        let g = sample();
        let events: Vec<_> = FloydWarshall::new(&g).run_traced().unwrap().collect();
        assert_eq!(events.last(), Some(&TraceEvent::Done));
        assert!(events.contains(&TraceEvent::PairRelax {
            from: 'a',
            to: 'c',
            distance: 1.0
        }));
    }
}
