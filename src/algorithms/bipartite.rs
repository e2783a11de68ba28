//! Bipartite check by BFS 2-coloring.
//!
//! Each component's first vertex is colored `Left` and colors alternate by
//! BFS level. The first edge joining two same-colored vertices ends the run;
//! components not reached by then stay uncolored.

use crate::error::Result;
use crate::graph::{Graph, Vertex, VertexMap};
use crate::trace::{Algorithm, Side, TraceEvent, Tracer};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bipartition<V> {
    pub is_bipartite: bool,
    pub coloring: VertexMap<V, Option<Side>>,
    /// The adjacent same-colored pair that disproved bipartiteness.
    pub conflict: Option<(V, V)>,
}

impl<V: Vertex> Bipartition<V> {
    fn side(&self, side: Side) -> Vec<V> {
        self.coloring
            .iter()
            .filter(|(_, s)| **s == Some(side))
            .map(|(v, _)| v.clone())
            .collect()
    }

    pub fn left(&self) -> Vec<V> {
        self.side(Side::Left)
    }

    pub fn right(&self) -> Vec<V> {
        self.side(Side::Right)
    }
}

pub struct Bipartite<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> Bipartite<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        Bipartite { graph }
    }
}

impl<V: Vertex> Algorithm<V> for Bipartite<'_, V> {
    type Output = Bipartition<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Bipartition<V>> {
        let graph = self.graph;
        let n = graph.len();
        log::debug!("bipartite: vertices={}", n);

        let neighbors = graph.undirected_neighbors();
        let mut color: Vec<Option<Side>> = vec![None; n];
        let mut conflict = None;

        'components: for root in 0..n {
            if color[root].is_some() {
                continue;
            }
            color[root] = Some(Side::Left);
            tracer.emit(|| TraceEvent::Color {
                vertex: graph.label(root),
                side: Side::Left,
            });

            let mut queue = VecDeque::from([root]);
            while let Some(u) = queue.pop_front() {
                let Some(side) = color[u] else {
                    continue;
                };
                for &v in &neighbors[u] {
                    match color[v] {
                        None => {
                            let other = side.opposite();
                            color[v] = Some(other);
                            tracer.emit(|| TraceEvent::Color {
                                vertex: graph.label(v),
                                side: other,
                            });
                            queue.push_back(v);
                        }
                        Some(s) if s == side => {
                            tracer.emit(|| TraceEvent::Conflict(graph.label(u), graph.label(v)));
                            conflict = Some((u, v));
                            break 'components;
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        log::debug!("bipartite: conflict={:?}", conflict);
        tracer.emit(|| TraceEvent::Done);
        Ok(Bipartition {
            is_bipartite: conflict.is_none(),
            coloring: graph.vertex_map(color),
            conflict: conflict.map(|(u, v)| (graph.label(u), graph.label(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_is_bipartite() {
        let mut g = Graph::undirected();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("C", "D", 1.0);
        g.add_edge("D", "A", 1.0);
        let result = Bipartite::new(&g).run().unwrap();
        assert!(result.is_bipartite);
        assert_eq!(result.conflict, None);
        assert_eq!(result.left(), vec!["A", "C"]);
        assert_eq!(result.right(), vec!["B", "D"]);
    }

    #[test]
    fn test_triangle_reports_adjacent_same_colored_pair() {
        let mut g = Graph::undirected();
        g.add_edge("a", "b", 1.0);
        g.add_edge("b", "c", 1.0);
        g.add_edge("c", "a", 1.0);
        let result = Bipartite::new(&g).run().unwrap();
        assert!(!result.is_bipartite);

        let (u, v) = result.conflict.clone().unwrap();
        assert_eq!((u, v), ("b", "c"));
        assert!(g.neighbors(&u).any(|(x, _)| *x == v));
        assert_eq!(result.coloring.get(&u), result.coloring.get(&v));
    }

    #[test]
    fn test_conflict_halts_before_later_components() {
        let mut g = Graph::undirected();
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 1, 1.0);
        g.add_edge(4, 5, 1.0);
        let result = Bipartite::new(&g).run().unwrap();
        assert!(!result.is_bipartite);
        assert_eq!(result.coloring.get(&4), Some(&None));
        assert_eq!(result.coloring.get(&5), Some(&None));
    }

    #[test]
    fn test_forest_and_isolated_vertices() {
        let mut g = Graph::undirected();
        g.add_edge('a', 'b', 1.0);
        g.add_edge('b', 'c', 1.0);
        g.add_vertex('z');
        let result = Bipartite::new(&g).run().unwrap();
        assert!(result.is_bipartite);
        assert_eq!(result.left(), vec!['a', 'c', 'z']);
        assert_eq!(result.right(), vec!['b']);
    }

    #[test]
    fn test_self_loop_is_a_conflict() {
        let mut g = Graph::undirected();
        g.add_edge(7, 7, 1.0);
        let result = Bipartite::new(&g).run().unwrap();
        assert_eq!(result.conflict, Some((7, 7)));
    }

    #[test]
    fn test_trace_ends_with_conflict_then_done() {
        let mut g = Graph::undirected();
        g.add_edge("a", "b", 1.0);
        g.add_edge("b", "c", 1.0);
        g.add_edge("c", "a", 1.0);
        let events: Vec<_> = Bipartite::new(&g).run_traced().unwrap().collect();
        let n = events.len();
        assert_eq!(events[n - 2], TraceEvent::Conflict("b", "c"));
        assert_eq!(events[n - 1], TraceEvent::Done);
    }
}
