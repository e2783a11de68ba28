//! Cycle detection by depth-first search.
//!
//! Directed graphs look for a back edge to a vertex still on the DFS path.
//! Undirected graphs look for an already-visited neighbor other than the
//! vertex we arrived from. The search stops at the first cycle.
//!
//! The DFS keeps an explicit stack of frames instead of recursing.

use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};

/// Finds one cycle, if any.
///
/// Output is the cycle as a closed walk: it starts and ends with the same
/// vertex, e.g. `[A, B, C, A]`.
pub struct CycleDetection<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> CycleDetection<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        CycleDetection { graph }
    }
}

struct Frame {
    vertex: usize,
    next: usize,
    parent: Option<usize>,
}

/// Per-run DFS state.
struct Search<'g, V> {
    graph: &'g Graph<V>,
    visited: Vec<bool>,
    /// Position on the current DFS path, if the vertex is on it.
    on_path: Vec<Option<usize>>,
    path: Vec<usize>,
}

impl<'g, V: Vertex> Search<'g, V> {
    fn new(graph: &'g Graph<V>) -> Self {
        let n = graph.len();
        Search {
            graph,
            visited: vec![false; n],
            on_path: vec![None; n],
            path: Vec::new(),
        }
    }

    fn enter(
        &mut self,
        v: usize,
        parent: Option<usize>,
        stack: &mut Vec<Frame>,
        tracer: &mut Tracer<'_, V>,
    ) {
        self.visited[v] = true;
        self.on_path[v] = Some(self.path.len());
        self.path.push(v);
        stack.push(Frame {
            vertex: v,
            next: 0,
            parent,
        });
        tracer.emit(|| TraceEvent::Visit(self.graph.label(v)));
    }

    fn run_from(&mut self, root: usize, tracer: &mut Tracer<'_, V>) -> Option<Vec<usize>> {
        let graph = self.graph;
        let directed = graph.is_directed();
        let mut stack = Vec::new();
        self.enter(root, None, &mut stack, tracer);

        while let Some(frame) = stack.last_mut() {
            let u = frame.vertex;
            let parent = frame.parent;
            let Some(&(v, _)) = graph.successors(u).get(frame.next) else {
                stack.pop();
                self.path.pop();
                self.on_path[u] = None;
                tracer.emit(|| TraceEvent::Finish(graph.label(u)));
                continue;
            };
            frame.next += 1;

            if !self.visited[v] {
                self.enter(v, Some(u), &mut stack, tracer);
                continue;
            }
            if !directed && parent == Some(v) {
                continue;
            }
            if let Some(start) = self.on_path[v] {
                let mut cycle = self.path[start..].to_vec();
                cycle.push(v);
                return Some(cycle);
            }
        }
        None
    }
}

impl<V: Vertex> Algorithm<V> for CycleDetection<'_, V> {
    type Output = Option<Vec<V>>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Option<Vec<V>>> {
        let graph = self.graph;
        log::debug!(
            "cycle detection: vertices={}, directed={}",
            graph.len(),
            graph.is_directed()
        );

        let mut search = Search::new(graph);
        for root in 0..graph.len() {
            if search.visited[root] {
                continue;
            }
            if let Some(cycle) = search.run_from(root, tracer) {
                let cycle = graph.labels(&cycle);
                log::debug!("cycle detection: found cycle of length {}", cycle.len() - 1);
                tracer.emit(|| TraceEvent::CycleFound(cycle.clone()));
                tracer.emit(|| TraceEvent::Done);
                return Ok(Some(cycle));
            }
        }

        log::debug!("cycle detection: acyclic");
        tracer.emit(|| TraceEvent::Done);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_triangle() {
        let mut g = Graph::directed();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("C", "A", 1.0);
        let cycle = CycleDetection::new(&g).run().unwrap();
        assert_eq!(cycle, Some(vec!["A", "B", "C", "A"]));
    }

    #[test]
    fn test_directed_dag_has_no_cycle() {
        // Two paths into D is not a cycle when edges are directed.
        let mut g = Graph::directed();
        g.add_edge("A", "B", 1.0);
        g.add_edge("A", "C", 1.0);
        g.add_edge("B", "D", 1.0);
        g.add_edge("C", "D", 1.0);
        assert_eq!(CycleDetection::new(&g).run().unwrap(), None);
    }

    #[test]
    fn test_directed_cycle_slice_excludes_tail() {
        let mut g = Graph::directed();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 1, 1.0);
        assert_eq!(
            CycleDetection::new(&g).run().unwrap(),
            Some(vec![1, 2, 3, 1])
        );
    }

    #[test]
    fn test_undirected_edge_is_not_a_cycle() {
        let mut g = Graph::undirected();
        g.add_edge("a", "b", 1.0);
        g.add_edge("b", "c", 1.0);
        assert_eq!(CycleDetection::new(&g).run().unwrap(), None);
    }

    #[test]
    fn test_undirected_triangle() {
        let mut g = Graph::undirected();
        g.add_edge("a", "b", 1.0);
        g.add_edge("b", "c", 1.0);
        g.add_edge("c", "a", 1.0);
        assert_eq!(
            CycleDetection::new(&g).run().unwrap(),
            Some(vec!["a", "b", "c", "a"])
        );
    }

    #[test]
    fn test_self_loop() {
        let mut g = Graph::directed();
        g.add_edge('x', 'x', 1.0);
        assert_eq!(CycleDetection::new(&g).run().unwrap(), Some(vec!['x', 'x']));
    }

    #[test]
    fn test_cycle_in_later_component() {
        let mut g = Graph::directed();
        g.add_edge(1, 2, 1.0);
        g.add_edge(3, 4, 1.0);
        g.add_edge(4, 3, 1.0);
        assert_eq!(CycleDetection::new(&g).run().unwrap(), Some(vec![3, 4, 3]));
    }

    #[test]
    fn test_trace_stops_at_first_cycle() {
        let mut g = Graph::directed();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "A", 1.0);
        g.add_edge("B", "C", 1.0);
        let events: Vec<_> = CycleDetection::new(&g).run_traced().unwrap().collect();
        assert_eq!(
            events,
            vec![
                TraceEvent::Visit("A"),
                TraceEvent::Visit("B"),
                TraceEvent::CycleFound(vec!["A", "B", "A"]),
                TraceEvent::Done,
            ]
        );
    }
}
