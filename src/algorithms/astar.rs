//! A* search between two vertices of a weighted graph.
//!
//! The heuristic is pluggable and defaults to zero, which makes the search
//! behave exactly like Dijkstra stopped at the goal. Plain graphs carry no
//! coordinates, so no geometric default is assumed.

use crate::algorithms::dijkstra::best_first;
use crate::algorithms::paths::ShortestPaths;
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use serde::Serialize;

/// Estimated remaining cost from a vertex to the goal.
pub type Heuristic<'g, V> = Box<dyn Fn(&V, &V) -> f64 + 'g>;

/// Outcome of a goal-directed search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<V> {
    /// Distances and predecessors as far as the search got.
    pub search: ShortestPaths<V>,
    /// Source -> goal inclusive; empty if the goal is unreachable.
    pub path: Vec<V>,
}

impl<V> Route<V> {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

pub struct AStar<'g, V> {
    graph: &'g Graph<V>,
    source: V,
    goal: V,
    heuristic: Heuristic<'g, V>,
}

impl<'g, V: Vertex> AStar<'g, V> {
    pub fn new(graph: &'g Graph<V>, source: V, goal: V) -> Self {
        AStar {
            graph,
            source,
            goal,
            heuristic: Box::new(|_, _| 0.0),
        }
    }

    /// Replace the zero heuristic. It should never overestimate, or the
    /// returned path may not be the shortest.
    pub fn with_heuristic(mut self, heuristic: impl Fn(&V, &V) -> f64 + 'g) -> Self {
        self.heuristic = Box::new(heuristic);
        self
    }
}

impl<V: Vertex> Algorithm<V> for AStar<'_, V> {
    type Output = Route<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Route<V>> {
        let graph = self.graph;
        let source = graph.require(&self.source)?;
        let goal = graph.require(&self.goal)?;
        log::debug!("astar: {:?} -> {:?}", self.source, self.goal);

        let h = |v: usize| (self.heuristic)(&graph.vertices()[v], &self.goal);
        let (dist, prev) = best_first(graph, source, Some(goal), h, tracer);
        let search = ShortestPaths::from_indexed(graph, source, dist, prev);
        let path = search.path_to(&self.goal);

        if path.is_empty() {
            log::debug!("astar: goal {:?} unreachable", self.goal);
            tracer.emit(|| TraceEvent::NotFound);
        } else {
            tracer.emit(|| TraceEvent::Found(path.clone()));
        }
        Ok(Route { search, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dijkstra::Dijkstra;

    fn line() -> Graph<i32> {
        // 0 - 1 - 2 - 3 with a costly shortcut 0 - 3
        let mut g = Graph::undirected();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(0, 3, 10.0);
        g
    }

    #[test]
    fn test_astar_zero_heuristic_matches_dijkstra() {
        let g = line();
        let route = AStar::new(&g, 0, 3).run().unwrap();
        let sp = Dijkstra::new(&g, 0).run().unwrap();
        assert_eq!(route.path, vec![0, 1, 2, 3]);
        assert_eq!(route.search.distance(&3), sp.distance(&3));
    }

    #[test]
    fn test_astar_custom_heuristic() {
        let g = line();
        let route = AStar::new(&g, 0, 3)
            .with_heuristic(|v, goal| (goal - v).abs() as f64)
            .run()
            .unwrap();
        assert_eq!(route.path, vec![0, 1, 2, 3]);
        assert_eq!(route.search.distance(&3), 3.0);
    }

    #[test]
    fn test_astar_stops_at_goal() {
        let g = line();
        let traced = AStar::new(&g, 0, 1).run_traced().unwrap();
        let (events, route) = traced.into_parts();
        assert_eq!(events.last(), Some(&TraceEvent::Found(vec![0, 1])));
        // Vertex 2 is never settled once the goal is popped.
        assert!(!events.contains(&TraceEvent::Settle {
            vertex: 2,
            distance: 2.0
        }));
        assert!(route.is_found());
    }

    #[test]
    fn test_astar_not_found() {
        let mut g = Graph::directed();
        g.add_edge("a", "b", 1.0);
        g.add_vertex("c");
        let traced = AStar::new(&g, "a", "c").run_traced().unwrap();
        let (events, route) = traced.into_parts();
        assert_eq!(events.last(), Some(&TraceEvent::NotFound));
        assert!(!route.is_found());
    }
}
