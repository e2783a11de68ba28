//! Single-source shortest paths on a DAG.
//!
//! Vertices are processed in Kahn order and each outgoing edge is relaxed
//! exactly once. Negative weights are fine; cycles are rejected up front
//! because distances past a cycle would never be relaxed.

use crate::algorithms::paths::ShortestPaths;
use crate::algorithms::topo::kahn;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, Phase, TraceEvent, Tracer};

pub struct DagShortestPaths<'g, V> {
    graph: &'g Graph<V>,
    source: V,
}

impl<'g, V: Vertex> DagShortestPaths<'g, V> {
    pub fn new(graph: &'g Graph<V>, source: V) -> Self {
        DagShortestPaths { graph, source }
    }
}

impl<V: Vertex> Algorithm<V> for DagShortestPaths<'_, V> {
    type Output = ShortestPaths<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<ShortestPaths<V>> {
        let graph = self.graph;
        let source = graph.require(&self.source)?;
        let n = graph.len();
        log::debug!("dag shortest paths: source={:?}, vertices={}", self.source, n);

        let order = kahn(graph, &mut Tracer::silent());
        if order.len() < n {
            return Err(GraphError::NotAcyclic {
                sorted: order.len(),
                total: n,
            });
        }

        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        dist[source] = 0.0;

        tracer.emit(|| TraceEvent::Phase(Phase::Relaxation));
        for u in order {
            tracer.emit(|| TraceEvent::Settle {
                vertex: graph.label(u),
                distance: dist[u],
            });
            if dist[u] == f64::INFINITY {
                continue;
            }
            for &(v, w) in graph.successors(u) {
                let candidate = dist[u] + w;
                if dist[v] > candidate {
                    dist[v] = candidate;
                    prev[v] = Some(u);
                    tracer.emit(|| TraceEvent::Relax {
                        vertex: graph.label(v),
                        distance: candidate,
                    });
                }
            }
        }

        tracer.emit(|| TraceEvent::Done);
        Ok(ShortestPaths::from_indexed(graph, source, dist, prev))
    }
}
