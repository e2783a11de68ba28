//! Bellman-Ford single-source shortest paths with negative-cycle detection.
//!
//! Runs |V|-1 full relaxation passes over every edge, then one more scan: any
//! edge that still relaxes proves a negative cycle reachable from the source.

use crate::algorithms::paths::{Outcome, ShortestPaths};
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, Phase, TraceEvent, Tracer};

pub struct BellmanFord<'g, V> {
    graph: &'g Graph<V>,
    source: V,
}

impl<'g, V: Vertex> BellmanFord<'g, V> {
    pub fn new(graph: &'g Graph<V>, source: V) -> Self {
        BellmanFord { graph, source }
    }
}

impl<V: Vertex> Algorithm<V> for BellmanFord<'_, V> {
    type Output = Outcome<ShortestPaths<V>>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Self::Output> {
        let graph = self.graph;
        let source = graph.require(&self.source)?;
        let n = graph.len();
        log::debug!("bellman-ford: source={:?}, vertices={}", self.source, n);

        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        dist[source] = 0.0;

        for pass in 1..n {
            tracer.emit(|| TraceEvent::Phase(Phase::Pass(pass)));
            for u in 0..n {
                for &(v, w) in graph.successors(u) {
                    let candidate = dist[u] + w;
                    if candidate < dist[v] {
                        dist[v] = candidate;
                        prev[v] = Some(u);
                        tracer.emit(|| TraceEvent::Relax {
                            vertex: graph.label(v),
                            distance: candidate,
                        });
                    }
                }
            }
        }

        tracer.emit(|| TraceEvent::Phase(Phase::NegativeCycleCheck));
        let still_relaxes = (0..n).any(|u| {
            graph
                .successors(u)
                .iter()
                .any(|&(v, w)| dist[u] + w < dist[v])
        });
        if still_relaxes {
            log::debug!("bellman-ford: negative cycle reachable from {:?}", self.source);
            tracer.emit(|| TraceEvent::NegativeCycle);
            return Ok(Outcome::NegativeCycle);
        }

        tracer.emit(|| TraceEvent::Done);
        Ok(Outcome::Complete(ShortestPaths::from_indexed(
            graph, source, dist, prev,
        )))
    }
}
