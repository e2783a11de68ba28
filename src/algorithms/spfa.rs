//! SPFA: queue-based Bellman-Ford.
//!
//! A vertex is enqueued only when its distance improves and it is not already
//! waiting. If any vertex is relaxed more than |V| times the run stops and
//! reports a negative cycle.

use crate::algorithms::paths::{Outcome, ShortestPaths};
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use std::collections::VecDeque;

pub struct Spfa<'g, V> {
    graph: &'g Graph<V>,
    source: V,
}

impl<'g, V: Vertex> Spfa<'g, V> {
    pub fn new(graph: &'g Graph<V>, source: V) -> Self {
        Spfa { graph, source }
    }
}

impl<V: Vertex> Algorithm<V> for Spfa<'_, V> {
    type Output = Outcome<ShortestPaths<V>>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Self::Output> {
        let graph = self.graph;
        let source = graph.require(&self.source)?;
        let n = graph.len();
        log::debug!("spfa: source={:?}, vertices={}", self.source, n);

        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut queued = vec![false; n];
        let mut relax_count = vec![0usize; n];
        let mut queue = VecDeque::new();

        dist[source] = 0.0;
        queue.push_back(source);
        queued[source] = true;

        while let Some(u) = queue.pop_front() {
            queued[u] = false;
            tracer.emit(|| TraceEvent::Settle {
                vertex: graph.label(u),
                distance: dist[u],
            });

            for &(v, w) in graph.successors(u) {
                let candidate = dist[u] + w;
                if dist[v] > candidate {
                    // Per relaxation: Relax, then Enqueue, then the count check.
                    dist[v] = candidate;
                    prev[v] = Some(u);
                    tracer.emit(|| TraceEvent::Relax {
                        vertex: graph.label(v),
                        distance: candidate,
                    });
                    if !queued[v] {
                        queue.push_back(v);
                        queued[v] = true;
                        tracer.emit(|| TraceEvent::Enqueue(graph.label(v)));
                    }
                    relax_count[v] += 1;
                    if relax_count[v] > n {
                        log::debug!(
                            "spfa: {:?} relaxed more than {} times, negative cycle",
                            graph.label(v),
                            n
                        );
                        tracer.emit(|| TraceEvent::NegativeCycle);
                        return Ok(Outcome::NegativeCycle);
                    }
                }
            }
        }

        tracer.emit(|| TraceEvent::Done);
        Ok(Outcome::Complete(ShortestPaths::from_indexed(
            graph, source, dist, prev,
        )))
    }
}
