//! Johnson's all-pairs shortest paths.
//!
//! Bellman-Ford from a synthetic source (0-weight edges to every vertex)
//! yields potentials `h`. Every edge is reweighted to `w + h[u] - h[v]`,
//! which is non-negative, and Dijkstra runs from each vertex on the
//! reweighted graph. Distances are mapped back with `d - h[u] + h[v]`.
//!
//! The synthetic source lives in [`Augmented`], a separate vertex type, so it
//! can never collide with a real label.

use crate::algorithms::bellman_ford::BellmanFord;
use crate::algorithms::dijkstra::best_first;
use crate::algorithms::paths::{AllPairs, Outcome};
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, Phase, TraceEvent, Tracer};

/// Vertex of the augmented graph used to compute potentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Augmented<V> {
    Real(V),
    Synthetic,
}

impl<V> Augmented<V> {
    pub fn into_real(self) -> Option<V> {
        match self {
            Augmented::Real(v) => Some(v),
            Augmented::Synthetic => None,
        }
    }
}

pub struct Johnson<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> Johnson<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        Johnson { graph }
    }

    fn augmented(&self) -> Graph<Augmented<V>> {
        let graph = self.graph;
        let n = graph.len();
        let mut aug = Graph::with_capacity(true, n + 1, n * 2);
        for v in graph.vertices() {
            aug.add_vertex(Augmented::Real(v.clone()));
        }
        for u in 0..n {
            for &(v, w) in graph.successors(u) {
                aug.insert_indexed(u, v, w);
            }
        }
        let source = aug.add_vertex(Augmented::Synthetic);
        for v in 0..n {
            aug.insert_indexed(source, v, 0.0);
        }
        aug
    }

    /// Bellman-Ford potentials; `None` on a negative cycle.
    ///
    /// Bellman-Ford's own events are forwarded with real vertices only, and
    /// its `Done` is swallowed since the run continues.
    fn potentials(&self, tracer: &mut Tracer<'_, V>) -> Result<Option<Vec<f64>>> {
        let aug = self.augmented();
        let bellman_ford = BellmanFord::new(&aug, Augmented::Synthetic);

        let outcome = if tracer.is_enabled() {
            let mut forward = |event: TraceEvent<Augmented<V>>| {
                if matches!(event, TraceEvent::Done) {
                    return;
                }
                if let Some(event) = event.filter_map(Augmented::into_real) {
                    tracer.emit(|| event);
                }
            };
            bellman_ford.run_with(&mut forward)?
        } else {
            bellman_ford.run()?
        };

        Ok(outcome.complete().map(|h| {
            self.graph
                .vertices()
                .iter()
                .map(|v| h.distance(&Augmented::Real(v.clone())))
                .collect()
        }))
    }
}

impl<V: Vertex> Algorithm<V> for Johnson<'_, V> {
    type Output = Outcome<AllPairs<V>>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Self::Output> {
        let graph = self.graph;
        let n = graph.len();
        log::debug!("johnson: vertices={}", n);

        tracer.emit(|| TraceEvent::Phase(Phase::Potentials));
        let Some(h) = self.potentials(tracer)? else {
            log::debug!("johnson: negative cycle, aborting");
            return Ok(Outcome::NegativeCycle);
        };

        let mut reweighted = Graph::with_capacity(true, n, graph.edge_count());
        for v in graph.vertices() {
            reweighted.add_vertex(v.clone());
        }
        for u in 0..n {
            for &(v, w) in graph.successors(u) {
                // Non-negative in exact arithmetic; clamp rounding noise.
                reweighted.insert_indexed(u, v, (w + h[u] - h[v]).max(0.0));
            }
        }

        tracer.emit(|| TraceEvent::Phase(Phase::Reweighted));
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        let mut next: Vec<Vec<Option<usize>>> = vec![vec![None; n]; n];

        for u in 0..n {
            let (reduced, prev) = best_first(&reweighted, u, None, |_| 0.0, &mut Tracer::silent());
            for v in 0..n {
                if reduced[v] == f64::INFINITY {
                    continue;
                }
                let d = reduced[v] - h[u] + h[v];
                dist[u][v] = d;
                next[u][v] = first_hop(&prev, u, v);
                tracer.emit(|| TraceEvent::PairRelax {
                    from: graph.label(u),
                    to: graph.label(v),
                    distance: d,
                });
            }
        }

        tracer.emit(|| TraceEvent::Done);
        Ok(Outcome::Complete(AllPairs {
            distances: graph.vertex_map(dist),
            next,
        }))
    }
}

/// Vertex right after `source` on the predecessor chain ending at `target`.
fn first_hop(prev: &[Option<usize>], source: usize, target: usize) -> Option<usize> {
    if source == target {
        return None;
    }
    let mut cur = target;
    while let Some(p) = prev[cur] {
        if p == source {
            return Some(cur);
        }
        cur = p;
    }
    None
}
