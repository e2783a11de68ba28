//! Dijkstra's single-source shortest paths.
//!
//! Binary-heap frontier keyed by tentative distance; stale heap entries are
//! skipped when popped. Weights are assumed non-negative and not checked.

use crate::algorithms::paths::{HeapEntry, ShortestPaths};
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use std::collections::BinaryHeap;

/// Dijkstra from `source` over the whole graph.
pub struct Dijkstra<'g, V> {
    graph: &'g Graph<V>,
    source: V,
}

impl<'g, V: Vertex> Dijkstra<'g, V> {
    pub fn new(graph: &'g Graph<V>, source: V) -> Self {
        Dijkstra { graph, source }
    }
}

impl<V: Vertex> Algorithm<V> for Dijkstra<'_, V> {
    type Output = ShortestPaths<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<ShortestPaths<V>> {
        let source = self.graph.require(&self.source)?;
        log::debug!(
            "dijkstra: source={:?}, vertices={}",
            self.source,
            self.graph.len()
        );

        let (dist, prev) = best_first(self.graph, source, None, |_| 0.0, tracer);
        let result = ShortestPaths::from_indexed(self.graph, source, dist, prev);

        log::debug!(
            "dijkstra: reached {} of {} vertices",
            result.distances.values().iter().filter(|d| d.is_finite()).count(),
            self.graph.len()
        );
        tracer.emit(|| TraceEvent::Done);
        Ok(result)
    }
}

/// Shared best-first search behind Dijkstra and A*.
///
/// The frontier is ordered by `g + heuristic(v)`. With a `target`, the search
/// stops as soon as the target is popped.
pub(crate) fn best_first<V: Vertex>(
    graph: &Graph<V>,
    source: usize,
    target: Option<usize>,
    heuristic: impl Fn(usize) -> f64,
    tracer: &mut Tracer<'_, V>,
) -> (Vec<f64>, Vec<Option<usize>>) {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(HeapEntry {
        priority: heuristic(source),
        cost: 0.0,
        key: source,
    });

    while let Some(HeapEntry { cost, key: u, .. }) = heap.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;
        tracer.emit(|| TraceEvent::Settle {
            vertex: graph.label(u),
            distance: cost,
        });

        if target == Some(u) {
            break;
        }

        for &(v, w) in graph.successors(u) {
            let candidate = dist[u] + w;
            if dist[v] > candidate {
                dist[v] = candidate;
                prev[v] = Some(u);
                heap.push(HeapEntry {
                    priority: candidate + heuristic(v),
                    cost: candidate,
                    key: v,
                });
                tracer.emit(|| TraceEvent::Relax {
                    vertex: graph.label(v),
                    distance: candidate,
                });
            }
        }
    }

    (dist, prev)
}
