//! Result types shared by the shortest-path family.

use crate::graph::{Graph, Vertex, VertexMap};
use serde::Serialize;
use std::cmp::Ordering;

/// Single-source shortest-path distances and predecessor tree.
///
/// Unreached vertices keep an infinite distance and no predecessor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPaths<V> {
    pub source: V,
    pub distances: VertexMap<V, f64>,
    pub predecessors: VertexMap<V, Option<V>>,
}

impl<V: Vertex> ShortestPaths<V> {
    pub(crate) fn from_indexed(
        graph: &Graph<V>,
        source: usize,
        dist: Vec<f64>,
        prev: Vec<Option<usize>>,
    ) -> Self {
        let predecessors = prev.into_iter().map(|p| p.map(|i| graph.label(i))).collect();
        ShortestPaths {
            source: graph.label(source),
            distances: graph.vertex_map(dist),
            predecessors: graph.vertex_map(predecessors),
        }
    }

    /// Distance to `v`; infinity if unreached or unknown.
    pub fn distance(&self, v: &V) -> f64 {
        self.distances.get(v).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, v: &V) -> bool {
        self.distance(v).is_finite()
    }

    pub fn predecessor(&self, v: &V) -> Option<&V> {
        self.predecessors.get(v).and_then(|p| p.as_ref())
    }

    /// Path source -> `v` inclusive; empty when `v` is unreached.
    pub fn path_to(&self, v: &V) -> Vec<V> {
        if !self.is_reachable(v) {
            return Vec::new();
        }
        let mut path = vec![v.clone()];
        let mut cur = v;
        // A predecessor chain never revisits a vertex, so it has at most |V| links.
        while let Some(p) = self.predecessor(cur) {
            if path.len() > self.distances.len() {
                return Vec::new();
            }
            path.push(p.clone());
            cur = p;
        }
        if *cur != self.source {
            return Vec::new();
        }
        path.reverse();
        path
    }

    /// Path to every vertex, keyed like `distances`.
    pub fn paths(&self) -> VertexMap<V, Vec<V>> {
        let keys = self.distances.keys().to_vec();
        let values = keys.iter().map(|v| self.path_to(v)).collect();
        VertexMap::new(keys, values)
    }
}

/// Result of an algorithm that can run into a negative cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    Complete(T),
    /// A reachable negative cycle makes distances undefined; no partial
    /// result is kept.
    NegativeCycle,
}

impl<T> Outcome<T> {
    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, Outcome::NegativeCycle)
    }

    pub fn complete(self) -> Option<T> {
        match self {
            Outcome::Complete(t) => Some(t),
            Outcome::NegativeCycle => None,
        }
    }

    pub fn as_complete(&self) -> Option<&T> {
        match self {
            Outcome::Complete(t) => Some(t),
            Outcome::NegativeCycle => None,
        }
    }
}

/// All-pairs distances with next-hop table for path reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllPairs<V> {
    /// Row per source vertex, columns in the same vertex order.
    pub distances: VertexMap<V, Vec<f64>>,
    /// `next[i][j]`: index of the vertex after `i` on the path to `j`.
    pub next: Vec<Vec<Option<usize>>>,
}

impl<V: Vertex> AllPairs<V> {
    pub fn vertices(&self) -> &[V] {
        self.distances.keys()
    }

    /// Distance `u` -> `v`; infinity if unreachable or unknown.
    pub fn distance(&self, u: &V, v: &V) -> f64 {
        match (self.distances.position(u), self.distances.position(v)) {
            (Some(i), Some(j)) => self.distances.values()[i][j],
            _ => f64::INFINITY,
        }
    }

    /// Reconstruct `u` -> `v` from the next-hop table; empty if unreachable.
    pub fn path(&self, u: &V, v: &V) -> Vec<V> {
        let (Some(i), Some(j)) = (self.distances.position(u), self.distances.position(v)) else {
            return Vec::new();
        };
        let vertices = self.vertices();
        if i == j {
            return vec![vertices[i].clone()];
        }
        let mut path = vec![vertices[i].clone()];
        let mut cur = i;
        while cur != j {
            match self.next[cur][j] {
                Some(hop) if path.len() <= vertices.len() => {
                    path.push(vertices[hop].clone());
                    cur = hop;
                }
                _ => return Vec::new(),
            }
        }
        path
    }

    /// True if some vertex has a negative distance to itself.
    pub fn has_negative_cycle(&self) -> bool {
        self.distances
            .values()
            .iter()
            .enumerate()
            .any(|(i, row)| row[i] < 0.0)
    }
}

/// Min-heap entry ordered by (priority, cost, vertex).
///
/// `BinaryHeap` is a max-heap, so the comparison is reversed. Ties fall back
/// to the vertex key, which keeps pop order deterministic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeapEntry<K> {
    pub priority: f64,
    pub cost: f64,
    pub key: K,
}

impl<K: Ord> Ord for HeapEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.cost.total_cmp(&self.cost))
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl<K: Ord> PartialOrd for HeapEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> PartialEq for HeapEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for HeapEntry<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_heap_pops_smallest_first() {
        let mut heap = BinaryHeap::new();
        for (p, k) in [(3.0, 0usize), (1.0, 2), (1.0, 1), (2.0, 5)] {
            heap.push(HeapEntry {
                priority: p,
                cost: p,
                key: k,
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.key)).collect();
        assert_eq!(order, vec![1, 2, 5, 0]);
    }

    #[test]
    fn test_path_to_unreached_is_empty() {
        let mut g = Graph::directed();
        g.add_edge("a", "b", 1.0);
        g.add_vertex("c");
        let sp = ShortestPaths::from_indexed(
            &g,
            0,
            vec![0.0, 1.0, f64::INFINITY],
            vec![None, Some(0), None],
        );
        assert_eq!(sp.path_to(&"b"), vec!["a", "b"]);
        assert_eq!(sp.path_to(&"a"), vec!["a"]);
        assert!(sp.path_to(&"c").is_empty());
        assert_eq!(sp.distance(&"c"), f64::INFINITY);
        assert_eq!(sp.paths().get(&"c"), Some(&Vec::new()));
    }

    #[test]
    fn test_outcome_accessors() {
        let ok: Outcome<u8> = Outcome::Complete(4);
        assert_eq!(ok.as_complete(), Some(&4));
        assert!(!ok.is_negative_cycle());
        assert_eq!(Outcome::<u8>::NegativeCycle.complete(), None);
    }
}
