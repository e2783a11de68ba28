//! Minimum spanning trees: Kruskal and Prim.
//!
//! Both treat the graph as undirected. On a disconnected graph Kruskal
//! returns a spanning forest and Prim the tree of the first vertex's
//! component; neither reports an error.

use crate::algorithms::paths::HeapEntry;
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use serde::Serialize;
use std::collections::{BinaryHeap, HashSet};

/// Tree edges in acceptance order plus their summed weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree<V> {
    pub edges: Vec<(V, V, f64)>,
    pub total_weight: f64,
}

impl<V> SpanningTree<V> {
    fn from_edges(edges: Vec<(V, V, f64)>) -> Self {
        let total_weight = edges.iter().map(|(_, _, w)| w).sum();
        SpanningTree {
            edges,
            total_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Disjoint sets over `0..n` with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
    components: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    /// Number of disjoint sets.
    pub fn components(&self) -> usize {
        self.components
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets of `x` and `y`. Returns false if they were already one.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        self.components -= 1;
        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}

/// Kruskal's algorithm.
///
/// The candidate list takes each adjacency entry once, skipping an entry
/// whose exact reverse (same endpoints swapped, same weight) was already
/// taken, so mirrored undirected entries count once. Candidates are sorted
/// stably by weight, so equal weights keep enumeration order.
pub struct Kruskal<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> Kruskal<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        Kruskal { graph }
    }

    fn candidates(&self) -> Vec<(usize, usize, f64)> {
        let graph = self.graph;
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for u in 0..graph.len() {
            for &(v, w) in graph.successors(u) {
                if seen.contains(&(v, u, w.to_bits())) {
                    continue;
                }
                seen.insert((u, v, w.to_bits()));
                edges.push((u, v, w));
            }
        }
        edges.sort_by(|a, b| a.2.total_cmp(&b.2));
        edges
    }
}

impl<V: Vertex> Algorithm<V> for Kruskal<'_, V> {
    type Output = SpanningTree<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<SpanningTree<V>> {
        let graph = self.graph;
        let candidates = self.candidates();
        log::debug!(
            "kruskal: vertices={}, candidate edges={}",
            graph.len(),
            candidates.len()
        );

        let mut sets = UnionFind::new(graph.len());
        let mut tree = Vec::new();
        for (u, v, w) in candidates {
            if !sets.union(u, v) {
                continue;
            }
            tracer.emit(|| TraceEvent::TreeEdge {
                from: graph.label(u),
                to: graph.label(v),
                weight: w,
            });
            tree.push((graph.label(u), graph.label(v), w));
        }

        let tree = SpanningTree::from_edges(tree);
        log::debug!(
            "kruskal: {} tree edges, weight {}",
            tree.len(),
            tree.total_weight
        );
        tracer.emit(|| TraceEvent::Done);
        Ok(tree)
    }
}

/// Prim's algorithm from the first enumerated vertex.
///
/// The frontier is ordered by (weight, from, to) with indices, so ties
/// resolve toward earlier-enumerated vertices.
pub struct Prim<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> Prim<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        Prim { graph }
    }
}

impl<V: Vertex> Algorithm<V> for Prim<'_, V> {
    type Output = SpanningTree<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<SpanningTree<V>> {
        let graph = self.graph;
        let n = graph.len();
        log::debug!("prim: vertices={}", n);

        let mut tree = Vec::new();
        if n > 0 {
            let mut included = vec![false; n];
            let mut count = 1;
            let mut heap = BinaryHeap::new();
            included[0] = true;
            push_frontier(graph, 0, &included, &mut heap);

            while count < n {
                let Some(HeapEntry {
                    cost: w,
                    key: (u, v),
                    ..
                }) = heap.pop()
                else {
                    break;
                };
                if included[v] {
                    continue;
                }
                included[v] = true;
                count += 1;
                tracer.emit(|| TraceEvent::TreeEdge {
                    from: graph.label(u),
                    to: graph.label(v),
                    weight: w,
                });
                tree.push((graph.label(u), graph.label(v), w));
                push_frontier(graph, v, &included, &mut heap);
            }
        }

        let tree = SpanningTree::from_edges(tree);
        log::debug!("prim: {} tree edges, weight {}", tree.len(), tree.total_weight);
        tracer.emit(|| TraceEvent::Done);
        Ok(tree)
    }
}

fn push_frontier<V: Vertex>(
    graph: &Graph<V>,
    u: usize,
    included: &[bool],
    heap: &mut BinaryHeap<HeapEntry<(usize, usize)>>,
) {
    for &(v, w) in graph.successors(u) {
        if !included[v] {
            heap.push(HeapEntry {
                priority: w,
                cost: w,
                key: (u, v),
            });
        }
    }
}
