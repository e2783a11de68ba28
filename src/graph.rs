//! Core weighted graph structure with adjacency lists.
//!
//! Vertices are opaque labels interned to dense indices on first sight.
//! Algorithms work on the indices and translate back to labels only when
//! they build their results.

use crate::error::{GraphError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Anything usable as a vertex label.
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Vertex for T {}

/// Weighted graph, directed or undirected.
///
/// Adjacency lists keep insertion order, and so does vertex enumeration.
/// Parallel edges and self-loops are stored as given.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    directed: bool,

    /// Vertex labels in first-insertion order.
    vertices: Vec<V>,

    /// Reverse lookup: label -> index
    vertex_index: HashMap<V, usize>,

    /// adj[u] = (v, weight) pairs in insertion order.
    /// Undirected insertions appear in both endpoint lists.
    adj: Vec<Vec<(usize, f64)>>,

    /// Insertion log, one entry per `add_edge` call.
    edges: Vec<(usize, usize, f64)>,
}

/// Serializable graph snapshot for import/export.
///
/// `edges` is the insertion log, so importing a snapshot reproduces the
/// source adjacency order exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot<V> {
    pub directed: bool,
    pub vertices: Vec<V>,
    pub edges: Vec<(usize, usize, f64)>,
}

impl<V: Vertex> Graph<V> {
    /// Create an empty graph.
    pub fn new(directed: bool) -> Self {
        Graph {
            directed,
            vertices: Vec::new(),
            vertex_index: HashMap::new(),
            adj: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Create a graph with pre-allocated capacity.
    pub fn with_capacity(directed: bool, vertex_capacity: usize, edge_capacity: usize) -> Self {
        Graph {
            directed,
            vertices: Vec::with_capacity(vertex_capacity),
            vertex_index: HashMap::with_capacity(vertex_capacity),
            adj: Vec::with_capacity(vertex_capacity),
            edges: Vec::with_capacity(edge_capacity),
        }
    }

    /// Add a vertex, returns its index. Idempotent - returns existing index if already present.
    pub fn add_vertex(&mut self, v: V) -> usize {
        if let Some(&idx) = self.vertex_index.get(&v) {
            return idx;
        }
        let idx = self.vertices.len();
        self.vertex_index.insert(v.clone(), idx);
        self.vertices.push(v);
        self.adj.push(Vec::new());
        idx
    }

    /// Add an edge u -> v. Both endpoints become vertices.
    /// For undirected graphs the reverse entry v -> u is added as well.
    pub fn add_edge(&mut self, u: V, v: V, weight: f64) {
        let from = self.add_vertex(u);
        let to = self.add_vertex(v);
        self.insert_indexed(from, to, weight);
    }

    pub(crate) fn insert_indexed(&mut self, from: usize, to: usize, weight: f64) {
        self.adj[from].push((to, weight));
        if !self.directed {
            self.adj[to].push((from, weight));
        }
        self.edges.push((from, to, weight));
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of `add_edge` insertions (an undirected edge counts once).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All vertices in first-insertion order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn contains(&self, v: &V) -> bool {
        self.vertex_index.contains_key(v)
    }

    /// Get vertex index by label.
    pub fn index_of(&self, v: &V) -> Option<usize> {
        self.vertex_index.get(v).copied()
    }

    /// Get vertex label by index.
    pub fn vertex(&self, idx: usize) -> Option<&V> {
        self.vertices.get(idx)
    }

    /// Outgoing (neighbor, weight) pairs of `v` in insertion order.
    /// Empty if `v` is unknown or has no outgoing edges.
    pub fn neighbors<'a>(&'a self, v: &V) -> impl Iterator<Item = (&'a V, f64)> + 'a {
        let list = self
            .index_of(v)
            .map_or(&[][..], |idx| self.adj[idx].as_slice());
        list.iter().map(move |&(to, w)| (&self.vertices[to], w))
    }

    /// Inserted edges as (from, to, weight) labels, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, f64)> + '_ {
        self.edges
            .iter()
            .map(move |&(u, v, w)| (&self.vertices[u], &self.vertices[v], w))
    }

    /// Export the graph as a snapshot.
    pub fn to_snapshot(&self) -> GraphSnapshot<V> {
        GraphSnapshot {
            directed: self.directed,
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Rebuild a graph from a snapshot, replaying the insertion log.
    pub fn from_snapshot(snapshot: GraphSnapshot<V>) -> Result<Self> {
        let n = snapshot.vertices.len();
        let mut graph = Graph::with_capacity(snapshot.directed, n, snapshot.edges.len());
        for v in snapshot.vertices {
            graph.add_vertex(v);
        }
        if graph.len() != n {
            return Err(GraphError::Snapshot("duplicate vertex label".into()));
        }
        for (from, to, weight) in snapshot.edges {
            if from >= n || to >= n {
                return Err(GraphError::Snapshot(format!(
                    "edge ({from}, {to}) references a vertex outside 0..{n}"
                )));
            }
            graph.insert_indexed(from, to, weight);
        }
        Ok(graph)
    }
}

impl<V: Vertex + Serialize + DeserializeOwned> Graph<V> {
    /// Export graph as JSON snapshot.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_snapshot()).unwrap_or_default()
    }

    /// Import graph from JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: GraphSnapshot<V> =
            serde_json::from_str(json).map_err(|e| GraphError::Snapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}

// Internal methods used by the algorithms
impl<V: Vertex> Graph<V> {
    /// Successor slice of a vertex index (internal use).
    pub(crate) fn successors(&self, idx: usize) -> &[(usize, f64)] {
        self.adj.get(idx).map_or(&[], |v| v.as_slice())
    }

    /// Resolve a label that an algorithm cannot run without.
    pub(crate) fn require(&self, v: &V) -> Result<usize> {
        self.index_of(v)
            .ok_or_else(|| GraphError::VertexNotFound(format!("{v:?}")))
    }

    /// Label of an index produced by this graph (internal use).
    pub(crate) fn label(&self, idx: usize) -> V {
        self.vertices[idx].clone()
    }

    pub(crate) fn labels(&self, indices: &[usize]) -> Vec<V> {
        indices.iter().map(|&i| self.label(i)).collect()
    }

    /// Neighbor index lists of the undirected view, in adjacency order.
    ///
    /// Undirected graphs already store both directions. For directed graphs
    /// every edge is mirrored and self-loops are dropped.
    pub(crate) fn undirected_neighbors(&self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut neighbors = vec![Vec::new(); n];
        for u in 0..n {
            for &(v, _) in self.successors(u) {
                if !self.directed {
                    neighbors[u].push(v);
                } else if u != v {
                    neighbors[u].push(v);
                    neighbors[v].push(u);
                }
            }
        }
        neighbors
    }

    /// Pair each vertex with its entry of `values` (indexed by vertex index).
    pub(crate) fn vertex_map<T>(&self, values: Vec<T>) -> VertexMap<V, T> {
        VertexMap::new(self.vertices.clone(), values)
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::directed()
    }
}

/// Vertex-keyed result table, ordered like the graph's vertex enumeration.
///
/// Serializes as an array of `[vertex, value]` pairs so key order survives
/// the trip to JavaScript.
#[derive(Debug, Clone)]
pub struct VertexMap<V, T> {
    keys: Vec<V>,
    values: Vec<T>,
    index: HashMap<V, usize>,
}

impl<V: Vertex, T> VertexMap<V, T> {
    pub(crate) fn new(keys: Vec<V>, values: Vec<T>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        let index = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        VertexMap {
            keys,
            values,
            index,
        }
    }

    pub fn get(&self, v: &V) -> Option<&T> {
        self.index.get(v).map(|&i| &self.values[i])
    }

    /// Position of `v` in key order.
    pub fn position(&self, v: &V) -> Option<usize> {
        self.index.get(v).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[V] {
        &self.keys
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &T)> + '_ {
        self.keys.iter().zip(self.values.iter())
    }
}

impl<V: PartialEq, T: PartialEq> PartialEq for VertexMap<V, T> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

impl<V: Serialize, T: Serialize> Serialize for VertexMap<V, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.keys.iter().zip(self.values.iter()))
    }
}
