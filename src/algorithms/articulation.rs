//! Articulation points (cut vertices) and bridges (cut edges).
//!
//! Tarjan's algorithm on the undirected view, run as one DFS per component:
//! - disc[v]: discovery time of vertex v
//! - low[v]: smallest discovery time reachable from v's subtree through at
//!   most one back edge
//!
//! A vertex v is an articulation point if:
//! 1. v is a DFS root and has more than one DFS child, OR
//! 2. v is not a root and has a child u with low[u] >= disc[v]
//!
//! A tree edge (v, u) is a bridge iff low[u] > disc[v].
//!
//! The edge back to the DFS parent is recognised by vertex, so a second
//! parallel edge to the parent does not count as a back edge.

use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use serde::Serialize;

/// Cut vertices in vertex order, bridges as (parent, child) in the order
/// the DFS proved them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cuts<V> {
    pub articulation_points: Vec<V>,
    pub bridges: Vec<(V, V)>,
}

pub struct Tarjan<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> Tarjan<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        Tarjan { graph }
    }
}

struct Frame {
    vertex: usize,
    next: usize,
    children: usize,
}

/// Per-run DFS state.
struct Search<'g, V> {
    graph: &'g Graph<V>,
    neighbors: Vec<Vec<usize>>,
    disc: Vec<Option<usize>>,
    low: Vec<usize>,
    parent: Vec<Option<usize>>,
    is_cut: Vec<bool>,
    bridges: Vec<(usize, usize)>,
    time: usize,
    stack: Vec<Frame>,
}

impl<'g, V: Vertex> Search<'g, V> {
    fn new(graph: &'g Graph<V>) -> Self {
        let n = graph.len();
        Search {
            graph,
            neighbors: graph.undirected_neighbors(),
            disc: vec![None; n],
            low: vec![0; n],
            parent: vec![None; n],
            is_cut: vec![false; n],
            bridges: Vec::new(),
            time: 0,
            stack: Vec::new(),
        }
    }

    fn discover(&mut self, v: usize, tracer: &mut Tracer<'_, V>) {
        let time = self.time;
        self.time += 1;
        self.disc[v] = Some(time);
        self.low[v] = time;
        self.stack.push(Frame {
            vertex: v,
            next: 0,
            children: 0,
        });
        tracer.emit(|| TraceEvent::Discover {
            vertex: self.graph.label(v),
            time,
        });
    }

    fn mark_cut(&mut self, v: usize, tracer: &mut Tracer<'_, V>) {
        if !self.is_cut[v] {
            self.is_cut[v] = true;
            tracer.emit(|| TraceEvent::ArticulationPoint(self.graph.label(v)));
        }
    }

    fn run_from(&mut self, root: usize, tracer: &mut Tracer<'_, V>) {
        self.discover(root, tracer);

        while let Some(frame) = self.stack.last_mut() {
            let u = frame.vertex;
            if let Some(&v) = self.neighbors[u].get(frame.next) {
                frame.next += 1;
                match self.disc[v] {
                    None => {
                        frame.children += 1;
                        self.parent[v] = Some(u);
                        self.discover(v, tracer);
                    }
                    Some(dv) if self.parent[u] != Some(v) => {
                        self.low[u] = self.low[u].min(dv);
                    }
                    Some(_) => {}
                }
                continue;
            }

            self.stack.pop();
            let Some(p) = self.parent[u] else {
                continue;
            };
            let (Some(dp), Some(frame)) = (self.disc[p], self.stack.last()) else {
                continue;
            };
            let siblings = frame.children;
            self.low[p] = self.low[p].min(self.low[u]);

            let is_root = self.parent[p].is_none();
            if (is_root && siblings > 1) || (!is_root && self.low[u] >= dp) {
                self.mark_cut(p, tracer);
            }
            if self.low[u] > dp {
                self.bridges.push((p, u));
                let graph = self.graph;
                tracer.emit(|| TraceEvent::Bridge(graph.label(p), graph.label(u)));
            }
        }
    }
}

impl<V: Vertex> Algorithm<V> for Tarjan<'_, V> {
    type Output = Cuts<V>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Cuts<V>> {
        let graph = self.graph;
        log::debug!("tarjan: vertices={}", graph.len());

        let mut search = Search::new(graph);
        for root in 0..graph.len() {
            if search.disc[root].is_none() {
                search.run_from(root, tracer);
            }
        }

        let cut_vertices: Vec<usize> = (0..graph.len()).filter(|&v| search.is_cut[v]).collect();
        let cuts = Cuts {
            articulation_points: graph.labels(&cut_vertices),
            bridges: search
                .bridges
                .iter()
                .map(|&(u, v)| (graph.label(u), graph.label(v)))
                .collect(),
        };
        log::debug!(
            "tarjan: {} articulation points, {} bridges",
            cuts.articulation_points.len(),
            cuts.bridges.len()
        );
        tracer.emit(|| TraceEvent::Done);
        Ok(cuts)
    }
}
