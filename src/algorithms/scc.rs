//! Strongly connected components (Kosaraju).
//!
//! Pass one records DFS finishing order on the graph. Pass two runs DFS on
//! the transpose in reverse finishing order; each tree it grows is one
//! component, listed in preorder.

use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::trace::{Algorithm, Phase, TraceEvent, Tracer};

pub struct Kosaraju<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V: Vertex> Kosaraju<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        Kosaraju { graph }
    }

    /// Vertex indices in DFS finishing order.
    fn finishing_order(&self, tracer: &mut Tracer<'_, V>) -> Vec<usize> {
        let graph = self.graph;
        let n = graph.len();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        // (vertex, next successor position)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            tracer.emit(|| TraceEvent::Visit(graph.label(root)));
            stack.push((root, 0));

            while let Some((u, next)) = stack.last_mut() {
                let u = *u;
                match graph.successors(u).get(*next) {
                    Some(&(v, _)) => {
                        *next += 1;
                        if !visited[v] {
                            visited[v] = true;
                            tracer.emit(|| TraceEvent::Visit(graph.label(v)));
                            stack.push((v, 0));
                        }
                    }
                    None => {
                        stack.pop();
                        order.push(u);
                        tracer.emit(|| TraceEvent::Finish(graph.label(u)));
                    }
                }
            }
        }
        order
    }

    fn transpose(&self) -> Vec<Vec<usize>> {
        let graph = self.graph;
        let mut transpose = vec![Vec::new(); graph.len()];
        for u in 0..graph.len() {
            for &(v, _) in graph.successors(u) {
                transpose[v].push(u);
            }
        }
        transpose
    }
}

impl<V: Vertex> Algorithm<V> for Kosaraju<'_, V> {
    type Output = Vec<Vec<V>>;

    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Vec<Vec<V>>> {
        let graph = self.graph;
        let n = graph.len();
        log::debug!("kosaraju: vertices={}", n);

        let order = self.finishing_order(tracer);
        let transpose = self.transpose();
        tracer.emit(|| TraceEvent::Phase(Phase::Transpose));

        let mut assigned = vec![false; n];
        let mut components = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for &root in order.iter().rev() {
            if assigned[root] {
                continue;
            }
            let mut component = vec![root];
            assigned[root] = true;
            tracer.emit(|| TraceEvent::Visit(graph.label(root)));
            stack.push((root, 0));

            while let Some((u, next)) = stack.last_mut() {
                match transpose[*u].get(*next) {
                    Some(&v) => {
                        *next += 1;
                        if !assigned[v] {
                            assigned[v] = true;
                            component.push(v);
                            tracer.emit(|| TraceEvent::Visit(graph.label(v)));
                            stack.push((v, 0));
                        }
                    }
                    None => {
                        stack.pop();
                    }
                }
            }

            let component = graph.labels(&component);
            tracer.emit(|| TraceEvent::ComponentFound(component.clone()));
            components.push(component);
        }

        log::debug!("kosaraju: {} components", components.len());
        tracer.emit(|| TraceEvent::Done);
        Ok(components)
    }
}
