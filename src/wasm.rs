//! JavaScript facade.
//!
//! Vertices are strings on this side of the boundary. Every algorithm method
//! takes two trailing arguments:
//!
//! - `traced`: when true the method returns `{ events, result }` with the
//!   full event list; otherwise it returns the bare result.
//! - `callback`: an optional JS function called with each event the moment
//!   the algorithm emits it.
//!
//! Results and events cross over through `serde-wasm-bindgen`; infinite
//! distances arrive as `Infinity`.

use crate::algorithms::subgraph;
use crate::algorithms::{
    AStar, BellmanFord, Bfs, Bipartite, ConnectedComponents, CycleDetection, DagShortestPaths,
    Dfs, Dijkstra, Kosaraju, Kruskal, Prim, Spfa, Tarjan, TopologicalSort,
};
use crate::error::GraphError;
use crate::graph::Graph;
use crate::trace::{Algorithm, Observer, TraceEvent};
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_error(e: GraphError) -> JsError {
    JsError::new(&e.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Observer that forwards to a JS callback and/or keeps the events.
///
/// The first exception thrown by the callback is kept and later calls are
/// skipped; the algorithm itself always runs to completion.
struct JsSink<V> {
    callback: Option<Function>,
    record: bool,
    events: Vec<TraceEvent<V>>,
    failure: Option<String>,
}

impl<V: Serialize> Observer<V> for JsSink<V> {
    fn observe(&mut self, event: TraceEvent<V>) {
        if self.failure.is_none() {
            if let Some(callback) = &self.callback {
                let delivered = serde_wasm_bindgen::to_value(&event)
                    .map_err(JsValue::from)
                    .and_then(|value| callback.call1(&JsValue::NULL, &value));
                if let Err(e) = delivered {
                    self.failure = Some(e.as_string().unwrap_or_else(|| format!("{e:?}")));
                }
            }
        }
        if self.record {
            self.events.push(event);
        }
    }
}

#[derive(Serialize)]
struct TracedRun<'a, V, R> {
    events: &'a [TraceEvent<V>],
    result: &'a R,
}

/// Run `algorithm` in the mode the caller asked for.
fn run_js<V, A>(algorithm: &A, traced: bool, callback: Option<Function>) -> Result<JsValue, JsError>
where
    V: Serialize,
    A: Algorithm<V>,
    A::Output: Serialize,
{
    if !traced && callback.is_none() {
        let result = algorithm.run().map_err(js_error)?;
        return to_js(&result);
    }

    let mut sink = JsSink {
        callback,
        record: traced,
        events: Vec::new(),
        failure: None,
    };
    let result = algorithm.run_with(&mut sink).map_err(js_error)?;
    if let Some(message) = sink.failure {
        return Err(JsError::new(&format!("trace callback failed: {message}")));
    }
    if traced {
        to_js(&TracedRun {
            events: &sink.events,
            result: &result,
        })
    } else {
        to_js(&result)
    }
}

/// A graph with string vertex labels.
#[wasm_bindgen]
pub struct WasmGraph {
    inner: Graph<String>,
}

#[wasm_bindgen]
impl WasmGraph {
    #[wasm_bindgen(constructor)]
    pub fn new(directed: bool) -> WasmGraph {
        WasmGraph {
            inner: Graph::new(directed),
        }
    }

    #[wasm_bindgen(js_name = addVertex)]
    pub fn add_vertex(&mut self, v: &str) -> usize {
        self.inner.add_vertex(v.to_string())
    }

    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) {
        self.inner.add_edge(u.to_string(), v.to_string(), weight);
    }

    #[wasm_bindgen(js_name = isDirected)]
    pub fn is_directed(&self) -> bool {
        self.inner.is_directed()
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn contains(&self, v: &str) -> bool {
        self.inner.contains(&v.to_string())
    }

    pub fn vertices(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.vertices()).unwrap_or(JsValue::NULL)
    }

    /// `[neighbor, weight]` pairs in insertion order.
    pub fn neighbors(&self, v: &str) -> JsValue {
        let list: Vec<(&String, f64)> = self.inner.neighbors(&v.to_string()).collect();
        serde_wasm_bindgen::to_value(&list).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> String {
        self.inner.to_json()
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmGraph, JsError> {
        let inner = Graph::from_json(json).map_err(js_error)?;
        Ok(WasmGraph { inner })
    }

    /// Induced subgraph on the listed vertices; unknown labels are ignored.
    pub fn subgraph(&self, vertices: Vec<String>) -> WasmGraph {
        WasmGraph {
            inner: subgraph::extract_subgraph(&self.inner, &vertices),
        }
    }

    #[wasm_bindgen(js_name = reachableFrom)]
    pub fn reachable_from(&self, v: &str) -> JsValue {
        let reach = subgraph::reachable_from(&self.inner, &v.to_string());
        serde_wasm_bindgen::to_value(&reach).unwrap_or(JsValue::NULL)
    }

    /// Induced subgraph on everything reachable from `v`; empty if `v` is unknown.
    #[wasm_bindgen(js_name = reachableSubgraph)]
    pub fn reachable_subgraph(&self, v: &str) -> WasmGraph {
        WasmGraph {
            inner: subgraph::reachable_subgraph_from(&self.inner, &v.to_string()),
        }
    }

    // Traversal

    pub fn bfs(
        &self,
        start: &str,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&Bfs::new(&self.inner, start.to_string()), traced, callback)
    }

    pub fn dfs(
        &self,
        start: &str,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&Dfs::new(&self.inner, start.to_string()), traced, callback)
    }

    // Shortest paths

    pub fn dijkstra(
        &self,
        source: &str,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&Dijkstra::new(&self.inner, source.to_string()), traced, callback)
    }

    #[wasm_bindgen(js_name = bellmanFord)]
    pub fn bellman_ford(
        &self,
        source: &str,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&BellmanFord::new(&self.inner, source.to_string()), traced, callback)
    }

    pub fn spfa(
        &self,
        source: &str,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&Spfa::new(&self.inner, source.to_string()), traced, callback)
    }

    /// A* with an optional JS heuristic `(vertex, goal) => number`.
    /// A heuristic that throws or returns a non-number counts as zero.
    pub fn astar(
        &self,
        source: &str,
        goal: &str,
        heuristic: Option<Function>,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        let search = AStar::new(&self.inner, source.to_string(), goal.to_string());
        let search = match heuristic {
            Some(h) => search.with_heuristic(move |v: &String, g: &String| {
                h.call2(&JsValue::NULL, &JsValue::from_str(v), &JsValue::from_str(g))
                    .ok()
                    .and_then(|x| x.as_f64())
                    .unwrap_or(0.0)
            }),
            None => search,
        };
        run_js(&search, traced, callback)
    }

    #[wasm_bindgen(js_name = dagShortestPaths)]
    pub fn dag_shortest_paths(
        &self,
        source: &str,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&DagShortestPaths::new(&self.inner, source.to_string()), traced, callback)
    }

    // Spanning trees

    pub fn kruskal(&self, traced: bool, callback: Option<Function>) -> Result<JsValue, JsError> {
        run_js(&Kruskal::new(&self.inner), traced, callback)
    }

    pub fn prim(&self, traced: bool, callback: Option<Function>) -> Result<JsValue, JsError> {
        run_js(&Prim::new(&self.inner), traced, callback)
    }

    // Structure

    #[wasm_bindgen(js_name = topologicalSort)]
    pub fn topological_sort(
        &self,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&TopologicalSort::new(&self.inner), traced, callback)
    }

    #[wasm_bindgen(js_name = stronglyConnectedComponents)]
    pub fn strongly_connected_components(
        &self,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&Kosaraju::new(&self.inner), traced, callback)
    }

    #[wasm_bindgen(js_name = connectedComponents)]
    pub fn connected_components(
        &self,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&ConnectedComponents::new(&self.inner), traced, callback)
    }

    /// `{ articulation_points, bridges }`
    #[wasm_bindgen(js_name = articulationPoints)]
    pub fn articulation_points(
        &self,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&Tarjan::new(&self.inner), traced, callback)
    }

    #[wasm_bindgen(js_name = isBipartite)]
    pub fn is_bipartite(
        &self,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        run_js(&Bipartite::new(&self.inner), traced, callback)
    }

    /// The first cycle found as a closed walk, or `undefined`.
    #[wasm_bindgen(js_name = findCycle)]
    pub fn find_cycle(&self, traced: bool, callback: Option<Function>) -> Result<JsValue, JsError> {
        run_js(&CycleDetection::new(&self.inner), traced, callback)
    }
}

#[cfg(feature = "all-pairs")]
#[wasm_bindgen]
impl WasmGraph {
    #[wasm_bindgen(js_name = floydWarshall)]
    pub fn floyd_warshall(
        &self,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        use crate::algorithms::FloydWarshall;
        run_js(&FloydWarshall::new(&self.inner), traced, callback)
    }

    pub fn johnson(&self, traced: bool, callback: Option<Function>) -> Result<JsValue, JsError> {
        use crate::algorithms::Johnson;
        run_js(&Johnson::new(&self.inner), traced, callback)
    }

    #[wasm_bindgen(js_name = transitiveClosure)]
    pub fn transitive_closure(
        &self,
        traced: bool,
        callback: Option<Function>,
    ) -> Result<JsValue, JsError> {
        use crate::algorithms::TransitiveClosure;
        run_js(&TransitiveClosure::new(&self.inner), traced, callback)
    }
}

#[cfg(feature = "grid")]
pub use grid_api::WasmGrid;

#[cfg(feature = "grid")]
mod grid_api {
    use super::{js_error, run_js};
    use crate::algorithms::{MazeSearch, Strategy};
    use crate::grid::{Cell, Grid};
    use js_sys::Function;
    use wasm_bindgen::prelude::*;

    /// A maze grid for the pathfinding searches.
    #[wasm_bindgen]
    pub struct WasmGrid {
        inner: Grid,
    }

    #[wasm_bindgen]
    impl WasmGrid {
        #[wasm_bindgen(constructor)]
        pub fn new(rows: usize, cols: usize) -> WasmGrid {
            WasmGrid {
                inner: Grid::new(rows, cols),
            }
        }

        pub fn rows(&self) -> usize {
            self.inner.rows()
        }

        pub fn cols(&self) -> usize {
            self.inner.cols()
        }

        #[wasm_bindgen(js_name = setWall)]
        pub fn set_wall(&mut self, row: usize, col: usize, wall: bool) -> Result<(), JsError> {
            self.inner.set_wall(Cell::new(row, col), wall).map_err(js_error)
        }

        #[wasm_bindgen(js_name = isWall)]
        pub fn is_wall(&self, row: usize, col: usize) -> bool {
            self.inner.is_wall(Cell::new(row, col))
        }

        /// Walled cells as `{ row, col }` objects.
        pub fn walls(&self) -> JsValue {
            serde_wasm_bindgen::to_value(&self.inner.walls()).unwrap_or(JsValue::NULL)
        }

        /// Search from (start_row, start_col) to (goal_row, goal_col).
        ///
        /// `strategy` is one of `bfs`, `dfs`, `dijkstra`, `astar`,
        /// `bidirectional_bfs`. The result is the path of `{ row, col }`
        /// cells, or `undefined` if the goal is unreachable.
        #[allow(clippy::too_many_arguments)]
        pub fn search(
            &self,
            strategy: &str,
            start_row: usize,
            start_col: usize,
            goal_row: usize,
            goal_col: usize,
            traced: bool,
            callback: Option<Function>,
        ) -> Result<JsValue, JsError> {
            let strategy: Strategy = strategy.parse().map_err(js_error)?;
            let search = MazeSearch::new(
                &self.inner,
                Cell::new(start_row, start_col),
                Cell::new(goal_row, goal_col),
                strategy,
            );
            run_js(&search, traced, callback)
        }
    }
}
