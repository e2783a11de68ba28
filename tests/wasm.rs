//! JavaScript facade tests; run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use graph_steps_wasm::wasm::WasmGraph;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

fn kinds(events: &JsValue) -> Vec<String> {
    Array::from(events)
        .iter()
        .map(|e| get(&e, "kind").as_string().unwrap())
        .collect()
}

fn strings(value: &JsValue) -> Vec<String> {
    Array::from(value)
        .iter()
        .map(|v| v.as_string().unwrap())
        .collect()
}

fn sample() -> WasmGraph {
    let mut g = WasmGraph::new(true);
    g.add_edge("a", "b", 4.0);
    g.add_edge("a", "c", 1.0);
    g.add_edge("c", "b", 2.0);
    g.add_edge("b", "d", 1.0);
    g
}

#[wasm_bindgen_test]
fn test_graph_building() {
    let g = sample();
    assert!(g.is_directed());
    assert_eq!(g.vertex_count(), 4);
    assert_eq!(g.edge_count(), 4);
    assert!(g.contains("d"));
    assert_eq!(strings(&g.vertices()), vec!["a", "b", "c", "d"]);
}

#[wasm_bindgen_test]
fn test_silent_run_returns_bare_result() {
    let g = sample();
    let order = g.bfs("a", false, None).unwrap();
    assert_eq!(strings(&order), vec!["a", "b", "c", "d"]);
}

#[wasm_bindgen_test]
fn test_traced_run_returns_events_and_result() {
    let g = sample();
    let run = g.dfs("a", true, None).unwrap();
    let events = get(&run, "events");
    let mut expected = vec!["visit"; 4];
    expected.push("done");
    assert_eq!(kinds(&events), expected);
    assert_eq!(strings(&get(&run, "result")), vec!["a", "b", "d", "c"]);
}

#[wasm_bindgen_test]
fn test_callback_sees_every_event() {
    let g = sample();
    let seen = Array::new();
    let push = Function::new_with_args("seen, event", "seen.push(event.kind)")
        .bind1(&JsValue::NULL, &seen);
    let run = g.dijkstra("a", true, Some(push)).unwrap();
    let recorded = kinds(&get(&run, "events"));
    assert_eq!(strings(&seen), recorded);
    assert_eq!(recorded.last().map(String::as_str), Some("done"));
}

#[wasm_bindgen_test]
fn test_callback_exception_is_reported() {
    let g = sample();
    let throw = Function::new_with_args("event", "throw new Error('boom')");
    assert!(g.bfs("a", false, Some(throw)).is_err());
}

#[wasm_bindgen_test]
fn test_missing_vertex_is_an_error() {
    let g = sample();
    assert!(g.dijkstra("zz", false, None).is_err());
}

#[wasm_bindgen_test]
fn test_negative_cycle_outcome() {
    let mut g = WasmGraph::new(true);
    g.add_edge("x", "y", 1.0);
    g.add_edge("y", "x", -2.0);
    let outcome = g.bellman_ford("x", false, None).unwrap();
    assert_eq!(get(&outcome, "status").as_string().unwrap(), "negative_cycle");
}

#[wasm_bindgen_test]
fn test_json_round_trip() {
    let g = sample();
    let copy = WasmGraph::from_json(&g.to_json()).unwrap();
    assert_eq!(copy.vertex_count(), 4);
    assert_eq!(copy.edge_count(), 4);
    assert!(WasmGraph::from_json("{ nope").is_err());
}

#[wasm_bindgen_test]
fn test_reachable_subgraph() {
    let mut g = sample();
    g.add_edge("e", "a", 1.0);
    let sub = g.reachable_subgraph("b");
    assert_eq!(strings(&sub.vertices()), vec!["b", "d"]);
    assert_eq!(sub.edge_count(), 1);
    assert_eq!(g.reachable_subgraph("zz").vertex_count(), 0);
}

#[wasm_bindgen_test]
fn test_astar_with_js_heuristic() {
    let g = sample();
    let zero = Function::new_with_args("v, goal", "return 0");
    let route = g.astar("a", "d", Some(zero), false, None).unwrap();
    assert_eq!(strings(&get(&route, "path")), vec!["a", "c", "b", "d"]);
}

#[cfg(feature = "grid")]
#[wasm_bindgen_test]
fn test_grid_search() {
    use graph_steps_wasm::wasm::WasmGrid;

    let mut grid = WasmGrid::new(3, 3);
    grid.set_wall(1, 0, true).unwrap();
    grid.set_wall(1, 1, true).unwrap();
    assert!(grid.is_wall(1, 1));
    assert!(grid.set_wall(5, 5, true).is_err());

    let path = grid.search("bfs", 0, 0, 2, 0, false, None).unwrap();
    assert_eq!(Array::from(&path).length(), 7);

    let run = grid.search("astar", 0, 0, 2, 0, true, None).unwrap();
    assert_eq!(kinds(&get(&run, "events")).last().map(String::as_str), Some("found"));

    assert!(grid.search("teleport", 0, 0, 2, 0, false, None).is_err());
}
