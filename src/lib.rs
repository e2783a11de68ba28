//! Classical graph algorithms with replayable step-by-step traces.
//!
//! Every algorithm in [`algorithms`] implements [`Algorithm`], so it can be
//! run silently for its result, or with an [`Observer`] that sees each step
//! as it happens, or recorded into a [`Traced`] run for later playback. All
//! three produce the same result.
//!
//! ```
//! use graph_steps_wasm::algorithms::Dijkstra;
//! use graph_steps_wasm::{Algorithm, Graph, TraceEvent};
//!
//! let mut g = Graph::directed();
//! g.add_edge("a", "b", 2.0);
//! g.add_edge("b", "c", 1.0);
//!
//! let traced = Dijkstra::new(&g, "a").run_traced().unwrap();
//! assert_eq!(traced.result().distance(&"c"), 3.0);
//! let events: Vec<_> = traced.collect();
//! assert_eq!(events.last(), Some(&TraceEvent::Done));
//! ```
//!
//! The [`wasm`] module exposes the same engine to JavaScript.

pub mod algorithms;
pub mod error;
pub mod graph;
#[cfg(feature = "grid")]
pub mod grid;
pub mod trace;
pub mod wasm;

pub use error::{GraphError, Result};
pub use graph::{Graph, GraphSnapshot, Vertex, VertexMap};
#[cfg(feature = "grid")]
pub use grid::{Cell, Grid};
pub use trace::{
    Algorithm, LogObserver, Observer, Phase, Recorder, Side, TraceEvent, Traced, Tracer,
};

use wasm_bindgen::prelude::*;

/// Runs once when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Crate version, for the UI's about box.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
