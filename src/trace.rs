//! Step traces and the dual-mode execution contract.
//!
//! Every algorithm implements [`Algorithm`] once, against a [`Tracer`]. The
//! same code path then serves three callers:
//!
//! - [`Algorithm::run`] - silent, returns only the result. No event is ever
//!   constructed.
//! - [`Algorithm::run_with`] - pushes each event to an [`Observer`] the moment
//!   the algorithm reaches it (e.g. a visualizer callback or [`LogObserver`]).
//! - [`Algorithm::run_traced`] - records the events and hands back a
//!   [`Traced`], a single-pass iterator over them that also owns the result.
//!
//! Events never feed back into the computation, so all three return the same
//! result for the same graph.

use crate::error::Result;
use serde::Serialize;

/// Named stages inside multi-pass algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Bellman-Ford relaxation pass `n` (1-based).
    Pass(usize),
    /// Bellman-Ford's final scan for still-relaxable edges.
    NegativeCycleCheck,
    /// Johnson: Bellman-Ford from the synthetic source.
    Potentials,
    /// Johnson: Dijkstra from every vertex on the reweighted graph.
    Reweighted,
    /// Kosaraju: first pass done, second pass runs on the transpose.
    Transpose,
    /// DAG shortest paths: topological order computed, relaxation starts.
    Relaxation,
}

/// Which half of a 2-coloring a vertex belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One discrete step of an algorithm's progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum TraceEvent<V> {
    /// Vertex (or cell) visited or discovered.
    Visit(V),
    /// Vertex taken off a distance-ordered frontier.
    Settle { vertex: V, distance: f64 },
    /// Tentative distance of `vertex` improved.
    Relax { vertex: V, distance: f64 },
    /// Vertex added to a work queue.
    Enqueue(V),
    /// DFS discovery with its discovery time.
    Discover { vertex: V, time: usize },
    /// DFS finished with a vertex (all descendants explored).
    Finish(V),
    Phase(Phase),
    Color { vertex: V, side: Side },
    /// Adjacent vertices with the same color.
    Conflict(V, V),
    /// Edge accepted into a spanning tree.
    TreeEdge { from: V, to: V, weight: f64 },
    /// All-pairs distance improved.
    PairRelax { from: V, to: V, distance: f64 },
    /// Closure learned `from` reaches `to` through `via`.
    Reach { from: V, to: V, via: V },
    ComponentFound(Vec<V>),
    ArticulationPoint(V),
    Bridge(V, V),
    CycleFound(Vec<V>),
    /// Vertices a topological sort could not order.
    Unsorted(Vec<V>),
    /// Terminal: negative cycle, no result distances.
    NegativeCycle,
    /// Terminal: path search succeeded.
    Found(Vec<V>),
    /// Terminal: path search exhausted its frontier.
    NotFound,
    /// Terminal: run complete, result available.
    Done,
}

impl<V> TraceEvent<V> {
    /// Whether this event ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TraceEvent::Done
                | TraceEvent::NegativeCycle
                | TraceEvent::Found(_)
                | TraceEvent::NotFound
        )
    }

    /// Translate every vertex in the event; `None` if any of them has no
    /// counterpart, in which case the whole event is dropped.
    pub fn filter_map<W>(self, mut f: impl FnMut(V) -> Option<W>) -> Option<TraceEvent<W>> {
        Some(match self {
            TraceEvent::Visit(v) => TraceEvent::Visit(f(v)?),
            TraceEvent::Settle { vertex, distance } => TraceEvent::Settle {
                vertex: f(vertex)?,
                distance,
            },
            TraceEvent::Relax { vertex, distance } => TraceEvent::Relax {
                vertex: f(vertex)?,
                distance,
            },
            TraceEvent::Enqueue(v) => TraceEvent::Enqueue(f(v)?),
            TraceEvent::Discover { vertex, time } => TraceEvent::Discover {
                vertex: f(vertex)?,
                time,
            },
            TraceEvent::Finish(v) => TraceEvent::Finish(f(v)?),
            TraceEvent::Phase(p) => TraceEvent::Phase(p),
            TraceEvent::Color { vertex, side } => TraceEvent::Color {
                vertex: f(vertex)?,
                side,
            },
            TraceEvent::Conflict(a, b) => TraceEvent::Conflict(f(a)?, f(b)?),
            TraceEvent::TreeEdge { from, to, weight } => TraceEvent::TreeEdge {
                from: f(from)?,
                to: f(to)?,
                weight,
            },
            TraceEvent::PairRelax { from, to, distance } => TraceEvent::PairRelax {
                from: f(from)?,
                to: f(to)?,
                distance,
            },
            TraceEvent::Reach { from, to, via } => TraceEvent::Reach {
                from: f(from)?,
                to: f(to)?,
                via: f(via)?,
            },
            TraceEvent::ComponentFound(vs) => TraceEvent::ComponentFound(map_all(vs, &mut f)?),
            TraceEvent::ArticulationPoint(v) => TraceEvent::ArticulationPoint(f(v)?),
            TraceEvent::Bridge(a, b) => TraceEvent::Bridge(f(a)?, f(b)?),
            TraceEvent::CycleFound(vs) => TraceEvent::CycleFound(map_all(vs, &mut f)?),
            TraceEvent::Unsorted(vs) => TraceEvent::Unsorted(map_all(vs, &mut f)?),
            TraceEvent::NegativeCycle => TraceEvent::NegativeCycle,
            TraceEvent::Found(vs) => TraceEvent::Found(map_all(vs, &mut f)?),
            TraceEvent::NotFound => TraceEvent::NotFound,
            TraceEvent::Done => TraceEvent::Done,
        })
    }
}

fn map_all<V, W>(vs: Vec<V>, f: &mut impl FnMut(V) -> Option<W>) -> Option<Vec<W>> {
    vs.into_iter().map(f).collect()
}

/// Receives events as an algorithm produces them.
pub trait Observer<V> {
    fn observe(&mut self, event: TraceEvent<V>);
}

impl<V, F: FnMut(TraceEvent<V>)> Observer<V> for F {
    fn observe(&mut self, event: TraceEvent<V>) {
        self(event)
    }
}

/// Collects events in emission order.
#[derive(Debug)]
pub struct Recorder<V> {
    events: Vec<TraceEvent<V>>,
}

impl<V> Recorder<V> {
    pub fn new() -> Self {
        Recorder { events: Vec::new() }
    }

    pub fn events(&self) -> &[TraceEvent<V>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent<V>> {
        self.events
    }
}

impl<V> Default for Recorder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Observer<V> for Recorder<V> {
    fn observe(&mut self, event: TraceEvent<V>) {
        self.events.push(event);
    }
}

/// Forwards every event to the `log` facade at trace level.
#[derive(Debug, Default)]
pub struct LogObserver {
    target: &'static str,
}

impl LogObserver {
    pub fn new(target: &'static str) -> Self {
        LogObserver { target }
    }
}

impl<V: std::fmt::Debug> Observer<V> for LogObserver {
    fn observe(&mut self, event: TraceEvent<V>) {
        let target = if self.target.is_empty() {
            module_path!()
        } else {
            self.target
        };
        log::trace!(target: target, "{event:?}");
    }
}

/// Per-run handle algorithms emit through.
///
/// Events are built lazily: `emit` takes a closure that is only called when
/// an observer is attached.
pub struct Tracer<'a, V> {
    observer: Option<&'a mut dyn Observer<V>>,
}

impl<'a, V> Tracer<'a, V> {
    pub fn silent() -> Self {
        Tracer { observer: None }
    }

    pub fn new(observer: &'a mut dyn Observer<V>) -> Self {
        Tracer {
            observer: Some(observer),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.observer.is_some()
    }

    #[inline]
    pub fn emit(&mut self, make: impl FnOnce() -> TraceEvent<V>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.observe(make());
        }
    }
}

/// A recorded run: events in emission order plus the final result.
///
/// Iterating consumes the events exactly once; the result stays available
/// throughout and is identical to what the silent run returns.
#[derive(Debug)]
pub struct Traced<V, R> {
    events: std::vec::IntoIter<TraceEvent<V>>,
    result: R,
}

impl<V, R> Traced<V, R> {
    pub fn new(events: Vec<TraceEvent<V>>, result: R) -> Self {
        Traced {
            events: events.into_iter(),
            result,
        }
    }

    pub fn result(&self) -> &R {
        &self.result
    }

    pub fn into_result(self) -> R {
        self.result
    }

    /// Remaining events and the result.
    pub fn into_parts(self) -> (Vec<TraceEvent<V>>, R) {
        (self.events.collect(), self.result)
    }
}

impl<V, R> Iterator for Traced<V, R> {
    type Item = TraceEvent<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.events.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

/// An algorithm configured for one run over one graph.
///
/// Implementors own nothing mutable between runs: all working state lives
/// inside `execute`, so a configured algorithm can be run any number of times.
pub trait Algorithm<V> {
    type Output;

    /// Run the algorithm, emitting events through `tracer`.
    fn execute(&self, tracer: &mut Tracer<'_, V>) -> Result<Self::Output>;

    /// Silent run.
    fn run(&self) -> Result<Self::Output> {
        self.execute(&mut Tracer::silent())
    }

    /// Run, pushing each event to `observer` as it happens.
    fn run_with(&self, observer: &mut dyn Observer<V>) -> Result<Self::Output> {
        self.execute(&mut Tracer::new(observer))
    }

    /// Run and record the full event sequence.
    fn run_traced(&self) -> Result<Traced<V, Self::Output>> {
        let mut recorder = Recorder::new();
        let output = self.run_with(&mut recorder)?;
        Ok(Traced::new(recorder.into_events(), output))
    }
}
