//! Pathfinding on a [`Grid`].
//!
//! Every strategy marks a cell when it is first discovered, emits `Visit`
//! for it, and records the cell it was discovered from. The run ends the
//! moment the goal is taken off the frontier (or, for bidirectional BFS,
//! the moment the two searches touch) with `Found(path)`, or with
//! `NotFound` once the frontier is empty. Paths include both endpoints.
//!
//! Steps cost 1. Dijkstra and A* order their frontier by (cost, cell) so
//! ties resolve in row-major order.

use crate::algorithms::paths::HeapEntry;
use crate::error::{GraphError, Result};
use crate::grid::{Cell, Grid};
use crate::trace::{Algorithm, TraceEvent, Tracer};
use serde::{Deserialize, Serialize};
use std::collections::{BinaryHeap, VecDeque};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Bfs,
    /// Explicit stack; neighbors pushed in listed order, so the last-listed
    /// neighbor is explored first.
    Dfs,
    Dijkstra,
    /// Manhattan-distance heuristic.
    AStar,
    /// BFS from both ends, one expansion per side per round.
    BidirectionalBfs,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Dijkstra,
        Strategy::AStar,
        Strategy::BidirectionalBfs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Dijkstra => "dijkstra",
            Strategy::AStar => "astar",
            Strategy::BidirectionalBfs => "bidirectional_bfs",
        }
    }
}

impl FromStr for Strategy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "astar" | "a_star" => Ok(Strategy::AStar),
            "bidirectional_bfs" | "bidir_bfs" => Ok(Strategy::BidirectionalBfs),
            other => Err(GraphError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// One search from `start` to `goal` on a grid.
///
/// A walled goal is never entered, so it is only found when it is also the
/// start. A walled start is still expanded.
pub struct MazeSearch<'g> {
    grid: &'g Grid,
    start: Cell,
    goal: Cell,
    strategy: Strategy,
}

impl<'g> MazeSearch<'g> {
    pub fn new(grid: &'g Grid, start: Cell, goal: Cell, strategy: Strategy) -> Self {
        MazeSearch {
            grid,
            start,
            goal,
            strategy,
        }
    }

    pub fn bfs(grid: &'g Grid, start: Cell, goal: Cell) -> Self {
        Self::new(grid, start, goal, Strategy::Bfs)
    }

    pub fn dfs(grid: &'g Grid, start: Cell, goal: Cell) -> Self {
        Self::new(grid, start, goal, Strategy::Dfs)
    }

    pub fn dijkstra(grid: &'g Grid, start: Cell, goal: Cell) -> Self {
        Self::new(grid, start, goal, Strategy::Dijkstra)
    }

    pub fn astar(grid: &'g Grid, start: Cell, goal: Cell) -> Self {
        Self::new(grid, start, goal, Strategy::AStar)
    }

    pub fn bidirectional(grid: &'g Grid, start: Cell, goal: Cell) -> Self {
        Self::new(grid, start, goal, Strategy::BidirectionalBfs)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

/// Discovery state of one search direction.
struct Frontier<'g> {
    grid: &'g Grid,
    discovered: Vec<bool>,
    parent: Vec<Option<usize>>,
}

impl<'g> Frontier<'g> {
    fn new(grid: &'g Grid, start: usize) -> Self {
        let mut discovered = vec![false; grid.len()];
        discovered[start] = true;
        Frontier {
            grid,
            discovered,
            parent: vec![None; grid.len()],
        }
    }

    /// Mark `cell` discovered from `from`. False if it already was.
    fn discover(&mut self, cell: Cell, from: usize, tracer: &mut Tracer<'_, Cell>) -> bool {
        let idx = self.grid.index(cell);
        if self.discovered[idx] {
            return false;
        }
        self.discovered[idx] = true;
        self.parent[idx] = Some(from);
        tracer.emit(|| TraceEvent::Visit(cell));
        true
    }

    /// Cells from the root of the parent chain down to `end`.
    fn path_to(&self, end: usize) -> Vec<Cell> {
        let mut path = chain(&self.parent, end);
        path.reverse();
        path.into_iter().map(|i| self.grid.cell_at(i)).collect()
    }
}

/// `end`, its parent, its parent's parent, ... up to a root.
fn chain(parent: &[Option<usize>], end: usize) -> Vec<usize> {
    let mut out = vec![end];
    let mut cur = end;
    while let Some(p) = parent[cur] {
        out.push(p);
        cur = p;
    }
    out
}

impl MazeSearch<'_> {
    fn breadth_first(
        &self,
        start: usize,
        goal: usize,
        tracer: &mut Tracer<'_, Cell>,
    ) -> Option<Vec<Cell>> {
        let grid = self.grid;
        let mut frontier = Frontier::new(grid, start);
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            if u == goal {
                return Some(frontier.path_to(u));
            }
            for n in grid.neighbors(grid.cell_at(u)) {
                if frontier.discover(n, u, tracer) {
                    queue.push_back(grid.index(n));
                }
            }
        }
        None
    }

    fn depth_first(
        &self,
        start: usize,
        goal: usize,
        tracer: &mut Tracer<'_, Cell>,
    ) -> Option<Vec<Cell>> {
        let grid = self.grid;
        let mut frontier = Frontier::new(grid, start);
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            if u == goal {
                return Some(frontier.path_to(u));
            }
            for n in grid.neighbors(grid.cell_at(u)) {
                if frontier.discover(n, u, tracer) {
                    stack.push(grid.index(n));
                }
            }
        }
        None
    }

    /// Dijkstra (zero heuristic) or A* (Manhattan), by `estimate`.
    fn best_first(
        &self,
        start: usize,
        goal: usize,
        estimate: impl Fn(Cell) -> usize,
        tracer: &mut Tracer<'_, Cell>,
    ) -> Option<Vec<Cell>> {
        let grid = self.grid;
        let mut cost: Vec<Option<usize>> = vec![None; grid.len()];
        let mut parent: Vec<Option<usize>> = vec![None; grid.len()];
        let mut closed = vec![false; grid.len()];
        let mut heap = BinaryHeap::new();

        cost[start] = Some(0);
        heap.push(HeapEntry {
            priority: 0.0,
            cost: 0.0,
            key: grid.cell_at(start),
        });

        while let Some(HeapEntry { key: current, .. }) = heap.pop() {
            let u = grid.index(current);
            if u == goal {
                let mut path = chain(&parent, u);
                path.reverse();
                return Some(path.into_iter().map(|i| grid.cell_at(i)).collect());
            }
            if closed[u] {
                continue;
            }
            closed[u] = true;

            let Some(g) = cost[u] else {
                continue;
            };
            for n in grid.neighbors(current) {
                let v = grid.index(n);
                let tentative = g + 1;
                if cost[v].map_or(true, |c| tentative < c) {
                    cost[v] = Some(tentative);
                    parent[v] = Some(u);
                    let f = (tentative + estimate(n)) as f64;
                    heap.push(HeapEntry {
                        priority: f,
                        cost: f,
                        key: n,
                    });
                    tracer.emit(|| TraceEvent::Visit(n));
                }
            }
        }
        None
    }

    fn bidirectional_bfs(
        &self,
        start: usize,
        goal: usize,
        tracer: &mut Tracer<'_, Cell>,
    ) -> Option<Vec<Cell>> {
        let grid = self.grid;
        if start == goal {
            return Some(vec![grid.cell_at(start)]);
        }
        // The goal side would otherwise expand out of a walled goal.
        if grid.is_wall(grid.cell_at(goal)) {
            return None;
        }

        let mut forward = Frontier::new(grid, start);
        let mut backward = Frontier::new(grid, goal);
        let mut forward_queue = VecDeque::from([start]);
        let mut backward_queue = VecDeque::from([goal]);

        while !forward_queue.is_empty() && !backward_queue.is_empty() {
            if let Some(meet) = expand(&mut forward, &backward, &mut forward_queue, tracer) {
                return Some(stitch(&forward, &backward, meet));
            }
            if let Some(meet) = expand(&mut backward, &forward, &mut backward_queue, tracer) {
                return Some(stitch(&forward, &backward, meet));
            }
        }
        None
    }
}

/// Pop one cell from `queue` and discover its neighbors. Returns the first
/// newly discovered cell the other side has already discovered.
fn expand(
    side: &mut Frontier<'_>,
    other: &Frontier<'_>,
    queue: &mut VecDeque<usize>,
    tracer: &mut Tracer<'_, Cell>,
) -> Option<usize> {
    let grid = side.grid;
    let u = queue.pop_front()?;
    for n in grid.neighbors(grid.cell_at(u)) {
        if side.discover(n, u, tracer) {
            let v = grid.index(n);
            queue.push_back(v);
            if other.discovered[v] {
                return Some(v);
            }
        }
    }
    None
}

/// Start-side chain to `meet`, then the goal-side chain onward from it.
fn stitch(forward: &Frontier<'_>, backward: &Frontier<'_>, meet: usize) -> Vec<Cell> {
    let grid = forward.grid;
    let mut path = forward.path_to(meet);
    let rest = chain(&backward.parent, meet);
    path.extend(rest.into_iter().skip(1).map(|i| grid.cell_at(i)));
    path
}

impl Algorithm<Cell> for MazeSearch<'_> {
    type Output = Option<Vec<Cell>>;

    fn execute(&self, tracer: &mut Tracer<'_, Cell>) -> Result<Option<Vec<Cell>>> {
        let grid = self.grid;
        let start = grid.check(self.start)?;
        let goal = grid.check(self.goal)?;
        log::debug!(
            "maze {}: {:?} -> {:?} on {}x{}",
            self.strategy.name(),
            self.start,
            self.goal,
            grid.rows(),
            grid.cols()
        );

        let path = match self.strategy {
            Strategy::Bfs => self.breadth_first(start, goal, tracer),
            Strategy::Dfs => self.depth_first(start, goal, tracer),
            Strategy::Dijkstra => self.best_first(start, goal, |_| 0, tracer),
            Strategy::AStar => {
                let target = self.goal;
                self.best_first(start, goal, move |c| c.manhattan(&target), tracer)
            }
            Strategy::BidirectionalBfs => self.bidirectional_bfs(start, goal, tracer),
        };

        match &path {
            Some(p) => {
                log::debug!("maze {}: found path of {} cells", self.strategy.name(), p.len());
                tracer.emit(|| TraceEvent::Found(p.clone()));
            }
            None => {
                log::debug!("maze {}: no path", self.strategy.name());
                tracer.emit(|| TraceEvent::NotFound);
            }
        }
        Ok(path)
    }
}
