//! Graph algorithm implementations.
//!
//! Each algorithm is a small configuration struct implementing
//! [`Algorithm`](crate::trace::Algorithm), so every one of them can run
//! silently, with a live observer, or recorded.

pub mod articulation;
pub mod astar;
pub mod bellman_ford;
pub mod bipartite;
#[cfg(feature = "all-pairs")]
pub mod closure;
pub mod components;
pub mod cycles;
pub mod dag;
pub mod dijkstra;
#[cfg(feature = "all-pairs")]
pub mod floyd_warshall;
#[cfg(feature = "all-pairs")]
pub mod johnson;
#[cfg(feature = "grid")]
pub mod maze;
pub mod mst;
pub mod paths;
pub mod scc;
pub mod spfa;
pub mod subgraph;
pub mod topo;
pub mod traversal;

pub use articulation::{Cuts, Tarjan};
pub use astar::{AStar, Heuristic, Route};
pub use bellman_ford::BellmanFord;
pub use bipartite::{Bipartite, Bipartition};
#[cfg(feature = "all-pairs")]
pub use closure::{Closure, TransitiveClosure};
pub use components::ConnectedComponents;
pub use cycles::CycleDetection;
pub use dag::DagShortestPaths;
pub use dijkstra::Dijkstra;
#[cfg(feature = "all-pairs")]
pub use floyd_warshall::FloydWarshall;
#[cfg(feature = "all-pairs")]
pub use johnson::{Augmented, Johnson};
#[cfg(feature = "grid")]
pub use maze::{MazeSearch, Strategy};
pub use mst::{Kruskal, Prim, SpanningTree, UnionFind};
pub use paths::{AllPairs, Outcome, ShortestPaths};
pub use scc::Kosaraju;
pub use spfa::Spfa;
pub use subgraph::{extract_subgraph, reachable_from};
pub use topo::TopologicalSort;
pub use traversal::{Bfs, Dfs};
