//! Shortest-path engine over the route network.
//!
//! This module answers: "what is the shortest way from station A to
//! station B?" It loads every active route edge, builds an undirected
//! weighted graph (trains run both ways on a line) and runs Dijkstra on
//! cumulative distance. Duration is carried along for reporting.
//!
//! Nothing is cached between requests: each call to
//! [`PathFinder::find_shortest_path`] builds its own graph from a fresh
//! provider snapshot, so any number of searches may run concurrently.

mod config;
mod graph;
mod path;
mod search;

pub use config::PathConfig;
pub use graph::{Link, RouteGraph};
pub use path::{Hop, Path, StationRef, UNKNOWN_LINE};
pub use search::{PathError, PathFinder, StationRole};
