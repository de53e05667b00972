//! Transit route and distance engine.
//!
//! Answers two questions about a multi-line transit network: "what is the
//! shortest route between these two stations, and how long is it?" and
//! "what does the network look like as a name-keyed adjacency list?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod export;
pub mod pathfinding;
pub mod provider;
pub mod web;
