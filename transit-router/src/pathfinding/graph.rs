//! In-memory routing graph and Dijkstra search.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::domain::{Edge, InvalidEdge, LineId, StationId};

use super::config::PathConfig;

/// One directed arc of the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub to: StationId,

    /// Line owning the stored edge this arc came from
    pub line_id: LineId,

    pub distance_km: f64,
    pub duration_minutes: u32,
}

impl Link {
    fn weight(&self) -> (OrderedFloat<f64>, u32) {
        (OrderedFloat(self.distance_km), self.duration_minutes)
    }
}

/// Undirected weighted graph of stations, rebuilt for every search.
///
/// Every stored edge contributes an arc in each direction with identical
/// weight. Between any ordered pair of stations only the shortest arc is
/// kept, and the same arc answers the reverse lookup used to label hops
/// with their line.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    adjacency: HashMap<StationId, Vec<Link>>,
    links: HashMap<(StationId, StationId), Link>,
}

impl RouteGraph {
    /// Build the graph from stored edges.
    ///
    /// Missing or zero weights take the placeholders from `config`.
    /// Self-loops and negative distances are rejected.
    pub fn build(edges: &[Edge], config: &PathConfig) -> Result<Self, InvalidEdge> {
        let mut links: HashMap<(StationId, StationId), Link> = HashMap::new();

        for edge in edges {
            edge.check_stored()?;

            let distance_km = edge.distance_or(config.default_distance_km);
            let duration_minutes = edge.duration_or(config.default_duration_minutes);

            for (from, to) in [(edge.from, edge.to), (edge.to, edge.from)] {
                let link = Link {
                    to,
                    line_id: edge.line_id,
                    distance_km,
                    duration_minutes,
                };
                match links.entry((from, to)) {
                    Entry::Vacant(slot) => {
                        slot.insert(link);
                    }
                    Entry::Occupied(mut slot) => {
                        // First edge wins on equal weight
                        if link.weight() < slot.get().weight() {
                            slot.insert(link);
                        }
                    }
                }
            }
        }

        let mut adjacency: HashMap<StationId, Vec<Link>> = HashMap::new();
        for (&(from, _), link) in &links {
            adjacency.entry(from).or_default().push(*link);
        }

        debug!(
            stations = adjacency.len(),
            arcs = links.len(),
            edges = edges.len(),
            "built routing graph"
        );

        Ok(Self { adjacency, links })
    }

    /// Number of stations touched by at least one edge.
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed arcs.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns true if no edge touches any station.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns true if some edge touches `station`.
    pub fn contains(&self, station: StationId) -> bool {
        self.adjacency.contains_key(&station)
    }

    /// Arcs leaving `station`.
    pub fn neighbours(&self, station: StationId) -> &[Link] {
        self.adjacency
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The arc used to travel directly from `from` to `to`, if any.
    pub fn hop(&self, from: StationId, to: StationId) -> Option<&Link> {
        self.links.get(&(from, to))
    }

    /// Find the shortest path by cumulative distance.
    ///
    /// Returns the visited station sequence including both endpoints, or
    /// `None` if `to` is unreachable. Ties on distance fall to the lower
    /// cumulative duration, then the lower station id. The search yields
    /// to the runtime every `yield_every` pops (0 disables yielding).
    pub async fn shortest_path(
        &self,
        from: StationId,
        to: StationId,
        yield_every: usize,
    ) -> Option<Vec<StationId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        let mut queue = BinaryHeap::new();
        let mut best: HashMap<StationId, (OrderedFloat<f64>, u32)> = HashMap::new();
        let mut previous: HashMap<StationId, StationId> = HashMap::new();
        let mut settled: HashSet<StationId> = HashSet::new();
        let mut pops = 0usize;

        best.insert(from, (OrderedFloat(0.0), 0));
        queue.push(QueueEntry {
            distance: OrderedFloat(0.0),
            duration: 0,
            station: from,
        });

        while let Some(entry) = queue.pop() {
            pops += 1;
            if yield_every > 0 && pops % yield_every == 0 {
                tokio::task::yield_now().await;
            }

            if !settled.insert(entry.station) {
                continue;
            }

            if entry.station == to {
                debug!(pops, settled = settled.len(), "destination settled");
                return Some(trace_back(&previous, from, to));
            }

            for link in self.neighbours(entry.station) {
                if settled.contains(&link.to) {
                    continue;
                }

                let candidate = (
                    OrderedFloat(entry.distance.0 + link.distance_km),
                    entry.duration.saturating_add(link.duration_minutes),
                );
                if best.get(&link.to).is_none_or(|known| candidate < *known) {
                    best.insert(link.to, candidate);
                    previous.insert(link.to, entry.station);
                    queue.push(QueueEntry {
                        distance: candidate.0,
                        duration: candidate.1,
                        station: link.to,
                    });
                }
            }
        }

        debug!(pops, settled = settled.len(), "queue exhausted");
        None
    }
}

/// Walk predecessor links back from `to` and return the forward path.
fn trace_back(
    previous: &HashMap<StationId, StationId>,
    from: StationId,
    to: StationId,
) -> Vec<StationId> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        match previous.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Priority queue entry, ordered so that `BinaryHeap` pops the smallest
/// (distance, duration, station) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    distance: OrderedFloat<f64>,
    duration: u32,
    station: StationId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        (other.distance, other.duration, other.station).cmp(&(
            self.distance,
            self.duration,
            self.station,
        ))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
