//! Domain types for the transit router.
//!
//! These types describe the read-only network data the engine consumes:
//! stations, lines, route edges and interchange transfers. Constructors
//! enforce edge invariants, so values built in code can be trusted. Rows
//! deserialised from a data source are checked again when a graph is built.

mod edge;
mod error;
mod ids;
mod line;
mod station;

pub use edge::{Edge, TransferEdge, TransportMode};
pub use error::InvalidEdge;
pub use ids::{LineId, StationId};
pub use line::{InterchangePoint, Line};
pub use station::{Coordinates, Station, Status};
