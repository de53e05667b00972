//! Domain error types.

use super::StationId;

/// An edge that violates the data model's invariants.
///
/// Returned by the edge constructors, and by graph construction when a
/// stored row cannot be used as a non-negatively weighted arc.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidEdge {
    /// Both endpoints are the same station
    #[error("edge connects station {0} to itself")]
    SameStation(StationId),

    /// Distance is zero, negative or not a number
    #[error("edge {from} -> {to} has non-positive distance {distance}")]
    NonPositiveDistance {
        from: StationId,
        to: StationId,
        distance: f64,
    },

    /// Duration is zero
    #[error("edge {from} -> {to} has non-positive duration")]
    NonPositiveDuration { from: StationId, to: StationId },

    /// Transfer cost is negative or not a number
    #[error("transfer {from} -> {to} has negative cost {cost}")]
    NegativeTransferCost {
        from: StationId,
        to: StationId,
        cost: f64,
    },
}
