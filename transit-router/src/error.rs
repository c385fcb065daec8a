//! Construction errors for transit search data.
//!
//! Ordinary search outcomes ("no trip found", "no constrained transfer
//! here") are `Option::None`, not errors. The variants below describe
//! malformed static data detected while building request structures.

use std::sync::Arc;

use crate::domain::{StopIndex, TimeError, TripId};

/// Errors raised while loading or adapting the static transit data.
#[derive(Debug, thiserror::Error)]
pub enum TransitDataError {
    /// A stop index beyond the dataset's stop count.
    #[error("{stop} is out of range (stop count {stop_count})")]
    StopOutOfRange { stop: StopIndex, stop_count: usize },

    /// A street transfer leg pointing at a stop that does not exist.
    #[error("street transfer from {from} points at unknown {to} (stop count {stop_count})")]
    UnknownTransferTarget {
        from: StopIndex,
        to: StopIndex,
        stop_count: usize,
    },

    /// Trip times that are empty or run backwards.
    #[error("invalid times for {trip}: {reason}")]
    InvalidTripTimes { trip: TripId, reason: &'static str },

    /// Trip times whose length disagrees with the pattern's stop count.
    #[error("{trip} has {times} stop times but its pattern has {stops} stops")]
    PatternMismatch {
        trip: TripId,
        times: usize,
        stops: usize,
    },

    /// Service-day arithmetic failed.
    #[error(transparent)]
    Time(#[from] TimeError),

    /// Building the shared transfer index failed (possibly in another request).
    #[error("transfer index unavailable: {0}")]
    TransferIndex(#[from] Arc<TransitDataError>),
}
