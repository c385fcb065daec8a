//! Forward and reverse search strategies.

use std::iter::Rev;
use std::ops::Range;

use crate::domain::StopIndex;
use crate::raptor::TripScheduleWithOffset;
use crate::transfer::{ConstrainedTransfer, TransferPoint};

/// Default distance from the source time within which a constrained target
/// trip is searched for.
pub const DEFAULT_SEARCH_WINDOW_SECONDS: i32 = 6 * 3600;

/// Direction of a journey search.
///
/// A forward search boards target trips departing after the source trip
/// arrives; a reverse search walks time backwards and "boards" target trips
/// arriving before the source trip departs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    Forward,
    Reverse,
}

impl SearchDirection {
    /// The transfer end on the trip already ridden.
    pub fn source_point(self, transfer: &ConstrainedTransfer) -> &TransferPoint {
        match self {
            Self::Forward => transfer.from(),
            Self::Reverse => transfer.to(),
        }
    }

    /// The transfer end on the trip to board.
    pub fn target_point(self, transfer: &ConstrainedTransfer) -> &TransferPoint {
        match self {
            Self::Forward => transfer.to(),
            Self::Reverse => transfer.from(),
        }
    }

    /// Boarding time of a target trip at `pos`: departure going forward,
    /// arrival in reverse.
    pub fn time(self, trip: &TripScheduleWithOffset<'_>, pos: usize) -> i32 {
        match self {
            Self::Forward => trip.departure(pos),
            Self::Reverse => trip.arrival(pos),
        }
    }

    /// Position of the source trip at `stop`, given the time it leaves the
    /// trip there (arrival forward, departure in reverse).
    pub fn source_stop_position(
        self,
        trip: &TripScheduleWithOffset<'_>,
        time: i32,
        stop: StopIndex,
    ) -> Option<usize> {
        match self {
            Self::Forward => trip.find_arrival_stop_position(time, stop),
            Self::Reverse => trip.find_departure_stop_position(time, stop),
        }
    }

    /// True if `a` comes strictly before `b` in search order.
    pub fn is_before(self, a: i32, b: i32) -> bool {
        match self {
            Self::Forward => a < b,
            Self::Reverse => a > b,
        }
    }

    /// `time` moved `delta` seconds in search order.
    pub fn plus(self, time: i32, delta: i32) -> i32 {
        match self {
            Self::Forward => time.saturating_add(delta),
            Self::Reverse => time.saturating_sub(delta),
        }
    }

    /// Trip indexes `0..n` in search order.
    pub fn trip_indices(self, n: usize) -> TripIndices {
        match self {
            Self::Forward => TripIndices::Ascending(0..n),
            Self::Reverse => TripIndices::Descending((0..n).rev()),
        }
    }
}

/// Iterator returned by [`SearchDirection::trip_indices`].
#[derive(Debug, Clone)]
pub enum TripIndices {
    Ascending(Range<usize>),
    Descending(Rev<Range<usize>>),
}

impl Iterator for TripIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Self::Ascending(r) => r.next(),
            Self::Descending(r) => r.next(),
        }
    }
}
