//! Scheduled times of one trip.

use crate::domain::{Accessibility, BikeAccess, RouteId, TripId};
use crate::error::TransitDataError;

/// Arrival and departure times of one trip, by stop position.
///
/// Times are seconds since the start of service of the trip's service date.
/// The same `TripTimes` is shared by every service date the trip runs on.
///
/// # Invariants
///
/// - At least one stop
/// - `departure(pos) >= arrival(pos)` at every stop
/// - `arrival(pos + 1) >= departure(pos)` (times never run backwards)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTimes {
    trip: TripId,
    route: RouteId,
    arrivals: Box<[i32]>,
    departures: Box<[i32]>,
    wheelchair: Accessibility,
    bikes: BikeAccess,
}

impl TripTimes {
    /// Construct trip times, validating the invariants above.
    pub fn new(
        trip: TripId,
        route: RouteId,
        arrivals: Vec<i32>,
        departures: Vec<i32>,
    ) -> Result<Self, TransitDataError> {
        let invalid = |reason| TransitDataError::InvalidTripTimes { trip, reason };

        if arrivals.is_empty() {
            return Err(invalid("no stop times"));
        }
        if arrivals.len() != departures.len() {
            return Err(invalid("arrival and departure counts differ"));
        }
        if arrivals.iter().zip(&departures).any(|(a, d)| d < a) {
            return Err(invalid("departure before arrival"));
        }
        if departures.iter().zip(arrivals.iter().skip(1)).any(|(d, a)| a < d) {
            return Err(invalid("arrival before previous departure"));
        }

        Ok(Self {
            trip,
            route,
            arrivals: arrivals.into_boxed_slice(),
            departures: departures.into_boxed_slice(),
            wheelchair: Accessibility::default(),
            bikes: BikeAccess::default(),
        })
    }

    /// Construct trip times where arrival and departure coincide at every stop.
    pub fn from_passing_times(
        trip: TripId,
        route: RouteId,
        times: Vec<i32>,
    ) -> Result<Self, TransitDataError> {
        Self::new(trip, route, times.clone(), times)
    }

    pub fn with_wheelchair(mut self, wheelchair: Accessibility) -> Self {
        self.wheelchair = wheelchair;
        self
    }

    pub fn with_bikes(mut self, bikes: BikeAccess) -> Self {
        self.bikes = bikes;
        self
    }

    pub fn trip(&self) -> TripId {
        self.trip
    }

    pub fn route(&self) -> RouteId {
        self.route
    }

    pub fn number_of_stops(&self) -> usize {
        self.arrivals.len()
    }

    /// Arrival at `pos`, in seconds since start of service.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a valid stop position.
    pub fn arrival(&self, pos: usize) -> i32 {
        self.arrivals[pos]
    }

    /// Departure from `pos`, in seconds since start of service.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a valid stop position.
    pub fn departure(&self, pos: usize) -> i32 {
        self.departures[pos]
    }

    pub fn first_departure(&self) -> i32 {
        self.departures[0]
    }

    pub fn last_arrival(&self) -> i32 {
        self.arrivals[self.arrivals.len() - 1]
    }

    pub fn wheelchair(&self) -> Accessibility {
        self.wheelchair
    }

    pub fn bikes(&self) -> BikeAccess {
        self.bikes
    }
}
