//! A trip as seen by the search: raw times shifted by its day's offset.

use chrono::NaiveDate;

use crate::domain::{RouteId, StopIndex, TripId};
use crate::model::{RoutingTripPattern, TripTimes};

/// Borrowed view of one trip on one service day.
///
/// Times are seconds since the search start: the raw time plus the offset
/// of the trip's service day.
#[derive(Debug, Clone, Copy)]
pub struct TripScheduleWithOffset<'a> {
    times: &'a TripTimes,
    pattern: &'a RoutingTripPattern,
    service_date: NaiveDate,
    seconds_offset: i32,
}

impl<'a> TripScheduleWithOffset<'a> {
    pub fn new(
        times: &'a TripTimes,
        pattern: &'a RoutingTripPattern,
        service_date: NaiveDate,
        seconds_offset: i32,
    ) -> Self {
        Self {
            times,
            pattern,
            service_date,
            seconds_offset,
        }
    }

    pub fn arrival(&self, pos: usize) -> i32 {
        self.times.arrival(pos) + self.seconds_offset
    }

    pub fn departure(&self, pos: usize) -> i32 {
        self.times.departure(pos) + self.seconds_offset
    }

    pub fn trip_id(&self) -> TripId {
        self.times.trip()
    }

    pub fn route(&self) -> RouteId {
        self.pattern.route()
    }

    pub fn service_date(&self) -> NaiveDate {
        self.service_date
    }

    /// Position at which this trip arrives at `stop` at exactly `time`.
    ///
    /// Searched from the end, so a pattern visiting `stop` twice resolves to
    /// the later visit when both share the time.
    pub fn find_arrival_stop_position(&self, time: i32, stop: StopIndex) -> Option<usize> {
        (1..self.pattern.number_of_stops())
            .rev()
            .find(|&pos| self.pattern.stop_index(pos) == stop && self.arrival(pos) == time)
    }

    /// Position at which this trip departs from `stop` at exactly `time`.
    pub fn find_departure_stop_position(&self, time: i32, stop: StopIndex) -> Option<usize> {
        (0..self.pattern.number_of_stops().saturating_sub(1))
            .find(|&pos| self.pattern.stop_index(pos) == stop && self.departure(pos) == time)
    }
}
