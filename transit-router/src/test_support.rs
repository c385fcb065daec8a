//! Fixtures shared by unit tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    PatternId, RouteId, SECONDS_PER_DAY, StopIndex, TransitMode, TripId, add_days,
    parse_service_time,
};
use crate::model::{RoutingTripPattern, TripPatternForDate, TripTimes};
use crate::raptor::MergedTimetable;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seconds since start of service for "HH:MM" or "HH:MM:SS".
pub fn time(s: &str) -> i32 {
    parse_service_time(s).unwrap()
}

/// A route with one pattern and a list of trips, built from readable
/// schedules such as `"10:00 10:10 10:20"`.
pub struct TestRoute {
    pattern: Arc<RoutingTripPattern>,
    trips: Vec<Arc<TripTimes>>,
}

impl TestRoute {
    /// Pattern and route both get `id`.
    pub fn new(id: u32, mode: TransitMode, stops: &[usize]) -> Self {
        let pattern = RoutingTripPattern::new(
            PatternId(id),
            RouteId(id),
            mode,
            stops.iter().map(|s| StopIndex(*s)).collect(),
        );
        Self {
            pattern: Arc::new(pattern),
            trips: Vec::new(),
        }
    }

    /// Add a trip whose arrival and departure coincide at every stop.
    pub fn with_trip(mut self, trip: u32, schedule: &str) -> Self {
        let times = schedule.split_whitespace().map(time).collect();
        let trip =
            TripTimes::from_passing_times(TripId(trip), self.pattern.route(), times).unwrap();
        self.trips.push(Arc::new(trip));
        self
    }

    pub fn pattern(&self) -> &Arc<RoutingTripPattern> {
        &self.pattern
    }

    pub fn trip(&self, index: usize) -> &Arc<TripTimes> {
        &self.trips[index]
    }

    pub fn last_trip(&self) -> &Arc<TripTimes> {
        &self.trips[self.trips.len() - 1]
    }

    pub fn stop_position(&self, stop: usize) -> usize {
        self.pattern.find_stop_position(StopIndex(stop)).unwrap()
    }

    pub fn day(&self, service_date: NaiveDate) -> TripPatternForDate {
        TripPatternForDate::new(self.pattern.clone(), service_date, self.trips.clone()).unwrap()
    }

    /// Single-day timetable with a zero offset.
    pub fn timetable(&self, service_date: NaiveDate) -> MergedTimetable {
        MergedTimetable::new(vec![(Arc::new(self.day(service_date)), 0)])
    }

    /// Timetable of `days` consecutive service days from `first`, each day
    /// offset by a whole day from the one before.
    pub fn timetable_for_days(&self, first: NaiveDate, days: i32) -> MergedTimetable {
        MergedTimetable::new(
            (0..days)
                .map(|i| {
                    let service_date = add_days(first, i.into()).unwrap();
                    (Arc::new(self.day(service_date)), i * SECONDS_PER_DAY)
                })
                .collect(),
        )
    }
}
