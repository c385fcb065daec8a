//! One pattern's trips on one service date.

use std::sync::Arc;

use chrono::NaiveDate;

use super::{RoutingTripPattern, TripTimes};
use crate::domain::{SECONDS_PER_DAY, add_days};
use crate::error::TransitDataError;

/// The trips of one pattern running on one service date.
///
/// Trips are kept sorted by first departure. The running period is the range
/// of calendar dates on which at least one trip is moving: a trip departing
/// at 23:30 and arriving at 25:10 runs on its service date and the next.
#[derive(Debug, Clone)]
pub struct TripPatternForDate {
    pattern: Arc<RoutingTripPattern>,
    service_date: NaiveDate,
    trips: Box<[Arc<TripTimes>]>,
    start_of_running_period: NaiveDate,
    end_of_running_period: NaiveDate,
}

impl TripPatternForDate {
    /// Group trips of `pattern` for `service_date`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a trip's stop count differs from the pattern's, or the
    /// running period falls outside the supported date range.
    pub fn new(
        pattern: Arc<RoutingTripPattern>,
        service_date: NaiveDate,
        mut trips: Vec<Arc<TripTimes>>,
    ) -> Result<Self, TransitDataError> {
        let stops = pattern.number_of_stops();
        if let Some(bad) = trips.iter().find(|t| t.number_of_stops() != stops) {
            return Err(TransitDataError::PatternMismatch {
                trip: bad.trip(),
                times: bad.number_of_stops(),
                stops,
            });
        }

        trips.sort_by_key(|t| t.first_departure());

        let first_day = trips
            .iter()
            .map(|t| t.first_departure().div_euclid(SECONDS_PER_DAY))
            .min()
            .unwrap_or(0);
        let last_day = trips
            .iter()
            .map(|t| t.last_arrival().div_euclid(SECONDS_PER_DAY))
            .max()
            .unwrap_or(0);

        Ok(Self {
            start_of_running_period: add_days(service_date, first_day.into())?,
            end_of_running_period: add_days(service_date, last_day.into())?,
            pattern,
            service_date,
            trips: trips.into_boxed_slice(),
        })
    }

    pub fn pattern(&self) -> &Arc<RoutingTripPattern> {
        &self.pattern
    }

    pub fn service_date(&self) -> NaiveDate {
        self.service_date
    }

    pub fn trips(&self) -> &[Arc<TripTimes>] {
        &self.trips
    }

    pub fn number_of_trips(&self) -> usize {
        self.trips.len()
    }

    pub fn trip(&self, index: usize) -> &Arc<TripTimes> {
        &self.trips[index]
    }

    pub fn start_of_running_period(&self) -> NaiveDate {
        self.start_of_running_period
    }

    pub fn end_of_running_period(&self) -> NaiveDate {
        self.end_of_running_period
    }

    /// True if a trip of this day is moving at some point during `date`.
    pub fn is_running_on(&self, date: NaiveDate) -> bool {
        self.start_of_running_period <= date && date <= self.end_of_running_period
    }

    /// Copy of this day keeping only trips accepted by `keep`.
    ///
    /// Returns `None` if no trip remains. The running period is recomputed
    /// from the remaining trips.
    pub fn with_filtered_trips(&self, keep: impl Fn(&TripTimes) -> bool) -> Option<Self> {
        let trips: Vec<Arc<TripTimes>> =
            self.trips.iter().filter(|t| keep(t)).cloned().collect();

        if trips.is_empty() {
            return None;
        }
        if trips.len() == self.trips.len() {
            return Some(self.clone());
        }

        // Same pattern, subset of already validated trips: cannot fail
        Self::new(self.pattern.clone(), self.service_date, trips).ok()
    }
}
