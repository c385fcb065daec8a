//! One pattern's trips over several consecutive service days.

use std::sync::Arc;

use chrono::NaiveDate;

use super::TripScheduleWithOffset;
use crate::domain::{PatternId, StopIndex, TripId};
use crate::model::{RoutingTripPattern, TripPatternForDate};

/// Immutable per-request timetable of one pattern.
///
/// Trips of all days are addressed by a flat index: the trips of the first
/// day, then those of the second, and so on. Each day's times are shifted by
/// that day's offset, the number of seconds from the search start to the
/// day's start of service.
#[derive(Debug, Clone)]
pub struct MergedTimetable {
    pattern: Arc<RoutingTripPattern>,
    days: Box<[Arc<TripPatternForDate>]>,
    offsets: Box<[i32]>,
    number_of_trips: usize,
    boarding_possible: Box<[bool]>,
    alighting_possible: Box<[bool]>,
}

impl MergedTimetable {
    /// Merge service days of one pattern, given in service-date order with
    /// their offsets.
    ///
    /// # Panics
    ///
    /// Panics if `days` is empty or the days belong to different patterns.
    pub fn new(days: Vec<(Arc<TripPatternForDate>, i32)>) -> Self {
        assert!(!days.is_empty(), "merged timetable needs at least one day");

        let pattern = days[0].0.pattern().clone();
        assert!(
            days.iter().all(|(d, _)| d.pattern().id() == pattern.id()),
            "all days must belong to {}",
            pattern.id()
        );

        let (days, offsets): (Vec<_>, Vec<_>) = days.into_iter().unzip();
        assert_eq!(days.len(), offsets.len());

        Self {
            number_of_trips: days.iter().map(|d| d.number_of_trips()).sum(),
            boarding_possible: pattern.boarding_possible().into_boxed_slice(),
            alighting_possible: pattern.alighting_possible().into_boxed_slice(),
            pattern,
            days: days.into_boxed_slice(),
            offsets: offsets.into_boxed_slice(),
        }
    }

    /// Replace the pattern's boarding and alighting flags with request
    /// filtered ones.
    ///
    /// # Panics
    ///
    /// Panics if either list does not have one flag per stop.
    pub fn with_available_stops(mut self, boarding: Vec<bool>, alighting: Vec<bool>) -> Self {
        let stops = self.pattern.number_of_stops();
        assert_eq!(boarding.len(), stops, "one boarding flag per stop");
        assert_eq!(alighting.len(), stops, "one alighting flag per stop");
        self.boarding_possible = boarding.into_boxed_slice();
        self.alighting_possible = alighting.into_boxed_slice();
        self
    }

    pub fn pattern(&self) -> &RoutingTripPattern {
        &self.pattern
    }

    pub fn pattern_id(&self) -> PatternId {
        self.pattern.id()
    }

    pub fn days(&self) -> &[Arc<TripPatternForDate>] {
        &self.days
    }

    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    pub fn number_of_trip_schedules(&self) -> usize {
        self.number_of_trips
    }

    pub fn number_of_stops(&self) -> usize {
        self.pattern.number_of_stops()
    }

    pub fn stop_index(&self, pos: usize) -> StopIndex {
        self.pattern.stop_index(pos)
    }

    pub fn boarding_possible_at(&self, pos: usize) -> bool {
        self.boarding_possible[pos]
    }

    pub fn alighting_possible_at(&self, pos: usize) -> bool {
        self.alighting_possible[pos]
    }

    /// Resolve a flat trip index to `(day, index within day)`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= number_of_trip_schedules()`.
    pub fn locate(&self, index: usize) -> (usize, usize) {
        let mut local = index;
        for (day, schedule) in self.days.iter().enumerate() {
            let n = schedule.number_of_trips();
            if local < n {
                return (day, local);
            }
            local -= n;
        }
        panic!(
            "trip index {index} out of range for {} ({} trips)",
            self.pattern.id(),
            self.number_of_trips
        );
    }

    /// Inverse of [`locate`](Self::locate).
    pub fn flat_index(&self, day: usize, local: usize) -> usize {
        self.days[..day]
            .iter()
            .map(|d| d.number_of_trips())
            .sum::<usize>()
            + local
    }

    /// The trip at flat index `index`, with its day offset applied.
    ///
    /// # Panics
    ///
    /// Panics if `index >= number_of_trip_schedules()`.
    pub fn trip_schedule(&self, index: usize) -> TripScheduleWithOffset<'_> {
        let (day, local) = self.locate(index);
        let schedule = &self.days[day];
        TripScheduleWithOffset::new(
            schedule.trip(local),
            &self.pattern,
            schedule.service_date(),
            self.offsets[day],
        )
    }

    /// Flat index of `trip` on `service_date`, if present.
    pub fn find_trip_index(&self, trip: TripId, service_date: NaiveDate) -> Option<usize> {
        let day = self
            .days
            .iter()
            .position(|d| d.service_date() == service_date)?;
        let local = self.days[day]
            .trips()
            .iter()
            .position(|t| t.trip() == trip)?;
        Some(self.flat_index(day, local))
    }
}
