//! Builds the per-request merged timetables from the static schedule.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

use super::MergedTimetable;
use crate::domain::{PatternId, StopIndex, add_days, seconds_between, service_dates, start_of_service};
use crate::error::TransitDataError;
use crate::model::{ScheduleSource, TripPatternForDate};
use crate::request::{BoardAlight, RequestFilter};

/// The merged timetables of one request, indexed by stop and pattern.
#[derive(Debug, Clone)]
pub struct RequestTimetables {
    search_start_time: DateTime<Tz>,
    timetables: Vec<MergedTimetable>,
    patterns_by_stop: Vec<Vec<usize>>,
    by_pattern: HashMap<PatternId, usize>,
}

impl RequestTimetables {
    /// Instant that search times are measured from.
    pub fn search_start_time(&self) -> DateTime<Tz> {
        self.search_start_time
    }

    pub fn timetables(&self) -> &[MergedTimetable] {
        &self.timetables
    }

    pub fn timetable(&self, pattern: PatternId) -> Option<&MergedTimetable> {
        self.by_pattern.get(&pattern).map(|i| &self.timetables[*i])
    }

    /// Indexes into [`timetables`](Self::timetables) of patterns visiting
    /// `stop`, each listed once.
    pub fn patterns_at(&self, stop: StopIndex) -> &[usize] {
        self.patterns_by_stop
            .get(stop.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn number_of_stops(&self) -> usize {
        self.patterns_by_stop.len()
    }
}

/// Assembles [`RequestTimetables`] for a date range.
pub struct TimetableBuilder<'a, S: ScheduleSource + ?Sized> {
    source: &'a S,
    filter: &'a RequestFilter,
}

impl<'a, S: ScheduleSource + ?Sized> TimetableBuilder<'a, S> {
    pub fn new(source: &'a S, filter: &'a RequestFilter) -> Self {
        Self { source, filter }
    }

    /// Timetables for the day before `search_date` through
    /// `additional_future_search_days` after it, with times measured from the
    /// start of service of `search_date`.
    pub fn build(
        &self,
        search_date: NaiveDate,
        additional_future_search_days: u32,
    ) -> Result<RequestTimetables, TransitDataError> {
        let start = start_of_service(search_date, self.source.time_zone())?;
        let first = add_days(search_date, -1)?;
        let last = add_days(search_date, additional_future_search_days.into())?;
        self.build_from(start, first, last)
    }

    /// Timetables for `first..=last`, with times measured from
    /// `search_start_time`.
    ///
    /// On `first`, every service day still running is included, so trips of
    /// earlier service dates that run past midnight are found. Later dates
    /// only add service days that start on them.
    pub fn build_from(
        &self,
        search_start_time: DateTime<Tz>,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<RequestTimetables, TransitDataError> {
        let zone = self.source.time_zone();
        let stop_count = self.source.stop_count();

        let mut by_pattern: BTreeMap<PatternId, Vec<Arc<TripPatternForDate>>> = BTreeMap::new();
        for date in service_dates(first, last) {
            let days = if date == first {
                self.source.patterns_running_on(date)
            } else {
                self.source.patterns_starting_on(date)
            };
            for day in days.iter().filter_map(|d| self.filter.filter(d)) {
                by_pattern.entry(day.pattern().id()).or_default().push(day);
            }
        }

        let mut timetables = Vec::with_capacity(by_pattern.len());
        let mut patterns_by_stop: Vec<Vec<usize>> = vec![Vec::new(); stop_count];
        let mut index = HashMap::with_capacity(by_pattern.len());

        for (pattern_id, mut days) in by_pattern {
            days.sort_by_key(|d| d.service_date());
            days.dedup_by_key(|d| d.service_date());

            let mut merged = Vec::with_capacity(days.len());
            for day in days {
                let day_start = start_of_service(day.service_date(), zone)?;
                let offset = seconds_between(&search_start_time, &day_start)?;
                merged.push((day, offset));
            }
            let timetable = MergedTimetable::new(merged);

            let pattern = timetable.pattern();
            let boarding = self.filter.filter_available_stops(
                pattern,
                &pattern.boarding_possible(),
                BoardAlight::Board,
            );
            let alighting = self.filter.filter_available_stops(
                pattern,
                &pattern.alighting_possible(),
                BoardAlight::Alight,
            );
            let timetable = timetable.with_available_stops(boarding, alighting);

            let i = timetables.len();
            for &stop in timetable.pattern().stops() {
                let patterns = patterns_by_stop
                    .get_mut(stop.0)
                    .ok_or(TransitDataError::StopOutOfRange { stop, stop_count })?;
                if patterns.last() != Some(&i) {
                    patterns.push(i);
                }
            }

            index.insert(pattern_id, i);
            timetables.push(timetable);
        }

        debug!(
            %first,
            %last,
            patterns = timetables.len(),
            trip_schedules = timetables
                .iter()
                .map(MergedTimetable::number_of_trip_schedules)
                .sum::<usize>(),
            "request timetables built"
        );

        Ok(RequestTimetables {
            search_start_time,
            timetables,
            patterns_by_stop,
            by_pattern: index,
        })
    }
}
