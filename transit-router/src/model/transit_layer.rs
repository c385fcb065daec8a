//! In-memory static transit dataset.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use super::{ScheduleSource, StreetTransfer, TripPatternForDate};
use crate::domain::{StopIndex, TransitLayerId, service_dates};
use crate::error::TransitDataError;
use crate::transfer::{ConstrainedTransfer, TransferService};

/// A loaded, immutable transit dataset.
///
/// Built once with [`TransitLayerBuilder`] and then shared read-only by all
/// requests. Each layer gets a fresh [`TransitLayerId`], so caches keyed by
/// it never serve data computed for an earlier dataset.
#[derive(Debug)]
pub struct TransitLayer {
    id: TransitLayerId,
    time_zone: Tz,
    stop_count: usize,
    starting_by_date: BTreeMap<NaiveDate, Vec<Arc<TripPatternForDate>>>,
    running_by_date: BTreeMap<NaiveDate, Vec<Arc<TripPatternForDate>>>,
    transfers_by_stop: Vec<Vec<StreetTransfer>>,
    constrained_transfers: TransferService,
}

impl TransitLayer {
    pub fn builder(time_zone: Tz, stop_count: usize) -> TransitLayerBuilder {
        TransitLayerBuilder::new(time_zone, stop_count)
    }

    pub fn constrained_transfers(&self) -> &TransferService {
        &self.constrained_transfers
    }
}

impl ScheduleSource for TransitLayer {
    fn id(&self) -> TransitLayerId {
        self.id
    }

    fn time_zone(&self) -> Tz {
        self.time_zone
    }

    fn stop_count(&self) -> usize {
        self.stop_count
    }

    fn patterns_running_on(&self, date: NaiveDate) -> Vec<Arc<TripPatternForDate>> {
        self.running_by_date.get(&date).cloned().unwrap_or_default()
    }

    fn patterns_starting_on(&self, date: NaiveDate) -> Vec<Arc<TripPatternForDate>> {
        self.starting_by_date.get(&date).cloned().unwrap_or_default()
    }

    fn transfers_by_stop_index(&self) -> &[Vec<StreetTransfer>] {
        &self.transfers_by_stop
    }
}

/// Collects the parts of a [`TransitLayer`] and validates them on
/// [`build`](Self::build).
#[derive(Debug)]
pub struct TransitLayerBuilder {
    time_zone: Tz,
    stop_count: usize,
    days: Vec<Arc<TripPatternForDate>>,
    street_transfers: Vec<(StopIndex, StreetTransfer)>,
    constrained_transfers: TransferService,
}

impl TransitLayerBuilder {
    pub fn new(time_zone: Tz, stop_count: usize) -> Self {
        Self {
            time_zone,
            stop_count,
            days: Vec::new(),
            street_transfers: Vec::new(),
            constrained_transfers: TransferService::new(),
        }
    }

    pub fn add_pattern_for_date(mut self, day: TripPatternForDate) -> Self {
        self.days.push(Arc::new(day));
        self
    }

    pub fn add_street_transfer(mut self, from: StopIndex, leg: StreetTransfer) -> Self {
        self.street_transfers.push((from, leg));
        self
    }

    pub fn add_constrained_transfer(mut self, transfer: ConstrainedTransfer) -> Self {
        self.constrained_transfers.add(transfer);
        self
    }

    /// Index the collected data by date and stop.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a pattern or street transfer references a stop outside
    /// `0..stop_count`.
    pub fn build(self) -> Result<TransitLayer, TransitDataError> {
        let stop_count = self.stop_count;
        let check = |stop: StopIndex| {
            if stop.0 < stop_count {
                Ok(())
            } else {
                Err(TransitDataError::StopOutOfRange { stop, stop_count })
            }
        };

        let mut starting_by_date: BTreeMap<NaiveDate, Vec<_>> = BTreeMap::new();
        let mut running_by_date: BTreeMap<NaiveDate, Vec<_>> = BTreeMap::new();
        for day in &self.days {
            day.pattern().stops().iter().try_for_each(|s| check(*s))?;

            starting_by_date
                .entry(day.start_of_running_period())
                .or_default()
                .push(day.clone());
            for date in service_dates(day.start_of_running_period(), day.end_of_running_period()) {
                running_by_date.entry(date).or_default().push(day.clone());
            }
        }

        let mut transfers_by_stop = vec![Vec::new(); stop_count];
        for (from, leg) in self.street_transfers {
            check(from)?;
            if leg.to_stop().0 >= stop_count {
                return Err(TransitDataError::UnknownTransferTarget {
                    from,
                    to: leg.to_stop(),
                    stop_count,
                });
            }
            transfers_by_stop[from.0].push(leg);
        }

        let layer = TransitLayer {
            id: TransitLayerId::next(),
            time_zone: self.time_zone,
            stop_count,
            starting_by_date,
            running_by_date,
            transfers_by_stop,
            constrained_transfers: self.constrained_transfers,
        };

        debug!(
            layer = %layer.id,
            stops = stop_count,
            days = self.days.len(),
            constrained_transfers = layer.constrained_transfers.len(),
            "transit layer built"
        );

        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatternId, RouteId, TransitMode, TripId};
    use crate::model::{RoutingTripPattern, TripTimes};
    use crate::test_support::date;

    fn day(service_date: NaiveDate, dep: i32, arr: i32) -> TripPatternForDate {
        let pattern = Arc::new(RoutingTripPattern::new(
            PatternId(1),
            RouteId(1),
            TransitMode::Bus,
            vec![StopIndex(0), StopIndex(1)],
        ));
        let trip = TripTimes::from_passing_times(TripId(1), RouteId(1), vec![dep, arr]).unwrap();
        TripPatternForDate::new(pattern, service_date, vec![Arc::new(trip)]).unwrap()
    }

    #[test]
    fn indexes_running_and_starting_dates() {
        let layer = TransitLayer::builder(Tz::UTC, 2)
            .add_pattern_for_date(day(date(2024, 1, 1), 23 * 3600, 25 * 3600))
            .build()
            .unwrap();

        assert_eq!(layer.patterns_starting_on(date(2024, 1, 1)).len(), 1);
        assert!(layer.patterns_starting_on(date(2024, 1, 2)).is_empty());
        assert_eq!(layer.patterns_running_on(date(2024, 1, 1)).len(), 1);
        assert_eq!(layer.patterns_running_on(date(2024, 1, 2)).len(), 1);
        assert!(layer.patterns_running_on(date(2024, 1, 3)).is_empty());
    }

    #[test]
    fn layers_get_distinct_ids() {
        let a = TransitLayer::builder(Tz::UTC, 0).build().unwrap();
        let b = TransitLayer::builder(Tz::UTC, 0).build().unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn groups_street_transfers_by_origin() {
        let layer = TransitLayer::builder(Tz::UTC, 3)
            .add_street_transfer(StopIndex(0), StreetTransfer::new(StopIndex(1), 100.0))
            .add_street_transfer(StopIndex(0), StreetTransfer::new(StopIndex(2), 200.0))
            .build()
            .unwrap();

        let transfers = layer.transfers_by_stop_index();
        assert_eq!(transfers.len(), 3);
        assert_eq!(transfers[0].len(), 2);
        assert!(transfers[1].is_empty());
    }

    #[test]
    fn rejects_unknown_transfer_target() {
        let err = TransitLayer::builder(Tz::UTC, 2)
            .add_street_transfer(StopIndex(0), StreetTransfer::new(StopIndex(5), 10.0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TransitDataError::UnknownTransferTarget {
                to: StopIndex(5),
                ..
            }
        ));
    }

    #[test]
    fn rejects_pattern_stop_out_of_range() {
        let err = TransitLayer::builder(Tz::UTC, 1)
            .add_pattern_for_date(day(date(2024, 1, 1), 0, 60))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TransitDataError::StopOutOfRange {
                stop: StopIndex(1),
                stop_count: 1
            }
        ));
    }
}
