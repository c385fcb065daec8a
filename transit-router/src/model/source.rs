//! Traits through which request structures read the static dataset.
//!
//! These abstractions allow the request adapter to be tested with small
//! hand-built datasets and to run against any loader's representation.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{StreetTransfer, TripPatternForDate};
use crate::domain::TransitLayerId;
use crate::transfer::{ConstrainedTransfer, TripStop};

/// Static, per-service-date schedule data.
///
/// Implementations are read concurrently by many requests and must not
/// change after loading.
pub trait ScheduleSource: Send + Sync {
    /// Identity of the loaded dataset; changes when a new dataset is loaded.
    fn id(&self) -> TransitLayerId;

    /// Time zone that service-day times are expressed in.
    fn time_zone(&self) -> Tz;

    /// Number of stops; valid stop indexes are `0..stop_count()`.
    fn stop_count(&self) -> usize;

    /// Day schedules with at least one trip moving during `date`, including
    /// those whose service date is earlier.
    fn patterns_running_on(&self, date: NaiveDate) -> Vec<Arc<TripPatternForDate>>;

    /// Day schedules whose running period starts on `date`.
    fn patterns_starting_on(&self, date: NaiveDate) -> Vec<Arc<TripPatternForDate>>;

    /// Street paths leaving each stop, indexed by stop.
    fn transfers_by_stop_index(&self) -> &[Vec<StreetTransfer>];
}

/// Lookup of constrained transfers by trip location.
pub trait TransferSource {
    /// Transfers whose `to` point matches a trip at a stop.
    fn list_transfers_to(&self, at: &TripStop) -> Vec<Arc<ConstrainedTransfer>>;

    /// Transfers whose `from` point matches a trip at a stop.
    fn list_transfers_from(&self, at: &TripStop) -> Vec<Arc<ConstrainedTransfer>>;

    /// True if there are no constrained transfers at all.
    fn is_empty(&self) -> bool;
}
