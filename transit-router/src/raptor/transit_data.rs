//! The transit data one journey search reads.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use super::constrained::{ConstrainedBoardingSearch, ConstrainedTransferIndex, SearchDirection};
use super::{
    MergedTimetable, RaptorTransfer, RaptorTransferIndex, RequestTimetables, TimetableBuilder,
    TransferLegCache,
};
use crate::config::TransitTuningConfig;
use crate::domain::{PatternId, StopIndex};
use crate::error::TransitDataError;
use crate::model::{ScheduleSource, TransferSource, TransitLayer};
use crate::request::{RequestFilter, RoutingRequest};

/// What a Range-RAPTOR search needs from the transit data.
///
/// This abstraction allows the search to run against request data built
/// from any schedule source, or against hand-made data in tests.
pub trait TransitDataProvider {
    fn number_of_stops(&self) -> usize;

    /// Patterns visiting any of `stops`, each yielded once.
    fn patterns_touching(&self, stops: &[StopIndex]) -> impl Iterator<Item = &MergedTimetable>;

    /// Transfers leaving `stop`.
    fn transfers_from(&self, stop: StopIndex) -> &[RaptorTransfer];

    /// Transfers arriving at `stop`, for reverse searches.
    fn transfers_to(&self, stop: StopIndex) -> &[RaptorTransfer];

    fn constrained_forward_search(&self, pattern: PatternId) -> ConstrainedBoardingSearch<'_>;

    fn constrained_reverse_search(&self, pattern: PatternId) -> ConstrainedBoardingSearch<'_>;
}

/// Transit data of one request: merged timetables, shared transfer legs and,
/// built on first use, the constrained transfer index.
pub struct RequestTransitData<'a> {
    timetables: RequestTimetables,
    transfers: Arc<RaptorTransferIndex>,
    transfer_source: &'a (dyn TransferSource + Sync),
    constrained_enabled: bool,
    search_window: i32,
    constrained_index: OnceLock<ConstrainedTransferIndex>,
}

impl<'a> RequestTransitData<'a> {
    pub fn new(
        timetables: RequestTimetables,
        transfers: Arc<RaptorTransferIndex>,
        transfer_source: &'a (dyn TransferSource + Sync),
        config: &TransitTuningConfig,
    ) -> Self {
        Self {
            timetables,
            transfers,
            constrained_enabled: config.constrained_transfers && !transfer_source.is_empty(),
            transfer_source,
            search_window: config.search_window_seconds,
            constrained_index: OnceLock::new(),
        }
    }

    /// Build the transit data of `request` against a loaded layer.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the layer's data is inconsistent or service-day
    /// arithmetic fails for the requested dates.
    pub fn for_layer(
        layer: &'a TransitLayer,
        request: &RoutingRequest,
        config: &TransitTuningConfig,
        cache: &TransferLegCache,
    ) -> Result<Self, TransitDataError> {
        let filter = RequestFilter::from_request(request);
        let search_date = request.search_date(layer.time_zone());
        let timetables = TimetableBuilder::new(layer, &filter)
            .build(search_date, request.additional_future_search_days)?;
        let transfers = cache.get(layer, request)?;

        debug!(
            %search_date,
            patterns = timetables.timetables().len(),
            "request transit data ready"
        );

        Ok(Self::new(
            timetables,
            transfers,
            layer.constrained_transfers(),
            config,
        ))
    }

    pub fn search_start_time(&self) -> DateTime<Tz> {
        self.timetables.search_start_time()
    }

    pub fn timetables(&self) -> &RequestTimetables {
        &self.timetables
    }

    fn constrained_index(&self) -> &ConstrainedTransferIndex {
        self.constrained_index.get_or_init(|| {
            ConstrainedTransferIndex::generate(self.transfer_source, self.timetables.timetables())
        })
    }

    fn constrained_search(
        &self,
        direction: SearchDirection,
        pattern: PatternId,
    ) -> ConstrainedBoardingSearch<'_> {
        if !self.constrained_enabled {
            return ConstrainedBoardingSearch::disabled(direction);
        }
        let index = self.constrained_index();
        let transfers = match direction {
            SearchDirection::Forward => index.forward_search(pattern),
            SearchDirection::Reverse => index.reverse_search(pattern),
        };
        ConstrainedBoardingSearch::new(direction, transfers, self.search_window)
    }
}

impl TransitDataProvider for RequestTransitData<'_> {
    fn number_of_stops(&self) -> usize {
        self.timetables.number_of_stops()
    }

    fn patterns_touching(&self, stops: &[StopIndex]) -> impl Iterator<Item = &MergedTimetable> {
        let indexes: BTreeSet<usize> = stops
            .iter()
            .flat_map(|s| self.timetables.patterns_at(*s).iter().copied())
            .collect();
        let timetables = self.timetables.timetables();
        indexes.into_iter().map(move |i| &timetables[i])
    }

    fn transfers_from(&self, stop: StopIndex) -> &[RaptorTransfer] {
        self.transfers.transfers_from(stop)
    }

    fn transfers_to(&self, stop: StopIndex) -> &[RaptorTransfer] {
        self.transfers.transfers_to(stop)
    }

    fn constrained_forward_search(&self, pattern: PatternId) -> ConstrainedBoardingSearch<'_> {
        self.constrained_search(SearchDirection::Forward, pattern)
    }

    fn constrained_reverse_search(&self, pattern: PatternId) -> ConstrainedBoardingSearch<'_> {
        self.constrained_search(SearchDirection::Reverse, pattern)
    }
}
