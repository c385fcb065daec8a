//! Constrained transfers attached to the patterns of one request.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{PatternId, TripId};
use crate::model::TransferSource;
use crate::raptor::MergedTimetable;
use crate::transfer::{ConstrainedTransfer, TransferPoint, TripStop};

/// Constrained transfers of one pattern, by stop position.
///
/// Each list holds distinct transfers, most specific first.
#[derive(Debug, Clone, Default)]
pub struct TransfersByStopPosition {
    by_position: HashMap<usize, Vec<Arc<ConstrainedTransfer>>>,
}

impl TransfersByStopPosition {
    fn add(&mut self, pos: usize, transfer: Arc<ConstrainedTransfer>) {
        self.by_position.entry(pos).or_default().push(transfer);
    }

    fn finish(&mut self) {
        for list in self.by_position.values_mut() {
            list.sort_by_key(|t| t.sort_key());
            list.dedup_by_key(|t| t.id());
        }
    }

    /// Transfers at `pos`, if any.
    pub fn at(&self, pos: usize) -> Option<&[Arc<ConstrainedTransfer>]> {
        self.by_position
            .get(&pos)
            .map(Vec::as_slice)
            .filter(|l| !l.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }
}

/// Per pattern, the constrained transfers a boarding search needs:
/// incoming transfers for forward search, outgoing for reverse search.
#[derive(Debug, Clone, Default)]
pub struct ConstrainedTransferIndex {
    forward: HashMap<PatternId, TransfersByStopPosition>,
    reverse: HashMap<PatternId, TransfersByStopPosition>,
}

impl ConstrainedTransferIndex {
    /// Look up the transfers of every trip and stop position of `timetables`.
    ///
    /// A transfer whose other end is a specific trip missing from the
    /// timetables is left out, since that trip cannot be ridden in this
    /// request.
    pub fn generate<T: TransferSource + ?Sized>(
        source: &T,
        timetables: &[MergedTimetable],
    ) -> Self {
        let mut index = Self::default();
        if source.is_empty() {
            return index;
        }

        let trips_in_window: HashSet<TripId> = timetables
            .iter()
            .flat_map(|tt| tt.days().iter())
            .flat_map(|day| day.trips().iter().map(|t| t.trip()))
            .collect();
        let reachable = |point: &TransferPoint| {
            point
                .trip()
                .is_none_or(|trip| trips_in_window.contains(&trip))
        };

        let mut dropped = 0usize;
        for tt in timetables {
            let pattern = tt.pattern();
            let mut forward = TransfersByStopPosition::default();
            let mut reverse = TransfersByStopPosition::default();
            let mut visited = HashSet::new();

            for trip in tt.days().iter().flat_map(|day| day.trips().iter()) {
                if !visited.insert(trip.trip()) {
                    continue;
                }
                for pos in 0..pattern.number_of_stops() {
                    let at = TripStop {
                        trip: trip.trip(),
                        route: pattern.route(),
                        stop: pattern.stop_index(pos),
                        stop_position: pos,
                    };

                    for tx in source.list_transfers_to(&at) {
                        if reachable(tx.from()) {
                            forward.add(pos, tx);
                        } else {
                            trace!(transfer = tx.id().0, pattern = %pattern.id(), "source trip outside window");
                            dropped += 1;
                        }
                    }
                    for tx in source.list_transfers_from(&at) {
                        if reachable(tx.to()) {
                            reverse.add(pos, tx);
                        } else {
                            trace!(transfer = tx.id().0, pattern = %pattern.id(), "target trip outside window");
                            dropped += 1;
                        }
                    }
                }
            }

            if !forward.is_empty() {
                forward.finish();
                index.forward.insert(pattern.id(), forward);
            }
            if !reverse.is_empty() {
                reverse.finish();
                index.reverse.insert(pattern.id(), reverse);
            }
        }

        debug!(
            forward_patterns = index.forward.len(),
            reverse_patterns = index.reverse.len(),
            dropped,
            "constrained transfer index generated"
        );

        index
    }

    /// Incoming transfers of `pattern`, used when boarding it in a forward
    /// search.
    pub fn forward_search(&self, pattern: PatternId) -> Option<&TransfersByStopPosition> {
        self.forward.get(&pattern)
    }

    /// Outgoing transfers of `pattern`, used in a reverse search.
    pub fn reverse_search(&self, pattern: PatternId) -> Option<&TransfersByStopPosition> {
        self.reverse.get(&pattern)
    }
}
