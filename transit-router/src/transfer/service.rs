//! Storage and lookup of the dataset's constrained transfers.

use std::collections::HashMap;
use std::sync::Arc;

use super::{ConstrainedTransfer, TransferPoint, TripStop};
use crate::domain::{RouteId, StopIndex, TripId};
use crate::model::TransferSource;

#[derive(Debug, Default, Clone)]
struct PointIndex {
    by_trip: HashMap<(TripId, usize), Vec<usize>>,
    by_route: HashMap<(RouteId, StopIndex), Vec<usize>>,
    by_stop: HashMap<StopIndex, Vec<usize>>,
}

impl PointIndex {
    fn insert(&mut self, point: &TransferPoint, transfer: usize) {
        let slot = match *point {
            TransferPoint::Trip {
                trip,
                stop_position,
            } => self.by_trip.entry((trip, stop_position)).or_default(),
            TransferPoint::Route { route, stop } => self.by_route.entry((route, stop)).or_default(),
            TransferPoint::Stop { stop } => self.by_stop.entry(stop).or_default(),
        };
        slot.push(transfer);
    }

    fn lookup<'a>(&'a self, at: &TripStop) -> impl Iterator<Item = usize> + 'a {
        let trip = self.by_trip.get(&(at.trip, at.stop_position));
        let route = self.by_route.get(&(at.route, at.stop));
        let stop = self.by_stop.get(&at.stop);
        [trip, route, stop]
            .into_iter()
            .flatten()
            .flat_map(|v| v.iter().copied())
    }
}

/// All constrained transfers of a dataset, indexed by both endpoints.
///
/// Results of both lookups are ordered most specific first.
#[derive(Debug, Default, Clone)]
pub struct TransferService {
    transfers: Vec<Arc<ConstrainedTransfer>>,
    to_index: PointIndex,
    from_index: PointIndex,
}

impl TransferService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, transfer: ConstrainedTransfer) {
        let i = self.transfers.len();
        self.to_index.insert(transfer.to(), i);
        self.from_index.insert(transfer.from(), i);
        self.transfers.push(Arc::new(transfer));
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn transfers(&self) -> &[Arc<ConstrainedTransfer>] {
        &self.transfers
    }

    fn collect(&self, ids: impl Iterator<Item = usize>) -> Vec<Arc<ConstrainedTransfer>> {
        let mut result: Vec<_> = ids.map(|i| self.transfers[i].clone()).collect();
        result.sort_by_key(|t| t.sort_key());
        result
    }
}

impl FromIterator<ConstrainedTransfer> for TransferService {
    fn from_iter<I: IntoIterator<Item = ConstrainedTransfer>>(iter: I) -> Self {
        let mut service = Self::new();
        for transfer in iter {
            service.add(transfer);
        }
        service
    }
}

impl TransferSource for TransferService {
    fn list_transfers_to(&self, at: &TripStop) -> Vec<Arc<ConstrainedTransfer>> {
        self.collect(self.to_index.lookup(at))
    }

    fn list_transfers_from(&self, at: &TripStop) -> Vec<Arc<ConstrainedTransfer>> {
        self.collect(self.from_index.lookup(at))
    }

    fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}
