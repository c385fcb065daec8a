//! Cross-request cache of transfer indexes.
//!
//! Converting every street transfer of a dataset is expensive, but the result
//! only depends on the dataset and the street preferences. Requests that
//! agree on both share one index.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;
use tracing::debug;

use super::RaptorTransferIndex;
use crate::config::TransitTuningConfig;
use crate::domain::TransitLayerId;
use crate::error::TransitDataError;
use crate::model::ScheduleSource;
use crate::request::{RoutingRequest, StreetRelevantOptions};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    layer: TransitLayerId,
    options: StreetRelevantOptions,
}

/// Bounded, thread-safe cache of [`RaptorTransferIndex`] values.
///
/// Concurrent requests for the same key compute the index once; the others
/// wait for and share the result. Failed computations are not cached.
pub struct TransferLegCache {
    indexes: MokaCache<CacheKey, Arc<RaptorTransferIndex>>,
}

impl TransferLegCache {
    /// Create a cache holding at most `max_capacity` indexes.
    pub fn new(max_capacity: u64) -> Self {
        Self {
            indexes: MokaCache::builder().max_capacity(max_capacity).build(),
        }
    }

    pub fn from_config(config: &TransitTuningConfig) -> Self {
        Self::new(config.transfer_cache_max_size)
    }

    /// The transfer index of `source` under the street preferences of
    /// `request`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the computation's error, shared with any callers that waited
    /// on the same key.
    pub fn get<S: ScheduleSource + ?Sized>(
        &self,
        source: &S,
        request: &RoutingRequest,
    ) -> Result<Arc<RaptorTransferIndex>, Arc<TransitDataError>> {
        let options = StreetRelevantOptions::from(request);
        let key = CacheKey {
            layer: source.id(),
            options: options.clone(),
        };

        self.indexes.try_get_with(key, || {
            debug!(
                layer = %source.id(),
                mode = ?options.street.mode,
                wheelchair = options.wheelchair,
                "computing transfer index"
            );
            RaptorTransferIndex::create(source.transfers_by_stop_index(), &options).map(Arc::new)
        })
    }

    /// Number of cached indexes. Pending maintenance may make this lag
    /// behind recent inserts.
    pub fn entry_count(&self) -> u64 {
        self.indexes.entry_count()
    }

    pub fn run_pending_tasks(&self) {
        self.indexes.run_pending_tasks();
    }

    pub fn invalidate_all(&self) {
        self.indexes.invalidate_all();
    }
}

impl Default for TransferLegCache {
    fn default() -> Self {
        Self::from_config(&TransitTuningConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;

    use crate::domain::StopIndex;
    use crate::model::{StreetTransfer, TripPatternForDate};

    struct StubSource {
        id: TransitLayerId,
        transfers: Vec<Vec<StreetTransfer>>,
        reads: AtomicUsize,
    }

    impl StubSource {
        fn new(transfers: Vec<Vec<StreetTransfer>>) -> Self {
            Self {
                id: TransitLayerId::next(),
                transfers,
                reads: AtomicUsize::new(0),
            }
        }

        fn valid() -> Self {
            Self::new(vec![
                vec![StreetTransfer::new(StopIndex(1), 100.0)],
                vec![StreetTransfer::new(StopIndex(0), 100.0)],
            ])
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl ScheduleSource for StubSource {
        fn id(&self) -> TransitLayerId {
            self.id
        }

        fn time_zone(&self) -> Tz {
            Tz::UTC
        }

        fn stop_count(&self) -> usize {
            self.transfers.len()
        }

        fn patterns_running_on(&self, _date: NaiveDate) -> Vec<Arc<TripPatternForDate>> {
            Vec::new()
        }

        fn patterns_starting_on(&self, _date: NaiveDate) -> Vec<Arc<TripPatternForDate>> {
            Vec::new()
        }

        fn transfers_by_stop_index(&self) -> &[Vec<StreetTransfer>] {
            self.reads.fetch_add(1, Ordering::SeqCst);
            &self.transfers
        }
    }

    #[test]
    fn unrelated_request_fields_share_an_entry() {
        let cache = TransferLegCache::new(10);
        let source = StubSource::valid();

        let a = RoutingRequest::default();
        let b = RoutingRequest {
            num_itineraries: 3,
            date_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            ..Default::default()
        };

        let first = cache.get(&source, &a).unwrap();
        let second = cache.get(&source, &b).unwrap();

        assert_eq!(source.reads(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        cache.run_pending_tasks();
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn street_preferences_are_part_of_the_key() {
        let cache = TransferLegCache::new(10);
        let source = StubSource::valid();

        let a = RoutingRequest::default();
        let mut b = RoutingRequest::default();
        b.street.walk_speed = 2.0;

        let slow = cache.get(&source, &a).unwrap();
        let fast = cache.get(&source, &b).unwrap();

        assert_eq!(source.reads(), 2);
        assert!(
            fast.transfers_from(StopIndex(0))[0].duration_seconds
                < slow.transfers_from(StopIndex(0))[0].duration_seconds
        );
    }

    #[test]
    fn new_layer_is_a_new_key() {
        let cache = TransferLegCache::new(10);
        let old = StubSource::valid();
        let new = StubSource::valid();
        let request = RoutingRequest::default();

        cache.get(&old, &request).unwrap();
        cache.get(&new, &request).unwrap();

        assert_eq!(old.reads(), 1);
        assert_eq!(new.reads(), 1);
    }

    #[test]
    fn concurrent_callers_compute_once() {
        let cache = TransferLegCache::new(10);
        let source = StubSource::valid();
        let request = RoutingRequest::default();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| cache.get(&source, &request).unwrap());
            }
        });

        assert_eq!(source.reads(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = TransferLegCache::new(10);
        let source = StubSource::new(vec![vec![StreetTransfer::new(StopIndex(7), 10.0)]]);
        let request = RoutingRequest::default();

        let err = cache.get(&source, &request).unwrap_err();
        assert!(matches!(
            *err,
            TransitDataError::UnknownTransferTarget {
                to: StopIndex(7),
                ..
            }
        ));
        assert!(cache.get(&source, &request).is_err());

        assert_eq!(source.reads(), 2);
        cache.run_pending_tasks();
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn invalidate_all_forces_recompute() {
        let cache = TransferLegCache::default();
        let source = StubSource::valid();
        let request = RoutingRequest::default();

        cache.get(&source, &request).unwrap();
        cache.invalidate_all();
        cache.get(&source, &request).unwrap();

        assert_eq!(source.reads(), 2);
    }
}
