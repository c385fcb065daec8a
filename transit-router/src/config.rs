//! Tuning parameters for the request adapter.

use serde::Deserialize;

use crate::raptor::constrained::DEFAULT_SEARCH_WINDOW_SECONDS;

/// Deployment-wide tuning of the request adapter.
///
/// Every field has a default, so a host application may deserialize a
/// partial configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransitTuningConfig {
    /// Maximum number of transfer indexes kept by the transfer leg cache.
    /// One entry per distinct combination of dataset and street preferences.
    pub transfer_cache_max_size: u64,

    /// Whether constrained transfers are taken into account at all.
    pub constrained_transfers: bool,

    /// How far from the source time the constrained boarding search looks for
    /// a target trip (seconds).
    pub search_window_seconds: i32,
}

impl TransitTuningConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transfer_cache_max_size: u64,
        constrained_transfers: bool,
        search_window_seconds: i32,
    ) -> Self {
        Self {
            transfer_cache_max_size,
            constrained_transfers,
            search_window_seconds,
        }
    }

    pub fn with_transfer_cache_max_size(mut self, size: u64) -> Self {
        self.transfer_cache_max_size = size;
        self
    }

    pub fn with_constrained_transfers(mut self, enabled: bool) -> Self {
        self.constrained_transfers = enabled;
        self
    }

    pub fn with_search_window_seconds(mut self, seconds: i32) -> Self {
        self.search_window_seconds = seconds;
        self
    }
}

impl Default for TransitTuningConfig {
    fn default() -> Self {
        Self {
            transfer_cache_max_size: 25,
            constrained_transfers: true,
            search_window_seconds: DEFAULT_SEARCH_WINDOW_SECONDS, // 6 hours
        }
    }
}
