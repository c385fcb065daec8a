//! Integer identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;

/// Global index of a stop in the loaded dataset (`0..stop_count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct StopIndex(pub usize);

/// Identifier of a scheduled trip, shared by all service days it runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct TripId(pub u32);

/// Identifier of a route (a line as presented to riders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct RouteId(pub u32);

/// Identifier of a trip pattern (one stop sequence of a route).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct PatternId(pub u32);

/// Identifier of a constrained transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct TransferId(pub u32);

/// Identity of one loaded transit dataset.
///
/// Every loaded layer gets a fresh id, so two layers never compare equal even
/// if their contents do. Caches keyed on this id are therefore invalidated
/// simply by loading a new dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitLayerId(u64);

impl TransitLayerId {
    /// Allocate a new, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

macro_rules! display_id {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "{}"), self.0)
                }
            }
        )*
    };
}

display_id! {
    StopIndex => "stop#",
    TripId => "trip#",
    RouteId => "route#",
    PatternId => "pattern#",
    TransferId => "transfer#",
    TransitLayerId => "layer#",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_ids_are_unique() {
        let a = TransitLayerId::next();
        let b = TransitLayerId::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }

    #[test]
    fn display() {
        assert_eq!(StopIndex(3).to_string(), "stop#3");
        assert_eq!(TripId(12).to_string(), "trip#12");
        assert_eq!(PatternId(0).to_string(), "pattern#0");
    }
}
