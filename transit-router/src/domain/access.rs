//! Accessibility and pickup/drop-off flags.

use serde::Deserialize;

/// Wheelchair accessibility of a trip or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Accessibility {
    Possible,
    NotPossible,
    #[default]
    NoInformation,
}

/// Whether bicycles may be taken on board a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BikeAccess {
    Allowed,
    NotAllowed,
    #[default]
    Unknown,
}

/// Pickup or drop-off type at one stop of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickDrop {
    #[default]
    Scheduled,
    None,
    CallAgency,
    CoordinateWithDriver,
    /// Cancelled by a real-time update.
    Cancelled,
}

impl PickDrop {
    /// True if riders can use this stop in a regular search.
    pub fn is_routable(self) -> bool {
        !matches!(self, PickDrop::None | PickDrop::Cancelled)
    }

    pub fn is_cancelled(self) -> bool {
        self == PickDrop::Cancelled
    }
}
