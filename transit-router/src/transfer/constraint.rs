//! Constrained transfer definitions.

use std::cmp::Reverse;

use serde::Deserialize;

use crate::domain::{RouteId, StopIndex, TransferId, TripId};

/// How a transfer between two trips is constrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferConstraint {
    /// The departing vehicle waits for the arriving one.
    Guaranteed,
    /// Passengers stay on board; the same vehicle continues as the next trip.
    StaySeated,
    /// The transfer may not be made.
    NotAllowed,
    /// No constraint; ordinary boarding rules and slack apply.
    #[default]
    Regular,
}

impl TransferConstraint {
    pub fn is_guaranteed(self) -> bool {
        self == Self::Guaranteed
    }

    pub fn is_stay_seated(self) -> bool {
        self == Self::StaySeated
    }

    pub fn is_not_allowed(self) -> bool {
        self == Self::NotAllowed
    }

    pub fn is_regular(self) -> bool {
        self == Self::Regular
    }

    /// Guaranteed and stay-seated transfers may board without slack.
    pub fn is_facilitated(self) -> bool {
        matches!(self, Self::Guaranteed | Self::StaySeated)
    }

    // Lower sorts first among equally specific transfers
    fn tie_break_rank(self) -> u8 {
        match self {
            Self::Guaranteed | Self::StaySeated => 0,
            Self::Regular => 1,
            Self::NotAllowed => 2,
        }
    }
}

/// Preference expressed by the data publisher for a transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferPriority {
    NotAllowed,
    #[default]
    Allowed,
    Recommended,
    Preferred,
}

impl TransferPriority {
    /// Generalized-cost penalty, in seconds-equivalent, for using the transfer.
    pub fn cost(self) -> i32 {
        match self {
            Self::Preferred => 0,
            Self::Recommended => 10,
            Self::Allowed => 20,
            Self::NotAllowed => 1_000,
        }
    }
}

/// A trip at a given stop position; the thing transfer points are matched
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripStop {
    pub trip: TripId,
    pub route: RouteId,
    pub stop: StopIndex,
    pub stop_position: usize,
}

/// One end of a constrained transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferPoint {
    /// A specific trip at a specific stop position.
    Trip { trip: TripId, stop_position: usize },
    /// Every trip of a route at a stop.
    Route { route: RouteId, stop: StopIndex },
    /// Every trip at a stop.
    Stop { stop: StopIndex },
}

impl TransferPoint {
    /// Higher is more specific.
    pub fn specificity(&self) -> u8 {
        match self {
            Self::Stop { .. } => 1,
            Self::Route { .. } => 3,
            Self::Trip { .. } => 4,
        }
    }

    /// True for points that match every trip at their location.
    pub fn applies_to_all_trips(&self) -> bool {
        !matches!(self, Self::Trip { .. })
    }

    pub fn matches(&self, at: &TripStop) -> bool {
        match *self {
            Self::Trip {
                trip,
                stop_position,
            } => trip == at.trip && stop_position == at.stop_position,
            Self::Route { route, stop } => route == at.route && stop == at.stop,
            Self::Stop { stop } => stop == at.stop,
        }
    }

    /// Whether a trip of `route` could board or alight at this point, given
    /// the stop is already known to match.
    pub fn matches_trip(&self, trip: TripId, route: RouteId) -> bool {
        match *self {
            Self::Trip { trip: t, .. } => t == trip,
            Self::Route { route: r, .. } => r == route,
            Self::Stop { .. } => true,
        }
    }

    /// The specific trip this point names, if any.
    pub fn trip(&self) -> Option<TripId> {
        match *self {
            Self::Trip { trip, .. } => Some(trip),
            _ => None,
        }
    }
}

/// A constrained transfer between two points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstrainedTransfer {
    id: TransferId,
    from: TransferPoint,
    to: TransferPoint,
    constraint: TransferConstraint,
    priority: TransferPriority,
}

impl ConstrainedTransfer {
    pub fn new(
        id: TransferId,
        from: TransferPoint,
        to: TransferPoint,
        constraint: TransferConstraint,
    ) -> Self {
        Self {
            id,
            from,
            to,
            constraint,
            priority: TransferPriority::default(),
        }
    }

    pub fn with_priority(mut self, priority: TransferPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn id(&self) -> TransferId {
        self.id
    }

    pub fn from(&self) -> &TransferPoint {
        &self.from
    }

    pub fn to(&self) -> &TransferPoint {
        &self.to
    }

    pub fn constraint(&self) -> TransferConstraint {
        self.constraint
    }

    pub fn priority(&self) -> TransferPriority {
        self.priority
    }

    /// Combined specificity of both ends.
    pub fn specificity_ranking(&self) -> u8 {
        self.from.specificity() + self.to.specificity()
    }

    /// Sort key putting the transfer that should decide first: most specific,
    /// then facilitated before regular before not-allowed.
    pub fn sort_key(&self) -> (Reverse<u8>, u8, TransferId) {
        (
            Reverse(self.specificity_ranking()),
            self.constraint.tie_break_rank(),
            self.id,
        )
    }
}
