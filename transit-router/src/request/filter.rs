//! Request-derived filtering of patterns, trips and stops.

use std::collections::HashSet;
use std::sync::Arc;

use super::RoutingRequest;
use crate::domain::{Accessibility, BikeAccess, RouteId, TransitMode, TripId};
use crate::model::{RoutingTripPattern, TripPatternForDate, TripTimes};

/// Whether stop flags are for boarding or alighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAlight {
    Board,
    Alight,
}

/// Pattern, trip and stop predicates for one request.
///
/// The default filter accepts everything.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    /// Empty means all modes.
    modes: HashSet<TransitMode>,
    banned_routes: HashSet<RouteId>,
    banned_trips: HashSet<TripId>,
    require_bikes: bool,
    accessible_trips_only: bool,
    accessible_stops_only: bool,
    include_cancellations: bool,
}

impl RequestFilter {
    pub fn from_request(request: &RoutingRequest) -> Self {
        let wheelchair = &request.wheelchair;
        Self {
            modes: request.transit_modes.clone(),
            banned_routes: request.banned_routes.clone(),
            banned_trips: request.banned_trips.clone(),
            require_bikes: request.require_bikes_on_board,
            accessible_trips_only: wheelchair.enabled && wheelchair.only_accessible_trips,
            accessible_stops_only: wheelchair.enabled && wheelchair.only_accessible_stops,
            include_cancellations: request.include_realtime_cancellations,
        }
    }

    /// Pattern-level check: allowed mode and route not banned.
    pub fn pattern_predicate(&self, day: &TripPatternForDate) -> bool {
        let pattern = day.pattern();
        (self.modes.is_empty() || self.modes.contains(&pattern.mode()))
            && !self.banned_routes.contains(&pattern.route())
    }

    /// Trip-level check: not banned, and meets bike and wheelchair needs.
    pub fn trip_predicate(&self, trip: &TripTimes) -> bool {
        if self.banned_trips.contains(&trip.trip()) || self.banned_routes.contains(&trip.route()) {
            return false;
        }
        if self.require_bikes && trip.bikes() != BikeAccess::Allowed {
            return false;
        }
        if self.accessible_trips_only && trip.wheelchair() != Accessibility::Possible {
            return false;
        }
        true
    }

    /// Apply both predicates to a service day.
    ///
    /// Returns `None` if the pattern is excluded or no trip remains. An
    /// untouched day is returned as the same shared instance.
    pub fn filter(&self, day: &Arc<TripPatternForDate>) -> Option<Arc<TripPatternForDate>> {
        if !self.pattern_predicate(day) {
            return None;
        }
        if day.trips().iter().all(|t| self.trip_predicate(t)) {
            return Some(day.clone());
        }
        day.with_filtered_trips(|t| self.trip_predicate(t))
            .map(Arc::new)
    }

    /// Narrow a pattern's boarding or alighting flags for this request.
    ///
    /// Wheelchair requests drop stops not known to be accessible, and
    /// cancelled calls are dropped unless cancellations are included.
    pub fn filter_available_stops(
        &self,
        pattern: &RoutingTripPattern,
        possible: &[bool],
        kind: BoardAlight,
    ) -> Vec<bool> {
        possible
            .iter()
            .enumerate()
            .map(|(pos, &ok)| {
                let call = match kind {
                    BoardAlight::Board => pattern.pickup(pos),
                    BoardAlight::Alight => pattern.drop_off(pos),
                };
                ok && (!self.accessible_stops_only
                    || pattern.stop_accessibility(pos) == Accessibility::Possible)
                    && (self.include_cancellations || !call.is_cancelled())
            })
            .collect()
    }
}
