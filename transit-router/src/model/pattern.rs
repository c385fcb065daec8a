//! Trip patterns: the stop sequence shared by a group of trips.

use crate::domain::{Accessibility, PatternId, PickDrop, RouteId, StopIndex, TransitMode};

/// A stop sequence of one route, with per-stop pickup/drop-off rules.
///
/// Patterns are created when the dataset is loaded and shared by every
/// service date and request through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTripPattern {
    id: PatternId,
    route: RouteId,
    mode: TransitMode,
    stops: Box<[StopIndex]>,
    pickup: Box<[PickDrop]>,
    drop_off: Box<[PickDrop]>,
    stop_wheelchair: Box<[Accessibility]>,
}

impl RoutingTripPattern {
    /// Create a pattern where every stop allows scheduled pickup and drop-off.
    pub fn new(id: PatternId, route: RouteId, mode: TransitMode, stops: Vec<StopIndex>) -> Self {
        let n = stops.len();
        Self {
            id,
            route,
            mode,
            stops: stops.into_boxed_slice(),
            pickup: vec![PickDrop::Scheduled; n].into_boxed_slice(),
            drop_off: vec![PickDrop::Scheduled; n].into_boxed_slice(),
            stop_wheelchair: vec![Accessibility::NoInformation; n].into_boxed_slice(),
        }
    }

    /// # Panics
    ///
    /// Panics if `pickup` does not have one entry per stop.
    pub fn with_pickup(mut self, pickup: Vec<PickDrop>) -> Self {
        assert_eq!(pickup.len(), self.stops.len(), "one pickup type per stop");
        self.pickup = pickup.into_boxed_slice();
        self
    }

    /// # Panics
    ///
    /// Panics if `drop_off` does not have one entry per stop.
    pub fn with_drop_off(mut self, drop_off: Vec<PickDrop>) -> Self {
        assert_eq!(drop_off.len(), self.stops.len(), "one drop-off type per stop");
        self.drop_off = drop_off.into_boxed_slice();
        self
    }

    /// # Panics
    ///
    /// Panics if `accessibility` does not have one entry per stop.
    pub fn with_stop_accessibility(mut self, accessibility: Vec<Accessibility>) -> Self {
        assert_eq!(
            accessibility.len(),
            self.stops.len(),
            "one accessibility value per stop"
        );
        self.stop_wheelchair = accessibility.into_boxed_slice();
        self
    }

    pub fn id(&self) -> PatternId {
        self.id
    }

    pub fn route(&self) -> RouteId {
        self.route
    }

    pub fn mode(&self) -> TransitMode {
        self.mode
    }

    pub fn stops(&self) -> &[StopIndex] {
        &self.stops
    }

    pub fn number_of_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn stop_index(&self, pos: usize) -> StopIndex {
        self.stops[pos]
    }

    pub fn pickup(&self, pos: usize) -> PickDrop {
        self.pickup[pos]
    }

    pub fn drop_off(&self, pos: usize) -> PickDrop {
        self.drop_off[pos]
    }

    pub fn stop_accessibility(&self, pos: usize) -> Accessibility {
        self.stop_wheelchair[pos]
    }

    /// Boarding flags before any request filtering.
    ///
    /// Cancelled pickups count as possible here; whether they stay possible
    /// is a per-request decision.
    pub fn boarding_possible(&self) -> Vec<bool> {
        self.pickup.iter().map(|p| *p != PickDrop::None).collect()
    }

    /// Alighting flags before any request filtering.
    pub fn alighting_possible(&self) -> Vec<bool> {
        self.drop_off.iter().map(|p| *p != PickDrop::None).collect()
    }

    /// First position of `stop` in this pattern, if it is visited at all.
    pub fn find_stop_position(&self, stop: StopIndex) -> Option<usize> {
        self.stops.iter().position(|s| *s == stop)
    }
}
