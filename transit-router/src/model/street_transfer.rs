//! Precomputed street paths between stops.

use crate::domain::StopIndex;

/// A street path from one stop to another, as found when the dataset was
/// built.
///
/// Holds only the path's physical properties; the time and cost it takes
/// depend on request preferences and are derived per request.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetTransfer {
    to_stop: StopIndex,
    distance_meters: f64,
    stairs_meters: f64,
    elevator_boardings: u32,
    elevator_hops: u32,
    turns: u32,
    max_slope: f64,
    bike_safety_factor: f64,
    bike_slope_factor: f64,
}

impl StreetTransfer {
    /// A flat, stair-free path of the given length.
    ///
    /// Negative or non-finite distances are treated as zero.
    pub fn new(to_stop: StopIndex, distance_meters: f64) -> Self {
        Self {
            to_stop,
            distance_meters: non_negative(distance_meters),
            stairs_meters: 0.0,
            elevator_boardings: 0,
            elevator_hops: 0,
            turns: 0,
            max_slope: 0.0,
            bike_safety_factor: 1.0,
            bike_slope_factor: 1.0,
        }
    }

    /// Part of the distance is on stairs (capped at the total distance).
    pub fn with_stairs(mut self, stairs_meters: f64) -> Self {
        self.stairs_meters = non_negative(stairs_meters).min(self.distance_meters);
        self
    }

    pub fn with_elevator(mut self, boardings: u32, hops: u32) -> Self {
        self.elevator_boardings = boardings;
        self.elevator_hops = hops;
        self
    }

    pub fn with_turns(mut self, turns: u32) -> Self {
        self.turns = turns;
        self
    }

    pub fn with_max_slope(mut self, max_slope: f64) -> Self {
        self.max_slope = non_negative(max_slope);
        self
    }

    /// Bicycle cost multipliers, both at least 1.0.
    pub fn with_bike_factors(mut self, safety: f64, slope: f64) -> Self {
        self.bike_safety_factor = non_negative(safety).max(1.0);
        self.bike_slope_factor = non_negative(slope).max(1.0);
        self
    }

    pub fn to_stop(&self) -> StopIndex {
        self.to_stop
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    pub fn stairs_meters(&self) -> f64 {
        self.stairs_meters
    }

    pub fn has_stairs(&self) -> bool {
        self.stairs_meters > 0.0
    }

    pub fn elevator_boardings(&self) -> u32 {
        self.elevator_boardings
    }

    pub fn elevator_hops(&self) -> u32 {
        self.elevator_hops
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn max_slope(&self) -> f64 {
        self.max_slope
    }

    pub fn bike_safety_factor(&self) -> f64 {
        self.bike_safety_factor
    }

    pub fn bike_slope_factor(&self) -> f64 {
        self.bike_slope_factor
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
