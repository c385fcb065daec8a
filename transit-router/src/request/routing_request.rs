//! Per-request routing preferences.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::domain::{RouteId, TransitMode, TripId};

/// Street mode used for transfers between stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreetMode {
    #[default]
    Walk,
    Bike,
}

/// How bicycle legs are weighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizeType {
    /// Fastest path.
    #[default]
    Quick,
    /// Prefer bike-friendly streets.
    Safe,
    /// Avoid hills.
    Flat,
    /// Weighted mix of time, slope and safety.
    Triangle,
}

/// Preferences that affect how street transfers are turned into search
/// transfers. Two requests with equal street preferences share one cached
/// transfer index.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreetPreferences {
    pub mode: StreetMode,
    pub optimize: OptimizeType,

    /// Triangle weights, only used with [`OptimizeType::Triangle`].
    pub triangle_time: f64,
    pub triangle_slope: f64,
    pub triangle_safety: f64,

    /// Meters per second.
    pub walk_speed: f64,
    /// Meters per second.
    pub bike_speed: f64,

    pub walk_reluctance: f64,
    pub stairs_reluctance: f64,
    /// Cost per turn along the path.
    pub turn_reluctance: f64,

    pub elevator_board_cost: i32,
    /// Seconds.
    pub elevator_board_time: i32,
    pub elevator_hop_cost: i32,
    /// Seconds.
    pub elevator_hop_time: i32,
}

impl Default for StreetPreferences {
    fn default() -> Self {
        Self {
            mode: StreetMode::Walk,
            optimize: OptimizeType::Quick,
            triangle_time: 1.0 / 3.0,
            triangle_slope: 1.0 / 3.0,
            triangle_safety: 1.0 / 3.0,
            walk_speed: 1.33,
            bike_speed: 5.0,
            walk_reluctance: 2.0,
            stairs_reluctance: 2.0,
            turn_reluctance: 1.0,
            elevator_board_cost: 90,
            elevator_board_time: 90,
            elevator_hop_cost: 20,
            elevator_hop_time: 20,
        }
    }
}

impl StreetPreferences {
    fn float_bits(&self) -> [u64; 8] {
        [
            self.triangle_time,
            self.triangle_slope,
            self.triangle_safety,
            self.walk_speed,
            self.bike_speed,
            self.walk_reluctance,
            self.stairs_reluctance,
            self.turn_reluctance,
        ]
        .map(f64::to_bits)
    }

    fn int_fields(&self) -> [i32; 4] {
        [
            self.elevator_board_cost,
            self.elevator_board_time,
            self.elevator_hop_cost,
            self.elevator_hop_time,
        ]
    }
}

// Bitwise float equality so the preferences can key a hash map.
impl PartialEq for StreetPreferences {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.optimize == other.optimize
            && self.float_bits() == other.float_bits()
            && self.int_fields() == other.int_fields()
    }
}

impl Eq for StreetPreferences {}

impl Hash for StreetPreferences {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
        self.optimize.hash(state);
        self.float_bits().hash(state);
        self.int_fields().hash(state);
    }
}

/// Accessibility preferences for wheelchair users.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WheelchairPreferences {
    pub enabled: bool,
    /// Only board trips known to be wheelchair accessible.
    pub only_accessible_trips: bool,
    /// Only board or alight at stops known to be wheelchair accessible.
    pub only_accessible_stops: bool,
    /// Steepest street slope a transfer may have (rise over run).
    pub max_slope: f64,
}

impl Default for WheelchairPreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            only_accessible_trips: true,
            only_accessible_stops: true,
            max_slope: 0.0833,
        }
    }
}

/// A routing request as seen by the request adapter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingRequest {
    /// Desired departure (or arrival, with `arrive_by`) instant.
    pub date_time: DateTime<Utc>,
    pub arrive_by: bool,
    /// Number of itineraries wanted. Not relevant to transfer legs.
    pub num_itineraries: usize,
    /// Service days after the search date to include.
    pub additional_future_search_days: u32,
    /// Allowed transit modes. Empty means all modes.
    pub transit_modes: HashSet<TransitMode>,
    pub wheelchair: WheelchairPreferences,
    /// Only board trips that allow bicycles.
    pub require_bikes_on_board: bool,
    pub banned_routes: HashSet<RouteId>,
    pub banned_trips: HashSet<TripId>,
    /// Keep stop calls cancelled in real time, so they can be displayed.
    pub include_realtime_cancellations: bool,
    pub street: StreetPreferences,
}

impl Default for RoutingRequest {
    fn default() -> Self {
        Self {
            date_time: DateTime::<Utc>::UNIX_EPOCH,
            arrive_by: false,
            num_itineraries: 50,
            additional_future_search_days: 1,
            transit_modes: HashSet::new(),
            wheelchair: WheelchairPreferences::default(),
            require_bikes_on_board: false,
            banned_routes: HashSet::new(),
            banned_trips: HashSet::new(),
            include_realtime_cancellations: false,
            street: StreetPreferences::default(),
        }
    }
}

impl RoutingRequest {
    /// The calendar date of the request instant in `zone`.
    pub fn search_date(&self, zone: Tz) -> NaiveDate {
        self.date_time.with_timezone(&zone).date_naive()
    }

    /// True if `mode` is allowed by this request.
    pub fn allows_mode(&self, mode: TransitMode) -> bool {
        self.transit_modes.is_empty() || self.transit_modes.contains(&mode)
    }
}

/// The part of a request that determines the transfer legs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreetRelevantOptions {
    pub street: StreetPreferences,
    pub wheelchair: bool,
    max_slope_bits: u64,
}

impl StreetRelevantOptions {
    pub fn new(street: StreetPreferences, wheelchair: bool, max_slope: f64) -> Self {
        Self {
            street,
            wheelchair,
            max_slope_bits: max_slope.to_bits(),
        }
    }

    pub fn max_slope(&self) -> f64 {
        f64::from_bits(self.max_slope_bits)
    }
}

impl From<&RoutingRequest> for StreetRelevantOptions {
    fn from(request: &RoutingRequest) -> Self {
        Self::new(
            request.street.clone(),
            request.wheelchair.enabled,
            request.wheelchair.max_slope,
        )
    }
}
