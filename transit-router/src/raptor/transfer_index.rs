//! Street transfers converted to search transfers for one set of street
//! preferences.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::domain::StopIndex;
use crate::error::TransitDataError;
use crate::model::StreetTransfer;
use crate::request::{OptimizeType, StreetMode, StreetRelevantOptions};

/// A transfer the search can use: target stop, duration and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaptorTransfer {
    pub stop: StopIndex,
    pub duration_seconds: i32,
    pub generalized_cost: i32,
}

impl RaptorTransfer {
    /// Cost and time of a street leg under `options`.
    ///
    /// Returns `None` if the leg cannot be traversed: stairs or a slope above
    /// the maximum for wheelchair users, or a non-positive speed.
    pub fn from_street(leg: &StreetTransfer, options: &StreetRelevantOptions) -> Option<Self> {
        if options.wheelchair && (leg.has_stairs() || leg.max_slope() > options.max_slope()) {
            return None;
        }

        let street = &options.street;
        let elevator_time = leg.elevator_boardings() as f64 * street.elevator_board_time as f64
            + leg.elevator_hops() as f64 * street.elevator_hop_time as f64;
        let elevator_cost = leg.elevator_boardings() as f64 * street.elevator_board_cost as f64
            + leg.elevator_hops() as f64 * street.elevator_hop_cost as f64;
        let turn_cost = leg.turns() as f64 * street.turn_reluctance;

        let (travel_time, travel_cost) = match street.mode {
            StreetMode::Walk => {
                if street.walk_speed <= 0.0 || !street.walk_speed.is_finite() {
                    return None;
                }
                let flat = (leg.distance_meters() - leg.stairs_meters()) / street.walk_speed;
                let stairs = leg.stairs_meters() / street.walk_speed;
                let cost = street.walk_reluctance * (flat + stairs * street.stairs_reluctance);
                (flat + stairs, cost)
            }
            StreetMode::Bike => {
                if street.bike_speed <= 0.0 || !street.bike_speed.is_finite() {
                    return None;
                }
                let time = leg.distance_meters() / street.bike_speed;
                (time, time * bike_cost_factor(leg, options))
            }
        };

        Some(Self {
            stop: leg.to_stop(),
            duration_seconds: (travel_time + elevator_time).ceil() as i32,
            generalized_cost: (travel_cost + elevator_cost + turn_cost).ceil() as i32,
        })
    }
}

fn bike_cost_factor(leg: &StreetTransfer, options: &StreetRelevantOptions) -> f64 {
    let street = &options.street;
    match street.optimize {
        OptimizeType::Quick => 1.0,
        OptimizeType::Safe => leg.bike_safety_factor(),
        OptimizeType::Flat => leg.bike_slope_factor(),
        OptimizeType::Triangle => {
            let total = street.triangle_time + street.triangle_slope + street.triangle_safety;
            if total <= 0.0 || !total.is_finite() {
                return 1.0;
            }
            (street.triangle_time
                + street.triangle_slope * leg.bike_slope_factor()
                + street.triangle_safety * leg.bike_safety_factor())
                / total
        }
    }
}

/// Outgoing and incoming search transfers for every stop.
#[derive(Debug, Clone, Default)]
pub struct RaptorTransferIndex {
    forward: Vec<Vec<RaptorTransfer>>,
    reverse: Vec<Vec<RaptorTransfer>>,
}

impl RaptorTransferIndex {
    /// Convert every stop's street legs.
    ///
    /// Untraversable legs are dropped and, of several legs to the same stop,
    /// the one with the lower cost is kept. In the reverse lists,
    /// `RaptorTransfer::stop` is the origin of the transfer.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a leg points at a stop outside the input.
    pub fn create(
        transfers_by_stop: &[Vec<StreetTransfer>],
        options: &StreetRelevantOptions,
    ) -> Result<Self, TransitDataError> {
        let stop_count = transfers_by_stop.len();
        let mut forward = Vec::with_capacity(stop_count);
        let mut reverse: Vec<Vec<RaptorTransfer>> = vec![Vec::new(); stop_count];

        for (from, legs) in transfers_by_stop.iter().enumerate() {
            let mut best: BTreeMap<StopIndex, RaptorTransfer> = BTreeMap::new();
            for leg in legs {
                if leg.to_stop().0 >= stop_count {
                    return Err(TransitDataError::UnknownTransferTarget {
                        from: StopIndex(from),
                        to: leg.to_stop(),
                        stop_count,
                    });
                }
                let Some(transfer) = RaptorTransfer::from_street(leg, options) else {
                    continue;
                };
                match best.entry(transfer.stop) {
                    Entry::Vacant(e) => {
                        e.insert(transfer);
                    }
                    Entry::Occupied(mut e) => {
                        if transfer.generalized_cost < e.get().generalized_cost {
                            e.insert(transfer);
                        }
                    }
                }
            }

            for transfer in best.values() {
                reverse[transfer.stop.0].push(RaptorTransfer {
                    stop: StopIndex(from),
                    ..*transfer
                });
            }
            forward.push(best.into_values().collect());
        }

        Ok(Self { forward, reverse })
    }

    pub fn number_of_stops(&self) -> usize {
        self.forward.len()
    }

    /// Transfers leaving `stop`.
    pub fn transfers_from(&self, stop: StopIndex) -> &[RaptorTransfer] {
        self.forward.get(stop.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transfers arriving at `stop`, each carrying its origin stop.
    pub fn transfers_to(&self, stop: StopIndex) -> &[RaptorTransfer] {
        self.reverse.get(stop.0).map(Vec::as_slice).unwrap_or(&[])
    }
}
