//! Outcome of a constrained boarding search.

use crate::domain::{StopIndex, TransferId};
use crate::raptor::TripScheduleWithOffset;
use crate::transfer::{TransferConstraint, TransferPriority};

/// Result of a successful boarding search: the trip to board (or, in a
/// reverse search, alight from) and the constraint that applies.
#[derive(Debug, Clone, Copy)]
pub struct BoardOrAlightEvent<'a> {
    /// Flat index of the trip in its merged timetable.
    pub trip_index: usize,
    pub trip: TripScheduleWithOffset<'a>,
    pub stop_position_in_pattern: usize,
    pub stop_index: StopIndex,
    /// Boarding time (departure forward, arrival in reverse).
    pub time: i32,
    pub earliest_board_time: i32,
    pub constraint: TransferConstraint,
    /// The transfer that decided the boarding; `None` when a trip was
    /// boarded past a not-allowed one.
    pub transfer_id: Option<TransferId>,
    pub priority: TransferPriority,
}

impl BoardOrAlightEvent<'_> {
    /// False if the search resolved to a transfer that may not be made.
    pub fn is_transfer_allowed(&self) -> bool {
        !self.constraint.is_not_allowed()
    }

    /// Generalized cost the transfer's priority adds to the journey.
    pub fn transfer_cost(&self) -> i32 {
        self.priority.cost()
    }
}
