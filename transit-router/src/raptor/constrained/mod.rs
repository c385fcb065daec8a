//! Boarding with constrained transfers.
//!
//! When the search arrives at a stop on some trip and considers boarding a
//! pattern there, a guaranteed or stay-seated transfer may allow boarding
//! without slack, and a not-allowed transfer may forbid a specific trip.
//! [`ConstrainedTransferIndex`] attaches the dataset's transfers to the
//! request's patterns, and [`ConstrainedBoardingSearch`] resolves the trip to
//! board.

mod direction;
mod event;
mod index;
mod search;

pub use direction::{DEFAULT_SEARCH_WINDOW_SECONDS, SearchDirection, TripIndices};
pub use event::BoardOrAlightEvent;
pub use index::{ConstrainedTransferIndex, TransfersByStopPosition};
pub use search::ConstrainedBoardingSearch;
