//! Request-scoped structures read by the journey search.

pub mod constrained;
mod merged_timetable;
mod timetable_builder;
mod transfer_cache;
mod transfer_index;
mod transit_data;
mod trip_schedule;

pub use merged_timetable::MergedTimetable;
pub use timetable_builder::{RequestTimetables, TimetableBuilder};
pub use transfer_cache::TransferLegCache;
pub use transfer_index::{RaptorTransfer, RaptorTransferIndex};
pub use transit_data::{RequestTransitData, TransitDataProvider};
pub use trip_schedule::TripScheduleWithOffset;
