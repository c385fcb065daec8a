//! Static transit data: trips, patterns, service days and the layer that
//! holds them.

mod pattern;
mod pattern_for_date;
mod source;
mod street_transfer;
mod transit_layer;
mod trip_times;

pub use pattern::RoutingTripPattern;
pub use pattern_for_date::TripPatternForDate;
pub use source::{ScheduleSource, TransferSource};
pub use street_transfer::StreetTransfer;
pub use transit_layer::{TransitLayer, TransitLayerBuilder};
pub use trip_times::TripTimes;
