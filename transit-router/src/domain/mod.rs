//! Domain types shared by the static schedule and the request structures.
//!
//! Identity is always carried by small integer ids assigned when the
//! dataset is loaded, never by object addresses.

mod access;
mod ids;
mod mode;
mod time;

pub use access::{Accessibility, BikeAccess, PickDrop};
pub use ids::{PatternId, RouteId, StopIndex, TransferId, TransitLayerId, TripId};
pub use mode::TransitMode;
pub use time::{
    SECONDS_PER_DAY, TimeError, add_days, format_service_time, parse_service_time,
    seconds_between, service_dates, start_of_service,
};
