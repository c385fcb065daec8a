//! Request preferences and the filters derived from them.

mod filter;
mod routing_request;

pub use filter::{BoardAlight, RequestFilter};
pub use routing_request::{
    OptimizeType, RoutingRequest, StreetMode, StreetPreferences, StreetRelevantOptions,
    WheelchairPreferences,
};
