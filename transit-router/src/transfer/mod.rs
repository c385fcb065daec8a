//! Constrained transfers: guaranteed, stay-seated and forbidden connections
//! between specific trips, routes or stops.

mod constraint;
mod service;

pub use constraint::{
    ConstrainedTransfer, TransferConstraint, TransferPoint, TransferPriority, TripStop,
};
pub use service::TransferService;
