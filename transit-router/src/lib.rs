//! Transit router request adapter.
//!
//! Turns a static, multi-day transit timetable into the per-request search
//! structures consumed by a Range-RAPTOR journey search, and resolves
//! constrained transfers (guaranteed, stay-seated, not-allowed) while
//! boarding.

pub mod config;
pub mod domain;
pub mod error;
pub mod model;
pub mod raptor;
pub mod request;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::TransitTuningConfig;
pub use error::TransitDataError;
