//! Pickup Points

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::PickupPointsServiceError;
pub use service::*;
