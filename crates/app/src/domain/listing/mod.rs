//! Pickup Point Listing

pub mod data;
pub mod errors;
pub mod service;

pub use errors::ListingServiceError;
pub use service::*;
