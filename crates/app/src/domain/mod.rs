//! Pickup Point Domain Concerns

pub mod listing;
pub mod pickup_points;
pub mod products;
pub mod receptions;
pub mod workflow;
