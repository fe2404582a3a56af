//! Pickup point domain, per-pickup-point workflow engine and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod locks;
pub mod memory;
pub mod metrics;
pub mod store;

#[cfg(test)]
mod test;

mod uuids;
