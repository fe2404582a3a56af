//! Reception Handlers

pub(crate) mod close;
pub(crate) mod create;
