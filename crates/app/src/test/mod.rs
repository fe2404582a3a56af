//! Service test infrastructure.


pub(crate) use context::TestContext;
