//! Shared test infrastructure for service-level tests.

pub(crate) mod fixtures;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
