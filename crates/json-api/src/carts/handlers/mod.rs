//! Cart Handlers

pub(crate) mod active;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod reorder;
pub(crate) mod upsert;
