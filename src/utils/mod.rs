//! Utility functions for working with record batches, logging and tests

pub mod arrow;
pub mod logging;
