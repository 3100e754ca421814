//! Business logic layer.

pub mod activity;
pub mod metrics;
