//! Domain models and DTOs.

pub mod activity;
pub mod metric;
pub mod pagination;
