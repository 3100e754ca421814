//! HTTP edge layer: CORS, request logging, error translation, extractors.

pub mod cors;
pub mod errors;
pub mod extract;
pub mod logging;
