//! Last-resort error translation: panics become 500 envelopes, and error
//! details are exposed outside production.

use std::any::Any;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::Environment;
use crate::errors::{AppError, ErrorBody, ErrorReport};

/// Re-render error responses with a `stack` field unless running in production.
pub async fn expose_error_details(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if environment.is_production() {
        return response;
    }

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let body = ErrorBody {
        success: false,
        message: report.message,
        stack: Some(report.detail),
    };
    (response.status(), Json(body)).into_response()
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
