//! Diagnostic endpoints used while wiring up deployments: CORS echo and
//! store connectivity.

use axum::{
    extract::State,
    http::{
        header::{ORIGIN, USER_AGENT},
        HeaderMap, Method,
    },
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::db::ConnectionState;
use crate::errors::ApiResponse;
use crate::middleware::extract::Payload;
use crate::AppState;

const NO_ORIGIN: &str = "No origin header";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsProbe {
    pub origin: String,
    pub method: String,
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsEcho {
    pub origin: String,
    pub received_data: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbStatus {
    pub status: ConnectionState,
    pub ready_state: u8,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
}

fn header_text(headers: &HeaderMap, name: axum::http::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// GET /api/test/cors
pub async fn cors_probe(method: Method, headers: HeaderMap) -> Json<ApiResponse<CorsProbe>> {
    let probe = CorsProbe {
        origin: header_text(&headers, ORIGIN).unwrap_or_else(|| NO_ORIGIN.to_string()),
        method: method.to_string(),
        user_agent: header_text(&headers, USER_AGENT),
    };
    ApiResponse::success(
        "CORS test successful - Backend is accessible from frontend",
        probe,
    )
}

/// POST /api/test/cors: echoes the parsed body.
pub async fn cors_echo(
    headers: HeaderMap,
    Payload(body): Payload<Value>,
) -> Json<ApiResponse<CorsEcho>> {
    let echo = CorsEcho {
        origin: header_text(&headers, ORIGIN).unwrap_or_else(|| NO_ORIGIN.to_string()),
        received_data: body,
    };
    ApiResponse::success("CORS POST test successful", echo)
}

/// GET /api/test/db-connection
pub async fn db_connection(State(state): State<AppState>) -> Json<ApiResponse<DbStatus>> {
    let info = state.store.connection_info().await;
    let status = DbStatus {
        status: info.state,
        ready_state: info.state.ready_state(),
        host: info.host,
        port: info.port,
        name: info.name,
    };
    ApiResponse::success("Database connection test completed", status)
}
