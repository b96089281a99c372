//! HTTP API over the address lookup service
//!
//! Routes:
//! - `GET /ping` returns `{"ok": true, "nb_cases": n}`
//! - `GET /score_by_address?address=...`
//! - `GET /score_structured?street=...&number=...&postal_code=...&city=...`
//!
//! Failures are JSON bodies of the form `{"detail": "..."}`. Every response
//! allows any origin, and `OPTIONS` preflight requests get an empty 204.

use crate::app::adapters::geocoder::Geocoder;
use crate::app::adapters::projection::CoordinateProjector;
use crate::app::services::address_lookup::{
    AddressLookupService, AddressScoreResponse, StructuredAddress, StructuredScoreResponse,
};
use crate::constants::{ADDRESS_NOT_FOUND_DETAIL, NOT_COVERED_DETAIL};
use crate::{Error, Result};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{
        HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

type SharedService<G, P> = Arc<AddressLookupService<G, P>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub ok: bool,
    pub nb_cases: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub address: String,
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Crate error carried to the HTTP boundary
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(Error::data_validation(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::AddressNotFound { .. } | Error::NotCovered { .. } => StatusCode::NOT_FOUND,
            Error::DataValidation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Geocoding { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match &self.0 {
            Error::AddressNotFound { .. } => ADDRESS_NOT_FOUND_DETAIL.to_string(),
            Error::NotCovered { .. } => NOT_COVERED_DETAIL.to_string(),
            Error::DataValidation { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {:#}", self.0);
        }

        (
            status,
            Json(ErrorBody {
                detail: self.detail(),
            }),
        )
            .into_response()
    }
}

/// Build the API router around a shared lookup service
pub fn router<G, P>(service: SharedService<G, P>) -> Router
where
    G: Geocoder + 'static,
    P: CoordinateProjector + 'static,
{
    Router::new()
        .route("/ping", get(ping::<G, P>).options(preflight))
        .route(
            "/score_by_address",
            get(score_by_address::<G, P>).options(preflight),
        )
        .route(
            "/score_structured",
            get(score_structured::<G, P>).options(preflight),
        )
        .layer(middleware::map_response(allow_any_origin))
        .with_state(service)
}

/// Bind the listening socket
pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("Failed to bind {}: {}", addr, e)))
}

/// Serve the router until `shutdown` completes
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr: SocketAddr = listener
        .local_addr()
        .map_err(|e| Error::server(format!("Failed to read local address: {}", e)))?;
    info!("Serving accessibility API on http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn allow_any_origin(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn ping<G, P>(State(service): State<SharedService<G, P>>) -> Json<PingResponse>
where
    G: Geocoder + 'static,
    P: CoordinateProjector + 'static,
{
    Json(PingResponse {
        ok: true,
        nb_cases: service.cell_count(),
    })
}

async fn score_by_address<G, P>(
    State(service): State<SharedService<G, P>>,
    query: std::result::Result<Query<AddressQuery>, QueryRejection>,
) -> std::result::Result<Json<AddressScoreResponse>, ApiError>
where
    G: Geocoder + 'static,
    P: CoordinateProjector + 'static,
{
    let Query(query) = query?;
    Ok(Json(service.score_by_address(&query.address).await?))
}

async fn score_structured<G, P>(
    State(service): State<SharedService<G, P>>,
    query: std::result::Result<Query<StructuredAddress>, QueryRejection>,
) -> std::result::Result<Json<StructuredScoreResponse>, ApiError>
where
    G: Geocoder + 'static,
    P: CoordinateProjector + 'static,
{
    let Query(address) = query?;
    Ok(Json(service.score_structured(address).await?))
}
