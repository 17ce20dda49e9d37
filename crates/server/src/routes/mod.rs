//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (database)
//!
//! # Auth (OTP, rate limited per client IP)
//! POST /request-otp                  - Issue a one-time code
//! POST /verify-otp                   - Exchange a code for the user
//!
//! # Shipments
//! POST /api/shipment/create          - Create a shipment
//! GET  /api/shipment/all             - List shipments (?userId=)
//! GET  /api/shipment/{id}            - Shipment detail
//! POST /api/shipment/update-status   - Change a shipment's status
//!
//! # Journey wizard
//! GET  /api/journey/steps            - Step catalogue
//! GET  /api/journey/{shipmentId}     - Saved progress
//! POST /api/journey/update           - Save one step
//! POST /update-journey               - Same, legacy path
//!
//! # Finance
//! GET  /api/finance/all              - Invoices and totals (?userId=)
//! POST /api/finance/create           - Raise an invoice
//! POST /api/finance/pay              - Mark an invoice paid
//!
//! # Customs
//! GET  /api/customs                  - Declarations (?userId=)
//! POST /api/customs/create           - File a declaration
//!
//! # Documents
//! GET  /api/documents/{shipmentId}   - Documents of a shipment
//! POST /api/documents/upload         - Record an upload
//!
//! # Calculators (stateless)
//! GET  /api/hscode/search            - HS code lookup (?q=)
//! POST /api/quote/calculate          - Freight options
//! POST /api/cost/estimate            - Landed cost in INR
//! GET  /api/ports/recommend          - Ports for a country (?country=)
//! GET  /api/schedules/search         - Sailings (?origin=&dest=)
//! GET  /api/tracking/search          - Container tracking (?id=)
//! ```

pub mod auth;
pub mod customs;
pub mod documents;
pub mod extract;
pub mod finance;
pub mod hscode;
pub mod journey;
pub mod ports;
pub mod quote;
pub mod schedules;
pub mod shipments;
pub mod tracking;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use smart_shipping_core::{TradeDirection, UserId};

use crate::error::{AppError, Result};
use crate::middleware::otp_rate_limiter;
use crate::state::AppState;

/// Plain acknowledgement body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
}

impl Ack {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// A required text field, trimmed.
///
/// # Errors
///
/// Returns `AppError::BadRequest("{field} is required")` when the value is
/// missing or blank.
pub fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Treat blank strings as absent.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read a trade direction from a form value, ignoring case.
#[must_use]
pub fn parse_direction(raw: &str) -> Option<TradeDirection> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "export" => Some(TradeDirection::Export),
        "import" => Some(TradeDirection::Import),
        _ => None,
    }
}

/// The `userId` that scopes a dashboard query.
///
/// # Errors
///
/// Returns `AppError::BadRequest` when it is absent.
pub fn require_user(user_id: Option<UserId>) -> Result<UserId> {
    user_id.ok_or_else(|| AppError::BadRequest("User ID required".to_string()))
}

/// Create the OTP auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/request-otp", post(auth::request_otp))
        .route("/verify-otp", post(auth::verify_otp))
        .layer(otp_rate_limiter())
}

/// Create the shipment routes router.
pub fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(shipments::create))
        .route("/all", get(shipments::list))
        .route("/update-status", post(shipments::update_status))
        .route("/{id}", get(shipments::show))
}

/// Create the journey routes router.
pub fn journey_routes() -> Router<AppState> {
    Router::new()
        .route("/steps", get(journey::steps))
        .route("/update", post(journey::save_step))
        .route("/{shipmentId}", get(journey::show))
}

/// Create the finance routes router.
pub fn finance_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(finance::list))
        .route("/create", post(finance::create))
        .route("/pay", post(finance::pay))
}

/// Create the customs routes router.
pub fn customs_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customs::list))
        .route("/create", post(customs::create))
}

/// Create the document routes router.
pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(documents::upload))
        .route("/{shipmentId}", get(documents::list))
}

/// Create the stateless calculator routes router.
pub fn calculator_routes() -> Router<AppState> {
    Router::new()
        .route("/api/hscode/search", get(hscode::search))
        .route("/api/quote/calculate", post(quote::calculate))
        .route("/api/cost/estimate", post(quote::estimate))
        .route("/api/ports/recommend", get(ports::recommend))
        .route("/api/schedules/search", get(schedules::search))
        .route("/api/tracking/search", get(tracking::search))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        // OTP auth
        .merge(auth_routes())
        // Legacy journey save path
        .route("/update-journey", post(journey::save_step))
        // Stores
        .nest("/api/shipment", shipment_routes())
        .nest("/api/journey", journey_routes())
        .nest("/api/finance", finance_routes())
        .nest("/api/customs", customs_routes())
        .nest("/api/documents", document_routes())
        // Calculators
        .merge(calculator_routes())
}
